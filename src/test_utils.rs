#[cfg(test)]
pub mod test_utils {
    use crate::config::initialize_app_state;
    use crate::router::create_router;
    use crate::schemas::DataSources;
    use axum::Router;
    use std::fs;
    use std::path::Path;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Intraday fixture with a deliberately unsorted date column; the
    /// latest row after sorting is 2023-01-03.
    pub const ACME_CSV: &str = "\
date,actual_low,predicted_low,actual_high,predicted_high,close,buy_sell_label
2023-01-02,99.0,98.5,110.0,111.0,105.0,hold
2023-01-01,100.0,101.5,112.0,113.0,106.0,buy
2023-01-03,98.0,97.5,109.0,108.0,104.0,sell
";

    /// Intraday fixture lacking the mandatory low columns.
    pub const GLOBEX_CSV: &str = "\
date,open,close
2023-01-01,10.0,11.0
";

    pub const DAILY_CSV: &str = "\
date,company_name,target,y_true,y_pred
2023-01-02,Acme,close,102.0,101.5
2023-01-01,Acme,close,100.0,101.0
2023-01-01,Acme,high,110.0,112.0
2023-01-01,Globex,close,50.0,49.0
";

    /// Metrics for Acme only; Globex has no row on purpose.
    pub const METRICS_CSV: &str = "\
company_name,close_RMSE,close_MAE,close_MAPE,close_R2,high_RMSE,high_MAE,high_MAPE,high_R2
Acme,1.2345,1.0,3.2,0.98,2.5,2.0,4.5,0.9
";

    /// Write the standard fixture CSVs into `dir` and return sources
    /// pointing at them.
    pub fn setup_test_sources(dir: &Path) -> DataSources {
        let pred_dir = dir.join("pred_files");
        fs::create_dir_all(&pred_dir).expect("Failed to create predictions directory");
        fs::write(pred_dir.join("Acme.csv"), ACME_CSV).expect("Failed to write Acme fixture");
        fs::write(pred_dir.join("Globex.csv"), GLOBEX_CSV).expect("Failed to write Globex fixture");

        let pred_path = dir.join("daily_predictions.csv");
        fs::write(&pred_path, DAILY_CSV).expect("Failed to write daily predictions fixture");

        let metrics_path = dir.join("daily_metrics.csv");
        fs::write(&metrics_path, METRICS_CSV).expect("Failed to write metrics fixture");

        DataSources {
            pred_dir,
            pred_path,
            metrics_path,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment
    /// variable, defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing over fixture files in `dir`.
    pub fn setup_test_app(dir: &Path) -> Router {
        let _ = init_test_tracing();

        let state = initialize_app_state(setup_test_sources(dir));
        create_router(state)
    }
}
