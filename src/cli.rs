use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{inspect, serve};

use crate::schemas::DataSources;

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(about = "Stock prediction dashboard server and data-file tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Source-file locations shared by all subcommands.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Directory scanned for per-company intraday prediction CSVs
    ///
    /// Each `<Company>.csv` file becomes one selectable company on the
    /// intraday dashboard.
    #[arg(long, env = "PRED_DIR", default_value = "data/pred_files")]
    pub pred_dir: PathBuf,

    /// Combined daily predictions file
    ///
    /// Expected columns: date, company_name, target, y_true, y_pred.
    #[arg(
        long,
        env = "PRED_PATH",
        default_value = "data/daily_predictions_all_companies.csv"
    )]
    pub pred_path: PathBuf,

    /// Per-company model metrics file
    ///
    /// Expected columns: company_name plus <target>_RMSE, <target>_MAE,
    /// <target>_MAPE and <target>_R2 per target field.
    #[arg(
        long,
        env = "METRICS_PATH",
        default_value = "data/daily_model_metrics_all_companies.csv"
    )]
    pub metrics_path: PathBuf,
}

impl SourceArgs {
    pub fn into_sources(self) -> DataSources {
        DataSources {
            pred_dir: self.pred_dir,
            pred_path: self.pred_path,
            metrics_path: self.metrics_path,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard API server
    Serve {
        #[command(flatten)]
        sources: SourceArgs,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Validate the configured data files and report their shape
    ///
    /// Loads every source the dashboards would read and prints the
    /// detected date column, required-column resolution and row count.
    /// Exits nonzero when a source fails.
    Inspect {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                sources,
                bind_address,
            } => {
                serve(sources.into_sources(), &bind_address).await?;
            }
            Commands::Inspect { sources } => {
                inspect(sources.into_sources())?;
            }
        }
        Ok(())
    }
}
