use anyhow::{bail, Result};
use dataset::columns::{self, ColumnRoleMap};
use dataset::{loader, FrameStore, LoadedFrame};
use tracing::{info, warn};

use crate::schemas::DataSources;

/// Load each configured source and report what the dashboards will see.
pub fn inspect(sources: DataSources) -> Result<()> {
    let store = FrameStore::with_defaults();
    let mut failures = 0usize;

    match loader::list_company_files(&sources.pred_dir) {
        Ok(files) => {
            info!(
                "{}: {} company file(s)",
                sources.pred_dir.display(),
                files.len()
            );
            for (company, path) in files {
                match store.load(&path) {
                    Ok(loaded) => {
                        if !report(&company, &loaded, columns::MANDATORY_PREDICTION_ROLES) {
                            failures += 1;
                        }
                    }
                    Err(e) => {
                        warn!("{}: {}", company, e);
                        failures += 1;
                    }
                }
            }
        }
        Err(e) => {
            warn!("{}: {}", sources.pred_dir.display(), e);
            failures += 1;
        }
    }

    let combined = [
        ("daily predictions", &sources.pred_path, columns::DAILY_PREDICTION_ROLES),
        ("model metrics", &sources.metrics_path, columns::METRICS_ROLES),
    ];
    for (label, path, required) in combined {
        match store.load(path) {
            Ok(loaded) => {
                if !report(label, &loaded, required) {
                    failures += 1;
                }
            }
            Err(e) => {
                warn!("{}: {}", label, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} source(s) failed inspection");
    }
    info!("All sources inspected successfully");
    Ok(())
}

/// Log one source's shape; false when required columns are missing.
fn report(label: &str, loaded: &LoadedFrame, required: &[&str]) -> bool {
    let roles = ColumnRoleMap::from_frame(&loaded.frame);
    match roles.require(required) {
        Ok(_) => {
            info!(
                "{}: {} rows, date column {:?}",
                label,
                loaded.frame.height(),
                loaded.date_column
            );
            true
        }
        Err(e) => {
            warn!("{}: {}", label, e);
            false
        }
    }
}
