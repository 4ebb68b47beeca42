use std::sync::Arc;
use std::time::Duration;

use dataset::FrameStore;
use moka::future::Cache;

use crate::schemas::{AppState, DataSources};

/// Initialize application state from the configured source locations.
/// Sources are not validated here: a file that appears later is picked
/// up on first access, and `stockdash inspect` exists for up-front
/// checks.
pub fn initialize_app_state(sources: DataSources) -> AppState {
    tracing::info!(
        pred_dir = %sources.pred_dir.display(),
        pred_path = %sources.pred_path.display(),
        metrics_path = %sources.metrics_path.display(),
        "Initializing application state"
    );

    // Initialize caches: parsed frames by (path, mtime), assembled
    // views by request parameters.
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    AppState {
        sources: Arc::new(sources),
        store: Arc::new(FrameStore::with_defaults()),
        cache,
    }
}
