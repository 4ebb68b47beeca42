use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::initialize_app_state;
use crate::router::create_router;
use crate::schemas::DataSources;

pub async fn serve(sources: DataSources, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("Stockdash application starting up");
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    let state = initialize_app_state(sources);
    debug!("Application state initialized successfully");

    // Create router
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Stockdash API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
