use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use doi_core::application::LookupService;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod error;
pub mod routes;

use routes::lookup_handler;

/// Every path and every method goes to the same lookup
pub fn router(service: Arc<LookupService>) -> Router {
    Router::new()
        .fallback(lookup_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn serve(address: SocketAddr, service: Arc<LookupService>) -> std::io::Result<()> {
    let app = router(service);

    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
