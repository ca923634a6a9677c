use crate::routes::router;
use crate::state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds the listener and serves the chart API until shutdown.
///
/// # Errors
/// Returns an error if binding or serving fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "chart API listening");
    axum::serve(listener, app).await
}
