use std::net::SocketAddr;

use logbook_core::error::{LogbookError, Result};
use logbook_store::Store;

use crate::http;

pub async fn run_http_server(store: Store, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| LogbookError::Io(format!("failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, "http server listening");
    axum::serve(listener, http::router(store))
        .await
        .map_err(|e| LogbookError::Io(format!("HTTP server failed: {e}")))
}
