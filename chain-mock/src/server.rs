//! Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::MockChain;

pub fn create_router(chain: Arc<MockChain>) -> Router {
    // Configure CORS to allow requests from wallet frontend/tests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Mocked remote APIs
        .route("/api/v3/simple/price", get(simple_price))
        .route("/rpc", post(json_rpc))
        .route("/api", get(transaction_status))

        // Test control endpoints
        .route("/mock/faults", post(set_faults))
        .route("/mock/prices", post(set_price))
        .route("/mock/tx/:hash/status", post(set_status))
        .route("/mock/transfers", get(list_transfers))
        .route("/mock/stats", get(stats))

        // Shared state
        .with_state(chain)

        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(chain: Arc<MockChain>, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(chain);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("🚀 Chain mock listening on http://{}", addr);
    log::info!("💱 Prices: GET /api/v3/simple/price");
    log::info!("📨 Provider: POST /rpc");
    log::info!("🔎 Status: GET /api?module=transaction&action=getstatus");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve on an ephemeral localhost port in the background (for tests)
pub async fn spawn_local(chain: Arc<MockChain>) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(chain);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("Chain mock stopped: {}", e);
        }
    });
    log::debug!("Chain mock spawned on {}", addr);

    Ok((addr, handle))
}
