use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use wallet_core::{WalletConfig, WalletStore};

use super::handlers;

pub fn create_router(store: Arc<WalletStore>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/state", get(handlers::get_state_handler))
        .route("/api/network/switch", post(handlers::switch_network_handler))
        .route("/api/prices/refresh", post(handlers::refresh_prices_handler))
        .route("/api/wallet/import", post(handlers::import_wallet_handler))
        .route("/api/address/verify", post(handlers::verify_address_handler))
        .route(
            "/api/transactions",
            get(handlers::list_transactions_handler)
                .post(handlers::send_transaction_handler)
                .delete(handlers::clear_transactions_handler),
        )
        .route(
            "/api/transactions/reload",
            post(handlers::reload_transactions_handler),
        )
        .route(
            "/api/transactions/total",
            get(handlers::total_amount_handler),
        )
        .route(
            "/api/transactions/:id/link",
            get(handlers::transaction_link_handler),
        )
        .route(
            "/api/transactions/:id/status",
            post(handlers::refresh_status_handler),
        )
        .layer(cors)
        .with_state(store)
}

/// Configure CORS based on environment
///
/// Set ALLOWED_ORIGINS="https://app.example.com,https://preview.example.com" for production.
/// If not set, allows any origin (development mode).
pub fn cors_from_env() -> CorsLayer {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| match s.trim().parse() {
                    Ok(origin) => Some(origin),
                    Err(e) => {
                        log::warn!("Ignoring invalid CORS origin '{}': {}", s, e);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build the store, run the startup refresh, and serve until shutdown
pub async fn start_server(addr: &str, config: WalletConfig) -> anyhow::Result<()> {
    let store = Arc::new(WalletStore::from_config(config)?);

    // Initial price load, like the screen's first render
    if store.fetch_prices().await.is_none() {
        log::warn!("Starting without live prices");
    }
    log::info!(
        "Loaded {} transaction(s), network {}",
        store.history().await.len(),
        store.current_network().await
    );

    let app = create_router(store.clone(), cors_from_env());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
    // History is persisted on every change, nothing to flush
}
