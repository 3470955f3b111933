use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api;
use crate::config::ServerConfig;
use crate::engine::EngineHandle;

pub fn app(config: &ServerConfig, engine: EngineHandle) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(engine))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
}

pub async fn run(config: &ServerConfig, engine: EngineHandle) -> Result<()> {
    let app = app(config, engine);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutting down");
            }
        })
        .await
        .context("Web server failed")
}
