use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use querygraph::{
    config::{AppConfig, LoggingConfig},
    logging::init_tracing,
    middleware::{catch_panic_layer, json_error_middleware},
    query_api::HttpQueryApi,
    routes::router,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            init_tracing(&LoggingConfig::default());
            return Err(err);
        }
    };
    init_tracing(&cfg.logging);

    let query_api = HttpQueryApi::new(&cfg.query_api.base_url, cfg.query_api.timeout())
        .context("failed to build query API client")?;
    tracing::info!(base_url = %query_api.base_url(), "query API configured");

    let state = AppState::new(cfg, Arc::new(query_api));

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", state.config.general.host, state.config.general.port)
        .parse()
        .context("invalid host/port")?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
