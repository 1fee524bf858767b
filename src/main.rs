mod api;
mod config;
mod context;
mod cookies;
mod gate;
mod preload;
mod relay;
mod routes;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::GatewayConfig::from_env().expect("invalid gateway configuration");
    let transport = relay::ReqwestTransport::new(config.timeouts).expect("backend HTTP client init failed");
    let port = config.port;
    tracing::info!(backend = %config.backend_url, cookie = %config.session_cookie_name, "backend configured");

    let state = state::AppState::new(config, Arc::new(transport));
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "presence-gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
