use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use nanoframe::{api, config, gemini, prompt, session};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().expect("Failed to load configuration");
    config::Config::print_env_vars();

    let state = Arc::new(api::routes::AppState {
        catalog: prompt::catalog::ModifierCatalog::new(),
        gemini_client: gemini::client::GeminiClient::from_config(&config),
        session: RwLock::new(session::Session::new()),
    });

    // Build our application with a route
    let app = Router::new()
        .route("/", get(api::handlers::root))
        .route("/generate", post(api::handlers::generate))
        .route("/enhance", post(api::handlers::enhance))
        .route("/compose", post(api::handlers::compose_prompt))
        .route("/history", get(api::handlers::history))
        .route("/restore", post(api::handlers::restore))
        .route("/image", get(api::handlers::get_image))
        .route("/options", get(api::handlers::options_categories))
        .route("/options/:category", get(api::handlers::options_in_category))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 8190", port_str);
        8190
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
