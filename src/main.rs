use gateway_links::{
    adapters::{router::build_router, state::AppState},
    domain::config::settings::AppConfig,
    services,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("ERROR: invalid configuration in environment");

    tracing::info!(
        "Starting gateway-links against {} (gateway {})",
        config.api_url,
        config.gateway_url
    );

    let ipfs_service =
        services::create_ipfs_service(&config).expect("Failed to create IPFS service");

    let port = config.port;
    let router = build_router(AppState::new(config, ipfs_service));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
