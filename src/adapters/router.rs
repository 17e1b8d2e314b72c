use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::adapters::{
    controllers::{
        file_controller::FileController, health_controller::HealthController,
        link_controller::LinkController, size_controller::SizeController,
    },
    state::AppState,
};

async fn banner() -> &'static str {
    "gateway-links"
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // development only
        _ => CorsLayer::permissive(),
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = cors_layer(app_state.config.cors_allowed_origins.as_deref());

    Router::new()
        .route("/", get(banner))
        .route("/api/v1/health", get(HealthController::health_check))
        .route("/api/v1/size", get(SizeController::human_size))
        .route("/api/v1/links/download", post(LinkController::download_link))
        .route("/api/v1/links/share", post(LinkController::shareable_link))
        .route("/api/v1/files", post(FileController::upload_files))
        .layer(cors)
        .with_state(app_state)
}
