//! Router configuration for the PICCULL Web API.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    create_batch, get_folder, get_thumbnail, list_folders, list_images, save_selected, AppState,
};
use super::middleware::create_cors_layer;

/// OpenAPI documentation for the PICCULL API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PICCULL API",
        description = "Browse, compare and sort photographs over HTTP"
    ),
    servers((url = "/api")),
    paths(
        crate::web::handlers::folder::list_folders,
        crate::web::handlers::folder::get_folder,
        crate::web::handlers::image::list_images,
        crate::web::handlers::image::get_thumbnail,
        crate::web::handlers::image::create_batch,
        crate::web::handlers::image::save_selected,
    ),
    components(schemas(
        crate::gallery::FolderInfo,
        crate::gallery::FolderRef,
        crate::gallery::ImageRef,
        crate::image::ImageInfo,
        crate::image::SaveReport,
        crate::web::dto::BatchRequest,
        crate::web::dto::BatchResponse,
        crate::web::dto::SaveRequest,
    )),
    tags(
        (name = "folders", description = "Folder browsing"),
        (name = "images", description = "Image metadata and thumbnails"),
        (name = "batches", description = "Comparison batches and saving")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/folders", get(list_folders))
        .route("/folders/*path", get(get_folder))
        .route("/images/*folder", get(list_images))
        .route("/thumbnail/*path", get(get_thumbnail))
        .route("/batch", post(create_batch))
        .route("/save", post(save_selected));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the Swagger UI router.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Create a static file router with SPA fallback.
///
/// Unmatched paths fall back to `index.html` so client-side routing keeps
/// working on deep links. Returns `None` when the directory doesn't exist.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let dir = Path::new(static_path);
    if !dir.is_dir() {
        tracing::debug!(path = static_path, "static directory not found, skipping");
        return None;
    }

    let serve = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
    Some(Router::new().fallback_service(serve))
}
