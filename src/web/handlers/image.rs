//! Image listing, thumbnail, batch and save handlers.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::image::{ImageInfo, SaveReport};
use crate::web::dto::{BatchRequest, BatchResponse, SaveRequest, ThumbnailQuery};
use crate::web::error::ApiError;
use crate::web::handlers::{join_error, AppState};

/// GET /api/images/*folder - List the images directly inside a folder.
#[utoipa::path(
    get,
    path = "/images/{folder}",
    tag = "images",
    params(
        ("folder" = String, Path, description = "Folder path relative to the photo root")
    ),
    responses(
        (status = 200, description = "Resolved image metadata, sorted by name", body = Vec<ImageInfo>),
        (status = 403, description = "Path escapes the photo root"),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Json<Vec<ImageInfo>>, ApiError> {
    let folder = folder.trim_start_matches('/').to_string();

    let images = tokio::task::spawn_blocking(move || state.images.list_images(&folder))
        .await
        .map_err(join_error)??;

    Ok(Json(images))
}

/// GET /api/thumbnail/*path - Serve a cached JPEG thumbnail.
#[utoipa::path(
    get,
    path = "/thumbnail/{path}",
    tag = "images",
    params(
        ("path" = String, Path, description = "Image path relative to the photo root"),
        ThumbnailQuery
    ),
    responses(
        (status = 200, description = "JPEG thumbnail bytes", content_type = "image/jpeg"),
        (status = 403, description = "Path escapes the photo root"),
        (status = 404, description = "Image not found")
    )
)]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    Query(query): Query<ThumbnailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let image_path = path.trim_start_matches('/').to_string();

    let thumb_path = tokio::task::spawn_blocking(move || {
        state.images.thumbnail(&image_path, query.size)
    })
    .await
    .map_err(join_error)??;

    let bytes = tokio::fs::read(&thumb_path).await.map_err(|e| {
        tracing::error!(path = %thumb_path.display(), "failed to read cached thumbnail: {}", e);
        ApiError::internal("An internal error occurred")
    })?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// POST /api/batch - Create a comparison batch.
#[utoipa::path(
    post,
    path = "/batch",
    tag = "batches",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Batch id and resolved images", body = BatchResponse),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn create_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let (id, images) = tokio::task::spawn_blocking(move || {
        state.images.create_batch(&req.image_paths)
    })
    .await
    .map_err(join_error)?;

    Ok(Json(BatchResponse { id, images }))
}

/// POST /api/save - Move selected images into a target subfolder.
#[utoipa::path(
    post,
    path = "/save",
    tag = "batches",
    request_body = SaveRequest,
    responses(
        (status = 200, description = "Per-path outcome of the move", body = SaveReport),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn save_selected(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveReport>, ApiError> {
    let report = tokio::task::spawn_blocking(move || {
        state
            .images
            .save_selected(&req.batch_id, &req.selected_paths, &req.target_folder)
    })
    .await
    .map_err(join_error)?;

    Ok(Json(report))
}
