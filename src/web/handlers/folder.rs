//! Folder browsing handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::gallery::FolderInfo;
use crate::web::error::ApiError;
use crate::web::handlers::{join_error, AppState};

/// GET /api/folders - List the photo root.
#[utoipa::path(
    get,
    path = "/folders",
    tag = "folders",
    responses(
        (status = 200, description = "Synthetic root folder with its direct contents", body = Vec<FolderInfo>),
        (status = 404, description = "Photo root does not exist")
    )
)]
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FolderInfo>>, ApiError> {
    let folders = tokio::task::spawn_blocking(move || state.folders.list_roots())
        .await
        .map_err(join_error)??;

    Ok(Json(folders))
}

/// GET /api/folders/*path - List the direct contents of a folder.
#[utoipa::path(
    get,
    path = "/folders/{path}",
    tag = "folders",
    params(
        ("path" = String, Path, description = "Folder path relative to the photo root")
    ),
    responses(
        (status = 200, description = "Folder contents", body = FolderInfo),
        (status = 400, description = "Path is not a folder"),
        (status = 403, description = "Path escapes the photo root"),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn get_folder(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<FolderInfo>, ApiError> {
    let folder = path.trim_start_matches('/').to_string();

    let info = tokio::task::spawn_blocking(move || state.folders.contents(&folder))
        .await
        .map_err(join_error)??;

    Ok(Json(info))
}
