//! Request handlers for the PICCULL Web API.

pub mod folder;
pub mod image;

pub use self::folder::*;
pub use self::image::*;

use std::path::PathBuf;

use tokio::task::JoinError;

use crate::gallery::FolderService;
use crate::image::ImageService;
use crate::web::error::ApiError;
use crate::Result;

/// Shared application state for handlers.
pub struct AppState {
    /// Folder listing service.
    pub folders: FolderService,
    /// Image metadata, thumbnail and batch service.
    pub images: ImageService,
}

impl AppState {
    /// Create application state over a photo root and thumbnail cache dir.
    ///
    /// The cache directory is created if it doesn't exist.
    pub fn new(base_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        Ok(Self {
            folders: FolderService::new(&base_dir),
            images: ImageService::new(base_dir, cache_dir)?,
        })
    }
}

/// Map a blocking-task join failure to an API error.
pub(crate) fn join_error(e: JoinError) -> ApiError {
    tracing::error!("blocking task failed: {}", e);
    ApiError::internal("An internal error occurred")
}
