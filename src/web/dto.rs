//! Request and response DTOs for the PICCULL Web API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::image::{ImageInfo, DEFAULT_THUMBNAIL_SIZE};

/// Query parameters for thumbnail requests.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ThumbnailQuery {
    /// Bounding box edge in pixels; out-of-range values fall back to the
    /// default.
    #[serde(default = "default_thumbnail_size")]
    pub size: u32,
}

fn default_thumbnail_size() -> u32 {
    DEFAULT_THUMBNAIL_SIZE
}

/// POST /api/batch request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Relative paths of the images to compare.
    pub image_paths: Vec<String>,
}

/// POST /api/batch response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    /// Unique batch id.
    pub id: String,
    /// Resolved metadata for the batch images; unresolvable paths are
    /// dropped.
    pub images: Vec<ImageInfo>,
}

/// POST /api/save request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Batch the selection came from (informational).
    pub batch_id: String,
    /// Relative paths of the images to move.
    pub selected_paths: Vec<String>,
    /// Subfolder to move them into; defaults to "saved".
    #[serde(default)]
    pub target_folder: String,
}
