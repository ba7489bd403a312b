//! Image metadata and save-operation types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Resolved metadata for a single image file.
///
/// Immutable once resolved; the metadata cache memoizes the first
/// resolution per path.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Filename.
    pub name: String,
    /// Relative path under the photo root.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// File modification time.
    pub mod_time: DateTime<Utc>,
    /// Pixel width; 0 when the image could not be decoded.
    pub width: u32,
    /// Pixel height; 0 when the image could not be decoded.
    pub height: u32,
    /// EXIF orientation tag (1-8); 0 when unset or unreadable.
    pub orientation: u16,
    /// Thumbnail endpoint for this image (size is a request-time parameter).
    pub thumbnail_url: String,
}

/// Outcome of moving one selected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The file was renamed into the target folder.
    Moved,
    /// A file indistinguishable from the source (same size and mtime)
    /// already exists at the destination; nothing was moved.
    Conflict,
    /// Sanitization, destination setup, or the rename itself failed.
    Failed,
}

/// Aggregated result of a save operation.
///
/// The success, failed and conflict lists partition the requested paths
/// exactly: every input path appears in exactly one of them.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    /// Paths moved into the target folder.
    pub success: Vec<String>,
    /// Paths that could not be moved.
    pub failed: Vec<String>,
    /// Paths skipped because an identical file already exists at the
    /// destination.
    pub conflicts: Vec<String>,
    /// Resolved target folder name.
    pub target_folder: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_image_info_serializes_camel_case() {
        let info = ImageInfo {
            name: "beach.jpg".to_string(),
            path: "vacation/beach.jpg".to_string(),
            size: 1234,
            mod_time: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            width: 500,
            height: 300,
            orientation: 1,
            thumbnail_url: "/api/thumbnail/vacation/beach.jpg".to_string(),
        };

        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["name"], "beach.jpg");
        assert_eq!(json["modTime"], "2026-01-02T03:04:05Z");
        assert_eq!(json["thumbnailUrl"], "/api/thumbnail/vacation/beach.jpg");
        assert_eq!(json["width"], 500);
    }

    #[test]
    fn test_save_report_serializes_camel_case() {
        let report = SaveReport {
            success: vec!["a.jpg".to_string()],
            failed: vec![],
            conflicts: vec![],
            target_folder: "saved".to_string(),
        };

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["success"][0], "a.jpg");
        assert_eq!(json["targetFolder"], "saved");
        assert!(json["failed"].as_array().unwrap().is_empty());
    }
}
