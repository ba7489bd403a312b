//! Folder listing types.
//!
//! Listing returns unresolved references only (name and relative path);
//! full image metadata is resolved lazily through the image service. The
//! split avoids ambiguity between "orientation 0" and "not yet resolved".

use serde::Serialize;
use utoipa::ToSchema;

/// Unresolved reference to a subfolder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FolderRef {
    /// Display name (filesystem basename).
    pub name: String,
    /// Relative path under the photo root.
    pub path: String,
}

/// Unresolved reference to an image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImageRef {
    /// Filename.
    pub name: String,
    /// Relative path under the photo root.
    pub path: String,
}

/// A folder and its direct contents (one level, non-recursive).
///
/// Constructed fresh on every request; never cached or persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FolderInfo {
    /// Display name; the photo root uses the fixed sentinel "Root".
    pub name: String,
    /// Relative path under the photo root (empty for the root).
    pub path: String,
    /// Image files directly inside the folder, sorted by name.
    pub images: Vec<ImageRef>,
    /// Subfolders directly inside the folder, sorted by name.
    pub subfolders: Vec<FolderRef>,
}
