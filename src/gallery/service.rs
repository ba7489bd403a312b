//! Folder listing service.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::image::is_image_file;
use crate::sanitize;
use crate::{PiccullError, Result};

use super::{FolderInfo, FolderRef, ImageRef};

/// Display name used for the photo root.
const ROOT_NAME: &str = "Root";

/// Read-only directory listings over the photo root.
///
/// Listing is side-effect free: the same directory snapshot always
/// produces the same result.
#[derive(Debug, Clone)]
pub struct FolderService {
    base_dir: PathBuf,
}

impl FolderService {
    /// Create a new folder service rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the photo root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// List the synthetic root entry with its direct subfolders and images.
    pub fn list_roots(&self) -> Result<Vec<FolderInfo>> {
        Ok(vec![self.contents("")?])
    }

    /// List the direct contents of a folder.
    ///
    /// Hidden entries (leading dot) are excluded; files are included only
    /// when their extension is a supported image format. Entries are sorted
    /// by name so a fixed directory snapshot always lists in the same order.
    pub fn contents(&self, path: &str) -> Result<FolderInfo> {
        let (clean, full) = sanitize::resolve(&self.base_dir, path)?;

        let meta = fs::metadata(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PiccullError::NotFound(format!("folder {clean:?}")),
            _ => PiccullError::Io(e),
        })?;
        if !meta.is_dir() {
            return Err(PiccullError::InvalidFolder(clean));
        }

        let name = if clean.is_empty() {
            ROOT_NAME.to_string()
        } else {
            basename(&clean).to_string()
        };

        let mut folder = FolderInfo {
            name,
            path: clean.clone(),
            images: Vec::new(),
            subfolders: Vec::new(),
        };

        let mut entries: Vec<fs::DirEntry> = fs::read_dir(&full)?.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let file_name = entry.file_name();
            let Some(entry_name) = file_name.to_str() else {
                continue;
            };
            if entry_name.starts_with('.') {
                continue;
            }

            let entry_path = sanitize::join_relative(&clean, entry_name);
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                folder.subfolders.push(FolderRef {
                    name: entry_name.to_string(),
                    path: entry_path,
                });
            } else if is_image_file(entry_name) {
                folder.images.push(ImageRef {
                    name: entry_name.to_string(),
                    path: entry_path,
                });
            }
        }

        Ok(folder)
    }
}

/// Last path segment of a cleaned relative path.
fn basename(clean: &str) -> &str {
    clean.rsplit('/').next().unwrap_or(clean)
}
