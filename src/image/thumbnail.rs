//! Content-addressed thumbnail cache.
//!
//! One JPEG per (relative path, size) pair, keyed by a SHA-256 of the
//! cleaned relative path plus the requested size. A file present on disk
//! is an authoritative hit; source freshness is never re-checked.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{PiccullError, Result};

/// Thumbnail size used when the requested size is out of range.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Largest accepted thumbnail size.
pub const MAX_THUMBNAIL_SIZE: u32 = 1000;

/// JPEG quality for stored thumbnails.
const JPEG_QUALITY: u8 = 80;

/// Clamp a requested thumbnail size.
///
/// Values outside (0, [`MAX_THUMBNAIL_SIZE`]] fall back to
/// [`DEFAULT_THUMBNAIL_SIZE`].
pub fn clamp_size(size: u32) -> u32 {
    if size == 0 || size > MAX_THUMBNAIL_SIZE {
        DEFAULT_THUMBNAIL_SIZE
    } else {
        size
    }
}

/// Apply the geometric transform for an EXIF orientation tag.
///
/// Follows the standard EXIF orientation-to-transform table; 0 and 1 are
/// the identity.
pub fn apply_orientation(img: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        // 5 is a transpose (flip across the main diagonal)
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        // 7 is a transverse flip (flip across the anti-diagonal)
        7 => img.rotate90().flipv(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// On-disk thumbnail store.
///
/// Entries are never evicted; the directory is owned by the filesystem
/// independent of process lifetime.
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    cache_dir: PathBuf,
}

impl ThumbnailCache {
    /// Create a cache rooted at `cache_dir`, creating the directory if
    /// it doesn't exist.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache file path for a (cleaned relative path, size) pair.
    ///
    /// The key is deterministic, so repeated requests address the same
    /// file.
    pub fn entry_path(&self, relative_path: &str, size: u32) -> PathBuf {
        let hash = Sha256::digest(relative_path.as_bytes());
        self.cache_dir.join(format!("{hash:x}_{size}.jpg"))
    }

    /// Return the stored entry if it exists on disk.
    pub fn lookup(&self, relative_path: &str, size: u32) -> Option<PathBuf> {
        let path = self.entry_path(relative_path, size);
        path.is_file().then_some(path)
    }

    /// Encode `img` as JPEG and publish it under the cache key.
    ///
    /// The bytes go to a uniquely named temp file first and are renamed
    /// into place, so a concurrent [`lookup`](Self::lookup) never observes
    /// a partially written entry. On failure the temp file is removed and
    /// no entry becomes visible.
    pub fn store(&self, relative_path: &str, size: u32, img: &DynamicImage) -> Result<PathBuf> {
        let final_path = self.entry_path(relative_path, size);
        let tmp_path = self.cache_dir.join(format!(".tmp-{}.jpg", Uuid::new_v4()));

        if let Err(e) = write_jpeg(&tmp_path, img) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(final_path)
    }
}

/// Write an image as JPEG at the fixed thumbnail quality.
fn write_jpeg(path: &Path, img: &DynamicImage) -> Result<()> {
    let mut file = fs::File::create(path)?;
    let encoder = JpegEncoder::new_with_quality(&mut file, JPEG_QUALITY);

    // JPEG has no alpha channel; flatten to RGB first.
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| PiccullError::Encode(e.to_string()))?;

    Ok(())
}
