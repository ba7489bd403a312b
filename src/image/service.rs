//! Image service: metadata resolution, thumbnails, batches and saving.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use image::imageops::FilterType;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::image::thumbnail::{self, ThumbnailCache};
use crate::image::types::{CommitOutcome, ImageInfo, SaveReport};
use crate::image::{is_image_file, metadata};
use crate::sanitize;
use crate::{PiccullError, Result};

/// Target folder used when a save request leaves it empty.
const DEFAULT_TARGET_FOLDER: &str = "saved";

/// Photo metadata, thumbnail and batch operations over the photo root.
///
/// The metadata cache and batch table live here, shared across requests
/// behind reader/writer locks. Both are process-memory only; thumbnails
/// persist in the on-disk cache.
pub struct ImageService {
    base_dir: PathBuf,
    thumbnails: ThumbnailCache,
    /// Memoized metadata keyed by the original (uncleaned) request path.
    /// Entries are never invalidated.
    cache: RwLock<HashMap<String, ImageInfo>>,
    /// Live comparison batches keyed by batch id.
    batches: RwLock<HashMap<String, Vec<ImageInfo>>>,
}

impl ImageService {
    /// Create a new image service.
    ///
    /// The thumbnail cache directory is created if it doesn't exist.
    pub fn new(base_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            base_dir: base_dir.into(),
            thumbnails: ThumbnailCache::new(cache_dir)?,
            cache: RwLock::new(HashMap::new()),
            batches: RwLock::new(HashMap::new()),
        })
    }

    /// Get the photo root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve full metadata for one image, memoized per path string.
    ///
    /// Repeated calls with the same input return the first resolution
    /// unchanged, even if the underlying file has since been modified.
    /// Dimension and EXIF failures are non-fatal and leave zero values.
    pub fn resolve(&self, path: &str) -> Result<ImageInfo> {
        if let Some(info) = self.cache.read().unwrap().get(path) {
            return Ok(info.clone());
        }

        let (clean, full) = sanitize::resolve(&self.base_dir, path)?;

        let meta = fs::metadata(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PiccullError::NotFound(format!("image {clean:?}")),
            _ => PiccullError::Io(e),
        })?;
        let mod_time: DateTime<Utc> = meta.modified()?.into();

        let (width, height) = metadata::read_dimensions(&full).unwrap_or((0, 0));
        let orientation = metadata::read_orientation(&full);

        let info = ImageInfo {
            name: basename(&clean).to_string(),
            path: clean.clone(),
            size: meta.len(),
            mod_time,
            width,
            height,
            orientation,
            thumbnail_url: format!("/api/thumbnail/{clean}"),
        };

        self.cache
            .write()
            .unwrap()
            .insert(path.to_string(), info.clone());

        Ok(info)
    }

    /// Resolve metadata for every supported image directly inside a folder.
    ///
    /// Images that fail to resolve are skipped; one bad file never fails
    /// the listing.
    pub fn list_images(&self, folder: &str) -> Result<Vec<ImageInfo>> {
        let (clean, full) = sanitize::resolve(&self.base_dir, folder)?;

        let entries = fs::read_dir(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PiccullError::NotFound(format!("folder {clean:?}")),
            _ => PiccullError::Io(e),
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|n| is_image_file(n))
            .collect();
        names.sort();

        let mut images = Vec::with_capacity(names.len());
        for name in names {
            let image_path = sanitize::join_relative(&clean, &name);
            match self.resolve(&image_path) {
                Ok(info) => images.push(info),
                Err(e) => debug!(path = %image_path, error = %e, "skipping unresolvable image"),
            }
        }

        Ok(images)
    }

    /// Produce a size-bounded, orientation-corrected JPEG thumbnail and
    /// return its location in the on-disk cache.
    ///
    /// A cache file already on disk is returned without re-reading the
    /// source. On a miss the source is decoded, rotated per its EXIF
    /// orientation, resized to fit within `size`×`size` (aspect ratio
    /// preserved, Lanczos filter, never scaled up) and stored atomically.
    pub fn thumbnail(&self, path: &str, size: u32) -> Result<PathBuf> {
        let size = thumbnail::clamp_size(size);
        let (clean, full) = sanitize::resolve(&self.base_dir, path)?;

        if let Some(cached) = self.thumbnails.lookup(&clean, size) {
            return Ok(cached);
        }

        let img = image::open(&full).map_err(|e| match e {
            image::ImageError::IoError(io) if io.kind() == io::ErrorKind::NotFound => {
                PiccullError::NotFound(format!("image {clean:?}"))
            }
            image::ImageError::IoError(io) => PiccullError::Io(io),
            other => PiccullError::Decode(other.to_string()),
        })?;

        let orientation = self.resolve(path).map(|i| i.orientation).unwrap_or(0);
        let img = thumbnail::apply_orientation(img, orientation);
        // Sources already inside the box are stored as-is.
        let img = if img.width() > size || img.height() > size {
            img.resize(size, size, FilterType::Lanczos3)
        } else {
            img
        };

        self.thumbnails.store(&clean, size, &img)
    }

    /// Create a comparison batch from the given image paths.
    ///
    /// Resolution is best-effort: paths that fail to resolve are dropped
    /// from the batch, not reported. The returned id is unique even under
    /// concurrent batch creation.
    pub fn create_batch(&self, paths: &[String]) -> (String, Vec<ImageInfo>) {
        let id = Uuid::new_v4().to_string();

        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            match self.resolve(path) {
                Ok(info) => images.push(info),
                Err(e) => debug!(path = %path, error = %e, "dropping unresolvable batch image"),
            }
        }

        self.batches
            .write()
            .unwrap()
            .insert(id.clone(), images.clone());

        (id, images)
    }

    /// Look up a live batch by id.
    pub fn batch(&self, id: &str) -> Option<Vec<ImageInfo>> {
        self.batches.read().unwrap().get(id).cloned()
    }

    /// Move the selected images into `<source folder>/<target_folder>`.
    ///
    /// The target folder must be a single path segment; a target carrying
    /// separators or traversal fails every selected path without touching
    /// the filesystem. Each path is otherwise processed independently; one
    /// failure never aborts the rest. The batch id is informational only:
    /// selected paths are not required to belong to the batch.
    pub fn save_selected(
        &self,
        batch_id: &str,
        selected_paths: &[String],
        target_folder: &str,
    ) -> SaveReport {
        let target = if target_folder.is_empty() {
            DEFAULT_TARGET_FOLDER
        } else {
            target_folder
        };

        if self.batch(batch_id).is_none() {
            debug!(batch_id, "save references an unknown batch");
        }

        let mut report = SaveReport {
            success: Vec::new(),
            failed: Vec::new(),
            conflicts: Vec::new(),
            target_folder: target.to_string(),
        };

        if !is_valid_target_folder(target) {
            warn!(target, "rejecting save target folder");
            report.failed = selected_paths.to_vec();
            return report;
        }

        for path in selected_paths {
            match self.commit_one(path, target) {
                CommitOutcome::Moved => report.success.push(path.clone()),
                CommitOutcome::Conflict => report.conflicts.push(path.clone()),
                CommitOutcome::Failed => report.failed.push(path.clone()),
            }
        }

        report
    }

    /// Move one image into the target subfolder next to it.
    fn commit_one(&self, path: &str, target: &str) -> CommitOutcome {
        let source = match sanitize::resolve(&self.base_dir, path) {
            Ok((_, full)) => full,
            Err(e) => {
                warn!(path, error = %e, "rejecting save path");
                return CommitOutcome::Failed;
            }
        };

        let Some(parent) = source.parent() else {
            return CommitOutcome::Failed;
        };
        let target_dir = parent.join(target);
        if let Err(e) = fs::create_dir_all(&target_dir) {
            warn!(path, error = %e, "failed to create target folder");
            return CommitOutcome::Failed;
        }

        let destination = match next_free_name(&source, &target_dir) {
            Ok(Some(dest)) => dest,
            Ok(None) => return CommitOutcome::Conflict,
            Err(e) => {
                warn!(path, error = %e, "failed to pick a destination name");
                return CommitOutcome::Failed;
            }
        };

        match fs::rename(&source, &destination) {
            Ok(()) => CommitOutcome::Moved,
            Err(e) => {
                warn!(path, error = %e, "failed to move image");
                CommitOutcome::Failed
            }
        }
    }
}

/// Check that a save target names a single folder next to the source.
///
/// The target must survive lexical cleaning unchanged and must not carry
/// a path separator, so the destination can never land outside the
/// source's own directory.
fn is_valid_target_folder(target: &str) -> bool {
    match sanitize::clean_relative(target) {
        Ok(clean) => clean == target && !target.contains('/') && !target.contains('\\'),
        Err(_) => false,
    }
}

/// Pick a free destination filename inside `target_dir` for `source`.
///
/// Occupied candidate names get an incrementing numeric suffix before the
/// extension (`name_1.ext`, `name_2.ext`, ...). Returns `Ok(None)` when an
/// occupant is indistinguishable from the source by the cheap identity
/// check (same size and modification time) - that is a conflict, not a
/// collision.
fn next_free_name(source: &Path, target_dir: &Path) -> Result<Option<PathBuf>> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PiccullError::Validation("source has no file name".to_string()))?;
    let (stem, ext) = split_name(file_name);

    let mut candidate = target_dir.join(file_name);
    let mut counter = 1u32;
    loop {
        if !candidate.exists() {
            return Ok(Some(candidate));
        }
        if same_file(source, &candidate) {
            return Ok(None);
        }

        candidate = if ext.is_empty() {
            target_dir.join(format!("{stem}_{counter}"))
        } else {
            target_dir.join(format!("{stem}_{counter}.{ext}"))
        };
        counter += 1;
    }
}

/// Split a filename into stem and extension (extension empty when none).
fn split_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (name, ""),
    }
}

/// Cheap file identity check: same byte size and modification time.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => {
            ma.len() == mb.len()
                && matches!((ma.modified(), mb.modified()), (Ok(ta), Ok(tb)) if ta == tb)
        }
        _ => false,
    }
}

/// Last path segment of a cleaned relative path.
fn basename(clean: &str) -> &str {
    clean.rsplit('/').next().unwrap_or(clean)
}
