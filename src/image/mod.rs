//! Image metadata, thumbnails, comparison batches and the save operation.

pub mod metadata;
pub mod service;
pub mod thumbnail;
pub mod types;

pub use service::ImageService;
pub use thumbnail::{clamp_size, ThumbnailCache, DEFAULT_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE};
pub use types::{CommitOutcome, ImageInfo, SaveReport};

/// File extensions (lowercase) recognized as images.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "heic"];

/// Check whether a filename has a supported image extension.
///
/// Matching is case-insensitive.
pub fn is_image_file(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}
