//! Folder browsing for the photo library.

pub mod service;
pub mod types;

pub use service::FolderService;
pub use types::{FolderInfo, FolderRef, ImageRef};
