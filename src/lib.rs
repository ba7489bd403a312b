//! PICCULL - Photo culling server
//!
//! Browse a directory tree of photographs, serve cached EXIF-corrected
//! thumbnails, build comparison batches and move keepers into a target
//! subfolder, all over HTTP.

pub mod config;
pub mod error;
pub mod gallery;
pub mod image;
pub mod logging;
pub mod sanitize;
pub mod web;

pub use config::Config;
pub use error::{PiccullError, Result};
pub use gallery::{FolderInfo, FolderRef, FolderService, ImageRef};
pub use image::{ImageInfo, ImageService, SaveReport};
pub use web::WebServer;
