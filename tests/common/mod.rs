//! Test helpers for Web API integration tests.
//!
//! Builds a temporary photo tree and a TestServer over the full router.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;

use piccull::web::handlers::AppState;
use piccull::web::router::{create_health_router, create_router};

/// Write a solid-color image; the format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 140, 160]));
    image::DynamicImage::ImageRgb8(img).save(path).unwrap();
}

/// Build a photo tree fixture:
///
/// ```text
/// photos/
///   cover.jpg          6x3
///   .hidden.jpg        (hidden, not an image)
///   .thumbnails/       (hidden)
///   pets/
///   vacation/
///     beach.jpg        8x4
///     dunes.png        3x5
///     notes.txt
/// ```
pub fn create_photo_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join("photos");

    fs::create_dir_all(photos.join("vacation")).unwrap();
    fs::create_dir_all(photos.join("pets")).unwrap();
    fs::create_dir_all(photos.join(".thumbnails")).unwrap();

    write_image(&photos.join("cover.jpg"), 6, 3);
    write_image(&photos.join("vacation").join("beach.jpg"), 8, 4);
    write_image(&photos.join("vacation").join("dunes.png"), 3, 5);
    fs::write(photos.join("vacation").join("notes.txt"), b"text").unwrap();
    fs::write(photos.join(".hidden.jpg"), b"hidden").unwrap();

    temp_dir
}

/// Create a test server over the fixture tree.
pub fn create_test_server(temp_dir: &TempDir) -> TestServer {
    let app_state = AppState::new(
        temp_dir.path().join("photos"),
        temp_dir.path().join("cache"),
    )
    .expect("Failed to create app state");

    let router = create_router(Arc::new(app_state), &[]).merge(create_health_router());

    TestServer::new(router).expect("Failed to create test server")
}
