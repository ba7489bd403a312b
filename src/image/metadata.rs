//! Best-effort image metadata extraction.
//!
//! Dimension and EXIF reads never fail the caller: unsupported or corrupt
//! data degrades to zero values.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag};
use image::ImageReader;

/// Read pixel dimensions from the image header.
///
/// Only the header is decoded, not the pixel data. Returns `None` for
/// unsupported or corrupt files (HEIC falls in here: it is listed, but
/// no decoder is wired up).
pub fn read_dimensions(path: &Path) -> Option<(u32, u32)> {
    let reader = ImageReader::open(path).ok()?.with_guessed_format().ok()?;
    reader.into_dimensions().ok()
}

/// Read the EXIF orientation tag.
///
/// Returns a value in 1-8, or 0 when the file carries no EXIF data, no
/// orientation field, or an out-of-range value. 0 is treated downstream
/// as "no rotation needed".
pub fn read_orientation(path: &Path) -> u16 {
    let Ok(file) = File::open(path) else {
        return 0;
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return 0;
    };
    let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) else {
        return 0;
    };

    match field.value.get_uint(0) {
        Some(v @ 1..=8) => v as u16,
        _ => 0,
    }
}
