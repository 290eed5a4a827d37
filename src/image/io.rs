//! I/O helpers for profile rasters and JSON.
//!
//! - `save_profile_image`: write a `ProfileImage` as 8-bit grayscale; the
//!   format follows the extension (`.pgm`, `.png`, ...).
//! - `load_profile_image`: read a grayscale file back, any non-zero pixel
//!   becomes a hit.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, ImageViewMut, ProfileImage, BACKGROUND, HIT};
use image::{GrayImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Save a profile raster to a grayscale image file.
pub fn save_profile_image(image: &ProfileImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut data = Vec::with_capacity(image.w * image.h);
    for row in image.rows() {
        data.extend_from_slice(row);
    }
    let out: GrayImage = ImageBuffer::from_raw(image.w as u32, image.h as u32, data)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Load a grayscale image as a profile raster.
pub fn load_profile_image(path: &Path) -> Result<ProfileImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let mut profile = ProfileImage::new(img.width() as usize, img.height() as usize);
    for (x, y, Luma([v])) in img.enumerate_pixels() {
        if *v != BACKGROUND {
            profile.set_pixel(x as usize, y as usize, HIT);
        }
    }
    Ok(profile)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
