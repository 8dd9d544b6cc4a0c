//! Image loading with typed failures.
use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::DetectError;

/// Load an image from disk as 8-bit RGB.
///
/// Missing files, unreadable files, undecodable contents and zero-sized
/// images each map to their own [`DetectError`] variant.
pub fn load_image(path: &Path) -> Result<RgbImage, DetectError> {
    if !path.exists() {
        return Err(DetectError::NotFound(path.to_path_buf()));
    }

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| DetectError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let img = reader
        .decode()
        .map_err(|source| DetectError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();

    if img.width() == 0 || img.height() == 0 {
        return Err(DetectError::EmptyImage);
    }

    log::debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}
