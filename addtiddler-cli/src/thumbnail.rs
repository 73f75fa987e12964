//! Image thumbnails for embedded pictures
//!
//! Resizing needs the `thumbnail` feature. Whether it is available is
//! reported through [`Capabilities`] so callers can fall back to the
//! original images instead of failing.

use crate::error::CliError;
use std::path::Path;

/// Largest width or height of a generated thumbnail, in pixels
pub const THUMBNAIL_MAX_PX: u32 = 500;

/// Optional features compiled into this build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Images can be resized into thumbnails
    pub thumbnails: bool,
}

impl Capabilities {
    /// Capabilities of the running binary
    pub const fn detect() -> Self {
        Self {
            thumbnails: cfg!(feature = "thumbnail"),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Scale `source` to fit within `max_px` square and save it as PNG at `target`
#[cfg(feature = "thumbnail")]
pub fn create_thumbnail(source: &Path, target: &Path, max_px: u32) -> Result<(), CliError> {
    let image = image::open(source)
        .map_err(|e| CliError::ThumbnailError(format!("{}: {e}", source.display())))?;
    image
        .thumbnail(max_px, max_px)
        .save_with_format(target, image::ImageFormat::Png)
        .map_err(|e| CliError::ThumbnailError(format!("{}: {e}", target.display())))?;
    log::info!("thumbnail {} -> {}", source.display(), target.display());
    Ok(())
}

/// Thumbnails are unavailable without the `thumbnail` feature
#[cfg(not(feature = "thumbnail"))]
pub fn create_thumbnail(source: &Path, _target: &Path, _max_px: u32) -> Result<(), CliError> {
    Err(CliError::ThumbnailError(format!(
        "{}: built without the `thumbnail` feature",
        source.display()
    )))
}
