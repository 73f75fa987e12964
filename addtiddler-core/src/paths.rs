//! Stateless path resolution
//!
//! Image references are written into the tiddler exactly as given and are
//! interpreted relative to the output document. Reading the images (for
//! thumbnails) resolves them against the output's directory explicitly;
//! the process working directory is never changed.

use crate::error::{Result, TiddlerError};
use std::path::{Path, PathBuf};

/// Make `path` absolute against the current directory without touching it
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(TiddlerError::InvalidPath {
            path: path.to_path_buf(),
            reason: "empty path".to_string(),
        });
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| TiddlerError::io(path, e))?;
    Ok(cwd.join(path))
}

/// Directory that relative image references are resolved against
pub fn document_dir(document: &Path) -> Result<PathBuf> {
    let absolute = absolutize(document)?;
    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| TiddlerError::InvalidPath {
            path: document.to_path_buf(),
            reason: "document has no parent directory".to_string(),
        })
}

/// Filesystem location of an image reference relative to `document_dir`
pub fn resolve_image_path(document_dir: &Path, image: &str) -> PathBuf {
    let image = Path::new(image);
    if image.is_absolute() {
        image.to_path_buf()
    } else {
        document_dir.join(image)
    }
}

/// Reference of the thumbnail generated for `image`: `name.ext` becomes `name.thumb.png`
pub fn thumbnail_reference(image: &str) -> String {
    let stem = Path::new(image).with_extension("");
    format!("{}.thumb.png", stem.to_string_lossy())
}
