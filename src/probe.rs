//! Image header probing.
//!
//! Reads only as much of each file as needed to learn its pixel size.

use std::path::{Path, PathBuf};

use crate::error::{ImgcssError, Result};
use crate::types::{AssetSource, Dimensions};

/// Read the pixel dimensions of an image file.
pub fn probe_dimensions(path: &Path) -> Result<Dimensions> {
    let (width, height) = image::image_dimensions(path).map_err(|e| ImgcssError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image header: {}", e),
    })?;
    Ok(Dimensions::new(width, height))
}

/// Probe every path, keeping failures as unprobed sources.
///
/// A file that cannot be probed still becomes a source so the compile pass
/// can report it alongside the other assets.
pub fn probe_sources(paths: &[PathBuf]) -> Vec<AssetSource> {
    paths
        .iter()
        .map(|path| match probe_dimensions(path) {
            Ok(dimensions) => AssetSource::new(path.clone(), dimensions),
            Err(e) => AssetSource::unprobed(path.clone(), e.to_string()),
        })
        .collect()
}
