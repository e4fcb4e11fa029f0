//! Asset descriptors: everything needed to render one CSS rule.

use std::path::{Path, PathBuf};

use pathdiff::diff_paths;
use serde::Serialize;

use crate::error::AssetError;
use crate::parser::{build_selector, parse_filename};

/// Raw pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A resolved asset path paired with whatever dimensions could be probed.
///
/// `dimensions` is `None` when the image header could not be read; the
/// reason is kept so it can be surfaced as a dimension failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
    pub path: PathBuf,
    pub dimensions: Option<Dimensions>,
    pub probe_error: Option<String>,
}

impl AssetSource {
    pub fn new(path: impl Into<PathBuf>, dimensions: Dimensions) -> Self {
        Self {
            path: path.into(),
            dimensions: Some(dimensions),
            probe_error: None,
        }
    }

    /// A source whose dimensions could not be determined.
    pub fn unprobed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dimensions: None,
            probe_error: Some(reason.into()),
        }
    }
}

/// One compiled asset, ready for grouping and emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetDescriptor {
    /// Path from the stylesheet's directory to the image, `/`-separated.
    pub url: String,
    /// Raw pixel dimensions, before density scaling.
    pub dimensions: Dimensions,
    /// Device pixel density, at least 1.
    pub ratio: u32,
    /// Complete selector list for the rule.
    pub selector: String,
}

impl AssetDescriptor {
    /// Build a descriptor for `source` as referenced from `stylesheet`.
    pub fn build(source: &AssetSource, stylesheet: &Path) -> Result<Self, AssetError> {
        let path = source.path.as_path();
        let parsed = parse_filename(path)?;
        let selector = build_selector(path, &parsed)?;

        let dimensions = match source.dimensions {
            Some(dimensions) => dimensions,
            None => {
                let reason = source
                    .probe_error
                    .clone()
                    .unwrap_or_else(|| "dimensions are missing".to_string());
                return Err(AssetError::dimension(path, reason));
            }
        };
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(AssetError::dimension(
                path,
                format!("image is {}x{}", dimensions.width, dimensions.height),
            ));
        }

        Ok(Self {
            url: relative_url(path, stylesheet),
            dimensions,
            ratio: parsed.ratio,
            selector,
        })
    }

    /// Width in CSS pixels after density scaling.
    pub fn effective_width(&self) -> f64 {
        f64::from(self.dimensions.width) / f64::from(self.ratio)
    }

    /// Height in CSS pixels after density scaling.
    pub fn effective_height(&self) -> f64 {
        f64::from(self.dimensions.height) / f64::from(self.ratio)
    }
}

/// Path from the stylesheet's directory to `asset`, joined with `/`.
///
/// Both paths should share a base, ideally both absolute. When no relative
/// path can be worked out lexically the asset path is used as given.
pub fn relative_url(asset: &Path, stylesheet: &Path) -> String {
    let from_dir = stylesheet.parent().unwrap_or(Path::new(""));
    let path = diff_paths(asset, from_dir).unwrap_or_else(|| asset.to_path_buf());
    path.display().to_string().replace('\\', "/")
}
