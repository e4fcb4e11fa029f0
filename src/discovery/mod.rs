//! File discovery for imgcss projects.
//!
//! This module finds the image files a stylesheet is built from, either
//! from explicit sources or from an `imgcss.yaml` manifest.
//!
//! # Example
//!
//! ```ignore
//! use imgcss::discovery::{load_manifest, scan_sources};
//!
//! let (manifest, _) = load_manifest(Path::new("./site"))?;
//! let scan = scan_sources(&manifest.effective_sources(), Path::new("./site"), &manifest)?;
//! println!("Found {} images", scan.total());
//! ```

mod manifest;
mod scanner;

use std::path::Path;

use crate::error::Result;

pub use manifest::{ExcludeSet, Manifest};
pub use scanner::{
    is_image, scan_directory, scan_sources, watch_root, ScanResult, IMAGE_EXTENSIONS,
};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "imgcss.yaml";

/// Load the manifest in `root`, or the default if there is none.
///
/// The flag is true when an `imgcss.yaml` was found.
pub fn load_manifest(root: &Path) -> Result<(Manifest, bool)> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        Ok((Manifest::load(&manifest_path)?, true))
    } else {
        Ok((Manifest::default(), false))
    }
}
