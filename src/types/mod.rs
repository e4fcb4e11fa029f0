//! Core domain types for imgcss.
//!
//! - `Dimensions` - raw pixel size of an image
//! - `AssetSource` - a resolved path plus its probed dimensions
//! - `AssetDescriptor` - a compiled asset ready for CSS emission

mod descriptor;

pub use descriptor::{relative_url, AssetDescriptor, AssetSource, Dimensions};
