//! imgcss - Density-aware CSS from image assets
//!
//! A library for compiling image files into CSS background rules. Selectors
//! come from file names, `@2x`-style suffixes become resolution media
//! queries, and `_hover`-style suffixes become state selectors.

pub mod cli;
pub mod compile;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod probe;
pub mod render;
pub mod types;

pub use compile::{compile, describe, Compilation};
pub use discovery::{load_manifest, Manifest, ScanResult};
pub use error::{AssetError, ImgcssError, Result};
pub use parser::{build_selector, kebab_case, parse_filename, ParsedName};
pub use probe::{probe_dimensions, probe_sources};
pub use render::{group_by_ratio, render_group, render_rule, render_stylesheet, RatioGroup};
pub use types::{AssetDescriptor, AssetSource, Dimensions};
