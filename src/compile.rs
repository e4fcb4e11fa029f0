//! The compile pass: sources in, stylesheet text and failures out.
//!
//! This is pure. It reads no files and prints nothing; probing, writing and
//! reporting belong to the callers in [`crate::cli`].

use std::path::Path;

use crate::error::AssetError;
use crate::render::{group_by_ratio, render_stylesheet};
use crate::types::{AssetDescriptor, AssetSource};

/// Outcome of compiling one batch of assets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
    /// Complete stylesheet text, without a trailing newline.
    pub css: String,
    /// Number of rules emitted.
    pub rules: usize,
    /// Assets that produced no rule, in input order.
    pub failures: Vec<AssetError>,
}

impl Compilation {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build descriptors for every source, splitting out the ones that fail.
pub fn describe(
    sources: &[AssetSource],
    stylesheet: &Path,
) -> (Vec<AssetDescriptor>, Vec<AssetError>) {
    let mut descriptors = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();

    for source in sources {
        match AssetDescriptor::build(source, stylesheet) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(err) => failures.push(err),
        }
    }

    (descriptors, failures)
}

/// Compile `sources` into a stylesheet that will live at `stylesheet`.
///
/// An empty batch yields empty CSS and no failures.
pub fn compile(sources: &[AssetSource], stylesheet: &Path) -> Compilation {
    let (descriptors, failures) = describe(sources, stylesheet);
    let rules = descriptors.len();
    let groups = group_by_ratio(descriptors);

    Compilation {
        css: render_stylesheet(&groups),
        rules,
        failures,
    }
}
