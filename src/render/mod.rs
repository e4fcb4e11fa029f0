//! Rendering module for imgcss.
//!
//! This module groups compiled descriptors by pixel density and turns each
//! group into CSS text.

mod css;
mod group;

pub use css::{render_group, render_rule, render_stylesheet, BASE_DPI};
pub use group::{group_by_ratio, RatioGroup};
