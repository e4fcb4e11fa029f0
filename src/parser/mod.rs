//! Asset name parsing.
//!
//! Turns an image path's basename into the tokens the rest of the pipeline
//! needs: a density ratio, a base name, an optional interaction state, and
//! from those a CSS selector list.
//!
//! # Naming conventions
//!
//! | File name               | Ratio | Selector                    |
//! |-------------------------|-------|-----------------------------|
//! | `circle.png`            | 1     | `.circle`                   |
//! | `circle@2x.png`         | 2     | `.circle`                   |
//! | `button_hover.png`      | 1     | `.button-hover, a:hover .button, ...` |
//!
//! # Usage
//!
//! ```ignore
//! use imgcss::parser::{build_selector, parse_filename};
//!
//! let path = Path::new("images/button_hover@2x.png");
//! let parsed = parse_filename(path)?;
//! let selector = build_selector(path, &parsed)?;
//! ```

mod filename;
mod selector;

pub use filename::{parse_filename, ParsedName};
pub use selector::{build_selector, kebab_case};
