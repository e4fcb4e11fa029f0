//! Asset filename grammar.
//!
//! A basename is read right to left: the extension is dropped, then an
//! optional `@<d>x` density suffix, then an optional `_<state>` suffix
//! split on the last underscore.
//!
//! Names with several unrelated underscores are ambiguous: `my_icon_set.png`
//! parses as base `my_icon` with state `set`.

use std::path::Path;

use crate::error::AssetError;

/// Tokens extracted from an asset's basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Name before any state suffix, as written in the file name.
    pub base: String,
    /// Interaction state such as `hover`, if the name carried one.
    pub pseudo_state: Option<String>,
    /// Device pixel density. Always at least 1.
    pub ratio: u32,
}

/// Parse an asset path's basename into base, state and density tokens.
pub fn parse_filename(path: &Path) -> Result<ParsedName, AssetError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .ok_or_else(|| AssetError::parse(path, "path has no file name"))?;

    let stem = strip_extension(&file_name);
    let (stem, ratio) = split_density(stem);

    let (base, pseudo_state) = match stem.rsplit_once('_') {
        Some((base, state)) => (base, Some(state)),
        None => (stem, None),
    };

    if base.is_empty() {
        return Err(AssetError::parse(path, "file name has no base name"));
    }
    if pseudo_state.is_some_and(str::is_empty) {
        return Err(AssetError::parse(path, "trailing underscore with no state name"));
    }

    Ok(ParsedName {
        base: base.to_string(),
        pseudo_state: pseudo_state.map(str::to_string),
        ratio,
    })
}

/// Drop everything from the last `.` onwards. The extension is not checked.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Split a trailing `@<d>x` suffix off a stem, returning the density.
fn split_density(stem: &str) -> (&str, u32) {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 3] == b'@' && bytes[n - 1] == b'x' {
        let digit = bytes[n - 2];
        if (b'1'..=b'9').contains(&digit) {
            return (&stem[..n - 3], u32::from(digit - b'0'));
        }
    }
    (stem, 1)
}
