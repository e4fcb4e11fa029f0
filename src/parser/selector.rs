//! Selector derivation from parsed asset names.

use std::path::Path;

use crate::error::AssetError;

use super::ParsedName;

/// Build the selector list for a parsed asset name.
///
/// A plain name yields a single class selector. A name with a state yields
/// six clauses so the rule matches a state class on the element itself, a
/// native pseudo-class on an ancestor link or button, or a state class on
/// that ancestor.
pub fn build_selector(path: &Path, parsed: &ParsedName) -> Result<String, AssetError> {
    let base = identifier(path, &parsed.base, "name")?;

    let Some(state) = &parsed.pseudo_state else {
        return Ok(format!(".{base}"));
    };

    let state = identifier(path, state, "state")?;

    let clauses = [
        format!(".{base}-{state}"),
        format!("a:{state} .{base}"),
        format!("button:{state} .{base}"),
        format!("a.{state} .{base}"),
        format!("button.{state} .{base}"),
        format!(".{base}.{state}"),
    ];
    Ok(clauses.join(", "))
}

/// Kebab-case a token and check it can stand as a CSS class or
/// pseudo-class name.
fn identifier(path: &Path, raw: &str, role: &str) -> Result<String, AssetError> {
    let ident = kebab_case(raw);
    match ident.chars().next() {
        None => Err(AssetError::parse(
            path,
            format!("{role} '{raw}' has no usable class name characters"),
        )),
        Some(first) if first.is_ascii_digit() => Err(AssetError::parse(
            path,
            format!("{role} '{raw}' starts with a digit, which CSS identifiers cannot"),
        )),
        Some(_) => Ok(ident),
    }
}

/// Lowercase a name and join its words with hyphens.
///
/// Words break on any non-alphanumeric character, on a lower-to-upper case
/// change (`myIcon`), and before the last capital of an acronym run that
/// starts a new word (`HTMLIcon`). Digits stay with the word before them.
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}
