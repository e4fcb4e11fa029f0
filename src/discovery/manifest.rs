//! Project manifest (imgcss.yaml) parsing.
//!
//! The manifest defines where images are found, where the stylesheet is
//! written, and which paths to leave out.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use crate::error::{ImgcssError, Result};

/// Project manifest loaded from imgcss.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directories, files or glob patterns to collect images from.
    /// Defaults to current directory if empty.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Stylesheet to write.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Glob patterns to exclude from discovery.
    #[serde(default)]
    pub excludes: Vec<String>,

    /// Treat any asset failure as a build failure.
    #[serde(default)]
    pub strict: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("css/sprites.css")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            excludes: vec![],
            strict: false,
        }
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl Manifest {
    /// Load manifest from an imgcss.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ImgcssError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| ImgcssError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check imgcss.yaml syntax".to_string()),
        })?;
        manifest.exclude_set()?;
        Ok(manifest)
    }

    /// Compile the exclude list into a matcher.
    pub fn exclude_set(&self) -> Result<ExcludeSet> {
        let patterns = self
            .excludes
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| ImgcssError::Parse {
                    message: format!("Invalid exclude pattern '{}': {}", raw, e),
                    help: Some("Excludes use glob syntax, e.g. \"**/backup/*\"".to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ExcludeSet { patterns })
    }

    /// Get effective source paths, defaulting to current directory.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }
}

/// Compiled exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check if a path should be excluded.
    ///
    /// A pattern excludes a path when it matches the whole path or any
    /// trailing run of its components, so `*.bak` excludes `a/b/c.bak`.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }

        let parts: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        (0..parts.len()).any(|start| {
            let candidate = parts[start..].join("/");
            self.patterns
                .iter()
                .any(|p| p.matches_with(&candidate, MATCH_OPTIONS))
        })
    }
}
