use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for imgcss operations
#[derive(Error, Diagnostic, Debug)]
pub enum ImgcssError {
    #[error("IO error: {0}")]
    #[diagnostic(code(imgcss::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(imgcss::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(imgcss::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(imgcss::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, ImgcssError>;

/// Failure to compile a single asset.
///
/// These never abort a compile; they are collected alongside the
/// stylesheet text and the caller decides what to do with them.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("cannot derive a selector from {}: {reason}", .path.display())]
    #[diagnostic(
        code(imgcss::parse),
        help("Asset names look like `name.png`, `name_hover.png` or `name@2x.png`")
    )]
    Parse { path: PathBuf, reason: String },

    #[error("unusable dimensions for {}: {reason}", .path.display())]
    #[diagnostic(code(imgcss::dimension))]
    Dimension { path: PathBuf, reason: String },
}

impl AssetError {
    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        AssetError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn dimension(path: &Path, reason: impl Into<String>) -> Self {
        AssetError::Dimension {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// The asset this failure belongs to.
    pub fn path(&self) -> &Path {
        match self {
            AssetError::Parse { path, .. } | AssetError::Dimension { path, .. } => path,
        }
    }

    /// Short machine-readable kind, used in terminal output.
    pub fn kind(&self) -> &'static str {
        match self {
            AssetError::Parse { .. } => "parse",
            AssetError::Dimension { .. } => "dimension",
        }
    }
}
