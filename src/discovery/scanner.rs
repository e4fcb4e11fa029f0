//! Source expansion for image assets.
//!
//! Each source is a directory (walked recursively for images), a single
//! file, or a glob pattern.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ImgcssError, Result};

use super::manifest::{ExcludeSet, Manifest};

/// Extensions picked up when walking a directory.
///
/// Only raster formats whose header the `image` crate can read are listed.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Result of expanding sources into asset paths.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered image files, in discovery order, without duplicates.
    pub files: Vec<PathBuf>,
    /// Sources that matched no files.
    pub unmatched: Vec<String>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Merge another scan result into this one, dropping repeated paths.
    pub fn merge(&mut self, other: ScanResult) {
        let mut seen: HashSet<PathBuf> = self.files.iter().cloned().collect();
        for file in other.files {
            if seen.insert(file.clone()) {
                self.files.push(file);
            }
        }
        self.unmatched.extend(other.unmatched);
    }
}

/// Whether a path has one of the recognised image extensions.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// Recursively collect image files under `root`, sorted by file name.
pub fn scan_directory(root: &Path, excludes: &ExcludeSet) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !entry.file_type().is_file() || !is_image(path) {
            continue;
        }

        if excludes.is_excluded(path) {
            continue;
        }

        result.files.push(path.to_path_buf());
    }

    result
}

/// Expand a list of sources relative to `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> Result<ScanResult> {
    let excludes = manifest.exclude_set()?;
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = resolve(source, base_path);

        let scan = if source_path.is_dir() {
            scan_directory(&source_path, &excludes)
        } else if source_path.is_file() {
            let mut single = ScanResult::new();
            if !excludes.is_excluded(&source_path) {
                single.files.push(source_path);
            }
            single
        } else {
            expand_glob(&source_path, &excludes)?
        };

        if scan.is_empty() {
            result.unmatched.push(source.clone());
        }
        result.merge(scan);
    }

    Ok(result)
}

/// Expand a glob pattern into the files it matches, alphabetically.
fn expand_glob(pattern: &Path, excludes: &ExcludeSet) -> Result<ScanResult> {
    let pattern_str = pattern.to_string_lossy();
    let entries = glob::glob(&pattern_str).map_err(|e| ImgcssError::Parse {
        message: format!("Invalid source pattern '{}': {}", pattern_str, e),
        help: Some("Sources are directories, files or glob patterns like \"images/*.png\"".to_string()),
    })?;

    let mut result = ScanResult::new();
    for path in entries.filter_map(|e| e.ok()) {
        if path.is_file() && !excludes.is_excluded(&path) {
            result.files.push(path);
        }
    }
    Ok(result)
}

fn resolve(source: &str, base_path: &Path) -> PathBuf {
    if Path::new(source).is_absolute() {
        PathBuf::from(source)
    } else {
        base_path.join(source)
    }
}

/// The directory to watch for changes to a source.
///
/// For glob patterns this is the longest leading run of components with no
/// glob metacharacters.
pub fn watch_root(source: &str, base_path: &Path) -> PathBuf {
    let source_path = resolve(source, base_path);
    if source_path.is_dir() {
        return source_path;
    }
    if source_path.is_file() {
        return source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base_path.to_path_buf());
    }

    let mut root = PathBuf::new();
    for component in source_path.components() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[', '{']) {
            break;
        }
        root.push(component);
    }
    if root.as_os_str().is_empty() {
        base_path.to_path_buf()
    } else {
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a.png")));
        assert!(is_image(Path::new("dir/a.JPG")));
        assert!(is_image(Path::new("a@2x.webp")));
        assert!(!is_image(Path::new("a.psd")));
        assert!(!is_image(Path::new("README")));
        assert!(!is_image(Path::new("logo.svg")));
    }

    #[test]
    fn test_scan_skips_vector_images() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("logo.svg"));
        touch(&dir.path().join("ok.png"));

        let result = scan_directory(dir.path(), &ExcludeSet::default());

        assert_eq!(names(&result), vec!["ok.png"]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(dir.path(), &ExcludeSet::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("square.png"));
        touch(&dir.path().join("circle.png"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("nested/arrow.gif"));

        let result = scan_directory(dir.path(), &ExcludeSet::default());

        assert_eq!(names(&result), vec!["circle.png", "arrow.gif", "square.png"]);
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        let result = scan_directory(Path::new("/nonexistent/path"), &ExcludeSet::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_sources_glob() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("images/b.png"));
        touch(&dir.path().join("images/a.png"));
        touch(&dir.path().join("images/a.jpg"));

        let sources = vec!["images/*.png".to_string()];
        let result = scan_sources(&sources, dir.path(), &Manifest::default()).unwrap();

        assert_eq!(names(&result), vec!["a.png", "b.png"]);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_scan_sources_deduplicates() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("images/a.png"));
        touch(&dir.path().join("images/b.png"));

        let sources = vec!["images/b.png".to_string(), "images".to_string()];
        let result = scan_sources(&sources, dir.path(), &Manifest::default()).unwrap();

        assert_eq!(names(&result), vec!["b.png", "a.png"]);
    }

    #[test]
    fn test_scan_sources_records_unmatched() {
        let dir = tempdir().unwrap();
        let sources = vec!["missing/*.png".to_string()];
        let result = scan_sources(&sources, dir.path(), &Manifest::default()).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.unmatched, vec!["missing/*.png"]);
    }

    #[test]
    fn test_scan_sources_invalid_pattern() {
        let dir = tempdir().unwrap();
        let sources = vec!["images/[.png".to_string()];
        let err = scan_sources(&sources, dir.path(), &Manifest::default()).unwrap_err();
        assert!(matches!(err, ImgcssError::Parse { .. }));
    }

    #[test]
    fn test_scan_with_excludes() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("images/keep.png"));
        touch(&dir.path().join("images/drafts/skip.png"));

        let manifest = Manifest {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };
        let result = scan_directory(&dir.path().join("images"), &manifest.exclude_set().unwrap());

        assert_eq!(names(&result), vec!["keep.png"]);
    }

    #[test]
    fn test_scan_sources_applies_excludes_to_files_and_globs() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("icons/a.png"));
        touch(&dir.path().join("icons/a.bak.png"));
        touch(&dir.path().join("single.bak.png"));

        let manifest = Manifest {
            excludes: vec!["*.bak.png".to_string()],
            ..Default::default()
        };
        let sources = vec!["icons/*.png".to_string(), "single.bak.png".to_string()];
        let result = scan_sources(&sources, dir.path(), &manifest).unwrap();

        assert_eq!(names(&result), vec!["a.png"]);
        assert_eq!(result.unmatched, vec!["single.bak.png"]);
    }

    #[test]
    fn test_watch_root() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("images/a.png"));

        assert_eq!(watch_root("images", dir.path()), dir.path().join("images"));
        assert_eq!(watch_root("images/a.png", dir.path()), dir.path().join("images"));
        assert_eq!(
            watch_root("images/**/*.png", dir.path()),
            dir.path().join("images")
        );
    }
}
