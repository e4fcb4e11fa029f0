//! Build command implementation.
//!
//! Resolves sources, probes image sizes, compiles the stylesheet and
//! writes it out, optionally watching for changes afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::compile::{compile, Compilation};
use crate::discovery::{load_manifest, scan_sources, watch_root, Manifest, ScanResult};
use crate::error::{ImgcssError, Result};
use crate::output::{display_path, plural, Printer};
use crate::probe::probe_sources;
use crate::types::AssetSource;

/// Compile images into a stylesheet
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Image files, directories or glob patterns (default: manifest sources)
    pub sources: Vec<String>,

    /// Stylesheet to write
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Manifest to read settings from (default: ./imgcss.yaml if present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Fail without writing if any image cannot be compiled
    #[arg(long)]
    pub strict: bool,

    /// Rebuild whenever a source changes
    #[arg(long, short)]
    pub watch: bool,
}

/// Settings for one build, after layering CLI flags over the manifest.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Directory relative sources are resolved against.
    pub base: PathBuf,
    pub manifest: Manifest,
    pub sources: Vec<String>,
    pub output: PathBuf,
    pub strict: bool,
}

impl BuildPlan {
    /// Layer explicit sources and output over a manifest.
    ///
    /// With a manifest path, relative manifest settings resolve against the
    /// manifest's directory; otherwise `./imgcss.yaml` is used if present.
    pub fn resolve(
        sources: &[String],
        output: Option<&Path>,
        manifest_path: Option<&Path>,
        strict: bool,
    ) -> Result<Self> {
        let (base, manifest) = match manifest_path {
            Some(path) => {
                let base = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (base, Manifest::load(path)?)
            }
            None => {
                let base = PathBuf::from(".");
                let (manifest, _) = load_manifest(&base)?;
                (base, manifest)
            }
        };

        // Sources named on the command line are relative to the working
        // directory, not the manifest.
        let (base, sources) = if sources.is_empty() {
            (base, manifest.effective_sources())
        } else {
            (PathBuf::from("."), sources.to_vec())
        };

        let output = match output {
            Some(path) => path.to_path_buf(),
            None if manifest.output.is_absolute() => manifest.output.clone(),
            None => base.join(&manifest.output),
        };

        Ok(Self {
            strict: strict || manifest.strict,
            base,
            manifest,
            sources,
            output,
        })
    }

    /// Expand the plan's sources into image paths.
    pub fn scan(&self) -> Result<ScanResult> {
        scan_sources(&self.sources, &self.base, &self.manifest)
    }

    /// Directories to watch for changes, without duplicates.
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();
        for source in &self.sources {
            let root = watch_root(source, &self.base);
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let plan = BuildPlan::resolve(
        &args.sources,
        args.output.as_deref(),
        args.manifest.as_deref(),
        args.strict,
    )?;

    if args.watch {
        if let Err(e) = build_once(&plan, printer) {
            printer.error("Failed", &e.to_string());
        }
        return super::watch::watch(&plan, printer);
    }

    build_once(&plan, printer)?;
    Ok(())
}

/// Scan, probe, compile and write once.
pub fn build_once(plan: &BuildPlan, printer: &Printer) -> Result<Compilation> {
    let scan = plan.scan()?;
    for source in &scan.unmatched {
        printer.warning("Unmatched", source);
    }

    printer.status("Compiling", &plural(scan.total(), "image", "images"));

    let sources = load_sources(&scan)?;
    let stylesheet = std::path::absolute(&plan.output)?;
    let compilation = compile(&sources, &stylesheet);

    printer.asset_failures(&compilation.failures);

    if plan.strict && !compilation.is_clean() {
        return Err(ImgcssError::Build {
            message: format!(
                "{} could not be compiled",
                plural(compilation.failures.len(), "image", "images")
            ),
            help: Some("Fix or exclude the listed images, or build without --strict".to_string()),
        });
    }

    let written = write_stylesheet(&stylesheet, &compilation.css)?;
    let verb = if written { "Finished" } else { "Fresh" };
    printer.status(
        verb,
        &format!(
            "{} ({})",
            display_path(&stylesheet),
            plural(compilation.rules, "rule", "rules")
        ),
    );

    Ok(compilation)
}

/// Probe scanned files, with paths made absolute so URLs resolve correctly.
pub fn load_sources(scan: &ScanResult) -> Result<Vec<AssetSource>> {
    let files = scan
        .files
        .iter()
        .map(std::path::absolute)
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(probe_sources(&files))
}

/// Write the stylesheet, skipping the write if nothing changed.
///
/// Returns whether the file was written.
pub fn write_stylesheet(path: &Path, css: &str) -> Result<bool> {
    let content = if css.is_empty() {
        String::new()
    } else {
        format!("{css}\n")
    };

    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ImgcssError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    fs::write(path, content).map_err(|e| ImgcssError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write stylesheet: {}", e),
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        img.save(path).unwrap();
    }

    fn plan(dir: &Path, sources: &[&str], output: &str) -> BuildPlan {
        BuildPlan {
            base: dir.to_path_buf(),
            manifest: Manifest::default(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            output: dir.join(output),
            strict: false,
        }
    }

    #[test]
    fn test_build_writes_stylesheet() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("images/circle.png"), 25, 25);
        write_png(&dir.path().join("images/circle@2x.png"), 50, 50);

        let plan = plan(dir.path(), &["images"], "css/style.css");
        let compilation = build_once(&plan, &Printer::plain()).unwrap();

        assert_eq!(compilation.rules, 2);
        let css = fs::read_to_string(dir.path().join("css/style.css")).unwrap();
        assert!(css.starts_with(".circle { background: url(../images/circle.png)"));
        assert!(css.contains("url(../images/circle@2x.png)"));
        assert!(css.contains("(min-resolution: 192dpi)"));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn test_build_reports_bad_assets_and_continues() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("images/ok.png"), 4, 4);
        write_png(&dir.path().join("images/@2x.png"), 4, 4);
        fs::write(dir.path().join("images/broken.png"), b"garbage").unwrap();

        let plan = plan(dir.path(), &["images"], "out.css");
        let compilation = build_once(&plan, &Printer::plain()).unwrap();

        assert_eq!(compilation.rules, 1);
        assert_eq!(compilation.failures.len(), 2);
        assert!(dir.path().join("out.css").exists());
    }

    #[test]
    fn test_build_strict_fails_without_writing() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("images/ok.png"), 4, 4);
        write_png(&dir.path().join("images/_hover.png"), 4, 4);

        let mut plan = plan(dir.path(), &["images"], "out.css");
        plan.strict = true;

        let err = build_once(&plan, &Printer::plain()).unwrap_err();
        assert!(matches!(err, ImgcssError::Build { .. }));
        assert!(!dir.path().join("out.css").exists());
    }

    #[test]
    fn test_build_empty_sources_writes_empty_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();

        let plan = plan(dir.path(), &["images"], "out.css");
        let compilation = build_once(&plan, &Printer::plain()).unwrap();

        assert!(compilation.css.is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("out.css")).unwrap(), "");
    }

    #[test]
    fn test_write_stylesheet_skips_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out.css");

        assert!(write_stylesheet(&path, ".a {}").unwrap());
        assert!(!write_stylesheet(&path, ".a {}").unwrap());
        assert!(write_stylesheet(&path, ".b {}").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), ".b {}\n");
    }

    #[test]
    fn test_resolve_with_manifest() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("imgcss.yaml");
        fs::write(
            &manifest_path,
            "sources:\n  - icons\noutput: public/icons.css\nstrict: true\n",
        )
        .unwrap();

        let plan = BuildPlan::resolve(&[], None, Some(&manifest_path), false).unwrap();

        assert_eq!(plan.base, dir.path());
        assert_eq!(plan.sources, vec!["icons"]);
        assert_eq!(plan.output, dir.path().join("public/icons.css"));
        assert!(plan.strict);
    }

    #[test]
    fn test_resolve_cli_overrides_manifest() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("imgcss.yaml");
        fs::write(&manifest_path, "sources:\n  - icons\noutput: a.css\n").unwrap();

        let sources = vec!["other/*.png".to_string()];
        let plan = BuildPlan::resolve(
            &sources,
            Some(Path::new("b.css")),
            Some(&manifest_path),
            false,
        )
        .unwrap();

        assert_eq!(plan.base, PathBuf::from("."));
        assert_eq!(plan.sources, sources);
        assert_eq!(plan.output, PathBuf::from("b.css"));
        assert!(!plan.strict);
    }

    #[test]
    fn test_watch_roots_deduplicated() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();

        let plan = plan(dir.path(), &["images", "images/*.png"], "out.css");
        assert_eq!(plan.watch_roots(), vec![dir.path().join("images")]);
    }
}
