//! List command implementation.
//!
//! Resolves and compiles descriptors without writing anything, then prints
//! them for inspection.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::compile::describe;
use crate::discovery::ScanResult;
use crate::error::{AssetError, ImgcssError, Result};
use crate::output::{display_path, Printer};
use crate::render::group_by_ratio;
use crate::types::AssetDescriptor;

use super::build::{load_sources, BuildPlan};

/// List the rules a build would produce
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Image files, directories or glob patterns (default: manifest sources)
    pub sources: Vec<String>,

    /// Stylesheet the URLs are relative to
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Manifest to read settings from (default: ./imgcss.yaml if present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Print JSON to stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    assets: &'a [AssetDescriptor],
    failures: Vec<FailureEntry>,
}

#[derive(Debug, Serialize)]
struct FailureEntry {
    path: String,
    kind: &'static str,
    message: String,
}

impl From<&AssetError> for FailureEntry {
    fn from(err: &AssetError) -> Self {
        Self {
            path: err.path().display().to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let plan = BuildPlan::resolve(
        &args.sources,
        args.output.as_deref(),
        args.manifest.as_deref(),
        false,
    )?;

    let (scan, descriptors, failures) = collect(&plan)?;

    if args.json {
        println!("{}", listing_json(&descriptors, &failures)?);
        return Ok(());
    }

    for group in group_by_ratio(descriptors) {
        let label = format!("@{}x", group.ratio);
        for asset in &group.assets {
            printer.info(
                &label,
                &format!(
                    "{} {}x{} {}",
                    asset.selector,
                    asset.effective_width(),
                    asset.effective_height(),
                    printer.dim(&asset.url)
                ),
            );
        }
    }
    printer.asset_failures(&failures);

    if scan.is_empty() {
        printer.warning("Empty", &format!("no images under {}", display_path(&plan.base)));
    }

    Ok(())
}

/// Scan and describe a plan's images without writing anything.
fn collect(plan: &BuildPlan) -> Result<(ScanResult, Vec<AssetDescriptor>, Vec<AssetError>)> {
    let scan = plan.scan()?;
    let sources = load_sources(&scan)?;
    let stylesheet = std::path::absolute(&plan.output)?;
    let (descriptors, failures) = describe(&sources, &stylesheet);
    Ok((scan, descriptors, failures))
}

fn listing_json(descriptors: &[AssetDescriptor], failures: &[AssetError]) -> Result<String> {
    let listing = Listing {
        assets: descriptors,
        failures: failures.iter().map(FailureEntry::from).collect(),
    };
    serde_json::to_string_pretty(&listing).map_err(|e| ImgcssError::Build {
        message: format!("Failed to serialize listing: {}", e),
        help: None,
    })
}
