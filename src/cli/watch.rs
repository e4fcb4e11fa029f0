//! Watch mode.
//!
//! Every settled change triggers a full rebuild from scratch; nothing is
//! carried over between builds.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::{ImgcssError, Result};
use crate::output::{display_path, Printer};

use super::build::{build_once, BuildPlan};

/// Quiet period before a burst of events triggers a rebuild.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watch the plan's source roots and rebuild on change until the watcher
/// shuts down.
pub fn watch(plan: &BuildPlan, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| ImgcssError::Build {
        message: format!("Failed to start watcher: {}", e),
        help: None,
    })?;

    let mut targets: Vec<PathBuf> = Vec::new();
    for root in plan.watch_roots() {
        if !root.exists() {
            printer.warning("Missing", &display_path(&root));
        }
        let target = watch_target(&root);
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    for target in &targets {
        watcher
            .watch(target, RecursiveMode::Recursive)
            .map_err(|e| ImgcssError::Build {
                message: format!("Failed to watch {}: {}", target.display(), e),
                help: None,
            })?;
        printer.info("Watching", &display_path(target));
    }

    let output = std::path::absolute(&plan.output)?;
    let mut pending: Option<Instant> = None;

    loop {
        match rx.recv_timeout(DEBOUNCE) {
            Ok(Ok(event)) => {
                if is_relevant(&event, &output) {
                    pending = Some(Instant::now());
                }
            }
            Ok(Err(e)) => printer.warning("Watch", &e.to_string()),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        if pending.is_some_and(|at| at.elapsed() >= DEBOUNCE) {
            pending = None;
            if let Err(e) = build_once(plan, printer) {
                printer.error("Failed", &e.to_string());
            }
        }
    }
}

/// The closest existing directory at or above `root`.
///
/// A source directory created after the watch starts is then still seen.
pub fn watch_target(root: &Path) -> PathBuf {
    root.ancestors()
        .find(|dir| !dir.as_os_str().is_empty() && dir.exists())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Whether an event should trigger a rebuild.
///
/// Reads are ignored, as are events that only touch the stylesheet being
/// written.
pub fn is_relevant(event: &Event, output: &Path) -> bool {
    if matches!(event.kind, EventKind::Access(_)) || event.paths.is_empty() {
        return false;
    }
    !event.paths.iter().all(|path| {
        std::path::absolute(path)
            .map(|p| p == output)
            .unwrap_or(false)
    })
}
