//! File system watcher for live rebuilds.
//!
//! Monitors the content, template and static directories and triggers a
//! full site rebuild when anything changes.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     Event Loop                         │
//! │                                                        │
//! │  ┌──────────┐    ┌───────────┐    ┌─────────────────┐  │
//! │  │ notify   │───▶│ Debouncer │───▶│  build_site()   │  │
//! │  │ events   │    │  (100ms)  │    │  (full rebuild) │  │
//! │  └──────────┘    └───────────┘    └─────────────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Rebuilds run on the watcher thread itself. Events arriving while a
//! build is in flight stay queued in the channel and coalesce into a
//! single follow-up build.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 100;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to the site root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events into a single rebuild trigger.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
        }
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Rebuild the whole site after a batch of changes.
///
/// Failures are logged, never fatal; the previous output stays served.
fn rebuild(paths: &[PathBuf], config: &'static SiteConfig) {
    if paths.is_empty() {
        return;
    }

    let root = config.get_root();
    let changed: Vec<_> = paths.iter().map(|p| rel_path(p, root)).collect();
    log!("watch"; "{} changed, rebuilding...", changed.join(", "));

    if let Err(e) = crate::build::build_site(config) {
        log!("error"; "rebuild failed: {e:#}");
    }
    eprintln!(); // Blank line to separate rebuild sessions
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Watch the source directories, warning on any that cannot be watched.
fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) {
    let dirs = [
        ("content", &config.build.content),
        ("templates", &config.build.templates),
        ("static", &config.build.static_dir),
    ];

    let root = config.get_root();
    let mut watched = Vec::new();

    for (name, path) in dirs {
        if !path.exists() {
            continue;
        }

        match watcher.watch(path, RecursiveMode::Recursive) {
            Ok(()) => watched.push(format!("{}/", rel_path(path, root))),
            Err(e) => log!("warn"; "Failed to watch {name} ({}): {e}", path.display()),
        }
    }

    if !watched.is_empty() {
        log!("watch"; "watching {}", watched.join(", "));
    }
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking(config: &'static SiteConfig) -> Result<()> {
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config);

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                rebuild(&debouncer.take(), config);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
