//! Import-directory watcher.
//!
//! notify delivers events on its own thread; they are forwarded over an
//! unbounded channel and handled on the runtime one file at a time, so
//! imports never overlap and the entity cache sees a single writer per file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cricd_core::{is_scorecard, FileImporter};
use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Scorecards an event introduces into the import directory.
pub fn new_scorecards(event: &Event) -> Vec<PathBuf> {
    let arrived = matches!(
        event.kind,
        EventKind::Create(CreateKind::File | CreateKind::Any)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Any))
    );
    if !arrived {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|path| is_scorecard(path))
        .cloned()
        .collect()
}

/// Watch `dir` and import each new scorecard until the channel closes or
/// the process is interrupted.
pub async fn watch(importer: &FileImporter, dir: &Path) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        // Receiver gone means we are shutting down.
        let _ = tx.send(res);
    })
    .context("failed to start file watcher")?;
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;

    info!(event = "watch.started", dir = %dir.display());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            received = rx.recv() => {
                let Some(received) = received else { break };
                match received {
                    Ok(event) => {
                        for path in new_scorecards(&event) {
                            if !path.exists() {
                                continue;
                            }
                            if let Err(err) = importer.process_file(&path).await {
                                debug!(event = "watch.file_skipped", file = %path.display(), error = %err);
                            }
                        }
                    }
                    Err(err) => warn!(event = "watch.error", error = %err),
                }
            }
            _ = &mut shutdown => {
                info!(event = "watch.stopped", dir = %dir.display());
                break;
            }
        }
    }
    Ok(())
}
