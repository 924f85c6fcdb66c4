//! Theme stylesheet watching.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period after the last raw event before a change is forwarded.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the theme watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// A theme stylesheet was created or modified
    Changed(PathBuf),

    /// A theme stylesheet was removed
    Removed(PathBuf),
}

impl ThemeEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(p) | Self::Removed(p) => p,
        }
    }
}

/// Watches the directories holding the theme stylesheets.
///
/// Directories are watched instead of the files so that editors which save by
/// renaming a temporary file are still seen.
pub struct ThemeWatcher {
    _watcher: RecommendedWatcher,
}

impl ThemeWatcher {
    /// Watch the given stylesheets.
    ///
    /// Returns the watcher and a channel to receive events. Events are
    /// delivered only for the listed files.
    pub fn new(
        themes: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<ThemeEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        let mut dirs: Vec<&Path> = themes.iter().filter_map(|p| p.parent()).collect();
        dirs.sort();
        dirs.dedup();

        for dir in dirs {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::warn!("Theme directory not found: {}", dir.display());
            }
        }

        let watched: HashSet<PathBuf> = themes.iter().map(|p| normalize(p)).collect();

        std::thread::spawn(move || {
            let mut pending: Vec<ThemeEvent> = Vec::new();

            while let Ok(event) = sync_rx.recv() {
                collect(&event, &watched, &mut pending);

                // Trailing edge: forward only once the burst has gone quiet.
                let disconnected = loop {
                    match sync_rx.recv_timeout(DEBOUNCE) {
                        Ok(event) => collect(&event, &watched, &mut pending),
                        Err(mpsc::RecvTimeoutError::Timeout) => break false,
                        Err(mpsc::RecvTimeoutError::Disconnected) => break true,
                    }
                };

                for theme_event in pending.drain(..) {
                    if async_tx.blocking_send(theme_event).is_err() {
                        return;
                    }
                }

                if disconnected {
                    return;
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Record the watched paths touched by a raw event. The latest kind per path wins.
fn collect(event: &notify::Event, watched: &HashSet<PathBuf>, pending: &mut Vec<ThemeEvent>) {
    for path in &event.paths {
        if !watched.contains(&normalize(path)) {
            continue;
        }

        let Some(theme_event) = classify_event(path, &event.kind) else {
            continue;
        };

        match pending.iter_mut().find(|e| e.path() == path) {
            Some(existing) => *existing = theme_event,
            None => pending.push(theme_event),
        }
    }
}

/// Canonical form when the file exists, otherwise the path as given.
fn normalize(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| {
            // A removed file can no longer be canonicalized; fall back to its directory.
            match (path.parent(), path.file_name()) {
                (Some(parent), Some(name)) => parent.canonicalize().map(|p| p.join(name)),
                _ => Err(std::io::Error::other("no parent")),
            }
        })
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Classify a notify event into a ThemeEvent.
fn classify_event(path: &Path, kind: &EventKind) -> Option<ThemeEvent> {
    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(ThemeEvent::Changed(path.to_path_buf()))
        }
        EventKind::Remove(_) => Some(ThemeEvent::Removed(path.to_path_buf())),
        _ => None,
    }
}
