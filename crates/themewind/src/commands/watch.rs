//! Watch command: rebuild on theme changes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use themewind_config::{generate, BuildMode, Settings};

use crate::commands::build::write_config;
use crate::watcher::{ThemeEvent, ThemeWatcher};

/// Run the watch command.
pub async fn run(config_path: &Path, output: PathBuf, mode: BuildMode) -> Result<()> {
    let settings = Settings::load(config_path)?;

    // The first build must succeed; later failures keep the previous output.
    rebuild(&settings, &output, mode)?;

    let themes = settings.resolved_theme_paths();
    let (_watcher, mut rx) =
        ThemeWatcher::new(&themes).context("Failed to watch theme stylesheets")?;

    tracing::info!("Watching {} theme stylesheets", themes.len());

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                let path = event.path().display();
                match &event {
                    ThemeEvent::Changed(_) => tracing::info!("{} changed, rebuilding", path),
                    ThemeEvent::Removed(_) => tracing::warn!("{} was removed", path),
                }
                if let Err(e) = rebuild(&settings, &output, mode) {
                    tracing::error!("Rebuild failed, keeping previous output: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping");
                break;
            }
        }
    }

    Ok(())
}

fn rebuild(settings: &Settings, output: &Path, mode: BuildMode) -> Result<()> {
    let generated = generate(settings, mode).context("Failed to generate configuration")?;
    write_config(&generated.config, Some(output), true)?;

    tracing::info!(
        "Rebuilt with {} variables in {}ms",
        generated.vars.len(),
        generated.duration_ms
    );

    Ok(())
}
