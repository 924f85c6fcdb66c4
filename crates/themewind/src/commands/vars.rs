//! Variable listing command.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use themewind_config::{color_mapping, extract_vars, Settings};

/// Run the vars command.
pub fn run(config_path: &Path, colors: bool) -> Result<()> {
    let settings = Settings::load(config_path)?;
    let vars = extract_vars(&settings).context("Failed to extract theme variables")?;

    let mut stdout = std::io::stdout().lock();

    if colors {
        for (key, value) in color_mapping(&vars).iter() {
            writeln!(stdout, "{}\t{}", key, value)?;
        }
    } else {
        for name in vars.iter() {
            writeln!(stdout, "--{}", name)?;
        }
    }

    tracing::debug!("Listed {} variables", vars.len());

    Ok(())
}
