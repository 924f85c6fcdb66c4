//! Initialize a settings file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use themewind_config::DEFAULT_SETTINGS;

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_SETTINGS)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'themewind build' to generate the configuration.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_default_settings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("themewind.toml");

        run(&path, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_SETTINGS);
    }

    #[test]
    fn keeps_existing_without_yes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("themewind.toml");
        fs::write(&path, "# mine").unwrap();

        run(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        run(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_SETTINGS);
    }
}
