//! Configuration build command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use themewind_config::{generate, BuildConfig, BuildMode, Settings};

/// Run the build command.
pub fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    mode: BuildMode,
    pretty: bool,
) -> Result<()> {
    let settings = Settings::load(config_path)?;

    tracing::info!("Generating {} configuration...", mode);

    let generated = generate(&settings, mode).context("Failed to generate configuration")?;

    write_config(&generated.config, output.as_deref(), pretty)?;

    tracing::info!(
        "Derived {} colors from {} variables in {}ms",
        generated.config.theme.colors.len(),
        generated.vars.len(),
        generated.duration_ms
    );

    Ok(())
}

/// Serialize the configuration to a file, or to stdout when no path is given.
pub fn write_config(config: &BuildConfig, output: Option<&Path>, pretty: bool) -> Result<()> {
    let json = if pretty {
        config.to_json_pretty()
    } else {
        config.to_json()
    }
    .context("Failed to serialize configuration")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Output: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_config_file() {
        let temp = tempdir().unwrap();
        let themes = temp.path().join("web_src/css/themes");
        fs::create_dir_all(&themes).unwrap();
        fs::write(
            themes.join("theme-gitea-light.css"),
            ":root { --color-accent: #123456; }",
        )
        .unwrap();
        fs::write(
            themes.join("theme-gitea-dark.css"),
            ":root { --color-accent: #654321; }",
        )
        .unwrap();

        let config_path = temp.path().join("themewind.toml");
        let output = temp.path().join("out/tailwind.json");

        run(&config_path, Some(output.clone()), BuildMode::Production, false).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["theme"]["colors"]["accent"], "var(--color-accent)");
        assert_eq!(json["prefix"], "tw-");
    }

    #[test]
    fn fails_without_themes() {
        let temp = tempdir().unwrap();

        let result = run(
            &temp.path().join("themewind.toml"),
            Some(temp.path().join("out.json")),
            BuildMode::Production,
            true,
        );

        assert!(result.is_err());
        assert!(!temp.path().join("out.json").exists());
    }
}
