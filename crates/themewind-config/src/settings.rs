//! Project settings file (themewind.toml).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assembler::{AssemblerOptions, DEFAULT_PREFIX};
use crate::content::{Allowlist, BUILTIN_ALLOWLIST_VERSION};

/// Default settings file name.
pub const SETTINGS_FILE: &str = "themewind.toml";

/// Parsed settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub themes: ThemeSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub content: ContentSettings,

    /// Directory relative theme paths resolve against
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeSettings {
    #[serde(default = "default_themes_dir")]
    pub dir: String,

    /// Stylesheets in extraction order. Earlier files decide the position of
    /// shared variables.
    #[serde(default = "default_theme_files")]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_important")]
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ContentSettings {
    /// Replaces the built-in allowlist when set
    pub allowlist: Option<Vec<String>>,
    pub allowlist_version: Option<u32>,
}

fn default_themes_dir() -> String {
    "web_src/css/themes".to_string()
}
fn default_theme_files() -> Vec<String> {
    vec![
        "theme-gitea-light.css".to_string(),
        "theme-gitea-dark.css".to_string(),
    ]
}
fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}
fn default_important() -> bool {
    true
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            dir: default_themes_dir(),
            files: default_theme_files(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            important: default_important(),
        }
    }
}

/// Errors that can occur when loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl Settings {
    /// Parse settings text. `root` is the directory theme paths resolve against.
    pub fn from_toml(text: &str, root: impl Into<PathBuf>) -> Result<Self, toml::de::Error> {
        let mut settings: Settings = toml::from_str(text)?;
        settings.root = root.into();
        Ok(settings)
    }

    /// Load settings from a file if it exists, falling back to defaults.
    ///
    /// A file that exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self {
                root,
                ..Self::default()
            });
        }

        let text = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let settings = Self::from_toml(&text, root).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Theme stylesheet paths relative to [`Settings::root`].
    pub fn theme_paths(&self) -> Vec<PathBuf> {
        self.themes
            .files
            .iter()
            .map(|f| Path::new(&self.themes.dir).join(f))
            .collect()
    }

    /// Theme stylesheet paths resolved against the root.
    pub fn resolved_theme_paths(&self) -> Vec<PathBuf> {
        self.theme_paths()
            .into_iter()
            .map(|p| self.root.join(p))
            .collect()
    }

    pub fn allowlist(&self) -> Allowlist {
        match &self.content.allowlist {
            Some(files) => Allowlist::new(
                self.content
                    .allowlist_version
                    .unwrap_or(BUILTIN_ALLOWLIST_VERSION),
                files.clone(),
            ),
            None => Allowlist::builtin(),
        }
    }

    pub fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            prefix: self.output.prefix.clone(),
            important: self.output.important,
            ..AssemblerOptions::default()
        }
    }
}

/// Settings file written by `themewind init`.
pub const DEFAULT_SETTINGS: &str = r#"# themewind configuration

[themes]
# Directory containing the theme stylesheets
dir = "web_src/css/themes"

# Stylesheets to read, in order. The first file to declare a variable
# decides its position in the generated palette.
files = ["theme-gitea-light.css", "theme-gitea-dark.css"]

[output]
# Prefix for every generated utility class
prefix = "tw-"

# Mark generated declarations !important
important = true

[content]
# Extra files outside templates/ and web_src/js/ that use utility classes.
# Setting this replaces the built-in list.
# allowlist_version = 2
# allowlist = ["models/avatars/avatar.go"]
"#;
