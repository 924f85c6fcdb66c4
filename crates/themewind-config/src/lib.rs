//! Utility CSS engine configuration derived from theme stylesheets.
//!
//! Turns the custom properties declared by the theme stylesheets into a color
//! palette and combines it with fixed scales, content patterns and static
//! utilities into a single [`BuildConfig`].

pub mod assembler;
pub mod colors;
pub mod content;
pub mod mode;
pub mod pipeline;
pub mod plugins;
pub mod settings;
pub mod table;
pub mod theme;

pub use assembler::{AssemblerOptions, BuildConfig, ConfigAssembler, BLOCKLIST, DEFAULT_PREFIX};
pub use colors::{color_mapping, color_reference, COLOR_PREFIX, CONSTANT_COLORS};
pub use content::{Allowlist, ContentGlobBuilder, ContentSources, GlobCondition, GlobEntry};
pub use mode::{BuildMode, UnknownMode, MODE_ENV_VAR};
pub use pipeline::{extract_vars, generate, GenerateError, Generated};
pub use plugins::{utility_groups, UtilityDeclaration, UtilityGroup};
pub use settings::{Settings, SettingsError, DEFAULT_SETTINGS, SETTINGS_FILE};
pub use table::Table;
pub use theme::Theme;
