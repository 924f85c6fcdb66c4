//! One-shot generation from settings to engine configuration.

use std::time::Instant;

use themewind_css::{
    extract_root_vars, ExtractError, ExtractedVariableSet, ReadError, StylesheetReader,
};

use crate::assembler::{BuildConfig, ConfigAssembler};
use crate::colors::color_mapping;
use crate::content::{ContentGlobBuilder, ContentSources};
use crate::mode::BuildMode;
use crate::plugins::utility_groups;
use crate::settings::Settings;

/// Output of a generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub config: BuildConfig,

    /// Variables the palette was derived from
    pub vars: ExtractedVariableSet,

    pub duration_ms: u64,
}

/// Errors that abort generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Read the theme stylesheets and extract their `:root` variables.
pub fn extract_vars(settings: &Settings) -> Result<ExtractedVariableSet, GenerateError> {
    let reader = StylesheetReader::new(&settings.root);
    let sheets = reader.read_all(&settings.theme_paths())?;
    Ok(extract_root_vars(&sheets)?)
}

/// Run the whole pipeline. Every stylesheet is read before any is parsed.
pub fn generate(settings: &Settings, mode: BuildMode) -> Result<Generated, GenerateError> {
    let start = Instant::now();

    let vars = extract_vars(settings)?;
    let colors = color_mapping(&vars);
    let content =
        ContentGlobBuilder::new(ContentSources::default(), settings.allowlist()).build(mode);

    let config = ConfigAssembler::new(settings.assembler_options()).assemble(
        colors,
        content,
        utility_groups(),
    );

    Ok(Generated {
        config,
        vars,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
