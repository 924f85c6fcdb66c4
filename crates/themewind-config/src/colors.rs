//! Color palette derived from theme custom properties.

use themewind_css::ExtractedVariableSet;

use crate::table::Table;

/// Prefix identifying color custom properties.
pub const COLOR_PREFIX: &str = "color-";

/// Entries appended to every palette, independent of the stylesheets.
pub const CONSTANT_COLORS: [(&str, &str); 3] = [
    ("inherit", "inherit"),
    ("current", "currentcolor"),
    ("transparent", "transparent"),
];

/// Build the color palette from extracted variables.
///
/// Each `color-<key>` variable maps `<key>` to `var(--color-<key>)`, so the
/// generated utilities follow the live theme value instead of a baked one.
pub fn color_mapping(vars: &ExtractedVariableSet) -> Table {
    let mut colors: Table = vars
        .iter()
        .filter_map(|name| name.strip_prefix(COLOR_PREFIX))
        .filter(|key| !key.is_empty())
        .map(|key| (key.to_string(), color_reference(key)))
        .collect();

    colors.extend(CONSTANT_COLORS);

    tracing::debug!(
        "Derived {} theme colors",
        colors.len() - CONSTANT_COLORS.len()
    );

    colors
}

/// Reference expression for a color key.
pub fn color_reference(key: &str) -> String {
    format!("var(--{}{})", COLOR_PREFIX, key)
}
