//! Fixed theme scale tables.

use serde::Serialize;

use crate::table::Table;

/// Highest generated numeric font size index (inclusive).
pub const MAX_FONT_SIZE_INDEX: u32 = 99;

/// Unit applied to every non-zero numeric font size.
pub const FONT_SIZE_UNIT: &str = "px";

/// Named font sizes, in pixels since the document root is 14px.
const NAMED_FONT_SIZES: [(&str, &str); 13] = [
    ("xs", "12px"),
    ("sm", "14px"),
    ("base", "16px"),
    ("lg", "18px"),
    ("xl", "20px"),
    ("2xl", "24px"),
    ("3xl", "30px"),
    ("4xl", "36px"),
    ("5xl", "48px"),
    ("6xl", "60px"),
    ("7xl", "72px"),
    ("8xl", "96px"),
    ("9xl", "128px"),
];

const FONT_WEIGHTS: [&str; 5] = ["light", "normal", "medium", "semibold", "bold"];

/// Theme section of the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub colors: Table,
    pub border_radius: Table,
    pub font_family: Table,
    pub font_weight: Table,
    pub font_size: Table,
}

impl Theme {
    /// Combine a color palette with the fixed scales.
    pub fn with_colors(colors: Table) -> Self {
        Self {
            colors,
            border_radius: border_radius(),
            font_family: font_family(),
            font_weight: font_weight(),
            font_size: font_size(),
        }
    }
}

pub fn border_radius() -> Table {
    [
        ("none", "0"),
        ("sm", "2px"),
        ("DEFAULT", "var(--border-radius)"),
        ("md", "var(--border-radius-medium)"),
        ("lg", "8px"),
        ("xl", "12px"),
        ("2xl", "16px"),
        ("3xl", "24px"),
        ("full", "var(--border-radius-full)"),
    ]
    .into_iter()
    .collect()
}

pub fn font_family() -> Table {
    [
        ("sans", "var(--fonts-regular)"),
        ("mono", "var(--fonts-monospace)"),
    ]
    .into_iter()
    .collect()
}

pub fn font_weight() -> Table {
    FONT_WEIGHTS
        .iter()
        .map(|w| (*w, format!("var(--font-weight-{})", w)))
        .collect()
}

/// `0..=99` followed by the named sizes, where `0` is a bare zero.
///
/// Integer keys come first, the order a JavaScript object enumerates them in.
pub fn font_size() -> Table {
    let mut sizes: Table =
        (0..=MAX_FONT_SIZE_INDEX).map(|i| (i.to_string(), numeric_size(i))).collect();
    sizes.extend(NAMED_FONT_SIZES);
    sizes
}

fn numeric_size(index: u32) -> String {
    if index == 0 {
        "0".to_string()
    } else {
        format!("{}{}", index, FONT_SIZE_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_indices() {
        let sizes = font_size();

        assert_eq!(sizes.get("0"), Some("0"));
        assert_eq!(sizes.get("5"), Some("5px"));
        assert_eq!(sizes.get("99"), Some("99px"));
        assert_eq!(sizes.get("100"), None);

        for i in 0..=MAX_FONT_SIZE_INDEX {
            assert!(sizes.contains_key(&i.to_string()), "missing index {}", i);
        }
    }

    #[test]
    fn font_size_keeps_named_scale() {
        let sizes = font_size();

        assert_eq!(sizes.len(), 13 + 100);
        assert_eq!(sizes.get("base"), Some("16px"));
        assert_eq!(sizes.get("9xl"), Some("128px"));
    }

    #[test]
    fn font_size_lists_indices_before_names() {
        let sizes = font_size();
        let keys: Vec<_> = sizes.keys().collect();

        assert_eq!(keys.first(), Some(&"0"));
        assert_eq!(keys[99], "99");
        assert_eq!(keys[100], "xs");
        assert_eq!(keys.last(), Some(&"9xl"));
    }

    #[test]
    fn radius_references_theme_vars() {
        let radius = border_radius();

        assert_eq!(radius.get("DEFAULT"), Some("var(--border-radius)"));
        assert_eq!(radius.get("none"), Some("0"));
        assert_eq!(radius.len(), 9);
    }

    #[test]
    fn font_weights_reference_theme_vars() {
        let weights = font_weight();

        assert_eq!(weights.get("semibold"), Some("var(--font-weight-semibold)"));
        assert_eq!(weights.len(), 5);
    }

    #[test]
    fn serializes_camel_case_sections() {
        let json = serde_json::to_value(Theme::with_colors(Table::new())).unwrap();

        assert_eq!(json["borderRadius"]["full"], "var(--border-radius-full)");
        assert_eq!(json["fontFamily"]["mono"], "var(--fonts-monospace)");
        assert_eq!(json["fontSize"]["0"], "0");
    }
}
