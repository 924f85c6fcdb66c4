//! Final engine configuration.

use serde::Serialize;

use crate::content::GlobEntry;
use crate::plugins::UtilityGroup;
use crate::table::Table;
use crate::theme::Theme;

/// Class name prefix applied to every generated utility.
pub const DEFAULT_PREFIX: &str = "tw-";

/// Utilities suppressed from generation.
pub const BLOCKLIST: &[&str] = &[
    // need the variables from the base layer, which is not loaded
    "transform",
    "shadow",
    "ring",
    "blur",
    "grayscale",
    "invert",
    "!invert",
    "filter",
    "!filter",
    "backdrop-filter",
    // superseded by the doubled `.hidden.hidden` utility
    "hidden",
];

/// Options that are not derived from stylesheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOptions {
    pub prefix: String,

    /// Mark every generated declaration `!important`
    pub important: bool,

    pub blocklist: Vec<String>,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            important: true,
            blocklist: BLOCKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Configuration handed to the utility CSS engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    pub prefix: String,
    pub important: bool,
    pub content: Vec<GlobEntry>,
    pub blocklist: Vec<String>,
    pub theme: Theme,
    pub plugins: Vec<UtilityGroup>,
}

impl BuildConfig {
    /// Whether a utility name is suppressed. Exact match only.
    pub fn is_blocked(&self, utility: &str) -> bool {
        self.blocklist.iter().any(|b| b == utility)
    }

    /// Filter candidate utility names down to the ones the engine may emit.
    pub fn usable<'a>(&self, utilities: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        utilities
            .into_iter()
            .filter(|u| !self.is_blocked(u))
            .collect()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Composes derived and fixed parts into a [`BuildConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigAssembler {
    options: AssemblerOptions,
}

impl ConfigAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub fn assemble(
        &self,
        colors: Table,
        content: Vec<GlobEntry>,
        plugins: Vec<UtilityGroup>,
    ) -> BuildConfig {
        BuildConfig {
            prefix: self.options.prefix.clone(),
            important: self.options.important,
            content,
            blocklist: self.options.blocklist.clone(),
            theme: Theme::with_colors(colors),
            plugins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::color_mapping;
    use crate::content::ContentGlobBuilder;
    use crate::mode::BuildMode;
    use crate::plugins::utility_groups;
    use pretty_assertions::assert_eq;
    use themewind_css::{extract_root_vars, Stylesheet};

    fn assemble(light: &str, dark: &str) -> BuildConfig {
        let vars = extract_root_vars(&[
            Stylesheet::new("theme-light.css", light),
            Stylesheet::new("theme-dark.css", dark),
        ])
        .unwrap();

        ConfigAssembler::default().assemble(
            color_mapping(&vars),
            ContentGlobBuilder::default().build(BuildMode::Production),
            utility_groups(),
        )
    }

    #[test]
    fn light_and_dark_themes_share_color_keys() {
        let config = assemble(
            ":root { --color-accent: #123456; --color-bg: #ffffff; }",
            ":root { --color-bg: #000000; }",
        );

        let colors = &config.theme.colors;
        assert_eq!(
            colors.keys().collect::<Vec<_>>(),
            vec!["accent", "bg", "inherit", "current", "transparent"]
        );
        assert_eq!(colors.get("bg"), Some("var(--color-bg)"));
        assert!(!colors.iter().any(|(_, v)| v.contains('#')));
    }

    #[test]
    fn blocks_exact_names_only() {
        let config = assemble(":root {}", ":root {}");

        assert!(config.is_blocked("hidden"));
        assert!(config.is_blocked("!filter"));
        assert!(!config.is_blocked("transform-reset"));
        assert!(!config.is_blocked("shadow-md"));

        let usable = config.usable(["flex", "hidden", "ring", "ring-2", "blur"]);
        assert_eq!(usable, vec!["flex", "ring-2"]);
    }

    #[test]
    fn serializes_engine_shape() {
        let config = assemble(":root { --color-red: #db2828; }", ":root {}");

        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["prefix"], "tw-");
        assert_eq!(json["important"], true);
        assert_eq!(json["content"][0], "!./templates/devtest/**/*");
        assert_eq!(json["blocklist"][10], "hidden");
        assert_eq!(json["theme"]["colors"]["red"], "var(--color-red)");
        assert_eq!(json["theme"]["fontSize"]["5"], "5px");
        assert_eq!(json["plugins"][0][".transform-reset"]["--tw-scale-y"], "1");
        assert_eq!(json["plugins"][1][".hidden.hidden"]["display"], "none");
    }

    #[test]
    fn custom_options() {
        let assembler = ConfigAssembler::new(AssemblerOptions {
            prefix: "x-".to_string(),
            important: false,
            blocklist: vec![],
        });

        let config = assembler.assemble(Table::new(), vec![], vec![]);

        assert_eq!(config.prefix, "x-");
        assert!(!config.important);
        assert!(!config.is_blocked("hidden"));
    }
}
