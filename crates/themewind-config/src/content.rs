//! Source file patterns scanned for utility class usage.

use serde::ser::{Serialize, Serializer};

use crate::mode::BuildMode;

/// Templates and scripts only used by the development test pages.
pub const DEV_ONLY_EXCLUSIONS: &[&str] = &[
    "./templates/devtest/**/*",
    "./web_src/js/standalone/devtest.js",
];

/// Generated or non-HTML templates that never contain utility classes.
pub const EXCLUSIONS: &[&str] = &[
    "./templates/swagger/v1_json.tmpl",
    "./templates/user/auth/oidc_wellknown.tmpl",
];

/// The main template and script trees.
pub const INCLUSIONS: &[&str] = &["./templates/**/*.tmpl", "./web_src/js/**/*.{js,vue}"];

/// Version of [`BUILTIN_ALLOWLIST`]. Bump whenever the list changes.
pub const BUILTIN_ALLOWLIST_VERSION: u32 = 1;

/// Go sources outside the main trees that emit utility classes.
///
/// Closed and maintained by hand: a new file using utility classes outside
/// the main trees is not scanned until it is listed here.
pub const BUILTIN_ALLOWLIST: &[&str] = &[
    "models/avatars/avatar.go",
    "modules/markup/file_preview.go",
    "modules/markup/sanitizer.go",
    "services/auth/source/oauth2/*.go",
    "routers/web/repo/{view,blame,issue_content_history}.go",
];

/// When an entry takes part in the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobCondition {
    /// Always emitted
    Always,
    /// Emitted only outside development builds
    ProductionOnly,
}

/// A single content pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobEntry {
    /// Pattern without the `!` negation marker
    pub pattern: String,

    /// Exclusion pattern
    pub negated: bool,

    pub condition: GlobCondition,
}

impl GlobEntry {
    /// An inclusion pattern.
    pub fn include(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            negated: false,
            condition: GlobCondition::Always,
        }
    }

    /// An exclusion pattern.
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self {
            negated: true,
            ..Self::include(pattern)
        }
    }

    /// Restrict this entry to non-development builds.
    pub fn production_only(mut self) -> Self {
        self.condition = GlobCondition::ProductionOnly;
        self
    }

    /// Whether the entry is emitted for the given mode.
    pub fn applies_to(&self, mode: BuildMode) -> bool {
        match self.condition {
            GlobCondition::Always => true,
            GlobCondition::ProductionOnly => !mode.is_development(),
        }
    }

    /// Pattern as the engine expects it, `!`-prefixed when negated.
    pub fn render(&self) -> String {
        if self.negated {
            format!("!{}", self.pattern)
        } else {
            self.pattern.clone()
        }
    }
}

impl Serialize for GlobEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

/// Hand-maintained list of extra files to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    pub version: u32,
    pub files: Vec<String>,
}

impl Allowlist {
    pub fn new(version: u32, files: Vec<String>) -> Self {
        Self { version, files }
    }

    /// The list shipped with this crate.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ALLOWLIST_VERSION,
            BUILTIN_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
        )
    }
}

/// Fixed pattern groups, stored without negation markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSources {
    pub dev_only_exclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub inclusions: Vec<String>,
}

impl Default for ContentSources {
    fn default() -> Self {
        let owned = |patterns: &[&str]| -> Vec<String> {
            patterns.iter().map(|s| s.to_string()).collect()
        };
        Self {
            dev_only_exclusions: owned(DEV_ONLY_EXCLUSIONS),
            exclusions: owned(EXCLUSIONS),
            inclusions: owned(INCLUSIONS),
        }
    }
}

/// Assembles the ordered content pattern list.
#[derive(Debug, Clone)]
pub struct ContentGlobBuilder {
    sources: ContentSources,
    allowlist: Allowlist,
}

impl ContentGlobBuilder {
    pub fn new(sources: ContentSources, allowlist: Allowlist) -> Self {
        Self { sources, allowlist }
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    /// Every entry with its condition, before mode filtering.
    ///
    /// Order: dev-only exclusions, exclusions, inclusions, allowlist.
    pub fn entries(&self) -> Vec<GlobEntry> {
        let dev_only = self
            .sources
            .dev_only_exclusions
            .iter()
            .map(|p| GlobEntry::exclude(p).production_only());
        let excluded = self.sources.exclusions.iter().map(GlobEntry::exclude);
        let included = self.sources.inclusions.iter().map(GlobEntry::include);
        let allowed = self.allowlist.files.iter().map(GlobEntry::include);

        dev_only
            .chain(excluded)
            .chain(included)
            .chain(allowed)
            .collect()
    }

    /// Entries emitted for the given mode.
    pub fn build(&self, mode: BuildMode) -> Vec<GlobEntry> {
        let entries: Vec<GlobEntry> = self
            .entries()
            .into_iter()
            .filter(|e| e.applies_to(mode))
            .collect();

        tracing::debug!(
            "Built {} content patterns for {} (allowlist v{})",
            entries.len(),
            mode,
            self.allowlist.version
        );

        entries
    }
}

impl Default for ContentGlobBuilder {
    fn default() -> Self {
        Self::new(ContentSources::default(), Allowlist::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(entries: &[GlobEntry]) -> Vec<String> {
        entries.iter().map(GlobEntry::render).collect()
    }

    #[test]
    fn production_build_order() {
        let globs = ContentGlobBuilder::default().build(BuildMode::Production);

        assert_eq!(
            rendered(&globs),
            vec![
                "!./templates/devtest/**/*",
                "!./web_src/js/standalone/devtest.js",
                "!./templates/swagger/v1_json.tmpl",
                "!./templates/user/auth/oidc_wellknown.tmpl",
                "./templates/**/*.tmpl",
                "./web_src/js/**/*.{js,vue}",
                "models/avatars/avatar.go",
                "modules/markup/file_preview.go",
                "modules/markup/sanitizer.go",
                "services/auth/source/oauth2/*.go",
                "routers/web/repo/{view,blame,issue_content_history}.go",
            ]
        );
    }

    #[test]
    fn development_build_scans_devtest() {
        let globs = rendered(&ContentGlobBuilder::default().build(BuildMode::Development));

        assert!(!globs.iter().any(|g| g.contains("devtest")));
        assert_eq!(globs[0], "!./templates/swagger/v1_json.tmpl");
        assert_eq!(globs.len(), 9);
    }

    #[test]
    fn mode_follows_env_value() {
        let builder = ContentGlobBuilder::default();
        let has_devtest = |value: Option<&str>| {
            rendered(&builder.build(BuildMode::from_value(value)))
                .iter()
                .any(|g| g == "!./templates/devtest/**/*")
        };

        assert!(!has_devtest(Some("development")));
        assert!(has_devtest(None));
        assert!(has_devtest(Some("production")));
        assert!(has_devtest(Some("test")));
    }

    #[test]
    fn uses_supplied_allowlist() {
        let allowlist = Allowlist::new(7, vec!["cmd/web.go".to_string()]);
        let builder = ContentGlobBuilder::new(ContentSources::default(), allowlist);

        let globs = rendered(&builder.build(BuildMode::Production));

        assert_eq!(globs.last().map(String::as_str), Some("cmd/web.go"));
        assert!(!globs.iter().any(|g| g == "models/avatars/avatar.go"));
        assert_eq!(builder.allowlist().version, 7);
    }

    #[test]
    fn serializes_rendered_patterns() {
        let entries = vec![GlobEntry::exclude("a/**"), GlobEntry::include("b/*.tmpl")];

        let json = serde_json::to_string(&entries).unwrap();

        assert_eq!(json, r#"["!a/**","b/*.tmpl"]"#);
    }
}
