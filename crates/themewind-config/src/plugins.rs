//! Static utility classes registered alongside the generated ones.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::table::Table;

/// One utility class and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityDeclaration {
    pub selector: String,
    pub properties: Table,
}

impl UtilityDeclaration {
    pub fn new<'a>(
        selector: &str,
        properties: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            selector: selector.to_string(),
            properties: properties.into_iter().collect(),
        }
    }
}

/// A named set of utilities, registered by the engine as one plugin.
///
/// Serializes as `{ selector: { property: value } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityGroup {
    pub name: &'static str,
    pub utilities: Vec<UtilityDeclaration>,
}

impl UtilityGroup {
    /// Find a utility by selector.
    pub fn get(&self, selector: &str) -> Option<&UtilityDeclaration> {
        self.utilities.iter().find(|u| u.selector == selector)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.utilities.iter().map(|u| u.selector.as_str())
    }
}

impl Serialize for UtilityGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.utilities.len()))?;
        for utility in &self.utilities {
            map.serialize_entry(&utility.selector, &utility.properties)?;
        }
        map.end()
    }
}

/// Defaults for the transform variables normally provided by the base layer,
/// which this build does not include. Apply `transform-reset` next to any
/// transform utility.
pub fn transform_reset() -> UtilityGroup {
    UtilityGroup {
        name: "transform-reset",
        utilities: vec![UtilityDeclaration::new(
            ".transform-reset",
            [
                ("--tw-translate-x", "0"),
                ("--tw-translate-y", "0"),
                ("--tw-rotate", "0"),
                ("--tw-skew-x", "0"),
                ("--tw-skew-y", "0"),
                ("--tw-scale-x", "1"),
                ("--tw-scale-y", "1"),
            ],
        )],
    }
}

/// `hidden` and `break-anywhere`.
///
/// The doubled `.hidden.hidden` selector has to beat every other
/// `display: ... !important` class, including the ones other frameworks on the
/// page attach to `.hidden`.
pub fn display_overrides() -> UtilityGroup {
    UtilityGroup {
        name: "display-overrides",
        utilities: vec![
            UtilityDeclaration::new(".hidden.hidden", [("display", "none")]),
            UtilityDeclaration::new(".break-anywhere", [("overflow-wrap", "anywhere")]),
        ],
    }
}

/// Every static utility group, in registration order.
pub fn utility_groups() -> Vec<UtilityGroup> {
    vec![transform_reset(), display_overrides()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn transform_reset_defaults() {
        let group = transform_reset();
        let reset = group.get(".transform-reset").unwrap();

        assert_eq!(reset.properties.len(), 7);
        assert_eq!(reset.properties.get("--tw-rotate"), Some("0"));
        assert_eq!(reset.properties.get("--tw-scale-x"), Some("1"));
    }

    #[test]
    fn hidden_uses_doubled_class() {
        let group = display_overrides();

        let hidden = group.get(".hidden.hidden").unwrap();
        assert_eq!(hidden.properties.get("display"), Some("none"));
        assert!(group.get(".hidden").is_none());

        let wrap = group.get(".break-anywhere").unwrap();
        assert_eq!(wrap.properties.get("overflow-wrap"), Some("anywhere"));
    }

    #[test]
    fn groups_have_disjoint_selectors() {
        let groups = utility_groups();
        let mut seen = HashSet::new();

        for selector in groups.iter().flat_map(UtilityGroup::selectors) {
            assert!(seen.insert(selector), "duplicate selector {}", selector);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn serializes_selector_map() {
        let json = serde_json::to_value(display_overrides()).unwrap();

        assert_eq!(json[".hidden.hidden"]["display"], "none");
        assert_eq!(json[".break-anywhere"]["overflow-wrap"], "anywhere");
    }
}
