//! Custom property extraction from `:root` blocks.
//!
//! Each stylesheet is first parsed strictly with lightningcss, so malformed
//! input fails the build. The validated source is then walked with cssparser,
//! which yields every rule and declaration in source order, `!important` ones
//! included.

use std::collections::HashSet;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use lightningcss::stylesheet::{ParserFlags, ParserOptions, StyleSheet};

use crate::reader::Stylesheet;

/// The only selector whose declarations are collected.
///
/// Selector lists and compound selectors containing `:root` do not match.
pub const ROOT_SELECTOR: &str = ":root";

/// Prefix that marks a custom property.
pub const CUSTOM_PROPERTY_MARKER: &str = "--";

/// At-rules whose block holds a nested rule list.
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "layer",
    "container",
    "scope",
    "starting-style",
    "document",
    "-moz-document",
];

/// A custom property declared inside a `:root` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDeclaration {
    /// Property name including the `--` marker
    pub name: String,

    /// Source text of the value, without `!important`
    pub value: String,
}

impl RootDeclaration {
    /// Create a declaration from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Variable name without the marker, if this declaration contributes one.
    fn variable_name(&self) -> Option<&str> {
        if self.value.trim().is_empty() {
            return None;
        }
        self.name
            .strip_prefix(CUSTOM_PROPERTY_MARKER)
            .filter(|name| !name.is_empty())
    }
}

/// Ordered, deduplicated custom property names (without the `--` marker).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedVariableSet {
    names: Vec<String>,
}

impl ExtractedVariableSet {
    /// Build a set from declarations, keeping the first occurrence of each name.
    pub fn from_declarations<'a>(
        declarations: impl IntoIterator<Item = &'a RootDeclaration>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for name in declarations
            .into_iter()
            .filter_map(RootDeclaration::variable_name)
        {
            if seen.insert(name) {
                names.push(name.to_string());
            }
        }

        Self { names }
    }

    /// Iterate names in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Check whether a name (without marker) was extracted.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<'a> IntoIterator for &'a ExtractedVariableSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Errors that can occur during extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to parse stylesheet {path}: {message}")]
    Parse { path: String, message: String },
}

/// Extract custom property names declared in `:root` blocks across all sheets.
///
/// Sheets are processed in the given order, so the result follows first
/// occurrence across the whole sequence.
pub fn extract_root_vars(sheets: &[Stylesheet]) -> Result<ExtractedVariableSet, ExtractError> {
    let mut declarations = Vec::new();

    for sheet in sheets {
        let found = root_declarations(sheet)?;
        tracing::debug!(
            "Found {} :root declarations in {}",
            found.len(),
            sheet.path.display()
        );
        declarations.extend(found);
    }

    let vars = ExtractedVariableSet::from_declarations(&declarations);
    tracing::debug!("Extracted {} unique custom properties", vars.len());

    Ok(vars)
}

/// Parse one stylesheet and collect every custom property declared in a
/// `:root` block, in source order.
pub fn root_declarations(sheet: &Stylesheet) -> Result<Vec<RootDeclaration>, ExtractError> {
    validate(sheet)?;

    let mut input = ParserInput::new(&sheet.source);
    let mut parser = Parser::new(&mut input);
    let mut walker = RuleWalker { found: Vec::new() };

    // Validation already passed, so item errors only mark rules that are skipped.
    for _ in cssparser::StyleSheetParser::new(&mut parser, &mut walker) {}

    Ok(walker.found)
}

/// Reject anything lightningcss cannot parse without error recovery.
fn validate(sheet: &Stylesheet) -> Result<(), ExtractError> {
    let options = ParserOptions {
        flags: ParserFlags::NESTING,
        ..ParserOptions::default()
    };

    StyleSheet::parse(&sheet.source, options)
        .map(|_| ())
        .map_err(|e| ExtractError::Parse {
            path: sheet.path.display().to_string(),
            message: e.to_string(),
        })
}

/// Consume the rest of a parser's input.
fn drain(input: &mut Parser<'_, '_>) {
    while input.next().is_ok() {}
}

/// Walks a rule list, collecting declarations from top-level `:root` blocks
/// and from `:root` blocks inside grouping at-rules.
struct RuleWalker {
    found: Vec<RootDeclaration>,
}

impl<'i> QualifiedRuleParser<'i> for RuleWalker {
    /// Whether the selector is exactly `:root`
    type Prelude = bool;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut tokens = Vec::new();
        while let Ok(token) = input.next() {
            tokens.push(token.clone());
        }

        Ok(matches!(
            tokens.as_slice(),
            [Token::Colon, Token::Ident(name)] if name.eq_ignore_ascii_case("root")
        ))
    }

    fn parse_block<'t>(
        &mut self,
        is_root: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        // Rules nested in a style rule are compound selectors, never `:root`.
        if !is_root {
            drain(input);
            return Ok(());
        }

        let mut block = RootBlockParser;
        let body = RuleBodyParser::new(input, &mut block);
        self.found.extend(body.flatten());

        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for RuleWalker {
    /// Whether the block holds a nested rule list
    type Prelude = bool;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        drain(input);
        Ok(GROUPING_AT_RULES
            .iter()
            .any(|rule| name.eq_ignore_ascii_case(rule)))
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        grouping: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        if grouping {
            for _ in cssparser::StyleSheetParser::new(input, self) {}
        } else {
            drain(input);
        }
        Ok(())
    }
}

/// Parses the body of a `:root` block into declarations.
///
/// Nested rules are consumed and yield errors, which the caller skips.
struct RootBlockParser;

impl<'i> DeclarationParser<'i> for RootBlockParser {
    type Declaration = RootDeclaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace().is_ok() {}
        let value = strip_important(input.slice_from(start));

        Ok(RootDeclaration::new(name.as_ref(), value.trim()))
    }
}

impl<'i> AtRuleParser<'i> for RootBlockParser {
    type Prelude = ();
    type AtRule = RootDeclaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        drain(input);
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        drain(input);
        Err(input.new_custom_error::<(), ()>(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for RootBlockParser {
    type Prelude = ();
    type QualifiedRule = RootDeclaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        drain(input);
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        drain(input);
        Err(input.new_custom_error::<(), ()>(()))
    }
}

impl<'i> RuleBodyItemParser<'i, RootDeclaration, ()> for RootBlockParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Remove a trailing `!important` (any case, optional space after `!`).
fn strip_important(value: &str) -> &str {
    let trimmed = value.trim_end();
    let keyword = "important";

    let Some(split) = trimmed.len().checked_sub(keyword.len()) else {
        return value;
    };
    let (Some(head), Some(tail)) = (trimmed.get(..split), trimmed.get(split..)) else {
        return value;
    };
    if !tail.eq_ignore_ascii_case(keyword) {
        return value;
    }

    head.trim_end().strip_suffix('!').unwrap_or(value)
}
