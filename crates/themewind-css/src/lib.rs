//! Theme stylesheet loading and custom property extraction.
//!
//! Reads theme stylesheets from disk and collects the custom property names
//! declared inside exact `:root` blocks, in first-seen order.

pub mod extract;
pub mod reader;

pub use extract::{
    extract_root_vars, root_declarations, ExtractError, ExtractedVariableSet, RootDeclaration,
    CUSTOM_PROPERTY_MARKER, ROOT_SELECTOR,
};
pub use reader::{ReadError, Stylesheet, StylesheetReader};
