//! Stylesheet loading.

use std::fs;
use std::path::{Path, PathBuf};

/// Raw text of one theme stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// Path the stylesheet was read from (or a label for in-memory sources)
    pub path: PathBuf,

    /// Unparsed CSS source
    pub source: String,
}

impl Stylesheet {
    /// Create a stylesheet from in-memory text.
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Errors that can occur when loading stylesheets.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Stylesheet not found: {0}")]
    NotFound(String),

    #[error("Failed to read stylesheet {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Loads theme stylesheets relative to a base directory.
#[derive(Debug, Clone)]
pub struct StylesheetReader {
    base_dir: PathBuf,
}

impl StylesheetReader {
    /// Create a reader resolving relative paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a stylesheet path against the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Read every stylesheet in order.
    ///
    /// Fails on the first missing or unreadable file, before anything is parsed.
    pub fn read_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Stylesheet>, ReadError> {
        paths.iter().map(|p| self.read(p.as_ref())).collect()
    }

    /// Read a single stylesheet.
    pub fn read(&self, path: &Path) -> Result<Stylesheet, ReadError> {
        let full = self.resolve(path);

        if !full.is_file() {
            return Err(ReadError::NotFound(full.display().to_string()));
        }

        let source = fs::read_to_string(&full).map_err(|e| ReadError::Unreadable {
            path: full.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Read stylesheet {} ({} bytes)", full.display(), source.len());

        Ok(Stylesheet { path: full, source })
    }
}
