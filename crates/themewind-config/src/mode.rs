//! Development/production build mode.

use std::fmt;
use std::str::FromStr;

/// Environment variable holding the build mode.
pub const MODE_ENV_VAR: &str = "NODE_ENV";

/// The only value that selects a development build.
pub const DEVELOPMENT_VALUE: &str = "development";

/// Whether the configuration is generated for a development build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    /// Interpret a raw flag value. Only an exact `development` opts in.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(DEVELOPMENT_VALUE) => Self::Development,
            _ => Self::Production,
        }
    }

    /// Read the mode from `NODE_ENV`.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_VALUE,
            Self::Production => "production",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized explicit mode name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown build mode '{0}' (expected 'development' or 'production')")]
pub struct UnknownMode(String);

impl FromStr for BuildMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_development_opts_in() {
        assert_eq!(BuildMode::from_value(Some("development")), BuildMode::Development);
        assert_eq!(BuildMode::from_value(None), BuildMode::Production);
        assert_eq!(BuildMode::from_value(Some("")), BuildMode::Production);
        assert_eq!(BuildMode::from_value(Some("production")), BuildMode::Production);
        assert_eq!(BuildMode::from_value(Some("Development")), BuildMode::Production);
        assert_eq!(BuildMode::from_value(Some("dev")), BuildMode::Production);
    }

    #[test]
    fn parses_explicit_names() {
        assert_eq!("dev".parse::<BuildMode>().unwrap(), BuildMode::Development);
        assert_eq!("production".parse::<BuildMode>().unwrap(), BuildMode::Production);
        assert!("staging".parse::<BuildMode>().is_err());
    }
}
