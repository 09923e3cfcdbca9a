use crate::error::{CapyError, Result};
use std::env as stdenv;

/// Version of the interpreter and of the script language it accepts.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interpreter settings. [`crate::Interpreter::new`] runs [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Language version the caller asks for. Only [`VERSION`] is supported.
    pub version: String,
    /// When set, `math.div` by zero fails instead of producing `0.0`.
    pub strict_division: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: VERSION.to_string(),
            strict_division: false,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// Reads `CAPYSCRIPT_VERSION` and `CAPYSCRIPT_STRICT_DIV`; unset variables
    /// keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| stdenv::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(version) = lookup("CAPYSCRIPT_VERSION") {
            config.version = version.trim().to_string();
        }
        if let Some(flag) = lookup("CAPYSCRIPT_STRICT_DIV") {
            config.strict_division = parse_flag(&flag);
        }
        config
    }

    /// Reject versions other than the one this interpreter implements.
    pub fn validate(&self) -> Result<()> {
        if self.version == VERSION {
            Ok(())
        } else {
            Err(CapyError::UnsupportedVersion {
                requested: self.version.clone(),
                current: VERSION.to_string(),
            })
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_in(&[]));
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_division_flag() {
        let on = Config::from_lookup(lookup_in(&[("CAPYSCRIPT_STRICT_DIV", "Yes")]));
        assert!(on.strict_division);

        let off = Config::from_lookup(lookup_in(&[("CAPYSCRIPT_STRICT_DIV", "0")]));
        assert!(!off.strict_division);
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let config = Config::from_lookup(lookup_in(&[("CAPYSCRIPT_VERSION", "0.9.0")]));
        match config.validate() {
            Err(CapyError::UnsupportedVersion { requested, current }) => {
                assert_eq!(requested, "0.9.0");
                assert_eq!(current, VERSION);
            }
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }
}
