//! Tunables for coercion and wire output.
//!
//! Example TOML:
//! ```toml
//! [coercion]
//! max_nesting_depth = 64
//!
//! [wire]
//! pretty = true
//! ```
//!
//! Every key is optional. Environment variables `REQL_MAX_NESTING_DEPTH` and
//! `REQL_WIRE_PRETTY` override the file when [`ReqlConfig::with_env_overrides`]
//! is applied.

use std::fs;
use std::path::Path;

use reql_error::{Error, Result};
use serde::Deserialize;

pub const MAX_NESTING_DEPTH_ENV: &str = "REQL_MAX_NESTING_DEPTH";
pub const WIRE_PRETTY_ENV: &str = "REQL_WIRE_PRETTY";

/// Default nesting limit when converting client values.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoercionConfig {
    /// How many container levels (sequences, mappings, variant payloads)
    /// a coerced value may nest.
    pub max_nesting_depth: usize,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Indent the JSON text produced by [`crate::wire::to_string_with`].
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReqlConfig {
    pub coercion: CoercionConfig,
    pub wire: WireConfig,
}

impl ReqlConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::Config(format!("TOML parse error: {e}")))
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("reading {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded reql config");
        Ok(config)
    }

    /// Applies `REQL_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(MAX_NESTING_DEPTH_ENV) {
            self.coercion.max_nesting_depth = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{MAX_NESTING_DEPTH_ENV} must be an integer, got {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(WIRE_PRETTY_ENV) {
            self.wire.pretty = match raw.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(Error::Config(format!(
                        "{WIRE_PRETTY_ENV} must be a boolean, got {other:?}"
                    )))
                }
            };
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = ReqlConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ReqlConfig::default());
        assert_eq!(cfg.coercion.max_nesting_depth, 100);
        assert!(!cfg.wire.pretty);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = ReqlConfig::from_toml_str("[wire]\npretty = true\n").unwrap();
        assert!(cfg.wire.pretty);
        assert_eq!(cfg.coercion.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ReqlConfig::from_toml_str("[coercion]\nmax_nesting_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> =
            HashMap::from([(MAX_NESTING_DEPTH_ENV, "7"), (WIRE_PRETTY_ENV, "yes")]);
        let cfg = ReqlConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.coercion.max_nesting_depth, 7);
        assert!(cfg.wire.pretty);
    }

    #[test]
    fn bad_override_is_rejected() {
        let err = ReqlConfig::default()
            .with_overrides(|k| (k == MAX_NESTING_DEPTH_ENV).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("reql_config_test_{}.toml", std::process::id()));
        fs::write(&path, "[coercion]\nmax_nesting_depth = 12\n").unwrap();
        let cfg = ReqlConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.coercion.max_nesting_depth, 12);
        let _ = fs::remove_file(path);
    }
}
