//! In-memory registry.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};

use super::{ConfigurationOracle, OracleError};

/// Name under which a key's default data is stored.
const DEFAULT_VALUE: &str = "(Default)";

/// A registry held in memory.
///
/// Key paths and value names are matched case-insensitively, as in the
/// real registry. It can also be loaded from a TOML file whose tables are
/// key paths:
///
/// ```toml
/// ['HKLM\Software\Microsoft\VCExpress\10.0']
/// InstallDir = 'C:\VS10\Common7\IDE\'
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryOracle {
    keys: HashMap<String, HashMap<String, String>>,
}

impl MemoryOracle {
    /// Create an empty registry.
    pub fn new() -> Self {
        MemoryOracle::default()
    }

    /// Add a key with no values.
    pub fn with_key(mut self, key: &str) -> Self {
        self.add_key(key);
        self
    }

    /// Add a named value under `key`, creating the key if needed.
    pub fn with_value(mut self, key: &str, name: &str, data: impl Into<String>) -> Self {
        self.set_value(key, name, data);
        self
    }

    /// Add a key.
    pub fn add_key(&mut self, key: &str) {
        self.keys.entry(fold(key)).or_default();
    }

    /// Set a named value under `key`, creating the key if needed.
    pub fn set_value(&mut self, key: &str, name: &str, data: impl Into<String>) {
        self.keys
            .entry(fold(key))
            .or_default()
            .insert(fold(name), data.into());
    }

    /// Parse a registry from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let tables: BTreeMap<String, BTreeMap<String, String>> =
            toml::from_str(text).context("failed to parse registry file")?;

        let mut oracle = MemoryOracle::new();
        for (key, values) in tables {
            oracle.add_key(&key);
            for (name, data) in values {
                oracle.set_value(&key, &name, data);
            }
        }
        Ok(oracle)
    }

    /// Load a registry from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read registry file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid registry file: {}", path.display()))
    }
}

impl ConfigurationOracle for MemoryOracle {
    fn query_value(&self, key: &str, value: Option<&str>) -> Result<Option<String>, OracleError> {
        let name = fold(value.unwrap_or(DEFAULT_VALUE));
        Ok(self
            .keys
            .get(&fold(key))
            .and_then(|values| values.get(&name))
            .cloned())
    }

    fn key_exists(&self, key: &str) -> Result<bool, OracleError> {
        Ok(self.keys.contains_key(&fold(key)))
    }
}

fn fold(s: &str) -> String {
    s.to_ascii_lowercase()
}
