//! Tool configuration, loaded from `apilens.toml` next to the analyzed
//! package when present.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::SourceOptions;

/// Top-level configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scope configuration for the source filter.
    pub source: SourceOptions,
    /// Whether a prop with a default value but no explicit optional marker
    /// in its declared type counts as optional.
    pub optional_when_default: bool,
    /// Treat duplicate declaration names as a fatal error.
    pub strict_duplicates: bool,
    /// Emit the typed-accessor wrapper next to the serialized model.
    pub emit_wrapper: bool,
    /// Output directory, relative to the analyzed package root.
    pub out_dir: String,
    /// Debounce window for watch mode, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceOptions::default(),
            optional_when_default: true,
            strict_duplicates: false,
            emit_wrapper: true,
            out_dir: ".apilens".to_string(),
            debounce_ms: 300,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Load `apilens.toml` from the package root if it exists, defaults
    /// otherwise.
    pub fn discover(root: &Path) -> anyhow::Result<Self> {
        let candidate = root.join("apilens.toml");
        if candidate.exists() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
