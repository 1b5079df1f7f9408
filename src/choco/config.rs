//! Layered configuration
//!
//! `defaults/choco.default.toml` is embedded in the library, so the
//! documented defaults and runtime behavior cannot drift apart. Callers layer
//! their own files and single-key overrides on top via [`Loader`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/choco.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChocoConfig {
    pub lexer: LexerConfig,
    pub json: JsonConfig,
    pub rebuild: RebuildConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexerConfig {
    /// Columns per tab stop when measuring indentation
    pub tab_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonConfig {
    pub indent: usize,
    /// Per-instance documents are named `<prefix>.<id>.json`
    pub instance_file_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RebuildConfig {
    /// Spaces per nesting level
    pub indent_width: usize,
}

impl ChocoConfig {
    /// Reject settings the pipeline cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = [
            ("lexer.tab_width", self.lexer.tab_width),
            ("json.indent", self.json.indent),
            ("rebuild.indent_width", self.rebuild.indent_width),
        ];
        for (key, width) in widths {
            if width == 0 {
                return Err(ConfigError::Message(format!("`{}` must be positive", key)));
            }
        }
        if self.json.instance_file_prefix.trim().is_empty() {
            return Err(ConfigError::Message(
                "`json.instance_file_prefix` must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ChocoConfig {
    fn default() -> Self {
        ChocoConfig {
            lexer: LexerConfig { tab_width: 8 },
            json: JsonConfig {
                indent: 4,
                instance_file_prefix: "e2eviv".to_string(),
            },
            rebuild: RebuildConfig { indent_width: 2 },
        }
    }
}

/// Layers user settings over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML file if it exists
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. settings embedded by a caller
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Override a single key such as `json.indent`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Build, deserialize and validate
    pub fn build(self) -> Result<ChocoConfig, ConfigError> {
        let config: ChocoConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ChocoConfig, ConfigError> {
    Loader::new().build()
}
