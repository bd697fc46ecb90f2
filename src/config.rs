//!
//! This module defines the configuration file format, discovery and loading for asciidocext.
//! Settings live in `.asciidocext.toml` (or `asciidocext.toml`) and are looked up from the
//! current directory upward.

use crate::asciidoc::{DESTINATION_KEY, RendererConfig, SettingsProvider};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration filenames searched for, in order of precedence.
pub const CONFIG_FILES: &[&str] = &[".asciidocext.toml", "asciidocext.toml"];

/// Represents the complete configuration loaded from `.asciidocext.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Directory the site is published to; the global `destination` setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Renderer options
    pub asciidoc: RendererConfig,
}

impl SettingsProvider for Config {
    fn get_string(&self, key: &str) -> String {
        match key {
            DESTINATION_KEY => self.destination.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to access config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError { path: String, message: String },

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    /// Parse configuration from TOML text. `path` is only used in error messages.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from an explicit file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        let config = Self::from_toml(&content, path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, either from `config_path` or by discovery from the
    /// current directory. `no_config` skips discovery and returns the defaults.
    pub fn load(config_path: Option<&Path>, no_config: bool) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_file(path);
        }
        if no_config {
            return Ok(Self::default());
        }

        let cwd = std::env::current_dir().map_err(|source| ConfigError::IoError {
            source,
            path: ".".to_string(),
        })?;
        match discover_config_file(&cwd) {
            Some(path) => Self::load_file(&path),
            None => {
                log::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> String {
        // Plain strings, booleans and arrays always serialize.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Find the nearest configuration file, starting at `start` and walking up.
pub fn discover_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Default configuration file content written by `init`.
pub const DEFAULT_CONFIG: &str = r#"# asciidocext configuration file

# Directory the site is published to. Required when
# working-folder-current is enabled.
# destination = "public"

[asciidoc]
# Output format: html5, html5s, xhtml5, docbook5, docbook45, manpage
backend = "html5"

# Informational only, not passed to the renderer
doc-type = "article"

# Extensions loaded with -r. Supported:
# asciidoctor-html5s, asciidoctor-diagram, asciidoctor-interdoc-reftext,
# asciidoctor-katex, asciidoctor-latex, asciidoctor-question, asciidoctor-rouge
extensions = []

# Produce an embeddable document without header and footer
no-header-or-footer = true

# Safe mode: unsafe, safe, server, secure
safe-mode = "safe"

section-numbers = false
verbose = false

# Resolve relative paths against the document's own directory
working-folder-current = false
"#;

/// Create a default configuration file at the specified path.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::FileExists {
            path: path.display().to_string(),
        });
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::IoError {
        source,
        path: path.display().to_string(),
    })
}
