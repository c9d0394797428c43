//! Configuration
//!
//! TOML-backed settings for containment, element ordering and the page
//! batch runtime. Every key is optional; missing keys keep their defaults.
//!
//! ```toml
//! [containment]
//! threshold = 0.5
//!
//! [elements]
//! kinds = ["text"]
//! max_exhaustive = 8
//! max_exact = 15
//! overflow = "fallback"
//!
//! [runtime]
//! threads = 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::containment::ContainmentOptions;
use crate::element_order::ElementOrderOptions;
use crate::geometry::BoxKind;

/// Application directory under the user config directory
pub const CONFIG_DIR_NAME: &str = "manga-reading-order";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which boxes are ordered inside panels, and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementsConfig {
    /// Box kinds treated as panel elements
    pub kinds: Vec<BoxKind>,
    #[serde(flatten)]
    pub order: ElementOrderOptions,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            kinds: vec![BoxKind::Text],
            order: ElementOrderOptions::default(),
        }
    }
}

/// Batch runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker threads for page batches (default: all cores)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl RuntimeConfig {
    /// Effective worker thread count
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}

/// Complete reading order configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingOrderConfig {
    pub containment: ContainmentOptions,
    pub elements: ElementsConfig,
    pub runtime: RuntimeConfig,
}

impl ReadingOrderConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.containment.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "containment.threshold must be within 0.0-1.0, got {threshold}"
            )));
        }
        if self.elements.order.max_exact > crate::element_order::MAX_EXACT_CLAMP {
            return Err(ConfigError::Invalid(format!(
                "elements.max_exact must be at most {}, got {}",
                crate::element_order::MAX_EXACT_CLAMP,
                self.elements.order.max_exact
            )));
        }
        if self.elements.order.max_exhaustive > crate::element_order::MAX_EXHAUSTIVE_CLAMP {
            return Err(ConfigError::Invalid(format!(
                "elements.max_exhaustive must be at most {}, got {}",
                crate::element_order::MAX_EXHAUSTIVE_CLAMP,
                self.elements.order.max_exhaustive
            )));
        }
        if self.elements.kinds.contains(&BoxKind::Panel) {
            return Err(ConfigError::Invalid(
                "elements.kinds must not include panels".to_string(),
            ));
        }
        if self.runtime.threads == Some(0) {
            return Err(ConfigError::Invalid(
                "runtime.threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
