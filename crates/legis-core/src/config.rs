//! legis Configuration Management
//!
//! Handles configuration from TOML files and environment variables with
//! defaults matching the engine's documented option defaults. The engine
//! functions never read configuration themselves; callers load an
//! [`EngineConfig`] and turn it into per-call options.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chunk::ChunkStrategy;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Segmenter defaults
    pub segmenter: SegmenterConfig,

    /// Extractor defaults
    pub extractor: ExtractorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Parse from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Apply environment variables on top of this configuration (env wins)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(strategy) = std::env::var("LEGIS_CHUNK_STRATEGY") {
            self.segmenter.strategy = strategy.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LEGIS_CHUNK_STRATEGY".to_string(),
                value: strategy.clone(),
            })?;
        }
        if let Ok(size) = std::env::var("LEGIS_CHUNK_SIZE") {
            self.segmenter.chunk_size = parse_env("LEGIS_CHUNK_SIZE", size)?;
        }
        if let Ok(overlap) = std::env::var("LEGIS_CHUNK_OVERLAP") {
            self.segmenter.overlap = parse_env("LEGIS_CHUNK_OVERLAP", overlap)?;
        }
        if let Ok(flag) = std::env::var("LEGIS_RESPECT_BOUNDARIES") {
            self.segmenter.respect_boundaries = parse_bool("LEGIS_RESPECT_BOUNDARIES", flag)?;
        }

        // Comma-separated, e.g. "person,organization,money"
        if let Ok(types) = std::env::var("LEGIS_ENTITY_TYPES") {
            self.extractor.types = Some(
                types
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }
}

fn parse_env(key: &str, value: String) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

fn parse_bool(key: &str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

/// Segmenter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Chunking strategy
    pub strategy: ChunkStrategy,

    /// Target chunk size in chars
    pub chunk_size: usize,

    /// Trailing context carried into the next chunk
    pub overlap: usize,

    /// Snap fixed-strategy cuts to sentence/paragraph edges
    pub respect_boundaries: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            strategy: ChunkStrategy::Semantic,
            chunk_size: 1000,
            overlap: 200,
            respect_boundaries: true,
        }
    }
}

/// Extractor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Entity type names to scan (None = all). Unknown names are ignored.
    pub types: Option<Vec<String>>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
