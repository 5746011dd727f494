//! legis Core - Domain models, errors and configuration
//!
//! This crate defines the shared types used by the legis engine:
//! - Chunk models produced by the segmenter
//! - Entity and relationship models produced by the extractor
//! - Common error types
//! - Configuration management
//!
//! Nothing in here performs text processing; the algorithms live in
//! `legis-segmenter` and `legis-extractor`.

pub mod chunk;
pub mod config;
pub mod entity;

pub use chunk::{
    estimate_tokens, Chunk, ChunkMetadata, ChunkStrategy, ChunkType, LegalSectionKind,
};
pub use config::{ConfigError, EngineConfig, ExtractorConfig, LoggingConfig, SegmenterConfig};
pub use entity::{Entity, EntityType, Position, Relationship, RelationshipType};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced at the engine's call boundary.
///
/// Segmentation and extraction themselves are total over any `&str`; the
/// only failures are configuration problems detected before they run.
#[derive(Error, Debug)]
pub enum LegisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LegisError>;

// ============================================================================
// Tests
// ============================================================================
