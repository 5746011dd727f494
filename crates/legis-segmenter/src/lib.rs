//! legis Segmenter - Boundary-respecting document chunking
//!
//! Splits a document's plain-text body into an ordered sequence of
//! retrieval-sized [`Chunk`]s under one of four strategies:
//! - `fixed`: sliding window, optionally snapped to sentence/paragraph ends
//! - `semantic`: greedy paragraph accumulation with trailing overlap
//! - `hierarchical`: header-delimited sections, each chunked semantically
//! - `legal-aware`: legal-keyword sections, each chunked semantically
//!
//! [`segment`] is a pure function of `(text, options)`: it never fails,
//! never panics on any `&str`, and always terminates.

use serde::{Deserialize, Serialize};

pub use legis_core::{
    estimate_tokens, Chunk, ChunkMetadata, ChunkStrategy, ChunkType, LegalSectionKind,
};
use legis_core::{LegisError, Result, SegmenterConfig};

mod boundary;
mod fixed;
mod semantic;
pub mod sections;

pub use sections::{
    detect_header_sections, detect_legal_sections, header_level, legal_section_kind, Section,
};

// ============================================================================
// Options
// ============================================================================

/// Per-call segmentation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Chunking strategy
    pub strategy: ChunkStrategy,

    /// Target chunk size in chars
    pub chunk_size: usize,

    /// Trailing chars carried into the next chunk
    pub overlap: usize,

    /// Snap fixed-strategy cuts to sentence/paragraph edges
    pub respect_boundaries: bool,

    /// Template copied onto every chunk's metadata
    pub metadata: ChunkMetadata,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            strategy: ChunkStrategy::Semantic,
            chunk_size: 1000,
            overlap: 200,
            respect_boundaries: true,
            metadata: ChunkMetadata::default(),
        }
    }
}

impl SegmentOptions {
    /// Build options from the configured segmenter defaults
    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self {
            strategy: config.strategy,
            chunk_size: config.chunk_size,
            overlap: config.overlap,
            respect_boundaries: config.respect_boundaries,
            metadata: ChunkMetadata::default(),
        }
    }

    /// Set strategy
    pub fn with_strategy(mut self, strategy: ChunkStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set overlap
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Enable or disable boundary snapping
    pub fn with_respect_boundaries(mut self, respect_boundaries: bool) -> Self {
        self.respect_boundaries = respect_boundaries;
        self
    }

    /// Set the metadata template
    pub fn with_metadata(mut self, metadata: ChunkMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Reject options a caller should not pass.
    ///
    /// [`segment`] does not call this; a zero `chunk_size` there degrades
    /// to one-character windows rather than failing.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(LegisError::InvalidConfiguration(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Segmentation
// ============================================================================

/// Split `text` into chunks according to `options`.
///
/// Empty or whitespace-only text yields no chunks. Fixed and semantic
/// chunks carry offsets into `text`; hierarchical and legal-aware chunks
/// carry offsets into their section, with the section's own offset in
/// `metadata.section_offset`.
pub fn segment(text: &str, options: &SegmentOptions) -> Vec<Chunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chunks = match options.strategy {
        ChunkStrategy::Fixed => fixed::chunk_fixed(text, options),
        ChunkStrategy::Semantic => semantic::chunk_semantic(text, options),
        ChunkStrategy::Hierarchical => {
            let sections = detect_header_sections(text);
            sections::chunk_sections(text, &sections, options)
        }
        ChunkStrategy::LegalAware => {
            let sections = detect_legal_sections(text);
            sections::chunk_sections(text, &sections, options)
        }
    };

    tracing::debug!(
        strategy = %options.strategy,
        text_len = text.len(),
        chunk_size = options.chunk_size,
        overlap = options.overlap,
        chunks = chunks.len(),
        "Segmented text"
    );

    chunks
}

// ============================================================================
// Tests
// ============================================================================
