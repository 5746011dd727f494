//! Chunk models
//!
//! A [`Chunk`] is a contiguous span of a source text produced by one
//! segmentation call. Offsets are UTF-8 byte offsets into the text that
//! was segmented and always fall on `char` boundaries.

use serde::{Deserialize, Serialize};

use crate::LegisError;

// ============================================================================
// Strategy
// ============================================================================

/// Chunking strategy selected per segmentation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Sliding window of `chunk_size` with optional boundary snapping
    Fixed,
    /// Greedy paragraph accumulation
    #[default]
    Semantic,
    /// Header-delimited sections, each chunked semantically
    Hierarchical,
    /// Legal-keyword sections, each chunked semantically
    #[serde(alias = "legal-aware")]
    LegalAware,
}

impl ChunkStrategy {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Semantic => "semantic",
            Self::Hierarchical => "hierarchical",
            Self::LegalAware => "legal-aware",
        }
    }
}

impl std::fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChunkStrategy {
    type Err = LegisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "semantic" => Ok(Self::Semantic),
            "hierarchical" => Ok(Self::Hierarchical),
            "legal-aware" | "legal_aware" | "legal" => Ok(Self::LegalAware),
            _ => Err(LegisError::InvalidConfiguration(format!(
                "unsupported chunking strategy: {s}"
            ))),
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Structural tag attached to a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Paragraph,
    Sentence,
    Section,
    List,
    Table,
    Citation,
}

/// Section categories recognized by the legal-aware strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalSectionKind {
    /// Case or matter heading ("IN RE", "CASE NO.")
    CaseInfo,
    /// Court or venue line
    Court,
    /// Party designation ("PLAINTIFF", "DEFENDANT")
    Parties,
    /// Facts or background
    Facts,
    /// Analysis or discussion
    Analysis,
    /// Conclusion, holding or order
    Conclusion,
    /// Text before any recognized section
    General,
}

impl LegalSectionKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaseInfo => "case_info",
            Self::Court => "court",
            Self::Parties => "parties",
            Self::Facts => "facts",
            Self::Analysis => "analysis",
            Self::Conclusion => "conclusion",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for LegalSectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional structural metadata stamped onto every chunk.
///
/// Callers pass one of these as a template; the segmenter copies it onto
/// each chunk and fills in the fields owned by the strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Originating document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Originating document type (e.g. "pleading", "opinion")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Title of the section the chunk came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,

    /// Page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Header level (0 = untitled / document level)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_type: Option<ChunkType>,

    /// Matched legal category (legal-aware strategy only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_section: Option<LegalSectionKind>,

    /// Byte offset of the chunk's section in the original text.
    ///
    /// Section-based strategies report chunk offsets relative to the
    /// section; `section_offset + start_index` is the global offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_offset: Option<usize>,
}

impl ChunkMetadata {
    /// Set document id
    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Set document type
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Set page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

// ============================================================================
// Chunk
// ============================================================================

/// A chunk of text from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequence-local id, unique within one segmentation run
    pub id: usize,

    /// Chunk content, trimmed
    pub text: String,

    /// Starting byte offset
    pub start_index: usize,

    /// Ending byte offset (exclusive)
    pub end_index: usize,

    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(
        id: usize,
        text: impl Into<String>,
        start_index: usize,
        end_index: usize,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            start_index,
            end_index,
            metadata,
        }
    }

    /// Rough token count of the chunk text
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.text)
    }
}

/// Estimate the token count of `text` as `ceil(chars / 4)`.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

// ============================================================================
// Tests
// ============================================================================
