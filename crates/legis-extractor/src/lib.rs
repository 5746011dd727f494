//! legis Extractor - Entity and relationship extraction
//!
//! Implements rule-based Named Entity Recognition (NER) over nine
//! legal-domain categories and proximity-based Relation Extraction (RE).
//! Extraction is total: any `&str`, including the empty string, yields a
//! well-formed [`ExtractionResult`].

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use legis_core::{Entity, EntityType, Position, Relationship, RelationshipType};
use legis_core::ExtractorConfig;

pub mod ner;
pub mod relation;

pub use ner::RuleBasedNer;
pub use relation::ProximityRe;

/// Trait for entity extractors
pub trait EntityExtractor: Send + Sync {
    /// Deduplicated entities of the given types, sorted by start position
    fn extract(&self, text: &str, types: &[EntityType]) -> Vec<Entity>;
}

/// Trait for relation extractors
pub trait RelationExtractor: Send + Sync {
    fn extract(&self, entities: &[Entity]) -> Vec<Relationship>;
}

// ============================================================================
// Options and results
// ============================================================================

/// Per-call extraction options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Categories to scan; `None` scans every category
    pub types: Option<Vec<EntityType>>,

    /// Accepted but currently unused
    pub context: Option<String>,
}

impl ExtractOptions {
    /// Build options from configured type names, dropping unknown names
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            types: config.types.as_deref().map(EntityType::parse_list),
            context: None,
        }
    }

    /// Restrict scanning to `types`
    pub fn with_types(mut self, types: Vec<EntityType>) -> Self {
        self.types = Some(types);
        self
    }

    /// Restrict scanning to the named types, ignoring unknown names
    pub fn with_type_names<S: AsRef<str>>(self, names: &[S]) -> Self {
        self.with_types(EntityType::parse_list(names))
    }

    /// Categories this call will scan
    pub fn requested_types(&self) -> Vec<EntityType> {
        match &self.types {
            Some(types) => types.clone(),
            None => EntityType::SCANNABLE.to_vec(),
        }
    }
}

/// Aggregate counts over the surviving entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub total: usize,
    pub by_type: BTreeMap<EntityType, usize>,
    /// Distinct case-insensitive entity texts, across types
    pub unique_texts: usize,
}

impl ExtractionSummary {
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut by_type = BTreeMap::new();
        for entity in entities {
            *by_type.entry(entity.entity_type).or_insert(0) += 1;
        }

        let unique_texts = entities
            .iter()
            .map(|e| e.text.to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: entities.len(),
            by_type,
            unique_texts,
        }
    }
}

/// Processing details for one extraction call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub processing_time_ms: f64,
    pub text_length: usize,
    pub types_scanned: Vec<EntityType>,
    pub rules_applied: usize,
}

/// Result of one extraction call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub entities: Vec<Entity>,
    pub summary: ExtractionSummary,
    pub relationships: Vec<Relationship>,
    pub metadata: ExtractionMetadata,
}

// ============================================================================
// Extractor
// ============================================================================

/// Rule-based NER followed by proximity RE.
///
/// Compiling the rule table is the expensive part; build one `Extractor`
/// and reuse it, or call the free [`extract`] function.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    ner: RuleBasedNer,
    re: ProximityRe,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both stages over `text`
    pub fn extract(&self, text: &str, options: &ExtractOptions) -> ExtractionResult {
        let started = Instant::now();
        let types = options.requested_types();

        let entities = EntityExtractor::extract(&self.ner, text, &types);
        let relationships = RelationExtractor::extract(&self.re, &entities);
        let summary = ExtractionSummary::from_entities(&entities);

        let metadata = ExtractionMetadata {
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            text_length: text.len(),
            rules_applied: self.ner.rule_count(&types),
            types_scanned: types,
        };

        tracing::debug!(
            text_len = text.len(),
            entities = entities.len(),
            relationships = relationships.len(),
            elapsed_ms = metadata.processing_time_ms,
            "Extracted entities"
        );

        ExtractionResult {
            entities,
            summary,
            relationships,
            metadata,
        }
    }
}

static DEFAULT_EXTRACTOR: Lazy<Extractor> = Lazy::new(Extractor::new);

/// Extract with a shared default [`Extractor`]
pub fn extract(text: &str, options: &ExtractOptions) -> ExtractionResult {
    DEFAULT_EXTRACTOR.extract(text, options)
}

// ============================================================================
// Tests
// ============================================================================
