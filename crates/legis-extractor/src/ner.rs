//! Named Entity Recognition (NER) module
//!
//! Rule-based recognition over an ordered table of
//! `(pattern, entity type, confidence)` rules. Every rule runs
//! independently; the raw matches are merged by [`RuleBasedNer::deduplicate`].

use std::collections::HashMap;

use regex::Regex;

use crate::EntityExtractor;
use legis_core::{Entity, EntityType, Position};

/// Chars of surrounding text captured on each side of a match
pub const CONTEXT_WINDOW: usize = 50;

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?";

const STATE: &str = r"(?:[A-Z]{2}|Alabama|Alaska|Arizona|Arkansas|California|Colorado|Connecticut|Delaware|Florida|Georgia|Hawaii|Idaho|Illinois|Indiana|Iowa|Kansas|Kentucky|Louisiana|Maine|Maryland|Massachusetts|Michigan|Minnesota|Mississippi|Missouri|Montana|Nebraska|Nevada|New Hampshire|New Jersey|New Mexico|New York|North Carolina|North Dakota|Ohio|Oklahoma|Oregon|Pennsylvania|Rhode Island|South Carolina|South Dakota|Tennessee|Texas|Utah|Vermont|Virginia|Washington|West Virginia|Wisconsin|Wyoming)";

// ============================================================================
// Rule-based NER
// ============================================================================

/// A compiled pattern rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: Regex,
    pub entity_type: EntityType,
    pub confidence: f32,
}

/// Rule-based NER using regex patterns
#[derive(Debug, Clone)]
pub struct RuleBasedNer {
    rules: Vec<PatternRule>,
}

impl RuleBasedNer {
    /// Create a new rule-based NER with the legal-domain rule table
    pub fn new() -> Self {
        let mut ner = Self { rules: Vec::new() };
        ner.init_person_patterns();
        ner.init_organization_patterns();
        ner.init_location_patterns();
        ner.init_date_patterns();
        ner.init_money_patterns();
        ner.init_statute_patterns();
        ner.init_case_patterns();
        ner.init_contact_patterns();
        ner
    }

    fn init_person_patterns(&mut self) {
        // Titled names: "Mr. John Smith", "Judge Anna K. Lee"
        self.add_pattern(
            r"\b(?:Mrs|Mr|Ms|Dr|Judge|Justice|Hon|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+)?",
            EntityType::Person,
            0.90,
        );
        self.add_pattern(
            r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2}\b",
            EntityType::Person,
            0.70,
        );
        // Caption style: "SMITH, John"
        self.add_pattern(
            r"\b[A-Z]{2,}(?:[-'][A-Z]+)?,\s+[A-Z][a-z]+(?:\s+[A-Z]\.)?",
            EntityType::Person,
            0.85,
        );
    }

    fn init_organization_patterns(&mut self) {
        self.add_pattern(
            r"\b[A-Z][A-Za-z0-9&'-]*(?:\s+[A-Z][A-Za-z0-9&'-]*)*,?\s+(?:Incorporated|Inc|L\.L\.C|LLC|LLP|PLLC|Corporation|Corp|Company|Co|Ltd|P\.C|PC|LP)\b\.?",
            EntityType::Organization,
            0.90,
        );
        self.add_pattern(
            r"\b[A-Z][A-Za-z&'-]*(?:\s+(?:&\s+)?[A-Z][A-Za-z&'-]*)*\s+(?:Law Firm|Law Group|Law Offices?|Associates|Partners|Group|Bank|Insurance|Foundation|University|Hospital)\b",
            EntityType::Organization,
            0.85,
        );
        self.add_pattern(
            r"\b(?:(?:U\.S\.|United States|Federal|State|Michigan)\s+)?(?:Department|Bureau|Office|Commission|Agency|Board|Administration|Division) of(?:\s+the)?(?:\s+[A-Z][a-z]+)+",
            EntityType::Organization,
            0.90,
        );
        self.add_pattern(
            r"\b(?:State|County|City|Township) of [A-Z][a-z]+(?:\s+[A-Z][a-z]+)?",
            EntityType::Organization,
            0.90,
        );
    }

    fn init_location_patterns(&mut self) {
        self.add_pattern(
            &format!(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?,\s+{STATE}\b"),
            EntityType::Location,
            0.90,
        );
        self.add_pattern(
            r"\b\d{1,6}\s+(?:[A-Z][a-z]+\s+){1,3}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Court|Ct|Way|Highway|Hwy)\b\.?",
            EntityType::Location,
            0.85,
        );
        self.add_pattern(
            r"\b(?:United States of America|United States|USA|Canada|Mexico|United Kingdom|England|France|Germany|China|Japan)\b",
            EntityType::Location,
            0.95,
        );
    }

    fn init_date_patterns(&mut self) {
        self.add_pattern(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b", EntityType::Date, 0.95);
        self.add_pattern(r"\b\d{4}-\d{2}-\d{2}\b", EntityType::Date, 0.95);
        self.add_pattern(
            &format!(r"\b{MONTH}\s+\d{{1,2}},?\s+\d{{4}}\b"),
            EntityType::Date,
            0.95,
        );
        self.add_pattern(
            &format!(r"\b\d{{1,2}}\s+{MONTH}\s+\d{{4}}\b"),
            EntityType::Date,
            0.90,
        );
    }

    fn init_money_patterns(&mut self) {
        self.add_pattern(
            r"\$\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?(?:\s+(?:thousand|million|billion))?",
            EntityType::Money,
            0.95,
        );
        self.add_pattern(
            r"(?i)\b(?:(?:one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|fifteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred|thousand|million|billion)[\s-]+)+dollars\b",
            EntityType::Money,
            0.80,
        );
    }

    fn init_statute_patterns(&mut self) {
        // Michigan Compiled Laws and Court Rules
        self.add_pattern(
            r"\b(?:MCL|M\.C\.L\.)\s+\d+\.\d+[a-z]?(?:\([0-9a-z]+\))*",
            EntityType::Statute,
            0.95,
        );
        self.add_pattern(
            r"\bMCR\s+\d+\.\d+(?:\([A-Za-z0-9]+\))*",
            EntityType::Statute,
            0.95,
        );
        self.add_pattern(
            r"\b\d+\s+U\.S\.C\.?\s+§*\s*\d+[a-z]?(?:\([A-Za-z0-9]+\))*",
            EntityType::Statute,
            0.95,
        );
        self.add_pattern(
            r"\b\d+\s+C\.F\.R\.?\s+§*\s*\d+(?:\.\d+)?",
            EntityType::Statute,
            0.90,
        );
    }

    fn init_case_patterns(&mut self) {
        // "People v. Smith, 470 Mich. 120"
        self.add_pattern(
            r"\b[A-Z][A-Za-z.'&-]*(?:\s+[A-Z][A-Za-z.'&-]*)*\s+v\.?\s+[A-Z][A-Za-z.'&-]*(?:\s+[A-Z][A-Za-z.'&-]*)*,\s+\d+\s+[A-Z][A-Za-z0-9.]*(?:\s+[A-Z0-9][A-Za-z0-9.]*)*\s+\d+",
            EntityType::Case,
            0.85,
        );
        // Public-domain citation: "2019 MI 42"
        self.add_pattern(r"\b\d{4}\s+MI\s+\d+\b", EntityType::Case, 0.90);
    }

    fn init_contact_patterns(&mut self) {
        self.add_pattern(
            r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            EntityType::Email,
            0.95,
        );
        self.add_pattern(r"\(\d{3}\)\s*\d{3}-\d{4}\b", EntityType::Phone, 0.95);
        self.add_pattern(r"\b\d{3}[-.]\d{3}[-.]\d{4}\b", EntityType::Phone, 0.90);
    }

    /// Add a regex pattern
    fn add_pattern(&mut self, pattern: &str, entity_type: EntityType, confidence: f32) {
        match Regex::new(pattern) {
            Ok(regex) => self.rules.push(PatternRule {
                regex,
                entity_type,
                confidence,
            }),
            Err(e) => tracing::warn!(%entity_type, error = %e, "Skipping invalid pattern"),
        }
    }

    /// The compiled rule table, in evaluation order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Number of rules that would run for `types`
    pub fn rule_count(&self, types: &[EntityType]) -> usize {
        self.rules
            .iter()
            .filter(|rule| types.contains(&rule.entity_type))
            .count()
    }

    /// Raw matches of every rule whose type is in `types`
    fn extract_by_patterns(&self, text: &str, types: &[EntityType]) -> Vec<Entity> {
        let mut entities = Vec::new();

        for rule in self.rules.iter().filter(|r| types.contains(&r.entity_type)) {
            for mat in rule.regex.find_iter(text) {
                entities.push(Entity {
                    text: mat.as_str().to_string(),
                    entity_type: rule.entity_type,
                    confidence: rule.confidence,
                    position: Position {
                        start: mat.start(),
                        end: mat.end(),
                    },
                    context: context_window(text, mat.start(), mat.end()).to_string(),
                });
            }
        }

        entities
    }

    /// Merge detections sharing a dedup key, keeping the highest confidence.
    ///
    /// Ties keep the first detection seen. Survivors are sorted by start
    /// position; equal starts keep detection order.
    pub fn deduplicate(entities: Vec<Entity>) -> Vec<Entity> {
        let mut result: Vec<Entity> = Vec::new();
        let mut seen: HashMap<(EntityType, String), usize> = HashMap::new();

        for entity in entities {
            match seen.get(&entity.dedup_key()) {
                Some(&index) => {
                    if entity.confidence > result[index].confidence {
                        result[index] = entity;
                    }
                }
                None => {
                    seen.insert(entity.dedup_key(), result.len());
                    result.push(entity);
                }
            }
        }

        result.sort_by_key(|e| e.position.start);
        result
    }
}

impl Default for RuleBasedNer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor for RuleBasedNer {
    fn extract(&self, text: &str, types: &[EntityType]) -> Vec<Entity> {
        Self::deduplicate(self.extract_by_patterns(text, types))
    }
}

/// Text within [`CONTEXT_WINDOW`] chars of `[start, end)`, clamped to `text`
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_WINDOW - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_WINDOW)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}

// ============================================================================
// Tests
// ============================================================================
