//! Relation Extraction (RE) module
//!
//! Proposes a relationship for every pair of entities that start close
//! together. The label comes from the pair's types, in order.

use legis_core::{Entity, EntityType, Relationship, RelationshipType};

use crate::RelationExtractor;

/// Pairs whose starts are this many bytes apart or more are unrelated
pub const MAX_DISTANCE: usize = 100;

/// Confidence floor for proximate pairs
pub const MIN_CONFIDENCE: f32 = 0.3;

// ============================================================================
// Proximity-based RE
// ============================================================================

/// Proximity-based relation extractor
#[derive(Debug, Clone)]
pub struct ProximityRe {
    max_distance: usize,
}

impl ProximityRe {
    pub fn new() -> Self {
        Self {
            max_distance: MAX_DISTANCE,
        }
    }

    /// Label for an ordered `(first, second)` pair of entity types
    pub fn relationship_type(first: EntityType, second: EntityType) -> RelationshipType {
        use EntityType::*;

        match (first, second) {
            (Person, Organization) => RelationshipType::AffiliatedWith,
            (Organization, Person) => RelationshipType::Employs,
            (Person, Location) => RelationshipType::LocatedIn,
            (Case, Statute) => RelationshipType::Cites,
            (Person | Case | Organization, Date) => RelationshipType::OccurredOn,
            (Money, Person | Organization) => RelationshipType::AmountInvolving,
            _ => RelationshipType::RelatedTo,
        }
    }

    /// `max(0.3, round(1 - distance / 200, 2))`
    pub fn confidence(distance: usize) -> f32 {
        let decayed = 1.0 - distance as f64 / 200.0;
        let rounded = (decayed * 100.0).round() / 100.0;
        (rounded as f32).max(MIN_CONFIDENCE)
    }
}

impl Default for ProximityRe {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationExtractor for ProximityRe {
    fn extract(&self, entities: &[Entity]) -> Vec<Relationship> {
        let mut relations = Vec::new();

        for (i, first) in entities.iter().enumerate() {
            for second in &entities[i + 1..] {
                let distance = first.position.start.abs_diff(second.position.start);
                if distance >= self.max_distance {
                    continue;
                }

                relations.push(Relationship {
                    entity1: first.text.clone(),
                    entity2: second.text.clone(),
                    relationship_type: Self::relationship_type(
                        first.entity_type,
                        second.entity_type,
                    ),
                    confidence: Self::confidence(distance),
                });
            }
        }

        relations
    }
}

// ============================================================================
// Tests
// ============================================================================
