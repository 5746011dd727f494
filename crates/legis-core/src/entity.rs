//! Entity and relationship models

use serde::{Deserialize, Serialize};

use crate::LegisError;

// ============================================================================
// Entity Types
// ============================================================================

/// Entity categories recognized by the extractor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Organization,
    Location,
    Date,
    Money,
    Statute,
    Case,
    Email,
    Phone,
    Other,
}

impl EntityType {
    /// Categories that have pattern rules, in scan order
    pub const SCANNABLE: [EntityType; 9] = [
        Self::Person,
        Self::Organization,
        Self::Location,
        Self::Date,
        Self::Money,
        Self::Statute,
        Self::Case,
        Self::Email,
        Self::Phone,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Location => "location",
            Self::Date => "date",
            Self::Money => "money",
            Self::Statute => "statute",
            Self::Case => "case",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Other => "other",
        }
    }

    /// Parse a list of type names, dropping names that are not recognized
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Vec<EntityType> {
        let mut types = Vec::new();
        for name in names {
            if let Ok(entity_type) = name.as_ref().parse::<EntityType>() {
                if !types.contains(&entity_type) {
                    types.push(entity_type);
                }
            }
        }
        types
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = LegisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "person" => Ok(Self::Person),
            "organization" => Ok(Self::Organization),
            "location" => Ok(Self::Location),
            "date" => Ok(Self::Date),
            "money" => Ok(Self::Money),
            "statute" => Ok(Self::Statute),
            "case" => Ok(Self::Case),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "other" => Ok(Self::Other),
            _ => Err(LegisError::InvalidConfiguration(format!(
                "unknown entity type: {s}"
            ))),
        }
    }
}

// ============================================================================
// Entity
// ============================================================================

/// Byte span of an entity in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

/// A detected mention of a real-world referent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Exact matched substring
    pub text: String,

    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Fixed per matching rule (0.0 - 1.0)
    pub confidence: f32,

    pub position: Position,

    /// Up to 50 chars either side of the match
    pub context: String,
}

impl Entity {
    /// Key used to merge duplicate detections: `(type, lowercase(text))`
    pub fn dedup_key(&self) -> (EntityType, String) {
        (self.entity_type, self.text.to_lowercase())
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// Relationship labels inferred between co-occurring entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    AffiliatedWith,  // Person -> Organization
    Employs,         // Organization -> Person
    LocatedIn,       // Person -> Location
    Cites,           // Case -> Statute
    OccurredOn,      // Person/Case/Organization -> Date
    AmountInvolving, // Money -> Person/Organization
    RelatedTo,       // any other proximate pair
}

impl RelationshipType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AffiliatedWith => "affiliated_with",
            Self::Employs => "employs",
            Self::LocatedIn => "located_in",
            Self::Cites => "cites",
            Self::OccurredOn => "occurred_on",
            Self::AmountInvolving => "amount_involving",
            Self::RelatedTo => "related_to",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inferred association between two entities.
///
/// Entities are referenced by their literal text, so two distinct
/// entities with identical text cannot be told apart here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub entity1: String,
    pub entity2: String,

    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,

    /// Decays with the distance between the two entities
    pub confidence: f32,
}

// ============================================================================
// Tests
// ============================================================================
