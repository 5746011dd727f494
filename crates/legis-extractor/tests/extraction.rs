//! Integration and property tests for the extractor

use std::collections::BTreeSet;

use legis_extractor::{
    extract, EntityType, ExtractOptions, Extractor, RelationshipType, RuleBasedNer,
};
use proptest::prelude::*;

const OPINION: &str = "\
Judge Maria Lopez presided. Defendant Acme Holdings LLC of Detroit, Michigan
was sued on March 3, 2021 for $250,000 under MCL 600.2912 and 42 U.S.C. § 1983.
See People v. Smith, 470 Mich. 120. Contact counsel at jlee@lawfirm.com or
(313) 555-0100.";

fn dedup_keys(text: &str) -> BTreeSet<(EntityType, String)> {
    extract(text, &ExtractOptions::default())
        .entities
        .iter()
        .map(|e| e.dedup_key())
        .collect()
}

#[test]
fn opinion_covers_every_category() {
    let result = extract(OPINION, &ExtractOptions::default());
    let found: BTreeSet<EntityType> = result.entities.iter().map(|e| e.entity_type).collect();

    for expected in [
        EntityType::Person,
        EntityType::Organization,
        EntityType::Location,
        EntityType::Date,
        EntityType::Money,
        EntityType::Statute,
        EntityType::Case,
        EntityType::Email,
        EntityType::Phone,
    ] {
        assert!(found.contains(&expected), "missing {expected}");
    }
    assert_eq!(result.summary.total, result.entities.len());
    assert_eq!(result.metadata.text_length, OPINION.len());
}

#[test]
fn entities_are_sorted_and_unique_by_key() {
    let result = extract(OPINION, &ExtractOptions::default());

    for pair in result.entities.windows(2) {
        assert!(pair[0].position.start <= pair[1].position.start);
    }
    let keys: BTreeSet<_> = result.entities.iter().map(|e| e.dedup_key()).collect();
    assert_eq!(keys.len(), result.entities.len());
}

#[test]
fn spans_and_context_point_into_the_text() {
    let result = extract(OPINION, &ExtractOptions::default());

    for entity in &result.entities {
        assert_eq!(&OPINION[entity.position.start..entity.position.end], entity.text);
        assert!(entity.context.contains(&entity.text));
        assert!(entity.context.chars().count() <= entity.text.chars().count() + 100);
    }
}

#[test]
fn overlapping_rules_keep_the_highest_confidence() {
    // both the titled-name and the generic-name rules match this text
    let text = "Judge Maria Lopez presided. SMITH, John testified.";
    let result = extract(text, &ExtractOptions::default().with_types(vec![EntityType::Person]));

    let judges: Vec<_> = result
        .entities
        .iter()
        .filter(|e| e.text == "Judge Maria Lopez")
        .collect();
    assert_eq!(judges.len(), 1);
    assert_eq!(judges[0].confidence, 0.90);

    let caption = result
        .entities
        .iter()
        .find(|e| e.text == "SMITH, John")
        .expect("caption name");
    assert_eq!(caption.confidence, 0.85);
}

#[test]
fn case_cites_nearby_statute() {
    let text = "Doe v. Roe, 12 Mich. 34 applied MCL 500.100.";
    let result = extract(text, &ExtractOptions::default());

    assert!(result.relationships.iter().any(|r| {
        r.entity1 == "Doe v. Roe, 12 Mich. 34"
            && r.entity2 == "MCL 500.100"
            && r.relationship_type == RelationshipType::Cites
    }));
}

#[test]
fn distant_entities_are_not_related() {
    let text = format!("MCL 500.100{} MCR 2.113", " filler".repeat(20));
    let result = extract(&text, &ExtractOptions::default());

    assert_eq!(result.entities.len(), 2);
    assert!(result.entities[1].position.start - result.entities[0].position.start >= 100);
    assert!(result.relationships.is_empty());

    let near = "MCL 500.100 and MCR 2.113";
    let result = extract(near, &ExtractOptions::default());
    assert_eq!(result.relationships.len(), 1);
}

#[test]
fn shared_and_owned_extractors_agree() {
    let owned = Extractor::new().extract(OPINION, &ExtractOptions::default());
    let shared = extract(OPINION, &ExtractOptions::default());

    assert_eq!(owned.entities, shared.entities);
    assert_eq!(owned.relationships, shared.relationships);
}

#[test]
fn rule_table_is_fully_compiled() {
    let ner = RuleBasedNer::new();
    assert_eq!(ner.rule_count(&EntityType::SCANNABLE), ner.rules().len());
}

proptest! {
    #[test]
    fn extraction_is_idempotent_on_dedup_keys(text in "(?s).{0,400}") {
        prop_assert_eq!(dedup_keys(&text), dedup_keys(&text));
    }

    #[test]
    fn extraction_never_panics_on_legal_looking_text(
        text in "[A-Za-z0-9 ,.$§()@/\n-]{0,300}",
    ) {
        let result = extract(&text, &ExtractOptions::default());

        for entity in &result.entities {
            prop_assert_eq!(&text[entity.position.start..entity.position.end], entity.text.as_str());
        }
        for relation in &result.relationships {
            prop_assert!(relation.confidence >= 0.3 && relation.confidence <= 1.0);
        }
    }
}
