//! Property tests for the segmenter

use legis_segmenter::{segment, ChunkStrategy, SegmentOptions};
use proptest::prelude::*;

const ALL_STRATEGIES: [ChunkStrategy; 4] = [
    ChunkStrategy::Fixed,
    ChunkStrategy::Semantic,
    ChunkStrategy::Hierarchical,
    ChunkStrategy::LegalAware,
];

fn strategy_strategy() -> impl Strategy<Value = ChunkStrategy> {
    prop::sample::select(ALL_STRATEGIES.to_vec())
}

proptest! {
    #[test]
    fn segment_is_deterministic(
        text in "(?s).{0,600}",
        strategy in strategy_strategy(),
        chunk_size in 0usize..200,
        overlap in 0usize..300,
        respect in any::<bool>(),
    ) {
        let options = SegmentOptions::default()
            .with_strategy(strategy)
            .with_chunk_size(chunk_size)
            .with_overlap(overlap)
            .with_respect_boundaries(respect);

        prop_assert_eq!(segment(&text, &options), segment(&text, &options));
    }

    #[test]
    fn chunks_never_split_chars_and_ids_are_sequential(
        text in "[a-zé§ .!?\n#]{0,400}",
        strategy in strategy_strategy(),
        chunk_size in 1usize..64,
        overlap in 0usize..64,
    ) {
        let options = SegmentOptions::default()
            .with_strategy(strategy)
            .with_chunk_size(chunk_size)
            .with_overlap(overlap);

        for (i, chunk) in segment(&text, &options).iter().enumerate() {
            prop_assert_eq!(chunk.id, i);
            prop_assert!(!chunk.text.trim().is_empty());
            prop_assert!(chunk.start_index <= chunk.end_index);
        }
    }

    #[test]
    fn fixed_windows_cover_the_text(
        text in "[a-z§]{1,500}",
        chunk_size in 1usize..80,
        overlap in 0usize..80,
    ) {
        let options = SegmentOptions::default()
            .with_strategy(ChunkStrategy::Fixed)
            .with_chunk_size(chunk_size)
            .with_overlap(overlap)
            .with_respect_boundaries(false);
        let chunks = segment(&text, &options);

        prop_assert!(!chunks.is_empty());
        prop_assert_eq!(chunks[0].start_index, 0);
        prop_assert_eq!(chunks[chunks.len() - 1].end_index, text.len());
        for pair in chunks.windows(2) {
            prop_assert!(pair[1].start_index > pair[0].start_index);
            prop_assert!(pair[1].start_index <= pair[0].end_index);
        }
        for chunk in &chunks {
            prop_assert_eq!(&text[chunk.start_index..chunk.end_index], chunk.text.as_str());
        }
    }

    #[test]
    fn overlap_at_least_chunk_size_terminates(
        text in "[a-z .\n]{1,300}",
        chunk_size in 1usize..20,
        extra in 0usize..40,
        respect in any::<bool>(),
    ) {
        let options = SegmentOptions::default()
            .with_strategy(ChunkStrategy::Fixed)
            .with_chunk_size(chunk_size)
            .with_overlap(chunk_size + extra)
            .with_respect_boundaries(respect);

        prop_assert!(segment(&text, &options).len() <= text.len());
    }

    #[test]
    fn short_text_is_never_split(
        text in "[a-z ,.\n]{1,200}",
        strategy in strategy_strategy(),
    ) {
        prop_assume!(!text.trim().is_empty());
        let options = SegmentOptions::default()
            .with_strategy(strategy)
            .with_chunk_size(1000);
        let chunks = segment(&text, &options);

        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(chunks[0].text.as_str(), text.trim());
    }
}

#[test]
fn empty_input_yields_nothing_for_every_strategy() {
    for strategy in ALL_STRATEGIES {
        let options = SegmentOptions::default().with_strategy(strategy);
        assert!(segment("", &options).is_empty());
    }
}

#[test]
fn options_round_trip_through_json() {
    let json = r#"{"strategy":"legal_aware","chunk_size":300}"#;
    let options: SegmentOptions = serde_json::from_str(json).unwrap();

    assert_eq!(options.strategy, ChunkStrategy::LegalAware);
    assert_eq!(options.chunk_size, 300);
    assert_eq!(options.overlap, 200);
    assert!(options.respect_boundaries);
}

#[test]
fn brief_is_partitioned_into_legal_sections() {
    let brief = "\
IN THE CIRCUIT COURT FOR THE COUNTY OF WAYNE
Case No. 21-000123-CK
PLAINTIFF: Acme Holdings LLC
I. STATEMENT OF FACTS
Acme leased the premises on March 1, 2019.

The tenant stopped paying rent in 2020.
II. ARGUMENT
Under MCL 554.134 the lease survives.
CONCLUSION
Judgment should enter for Acme.
";
    let options = SegmentOptions::default().with_strategy(ChunkStrategy::LegalAware);
    let chunks = segment(brief, &options);

    let titles: Vec<&str> = chunks
        .iter()
        .filter_map(|c| c.metadata.section_title.as_deref())
        .collect();
    assert_eq!(
        titles,
        vec![
            "IN THE CIRCUIT COURT FOR THE COUNTY OF WAYNE",
            "Case No. 21-000123-CK",
            "PLAINTIFF: Acme Holdings LLC",
            "I. STATEMENT OF FACTS",
            "II. ARGUMENT",
            "CONCLUSION",
        ]
    );
    assert!(chunks[3].text.contains("stopped paying rent"));
}
