//! Fixed-size sliding window chunking

use legis_core::Chunk;

use crate::boundary::{advance_chars, first_paragraph_break, first_sentence_end, retreat_chars};
use crate::SegmentOptions;

/// Slide a window of `chunk_size` chars over `text`.
///
/// With `respect_boundaries`, a window that stops short of the text end is
/// cut after its first sentence end, else at its first paragraph break.
/// Chunk offsets are the cut window `[start, end)`; the chunk text is the
/// window trimmed. Whitespace-only windows are dropped without consuming
/// an id. The next window starts `overlap` chars before `end`, and always
/// at least one char after `start`.
pub(crate) fn chunk_fixed(text: &str, options: &SegmentOptions) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let size = options.chunk_size.max(1);
    let mut start = 0;

    while start < text.len() {
        let mut end = advance_chars(text, start, size);

        if options.respect_boundaries && end < text.len() {
            let window = &text[start..end];
            let cut = first_sentence_end(window)
                .or_else(|| first_paragraph_break(window))
                .filter(|&cut| cut > 0);
            if let Some(cut) = cut {
                end = start + cut;
            }
        }

        let piece = text[start..end].trim();
        if !piece.is_empty() {
            chunks.push(Chunk::new(
                chunks.len(),
                piece,
                start,
                end,
                options.metadata.clone(),
            ));
        }

        if end >= text.len() {
            break;
        }

        start = retreat_chars(text, end, options.overlap).max(advance_chars(text, start, 1));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use legis_core::ChunkStrategy;

    fn fixed(chunk_size: usize, overlap: usize, respect_boundaries: bool) -> SegmentOptions {
        SegmentOptions::default()
            .with_strategy(ChunkStrategy::Fixed)
            .with_chunk_size(chunk_size)
            .with_overlap(overlap)
            .with_respect_boundaries(respect_boundaries)
    }

    #[test]
    fn test_window_steps_back_by_overlap() {
        let text = "x".repeat(3000);
        let chunks = chunk_fixed(&text, &fixed(1000, 200, false));

        let spans: Vec<(usize, usize)> =
            chunks.iter().map(|c| (c.start_index, c.end_index)).collect();
        assert_eq!(
            spans,
            vec![(0, 1000), (800, 1800), (1600, 2600), (2400, 3000)]
        );
    }

    #[test]
    fn test_cut_at_first_sentence_end() {
        let text = "First sentence here. Second one. Third sentence runs long";
        let chunks = chunk_fixed(text, &fixed(40, 0, true));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "First sentence here.");
        assert_eq!(chunks[0].end_index, 20);
        assert_eq!(chunks[1].start_index, 20);
        assert_eq!(chunks[1].text, "Second one. Third sentence runs long");
    }

    #[test]
    fn test_short_first_sentence_still_progresses_past_overlap() {
        let text = "Hi. A much longer second sentence follows here";
        let chunks = chunk_fixed(text, &fixed(20, 10, true));

        assert_eq!(chunks[0].text, "Hi.");
        assert_eq!(chunks[1].start_index, 1);
        for pair in chunks.windows(2) {
            assert!(pair[0].start_index < pair[1].start_index);
        }
    }

    #[test]
    fn test_falls_back_to_paragraph_break() {
        let text = "no punctuation at all\n\nsecond block without any either";
        let chunks = chunk_fixed(text, &fixed(40, 0, true));

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "no punctuation at all");
        assert_eq!(chunks[0].end_index, 21);
        assert_eq!(chunks[1].text, "second block without any either");
    }

    #[test]
    fn test_raw_window_when_no_boundary() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunk_fixed(text, &fixed(10, 0, true));

        assert_eq!(chunks[0].text, "abcdefghij");
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_whitespace_windows_are_dropped_without_gaps_in_ids() {
        let text = format!("alpha{}omega", " ".repeat(20));
        let chunks = chunk_fixed(&text, &fixed(5, 0, false));

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "omega"]);
        assert_eq!(chunks[1].id, 1);
    }

    #[test]
    fn test_overlap_larger_than_chunk_still_progresses() {
        let text = "abcdef";
        let chunks = chunk_fixed(text, &fixed(2, 10, false));

        let starts: Vec<usize> = chunks.iter().map(|c| c.start_index).collect();
        assert_eq!(starts, vec![0, 1, 2, 3, 4]);
        assert_eq!(chunks.last().unwrap().end_index, 6);
    }

    #[test]
    fn test_zero_chunk_size_degrades_to_single_chars() {
        let text = "abc";
        let chunks = chunk_fixed(text, &fixed(0, 0, false));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sizes_count_chars_not_bytes() {
        let text = "é".repeat(3000);
        let chunks = chunk_fixed(&text, &fixed(1000, 200, false));

        let lengths: Vec<usize> = chunks.iter().map(|c| c.text.chars().count()).collect();
        assert_eq!(lengths, vec![1000, 1000, 1000, 600]);
        let spans: Vec<(usize, usize)> =
            chunks.iter().map(|c| (c.start_index, c.end_index)).collect();
        assert_eq!(
            spans,
            vec![(0, 2000), (1600, 3600), (3200, 5200), (4800, 6000)]
        );
    }

    #[test]
    fn test_multibyte_text_never_splits_a_char() {
        let text = "§".repeat(50);
        let chunks = chunk_fixed(&text, &fixed(7, 2, false));

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.chars().all(|c| c == '§'));
            assert!(text.is_char_boundary(chunk.start_index));
            assert!(text.is_char_boundary(chunk.end_index));
        }
    }
}
