//! Paragraph-accumulating chunking

use legis_core::{Chunk, ChunkMetadata, ChunkType};

use crate::boundary::{paragraph_spans, retreat_chars, trimmed_span};
use crate::SegmentOptions;

/// Chars counted for the break between two buffered paragraphs
const PARAGRAPH_SEPARATOR: usize = 2;

/// Paragraphs accumulated for the next chunk
struct Buffer {
    start: usize,
    end: usize,
    /// Paragraph chars plus [`PARAGRAPH_SEPARATOR`] per join
    chars: usize,
}

/// Greedily pack paragraphs into chunks of at most `chunk_size` chars.
///
/// A paragraph that would push the buffer over `chunk_size` flushes the
/// buffer first; the next buffer is seeded with the last `overlap` chars of
/// the flushed chunk. Buffer size counts paragraph content plus a fixed
/// two-char separator per join, however many blank lines sit between the
/// paragraphs. A single paragraph larger than `chunk_size` becomes one
/// oversized chunk. Chunk offsets bound the trimmed chunk text exactly.
pub(crate) fn chunk_semantic(text: &str, options: &SegmentOptions) -> Vec<Chunk> {
    let metadata = ChunkMetadata {
        chunk_type: Some(ChunkType::Paragraph),
        ..options.metadata.clone()
    };

    let mut chunks = Vec::new();
    let mut buffer: Option<Buffer> = None;

    for (para_start, para_end) in paragraph_spans(text) {
        let para_chars = text[para_start..para_end].chars().count();

        buffer = Some(match buffer {
            Some(buf) if buf.chars + PARAGRAPH_SEPARATOR + para_chars > options.chunk_size => {
                push_chunk(text, buf.start, buf.end, &metadata, &mut chunks);

                let seed = retreat_chars(text, buf.end, options.overlap).max(buf.start);
                let chars = match text[seed..buf.end].chars().count() {
                    0 => para_chars,
                    seeded => seeded + PARAGRAPH_SEPARATOR + para_chars,
                };
                Buffer {
                    start: seed,
                    end: para_end,
                    chars,
                }
            }
            Some(buf) => Buffer {
                start: buf.start,
                end: para_end,
                chars: buf.chars + PARAGRAPH_SEPARATOR + para_chars,
            },
            None => Buffer {
                start: para_start,
                end: para_end,
                chars: para_chars,
            },
        });
    }

    if let Some(buf) = buffer {
        push_chunk(text, buf.start, buf.end, &metadata, &mut chunks);
    }

    chunks
}

fn push_chunk(
    text: &str,
    start: usize,
    end: usize,
    metadata: &ChunkMetadata,
    chunks: &mut Vec<Chunk>,
) {
    if let Some((start, end)) = trimmed_span(text, start, end) {
        chunks.push(Chunk::new(
            chunks.len(),
            &text[start..end],
            start,
            end,
            metadata.clone(),
        ));
    }
}
