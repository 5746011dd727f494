//! Boundary scanning helpers
//!
//! All offsets are byte offsets into the scanned `&str`, and every value
//! returned here lies on a `char` boundary. Lengths and distances passed in
//! are counted in `char`s.

/// Byte offset `count` chars after `from`, clamped to `text.len()`.
pub(crate) fn advance_chars(text: &str, from: usize, count: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(count)
        .map_or(text.len(), |(i, _)| from + i)
}

/// Byte offset `count` chars before `from`, clamped to 0.
pub(crate) fn retreat_chars(text: &str, from: usize, count: usize) -> usize {
    if count == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(count - 1)
        .map_or(0, |(i, _)| i)
}

/// Offset just past the first `.`, `!` or `?` that is followed by whitespace.
pub(crate) fn first_sentence_end(window: &str) -> Option<usize> {
    let mut chars = window.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    return Some(i + c.len_utf8());
                }
            }
        }
    }

    None
}

/// Paragraph breaks as `(start, end)` byte ranges.
///
/// A break is a newline followed by a whitespace run that contains at
/// least one more newline (blank or whitespace-only lines).
pub(crate) fn paragraph_breaks(text: &str) -> Vec<(usize, usize)> {
    let mut breaks = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('\n') {
        let at = pos + offset;
        let rest = &text[at + 1..];
        let run = rest.len() - rest.trim_start().len();

        if rest[..run].contains('\n') {
            breaks.push((at, at + 1 + run));
            pos = at + 1 + run;
        } else {
            pos = at + 1;
        }
    }

    breaks
}

/// Offset of the start of the first paragraph break, if any.
pub(crate) fn first_paragraph_break(window: &str) -> Option<usize> {
    paragraph_breaks(window).first().map(|&(start, _)| start)
}

/// Byte spans of the non-empty paragraphs of `text`, each trimmed.
pub(crate) fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut piece_start = 0;

    for (break_start, break_end) in paragraph_breaks(text) {
        if let Some(span) = trimmed_span(text, piece_start, break_start) {
            spans.push(span);
        }
        piece_start = break_end;
    }
    if let Some(span) = trimmed_span(text, piece_start, text.len()) {
        spans.push(span);
    }

    spans
}

/// The `[start, end)` range narrowed to its non-whitespace content.
pub(crate) fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let piece = &text[start..end];
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lead = piece.len() - piece.trim_start().len();
    Some((start + lead, start + lead + trimmed.len()))
}
