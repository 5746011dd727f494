//! Section detection
//!
//! The hierarchical and legal-aware strategies are two-stage pipelines:
//! partition the text into [`Section`]s here, then run the semantic
//! chunker over each section's content. Both partitioners are pure and
//! usable on their own.

use legis_core::{Chunk, ChunkType, LegalSectionKind};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::semantic::chunk_semantic;
use crate::SegmentOptions;

/// A contiguous section of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section heading/title
    pub title: String,

    /// Heading level (0 = untitled / document level)
    pub level: u8,

    /// Legal category, for sections found by [`detect_legal_sections`]
    pub kind: Option<LegalSectionKind>,

    /// Byte offset where the section content starts
    pub start: usize,

    /// Byte offset where the section content ends (exclusive)
    pub end: usize,
}

impl Section {
    /// Section content as a slice of the partitioned text
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

// ============================================================================
// Header sections
// ============================================================================

/// Partition `text` at header lines.
///
/// Headers are markdown `#` lines, numbered lines (`1. TITLE`,
/// `1.2. Title`) and all-caps lines of at least 10 characters. A section's
/// content is the lines after its header up to the next header. Text before
/// the first header, or the whole text when there are no headers, forms a
/// level-0 section titled "Document".
pub fn detect_header_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: "Document".to_string(),
        level: 0,
        kind: None,
        start: 0,
        end: text.len(),
    };
    let mut found_header = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let trimmed = line.trim();
        if let Some(title) = header_title(trimmed) {
            current.end = line_start;
            if found_header || !current.content(text).trim().is_empty() {
                sections.push(current);
            }
            tracing::trace!(title = %title, offset = line_start, "Header section detected");

            current = Section {
                title,
                level: header_level(trimmed),
                kind: None,
                start: offset,
                end: text.len(),
            };
            found_header = true;
        }
    }

    if found_header || !current.content(text).trim().is_empty() {
        sections.push(current);
    }
    sections
}

/// `## Title`
static MARKDOWN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s+(\S.*)$").expect("markdown header pattern"));

/// `1. ` or `1.2. ` prefix
static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.(\d+\.)?\s+").expect("numbered header pattern"));

/// "STATEMENT OF JURISDICTION"
static CAPS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\p{Lu}[\p{Lu}\s&,'\-:()]*$").expect("caps header pattern")
});

/// Infer a header line's level: one per leading `#` (capped at 6), 1 for
/// `N. `, 2 for `N.M. `, otherwise 0.
pub fn header_level(line: &str) -> u8 {
    let line = line.trim();
    if line.starts_with('#') {
        return line.chars().take_while(|&c| c == '#').count().min(6) as u8;
    }
    match NUMBERED_PREFIX.captures(line) {
        Some(caps) if caps.get(1).is_some() => 2,
        Some(_) => 1,
        None => 0,
    }
}

/// Title of a header line, or `None` if the line is not a header
fn header_title(line: &str) -> Option<String> {
    if line.starts_with('#') {
        return MARKDOWN_HEADER
            .captures(line)
            .map(|caps| caps[2].trim().to_string());
    }

    if let Some(prefix) = NUMBERED_PREFIX.find(line) {
        return line[prefix.end()..]
            .starts_with(char::is_uppercase)
            .then(|| line.to_string());
    }

    if line.chars().count() >= 10 && CAPS_HEADER.is_match(line) {
        return Some(line.to_string());
    }

    None
}

// ============================================================================
// Legal sections
// ============================================================================

/// Line-leading keywords for each legal section category, checked in order
const LEGAL_SECTION_PREFIXES: &[(LegalSectionKind, &[&str])] = &[
    (
        LegalSectionKind::CaseInfo,
        &[
            "IN THE MATTER OF",
            "In the Matter of",
            "IN RE",
            "In re",
            "CASE NO",
            "Case No",
            "DOCKET NO",
            "Docket No",
            "CIVIL ACTION NO",
            "FILE NO",
        ],
    ),
    (
        LegalSectionKind::Court,
        &[
            "IN THE SUPREME COURT",
            "IN THE COURT OF APPEALS",
            "IN THE CIRCUIT COURT",
            "IN THE DISTRICT COURT",
            "IN THE PROBATE COURT",
            "UNITED STATES DISTRICT COURT",
            "UNITED STATES COURT OF APPEALS",
            "SUPREME COURT",
            "COURT OF APPEALS",
            "CIRCUIT COURT",
            "DISTRICT COURT",
            "STATE OF",
        ],
    ),
    (
        LegalSectionKind::Parties,
        &[
            "PLAINTIFFS",
            "PLAINTIFF",
            "DEFENDANTS",
            "DEFENDANT",
            "PETITIONERS",
            "PETITIONER",
            "RESPONDENTS",
            "RESPONDENT",
            "APPELLANTS",
            "APPELLANT",
            "APPELLEES",
            "APPELLEE",
        ],
    ),
    (
        LegalSectionKind::Facts,
        &[
            "STATEMENT OF FACTS",
            "FACTUAL BACKGROUND",
            "PROCEDURAL HISTORY",
            "BACKGROUND",
            "FACTS",
        ],
    ),
    (
        LegalSectionKind::Analysis,
        &[
            "LAW AND ANALYSIS",
            "LEGAL ANALYSIS",
            "STANDARD OF REVIEW",
            "ANALYSIS",
            "DISCUSSION",
            "ARGUMENT",
        ],
    ),
    (
        LegalSectionKind::Conclusion,
        &[
            "IT IS HEREBY ORDERED",
            "IT IS ORDERED",
            "CONCLUSION",
            "HOLDING",
            "JUDGMENT",
            "DISPOSITION",
            "RELIEF REQUESTED",
            "WHEREFORE",
            "ORDER",
        ],
    ),
];

/// Partition `text` at lines that open a legal section.
///
/// A matching line starts a new section and belongs to it (its content
/// usually continues on the same line, e.g. `FACTS: On May 1...`). Lines
/// that match nothing stay with the open section. Text before the first
/// match forms a `General` section titled "General".
pub fn detect_legal_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: "General".to_string(),
        level: 0,
        kind: Some(LegalSectionKind::General),
        start: 0,
        end: text.len(),
    };
    let mut opened = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if let Some(kind) = legal_section_kind(line) {
            current.end = line_start;
            if opened || !current.content(text).trim().is_empty() {
                sections.push(current);
            }
            tracing::trace!(kind = %kind, offset = line_start, "Legal section detected");

            current = Section {
                title: line.trim().to_string(),
                level: 0,
                kind: Some(kind),
                start: line_start,
                end: text.len(),
            };
            opened = true;
        }
    }

    if opened || !current.content(text).trim().is_empty() {
        sections.push(current);
    }
    sections
}

/// Category of a line that opens a legal section
pub fn legal_section_kind(line: &str) -> Option<LegalSectionKind> {
    let line = strip_enumerator(line.trim());

    LEGAL_SECTION_PREFIXES
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| starts_with_word(line, p)))
        .map(|(kind, _)| *kind)
}

/// `line` starts with `prefix` followed by a non-alphanumeric char or the end
fn starts_with_word(line: &str, prefix: &str) -> bool {
    line.strip_prefix(prefix)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
}

/// Drop a leading outline marker such as `I.`, `IV.`, `2.` or `A)`
fn strip_enumerator(line: &str) -> &str {
    let marker_len = line
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    if marker_len == 0 || marker_len > 4 {
        return line;
    }

    let marker = &line[..marker_len];
    let is_marker = marker.chars().all(|c| c.is_ascii_digit())
        || marker.chars().all(|c| "IVXLC".contains(c))
        || (marker_len == 1 && marker.chars().all(|c| c.is_ascii_uppercase()));

    match line[marker_len..].strip_prefix(['.', ')']) {
        Some(rest) if is_marker && rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

// ============================================================================
// Section chunking
// ============================================================================

/// Run the semantic chunker over each section and re-tag the results.
///
/// Chunk offsets stay relative to the section content; `section_offset`
/// carries the section's position in `text`. Ids run across all sections.
pub(crate) fn chunk_sections(
    text: &str,
    sections: &[Section],
    options: &SegmentOptions,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for section in sections {
        for mut chunk in chunk_semantic(section.content(text), options) {
            chunk.id = chunks.len();
            chunk.metadata.section_title = Some(section.title.clone());
            chunk.metadata.chunk_type = Some(ChunkType::Section);
            chunk.metadata.section_offset = Some(section.start);
            match section.kind {
                Some(kind) => chunk.metadata.legal_section = Some(kind),
                None => chunk.metadata.level = Some(section.level),
            }
            chunks.push(chunk);
        }
    }

    chunks
}
