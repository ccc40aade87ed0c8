//! RIS format parsing implementation.
//!
//! This module handles the low-level, line-oriented parsing of RIS text.

use crate::ris::structure::RawRisData;
use crate::ris::tags::RisTag;
use tracing::{trace, warn};

const START_OF_RECORD: &str = "TY  -";
const END_OF_RECORD: &str = "ER  -";

/// Character offsets of the tag end and of the value start.
const TAG_CHARS: usize = 2;
const VALUE_OFFSET: usize = 6;

/// Parse RIS text into the raw records it contains.
///
/// Only records closed by an `ER` line are returned. A record still open at
/// the end of the input is dropped.
pub(crate) fn ris_parse(text: &str) -> Vec<RawRisData> {
    let mut records = Vec::new();
    let mut current: Option<RawRisData> = None;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim_end();

        if line.starts_with(START_OF_RECORD) {
            if current.is_some() {
                warn!(line_number, "RIS record reopened before its ER line, dropping it");
            }
            current = Some(RawRisData::new());
            continue;
        }

        if line.starts_with(END_OF_RECORD) {
            match current.take() {
                Some(record) => records.push(record),
                None => trace!(line_number, "ER line without an open record"),
            }
            continue;
        }

        let Some(record) = current.as_mut() else {
            continue;
        };

        let (tag, content) = split_ris_line(line);
        match tag {
            tag if tag.is_author_tag() => record.add_author(content.to_string()),
            RisTag::Title
            | RisTag::TitleAlternative
            | RisTag::PublicationYear
            | RisTag::DatePrimary
            | RisTag::Url
            | RisTag::DateAccess => record.add_data(tag, content.to_string()),
            other => trace!(line_number, tag = other.as_tag(), "ignoring RIS tag"),
        }
    }

    if current.is_some() {
        warn!("RIS input ended inside an open record, dropping it");
    }

    records
}

/// Split a RIS line into its tag (first two characters) and its value
/// (everything from the fixed value offset on). Both are trimmed.
fn split_ris_line(line: &str) -> (RisTag, &str) {
    let tag_end = char_offset(line, TAG_CHARS);
    let value_start = char_offset(line, VALUE_OFFSET);
    (
        RisTag::from_tag(line[..tag_end].trim()),
        line[value_start..].trim(),
    )
}

/// Byte index of the `n`th character, or the end of the string.
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}
