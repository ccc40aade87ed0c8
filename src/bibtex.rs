//! BibTeX adapter.
//!
//! Tokenizing BibTeX is left to the `biblatex` crate; this module only maps
//! its parsed entries onto the canonical [`Entry`].
//!
//! # Example
//!
//! ```
//! use bibxml::{BibtexParser, EntryParser};
//!
//! let input = r#"@misc{smith2023,
//!   title = {Example Title},
//!   author = {Smith, John and Doe, Jane},
//!   urldate = {2024-03},
//! }"#;
//!
//! let entries = BibtexParser::new().parse(input).unwrap();
//! assert_eq!(entries[0].tag.as_deref(), Some("smith2023"));
//! assert_eq!(entries[0].access_date.as_deref(), Some("2024-03-01"));
//! ```

use crate::entry::{TAG_MAX_CHARS, truncate_chars};
use crate::utils::complete_date;
use crate::{ConvertError, Entry, EntryParser, Result};
use biblatex::{Bibliography, Chunk, RawBibliography, RawChunk, Spanned};
use compact_str::CompactString;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Fields holding the access date, in lookup order.
const ACCESS_DATE_FIELDS: [&str; 2] = ["urldate", "accessed"];

/// Month abbreviations `biblatex` resolves without an `@string` definition.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parser for BibTeX bibliographies.
#[derive(Debug, Clone, Default)]
pub struct BibtexParser;

impl BibtexParser {
    /// Creates a new BibTeX parser instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn map_entry(bib_entry: &biblatex::Entry) -> Entry {
        let field = |name: &str| {
            bib_entry
                .get(name)
                .map(chunks_to_string)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let title = field("title");
        let tag = match bib_entry.key.trim() {
            "" => title.as_deref().map_or_else(
                || CompactString::from("Untitled"),
                |t| truncate_chars(t, TAG_MAX_CHARS),
            ),
            key => CompactString::from(key),
        };

        Entry {
            tag: Some(tag),
            title,
            author: field("author"),
            year: field("year"),
            month: field("month"),
            day: field("day"),
            url: field("url"),
            access_date: ACCESS_DATE_FIELDS
                .iter()
                .find_map(|name| field(*name))
                .and_then(|date| complete_date(&date)),
        }
    }
}

impl EntryParser for BibtexParser {
    fn parse(&self, input: &str) -> Result<Vec<Entry>> {
        let mut raw =
            RawBibliography::parse(input).map_err(|e| ConvertError::Bibtex(e.to_string()))?;
        keep_undefined_abbreviations(&mut raw);
        let bibliography =
            Bibliography::from_raw(raw).map_err(|e| ConvertError::Bibtex(e.to_string()))?;
        let entries: Vec<Entry> = bibliography.iter().map(Self::map_entry).collect();
        debug!(count = entries.len(), "parsed BibTeX entries");
        Ok(entries)
    }
}

/// Rewrites references to undefined `@string` abbreviations as literal
/// text, so `publisher = IEEE` reads as `IEEE` instead of failing the file.
fn keep_undefined_abbreviations(raw: &mut RawBibliography<'_>) {
    let defined: HashSet<String> = raw
        .abbreviations
        .iter()
        .map(|pair| pair.key.v.to_string())
        .collect();
    let is_known = |name: &str| {
        defined.contains(name) || MONTH_ABBREVIATIONS.contains(&name.to_lowercase().as_str())
    };

    let values = raw
        .entries
        .iter_mut()
        .flat_map(|entry| entry.v.fields.iter_mut())
        .chain(raw.abbreviations.iter_mut())
        .flat_map(|pair| pair.value.v.iter_mut());
    for chunk in values {
        if let RawChunk::Abbreviation(name) = chunk.v {
            if !is_known(name) {
                trace!(abbreviation = name, "keeping undefined abbreviation as text");
                chunk.v = RawChunk::Normal(name);
            }
        }
    }
}

/// Flattens biblatex chunks into plain text.
fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) => s.as_str(),
            Chunk::Verbatim(s) => s.as_str(),
            Chunk::Math(s) => s.as_str(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_entry() {
        let input = r#"@online{iot2022,
  title = {Sensor Networks in Practice},
  author = {Smith, John and Doe, Jane},
  year = {2022},
  url = {https://example.com/sensors},
  urldate = {2023-04-05},
}"#;
        let entries = BibtexParser::new().parse(input).unwrap();
        assert_eq!(
            entries,
            vec![Entry {
                tag: Some(CompactString::from("iot2022")),
                title: Some("Sensor Networks in Practice".to_string()),
                author: Some("Smith, John and Doe, Jane".to_string()),
                year: Some("2022".to_string()),
                month: None,
                day: None,
                url: Some("https://example.com/sensors".to_string()),
                access_date: Some("2023-04-05".to_string()),
            }]
        );
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let entries = BibtexParser::new().parse("@misc{bare, note = {nothing}}").unwrap();
        let entry = &entries[0];
        assert_eq!(entry.tag.as_deref(), Some("bare"));
        assert_eq!(entry.title, None);
        assert_eq!(entry.author, None);
        assert_eq!(entry.year, None);
        assert_eq!(entry.access_date, None);
    }

    #[test]
    fn test_accessed_field_fallback() {
        let input = "@misc{a, title = {T}, accessed = {2021}}";
        let entries = BibtexParser::new().parse(input).unwrap();
        assert_eq!(entries[0].access_date.as_deref(), Some("2021-01-01"));
    }

    #[test]
    fn test_entries_keep_file_order() {
        let input = "@misc{first, title = {One}}\n@book{second, title = {Two}}";
        let tags: Vec<_> = BibtexParser::new()
            .parse(input)
            .unwrap()
            .into_iter()
            .filter_map(|e| e.tag)
            .collect();
        assert_eq!(tags, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(BibtexParser::new().parse("").unwrap().is_empty());
    }

    #[test]
    fn test_undefined_abbreviation_is_kept_as_text() {
        let input = "@misc{k, title = {T}, publisher = IEEE}\n@misc{j, title = {U}}";
        let entries = BibtexParser::new().parse(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("T"));
        assert_eq!(entries[1].title.as_deref(), Some("U"));
    }

    #[test]
    fn test_defined_abbreviation_is_resolved() {
        let input = "@string{venue = {Sensor Week}}\n@misc{k, title = venue}";
        let entries = BibtexParser::new().parse(input).unwrap();
        assert_eq!(entries[0].title.as_deref(), Some("Sensor Week"));
    }

    #[test]
    fn test_publication_month_and_day() {
        let input = "@misc{k, title = {T}, year = {2020}, month = {3}, day = {4}}";
        let entries = BibtexParser::new().parse(input).unwrap();
        assert_eq!(entries[0].month.as_deref(), Some("3"));
        assert_eq!(entries[0].day.as_deref(), Some("4"));
    }

    #[test]
    fn test_month_abbreviation_is_resolved() {
        let entries = BibtexParser::new().parse("@misc{k, month = mar}").unwrap();
        assert_eq!(entries[0].month.as_deref(), Some("March"));
    }

    #[test]
    fn test_malformed_input() {
        let result = BibtexParser::new().parse("@misc{broken, title = {unterminated");
        assert!(matches!(result, Err(ConvertError::Bibtex(_))));
    }
}
