//! RIS format data structures.
//!
//! `RawRisData` accumulates the lines of one open record. It only becomes an
//! [`Entry`] once its `ER` line is seen.
//!
//! # Field Processing Strategy
//! - **Priority-based**: `TI` over `T1` for titles, `PY` over `Y1` for years
//! - **First-wins**: a repeated tag keeps its first value
//! - **Accumulating**: every author line is appended in encounter order

use crate::Entry;
use crate::ris::tags::RisTag;
use crate::utils::normalize_date_separators;
use std::collections::HashMap;

/// Structured raw data of one RIS record.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRisData {
    /// Key-value pair data from the record.
    pub(crate) data: HashMap<RisTag, Vec<String>>,
    /// Author lines, in encounter order.
    pub(crate) authors: Vec<String>,
}

impl RawRisData {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a tag-value pair to the data.
    pub(crate) fn add_data(&mut self, tag: RisTag, value: String) {
        self.data.entry(tag).or_default().push(value);
    }

    pub(crate) fn add_author(&mut self, author: String) {
        self.authors.push(author);
    }

    /// Get the first non-empty value for a tag, if it exists.
    pub(crate) fn get_first(&self, tag: &RisTag) -> Option<&str> {
        self.data
            .get(tag)
            .and_then(|values| values.iter().find(|v| !v.is_empty()))
            .map(String::as_str)
    }
}

impl From<RawRisData> for Entry {
    fn from(raw: RawRisData) -> Self {
        let mut entry = Entry::new();

        entry.title = Some(
            raw.get_first(&RisTag::Title)
                .or_else(|| raw.get_first(&RisTag::TitleAlternative))
                .unwrap_or("Untitled")
                .to_string(),
        );

        for author in &raw.authors {
            entry.push_author(author);
        }

        entry.year = raw
            .get_first(&RisTag::PublicationYear)
            .or_else(|| raw.get_first(&RisTag::DatePrimary))
            .and_then(|date| date.split('/').next())
            .map(str::trim)
            .filter(|year| !year.is_empty())
            .map(str::to_string);

        entry.url = raw.get_first(&RisTag::Url).map(str::to_string);

        entry.access_date = raw
            .get_first(&RisTag::DateAccess)
            .map(normalize_date_separators)
            .filter(|date| !date.is_empty());

        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_ris_data_new() {
        let raw = RawRisData::new();
        assert!(raw.data.is_empty());
        assert!(raw.authors.is_empty());
    }

    #[test]
    fn test_first_value_wins() {
        let mut raw = RawRisData::new();
        raw.add_data(RisTag::Title, "Test Title".to_string());
        raw.add_data(RisTag::Title, "Another Title".to_string());
        assert_eq!(raw.get_first(&RisTag::Title), Some("Test Title"));
    }

    #[test]
    fn test_title_priority() {
        let mut raw = RawRisData::new();
        raw.add_data(RisTag::TitleAlternative, "Alternative".to_string());
        raw.add_data(RisTag::Title, "Primary".to_string());
        let entry: Entry = raw.into();
        assert_eq!(entry.title.as_deref(), Some("Primary"));
    }

    #[test]
    fn test_missing_title_becomes_untitled() {
        let entry: Entry = RawRisData::new().into();
        assert_eq!(entry.title.as_deref(), Some("Untitled"));
        assert_eq!(entry.author, None);
        assert_eq!(entry.year, None);
    }

    #[test]
    fn test_conversion_to_entry() {
        let mut raw = RawRisData::new();
        raw.add_data(RisTag::Title, "Test Article".to_string());
        raw.add_author("Smith, John".to_string());
        raw.add_author("Doe, Jane".to_string());
        raw.add_data(RisTag::DatePrimary, "1998/03/01".to_string());
        raw.add_data(RisTag::PublicationYear, "2023/12/25/Christmas".to_string());
        raw.add_data(RisTag::Url, "https://example.com/a".to_string());
        raw.add_data(RisTag::DateAccess, "2024/05/17/".to_string());

        let entry: Entry = raw.into();
        assert_eq!(entry.title.as_deref(), Some("Test Article"));
        assert_eq!(entry.author.as_deref(), Some("Smith, John, Doe, Jane"));
        assert_eq!(entry.year.as_deref(), Some("2023"));
        assert_eq!(entry.url.as_deref(), Some("https://example.com/a"));
        assert_eq!(entry.access_date.as_deref(), Some("2024-05-17"));
        assert_eq!(entry.tag, None);
    }
}
