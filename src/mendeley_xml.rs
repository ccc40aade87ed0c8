//! Reference-manager XML parser (Mendeley and EndNote exports).
//!
//! # Example
//!
//! ```
//! use bibxml::{EntryParser, XmlParser};
//!
//! let input = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <xml><records><record>
//! <titles><title>Example Title</title></titles>
//! <contributors><authors><author>Smith, John</author></authors></contributors>
//! </record></records></xml>"#;
//!
//! let entries = XmlParser::new().parse(input).unwrap();
//! assert_eq!(entries[0].title.as_deref(), Some("Example Title"));
//! ```

mod tree;

use crate::{Defaults, Entry, EntryParser, Field, Result};
use tracing::debug;
use tree::{XmlNode, parse_tree};

/// Element paths tried in order for each field, relative to a `record`.
const TITLE_PATHS: &[&[&str]] = &[&["titles", "title"]];
const AUTHOR_PATHS: &[&[&str]] = &[&["contributors", "authors", "author"]];
const YEAR_PATHS: &[&[&str]] = &[&["dates", "year"]];
const MONTH_PATHS: &[&[&str]] = &[&["dates", "month"]];
const DAY_PATHS: &[&[&str]] = &[&["dates", "day"]];
const URL_PATHS: &[&[&str]] = &[
    &["urls", "related"],
    &["urls", "related-urls", "url"],
    &["urls", "web-urls", "url"],
];
const ACCESS_DATE_PATHS: &[&[&str]] = &[&["dates", "accessDate"], &["access-date"]];

/// Parser for reference-manager XML exports.
///
/// Every `record` element in the document becomes one entry, in document
/// order. Absent fields are filled from the parser's [`Defaults`] at parse
/// time. A document that is not well-formed fails the whole parse.
#[derive(Debug, Clone, Default)]
pub struct XmlParser {
    defaults: Defaults,
}

impl XmlParser {
    /// Creates a new XML parser with the standard default table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom default table for absent fields.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    fn lookup(&self, record: &XmlNode, paths: &[&[&str]], field: Field) -> String {
        find_text(record, paths).unwrap_or_else(|| self.defaults.get(field).to_string())
    }

    fn parse_record(&self, record: &XmlNode) -> Entry {
        Entry {
            tag: None,
            title: Some(self.lookup(record, TITLE_PATHS, Field::Title)),
            author: Some(self.lookup(record, AUTHOR_PATHS, Field::Author)),
            year: Some(self.lookup(record, YEAR_PATHS, Field::Year)),
            month: find_text(record, MONTH_PATHS),
            day: find_text(record, DAY_PATHS),
            url: Some(self.lookup(record, URL_PATHS, Field::Url)),
            access_date: Some(self.lookup(record, ACCESS_DATE_PATHS, Field::AccessDate)),
        }
    }
}

/// First non-blank text found along `paths`.
fn find_text(record: &XmlNode, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| record.find(path).and_then(XmlNode::inline_text))
}

impl EntryParser for XmlParser {
    fn parse(&self, input: &str) -> Result<Vec<Entry>> {
        let root = parse_tree(input)?;
        let records = root.descendants("record");
        debug!(count = records.len(), "parsed XML records");
        Ok(records
            .into_iter()
            .map(|record| self.parse_record(record))
            .collect())
    }
}
