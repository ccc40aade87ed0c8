//! RIS format parser implementation.
//!
//! # Example
//!
//! ```
//! use bibxml::{EntryParser, RisParser};
//!
//! let input = r#"TY  - ELEC
//! TI  - Example Title
//! AU  - Smith, John
//! ER  -"#;
//!
//! let entries = RisParser::new().parse(input).unwrap();
//! assert_eq!(entries[0].title.as_deref(), Some("Example Title"));
//! ```

mod parse;
mod structure;
mod tags;

use crate::{Entry, EntryParser, Result};
use parse::ris_parse;
use tracing::debug;

/// Parser for RIS format references.
///
/// RIS is a plain-text tagged format that uses two-letter tags at the start
/// of each line to denote different fields. Records run from a `TY` line to
/// an `ER` line.
#[derive(Debug, Clone, Default)]
pub struct RisParser;

impl RisParser {
    /// Creates a new RIS parser instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EntryParser for RisParser {
    /// Parses RIS text into entries, one per closed record.
    ///
    /// Never fails: unterminated records are dropped and unknown tags are
    /// skipped.
    fn parse(&self, input: &str) -> Result<Vec<Entry>> {
        let entries: Vec<Entry> = ris_parse(input).into_iter().map(Entry::from).collect();
        debug!(count = entries.len(), "parsed RIS records");
        Ok(entries)
    }
}
