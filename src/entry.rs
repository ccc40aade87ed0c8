//! The canonical entry record shared by every parser and the writer.
//!
//! Parsers fill in whatever they find; absent fields stay `None`. Default
//! values live in a single declared table, [`Defaults`], and are resolved
//! per [`Field`] so the policy is the same no matter which parser produced
//! the record.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Maximum length of a source tag, in characters.
pub const TAG_MAX_CHARS: usize = 15;

/// Fields of an [`Entry`] that carry a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Year,
    Url,
    AccessDate,
}

/// Declared table of literal defaults substituted for absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    title: String,
    author: String,
    year: String,
    url: String,
    access_date: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            author: "Unknown Author".to_string(),
            year: "2025".to_string(),
            url: String::new(),
            access_date: "2025-01-01".to_string(),
        }
    }
}

impl Defaults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default literal for a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Year => &self.year,
            Field::Url => &self.url,
            Field::AccessDate => &self.access_date,
        }
    }

    /// Overrides the default literal for a field.
    ///
    /// Blank values are ignored for every field but [`Field::Url`], so a
    /// resolved title, author, year or access date is never empty.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if field != Field::Url && value.trim().is_empty() {
            return self;
        }
        match field {
            Field::Title => self.title = value,
            Field::Author => self.author = value,
            Field::Year => self.year = value,
            Field::Url => self.url = value,
            Field::AccessDate => self.access_date = value,
        }
        self
    }
}

/// One bibliographic source, independent of its input format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Identifying key carried by the input (BibTeX citation key)
    pub tag: Option<CompactString>,
    /// Title of the work
    pub title: Option<String>,
    /// Authors flattened into one string, joined with `", "`
    pub author: Option<String>,
    /// Publication year
    pub year: Option<String>,
    /// Publication month, written only when present
    pub month: Option<String>,
    /// Publication day, written only when present
    pub day: Option<String>,
    /// Web address
    pub url: Option<String>,
    /// Date the source was retrieved, `YYYY-MM-DD`
    pub access_date: Option<String>,
}

impl Entry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value of a field. Blank values count as absent.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Title => self.title.as_deref(),
            Field::Author => self.author.as_deref(),
            Field::Year => self.year.as_deref(),
            Field::Url => self.url.as_deref(),
            Field::AccessDate => self.access_date.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Returns the stored value of a field, or its default.
    pub fn resolve<'a>(&'a self, field: Field, defaults: &'a Defaults) -> &'a str {
        self.get(field).unwrap_or_else(|| defaults.get(field))
    }

    /// Publication month, if present and non-blank.
    pub fn month(&self) -> Option<&str> {
        self.month.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Publication day, if present and non-blank.
    pub fn day(&self) -> Option<&str> {
        self.day.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Appends an author name, joining with `", "` if one is already present.
    pub fn push_author(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        match &mut self.author {
            Some(existing) if !existing.is_empty() => {
                existing.push_str(", ");
                existing.push_str(name);
            }
            _ => self.author = Some(name.to_string()),
        }
    }

    /// Returns the tag used in output: the identifying key if present,
    /// otherwise the resolved title, capped at [`TAG_MAX_CHARS`].
    pub fn resolve_tag(&self, defaults: &Defaults) -> CompactString {
        let source = self
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.resolve(Field::Title, defaults));
        truncate_chars(source, TAG_MAX_CHARS)
    }
}

/// Takes at most `max` characters from the start of `s`.
pub(crate) fn truncate_chars(s: &str, max: usize) -> CompactString {
    match s.char_indices().nth(max) {
        Some((idx, _)) => CompactString::from(&s[..idx]),
        None => CompactString::from(s),
    }
}
