//! Word bibliography XML writer.
//!
//! Renders canonical entries into the Office Open XML bibliography schema
//! read by word-processor citation managers. Every field of the schema is
//! always written; absent values are replaced from the configured
//! [`Defaults`] so any input produces a valid document.
//!
//! # Example
//!
//! ```
//! use bibxml::{Entry, WordXmlWriter};
//!
//! let entry = Entry {
//!     title: Some("Sensor Networks".to_string()),
//!     access_date: Some("2023".to_string()),
//!     ..Default::default()
//! };
//! let xml = WordXmlWriter::new().write(&[entry]).unwrap();
//! let xml = String::from_utf8(xml).unwrap();
//! assert!(xml.contains("<b:MonthAccessed>01</b:MonthAccessed>"));
//! ```

use crate::utils::split_access_date;
use crate::{ConvertError, Defaults, Entry, Field, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;
use tracing::debug;
use uuid::Uuid;

/// Namespace of the Word bibliography schema.
pub const BIBLIOGRAPHY_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/bibliography";

/// Source type written for every entry.
pub const DEFAULT_SOURCE_TYPE: &str = "InternetSite";

/// Configuration for the output document.
///
/// # Examples
///
/// ```
/// use bibxml::{Field, WriterConfig};
///
/// let mut config = WriterConfig::new();
/// config.set_indent(4);
/// config.defaults_mut().set(Field::Year, "n.d.");
/// ```
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Literal values substituted for absent fields
    defaults: Defaults,
    /// Value of every `b:SourceType` element
    source_type: String,
    /// Spaces per nesting level
    indent: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            source_type: DEFAULT_SOURCE_TYPE.to_string(),
            indent: 2,
        }
    }
}

impl WriterConfig {
    /// Creates a new writer configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut Defaults {
        &mut self.defaults
    }

    /// Replaces the whole default table
    pub fn set_defaults(&mut self, defaults: Defaults) -> &mut Self {
        self.defaults = defaults;
        self
    }

    /// Sets the source type classification
    pub fn set_source_type(&mut self, source_type: &str) -> &mut Self {
        self.source_type = source_type.to_string();
        self
    }

    /// Sets the number of spaces per indentation level
    pub fn set_indent(&mut self, indent: usize) -> &mut Self {
        self.indent = indent;
        self
    }
}

/// Writer producing Word bibliography XML.
///
/// Each call to [`WordXmlWriter::write`] generates fresh `Guid`s, so writing
/// the same entries twice never yields the same identifiers.
#[derive(Debug, Clone, Default)]
pub struct WordXmlWriter {
    config: WriterConfig,
}

impl WordXmlWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Renders `entries` into a complete, pretty-printed document, starting
    /// with an XML declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Write`] if the underlying writer fails.
    pub fn write(&self, entries: &[Entry]) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.config.indent);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(write_error)?;

        let root = BytesStart::new("b:Sources").with_attributes([
            ("xmlns:b", BIBLIOGRAPHY_NAMESPACE),
            ("xmlns", BIBLIOGRAPHY_NAMESPACE),
            ("SelectedStyle", ""),
        ]);
        writer.write_event(Event::Start(root)).map_err(write_error)?;

        for entry in entries {
            self.write_source(&mut writer, entry)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("b:Sources")))
            .map_err(write_error)?;

        debug!(count = entries.len(), "wrote bibliography sources");

        let mut output = writer.into_inner();
        output.push(b'\n');
        Ok(output)
    }

    fn write_source<W: Write>(&self, writer: &mut Writer<W>, entry: &Entry) -> Result<()> {
        let defaults = &self.config.defaults;
        let guid = format!("{{{}}}", Uuid::new_v4());
        let fallback_year =
            split_access_date(defaults.get(Field::AccessDate), defaults.get(Field::Year))[0];
        let [year_accessed, month_accessed, day_accessed] =
            split_access_date(entry.resolve(Field::AccessDate, defaults), fallback_year);

        start(writer, "b:Source")?;
        text_element(writer, "b:Tag", &entry.resolve_tag(defaults))?;
        text_element(writer, "b:SourceType", &self.config.source_type)?;
        text_element(writer, "b:Guid", &guid)?;
        text_element(writer, "b:Title", entry.resolve(Field::Title, defaults))?;
        text_element(writer, "b:Year", entry.resolve(Field::Year, defaults))?;
        if let Some(month) = entry.month() {
            text_element(writer, "b:Month", month)?;
        }
        if let Some(day) = entry.day() {
            text_element(writer, "b:Day", day)?;
        }
        text_element(writer, "b:YearAccessed", year_accessed)?;
        text_element(writer, "b:MonthAccessed", month_accessed)?;
        text_element(writer, "b:DayAccessed", day_accessed)?;
        text_element(writer, "b:URL", entry.resolve(Field::Url, defaults))?;

        // Authors are always written as one corporate name.
        start(writer, "b:Author")?;
        start(writer, "b:Author")?;
        text_element(writer, "b:Corporate", entry.resolve(Field::Author, defaults))?;
        end(writer, "b:Author")?;
        end(writer, "b:Author")?;

        end(writer, "b:Source")
    }
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_error)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))
        .map_err(write_error)?;
    Ok(())
}

fn write_error<E: std::fmt::Display>(err: E) -> ConvertError {
    ConvertError::Write(err.to_string())
}
