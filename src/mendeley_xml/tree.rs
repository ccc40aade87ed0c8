//! A minimal element tree built from `quick-xml` events.
//!
//! Reference-manager exports nest their fields a few levels deep, so the
//! parser reads the whole document into [`XmlNode`]s and then looks fields
//! up by path. Only element names, the text an element holds before its
//! first child, and children are kept. Attributes, comments and tail text
//! are dropped.

use crate::{ConvertError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct XmlNode {
    /// Local element name, without namespace prefix
    pub(crate) name: String,
    /// Text preceding the first child element
    pub(crate) text: String,
    pub(crate) children: Vec<XmlNode>,
}

impl XmlNode {
    fn from_start(e: &BytesStart) -> Self {
        Self {
            name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            ..Default::default()
        }
    }

    /// Finds the first element matching a path of child names.
    pub(crate) fn find(&self, path: &[&str]) -> Option<&XmlNode> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|child| child.name == *first)
            .find_map(|child| child.find(rest))
    }

    /// All descendants with the given name, in document order. The node
    /// itself is not included.
    pub(crate) fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// The element's own text if it has any, otherwise the concatenated own
    /// text of its children (formatting runs). Trimmed; `None` when empty.
    pub(crate) fn inline_text(&self) -> Option<String> {
        let text = if self.text.trim().is_empty() {
            self.children
                .iter()
                .map(|child| child.text.as_str())
                .collect::<String>()
        } else {
            self.text.clone()
        };
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Parses a whole document into its root element.
///
/// # Errors
///
/// Returns [`ConvertError::Xml`] if the document is not well-formed or has
/// no root element.
pub(crate) fn parse_tree(content: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(XmlNode::from_start(e)),
            Event::Empty(ref e) => attach(&mut stack, &mut root, XmlNode::from_start(e))?,
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ConvertError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            _ => (),
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::Xml(format!(
            "unexpected end of document, <{}> is not closed",
            open.name
        )));
    }

    root.ok_or_else(|| ConvertError::Xml("document has no root element".into()))
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(ConvertError::Xml(format!(
                "document has more than one root element, found <{}>",
                node.name
            )));
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlNode], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(node) if node.children.is_empty() => node.text.push_str(text),
        Some(_) => (),
        None if text.trim().is_empty() => (),
        None => {
            return Err(ConvertError::Xml(
                "text content outside of the root element".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_find_by_path() {
        let root = parse_tree(
            "<record><titles><title>Main</title></titles><dates><year>2020</year></dates></record>",
        )
        .unwrap();
        assert_eq!(root.name, "record");
        assert_eq!(root.find(&["titles", "title"]).unwrap().text, "Main");
        assert_eq!(root.find(&["dates", "year"]).unwrap().text, "2020");
        assert!(root.find(&["dates", "month"]).is_none());
    }

    #[test]
    fn test_find_searches_all_branches() {
        let root = parse_tree("<r><urls/><urls><related>u</related></urls></r>").unwrap();
        assert_eq!(root.find(&["urls", "related"]).unwrap().text, "u");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = parse_tree(
            "<xml><records><record><n>1</n></record><group><record><n>2</n></record></group></records></xml>",
        )
        .unwrap();
        let texts: Vec<_> = root
            .descendants("record")
            .into_iter()
            .map(|r| r.find(&["n"]).unwrap().text.clone())
            .collect();
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn test_inline_text_joins_formatting_runs() {
        let root = parse_tree(
            "<title>\n  <style face=\"bold\">Sensor </style><style face=\"normal\">Networks</style>\n</title>",
        )
        .unwrap();
        assert_eq!(root.inline_text().as_deref(), Some("Sensor Networks"));
    }

    #[test]
    fn test_inline_text_prefers_own_text() {
        let root = parse_tree("<title> Plain title <i>ignored</i></title>").unwrap();
        assert_eq!(root.inline_text().as_deref(), Some("Plain title"));
    }

    #[test]
    fn test_entities_and_cdata() {
        let root = parse_tree("<a><b>Fish &amp; Chips</b><c><![CDATA[<raw>]]></c></a>").unwrap();
        assert_eq!(root.find(&["b"]).unwrap().text, "Fish & Chips");
        assert_eq!(root.find(&["c"]).unwrap().text, "<raw>");
    }

    #[test]
    fn test_namespace_prefix_is_ignored() {
        let root = parse_tree(r#"<m:records xmlns:m="urn:x"><m:record/></m:records>"#).unwrap();
        assert_eq!(root.name, "records");
        assert_eq!(root.descendants("record").len(), 1);
    }

    #[rstest]
    #[case("")]
    #[case("not xml at all")]
    #[case("<records><record>")]
    #[case("<records></record>")]
    #[case("<a/><b/>")]
    fn test_malformed_documents(#[case] input: &str) {
        assert!(matches!(parse_tree(input), Err(ConvertError::Xml(_))));
    }
}
