//! A small in-memory XML element tree.
//!
//! Guides are small enough to hold in memory, and the normalizer wants
//! random access by path ("first `rating/value`", "all `credits/actor`")
//! rather than a stream of events. [`Element::from_reader`] drains the
//! `xml-rs` event stream into a tree once, keeping a stack of open
//! elements.
//!
//! Only what the guide needs is kept: local tag names, attributes by local
//! name, direct text and children. Namespaces, comments and processing
//! instructions are dropped. The encoding declared in the XML prolog
//! (typically ISO-8859-1 for IceTV feeds) is decoded by the parser, all
//! strings in the tree are UTF-8.

use alloc::collections::BTreeMap;
use std::io;

use xml::reader::{EventReader, XmlEvent};

use crate::GuideError;

/// One XML element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Element {
    /// Local tag name, without any namespace prefix.
    pub name: String,

    /// Attributes keyed by local name.
    pub attributes: BTreeMap<String, String>,

    /// Character data found directly inside this element, or `None` if
    /// there was none. Whitespace-only runs between child elements are not
    /// included.
    pub text: Option<String>,

    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Element {
        Element {
            name: name.into(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Parse a complete XML document and return its root element.
    #[allow(clippy::wildcard_enum_match_arm)]
    pub fn from_reader(reader: impl io::Read) -> Result<Element, GuideError> {
        let parser = EventReader::new(reader);
        let mut stack = Vec::<Element>::new();
        let mut root = None;

        for e in parser {
            match e {
                Ok(XmlEvent::StartElement {
                    name, attributes, ..
                }) => {
                    let mut element = Element::new(name.local_name);
                    for attribute in attributes {
                        element
                            .attributes
                            .insert(attribute.name.local_name, attribute.value);
                    }
                    stack.push(element);
                }
                Ok(XmlEvent::Characters(chars) | XmlEvent::CData(chars)) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .get_or_insert_with(String::new)
                            .push_str(&chars);
                    }
                }
                Ok(XmlEvent::EndElement { name }) => {
                    let element = stack.pop().ok_or_else(|| GuideError::Parse {
                        message: format!("unexpected closing tag: {}", name.local_name),
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Err(err) => {
                    return Err(GuideError::Parse {
                        message: err.to_string(),
                    });
                }
                // There's more: https://docs.rs/xml-rs/latest/xml/reader/enum.XmlEvent.html
                _ => {}
            }
        }

        root.ok_or_else(|| GuideError::Parse {
            message: "document has no root element".to_string(),
        })
    }

    /// Value of the attribute with local name `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All elements matching a `/` separated path of tag names, relative to
    /// this element.
    ///
    /// Each path segment is matched against the children of every element
    /// matched by the previous segment, so `credits/actor` collects actors
    /// from every `credits` child.
    ///
    /// ```
    /// use icetgd::Element;
    ///
    /// let xml = "<p><credits><actor>A</actor></credits><credits><actor>B</actor></credits></p>";
    /// let p = Element::from_reader(xml.as_bytes())?;
    /// let actors: Vec<_> = p.find_all("credits/actor").iter().map(|e| e.text.clone()).collect();
    /// assert_eq!(vec![Some("A".to_string()), Some("B".to_string())], actors);
    /// # Ok::<(), icetgd::GuideError>(())
    /// ```
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut matched = vec![self];
        for segment in path.split('/') {
            matched = matched
                .into_iter()
                .flat_map(|element| {
                    element
                        .children
                        .iter()
                        .filter(move |child| child.name == segment)
                })
                .collect();
        }
        matched
    }

    /// First element matching `path`, see [`Element::find_all`].
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// Text of the first element matching `path`.
    ///
    /// An element that exists but holds no text yields `Some("")`, only a
    /// missing element yields `None`.
    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path)
            .map(|element| element.text.as_deref().unwrap_or(""))
    }
}

#[allow(clippy::dbg_macro)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_nested() {
        let example = r#"<?xml version="1.0" encoding="UTF-8"?>
<tv>
    <channel id="2300">
        <display-name>TwentyThree</display-name>
        <lcn>23</lcn>
    </channel>
    <programme channel="2300">
        <title lang="en">Spiderman</title>
        <rating system="">
            <value>M</value>
        </rating>
        <subtitles type="teletext"/>
    </programme>
</tv>"#;
        let root = Element::from_reader(example.as_bytes()).expect("error parsing xml");
        println!("{:?}", root);
        assert_eq!("tv", root.name);
        assert_eq!(2, root.children.len());
        assert_eq!(None, root.text);

        let channel = root.find("channel").expect("channel");
        assert_eq!(Some("2300"), channel.attr("id"));
        assert_eq!(Some("23"), channel.find_text("lcn"));
        assert_eq!(Some("TwentyThree"), channel.find_text("display-name"));

        let programme = root.find("programme").expect("programme");
        assert_eq!(Some("Spiderman"), programme.find_text("title"));
        assert_eq!(Some("en"), programme.find("title").and_then(|t| t.attr("lang")));
        assert_eq!(Some("M"), programme.find_text("rating/value"));
        assert_eq!(Some(""), programme.find_text("subtitles"));
        assert_eq!(None, programme.find_text("desc"));
        assert_eq!(None, programme.find_text("rating/stars"));
    }

    #[test]
    fn find_all_keeps_document_order() {
        let example = "<p><category>News</category><title>x</title><category>Sport</category></p>";
        let root = Element::from_reader(example.as_bytes()).expect("error parsing xml");
        let categories: Vec<&str> = root
            .find_all("category")
            .iter()
            .filter_map(|e| e.text.as_deref())
            .collect();
        assert_eq!(vec!["News", "Sport"], categories);
        assert!(root.find_all("credits/director").is_empty());
    }

    #[test]
    fn cdata_and_entities_are_text() {
        let example = "<p><desc>Fish &amp; Chips <![CDATA[<live>]]></desc></p>";
        let root = Element::from_reader(example.as_bytes()).expect("error parsing xml");
        assert_eq!(Some("Fish & Chips <live>"), root.find_text("desc"));
    }

    #[test]
    fn latin1_declared_encoding() {
        let mut example =
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<p><title>Caf".to_vec();
        example.push(0xE9);
        example.extend_from_slice(b" Society</title></p>");
        let root = Element::from_reader(example.as_slice()).expect("error parsing xml");
        assert_eq!(Some("Caf\u{e9} Society"), root.find_text("title"));
    }

    #[test]
    fn doctype_is_ignored() {
        let example = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<!DOCTYPE tv SYSTEM "http://iceguide.icetv.com.au/iceguide/iceguide.dtd">
<tv><channel id="1"/></tv>"#;
        let root = Element::from_reader(example.as_bytes()).expect("error parsing xml");
        assert_eq!(1, root.children.len());
    }

    #[test]
    fn malformed_xml() {
        let err = Element::from_reader("<tv><channel></tv>".as_bytes()).unwrap_err();
        assert!(matches!(err, GuideError::Parse { .. }), "{err:?}");

        let err = Element::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, GuideError::Parse { .. }), "{err:?}");
    }
}
