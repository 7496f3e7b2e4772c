//! Builds a [`Document`] arena from XML text by driving the `quick_xml`
//! pull reader.
//!
//! Comments, processing instructions, and the XML declaration are not part
//! of the data model and are skipped. Whitespace-only text between
//! elements is dropped, so pretty-printed documents do not grow text
//! nodes out of their indentation; CDATA content is kept verbatim.

use crate::error::DomError;
use crate::tree::{Document, NodeId};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parses XML text into a document tree.
pub fn parse_document(source: &str) -> Result<Document, DomError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);
    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = vec![doc.root()];
    let mut buf = Vec::new();

    loop {
        let parent = stack.last().copied().unwrap_or_else(|| doc.root());
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let elem = open_element(&mut doc, parent, &e, &reader)?;
                stack.push(elem);
            }
            Event::Empty(e) => {
                open_element(&mut doc, parent, &e, &reader)?;
            }
            Event::End(_) => {
                if stack.len() <= 1 {
                    return Err(DomError::Malformed("unbalanced closing tag".into()));
                }
                stack.pop();
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                if !text.trim().is_empty() {
                    let id = doc.new_text(text);
                    doc.append_child(parent, id);
                }
            }
            Event::CData(e) => {
                let content = String::from_utf8(e.to_vec())?;
                let id = doc.new_text(content);
                doc.append_child(parent, id);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err(DomError::Malformed("unclosed element at end of input".into()));
    }
    doc.check_well_formed()?;
    Ok(doc)
}

fn open_element(
    doc: &mut Document,
    parent: NodeId,
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<NodeId, DomError> {
    let name = String::from_utf8(e.name().as_ref().to_vec())?;
    let elem = doc.new_element(name);
    doc.append_child(parent, elem);
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
        doc.add_attribute(elem, key, value);
    }
    Ok(elem)
}
