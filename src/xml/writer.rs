//! XML serialization built on `quick-xml`.
//!
//! Re-serializes an [`XmlDocument`] after in-place edits. Output is indented
//! with two spaces and carries a standard declaration, which matches the
//! layout conventions of the schema families this crate consumes.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::document::{XmlDocument, XmlElementId};
use super::error::XmlError;

/// Serialize the whole document to UTF-8 bytes.
pub fn write_document(doc: &XmlDocument) -> Result<Vec<u8>, XmlError> {
    let root = doc.root().ok_or(XmlError::NoRoot)?;
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(doc, root, &mut writer)?;
    Ok(writer.into_inner().into_inner())
}

/// Serialize the whole document to a `String`.
pub fn write_document_string(doc: &XmlDocument) -> Result<String, XmlError> {
    let bytes = write_document(doc)?;
    String::from_utf8(bytes).map_err(|e| XmlError::Encoding(e.to_string()))
}

fn write_element(
    doc: &XmlDocument,
    id: XmlElementId,
    writer: &mut Writer<Cursor<Vec<u8>>>,
) -> Result<(), XmlError> {
    let element = doc.element(id);
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = doc.text(id);
    if element.children.is_empty() && text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(doc, *child, writer)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
