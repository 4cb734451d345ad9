//! XML document loading built on `quick-xml`.
//!
//! The reader walks the pull-parser event stream with an explicit parent
//! stack and materializes the [`XmlDocument`] element tree. Namespace
//! prefixes are stripped: the model vocabulary is matched on local names, and
//! the schema families involved never reuse a local name across namespaces.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smol_str::SmolStr;

use super::document::{InsertPosition, XmlDocument, XmlElementId};
use super::error::XmlError;

/// Parse a complete document from raw bytes.
pub fn parse_document(input: &[u8]) -> Result<XmlDocument, XmlError> {
    let content = std::str::from_utf8(input).map_err(|e| XmlError::Encoding(e.to_string()))?;
    parse_document_str(content)
}

/// Parse a complete document from a string.
pub fn parse_document_str(content: &str) -> Result<XmlDocument, XmlError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut doc = XmlDocument::new();
    let mut stack: Vec<XmlElementId> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let id = open_element(&mut doc, &mut stack, &start)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                open_element(&mut doc, &mut stack, &start)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                if let Some(current) = stack.last() {
                    let chunk = text
                        .unescape()
                        .map_err(|e| XmlError::malformed(e.to_string()))?;
                    let owned = doc.text(*current).to_owned() + chunk.as_ref();
                    doc.set_text(*current, owned);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last() {
                    let chunk = String::from_utf8_lossy(&data).into_owned();
                    let owned = doc.text(*current).to_owned() + &chunk;
                    doc.set_text(*current, owned);
                }
            }
            Event::Eof => break,
            // Declarations, comments, PIs and doctypes carry no model content.
            _ => {}
        }
    }

    if doc.root().is_none() {
        return Err(XmlError::NoRoot);
    }
    Ok(doc)
}

fn open_element(
    doc: &mut XmlDocument,
    stack: &mut [XmlElementId],
    start: &BytesStart<'_>,
) -> Result<XmlElementId, XmlError> {
    let name = local_name(start.name().as_ref())?;
    let id = doc.create_element(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::malformed(e.to_string()))?;
        let raw_key = attr.key.as_ref();
        // xmlns declarations keep their full name; the model layer needs the
        // default namespace to tell schema families apart but must not treat
        // declarations as schema attributes.
        let key = if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
            SmolStr::new(
                std::str::from_utf8(raw_key).map_err(|e| XmlError::Encoding(e.to_string()))?,
            )
        } else {
            local_name(raw_key)?
        };
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::malformed(e.to_string()))?;
        doc.set_attribute(id, &key, value.into_owned());
    }

    match stack.last() {
        Some(parent) => doc.insert_child(*parent, id, InsertPosition::Last),
        None => {
            if doc.root().is_some() {
                return Err(XmlError::malformed("multiple root elements"));
            }
            doc.set_root(id);
        }
    }
    Ok(id)
}

fn local_name(qname: &[u8]) -> Result<SmolStr, XmlError> {
    let name = std::str::from_utf8(qname).map_err(|e| XmlError::Encoding(e.to_string()))?;
    let local = name.rsplit(':').next().unwrap_or(name);
    Ok(SmolStr::new(local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let doc = parse_document_str(
            r#"<?xml version="1.0"?>
            <Schema Namespace="FooModel" xmlns="http://example.org/edm">
              <EntityContainer Name="FooContainer">
                <EntitySet Name="Foos" EntityType="FooModel.Foo" />
              </EntityContainer>
            </Schema>"#,
        )
        .unwrap();

        let root = doc.root().unwrap();
        assert_eq!(doc.name(root), "Schema");
        assert_eq!(doc.attribute(root, "Namespace"), Some("FooModel"));
        // the default-namespace declaration survives under its full name
        assert_eq!(doc.attribute(root, "xmlns"), Some("http://example.org/edm"));

        let container = doc.children(root)[0];
        assert_eq!(doc.name(container), "EntityContainer");
        let set = doc.children(container)[0];
        assert_eq!(doc.attribute(set, "EntityType"), Some("FooModel.Foo"));
    }

    #[test]
    fn test_prefixed_names_use_local_part() {
        let doc = parse_document_str(
            r#"<edm:Schema xmlns:edm="http://example.org/edm"><edm:EntityContainer Name="C"/></edm:Schema>"#,
        )
        .unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc.name(root), "Schema");
        assert_eq!(doc.name(doc.children(root)[0]), "EntityContainer");
    }

    #[test]
    fn test_text_content() {
        let doc = parse_document_str(
            "<Mapping><QueryView>SELECT VALUE f FROM Foos AS f</QueryView></Mapping>",
        )
        .unwrap();
        let root = doc.root().unwrap();
        let qv = doc.children(root)[0];
        assert_eq!(doc.text(qv), "SELECT VALUE f FROM Foos AS f");
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse_document_str("<A><B></A>").is_err());
        assert!(matches!(parse_document_str(""), Err(XmlError::NoRoot)));
    }
}
