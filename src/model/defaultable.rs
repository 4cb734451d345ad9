//! Typed, defaulted attribute access.
//!
//! A [`DefaultableValue`] binds one typed attribute to its backing XML
//! attribute. Reading is total: absent or unparsable raw text falls back to
//! the declared default, and raw presence is separately queryable. Writing
//! goes through to the document, so serialization reflects every edit.

use crate::xml::{XmlDocument, XmlElementId};

/// A value type that can live in an XML attribute.
pub trait AttributeValue: Sized {
    /// Parse from raw attribute text. `None` means unparsable (the reader
    /// falls back to the default).
    fn parse(raw: &str) -> Option<Self>;

    /// Serialize for writing back to the attribute.
    fn serialize(&self) -> String;
}

impl AttributeValue for String {
    fn parse(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }

    fn serialize(&self) -> String {
        self.clone()
    }
}

impl AttributeValue for bool {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        self.to_string()
    }
}

/// Direction of a function/function-import parameter (`Mode` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterMode {
    /// Absent or unrecognized `Mode` text.
    #[default]
    Unknown,
    In,
    Out,
    InOut,
}

impl AttributeValue for ParameterMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "In" => Some(ParameterMode::In),
            "Out" => Some(ParameterMode::Out),
            "InOut" => Some(ParameterMode::InOut),
            _ => None,
        }
    }

    fn serialize(&self) -> String {
        match self {
            ParameterMode::In => "In",
            ParameterMode::Out => "Out",
            ParameterMode::InOut => "InOut",
            ParameterMode::Unknown => "",
        }
        .to_owned()
    }
}

/// One typed attribute on one backing element.
///
/// The wrapper is stateless: it holds no cached value, only the coordinates
/// and the default. Every read consults the document.
#[derive(Debug, Clone)]
pub struct DefaultableValue<T> {
    element: XmlElementId,
    attribute: &'static str,
    default: T,
}

impl<T: AttributeValue + Clone> DefaultableValue<T> {
    pub fn new(element: XmlElementId, attribute: &'static str, default: T) -> Self {
        Self {
            element,
            attribute,
            default,
        }
    }

    /// The attribute name this wrapper reads and writes.
    pub fn attribute_name(&self) -> &'static str {
        self.attribute
    }

    /// The raw attribute text, if present.
    pub fn raw<'d>(&self, doc: &'d XmlDocument) -> Option<&'d str> {
        doc.attribute(self.element, self.attribute)
    }

    /// True if the attribute is explicitly present in the document.
    pub fn is_set(&self, doc: &XmlDocument) -> bool {
        self.raw(doc).is_some()
    }

    /// The typed value. Never fails: absent or unparsable raw text returns
    /// the declared default.
    pub fn value(&self, doc: &XmlDocument) -> T {
        self.raw(doc)
            .and_then(T::parse)
            .unwrap_or_else(|| self.default.clone())
    }

    /// The declared default.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Write the attribute through to the document.
    pub fn set(&self, doc: &mut XmlDocument, value: &T) {
        doc.set_attribute(self.element, self.attribute, value.serialize());
    }

    /// Remove the attribute; subsequent reads return the default again.
    pub fn clear(&self, doc: &mut XmlDocument) {
        doc.remove_attribute(self.element, self.attribute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_element() -> (XmlDocument, XmlElementId) {
        let mut doc = XmlDocument::new();
        let id = doc.create_element("Parameter");
        doc.set_root(id);
        (doc, id)
    }

    #[test]
    fn test_absent_attribute_returns_default() {
        let (doc, id) = doc_with_element();
        let mode = DefaultableValue::new(id, "Mode", ParameterMode::Unknown);
        assert_eq!(mode.value(&doc), ParameterMode::Unknown);
        assert!(!mode.is_set(&doc));
    }

    #[test]
    fn test_set_then_clear_returns_to_default() {
        let (mut doc, id) = doc_with_element();
        let mode = DefaultableValue::new(id, "Mode", ParameterMode::Unknown);

        mode.set(&mut doc, &ParameterMode::InOut);
        assert!(mode.is_set(&doc));
        assert_eq!(mode.value(&doc), ParameterMode::InOut);
        assert_eq!(doc.attribute(id, "Mode"), Some("InOut"));

        mode.clear(&mut doc);
        assert!(!mode.is_set(&doc));
        assert_eq!(mode.value(&doc), ParameterMode::Unknown);
    }

    #[test]
    fn test_unparsable_raw_falls_back_to_default() {
        let (mut doc, id) = doc_with_element();
        doc.set_attribute(id, "Mode", "Sideways");
        let mode = DefaultableValue::new(id, "Mode", ParameterMode::Unknown);
        // Raw is present but unparsable: value is the default, is_set is true.
        assert_eq!(mode.value(&doc), ParameterMode::Unknown);
        assert!(mode.is_set(&doc));
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(bool::parse("true"), Some(true));
        assert_eq!(bool::parse("0"), Some(false));
        assert_eq!(bool::parse("yes"), None);
    }
}
