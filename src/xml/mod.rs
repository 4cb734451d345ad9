//! Mutable XML backing layer.
//!
//! Model nodes do not copy their data out of the document: attribute reads
//! and writes go through to the backing [`XmlDocument`], so serializing the
//! document always reflects the current state of the graph.

pub mod document;
pub mod error;
pub mod reader;
pub mod writer;

pub use document::{InsertPosition, XmlDocument, XmlElement, XmlElementId};
pub use error::XmlError;
pub use reader::{parse_document, parse_document_str};
pub use writer::{write_document, write_document_string};
