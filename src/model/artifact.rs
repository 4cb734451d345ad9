//! One parsed model document.

use std::path::PathBuf;

use super::diagnostics::ErrorList;
use super::node::{ArtifactId, ModelSpace, NodeId};
use crate::xml::XmlDocument;

/// XML namespace URIs of the schema families, used to tell a storage schema
/// apart from a conceptual one (both use the `Schema` root element).
pub mod namespace {
    pub const CONCEPTUAL: &str = "http://schemas.microsoft.com/ado/2009/11/edm";
    pub const STORAGE: &str = "http://schemas.microsoft.com/ado/2009/11/edm/ssdl";
    pub const MAPPING: &str = "http://schemas.microsoft.com/ado/2009/11/mapping/cs";
}

/// One model document: its backing XML, its space, its root node once
/// parsed, and the problems collected for it.
#[derive(Debug)]
pub struct Artifact {
    pub(crate) id: ArtifactId,
    pub(crate) path: Option<PathBuf>,
    pub(crate) space: ModelSpace,
    pub(crate) document: XmlDocument,
    pub(crate) root: Option<NodeId>,
    pub(crate) errors: ErrorList,
}

impl Artifact {
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn space(&self) -> ModelSpace {
        self.space
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    /// The root node of the parsed graph; `None` before the parse phase or
    /// when the root element is unrecognized.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }
}

/// Detect which schema family a document belongs to.
///
/// `Mapping` roots identify mapping documents; `Schema` roots are storage
/// when their default namespace is the SSDL namespace, conceptual otherwise.
/// Returns `None` for roots outside the known families.
pub fn detect_space(document: &XmlDocument) -> Option<ModelSpace> {
    let root = document.root()?;
    match document.name(root) {
        "Mapping" => Some(ModelSpace::Mapping),
        "Schema" => {
            let xmlns = document.attribute(root, "xmlns").unwrap_or_default();
            if xmlns.contains("/ssdl") {
                Some(ModelSpace::Storage)
            } else {
                Some(ModelSpace::Conceptual)
            }
        }
        _ => None,
    }
}
