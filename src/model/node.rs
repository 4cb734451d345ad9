//! Graph nodes and their kind tags.
//!
//! Nodes live in the [`ArtifactSet`](super::artifact_set::ArtifactSet) arena
//! and are addressed by [`NodeId`]. The element-kind family is a closed
//! tagged enum; per-kind behavior (recognized attributes and children,
//! bindings, name scoping) is declared in [`schema`](super::schema) tables
//! rather than dispatched through an inheritance chain.

use super::binding::{BindingKey, ItemBinding};
use super::state::ElementState;
use super::symbol::Symbol;
use crate::xml::XmlElementId;

/// Index of a node in the artifact set's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an artifact within its artifact set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(pub u32);

impl ArtifactId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which schema family a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelSpace {
    /// Conceptual model (entity types, associations, containers).
    Conceptual,
    /// Storage model (tables, columns, functions).
    Storage,
    /// Mapping between the two.
    Mapping,
}

/// The metatype of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    // Schema documents (conceptual and storage)
    Schema,
    EntityContainer,
    EntitySet,
    AssociationSet,
    AssociationSetEnd,
    EntityType,
    Key,
    PropertyRef,
    Property,
    NavigationProperty,
    Association,
    AssociationEnd,
    ReferentialConstraint,
    PrincipalRole,
    DependentRole,
    Function,
    FunctionImport,
    Parameter,
    Documentation,

    // Mapping documents
    Mapping,
    EntityContainerMapping,
    EntitySetMapping,
    EntityTypeMapping,
    MappingFragment,
    ScalarProperty,
    AssociationSetMapping,
    EndProperty,
    Condition,
    QueryView,
    FunctionImportMapping,
    ResultMapping,
    FunctionImportTypeMapping,
}

impl ElementKind {
    /// The XML element name for this kind.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Schema => "Schema",
            Self::EntityContainer => "EntityContainer",
            Self::EntitySet => "EntitySet",
            Self::AssociationSet => "AssociationSet",
            Self::AssociationSetEnd => "End",
            Self::EntityType => "EntityType",
            Self::Key => "Key",
            Self::PropertyRef => "PropertyRef",
            Self::Property => "Property",
            Self::NavigationProperty => "NavigationProperty",
            Self::Association => "Association",
            Self::AssociationEnd => "End",
            Self::ReferentialConstraint => "ReferentialConstraint",
            Self::PrincipalRole => "Principal",
            Self::DependentRole => "Dependent",
            Self::Function => "Function",
            Self::FunctionImport => "FunctionImport",
            Self::Parameter => "Parameter",
            Self::Documentation => "Documentation",
            Self::Mapping => "Mapping",
            Self::EntityContainerMapping => "EntityContainerMapping",
            Self::EntitySetMapping => "EntitySetMapping",
            Self::EntityTypeMapping => "EntityTypeMapping",
            Self::MappingFragment => "MappingFragment",
            Self::ScalarProperty => "ScalarProperty",
            Self::AssociationSetMapping => "AssociationSetMapping",
            Self::EndProperty => "EndProperty",
            Self::Condition => "Condition",
            Self::QueryView => "QueryView",
            Self::FunctionImportMapping => "FunctionImportMapping",
            Self::ResultMapping => "ResultMapping",
            Self::FunctionImportTypeMapping => "FunctionImportTypeMapping",
        }
    }

    /// True for kinds that live in mapping documents.
    pub fn is_mapping_kind(&self) -> bool {
        matches!(
            self,
            Self::Mapping
                | Self::EntityContainerMapping
                | Self::EntitySetMapping
                | Self::EntityTypeMapping
                | Self::MappingFragment
                | Self::ScalarProperty
                | Self::AssociationSetMapping
                | Self::EndProperty
                | Self::Condition
                | Self::QueryView
                | Self::FunctionImportMapping
                | Self::ResultMapping
                | Self::FunctionImportTypeMapping
        )
    }

    /// True for kinds that may own a Documentation child.
    pub fn is_documentable(&self) -> bool {
        matches!(
            self,
            Self::EntityContainer
                | Self::EntitySet
                | Self::AssociationSet
                | Self::AssociationSetEnd
                | Self::EntityType
                | Self::Property
                | Self::NavigationProperty
                | Self::Association
                | Self::AssociationEnd
                | Self::Function
                | Self::FunctionImport
                | Self::Parameter
        )
    }

    /// True for document roots.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Schema | Self::Mapping)
    }
}

/// One node of the model graph.
///
/// Bindings are constructed eagerly from the kind's schema when the node is
/// created; only their resolution state changes afterwards. Children are kept
/// in insertion (document) order.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) artifact: ArtifactId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) xml: XmlElementId,
    pub(crate) kind: ElementKind,
    pub(crate) state: ElementState,
    pub(crate) symbol: Symbol,
    pub(crate) bindings: Vec<ItemBinding>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn artifact(&self) -> ArtifactId {
        self.artifact
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn xml(&self) -> XmlElementId {
        self.xml
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    /// The canonical symbol computed by the normalize phase; empty before
    /// normalization and for kinds that are not independently nameable.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bindings(&self) -> &[ItemBinding] {
        &self.bindings
    }

    /// The binding slot with the given key, if this kind declares one.
    pub fn binding(&self, key: BindingKey) -> Option<&ItemBinding> {
        self.bindings.iter().find(|b| b.key() == key)
    }

    pub(crate) fn binding_mut(&mut self, key: BindingKey) -> Option<&mut ItemBinding> {
        self.bindings.iter_mut().find(|b| b.key() == key)
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}
