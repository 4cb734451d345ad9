//! Typed accessors over the resolved graph.
//!
//! Structural queries return `None` rather than erroring when a link is
//! unresolved — a dangling referential constraint or an unmapped set is a
//! valid transient state while a document is being edited.

use super::artifact_set::ArtifactSet;
use super::binding::{BindingKey, ItemBinding};
use super::defaultable::{DefaultableValue, ParameterMode};
use super::node::{ElementKind, NodeId};
use super::schema::names;

impl ArtifactSet {
    /// Children of a node with the given kind, in document order.
    pub fn children_of_kind(&self, id: NodeId, kind: ElementKind) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|c| self.node(*c).kind == kind)
            .collect()
    }

    // ── Containers ──────────────────────────────────────────────────────

    pub fn entity_sets(&self, container: NodeId) -> Vec<NodeId> {
        self.children_of_kind(container, ElementKind::EntitySet)
    }

    pub fn association_sets(&self, container: NodeId) -> Vec<NodeId> {
        self.children_of_kind(container, ElementKind::AssociationSet)
    }

    pub fn function_imports(&self, container: NodeId) -> Vec<NodeId> {
        self.children_of_kind(container, ElementKind::FunctionImport)
    }

    /// The mapping element bound to this container, if any: the first
    /// EntityContainerMapping among the container's anti-dependencies.
    pub fn entity_container_mapping(&self, container: NodeId) -> Option<NodeId> {
        self.anti_dependencies_of_kind(container, ElementKind::EntityContainerMapping)
            .next()
    }

    // ── Association sets ────────────────────────────────────────────────

    pub fn association_set_ends(&self, set: NodeId) -> Vec<NodeId> {
        self.children_of_kind(set, ElementKind::AssociationSetEnd)
    }

    /// The end whose role matches the referential constraint's principal
    /// role. `None` whenever any link in the chain is unresolved — an
    /// incomplete constraint is not an error at this layer.
    pub fn principal_end(&self, set: NodeId) -> Option<NodeId> {
        self.constraint_end(set, ElementKind::PrincipalRole)
    }

    /// The end whose role matches the constraint's dependent role.
    pub fn dependent_end(&self, set: NodeId) -> Option<NodeId> {
        self.constraint_end(set, ElementKind::DependentRole)
    }

    fn constraint_end(&self, set: NodeId, role_kind: ElementKind) -> Option<NodeId> {
        let association = self
            .node(set)
            .binding(BindingKey::Association)
            .and_then(ItemBinding::target)?;
        let constraint = self
            .children_of_kind(association, ElementKind::ReferentialConstraint)
            .into_iter()
            .next()?;
        let role = self
            .children_of_kind(constraint, role_kind)
            .into_iter()
            .next()?;
        let role_target = self
            .node(role)
            .binding(BindingKey::Role)
            .and_then(ItemBinding::target)?;

        self.association_set_ends(set).into_iter().find(|end| {
            self.node(*end)
                .binding(BindingKey::Role)
                .and_then(ItemBinding::target)
                == Some(role_target)
        })
    }

    /// All association set mappings referring to this set, in registration
    /// order. A reference may be held by the mapping itself or by one of its
    /// children, so the parent is consulted before a source is discarded.
    pub fn association_set_mappings(&self, set: NodeId) -> Vec<NodeId> {
        let mut mappings = Vec::new();
        for dep in self.anti_dependencies(set) {
            let source = self.node(dep.source);
            let mapping = if source.kind == ElementKind::AssociationSetMapping {
                Some(dep.source)
            } else {
                source
                    .parent
                    .filter(|p| self.node(*p).kind == ElementKind::AssociationSetMapping)
            };
            if let Some(mapping) = mapping {
                if !mappings.contains(&mapping) {
                    mappings.push(mapping);
                }
            }
        }
        mappings
    }

    /// The first mapping referring to this set, if any.
    pub fn association_set_mapping(&self, set: NodeId) -> Option<NodeId> {
        self.association_set_mappings(set).into_iter().next()
    }

    // ── Entity types and functions ──────────────────────────────────────

    pub fn properties(&self, entity_type: NodeId) -> Vec<NodeId> {
        self.children_of_kind(entity_type, ElementKind::Property)
    }

    pub fn navigation_properties(&self, entity_type: NodeId) -> Vec<NodeId> {
        self.children_of_kind(entity_type, ElementKind::NavigationProperty)
    }

    /// Property refs of the entity type's Key element, in document order.
    pub fn key_property_refs(&self, entity_type: NodeId) -> Vec<NodeId> {
        self.children_of_kind(entity_type, ElementKind::Key)
            .into_iter()
            .next()
            .map(|key| self.children_of_kind(key, ElementKind::PropertyRef))
            .unwrap_or_default()
    }

    pub fn parameters(&self, function: NodeId) -> Vec<NodeId> {
        self.children_of_kind(function, ElementKind::Parameter)
    }

    /// The `Mode` of a parameter; `Unknown` when absent or unrecognized.
    pub fn parameter_mode(&self, parameter: NodeId) -> ParameterMode {
        let value = DefaultableValue::new(
            self.node(parameter).xml(),
            names::ATTR_MODE,
            ParameterMode::Unknown,
        );
        value.value(self.document_of(parameter))
    }

    // ── Mapping lookups ─────────────────────────────────────────────────

    /// The type mapping in a ResultMapping whose TypeName resolved to the
    /// given entity type.
    pub fn find_type_mapping(&self, result_mapping: NodeId, entity_type: NodeId) -> Option<NodeId> {
        self.children_of_kind(result_mapping, ElementKind::FunctionImportTypeMapping)
            .into_iter()
            .find(|tm| {
                self.node(*tm)
                    .binding(BindingKey::TypeName)
                    .and_then(ItemBinding::target)
                    == Some(entity_type)
            })
    }

    /// The QueryView child of a mapping element, if present.
    pub fn query_view(&self, mapping: NodeId) -> Option<NodeId> {
        self.children_of_kind(mapping, ElementKind::QueryView)
            .into_iter()
            .next()
    }

    /// The text body of a mapping element's QueryView.
    pub fn query_view_text(&self, mapping: NodeId) -> Option<String> {
        let view = self.query_view(mapping)?;
        let node = self.node(view);
        Some(self.document_of(view).text(node.xml()).to_owned())
    }

    // ── Documentation ───────────────────────────────────────────────────

    pub fn documentation(&self, id: NodeId) -> Option<NodeId> {
        self.children_of_kind(id, ElementKind::Documentation)
            .into_iter()
            .next()
    }

    /// Text of the documentation's Summary child.
    pub fn documentation_summary(&self, id: NodeId) -> Option<String> {
        self.documentation_text(id, names::ELEM_SUMMARY)
    }

    /// Text of the documentation's LongDescription child.
    pub fn documentation_long_description(&self, id: NodeId) -> Option<String> {
        self.documentation_text(id, names::ELEM_LONG_DESCRIPTION)
    }

    fn documentation_text(&self, id: NodeId, element: &str) -> Option<String> {
        let doc_node = self.documentation(id)?;
        let node = self.node(doc_node);
        let document = self.document_of(doc_node);
        document
            .children(node.xml())
            .iter()
            .find(|c| document.name(**c) == element)
            .map(|c| document.text(*c).to_owned())
    }

    // ── Presentation ────────────────────────────────────────────────────

    /// Host-facing display name. Mapping elements present the name of what
    /// they map plus their role; nameable elements present their name.
    pub fn display_name(&self, id: NodeId) -> String {
        let node = self.node(id);
        let raw_name = |attr: &str| self.attribute_raw(id, attr).unwrap_or_default().to_owned();
        match node.kind() {
            ElementKind::AssociationSetMapping => {
                format!("{} (AssociationSet)", raw_name(names::ATTR_NAME))
            }
            ElementKind::EntitySetMapping => {
                format!("{} (EntitySet)", raw_name(names::ATTR_NAME))
            }
            ElementKind::EntityTypeMapping => {
                format!("{} (EntityType)", raw_name(names::ATTR_TYPE_NAME))
            }
            ElementKind::FunctionImportMapping => {
                format!(
                    "{} (FunctionImport)",
                    raw_name(names::ATTR_FUNCTION_IMPORT_NAME)
                )
            }
            ElementKind::EntityContainerMapping => {
                format!("{} (EntityContainer)", raw_name(names::ATTR_CDM_ENTITY_CONTAINER))
            }
            kind => match self.name_raw(id) {
                Some(name) if !name.is_empty() => name.to_owned(),
                _ => kind.element_name().to_owned(),
            },
        }
    }

    /// Same shape as [`display_name`](Self::display_name) but guaranteed
    /// stable across host locales; used for logs and serialized output.
    pub fn non_localized_display_name(&self, id: NodeId) -> String {
        self.display_name(id)
    }

    // ── Attribute write-through ─────────────────────────────────────────

    /// Write an attribute on a node's backing element. This is the
    /// sanctioned mutation path for non-name attributes; use
    /// [`rename_node`](Self::rename_node) for names so symbols and bindings
    /// follow.
    pub fn set_node_attribute(&mut self, id: NodeId, attribute: &str, value: &str) {
        let xml = self.node(id).xml();
        self.document_of_mut(id).set_attribute(xml, attribute, value);
    }

    /// Remove an attribute from a node's backing element.
    pub fn clear_node_attribute(&mut self, id: NodeId, attribute: &str) {
        let xml = self.node(id).xml();
        self.document_of_mut(id).remove_attribute(xml, attribute);
    }
}
