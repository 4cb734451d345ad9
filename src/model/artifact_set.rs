//! The cross-document model graph owner.
//!
//! An [`ArtifactSet`] owns the node arena for every loaded document plus the
//! two indexes resolution lives on:
//!
//! - the **symbol index** (`Symbol → nodes declaring it`), built by the
//!   normalize phase and consulted by every rebind;
//! - the **anti-dependency index** (`node → bindings resolved to it`), kept
//!   in registration order and updated on every binding transition, so
//!   reverse queries never scan the graph.
//!
//! The pipeline contract is strict: parse every touched document completely,
//! then normalize every touched node, then resolve. Incremental edits
//! (delete/rename/add) re-run the affected slice of that pipeline instead of
//! re-parsing whole documents.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::artifact::{Artifact, detect_space};
use super::binding::{
    BindingItem, BindingKey, BindingStatus, ItemBinding, TargetKind, split_list_refs,
};
use super::diagnostics::{ModelError, Severity};
use super::node::{ArtifactId, ElementKind, ModelSpace, Node, NodeId};
use super::schema::{
    self, ChildArity, NameScope, expected_target_kind, expected_target_space, names, schema_for,
};
use super::state::ElementState;
use super::symbol::{Symbol, is_valid_simple_name, split_qualified};
use crate::core::error_codes;
use crate::xml::{InsertPosition, XmlDocument, XmlElementId, XmlError, parse_document_str};

/// One entry in the anti-dependency index: a binding on `source` currently
/// resolved to the indexed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AntiDependency {
    pub source: NodeId,
    pub key: BindingKey,
}

/// The set of loaded artifacts and the shared resolution indexes.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    nodes: Vec<Node>,
    artifacts: Vec<Artifact>,
    symbols: FxHashMap<Symbol, Vec<NodeId>>,
    anti_deps: FxHashMap<NodeId, Vec<AntiDependency>>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Add a document to the set. The document is not parsed into the graph
    /// until [`parse_artifact`](Self::parse_artifact) (or
    /// [`process_all`](Self::process_all)) runs.
    pub fn add_artifact(&mut self, document: XmlDocument, path: Option<PathBuf>) -> ArtifactId {
        let id = ArtifactId::new(self.artifacts.len());
        let space = detect_space(&document).unwrap_or(ModelSpace::Conceptual);
        self.artifacts.push(Artifact {
            id,
            path,
            space,
            document,
            root: None,
            errors: Default::default(),
        });
        id
    }

    /// Parse XML text and add it as an artifact.
    pub fn add_artifact_str(
        &mut self,
        content: &str,
        path: Option<PathBuf>,
    ) -> Result<ArtifactId, XmlError> {
        let document = parse_document_str(content)?;
        Ok(self.add_artifact(document, path))
    }

    /// Load an artifact from disk.
    pub fn add_artifact_file(&mut self, path: impl Into<PathBuf>) -> Result<ArtifactId, XmlError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        self.add_artifact_str(&content, Some(path))
    }

    /// Replace an artifact's document with new XML text and run the full
    /// local edit transaction: tear down the old tree, parse, normalize,
    /// resolve, then re-resolve every binding elsewhere that is no longer
    /// (or was not yet) Known. This is the document-changed entry point.
    pub fn reparse_artifact_str(
        &mut self,
        id: ArtifactId,
        content: &str,
    ) -> Result<(), XmlError> {
        let document = parse_document_str(content)?;
        let space = detect_space(&document).unwrap_or(self.artifacts[id.index()].space);
        self.parse_artifact_replacing(id, document, space);
        Ok(())
    }

    fn parse_artifact_replacing(
        &mut self,
        id: ArtifactId,
        document: XmlDocument,
        space: ModelSpace,
    ) {
        // Teardown must run against the old tree before the old document's
        // element ids go away with it.
        if let Some(old_root) = self.artifacts[id.index()].root {
            self.teardown_subtree(old_root);
            self.artifacts[id.index()].root = None;
        }
        self.artifacts[id.index()].document = document;
        self.artifacts[id.index()].space = space;

        self.parse_artifact(id);
        self.normalize_artifact(id);
        self.resolve_artifact(id);

        // Bindings in other artifacts that dangled (or began dangling when
        // the old tree went down) get one local re-resolution.
        let stale: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId::new)
            .filter(|n| {
                let node = self.node(*n);
                node.is_alive()
                    && node.artifact != id
                    && node
                        .bindings
                        .iter()
                        .any(|b| b.status() != BindingStatus::Known)
            })
            .collect();
        for node in stale {
            self.resolve_node(node);
        }
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn artifact(&self, id: ArtifactId) -> &Artifact {
        &self.artifacts[id.index()]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// The backing document of a node's artifact.
    pub fn document_of(&self, id: NodeId) -> &XmlDocument {
        &self.artifacts[self.node(id).artifact.index()].document
    }

    pub(crate) fn document_of_mut(&mut self, id: NodeId) -> &mut XmlDocument {
        let artifact = self.node(id).artifact;
        &mut self.artifacts[artifact.index()].document
    }

    /// Raw text of an attribute on a node's backing element.
    pub fn attribute_raw(&self, id: NodeId, attribute: &str) -> Option<&str> {
        let node = self.node(id);
        self.artifacts[node.artifact.index()]
            .document
            .attribute(node.xml, attribute)
    }

    /// Raw value of the node's name attribute, if its kind has one.
    pub fn name_raw(&self, id: NodeId) -> Option<&str> {
        let attr = schema_for(self.node(id).kind).name_attribute?;
        self.attribute_raw(id, attr)
    }

    /// All live nodes declaring the given symbol.
    pub fn lookup_symbol(&self, symbol: &Symbol) -> &[NodeId] {
        self.symbols
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All errors across all artifacts.
    pub fn errors(&self) -> impl Iterator<Item = &ModelError> {
        self.artifacts.iter().flat_map(|a| a.errors.all())
    }

    /// Nodes holding a binding currently resolved to `target`, in binding
    /// registration order. Consumers rely on this order being exactly the
    /// order registrations happened in; it is never re-sorted.
    pub fn anti_dependencies(&self, target: NodeId) -> &[AntiDependency] {
        self.anti_deps
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Anti-dependency sources of a given kind, registration order preserved.
    pub fn anti_dependencies_of_kind(
        &self,
        target: NodeId,
        kind: ElementKind,
    ) -> impl Iterator<Item = NodeId> {
        self.anti_dependencies(target)
            .iter()
            .filter(move |d| self.node(d.source).kind == kind)
            .map(|d| d.source)
    }

    // ========================================================================
    // PIPELINE
    // ========================================================================

    /// Run the full pipeline over every artifact: parse all documents, then
    /// normalize all nodes, then resolve — schema spaces before mapping, so
    /// every declaration is indexed before any mapping reference rebinds.
    pub fn process_all(&mut self) {
        let ids: Vec<ArtifactId> = self.artifacts.iter().map(|a| a.id).collect();
        for id in &ids {
            self.parse_artifact(*id);
        }
        for id in &ids {
            self.normalize_artifact(*id);
        }
        for space in [ModelSpace::Conceptual, ModelSpace::Storage, ModelSpace::Mapping] {
            for id in &ids {
                if self.artifacts[id.index()].space == space {
                    self.resolve_artifact(*id);
                }
            }
        }
    }

    /// Parse one artifact's document into graph nodes. Re-parsing an already
    /// parsed artifact first tears down its previous tree (the pre-parse
    /// reset), so this is also the re-entry point after an external edit to
    /// the backing XML.
    pub fn parse_artifact(&mut self, id: ArtifactId) {
        debug!("parse artifact {:?}", id);
        if let Some(old_root) = self.artifacts[id.index()].root {
            self.teardown_subtree(old_root);
            self.artifacts[id.index()].root = None;
        }
        self.artifacts[id.index()].errors.clear();

        let Some(root_xml) = self.artifacts[id.index()].document.root() else {
            return;
        };
        let root_name = self.artifacts[id.index()]
            .document
            .name(root_xml)
            .to_owned();
        let Some(root_kind) = schema::root_kind(&root_name) else {
            self.artifacts[id.index()].errors.add(ModelError::error(
                None,
                format!("unrecognized root element '{root_name}'"),
                error_codes::UNRECOGNIZED_ROOT_ELEMENT,
            ));
            return;
        };

        let root = self.create_node(id, None, root_xml, root_kind);
        self.artifacts[id.index()].root = Some(root);
        self.parse_node(root);
    }

    /// Allocate a node with its full set of binding slots.
    fn create_node(
        &mut self,
        artifact: ArtifactId,
        parent: Option<NodeId>,
        xml: XmlElementId,
        kind: ElementKind,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let bindings = schema_for(kind)
            .bindings
            .iter()
            .map(ItemBinding::from_spec)
            .collect();
        self.nodes.push(Node {
            artifact,
            parent,
            xml,
            kind,
            state: ElementState::Unparsed,
            symbol: Symbol::empty(),
            bindings,
            children: Vec::new(),
        });
        id
    }

    /// Parse one node: check attributes, materialize children, recurse.
    /// Schema violations are recorded and parsing continues with siblings.
    fn parse_node(&mut self, id: NodeId) {
        let node = self.node(id);
        debug_assert!(
            !node.state.is_parsed(),
            "parse on an already-parsed node without a pre-parse reset"
        );
        let kind = node.kind;
        let artifact = node.artifact;
        let xml = node.xml;
        self.node_mut(id).state = ElementState::Parsing;

        let element_schema = schema_for(kind);
        let recognized_attrs = element_schema.attribute_names();

        // Attribute pass: collect first, report after, to keep the borrow on
        // the document short.
        let doc = &self.artifacts[artifact.index()].document;
        let mut attr_errors: Vec<String> = Vec::new();
        for (attr_name, _) in &doc.element(xml).attributes {
            if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                continue;
            }
            if !recognized_attrs.iter().any(|a| *a == attr_name.as_str()) {
                attr_errors.push(attr_name.to_string());
            }
        }
        let malformed_name = match element_schema.name_attribute {
            Some(attr) if kind != ElementKind::Schema => doc
                .attribute(xml, attr)
                .filter(|raw| !is_valid_simple_name(raw))
                .map(str::to_owned),
            _ => None,
        };
        let children: Vec<(XmlElementId, String)> = doc
            .children(xml)
            .iter()
            .map(|c| (*c, doc.name(*c).to_owned()))
            .collect();

        for attr in attr_errors {
            self.artifacts[artifact.index()].errors.add(ModelError::error(
                Some(id),
                format!("unrecognized attribute '{attr}' on '{}'", kind.element_name()),
                error_codes::UNRECOGNIZED_ATTRIBUTE,
            ));
        }
        if let Some(raw) = malformed_name {
            self.artifacts[artifact.index()].errors.add(ModelError::warning(
                Some(id),
                format!("'{raw}' is not a valid name"),
                error_codes::MALFORMED_NAME,
            ));
        }

        for (child_xml, child_name) in children {
            if element_schema
                .text_children
                .iter()
                .any(|t| *t == child_name)
            {
                continue;
            }
            let Some(child_spec) = element_schema.child(&child_name) else {
                self.artifacts[artifact.index()].errors.add(ModelError::error(
                    Some(id),
                    format!(
                        "unrecognized element '{child_name}' under '{}'",
                        kind.element_name()
                    ),
                    error_codes::UNRECOGNIZED_ELEMENT,
                ));
                continue;
            };

            if child_spec.arity == ChildArity::One {
                let already = self
                    .node(id)
                    .children
                    .iter()
                    .any(|c| self.node(*c).kind == child_spec.kind);
                if already {
                    // First occurrence wins; the extra element stays in the
                    // document but gets no node.
                    let (message, code) = if child_spec.kind == ElementKind::Documentation {
                        (
                            "more than one Documentation element".to_owned(),
                            error_codes::TOO_MANY_DOCUMENTATION_ELEMENTS,
                        )
                    } else {
                        (
                            format!("more than one '{child_name}' element"),
                            error_codes::DUPLICATE_CHILD_ELEMENT,
                        )
                    };
                    self.artifacts[artifact.index()]
                        .errors
                        .add(ModelError::error(Some(id), message, code));
                    continue;
                }
            }

            let child = self.create_node(artifact, Some(id), child_xml, child_spec.kind);
            self.node_mut(id).children.push(child);
            self.parse_node(child);
        }

        self.node_mut(id).state = ElementState::Parsed;
    }

    /// Compute symbols for every node of an artifact, parents before
    /// children (parent-qualified scopes depend on it).
    pub fn normalize_artifact(&mut self, id: ArtifactId) {
        debug!("normalize artifact {:?}", id);
        if let Some(root) = self.artifacts[id.index()].root {
            for node in self.subtree(root) {
                self.normalize_node(node);
            }
        }
    }

    fn normalize_node(&mut self, id: NodeId) {
        debug_assert!(self.node(id).state.is_parsed(), "normalize requires Parsed");
        let symbol = self.declaration_symbol(id);
        self.replace_symbol(id, symbol);
        if self.node(id).state.is_alive() {
            self.node_mut(id).state = ElementState::Normalized;
        }
    }

    /// The canonical symbol of a declaration, per its kind's name scope.
    fn declaration_symbol(&self, id: NodeId) -> Symbol {
        let node = self.node(id);
        let element_schema = schema_for(node.kind);
        let Some(name_attr) = element_schema.name_attribute else {
            return Symbol::empty();
        };
        let raw = self.attribute_raw(id, name_attr).unwrap_or_default();
        match element_schema.name_scope {
            NameScope::None => Symbol::empty(),
            NameScope::Bare => Symbol::bare(raw),
            NameScope::Container => match self.enclosing_container_name(id) {
                Some(container) => Symbol::from_parts([container, raw.to_string()]),
                None => Symbol::empty(),
            },
            NameScope::Namespace => match self.schema_namespace(node.artifact) {
                Some(ns) => Symbol::from_parts([ns.as_str(), raw]),
                None => Symbol::empty(),
            },
            NameScope::ParentQualified => match node.parent {
                Some(parent) => self.node(parent).symbol.join(raw),
                None => Symbol::empty(),
            },
        }
    }

    /// Swap a node's indexed symbol, keeping the symbol index consistent.
    fn replace_symbol(&mut self, id: NodeId, symbol: Symbol) {
        let old = self.node(id).symbol.clone();
        if old == symbol {
            return;
        }
        if !old.is_empty() {
            if let Some(bucket) = self.symbols.get_mut(&old) {
                bucket.retain(|n| *n != id);
                if bucket.is_empty() {
                    self.symbols.remove(&old);
                }
            }
        }
        if !symbol.is_empty() {
            trace!("index symbol {} -> {:?}", symbol, id);
            self.symbols.entry(symbol.clone()).or_default().push(id);
        }
        self.node_mut(id).symbol = symbol;
    }

    /// Resolve every node of an artifact, parents before children — the
    /// chained normalizers (column and end-property references) rely on the
    /// ancestor's bindings being rebound first.
    pub fn resolve_artifact(&mut self, id: ArtifactId) {
        debug!("resolve artifact {:?}", id);
        if let Some(root) = self.artifacts[id.index()].root {
            for node in self.subtree(root) {
                self.resolve_node(node);
            }
        }
    }

    /// Rebind every binding the node owns, then derive its terminal state:
    /// Resolved iff every required binding is Known. Binding failures are
    /// collected, never thrown; sibling resolution is unaffected.
    pub fn resolve_node(&mut self, id: NodeId) {
        let node = self.node(id);
        if !node.state.is_alive() {
            return;
        }
        debug_assert!(node.state.is_parsed(), "resolve requires a parsed node");
        let artifact = node.artifact;
        let binding_count = node.bindings.len();
        self.node_mut(id).state = ElementState::Resolving;

        // Stale binding errors from a previous pass would otherwise pile up.
        self.artifacts[artifact.index()].errors.retain_nodes_and_codes(
            id,
            &[
                error_codes::UNRESOLVED_REFERENCE,
                error_codes::AMBIGUOUS_REFERENCE,
            ],
        );

        let mut all_required_known = true;
        for index in 0..binding_count {
            self.rebind(id, index);
            let binding = &self.node(id).bindings[index];
            if binding.is_required() && binding.status() != BindingStatus::Known {
                all_required_known = false;
            }
            if binding.status() == BindingStatus::Undefined {
                let attribute = binding.attribute_name();
                let raw = binding.ref_name().map(str::to_owned);
                let (message, code, severity) = if binding.is_ambiguous() {
                    (
                        format!(
                            "'{}' is ambiguous for attribute '{attribute}'",
                            raw.as_deref().unwrap_or_default()
                        ),
                        error_codes::AMBIGUOUS_REFERENCE,
                        Severity::Error,
                    )
                } else if let Some(raw) = raw {
                    (
                        format!("'{raw}' does not resolve for attribute '{attribute}'"),
                        error_codes::UNRESOLVED_REFERENCE,
                        Severity::Error,
                    )
                } else {
                    // Missing attribute text: only worth surfacing when the
                    // binding gates resolution.
                    (
                        format!("attribute '{attribute}' is missing"),
                        error_codes::UNRESOLVED_REFERENCE,
                        Severity::Warning,
                    )
                };
                if self.node(id).bindings[index].is_required() || severity == Severity::Error {
                    self.artifacts[artifact.index()].errors.add(ModelError {
                        node: Some(id),
                        severity,
                        message,
                        code,
                    });
                }
            }
        }

        self.node_mut(id).state = if all_required_known {
            ElementState::Resolved
        } else {
            ElementState::Unresolved
        };
    }

    /// Re-run one binding against the current name index, updating the
    /// anti-dependency index on every status transition.
    fn rebind(&mut self, id: NodeId, binding_index: usize) {
        let node = self.node(id);
        let binding = &node.bindings[binding_index];
        let key = binding.key();
        let target_kind = binding.target_kind();
        let multi = binding.is_multi();
        let attribute = binding.attribute_name();
        let old_targets: Vec<NodeId> = binding.targets().collect();

        let raw = self.attribute_raw(id, attribute).map(str::to_owned);
        let mut items = Vec::new();
        if let Some(raw) = raw {
            let refs: Vec<&str> = if multi {
                split_list_refs(&raw)
            } else {
                vec![raw.trim()]
            };
            for item_raw in refs {
                items.push(self.resolve_reference(id, target_kind, item_raw));
            }
        }
        trace!(
            "rebind {:?}/{:?}: {} item(s)",
            id,
            key,
            items.len()
        );

        // Registration diff: drop entries for targets the binding left,
        // append entries for targets it newly reached.
        let new_targets: Vec<NodeId> = items.iter().filter_map(|i| i.target).collect();
        for old in &old_targets {
            if !new_targets.contains(old) {
                self.unregister_anti_dependency(*old, id, key);
            }
        }
        for new in &new_targets {
            if !old_targets.contains(new) {
                self.register_anti_dependency(*new, id, key);
            }
        }

        self.node_mut(id).bindings[binding_index].install(items);
    }

    /// Resolve one reference name: normalize to a symbol, look up candidates
    /// of the expected kind and space, apply the ambiguity policy.
    fn resolve_reference(&self, source: NodeId, target: TargetKind, raw: &str) -> BindingItem {
        let mut item = BindingItem {
            raw: raw.into(),
            symbol: Symbol::empty(),
            status: BindingStatus::Undefined,
            ambiguous: false,
            target: None,
        };
        if raw.is_empty() {
            return item;
        }
        item.symbol = self.normalize_reference(source, target, raw);
        if item.symbol.is_empty() {
            return item;
        }

        let kind = expected_target_kind(target);
        let space = expected_target_space(target, self.artifact(self.node(source).artifact).space);
        let candidates: Vec<NodeId> = self
            .lookup_symbol(&item.symbol)
            .iter()
            .copied()
            .filter(|n| {
                let node = self.node(*n);
                node.is_alive()
                    && node.kind == kind
                    && self.artifact(node.artifact).space == space
            })
            .collect();

        match candidates.as_slice() {
            [] => {
                trace!("dangling reference '{}' ({})", raw, item.symbol);
            }
            [single] => {
                item.status = BindingStatus::Known;
                item.target = Some(*single);
            }
            _ => {
                // Ambiguous names stay unresolved; taking the first match
                // would make the outcome depend on declaration order.
                trace!("ambiguous reference '{}' ({})", raw, item.symbol);
                item.ambiguous = true;
            }
        }
        item
    }

    fn register_anti_dependency(&mut self, target: NodeId, source: NodeId, key: BindingKey) {
        let entry = AntiDependency { source, key };
        let bucket = self.anti_deps.entry(target).or_default();
        if !bucket.contains(&entry) {
            trace!("anti-dep {:?} <- {:?}/{:?}", target, source, key);
            bucket.push(entry);
        }
    }

    fn unregister_anti_dependency(&mut self, target: NodeId, source: NodeId, key: BindingKey) {
        if let Some(bucket) = self.anti_deps.get_mut(&target) {
            bucket.retain(|d| !(d.source == source && d.key == key));
            if bucket.is_empty() {
                self.anti_deps.remove(&target);
            }
        }
    }

    // ========================================================================
    // REFERENCE NORMALIZATION
    // ========================================================================

    /// Normalize raw reference text into the symbol its declaration would
    /// carry. Total: anything that cannot be scoped yields the empty symbol.
    fn normalize_reference(&self, source: NodeId, target: TargetKind, raw: &str) -> Symbol {
        match target {
            TargetKind::ConceptualContainer | TargetKind::StorageContainer => Symbol::bare(raw),

            TargetKind::Association | TargetKind::EntityType | TargetKind::Function => {
                self.qualified_type_symbol(source, raw)
            }

            // Same-space set reference from a schema document: scoped by the
            // declaring container.
            TargetKind::EntitySet => match self.enclosing_container_name(source) {
                Some(container) => Symbol::from_parts([container, raw.to_owned()]),
                None => Symbol::empty(),
            },

            TargetKind::ConceptualEntitySet
            | TargetKind::AssociationSet
            | TargetKind::FunctionImport => {
                match self.mapping_container_raw(source, names::ATTR_CDM_ENTITY_CONTAINER) {
                    Some(container) => Symbol::from_parts([container, raw.to_owned()]),
                    None => Symbol::empty(),
                }
            }

            TargetKind::StorageEntitySet => {
                match self.mapping_container_raw(source, names::ATTR_STORAGE_ENTITY_CONTAINER) {
                    Some(container) => Symbol::from_parts([container, raw.to_owned()]),
                    None => Symbol::empty(),
                }
            }

            TargetKind::AssociationEnd => self.role_symbol(source, raw),

            TargetKind::AssociationSetEnd => {
                // EndProperty.Name: role within the association set named by
                // the owning AssociationSetMapping.
                let asm = self.ancestor_of_kind(source, ElementKind::AssociationSetMapping);
                let set_name = asm.and_then(|n| self.attribute_raw(n, names::ATTR_NAME));
                let container =
                    self.mapping_container_raw(source, names::ATTR_CDM_ENTITY_CONTAINER);
                match (container, set_name) {
                    (Some(container), Some(set)) => {
                        Symbol::from_parts([container, set.to_owned(), raw.to_owned()])
                    }
                    _ => Symbol::empty(),
                }
            }

            TargetKind::Property => self.property_symbol(source, raw),

            TargetKind::StorageProperty => self.column_symbol(source, raw),
        }
    }

    /// `[namespace, name]` for type-level references. Dot-qualified raw text
    /// splits as written; bare names qualify with the declaring schema's
    /// namespace — mapping documents must reference types fully qualified.
    fn qualified_type_symbol(&self, source: NodeId, raw: &str) -> Symbol {
        match split_qualified(raw) {
            (Some(ns), name) => Symbol::from_parts([ns, name]),
            (None, name) => {
                let artifact = self.artifact(self.node(source).artifact);
                if artifact.space == ModelSpace::Mapping {
                    return Symbol::empty();
                }
                match self.schema_namespace(artifact.id) {
                    Some(ns) => Symbol::from_parts([ns.as_str(), name]),
                    None => Symbol::empty(),
                }
            }
        }
    }

    /// Role references resolve within the association named by the source's
    /// context: the owning set's `Association`, the constraint's declaring
    /// association, or the navigation property's `Relationship`.
    fn role_symbol(&self, source: NodeId, raw: &str) -> Symbol {
        let node = self.node(source);
        match node.kind {
            ElementKind::AssociationSetEnd => {
                let set = match node.parent {
                    Some(parent) => parent,
                    None => return Symbol::empty(),
                };
                match self.attribute_raw(set, names::ATTR_ASSOCIATION) {
                    Some(assoc_raw) => self.qualified_type_symbol(set, assoc_raw).join(raw),
                    None => Symbol::empty(),
                }
            }
            ElementKind::PrincipalRole | ElementKind::DependentRole => {
                match self.ancestor_of_kind(source, ElementKind::Association) {
                    Some(assoc) => self.node(assoc).symbol.join(raw),
                    None => Symbol::empty(),
                }
            }
            ElementKind::NavigationProperty => {
                match self.attribute_raw(source, names::ATTR_RELATIONSHIP) {
                    Some(rel_raw) => self.qualified_type_symbol(source, rel_raw).join(raw),
                    None => Symbol::empty(),
                }
            }
            _ => Symbol::empty(),
        }
    }

    /// Conceptual property references. Key refs scope to the declaring
    /// entity type; constraint refs and end-property scalars scope through
    /// the resolved target chain — Undefined while the chain is incomplete.
    fn property_symbol(&self, source: NodeId, raw: &str) -> Symbol {
        let node = self.node(source);
        let Some(parent) = node.parent else {
            return Symbol::empty();
        };
        match (node.kind, self.node(parent).kind) {
            (ElementKind::PropertyRef, ElementKind::Key) => {
                match self.ancestor_of_kind(source, ElementKind::EntityType) {
                    Some(entity_type) => self.node(entity_type).symbol.join(raw),
                    None => Symbol::empty(),
                }
            }
            (
                ElementKind::PropertyRef,
                ElementKind::PrincipalRole | ElementKind::DependentRole,
            ) => {
                let end = self
                    .node(parent)
                    .binding(BindingKey::Role)
                    .and_then(ItemBinding::target);
                self.end_type_symbol(end).join(raw)
            }
            (ElementKind::ScalarProperty, ElementKind::MappingFragment) => {
                let type_mapping = self.node(parent).parent;
                let type_raw = type_mapping
                    .and_then(|tm| self.attribute_raw(tm, names::ATTR_TYPE_NAME))
                    .map(|r| split_list_refs(r).first().copied().unwrap_or("").to_owned());
                match type_raw {
                    Some(type_raw) if !type_raw.is_empty() => match split_qualified(&type_raw) {
                        (Some(ns), name) => Symbol::from_parts([ns, name]).join(raw),
                        (None, _) => Symbol::empty(),
                    },
                    _ => Symbol::empty(),
                }
            }
            (ElementKind::ScalarProperty, ElementKind::EndProperty) => {
                let set_end = self
                    .node(parent)
                    .binding(BindingKey::Name)
                    .and_then(ItemBinding::target);
                let entity_set = set_end.and_then(|e| {
                    self.node(e)
                        .binding(BindingKey::EntitySet)
                        .and_then(ItemBinding::target)
                });
                let entity_type = entity_set.and_then(|s| {
                    self.node(s)
                        .binding(BindingKey::EntityType)
                        .and_then(ItemBinding::target)
                });
                match entity_type {
                    Some(t) => self.node(t).symbol.join(raw),
                    None => Symbol::empty(),
                }
            }
            _ => Symbol::empty(),
        }
    }

    /// Column references: scoped by the store entity set of the nearest
    /// ancestor that declares one, through its resolved entity type.
    fn column_symbol(&self, source: NodeId, raw: &str) -> Symbol {
        let mut current = self.node(source).parent;
        while let Some(id) = current {
            if let Some(store_set) = self
                .node(id)
                .binding(BindingKey::StoreEntitySet)
                .and_then(ItemBinding::target)
            {
                let entity_type = self
                    .node(store_set)
                    .binding(BindingKey::EntityType)
                    .and_then(ItemBinding::target);
                return match entity_type {
                    Some(t) => self.node(t).symbol.join(raw),
                    None => Symbol::empty(),
                };
            }
            current = self.node(id).parent;
        }
        Symbol::empty()
    }

    /// Symbol of the entity type at an association end, through its resolved
    /// `Type` binding.
    fn end_type_symbol(&self, end: Option<NodeId>) -> Symbol {
        let entity_type = end.and_then(|e| {
            self.node(e)
                .binding(BindingKey::Type)
                .and_then(ItemBinding::target)
        });
        match entity_type {
            Some(t) => self.node(t).symbol.clone(),
            None => Symbol::empty(),
        }
    }

    // ========================================================================
    // SCOPE HELPERS
    // ========================================================================

    /// The `Namespace` attribute of an artifact's schema root.
    fn schema_namespace(&self, artifact: ArtifactId) -> Option<String> {
        let artifact = self.artifact(artifact);
        let root = artifact.document.root()?;
        artifact
            .document
            .attribute(root, names::ATTR_NAMESPACE)
            .map(str::to_owned)
    }

    /// Name of the nearest ancestor EntityContainer.
    fn enclosing_container_name(&self, id: NodeId) -> Option<String> {
        let container = self.ancestor_of_kind(id, ElementKind::EntityContainer)?;
        self.attribute_raw(container, names::ATTR_NAME)
            .map(str::to_owned)
    }

    /// Raw container attribute of the enclosing EntityContainerMapping.
    fn mapping_container_raw(&self, id: NodeId, attribute: &str) -> Option<String> {
        let ecm = self.self_or_ancestor_of_kind(id, ElementKind::EntityContainerMapping)?;
        self.attribute_raw(ecm, attribute).map(str::to_owned)
    }

    pub(crate) fn ancestor_of_kind(&self, id: NodeId, kind: ElementKind) -> Option<NodeId> {
        let mut current = self.node(id).parent;
        while let Some(node) = current {
            if self.node(node).kind == kind {
                return Some(node);
            }
            current = self.node(node).parent;
        }
        None
    }

    fn self_or_ancestor_of_kind(&self, id: NodeId, kind: ElementKind) -> Option<NodeId> {
        if self.node(id).kind == kind {
            Some(id)
        } else {
            self.ancestor_of_kind(id, kind)
        }
    }

    /// Pre-order traversal of a live subtree.
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.node(id).is_alive() {
                continue;
            }
            out.push(id);
            for child in self.node(id).children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    // ========================================================================
    // INCREMENTAL EDITS
    // ========================================================================

    /// Delete a node: cascade to children, unhook every binding into and out
    /// of the subtree, remove the backing XML, and re-derive the resolution
    /// state of the nodes that pointed at it.
    pub fn delete_node(&mut self, id: NodeId) {
        debug!("delete {:?}", id);
        let parent = self.node(id).parent;
        let xml = self.node(id).xml;

        let affected_sources = self.teardown_subtree(id);

        if let Some(parent) = parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        let artifact = self.node(id).artifact;
        if self.artifacts[artifact.index()].root == Some(id) {
            self.artifacts[artifact.index()].root = None;
        }
        self.artifacts[artifact.index()].document.remove_element(xml);

        // Nodes that lost a target re-derive their state (and their binding
        // errors) now rather than at the next full resolve.
        for source in affected_sources {
            if self.node(source).is_alive() {
                self.resolve_node(source);
            }
        }
    }

    /// Tear down a subtree's participation in the indexes: symbols out,
    /// owned registrations out, inbound bindings flipped to Undefined.
    /// Returns the sources whose bindings lost a target, subtree excluded.
    fn teardown_subtree(&mut self, root: NodeId) -> Vec<NodeId> {
        let members = self.subtree(root);
        let mut affected: Vec<NodeId> = Vec::new();

        for id in &members {
            self.replace_symbol(*id, Symbol::empty());

            // Outbound: drop this node's registrations on its targets.
            let owned: Vec<(NodeId, BindingKey)> = self
                .node(*id)
                .bindings
                .iter()
                .flat_map(|b| {
                    let key = b.key();
                    b.targets().map(move |t| (t, key)).collect::<Vec<_>>()
                })
                .collect();
            for (target, key) in owned {
                self.unregister_anti_dependency(target, *id, key);
            }

            // Inbound: flip every binding resolved to this node.
            let inbound = self.anti_deps.remove(id).unwrap_or_default();
            for dep in inbound {
                if members.contains(&dep.source) {
                    continue;
                }
                if let Some(binding) = self.node_mut(dep.source).binding_mut(dep.key) {
                    let mut items = binding.items().to_vec();
                    for item in &mut items {
                        if item.target == Some(*id) {
                            item.target = None;
                            item.status = BindingStatus::Undefined;
                        }
                    }
                    binding.install(items);
                }
                if !affected.contains(&dep.source) {
                    affected.push(dep.source);
                }
            }
        }

        let artifact = self.node(root).artifact;
        self.artifacts[artifact.index()]
            .errors
            .retain_nodes(|n| !members.contains(&n));
        for id in &members {
            self.node_mut(*id).state = ElementState::Deleted;
            self.node_mut(*id).bindings.iter_mut().for_each(|b| b.reset());
        }
        affected
    }

    /// Rename a node through its name attribute, renormalize the subtree
    /// (descendant symbols embed ancestor names), and re-resolve everything
    /// the change can affect: previous dependents of the subtree and every
    /// binding that was not Known.
    pub fn rename_node(&mut self, id: NodeId, new_name: &str) {
        let Some(name_attr) = schema_for(self.node(id).kind).name_attribute else {
            debug_assert!(false, "rename on a kind without a name attribute");
            return;
        };
        debug!("rename {:?} -> '{}'", id, new_name);

        let xml = self.node(id).xml;
        self.document_of_mut(id).set_attribute(xml, name_attr, new_name);

        let members = self.subtree(id);
        let mut to_resolve: Vec<NodeId> = Vec::new();
        for member in &members {
            for dep in self.anti_dependencies(*member) {
                if !to_resolve.contains(&dep.source) && !members.contains(&dep.source) {
                    to_resolve.push(dep.source);
                }
            }
        }
        for member in &members {
            let symbol = self.declaration_symbol(*member);
            self.replace_symbol(*member, symbol);
        }

        // Dangling references anywhere in the set may now resolve against
        // the new name.
        for candidate in 0..self.nodes.len() {
            let candidate = NodeId::new(candidate);
            let node = self.node(candidate);
            if !node.is_alive() || members.contains(&candidate) {
                continue;
            }
            if node
                .bindings
                .iter()
                .any(|b| b.status() != BindingStatus::Known)
                && !to_resolve.contains(&candidate)
            {
                to_resolve.push(candidate);
            }
        }

        for member in members {
            if self.node(member).state.is_parsed() {
                self.resolve_node(member);
            }
        }
        for source in to_resolve {
            self.resolve_node(source);
        }
    }

    /// Create a new child element under a parsed parent, at the position the
    /// parent's schema prescribes, and run it through the pipeline. Returns
    /// `None` if the parent's schema does not admit the element (or admits
    /// only one and it already exists).
    pub fn add_element(&mut self, parent: NodeId, element_name: &str) -> Option<NodeId> {
        let parent_kind = self.node(parent).kind;
        let parent_schema = schema_for(parent_kind);
        let spec = parent_schema.child(element_name)?;
        if spec.arity == ChildArity::One
            && self
                .node(parent)
                .children
                .iter()
                .any(|c| self.node(*c).kind == spec.kind)
        {
            return None;
        }

        let (anchor, before) = self.insert_position_for(parent, element_name);
        let position = match (anchor, before) {
            (Some(anchor), true) => InsertPosition::Before(anchor),
            (Some(anchor), false) => InsertPosition::After(anchor),
            (None, _) => InsertPosition::Last,
        };

        let parent_xml = self.node(parent).xml;
        let artifact = self.node(parent).artifact;
        let doc = &mut self.artifacts[artifact.index()].document;
        let xml = doc.create_element(element_name);
        doc.insert_child(parent_xml, xml, position);

        let id = self.create_node(artifact, Some(parent), xml, spec.kind);
        self.node_mut(parent).children.push(id);
        self.parse_node(id);
        self.normalize_node(id);
        self.resolve_node(id);
        Some(id)
    }

    /// Where a new child element should be serialized: the sibling to anchor
    /// on and whether to insert before it. `(None, _)` means append.
    pub fn insert_position_for(
        &self,
        parent: NodeId,
        child_element: &str,
    ) -> (Option<XmlElementId>, bool) {
        let parent_schema = schema_for(self.node(parent).kind);
        let doc = &self.artifacts[self.node(parent).artifact.index()].document;
        let first_child = doc.children(self.node(parent).xml).first().copied();
        if parent_schema.inserts_first(child_element) {
            (first_child, true)
        } else {
            (None, false)
        }
    }

    // ========================================================================
    // CONFORMANCE
    // ========================================================================

    /// Re-check an artifact's backing document against the declared schemas.
    ///
    /// The parse phase performs these checks as it goes; this validator runs
    /// them on demand against the *current* document state, after any number
    /// of in-place edits.
    pub fn validate_conformance(&self, artifact: ArtifactId) -> Vec<ModelError> {
        let mut out = Vec::new();
        let Some(root) = self.artifacts[artifact.index()].root else {
            return out;
        };
        let doc = &self.artifacts[artifact.index()].document;
        for id in self.subtree(root) {
            let node = self.node(id);
            let element_schema = schema_for(node.kind);
            let attrs = element_schema.attribute_names();
            for (attr_name, _) in &doc.element(node.xml).attributes {
                if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                    continue;
                }
                if !attrs.iter().any(|a| *a == attr_name.as_str()) {
                    out.push(ModelError::error(
                        Some(id),
                        format!(
                            "unrecognized attribute '{attr_name}' on '{}'",
                            node.kind.element_name()
                        ),
                        error_codes::UNRECOGNIZED_ATTRIBUTE,
                    ));
                }
            }
            let child_names = element_schema.child_element_names();
            for child in doc.children(node.xml) {
                let name = doc.name(*child);
                if !child_names.iter().any(|c| *c == name) {
                    out.push(ModelError::error(
                        Some(id),
                        format!(
                            "unrecognized element '{name}' under '{}'",
                            node.kind.element_name()
                        ),
                        error_codes::UNRECOGNIZED_ELEMENT,
                    ));
                }
            }
        }
        out
    }
}
