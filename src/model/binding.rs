//! Lazily-resolved named references between graph nodes.
//!
//! An [`ItemBinding`] is owned by its source node and records where a
//! reference attribute currently points. Resolution is symbolic: the raw
//! attribute text is normalized to a [`Symbol`](super::symbol::Symbol) and
//! looked up in the artifact set's name index when
//! [`ArtifactSet::rebind`](super::artifact_set::ArtifactSet) runs. The
//! binding never owns its target — it is a relation plus a lookup, with no
//! lifetime implication.
//!
//! List bindings generalize this to a `;`-separated sequence of names, each
//! item resolved under the same policy.

use smol_str::SmolStr;

use super::node::NodeId;
use super::symbol::Symbol;

/// Resolution state of a binding.
///
/// `Known` implies a live target in the owning artifact set; anything else
/// implies no target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindingStatus {
    /// Not yet rebound (or reset since).
    #[default]
    Unknown,
    /// Resolved to exactly one live node.
    Known,
    /// No raw text, no matching declaration, or an ambiguous match.
    Undefined,
}

/// Identifies one binding slot on a node. Names follow the attribute
/// vocabulary of the schema families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKey {
    /// `Association` on AssociationSet.
    Association,
    /// `Role` on AssociationSetEnd and referential-constraint roles.
    Role,
    /// `EntitySet` on AssociationSetEnd and FunctionImport.
    EntitySet,
    /// `EntityType` on EntitySet.
    EntityType,
    /// `Type` on association End.
    Type,
    /// `Relationship` on NavigationProperty.
    Relationship,
    /// `FromRole` on NavigationProperty.
    FromRole,
    /// `ToRole` on NavigationProperty.
    ToRole,
    /// `Name` used as a reference (mapping elements, PropertyRef).
    Name,
    /// `TypeName` on type mappings.
    TypeName,
    /// `StoreEntitySet` on mapping fragments and association set mappings.
    StoreEntitySet,
    /// `StorageEntityContainer` on EntityContainerMapping.
    StorageEntityContainer,
    /// `CdmEntityContainer` on EntityContainerMapping.
    CdmEntityContainer,
    /// `ColumnName` on scalar properties and conditions.
    ColumnName,
    /// `FunctionImportName` on FunctionImportMapping.
    FunctionImportName,
    /// `FunctionName` on FunctionImportMapping.
    FunctionName,
}

/// What a binding is allowed to resolve to: the declaration kind plus, where
/// the schema families distinguish them, the model space. The target kind
/// selects the reference normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    ConceptualContainer,
    StorageContainer,
    /// A same-space entity set reference (schema documents reference their
    /// own model space).
    EntitySet,
    ConceptualEntitySet,
    StorageEntitySet,
    AssociationSet,
    Association,
    EntityType,
    AssociationEnd,
    AssociationSetEnd,
    /// A conceptual entity type property.
    Property,
    /// A storage entity type property (column).
    StorageProperty,
    Function,
    FunctionImport,
}

/// Static description of one binding slot, declared by the element schema.
#[derive(Debug, Clone, Copy)]
pub struct BindingSpec {
    pub key: BindingKey,
    pub attribute: &'static str,
    pub target: TargetKind,
    /// Required bindings gate the owning node's transition to Resolved.
    pub required: bool,
    /// List bindings split the raw text on `;`.
    pub multi: bool,
}

/// One resolved (or unresolved) name within a binding.
#[derive(Debug, Clone)]
pub struct BindingItem {
    pub raw: SmolStr,
    pub symbol: Symbol,
    pub status: BindingStatus,
    pub ambiguous: bool,
    pub target: Option<NodeId>,
}

/// A named, lazily-resolved reference owned by a source node.
#[derive(Debug, Clone)]
pub struct ItemBinding {
    key: BindingKey,
    attribute: &'static str,
    target_kind: TargetKind,
    required: bool,
    multi: bool,
    status: BindingStatus,
    ambiguous: bool,
    items: Vec<BindingItem>,
}

impl ItemBinding {
    pub fn from_spec(spec: &BindingSpec) -> Self {
        Self {
            key: spec.key,
            attribute: spec.attribute,
            target_kind: spec.target,
            required: spec.required,
            multi: spec.multi,
            status: BindingStatus::Unknown,
            ambiguous: false,
            items: Vec::new(),
        }
    }

    pub fn key(&self) -> BindingKey {
        self.key
    }

    pub fn attribute_name(&self) -> &'static str {
        self.attribute
    }

    pub fn target_kind(&self) -> TargetKind {
        self.target_kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn status(&self) -> BindingStatus {
        self.status
    }

    /// True if the last rebind found more than one candidate for any item.
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }

    /// The resolved target of a single binding (first item). `Some` iff the
    /// binding is Known.
    pub fn target(&self) -> Option<NodeId> {
        match self.status {
            BindingStatus::Known => self.items.first().and_then(|i| i.target),
            _ => None,
        }
    }

    /// All resolved targets, in attribute order.
    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().filter_map(|i| i.target)
    }

    /// The raw reference text of the first item, as last rebound.
    pub fn ref_name(&self) -> Option<&str> {
        self.items.first().map(|i| i.raw.as_str())
    }

    pub fn items(&self) -> &[BindingItem] {
        &self.items
    }

    /// Drop all resolution state back to Unknown. The caller is responsible
    /// for unregistering anti-dependencies first.
    pub(crate) fn reset(&mut self) {
        self.status = BindingStatus::Unknown;
        self.ambiguous = false;
        self.items.clear();
    }

    /// Install the outcome of a rebind. Aggregate status is Known iff there
    /// is at least one item and every item is Known.
    pub(crate) fn install(&mut self, items: Vec<BindingItem>) {
        self.ambiguous = items.iter().any(|i| i.ambiguous);
        self.status = if !items.is_empty()
            && items.iter().all(|i| i.status == BindingStatus::Known)
        {
            BindingStatus::Known
        } else {
            BindingStatus::Undefined
        };
        self.items = items;
    }
}

/// Split raw list-binding text into trimmed, non-empty item names.
pub(crate) fn split_list_refs(raw: &str) -> Vec<&str> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: BindingSpec = BindingSpec {
        key: BindingKey::Association,
        attribute: "Association",
        target: TargetKind::Association,
        required: true,
        multi: false,
    };

    fn known_item(target: u32) -> BindingItem {
        BindingItem {
            raw: "FooModel.FooAssoc".into(),
            symbol: Symbol::from_parts(["FooModel", "FooAssoc"]),
            status: BindingStatus::Known,
            ambiguous: false,
            target: Some(NodeId(target)),
        }
    }

    #[test]
    fn test_fresh_binding_is_unknown() {
        let binding = ItemBinding::from_spec(&SPEC);
        assert_eq!(binding.status(), BindingStatus::Unknown);
        assert_eq!(binding.target(), None);
        assert_eq!(binding.ref_name(), None);
    }

    #[test]
    fn test_install_aggregates_status() {
        let mut binding = ItemBinding::from_spec(&SPEC);
        binding.install(vec![known_item(7)]);
        assert_eq!(binding.status(), BindingStatus::Known);
        assert_eq!(binding.target(), Some(NodeId(7)));

        let mut dangling = known_item(7);
        dangling.status = BindingStatus::Undefined;
        dangling.target = None;
        binding.install(vec![dangling]);
        assert_eq!(binding.status(), BindingStatus::Undefined);
        assert_eq!(binding.target(), None);

        binding.install(Vec::new());
        assert_eq!(binding.status(), BindingStatus::Undefined);
    }

    #[test]
    fn test_reset_returns_to_unknown() {
        let mut binding = ItemBinding::from_spec(&SPEC);
        binding.install(vec![known_item(3)]);
        binding.reset();
        assert_eq!(binding.status(), BindingStatus::Unknown);
        assert!(binding.items().is_empty());
    }

    #[test]
    fn test_split_list_refs() {
        assert_eq!(
            split_list_refs("FooModel.A; FooModel.B ;"),
            ["FooModel.A", "FooModel.B"]
        );
        assert!(split_list_refs("  ").is_empty());
    }
}
