//! Declarative element schemas.
//!
//! Each element kind declares its recognized attributes, child elements,
//! binding slots, and name scoping here. The parse phase is driven entirely
//! by these tables: anything the tables don't name is a schema error. The
//! same tables back the runtime conformance validator
//! ([`ArtifactSet::validate_conformance`](super::artifact_set::ArtifactSet::validate_conformance)),
//! so there is no separate debug-only name list to keep in sync.

use super::binding::{BindingKey, BindingSpec, TargetKind};
use super::node::{ElementKind, ModelSpace};

/// Attribute and element name vocabulary of the three schema families.
pub mod names {
    pub const ATTR_NAME: &str = "Name";
    pub const ATTR_NAMESPACE: &str = "Namespace";
    pub const ATTR_ALIAS: &str = "Alias";
    pub const ATTR_PROVIDER: &str = "Provider";
    pub const ATTR_PROVIDER_MANIFEST_TOKEN: &str = "ProviderManifestToken";
    pub const ATTR_ENTITY_TYPE: &str = "EntityType";
    pub const ATTR_ASSOCIATION: &str = "Association";
    pub const ATTR_ROLE: &str = "Role";
    pub const ATTR_ENTITY_SET: &str = "EntitySet";
    pub const ATTR_TYPE: &str = "Type";
    pub const ATTR_MODE: &str = "Mode";
    pub const ATTR_MULTIPLICITY: &str = "Multiplicity";
    pub const ATTR_NULLABLE: &str = "Nullable";
    pub const ATTR_MAX_LENGTH: &str = "MaxLength";
    pub const ATTR_DEFAULT_VALUE: &str = "DefaultValue";
    pub const ATTR_STORE_GENERATED_PATTERN: &str = "StoreGeneratedPattern";
    pub const ATTR_RELATIONSHIP: &str = "Relationship";
    pub const ATTR_FROM_ROLE: &str = "FromRole";
    pub const ATTR_TO_ROLE: &str = "ToRole";
    pub const ATTR_ABSTRACT: &str = "Abstract";
    pub const ATTR_AGGREGATE: &str = "Aggregate";
    pub const ATTR_BUILT_IN: &str = "BuiltIn";
    pub const ATTR_IS_COMPOSABLE: &str = "IsComposable";
    pub const ATTR_RETURN_TYPE: &str = "ReturnType";
    pub const ATTR_STORE_FUNCTION_NAME: &str = "StoreFunctionName";
    pub const ATTR_SCHEMA: &str = "Schema";
    pub const ATTR_TABLE: &str = "Table";
    pub const ATTR_PRECISION: &str = "Precision";
    pub const ATTR_SCALE: &str = "Scale";
    pub const ATTR_SPACE: &str = "Space";
    pub const ATTR_TYPE_NAME: &str = "TypeName";
    pub const ATTR_STORE_ENTITY_SET: &str = "StoreEntitySet";
    pub const ATTR_STORAGE_ENTITY_CONTAINER: &str = "StorageEntityContainer";
    pub const ATTR_CDM_ENTITY_CONTAINER: &str = "CdmEntityContainer";
    pub const ATTR_GENERATE_UPDATE_VIEWS: &str = "GenerateUpdateViews";
    pub const ATTR_COLUMN_NAME: &str = "ColumnName";
    pub const ATTR_VALUE: &str = "Value";
    pub const ATTR_IS_NULL: &str = "IsNull";
    pub const ATTR_FUNCTION_IMPORT_NAME: &str = "FunctionImportName";
    pub const ATTR_FUNCTION_NAME: &str = "FunctionName";

    pub const ELEM_SCHEMA: &str = "Schema";
    pub const ELEM_MAPPING: &str = "Mapping";
    pub const ELEM_END: &str = "End";
    pub const ELEM_PRINCIPAL: &str = "Principal";
    pub const ELEM_DEPENDENT: &str = "Dependent";
    pub const ELEM_SUMMARY: &str = "Summary";
    pub const ELEM_LONG_DESCRIPTION: &str = "LongDescription";

    pub const MODE_IN: &str = "In";
    pub const MODE_OUT: &str = "Out";
    pub const MODE_IN_OUT: &str = "InOut";
}

/// How a kind's canonical symbol is computed from its name attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScope {
    /// Not independently nameable; symbol stays empty.
    None,
    /// `[name]` — containers are referred to by bare name.
    Bare,
    /// `[container, name]` — scoped to the nearest ancestor container.
    Container,
    /// `[namespace, name]` — qualified by the declaring Schema's namespace.
    Namespace,
    /// Parent symbol plus own name — ends, properties, parameters.
    ParentQualified,
}

/// How many occurrences of a child element one owner admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildArity {
    One,
    Many,
}

/// One permitted child element under an owner kind.
#[derive(Debug, Clone, Copy)]
pub struct ChildSpec {
    pub element: &'static str,
    pub kind: ElementKind,
    pub arity: ChildArity,
}

/// The full declared schema of one element kind.
#[derive(Debug, Clone, Copy)]
pub struct ElementSchema {
    pub kind: ElementKind,
    /// Attribute holding the element's own name, if nameable.
    pub name_attribute: Option<&'static str>,
    pub name_scope: NameScope,
    /// Recognized attributes that are neither the name nor a binding.
    pub plain_attributes: &'static [&'static str],
    pub bindings: &'static [BindingSpec],
    pub children: &'static [ChildSpec],
    /// Recognized child elements that carry only text (no node is created).
    pub text_children: &'static [&'static str],
    /// True if the element's own text content is meaningful (query views).
    pub has_text_content: bool,
    /// Child element names that serialize before existing children.
    pub first_children: &'static [&'static str],
}

impl ElementSchema {
    /// All recognized attribute names: name attribute, bindings, plains.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(name) = self.name_attribute {
            out.push(name);
        }
        for binding in self.bindings {
            if !out.contains(&binding.attribute) {
                out.push(binding.attribute);
            }
        }
        for plain in self.plain_attributes {
            if !out.contains(plain) {
                out.push(plain);
            }
        }
        out
    }

    /// All recognized child element names, node-backed and text-only.
    pub fn child_element_names(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = self.children.iter().map(|c| c.element).collect();
        out.extend(self.text_children);
        out
    }

    /// Look up the child spec for an element name.
    pub fn child(&self, element: &str) -> Option<&'static ChildSpec> {
        self.children.iter().find(|c| c.element == element)
    }

    /// True if the named child should be inserted before existing children.
    pub fn inserts_first(&self, element: &str) -> bool {
        self.first_children.iter().any(|c| *c == element)
    }
}

/// The element kind a document root maps to, by element name.
pub fn root_kind(element_name: &str) -> Option<ElementKind> {
    match element_name {
        names::ELEM_SCHEMA => Some(ElementKind::Schema),
        names::ELEM_MAPPING => Some(ElementKind::Mapping),
        _ => None,
    }
}

/// The model space a binding target is declared in, given the source space.
///
/// Mapping documents always reference conceptual declarations except where
/// the attribute is explicitly storage-directed; schema documents reference
/// their own space.
pub fn expected_target_space(target: TargetKind, source: ModelSpace) -> ModelSpace {
    match target {
        TargetKind::StorageContainer
        | TargetKind::StorageEntitySet
        | TargetKind::StorageProperty
        | TargetKind::Function => ModelSpace::Storage,
        TargetKind::ConceptualContainer
        | TargetKind::ConceptualEntitySet
        | TargetKind::AssociationSet
        | TargetKind::FunctionImport => ModelSpace::Conceptual,
        TargetKind::EntitySet
        | TargetKind::Association
        | TargetKind::EntityType
        | TargetKind::AssociationEnd
        | TargetKind::AssociationSetEnd
        | TargetKind::Property => match source {
            ModelSpace::Mapping => ModelSpace::Conceptual,
            other => other,
        },
    }
}

/// The node kind a binding target must have.
pub fn expected_target_kind(target: TargetKind) -> ElementKind {
    match target {
        TargetKind::ConceptualContainer | TargetKind::StorageContainer => {
            ElementKind::EntityContainer
        }
        TargetKind::EntitySet
        | TargetKind::ConceptualEntitySet
        | TargetKind::StorageEntitySet => ElementKind::EntitySet,
        TargetKind::AssociationSet => ElementKind::AssociationSet,
        TargetKind::Association => ElementKind::Association,
        TargetKind::EntityType => ElementKind::EntityType,
        TargetKind::AssociationEnd => ElementKind::AssociationEnd,
        TargetKind::AssociationSetEnd => ElementKind::AssociationSetEnd,
        TargetKind::Property | TargetKind::StorageProperty => ElementKind::Property,
        TargetKind::Function => ElementKind::Function,
        TargetKind::FunctionImport => ElementKind::FunctionImport,
    }
}

// ============================================================================
// SCHEMA TABLES
// ============================================================================

macro_rules! binding {
    ($key:ident, $attr:expr, $target:ident, required) => {
        BindingSpec {
            key: BindingKey::$key,
            attribute: $attr,
            target: TargetKind::$target,
            required: true,
            multi: false,
        }
    };
    ($key:ident, $attr:expr, $target:ident, advisory) => {
        BindingSpec {
            key: BindingKey::$key,
            attribute: $attr,
            target: TargetKind::$target,
            required: false,
            multi: false,
        }
    };
    ($key:ident, $attr:expr, $target:ident, required, multi) => {
        BindingSpec {
            key: BindingKey::$key,
            attribute: $attr,
            target: TargetKind::$target,
            required: true,
            multi: true,
        }
    };
}

macro_rules! child {
    ($elem:expr, $kind:ident, one) => {
        ChildSpec {
            element: $elem,
            kind: ElementKind::$kind,
            arity: ChildArity::One,
        }
    };
    ($elem:expr, $kind:ident, many) => {
        ChildSpec {
            element: $elem,
            kind: ElementKind::$kind,
            arity: ChildArity::Many,
        }
    };
}

const DOCUMENTATION_CHILD: ChildSpec = child!("Documentation", Documentation, one);

static SCHEMA: ElementSchema = ElementSchema {
    kind: ElementKind::Schema,
    name_attribute: Some(names::ATTR_NAMESPACE),
    name_scope: NameScope::Bare,
    plain_attributes: &[
        names::ATTR_ALIAS,
        names::ATTR_PROVIDER,
        names::ATTR_PROVIDER_MANIFEST_TOKEN,
    ],
    bindings: &[],
    children: &[
        child!("EntityContainer", EntityContainer, many),
        child!("EntityType", EntityType, many),
        child!("Association", Association, many),
        child!("Function", Function, many),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static ENTITY_CONTAINER: ElementSchema = ElementSchema {
    kind: ElementKind::EntityContainer,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Bare,
    plain_attributes: &[],
    bindings: &[],
    children: &[
        DOCUMENTATION_CHILD,
        child!("EntitySet", EntitySet, many),
        child!("AssociationSet", AssociationSet, many),
        child!("FunctionImport", FunctionImport, many),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static ENTITY_SET: ElementSchema = ElementSchema {
    kind: ElementKind::EntitySet,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Container,
    plain_attributes: &[names::ATTR_SCHEMA, names::ATTR_TABLE],
    bindings: &[binding!(EntityType, names::ATTR_ENTITY_TYPE, EntityType, required)],
    children: &[DOCUMENTATION_CHILD],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static ASSOCIATION_SET: ElementSchema = ElementSchema {
    kind: ElementKind::AssociationSet,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Container,
    plain_attributes: &[],
    bindings: &[binding!(Association, names::ATTR_ASSOCIATION, Association, required)],
    children: &[
        DOCUMENTATION_CHILD,
        child!(names::ELEM_END, AssociationSetEnd, many),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static ASSOCIATION_SET_END: ElementSchema = ElementSchema {
    kind: ElementKind::AssociationSetEnd,
    name_attribute: Some(names::ATTR_ROLE),
    name_scope: NameScope::ParentQualified,
    plain_attributes: &[],
    bindings: &[
        binding!(Role, names::ATTR_ROLE, AssociationEnd, required),
        binding!(EntitySet, names::ATTR_ENTITY_SET, EntitySet, required),
    ],
    children: &[DOCUMENTATION_CHILD],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static ENTITY_TYPE: ElementSchema = ElementSchema {
    kind: ElementKind::EntityType,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Namespace,
    plain_attributes: &[names::ATTR_ABSTRACT],
    bindings: &[],
    children: &[
        DOCUMENTATION_CHILD,
        child!("Key", Key, one),
        child!("Property", Property, many),
        child!("NavigationProperty", NavigationProperty, many),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation", "Key"],
};

static KEY: ElementSchema = ElementSchema {
    kind: ElementKind::Key,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[],
    children: &[child!("PropertyRef", PropertyRef, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static PROPERTY_REF: ElementSchema = ElementSchema {
    kind: ElementKind::PropertyRef,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(Name, names::ATTR_NAME, Property, required)],
    children: &[],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static PROPERTY: ElementSchema = ElementSchema {
    kind: ElementKind::Property,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::ParentQualified,
    plain_attributes: &[
        names::ATTR_TYPE,
        names::ATTR_NULLABLE,
        names::ATTR_MAX_LENGTH,
        names::ATTR_PRECISION,
        names::ATTR_SCALE,
        names::ATTR_DEFAULT_VALUE,
        names::ATTR_STORE_GENERATED_PATTERN,
    ],
    bindings: &[],
    children: &[DOCUMENTATION_CHILD],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static NAVIGATION_PROPERTY: ElementSchema = ElementSchema {
    kind: ElementKind::NavigationProperty,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::ParentQualified,
    plain_attributes: &[],
    bindings: &[
        binding!(Relationship, names::ATTR_RELATIONSHIP, Association, required),
        binding!(FromRole, names::ATTR_FROM_ROLE, AssociationEnd, required),
        binding!(ToRole, names::ATTR_TO_ROLE, AssociationEnd, required),
    ],
    children: &[DOCUMENTATION_CHILD],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static ASSOCIATION: ElementSchema = ElementSchema {
    kind: ElementKind::Association,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Namespace,
    plain_attributes: &[],
    bindings: &[],
    children: &[
        DOCUMENTATION_CHILD,
        child!(names::ELEM_END, AssociationEnd, many),
        child!("ReferentialConstraint", ReferentialConstraint, one),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static ASSOCIATION_END: ElementSchema = ElementSchema {
    kind: ElementKind::AssociationEnd,
    name_attribute: Some(names::ATTR_ROLE),
    name_scope: NameScope::ParentQualified,
    plain_attributes: &[names::ATTR_MULTIPLICITY],
    bindings: &[binding!(Type, names::ATTR_TYPE, EntityType, required)],
    children: &[DOCUMENTATION_CHILD],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static REFERENTIAL_CONSTRAINT: ElementSchema = ElementSchema {
    kind: ElementKind::ReferentialConstraint,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[],
    children: &[
        child!(names::ELEM_PRINCIPAL, PrincipalRole, one),
        child!(names::ELEM_DEPENDENT, DependentRole, one),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static PRINCIPAL_ROLE: ElementSchema = ElementSchema {
    kind: ElementKind::PrincipalRole,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(Role, names::ATTR_ROLE, AssociationEnd, required)],
    children: &[child!("PropertyRef", PropertyRef, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static DEPENDENT_ROLE: ElementSchema = ElementSchema {
    kind: ElementKind::DependentRole,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(Role, names::ATTR_ROLE, AssociationEnd, required)],
    children: &[child!("PropertyRef", PropertyRef, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static FUNCTION: ElementSchema = ElementSchema {
    kind: ElementKind::Function,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Namespace,
    plain_attributes: &[
        names::ATTR_AGGREGATE,
        names::ATTR_BUILT_IN,
        names::ATTR_IS_COMPOSABLE,
        names::ATTR_RETURN_TYPE,
        names::ATTR_STORE_FUNCTION_NAME,
        names::ATTR_SCHEMA,
    ],
    bindings: &[],
    children: &[DOCUMENTATION_CHILD, child!("Parameter", Parameter, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static FUNCTION_IMPORT: ElementSchema = ElementSchema {
    kind: ElementKind::FunctionImport,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::Container,
    plain_attributes: &[names::ATTR_RETURN_TYPE, names::ATTR_IS_COMPOSABLE],
    bindings: &[binding!(EntitySet, names::ATTR_ENTITY_SET, EntitySet, advisory)],
    children: &[DOCUMENTATION_CHILD, child!("Parameter", Parameter, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static PARAMETER: ElementSchema = ElementSchema {
    kind: ElementKind::Parameter,
    name_attribute: Some(names::ATTR_NAME),
    name_scope: NameScope::ParentQualified,
    plain_attributes: &[
        names::ATTR_TYPE,
        names::ATTR_MODE,
        names::ATTR_MAX_LENGTH,
        names::ATTR_PRECISION,
        names::ATTR_SCALE,
    ],
    bindings: &[],
    children: &[DOCUMENTATION_CHILD],
    text_children: &[],
    has_text_content: false,
    first_children: &["Documentation"],
};

static DOCUMENTATION: ElementSchema = ElementSchema {
    kind: ElementKind::Documentation,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[],
    children: &[],
    text_children: &[names::ELEM_SUMMARY, names::ELEM_LONG_DESCRIPTION],
    has_text_content: false,
    first_children: &[],
};

static MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::Mapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[names::ATTR_SPACE],
    bindings: &[],
    children: &[child!("EntityContainerMapping", EntityContainerMapping, one)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static ENTITY_CONTAINER_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::EntityContainerMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[names::ATTR_GENERATE_UPDATE_VIEWS],
    bindings: &[
        binding!(
            StorageEntityContainer,
            names::ATTR_STORAGE_ENTITY_CONTAINER,
            StorageContainer,
            required
        ),
        binding!(
            CdmEntityContainer,
            names::ATTR_CDM_ENTITY_CONTAINER,
            ConceptualContainer,
            required
        ),
    ],
    children: &[
        child!("EntitySetMapping", EntitySetMapping, many),
        child!("AssociationSetMapping", AssociationSetMapping, many),
        child!("FunctionImportMapping", FunctionImportMapping, many),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static ENTITY_SET_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::EntitySetMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(Name, names::ATTR_NAME, ConceptualEntitySet, required)],
    children: &[
        child!("EntityTypeMapping", EntityTypeMapping, many),
        child!("QueryView", QueryView, one),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static ENTITY_TYPE_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::EntityTypeMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(TypeName, names::ATTR_TYPE_NAME, EntityType, required, multi)],
    children: &[child!("MappingFragment", MappingFragment, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static MAPPING_FRAGMENT: ElementSchema = ElementSchema {
    kind: ElementKind::MappingFragment,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(
        StoreEntitySet,
        names::ATTR_STORE_ENTITY_SET,
        StorageEntitySet,
        required
    )],
    children: &[
        child!("ScalarProperty", ScalarProperty, many),
        child!("Condition", Condition, many),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static SCALAR_PROPERTY: ElementSchema = ElementSchema {
    kind: ElementKind::ScalarProperty,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[
        binding!(Name, names::ATTR_NAME, Property, required),
        binding!(ColumnName, names::ATTR_COLUMN_NAME, StorageProperty, required),
    ],
    children: &[],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static ASSOCIATION_SET_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::AssociationSetMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[
        binding!(Name, names::ATTR_NAME, AssociationSet, required),
        binding!(TypeName, names::ATTR_TYPE_NAME, Association, required),
        binding!(
            StoreEntitySet,
            names::ATTR_STORE_ENTITY_SET,
            StorageEntitySet,
            required
        ),
    ],
    children: &[
        child!("EndProperty", EndProperty, many),
        child!("Condition", Condition, many),
        child!("QueryView", QueryView, one),
    ],
    text_children: &[],
    has_text_content: false,
    first_children: &["EndProperty"],
};

static END_PROPERTY: ElementSchema = ElementSchema {
    kind: ElementKind::EndProperty,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(Name, names::ATTR_NAME, AssociationSetEnd, required)],
    children: &[child!("ScalarProperty", ScalarProperty, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static CONDITION: ElementSchema = ElementSchema {
    kind: ElementKind::Condition,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[names::ATTR_VALUE, names::ATTR_IS_NULL],
    bindings: &[binding!(ColumnName, names::ATTR_COLUMN_NAME, StorageProperty, advisory)],
    children: &[],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static QUERY_VIEW: ElementSchema = ElementSchema {
    kind: ElementKind::QueryView,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[names::ATTR_TYPE_NAME],
    bindings: &[],
    children: &[],
    text_children: &[],
    has_text_content: true,
    first_children: &[],
};

static FUNCTION_IMPORT_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::FunctionImportMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[
        binding!(
            FunctionImportName,
            names::ATTR_FUNCTION_IMPORT_NAME,
            FunctionImport,
            required
        ),
        binding!(FunctionName, names::ATTR_FUNCTION_NAME, Function, required),
    ],
    children: &[child!("ResultMapping", ResultMapping, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static RESULT_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::ResultMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[],
    children: &[child!(
        "FunctionImportTypeMapping",
        FunctionImportTypeMapping,
        many
    )],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

static FUNCTION_IMPORT_TYPE_MAPPING: ElementSchema = ElementSchema {
    kind: ElementKind::FunctionImportTypeMapping,
    name_attribute: None,
    name_scope: NameScope::None,
    plain_attributes: &[],
    bindings: &[binding!(TypeName, names::ATTR_TYPE_NAME, EntityType, required)],
    children: &[child!("Condition", Condition, many)],
    text_children: &[],
    has_text_content: false,
    first_children: &[],
};

/// The declared schema for an element kind.
pub fn schema_for(kind: ElementKind) -> &'static ElementSchema {
    match kind {
        ElementKind::Schema => &SCHEMA,
        ElementKind::EntityContainer => &ENTITY_CONTAINER,
        ElementKind::EntitySet => &ENTITY_SET,
        ElementKind::AssociationSet => &ASSOCIATION_SET,
        ElementKind::AssociationSetEnd => &ASSOCIATION_SET_END,
        ElementKind::EntityType => &ENTITY_TYPE,
        ElementKind::Key => &KEY,
        ElementKind::PropertyRef => &PROPERTY_REF,
        ElementKind::Property => &PROPERTY,
        ElementKind::NavigationProperty => &NAVIGATION_PROPERTY,
        ElementKind::Association => &ASSOCIATION,
        ElementKind::AssociationEnd => &ASSOCIATION_END,
        ElementKind::ReferentialConstraint => &REFERENTIAL_CONSTRAINT,
        ElementKind::PrincipalRole => &PRINCIPAL_ROLE,
        ElementKind::DependentRole => &DEPENDENT_ROLE,
        ElementKind::Function => &FUNCTION,
        ElementKind::FunctionImport => &FUNCTION_IMPORT,
        ElementKind::Parameter => &PARAMETER,
        ElementKind::Documentation => &DOCUMENTATION,
        ElementKind::Mapping => &MAPPING,
        ElementKind::EntityContainerMapping => &ENTITY_CONTAINER_MAPPING,
        ElementKind::EntitySetMapping => &ENTITY_SET_MAPPING,
        ElementKind::EntityTypeMapping => &ENTITY_TYPE_MAPPING,
        ElementKind::MappingFragment => &MAPPING_FRAGMENT,
        ElementKind::ScalarProperty => &SCALAR_PROPERTY,
        ElementKind::AssociationSetMapping => &ASSOCIATION_SET_MAPPING,
        ElementKind::EndProperty => &END_PROPERTY,
        ElementKind::Condition => &CONDITION,
        ElementKind::QueryView => &QUERY_VIEW,
        ElementKind::FunctionImportMapping => &FUNCTION_IMPORT_MAPPING,
        ElementKind::ResultMapping => &RESULT_MAPPING,
        ElementKind::FunctionImportTypeMapping => &FUNCTION_IMPORT_TYPE_MAPPING,
    }
}
