//! Tests for incremental graph edits: rename re-resolution, delete cascade,
//! element insertion positions, and write-through serialization.

use edml::xml::write_document_string;
use edml::{ArtifactSet, BindingKey, BindingStatus, ElementKind, ElementState, NodeId};

const CSDL: &str = r#"
<Schema Namespace="FooModel" xmlns="http://schemas.microsoft.com/ado/2009/11/edm">
  <EntityContainer Name="FooContainer">
    <EntitySet Name="FooSet" EntityType="FooModel.Foo"/>
    <EntitySet Name="BarSet" EntityType="FooModel.Bar"/>
    <AssociationSet Name="FooBarSet" Association="FooModel.FooBar">
      <End Role="Foo" EntitySet="FooSet"/>
      <End Role="Bar" EntitySet="BarSet"/>
    </AssociationSet>
  </EntityContainer>
  <EntityType Name="Foo">
    <Key><PropertyRef Name="Id"/></Key>
    <Property Name="Id" Type="Int32" Nullable="false"/>
  </EntityType>
  <EntityType Name="Bar">
    <Key><PropertyRef Name="Id"/></Key>
    <Property Name="Id" Type="Int32" Nullable="false"/>
    <Property Name="FooId" Type="Int32"/>
  </EntityType>
  <Association Name="FooBar">
    <End Role="Foo" Type="FooModel.Foo" Multiplicity="1"/>
    <End Role="Bar" Type="FooModel.Bar" Multiplicity="*"/>
  </Association>
</Schema>
"#;

const SSDL: &str = r#"
<Schema Namespace="FooModel.Store" xmlns="http://schemas.microsoft.com/ado/2009/11/edm/ssdl">
  <EntityContainer Name="FooStoreContainer">
    <EntitySet Name="FooTable" EntityType="FooModel.Store.FooTable"/>
  </EntityContainer>
  <EntityType Name="FooTable">
    <Key><PropertyRef Name="Id"/></Key>
    <Property Name="Id" Type="int" Nullable="false"/>
  </EntityType>
</Schema>
"#;

const MSL: &str = r#"
<Mapping Space="C-S" xmlns="http://schemas.microsoft.com/ado/2009/11/mapping/cs">
  <EntityContainerMapping StorageEntityContainer="FooStoreContainer" CdmEntityContainer="FooContainer">
    <AssociationSetMapping Name="FooBarSet" TypeName="FooModel.FooBar" StoreEntitySet="FooTable">
      <Condition ColumnName="Id" IsNull="false"/>
    </AssociationSetMapping>
  </EntityContainerMapping>
</Mapping>
"#;

fn loaded_set() -> ArtifactSet {
    let mut set = ArtifactSet::new();
    set.add_artifact_str(CSDL, None).unwrap();
    set.add_artifact_str(SSDL, None).unwrap();
    set.add_artifact_str(MSL, None).unwrap();
    set.process_all();
    set
}

fn all_nodes(set: &ArtifactSet) -> Vec<NodeId> {
    set.artifacts()
        .filter_map(|a| a.root())
        .flat_map(|root| set.subtree(root))
        .collect()
}

fn find_named(set: &ArtifactSet, kind: ElementKind, name: &str) -> NodeId {
    all_nodes(set)
        .into_iter()
        .find(|id| set.node(*id).kind() == kind && set.name_raw(*id) == Some(name))
        .unwrap_or_else(|| panic!("no {kind:?} named '{name}'"))
}

fn find_kind(set: &ArtifactSet, kind: ElementKind) -> NodeId {
    all_nodes(set)
        .into_iter()
        .find(|id| set.node(*id).kind() == kind)
        .unwrap_or_else(|| panic!("no node of kind {kind:?}"))
}

#[test]
fn test_rename_target_breaks_and_restores_bindings() {
    let mut set = loaded_set();
    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);

    let name_status = |set: &ArtifactSet| set.node(asm).binding(BindingKey::Name).unwrap().status();
    assert_eq!(name_status(&set), BindingStatus::Known);

    // Renaming the target makes the mapping reference dangle.
    set.rename_node(assoc_set, "RenamedSet");
    assert_eq!(name_status(&set), BindingStatus::Undefined);
    assert_eq!(set.node(asm).state(), ElementState::Unresolved);
    assert!(set.anti_dependencies(assoc_set).iter().all(|d| d.source != asm));

    // Renaming it back re-resolves the dangling reference.
    set.rename_node(assoc_set, "FooBarSet");
    assert_eq!(name_status(&set), BindingStatus::Known);
    assert_eq!(set.node(asm).state(), ElementState::Resolved);
    assert!(set.anti_dependencies(assoc_set).iter().any(|d| d.source == asm));
}

#[test]
fn test_rename_container_requalifies_descendant_symbols() {
    let mut set = loaded_set();
    let container = find_named(&set, ElementKind::EntityContainer, "FooContainer");
    let foo_set = find_named(&set, ElementKind::EntitySet, "FooSet");
    assert_eq!(set.node(foo_set).symbol().to_string(), "FooContainer.FooSet");

    set.rename_node(container, "NewContainer");
    assert_eq!(set.node(foo_set).symbol().to_string(), "NewContainer.FooSet");

    // The mapping still names the old container, so its references dangle.
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);
    assert_eq!(
        set.node(asm).binding(BindingKey::Name).unwrap().status(),
        BindingStatus::Undefined
    );
}

#[test]
fn test_delete_association_cascades_and_unbinds() {
    let mut set = loaded_set();
    let association = find_named(&set, ElementKind::Association, "FooBar");
    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");
    let ends = set.children_of_kind(association, ElementKind::AssociationEnd);
    assert_eq!(ends.len(), 2);

    set.delete_node(association);

    assert_eq!(set.node(association).state(), ElementState::Deleted);
    for end in ends {
        assert_eq!(set.node(end).state(), ElementState::Deleted);
    }

    // The set's reference dangles and the set is no longer resolved.
    let binding = set.node(assoc_set).binding(BindingKey::Association).unwrap();
    assert_eq!(binding.status(), BindingStatus::Undefined);
    assert_eq!(binding.target(), None);
    assert_eq!(set.node(assoc_set).state(), ElementState::Unresolved);

    // Deleted declarations leave the backing document too.
    let serialized = write_document_string(set.document_of(assoc_set)).unwrap();
    assert!(!serialized.contains("<Association "));
    assert!(serialized.contains("<AssociationSet "));
}

#[test]
fn test_delete_leaves_no_anti_dependencies_on_subtree() {
    let mut set = loaded_set();
    let association = find_named(&set, ElementKind::Association, "FooBar");
    let subtree = set.subtree(association);

    set.delete_node(association);

    for id in all_nodes(&set) {
        for dep in set.anti_dependencies(id) {
            assert!(
                !subtree.contains(&dep.source),
                "deleted node {:?} still registered on {:?}",
                dep.source,
                id
            );
        }
    }
}

#[test]
fn test_add_documentation_inserts_first() {
    let mut set = loaded_set();
    let foo = find_named(&set, ElementKind::EntityType, "Foo");

    let documentation = set
        .add_element(foo, "Documentation")
        .expect("schema admits Documentation");
    assert_eq!(set.node(documentation).kind(), ElementKind::Documentation);
    assert_eq!(set.node(documentation).parent(), Some(foo));

    // Serialized order: Documentation precedes the Key element.
    let doc = set.document_of(foo);
    let first_child = doc.children(set.node(foo).xml())[0];
    assert_eq!(doc.name(first_child), "Documentation");
}

#[test]
fn test_add_end_property_inserts_before_conditions() {
    let mut set = loaded_set();
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);

    let end_property = set.add_element(asm, "EndProperty").unwrap();
    let doc = set.document_of(asm);
    let children: Vec<&str> = doc
        .children(set.node(asm).xml())
        .iter()
        .map(|c| doc.name(*c))
        .collect();
    assert_eq!(children, ["EndProperty", "Condition"]);
    assert_eq!(set.node(end_property).kind(), ElementKind::EndProperty);
}

#[test]
fn test_add_element_rejects_second_singleton() {
    let mut set = loaded_set();
    let foo = find_named(&set, ElementKind::EntityType, "Foo");

    // Foo already has a Key.
    assert_eq!(set.add_element(foo, "Key"), None);
    // And unrecognized child names are refused outright.
    assert_eq!(set.add_element(foo, "Bogus"), None);
}

#[test]
fn test_added_declaration_satisfies_dangling_reference() {
    let mut set = loaded_set();
    let container = find_named(&set, ElementKind::EntityContainer, "FooContainer");
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);

    // Point the mapping's store set reference at a set that does not exist
    // yet on the conceptual side; it dangles.
    set.set_node_attribute(asm, "Name", "QuuxSet");
    set.resolve_node(asm);
    assert_eq!(
        set.node(asm).binding(BindingKey::Name).unwrap().status(),
        BindingStatus::Undefined
    );

    // Adding and naming the declaration resolves it.
    let new_set = set.add_element(container, "AssociationSet").unwrap();
    set.rename_node(new_set, "QuuxSet");

    let binding = set.node(asm).binding(BindingKey::Name).unwrap();
    assert_eq!(binding.status(), BindingStatus::Known);
    assert_eq!(binding.target(), Some(new_set));
}

#[test]
fn test_reparse_tracks_cross_document_renames() {
    let mut set = loaded_set();
    let conceptual = set.artifacts().next().unwrap().id();
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);

    let renamed = CSDL.replace("FooBarSet", "OtherSet");
    set.reparse_artifact_str(conceptual, &renamed).unwrap();
    assert_eq!(
        set.node(asm).binding(BindingKey::Name).unwrap().status(),
        BindingStatus::Undefined
    );

    set.reparse_artifact_str(conceptual, CSDL).unwrap();
    assert_eq!(
        set.node(asm).binding(BindingKey::Name).unwrap().status(),
        BindingStatus::Known
    );
}

#[test]
fn test_rename_writes_through_to_serialized_document() {
    let mut set = loaded_set();
    let foo = find_named(&set, ElementKind::EntityType, "Foo");

    set.rename_node(foo, "Widget");

    let serialized = write_document_string(set.document_of(foo)).unwrap();
    assert!(serialized.contains(r#"<EntityType Name="Widget">"#));
    assert!(!serialized.contains(r#"<EntityType Name="Foo">"#));
}
