//! Tests for symbolic binding resolution: the cross-document mapping
//! scenario, dangling and ambiguous references, anti-dependency bookkeeping,
//! and structural end queries.

use rstest::rstest;

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
    <FunctionImport Name="GetFoos" ReturnType="Collection(FooModel.Foo)" EntitySet="FooSet"/>
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
    <ReferentialConstraint>
      <Principal Role="Foo"><PropertyRef Name="Id"/></Principal>
      <Dependent Role="Bar"><PropertyRef Name="FooId"/></Dependent>
    </ReferentialConstraint>
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
    <Property Name="FooId" Type="int"/>
  </EntityType>
  <Function Name="GetFoos" IsComposable="false"/>
</Schema>
"#;

const MSL: &str = r#"
<Mapping Space="C-S" xmlns="http://schemas.microsoft.com/ado/2009/11/mapping/cs">
  <EntityContainerMapping StorageEntityContainer="FooStoreContainer" CdmEntityContainer="FooContainer">
    <AssociationSetMapping Name="FooBarSet" TypeName="FooModel.FooBar" StoreEntitySet="FooTable">
      <EndProperty Name="Foo">
        <ScalarProperty Name="Id" ColumnName="FooId"/>
      </EndProperty>
    </AssociationSetMapping>
    <FunctionImportMapping FunctionImportName="GetFoos" FunctionName="FooModel.Store.GetFoos">
      <ResultMapping>
        <FunctionImportTypeMapping TypeName="FooModel.Foo"/>
      </ResultMapping>
    </FunctionImportMapping>
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

fn binding_status(set: &ArtifactSet, id: NodeId, key: BindingKey) -> BindingStatus {
    set.node(id).binding(key).unwrap().status()
}

#[test]
fn test_association_set_mapping_scenario() {
    let set = loaded_set();
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);

    assert_eq!(binding_status(&set, asm, BindingKey::Name), BindingStatus::Known);
    assert_eq!(
        binding_status(&set, asm, BindingKey::TypeName),
        BindingStatus::Known
    );
    assert_eq!(
        binding_status(&set, asm, BindingKey::StoreEntitySet),
        BindingStatus::Known
    );
    assert_eq!(set.node(asm).state(), ElementState::Resolved);

    // The set's first matching anti-dependency is the mapping node.
    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");
    assert_eq!(set.association_set_mapping(assoc_set), Some(asm));

    // The store set resolved into the storage artifact.
    let store_set = find_named(&set, ElementKind::EntitySet, "FooTable");
    assert_eq!(
        set.node(asm)
            .binding(BindingKey::StoreEntitySet)
            .unwrap()
            .target(),
        Some(store_set)
    );
}

#[test]
fn test_binding_round_trip_registers_anti_dependency_once() {
    let set = loaded_set();
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);
    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");

    let deps = set.anti_dependencies(assoc_set);
    let from_asm: Vec<_> = deps.iter().filter(|d| d.source == asm).collect();
    assert_eq!(from_asm.len(), 1);
    assert_eq!(from_asm[0].key, BindingKey::Name);
}

#[test]
fn test_deleting_source_removes_anti_dependency() {
    let mut set = loaded_set();
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);
    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");
    assert!(!set.anti_dependencies(assoc_set).is_empty());

    set.delete_node(asm);

    assert!(
        set.anti_dependencies(assoc_set)
            .iter()
            .all(|d| d.source != asm)
    );
    assert_eq!(set.node(asm).state(), ElementState::Deleted);
    assert_eq!(set.association_set_mapping(assoc_set), None);
}

#[test]
fn test_dangling_reference_is_undefined_with_no_target() {
    let mut set = ArtifactSet::new();
    set.add_artifact_str(
        r#"<Schema Namespace="M">
             <EntityContainer Name="C">
               <EntitySet Name="Foos" EntityType="M.Missing"/>
             </EntityContainer>
           </Schema>"#,
        None,
    )
    .unwrap();
    set.process_all();

    let entity_set = find_named(&set, ElementKind::EntitySet, "Foos");
    let binding = set.node(entity_set).binding(BindingKey::EntityType).unwrap();
    assert_eq!(binding.status(), BindingStatus::Undefined);
    assert_eq!(binding.target(), None);
    assert!(!binding.is_ambiguous());
    assert_eq!(set.node(entity_set).state(), ElementState::Unresolved);

    let codes: Vec<&str> = set.errors().map(|e| e.code).collect();
    assert!(codes.contains(&edml::core::error_codes::UNRESOLVED_REFERENCE));

    // A dangling binding contributes nothing to the anti-dependency index.
    for id in all_nodes(&set) {
        assert!(set.anti_dependencies(id).iter().all(|d| d.source != entity_set));
    }
}

#[test]
fn test_ambiguous_reference_is_flagged_not_first_match() {
    let mut set = ArtifactSet::new();
    set.add_artifact_str(
        r#"<Schema Namespace="M">
             <EntityContainer Name="C">
               <EntitySet Name="Foos" EntityType="M.Foo"/>
             </EntityContainer>
             <EntityType Name="Foo"/>
             <EntityType Name="Foo"/>
           </Schema>"#,
        None,
    )
    .unwrap();
    set.process_all();

    let entity_set = find_named(&set, ElementKind::EntitySet, "Foos");
    let binding = set.node(entity_set).binding(BindingKey::EntityType).unwrap();
    assert_eq!(binding.status(), BindingStatus::Undefined);
    assert!(binding.is_ambiguous());
    assert_eq!(binding.target(), None);

    let codes: Vec<&str> = set.errors().map(|e| e.code).collect();
    assert!(codes.contains(&edml::core::error_codes::AMBIGUOUS_REFERENCE));
}

#[rstest]
#[case("FooModel.Nope")]
#[case("Nope")]
#[case("")]
fn test_bad_type_name_never_resolves(#[case] type_name: &str) {
    let msl = MSL.replace("TypeName=\"FooModel.FooBar\"", &format!("TypeName=\"{type_name}\""));
    let mut set = ArtifactSet::new();
    set.add_artifact_str(CSDL, None).unwrap();
    set.add_artifact_str(SSDL, None).unwrap();
    set.add_artifact_str(&msl, None).unwrap();
    set.process_all();

    let asm = find_kind(&set, ElementKind::AssociationSetMapping);
    assert_eq!(
        binding_status(&set, asm, BindingKey::TypeName),
        BindingStatus::Undefined
    );
    assert_eq!(set.node(asm).state(), ElementState::Unresolved);
}

#[test]
fn test_principal_and_dependent_ends() {
    let set = loaded_set();
    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");

    let principal = set.principal_end(assoc_set).expect("principal end");
    let dependent = set.dependent_end(assoc_set).expect("dependent end");
    assert_eq!(set.name_raw(principal), Some("Foo"));
    assert_eq!(set.name_raw(dependent), Some("Bar"));
    assert_ne!(principal, dependent);
}

#[test]
fn test_unmatched_constraint_role_yields_none_not_error() {
    let csdl = CSDL.replace(
        r#"<Principal Role="Foo">"#,
        r#"<Principal Role="Quux">"#,
    );
    let mut set = ArtifactSet::new();
    set.add_artifact_str(&csdl, None).unwrap();
    set.process_all();

    let assoc_set = find_named(&set, ElementKind::AssociationSet, "FooBarSet");
    assert_eq!(set.principal_end(assoc_set), None);
    // The dependent side is untouched and still matches.
    assert!(set.dependent_end(assoc_set).is_some());
}

#[test]
fn test_entity_container_mapping_accessor() {
    let set = loaded_set();
    let container = find_named(&set, ElementKind::EntityContainer, "FooContainer");
    let ecm = find_kind(&set, ElementKind::EntityContainerMapping);
    assert_eq!(set.entity_container_mapping(container), Some(ecm));
}

#[test]
fn test_function_import_mapping_resolves_both_sides() {
    let set = loaded_set();
    let fim = find_kind(&set, ElementKind::FunctionImportMapping);

    let import = find_named(&set, ElementKind::FunctionImport, "GetFoos");
    let function = find_named(&set, ElementKind::Function, "GetFoos");
    assert_eq!(
        set.node(fim)
            .binding(BindingKey::FunctionImportName)
            .unwrap()
            .target(),
        Some(import)
    );
    assert_eq!(
        set.node(fim).binding(BindingKey::FunctionName).unwrap().target(),
        Some(function)
    );

    // Same bare name, two spaces: the symbol scoping keeps them apart.
    assert_ne!(import, function);
}

#[test]
fn test_result_mapping_type_lookup() {
    let set = loaded_set();
    let result_mapping = find_kind(&set, ElementKind::ResultMapping);
    let foo = find_named(&set, ElementKind::EntityType, "Foo");
    let bar = find_named(&set, ElementKind::EntityType, "Bar");

    let tm = set.find_type_mapping(result_mapping, foo);
    assert!(tm.is_some());
    assert_eq!(set.find_type_mapping(result_mapping, bar), None);
}

#[test]
fn test_multi_item_type_name_binding() {
    let msl = r#"
<Mapping Space="C-S" xmlns="http://schemas.microsoft.com/ado/2009/11/mapping/cs">
  <EntityContainerMapping StorageEntityContainer="FooStoreContainer" CdmEntityContainer="FooContainer">
    <EntitySetMapping Name="FooSet">
      <EntityTypeMapping TypeName="FooModel.Foo; FooModel.Bar">
        <MappingFragment StoreEntitySet="FooTable"/>
      </EntityTypeMapping>
    </EntitySetMapping>
  </EntityContainerMapping>
</Mapping>
"#;
    let mut set = ArtifactSet::new();
    set.add_artifact_str(CSDL, None).unwrap();
    set.add_artifact_str(SSDL, None).unwrap();
    set.add_artifact_str(msl, None).unwrap();
    set.process_all();

    let etm = find_kind(&set, ElementKind::EntityTypeMapping);
    let binding = set.node(etm).binding(BindingKey::TypeName).unwrap();
    assert_eq!(binding.status(), BindingStatus::Known);

    let foo = find_named(&set, ElementKind::EntityType, "Foo");
    let bar = find_named(&set, ElementKind::EntityType, "Bar");
    let targets: Vec<NodeId> = binding.targets().collect();
    assert_eq!(targets, vec![foo, bar]);

    // Each target tracks the mapping as an anti-dependency.
    assert!(set.anti_dependencies(foo).iter().any(|d| d.source == etm));
    assert!(set.anti_dependencies(bar).iter().any(|d| d.source == etm));
}

#[test]
fn test_chained_scalar_property_resolution() {
    let set = loaded_set();
    let asm = find_kind(&set, ElementKind::AssociationSetMapping);
    let end_property = set
        .children_of_kind(asm, ElementKind::EndProperty)
        .into_iter()
        .next()
        .unwrap();
    let scalar = set
        .children_of_kind(end_property, ElementKind::ScalarProperty)
        .into_iter()
        .next()
        .unwrap();

    // Name resolves through end -> entity set -> entity type.
    let name_target = set.node(scalar).binding(BindingKey::Name).unwrap().target();
    let foo_id = all_nodes(&set)
        .into_iter()
        .find(|id| {
            set.node(*id).kind() == ElementKind::Property
                && set.node(*id).symbol().to_string() == "FooModel.Foo.Id"
        })
        .unwrap();
    assert_eq!(name_target, Some(foo_id));

    // ColumnName resolves through the mapping's store entity set.
    let column_target = set
        .node(scalar)
        .binding(BindingKey::ColumnName)
        .unwrap()
        .target();
    let store_foo_id = all_nodes(&set)
        .into_iter()
        .find(|id| {
            set.node(*id).kind() == ElementKind::Property
                && set.node(*id).symbol().to_string() == "FooModel.Store.FooTable.FooId"
        })
        .unwrap();
    assert_eq!(column_target, Some(store_foo_id));
}

#[test]
fn test_key_and_constraint_property_refs_resolve() {
    let set = loaded_set();
    let bar = find_named(&set, ElementKind::EntityType, "Bar");
    let refs = set.key_property_refs(bar);
    assert_eq!(refs.len(), 1);
    assert_eq!(
        binding_status(&set, refs[0], BindingKey::Name),
        BindingStatus::Known
    );

    let dependent = find_kind(&set, ElementKind::DependentRole);
    let dep_refs = set.children_of_kind(dependent, ElementKind::PropertyRef);
    assert_eq!(dep_refs.len(), 1);
    let target = set.node(dep_refs[0]).binding(BindingKey::Name).unwrap().target();
    assert_eq!(
        target.map(|t| set.node(t).symbol().to_string()),
        Some("FooModel.Bar.FooId".to_owned())
    );
}
