//! # edml
//!
//! Design-time Entity Data Model layer: an in-memory, mutable, XML-backed
//! representation of a conceptual model, a storage model, and the mappings
//! between them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! host      → error export for editor hosts
//!   ↓
//! model     → node graph, symbols, bindings, artifact set, pipeline
//!   ↓
//! xml       → mutable XML document tree (quick-xml backed)
//!   ↓
//! core      → error codes
//! ```
//!
//! ## Pipeline
//!
//! Documents run through three phases: **parse** builds the typed node tree
//! from the backing XML, **normalize** computes each node's canonical
//! [`Symbol`], and **resolve** turns symbolic references into node
//! references via the [`ArtifactSet`]'s name index. Edits (delete, rename,
//! add) re-run the affected slice of the pipeline instead of re-parsing
//! whole documents.
//!
//! ```
//! use edml::ArtifactSet;
//!
//! let mut set = ArtifactSet::new();
//! set.add_artifact_str(
//!     r#"<Schema Namespace="M">
//!          <EntityContainer Name="C">
//!            <EntitySet Name="Foos" EntityType="M.Foo"/>
//!          </EntityContainer>
//!          <EntityType Name="Foo"/>
//!        </Schema>"#,
//!     None,
//! ).unwrap();
//! set.process_all();
//! assert!(set.errors().next().is_none());
//! ```

pub mod core;
pub mod xml;
pub mod model;
pub mod host;

// Re-export the working surface.
pub use model::{
    AntiDependency, Artifact, ArtifactId, ArtifactSet, BindingKey, BindingStatus, DefaultableValue,
    ElementKind, ElementState, ItemBinding, ModelError, ModelSpace, Node, NodeId, ParameterMode,
    Severity, Symbol,
};
pub use xml::{XmlDocument, XmlError};
