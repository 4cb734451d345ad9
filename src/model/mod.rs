//! # Model graph
//!
//! The XML-backed Entity Data Model graph: nodes parsed from conceptual,
//! storage, and mapping documents, cross-referenced through symbolic
//! bindings, kept consistent under incremental edits.

pub mod artifact;
pub mod artifact_set;
pub mod binding;
pub mod defaultable;
pub mod diagnostics;
pub mod node;
pub mod queries;
pub mod schema;
pub mod state;
pub mod symbol;

pub use artifact::{Artifact, detect_space};
pub use artifact_set::{AntiDependency, ArtifactSet};
pub use binding::{BindingItem, BindingKey, BindingSpec, BindingStatus, ItemBinding, TargetKind};
pub use defaultable::{AttributeValue, DefaultableValue, ParameterMode};
pub use diagnostics::{ErrorList, ModelError, Severity};
pub use node::{ArtifactId, ElementKind, ModelSpace, Node, NodeId};
pub use schema::{ChildArity, ChildSpec, ElementSchema, NameScope, names, schema_for};
pub use state::ElementState;
pub use symbol::{Symbol, is_valid_simple_name, split_qualified};
