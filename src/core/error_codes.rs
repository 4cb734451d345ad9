//! Error codes attached to collected model errors.
//!
//! ## Code Ranges
//!
//! - **E01xx**: parse-phase schema errors (unrecognized names, arity)
//! - **E02xx**: resolve-phase binding errors
//! - **E03xx**: document-level errors

/// Unrecognized child element under a known parent.
pub const UNRECOGNIZED_ELEMENT: &str = "E0101";
/// Unrecognized attribute on a known element.
pub const UNRECOGNIZED_ATTRIBUTE: &str = "E0102";
/// More than one Documentation child on one owner.
pub const TOO_MANY_DOCUMENTATION_ELEMENTS: &str = "E0103";
/// More than one occurrence of a single-arity child element.
pub const DUPLICATE_CHILD_ELEMENT: &str = "E0104";
/// A name attribute whose value is not a valid simple identifier.
pub const MALFORMED_NAME: &str = "E0105";

/// Reference names no declared symbol.
pub const UNRESOLVED_REFERENCE: &str = "E0201";
/// Reference matches more than one declared symbol.
pub const AMBIGUOUS_REFERENCE: &str = "E0202";

/// Document root element is not part of any known schema family.
pub const UNRECOGNIZED_ROOT_ELEMENT: &str = "E0301";
