//! Canonical name keys and reference normalization.
//!
//! Every nameable node owns a [`Symbol`]: the canonical, comparable key other
//! nodes use to refer to it. Symbols are sequences of name parts because the
//! schema families scope names differently — an entity container is known by
//! its bare name, an association by `[namespace, name]`, an association set
//! end by `[container, set, role]`. Symbol equality is the *only* criterion
//! binding resolution uses; there are no object-identity shortcuts.
//!
//! Reference normalization is the other half: given the raw text of a
//! reference attribute and the node it sits on, compute the symbol the
//! declaration side would have produced. Normalization is total — malformed
//! or empty input yields [`Symbol::empty()`], which matches nothing.

use smol_str::SmolStr;

/// A canonical name key: an immutable sequence of name parts.
///
/// The empty symbol (no parts) is the distinguished unresolved/invalid name;
/// it never compares equal to any declared symbol because declarations with
/// missing names also normalize to empty and empty symbols are never indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Symbol {
    parts: Box<[SmolStr]>,
}

impl Symbol {
    /// The distinguished empty symbol.
    pub fn empty() -> Symbol {
        Symbol::default()
    }

    /// Build a symbol from name parts. Any empty part collapses the whole
    /// symbol to [`Symbol::empty()`] — a partially-known name is not a name.
    pub fn from_parts<I, S>(parts: I) -> Symbol
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<SmolStr> = parts
            .into_iter()
            .map(|p| SmolStr::new(p.as_ref()))
            .collect();
        if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return Symbol::empty();
        }
        Symbol {
            parts: parts.into_boxed_slice(),
        }
    }

    /// A single-part (bare-name) symbol.
    pub fn bare(name: &str) -> Symbol {
        Symbol::from_parts([name])
    }

    /// This symbol extended by one more part.
    pub fn join(&self, part: &str) -> Symbol {
        if self.is_empty() || part.is_empty() {
            return Symbol::empty();
        }
        let mut parts: Vec<SmolStr> = self.parts.to_vec();
        parts.push(SmolStr::new(part));
        Symbol {
            parts: parts.into_boxed_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[SmolStr] {
        &self.parts
    }

    /// The final name part, if any.
    pub fn last_part(&self) -> Option<&str> {
        self.parts.last().map(SmolStr::as_str)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty>");
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// True if `name` is a valid EDM simple identifier (letter or underscore
/// start, identifier continuation, no dots).
pub fn is_valid_simple_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {}
        _ => return false,
    }
    chars.all(unicode_ident::is_xid_continue)
}

/// Split a possibly dot-qualified raw reference into `(namespace, name)`.
///
/// `"FooModel.Foo"` → `(Some("FooModel"), "Foo")`; `"Foo"` → `(None, "Foo")`.
/// The namespace side may itself contain dots (`"My.Nested.Model.Foo"`).
pub fn split_qualified(raw: &str) -> (Option<&str>, &str) {
    match raw.rsplit_once('.') {
        Some((ns, name)) if !ns.is_empty() => (Some(ns), name),
        _ => (None, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_symbol_matches_nothing() {
        assert!(Symbol::empty().is_empty());
        assert_ne!(Symbol::bare("Foo"), Symbol::empty());
        assert_eq!(Symbol::from_parts(Vec::<&str>::new()), Symbol::empty());
        // A hole in the parts collapses the whole key.
        assert_eq!(Symbol::from_parts(["", "Foo"]), Symbol::empty());
        assert_eq!(Symbol::empty().join("Foo"), Symbol::empty());
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(
            Symbol::from_parts(["FooModel", "Foo"]),
            Symbol::bare("FooModel").join("Foo")
        );
        assert_ne!(Symbol::bare("Foo"), Symbol::from_parts(["M", "Foo"]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Symbol::from_parts(["C", "Foos"]).to_string(), "C.Foos");
        assert_eq!(Symbol::empty().to_string(), "<empty>");
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("FooModel.Foo"), (Some("FooModel"), "Foo"));
        assert_eq!(split_qualified("A.B.Foo"), (Some("A.B"), "Foo"));
        assert_eq!(split_qualified("Foo"), (None, "Foo"));
        assert_eq!(split_qualified(".Foo"), (None, ".Foo"));
    }

    #[test]
    fn test_simple_name_validation() {
        assert!(is_valid_simple_name("Foo"));
        assert!(is_valid_simple_name("_foo2"));
        assert!(!is_valid_simple_name(""));
        assert!(!is_valid_simple_name("2foo"));
        assert!(!is_valid_simple_name("Foo.Bar"));
    }
}
