//! Mutable XML document tree.
//!
//! Every model node is backed by an element in one of these documents, and
//! every attribute write performed through the model layer lands here, so a
//! document can be re-serialized at any point and reflect all edits.
//!
//! Elements live in an arena and are addressed by [`XmlElementId`]; removal
//! marks the slot dead rather than shifting the arena, so ids held by live
//! model nodes stay valid.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Index of an element in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlElementId(pub u32);

impl XmlElementId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where to place a new child among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before every existing child.
    First,
    /// After every existing child.
    Last,
    /// Immediately before the given sibling.
    Before(XmlElementId),
    /// Immediately after the given sibling.
    After(XmlElementId),
}

/// One element: local name, ordered attributes, ordered children, text.
///
/// Attribute order is preserved (`IndexMap`) so serialization round-trips the
/// author's layout. Namespace prefixes are stripped on load; the model layer
/// matches on local names only.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: SmolStr,
    pub attributes: IndexMap<SmolStr, String>,
    pub children: Vec<XmlElementId>,
    pub parent: Option<XmlElementId>,
    /// Concatenated character data directly inside this element.
    pub text: String,
    /// Dead slots stay in the arena so ids remain stable.
    pub(crate) removed: bool,
}

/// An in-memory XML document: an element arena plus a root.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    elements: Vec<XmlElement>,
    root: Option<XmlElementId>,
}

impl XmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document root, if the document is non-empty.
    pub fn root(&self) -> Option<XmlElementId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: XmlElementId) {
        self.root = Some(root);
    }

    pub fn element(&self, id: XmlElementId) -> &XmlElement {
        &self.elements[id.index()]
    }

    fn element_mut(&mut self, id: XmlElementId) -> &mut XmlElement {
        &mut self.elements[id.index()]
    }

    /// True if the element has not been removed from the document.
    pub fn is_live(&self, id: XmlElementId) -> bool {
        self.elements
            .get(id.index())
            .is_some_and(|e| !e.removed)
    }

    /// Local name of the element.
    pub fn name(&self, id: XmlElementId) -> &str {
        &self.element(id).name
    }

    /// Child elements in document order.
    pub fn children(&self, id: XmlElementId) -> &[XmlElementId] {
        &self.element(id).children
    }

    /// Character data directly inside the element.
    pub fn text(&self, id: XmlElementId) -> &str {
        &self.element(id).text
    }

    pub fn set_text(&mut self, id: XmlElementId, text: impl Into<String>) {
        self.element_mut(id).text = text.into();
    }

    /// Read one attribute by local name.
    pub fn attribute(&self, id: XmlElementId, name: &str) -> Option<&str> {
        self.element(id).attributes.get(name).map(String::as_str)
    }

    /// Write one attribute, creating it if absent. Order of existing
    /// attributes is preserved; new attributes append.
    pub fn set_attribute(&mut self, id: XmlElementId, name: &str, value: impl Into<String>) {
        self.element_mut(id)
            .attributes
            .insert(SmolStr::new(name), value.into());
    }

    /// Remove one attribute. Returns true if it was present.
    pub fn remove_attribute(&mut self, id: XmlElementId, name: &str) -> bool {
        self.element_mut(id).attributes.shift_remove(name).is_some()
    }

    /// Allocate a new, unattached element.
    pub fn create_element(&mut self, name: impl Into<SmolStr>) -> XmlElementId {
        let id = XmlElementId::new(self.elements.len());
        self.elements.push(XmlElement {
            name: name.into(),
            ..XmlElement::default()
        });
        id
    }

    /// Attach `child` under `parent` at the requested position.
    ///
    /// A `Before`/`After` anchor that is not a child of `parent` falls back
    /// to appending.
    pub fn insert_child(&mut self, parent: XmlElementId, child: XmlElementId, at: InsertPosition) {
        self.element_mut(child).parent = Some(parent);
        let siblings = &mut self.element_mut(parent).children;
        let index = match at {
            InsertPosition::First => 0,
            InsertPosition::Last => siblings.len(),
            InsertPosition::Before(anchor) => siblings
                .iter()
                .position(|c| *c == anchor)
                .unwrap_or(siblings.len()),
            InsertPosition::After(anchor) => siblings
                .iter()
                .position(|c| *c == anchor)
                .map(|i| i + 1)
                .unwrap_or(siblings.len()),
        };
        siblings.insert(index, child);
    }

    /// Detach an element from its parent and mark it and its subtree removed.
    pub fn remove_element(&mut self, id: XmlElementId) {
        if let Some(parent) = self.element(id).parent {
            self.element_mut(parent).children.retain(|c| *c != id);
        }
        self.mark_removed(id);
        if self.root == Some(id) {
            self.root = None;
        }
    }

    fn mark_removed(&mut self, id: XmlElementId) {
        let children = self.element(id).children.clone();
        let elem = self.element_mut(id);
        elem.removed = true;
        elem.parent = None;
        for child in children {
            self.mark_removed(child);
        }
    }

    /// Number of live elements.
    pub fn live_count(&self) -> usize {
        self.elements.iter().filter(|e| !e.removed).count()
    }
}
