//! Arena-based template tree.
//!
//! This module implements the node model for hierarchical templates. All
//! nodes of one template live in a contiguous `Vec<NodeData>` owned by the
//! `Tree`, and are referenced by `NodeId`, a newtype over `NonZeroU32`.
//!
//! Each node carries a name, an ordered attribute list, a raw content payload,
//! and ordered children. Navigation links (parent, first\_child, last\_child,
//! next\_sibling, prev\_sibling) are arena indices, so the upward parent link
//! never owns anything and cannot outlive the tree it points into.
//!
//! Composition of two templates (`union`, `merge`) lives in `compose`; path
//! search, flattening and the debug dump live in `search`.

mod compose;
mod node;
mod options;
mod search;

pub use node::{Attribute, NodeName};
pub use options::{
    TemplateOptions, DEFAULT_RESERVED_CONTAINER, DEFAULT_SENTINEL_LABEL, DEFAULT_SEPARATOR,
};

use crate::error::TreeError;
use std::num::NonZeroU32;

/// A typed index into a tree's node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, meaning it can never be zero
/// and `Option<NodeId>` has the same size as `NodeId` (niche optimization).
/// A `NodeId` is only meaningful for the `Tree` that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0.
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("NodeId index must be non-zero"))
    }

    /// Returns the raw index as a `usize` for indexing into the arena.
    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// Storage for a single node in the tree arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The node name and its construction convention.
    pub name: NodeName,
    /// Attributes in insertion order. Duplicate names are allowed.
    pub attributes: Vec<Attribute>,
    /// Raw content payload, exactly as the decoder or caller stored it.
    pub content: String,
    /// Parent node. Roots and detached nodes have none.
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(name: NodeName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: String::new(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// A template tree.
///
/// The `Tree` owns every node in an arena and provides methods for
/// navigation (`&Tree`) and mutation (`&mut Tree`). A tree always has a
/// root, created together with the tree.
///
/// # Examples
///
/// ```
/// use templtree::Tree;
///
/// let mut tree = Tree::new_plain("root");
/// let root = tree.root();
/// let counters = tree.new_child(root, "counters", "");
/// tree.new_child(counters, "cpu_busy", "cpu_busy => busy");
///
/// assert_eq!(tree.child_content(counters, "cpu_busy"), Some("cpu_busy => busy"));
/// assert_eq!(tree.parent(counters), Some(root));
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
    /// The root node id.
    root: NodeId,
}

impl Tree {
    fn with_root(name: NodeName) -> Self {
        let mut nodes = Vec::with_capacity(32);
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeName::default()));
        nodes.push(NodeData::new(name));
        Self {
            nodes,
            root: NodeId::from_index(1),
        }
    }

    /// Creates a tree whose root has a plain name.
    #[must_use]
    pub fn new_plain(name: impl Into<String>) -> Self {
        Self::with_root(NodeName::plain(name))
    }

    /// Creates a tree whose root has a markup-qualified name.
    ///
    /// Children created through [`new_child`](Tree::new_child) beneath a
    /// qualified node are qualified as well.
    #[must_use]
    pub fn new_qualified(name: impl Into<String>) -> Self {
        Self::with_root(NodeName::qualified(name))
    }

    /// Returns the root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    /// Returns the `NodeData` for `id`, or `None` if this tree did not
    /// allocate it.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.as_index())
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    fn contains(&self, id: NodeId) -> bool {
        id.as_index() < self.nodes.len()
    }

    // --- Names ---

    /// Returns the node name. Qualified and plain names compare alike.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name.as_str()
    }

    /// Returns the markup-qualified name, if the node has one.
    #[must_use]
    pub fn qualified_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).name {
            NodeName::Qualified(name) => Some(name),
            NodeName::Plain(_) => None,
        }
    }

    /// Returns `true` if the node was built with a qualified name.
    #[must_use]
    pub fn is_qualified(&self, id: NodeId) -> bool {
        self.node(id).name.is_qualified()
    }

    /// Renames a node, keeping its naming convention.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.node_mut(id).name.rename(name);
    }

    /// Gives a node a markup-qualified name.
    pub fn set_qualified_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.node_mut(id).name = NodeName::qualified(name);
    }

    // --- Attributes ---

    /// Returns the attributes of a node in insertion order.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        &self.node(id).attributes
    }

    /// Returns the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&Attribute> {
        self.attributes(id).iter().find(|a| a.name == name)
    }

    /// Returns the value of the first attribute with the given name.
    #[must_use]
    pub fn attribute_value(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attribute(id, name).map(|a| a.value.as_str())
    }

    /// Appends an attribute. Existing attributes with the same name are kept.
    pub fn add_attribute(&mut self, id: NodeId, attr: Attribute) {
        self.node_mut(id).attributes.push(attr);
    }

    /// Appends a namespace-less attribute built from `name` and `value`.
    pub fn new_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.add_attribute(id, Attribute::new(name, value));
    }

    // --- Content ---

    /// Returns the effective content of a node.
    ///
    /// This is the trimmed payload, or `""` when the trimmed payload is empty
    /// or starts with `<` (nested markup captured verbatim by a decoder).
    #[must_use]
    pub fn content(&self, id: NodeId) -> &str {
        let trimmed = self.node(id).content.trim();
        if trimmed.starts_with('<') {
            ""
        } else {
            trimmed
        }
    }

    /// Returns the stored payload untouched.
    #[must_use]
    pub fn raw_content(&self, id: NodeId) -> &str {
        &self.node(id).content
    }

    /// Replaces the payload of a node.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) {
        self.node_mut(id).content = content.into();
    }

    // --- Navigation ---

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Returns the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Returns the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    /// Returns `true` if the node has at least one child.
    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).first_child.is_some()
    }

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.node(id).first_child,
        }
    }

    /// Returns an iterator over a node and its ancestors (walking up to root).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Walks up from `id` looking for an ancestor named `label`.
    ///
    /// Returns the node on the upward chain (starting at `id` itself) whose
    /// parent is named `label`, or `None` if no ancestor carries that name.
    #[must_use]
    pub fn search_ancestor(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&n| self.parent(n).is_some_and(|p| self.name(p) == label))
    }

    // --- Child lookup ---

    /// Returns the first child with the given name.
    #[must_use]
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.name(c) == name)
    }

    /// Returns `true` if some child has the given name.
    #[must_use]
    pub fn has_child(&self, id: NodeId, name: &str) -> bool {
        self.child(id, name).is_some()
    }

    /// Returns the raw content of the first child with the given name.
    #[must_use]
    pub fn child_content(&self, id: NodeId, name: &str) -> Option<&str> {
        self.child(id, name).map(|c| self.raw_content(c))
    }

    /// Returns the first child whose raw content equals `content`.
    #[must_use]
    pub fn child_by_content(&self, id: NodeId, content: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.raw_content(c) == content)
    }

    /// Returns the raw content of every child, in order.
    #[must_use]
    pub fn all_child_contents(&self, id: NodeId) -> Vec<&str> {
        self.children(id).map(|c| self.raw_content(c)).collect()
    }

    /// Returns the name of every child, in order.
    #[must_use]
    pub fn all_child_names(&self, id: NodeId) -> Vec<&str> {
        self.children(id).map(|c| self.name(c)).collect()
    }

    // --- Mutation ---

    /// Allocates a new detached node in the arena and returns its `NodeId`.
    ///
    /// Attach it with [`add_child`](Tree::add_child).
    pub fn create_node(&mut self, name: NodeName) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(name));
        NodeId::from_index(index)
    }

    /// Creates a child under `parent` and returns it.
    ///
    /// The child is qualified if `parent` is, so a subtree stays internally
    /// consistent. The child is linked to `parent` and appended to the end of
    /// its child list.
    pub fn new_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> NodeId {
        let name = self.node(parent).name.same_kind(name);
        let child = self.create_node(name);
        self.node_mut(child).content = content.into();
        self.append_child(parent, child);
        child
    }

    /// Sets the content of the first child named `name`, creating the child
    /// if there is none.
    pub fn set_child_content(&mut self, id: NodeId, name: &str, content: impl Into<String>) {
        match self.child(id, name) {
            Some(child) => self.set_content(child, content),
            None => {
                self.new_child(id, name, content);
            }
        }
    }

    /// Appends a detached node to the end of a parent's child list.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if either handle was not allocated
    /// by this tree, [`TreeError::AlreadyAttached`] if `child` already has a
    /// parent, and [`TreeError::WouldCycle`] if `child` is `parent` or one of
    /// its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        for id in [parent, child] {
            if !self.contains(id) {
                return Err(TreeError::UnknownNode(id));
            }
        }
        if self.node(child).parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(TreeError::WouldCycle { parent, child });
        }
        self.append_child(parent, child);
        Ok(())
    }

    /// Removes and returns the first child named `name`.
    ///
    /// The last child takes the removed child's slot, so the order of the
    /// remaining children is not preserved. The removed node stays allocated
    /// but detached.
    pub fn pop_child(&mut self, id: NodeId, name: &str) -> Option<NodeId> {
        let found = self.child(id, name)?;
        let last = self.last_child(id)?;
        if last != found {
            self.detach(last);
            self.insert_before(found, last);
        }
        self.detach(found);
        Some(found)
    }

    /// Appends a child node to the end of a parent's child list.
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent; detach it first"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
            self.node_mut(child).prev_sibling = Some(last);
            self.node_mut(parent).last_child = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
            self.node_mut(parent).last_child = Some(child);
        }
    }

    /// Inserts `new_child` before `reference` in the parent's child list.
    ///
    /// # Panics
    ///
    /// Panics if `reference` has no parent.
    #[allow(clippy::expect_used)]
    fn insert_before(&mut self, reference: NodeId, new_child: NodeId) {
        debug_assert!(
            self.node(new_child).parent.is_none(),
            "new_child already has a parent; detach it first"
        );

        let parent = self
            .node(reference)
            .parent
            .expect("reference has no parent");
        self.node_mut(new_child).parent = Some(parent);

        if let Some(prev) = self.node(reference).prev_sibling {
            self.node_mut(prev).next_sibling = Some(new_child);
            self.node_mut(new_child).prev_sibling = Some(prev);
        } else {
            self.node_mut(parent).first_child = Some(new_child);
        }

        self.node_mut(new_child).next_sibling = Some(reference);
        self.node_mut(reference).prev_sibling = Some(new_child);
    }

    /// Detaches a node from its parent (but does not free it from the arena).
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };

        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;

        match prev {
            Some(p) => self.node_mut(p).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }

        match next {
            Some(n) => self.node_mut(n).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }

        self.node_mut(id).parent = None;
        self.node_mut(id).prev_sibling = None;
        self.node_mut(id).next_sibling = None;
    }

    /// Returns the total number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
