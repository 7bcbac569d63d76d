//! Arena-backed document trees.
//!
//! `DocTree` owns every node of one document in a flat vector. Nodes refer to
//! each other by [`NodeId`], which keeps the tree trivially cloneable and lets
//! handles ([`Node`]) be `Copy`. Index 0 is always the document node.
//!
//! # Example
//!
//! ```
//! use nodepath::document::tree::DocTree;
//!
//! let mut tree = DocTree::new();
//! let html = tree.append_element(tree.root(), "html").unwrap();
//! let body = tree.append_element(html, "body").unwrap();
//! tree.set_attribute(body, "id", "main").unwrap();
//! tree.append_text(body, "hello").unwrap();
//!
//! assert_eq!(tree.element_by_id("main"), Some(body));
//! assert_eq!(tree.attribute(body, "id"), Some("main"));
//! ```

use super::node::{NodeCategory, NodeData, NodeId, TreeNode};
use anyhow::{anyhow, Result};

/// Name of the attribute that carries a node's stable identifier.
pub const ID_ATTRIBUTE: &str = "id";

/// A complete document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTree {
    nodes: Vec<NodeData>,
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocTree {
    /// Creates a tree holding only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeCategory::Document)],
        }
    }

    /// Returns the id of the document node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns a handle to the document node.
    pub fn document(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root(),
        }
    }

    /// Number of nodes in the arena, attributes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always contains its document node, so this is never true for
    /// trees built through `new()`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0)
    }

    /// Returns a handle for `id`, or `None` if the id is out of range.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        self.get(id).map(|_| Node { tree: self, id })
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    /// Appends `data` as the last child of `parent`.
    ///
    /// Returns an error if `parent` does not exist or cannot hold children
    /// (only the document and elements can).
    pub fn append_child(&mut self, parent: NodeId, mut data: NodeData) -> Result<NodeId> {
        let parent_data = self
            .get(parent)
            .ok_or_else(|| anyhow!("Parent node {} not found", parent.0))?;
        if !parent_data.category().is_container() {
            return Err(anyhow!(
                "Cannot append a child to a {} node",
                parent_data.category()
            ));
        }
        if data.category() == NodeCategory::Document || data.category() == NodeCategory::Attribute
        {
            return Err(anyhow!("A {} node cannot be a child", data.category()));
        }

        data.parent = Some(parent);
        let id = self.push(data);
        if let Some(parent_data) = self.get_mut(parent) {
            parent_data.children.push(id);
        }
        Ok(id)
    }

    pub fn append_element(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        if name.is_empty() {
            return Err(anyhow!("Element name cannot be empty"));
        }
        self.append_child(parent, NodeData::new(NodeCategory::Element).with_name(name))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        self.append_child(parent, NodeData::new(NodeCategory::Text).with_value(text))
    }

    pub fn append_cdata(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        self.append_child(parent, NodeData::new(NodeCategory::CData).with_value(text))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        self.append_child(parent, NodeData::new(NodeCategory::Comment).with_value(text))
    }

    pub fn append_processing_instruction(
        &mut self,
        parent: NodeId,
        target: &str,
        data: &str,
    ) -> Result<NodeId> {
        self.append_child(
            parent,
            NodeData::new(NodeCategory::ProcessingInstruction)
                .with_name(target)
                .with_value(data),
        )
    }

    /// Appends a node the locator has no dedicated step for, such as a
    /// doctype declaration.
    pub fn append_other(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.append_child(parent, NodeData::new(NodeCategory::Other).with_name(name))
    }

    /// Sets an attribute on an element, replacing the value if an attribute
    /// with the same qualified name already exists.
    ///
    /// Returns the id of the attribute node.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<NodeId> {
        let owner = self
            .get(element)
            .ok_or_else(|| anyhow!("Element {} not found", element.0))?;
        if owner.category() != NodeCategory::Element {
            return Err(anyhow!(
                "Attributes can only be set on elements, not on a {} node",
                owner.category()
            ));
        }
        if name.is_empty() {
            return Err(anyhow!("Attribute name cannot be empty"));
        }

        if let Some(existing) = self.find_attribute(element, name) {
            if let Some(attr) = self.get_mut(existing) {
                attr.value = Some(value.to_string());
            }
            return Ok(existing);
        }

        let mut attr = NodeData::new(NodeCategory::Attribute)
            .with_name(name)
            .with_value(value);
        attr.owner = Some(element);
        let id = self.push(attr);
        if let Some(owner) = self.get_mut(element) {
            owner.attributes.push(id);
        }
        Ok(id)
    }

    fn find_attribute(&self, element: NodeId, name: &str) -> Option<NodeId> {
        self.get(element)?
            .attributes()
            .iter()
            .copied()
            .find(|&attr| self.get(attr).and_then(NodeData::name) == Some(name))
    }

    /// Returns the value of the named attribute on `element`.
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.find_attribute(element, name)
            .and_then(|attr| self.get(attr))
            .and_then(NodeData::value)
    }

    /// Returns the attribute node named `name` on `element`.
    pub fn attribute_node(&self, element: NodeId, name: &str) -> Option<NodeId> {
        self.find_attribute(element, name)
    }

    /// Returns the element an attribute node belongs to.
    pub fn owner_element(&self, attr: NodeId) -> Option<NodeId> {
        self.get(attr)?.owner
    }

    /// Finds the first element in document order whose id matches.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|&node| {
            self.get(node).map(NodeData::category) == Some(NodeCategory::Element)
                && self.attribute(node, ID_ATTRIBUTE) == Some(id)
        })
    }

    /// Returns the element children of `parent`, skipping text and other
    /// node categories.
    pub fn element_children(&self, parent: NodeId) -> Vec<NodeId> {
        self.get(parent)
            .map(|data| {
                data.children()
                    .iter()
                    .copied()
                    .filter(|&child| {
                        self.get(child).map(NodeData::category) == Some(NodeCategory::Element)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `from` and everything below it in document order.
    ///
    /// Attribute nodes are not part of the child structure and are not
    /// returned; use `attributes()` on the element's data for those.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if self.get(from).is_none() {
            return result;
        }

        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            result.push(id);
            if let Some(data) = self.get(id) {
                stack.extend(data.children().iter().rev().copied());
            }
        }
        result
    }
}

/// A borrowed handle to one node of a [`DocTree`].
///
/// This is the tree's [`TreeNode`] implementation.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    tree: &'a DocTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a DocTree {
        self.tree
    }

    pub fn data(&self) -> &'a NodeData {
        // Handles are only created for ids that exist in the arena.
        &self.tree.nodes[self.id.0]
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_node(other)
    }
}

impl Eq for Node<'_> {}

/// Iterator over the children of a [`Node`].
pub struct NodeChildren<'a> {
    tree: &'a DocTree,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for NodeChildren<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.ids.next().map(|&id| Node { tree, id })
    }
}

impl<'a> TreeNode for Node<'a> {
    type Children = NodeChildren<'a>;

    fn category(&self) -> NodeCategory {
        self.data().category()
    }

    fn local_name(&self) -> Option<&str> {
        self.data().local_name()
    }

    fn qualified_name(&self) -> Option<&str> {
        self.data().name()
    }

    fn id(&self) -> Option<&str> {
        if self.category() != NodeCategory::Element {
            return None;
        }
        self.tree.attribute(self.id, ID_ATTRIBUTE)
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent().and_then(|id| self.tree.node(id))
    }

    fn children(&self) -> Self::Children {
        NodeChildren {
            tree: self.tree,
            ids: self.data().children().iter(),
        }
    }

    fn is_same_node(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
