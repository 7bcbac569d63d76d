//! Node representation for HTML/XML document trees.
//!
//! Documents are stored in an arena (see [`DocTree`](super::tree::DocTree)):
//! every structural unit is a `NodeData` entry addressed by a `NodeId`, and
//! parent/child links are plain ids rather than pointers. The locator core
//! never sees this layout directly; it reads nodes through the
//! [`TreeNode`] trait.
//!
//! # Example
//!
//! ```
//! use nodepath::document::node::NodeCategory;
//!
//! assert!(NodeCategory::CData.is_text_like());
//! assert_eq!(NodeCategory::CData.normalized(), NodeCategory::Text);
//! assert_eq!(NodeCategory::Element.normalized(), NodeCategory::Element);
//! ```

use serde::Serialize;

/// The category of a document node.
///
/// This is a closed set: anything a loader cannot classify ends up as
/// `Other`, which the locator renders as an empty segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeCategory {
    /// The document itself; the root of every complete tree
    Document,
    /// A tagged element such as `<div>`
    Element,
    /// An attribute attached to an element
    Attribute,
    /// Character data
    Text,
    /// A `<![CDATA[...]]>` section
    #[serde(rename = "cdata")]
    CData,
    /// A `<?target data?>` instruction
    ProcessingInstruction,
    /// A `<!-- ... -->` comment
    Comment,
    /// Anything else (doctype, entity references, ...)
    Other,
}

impl NodeCategory {
    /// Returns the category used for sibling comparisons.
    ///
    /// CDATA sections count as text, the same way XPath's `text()` test
    /// selects both.
    pub fn normalized(self) -> NodeCategory {
        match self {
            NodeCategory::CData => NodeCategory::Text,
            other => other,
        }
    }

    /// Returns true for text and CDATA nodes.
    pub fn is_text_like(self) -> bool {
        matches!(self, NodeCategory::Text | NodeCategory::CData)
    }

    /// Returns true if nodes of this category may have children.
    pub fn is_container(self) -> bool {
        matches!(self, NodeCategory::Document | NodeCategory::Element)
    }

    /// Short lowercase label, used by the CLI output.
    pub fn label(self) -> &'static str {
        match self {
            NodeCategory::Document => "document",
            NodeCategory::Element => "element",
            NodeCategory::Attribute => "attribute",
            NodeCategory::Text => "text",
            NodeCategory::CData => "cdata",
            NodeCategory::ProcessingInstruction => "processing-instruction",
            NodeCategory::Comment => "comment",
            NodeCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Index of a node inside its [`DocTree`](super::tree::DocTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node stored in the arena.
///
/// Which fields are meaningful depends on `category`:
/// - `name` holds the qualified tag name for elements, the qualified
///   attribute name for attributes and the target for processing
///   instructions.
/// - `value` holds character data for text, CDATA and comments, the
///   attribute value for attributes and the data part of a processing
///   instruction.
/// - `attributes` lists attribute nodes in source order (elements only).
/// - `owner` links an attribute back to its element. Attributes have no
///   `parent`, matching DOM `Attr` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub(crate) category: NodeCategory,
    pub(crate) name: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) owner: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attributes: Vec<NodeId>,
}

impl NodeData {
    /// Creates a detached node of the given category.
    pub fn new(category: NodeCategory) -> Self {
        Self {
            category,
            name: None,
            value: None,
            parent: None,
            owner: None,
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }

    /// Returns the qualified name (`prefix:local`) if the node has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name with any namespace prefix stripped.
    pub fn local_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(|name| name.rsplit_once(':').map_or(name, |(_, local)| local))
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attributes(&self) -> &[NodeId] {
        &self.attributes
    }
}

/// Read-only view of a document node, as consumed by the locator.
///
/// Implementors are cheap handles (references or ids plus a borrowed tree).
/// Sibling lookups must be reflexive: when a node has a parent, the node is
/// expected to appear in that parent's `children()`. The locator tolerates
/// trees that break this rule but produces a truncated path for them.
pub trait TreeNode: Sized + Clone {
    /// Iterator over a node's children in document order.
    type Children: Iterator<Item = Self>;

    fn category(&self) -> NodeCategory;

    /// Unqualified element or attribute name.
    fn local_name(&self) -> Option<&str>;

    /// Name as written in the source, including any prefix.
    fn qualified_name(&self) -> Option<&str>;

    /// Value of the element's `id` attribute, if it has one.
    fn id(&self) -> Option<&str>;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Self::Children;

    /// Identity comparison, not structural equality.
    fn is_same_node(&self, other: &Self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_prefix() {
        let node = NodeData::new(NodeCategory::Element).with_name("svg:rect");
        assert_eq!(node.name(), Some("svg:rect"));
        assert_eq!(node.local_name(), Some("rect"));
    }

    #[test]
    fn test_local_name_without_prefix() {
        let node = NodeData::new(NodeCategory::Element).with_name("div");
        assert_eq!(node.local_name(), Some("div"));
    }

    #[test]
    fn test_local_name_absent() {
        let node = NodeData::new(NodeCategory::Text).with_value("hi");
        assert_eq!(node.local_name(), None);
        assert_eq!(node.value(), Some("hi"));
    }

    #[test]
    fn test_category_normalization() {
        assert_eq!(NodeCategory::CData.normalized(), NodeCategory::Text);
        assert_eq!(NodeCategory::Text.normalized(), NodeCategory::Text);
        assert_eq!(NodeCategory::Comment.normalized(), NodeCategory::Comment);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(
            NodeCategory::ProcessingInstruction.to_string(),
            "processing-instruction"
        );
        assert_eq!(NodeCategory::CData.to_string(), "cdata");
    }

    #[test]
    fn test_containers() {
        assert!(NodeCategory::Document.is_container());
        assert!(NodeCategory::Element.is_container());
        assert!(!NodeCategory::Text.is_container());
        assert!(!NodeCategory::Attribute.is_container());
    }
}
