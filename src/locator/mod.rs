//! XPath-like locators for document nodes.
//!
//! A locator is a string that addresses one node of a document so it can be
//! found again later. It is built from the node upwards: each ancestor
//! contributes one [`Step`], and the walk ends at the document or, when
//! optimizing, at the nearest element with an id.
//!
//! # Steps
//!
//! - Element: its local name, e.g. `div`
//! - Attribute: `@` and its qualified name, e.g. `@xlink:href`
//! - Text and CDATA: `text()`
//! - Processing instruction: `processing-instruction()`
//! - Comment: `comment()`
//! - Document and unrecognized nodes: an empty segment
//!
//! A step gets a 1-based `[n]` suffix only when the parent holds more than
//! one similar node (same element name, or same category otherwise).
//!
//! # Examples
//!
//! ```
//! use nodepath::document::parser::parse_html;
//! use nodepath::locator::{full_path, path};
//!
//! let tree = parse_html(r#"<html><body id="main"><p>a</p><p>b</p></body></html>"#).unwrap();
//! let body = tree.element_by_id("main").unwrap();
//! let second = tree.element_children(body)[1];
//! let node = tree.node(second).unwrap();
//!
//! assert_eq!(path(&node), r#"//*[@id="main"]/p[2]"#);
//! assert_eq!(full_path(&node), "/html/body/p[2]");
//! ```

pub mod builder;
pub mod error;
pub mod sibling;
pub mod step;

pub use builder::Locator;
pub use error::LocatorError;
pub use sibling::sibling_index;
pub use step::{encode_step, Step};

use crate::document::node::TreeNode;

/// Returns the shortest locator for `node`, anchored on the nearest
/// ancestor-or-self element that has an id.
pub fn path<N: TreeNode>(node: &N) -> String {
    builder::build(node, true).path
}

/// Returns the canonical locator for `node`, which always walks to the
/// document root and never uses ids.
pub fn full_path<N: TreeNode>(node: &N) -> String {
    builder::build(node, false).path
}

/// Computes a locator and reports whether the walk completed.
pub fn locate<N: TreeNode>(node: &N, optimize: bool) -> Locator {
    builder::build(node, optimize)
}
