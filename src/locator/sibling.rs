//! Sibling disambiguation indices.

use super::error::LocatorError;
use crate::document::node::{NodeCategory, TreeNode};

/// Returns true if `left` and `right` would be selected by the same step
/// without an index.
///
/// Elements compare by local name; every other node compares by category,
/// with CDATA counted as text.
pub fn are_similar<N: TreeNode>(left: &N, right: &N) -> bool {
    if left.is_same_node(right) {
        return true;
    }
    if left.category() == NodeCategory::Element && right.category() == NodeCategory::Element {
        return left.local_name() == right.local_name();
    }
    left.category().normalized() == right.category().normalized()
}

/// Computes the 1-based position of `node` among its similar siblings.
///
/// Returns 0 when the node has no parent or no other similar sibling, since
/// the step then needs no index. Returns `NodeNotInParent` if the parent's
/// children do not contain the node.
pub fn sibling_index<N: TreeNode>(node: &N) -> Result<usize, LocatorError> {
    let parent = match node.parent() {
        Some(parent) => parent,
        None => return Ok(0),
    };

    let has_similar_sibling = parent
        .children()
        .any(|sibling| !sibling.is_same_node(node) && are_similar(node, &sibling));
    if !has_similar_sibling {
        return Ok(0);
    }

    let mut index = 0;
    for sibling in parent.children() {
        if !are_similar(node, &sibling) {
            continue;
        }
        index += 1;
        if sibling.is_same_node(node) {
            return Ok(index);
        }
    }

    Err(LocatorError::NodeNotInParent)
}
