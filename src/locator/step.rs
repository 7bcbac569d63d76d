//! Rendering of single locator steps.

use super::error::LocatorError;
use super::sibling::sibling_index;
use crate::document::node::{NodeCategory, TreeNode};
use serde::Serialize;

/// One segment of a locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// The rendered segment, such as `div[2]` or `text()`.
    pub text: String,
    /// True when the step is already an absolute locator: an id anchor or
    /// the document itself. The walk stops at an anchor.
    pub is_anchor: bool,
}

impl Step {
    pub fn new(text: impl Into<String>, is_anchor: bool) -> Self {
        Self {
            text: text.into(),
            is_anchor,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Computes the step for `node`.
///
/// With `optimize` set, an element carrying a non-empty id becomes an
/// anchor step of the form `//*[@id="..."]`. Otherwise the step is the
/// category's node test followed by a sibling index when one is needed.
pub fn encode_step<N: TreeNode>(node: &N, optimize: bool) -> Result<Step, LocatorError> {
    let index = sibling_index(node)?;
    let category = node.category();

    if optimize && category == NodeCategory::Element {
        if let Some(id) = node.id().filter(|id| !id.is_empty()) {
            return Ok(Step::new(format!("//*[@id={}]", string_literal(id)), true));
        }
    }

    let mut text = match category {
        NodeCategory::Element => node.local_name().unwrap_or_default().to_string(),
        NodeCategory::Attribute => format!("@{}", node.qualified_name().unwrap_or_default()),
        NodeCategory::Text | NodeCategory::CData => "text()".to_string(),
        NodeCategory::ProcessingInstruction => "processing-instruction()".to_string(),
        NodeCategory::Comment => "comment()".to_string(),
        NodeCategory::Document | NodeCategory::Other => String::new(),
    };

    if index > 0 {
        text.push_str(&format!("[{}]", index));
    }

    Ok(Step::new(text, category == NodeCategory::Document))
}

/// Quotes `value` as an XPath string literal.
///
/// Double quotes are used unless the value contains one. A value holding
/// both quote characters has no literal form and is spelled with `concat`.
pub fn string_literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    if !value.contains('\'') {
        return format!("'{}'", value);
    }

    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{}\"", part))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::NodeId;
    use crate::document::tree::DocTree;

    fn step(tree: &DocTree, id: NodeId, optimize: bool) -> Step {
        encode_step(&tree.node(id).unwrap(), optimize).unwrap()
    }

    #[test]
    fn test_document_step_is_empty_anchor() {
        let tree = DocTree::new();
        assert_eq!(step(&tree, tree.root(), true), Step::new("", true));
        assert_eq!(step(&tree, tree.root(), false), Step::new("", true));
    }

    #[test]
    fn test_element_step_uses_local_name() {
        let mut tree = DocTree::new();
        let svg = tree.append_element(tree.root(), "svg:svg").unwrap();
        assert_eq!(step(&tree, svg, false), Step::new("svg", false));
    }

    #[test]
    fn test_element_with_id_anchors_when_optimized() {
        let mut tree = DocTree::new();
        let body = tree.append_element(tree.root(), "body").unwrap();
        tree.set_attribute(body, "id", "main").unwrap();
        assert_eq!(step(&tree, body, true), Step::new("//*[@id=\"main\"]", true));
        assert_eq!(step(&tree, body, false), Step::new("body", false));
    }

    #[test]
    fn test_empty_id_is_ignored() {
        let mut tree = DocTree::new();
        let body = tree.append_element(tree.root(), "body").unwrap();
        tree.set_attribute(body, "id", "").unwrap();
        assert_eq!(step(&tree, body, true), Step::new("body", false));
    }

    #[test]
    fn test_attribute_step_uses_qualified_name() {
        let mut tree = DocTree::new();
        let link = tree.append_element(tree.root(), "a").unwrap();
        let attr = tree.set_attribute(link, "xlink:href", "#top").unwrap();
        assert_eq!(step(&tree, attr, true), Step::new("@xlink:href", false));
    }

    #[test]
    fn test_node_test_steps() {
        let mut tree = DocTree::new();
        let root = tree.append_element(tree.root(), "root").unwrap();
        let text = tree.append_text(root, "t").unwrap();
        let comment = tree.append_comment(root, "c").unwrap();
        let pi = tree.append_processing_instruction(root, "go", "").unwrap();
        let other = tree.append_other(root, "entity").unwrap();

        assert_eq!(step(&tree, text, false).text, "text()");
        assert_eq!(step(&tree, comment, false).text, "comment()");
        assert_eq!(step(&tree, pi, false).text, "processing-instruction()");
        assert_eq!(step(&tree, other, false).text, "");
    }

    #[test]
    fn test_cdata_step_is_indexed_with_text() {
        let mut tree = DocTree::new();
        let root = tree.append_element(tree.root(), "root").unwrap();
        let text = tree.append_text(root, "a").unwrap();
        let cdata = tree.append_cdata(root, "b").unwrap();
        assert_eq!(step(&tree, text, false).text, "text()[1]");
        assert_eq!(step(&tree, cdata, false).text, "text()[2]");
    }

    #[test]
    fn test_inconsistent_parent_propagates() {
        let mut tree = DocTree::new();
        let ul = tree.append_element(tree.root(), "ul").unwrap();
        tree.append_element(ul, "li").unwrap();
        let orphan = tree.append_element(ul, "li").unwrap();
        tree.get_mut(ul).unwrap().children.retain(|&id| id != orphan);

        let result = encode_step(&tree.node(orphan).unwrap(), true);
        assert_eq!(result, Err(LocatorError::NodeNotInParent));
    }

    #[test]
    fn test_string_literal_quoting() {
        assert_eq!(string_literal("main"), "\"main\"");
        assert_eq!(string_literal("say \"hi\""), "'say \"hi\"'");
        assert_eq!(
            string_literal("it's \"x\""),
            "concat(\"it's \", '\"', \"x\", '\"', \"\")"
        );
    }
}
