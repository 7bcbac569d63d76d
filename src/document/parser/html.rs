//! HTML input, read with html5ever into an `RcDom` and copied into a `DocTree`.

use super::{tree_error, ParseOptions};
use crate::document::error::MarkupError;
use crate::document::node::NodeId;
use crate::document::tree::DocTree;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub(super) fn read(input: &str, options: &ParseOptions) -> Result<DocTree, MarkupError> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(input);

    let mut tree = DocTree::new();
    let root = tree.root();
    for child in dom.document.children.borrow().iter() {
        copy_node(&mut tree, root, child, options)?;
    }
    log::debug!("Read HTML document with {} nodes", tree.len());
    Ok(tree)
}

fn copy_node(
    tree: &mut DocTree,
    parent: NodeId,
    handle: &Handle,
    options: &ParseOptions,
) -> Result<(), MarkupError> {
    match &handle.data {
        // Only the root is a document, and it is never a child.
        NodeData::Document => {}
        NodeData::Doctype { name, .. } => {
            tree.append_other(parent, name).map_err(tree_error)?;
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if options.keeps_text(&text) {
                tree.append_text(parent, &text).map_err(tree_error)?;
            }
        }
        NodeData::Comment { contents } => {
            tree.append_comment(parent, contents).map_err(tree_error)?;
        }
        NodeData::ProcessingInstruction { target, contents } => {
            tree.append_processing_instruction(parent, target, contents)
                .map_err(tree_error)?;
        }
        NodeData::Element { name, attrs, .. } => {
            let element = tree
                .append_element(parent, &qualified_name(name))
                .map_err(tree_error)?;
            for attr in attrs.borrow().iter() {
                tree.set_attribute(element, &qualified_name(&attr.name), &attr.value)
                    .map_err(tree_error)?;
            }
            // Template contents live in a separate fragment, as in the DOM.
            for child in handle.children.borrow().iter() {
                copy_node(tree, element, child, options)?;
            }
        }
    }
    Ok(())
}

fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::{NodeCategory, TreeNode};
    use crate::locator::full_path;

    fn parse(input: &str) -> DocTree {
        read(input, &ParseOptions::default()).unwrap()
    }

    fn element_path(tree: &DocTree, name: &str) -> String {
        let id = tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).unwrap().name() == Some(name))
            .unwrap();
        full_path(&tree.node(id).unwrap())
    }

    #[test]
    fn test_implied_html_head_body() {
        let tree = parse("<p>Hi</p>");
        assert_eq!(element_path(&tree, "p"), "/html/body/p");
        assert_eq!(element_path(&tree, "head"), "/html/head");
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let tree = parse("<div><P>x</p></div>");
        assert_eq!(element_path(&tree, "p"), "/html/body/div/p");

        let tree = parse("<HTML><BODY><DIV ID=x></DIV></BODY></HTML>");
        let div = tree.element_by_id("x").unwrap();
        assert_eq!(full_path(&tree.node(div).unwrap()), "/html/body/div");
    }

    #[test]
    fn test_implied_end_tags() {
        let tree = parse("<ul><li>one<li>two</ul>");
        let ul = tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).unwrap().name() == Some("ul"))
            .unwrap();
        let items = tree.element_children(ul);
        assert_eq!(items.len(), 2);
        assert_eq!(full_path(&tree.node(items[1]).unwrap()), "/html/body/ul/li[2]");
    }

    #[test]
    fn test_script_body_is_raw_text() {
        let tree = parse("<html><script>if (a<b) x();</script></html>");
        let script = tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).unwrap().name() == Some("script"))
            .unwrap();
        let text = tree.get(script).unwrap().children()[0];
        assert_eq!(tree.get(text).unwrap().value(), Some("if (a<b) x();"));
        assert_eq!(full_path(&tree.node(script).unwrap()), "/html/head/script");
    }

    #[test]
    fn test_named_entities_decoded() {
        let tree = parse("<p>&nbsp;&copy;</p>");
        let text = tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).unwrap().category() == NodeCategory::Text)
            .unwrap();
        assert_eq!(tree.get(text).unwrap().value(), Some("\u{a0}\u{a9}"));
    }

    #[test]
    fn test_attribute_forms() {
        let tree = parse(r#"<input type=text disabled value='a &amp; b' id="x">"#);
        let input = tree.element_by_id("x").unwrap();
        assert_eq!(tree.attribute(input, "type"), Some("text"));
        assert_eq!(tree.attribute(input, "disabled"), Some(""));
        assert_eq!(tree.attribute(input, "value"), Some("a & b"));
    }

    #[test]
    fn test_doctype_and_comments() {
        let tree = parse("<!DOCTYPE html><!-- top --><html></html>");
        let top = tree.get(tree.root()).unwrap().children();
        let doctype = tree.get(top[0]).unwrap();
        assert_eq!(doctype.category(), NodeCategory::Other);
        assert_eq!(doctype.name(), Some("html"));
        assert_eq!(tree.get(top[1]).unwrap().category(), NodeCategory::Comment);
    }

    #[test]
    fn test_foreign_attribute_keeps_prefix() {
        let tree = parse(r##"<svg><a xlink:href="#top"></a></svg>"##);
        let a = tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).unwrap().name() == Some("a"))
            .unwrap();
        let attr = tree.attribute_node(a, "xlink:href").unwrap();
        assert_eq!(tree.node(attr).unwrap().local_name(), Some("href"));
        assert_eq!(full_path(&tree.node(attr).unwrap()), "/@xlink:href");
    }

    #[test]
    fn test_whitespace_text_shifts_text_index() {
        let input = "<p><b>x</b> <i>y</i> tail</p>";
        let tail_path = |tree: &DocTree| {
            let p = tree
                .descendants(tree.root())
                .into_iter()
                .find(|&id| tree.get(id).unwrap().name() == Some("p"))
                .unwrap();
            let last = *tree.get(p).unwrap().children().last().unwrap();
            full_path(&tree.node(last).unwrap())
        };

        let kept = parse(input);
        assert_eq!(tail_path(&kept), "/html/body/p/text()[2]");

        let options = ParseOptions {
            drop_whitespace: true,
        };
        let dropped = read(input, &options).unwrap();
        assert_eq!(tail_path(&dropped), "/html/body/p/text()");
    }
}
