//! Integration tests for locator generation over parsed markup.

use nodepath::document::node::{NodeCategory, NodeId, TreeNode};
use nodepath::document::parser::{parse_html, parse_html_with, parse_xml, ParseOptions};
use nodepath::document::tree::DocTree;
use nodepath::locator::{full_path, locate, path};

/// Finds the nth element (document order) with the given local name.
fn nth_element(tree: &DocTree, name: &str, n: usize) -> NodeId {
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| {
            let node = tree.node(id).unwrap();
            node.category() == NodeCategory::Element && node.local_name() == Some(name)
        })
        .nth(n)
        .unwrap_or_else(|| panic!("no element <{}> #{}", name, n))
}

fn children(tree: &DocTree, parent: NodeId) -> Vec<NodeId> {
    tree.get(parent).unwrap().children().to_vec()
}

// ============================================================================
// Document root
// ============================================================================

#[test]
fn test_document_root_locators() {
    let tree = parse_html("<html><body></body></html>").unwrap();
    let document = tree.document();
    assert_eq!(path(&document), "/");
    assert_eq!(full_path(&document), "/");
    assert!(locate(&document, true).complete);
}

// ============================================================================
// Canonical and optimized element paths
// ============================================================================

#[test]
fn test_html_body_p_optimized() {
    let tree = parse_html(r#"<html><body id="main"><p>text</p></body></html>"#).unwrap();
    let p = tree.node(nth_element(&tree, "p", 0)).unwrap();
    assert_eq!(path(&p), r#"//*[@id="main"]/p"#);
}

#[test]
fn test_html_body_p_canonical() {
    let tree = parse_html(r#"<html><body id="main"><p>text</p></body></html>"#).unwrap();
    let p = tree.node(nth_element(&tree, "p", 0)).unwrap();
    assert_eq!(full_path(&p), "/html/body/p");
}

#[test]
fn test_canonical_paths_never_use_ids() {
    let tree = parse_html(
        r#"<html id="root"><body id="b"><div id="d"><span id="s">x</span></div></body></html>"#,
    )
    .unwrap();
    for id in tree.descendants(tree.root()) {
        let node = tree.node(id).unwrap();
        if node.category() != NodeCategory::Element {
            continue;
        }
        let canonical = full_path(&node);
        assert!(canonical.starts_with('/'), "{}", canonical);
        assert!(!canonical.contains("@id"), "{}", canonical);
    }
}

#[test]
fn test_id_anchor_regardless_of_depth() {
    let tree = parse_xml(r#"<a><b><c><d><e id="deep"></e></d></c></b></a>"#).unwrap();
    let e = tree.node(tree.element_by_id("deep").unwrap()).unwrap();
    assert_eq!(path(&e), r#"//*[@id="deep"]"#);
    assert_eq!(full_path(&e), "/a/b/c/d/e");
}

#[test]
fn test_nearest_id_wins() {
    let tree = parse_html(
        r#"<html id="outer"><body><div id="inner"><p>x</p></div></body></html>"#,
    )
    .unwrap();
    let p = tree.node(nth_element(&tree, "p", 0)).unwrap();
    assert_eq!(path(&p), r#"//*[@id="inner"]/p"#);
}

#[test]
fn test_id_containing_double_quote() {
    let tree = parse_xml(r#"<div id='say "hi"'></div>"#).unwrap();
    let div = tree.node(nth_element(&tree, "div", 0)).unwrap();
    assert_eq!(path(&div), r#"//*[@id='say "hi"']"#);
}

// ============================================================================
// Sibling indices
// ============================================================================

#[test]
fn test_list_items_indexed_in_document_order() {
    let tree = parse_xml("<ul><li>a</li><li>b</li></ul>").unwrap();
    let first = tree.node(nth_element(&tree, "li", 0)).unwrap();
    let second = tree.node(nth_element(&tree, "li", 1)).unwrap();

    assert_eq!(full_path(&first), "/ul/li[1]");
    assert_eq!(full_path(&second), "/ul/li[2]");
    assert_eq!(path(&first), "/ul/li[1]");
    assert_eq!(path(&second), "/ul/li[2]");
}

#[test]
fn test_unique_name_has_no_index() {
    let tree = parse_xml("<div><h1>t</h1><p>a</p><span>b</span></div>").unwrap();
    for name in ["h1", "p", "span"] {
        let node = tree.node(nth_element(&tree, name, 0)).unwrap();
        let locator = full_path(&node);
        assert!(!locator.contains('['), "{}", locator);
    }
}

#[test]
fn test_index_counts_preceding_similar_siblings() {
    let tree = parse_xml("<div><p>1</p><span>x</span><p>2</p><!--c--><p>3</p></div>").unwrap();
    for k in 0..3 {
        let node = tree.node(nth_element(&tree, "p", k)).unwrap();
        assert_eq!(full_path(&node), format!("/div/p[{}]", k + 1));
    }
}

#[test]
fn test_text_nodes_indexed_around_elements() {
    let tree = parse_xml("<p>before<br/>middle<![CDATA[raw]]><!--note-->after</p>").unwrap();
    let p = nth_element(&tree, "p", 0);
    let paths: Vec<String> = children(&tree, p)
        .into_iter()
        .map(|id| full_path(&tree.node(id).unwrap()))
        .collect();
    assert_eq!(
        paths,
        vec![
            "/p/text()[1]",
            "/p/br",
            "/p/text()[2]",
            "/p/text()[3]",
            "/p/comment()",
            "/p/text()[4]",
        ]
    );
}

#[test]
fn test_processing_instruction_and_doctype() {
    let tree = parse_xml("<!DOCTYPE html><?a x?><?b y?><html></html>").unwrap();
    let top = children(&tree, tree.root());
    let paths: Vec<String> = top
        .iter()
        .map(|&id| full_path(&tree.node(id).unwrap()))
        .collect();
    assert_eq!(
        paths,
        vec![
            // Doctype nodes have no step of their own.
            "/".to_string(),
            "/processing-instruction()[1]".to_string(),
            "/processing-instruction()[2]".to_string(),
            "/html".to_string(),
        ]
    );
}

#[test]
fn test_prefixed_elements_use_local_name() {
    let tree = parse_xml("<svg:svg><svg:g><svg:rect/><svg:rect/></svg:g></svg:svg>").unwrap();
    let rect = tree.node(nth_element(&tree, "rect", 1)).unwrap();
    assert_eq!(full_path(&rect), "/svg/g/rect[2]");
}

#[test]
fn test_html_repairs_match_browser_tree() {
    let tree = parse_html("<HTML><BODY><UL><LI>one<LI id=two>two</UL>").unwrap();
    let second = tree.node(tree.element_by_id("two").unwrap()).unwrap();
    assert_eq!(full_path(&second), "/html/body/ul/li[2]");
    assert_eq!(path(&second), r#"//*[@id="two"]"#);
}

#[test]
fn test_whitespace_text_keeps_its_index() {
    let input = "<p><b>x</b> <i>y</i> tail</p>";
    let tail = |tree: &DocTree| {
        let p = nth_element(tree, "p", 0);
        let last = *children(tree, p).last().unwrap();
        full_path(&tree.node(last).unwrap())
    };

    let tree = parse_html(input).unwrap();
    assert_eq!(tail(&tree), "/html/body/p/text()[2]");

    let options = ParseOptions {
        drop_whitespace: true,
    };
    let trimmed = parse_html_with(input, &options).unwrap();
    assert_eq!(tail(&trimmed), "/html/body/p/text()");
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_attribute_locator() {
    let tree = parse_xml(r##"<a xlink:href="#top">top</a>"##).unwrap();
    let a = nth_element(&tree, "a", 0);
    let attr = tree.attribute_node(a, "xlink:href").unwrap();
    assert_eq!(full_path(&tree.node(attr).unwrap()), "/@xlink:href");
    assert_eq!(tree.owner_element(attr), Some(a));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_locators_are_stable() {
    let tree = parse_html(
        r#"<html><body id="main"><ul><li>a</li><li>b<!--x--></li></ul></body></html>"#,
    )
    .unwrap();
    for id in tree.descendants(tree.root()) {
        let node = tree.node(id).unwrap();
        assert_eq!(path(&node), path(&node));
        assert_eq!(full_path(&node), full_path(&node));
        assert!(locate(&node, true).complete);
        assert!(locate(&node, false).complete);
    }
}

#[test]
fn test_cloned_tree_yields_same_locators() {
    let tree = parse_xml("<ul><li>a</li><li>b</li></ul>").unwrap();
    let copy = tree.clone();
    let li = nth_element(&tree, "li", 1);
    assert_eq!(
        full_path(&tree.node(li).unwrap()),
        full_path(&copy.node(li).unwrap())
    );
}
