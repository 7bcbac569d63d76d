//! Locator listings for whole documents.
//!
//! The command-line tool prints one locator per node. This module collects
//! those records so the binary only has to choose an output format.

use crate::document::node::{NodeCategory, NodeId, TreeNode};
use crate::document::tree::{DocTree, Node};
use crate::locator::{locate, Locator};
use serde::Serialize;

/// Which nodes to list and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Use id-anchored locators.
    pub optimize: bool,
    /// List each element's attribute nodes after the element.
    pub include_attributes: bool,
    /// Restrict the listing to this node (and its attributes, if enabled).
    pub only: Option<NodeId>,
}

/// The locator of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub node: usize,
    pub category: NodeCategory,
    #[serde(flatten)]
    pub locator: Locator,
}

/// Computes records for the document's nodes in document order.
pub fn collect_records(tree: &DocTree, options: &ReportOptions) -> Vec<Record> {
    let nodes = match options.only {
        Some(id) => vec![id],
        None => tree.descendants(tree.root()),
    };

    let mut records = Vec::new();
    for id in nodes {
        let Some(node) = tree.node(id) else {
            continue;
        };
        records.push(record(node, options.optimize));

        if options.include_attributes {
            for &attr in node.data().attributes() {
                if let Some(attr_node) = tree.node(attr) {
                    records.push(record(attr_node, options.optimize));
                }
            }
        }
    }
    records
}

fn record(node: Node<'_>, optimize: bool) -> Record {
    Record {
        node: node.node_id().index(),
        category: node.category(),
        locator: locate(&node, optimize),
    }
}

/// Renders records one per line, optionally prefixed with the category.
pub fn render_text(records: &[Record], show_category: bool) -> String {
    let mut output = String::new();
    for record in records {
        if show_category {
            output.push_str(record.category.label());
            output.push('\t');
        }
        output.push_str(&record.locator.path);
        output.push('\n');
    }
    output
}

/// Returns the records whose locator is truncated.
pub fn partial_records(records: &[Record]) -> impl Iterator<Item = &Record> {
    records.iter().filter(|record| !record.locator.complete)
}
