//! Assembly of complete locators from steps.

use super::step::{encode_step, Step};
use crate::document::node::{NodeCategory, TreeNode};
use serde::Serialize;

/// A computed locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locator {
    /// The XPath-like locator string.
    pub path: String,
    /// False when the walk stopped early because a node was missing from its
    /// parent's children. The path then holds only the steps collected
    /// below that node.
    pub complete: bool,
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Builds the locator for `node`.
///
/// The walk starts at `node` and climbs through its ancestors, stopping at
/// the first anchor step (an id anchor when `optimize` is set, or the
/// document) or when a node has no parent.
pub fn build<N: TreeNode>(node: &N, optimize: bool) -> Locator {
    if node.category() == NodeCategory::Document {
        return Locator {
            path: "/".to_string(),
            complete: true,
        };
    }

    let mut steps: Vec<Step> = Vec::new();
    let mut complete = true;
    let mut current = Some(node.clone());

    while let Some(cursor) = current {
        let step = match encode_step(&cursor, optimize) {
            Ok(step) => step,
            Err(err) => {
                log::warn!("Locator truncated after {} step(s): {}", steps.len(), err);
                complete = false;
                break;
            }
        };
        let is_anchor = step.is_anchor;
        steps.push(step);
        if is_anchor {
            break;
        }
        current = cursor.parent();
    }

    let path = join_steps(steps);
    log::debug!("Computed locator {} (optimize: {})", path, optimize);
    Locator { path, complete }
}

/// Joins steps collected leaf-first into a root-first path.
fn join_steps(mut steps: Vec<Step>) -> String {
    steps.reverse();
    let joined = steps
        .iter()
        .map(|step| step.text.as_str())
        .collect::<Vec<_>>()
        .join("/");

    match steps.first() {
        Some(outermost) if outermost.is_anchor => joined,
        _ => format!("/{}", joined),
    }
}

