//! Serde-based tree descriptions.
//!
//! Besides markup, documents can be described as nested JSON or YAML
//! records. This is handy for fixtures that need node shapes markup cannot
//! express directly, such as adjacent text and CDATA siblings.
//!
//! ```yaml
//! - name: html
//!   children:
//!     - name: body
//!       id: main
//!       attributes: { class: wide }
//!       children:
//!         - kind: text
//!           text: hello
//! ```

use crate::document::node::NodeId;
use crate::document::tree::{DocTree, ID_ATTRIBUTE};
use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::Deserialize;

/// Kinds of node a description can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecKind {
    #[default]
    Element,
    Text,
    Cdata,
    Comment,
    ProcessingInstruction,
    Other,
}

/// One described node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub kind: SpecKind,
    /// Tag name, processing instruction target or other-node name.
    pub name: Option<String>,
    /// Shorthand for an `id` attribute.
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    /// Character data for text, CDATA, comments and processing instructions.
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// A description holds either a single top-level node or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Many(Vec<NodeSpec>),
    One(NodeSpec),
}

impl Description {
    fn into_nodes(self) -> Vec<NodeSpec> {
        match self {
            Description::Many(nodes) => nodes,
            Description::One(node) => vec![node],
        }
    }
}

/// Builds a document whose top-level children are described by `description`.
pub fn build_tree(description: Description) -> Result<DocTree> {
    let mut tree = DocTree::new();
    let root = tree.root();
    for spec in description.into_nodes() {
        append_spec(&mut tree, root, &spec)?;
    }
    Ok(tree)
}

fn append_spec(tree: &mut DocTree, parent: NodeId, spec: &NodeSpec) -> Result<NodeId> {
    let text = spec.text.as_deref().unwrap_or_default();

    let id = match spec.kind {
        SpecKind::Element => {
            let name = match spec.name.as_deref() {
                Some(name) => name,
                None => bail!("Element description is missing a name"),
            };
            let element = tree.append_element(parent, name)?;
            if let Some(id) = &spec.id {
                tree.set_attribute(element, ID_ATTRIBUTE, id)?;
            }
            for (name, value) in &spec.attributes {
                tree.set_attribute(element, name, value)?;
            }
            element
        }
        SpecKind::Text => tree.append_text(parent, text)?,
        SpecKind::Cdata => tree.append_cdata(parent, text)?,
        SpecKind::Comment => tree.append_comment(parent, text)?,
        SpecKind::ProcessingInstruction => {
            let target = match spec.name.as_deref() {
                Some(target) => target,
                None => bail!("Processing instruction description is missing a target name"),
            };
            tree.append_processing_instruction(parent, target, text)?
        }
        SpecKind::Other => tree.append_other(parent, spec.name.as_deref().unwrap_or_default())?,
    };

    if spec.kind != SpecKind::Element && (!spec.children.is_empty() || !spec.attributes.is_empty())
    {
        bail!("Only elements can have children or attributes");
    }
    for child in &spec.children {
        append_spec(tree, id, child)?;
    }
    Ok(id)
}
