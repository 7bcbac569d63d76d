//! Document trees: node model, arena storage and markup parsing.

pub mod error;
pub mod node;
pub mod parser;
pub mod tree;

pub use error::MarkupError;
pub use node::{NodeCategory, NodeData, NodeId, TreeNode};
pub use parser::{parse_html, parse_html_with, parse_xml, parse_xml_with, ParseOptions};
pub use tree::{DocTree, Node};
