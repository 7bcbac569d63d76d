//! Markup parsing into document trees.
//!
//! HTML goes through html5ever, which applies the browser parsing rules:
//! tag names are lowercased, end tags are implied, `<script>` and `<style>`
//! bodies are raw text and named character references are decoded. The
//! resulting DOM is copied into a [`DocTree`], so locators computed here
//! match what a browser's `localName` and child lists would give.
//!
//! XML goes through quick-xml and is strict: names are case-sensitive, end
//! tags must match and unknown entities are errors.
//!
//! Every text node is kept unless [`ParseOptions::drop_whitespace`] is set.
//! Dropping whitespace-only text shifts `text()` indices, so the resulting
//! locators only resolve against a tree that was read the same way.
//!
//! # Example
//!
//! ```
//! use nodepath::document::parser::{parse_html, parse_xml};
//!
//! let page = parse_html("<P id=main>Hi &copy; 2024").unwrap();
//! assert!(page.element_by_id("main").is_some());
//!
//! let feed = parse_xml(r#"<feed><entry id="e1"/></feed>"#).unwrap();
//! assert!(feed.element_by_id("e1").is_some());
//! ```

mod html;
mod xml;

use super::error::MarkupError;
use super::tree::DocTree;

/// Options controlling how markup is turned into a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip text nodes that contain only whitespace.
    pub drop_whitespace: bool,
}

impl ParseOptions {
    fn keeps_text(&self, text: &str) -> bool {
        !(self.drop_whitespace && text.trim().is_empty())
    }
}

/// Parses an HTML document with default options.
pub fn parse_html(input: &str) -> Result<DocTree, MarkupError> {
    parse_html_with(input, &ParseOptions::default())
}

/// Parses an HTML document.
///
/// HTML parsing never rejects input; malformed markup is repaired the way
/// browsers repair it.
pub fn parse_html_with(input: &str, options: &ParseOptions) -> Result<DocTree, MarkupError> {
    html::read(input, options)
}

/// Parses an XML document with default options.
pub fn parse_xml(input: &str) -> Result<DocTree, MarkupError> {
    parse_xml_with(input, &ParseOptions::default())
}

/// Parses an XML document.
pub fn parse_xml_with(input: &str, options: &ParseOptions) -> Result<DocTree, MarkupError> {
    xml::read(input, options)
}

fn tree_error(error: anyhow::Error) -> MarkupError {
    MarkupError::Tree(error.to_string())
}
