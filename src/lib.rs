//! nodepath computes XPath-like locators for nodes of HTML/XML documents.
//!
//! A locator is a string such as `/html/body/p[2]` or `//*[@id="main"]/p`
//! that an anchoring system stores next to an annotation and evaluates later
//! to find the same node again.
//!
//! - [`document`] models document trees and reads markup into them.
//! - [`locator`] turns any [`TreeNode`](document::TreeNode) into a locator.
//! - [`file`] loads documents from disk or stdin.
//! - [`report`] lists locators for every node of a document.
//! - [`config`] holds the command-line tool's settings.

pub mod config;
pub mod document;
pub mod file;
pub mod locator;
pub mod report;
