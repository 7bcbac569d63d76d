//! Error types for locator computation.

use std::fmt;

/// Errors that can occur while computing a locator step.
///
/// None of these reach callers of [`path`](super::path) or
/// [`full_path`](super::full_path); the builder turns them into a truncated
/// path and reports it through [`Locator::complete`](super::Locator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// A node claims a parent whose children do not include it.
    NodeNotInParent,
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::NodeNotInParent => {
                write!(f, "Node is not among the children of its parent")
            }
        }
    }
}

impl std::error::Error for LocatorError {}
