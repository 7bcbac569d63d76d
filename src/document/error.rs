//! Error types for markup parsing.

use std::fmt;

/// Errors that can occur while reading markup.
///
/// Positions are byte offsets into the input. HTML input only ever fails
/// with `Tree`; the other variants come from the XML reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The input is not well-formed.
    Syntax { message: String, position: usize },
    /// An end tag did not match the innermost open element.
    MismatchedTag {
        expected: String,
        found: String,
        position: usize,
    },
    /// An end tag appeared with no open element.
    UnmatchedEndTag { found: String, position: usize },
    /// Input ended while an element was still open.
    UnclosedTag { name: String, position: usize },
    /// A parsed node could not be added to the tree.
    Tree(String),
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::Syntax { message, position } => {
                write!(f, "Invalid markup at position {}: {}", position, message)
            }
            MarkupError::MismatchedTag {
                expected,
                found,
                position,
            } => write!(
                f,
                "Mismatched end tag '</{}>' at position {}, expected '</{}>'",
                found, position, expected
            ),
            MarkupError::UnmatchedEndTag { found, position } => write!(
                f,
                "End tag '</{}>' at position {} has no matching start tag",
                found, position
            ),
            MarkupError::UnclosedTag { name, position } => write!(
                f,
                "Element '<{}>' opened at position {} is never closed",
                name, position
            ),
            MarkupError::Tree(message) => write!(f, "Cannot build tree: {}", message),
        }
    }
}

impl std::error::Error for MarkupError {}
