//! XML input, read event by event with quick-xml.

use super::{tree_error, ParseOptions};
use crate::document::error::MarkupError;
use crate::document::node::NodeId;
use crate::document::tree::DocTree;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;

/// An element that has been opened but not yet closed.
struct OpenElement {
    id: NodeId,
    name: String,
    position: usize,
}

pub(super) fn read(input: &str, options: &ParseOptions) -> Result<DocTree, MarkupError> {
    let mut reader = Reader::from_str(input);
    // End tags are matched below so mismatches carry both names.
    reader.config_mut().check_end_names = false;

    let mut tree = DocTree::new();
    let mut open: Vec<OpenElement> = Vec::new();

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|err| syntax_error(err, reader.buffer_position() as usize))?;
        let parent = open.last().map_or_else(|| tree.root(), |element| element.id);

        match event {
            Event::Start(start) => {
                let (id, name) = open_element(&mut tree, parent, &start, position)?;
                open.push(OpenElement { id, name, position });
            }
            Event::Empty(start) => {
                open_element(&mut tree, parent, &start, position)?;
            }
            Event::End(end) => {
                let found = utf8(end.name().as_ref(), position)?;
                match open.pop() {
                    Some(element) if element.name == found => {}
                    Some(element) => {
                        return Err(MarkupError::MismatchedTag {
                            expected: element.name,
                            found,
                            position,
                        })
                    }
                    None => return Err(MarkupError::UnmatchedEndTag { found, position }),
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| syntax_error(err, position))?;
                if open.is_empty() {
                    // Only whitespace may surround the root element.
                    if !text.trim().is_empty() {
                        return Err(MarkupError::Syntax {
                            message: "Text outside the root element".to_string(),
                            position,
                        });
                    }
                } else if options.keeps_text(&text) {
                    tree.append_text(parent, &text).map_err(tree_error)?;
                }
            }
            Event::CData(cdata) => {
                let text = utf8(&cdata, position)?;
                tree.append_cdata(parent, &text).map_err(tree_error)?;
            }
            Event::Comment(comment) => {
                let text = utf8(&comment, position)?;
                tree.append_comment(parent, &text).map_err(tree_error)?;
            }
            Event::PI(instruction) => {
                let body = utf8(&instruction, position)?;
                let (target, data) = match body.split_once(char::is_whitespace) {
                    Some((target, data)) => (target, data.trim()),
                    None => (body.as_str(), ""),
                };
                tree.append_processing_instruction(parent, target, data)
                    .map_err(tree_error)?;
            }
            // The XML declaration is not a node.
            Event::Decl(_) => {}
            Event::DocType(doctype) => {
                let body = utf8(&doctype, position)?;
                let name = body.split_whitespace().next().unwrap_or("doctype");
                tree.append_other(parent, name).map_err(tree_error)?;
            }
            Event::Eof => break,
        }
    }

    if let Some(element) = open.pop() {
        return Err(MarkupError::UnclosedTag {
            name: element.name,
            position: element.position,
        });
    }

    log::debug!("Read XML document with {} nodes", tree.len());
    Ok(tree)
}

/// Appends an element with its attributes, returning its id and qualified name.
fn open_element(
    tree: &mut DocTree,
    parent: NodeId,
    start: &BytesStart<'_>,
    position: usize,
) -> Result<(NodeId, String), MarkupError> {
    let name = utf8(start.name().as_ref(), position)?;
    let element = tree.append_element(parent, &name).map_err(tree_error)?;

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| syntax_error(err, position))?;
        let key = utf8(attribute.key.as_ref(), position)?;
        let value = attribute
            .unescape_value()
            .map_err(|err| syntax_error(err, position))?;
        tree.set_attribute(element, &key, &value)
            .map_err(tree_error)?;
    }

    Ok((element, name))
}

fn utf8(bytes: &[u8], position: usize) -> Result<String, MarkupError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| syntax_error(err, position))
}

fn syntax_error(err: impl Display, position: usize) -> MarkupError {
    MarkupError::Syntax {
        message: err.to_string(),
        position,
    }
}
