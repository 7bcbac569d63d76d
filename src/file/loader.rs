//! Document loading.
//!
//! This module provides functions to load documents from files or stdin,
//! parsing them into `DocTree` structures. HTML is the default input; XML
//! is recognized by extension (`.xml`, `.xhtml`, `.svg`, `.rss`, `.atom`)
//! or by its `<?xml` declaration, and `.json`, `.yaml` and `.yml` files are
//! read as tree descriptions (see [`description`](super::description)).
//! Any of these may be gzipped.

use super::description::{build_tree, Description};
use crate::document::parser::{parse_html_with, parse_xml_with, ParseOptions};
use crate::document::tree::DocTree;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Extensions read as XML rather than HTML.
const XML_EXTENSIONS: &[&str] = &[".xml", ".xhtml", ".svg", ".rss", ".atom"];

/// The input formats nodepath understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// HTML, parsed the way browsers do
    Html,
    /// Well-formed XML
    Xml,
    /// JSON tree description
    Json,
    /// YAML tree description
    Yaml,
}

impl DocumentFormat {
    /// Determines the format from a file name, ignoring a trailing `.gz`.
    ///
    /// Examples:
    /// - `page.html` → Html
    /// - `feed.xml.gz` → Xml
    /// - `tree.json.gz` → Json
    /// - `tree.yml` → Yaml
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path_str = path.as_ref().to_string_lossy().to_lowercase();
        let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

        if base.ends_with(".json") {
            DocumentFormat::Json
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            DocumentFormat::Yaml
        } else if XML_EXTENSIONS.iter().any(|ext| base.ends_with(ext)) {
            DocumentFormat::Xml
        } else {
            DocumentFormat::Html
        }
    }
}

/// Loads and parses a document file with default parse options.
///
/// # Examples
///
/// ```no_run
/// use nodepath::file::loader::load_document_file;
///
/// let tree = load_document_file("page.html").unwrap();
/// ```
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<DocTree> {
    load_document_file_with(path, &ParseOptions::default())
}

/// Loads and parses a document file, choosing the format from its name.
pub fn load_document_file_with<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<DocTree> {
    let format = DocumentFormat::from_path(path.as_ref());
    load_document_file_as(path, format, options)
}

/// Loads and parses a document file in the given format.
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip data
/// - The contents are not valid for the format
pub fn load_document_file_as<P: AsRef<Path>>(
    path: P,
    format: DocumentFormat,
    options: &ParseOptions,
) -> Result<DocTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).context("Failed to read file")?
    };

    log::debug!(
        "Loading {} as {:?} ({} bytes)",
        path_ref.display(),
        format,
        content.len()
    );
    parse_document(&content, format, options)
}

/// Parses `content` in the given format.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    options: &ParseOptions,
) -> Result<DocTree> {
    match format {
        DocumentFormat::Html => parse_html_with(content, options).context("Failed to parse HTML"),
        DocumentFormat::Xml => parse_xml_with(content, options).context("Failed to parse XML"),
        DocumentFormat::Json => {
            let description: Description =
                serde_json::from_str(content).context("Failed to parse JSON tree description")?;
            build_tree(description)
        }
        DocumentFormat::Yaml => {
            let description: Description =
                serde_yaml::from_str(content).context("Failed to parse YAML tree description")?;
            build_tree(description)
        }
    }
}

/// Loads a document from standard input.
///
/// With no explicit `format`, the content decides (see [`parse_detected`]).
/// Gzipped input is detected by its magic bytes.
pub fn load_document_from_stdin(
    format: Option<DocumentFormat>,
    options: &ParseOptions,
) -> Result<DocTree> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    match format {
        Some(format) => parse_document(&content, format, options),
        None => parse_detected(&content, options),
    }
}

/// Parses content whose format is not known up front.
///
/// Content opening with an `<?xml` declaration is XML and any other content
/// starting with `<` is HTML. Anything else is tried as a JSON tree
/// description and then as a YAML one.
pub fn parse_detected(content: &str, options: &ParseOptions) -> Result<DocTree> {
    let trimmed = content.trim_start();
    if trimmed.starts_with("<?xml") {
        return parse_document(content, DocumentFormat::Xml, options);
    }
    if trimmed.starts_with('<') {
        return parse_document(content, DocumentFormat::Html, options);
    }

    if let Ok(tree) = parse_document(content, DocumentFormat::Json, options) {
        return Ok(tree);
    }

    parse_document(content, DocumentFormat::Yaml, options)
        .context("Input is neither markup nor a JSON or YAML tree description")
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    read_gzip(file).context("Failed to decompress gzipped file - file may be corrupted")
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    read_gzip(bytes).context("Failed to decompress gzipped stdin")
}

fn read_gzip<R: std::io::Read>(reader: R) -> std::io::Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(reader);
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    Ok(content)
}
