use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal, Write};

use nodepath::config::Config;
use nodepath::document::parser::ParseOptions;
use nodepath::file::loader::{
    load_document_file_as, load_document_file_with, load_document_from_stdin, DocumentFormat,
};
use nodepath::report::{collect_records, partial_records, render_text, ReportOptions};

/// Output formats for the locator listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One locator per line
    Text,
    /// A JSON array of records
    Json,
}

/// Input formats that can be forced on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Html,
    Xml,
    Json,
    Yaml,
}

impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Html => DocumentFormat::Html,
            InputFormat::Xml => DocumentFormat::Xml,
            InputFormat::Json => DocumentFormat::Json,
            InputFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

/// nodepath - XPath-like locators for document nodes
#[derive(Parser)]
#[command(name = "nodepath")]
#[command(version)]
#[command(about = "Print XPath-like locators for the nodes of an HTML/XML document", long_about = None)]
struct Cli {
    /// Document to read: HTML, XML, or a .json/.yaml tree description (omit to read from stdin)
    file: Option<String>,

    /// Read the input as this format instead of guessing from the name or content
    #[arg(short, long, value_enum)]
    input: Option<InputFormat>,

    /// Print canonical locators that always walk to the document root
    #[arg(long)]
    full: bool,

    /// Print only the locator of the element with this id
    #[arg(long)]
    id: Option<String>,

    /// Also print locators for attribute nodes
    #[arg(short, long)]
    attributes: bool,

    /// Prefix each line with the node category
    #[arg(short, long)]
    category: bool,

    /// Skip whitespace-only text nodes (shifts text() indices)
    #[arg(long)]
    drop_whitespace: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load();

    // CLI flags override config values
    let parse_options = ParseOptions {
        drop_whitespace: cli.drop_whitespace || config.drop_whitespace,
    };
    let format = cli.input.map(DocumentFormat::from);

    let tree = if let Some(file_path) = &cli.file {
        let loaded = match format {
            Some(format) => load_document_file_as(file_path, format, &parse_options),
            None => load_document_file_with(file_path, &parse_options),
        };
        loaded.with_context(|| format!("Failed to load {}", file_path))?
    } else if !io::stdin().is_terminal() {
        load_document_from_stdin(format, &parse_options)?
    } else {
        return Err(anyhow!("No input: pass a FILE or pipe a document on stdin"));
    };

    let only = match &cli.id {
        Some(id) => Some(
            tree.element_by_id(id)
                .ok_or_else(|| anyhow!("No element with id '{}'", id))?,
        ),
        None => None,
    };

    let options = ReportOptions {
        optimize: !cli.full && config.optimize,
        include_attributes: cli.attributes || config.include_attributes,
        only,
    };
    let records = collect_records(&tree, &options);

    if config.warn_on_partial {
        for record in partial_records(&records) {
            eprintln!(
                "Warning: locator for node {} is truncated: {}",
                record.node, record.locator.path
            );
        }
    }

    let output = match cli.format {
        OutputFormat::Text => render_text(&records, cli.category || config.show_category),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&records)?;
            json.push('\n');
            json
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
