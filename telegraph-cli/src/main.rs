//! Telegraph CLI
//!
//! Styles and lays out a document description, then prints the box tree.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use telegraph_common::warning::clear_warnings;
use telegraph_css::{
    ApproximateFontMetrics, BoxSnapshot, DEFAULT_VIEWPORT_WIDTH, EdgeSizes, LayoutOptions,
    layout_document,
};
use telegraph_dom::{DomTree, ElementSpec};

/// Telegraph: style resolution and box layout for receipt documents
#[derive(Parser, Debug)]
#[command(name = "telegraph")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Print the box tree of a document
    telegraph receipt.json

    # Add a page stylesheet and lay out for a 576px printer
    telegraph receipt.json --css page.css --width 576

    # Machine-readable geometry
    telegraph receipt.json --format json
")]
struct Cli {
    /// Document description: a JSON element with tag, attrs, text, children and tail
    #[arg(value_name = "FILE")]
    document: PathBuf,

    /// Stylesheet applied after the document's own rules (repeatable)
    #[arg(long = "css", value_name = "FILE")]
    stylesheets: Vec<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: f32,

    /// Do not apply the base stylesheet
    #[arg(long)]
    no_ua: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented box tree with dimensions
    Tree,
    /// The box tree as JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let tree = load_document(&cli)?;
    let stylesheets = cli
        .stylesheets
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read stylesheet {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let extra_css: Vec<&str> = stylesheets.iter().map(String::as_str).collect();

    let options = LayoutOptions {
        viewport_width: cli.width,
        user_agent_styles: !cli.no_ua,
    };
    let Some(root) = layout_document(&tree, &options, &extra_css, &ApproximateFontMetrics) else {
        println!("{}", "document generates no boxes".dimmed());
        return Ok(());
    };

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&root)?),
        Format::Tree => {
            println!("=== Layout Tree (viewport width: {}) ===\n", cli.width);
            print_box(&root, 0);
        }
    }
    Ok(())
}

fn load_document(cli: &Cli) -> Result<DomTree> {
    let source = fs::read_to_string(&cli.document)
        .with_context(|| format!("failed to read {}", cli.document.display()))?;
    let spec: ElementSpec = serde_json::from_str(&source)
        .with_context(|| format!("{} is not a document description", cli.document.display()))?;
    DomTree::from_spec(&spec).with_context(|| format!("invalid document {}", cli.document.display()))
}

/// Recursively print a box with its dimensions
fn print_box(layout_box: &BoxSnapshot, depth: usize) {
    let indent = "  ".repeat(depth);
    let dims = &layout_box.dimensions;

    let name = match (&layout_box.tag, &layout_box.text) {
        (Some(tag), _) => format!("<{tag}>"),
        (None, Some(text)) => {
            let preview: String = text.chars().take(30).collect();
            let suffix = if text.chars().count() > 30 { "..." } else { "" };
            format!("Text(\"{}{suffix}\")", preview.replace('\n', "\\n"))
        }
        (None, None) => String::new(),
    };
    let kind = format!("{:?}", layout_box.kind);

    println!("{indent}[{}] {name}", kind.cyan());
    println!(
        "{indent}  content: x={:.1} y={:.1} w={:.1} h={:.1}",
        dims.content.x, dims.content.y, dims.content.width, dims.content.height
    );
    print_edges(&indent, "margin", dims.margin);
    print_edges(&indent, "border", dims.border);
    print_edges(&indent, "padding", dims.padding);

    for child in &layout_box.children {
        print_box(child, depth + 1);
    }
}

fn print_edges(indent: &str, label: &str, edges: EdgeSizes) {
    if edges != EdgeSizes::default() {
        println!(
            "{indent}  {label}: t={:.1} r={:.1} b={:.1} l={:.1}",
            edges.top, edges.right, edges.bottom, edges.left
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_css_flags() {
        let cli = Cli::try_parse_from([
            "telegraph",
            "doc.json",
            "--css",
            "a.css",
            "--css",
            "b.css",
            "--no-ua",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.stylesheets.len(), 2);
        assert!(cli.no_ua);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.width, DEFAULT_VIEWPORT_WIDTH);
    }
}
