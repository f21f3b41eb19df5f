//! Trellis CLI
//!
//! Lays out a JSON document description and prints the resulting box tree.

mod document;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use trellis_common::Warning;
use trellis_css::{
    ApproximateFontMetrics, BoxType, EdgeSizes, LayoutBox, ReplacedContent, Size,
    create_layout_with_diagnostics,
};
use trellis_dom::ElementData;

use document::Document;

/// Trellis: lay out a styled document and print its box tree
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the box tree of a document at 800px
    trellis page.json

    # Narrow viewport, JSON output
    trellis --width 320 --format json page.json

    # Inline document
    trellis --json '{"tag":"div","style":{"display":"block"},"children":[{"text":"hi"}]}'
"#)]
struct Cli {
    /// Path to a JSON document description
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a document description given on the command line instead
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// Width of the initial containing block in pixels
    #[arg(short, long, default_value = "800")]
    width: f32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Do not print warnings to stderr
    #[arg(long)]
    no_warnings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented, human-readable box tree
    Text,
    /// The layout serialized as JSON
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let doc = load_doc(&cli)?;
    let tree = doc.styled_tree().context("building the styled tree")?;
    let output = create_layout_with_diagnostics(
        &tree,
        cli.width,
        &ApproximateFontMetrics,
        &intrinsic_size_from_attrs,
    );

    if !cli.no_warnings {
        for warning in &output.warnings {
            print_warning(warning);
        }
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => match &output.root {
            Some(root) => {
                println!("=== Layout Tree (width: {}) ===\n", cli.width);
                print_layout_box(root, 0);
            }
            None => println!("The root generates no box"),
        },
    }
    Ok(())
}

/// Load the document named by the CLI arguments.
fn load_doc(cli: &Cli) -> anyhow::Result<Document> {
    if let Some(ref json) = cli.json {
        Ok(Document::parse(json)?)
    } else if let Some(ref path) = cli.path {
        Ok(Document::load(path)?)
    } else {
        anyhow::bail!("a document file or --json is required")
    }
}

/// `<img width=".." height="..">` gives the image's intrinsic size.
fn intrinsic_size_from_attrs(element: &ElementData) -> Option<Size> {
    let dimension = |name| {
        element
            .attr(name)?
            .trim()
            .trim_end_matches("px")
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
    };
    Some(Size::new(dimension("width")?, dimension("height")?))
}

fn print_warning(warning: &Warning) {
    let line = format!("[trellis {}] ⚠ {warning}", warning.component());
    eprintln!("{}", line.yellow());
}

/// Recursively print a layout box with its dimensions.
fn print_layout_box(layout_box: &LayoutBox<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let dims = &layout_box.dimensions;

    println!("{indent}[{}]", describe(layout_box));
    println!(
        "{indent}  content: x={:.1} y={:.1} w={:.1} h={:.1}",
        dims.content.x, dims.content.y, dims.content.width, dims.content.height
    );
    print_edges(&indent, "margin", &dims.margin);
    print_edges(&indent, "border", &dims.border);
    print_edges(&indent, "padding", &dims.padding);

    for child in &layout_box.children {
        print_layout_box(child, depth + 1);
    }
}

fn print_edges(indent: &str, label: &str, edges: &EdgeSizes) {
    if *edges == EdgeSizes::default() {
        return;
    }
    println!(
        "{indent}  {label}: t={:.1} r={:.1} b={:.1} l={:.1}",
        edges.top, edges.right, edges.bottom, edges.left
    );
}

fn describe(layout_box: &LayoutBox<'_>) -> String {
    let element = || {
        layout_box
            .node
            .and_then(|n| n.element())
            .map_or_else(String::new, |e| format!("<{}>", e.tag_name))
    };
    match &layout_box.box_type {
        BoxType::Block => format!("Block {}", element()),
        BoxType::Inline => format!("Inline {}", element()),
        BoxType::AnonymousBlock => "AnonymousBlock".to_string(),
        BoxType::Text(text) => {
            let preview: String = text.chars().take(30).collect();
            let suffix = if text.chars().count() > 30 { "..." } else { "" };
            format!("Text(\"{}{suffix}\")", preview.replace('\n', "\\n"))
        }
        BoxType::LineBreak => "LineBreak <br>".to_string(),
        BoxType::Replaced { inline, content } => {
            let level = if *inline { "inline" } else { "block" };
            let shows = match content {
                ReplacedContent::Sized(size) => format!("{}x{}", size.width, size.height),
                ReplacedContent::Alt(alt) => format!("alt=\"{alt}\""),
                ReplacedContent::Empty => "empty".to_string(),
            };
            format!("Replaced {} ({level}, {shows})", element())
        }
    }
}
