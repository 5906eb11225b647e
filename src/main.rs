//! structdoc — generate documentation for Go struct declarations.
//!
//! Walks Go source files, extracts exported struct types with their
//! fields, tags and comments, and renders the result as markdown, HTML,
//! or JSON:
//!
//! ```text
//! structdoc -t json --title "API Models" -o docs.md ./models
//! ```

mod extract;
mod model;
mod parser;
mod render;
mod tag;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "structdoc",
    about = "Generate documentation for Go struct declarations"
)]
struct Cli {
    /// Input files, directories (scanned recursively for .go files), or
    /// glob patterns.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Output file. Writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Tag convention that supplies field display names (e.g. json)
    #[arg(short = 't', long = "field-tag")]
    field_tag: Option<String>,

    /// Documentation title
    #[arg(long, default_value = "Go Structs Documentation")]
    title: String,

    /// Hide the Exported column
    #[arg(long = "no-exported")]
    no_exported: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let opts = model::Options {
        field_name_tag: cli.field_tag.clone(),
        title: cli.title.clone(),
        show_exported: !cli.no_exported,
    };

    let files = expand_paths(&cli.paths)?;
    if files.is_empty() {
        anyhow::bail!("no Go source files found");
    }

    let units = parser::load_units(&files)?;
    let mut decls = extract::extract(&units, &opts);
    model::normalize(&mut decls);

    let renderer = render::create_renderer(&cli.format)?;
    let output = renderer.render(&decls, &opts);

    match cli.output {
        Some(ref path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", output),
    }

    Ok(())
}

/// Expand files, directories, and glob patterns into a sorted, deduped
/// list of source files. Sorting makes the declaration order
/// deterministic regardless of how the inputs were given.
fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            collect_go_files(path, &mut files)?;
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively collect `.go` files under a directory.
fn collect_go_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_go_files(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("go") {
            files.push(path);
        }
    }
    Ok(())
}
