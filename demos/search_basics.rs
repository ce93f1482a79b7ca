//! Basic search walkthrough.
//!
//! Demonstrates the default file-list mode, content mode with context,
//! and glob/type filtering over a generated directory tree.
//!
//! Run with: cargo run --example search_basics
//! Debug: RUST_LOG=debug cargo run --example search_basics

use std::fs;

use anyhow::{Context, Result};
use linesift::{OutputMode, SearchRequest, search};
use tempfile::TempDir;

fn main() -> Result<()> {
    env_logger::init();
    println!("=== Search Basics ===\n");

    let tree = create_tree().context("failed to create demo tree")?;
    let root = tree.path().to_path_buf();

    // Default mode: which files contain the pattern?
    let matches = search(&SearchRequest {
        pattern: Some("TODO".to_string()),
        root_path: root.clone(),
        ..SearchRequest::default()
    })?;
    println!("files containing TODO:");
    for path in matches.into_files().unwrap_or_default() {
        println!("  {path}");
    }

    // Content mode with one line of context on each side.
    let content = search(&SearchRequest {
        pattern: Some("TODO".to_string()),
        root_path: root.clone(),
        output_mode: OutputMode::Content,
        context: 1,
        line_numbers: true,
        ..SearchRequest::default()
    })?;
    println!("\nmatching lines with context:");
    for line in content.into_lines().unwrap_or_default() {
        println!("  {line}");
    }

    // Filters compose: glob AND type.
    let filtered = search(&SearchRequest {
        pattern: Some("fn ".to_string()),
        root_path: root,
        glob: Some("src/*.rs".to_string()),
        types: vec!["rust".to_string()],
        ..SearchRequest::default()
    })?;
    println!("\nrust sources under src/ defining functions:");
    for path in filtered.into_files().unwrap_or_default() {
        println!("  {path}");
    }

    Ok(())
}

fn create_tree() -> Result<TempDir> {
    let dir = TempDir::new().context("failed to create temp directory")?;
    let base = dir.path();

    fs::create_dir(base.join("src")).context("failed to create src/")?;
    fs::write(
        base.join("src/main.rs"),
        "fn main() {\n    // TODO: wire up arguments\n    run();\n}\n",
    )
    .context("failed to write main.rs")?;
    fs::write(
        base.join("src/lib.rs"),
        "pub fn run() {\n    println!(\"running\");\n}\n",
    )
    .context("failed to write lib.rs")?;
    fs::write(
        base.join("notes.md"),
        "# Notes\n\nTODO: expand this document.\n",
    )
    .context("failed to write notes.md")?;

    Ok(dir)
}
