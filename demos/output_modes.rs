//! The four output shapes over one tree.
//!
//! Run with: cargo run --example output_modes

use std::fs;

use anyhow::{Context, Result};
use linesift::{OutputMode, SearchOutput, SearchRequest, search};
use tempfile::TempDir;

fn main() -> Result<()> {
    env_logger::init();

    let dir = TempDir::new().context("failed to create temp directory")?;
    for (name, body) in [
        ("alpha.txt", "error: one\nfine\nerror: two\n"),
        ("beta.txt", "all good here\n"),
        ("gamma.txt", "error: three\n"),
    ] {
        fs::write(dir.path().join(name), body)
            .with_context(|| format!("failed to write {name}"))?;
    }

    for mode in [
        OutputMode::FilesWithMatches,
        OutputMode::Content,
        OutputMode::Count,
        OutputMode::Files,
    ] {
        let result = search(&SearchRequest {
            pattern: Some("error".to_string()),
            root_path: dir.path().to_path_buf(),
            output_mode: mode,
            line_numbers: true,
            ..SearchRequest::default()
        })?;
        println!("--- {mode} ---");
        match result {
            SearchOutput::Files(paths) => {
                for path in paths {
                    println!("{path}");
                }
            }
            SearchOutput::Lines(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            SearchOutput::Counts(counts) => {
                let mut sorted: Vec<_> = counts.into_iter().collect();
                sorted.sort();
                for (path, count) in sorted {
                    println!("{path}: {count}");
                }
            }
        }
        println!();
    }

    Ok(())
}
