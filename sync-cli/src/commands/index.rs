//! List the files of an index frame as the local index would track them.

use anyhow::{Context, Result};
use meshsync_core::{binary_prefix, metric_prefix, to_local, File, FileSummary};
use std::path::Path;

use super::read_message;

/// Run the index command.
pub async fn run(path: &Path, json: bool) -> Result<()> {
    let index = read_message(path).await?.into_index()?;
    let files: Vec<File> = index.files.iter().map(to_local).collect();

    if json {
        let summaries: Vec<FileSummary> = files.iter().map(File::summary).collect();
        let out = serde_json::to_string_pretty(&summaries).context("Failed to render JSON")?;
        println!("{out}");
        return Ok(());
    }

    println!("Repository: {}", index.repository);
    println!("Files:      {}", files.len());
    println!();

    for file in &files {
        println!("  {}", describe(file));
    }

    println!();
    println!("{}", total(&files));

    Ok(())
}

/// Summed size of all files, in binary and decimal units.
fn total(files: &[File]) -> String {
    let bytes: i64 = files.iter().map(File::size).sum();
    format!("Total: {}B ({}B)", binary_prefix(bytes), metric_prefix(bytes))
}

/// One listing line: name, size, and state.
fn describe(file: &File) -> String {
    let mut state = Vec::new();
    if file.flags().is_directory() {
        state.push("directory");
    }
    if file.flags().is_deleted() {
        state.push("deleted");
    }
    if file.is_suppressed() {
        state.push("suppressed");
    }

    let mut line = format!(
        "{:<40} {:>12}B  v{}",
        file.name().display(),
        binary_prefix(file.size()),
        file.version()
    );
    if !state.is_empty() {
        line.push_str(&format!("  [{}]", state.join(", ")));
    }
    line
}
