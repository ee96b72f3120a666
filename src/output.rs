//! Text rendering for dump results.
//!
//! Every piece of output is a plain string so callers can stream it to
//! standard output as soon as it is ready. Content is copied verbatim.

use crate::error::DumperError;
use crate::summarize::Summarizer;
use crate::types::{ContentStatus, FileEntry};
use std::io::Write;

/// The tree block, followed by a blank line.
pub fn format_tree(tree: &str) -> String {
    let mut out = String::with_capacity(tree.len() + 2);
    out.push_str(tree);
    if !tree.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Header, content and a blank separator line for one file.
///
/// Unreadable files keep their header and get an error line in place of the
/// content.
pub fn format_file_block(file: &FileEntry) -> String {
    let mut out = String::with_capacity(file.content.len() + 64);
    out.push_str(&format!("// File content of {}:\n", file.path.display()));
    match &file.status {
        ContentStatus::Unreadable(reason) => {
            out.push_str(&format!(
                "// ERROR reading {}: {}\n",
                file.path.display(),
                reason
            ));
        }
        ContentStatus::Text | ContentStatus::TooLarge => {
            out.push_str(&file.content);
            if !file.content.is_empty() && !file.content.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out.push('\n');
    out
}

/// A summary placed right after its file block.
pub fn format_summary(summary: &str) -> String {
    let summary = summary.trim_end();
    let mut out = String::with_capacity(summary.len() + 2);
    out.push_str(summary);
    out.push_str("\n\n");
    out
}

/// All file blocks of a dump, in order, without summaries.
pub fn format_files(files: &[FileEntry]) -> String {
    files.iter().map(format_file_block).collect()
}

/// Streams file blocks to `out`, each followed by its summary when a
/// summarizer is given.
///
/// Only text content is summarized. The first summarization failure stops
/// the dump and is returned; blocks already written stay written.
pub fn write_dump<W, I>(
    out: &mut W,
    files: I,
    summarizer: Option<&dyn Summarizer>,
) -> Result<usize, DumperError>
where
    W: Write,
    I: IntoIterator<Item = FileEntry>,
{
    let mut written = 0;
    for file in files {
        emit(out, &format_file_block(&file))?;
        if let Some(summarizer) = summarizer {
            if file.is_text() {
                let summary = summarizer.summarize(&file.path, &file.content)?;
                emit(out, &format_summary(&summary))?;
            }
        }
        written += 1;
    }
    Ok(written)
}

/// Writes the tree block to `out`.
pub fn write_tree<W: Write>(out: &mut W, tree: &str) -> Result<(), DumperError> {
    emit(out, &format_tree(tree))
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<(), DumperError> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| DumperError::io("<output>", e))
}
