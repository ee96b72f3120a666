use std::path::PathBuf;

/// How a file's content was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStatus {
    /// Decoded text, with invalid UTF-8 replaced.
    Text,
    /// Larger than the configured limit; content is a placeholder.
    TooLarge,
    /// Reading failed; the reason is kept for the error line.
    Unreadable(String),
}

/// A single dumped file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the dump root.
    pub path: PathBuf,
    /// The decoded content.
    ///
    /// Empty when the file could not be read, and a placeholder like
    /// `[File too large, content omitted]` when it exceeded the size limit.
    pub content: String,
    pub status: ContentStatus,
}

impl FileEntry {
    /// Whether the content is real text worth summarizing.
    pub fn is_text(&self) -> bool {
        self.status == ContentStatus::Text
    }
}
