use crate::error::DumperError;
use crate::ignore_list::IgnoreSet;
use crate::options::DumpOptions;
use crate::types::{ContentStatus, FileEntry};
use ignore::WalkBuilder;
use std::fs::{self, FileType};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub(crate) const TOO_LARGE_PLACEHOLDER: &str = "[File too large, content omitted]";

/// One entry produced by [`Walker`], below the root.
#[derive(Debug)]
pub(crate) struct WalkedEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub depth: usize,
    /// Type of the entry itself; a symlink stays a symlink unless links are
    /// followed.
    pub file_type: Option<FileType>,
}

impl WalkedEntry {
    pub fn is_dir(&self) -> bool {
        self.file_type.is_some_and(|t| t.is_dir())
    }
    pub fn is_file(&self) -> bool {
        self.file_type.is_some_and(|t| t.is_file())
    }
}

/// Depth-first walk sorted by file name, with ignored entries pruned
/// together with their subtrees.
pub(crate) struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
}

impl Walker {
    pub fn new(options: &DumpOptions, max_depth: Option<usize>) -> Self {
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .git_ignore(options.respect_gitignore)
            .require_git(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .hidden(false)
            .ignore(false)
            .max_depth(max_depth)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        let root = options.root.clone();
        let ignore = options.ignore.clone();
        {
            let root = root.clone();
            builder.filter_entry(move |entry| !is_pruned(&root, &ignore, entry.path()));
        }
        Self {
            inner: builder.build(),
            root,
        }
    }

    /// Yields every entry below the root, along with the walk errors met on
    /// the way.
    pub fn entries(self) -> impl Iterator<Item = Result<WalkedEntry, DumperError>> {
        let root = self.root;
        self.inner.filter_map(move |result| match result {
            Ok(entry) if entry.depth() == 0 => None,
            Ok(entry) => {
                let path = entry.path().to_path_buf();
                let relative = path.strip_prefix(&root).unwrap_or(path.as_path()).to_path_buf();
                Some(Ok(WalkedEntry {
                    depth: entry.depth(),
                    file_type: entry.file_type(),
                    path,
                    relative,
                }))
            }
            Err(e) => Some(Err(DumperError::Walk(e.to_string()))),
        })
    }

    /// Like [`Walker::entries`], with walk errors logged and skipped.
    pub fn readable_entries(self) -> impl Iterator<Item = WalkedEntry> {
        self.entries().filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
    }
}

fn is_pruned(root: &Path, ignore: &IgnoreSet, path: &Path) -> bool {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => false,
        Ok(relative) => {
            let ignored = ignore.is_ignored(relative);
            if ignored {
                debug!("ignoring {}", relative.display());
            }
            ignored
        }
        Err(_) => ignore.is_ignored(path),
    }
}

fn read_file_content(path: &Path, size_limit: Option<u64>) -> Result<(String, ContentStatus), DumperError> {
    if let Some(limit) = size_limit {
        let metadata = fs::metadata(path).map_err(|e| DumperError::io(path, e))?;
        if metadata.len() > limit {
            debug!(
                "File too large ({} > {}), skipping content",
                metadata.len(),
                limit
            );
            return Ok((TOO_LARGE_PLACEHOLDER.to_string(), ContentStatus::TooLarge));
        }
    }
    let bytes = fs::read(path).map_err(|e| DumperError::io(path, e))?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), ContentStatus::Text))
}

fn load_entry(walked: WalkedEntry, size_limit: Option<u64>) -> FileEntry {
    match read_file_content(&walked.path, size_limit) {
        Ok((content, status)) => FileEntry {
            path: walked.relative,
            content,
            status,
        },
        Err(e) => {
            let reason = match e {
                DumperError::Io { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            warn!("could not read {}: {}", walked.relative.display(), reason);
            FileEntry {
                path: walked.relative,
                content: String::new(),
                status: ContentStatus::Unreadable(reason),
            }
        }
    }
}

/// Lazily reads the files selected by a [`DumpOptions`], one at a time.
///
/// Only direct children of the root are visited unless `recursive` is set.
/// Files that cannot be read are still yielded, with
/// [`ContentStatus::Unreadable`].
pub struct FileStream {
    entries: Box<dyn Iterator<Item = WalkedEntry>>,
    size_limit: Option<u64>,
}

impl FileStream {
    pub fn new(options: &DumpOptions) -> Result<Self, DumperError> {
        options.validate()?;
        debug!(
            "Starting dump with root: {} (recursive: {})",
            options.root.display(),
            options.recursive
        );
        let max_depth = if options.recursive { None } else { Some(1) };
        let entries = Walker::new(options, max_depth)
            .readable_entries()
            .filter(|entry| entry.is_file());
        Ok(Self {
            entries: Box::new(entries),
            size_limit: options.file_size_limit,
        })
    }
}

impl Iterator for FileStream {
    type Item = FileEntry;
    fn next(&mut self) -> Option<Self::Item> {
        let walked = self.entries.next()?;
        Some(load_entry(walked, self.size_limit))
    }
}

/// Reads every selected file eagerly, in traversal order.
pub fn dump_files(options: &DumpOptions) -> Result<Vec<FileEntry>, DumperError> {
    Ok(FileStream::new(options)?.collect())
}
