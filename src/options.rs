use crate::error::DumperError;
use crate::ignore_list::IgnoreSet;
use std::path::PathBuf;
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub root: PathBuf,
    pub tree_depth: usize,
    pub recursive: bool,
    pub ignore: IgnoreSet,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    pub file_size_limit: Option<u64>,
}
impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            tree_depth: 1,
            recursive: false,
            ignore: IgnoreSet::default(),
            respect_gitignore: false,
            follow_links: false,
            file_size_limit: None,
        }
    }
}
impl DumpOptions {
    /// Checks that the root exists and is a directory.
    pub fn validate(&self) -> Result<(), DumperError> {
        if !self.root.exists() {
            return Err(DumperError::config(format!(
                "root '{}' does not exist",
                self.root.display()
            )));
        }
        if !self.root.is_dir() {
            return Err(DumperError::config(format!(
                "root '{}' is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }
}
#[derive(Debug, Default)]
pub struct DumpBuilder {
    options: DumpOptions,
}
impl DumpBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: DumpOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn tree_depth(mut self, depth: usize) -> Self {
        self.options.tree_depth = depth;
        self
    }
    pub fn recursive(mut self, yes: bool) -> Self {
        self.options.recursive = yes;
        self
    }
    pub fn ignore(mut self, set: IgnoreSet) -> Self {
        self.options.ignore = set;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn file_size_limit(mut self, limit: Option<u64>) -> Self {
        self.options.file_size_limit = limit;
        self
    }
    pub fn build(self) -> DumpOptions {
        self.options
    }
}
