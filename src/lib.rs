//! # Dumper
//!
//! `dumper` takes a textual snapshot of a directory: a depth-limited tree view
//! followed by the contents of every file that is not ignored, optionally with
//! a short summary of each file written by an OpenAI model.
//!
//! Paths are skipped when their path below the root contains one of the
//! patterns of an [`IgnoreSet`] (plain substrings, not globs). The default set
//! covers the usual Python, Node, Git and IntelliJ artifacts.
//!
//! Everything runs sequentially on the calling thread, in a deterministic
//! order: depth first, sorted by file name at each level.
//!
//! # Example
//!
//! ```no_run
//! use dumper::{DumpBuilder, IgnoreSet, dump_files, render_tree};
//!
//! let options = DumpBuilder::new(".")
//!     .tree_depth(2)
//!     .recursive(true)
//!     .ignore(IgnoreSet::with_defaults(["target"], ["dist"]))
//!     .build();
//!
//! println!("{}", render_tree(&options).expect("Failed to render tree"));
//! for file in dump_files(&options).expect("Failed to dump files") {
//!     println!("{}: {} bytes", file.path.display(), file.content.len());
//! }
//! ```

pub mod config;
mod engine;
mod error;
mod ignore_list;
mod options;
pub mod output;
pub mod summarize;
mod tree;
mod types;

pub use config::SummaryConfig;
pub use engine::{FileStream, dump_files};
pub use error::DumperError;
pub use ignore_list::{DEFAULT_IGNORE_PATTERNS, IgnoreSet};
pub use options::{DumpBuilder, DumpOptions};
pub use summarize::{OpenAiSummarizer, Summarizer};
pub use tree::render_tree;
pub use types::{ContentStatus, FileEntry};
