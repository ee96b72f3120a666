//! Command-line interface for dumper.
//!
//! Prints the tree of a directory and the contents of its files to standard
//! output, optionally followed by an AI summary of each file. Logs go to
//! standard error.

use clap::{ArgAction, Parser};
use dumper::config::DEFAULT_MODEL;
use dumper::{
    DumpBuilder, DumpOptions, DumperError, FileStream, IgnoreSet, OpenAiSummarizer, Summarizer,
    SummaryConfig, output, render_tree,
};
use std::io;
use std::path::PathBuf;
use std::process::exit;
use tracing::{Level, debug, info};

/// dumper — dump a directory tree and its file contents as text
#[derive(Parser)]
#[command(name = "dumper", version, about, long_about = None)]
struct Cli {
    /// Directory to dump, e.g. --root /path/to/dir
    #[arg(long)]
    root: PathBuf,

    /// Depth of the tree view
    #[arg(long, default_value_t = 1)]
    tree_depth: usize,

    /// Recurse into subdirectories when dumping contents
    #[arg(long, overrides_with = "no_recursive")]
    recursive: bool,

    /// Only dump the direct children of the root (default)
    #[arg(long, overrides_with = "recursive")]
    no_recursive: bool,

    /// Extra substrings to skip, comma-separated (can be repeated)
    #[arg(long, value_delimiter = ',')]
    add_ignore_list: Vec<String>,

    /// Substrings to drop from the ignore list, comma-separated (can be repeated)
    #[arg(long, value_delimiter = ',')]
    remove_ignore_list: Vec<String>,

    /// Print the tree and stop
    #[arg(long, conflicts_with = "no_tree")]
    only_tree: bool,

    /// Skip the tree view
    #[arg(long)]
    no_tree: bool,

    /// Summarize each file with an OpenAI model
    #[arg(long)]
    sum_up_files: bool,

    /// Model used for summaries
    #[arg(long, default_value = DEFAULT_MODEL)]
    model_name: String,

    /// OpenAI API key (falls back to OPENAI_API_KEY)
    #[arg(long)]
    openai_api_key: Option<String>,

    /// Base URL of the chat-completions API (falls back to OPENAI_BASE_URL)
    #[arg(long)]
    api_base: Option<String>,

    /// File size limit in bytes (larger files have their content omitted)
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Honor .gitignore files
    #[arg(long)]
    gitignore: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy)]
struct Mode {
    show_tree: bool,
    only_tree: bool,
}

fn split_patterns(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl Cli {
    /// Builds every piece of configuration, failing before any output.
    fn into_parts(self) -> Result<(DumpOptions, Mode, Option<SummaryConfig>), DumperError> {
        let ignore = IgnoreSet::with_defaults(
            split_patterns(self.add_ignore_list),
            split_patterns(self.remove_ignore_list),
        );
        debug!("Ignore patterns: {:?}", ignore.patterns());

        let options = DumpBuilder::new(self.root)
            .tree_depth(self.tree_depth)
            .recursive(self.recursive && !self.no_recursive)
            .ignore(ignore)
            .respect_gitignore(self.gitignore)
            .follow_links(self.follow_links)
            .file_size_limit(self.max_file_size)
            .build();
        options.validate()?;

        let mode = Mode {
            show_tree: !self.no_tree,
            only_tree: self.only_tree,
        };

        let summary = if self.sum_up_files {
            Some(SummaryConfig::resolve(
                self.model_name,
                self.openai_api_key,
                self.api_base,
            )?)
        } else {
            None
        };

        Ok((options, mode, summary))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DumperError> {
    let (options, mode, summary) = cli.into_parts()?;
    let summarizer = summary.map(OpenAiSummarizer::new).transpose()?;
    if let Some(ref s) = summarizer {
        info!("Summaries enabled with model {}", s.model());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if mode.show_tree {
        let tree = render_tree(&options)?;
        output::write_tree(&mut out, &tree)?;
    }
    if mode.only_tree {
        return Ok(());
    }

    let files = FileStream::new(&options)?;
    let count = output::write_dump(
        &mut out,
        files,
        summarizer.as_ref().map(|s| s as &dyn Summarizer),
    )?;
    info!("Dumped {} files from {}", count, options.root.display());
    Ok(())
}
