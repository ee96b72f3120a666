//! Depth-limited tree view of a directory.

use crate::engine::Walker;
use crate::error::DumperError;
use crate::options::DumpOptions;

/// Renders the tree below `options.root`, descending at most
/// `options.tree_depth` levels.
///
/// The first line is the root itself; every other line is indented by its
/// depth, using the same connectors as the `tree` command. Directories carry
/// a trailing `/`. Ignored entries are left out along with everything under
/// them, so a depth of `0` renders the root line alone.
///
/// # Errors
///
/// Returns [`DumperError::Configuration`] if the root is missing or not a
/// directory.
pub fn render_tree(options: &DumpOptions) -> Result<String, DumperError> {
    options.validate()?;

    let mut lines = vec![format!(".  # {}", options.root.display())];
    if options.tree_depth > 0 {
        for entry in Walker::new(options, Some(options.tree_depth)).readable_entries() {
            let prefix = "│   ".repeat(entry.depth - 1) + "├── ";
            let name = entry
                .relative
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let suffix = if entry.is_dir() { "/" } else { "" };
            lines.push(format!("{}{}{}", prefix, name, suffix));
        }
    }

    Ok(lines.join("\n"))
}
