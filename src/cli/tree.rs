//! Tree command handler.
//!
//! Loads a snapshot, replays the requested expansion and search actions on
//! the dependency tree view and prints the visible rows.

use super::load_app;
use crate::config::AppConfig;
use crate::hierarchy::DisplayName;
use crate::model::DependencyTreeNode;
use crate::viewmodel::TreeViewState;
use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;

/// Options of the `tree` command.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub snapshot: PathBuf,
    /// Search query applied after loading
    pub search: Option<String>,
    /// Number of times to advance to the next search hit
    pub next_hits: usize,
    /// Expand every item before searching
    pub expand_all: bool,
}

/// Run the tree command
pub fn run_tree(options: &TreeOptions, config: AppConfig) -> Result<()> {
    let mut app = load_app(&options.snapshot, config)?;
    let tree = &mut *app.dependencies;

    if options.expand_all {
        tree.expand_all();
    }
    if let Some(query) = &options.search {
        tree.update_search(query);
        for _ in 0..options.next_hits {
            tree.select_next_search_hit();
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_tree(tree, &mut out)?;
    Ok(())
}

/// Write the visible rows, indented by level, followed by a search summary.
///
/// Rows are prefixed with `+` when collapsed with children, `-` when
/// expanded, and `>` marks the selected row.
pub fn render_tree(tree: &TreeViewState<DependencyTreeNode>, out: &mut impl Write) -> io::Result<()> {
    let selected = tree.selected_index();

    for item in tree.visible_items() {
        let cursor = if selected == Some(item.index()) { '>' } else { ' ' };
        let marker = match (item.has_children(), item.is_expanded()) {
            (false, _) => ' ',
            (true, true) => '-',
            (true, false) => '+',
        };
        let hit = if tree.search().is_hit(item.index()) { " *" } else { "" };
        writeln!(
            out,
            "{cursor} {:indent$}{marker} [{}] {}{hit}",
            "",
            item.value().kind_label(),
            item.value().display_name(),
            indent = item.level() * 2,
        )?;
    }

    let search = tree.search();
    if !search.trimmed_query().is_empty() {
        match search.cursor() {
            Some(cursor) => writeln!(
                out,
                "search '{}': hit {} of {}",
                search.trimmed_query(),
                cursor + 1,
                search.hit_count()
            )?,
            None => writeln!(out, "search '{}': no hits", search.trimmed_query())?,
        }
    }
    writeln!(out, "{} of {} items visible", tree.visible_len(), tree.len())
}
