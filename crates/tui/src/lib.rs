//! # kdocs TUI
//!
//! Terminal viewer for the documentation sidebar. It renders the navigation
//! tree the way the site does: only the active chain is expanded, the active
//! group carries a marker next to its page, and a highlight band follows the
//! in-page sections currently in view.
//!
//! Use the arrow keys to browse, Enter to open a page, `/` to jump to any
//! path or URL, `[` and `]` to scroll the visible sections, and `d` to open
//! the drawer. While the drawer is open the sidebar keeps the sections it was
//! opened with; opening a different page closes it.

mod app;
mod ui;

use anyhow::Result;
use kdocs_types::{NavigationTree, SectionStore};
use kdocs_util::SidebarConfig;

pub use app::{App, Msg};

/// Runs the sidebar viewer until the user quits.
///
/// `initial_path` may be a path or a full URL; `sections` seeds the
/// in-page sections shown under the active page.
pub async fn run(tree: NavigationTree, config: SidebarConfig, initial_path: &str, sections: SectionStore) -> Result<()> {
    let app = App::new(tree, config, initial_path, sections);
    ui::runtime::run_app(app).await
}
