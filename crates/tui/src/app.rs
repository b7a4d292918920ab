//! Application state for the sidebar viewer.
//!
//! `App` owns the navigation tree, the session that resolves the active path,
//! and the small amount of view state the terminal needs (selection, scroll,
//! drawer, goto prompt). All mutation goes through [`App::update`].

use kdocs_nav::{LayoutMetrics, NavigationSession, Presence, Resolution, RowKind, SidebarRow, Transition};
use kdocs_types::{NavigationTree, Section, SectionStore};
use kdocs_util::{SidebarConfig, to_origin_relative};
use tracing::{debug, info};

use crate::ui::components::common::ScrollMetrics;
use crate::ui::theme::{self, Theme};

/// Rows taken by borders and the status bar.
const CHROME_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Navigate(String),
    MoveSelection(i16),
    ActivateSelection,
    ToggleDrawer,
    /// Slides the window of visible in-page sections.
    ShiftSections(i16),
    OpenGoto,
    GotoInput(char),
    GotoBackspace,
    SubmitGoto,
    CancelGoto,
    Resize(u16, u16),
    Quit,
}

pub struct App {
    pub tree: NavigationTree,
    pub config: SidebarConfig,
    pub theme: Box<dyn Theme>,
    pub session: NavigationSession,
    /// Metrics used by the last refresh.
    pub metrics: LayoutMetrics,
    sections: Vec<Section>,
    section_window: usize,
    section_offset: usize,
    pub selected: usize,
    pub scroll: ScrollMetrics,
    pub drawer_open: bool,
    /// Path being typed in the goto prompt.
    pub goto: Option<String>,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(tree: NavigationTree, config: SidebarConfig, initial_path: &str, sections: SectionStore) -> Self {
        let section_offset = sections
            .visible_sections
            .first()
            .and_then(|id| sections.sections.iter().position(|section| &section.id == id))
            .unwrap_or(0);
        let section_window = sections.visible_count().max(1);
        let metrics = config.layout_metrics();
        let mut app = Self {
            tree,
            config,
            theme: theme::load(),
            session: NavigationSession::new(""),
            metrics,
            sections: sections.sections,
            section_window,
            section_offset,
            selected: 0,
            scroll: ScrollMetrics::default(),
            drawer_open: false,
            goto: None,
            status: String::new(),
            should_quit: false,
        };
        app.session.update_sections(app.visible_sections());
        app.navigate(&to_origin_relative(initial_path));
        app
    }

    /// Rows of the last committed resolution.
    pub fn rows(&self) -> &[SidebarRow] {
        self.session.committed().map_or(&[], |resolution| resolution.rows.as_slice())
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.session.committed()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section store for the current window.
    pub fn visible_sections(&self) -> SectionStore {
        let visible = self
            .sections
            .iter()
            .skip(self.section_offset)
            .take(self.section_window)
            .map(|section| section.id.clone())
            .collect();
        SectionStore::new(self.sections.clone(), visible)
    }

    /// Applies `msg`; returns whether a redraw is needed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::Navigate(path) => {
                self.navigate(&to_origin_relative(path));
                true
            }
            Msg::MoveSelection(delta) => self.move_selection(*delta),
            Msg::ActivateSelection => self.activate_selection(),
            Msg::ToggleDrawer => {
                self.toggle_drawer();
                true
            }
            Msg::ShiftSections(delta) => self.shift_sections(*delta),
            Msg::OpenGoto => {
                self.goto = Some(String::new());
                true
            }
            Msg::GotoInput(ch) => match self.goto.as_mut() {
                Some(buffer) => {
                    buffer.push(*ch);
                    true
                }
                None => false,
            },
            Msg::GotoBackspace => self.goto.as_mut().and_then(String::pop).is_some(),
            Msg::SubmitGoto => match self.goto.take() {
                Some(path) if !path.trim().is_empty() => {
                    self.navigate(&to_origin_relative(path.trim()));
                    true
                }
                Some(_) => true,
                None => false,
            },
            Msg::CancelGoto => self.goto.take().is_some(),
            Msg::Resize(_, height) => {
                self.scroll.update_viewport_height(height.saturating_sub(CHROME_HEIGHT));
                self.scroll.ensure_visible(self.selected as u16);
                true
            }
            Msg::Quit => {
                self.should_quit = true;
                false
            }
        }
    }

    /// A path change while the drawer is open closes it.
    fn navigate(&mut self, path: &str) {
        let path_changed = path != self.session.current_path();
        self.session.navigate(path);
        if self.drawer_open && path_changed {
            debug!(path, "closing drawer on navigation");
            self.drawer_open = false;
            self.session.thaw();
        }
        self.refresh();
        self.select_href(path);
    }

    /// Resolves the session against fresh metrics; the root font size is
    /// re-read on every call.
    fn refresh(&mut self) {
        self.metrics = self.config.layout_metrics();
        let resolution = self.session.refresh(&self.tree, Presence::Present, &self.metrics);
        let row_count = resolution.rows.len();
        self.status = match &resolution.chain {
            Some(chain) => format!("{} → {}", resolution.path, chain.leaf().path),
            None => format!("{} (not in navigation)", resolution.path),
        };
        self.scroll.update_content_height(row_count.min(u16::MAX as usize) as u16);
        if self.selected >= row_count {
            self.selected = row_count.saturating_sub(1);
        }

        let entering = self.count_transitions(Transition::Entering);
        let exiting = self.count_transitions(Transition::Exiting);
        if entering + exiting > 0 {
            debug!(entering, exiting, "sidebar expansion changed");
            self.status.push_str(&format!("  (+{entering} / -{exiting})"));
        }
    }

    fn count_transitions(&self, kind: Transition) -> usize {
        self.session.transitions().iter().filter(|(_, transition)| *transition == kind).count()
    }

    fn select_href(&mut self, href: &str) {
        if let Some(index) = self.rows().iter().position(|row| row.kind == RowKind::Link && row.href == href) {
            self.selected = index;
            self.scroll.ensure_visible(index as u16);
        }
    }

    fn move_selection(&mut self, delta: i16) -> bool {
        let rows = self.rows();
        if rows.is_empty() || delta == 0 {
            return false;
        }
        let mut index = self.selected;
        let mut remaining = delta.unsigned_abs();
        while remaining > 0 {
            let next = if delta > 0 {
                rows[index + 1..].iter().position(|row| row.kind != RowKind::GroupTitle).map(|offset| index + 1 + offset)
            } else {
                rows[..index].iter().rposition(|row| row.kind != RowKind::GroupTitle)
            };
            match next {
                Some(next) => index = next,
                None => break,
            }
            remaining -= 1;
        }
        if index == self.selected {
            return false;
        }
        self.selected = index;
        self.scroll.ensure_visible(index as u16);
        true
    }

    fn activate_selection(&mut self) -> bool {
        let Some(row) = self.rows().get(self.selected).cloned() else {
            return false;
        };
        match row.kind {
            RowKind::GroupTitle => false,
            RowKind::Link => {
                info!(href = %row.href, "opening page");
                self.navigate(&row.href);
                true
            }
            RowKind::Anchor => {
                let Some((_, id)) = row.href.split_once('#') else {
                    return false;
                };
                match self.sections.iter().position(|section| section.id == id) {
                    Some(position) => {
                        let delta = position as i64 - self.section_offset as i64;
                        self.shift_sections(delta.clamp(i16::MIN as i64, i16::MAX as i64) as i16)
                    }
                    None => false,
                }
            }
        }
    }

    fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
        if self.drawer_open {
            self.session.freeze();
        } else {
            self.session.thaw();
            let path = self.session.current_path().to_string();
            self.refresh();
            self.select_href(&path);
        }
    }

    fn shift_sections(&mut self, delta: i16) -> bool {
        if self.sections.is_empty() {
            return false;
        }
        let max_offset = self.sections.len().saturating_sub(self.section_window);
        let next = (self.section_offset as i64 + i64::from(delta)).clamp(0, max_offset as i64) as usize;
        if next == self.section_offset {
            return false;
        }
        self.section_offset = next;
        self.session.update_sections(self.visible_sections());
        if !self.session.is_frozen() {
            self.refresh();
        }
        true
    }
}
