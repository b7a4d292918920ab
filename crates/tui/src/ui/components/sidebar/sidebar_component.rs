use kdocs_nav::{RowKind, SidebarRow};
use kdocs_util::truncate_to_width;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::OverlayRows;
use crate::app::App;
use crate::ui::theme::Theme;

const MARKER: &str = "▎";
const TRACK: &str = "│";
const EXPANDED: &str = "▾ ";

/// Renders the sidebar rows, the highlight band and the active marker.
pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = if app.drawer_open { " Navigation (drawer) " } else { " Navigation " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(app.drawer_open))
        .title(Span::styled(title, app.theme.text_secondary_style()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.scroll.update_viewport_height(inner.height);
    app.scroll.ensure_visible(app.selected as u16);

    let theme = &*app.theme;
    let rows = app.rows();
    let overlays = app
        .resolution()
        .and_then(|resolution| resolution.geometry.as_ref())
        .and_then(|geometry| OverlayRows::project(rows, geometry, &app.metrics));

    let width = inner.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let gutter = match &overlays {
                Some(overlays) if overlays.marker.contains(&index) => Span::styled(MARKER, theme.marker_style()),
                Some(overlays) if overlays.group.contains(&index) => Span::styled(TRACK, theme.track_style()),
                _ => Span::raw(" "),
            };

            let mut style = row_style(theme, row);
            if overlays.as_ref().is_some_and(|overlays| overlays.highlight.contains(&index)) {
                style = style.patch(theme.highlight_style());
            }
            if index == app.selected {
                style = style.patch(theme.selection_style());
            }

            let indent = " ".repeat(display_indent(row));
            let tag = row.tag.as_ref().map(|tag| format!(" [{tag}]"));
            let prefix = if row.expanded { EXPANDED } else { "" };
            let used = 1 + indent.len() + prefix.width() + tag.as_deref().map_or(0, UnicodeWidthStr::width);
            let text = format!("{prefix}{}", truncate_to_width(&row.title, width.saturating_sub(used)));

            let mut spans = vec![gutter, Span::styled(indent, style), Span::styled(text, style)];
            if let Some(tag) = tag {
                spans.push(Span::styled(tag, style.patch(theme.tag_style())));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).scroll((app.scroll.offset(), 0)), inner);
}

/// Terminal columns are roughly twice as wide as the page's indent units;
/// rows deeper than two levels get one extra column per level.
fn display_indent(row: &SidebarRow) -> usize {
    match row.kind {
        RowKind::GroupTitle => 0,
        RowKind::Link | RowKind::Anchor => row.indent / 2 + row.level.saturating_sub(2),
    }
}

fn row_style(theme: &dyn Theme, row: &SidebarRow) -> Style {
    match row.kind {
        RowKind::GroupTitle if row.active => theme.group_title_style().patch(theme.tag_style()),
        RowKind::GroupTitle => theme.group_title_style(),
        RowKind::Anchor => theme.text_muted_style(),
        RowKind::Link if row.active && row.level == 0 => theme.active_link_style(),
        RowKind::Link if row.active => theme.active_nested_style(),
        RowKind::Link => theme.text_primary_style(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdocs_types::{LinkNode, NavigationGroup, Section, SectionStore};
    use kdocs_util::SidebarConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        let tree = vec![NavigationGroup::new(
            "Docs",
            vec![
                LinkNode::leaf("Introduction", "/introduction"),
                LinkNode::leaf("Quickstart", "/quickstart"),
                LinkNode::branch(
                    "Smart Contracts",
                    "/smart-contracts",
                    vec![LinkNode::branch("Reference", "/reference", vec![LinkNode::leaf("Modules", "/modules")])],
                ),
            ],
        )];
        let sections = SectionStore::new(
            vec![Section::new("install", "Install").with_tag("beta"), Section::new("usage", "Usage")],
            vec!["install".into()],
        );
        let config = SidebarConfig {
            root_font_size_px: Some(16.0),
            ..SidebarConfig::default()
        };
        App::new(tree, config, "/quickstart", sections)
    }

    fn line(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn draws_marker_and_highlight_on_the_active_group() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("terminal");
        terminal.draw(|frame| render_sidebar(frame, frame.area(), &mut app)).expect("draw");

        // Border on row 0, then: Docs, Introduction, Quickstart, Install, Usage, Smart Contracts.
        assert!(line(&terminal, 1).contains("Docs"));
        assert!(line(&terminal, 3).contains("Quickstart"));
        assert!(line(&terminal, 4).contains("Install [beta]"));
        assert_eq!(terminal.backend().buffer()[(1, 3)].symbol(), MARKER);
        assert_eq!(terminal.backend().buffer()[(1, 2)].symbol(), TRACK);

        let highlight = app.theme.roles().highlight_bg;
        assert_eq!(terminal.backend().buffer()[(5, 4)].bg, highlight);
        assert_ne!(terminal.backend().buffer()[(5, 5)].bg, highlight);
    }

    #[test]
    fn nested_rows_indent_by_depth() {
        let mut app = app();
        app.update(&crate::app::Msg::Navigate("/smart-contracts/reference/modules".into()));
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("terminal");
        terminal.draw(|frame| render_sidebar(frame, frame.area(), &mut app)).expect("draw");

        assert!(line(&terminal, 4).contains("▾ Smart Contracts"));
        assert!(line(&terminal, 5).contains("▾ Reference"));
        assert!(line(&terminal, 6).contains("Modules"));

        let indent_of = |title: &str| app.rows().iter().find(|row| row.title == title).map(display_indent);
        assert_eq!(indent_of("Smart Contracts"), Some(2));
        assert_eq!(indent_of("Reference"), Some(3));
        assert_eq!(indent_of("Modules"), Some(5));
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(12, 8)).expect("terminal");
        terminal.draw(|frame| render_sidebar(frame, frame.area(), &mut app)).expect("draw");
        assert!(line(&terminal, 2).contains('…'));
    }
}
