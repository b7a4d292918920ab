//! Right-hand pane describing the current page: breadcrumb, match kinds and
//! the in-page sections with the visible ones marked.

use kdocs_nav::MatchKind;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render_page(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &*app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(false))
        .title(Span::styled(" Page ", theme.text_secondary_style()));

    let mut lines = Vec::new();
    let (path, _) = app.session.inputs();
    lines.push(Line::from(vec![
        Span::styled("Path  ", theme.text_muted_style()),
        Span::styled(path.to_string(), theme.text_primary_style()),
    ]));

    match app.resolution().and_then(|resolution| resolution.chain.as_ref()) {
        Some(chain) => {
            let group = app.tree.get(chain.group_index()).map_or("", |group| group.title.as_str());
            lines.push(Line::from(vec![
                Span::styled("Group ", theme.text_muted_style()),
                Span::styled(group.to_string(), theme.group_title_style()),
            ]));
            let titles = chain
                .nodes(&app.tree)
                .unwrap_or_default()
                .iter()
                .map(|node| node.title.as_str())
                .collect::<Vec<_>>()
                .join(" › ");
            lines.push(Line::from(vec![
                Span::styled("Trail ", theme.text_muted_style()),
                Span::styled(titles, theme.active_link_style()),
            ]));
            for step in chain.steps() {
                let kind = match step.kind {
                    MatchKind::Exact => "exact",
                    MatchKind::Contains => "contains",
                    MatchKind::Ancestor => "ancestor",
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {kind:<9}"), theme.text_muted_style()),
                    Span::styled(step.path.clone(), theme.text_secondary_style()),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "This page is not part of the navigation.",
            theme.text_muted_style(),
        ))),
    }

    if !app.sections().is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("On this page", theme.group_title_style())));
        let visible = app.visible_sections().visible_sections;
        for section in app.sections() {
            let (bullet, style) = if visible.contains(&section.id) {
                ("● ", theme.active_nested_style())
            } else {
                ("○ ", theme.text_muted_style())
            };
            lines.push(Line::from(vec![
                Span::styled(bullet, style),
                Span::styled(section.title.clone(), style),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
