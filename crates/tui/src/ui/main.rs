use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::components::{render_page, render_sidebar};

const SIDEBAR_WIDTH: u16 = 42;
const KEY_HINTS: &str = "↑↓ move  ⏎ open  / go to  [ ] sections  d drawer  q quit";

/// Draws one frame: sidebar and page side by side, or the sidebar alone
/// while the drawer is open, with a status line underneath.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    if app.drawer_open {
        render_sidebar(frame, body, app);
    } else {
        let [nav, page] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)]).areas(body);
        render_sidebar(frame, nav, app);
        render_page(frame, page, app);
    }

    let theme = &*app.theme;
    let line = match &app.goto {
        Some(buffer) => Line::from(vec![
            Span::styled("Go to: ", theme.tag_style()),
            Span::styled(format!("{buffer}▏"), theme.text_primary_style()),
        ]),
        None => Line::from(vec![
            Span::styled(app.status.clone(), theme.text_secondary_style()),
            Span::raw("   "),
            Span::styled(KEY_HINTS, theme.text_muted_style()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), status);
}
