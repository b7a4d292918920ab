//! Runtime: terminal lifecycle and the event loop.
//!
//! Terminal input arrives through crossterm's async `EventStream`; the loop
//! maps keys to [`Msg`]s, applies them to the [`App`] and redraws only when
//! something changed.

use std::io::Stdout;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tokio::signal;
use tracing::{debug, warn};

use crate::app::{App, Msg};
use crate::ui::main::draw;

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Maps a key press to a message. The goto prompt captures text input while
/// it is open.
pub fn key_to_msg(app: &App, key: KeyEvent) -> Option<Msg> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Msg::Quit);
    }
    if app.goto.is_some() {
        return match key.code {
            KeyCode::Enter => Some(Msg::SubmitGoto),
            KeyCode::Esc => Some(Msg::CancelGoto),
            KeyCode::Backspace => Some(Msg::GotoBackspace),
            KeyCode::Char(ch) => Some(Msg::GotoInput(ch)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Msg::MoveSelection(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Msg::MoveSelection(1)),
        KeyCode::PageUp => Some(Msg::MoveSelection(-10)),
        KeyCode::PageDown => Some(Msg::MoveSelection(10)),
        KeyCode::Enter => Some(Msg::ActivateSelection),
        KeyCode::Char('d') => Some(Msg::ToggleDrawer),
        KeyCode::Char(']') => Some(Msg::ShiftSections(1)),
        KeyCode::Char('[') => Some(Msg::ShiftSections(-1)),
        KeyCode::Char('/') | KeyCode::Char('g') => Some(Msg::OpenGoto),
        _ => None,
    }
}

/// Sets up the terminal, runs the loop until the user quits, and restores
/// the terminal on the way out.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    let mut terminal = setup_terminal()?;
    if let Ok((width, height)) = crossterm::terminal::size() {
        app.update(&Msg::Resize(width, height));
    }
    terminal.draw(|frame| draw(frame, &mut app))?;

    loop {
        let needs_render = tokio::select! {
            maybe_event = events.next() => {
                let event = match maybe_event {
                    Some(Ok(event)) => event,
                    Some(Err(error)) => {
                        warn!("Failed to read event: {}", error);
                        break;
                    }
                    None => break,
                };
                let msg = match event {
                    Event::Key(key) => key_to_msg(&app, key),
                    Event::Resize(width, height) => Some(Msg::Resize(width, height)),
                    _ => None,
                };
                match msg {
                    Some(msg) => {
                        debug!(?msg, "input");
                        app.update(&msg)
                    }
                    None => false,
                }
            }
            _ = signal::ctrl_c() => break,
        };

        if app.should_quit {
            break;
        }
        if needs_render {
            terminal.draw(|frame| draw(frame, &mut app))?;
        }
    }

    cleanup_terminal(&mut terminal)
}
