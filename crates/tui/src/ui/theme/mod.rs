//! Color palettes and semantic roles for the sidebar.

use std::env;

use tracing::debug;

pub mod dracula;
pub mod nord;
pub mod roles;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Selects a theme from `TUI_THEME`, falling back to Dracula.
pub fn load() -> Box<dyn Theme> {
    match env::var("TUI_THEME").ok().as_deref().map(str::trim) {
        Some(name) if name.eq_ignore_ascii_case("nord") => Box::new(NordTheme::new()),
        Some(name) if !name.eq_ignore_ascii_case("dracula") => {
            debug!(theme = name, "unknown theme; using dracula");
            Box::new(DraculaTheme::new())
        }
        _ => Box::new(DraculaTheme::new()),
    }
}
