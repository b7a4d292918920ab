//! Sidebar list with the section highlight and active-row marker.

mod overlay;
mod sidebar_component;

pub use overlay::OverlayRows;
pub use sidebar_component::render_sidebar;
