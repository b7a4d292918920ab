pub mod common;
pub mod page;
pub mod sidebar;

pub use page::render_page;
pub use sidebar::render_sidebar;
