//! Shared type definitions for the kdocs navigation core.
//!
//! The navigation tree is static configuration authored alongside the
//! documentation content; the section store is supplied by the page's
//! scroll tracking. Both are plain data so every crate in the workspace can
//! pass them around without pulling in the resolver.

pub mod navigation;
pub mod section;

pub use navigation::{LinkNode, NavigationGroup, NavigationTree};
pub use section::{Section, SectionStore, TOP_SECTION_ID};
