//! # kdocs navigation core
//!
//! Resolves which sidebar entry is active for a given page path, which
//! subtrees are expanded, and where the highlight and marker overlays sit.
//!
//! Everything here is a pure function of the navigation tree, the current
//! path and the section store handed in by the caller:
//!
//! - [`resolve::resolve_active_chain`] walks the tree depth-first and returns
//!   the chain of matching nodes (first match wins).
//! - [`expansion`] derives the expanded subtrees and the flattened sidebar
//!   rows from that chain.
//! - [`layout`] turns the chain and the visible sections into overlay
//!   rectangles.
//! - [`session::NavigationSession`] coordinates path changes so only the
//!   newest resolution is ever applied.
//!
//! ```
//! use kdocs_nav::resolve::resolve_active_chain;
//! use kdocs_types::{LinkNode, NavigationGroup};
//!
//! let tree = vec![NavigationGroup::new(
//!     "A",
//!     vec![LinkNode::branch("X", "/x", vec![LinkNode::leaf("Y", "/y")])],
//! )];
//! let chain = resolve_active_chain(&tree, "/x/y").expect("active chain");
//! assert_eq!(chain.group_index(), 0);
//! assert_eq!(chain.leaf().path, "/x/y");
//! ```

pub mod builtin;
pub mod error;
pub mod expansion;
pub mod layout;
pub mod resolve;
pub mod session;
pub mod tree;
pub mod units;
pub mod validate;

pub use builtin::{builtin_navigation, load_navigation};
pub use error::NavigationLoadError;
pub use expansion::{ExpansionSet, RowKind, SidebarRow, Transition, project_rows, project_rows_with};
pub use layout::{LayoutMetrics, Overlay, Presence, RemMetrics, SidebarGeometry, project_geometry};
pub use resolve::{ActiveChain, ChainStep, MatchKind, resolve_active_chain};
pub use session::{CommitOutcome, Generation, NavigationSession, Resolution};
pub use tree::NodeAddress;
pub use units::{DEFAULT_ROOT_FONT_SIZE_PX, EnvRootFontSize, FixedRootFontSize, RootFontSize, rem_to_px};
pub use validate::{AuthoringIssue, validate};
