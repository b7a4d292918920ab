//! Overlay geometry for the active group.
//!
//! Two overlays are drawn over the same group: a soft highlight that spans
//! the in-page sections currently in view, and a thin marker next to the
//! active row. Both are positioned by row index, so they only depend on the
//! active chain, the section store and the row metrics.

use kdocs_types::{NavigationGroup, SectionStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resolve::ActiveChain;
use crate::units::{RootFontSize, root_font_size};

/// Whether the highlight is mounted or playing its exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    Present,
    /// While exiting the highlight keeps a single row so the shrinking box
    /// does not jump.
    Exiting,
}

/// Vertical placement of an overlay, in pixels from the top of the group's
/// link list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    pub top: f64,
    pub height: f64,
}

/// Row metrics authored in `rem`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemMetrics {
    pub item_height: f64,
    pub marker_offset: f64,
    pub marker_height: f64,
    /// Highlight height used when the match comes from a nested child.
    pub nested_highlight_height: f64,
}

impl Default for RemMetrics {
    fn default() -> Self {
        Self {
            item_height: 2.0,
            marker_offset: 0.25,
            marker_height: 1.5,
            nested_highlight_height: 2.0,
        }
    }
}

/// Row metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutMetrics {
    pub item_height: f64,
    pub marker_offset: f64,
    pub marker_height: f64,
    pub nested_highlight_height: f64,
}

impl LayoutMetrics {
    /// Converts `rem` metrics to pixels, reading the root font size once.
    pub fn from_rem(metrics: &RemMetrics, font_size: &dyn RootFontSize) -> Self {
        let root = root_font_size(font_size);
        Self {
            item_height: metrics.item_height * root,
            marker_offset: metrics.marker_offset * root,
            marker_height: metrics.marker_height * root,
            nested_highlight_height: metrics.nested_highlight_height * root,
        }
    }

    /// Metrics with explicit pixel values; the nested highlight defaults to
    /// one row.
    pub fn from_px(item_height: f64, marker_offset: f64) -> Self {
        Self {
            item_height,
            marker_offset,
            marker_height: item_height * 0.75,
            nested_highlight_height: item_height,
        }
    }
}

/// Both overlays for the active group, if any group is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidebarGeometry {
    pub group_index: usize,
    pub highlight: Overlay,
    pub marker: Overlay,
}

/// Highlight spanning the visible sections of the active page.
///
/// Returns `None` when the chain's top-level link does not belong to
/// `group`, which renders as "no highlight".
pub fn compute_highlight_geometry(
    group: &NavigationGroup,
    chain: &ActiveChain,
    sections: &SectionStore,
    presence: Presence,
    metrics: &LayoutMetrics,
) -> Option<Overlay> {
    let top_level_index = matched_top_level_index(group, chain)?;
    let item_height = metrics.item_height;
    let top = top_level_index as f64 * item_height + sections.first_visible_index() as f64 * item_height;
    let height = if chain.is_from_children() {
        metrics.nested_highlight_height
    } else {
        match presence {
            Presence::Present => sections.visible_count().max(1) as f64 * item_height,
            Presence::Exiting => item_height,
        }
    };
    Some(Overlay { top, height })
}

/// Marker next to the active top-level row. Independent of sections.
pub fn compute_marker_geometry(group: &NavigationGroup, chain: &ActiveChain, metrics: &LayoutMetrics) -> Option<Overlay> {
    let top_level_index = matched_top_level_index(group, chain)?;
    Some(Overlay {
        top: metrics.marker_offset + top_level_index as f64 * metrics.item_height,
        height: metrics.marker_height,
    })
}

/// Computes both overlays for the group the chain points at.
pub fn project_geometry(
    tree: &[NavigationGroup],
    chain: Option<&ActiveChain>,
    sections: &SectionStore,
    presence: Presence,
    metrics: &LayoutMetrics,
) -> Option<SidebarGeometry> {
    let chain = chain?;
    let group = tree.get(chain.group_index())?;
    let geometry = SidebarGeometry {
        group_index: chain.group_index(),
        highlight: compute_highlight_geometry(group, chain, sections, presence, metrics)?,
        marker: compute_marker_geometry(group, chain, metrics)?,
    };
    debug!(
        group = chain.group_index(),
        highlight_top = geometry.highlight.top,
        highlight_height = geometry.highlight.height,
        marker_top = geometry.marker.top,
        "projected sidebar geometry"
    );
    Some(geometry)
}

fn matched_top_level_index(group: &NavigationGroup, chain: &ActiveChain) -> Option<usize> {
    let index = chain.top_level_index();
    let link = group.links.get(index)?;
    (link.href == chain.steps()[0].path).then_some(index)
}
