use std::ops::Range;

use kdocs_nav::{LayoutMetrics, Overlay, RowKind, SidebarGeometry, SidebarRow};

/// Geometry overlays mapped from pixels onto sidebar row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRows {
    /// Link rows of the active group; the marker track is drawn along them.
    pub group: Range<usize>,
    pub highlight: Range<usize>,
    pub marker: Range<usize>,
}

impl OverlayRows {
    pub fn project(rows: &[SidebarRow], geometry: &SidebarGeometry, metrics: &LayoutMetrics) -> Option<Self> {
        let title = rows
            .iter()
            .position(|row| row.kind == RowKind::GroupTitle && row.group_index == geometry.group_index)?;
        let first = title + 1;
        let end = rows[first..]
            .iter()
            .position(|row| row.kind == RowKind::GroupTitle)
            .map_or(rows.len(), |offset| first + offset);

        let clamp = |range: Range<usize>| range.start.min(end)..range.end.min(end);
        Some(Self {
            group: first..end,
            highlight: clamp(overlay_span(&geometry.highlight, 0.0, metrics.item_height, first)),
            marker: clamp(overlay_span(&geometry.marker, metrics.marker_offset, metrics.item_height, first)),
        })
    }
}

/// Rows covered by `overlay`, measured from `origin` pixels below the top of
/// the row at `first_row`. Always covers at least one row.
pub fn overlay_span(overlay: &Overlay, origin: f64, item_height: f64, first_row: usize) -> Range<usize> {
    if !(item_height.is_finite() && item_height > 0.0) {
        return first_row..first_row + 1;
    }
    let start = first_row + ((overlay.top - origin) / item_height).round().max(0.0) as usize;
    let len = (overlay.height / item_height).round().max(1.0) as usize;
    start..start + len
}
