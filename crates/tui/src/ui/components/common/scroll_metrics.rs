//! Vertical scroll state for the sidebar list.
//!
//! Tracks content height, viewport height and the current offset, all in
//! terminal rows so they can be handed straight to `Paragraph::scroll`.

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMetrics {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollMetrics {
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub const fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn update_viewport_height(&mut self, viewport_height: u16) {
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    pub fn update_content_height(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Scrolls the minimum amount needed to bring `row` into view.
    pub fn ensure_visible(&mut self, row: u16) {
        if self.viewport_height == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset.saturating_add(self.viewport_height) {
            self.offset = row.saturating_sub(self.viewport_height - 1);
        }
        self.clamp_offset();
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(5);
        metrics.update_content_height(20);

        metrics.ensure_visible(3);
        assert_eq!(metrics.offset(), 0);

        metrics.ensure_visible(7);
        assert_eq!(metrics.offset(), 3);

        metrics.ensure_visible(1);
        assert_eq!(metrics.offset(), 1);

        metrics.ensure_visible(40);
        assert_eq!(metrics.offset(), 15);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(4);
        metrics.update_content_height(30);
        metrics.ensure_visible(25);
        assert_eq!(metrics.offset(), 22);

        metrics.update_content_height(6);
        assert_eq!(metrics.offset(), 2);

        metrics.update_viewport_height(10);
        assert_eq!(metrics.offset(), 0);
    }
}
