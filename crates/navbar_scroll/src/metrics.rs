//! Scroll content metrics

/// Live content geometry of a scroll surface.
///
/// Read fresh on every sample; the scrollable range moves whenever content
/// is added or the viewport is resized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContentMetrics {
    /// Total height of the scrollable content
    pub content_height: f32,
    /// Visible height of the scroll surface
    pub viewport_height: f32,
    /// Content inset above the first row
    pub top_inset: f32,
    /// Content inset below the last row
    pub bottom_inset: f32,
}

impl ContentMetrics {
    /// Metrics with no content insets
    pub const fn new(content_height: f32, viewport_height: f32) -> Self {
        Self {
            content_height,
            viewport_height,
            top_inset: 0.0,
            bottom_inset: 0.0,
        }
    }

    pub const fn with_insets(mut self, top: f32, bottom: f32) -> Self {
        self.top_inset = top;
        self.bottom_inset = bottom;
        self
    }

    /// Smallest resting offset (top of the content)
    pub fn offset_start(&self) -> f32 {
        -self.top_inset
    }

    /// Largest resting offset (bottom of the content)
    pub fn offset_end(&self) -> f32 {
        (self.content_height - self.viewport_height + self.bottom_inset - 0.5).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_range() {
        let metrics = ContentMetrics::new(1000.0, 400.0).with_insets(64.0, 10.0);
        assert_eq!(metrics.offset_start(), -64.0);
        // floor(1000 - 400 + 10 - 0.5)
        assert_eq!(metrics.offset_end(), 609.0);
    }

    #[test]
    fn test_short_content_has_negative_end() {
        let metrics = ContentMetrics::new(300.0, 500.0);
        assert_eq!(metrics.offset_end(), -201.0);
    }
}
