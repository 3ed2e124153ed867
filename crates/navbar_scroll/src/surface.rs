//! Host collaborators
//!
//! The coordinator does not own any views. The host hands it a scroll surface
//! to query, the bar's natural height, and forwards its native scroll events
//! as [`ScrollEvent`] values.

use crate::metrics::ContentMetrics;

/// Scrollable content view the bar follows
pub trait ScrollSurface: Send + Sync {
    /// Current vertical content offset
    fn offset_y(&self) -> f32;

    /// Current content geometry
    fn metrics(&self) -> ContentMetrics;
}

/// The navigation bar being collapsed
pub trait BarElement {
    /// Current height; read once at attach as the bar's full height
    fn height(&self) -> f32;
}

impl BarElement for f32 {
    fn height(&self) -> f32 {
        *self
    }
}

/// Scroll events forwarded by the host, in the order it observes them
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    /// The user put a finger down and started dragging
    DragBegan { offset_y: f32 },
    /// The content offset changed (drag, momentum or programmatic)
    Scrolled {
        offset_y: f32,
        metrics: ContentMetrics,
    },
    /// The user lifted their finger
    DragEnded { will_decelerate: bool },
}
