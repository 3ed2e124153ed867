//! Animation commands
//!
//! An [`AnimationCommand`] is the only output of the scroll coordinator: a
//! target bar height, the matching content offset, an optional opacity and
//! the timing to get there. Commands are fire-and-forget; the duration is a
//! hint to the renderer and nothing waits for it.

use navbar_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Duration of scroll-driven and snap animations
pub const DEFAULT_SCROLL_DURATION_MS: u32 = 100;

/// Duration and curve of a transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(default)]
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
}

impl Timing {
    pub const fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Apply immediately (layout resync after rotation or resize)
    pub const fn instant() -> Self {
        Self::new(0, Easing::Linear)
    }

    /// Short eased transition used while scrolling and snapping
    pub const fn eased(duration_ms: u32) -> Self {
        Self::new(duration_ms, Easing::EaseInOut)
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::eased(DEFAULT_SCROLL_DURATION_MS)
    }
}

/// Request to move the bar and content view to a new pose
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationCommand {
    /// Target bar height
    pub bar_height: f32,
    /// Target y-offset of the content view
    pub content_top: f32,
    /// Target bar opacity; `None` leaves the current opacity untouched
    pub alpha: Option<f32>,
    /// Size of the screen holding the bar and content view
    pub container: Size,
    pub timing: Timing,
}

impl AnimationCommand {
    pub fn new(bar_height: f32, content_top: f32, alpha: Option<f32>, timing: Timing) -> Self {
        Self {
            bar_height,
            content_top,
            alpha,
            container: Size::ZERO,
            timing,
        }
    }

    /// Builder: set the container the frames are laid out in
    pub fn in_container(mut self, container: Size) -> Self {
        self.container = container;
        self
    }

    /// Frames the host applies inside the command's container.
    ///
    /// The bar is pinned to the top edge and spans the full width; the content
    /// view fills what remains below `content_top`.
    pub fn frame(&self) -> BarFrame {
        let container = self.container;
        BarFrame {
            bar: Rect::new(0.0, 0.0, container.width, self.bar_height),
            content: Rect::new(
                0.0,
                self.content_top,
                container.width,
                (container.height - self.content_top).max(0.0),
            ),
            alpha: self.alpha,
        }
    }
}

/// Concrete frames for the bar and content view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarFrame {
    pub bar: Rect,
    pub content: Rect,
    pub alpha: Option<f32>,
}

/// Rendering collaborator that performs the actual transition
pub trait BarRenderer: Send {
    fn apply(&mut self, command: &AnimationCommand);
}

impl<F> BarRenderer for F
where
    F: FnMut(&AnimationCommand) + Send,
{
    fn apply(&mut self, command: &AnimationCommand) {
        self(command)
    }
}
