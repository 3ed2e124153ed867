//! Public capability sets
//!
//! Two API shapes over the same coordinator: [`NavBarAnimator`] for callers
//! that want to set the bar up and drive it by hand, and [`NavBarAnimatable`]
//! for screens that only show and hide it.

use crate::coordinator::{AttachTarget, ScrollBarCoordinator};
use crate::error::Result;

/// Manual control over a scroll-linked bar
pub trait NavBarAnimator {
    /// Bind a scroll surface and bar
    fn setup(&mut self, target: AttachTarget) -> Result<()>;

    /// Move the bar and content view to an explicit pose.
    ///
    /// `alpha` of `None` derives opacity from the visible fraction of the bar.
    fn animate(&mut self, bar_height: f32, content_top: f32, alpha: Option<f32>);
}

/// Show / hide control for screens hosting a collapsing bar
pub trait NavBarAnimatable {
    fn show_nav_bar(&mut self);
    fn hide_nav_bar(&mut self);
    fn nav_bar_height(&self) -> f32;
    fn nav_bar_alpha(&self) -> Option<f32>;
}

impl NavBarAnimator for ScrollBarCoordinator {
    fn setup(&mut self, target: AttachTarget) -> Result<()> {
        self.attach(target)
    }

    fn animate(&mut self, bar_height: f32, content_top: f32, alpha: Option<f32>) {
        ScrollBarCoordinator::animate(self, bar_height, content_top, alpha)
    }
}

impl NavBarAnimatable for ScrollBarCoordinator {
    fn show_nav_bar(&mut self) {
        self.reveal()
    }

    fn hide_nav_bar(&mut self) {
        self.collapse()
    }

    fn nav_bar_height(&self) -> f32 {
        self.bar_height()
    }

    fn nav_bar_alpha(&self) -> Option<f32> {
        self.bar_alpha()
    }
}
