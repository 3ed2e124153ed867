//! Scroll-Synchronized Navigation Bar
//!
//! Collapses a top navigation bar as the user scrolls content down and brings
//! it back when they scroll up. Bar height and opacity track the scroll delta
//! while dragging; on release the bar snaps fully open or fully closed.
//!
//! # Overview
//!
//! - [`ScrollBarCoordinator`]: the state machine turning scroll samples into
//!   [`AnimationCommand`]s
//! - [`ScrollSurface`] / [`BarElement`]: what the host exposes to it
//! - [`NavBarAnimator`] / [`NavBarAnimatable`]: the two public capability sets
//! - [`NavBarConfig`]: animation timings, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use navbar_scroll::prelude::*;
//!
//! struct List;
//!
//! impl ScrollSurface for List {
//!     fn offset_y(&self) -> f32 { 0.0 }
//!     fn metrics(&self) -> ContentMetrics {
//!         ContentMetrics::new(2000.0, 500.0)
//!     }
//! }
//!
//! let layout = LayoutSignal::new();
//! let mut coordinator = ScrollBarCoordinator::new();
//! coordinator
//!     .attach(
//!         AttachTarget::new(Arc::new(List), &64.0_f32, |_: &AnimationCommand| {})
//!             .fixed_inset(20.0)
//!             .container(Size::new(320.0, 568.0))
//!             .layout_signal(&layout),
//!     )
//!     .unwrap();
//!
//! coordinator.on_drag_began(0.0);
//! coordinator.on_scroll(30.0, ContentMetrics::new(2000.0, 500.0));
//! assert_eq!(coordinator.bar_height(), 34.0);
//! ```
//!
//! [`AnimationCommand`]: navbar_animation::AnimationCommand

pub mod capability;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod metrics;
pub mod surface;

pub use capability::{NavBarAnimatable, NavBarAnimator};
pub use config::NavBarConfig;
pub use coordinator::{AttachTarget, ScrollBarCoordinator, EXPAND_THRESHOLD, REVEAL_RATIO};
pub use error::{NavBarError, Result};
pub use metrics::ContentMetrics;
pub use surface::{BarElement, ScrollEvent, ScrollSurface};

/// Everything a host needs to wire up a coordinator
pub mod prelude {
    pub use crate::capability::{NavBarAnimatable, NavBarAnimator};
    pub use crate::config::NavBarConfig;
    pub use crate::coordinator::{AttachTarget, ScrollBarCoordinator};
    pub use crate::metrics::ContentMetrics;
    pub use crate::surface::{BarElement, ScrollEvent, ScrollSurface};
    pub use navbar_animation::{AnimationCommand, BarRenderer, Easing, Timing};
    pub use navbar_core::{LayoutSignal, Size};
}
