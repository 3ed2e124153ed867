//! Scroll-to-bar coordinator
//!
//! Converts a stream of scroll samples into bar height and opacity targets.
//!
//! While the user drags, the bar follows the scroll delta: scrolling down eats
//! into the bar height, scrolling up gives it back. Rubber-band overscroll at
//! either end of the content is ignored, content too short to hide the bar
//! never moves it, and pulling past the top always reveals it. When the drag
//! ends without momentum the bar snaps open or closed depending on how much of
//! it is still visible.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut coordinator = ScrollBarCoordinator::with_config(config);
//! coordinator.attach(AttachTarget::new(surface, &bar, renderer).fixed_inset(20.0))?;
//!
//! // Forward the host's native events
//! coordinator.handle(ScrollEvent::DragBegan { offset_y: 0.0 });
//! coordinator.handle(ScrollEvent::Scrolled { offset_y: 30.0, metrics });
//! coordinator.handle(ScrollEvent::DragEnded { will_decelerate: false });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};

use navbar_animation::{AnimationCommand, BarRenderer, Timing};
use navbar_core::{LayoutSignal, LayoutSubscription, Size};

use crate::config::NavBarConfig;
use crate::error::{NavBarError, Result};
use crate::metrics::ContentMetrics;
use crate::surface::{BarElement, ScrollEvent, ScrollSurface};

/// Upward distance from the drag origin before a collapsed bar starts expanding
pub const EXPAND_THRESHOLD: f32 = 250.0;

/// Visible fraction above which a released bar snaps open instead of closed
pub const REVEAL_RATIO: f32 = 0.6;

/// Drag origin value meaning "no drag in progress"
const DRAG_START_UNSET: f32 = 0.0;

// ============================================================================
// Attachment
// ============================================================================

/// Everything the coordinator binds to when attached
pub struct AttachTarget {
    surface: Arc<dyn ScrollSurface>,
    bar_full_height: f32,
    renderer: Box<dyn BarRenderer>,
    fixed_inset: f32,
    container: Size,
    layout_signal: Option<LayoutSignal>,
}

impl AttachTarget {
    /// Bind a scroll surface and bar. The bar's current height becomes its full height.
    pub fn new(
        surface: Arc<dyn ScrollSurface>,
        bar: &dyn BarElement,
        renderer: impl BarRenderer + 'static,
    ) -> Self {
        Self {
            surface,
            bar_full_height: bar.height(),
            renderer: Box::new(renderer),
            fixed_inset: 0.0,
            container: Size::ZERO,
            layout_signal: None,
        }
    }

    /// Status bar / safe-area height; the content never rises above it
    pub fn fixed_inset(mut self, inset: f32) -> Self {
        self.fixed_inset = inset;
        self
    }

    /// Size of the screen containing the bar and content view
    pub fn container(mut self, size: Size) -> Self {
        self.container = size;
        self
    }

    /// Signal fired by the host on rotation / resize
    pub fn layout_signal(mut self, signal: &LayoutSignal) -> Self {
        self.layout_signal = Some(signal.clone());
        self
    }
}

struct Attachment {
    surface: Arc<dyn ScrollSurface>,
}

// ============================================================================
// State
// ============================================================================

/// Bar geometry for the lifetime of one attachment
#[derive(Clone, Copy, Debug, Default)]
struct BarGeometry {
    full_height: f32,
    fixed_inset: f32,
    current_height: f32,
    content_top: f32,
    alpha: Option<f32>,
    container: Size,
}

impl BarGeometry {
    /// Visible fraction of the bar, `None` when it has no collapsible range
    fn visible_ratio(&self) -> Option<f32> {
        (self.full_height > 0.0).then(|| self.current_height / self.full_height)
    }
}

#[derive(Default)]
struct CoordinatorState {
    config: NavBarConfig,
    geometry: BarGeometry,
    last_offset_y: f32,
    drag_start_offset_y: f32,
    attachment: Option<Attachment>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CoordinatorState {
    /// Record the new pose and build the command for it
    fn emit(
        &mut self,
        bar_height: f32,
        content_top: f32,
        alpha: Option<f32>,
        timing: Timing,
    ) -> AnimationCommand {
        let geometry = &mut self.geometry;
        geometry.current_height = bar_height;
        geometry.content_top = content_top;
        let derived = geometry.visible_ratio();
        geometry.alpha = alpha.or(derived);

        AnimationCommand::new(bar_height, content_top, geometry.alpha, timing)
            .in_container(geometry.container)
    }

    fn follow(&mut self, bar_height: f32) -> AnimationCommand {
        let content_top = bar_height.max(self.geometry.fixed_inset);
        self.emit(bar_height, content_top, None, self.config.scroll_animation)
    }

    fn reveal(&mut self) -> AnimationCommand {
        let full = self.geometry.full_height;
        self.emit(full, full, None, self.config.scroll_animation)
    }

    fn collapse(&mut self) -> AnimationCommand {
        let inset = self.geometry.fixed_inset;
        self.emit(0.0, inset, Some(0.0), self.config.scroll_animation)
    }

    fn scrolled(&mut self, offset_y: f32, metrics: ContentMetrics) -> Option<AnimationCommand> {
        let full = self.geometry.full_height;
        let current = self.geometry.current_height;
        let last = self.last_offset_y;

        let offset_start = metrics.offset_start();
        let offset_end = metrics.offset_end();
        let bouncing_at_top = offset_y < 0.0 && current != full;

        // Positive delta reveals, negative collapses
        let mut delta = last - offset_y;
        if last < offset_start {
            delta = (delta - (last - offset_start)).min(0.0);
        }
        if last > offset_end && delta < 0.0 {
            delta = (delta - last + offset_end).max(0.0);
        }

        // Content too short to ever hide the bar: leave everything untouched,
        // including the tracked offset.
        if offset_end < full {
            tracing::trace!(
                "scroll {:.1}: content end {:.1} shorter than bar {:.1}, ignored",
                offset_y,
                offset_end,
                full
            );
            return None;
        }

        let height = current + delta;
        let in_range = offset_start <= last && last <= offset_end;
        let mut command = None;

        if last <= offset_end && delta < 0.0 && current > 0.0 {
            tracing::trace!("scroll {:.1}: collapsing by {:.1}", offset_y, -delta);
            command = Some(self.follow(height.max(0.0)));
        } else if !bouncing_at_top && in_range && delta > 0.0 && current < full {
            let drag_start = self.drag_start_offset_y;
            if drag_start == DRAG_START_UNSET || offset_y < drag_start - EXPAND_THRESHOLD {
                tracing::trace!("scroll {:.1}: expanding by {:.1}", offset_y, delta);
                command = Some(self.follow(height.min(full)));
            }
        } else if bouncing_at_top && current != full {
            tracing::trace!("scroll {:.1}: pulled past top, revealing", offset_y);
            command = Some(self.reveal());
        }

        self.last_offset_y = offset_y;
        command
    }

    fn drag_ended(&mut self, will_decelerate: bool) -> Option<AnimationCommand> {
        let attachment = self.attachment.as_ref()?;
        let offset_y = attachment.surface.offset_y();
        let offset_end = attachment.surface.metrics().offset_end();

        let mut command = None;
        if !will_decelerate || offset_y > offset_end {
            match self.geometry.visible_ratio() {
                Some(ratio) if ratio > REVEAL_RATIO => {
                    tracing::debug!("drag ended at {:.2} visible, revealing", ratio);
                    command = Some(self.reveal());
                }
                Some(ratio) => {
                    tracing::debug!("drag ended at {:.2} visible, collapsing", ratio);
                    command = Some(self.collapse());
                }
                None => {}
            }
        }

        self.drag_start_offset_y = DRAG_START_UNSET;
        command
    }

    /// Same pose in the new container; opacity is derived again from the height
    fn layout_changed(&mut self, container: Size) -> AnimationCommand {
        self.geometry.container = container;
        let BarGeometry {
            current_height,
            content_top,
            ..
        } = self.geometry;
        self.emit(current_height, content_top, None, self.config.layout_animation)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renderer slot and the commands waiting for it.
///
/// The renderer runs with no coordinator lock held, so it may call back into
/// the host (and through it the coordinator) while applying a command.
/// Commands submitted during that call are applied after it returns, in order.
#[derive(Default)]
struct RenderQueue {
    renderer: Mutex<Option<Box<dyn BarRenderer>>>,
    pending: Mutex<VecDeque<AnimationCommand>>,
}

impl RenderQueue {
    fn install(&self, renderer: Box<dyn BarRenderer>) {
        *lock(&self.renderer) = Some(renderer);
    }

    fn uninstall(&self) {
        lock(&self.pending).clear();
        lock(&self.renderer).take();
    }

    fn submit(&self, command: AnimationCommand) {
        lock(&self.pending).push_back(command);

        loop {
            let mut renderer = match self.renderer.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                // Already applying further up the stack; it drains the queue
                Err(TryLockError::WouldBlock) => return,
            };

            loop {
                let next = lock(&self.pending).pop_front();
                let Some(command) = next else {
                    break;
                };
                if let Some(renderer) = renderer.as_mut() {
                    renderer.apply(&command);
                }
            }
            drop(renderer);

            if lock(&self.pending).is_empty() {
                return;
            }
        }
    }
}

/// State shared with the layout handler
#[derive(Default)]
struct Shared {
    state: Mutex<CoordinatorState>,
    render: RenderQueue,
}

impl Shared {
    /// Run `f` against attached state, then hand its command to the renderer
    /// once the state lock is released.
    fn update<F>(&self, operation: &str, f: F)
    where
        F: FnOnce(&mut CoordinatorState) -> Option<AnimationCommand>,
    {
        let command = {
            let mut state = lock(&self.state);
            if state.attachment.is_none() {
                tracing::warn!("ScrollBarCoordinator::{} called while detached", operation);
                return;
            }
            f(&mut state)
        };

        if let Some(command) = command {
            self.render.submit(command);
        }
    }
}

// ============================================================================
// Coordinator
// ============================================================================

/// Drives a navigation bar from scroll events.
///
/// Owned by the screen it serves and torn down with it: dropping the
/// coordinator (or calling [`detach`](Self::detach)) releases the layout
/// subscription so the host never calls into a discarded bar.
pub struct ScrollBarCoordinator {
    shared: Arc<Shared>,
    layout_subscription: Option<LayoutSubscription>,
}

impl ScrollBarCoordinator {
    pub fn new() -> Self {
        Self::with_config(NavBarConfig::default())
    }

    pub fn with_config(config: NavBarConfig) -> Self {
        let state = CoordinatorState {
            config,
            ..Default::default()
        };
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                render: RenderQueue::default(),
            }),
            layout_subscription: None,
        }
    }

    fn state(&self) -> MutexGuard<'_, CoordinatorState> {
        lock(&self.shared.state)
    }

    /// Bind to a scroll surface and bar.
    ///
    /// Records the bar's full height, starts fully expanded and subscribes to
    /// the layout signal if one was given.
    pub fn attach(&mut self, target: AttachTarget) -> Result<()> {
        let mut state = self.state();
        if state.attachment.is_some() {
            return Err(NavBarError::AlreadyAttached);
        }

        let full = target.bar_full_height;
        state.geometry = BarGeometry {
            full_height: full,
            fixed_inset: target.fixed_inset,
            current_height: full,
            content_top: full,
            alpha: (full > 0.0).then_some(1.0),
            container: target.container,
        };
        state.last_offset_y = target.surface.offset_y();
        state.drag_start_offset_y = DRAG_START_UNSET;
        state.attachment = Some(Attachment {
            surface: target.surface,
        });
        drop(state);

        self.shared.render.install(target.renderer);

        if let Some(signal) = target.layout_signal {
            let weak: Weak<Shared> = Arc::downgrade(&self.shared);
            self.layout_subscription = Some(signal.subscribe(move |size| {
                if let Some(shared) = weak.upgrade() {
                    shared.update("on_layout_changed", |state| {
                        Some(state.layout_changed(size))
                    });
                }
            }));
        }

        tracing::debug!(
            "ScrollBarCoordinator::attach - bar height {:.1}, inset {:.1}",
            full,
            target.fixed_inset
        );
        Ok(())
    }

    /// Release the surface, renderer and layout subscription
    pub fn detach(&mut self) -> Result<()> {
        let mut state = self.state();
        if state.attachment.take().is_none() {
            return Err(NavBarError::NotAttached);
        }
        state.geometry = BarGeometry::default();
        state.last_offset_y = 0.0;
        state.drag_start_offset_y = DRAG_START_UNSET;
        drop(state);

        if let Some(subscription) = self.layout_subscription.take() {
            subscription.cancel();
        }
        self.shared.render.uninstall();
        tracing::debug!("ScrollBarCoordinator::detach");
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.state().attachment.is_some()
    }

    // ========== Host events ==========

    /// Dispatch a forwarded host event
    pub fn handle(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::DragBegan { offset_y } => self.on_drag_began(offset_y),
            ScrollEvent::Scrolled { offset_y, metrics } => self.on_scroll(offset_y, metrics),
            ScrollEvent::DragEnded { will_decelerate } => self.on_drag_ended(will_decelerate),
        }
    }

    /// Scroll position changed
    pub fn on_scroll(&mut self, offset_y: f32, metrics: ContentMetrics) {
        self.shared
            .update("on_scroll", |state| state.scrolled(offset_y, metrics));
    }

    /// Drag began at the given offset
    pub fn on_drag_began(&mut self, offset_y: f32) {
        self.shared.update("on_drag_began", |state| {
            state.drag_start_offset_y = offset_y;
            None
        });
    }

    /// Drag ended. Snaps the bar unless momentum scrolling will follow.
    pub fn on_drag_ended(&mut self, will_decelerate: bool) {
        self.shared
            .update("on_drag_ended", |state| state.drag_ended(will_decelerate));
    }

    /// Re-apply the current pose instantly for a new container size
    pub fn on_layout_changed(&mut self, container: Size) {
        self.shared.update("on_layout_changed", |state| {
            Some(state.layout_changed(container))
        });
    }

    // ========== Commands ==========

    /// Animate the bar to full height
    pub fn reveal(&mut self) {
        self.shared.update("reveal", |state| Some(state.reveal()));
    }

    /// Animate the bar to zero height and opacity
    pub fn collapse(&mut self) {
        self.shared.update("collapse", |state| Some(state.collapse()));
    }

    /// Animate to an explicit pose. The height is clamped to the bar's range.
    pub fn animate(&mut self, bar_height: f32, content_top: f32, alpha: Option<f32>) {
        self.shared.update("animate", |state| {
            let height = bar_height.clamp(0.0, state.geometry.full_height.max(0.0));
            let timing = state.config.scroll_animation;
            Some(state.emit(height, content_top, alpha, timing))
        });
    }

    // ========== Queries ==========

    /// Current bar height
    pub fn bar_height(&self) -> f32 {
        self.state().geometry.current_height
    }

    /// Bar height when fully expanded
    pub fn bar_full_height(&self) -> f32 {
        self.state().geometry.full_height
    }

    /// Current bar opacity, `None` when the bar has no height to derive it from
    pub fn bar_alpha(&self) -> Option<f32> {
        self.state().geometry.alpha
    }

    /// Current content view y-offset
    pub fn content_top(&self) -> f32 {
        self.state().geometry.content_top
    }

    pub fn container(&self) -> Size {
        self.state().geometry.container
    }

    /// True while any part of the bar is showing
    pub fn is_bar_visible(&self) -> bool {
        self.state().geometry.current_height > 0.0
    }

    /// Last scroll offset the coordinator acted on
    pub fn last_offset_y(&self) -> f32 {
        self.state().last_offset_y
    }

    /// Offset where the current drag began, if one is in progress
    pub fn drag_start_offset_y(&self) -> Option<f32> {
        let start = self.state().drag_start_offset_y;
        (start != DRAG_START_UNSET).then_some(start)
    }

    pub fn config(&self) -> NavBarConfig {
        self.state().config
    }
}

impl Default for ScrollBarCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollBarCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ScrollBarCoordinator")
            .field("attached", &state.attachment.is_some())
            .field("geometry", &state.geometry)
            .field("last_offset_y", &state.last_offset_y)
            .field("drag_start_offset_y", &state.drag_start_offset_y)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSurface {
        offset_y: f32,
        metrics: ContentMetrics,
    }

    impl ScrollSurface for FixedSurface {
        fn offset_y(&self) -> f32 {
            self.offset_y
        }

        fn metrics(&self) -> ContentMetrics {
            self.metrics
        }
    }

    fn attached(full: f32) -> ScrollBarCoordinator {
        let surface = Arc::new(FixedSurface {
            offset_y: 0.0,
            metrics: ContentMetrics::new(2000.0, 500.0),
        });
        let mut coordinator = ScrollBarCoordinator::new();
        coordinator
            .attach(AttachTarget::new(surface, &full, |_: &AnimationCommand| {}).fixed_inset(20.0))
            .unwrap();
        coordinator
    }

    #[test]
    fn test_attach_starts_expanded() {
        let coordinator = attached(64.0);
        assert!(coordinator.is_attached());
        assert_eq!(coordinator.bar_height(), 64.0);
        assert_eq!(coordinator.bar_full_height(), 64.0);
        assert_eq!(coordinator.bar_alpha(), Some(1.0));
        assert_eq!(coordinator.drag_start_offset_y(), None);
    }

    #[test]
    fn test_attach_twice_fails() {
        let mut coordinator = attached(64.0);
        let surface = Arc::new(FixedSurface {
            offset_y: 0.0,
            metrics: ContentMetrics::default(),
        });
        let err = coordinator
            .attach(AttachTarget::new(surface, &44.0_f32, |_: &AnimationCommand| {}))
            .unwrap_err();
        assert!(matches!(err, NavBarError::AlreadyAttached));
        assert_eq!(coordinator.bar_full_height(), 64.0);
    }

    #[test]
    fn test_detached_events_are_noops() {
        let mut coordinator = ScrollBarCoordinator::new();
        coordinator.on_drag_began(100.0);
        coordinator.on_scroll(30.0, ContentMetrics::new(2000.0, 500.0));
        coordinator.on_drag_ended(false);
        coordinator.reveal();

        assert_eq!(coordinator.bar_height(), 0.0);
        assert_eq!(coordinator.last_offset_y(), 0.0);
        assert!(matches!(coordinator.detach(), Err(NavBarError::NotAttached)));
    }

    #[test]
    fn test_detach_resets_state() {
        let mut coordinator = attached(64.0);
        coordinator.on_scroll(30.0, ContentMetrics::new(2000.0, 500.0));
        coordinator.detach().unwrap();

        assert!(!coordinator.is_attached());
        assert_eq!(coordinator.bar_height(), 0.0);
        assert_eq!(coordinator.last_offset_y(), 0.0);
    }

    #[test]
    fn test_zero_height_bar_never_moves() {
        let mut coordinator = attached(0.0);
        assert_eq!(coordinator.bar_alpha(), None);

        coordinator.on_drag_began(0.0);
        coordinator.on_scroll(40.0, ContentMetrics::new(2000.0, 500.0));
        coordinator.on_scroll(-10.0, ContentMetrics::new(2000.0, 500.0));
        coordinator.on_drag_ended(false);

        assert_eq!(coordinator.bar_height(), 0.0);
        assert_eq!(coordinator.bar_alpha(), None);
    }

    #[test]
    fn test_animate_clamps_height() {
        let mut coordinator = attached(64.0);
        coordinator.animate(100.0, 64.0, None);
        assert_eq!(coordinator.bar_height(), 64.0);

        coordinator.animate(-5.0, 20.0, None);
        assert_eq!(coordinator.bar_height(), 0.0);
        assert_eq!(coordinator.bar_alpha(), Some(0.0));
    }

    #[test]
    fn test_handle_dispatches() {
        let mut coordinator = attached(64.0);
        coordinator.handle(ScrollEvent::DragBegan { offset_y: 12.0 });
        assert_eq!(coordinator.drag_start_offset_y(), Some(12.0));

        coordinator.handle(ScrollEvent::Scrolled {
            offset_y: 44.0,
            metrics: ContentMetrics::new(2000.0, 500.0),
        });
        assert_eq!(coordinator.bar_height(), 20.0);

        coordinator.handle(ScrollEvent::DragEnded {
            will_decelerate: true,
        });
        assert_eq!(coordinator.drag_start_offset_y(), None);
    }
}
