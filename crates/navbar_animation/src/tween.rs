//! Tweened playback of animation commands
//!
//! [`TweenRenderer`] is a reference [`BarRenderer`] for hosts that draw frames
//! themselves instead of handing commands to a native animation API. Each
//! command becomes a [`BarTransition`] from the pose currently on screen, so an
//! interrupted transition continues from wherever it was.

use navbar_core::Size;

use crate::command::{AnimationCommand, BarFrame, BarRenderer, Timing};

/// Interpolatable bar state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPose {
    pub bar_height: f32,
    pub content_top: f32,
    pub alpha: f32,
}

impl BarPose {
    pub const fn new(bar_height: f32, content_top: f32, alpha: f32) -> Self {
        Self {
            bar_height,
            content_top,
            alpha,
        }
    }

    /// Pose reached by `command` when starting from `self`
    fn target_of(&self, command: &AnimationCommand) -> Self {
        Self {
            bar_height: command.bar_height,
            content_top: command.content_top,
            alpha: command.alpha.unwrap_or(self.alpha),
        }
    }

    fn lerp(&self, to: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            bar_height: mix(self.bar_height, to.bar_height),
            content_top: mix(self.content_top, to.content_top),
            alpha: mix(self.alpha, to.alpha),
        }
    }
}

/// A single timed transition between two poses
#[derive(Clone, Debug)]
pub struct BarTransition {
    from: BarPose,
    to: BarPose,
    timing: Timing,
    elapsed_ms: f32,
}

impl BarTransition {
    pub fn new(from: BarPose, to: BarPose, timing: Timing) -> Self {
        Self {
            from,
            to,
            timing,
            elapsed_ms: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.timing.is_instant() {
            return 1.0;
        }
        (self.elapsed_ms / self.timing.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current interpolated pose
    pub fn value(&self) -> BarPose {
        let eased = self.timing.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    pub fn target(&self) -> BarPose {
        self.to
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.timing.duration_ms as f32);
    }
}

/// Renderer that tweens each command over its duration
#[derive(Clone, Debug)]
pub struct TweenRenderer {
    pose: BarPose,
    transition: Option<BarTransition>,
    container: Size,
}

impl TweenRenderer {
    pub fn new(initial: BarPose, container: Size) -> Self {
        Self {
            pose: initial,
            transition: None,
            container,
        }
    }

    /// Pose currently on screen
    pub fn pose(&self) -> BarPose {
        self.transition
            .as_ref()
            .map_or(self.pose, BarTransition::value)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    /// Frames for the current pose
    pub fn frame(&self) -> BarFrame {
        let pose = self.pose();
        AnimationCommand::new(
            pose.bar_height,
            pose.content_top,
            Some(pose.alpha),
            Timing::instant(),
        )
        .in_container(self.container)
        .frame()
    }

    /// Advance the running transition. Returns true while frames are still needed.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };

        transition.tick(dt_ms);
        if transition.is_finished() {
            self.pose = transition.target();
            self.transition = None;
            return false;
        }
        true
    }
}

impl BarRenderer for TweenRenderer {
    fn apply(&mut self, command: &AnimationCommand) {
        let from = self.pose();
        let to = from.target_of(command);
        self.container = command.container;

        if command.timing.is_instant() {
            self.pose = to;
            self.transition = None;
            return;
        }

        tracing::trace!(
            "TweenRenderer::apply - height {:.1} -> {:.1} over {}ms",
            from.bar_height,
            to.bar_height,
            command.timing.duration_ms
        );
        self.pose = from;
        self.transition = Some(BarTransition::new(from, to, command.timing));
    }
}
