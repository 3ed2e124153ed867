//! Collapsible Navbar Animation
//!
//! Animation commands and their playback.
//!
//! # Features
//!
//! - **Commands**: fire-and-forget requests describing a target bar pose and timing
//! - **Easing**: CSS-style curves including cubic bezier
//! - **Tweening**: a reference renderer that interpolates commands frame by frame
//! - **Interruptible**: a new command starts from the pose currently on screen

pub mod command;
pub mod easing;
pub mod tween;

pub use command::{AnimationCommand, BarFrame, BarRenderer, Timing};
pub use easing::Easing;
pub use tween::{BarPose, BarTransition, TweenRenderer};
