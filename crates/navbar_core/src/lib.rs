//! Collapsible Navbar Core
//!
//! Foundational primitives shared by the navbar crates:
//!
//! - **Geometry**: logical-pixel `Size` and `Rect` values
//! - **Layout Signals**: rotation / resize notifications with scoped subscriptions
//!
//! # Example
//!
//! ```rust
//! use navbar_core::{LayoutSignal, Size};
//! use std::sync::{Arc, Mutex};
//!
//! let signal = LayoutSignal::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let seen_clone = seen.clone();
//!
//! let subscription = signal.subscribe(move |size| seen_clone.lock().unwrap().push(size));
//! signal.emit(Size::new(320.0, 568.0));
//!
//! // Dropping the guard unregisters the handler
//! drop(subscription);
//! signal.emit(Size::new(568.0, 320.0));
//!
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

pub mod geometry;
pub mod signal;

pub use geometry::{Rect, Size};
pub use signal::{LayoutSignal, LayoutSubscription, SubscriptionId};
