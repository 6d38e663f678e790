// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Highlight: the lift/track/settle state machine for parallax buttons.
//!
//! A parallax button rests flat until a gesture begins, then "lifts" toward the
//! viewer (bigger shadow), tilts and drifts its layers while the pointer moves,
//! and settles back once every gesture is over. This crate decides *when* each
//! of those happens and *what* should animate; it leaves the interpolation to
//! the host.
//!
//! - [`HighlightController`]: the two-state machine. Each call returns a
//!   [`Transition`] with the new [`HighlightState`] and a list of
//!   [`AnimationCommand`]s.
//! - [`ParallaxButton`]: composes the controller with a
//!   [`GestureTracker`](gesture::GestureTracker) and exposes
//!   `on_gesture_start`/`on_gesture_move`/`on_gesture_end`.
//! - [`animation`]: the command vocabulary (targets, properties, timing).
//!
//! Poses come from `understory_parallax`.
//!
//! ## Completion messages
//!
//! Settling only returns the button to [`HighlightState::Resting`] after the
//! host reports the settle request as complete. Requests carry a [`RequestId`];
//! hosts pass it back through [`HighlightController::animation_completed`] for
//! every request with `notify_completion` set. Completions for requests that
//! were superseded (for example, a settle interrupted by a new lift) are
//! recognized as stale and ignored.
//!
//! ```rust
//! use kurbo::Point;
//! use understory_highlight::{AnimationCommand, HighlightState, ParallaxButton};
//! use understory_highlight::gesture::GestureSource;
//! use understory_parallax::{ButtonBounds, ParallaxConfig};
//!
//! let bounds = ButtonBounds::from_dimensions(160.0, 90.0).unwrap();
//! let mut button = ParallaxButton::new(ParallaxConfig::default().with_layer_count(3), bounds);
//!
//! let mut pending = Vec::new();
//! for transition in [
//!     button.on_gesture_start(GestureSource::Pan, Point::new(80.0, 45.0)),
//!     button.on_gesture_move(GestureSource::Pan, Point::new(120.0, 20.0)),
//!     button.on_gesture_end(GestureSource::Pan),
//! ] {
//!     for command in transition.commands {
//!         if let AnimationCommand::Animate(request) = command {
//!             // hand `request` to the animation engine...
//!             if request.notify_completion {
//!                 pending.push(request.id);
//!             }
//!         }
//!     }
//! }
//!
//! // ...which eventually reports back.
//! for id in pending {
//!     button.on_animation_completed(id);
//! }
//! assert_eq!(button.state(), HighlightState::Resting);
//! ```
//!
//! ## Logging
//!
//! State changes are logged through `tracing` at `debug` level and ignored
//! calls at `trace` level.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod animation;
mod button;
mod controller;
pub mod gesture;

pub use animation::{
    AnimatedProperties, AnimationCommand, AnimationRequest, AnimationTarget, RequestId, Timing,
    Transition,
};
pub use button::ParallaxButton;
pub use controller::{HighlightController, HighlightState, RestingAppearance};
