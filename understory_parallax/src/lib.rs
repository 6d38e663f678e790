// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Parallax: pointer-driven depth poses for layered buttons.
//!
//! A parallax button is a stack of flat image layers plus a translucent
//! specular highlight. While the button is "lifted", the pointer position is
//! turned into a small 3D tilt of the whole button and a lateral drift of each
//! layer, so that foreground layers appear to float above the background.
//!
//! This crate is the pure computation half of that effect:
//!
//! - [`ParallaxConfig`]: tuning constants (rotation factors, translation
//!   limits, lifted scale, parallax intensity, shadow and timing values).
//! - [`ButtonBounds`]: the button's own size, validated to be positive.
//! - [`compute_pose`] / [`ParallaxEngine`]: map a pointer location to a [`Pose`].
//! - [`perspective_transform`]: the rotate → translate → scale composition.
//!
//! It does **not** own any view tree, gesture recognizer or animation engine.
//! Hosts feed it button-local pointer coordinates and apply the resulting
//! values however they like. The `understory_highlight` crate wraps it in the
//! lift/settle state machine that turns poses into animation commands.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_parallax::{ButtonBounds, ParallaxConfig, compute_pose};
//!
//! let config = ParallaxConfig::default().with_layer_count(3);
//! let bounds = ButtonBounds::new(Size::new(100.0, 100.0)).unwrap();
//!
//! let pose = compute_pose(bounds, Point::new(0.0, 0.0), &config);
//! assert!((pose.rotation.x - -6.0).abs() < 1e-9);
//! assert!((pose.rotation.y - 7.0).abs() < 1e-9);
//! assert_eq!(pose.layer_offsets.len(), 3);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `glam/std`.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `serde`: derive `Serialize`/`Deserialize` for [`ParallaxConfig`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod bounds;
mod config;
mod pose;
mod transform;

pub use bounds::{BoundsError, ButtonBounds};
pub use config::{MAX_PARALLAX_INTENSITY, ParallaxConfig};
pub use pose::{ParallaxEngine, Pose, Rotation, compute_pose};
pub use transform::{lift_scale, perspective_transform};
