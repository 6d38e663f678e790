// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DMat4, DVec3};
use kurbo::Vec2;

use crate::pose::Rotation;

/// Builds the lifted button transform.
///
/// The button is rotated about X, then Y, then Z, then shifted by
/// `(-translation.x, translation.y, 0)` and finally scaled uniformly by
/// `scale`. The order is significant: scaling last also scales the shift.
///
/// glam uses column vectors, so the product reads right to left.
///
/// ```rust
/// use glam::DVec3;
/// use kurbo::Vec2;
/// use understory_parallax::{Rotation, perspective_transform};
///
/// let m = perspective_transform(Rotation::ZERO, Vec2::new(2.0, 1.0), 1.5);
/// let moved = m.transform_point3(DVec3::ZERO);
/// assert!((moved - DVec3::new(-3.0, 1.5, 0.0)).length() < 1e-12);
/// ```
#[must_use]
pub fn perspective_transform(rotation: Rotation, translation: Vec2, scale: f64) -> DMat4 {
    let rotate_x = DMat4::from_rotation_x(rotation.x.to_radians());
    let rotate_y = DMat4::from_rotation_y(rotation.y.to_radians());
    let rotate_z = DMat4::from_rotation_z(rotation.z.to_radians());
    let translate = DMat4::from_translation(DVec3::new(-translation.x, translation.y, 0.0));
    lift_scale(scale) * translate * rotate_z * rotate_y * rotate_x
}

/// Uniform scale about the button center.
///
/// `lift_scale(1.0)` is the identity, which is what a settled button returns to.
#[must_use]
pub fn lift_scale(scale: f64) -> DMat4 {
    DMat4::from_scale(DVec3::splat(scale))
}
