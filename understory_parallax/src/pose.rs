// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer → pose mapping.

use alloc::vec::Vec;

use glam::DMat4;
use kurbo::{Point, Vec2};
use tracing::trace;

use crate::bounds::ButtonBounds;
use crate::config::ParallaxConfig;
use crate::transform::perspective_transform;

/// Vertical drift is damped relative to horizontal drift.
const VERTICAL_DRIFT_DAMPING: f64 = 0.3;

/// Rotation about each axis, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    /// Rotation about X.
    pub x: f64,
    /// Rotation about Y.
    pub y: f64,
    /// Rotation about Z.
    pub z: f64,
}

impl Rotation {
    /// No rotation.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Everything needed to draw the lifted button for one pointer position.
///
/// A pose is a plain value: it is recomputed from scratch for every pointer
/// event and never updated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    /// Tilt of the whole button.
    pub rotation: Rotation,
    /// Lateral shift of the whole button.
    pub translation: Vec2,
    /// Rotation, translation and lifted scale composed into one matrix.
    pub transform: DMat4,
    /// Drift of each image layer from the button center, one entry per layer.
    ///
    /// Entry `0` is the base layer and is always zero.
    pub layer_offsets: Vec<Vec2>,
    /// Where the specular highlight is centered (the raw pointer).
    pub specular_position: Point,
    /// Target opacity of the specular highlight.
    pub specular_opacity: f64,
}

/// Computes the lifted pose of a button for a pointer location.
///
/// `pointer` is in button-local coordinates and may lie outside `bounds`.
///
/// The rotation terms deliberately mix a center-relative pixel delta with a
/// normalized offset; the visual tuning depends on it.
#[must_use]
pub fn compute_pose(bounds: ButtonBounds, pointer: Point, config: &ParallaxConfig) -> Pose {
    let width = bounds.width();
    let height = bounds.height();

    let offset_x = pointer.x / width;
    let offset_y = pointer.y / height;
    let dx = pointer.x - width / 2.0;
    let dy = pointer.y - height / 2.0;

    let rot_x = (dy - offset_y) * (config.rotate_x_factor / width);
    let rot_y = (offset_x - dx) * (config.rotate_y_factor / width);
    let rotation = Rotation {
        x: rot_x,
        y: rot_y,
        z: (rot_x + rot_y) / config.rotate_z_factor(),
    };

    let translation = Vec2::new(
        (-2.0 * pointer.x / width) * config.max_translation_x,
        (-2.0 * pointer.y / height) * config.max_translation_y,
    );

    let transform = perspective_transform(rotation, translation, config.highlighted_scale);
    let layer_offsets = layer_offsets(translation, config);

    trace!(
        x = pointer.x,
        y = pointer.y,
        rot_x = rotation.x,
        rot_y = rotation.y,
        rot_z = rotation.z,
        "computed parallax pose"
    );

    Pose {
        rotation,
        translation,
        transform,
        layer_offsets,
        specular_position: pointer,
        specular_opacity: config.specular_alpha,
    }
}

fn layer_offsets(translation: Vec2, config: &ParallaxConfig) -> Vec<Vec2> {
    let intensity = config.parallax_intensity();
    let x_drift = intensity * config.parallax_intensity_x_factor;
    let y_drift = intensity * config.parallax_intensity_y_factor;
    (0..config.layer_count)
        .map(|i| {
            if i == 0 {
                return Vec2::ZERO;
            }
            let depth = i as f64;
            Vec2::new(
                translation.x * depth * x_drift,
                translation.y * depth * VERTICAL_DRIFT_DAMPING * y_drift,
            )
        })
        .collect()
}

/// A [`ParallaxConfig`] bundled with [`compute_pose`].
///
/// Hosts that keep the configuration next to the computation can use this
/// instead of passing the config around; the intensity setter is the knob most
/// hosts expose to users.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallaxEngine {
    config: ParallaxConfig,
}

impl ParallaxEngine {
    /// Creates an engine with `config`.
    #[must_use]
    pub fn new(config: ParallaxConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    /// Returns the configuration for in-place tuning.
    pub fn config_mut(&mut self) -> &mut ParallaxConfig {
        &mut self.config
    }

    /// Sets the parallax intensity; read again by every later pose.
    pub fn set_parallax_intensity(&mut self, intensity: f64) {
        self.config.set_parallax_intensity(intensity);
    }

    /// Computes the pose for `pointer` inside `bounds`.
    #[must_use]
    pub fn pose(&self, bounds: ButtonBounds, pointer: Point) -> Pose {
        compute_pose(bounds, pointer, &self.config)
    }
}
