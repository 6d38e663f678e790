// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning constants for the parallax effect.

/// Upper bound for [`ParallaxConfig::parallax_intensity`].
pub const MAX_PARALLAX_INTENSITY: f64 = 2.0;

/// Tuning constants for a parallax button.
///
/// The defaults reproduce the classic tilt-shift icon look. Most hosts only
/// touch [`layer_count`](Self::layer_count) and
/// [`parallax_intensity`](Self::parallax_intensity):
///
/// ```rust
/// use understory_parallax::ParallaxConfig;
///
/// let config = ParallaxConfig::default()
///     .with_layer_count(4)
///     .with_parallax_intensity(1.5);
/// assert_eq!(config.layer_count, 4);
/// assert_eq!(config.parallax_intensity(), 1.5);
///
/// // Intensity is clamped into [0, 2].
/// let config = config.with_parallax_intensity(5.0);
/// assert_eq!(config.parallax_intensity(), 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ParallaxConfig {
    /// Scales the vertical pointer offset into rotation about X, in degrees.
    pub rotate_x_factor: f64,
    /// Scales the horizontal pointer offset into rotation about Y, in degrees.
    pub rotate_y_factor: f64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_divisor"))]
    rotate_z_factor: f64,
    /// Largest lateral shift of the button along X.
    pub max_translation_x: f64,
    /// Largest lateral shift of the button along Y.
    pub max_translation_y: f64,
    /// Uniform scale applied while the button is lifted.
    pub highlighted_scale: f64,
    /// Base per-layer drift factor along X.
    pub parallax_intensity_x_factor: f64,
    /// Base per-layer drift factor along Y.
    pub parallax_intensity_y_factor: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "deserialize_intensity")
    )]
    parallax_intensity: f64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_divisor"))]
    shadow_factor: f64,
    /// Shadow opacity while lifted.
    pub lifted_shadow_opacity: f64,
    /// Shadow opacity while resting.
    pub resting_shadow_opacity: f64,
    /// Opacity of the specular highlight while lifted.
    pub specular_alpha: f64,
    /// Size of the specular highlight relative to the button.
    ///
    /// The highlight is centered on the pointer, so a scale of `2` keeps it
    /// covering the whole button wherever the pointer is.
    pub specular_scale: f64,
    /// Corner radius of the button and its layers.
    pub corner_radius: f64,
    /// Duration, in seconds, of the rise, track and settle animations.
    pub animation_duration: f64,
    /// Duration, in seconds, of per-layer drift while tracking.
    ///
    /// Shorter than [`animation_duration`](Self::animation_duration) so the
    /// layers lag slightly behind the tilt.
    pub layer_track_duration: f64,
    /// Number of stacked image layers, not counting the specular highlight.
    pub layer_count: usize,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            rotate_x_factor: 12.0,
            rotate_y_factor: 14.0,
            rotate_z_factor: 9.0,
            max_translation_x: 3.5,
            max_translation_y: 2.5,
            highlighted_scale: 1.22,
            parallax_intensity_x_factor: 0.5,
            parallax_intensity_y_factor: 0.7,
            parallax_intensity: 1.0,
            shadow_factor: 12.0,
            lifted_shadow_opacity: 0.6,
            resting_shadow_opacity: 0.5,
            specular_alpha: 0.2,
            specular_scale: 2.0,
            corner_radius: 5.0,
            animation_duration: 0.4,
            layer_track_duration: 0.16,
            layer_count: 0,
        }
    }
}

impl ParallaxConfig {
    /// Returns the parallax intensity multiplier, in `[0, 2]`.
    ///
    /// `0` disables layer drift entirely, `1` is the default and `2` doubles it.
    #[must_use]
    pub fn parallax_intensity(&self) -> f64 {
        self.parallax_intensity
    }

    /// Sets the parallax intensity, clamped into `[0, 2]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_parallax_intensity(&mut self, intensity: f64) {
        if let Some(intensity) = clamp_intensity(intensity) {
            self.parallax_intensity = intensity;
        }
    }

    /// Builder form of [`set_parallax_intensity`](Self::set_parallax_intensity).
    #[must_use]
    pub fn with_parallax_intensity(mut self, intensity: f64) -> Self {
        self.set_parallax_intensity(intensity);
        self
    }

    /// Returns the divisor turning the X and Y rotations into a small
    /// rotation about Z.
    #[must_use]
    pub fn rotate_z_factor(&self) -> f64 {
        self.rotate_z_factor
    }

    /// Sets the Z rotation divisor.
    ///
    /// Zero and non-finite values are ignored.
    pub fn set_rotate_z_factor(&mut self, factor: f64) {
        if let Some(factor) = checked_divisor(factor) {
            self.rotate_z_factor = factor;
        }
    }

    /// Returns the divisor relating shadow offset and radius to the button
    /// height.
    #[must_use]
    pub fn shadow_factor(&self) -> f64 {
        self.shadow_factor
    }

    /// Sets the shadow divisor.
    ///
    /// Zero and non-finite values are ignored.
    pub fn set_shadow_factor(&mut self, factor: f64) {
        if let Some(factor) = checked_divisor(factor) {
            self.shadow_factor = factor;
        }
    }

    /// Builder form of [`set_shadow_factor`](Self::set_shadow_factor).
    #[must_use]
    pub fn with_shadow_factor(mut self, factor: f64) -> Self {
        self.set_shadow_factor(factor);
        self
    }

    /// Sets the number of image layers.
    #[must_use]
    pub fn with_layer_count(mut self, layer_count: usize) -> Self {
        self.layer_count = layer_count;
        self
    }

    /// Sets the per-axis rotation factors.
    ///
    /// A zero or non-finite `z` leaves the Z divisor unchanged.
    #[must_use]
    pub fn with_rotation_factors(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotate_x_factor = x;
        self.rotate_y_factor = y;
        self.set_rotate_z_factor(z);
        self
    }

    /// Sets the per-axis translation limits.
    #[must_use]
    pub fn with_max_translation(mut self, x: f64, y: f64) -> Self {
        self.max_translation_x = x;
        self.max_translation_y = y;
        self
    }

    /// Sets the uniform scale applied while lifted.
    #[must_use]
    pub fn with_highlighted_scale(mut self, scale: f64) -> Self {
        self.highlighted_scale = scale;
        self
    }

    /// Sets the main animation duration, in seconds.
    #[must_use]
    pub fn with_animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }
}

fn clamp_intensity(intensity: f64) -> Option<f64> {
    intensity
        .is_finite()
        .then(|| intensity.clamp(0.0, MAX_PARALLAX_INTENSITY))
}

fn checked_divisor(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}

#[cfg(feature = "serde")]
fn deserialize_divisor<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <f64 as serde::Deserialize>::deserialize(deserializer)?;
    checked_divisor(raw)
        .ok_or_else(|| serde::de::Error::custom("divisor must be finite and non-zero"))
}

#[cfg(feature = "serde")]
fn deserialize_intensity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <f64 as serde::Deserialize>::deserialize(deserializer)?;
    clamp_intensity(raw)
        .ok_or_else(|| serde::de::Error::custom("parallax_intensity must be finite"))
}
