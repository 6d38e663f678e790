// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use thiserror::Error;

/// Size of a parallax button in its own coordinate space.
///
/// Every pose calculation divides by the button width and height, so a
/// zero-sized (or NaN) button would silently produce NaN transforms. Instead of
/// carrying that hazard into [`compute_pose`](crate::compute_pose), bounds are
/// checked once, when the host hands them over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonBounds {
    size: Size,
}

/// Errors reported by [`ButtonBounds::new`].
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum BoundsError {
    /// Width or height is NaN or infinite.
    #[error("button bounds must be finite, got {width}x{height}")]
    NonFinite {
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },
    /// Width or height is zero or negative.
    #[error("button bounds must be positive, got {width}x{height}")]
    Empty {
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },
}

impl ButtonBounds {
    /// Validates `size` as button bounds.
    pub fn new(size: Size) -> Result<Self, BoundsError> {
        let Size { width, height } = size;
        if !width.is_finite() || !height.is_finite() {
            return Err(BoundsError::NonFinite { width, height });
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(BoundsError::Empty { width, height });
        }
        Ok(Self { size })
    }

    /// Shorthand for `ButtonBounds::new(Size::new(width, height))`.
    pub fn from_dimensions(width: f64, height: f64) -> Result<Self, BoundsError> {
        Self::new(Size::new(width, height))
    }

    /// Returns the validated size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Returns the height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Returns the bounds as a rectangle anchored at the origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.size.to_rect()
    }

    /// Returns the center of the button, where every resting layer sits.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Returns `true` if `point` lies inside the button.
    ///
    /// Pose computation accepts points outside the bounds; this is for hosts
    /// that prefer to drop such points themselves.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}
