// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture phase bookkeeping across several recognizers.
//!
//! A parallax button typically listens to a pan and a long-press recognizer at
//! once. The button must stay lifted until *both* are done, which is what
//! [`GestureTracker::any_active`] answers.
//!
//! ```
//! use understory_highlight::gesture::{GestureSource, GestureTracker};
//!
//! let mut gestures = GestureTracker::default();
//! gestures.begin(GestureSource::Pan);
//! gestures.begin(GestureSource::LongPress);
//!
//! gestures.end(GestureSource::Pan);
//! assert!(gestures.any_active());
//!
//! gestures.end(GestureSource::LongPress);
//! assert!(!gestures.any_active());
//! ```

use kurbo::Point;

/// A recognizer feeding the button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureSource {
    /// Drag across the button.
    Pan,
    /// Press and hold.
    LongPress,
}

/// Phase of a classified gesture, as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase {
    /// The gesture was recognized at this button-local point.
    Began(Point),
    /// The pointer moved to this button-local point.
    Changed(Point),
    /// The gesture finished normally.
    Ended,
    /// The gesture was cancelled by the system.
    Cancelled,
}

impl GesturePhase {
    /// Returns `true` for phases after which more events will follow.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Began(_) | Self::Changed(_))
    }

    /// Returns the pointer location, if the phase carries one.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::Began(p) | Self::Changed(p) => Some(*p),
            Self::Ended | Self::Cancelled => None,
        }
    }
}

/// Tracks which gesture sources are mid-gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureTracker {
    pan: bool,
    long_press: bool,
}

impl GestureTracker {
    /// Records `phase` for `source`.
    pub fn update(&mut self, source: GestureSource, phase: &GesturePhase) {
        *self.slot(source) = phase.is_active();
    }

    /// Marks `source` as mid-gesture.
    pub fn begin(&mut self, source: GestureSource) {
        *self.slot(source) = true;
    }

    /// Marks `source` as finished.
    pub fn end(&mut self, source: GestureSource) {
        *self.slot(source) = false;
    }

    /// Returns `true` if `source` is mid-gesture.
    #[must_use]
    pub fn is_active(&self, source: GestureSource) -> bool {
        match source {
            GestureSource::Pan => self.pan,
            GestureSource::LongPress => self.long_press,
        }
    }

    /// Returns `true` if any source is mid-gesture.
    #[must_use]
    pub fn any_active(&self) -> bool {
        self.pan || self.long_press
    }

    /// Forgets all sources.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot(&mut self, source: GestureSource) -> &mut bool {
        match source {
            GestureSource::Pan => &mut self.pan,
            GestureSource::LongPress => &mut self.long_press,
        }
    }
}
