// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use tracing::trace;
use understory_parallax::{ButtonBounds, ParallaxConfig};

use crate::animation::{RequestId, Transition};
use crate::controller::{HighlightController, HighlightState};
use crate::gesture::{GesturePhase, GestureSource, GestureTracker};

/// The gesture-facing side of a parallax button.
///
/// Composes a [`HighlightController`] with a [`GestureTracker`] so that a host
/// widget only has to forward recognizer callbacks:
///
/// - any source beginning lifts the button,
/// - moves track the pointer,
/// - an end settles the button once no source is mid-gesture.
///
/// Buttons without image layers ignore gestures entirely.
///
/// ```rust
/// use kurbo::Point;
/// use understory_highlight::{HighlightState, ParallaxButton};
/// use understory_highlight::gesture::GestureSource;
/// use understory_parallax::{ButtonBounds, ParallaxConfig};
///
/// let bounds = ButtonBounds::from_dimensions(100.0, 100.0).unwrap();
/// let mut button = ParallaxButton::new(ParallaxConfig::default().with_layer_count(2), bounds);
///
/// button.on_gesture_start(GestureSource::LongPress, Point::new(50.0, 50.0));
/// button.on_gesture_start(GestureSource::Pan, Point::new(50.0, 50.0));
/// button.on_gesture_move(GestureSource::Pan, Point::new(60.0, 40.0));
///
/// // The long press still holds the button up.
/// assert!(button.on_gesture_end(GestureSource::Pan).is_empty());
/// assert!(!button.on_gesture_end(GestureSource::LongPress).is_empty());
/// assert_eq!(button.state(), HighlightState::Lifted);
/// ```
#[derive(Clone, Debug)]
pub struct ParallaxButton {
    controller: HighlightController,
    gestures: GestureTracker,
}

impl ParallaxButton {
    /// Creates a resting button.
    #[must_use]
    pub fn new(config: ParallaxConfig, bounds: ButtonBounds) -> Self {
        Self {
            controller: HighlightController::new(config, bounds),
            gestures: GestureTracker::default(),
        }
    }

    /// Returns the underlying controller.
    #[must_use]
    pub fn controller(&self) -> &HighlightController {
        &self.controller
    }

    /// Returns the underlying controller for reconfiguration.
    pub fn controller_mut(&mut self) -> &mut HighlightController {
        &mut self.controller
    }

    /// Returns the gesture bookkeeping.
    #[must_use]
    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    /// Returns the lift state.
    #[must_use]
    pub fn state(&self) -> HighlightState {
        self.controller.state()
    }

    /// Dispatches one gesture callback.
    ///
    /// The phase is recorded for `source` before the controller sees it, so a
    /// move without a preceding begin still counts as mid-gesture.
    pub fn on_gesture(&mut self, source: GestureSource, phase: GesturePhase) -> Transition {
        self.gestures.update(source, &phase);
        if !self.has_layers() {
            trace!(?source, ?phase, "gesture ignored: no layers");
            return Transition::idle(self.state());
        }
        match phase {
            GesturePhase::Began(_) => self.controller.enter_movement(),
            GesturePhase::Changed(point) => self.controller.process_movement(point),
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.controller.exit_movement(self.gestures.any_active())
            }
        }
    }

    /// A gesture began at `point`.
    pub fn on_gesture_start(&mut self, source: GestureSource, point: Point) -> Transition {
        self.on_gesture(source, GesturePhase::Began(point))
    }

    /// A gesture moved to `point`.
    pub fn on_gesture_move(&mut self, source: GestureSource, point: Point) -> Transition {
        self.on_gesture(source, GesturePhase::Changed(point))
    }

    /// A gesture ended or was cancelled.
    pub fn on_gesture_end(&mut self, source: GestureSource) -> Transition {
        self.on_gesture(source, GesturePhase::Ended)
    }

    /// A tap was recognized.
    pub fn on_tap(&mut self) -> Transition {
        self.controller.tap()
    }

    /// The host's animation engine finished request `id`.
    pub fn on_animation_completed(&mut self, id: RequestId) -> Transition {
        self.controller.animation_completed(id)
    }

    /// Updates the bounds after a host layout pass.
    pub fn set_bounds(&mut self, bounds: ButtonBounds) {
        self.controller.set_bounds(bounds);
    }

    /// Sets the parallax intensity, clamped into `[0, 2]`.
    pub fn set_parallax_intensity(&mut self, intensity: f64) {
        self.controller.set_parallax_intensity(intensity);
    }

    /// Sets the number of image layers.
    pub fn set_layer_count(&mut self, layer_count: usize) {
        self.controller.set_layer_count(layer_count);
    }

    fn has_layers(&self) -> bool {
        self.controller.config().layer_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(layers: usize) -> ParallaxButton {
        let bounds = ButtonBounds::from_dimensions(80.0, 80.0).unwrap();
        ParallaxButton::new(ParallaxConfig::default().with_layer_count(layers), bounds)
    }

    #[test]
    fn pan_lifts_tracks_and_settles() {
        let mut b = button(2);
        let p = Point::new(20.0, 20.0);
        assert!(!b.on_gesture(GestureSource::Pan, GesturePhase::Began(p)).is_empty());
        assert!(!b.on_gesture(GestureSource::Pan, GesturePhase::Changed(p)).is_empty());
        let settle = b.on_gesture(GestureSource::Pan, GesturePhase::Ended);
        assert!(!settle.is_empty());
        assert!(b.controller().is_settling());
    }

    #[test]
    fn second_source_does_not_lift_twice() {
        let mut b = button(2);
        b.on_gesture_start(GestureSource::Pan, Point::ZERO);
        assert!(b.on_gesture_start(GestureSource::LongPress, Point::ZERO).is_empty());
    }

    #[test]
    fn cancel_counts_as_end() {
        let mut b = button(1);
        b.on_gesture_start(GestureSource::Pan, Point::ZERO);
        let t = b.on_gesture(GestureSource::Pan, GesturePhase::Cancelled);
        assert!(!t.is_empty());
        assert!(!b.gestures().any_active());
    }

    #[test]
    fn every_phase_updates_the_tracker() {
        let mut b = button(2);
        b.on_gesture(GestureSource::LongPress, GesturePhase::Changed(Point::ZERO));
        assert!(b.gestures().is_active(GestureSource::LongPress));

        b.on_gesture(GestureSource::Pan, GesturePhase::Began(Point::ZERO));
        b.on_gesture_end(GestureSource::Pan);
        assert!(!b.gestures().is_active(GestureSource::Pan));
        assert!(b.gestures().any_active());
    }

    #[test]
    fn tracker_follows_gestures_without_layers() {
        let mut b = button(0);
        b.on_gesture_start(GestureSource::Pan, Point::ZERO);
        assert!(b.gestures().is_active(GestureSource::Pan));
        b.on_gesture(GestureSource::Pan, GesturePhase::Cancelled);
        assert!(!b.gestures().any_active());
    }

    #[test]
    fn no_layers_no_animation() {
        let mut b = button(0);
        assert!(b.on_gesture_start(GestureSource::Pan, Point::ZERO).is_empty());
        assert!(b.on_gesture_move(GestureSource::Pan, Point::ZERO).is_empty());
        assert!(b.on_gesture_end(GestureSource::Pan).is_empty());
        assert_eq!(b.state(), HighlightState::Resting);
    }

    #[test]
    fn layers_added_later_enable_lifting() {
        let mut b = button(0);
        b.set_layer_count(3);
        assert!(!b.on_gesture_start(GestureSource::Pan, Point::ZERO).is_empty());
        assert_eq!(b.state(), HighlightState::Lifted);
    }
}
