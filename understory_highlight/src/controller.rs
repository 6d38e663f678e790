// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lift/track/settle state machine.

use alloc::vec::Vec;

use glam::DMat4;
use kurbo::{Point, Size, Vec2};
use tracing::{debug, trace};
use understory_parallax::{ButtonBounds, ParallaxConfig, ParallaxEngine, lift_scale};

use crate::animation::{
    AnimatedProperties, AnimationCommand, AnimationRequest, AnimationTarget, RequestId, Timing,
    Transition,
};

const TAP_PRESS_SCALE: f64 = 0.93;
const TAP_PRESS_DURATION: f64 = 0.3;
const TAP_RELEASE_DURATION: f64 = 0.4;
const TAP_SPRING: Timing = Timing::Spring {
    damping: 0.8,
    initial_velocity: 0.6,
};

/// Whether the button is lifted toward the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HighlightState {
    /// Flat, with the resting shadow.
    #[default]
    Resting,
    /// Raised and tracking the pointer.
    ///
    /// A button stays `Lifted` while its settle animation is in flight and
    /// only becomes `Resting` once that animation reports completion.
    Lifted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Resting,
    Lifted,
    Settling(RequestId),
}

/// Appearance of a button that is not lifted.
///
/// Hosts apply this once when the button is created; a completed settle
/// returns the button to exactly these values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestingAppearance {
    /// Button transform.
    pub transform: DMat4,
    /// Shadow offset.
    pub shadow_offset: Vec2,
    /// Shadow opacity.
    pub shadow_opacity: f64,
    /// Shadow blur radius.
    pub shadow_radius: f64,
    /// Corner radius of the button and its layers.
    pub corner_radius: f64,
    /// Specular highlight opacity.
    pub specular_opacity: f64,
    /// Size of the specular highlight, which is centered on the pointer.
    pub specular_size: Size,
}

/// Drives the lift effect of one parallax button.
///
/// Every operation returns a [`Transition`] holding the new state and the
/// animation commands to run. Calls that make no sense in the current state
/// are no-ops and return no commands.
///
/// ```rust
/// use kurbo::Point;
/// use understory_highlight::{HighlightController, HighlightState};
/// use understory_parallax::{ButtonBounds, ParallaxConfig};
///
/// let bounds = ButtonBounds::from_dimensions(200.0, 120.0).unwrap();
/// let mut controller =
///     HighlightController::new(ParallaxConfig::default().with_layer_count(3), bounds);
///
/// let rise = controller.enter_movement();
/// assert_eq!(rise.state, HighlightState::Lifted);
/// assert!(controller.enter_movement().is_empty());
///
/// let track = controller.process_movement(Point::new(40.0, 30.0));
/// assert!(!track.is_empty());
///
/// // The button only rests again once the settle animation completes.
/// let settle = controller.exit_movement(false);
/// assert_eq!(settle.state, HighlightState::Lifted);
/// let id = settle.requests().find(|r| r.notify_completion).unwrap().id;
/// assert_eq!(controller.animation_completed(id).state, HighlightState::Resting);
/// ```
#[derive(Clone, Debug)]
pub struct HighlightController {
    engine: ParallaxEngine,
    bounds: ButtonBounds,
    phase: Phase,
    pending_tap: Option<RequestId>,
    next_id: u64,
}

impl HighlightController {
    /// Creates a resting controller.
    #[must_use]
    pub fn new(config: ParallaxConfig, bounds: ButtonBounds) -> Self {
        Self {
            engine: ParallaxEngine::new(config),
            bounds,
            phase: Phase::Resting,
            pending_tap: None,
            next_id: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> HighlightState {
        match self.phase {
            Phase::Resting => HighlightState::Resting,
            Phase::Lifted | Phase::Settling(_) => HighlightState::Lifted,
        }
    }

    /// Returns `true` while a settle animation is pending.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling(_))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ParallaxConfig {
        self.engine.config()
    }

    /// Returns the button bounds.
    #[must_use]
    pub fn bounds(&self) -> ButtonBounds {
        self.bounds
    }

    /// Updates the button bounds after a host layout pass.
    pub fn set_bounds(&mut self, bounds: ButtonBounds) {
        self.bounds = bounds;
    }

    /// Sets the parallax intensity, clamped into `[0, 2]`.
    ///
    /// Takes effect on the next [`process_movement`](Self::process_movement).
    pub fn set_parallax_intensity(&mut self, intensity: f64) {
        self.engine.set_parallax_intensity(intensity);
    }

    /// Sets the number of image layers after the host rebuilt its layer stack.
    pub fn set_layer_count(&mut self, layer_count: usize) {
        self.engine.config_mut().layer_count = layer_count;
    }

    /// Returns the appearance of the button while resting.
    #[must_use]
    pub fn resting_appearance(&self) -> RestingAppearance {
        let config = self.config();
        RestingAppearance {
            transform: lift_scale(1.0),
            shadow_offset: Vec2::new(0.0, config.shadow_factor() / 3.0),
            shadow_opacity: config.resting_shadow_opacity,
            shadow_radius: self.bounds.height() / (2.0 * config.shadow_factor()),
            corner_radius: config.corner_radius,
            specular_opacity: 0.0,
            specular_size: self.bounds.size() * config.specular_scale,
        }
    }

    /// Lifts the button.
    ///
    /// No-op while already lifted. While a settle animation is still in
    /// flight, the lift supersedes it and the pending settle completion is
    /// forgotten.
    pub fn enter_movement(&mut self) -> Transition {
        match self.phase {
            Phase::Lifted => {
                trace!("enter_movement ignored: already lifted");
                return Transition::idle(self.state());
            }
            Phase::Settling(id) => debug!(settle = id.0, "lift supersedes settle"),
            Phase::Resting => {}
        }
        self.phase = Phase::Lifted;
        debug!("button lifted");

        let config = self.config();
        let rise = AnimatedProperties::default()
            .shadow_offset(Vec2::new(0.0, self.bounds.height() / config.shadow_factor()))
            .shadow_opacity(config.lifted_shadow_opacity);
        let duration = config.animation_duration;

        let mut commands = Vec::with_capacity(2);
        commands.push(AnimationCommand::Cancel(AnimationTarget::Button));
        commands.push(self.ease_out(AnimationTarget::Button, rise, duration));
        self.transition(commands)
    }

    /// Tilts the button and drifts its layers toward `pointer`.
    ///
    /// No-op unless lifted; moves that arrive after
    /// [`exit_movement`](Self::exit_movement) started a settle are ignored too.
    pub fn process_movement(&mut self, pointer: Point) -> Transition {
        if self.phase != Phase::Lifted {
            trace!(x = pointer.x, y = pointer.y, "process_movement ignored: not lifted");
            return Transition::idle(self.state());
        }

        let pose = self.engine.pose(self.bounds, pointer);
        let config = self.engine.config();
        let duration = config.animation_duration;
        let layer_duration = config.layer_track_duration;
        let center = self.bounds.center();

        let mut commands = Vec::with_capacity(1 + pose.layer_offsets.len());
        commands.push(self.ease_out(
            AnimationTarget::Button,
            AnimatedProperties::default().transform(pose.transform),
            duration,
        ));
        commands.push(self.ease_out(
            AnimationTarget::Specular,
            AnimatedProperties::default()
                .opacity(pose.specular_opacity)
                .position(pose.specular_position),
            duration,
        ));
        for (i, offset) in pose.layer_offsets.iter().enumerate().skip(1) {
            commands.push(self.ease_out(
                AnimationTarget::Layer(i),
                AnimatedProperties::default().position(center + *offset),
                layer_duration,
            ));
        }
        self.transition(commands)
    }

    /// Settles the button back to rest.
    ///
    /// `other_gesture_active` reports whether another gesture source is still
    /// mid-gesture; if so the button stays lifted. No-op while resting or
    /// already settling.
    ///
    /// The state only returns to [`HighlightState::Resting`] when the settle
    /// request is reported through
    /// [`animation_completed`](Self::animation_completed).
    pub fn exit_movement(&mut self, other_gesture_active: bool) -> Transition {
        match self.phase {
            Phase::Resting => {
                trace!("exit_movement ignored: resting");
                return Transition::idle(self.state());
            }
            Phase::Settling(_) => {
                trace!("exit_movement ignored: already settling");
                return Transition::idle(self.state());
            }
            Phase::Lifted if other_gesture_active => {
                trace!("exit_movement deferred: another gesture is active");
                return Transition::idle(self.state());
            }
            Phase::Lifted => {}
        }

        let resting = self.resting_appearance();
        let duration = self.config().animation_duration;
        let layer_count = self.config().layer_count;
        let center = self.bounds.center();
        let size = self.bounds.size();

        let mut commands = Vec::with_capacity(3 + layer_count);
        commands.push(AnimationCommand::Cancel(AnimationTarget::Specular));
        let settle = self.request(
            AnimationTarget::Button,
            AnimatedProperties::default()
                .transform(resting.transform)
                .shadow_offset(resting.shadow_offset)
                .shadow_opacity(resting.shadow_opacity),
            duration,
            Timing::EaseOut,
            true,
        );
        let settle_id = settle.id;
        commands.push(AnimationCommand::Animate(settle));
        commands.push(self.ease_out(
            AnimationTarget::Specular,
            AnimatedProperties::default().opacity(resting.specular_opacity),
            duration,
        ));
        for i in 0..layer_count {
            commands.push(self.ease_out(
                AnimationTarget::Layer(i),
                AnimatedProperties::default().position(center).size(size),
                duration,
            ));
        }

        self.phase = Phase::Settling(settle_id);
        debug!(settle = settle_id.0, "button settling");
        self.transition(commands)
    }

    /// Plays the press-and-release feedback for a tap.
    ///
    /// Only the press is emitted here; the release follows once the press is
    /// reported through [`animation_completed`](Self::animation_completed).
    /// Ignored unless resting, since the lift and settle animations own the
    /// button transform.
    pub fn tap(&mut self) -> Transition {
        if self.phase != Phase::Resting {
            trace!(settling = self.is_settling(), "tap ignored: not resting");
            return Transition::idle(self.state());
        }
        let press = self.request(
            AnimationTarget::Button,
            AnimatedProperties::default().transform(lift_scale(TAP_PRESS_SCALE)),
            TAP_PRESS_DURATION,
            TAP_SPRING,
            true,
        );
        self.pending_tap = Some(press.id);
        self.transition(alloc::vec![AnimationCommand::Animate(press)])
    }

    /// Handles the host reporting that request `id` finished.
    ///
    /// Completion of the pending settle returns the button to rest; completion
    /// of a tap press emits the release. Anything else, including completions
    /// for superseded requests, is ignored.
    pub fn animation_completed(&mut self, id: RequestId) -> Transition {
        if self.phase == Phase::Settling(id) {
            self.phase = Phase::Resting;
            debug!(settle = id.0, "button at rest");
            return Transition::idle(self.state());
        }
        if self.pending_tap == Some(id) {
            self.pending_tap = None;
            if self.phase != Phase::Resting {
                trace!(id = id.0, "tap release skipped: lifted");
                return Transition::idle(self.state());
            }
            let release = self.request(
                AnimationTarget::Button,
                AnimatedProperties::default().transform(lift_scale(1.0)),
                TAP_RELEASE_DURATION,
                TAP_SPRING,
                false,
            );
            return self.transition(alloc::vec![AnimationCommand::Animate(release)]);
        }
        trace!(id = id.0, "stale animation completion");
        Transition::idle(self.state())
    }

    fn transition(&self, commands: Vec<AnimationCommand>) -> Transition {
        Transition {
            state: self.state(),
            commands,
        }
    }

    fn ease_out(
        &mut self,
        target: AnimationTarget,
        properties: AnimatedProperties,
        duration: f64,
    ) -> AnimationCommand {
        AnimationCommand::Animate(self.request(
            target,
            properties,
            duration,
            Timing::EaseOut,
            false,
        ))
    }

    fn request(
        &mut self,
        target: AnimationTarget,
        properties: AnimatedProperties,
        duration: f64,
        timing: Timing,
        notify_completion: bool,
    ) -> AnimationRequest {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        AnimationRequest {
            id,
            target,
            properties,
            duration,
            timing,
            notify_completion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(layers: usize) -> HighlightController {
        let bounds = ButtonBounds::from_dimensions(120.0, 60.0).unwrap();
        HighlightController::new(ParallaxConfig::default().with_layer_count(layers), bounds)
    }

    fn settle_id(transition: &Transition) -> RequestId {
        transition
            .requests()
            .find(|r| r.notify_completion)
            .map(|r| r.id)
            .unwrap()
    }

    #[test]
    fn starts_resting() {
        let c = controller(2);
        assert_eq!(c.state(), HighlightState::Resting);
        assert!(!c.is_settling());
    }

    #[test]
    fn enter_is_idempotent() {
        let mut c = controller(2);
        let first = c.enter_movement();
        assert_eq!(first.requests().count(), 1);
        assert_eq!(
            first.commands[0],
            AnimationCommand::Cancel(AnimationTarget::Button)
        );

        let second = c.enter_movement();
        assert!(second.is_empty());
        assert_eq!(second.state, HighlightState::Lifted);
    }

    #[test]
    fn rise_grows_shadow_with_height() {
        let mut c = controller(2);
        let rise = c.enter_movement();
        let request = rise.request_for(AnimationTarget::Button).unwrap();
        assert_eq!(
            request.properties.shadow_offset,
            Some(Vec2::new(0.0, 60.0 / 12.0))
        );
        assert_eq!(request.properties.shadow_opacity, Some(0.6));
        assert_eq!(request.duration, 0.4);
        assert_eq!(request.timing, Timing::EaseOut);
        assert!(!request.notify_completion);
    }

    #[test]
    fn move_before_lift_is_ignored() {
        let mut c = controller(3);
        let t = c.process_movement(Point::new(10.0, 10.0));
        assert!(t.is_empty());
        assert_eq!(t.state, HighlightState::Resting);
    }

    #[test]
    fn move_while_lifted_tracks_button_specular_and_layers() {
        let mut c = controller(3);
        c.enter_movement();
        let pointer = Point::new(30.0, 15.0);
        let t = c.process_movement(pointer);

        let button = t.request_for(AnimationTarget::Button).unwrap();
        assert!(button.properties.transform.is_some());
        assert_eq!(button.duration, 0.4);

        let specular = t.request_for(AnimationTarget::Specular).unwrap();
        assert_eq!(specular.properties.position, Some(pointer));
        assert_eq!(specular.properties.opacity, Some(0.2));

        assert!(t.request_for(AnimationTarget::Layer(0)).is_none());
        for i in 1..3 {
            let layer = t.request_for(AnimationTarget::Layer(i)).unwrap();
            assert_eq!(layer.duration, 0.16);
            assert!(layer.properties.position.is_some());
        }
    }

    #[test]
    fn exit_while_resting_is_ignored() {
        let mut c = controller(2);
        assert!(c.exit_movement(false).is_empty());
    }

    #[test]
    fn exit_waits_for_other_gestures() {
        let mut c = controller(2);
        c.enter_movement();
        let t = c.exit_movement(true);
        assert!(t.is_empty());
        assert_eq!(t.state, HighlightState::Lifted);
        assert!(!c.is_settling());
    }

    #[test]
    fn exit_defers_rest_until_settle_completes() {
        let mut c = controller(2);
        c.enter_movement();
        let settle = c.exit_movement(false);
        assert_eq!(settle.state, HighlightState::Lifted);
        assert!(c.is_settling());
        assert_eq!(
            settle.commands[0],
            AnimationCommand::Cancel(AnimationTarget::Specular)
        );

        let id = settle_id(&settle);
        let done = c.animation_completed(id);
        assert_eq!(done.state, HighlightState::Resting);
        assert!(done.is_empty());
    }

    #[test]
    fn settle_targets_resting_appearance() {
        let mut c = controller(2);
        c.enter_movement();
        c.process_movement(Point::new(100.0, 5.0));
        let settle = c.exit_movement(false);
        let resting = c.resting_appearance();

        let button = settle.request_for(AnimationTarget::Button).unwrap();
        assert_eq!(button.properties.transform, Some(DMat4::IDENTITY));
        assert_eq!(button.properties.shadow_offset, Some(Vec2::new(0.0, 4.0)));
        assert_eq!(button.properties.transform, Some(resting.transform));
        assert_eq!(button.properties.shadow_offset, Some(resting.shadow_offset));

        let specular = settle.request_for(AnimationTarget::Specular).unwrap();
        assert_eq!(specular.properties.opacity, Some(0.0));

        for i in 0..2 {
            let layer = settle.request_for(AnimationTarget::Layer(i)).unwrap();
            assert_eq!(layer.properties.position, Some(Point::new(60.0, 30.0)));
        }
    }

    #[test]
    fn second_exit_while_settling_is_ignored() {
        let mut c = controller(2);
        c.enter_movement();
        c.exit_movement(false);
        assert!(c.exit_movement(false).is_empty());
    }

    #[test]
    fn stray_move_during_settle_is_ignored() {
        let mut c = controller(2);
        c.enter_movement();
        c.exit_movement(false);
        assert!(c.process_movement(Point::new(5.0, 5.0)).is_empty());
    }

    #[test]
    fn lift_during_settle_supersedes_it() {
        let mut c = controller(2);
        c.enter_movement();
        let settle = c.exit_movement(false);
        let stale = settle_id(&settle);

        let rise = c.enter_movement();
        assert_eq!(rise.requests().count(), 1);
        assert!(!c.is_settling());

        // The superseded settle must not drop the new lift.
        let t = c.animation_completed(stale);
        assert_eq!(t.state, HighlightState::Lifted);
        assert!(!c.process_movement(Point::new(1.0, 1.0)).is_empty());
    }

    #[test]
    fn unknown_completion_is_ignored() {
        let mut c = controller(1);
        let t = c.animation_completed(RequestId(999));
        assert!(t.is_empty());
        assert_eq!(t.state, HighlightState::Resting);
    }

    #[test]
    fn request_ids_increase() {
        let mut c = controller(3);
        c.enter_movement();
        let t = c.process_movement(Point::new(2.0, 3.0));
        let ids: Vec<_> = t.requests().map(|r| r.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn tap_presses_then_releases() {
        let mut c = controller(2);
        let press = c.tap();
        let request = press.request_for(AnimationTarget::Button).unwrap();
        assert_eq!(request.properties.transform, Some(lift_scale(0.93)));
        assert_eq!(request.duration, 0.3);
        assert!(request.notify_completion);

        let release = c.animation_completed(request.id);
        let request = release.request_for(AnimationTarget::Button).unwrap();
        assert_eq!(request.properties.transform, Some(DMat4::IDENTITY));
        assert_eq!(request.duration, 0.4);
        assert!(matches!(request.timing, Timing::Spring { .. }));
    }

    #[test]
    fn tap_while_lifted_is_ignored() {
        let mut c = controller(2);
        c.enter_movement();
        assert!(c.tap().is_empty());
    }

    #[test]
    fn tap_while_settling_is_ignored() {
        let mut c = controller(2);
        c.enter_movement();
        c.exit_movement(false);
        assert!(c.is_settling());
        let t = c.tap();
        assert!(t.is_empty());
        assert_eq!(t.state, HighlightState::Lifted);
    }

    #[test]
    fn tap_release_is_skipped_if_lifted_meanwhile() {
        let mut c = controller(2);
        let press = c.tap();
        let id = press.request_for(AnimationTarget::Button).unwrap().id;
        c.enter_movement();
        assert!(c.animation_completed(id).is_empty());
    }

    #[test]
    fn intensity_changes_apply_to_next_move() {
        let mut c = controller(2);
        c.enter_movement();
        let pointer = Point::new(120.0, 60.0);
        let center = c.bounds().center();

        let before = c.process_movement(pointer);
        c.set_parallax_intensity(0.0);
        let after = c.process_movement(pointer);

        let moved = before.request_for(AnimationTarget::Layer(1)).unwrap();
        assert_ne!(moved.properties.position, Some(center));
        let still = after.request_for(AnimationTarget::Layer(1)).unwrap();
        assert_eq!(still.properties.position, Some(center));
    }

    #[test]
    fn resting_appearance_uses_shadow_factor() {
        let c = controller(1);
        let resting = c.resting_appearance();
        assert_eq!(resting.transform, DMat4::IDENTITY);
        assert_eq!(resting.shadow_offset, Vec2::new(0.0, 4.0));
        assert_eq!(resting.shadow_radius, 60.0 / 24.0);
        assert_eq!(resting.shadow_opacity, 0.5);
        assert_eq!(resting.specular_opacity, 0.0);
    }

    #[test]
    fn resting_appearance_scales_specular_with_bounds() {
        let mut c = controller(1);
        assert_eq!(c.resting_appearance().specular_size, Size::new(240.0, 120.0));

        c.set_bounds(ButtonBounds::from_dimensions(50.0, 40.0).unwrap());
        assert_eq!(c.resting_appearance().specular_size, Size::new(100.0, 80.0));

        let mut config = ParallaxConfig::default();
        config.specular_scale = 1.5;
        let c = HighlightController::new(config, c.bounds());
        assert_eq!(c.resting_appearance().specular_size, Size::new(75.0, 60.0));
    }
}
