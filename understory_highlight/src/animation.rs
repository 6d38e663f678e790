// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation commands handed to the host's tweening engine.
//!
//! The controller never interpolates anything itself. It describes target
//! values, durations and curves; the host applies them and, when asked to,
//! reports completion back with
//! [`HighlightController::animation_completed`](crate::HighlightController::animation_completed).

use alloc::vec::Vec;

use glam::DMat4;
use kurbo::{Point, Size, Vec2};

use crate::controller::HighlightState;

/// Identifies one [`AnimationRequest`].
///
/// Ids are unique per controller and increase monotonically, so a completion
/// for an older request can never be mistaken for a newer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// The visual element an animation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// The button as a whole: transform and shadow.
    Button,
    /// The specular highlight overlay.
    Specular,
    /// One image layer, by index; `0` is the base layer.
    Layer(usize),
}

/// Target values for one animation. Unset properties are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatedProperties {
    /// 3D transform of the target.
    pub transform: Option<DMat4>,
    /// Shadow offset of the target.
    pub shadow_offset: Option<Vec2>,
    /// Shadow opacity of the target.
    pub shadow_opacity: Option<f64>,
    /// Opacity of the target.
    pub opacity: Option<f64>,
    /// Center position of the target, in button-local coordinates.
    pub position: Option<Point>,
    /// Size of the target.
    pub size: Option<Size>,
}

impl AnimatedProperties {
    /// Sets the transform.
    #[must_use]
    pub fn transform(mut self, transform: DMat4) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Sets the shadow offset.
    #[must_use]
    pub fn shadow_offset(mut self, offset: Vec2) -> Self {
        self.shadow_offset = Some(offset);
        self
    }

    /// Sets the shadow opacity.
    #[must_use]
    pub fn shadow_opacity(mut self, opacity: f64) -> Self {
        self.shadow_opacity = Some(opacity);
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets the center position.
    #[must_use]
    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the size.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// Interpolation curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Timing {
    /// Decelerating cubic ease-out.
    #[default]
    EaseOut,
    /// Damped spring with an ease-out start.
    Spring {
        /// Damping ratio, `1.0` is critically damped.
        damping: f64,
        /// Initial velocity relative to the total distance per second.
        initial_velocity: f64,
    },
}

/// A request to tween `target` to `properties` over `duration` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    /// Id to report back on completion.
    pub id: RequestId,
    /// What is animated.
    pub target: AnimationTarget,
    /// Where it ends up.
    pub properties: AnimatedProperties,
    /// Duration in seconds.
    pub duration: f64,
    /// Interpolation curve.
    pub timing: Timing,
    /// Whether the controller expects an
    /// [`animation_completed`](crate::HighlightController::animation_completed)
    /// call for this request.
    ///
    /// Requests superseded on the same properties may never complete; the
    /// controller tolerates that.
    pub notify_completion: bool,
}

/// One instruction for the host's animation engine.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationCommand {
    /// Drop in-flight animations on a target, leaving it where it is.
    Cancel(AnimationTarget),
    /// Start an animation. Later requests win over earlier ones on the same
    /// properties.
    Animate(AnimationRequest),
}

impl AnimationCommand {
    /// Returns the request if this is [`AnimationCommand::Animate`].
    #[must_use]
    pub fn as_request(&self) -> Option<&AnimationRequest> {
        match self {
            Self::Animate(request) => Some(request),
            Self::Cancel(_) => None,
        }
    }
}

/// Result of feeding one event to the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub state: HighlightState,
    /// Commands to run, in order.
    pub commands: Vec<AnimationCommand>,
}

impl Transition {
    pub(crate) fn idle(state: HighlightState) -> Self {
        Self {
            state,
            commands: Vec::new(),
        }
    }

    /// Returns `true` if there is nothing for the host to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over the animation requests, skipping cancellations.
    pub fn requests(&self) -> impl Iterator<Item = &AnimationRequest> + '_ {
        self.commands.iter().filter_map(AnimationCommand::as_request)
    }

    /// Returns the first request aimed at `target`.
    #[must_use]
    pub fn request_for(&self, target: AnimationTarget) -> Option<&AnimationRequest> {
        self.requests().find(|r| r.target == target)
    }
}
