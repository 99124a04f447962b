// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for input routing: raw touches, gestures, and routing results.
//!
//! ## Overview
//!
//! These types describe what goes into the [`dispatcher`](crate::dispatcher) and what comes
//! out of it. Hosts translate their native pointer events into [`TouchEvent`]s and act on the
//! returned [`Dispatched`].

use core::time::Duration;

use kurbo::Point;

/// Phase of a raw touch event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TouchPhase {
    /// The pointer went down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer was lifted.
    Up,
    /// The host aborted the gesture.
    Cancel,
}

/// A raw touch event in overlay coordinates.
///
/// `time` is measured from any fixed origin the host likes, as long as it is monotonic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Event phase.
    pub phase: TouchPhase,
    /// Pointer position.
    pub position: Point,
    /// Timestamp.
    pub time: Duration,
}

impl TouchEvent {
    /// Create an event.
    pub fn new(phase: TouchPhase, position: Point, time: Duration) -> Self {
        Self {
            phase,
            position,
            time,
        }
    }
}

/// A gesture recognized by the [`GestureDetector`](crate::gesture::GestureDetector).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Gesture {
    /// A new gesture started.
    Down,
    /// The pointer was lifted without moving past the slop and before the long-press timeout.
    SingleTapUp,
    /// The pointer stayed within the slop for the long-press timeout.
    LongPress,
    /// The pointer moved beyond the slop.
    Scroll,
}

/// What the host should do with a touch event after routing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Response {
    /// A listener or policy swallowed the event; deliver it nowhere else.
    Consumed,
    /// Deliver the event to the element under the hole.
    PassThrough,
    /// Not handled here; apply the overlay's own default handling.
    Unhandled,
}

/// A side effect the owner of the overlay must carry out.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    /// Tear the walkthrough step down (the default cancel action).
    Cleanup,
}

/// Result of routing one event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatched {
    /// Delivery decision.
    pub response: Response,
    /// Follow-up requested from the owner, if any.
    pub effect: Option<Effect>,
}

impl Dispatched {
    /// A result with no effect.
    pub const fn respond(response: Response) -> Self {
        Self {
            response,
            effect: None,
        }
    }

    /// Whether the event was swallowed.
    pub fn is_consumed(&self) -> bool {
        self.response == Response::Consumed
    }
}
