// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction dispatcher.
//!
//! ## Overview
//!
//! Routes touches on a spotlight overlay to "on target", "outside target", and "cancel"
//! handlers by hit-testing against a [`HoleOverlay`].
//!
//! ## Activation
//!
//! The dispatcher only takes over when the overlay declares something to do:
//! a target listener, an outside-click listener, or one of the blocking flags in
//! [`InteractionPolicy`]. Otherwise listeners are never called and events are routed by
//! the hole alone, so the toolkit's default click handling stays in place.
//!
//! ## Routing (active)
//!
//! - Inside the target, a raw touch listener sees the event first and may consume it.
//! - A tap inside calls the target-click listener.
//! - A tap outside calls the outside-click listener; without one, and with
//!   click-outside-to-cancel set, the cancel listener runs, or an [`Effect::Cleanup`] is
//!   returned when there is no cancel listener.
//! - A long press inside calls the long-click listener.
//!
//! Events no listener consumed fall back to the hole: blocked when target interaction is
//! disabled or the motion type forbids the gesture, passed through otherwise, and blocked
//! outside the hole only when click-through is disabled.

use alloc::boxed::Box;
use core::time::Duration;

use kurbo::Point;
use understory_placement::hole::{HoleOverlay, MotionType};

use crate::gesture::{GestureConfig, GestureDetector};
use crate::types::{Dispatched, Effect, Gesture, Response, TouchEvent};

/// Listener invoked for clicks, long clicks, and cancellation.
pub type ClickListener = Box<dyn FnMut()>;

/// Raw touch listener; returns `true` to consume the event.
pub type TouchListener = Box<dyn FnMut(&TouchEvent) -> bool>;

/// Optional callbacks an overlay can register.
#[derive(Default)]
pub struct OverlayListeners {
    /// Tap on the target.
    pub on_click_target: Option<ClickListener>,
    /// Long press on the target.
    pub on_long_click_target: Option<ClickListener>,
    /// Any raw touch on the target, offered before gesture classification.
    pub on_touch_target: Option<TouchListener>,
    /// Tap outside the target.
    pub on_click_outside: Option<ClickListener>,
    /// Tap outside the target when click-outside-to-cancel is set.
    pub on_cancel_outside: Option<ClickListener>,
}

impl core::fmt::Debug for OverlayListeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayListeners")
            .field("on_click_target", &self.on_click_target.is_some())
            .field("on_long_click_target", &self.on_long_click_target.is_some())
            .field("on_touch_target", &self.on_touch_target.is_some())
            .field("on_click_outside", &self.on_click_outside.is_some())
            .field("on_cancel_outside", &self.on_cancel_outside.is_some())
            .finish()
    }
}

impl OverlayListeners {
    /// Whether any listener bound to the target itself is present.
    pub fn has_target_listeners(&self) -> bool {
        self.on_click_target.is_some()
            || self.on_long_click_target.is_some()
            || self.on_touch_target.is_some()
    }
}

/// Flags that shape routing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionPolicy {
    /// Which gestures may pass through the hole.
    pub motion: MotionType,
    /// Swallow events outside the hole instead of letting the overlay handle them.
    pub disable_click_through: bool,
    /// Swallow events on the target instead of passing them through.
    pub disable_interact_with_target: bool,
    /// Treat a tap outside the target as a cancel.
    pub click_outside_to_cancel: bool,
}

/// Routes touches on an overlay to listeners.
///
/// Listeners are passed per call so their owner can keep them across repeated showings.
#[derive(Clone, Debug, Default)]
pub struct InteractionDispatcher {
    policy: InteractionPolicy,
    detector: GestureDetector,
}

impl InteractionDispatcher {
    /// Create a dispatcher.
    pub fn new(policy: InteractionPolicy, config: GestureConfig) -> Self {
        Self {
            policy,
            detector: GestureDetector::new(config),
        }
    }

    /// Routing flags.
    pub fn policy(&self) -> &InteractionPolicy {
        &self.policy
    }

    /// Whether routing takes over for `listeners`.
    pub fn is_active(&self, listeners: &OverlayListeners) -> bool {
        listeners.has_target_listeners()
            || listeners.on_click_outside.is_some()
            || self.policy.disable_click_through
            || self.policy.disable_interact_with_target
    }

    /// Route one touch event.
    pub fn handle(
        &mut self,
        hole: &HoleOverlay,
        listeners: &mut OverlayListeners,
        event: &TouchEvent,
    ) -> Dispatched {
        let pos = event.position;
        if !self.is_active(listeners) {
            let _ = self.detector.on_event(event);
            return Dispatched::respond(self.fallback(hole, pos));
        }

        let inside = hole.is_within_target(pos);
        if inside
            && let Some(on_touch) = listeners.on_touch_target.as_mut()
            && on_touch(event)
        {
            return Dispatched::respond(Response::Consumed);
        }

        let gesture = self.detector.on_event(event);
        let (consumed, effect) = match gesture {
            Some(g) => self.on_gesture(g, inside, listeners),
            None => (false, None),
        };
        let response = if consumed {
            Response::Consumed
        } else {
            self.fallback(hole, pos)
        };
        Dispatched { response, effect }
    }

    /// Fire a long press that timed out by `now` while the pointer was held still.
    ///
    /// The returned response is `Consumed` when a listener ran, `Unhandled` otherwise.
    pub fn poll(
        &mut self,
        hole: &HoleOverlay,
        listeners: &mut OverlayListeners,
        now: Duration,
    ) -> Dispatched {
        let Some(down) = self.detector.down_position() else {
            return Dispatched::respond(Response::Unhandled);
        };
        let Some(gesture) = self.detector.poll(now) else {
            return Dispatched::respond(Response::Unhandled);
        };
        if !self.is_active(listeners) {
            return Dispatched::respond(Response::Unhandled);
        }
        let (consumed, effect) = self.on_gesture(gesture, hole.is_within_target(down), listeners);
        let response = if consumed {
            Response::Consumed
        } else {
            Response::Unhandled
        };
        Dispatched { response, effect }
    }

    fn on_gesture(
        &self,
        gesture: Gesture,
        inside: bool,
        listeners: &mut OverlayListeners,
    ) -> (bool, Option<Effect>) {
        match gesture {
            Gesture::SingleTapUp => {
                if inside {
                    if let Some(on_click) = listeners.on_click_target.as_mut() {
                        on_click();
                        return (true, None);
                    }
                    return (false, None);
                }
                if let Some(on_outside) = listeners.on_click_outside.as_mut() {
                    on_outside();
                    return (true, None);
                }
                if self.policy.click_outside_to_cancel {
                    return match listeners.on_cancel_outside.as_mut() {
                        Some(on_cancel) => {
                            on_cancel();
                            (false, None)
                        }
                        None => (false, Some(Effect::Cleanup)),
                    };
                }
                (false, None)
            }
            Gesture::LongPress => match listeners.on_long_click_target.as_mut() {
                Some(on_long) if inside => {
                    on_long();
                    (true, None)
                }
                _ => (false, None),
            },
            Gesture::Down | Gesture::Scroll => (false, None),
        }
    }

    fn fallback(&self, hole: &HoleOverlay, pos: Point) -> Response {
        if self.policy.disable_interact_with_target && hole.is_within_target(pos) {
            return Response::Consumed;
        }
        if hole.hole().is_some_and(|h| h.contains(pos)) {
            return if self.policy.motion.permits(self.detector.motion_kind()) {
                Response::PassThrough
            } else {
                Response::Consumed
            };
        }
        if self.policy.disable_click_through {
            Response::Consumed
        } else {
            Response::Unhandled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TouchPhase;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::Rect;
    use understory_placement::hole::{HoleConfig, HoleStyle};

    const INSIDE: Point = Point::new(125.0, 125.0);
    const OUTSIDE: Point = Point::new(800.0, 1500.0);

    fn overlay() -> HoleOverlay {
        HoleOverlay::new(
            Rect::new(0.0, 0.0, 1000.0, 2000.0),
            Some(Rect::new(100.0, 100.0, 150.0, 150.0)),
            &HoleConfig {
                style: HoleStyle::Rectangle,
                ..Default::default()
            },
        )
    }

    fn counter() -> (Rc<Cell<u32>>, ClickListener) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, Box::new(move || c.set(c.get() + 1)))
    }

    fn tap(
        d: &mut InteractionDispatcher,
        hole: &HoleOverlay,
        l: &mut OverlayListeners,
        at: Point,
    ) -> Dispatched {
        let down = TouchEvent::new(TouchPhase::Down, at, Duration::ZERO);
        let _ = d.handle(hole, l, &down);
        let up = TouchEvent::new(TouchPhase::Up, at, Duration::from_millis(50));
        d.handle(hole, l, &up)
    }

    #[test]
    fn inactive_without_listeners_or_flags() {
        let hole = overlay();
        let mut listeners = OverlayListeners::default();
        let (cancels, on_cancel) = counter();
        listeners.on_cancel_outside = Some(on_cancel);
        let mut d = InteractionDispatcher::new(
            InteractionPolicy {
                click_outside_to_cancel: true,
                ..Default::default()
            },
            GestureConfig::default(),
        );
        assert!(!d.is_active(&listeners));
        let out = tap(&mut d, &hole, &mut listeners, OUTSIDE);
        assert_eq!(out, Dispatched::respond(Response::Unhandled));
        assert_eq!(cancels.get(), 0);
        let out = tap(&mut d, &hole, &mut listeners, INSIDE);
        assert_eq!(out.response, Response::PassThrough);
    }

    #[test]
    fn tap_on_target_calls_click_listener() {
        let hole = overlay();
        let (clicks, on_click) = counter();
        let mut listeners = OverlayListeners {
            on_click_target: Some(on_click),
            ..Default::default()
        };
        let mut d = InteractionDispatcher::default();
        let out = tap(&mut d, &hole, &mut listeners, INSIDE);
        assert!(out.is_consumed());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn tap_inside_with_only_outside_listener_passes_through() {
        let hole = overlay();
        let (outside, on_outside) = counter();
        let mut listeners = OverlayListeners {
            on_click_outside: Some(on_outside),
            ..Default::default()
        };
        let mut d = InteractionDispatcher::default();
        let out = tap(&mut d, &hole, &mut listeners, INSIDE);
        assert_eq!(out, Dispatched::respond(Response::PassThrough));
        assert_eq!(outside.get(), 0);

        let out = tap(&mut d, &hole, &mut listeners, OUTSIDE);
        assert!(out.is_consumed());
        assert_eq!(outside.get(), 1);
    }

    #[test]
    fn outside_tap_cancels_with_listener_or_cleanup() {
        let hole = overlay();
        let policy = InteractionPolicy {
            click_outside_to_cancel: true,
            disable_click_through: true,
            ..Default::default()
        };

        let mut bare = OverlayListeners::default();
        let mut d = InteractionDispatcher::new(policy, GestureConfig::default());
        let out = tap(&mut d, &hole, &mut bare, OUTSIDE);
        assert_eq!(out.effect, Some(Effect::Cleanup));
        assert_eq!(out.response, Response::Consumed);

        let (cancels, on_cancel) = counter();
        let mut with_cancel = OverlayListeners {
            on_cancel_outside: Some(on_cancel),
            ..Default::default()
        };
        let out = tap(&mut d, &hole, &mut with_cancel, OUTSIDE);
        assert_eq!(out.effect, None);
        assert_eq!(cancels.get(), 1);
    }

    #[test]
    fn touch_listener_consumes_before_classification() {
        let hole = overlay();
        let (clicks, on_click) = counter();
        let seen = Rc::new(Cell::new(0_u32));
        let s = seen.clone();
        let mut listeners = OverlayListeners {
            on_click_target: Some(on_click),
            on_touch_target: Some(Box::new(move |_| {
                s.set(s.get() + 1);
                true
            })),
            ..Default::default()
        };
        let mut d = InteractionDispatcher::default();
        let out = tap(&mut d, &hole, &mut listeners, INSIDE);
        assert!(out.is_consumed());
        assert_eq!(seen.get(), 2);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn declined_touch_falls_through_to_click() {
        let hole = overlay();
        let (clicks, on_click) = counter();
        let mut listeners = OverlayListeners {
            on_click_target: Some(on_click),
            on_touch_target: Some(Box::new(|_| false)),
            ..Default::default()
        };
        let mut d = InteractionDispatcher::default();
        let _ = tap(&mut d, &hole, &mut listeners, INSIDE);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn long_press_inside_via_poll() {
        let hole = overlay();
        let (longs, on_long) = counter();
        let mut listeners = OverlayListeners {
            on_long_click_target: Some(on_long),
            ..Default::default()
        };
        let mut d = InteractionDispatcher::default();
        let down = TouchEvent::new(TouchPhase::Down, INSIDE, Duration::ZERO);
        let _ = d.handle(&hole, &mut listeners, &down);
        let out = d.poll(&hole, &mut listeners, Duration::from_millis(600));
        assert!(out.is_consumed());
        assert_eq!(longs.get(), 1);
        let up = TouchEvent::new(TouchPhase::Up, INSIDE, Duration::from_millis(700));
        let _ = d.handle(&hole, &mut listeners, &up);
        assert_eq!(longs.get(), 1);
    }

    #[test]
    fn long_press_outside_is_ignored() {
        let hole = overlay();
        let (longs, on_long) = counter();
        let mut listeners = OverlayListeners {
            on_long_click_target: Some(on_long),
            ..Default::default()
        };
        let mut d = InteractionDispatcher::default();
        let down = TouchEvent::new(TouchPhase::Down, OUTSIDE, Duration::ZERO);
        let _ = d.handle(&hole, &mut listeners, &down);
        let out = d.poll(&hole, &mut listeners, Duration::from_secs(1));
        assert_eq!(out.response, Response::Unhandled);
        assert_eq!(longs.get(), 0);
    }

    #[test]
    fn blocking_flags() {
        let hole = overlay();
        let mut listeners = OverlayListeners::default();
        let mut d = InteractionDispatcher::new(
            InteractionPolicy {
                disable_interact_with_target: true,
                ..Default::default()
            },
            GestureConfig::default(),
        );
        assert!(d.is_active(&listeners));
        assert!(tap(&mut d, &hole, &mut listeners, INSIDE).is_consumed());
        assert_eq!(
            tap(&mut d, &hole, &mut listeners, OUTSIDE).response,
            Response::Unhandled
        );
    }

    #[test]
    fn click_only_blocks_swipes_through_the_hole() {
        let hole = overlay();
        let mut listeners = OverlayListeners::default();
        let mut d = InteractionDispatcher::new(
            InteractionPolicy {
                motion: MotionType::ClickOnly,
                ..Default::default()
            },
            GestureConfig::default(),
        );
        let down = TouchEvent::new(TouchPhase::Down, INSIDE, Duration::ZERO);
        assert_eq!(
            d.handle(&hole, &mut listeners, &down).response,
            Response::PassThrough
        );
        let moved = TouchEvent::new(
            TouchPhase::Move,
            Point::new(140.0, 125.0),
            Duration::from_millis(10),
        );
        assert_eq!(
            d.handle(&hole, &mut listeners, &moved).response,
            Response::Consumed
        );
    }
}
