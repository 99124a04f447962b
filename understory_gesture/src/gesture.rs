// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture detector: classify raw touches into taps, long presses, and scrolls.
//!
//! ## Usage
//!
//! 1) Feed every [`TouchEvent`] to [`GestureDetector::on_event`].
//! 2) Call [`GestureDetector::poll`] from your frame loop so a long press fires while the
//!    pointer is held still, without waiting for the next event.
//! 3) Read [`GestureDetector::motion_kind`] to learn whether the current gesture is a tap or
//!    a swipe.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_gesture::gesture::{GestureConfig, GestureDetector};
//! use understory_gesture::types::{Gesture, TouchEvent, TouchPhase};
//!
//! let mut d = GestureDetector::new(GestureConfig::default());
//! let at = |ms| Duration::from_millis(ms);
//! let p = Point::new(10.0, 10.0);
//! assert_eq!(d.on_event(&TouchEvent::new(TouchPhase::Down, p, at(0))), Some(Gesture::Down));
//! assert_eq!(d.on_event(&TouchEvent::new(TouchPhase::Up, p, at(80))), Some(Gesture::SingleTapUp));
//! ```

use core::time::Duration;

use kurbo::Point;
use understory_placement::hole::MotionKind;

use crate::types::{Gesture, TouchEvent, TouchPhase};

/// Thresholds used to tell taps from swipes and long presses.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance the pointer may travel and still count as a tap.
    pub touch_slop: f64,
    /// How long the pointer must stay down for a long press.
    pub long_press_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            long_press_timeout: Duration::from_millis(500),
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Tracking {
    down_position: Point,
    down_time: Duration,
    still_tap: bool,
    long_pressed: bool,
}

/// Single-pointer gesture state machine.
///
/// A gesture starts on `Down` and ends on `Up` or `Cancel`. Once a long press fired, the
/// rest of the gesture produces nothing, matching common toolkit behavior.
#[derive(Clone, Debug)]
pub struct GestureDetector {
    config: GestureConfig,
    tracking: Option<Tracking>,
    last_kind: MotionKind,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureDetector {
    /// Create a detector with the given thresholds.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracking: None,
            last_kind: MotionKind::Tap,
        }
    }

    /// Thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Where the current gesture started.
    pub fn down_position(&self) -> Option<Point> {
        self.tracking.map(|t| t.down_position)
    }

    /// Tap or swipe, as of the most recent event.
    pub fn motion_kind(&self) -> MotionKind {
        self.last_kind
    }

    /// Feed one event and return the gesture it completes or starts, if any.
    pub fn on_event(&mut self, event: &TouchEvent) -> Option<Gesture> {
        match event.phase {
            TouchPhase::Down => {
                self.tracking = Some(Tracking {
                    down_position: event.position,
                    down_time: event.time,
                    still_tap: true,
                    long_pressed: false,
                });
                self.last_kind = MotionKind::Tap;
                Some(Gesture::Down)
            }
            TouchPhase::Move => {
                let slop2 = self.config.touch_slop * self.config.touch_slop;
                let timeout = self.config.long_press_timeout;
                let t = self.tracking.as_mut()?;
                if t.long_pressed {
                    return None;
                }
                if !t.still_tap {
                    return Some(Gesture::Scroll);
                }
                if (event.position - t.down_position).hypot2() > slop2 {
                    t.still_tap = false;
                    self.last_kind = MotionKind::Swipe;
                    return Some(Gesture::Scroll);
                }
                if event.time.saturating_sub(t.down_time) >= timeout {
                    t.long_pressed = true;
                    return Some(Gesture::LongPress);
                }
                None
            }
            TouchPhase::Up => {
                let t = self.tracking.take()?;
                if t.long_pressed || !t.still_tap {
                    return None;
                }
                // Nobody polled while the pointer was held; report the press on release.
                if event.time.saturating_sub(t.down_time) >= self.config.long_press_timeout {
                    Some(Gesture::LongPress)
                } else {
                    Some(Gesture::SingleTapUp)
                }
            }
            TouchPhase::Cancel => {
                self.tracking = None;
                None
            }
        }
    }

    /// Fire a pending long press if the timeout elapsed by `now`.
    pub fn poll(&mut self, now: Duration) -> Option<Gesture> {
        let timeout = self.config.long_press_timeout;
        let t = self.tracking.as_mut()?;
        if t.still_tap && !t.long_pressed && now.saturating_sub(t.down_time) >= timeout {
            t.long_pressed = true;
            return Some(Gesture::LongPress);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(phase: TouchPhase, x: f64, ms: u64) -> TouchEvent {
        TouchEvent::new(phase, Point::new(x, 0.0), Duration::from_millis(ms))
    }

    #[test]
    fn quick_release_is_a_tap() {
        let mut d = GestureDetector::default();
        assert_eq!(d.on_event(&ev(TouchPhase::Down, 0.0, 0)), Some(Gesture::Down));
        assert_eq!(d.on_event(&ev(TouchPhase::Move, 3.0, 20)), None);
        assert_eq!(
            d.on_event(&ev(TouchPhase::Up, 3.0, 40)),
            Some(Gesture::SingleTapUp)
        );
        assert!(!d.is_tracking());
        assert_eq!(d.motion_kind(), MotionKind::Tap);
    }

    #[test]
    fn moving_past_slop_is_a_scroll() {
        let mut d = GestureDetector::default();
        let _ = d.on_event(&ev(TouchPhase::Down, 0.0, 0));
        assert_eq!(
            d.on_event(&ev(TouchPhase::Move, 20.0, 10)),
            Some(Gesture::Scroll)
        );
        assert_eq!(
            d.on_event(&ev(TouchPhase::Move, 25.0, 20)),
            Some(Gesture::Scroll)
        );
        assert_eq!(d.motion_kind(), MotionKind::Swipe);
        assert_eq!(d.on_event(&ev(TouchPhase::Up, 25.0, 30)), None);
    }

    #[test]
    fn poll_fires_long_press_once() {
        let mut d = GestureDetector::default();
        let _ = d.on_event(&ev(TouchPhase::Down, 0.0, 0));
        assert_eq!(d.poll(Duration::from_millis(100)), None);
        assert_eq!(d.poll(Duration::from_millis(500)), Some(Gesture::LongPress));
        assert_eq!(d.poll(Duration::from_millis(900)), None);
        // No tap after a long press.
        assert_eq!(d.on_event(&ev(TouchPhase::Up, 0.0, 950)), None);
    }

    #[test]
    fn late_release_reports_long_press() {
        let mut d = GestureDetector::default();
        let _ = d.on_event(&ev(TouchPhase::Down, 0.0, 0));
        assert_eq!(
            d.on_event(&ev(TouchPhase::Up, 1.0, 700)),
            Some(Gesture::LongPress)
        );
    }

    #[test]
    fn cancel_drops_the_gesture() {
        let mut d = GestureDetector::default();
        let _ = d.on_event(&ev(TouchPhase::Down, 0.0, 0));
        assert_eq!(d.on_event(&ev(TouchPhase::Cancel, 0.0, 10)), None);
        assert_eq!(d.down_position(), None);
        assert_eq!(d.on_event(&ev(TouchPhase::Up, 0.0, 20)), None);
        assert_eq!(d.poll(Duration::from_secs(5)), None);
    }

    #[test]
    fn events_without_down_are_ignored() {
        let mut d = GestureDetector::default();
        assert_eq!(d.on_event(&ev(TouchPhase::Move, 50.0, 0)), None);
        assert_eq!(d.on_event(&ev(TouchPhase::Up, 50.0, 10)), None);
    }
}
