// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: a deterministic, `no_std` input router for spotlight overlays.
//!
//! ## Overview
//!
//! A walkthrough overlay dims the screen and cuts a hole around a target. Touches on that
//! overlay either belong to the target, to the overlay, or to the element underneath. This
//! crate decides which, and calls the listeners the overlay registered.
//!
//! - [`gesture`]: a [`GestureDetector`](crate::gesture::GestureDetector) turning raw
//!   [`TouchEvent`](crate::types::TouchEvent)s into taps, long presses, and scrolls.
//! - [`dispatcher`]: an [`InteractionDispatcher`](crate::dispatcher::InteractionDispatcher)
//!   that hit-tests against an
//!   [`HoleOverlay`](understory_placement::hole::HoleOverlay) and routes each gesture.
//!
//! It does not perform rendering and does not own the overlay; the caller passes the
//! current hole geometry and listeners with every event.
//!
//! ## Workflow
//!
//! 1) Build a [`HoleOverlay`](understory_placement::hole::HoleOverlay) for the current target.
//! 2) Feed each native pointer event as a [`TouchEvent`](crate::types::TouchEvent) to
//!    [`InteractionDispatcher::handle`](crate::dispatcher::InteractionDispatcher::handle).
//! 3) Act on the [`Response`](crate::types::Response) and carry out any
//!    [`Effect`](crate::types::Effect).
//! 4) Call [`InteractionDispatcher::poll`](crate::dispatcher::InteractionDispatcher::poll) from
//!    the frame loop so long presses fire while the pointer is held.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_gesture::dispatcher::{InteractionDispatcher, OverlayListeners};
//! use understory_gesture::types::{Response, TouchEvent, TouchPhase};
//! use understory_placement::hole::{HoleConfig, HoleOverlay};
//!
//! let hole = HoleOverlay::new(
//!     Rect::new(0.0, 0.0, 400.0, 800.0),
//!     Some(Rect::new(10.0, 10.0, 60.0, 60.0)),
//!     &HoleConfig::default(),
//! );
//! let mut listeners = OverlayListeners {
//!     on_click_outside: Some(Box::new(|| {})),
//!     ..Default::default()
//! };
//! let mut dispatcher = InteractionDispatcher::default();
//! let at = Point::new(300.0, 700.0);
//! let down = TouchEvent::new(TouchPhase::Down, at, Duration::ZERO);
//! let _ = dispatcher.handle(&hole, &mut listeners, &down);
//! let up = TouchEvent::new(TouchPhase::Up, at, Duration::from_millis(40));
//! assert_eq!(dispatcher.handle(&hole, &mut listeners, &up).response, Response::Consumed);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod gesture;
pub mod types;
