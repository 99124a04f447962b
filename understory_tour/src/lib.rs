// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tour: walkthrough steps that spotlight an element and explain it.
//!
//! ## Overview
//!
//! A step dims the window, cuts a hole around a target element, animates a pointer on it,
//! and shows a tooltip card next to it. The target stays usable through the hole, subject to
//! the overlay's input policy.
//!
//! This crate drives such a step against a toolkit through the [`ViewHost`](host::ViewHost)
//! trait. It owns no views: it asks the host to create, attach, move, and detach layers, and
//! computes every position itself with [`understory_placement`].
//!
//! - [`session`]: [`TourGuide`](session::TourGuide), the configured step and its lifecycle.
//! - [`spec`]: tooltip, pointer, and overlay configuration.
//! - [`sync`]: which layout notices the step waits for.
//! - [`compose`]: the layers of a step and the animations on them.
//! - [`animation`]: fade, scale, and translate choreographies.
//! - [`host`]: the toolkit boundary.
//!
//! Input routing lives in [`understory_gesture`]; geometry in [`understory_placement`].
//!
//! ## Driving a step
//!
//! Layout in real toolkits is asynchronous, so the host reports layout notices back to the
//! guide. Everything else is a plain method call.
//!
//! ```
//! use core::time::Duration;
//! use understory_placement::PixelRect;
//! use understory_tour::host::ScreenMetrics;
//! use understory_tour::session::{Target, TourGuide};
//! use understory_tour::spec::{OverlaySpec, TooltipSpec};
//! use understory_tour::testing::RecordingHost;
//!
//! let mut host = RecordingHost::new(ScreenMetrics::new(1080, 1920, 2.0));
//! let button = host.add_element(PixelRect::new(40, 300, 200, 96), true);
//!
//! let mut guide = TourGuide::new()
//!     .tooltip(TooltipSpec::new().title("Compose").description("Start a new message"))
//!     .overlay(OverlaySpec::new().click_outside_to_cancel(true));
//! guide.play_on(&mut host, Target::Element(button));
//! guide.tick(&mut host, Duration::from_millis(16));
//!
//! assert!(guide.layers().tooltip().is_some());
//! guide.cleanup(&mut host);
//! ```
//!
//! ## Features
//!
//! - `test-helpers`: exposes [`testing::RecordingHost`], an in-memory host for tests.

pub mod animation;
pub mod compose;
pub mod error;
pub mod host;
pub mod session;
pub mod spec;
pub mod sync;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use error::TourError;
pub use session::{Target, TourGuide};
