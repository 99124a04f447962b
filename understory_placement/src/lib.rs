// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Placement: tooltip, pointer, and spotlight-hole geometry for walkthrough overlays.
//!
//! A walkthrough step dims the screen, cuts a hole around a target, points at it, and shows a
//! tooltip next to it. This crate is the pure geometry behind that:
//!
//! - [`resolve`]: where a tooltip or pointer goes for a given [`Gravity`], target, container,
//!   and measured content size, including the horizontal boundary correction.
//! - [`hole`]: the cut-out shape around the target and the point tests used to route input.
//!
//! It does not measure, lay out, or draw anything. Callers pass in sizes measured by their
//! toolkit and apply the resulting margins themselves.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_placement::{Anchor, Gravity, PixelRect, PixelSize, place_pointer, place_tooltip};
//!
//! let target = PixelRect::new(100, 100, 50, 50);
//! let tooltip = place_tooltip(
//!     Gravity::BOTTOM | Gravity::END,
//!     PixelSize::new(200, 80),
//!     None,
//!     Anchor::Element(target),
//!     PixelSize::new(1000, 2000),
//!     10,
//! );
//! assert_eq!((tooltip.origin.x, tooltip.origin.y), (140, 140));
//!
//! let pointer = place_pointer(Gravity::CENTER, PixelSize::new(40, 40), target);
//! assert_eq!((pointer.x, pointer.y), (105, 105));
//! ```
//!
//! ### Hit-testing the hole
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_placement::hole::{HoleConfig, HoleOverlay, HoleStyle};
//!
//! let overlay = HoleOverlay::new(
//!     Rect::new(0.0, 0.0, 1000.0, 2000.0),
//!     Some(Rect::new(100.0, 100.0, 150.0, 150.0)),
//!     &HoleConfig { style: HoleStyle::Rectangle, padding: 10.0, ..Default::default() },
//! );
//! assert!(overlay.is_within_target(Point::new(95.0, 125.0)));
//! assert!(!overlay.is_within_target(Point::new(500.0, 500.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod hole;
pub mod resolve;
mod types;

pub use resolve::{
    HorizontalSpan, TooltipPlacement, clamp_horizontal, place_pointer, place_tooltip, resolve_x,
    resolve_y,
};
pub use types::{Anchor, Gravity, PixelPoint, PixelRect, PixelSize};
