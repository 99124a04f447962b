// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: gravity flags, integer pixel geometry, and anchors.

use kurbo::{Point, Rect};

bitflags::bitflags! {
    /// Anchor directive for placing a tooltip or pointer.
    ///
    /// Combines one horizontal component with one vertical component.
    /// Tooltip placement reads the relative `START`/`END` bits; pointer placement reads the
    /// absolute `LEFT`/`RIGHT` bits. Anything without the bits a rule looks for is centered.
    ///
    /// ## Matching
    ///
    /// Element-relative rules test bits with a mask, so `TOP | START` counts as `TOP`.
    /// The window-relative vertical rule compares the whole value instead; see
    /// [`resolve_y`](crate::resolve::resolve_y).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Gravity: u16 {
        /// Leading edge (tooltip rules).
        const START             = 0b0000_0000_0001;
        /// Trailing edge (tooltip rules).
        const END               = 0b0000_0000_0010;
        /// Horizontal center.
        const CENTER_HORIZONTAL = 0b0000_0000_0100;
        /// Absolute left edge (pointer rules).
        const LEFT              = 0b0000_0000_1000;
        /// Absolute right edge (pointer rules).
        const RIGHT             = 0b0000_0001_0000;
        /// Top edge.
        const TOP               = 0b0000_0010_0000;
        /// Bottom edge.
        const BOTTOM            = 0b0000_0100_0000;
        /// Vertical center.
        const CENTER_VERTICAL   = 0b0000_1000_0000;
        /// Center on both axes.
        const CENTER = Self::CENTER_HORIZONTAL.bits() | Self::CENTER_VERTICAL.bits();
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Gravity {
    /// Whether either horizontal edge bit used by tooltip rules is set.
    #[inline]
    pub fn is_horizontal_edge(self) -> bool {
        self.contains(Self::START) || self.contains(Self::END)
    }
}

/// A point in integer screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl PixelPoint {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A size in integer pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelSize {
    /// Create a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in integer screen pixels, stored as origin plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelRect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Combine an origin and a size.
    pub const fn from_origin_size(origin: PixelPoint, size: PixelSize) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Width and height.
    pub const fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Convert to a Kurbo rectangle for shape queries.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }

    /// Center point in floating-point coordinates.
    pub fn center(&self) -> Point {
        self.to_rect().center()
    }
}

/// What a placement is relative to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// The whole window; positions are computed against the container.
    Window,
    /// A concrete element with its current screen-space bounds.
    Element(PixelRect),
}
