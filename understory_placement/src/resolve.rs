// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement rules for tooltips and pointers.
//!
//! ## Overview
//!
//! Every function here is pure integer arithmetic over pixel values.
//! Division truncates toward zero, so `w / 2` of an odd width drops the half pixel.
//!
//! ## Tooltip rules
//!
//! - [`resolve_x`] / [`resolve_y`] place content of a measured size against an [`Anchor`].
//! - `offset` is the overlap between tooltip and target, already scaled to pixels.
//! - [`clamp_horizontal`] keeps the tooltip inside the container.
//! - [`place_tooltip`] combines the three.
//!
//! ## Pointer rules
//!
//! [`place_pointer`] centers, or edge-aligns, the pointer on the target using the absolute
//! [`Gravity::LEFT`] / [`Gravity::RIGHT`] bits. No offset and no clamping apply.

use crate::types::{Anchor, Gravity, PixelPoint, PixelRect, PixelSize};

/// Horizontal x position for content of `content_width`.
///
/// Window anchors honor `START`, then `END`, else center, and subtract `offset` from the
/// non-leading cases. Element anchors place the content before (`START`) or after (`END`)
/// the target, overlapping by `offset`; the centered element case ignores `offset`.
pub fn resolve_x(
    gravity: Gravity,
    content_width: i32,
    anchor: Anchor,
    container_width: i32,
    offset: i32,
) -> i32 {
    match anchor {
        Anchor::Window => {
            if gravity.contains(Gravity::START) {
                0
            } else if gravity.contains(Gravity::END) {
                container_width - content_width - offset
            } else {
                container_width / 2 - content_width / 2 - offset
            }
        }
        Anchor::Element(target) => {
            if gravity.contains(Gravity::START) {
                target.x - content_width + offset
            } else if gravity.contains(Gravity::END) {
                target.x + target.width - offset
            } else {
                target.x + target.width / 2 - content_width / 2
            }
        }
    }
}

/// Vertical y position for content of `content_height`.
///
/// Window anchors compare the whole gravity value: exactly [`Gravity::TOP`],
/// [`Gravity::CENTER`] or [`Gravity::BOTTOM`] are placed, and any other combination
/// (for example `TOP | END`) lands at `0`.
///
/// Element anchors test the `TOP` bit. Content goes above the target when it is set and
/// below otherwise. Edge-aligned content (`START`/`END`) overlaps the target by `offset`,
/// centered content is pushed away from it by `offset`.
pub fn resolve_y(
    gravity: Gravity,
    content_height: i32,
    anchor: Anchor,
    container_height: i32,
    offset: i32,
) -> i32 {
    match anchor {
        Anchor::Window => {
            if gravity == Gravity::TOP {
                0
            } else if gravity == Gravity::CENTER {
                container_height / 2 - content_height / 2 - offset
            } else if gravity == Gravity::BOTTOM {
                container_height - content_height - offset
            } else {
                0
            }
        }
        Anchor::Element(target) => {
            let edge = gravity.is_horizontal_edge();
            if gravity.contains(Gravity::TOP) {
                if edge {
                    target.y - content_height + offset
                } else {
                    target.y - content_height - offset
                }
            } else if edge {
                target.y + target.height - offset
            } else {
                target.y + target.height + offset
            }
        }
    }
}

/// A horizontal position and width, plus the width to pin on the laid-out layer.
///
/// `explicit_width` is `None` while the layer may size itself; it becomes `Some` once a
/// fixed width was requested or boundary correction had to pin one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HorizontalSpan {
    /// Left edge.
    pub x: i32,
    /// Effective width used for bounds checks.
    pub width: i32,
    /// Width to apply to the layer, if pinned.
    pub explicit_width: Option<i32>,
}

/// Keep a span inside `[0, container_width]`.
///
/// 1. A span wider than the container is narrowed to the container.
/// 2. A negative `x` is moved to `0`.
/// 3. A span overflowing the right edge is pinned to its width and moved left.
///
/// Applying this to its own output returns the output unchanged.
pub fn clamp_horizontal(span: HorizontalSpan, container_width: i32) -> HorizontalSpan {
    let HorizontalSpan {
        mut x,
        mut width,
        mut explicit_width,
    } = span;
    if width > container_width {
        width = container_width;
        explicit_width = Some(container_width);
    }
    if x < 0 {
        x = 0;
    }
    if x + width > container_width {
        explicit_width = Some(width);
        x = container_width - width;
    }
    HorizontalSpan {
        x,
        width,
        explicit_width,
    }
}

/// Final tooltip placement: top-left margins and optional pinned width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TooltipPlacement {
    /// Top-left corner relative to the container.
    pub origin: PixelPoint,
    /// Effective width after correction.
    pub width: i32,
    /// Width to pin on the layer, if any.
    pub explicit_width: Option<i32>,
}

/// Resolve a tooltip position with boundary correction.
///
/// `fixed_width` replaces the measured width when present.
/// The x position is resolved with the width capped to the container, the y position with
/// the measured height; only the horizontal axis is corrected afterwards.
pub fn place_tooltip(
    gravity: Gravity,
    measured: PixelSize,
    fixed_width: Option<i32>,
    anchor: Anchor,
    container: PixelSize,
    offset: i32,
) -> TooltipPlacement {
    let width = fixed_width.unwrap_or(measured.width);
    let x = resolve_x(
        gravity,
        width.min(container.width),
        anchor,
        container.width,
        offset,
    );
    let y = resolve_y(gravity, measured.height, anchor, container.height, offset);
    let span = clamp_horizontal(
        HorizontalSpan {
            x,
            width,
            explicit_width: fixed_width,
        },
        container.width,
    );
    TooltipPlacement {
        origin: PixelPoint::new(span.x, y),
        width: span.width,
        explicit_width: span.explicit_width,
    }
}

/// Top-left position for a pointer of `pointer` size on `target`.
pub fn place_pointer(gravity: Gravity, pointer: PixelSize, target: PixelRect) -> PixelPoint {
    let x = if gravity.contains(Gravity::RIGHT) {
        target.x + target.width - pointer.width
    } else if gravity.contains(Gravity::LEFT) {
        target.x
    } else {
        target.x + target.width / 2 - pointer.width / 2
    };
    let y = if gravity.contains(Gravity::BOTTOM) {
        target.y + target.height - pointer.height
    } else if gravity.contains(Gravity::TOP) {
        target.y
    } else {
        target.y + target.height / 2 - pointer.height / 2
    };
    PixelPoint::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: PixelRect = PixelRect::new(100, 300, 50, 40);

    #[test]
    fn window_center_subtracts_offset() {
        let placement = place_tooltip(
            Gravity::CENTER,
            PixelSize::new(200, 100),
            None,
            Anchor::Window,
            PixelSize::new(1000, 2000),
            10,
        );
        assert_eq!(placement.origin, PixelPoint::new(390, 940));
        assert_eq!(placement.explicit_width, None);
    }

    #[test]
    fn window_edges() {
        assert_eq!(resolve_x(Gravity::START, 200, Anchor::Window, 1000, 10), 0);
        assert_eq!(resolve_x(Gravity::END, 200, Anchor::Window, 1000, 10), 790);
        assert_eq!(resolve_y(Gravity::TOP, 100, Anchor::Window, 2000, 10), 0);
        assert_eq!(resolve_y(Gravity::BOTTOM, 100, Anchor::Window, 2000, 10), 1890);
    }

    #[test]
    fn window_vertical_requires_exact_gravity() {
        // Combined values fall through to the top of the container.
        assert_eq!(
            resolve_y(Gravity::BOTTOM | Gravity::END, 100, Anchor::Window, 2000, 10),
            0
        );
        assert_eq!(
            resolve_y(Gravity::CENTER_VERTICAL, 100, Anchor::Window, 2000, 10),
            0
        );
    }

    #[test]
    fn element_horizontal_rules() {
        let anchor = Anchor::Element(TARGET);
        assert_eq!(resolve_x(Gravity::START, 80, anchor, 1000, 10), 100 - 80 + 10);
        assert_eq!(resolve_x(Gravity::END, 80, anchor, 1000, 10), 100 + 50 - 10);
        // Centered element placement ignores the offset.
        assert_eq!(resolve_x(Gravity::CENTER, 80, anchor, 1000, 10), 100 + 25 - 40);
        assert_eq!(resolve_x(Gravity::CENTER, 80, anchor, 1000, 99), 85);
    }

    #[test]
    fn element_vertical_rules() {
        let anchor = Anchor::Element(TARGET);
        assert_eq!(
            resolve_y(Gravity::TOP | Gravity::START, 60, anchor, 2000, 10),
            300 - 60 + 10
        );
        assert_eq!(
            resolve_y(Gravity::TOP | Gravity::CENTER_HORIZONTAL, 60, anchor, 2000, 10),
            300 - 60 - 10
        );
        assert_eq!(
            resolve_y(Gravity::BOTTOM | Gravity::END, 60, anchor, 2000, 10),
            300 + 40 - 10
        );
        assert_eq!(
            resolve_y(Gravity::BOTTOM, 60, anchor, 2000, 10),
            300 + 40 + 10
        );
    }

    #[test]
    fn oversized_tooltip_is_narrowed_to_container() {
        let placement = place_tooltip(
            Gravity::CENTER,
            PixelSize::new(1200, 100),
            None,
            Anchor::Window,
            PixelSize::new(1000, 2000),
            0,
        );
        assert_eq!(placement.origin.x, 0);
        assert_eq!(placement.width, 1000);
        assert_eq!(placement.explicit_width, Some(1000));
    }

    #[test]
    fn left_overflow_moves_to_zero() {
        let span = clamp_horizontal(
            HorizontalSpan {
                x: -30,
                width: 200,
                explicit_width: None,
            },
            1000,
        );
        assert_eq!(
            span,
            HorizontalSpan {
                x: 0,
                width: 200,
                explicit_width: None
            }
        );
    }

    #[test]
    fn right_overflow_pins_width() {
        let span = clamp_horizontal(
            HorizontalSpan {
                x: 900,
                width: 200,
                explicit_width: None,
            },
            1000,
        );
        assert_eq!(
            span,
            HorizontalSpan {
                x: 800,
                width: 200,
                explicit_width: Some(200)
            }
        );
    }

    #[test]
    fn fixed_width_overrides_measurement() {
        let placement = place_tooltip(
            Gravity::END,
            PixelSize::new(500, 80),
            Some(300),
            Anchor::Element(TARGET),
            PixelSize::new(1000, 2000),
            10,
        );
        assert_eq!(placement.origin, PixelPoint::new(140, 330));
        assert_eq!(placement.width, 300);
        assert_eq!(placement.explicit_width, Some(300));
    }

    #[test]
    fn pointer_centered_horizontally_on_top_edge() {
        let target = PixelRect::new(100, 100, 50, 50);
        let pos = place_pointer(Gravity::TOP | Gravity::START, PixelSize::new(40, 40), target);
        assert_eq!(pos, PixelPoint::new(105, 100));
    }

    #[test]
    fn pointer_absolute_edges() {
        let target = PixelRect::new(100, 100, 50, 50);
        let size = PixelSize::new(40, 40);
        assert_eq!(
            place_pointer(Gravity::LEFT | Gravity::BOTTOM, size, target),
            PixelPoint::new(100, 110)
        );
        assert_eq!(
            place_pointer(Gravity::RIGHT | Gravity::TOP, size, target),
            PixelPoint::new(110, 100)
        );
        assert_eq!(
            place_pointer(Gravity::CENTER, size, target),
            PixelPoint::new(105, 105)
        );
    }
}
