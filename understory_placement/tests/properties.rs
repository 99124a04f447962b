// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for placement and hole geometry.

use kurbo::{Point, Rect};
use proptest::prelude::*;
use understory_placement::hole::{HoleConfig, HoleOverlay, HoleStyle};
use understory_placement::{
    Anchor, Gravity, HorizontalSpan, PixelRect, clamp_horizontal, resolve_x,
};

fn gravity() -> impl Strategy<Value = Gravity> {
    (0_u16..=0xFF).prop_map(Gravity::from_bits_truncate)
}

fn style() -> impl Strategy<Value = HoleStyle> {
    prop_oneof![
        Just(HoleStyle::Circle),
        Just(HoleStyle::Rectangle),
        Just(HoleStyle::RoundedRectangle),
        Just(HoleStyle::NoHole),
    ]
}

proptest! {
    #[test]
    fn window_center_is_symmetric(
        half_container in 1_i32..2_000,
        half_content in 0_i32..2_000,
        offset in -100_i32..100,
    ) {
        let container = half_container * 2;
        let content = half_content * 2;
        let x = resolve_x(Gravity::CENTER, content, Anchor::Window, container, offset);
        prop_assert_eq!(x, (container - content) / 2 - offset);
    }

    #[test]
    fn element_end_ignores_content_width(
        tx in -500_i32..2_000,
        tw in 0_i32..1_000,
        content in 0_i32..3_000,
        offset in -100_i32..100,
        vertical in prop_oneof![Just(Gravity::TOP), Just(Gravity::BOTTOM), Just(Gravity::empty())],
    ) {
        let anchor = Anchor::Element(PixelRect::new(tx, 0, tw, 10));
        let x = resolve_x(Gravity::END | vertical, content, anchor, 1_000, offset);
        prop_assert_eq!(x, tx + tw - offset);
    }

    #[test]
    fn clamping_is_idempotent(
        x in -3_000_i32..3_000,
        width in 0_i32..3_000,
        container in 1_i32..3_000,
        pinned in proptest::option::of(0_i32..3_000),
    ) {
        let once = clamp_horizontal(HorizontalSpan { x, width, explicit_width: pinned }, container);
        let twice = clamp_horizontal(once, container);
        prop_assert_eq!(once, twice);
        prop_assert!(once.x >= 0);
        prop_assert!(once.x + once.width <= container);
    }

    #[test]
    fn resolution_is_deterministic(
        g in gravity(),
        content in 0_i32..2_000,
        tx in -500_i32..1_500,
        tw in 0_i32..500,
    ) {
        let anchor = Anchor::Element(PixelRect::new(tx, 0, tw, 10));
        prop_assert_eq!(
            resolve_x(g, content, anchor, 1_000, 10),
            resolve_x(g, content, anchor, 1_000, 10)
        );
    }

    #[test]
    fn target_center_is_within_every_hole(
        x in -500.0_f64..1_500.0,
        y in -500.0_f64..2_500.0,
        w in 1.0_f64..400.0,
        h in 1.0_f64..400.0,
        padding in 0.0_f64..40.0,
        style in style(),
    ) {
        let target = Rect::new(x, y, x + w, y + h);
        let overlay = HoleOverlay::new(
            Rect::new(0.0, 0.0, 1_000.0, 2_000.0),
            Some(target),
            &HoleConfig { style, padding, corner_radius: 8.0, ..Default::default() },
        );
        prop_assert!(overlay.is_within_target(target.center()));
        prop_assert!(!overlay.is_within_target(Point::new(1.0e6, 1.0e6)));
    }
}
