// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip and pointer placement for each gravity around one target.
//!
//! Prints where a 200×80 tooltip and a 40×40 pointer land for a 120×48 target on a
//! 1080×1920 screen, including a wide tooltip that gets pinned to the container.
//!
//! Run:
//! - `cargo run -p understory_demos --example placement_gravity`

use understory_placement::{Anchor, Gravity, PixelRect, PixelSize, place_pointer, place_tooltip};

fn main() {
    let container = PixelSize::new(1080, 1920);
    let target = PixelRect::new(480, 900, 120, 48);
    let tooltip = PixelSize::new(200, 80);
    let offset = 26;

    let gravities = [
        ("CENTER", Gravity::CENTER),
        ("TOP", Gravity::TOP),
        ("BOTTOM", Gravity::BOTTOM),
        ("TOP | START", Gravity::TOP | Gravity::START),
        ("TOP | END", Gravity::TOP | Gravity::END),
        ("BOTTOM | START", Gravity::BOTTOM | Gravity::START),
        ("BOTTOM | END", Gravity::BOTTOM | Gravity::END),
    ];

    println!("target {target:?}");
    for (name, gravity) in gravities {
        let placed = place_tooltip(
            gravity,
            tooltip,
            None,
            Anchor::Element(target),
            container,
            offset,
        );
        println!(
            "tooltip {name:>15}: ({:>4}, {:>4})",
            placed.origin.x, placed.origin.y
        );
    }

    for (name, gravity) in [
        ("CENTER", Gravity::CENTER),
        ("TOP | LEFT", Gravity::TOP | Gravity::LEFT),
        ("BOTTOM | RIGHT", Gravity::BOTTOM | Gravity::RIGHT),
    ] {
        let p = place_pointer(gravity, PixelSize::new(40, 40), target);
        println!("pointer {name:>15}: ({:>4}, {:>4})", p.x, p.y);
    }

    let wide = place_tooltip(
        Gravity::BOTTOM | Gravity::END,
        PixelSize::new(1400, 80),
        None,
        Anchor::Element(target),
        container,
        offset,
    );
    println!(
        "wide tooltip: x={} width={} pinned={:?}",
        wide.origin.x, wide.width, wide.explicit_width
    );
    assert_eq!(wide.origin.x, 0);
    assert_eq!(wide.explicit_width, Some(1080));
}
