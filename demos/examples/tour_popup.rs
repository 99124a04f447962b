// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A step shown on a floating surface that follows a moving target.
//!
//! Targets inside popups and drop-down lists move after the popup opens. In popup mode the
//! tooltip and pointer live on their own surface and are re-placed on every layout pass. The
//! hole in the overlay is cut again around the new position.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example tour_popup`

use tracing_subscriber::EnvFilter;
use understory_placement::{Gravity, PixelRect};
use understory_tour::host::{LayoutSource, ScreenMetrics};
use understory_tour::spec::{PointerSpec, TooltipSpec};
use understory_tour::testing::RecordingHost;
use understory_tour::{Target, TourGuide};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = RecordingHost::new(ScreenMetrics::new(1080, 1920, 1.0));
    let item = host.add_element(PixelRect::new(200, 400, 300, 60), true);

    let mut guide = TourGuide::new()
        .popup_window(true)
        .pointer(PointerSpec::new().gravity(Gravity::RIGHT))
        .tooltip(TooltipSpec::new().title("Pick one").gravity(Gravity::BOTTOM));
    guide.play_on(&mut host, Target::Element(item));

    let Some(surface) = guide.layers().surface() else {
        return;
    };
    let deliver = |host: &mut RecordingHost, guide: &mut TourGuide, source: LayoutSource| {
        for id in host.layout(source) {
            guide.on_layout(host, id);
        }
    };
    if let Some(probe) = guide.layers().probe() {
        deliver(&mut host, &mut guide, LayoutSource::Layer(probe));
    }
    deliver(&mut host, &mut guide, LayoutSource::Surface(surface));
    println!("state: {:?}", guide.state());

    for y in [400, 520, 640] {
        host.move_element(item, 200, y);
        deliver(&mut host, &mut guide, LayoutSource::Surface(surface));
        let tooltip = guide.layers().tooltip().and_then(|t| host.layer(t));
        let pointer = guide.layers().pointer().and_then(|p| host.layer(p));
        if let (Some(tooltip), Some(pointer)) = (tooltip, pointer) {
            println!(
                "target y={y}: tooltip at ({}, {}), pointer at ({}, {})",
                tooltip.frame.left, tooltip.frame.top, pointer.frame.left, pointer.frame.top
            );
        }
        if let Some(hole) = guide.hole().and_then(|h| h.hole()) {
            println!("  hole bounds: {:?}", hole.bounding_box());
        }
    }

    guide.cleanup(&mut host);
    println!("surfaces left open: {}", host.live_surfaces());
}
