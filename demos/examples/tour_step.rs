// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One walkthrough step against the in-memory host.
//!
//! Shows a step on a button that is not attached yet, attaches it, measures the pointer,
//! runs a few animation frames, and ends the step with a tap outside the target.
//!
//! Run with logs:
//! - `RUST_LOG=understory_tour=debug cargo run -p understory_demos --example tour_step`

use core::time::Duration;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_gesture::types::{TouchEvent, TouchPhase};
use understory_placement::{Gravity, PixelRect};
use understory_tour::host::{LayoutSource, ScreenMetrics};
use understory_tour::spec::{OverlaySpec, PointerSpec, TooltipSpec};
use understory_tour::testing::RecordingHost;
use understory_tour::{Target, TourGuide};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = RecordingHost::new(ScreenMetrics::new(1080, 1920, 2.0));
    let button = host.add_element(PixelRect::new(860, 1700, 160, 160), false);

    let mut guide = TourGuide::new()
        .pointer(PointerSpec::new())
        .tooltip(
            TooltipSpec::new()
                .title("New message")
                .description("Tap to write a message")
                .gravity(Gravity::TOP | Gravity::START),
        )
        .overlay(OverlaySpec::new().click_outside_to_cancel(true).disable_click_through(true));

    guide.play_on(&mut host, Target::Element(button));
    println!("after play: {:?}", guide.state());

    host.set_attached(button, true);
    for id in host.layout(LayoutSource::Element(button)) {
        guide.on_layout(&mut host, id);
    }
    println!("after attach: {:?}", guide.state());

    if let Some(probe) = guide.layers().probe() {
        for id in host.layout(LayoutSource::Layer(probe)) {
            guide.on_layout(&mut host, id);
        }
    }
    println!("after pointer layout: {:?}", guide.state());

    for (id, layer) in host.attached_layers() {
        println!(
            "{id:?}: {:?} at ({}, {})",
            layer.parent, layer.frame.left, layer.frame.top
        );
    }

    for _ in 0..90 {
        guide.tick(&mut host, Duration::from_millis(16));
    }
    if let Some(pointer) = guide.layers().pointer() {
        println!("pointer transform: {:?}", host.layer(pointer).map(|l| l.transform));
    }

    let outside = Point::new(100.0, 100.0);
    let _ = guide.on_touch(
        &mut host,
        &TouchEvent::new(TouchPhase::Down, outside, Duration::ZERO),
    );
    let response = guide.on_touch(
        &mut host,
        &TouchEvent::new(TouchPhase::Up, outside, Duration::from_millis(60)),
    );
    println!("tap outside: {response:?}, state {:?}", guide.state());
    assert_eq!(host.attached_layers().count(), 0);
}
