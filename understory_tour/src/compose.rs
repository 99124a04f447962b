// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay composition: the layers of one step and the animations running on them.
//!
//! ## Overview
//!
//! A [`Composition`] holds handles to the overlay, pointer probe, pointer, tooltip, and popup
//! surface of a step. At most one of each exists at a time. It attaches them in the places
//! the host expects and removes all of them on [`Composition::teardown`].
//!
//! Pointer animations belong to the overlay: detaching the overlay stops them. Tooltip enter
//! animations and text swaps belong to the tooltip.
//!
//! Coordinates passed in are screen pixels; layers attached to content are shifted by the
//! content origin, layers on the popup surface are not.

use core::time::Duration;

use understory_placement::{Anchor, PixelPoint, PixelSize, place_tooltip};

use crate::animation::{Animation, AnimationRunner, Frame};
use crate::host::{
    AnimationTarget, Dimension, LayerContent, LayerFrame, LayerId, OverlayVisual, SurfaceId,
    TextField, ViewHost,
};
use crate::spec::{Color, TooltipSpec};

/// Where a tooltip ended up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TooltipPlaced {
    /// The tooltip layer.
    pub layer: LayerId,
    /// Top-left corner in screen pixels.
    pub origin: PixelPoint,
    /// Width pinned on the layer, if any.
    pub width: Option<i32>,
}

#[derive(Clone, Debug)]
enum SwapStage {
    Out(AnimationRunner, Option<AnimationRunner>),
    In(AnimationRunner),
}

#[derive(Clone, Debug)]
struct TextSwap {
    layer: LayerId,
    field: TextField,
    text: String,
    stage: SwapStage,
}

#[derive(Clone, Debug)]
enum Owner {
    Overlay,
    Tooltip,
}

/// Layer handles and running animations of one step.
#[derive(Clone, Debug, Default)]
pub struct Composition {
    overlay: Option<LayerId>,
    probe: Option<LayerId>,
    pointer: Option<LayerId>,
    tooltip: Option<LayerId>,
    tooltip_generated: bool,
    surface: Option<SurfaceId>,
    animations: Vec<(Owner, AnimationRunner)>,
    swaps: Vec<TextSwap>,
}

impl Composition {
    /// Nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// The overlay layer.
    pub fn overlay(&self) -> Option<LayerId> {
        self.overlay
    }

    /// The pointer probe, while waiting for its layout.
    pub fn probe(&self) -> Option<LayerId> {
        self.probe
    }

    /// The pointer layer.
    pub fn pointer(&self) -> Option<LayerId> {
        self.pointer
    }

    /// The tooltip layer.
    pub fn tooltip(&self) -> Option<LayerId> {
        self.tooltip
    }

    /// The popup surface.
    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.overlay.is_none()
            && self.probe.is_none()
            && self.pointer.is_none()
            && self.tooltip.is_none()
            && self.surface.is_none()
    }

    /// Animations and text swaps still running.
    pub fn running(&self) -> usize {
        self.animations.len() + self.swaps.len()
    }

    /// Return the popup surface, opening it first if needed.
    pub(crate) fn popup_surface(&mut self, host: &mut dyn ViewHost) -> SurfaceId {
        if let Some(surface) = self.surface {
            return surface;
        }
        let surface = host.create_floating_surface();
        tracing::debug!(?surface, "opened popup surface");
        self.surface = Some(surface);
        surface
    }

    /// Attach the dimming overlay over the whole window.
    pub(crate) fn attach_overlay(
        &mut self,
        host: &mut dyn ViewHost,
        visual: OverlayVisual,
        popup: bool,
    ) -> LayerId {
        if let Some(old) = self.overlay.take() {
            self.detach_overlay(host, old);
        }
        let layer = host.create_layer(LayerContent::Overlay(visual));
        if popup {
            let surface = self.popup_surface(host);
            host.attach_to_surface(surface, layer, LayerFrame::fill(0));
        } else {
            let top = -host.content_origin().y;
            host.attach_to_content(layer, LayerFrame::fill(top));
        }
        tracing::debug!(?layer, popup, "attached overlay");
        self.overlay = Some(layer);
        layer
    }

    fn detach_overlay(&mut self, host: &mut dyn ViewHost, layer: LayerId) {
        host.detach(layer);
        self.pointer = None;
        self.animations.retain(|(owner, _)| !matches!(owner, Owner::Overlay));
    }

    /// Attach an invisible pointer whose first layout reports the pointer size.
    pub(crate) fn attach_probe(&mut self, host: &mut dyn ViewHost) -> LayerId {
        if let Some(old) = self.probe.take() {
            host.detach(old);
        }
        let probe = host.create_layer(LayerContent::PointerProbe);
        let frame = LayerFrame {
            width: Dimension::Wrap,
            height: Dimension::Wrap,
            ..LayerFrame::default()
        };
        host.attach_to_content(probe, frame);
        self.probe = Some(probe);
        probe
    }

    /// Size of the probe, then detach it.
    pub(crate) fn take_probe_size(&mut self, host: &mut dyn ViewHost) -> Option<PixelSize> {
        let probe = self.probe.take()?;
        let size = host.layer_size(probe);
        host.detach(probe);
        size
    }

    /// Attach the pointer inside the overlay at `position`, in overlay coordinates.
    pub(crate) fn attach_pointer(
        &mut self,
        host: &mut dyn ViewHost,
        color: Color,
        position: PixelPoint,
    ) -> Option<LayerId> {
        let overlay = self.overlay?;
        if let Some(old) = self.pointer.take() {
            host.detach(old);
        }
        let pointer = host.create_layer(LayerContent::Pointer { color });
        host.attach_to_layer(overlay, pointer, LayerFrame::at(position.x, position.y));
        tracing::debug!(?pointer, x = position.x, y = position.y, "attached pointer");
        self.pointer = Some(pointer);
        Some(pointer)
    }

    /// Start the pointer choreography; it stops when the overlay goes away.
    pub(crate) fn animate_pointer(&mut self, host: &mut dyn ViewHost, animation: Animation) {
        let Some(pointer) = self.pointer else {
            return;
        };
        let mut runner = AnimationRunner::new(animation, AnimationTarget::Layer(pointer));
        runner.start();
        if let Some(frame) = runner.current() {
            host.apply_transform(frame.target, frame.transform);
        }
        self.animations.push((Owner::Overlay, runner));
    }

    /// Create (or reuse) the tooltip layer, place it against `anchor`, and attach it.
    ///
    /// `anchor` and the result are in screen pixels; `offset` is already scaled.
    pub(crate) fn attach_tooltip(
        &mut self,
        host: &mut dyn ViewHost,
        spec: &TooltipSpec,
        anchor: Anchor,
        offset: i32,
        popup: bool,
    ) -> TooltipPlaced {
        self.detach_tooltip(host);
        let (layer, generated) = match spec.custom() {
            Some(layer) => (layer, false),
            None => (host.create_layer(LayerContent::Tooltip(spec.visual())), true),
        };
        let container = host.container_size();
        let measured = host.measure(layer, container.width);
        let placed = place_tooltip(
            spec.placement(),
            measured,
            spec.fixed_width(),
            anchor,
            container,
            offset,
        );
        let mut frame = LayerFrame::at(placed.origin.x, placed.origin.y);
        if let Some(w) = placed.explicit_width {
            frame.width = Dimension::Exact(w);
        }
        if popup {
            let surface = self.popup_surface(host);
            host.attach_to_surface(surface, layer, frame);
        } else {
            let origin = host.content_origin();
            frame.left -= origin.x;
            frame.top -= origin.y;
            host.attach_to_content(layer, frame);
        }
        tracing::debug!(
            ?layer,
            x = placed.origin.x,
            y = placed.origin.y,
            width = placed.width,
            "attached tooltip"
        );
        self.tooltip = Some(layer);
        self.tooltip_generated = generated;
        if let Some(enter) = spec.enter() {
            let mut runner = AnimationRunner::new(enter.clone(), AnimationTarget::Layer(layer));
            runner.start();
            if let Some(frame) = runner.current() {
                host.apply_transform(frame.target, frame.transform);
            }
            self.animations.push((Owner::Tooltip, runner));
        }
        TooltipPlaced {
            layer,
            origin: placed.origin,
            width: placed.explicit_width,
        }
    }

    /// Move the tooltip to a new screen position, keeping its layer.
    pub(crate) fn move_tooltip(&self, host: &mut dyn ViewHost, origin: PixelPoint, popup: bool) {
        let Some(layer) = self.tooltip else {
            return;
        };
        let shift = if popup {
            PixelPoint::new(0, 0)
        } else {
            host.content_origin()
        };
        host.set_margins(layer, origin.x - shift.x, origin.y - shift.y);
    }

    /// Redraw the overlay with a new cut-out. Returns whether an overlay is attached.
    pub(crate) fn redraw_overlay(&self, host: &mut dyn ViewHost, visual: OverlayVisual) -> bool {
        let Some(overlay) = self.overlay else {
            return false;
        };
        host.update_overlay(overlay, visual);
        true
    }

    /// Move the pointer to a new position in overlay coordinates.
    pub(crate) fn move_pointer(&self, host: &mut dyn ViewHost, position: PixelPoint) {
        if let Some(pointer) = self.pointer {
            host.set_margins(pointer, position.x, position.y);
        }
    }

    /// Detach the tooltip only. Returns whether there was one.
    pub(crate) fn detach_tooltip(&mut self, host: &mut dyn ViewHost) -> bool {
        let Some(layer) = self.tooltip.take() else {
            return false;
        };
        host.detach(layer);
        self.tooltip_generated = false;
        self.animations.retain(|(owner, _)| !matches!(owner, Owner::Tooltip));
        self.swaps.clear();
        tracing::debug!(?layer, "detached tooltip");
        true
    }

    /// The tooltip layer, if it is the generated title/description card.
    pub(crate) fn generated_tooltip(&self) -> Option<LayerId> {
        self.tooltip.filter(|_| self.tooltip_generated)
    }

    /// Replace a text field, animating out and back in when animations are given.
    pub(crate) fn update_text(
        &mut self,
        host: &mut dyn ViewHost,
        layer: LayerId,
        field: TextField,
        text: String,
        out: Option<Animation>,
        enter: Option<Animation>,
    ) {
        self.swaps.retain(|s| !(s.layer == layer && s.field == field));
        let target = AnimationTarget::Text(layer, field);
        let runner = |animation: Animation| {
            let mut r = AnimationRunner::new(animation, target);
            r.start();
            r
        };
        let stage = match out {
            Some(out) => SwapStage::Out(runner(out), enter.map(runner)),
            None => {
                host.set_text(layer, field, &text);
                match enter {
                    Some(enter) => SwapStage::In(runner(enter)),
                    None => return,
                }
            }
        };
        self.swaps.push(TextSwap {
            layer,
            field,
            text,
            stage,
        });
    }

    /// Advance every animation by `dt` and push the frames to the host.
    pub(crate) fn tick(&mut self, host: &mut dyn ViewHost, dt: Duration) {
        for (_, runner) in &mut self.animations {
            if let Some(frame) = runner.tick(dt) {
                host.apply_transform(frame.target, frame.transform);
            }
        }
        self.animations.retain(|(_, r)| !r.is_finished());

        let swaps = core::mem::take(&mut self.swaps);
        for mut swap in swaps {
            let keep = match &mut swap.stage {
                SwapStage::Out(out, enter) => {
                    let done = apply(host, out.tick(dt));
                    if done {
                        host.set_text(swap.layer, swap.field, &swap.text);
                        match enter.take() {
                            Some(enter) => {
                                swap.stage = SwapStage::In(enter);
                                true
                            }
                            None => false,
                        }
                    } else {
                        true
                    }
                }
                SwapStage::In(enter) => !apply(host, enter.tick(dt)),
            };
            if keep {
                self.swaps.push(swap);
            }
        }
    }

    /// Remove every layer and stop every animation. Returns whether anything was attached.
    pub(crate) fn teardown(&mut self, host: &mut dyn ViewHost) -> bool {
        let had = !self.is_empty();
        if let Some(overlay) = self.overlay.take() {
            self.detach_overlay(host, overlay);
        }
        if let Some(probe) = self.probe.take() {
            host.detach(probe);
        }
        if let Some(pointer) = self.pointer.take() {
            host.detach(pointer);
        }
        match self.surface.take() {
            Some(surface) => {
                host.destroy_floating_surface(surface);
                self.tooltip = None;
                tracing::debug!(?surface, "closed popup surface");
            }
            None => {
                self.detach_tooltip(host);
            }
        }
        self.tooltip_generated = false;
        self.animations.clear();
        self.swaps.clear();
        had
    }
}

fn apply(host: &mut dyn ViewHost, frame: Option<Frame>) -> bool {
    match frame {
        Some(frame) => {
            host.apply_transform(frame.target, frame.transform);
            frame.finished
        }
        None => true,
    }
}
