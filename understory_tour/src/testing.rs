// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`ViewHost`] that records what a session does to it.
//!
//! [`RecordingHost`] keeps a flat table of elements, layers, surfaces, and subscriptions.
//! Tests drive layout by calling [`RecordingHost::layout`], which returns the subscription ids
//! a real toolkit would report, and feed them back to
//! [`TourGuide::on_layout`](crate::session::TourGuide::on_layout).
//!
//! Measurement ignores the width bound so that tests can exercise boundary correction.

use std::collections::{BTreeMap, BTreeSet};

use understory_placement::{PixelPoint, PixelRect, PixelSize};

use crate::host::{
    AnimationTarget, Dimension, ElementId, LayerContent, LayerFrame, LayerId, LayoutSource,
    OverlayVisual, ScreenMetrics, SubscriptionId, SurfaceId, TextField, Transform, ViewHost,
};

/// Where a layer is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parent {
    /// The content container.
    Content,
    /// Another layer.
    Layer(LayerId),
    /// A floating surface.
    Surface(SurfaceId),
}

/// Everything known about one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRecord {
    /// What it shows.
    pub content: LayerContent,
    /// Where it is attached, if anywhere.
    pub parent: Option<Parent>,
    /// Last frame it was attached or moved with.
    pub frame: LayerFrame,
    /// Last transform applied to the whole layer.
    pub transform: Option<Transform>,
    /// Title text, for generated tooltips.
    pub title: Option<String>,
    /// Description text, for generated tooltips.
    pub description: Option<String>,
    /// Last transform applied to each text field.
    pub text_transforms: BTreeMap<TextField, Transform>,
}

#[derive(Copy, Clone, Debug)]
struct Element {
    attached: bool,
    bounds: PixelRect,
    measured: bool,
}

#[derive(Copy, Clone, Debug)]
struct Subscription {
    source: LayoutSource,
    repeating: bool,
}

/// A scripted host for tests and demos.
#[derive(Clone, Debug)]
pub struct RecordingHost {
    /// Screen metrics reported to the session.
    pub metrics: ScreenMetrics,
    /// Screen position of the content container.
    pub content_origin: PixelPoint,
    /// Size of the container tooltips are laid out in.
    pub container: PixelSize,
    /// Size reported when measuring generated or custom tooltips.
    pub tooltip_size: PixelSize,
    /// Size of the pointer and its probe once laid out.
    pub pointer_size: PixelSize,
    elements: BTreeMap<ElementId, Element>,
    layers: BTreeMap<LayerId, LayerRecord>,
    surfaces: BTreeSet<SurfaceId>,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    measures: Vec<(LayerId, i32)>,
    next_id: u64,
}

impl RecordingHost {
    /// A host whose container fills the screen, with a 200×100 tooltip and 40×40 pointer.
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            metrics,
            content_origin: PixelPoint::new(0, 0),
            container: metrics.size(),
            tooltip_size: PixelSize::new(200, 100),
            pointer_size: PixelSize::new(40, 40),
            elements: BTreeMap::new(),
            layers: BTreeMap::new(),
            surfaces: BTreeSet::new(),
            subscriptions: BTreeMap::new(),
            measures: Vec::new(),
            next_id: 1,
        }
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an app element with the given screen bounds.
    pub fn add_element(&mut self, bounds: PixelRect, attached: bool) -> ElementId {
        let id = ElementId(self.next());
        self.elements.insert(
            id,
            Element {
                attached,
                bounds,
                measured: true,
            },
        );
        id
    }

    /// Add an attached element that has not been laid out yet.
    pub fn add_unmeasured_element(&mut self) -> ElementId {
        let id = ElementId(self.next());
        self.elements.insert(
            id,
            Element {
                attached: true,
                bounds: PixelRect::new(0, 0, 0, 0),
                measured: false,
            },
        );
        id
    }

    /// Attach or detach an element.
    pub fn set_attached(&mut self, element: ElementId, attached: bool) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.attached = attached;
        }
    }

    /// Move an element on screen.
    pub fn move_element(&mut self, element: ElementId, x: i32, y: i32) {
        if let Some(e) = self.elements.get_mut(&element) {
            e.bounds.x = x;
            e.bounds.y = y;
        }
    }

    /// Create a layer the way an app would for a custom tooltip.
    pub fn add_custom_layer(&mut self) -> LayerId {
        self.create_layer(LayerContent::Custom)
    }

    /// Run a layout pass of `source` and return the subscription ids to report, in order.
    ///
    /// One-shot subscriptions are dropped once returned.
    pub fn layout(&mut self, source: LayoutSource) -> Vec<SubscriptionId> {
        let fired: Vec<_> = self
            .subscriptions
            .iter()
            .filter(|(_, s)| s.source == source)
            .map(|(id, s)| (*id, s.repeating))
            .collect();
        for (id, repeating) in &fired {
            if !repeating {
                self.subscriptions.remove(id);
            }
        }
        fired.into_iter().map(|(id, _)| id).collect()
    }

    /// Look up a layer.
    pub fn layer(&self, layer: LayerId) -> Option<&LayerRecord> {
        self.layers.get(&layer)
    }

    /// Layers attached anywhere, in creation order.
    pub fn attached_layers(&self) -> impl Iterator<Item = (LayerId, &LayerRecord)> + '_ {
        self.layers
            .iter()
            .filter(|(_, l)| l.parent.is_some())
            .map(|(id, l)| (*id, l))
    }

    /// Whether `layer` is attached.
    pub fn is_layer_attached(&self, layer: LayerId) -> bool {
        self.layers.get(&layer).is_some_and(|l| l.parent.is_some())
    }

    /// Open floating surfaces.
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Every `measure` call so far, as `(layer, max_width)`.
    pub fn measures(&self) -> &[(LayerId, i32)] {
        &self.measures
    }

    fn attach(&mut self, layer: LayerId, parent: Parent, frame: LayerFrame) {
        if let Some(l) = self.layers.get_mut(&layer) {
            l.parent = Some(parent);
            l.frame = frame;
        }
    }

    fn detach_where(&mut self, mut pred: impl FnMut(Parent) -> bool) {
        let roots: Vec<LayerId> = self
            .layers
            .iter()
            .filter(|(_, l)| l.parent.is_some_and(&mut pred))
            .map(|(id, _)| *id)
            .collect();
        for id in roots {
            self.detach(id);
        }
    }
}

impl ViewHost for RecordingHost {
    fn is_attached(&self, element: ElementId) -> bool {
        self.elements.get(&element).is_some_and(|e| e.attached)
    }

    fn screen_location(&self, element: ElementId) -> Option<PixelPoint> {
        self.elements
            .get(&element)
            .filter(|e| e.attached && e.measured)
            .map(|e| e.bounds.origin())
    }

    fn size(&self, element: ElementId) -> Option<PixelSize> {
        self.elements
            .get(&element)
            .filter(|e| e.attached && e.measured)
            .map(|e| e.bounds.size())
    }

    fn screen_metrics(&self) -> ScreenMetrics {
        self.metrics
    }

    fn content_origin(&self) -> PixelPoint {
        self.content_origin
    }

    fn container_size(&self) -> PixelSize {
        self.container
    }

    fn on_next_layout_ready(&mut self, source: LayoutSource) -> SubscriptionId {
        let id = SubscriptionId(self.next());
        self.subscriptions.insert(
            id,
            Subscription {
                source,
                repeating: false,
            },
        );
        id
    }

    fn on_every_layout_change(&mut self, source: LayoutSource) -> SubscriptionId {
        let id = SubscriptionId(self.next());
        self.subscriptions.insert(
            id,
            Subscription {
                source,
                repeating: true,
            },
        );
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.subscriptions.remove(&subscription);
    }

    fn create_layer(&mut self, content: LayerContent) -> LayerId {
        let id = LayerId(self.next());
        let (title, description) = match &content {
            LayerContent::Tooltip(v) => (Some(v.title.clone()), Some(v.description.clone())),
            _ => (None, None),
        };
        self.layers.insert(
            id,
            LayerRecord {
                content,
                parent: None,
                frame: LayerFrame::default(),
                transform: None,
                title,
                description,
                text_transforms: BTreeMap::new(),
            },
        );
        id
    }

    fn measure(&mut self, layer: LayerId, max_width: i32) -> PixelSize {
        self.measures.push((layer, max_width));
        self.tooltip_size
    }

    fn layer_size(&self, layer: LayerId) -> Option<PixelSize> {
        let l = self.layers.get(&layer)?;
        l.parent?;
        let size = match l.content {
            LayerContent::Overlay(_) => self.metrics.size(),
            LayerContent::Pointer { .. } | LayerContent::PointerProbe => self.pointer_size,
            LayerContent::Tooltip(_) | LayerContent::Custom => match l.frame.width {
                Dimension::Exact(w) => PixelSize::new(w, self.tooltip_size.height),
                _ => self.tooltip_size,
            },
        };
        Some(size)
    }

    fn attach_to_content(&mut self, layer: LayerId, frame: LayerFrame) {
        self.attach(layer, Parent::Content, frame);
    }

    fn attach_to_layer(&mut self, parent: LayerId, layer: LayerId, frame: LayerFrame) {
        self.attach(layer, Parent::Layer(parent), frame);
    }

    fn attach_to_surface(&mut self, surface: SurfaceId, layer: LayerId, frame: LayerFrame) {
        self.attach(layer, Parent::Surface(surface), frame);
    }

    fn set_margins(&mut self, layer: LayerId, left: i32, top: i32) {
        if let Some(l) = self.layers.get_mut(&layer) {
            l.frame.left = left;
            l.frame.top = top;
        }
    }

    fn update_overlay(&mut self, layer: LayerId, visual: OverlayVisual) {
        if let Some(l) = self.layers.get_mut(&layer)
            && matches!(l.content, LayerContent::Overlay(_))
        {
            l.content = LayerContent::Overlay(visual);
        }
    }

    fn detach(&mut self, layer: LayerId) {
        let Some(l) = self.layers.get_mut(&layer) else {
            return;
        };
        if l.parent.take().is_none() {
            return;
        }
        self.detach_where(|p| p == Parent::Layer(layer));
    }

    fn create_floating_surface(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next());
        self.surfaces.insert(id);
        id
    }

    fn destroy_floating_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface) {
            self.detach_where(|p| p == Parent::Surface(surface));
        }
    }

    fn apply_transform(&mut self, target: AnimationTarget, transform: Transform) {
        match target {
            AnimationTarget::Layer(layer) => {
                if let Some(l) = self.layers.get_mut(&layer) {
                    l.transform = Some(transform);
                }
            }
            AnimationTarget::Text(layer, field) => {
                if let Some(l) = self.layers.get_mut(&layer) {
                    l.text_transforms.insert(field, transform);
                }
            }
        }
    }

    fn set_text(&mut self, layer: LayerId, field: TextField, text: &str) {
        if let Some(l) = self.layers.get_mut(&layer) {
            let slot = match field {
                TextField::Title => &mut l.title,
                TextField::Description => &mut l.description,
            };
            *slot = Some(text.to_owned());
        }
    }
}
