// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The walkthrough session: one highlighted step, from configuration to cleanup.
//!
//! ## Lifecycle
//!
//! 1) Configure a [`TourGuide`] with its builder methods.
//! 2) Call [`TourGuide::play_on`] (or [`TourGuide::play`] for the whole window).
//! 3) Report every layout notice the host fires with [`TourGuide::on_layout`], frame time with
//!    [`TourGuide::tick`], touches with [`TourGuide::on_touch`], and call
//!    [`TourGuide::poll_gestures`] from the frame loop.
//! 4) Call [`TourGuide::cleanup`] to remove everything. The guide can be shown again.
//!
//! A detached target defers the whole step until it attaches. Inside a step, the pointer
//! waits for its probe to lay out, and in popup mode the tooltip waits for the popup surface.
//!
//! ```
//! use understory_placement::{Gravity, PixelRect};
//! use understory_tour::host::{LayoutSource, ScreenMetrics};
//! use understory_tour::session::{Target, TourGuide};
//! use understory_tour::spec::{PointerSpec, TooltipSpec};
//! use understory_tour::sync::SyncState;
//! use understory_tour::testing::RecordingHost;
//!
//! let mut host = RecordingHost::new(ScreenMetrics::new(1000, 2000, 1.0));
//! let button = host.add_element(PixelRect::new(100, 100, 50, 50), true);
//! let mut guide = TourGuide::new()
//!     .pointer(PointerSpec::new())
//!     .tooltip(TooltipSpec::new().title("Start here").gravity(Gravity::BOTTOM));
//! guide.play_on(&mut host, Target::Element(button));
//! assert_eq!(guide.state(), SyncState::AwaitingFirstLayout);
//!
//! let probe = guide.layers().probe().unwrap();
//! for id in host.layout(LayoutSource::Layer(probe)) {
//!     guide.on_layout(&mut host, id);
//! }
//! assert_eq!(guide.state(), SyncState::Ready);
//! assert!(guide.layers().pointer().is_some());
//!
//! guide.cleanup(&mut host);
//! assert_eq!(host.attached_layers().count(), 0);
//! ```

use core::time::Duration;

use understory_gesture::dispatcher::{InteractionDispatcher, InteractionPolicy, OverlayListeners};
use understory_gesture::gesture::GestureConfig;
use understory_gesture::types::{Dispatched, Effect, Response, TouchEvent};
use understory_placement::hole::{HoleConfig, HoleOverlay, HoleStyle, MotionType};
use understory_placement::{
    Anchor, HorizontalSpan, PixelPoint, PixelRect, clamp_horizontal, place_pointer, resolve_x,
    resolve_y,
};

use crate::animation::{Animation, Technique};
use crate::compose::Composition;
use crate::error::TourError;
use crate::host::{ElementId, LayoutSource, OverlayVisual, SubscriptionId, TextField, ViewHost};
use crate::spec::{Color, OverlaySpec, PointerSpec, TooltipSpec};
use crate::sync::{LayoutSync, Purpose, SyncState};

/// Length of the default text fades.
pub const TEXT_FADE: Duration = Duration::from_millis(100);

/// What a step highlights.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// The whole window; nothing is cut out.
    Window,
    /// One element of the app.
    Element(ElementId),
}

fn element_rect(host: &dyn ViewHost, element: ElementId) -> Result<PixelRect, TourError> {
    if !host.is_attached(element) {
        return Err(TourError::DetachedTarget(element));
    }
    match (host.screen_location(element), host.size(element)) {
        (Some(origin), Some(size)) => Ok(PixelRect::from_origin_size(origin, size)),
        _ => Err(TourError::UnmeasuredTarget(element)),
    }
}

/// One walkthrough step.
#[derive(Debug, Default)]
pub struct TourGuide {
    technique: Technique,
    motion_type: MotionType,
    tooltip: Option<TooltipSpec>,
    pointer: Option<PointerSpec>,
    overlay: Option<OverlaySpec>,
    popup_window: bool,
    gesture_config: GestureConfig,
    target: Option<Target>,
    sync: LayoutSync,
    composition: Composition,
    hole: Option<HoleOverlay>,
    dispatcher: Option<InteractionDispatcher>,
}

impl TourGuide {
    /// A guide with the click technique and nothing to show yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer choreography.
    #[must_use]
    pub fn technique(mut self, technique: Technique) -> Self {
        self.technique = technique;
        self
    }

    /// Which gestures may pass through the hole.
    #[must_use]
    pub fn motion_type(mut self, motion: MotionType) -> Self {
        self.motion_type = motion;
        self
    }

    /// Tooltip to show. Use [`TourGuide::replace_tooltip`] once the step is visible.
    #[must_use]
    pub fn tooltip(mut self, spec: TooltipSpec) -> Self {
        self.tooltip = Some(spec);
        self
    }

    /// Pointer to show.
    #[must_use]
    pub fn pointer(mut self, spec: PointerSpec) -> Self {
        self.pointer = Some(spec);
        self
    }

    /// Overlay look and input policy.
    #[must_use]
    pub fn overlay(mut self, spec: OverlaySpec) -> Self {
        self.overlay = Some(spec);
        self
    }

    /// Show everything on a floating surface, for targets inside popups.
    #[must_use]
    pub fn popup_window(mut self, popup: bool) -> Self {
        self.popup_window = popup;
        self
    }

    /// Tap and long-press thresholds.
    #[must_use]
    pub fn gesture_config(mut self, config: GestureConfig) -> Self {
        self.gesture_config = config;
        self
    }

    /// Lifecycle state.
    pub fn state(&self) -> SyncState {
        self.sync.state()
    }

    /// The highlighted target, once played.
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    /// Attached layers.
    pub fn layers(&self) -> &Composition {
        &self.composition
    }

    /// Hole geometry used for input routing, while shown.
    pub fn hole(&self) -> Option<&HoleOverlay> {
        self.hole.as_ref()
    }

    /// Current tooltip configuration.
    pub fn tooltip_spec(&self) -> Option<&TooltipSpec> {
        self.tooltip.as_ref()
    }

    /// Current pointer configuration.
    pub fn pointer_spec(&self) -> Option<&PointerSpec> {
        self.pointer.as_ref()
    }

    /// Current overlay configuration.
    pub fn overlay_spec(&self) -> Option<&OverlaySpec> {
        self.overlay.as_ref()
    }

    /// Show the step over the whole window.
    pub fn play(&mut self, host: &mut dyn ViewHost) {
        self.play_on(host, Target::Window);
    }

    /// Show the step on `target`, replacing whatever this guide showed before.
    pub fn play_on(&mut self, host: &mut dyn ViewHost, target: Target) {
        if !self.composition.is_empty() || self.sync.pending_count() > 0 {
            self.cleanup(host);
        }
        self.target = Some(target);
        self.sync.begin();
        self.start(host);
    }

    fn start(&mut self, host: &mut dyn ViewHost) {
        if let Some(Target::Element(element)) = self.target
            && !host.is_attached(element)
        {
            let _ = self.sync.wait_once(
                host,
                LayoutSource::Element(element),
                Purpose::TargetAttached,
            );
            return;
        }
        self.show(host);
    }

    fn target_rect(&self, host: &dyn ViewHost) -> Result<Option<PixelRect>, TourError> {
        match self.target {
            Some(Target::Element(element)) => element_rect(host, element).map(Some),
            Some(Target::Window) | None => Ok(None),
        }
    }

    /// Hole geometry and overlay look for `target`.
    fn cut_out(
        &self,
        host: &dyn ViewHost,
        target: Option<PixelRect>,
    ) -> (HoleOverlay, OverlayVisual) {
        let metrics = host.screen_metrics();
        let (background, config) = match &self.overlay {
            Some(spec) => (spec.background(), spec.hole_config(&metrics)),
            None => (
                Color::TRANSPARENT,
                HoleConfig {
                    style: HoleStyle::NoHole,
                    ..HoleConfig::default()
                },
            ),
        };
        let hole = HoleOverlay::new(
            metrics.bounds().to_rect(),
            target.map(|r| r.to_rect()),
            &config,
        );
        let visual = OverlayVisual {
            background,
            hole: hole.hole().copied(),
        };
        (hole, visual)
    }

    fn show(&mut self, host: &mut dyn ViewHost) {
        let target = self.target_rect(host).unwrap_or_else(|err| {
            tracing::debug!(%err, "showing overlay without a hole");
            None
        });
        let (hole, visual) = self.cut_out(host, target);
        let _ = self
            .composition
            .attach_overlay(host, visual, self.popup_window);
        self.hole = Some(hole);
        if let Some(source) = self.tracks_popup_target() {
            let _ = self.sync.track(host, source, Purpose::TrackOverlay);
        }

        let policy = match &self.overlay {
            Some(spec) => spec.policy(self.motion_type),
            None => InteractionPolicy {
                motion: self.motion_type,
                ..InteractionPolicy::default()
            },
        };
        let dispatcher = InteractionDispatcher::new(policy, self.gesture_config);
        if let Some(spec) = &self.overlay
            && dispatcher.is_active(spec.listeners())
        {
            tracing::warn!("overlay taps are routed to listeners instead of advancing the tour");
        }
        self.dispatcher = Some(dispatcher);
        self.sync.mark_materialized();

        if self.pointer.is_some() {
            let probe = self.composition.attach_probe(host);
            let _ = self
                .sync
                .wait_once(host, LayoutSource::Layer(probe), Purpose::PointerProbe);
        }
        if self.popup_window {
            let surface = self.composition.popup_surface(host);
            let _ = self
                .sync
                .wait_once(host, LayoutSource::Surface(surface), Purpose::PopupHostReady);
        } else {
            self.show_tooltip(host);
        }
        tracing::debug!(target = ?self.target, popup = self.popup_window, "step shown");
    }

    fn tracks_popup_target(&self) -> Option<LayoutSource> {
        if !self.popup_window || !matches!(self.target, Some(Target::Element(_))) {
            return None;
        }
        self.composition.surface().map(LayoutSource::Surface)
    }

    fn show_tooltip(&mut self, host: &mut dyn ViewHost) {
        if self.tooltip.is_none() {
            return;
        }
        let anchor = match self.target_rect(host) {
            Ok(Some(rect)) => Anchor::Element(rect),
            Ok(None) => Anchor::Window,
            Err(err) => {
                tracing::debug!(%err, "tooltip not placed");
                return;
            }
        };
        let Some(spec) = self.tooltip.as_ref() else {
            return;
        };
        let offset = host.screen_metrics().scale(spec.offset_dp());
        let _ = self
            .composition
            .attach_tooltip(host, spec, anchor, offset, self.popup_window);
        if let Some(source) = self.tracks_popup_target() {
            let _ = self.sync.track(host, source, Purpose::TrackTooltip);
        }
    }

    fn show_pointer(&mut self, host: &mut dyn ViewHost) {
        let Some(spec) = self.pointer else {
            return;
        };
        let Some(size) = self.composition.take_probe_size(host) else {
            tracing::debug!("pointer probe has no size");
            return;
        };
        let metrics = host.screen_metrics();
        let rect = match self.target_rect(host) {
            Ok(rect) => rect.unwrap_or_else(|| metrics.bounds()),
            Err(err) => {
                tracing::debug!(%err, "pointer not placed");
                return;
            }
        };
        let position = place_pointer(spec.placement(), size, rect);
        if self
            .composition
            .attach_pointer(host, spec.tint(), position)
            .is_none()
        {
            return;
        }
        let enter = self
            .tooltip
            .as_ref()
            .map_or(Duration::ZERO, TooltipSpec::enter_duration);
        self.composition
            .animate_pointer(host, self.technique.choreography(&metrics, enter));
        if let Some(source) = self.tracks_popup_target() {
            let _ = self.sync.track(host, source, Purpose::TrackPointer);
        }
    }

    /// Handle a layout notice the host reported for `subscription`.
    ///
    /// Notices for subscriptions this guide no longer holds are ignored.
    pub fn on_layout(&mut self, host: &mut dyn ViewHost, subscription: SubscriptionId) {
        let Some(purpose) = self.sync.claim(subscription) else {
            tracing::trace!(?subscription, "ignoring stale layout notice");
            return;
        };
        match purpose {
            Purpose::TargetAttached => self.start(host),
            Purpose::PointerProbe => self.show_pointer(host),
            Purpose::PopupHostReady => self.show_tooltip(host),
            Purpose::TrackOverlay => self.follow_overlay(host, subscription),
            Purpose::TrackPointer => self.follow_pointer(host, subscription),
            Purpose::TrackTooltip => self.follow_tooltip(host, subscription),
        }
    }

    fn tracked_rect(&mut self, host: &mut dyn ViewHost, id: SubscriptionId) -> Option<PixelRect> {
        match self.target_rect(host) {
            Ok(Some(rect)) => Some(rect),
            Ok(None) => {
                self.sync.cancel(host, id);
                None
            }
            Err(err) => {
                tracing::debug!(%err, "stopped following target");
                self.sync.cancel(host, id);
                None
            }
        }
    }

    fn follow_overlay(&mut self, host: &mut dyn ViewHost, id: SubscriptionId) {
        if self.composition.overlay().is_none() {
            self.sync.cancel(host, id);
            return;
        }
        let Some(rect) = self.tracked_rect(host, id) else {
            return;
        };
        if !self.sync.observe(id, rect.origin()) {
            return;
        }
        let (hole, visual) = self.cut_out(host, Some(rect));
        let _ = self.composition.redraw_overlay(host, visual);
        self.hole = Some(hole);
        tracing::debug!(x = rect.x, y = rect.y, "hole follows target");
    }

    fn follow_tooltip(&mut self, host: &mut dyn ViewHost, id: SubscriptionId) {
        let (Some(layer), Some(spec)) = (self.composition.tooltip(), self.tooltip.as_ref()) else {
            self.sync.cancel(host, id);
            return;
        };
        let (gravity, offset_dp) = (spec.placement(), spec.offset_dp());
        let Some(rect) = self.tracked_rect(host, id) else {
            return;
        };
        if !self.sync.observe(id, rect.origin()) {
            return;
        }
        let Some(size) = host.layer_size(layer) else {
            return;
        };
        let container = host.container_size();
        let offset = host.screen_metrics().scale(offset_dp);
        let anchor = Anchor::Element(rect);
        let x = resolve_x(gravity, size.width, anchor, container.width, offset);
        let y = resolve_y(gravity, size.height, anchor, container.height, offset);
        let span = clamp_horizontal(
            HorizontalSpan {
                x,
                width: size.width,
                explicit_width: None,
            },
            container.width,
        );
        self.composition
            .move_tooltip(host, PixelPoint::new(span.x, y), self.popup_window);
        tracing::debug!(x = span.x, y, "tooltip follows target");
    }

    fn follow_pointer(&mut self, host: &mut dyn ViewHost, id: SubscriptionId) {
        let (Some(layer), Some(spec)) = (self.composition.pointer(), self.pointer) else {
            self.sync.cancel(host, id);
            return;
        };
        let Some(rect) = self.tracked_rect(host, id) else {
            return;
        };
        if !self.sync.observe(id, rect.origin()) {
            return;
        }
        let Some(size) = host.layer_size(layer) else {
            return;
        };
        let position = place_pointer(spec.placement(), size, rect);
        self.composition.move_pointer(host, position);
        tracing::debug!(x = position.x, y = position.y, "pointer follows target");
    }

    /// Swap the tooltip for `spec`. A visible tooltip is re-placed at once.
    pub fn replace_tooltip(&mut self, host: &mut dyn ViewHost, spec: TooltipSpec) {
        self.tooltip = Some(spec);
        if self.composition.tooltip().is_none() {
            return;
        }
        self.sync.cancel_purpose(host, Purpose::TrackTooltip);
        let _ = self.composition.detach_tooltip(host);
        self.show_tooltip(host);
    }

    /// Remove every layer and subscription of this step. Repeated calls do nothing.
    pub fn cleanup(&mut self, host: &mut dyn ViewHost) {
        let dropped = self.sync.dispose(host);
        let removed = self.composition.teardown(host);
        self.hole = None;
        self.dispatcher = None;
        if removed || dropped > 0 {
            tracing::debug!(dropped, "step cleaned up");
        }
    }

    /// Route a touch on the overlay. The host delivers the event per the returned response.
    pub fn on_touch(&mut self, host: &mut dyn ViewHost, event: &TouchEvent) -> Response {
        let (Some(hole), Some(dispatcher)) = (self.hole.as_ref(), self.dispatcher.as_mut()) else {
            return Response::Unhandled;
        };
        let mut none = OverlayListeners::default();
        let listeners = match self.overlay.as_mut() {
            Some(spec) => spec.listeners_mut(),
            None => &mut none,
        };
        let dispatched = dispatcher.handle(hole, listeners, event);
        self.finish(host, dispatched)
    }

    /// Fire a long press that timed out by `now`.
    pub fn poll_gestures(&mut self, host: &mut dyn ViewHost, now: Duration) -> Response {
        let (Some(hole), Some(dispatcher)) = (self.hole.as_ref(), self.dispatcher.as_mut()) else {
            return Response::Unhandled;
        };
        let mut none = OverlayListeners::default();
        let listeners = match self.overlay.as_mut() {
            Some(spec) => spec.listeners_mut(),
            None => &mut none,
        };
        let dispatched = dispatcher.poll(hole, listeners, now);
        self.finish(host, dispatched)
    }

    fn finish(&mut self, host: &mut dyn ViewHost, dispatched: Dispatched) -> Response {
        if dispatched.effect == Some(Effect::Cleanup) {
            tracing::debug!("tap outside cancelled the step");
            self.cleanup(host);
        }
        dispatched.response
    }

    /// The host saw a tap on the tooltip. Returns whether a handler ran.
    pub fn tooltip_clicked(&mut self) -> bool {
        if self.composition.tooltip().is_none() {
            return false;
        }
        self.tooltip.as_mut().is_some_and(TooltipSpec::click)
    }

    /// Advance animations by `dt`.
    pub fn tick(&mut self, host: &mut dyn ViewHost, dt: Duration) {
        self.composition.tick(host, dt);
    }

    /// Replace a field of the generated tooltip, animating out and in.
    ///
    /// Returns `false` when no generated tooltip is shown.
    pub fn update_text(
        &mut self,
        host: &mut dyn ViewHost,
        field: TextField,
        text: impl Into<String>,
        out: Option<Animation>,
        enter: Option<Animation>,
    ) -> bool {
        let Some(layer) = self.composition.generated_tooltip() else {
            return false;
        };
        self.composition
            .update_text(host, layer, field, text.into(), out, enter);
        true
    }

    /// Replace the tooltip title with short fades.
    pub fn update_title_text(&mut self, host: &mut dyn ViewHost, text: impl Into<String>) -> bool {
        self.update_text(
            host,
            TextField::Title,
            text,
            Some(Animation::fade(1.0, 0.0, TEXT_FADE)),
            Some(Animation::fade(0.0, 1.0, TEXT_FADE)),
        )
    }

    /// Replace the tooltip description with short fades.
    pub fn update_description_text(
        &mut self,
        host: &mut dyn ViewHost,
        text: impl Into<String>,
    ) -> bool {
        self.update_text(
            host,
            TextField::Description,
            text,
            Some(Animation::fade(1.0, 0.0, TEXT_FADE)),
            Some(Animation::fade(0.0, 1.0, TEXT_FADE)),
        )
    }
}
