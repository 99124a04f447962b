// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout synchronization: which host notices a step is waiting for, and why.
//!
//! ## Overview
//!
//! Geometry can only be computed once the host has laid things out. [`LayoutSync`] records
//! every subscription the session holds together with its [`Purpose`], so that when the host
//! reports a [`SubscriptionId`] the session knows what to do next, and so that cleanup can
//! cancel everything at once.
//!
//! A notice is only acted on if its id is still pending. Once [`LayoutSync::dispose`] ran,
//! or a one-shot notice was claimed, the same id is ignored.
//!
//! ## States
//!
//! [`SyncState`] is derived from the pending set rather than stored:
//!
//! - `Idle`: nothing shown, nothing pending.
//! - `AwaitingAttachment`: the target element is not in the view tree yet.
//! - `AwaitingFirstLayout`: the overlay is up; the pointer probe or popup host has not laid
//!   out yet.
//! - `Ready`: everything is placed and nothing is watched.
//! - `Tracking`: placed, and following the target through later layout passes.
//! - `Disposed`: torn down.

use understory_placement::PixelPoint;

use crate::host::{LayoutSource, SubscriptionId, ViewHost};

/// Lifecycle of one shown step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing shown or pending.
    Idle,
    /// Waiting for the target element to attach.
    AwaitingAttachment,
    /// Overlay shown; pointer probe or popup host still waiting for layout.
    AwaitingFirstLayout,
    /// Fully placed.
    Ready,
    /// Fully placed and following the target.
    Tracking,
    /// Torn down.
    Disposed,
}

/// Why a subscription exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Purpose {
    /// The target element attached.
    TargetAttached,
    /// The pointer probe laid out and has a size.
    PointerProbe,
    /// The popup surface laid out and can host the tooltip.
    PopupHostReady,
    /// Re-cut the hole after a layout pass.
    TrackOverlay,
    /// Re-place the pointer after a layout pass.
    TrackPointer,
    /// Re-place the tooltip after a layout pass.
    TrackTooltip,
}

impl Purpose {
    fn is_first_layout(self) -> bool {
        matches!(self, Self::PointerProbe | Self::PopupHostReady)
    }
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    id: SubscriptionId,
    purpose: Purpose,
    repeating: bool,
    last_seen: Option<PixelPoint>,
}

/// Pending subscriptions of one session.
#[derive(Clone, Debug, Default)]
pub struct LayoutSync {
    pending: Vec<Pending>,
    materialized: bool,
    disposed: bool,
}

impl LayoutSync {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SyncState {
        if self.disposed {
            SyncState::Disposed
        } else if self.has(Purpose::TargetAttached) {
            SyncState::AwaitingAttachment
        } else if !self.materialized {
            SyncState::Idle
        } else if self.pending.iter().any(|p| p.purpose.is_first_layout()) {
            SyncState::AwaitingFirstLayout
        } else if self.pending.iter().any(|p| p.repeating) {
            SyncState::Tracking
        } else {
            SyncState::Ready
        }
    }

    /// Number of subscriptions still held.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a subscription for `purpose` is pending.
    pub fn has(&self, purpose: Purpose) -> bool {
        self.pending.iter().any(|p| p.purpose == purpose)
    }

    /// Start a fresh showing.
    pub(crate) fn begin(&mut self) {
        self.disposed = false;
        self.materialized = false;
    }

    /// The overlay is attached.
    pub(crate) fn mark_materialized(&mut self) {
        self.materialized = true;
    }

    /// Subscribe once to the next layout of `source`.
    pub(crate) fn wait_once(
        &mut self,
        host: &mut dyn ViewHost,
        source: LayoutSource,
        purpose: Purpose,
    ) -> SubscriptionId {
        let id = host.on_next_layout_ready(source);
        tracing::debug!(?id, ?source, ?purpose, "waiting for layout");
        self.pending.push(Pending {
            id,
            purpose,
            repeating: false,
            last_seen: None,
        });
        id
    }

    /// Subscribe to every layout of `source`.
    pub(crate) fn track(
        &mut self,
        host: &mut dyn ViewHost,
        source: LayoutSource,
        purpose: Purpose,
    ) -> SubscriptionId {
        let id = host.on_every_layout_change(source);
        tracing::debug!(?id, ?source, ?purpose, "tracking layout");
        self.pending.push(Pending {
            id,
            purpose,
            repeating: true,
            last_seen: None,
        });
        id
    }

    /// Resolve a host notice to its purpose.
    ///
    /// One-shot subscriptions are consumed. Unknown ids yield `None`.
    pub(crate) fn claim(&mut self, id: SubscriptionId) -> Option<Purpose> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        let entry = self.pending[index];
        if !entry.repeating {
            self.pending.remove(index);
        }
        Some(entry.purpose)
    }

    /// Record the target position seen by a tracking subscription.
    ///
    /// Returns `true` when it differs from the previous observation.
    pub(crate) fn observe(&mut self, id: SubscriptionId, position: PixelPoint) -> bool {
        let Some(entry) = self.pending.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if entry.last_seen == Some(position) {
            return false;
        }
        entry.last_seen = Some(position);
        true
    }

    /// Drop one subscription.
    pub(crate) fn cancel(&mut self, host: &mut dyn ViewHost, id: SubscriptionId) {
        if let Some(index) = self.pending.iter().position(|p| p.id == id) {
            self.pending.remove(index);
            host.unsubscribe(id);
            tracing::debug!(?id, "dropped layout subscription");
        }
    }

    /// Drop every subscription held for `purpose`.
    pub(crate) fn cancel_purpose(&mut self, host: &mut dyn ViewHost, purpose: Purpose) {
        self.pending.retain(|p| {
            if p.purpose == purpose {
                host.unsubscribe(p.id);
                false
            } else {
                true
            }
        });
    }

    /// Unsubscribe everything and enter `Disposed`. Returns how many were dropped.
    pub fn dispose(&mut self, host: &mut dyn ViewHost) -> usize {
        let dropped = self.pending.len();
        for p in self.pending.drain(..) {
            host.unsubscribe(p.id);
        }
        self.disposed = true;
        self.materialized = false;
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementId, LayerId, ScreenMetrics, SurfaceId};
    use crate::testing::RecordingHost;

    fn host() -> RecordingHost {
        RecordingHost::new(ScreenMetrics::new(1000, 2000, 1.0))
    }

    #[test]
    fn states_follow_pending_purposes() {
        let mut h = host();
        let mut s = LayoutSync::new();
        assert_eq!(s.state(), SyncState::Idle);

        let attach = s.wait_once(
            &mut h,
            LayoutSource::Element(ElementId(1)),
            Purpose::TargetAttached,
        );
        assert_eq!(s.state(), SyncState::AwaitingAttachment);
        assert_eq!(s.claim(attach), Some(Purpose::TargetAttached));

        s.mark_materialized();
        let probe = s.wait_once(&mut h, LayoutSource::Layer(LayerId(1)), Purpose::PointerProbe);
        assert_eq!(s.state(), SyncState::AwaitingFirstLayout);
        assert_eq!(s.claim(probe), Some(Purpose::PointerProbe));
        assert_eq!(s.state(), SyncState::Ready);

        let track = s.track(&mut h, LayoutSource::Surface(SurfaceId(1)), Purpose::TrackTooltip);
        assert_eq!(s.state(), SyncState::Tracking);
        assert_eq!(s.claim(track), Some(Purpose::TrackTooltip));
        assert_eq!(s.claim(track), Some(Purpose::TrackTooltip), "repeating stays pending");
    }

    #[test]
    fn one_shot_notices_are_consumed() {
        let mut h = host();
        let mut s = LayoutSync::new();
        let id = s.wait_once(&mut h, LayoutSource::Layer(LayerId(1)), Purpose::PointerProbe);
        assert_eq!(s.claim(id), Some(Purpose::PointerProbe));
        assert_eq!(s.claim(id), None);
        assert_eq!(s.claim(SubscriptionId(999)), None);
    }

    #[test]
    fn dispose_unsubscribes_everything_once() {
        let mut h = host();
        let mut s = LayoutSync::new();
        let a = s.wait_once(&mut h, LayoutSource::Layer(LayerId(1)), Purpose::PointerProbe);
        let _ = s.track(&mut h, LayoutSource::Surface(SurfaceId(2)), Purpose::TrackPointer);
        assert_eq!(h.subscription_count(), 2);

        assert_eq!(s.dispose(&mut h), 2);
        assert_eq!(h.subscription_count(), 0);
        assert_eq!(s.state(), SyncState::Disposed);
        assert_eq!(s.claim(a), None, "queued notices are ignored after dispose");

        assert_eq!(s.dispose(&mut h), 0, "second dispose is a no-op");
        assert_eq!(s.state(), SyncState::Disposed);
    }

    #[test]
    fn observe_reports_only_changes() {
        let mut h = host();
        let mut s = LayoutSync::new();
        let id = s.track(&mut h, LayoutSource::Surface(SurfaceId(1)), Purpose::TrackTooltip);
        assert!(s.observe(id, PixelPoint::new(10, 10)), "first sighting");
        assert!(!s.observe(id, PixelPoint::new(10, 10)), "unchanged");
        assert!(s.observe(id, PixelPoint::new(10, 40)), "moved");
        assert!(!s.observe(SubscriptionId(77), PixelPoint::new(0, 0)), "unknown id");
    }

    #[test]
    fn cancel_purpose_keeps_the_rest() {
        let mut h = host();
        let mut s = LayoutSync::new();
        s.mark_materialized();
        let _ = s.track(&mut h, LayoutSource::Surface(SurfaceId(1)), Purpose::TrackTooltip);
        let pointer = s.track(&mut h, LayoutSource::Surface(SurfaceId(1)), Purpose::TrackPointer);
        s.cancel_purpose(&mut h, Purpose::TrackTooltip);
        assert!(!s.has(Purpose::TrackTooltip), "tooltip tracking dropped");
        assert!(s.has(Purpose::TrackPointer), "pointer tracking kept");
        assert_eq!(h.subscription_count(), 1);
        s.cancel(&mut h, pointer);
        assert_eq!(s.state(), SyncState::Ready);
        assert_eq!(h.subscription_count(), 0);
    }
}
