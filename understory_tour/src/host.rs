// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between a walkthrough session and the toolkit that draws it.
//!
//! ## Overview
//!
//! A [`ViewHost`] owns the real view tree. The session never holds views, only opaque ids:
//! [`ElementId`] for the app's own elements, [`LayerId`] for layers the session asked the host
//! to create, [`SurfaceId`] for floating popup surfaces.
//!
//! Layout is asynchronous in every toolkit this targets. Instead of handing the host a
//! closure, the session asks for a [`SubscriptionId`] and the host later reports that id back
//! through [`TourGuide::on_layout`](crate::session::TourGuide::on_layout). Ids the session no
//! longer recognizes are ignored, so a notice queued before cleanup is harmless.
//!
//! ## Coordinates
//!
//! All positions are physical pixels in screen space. Layers attached with
//! [`ViewHost::attach_to_content`] are positioned relative to the content container, whose
//! top-left corner is [`ViewHost::content_origin`] on screen.

use kurbo::Vec2;
use understory_placement::hole::HoleShape;
use understory_placement::{PixelPoint, PixelRect, PixelSize};

use crate::spec::{Color, TextAlign};

/// An element of the host's own view tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// A layer created by the host on the session's behalf.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// A floating surface above the application window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// A pending layout subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// What a layout subscription watches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutSource {
    /// An element of the app.
    Element(ElementId),
    /// A session layer.
    Layer(LayerId),
    /// A floating surface.
    Surface(SurfaceId),
}

/// Screen size and density.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenMetrics {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Pixels per density-independent pixel.
    pub density: f32,
}

impl ScreenMetrics {
    /// Metrics for a screen of the given pixel size and density.
    pub const fn new(width: i32, height: i32, density: f32) -> Self {
        Self {
            width,
            height,
            density,
        }
    }

    /// Screen size.
    pub const fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// The whole screen as a rectangle at the origin.
    pub const fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// Convert density-independent pixels to pixels, truncating.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "dp values are small; truncation matches the toolkit's own conversion"
    )]
    pub fn scale(&self, dp: i32) -> i32 {
        (f64::from(dp) * f64::from(self.density)) as i32
    }

    /// Like [`ScreenMetrics::scale`] for fractional lengths.
    pub fn scale_f64(&self, dp: f64) -> f64 {
        dp * f64::from(self.density)
    }
}

/// One axis of a layer's layout size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Dimension {
    /// Size to content.
    #[default]
    Wrap,
    /// Fill the parent.
    Match,
    /// A fixed pixel size.
    Exact(i32),
}

/// Layout parameters for attaching a layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerFrame {
    /// Left margin in the parent.
    pub left: i32,
    /// Top margin in the parent.
    pub top: i32,
    /// Width.
    pub width: Dimension,
    /// Height.
    pub height: Dimension,
}

impl LayerFrame {
    /// A frame that fills its parent, shifted down by `top`.
    pub const fn fill(top: i32) -> Self {
        Self {
            left: 0,
            top,
            width: Dimension::Match,
            height: Dimension::Match,
        }
    }

    /// A content-sized frame at the given margins.
    pub const fn at(left: i32, top: i32) -> Self {
        Self {
            left,
            top,
            width: Dimension::Wrap,
            height: Dimension::Wrap,
        }
    }
}

/// The dimming overlay as it should be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayVisual {
    /// Dimming color.
    pub background: Color,
    /// Cut-out in overlay coordinates, if any.
    pub hole: Option<HoleShape>,
}

/// The generated tooltip layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipVisual {
    /// Title text; empty hides the field.
    pub title: String,
    /// Description text; empty hides the field.
    pub description: String,
    /// Card color.
    pub background: Color,
    /// Title color.
    pub title_color: Color,
    /// Description color.
    pub description_color: Color,
    /// Title alignment.
    pub title_align: TextAlign,
    /// Description alignment.
    pub description_align: TextAlign,
    /// Whether the card casts a shadow.
    pub shadow: bool,
}

/// What a new layer shows.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerContent {
    /// The dimming overlay.
    Overlay(OverlayVisual),
    /// An invisible copy of the pointer, attached only to learn its size.
    PointerProbe,
    /// The pointer drawn in the given color.
    Pointer {
        /// Tint.
        color: Color,
    },
    /// A generated tooltip.
    Tooltip(TooltipVisual),
    /// Content the app built itself.
    Custom,
}

/// A text field of a generated tooltip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextField {
    /// The title.
    Title,
    /// The description.
    Description,
}

/// What an animation frame applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// A whole layer.
    Layer(LayerId),
    /// One text field inside a tooltip layer.
    Text(LayerId, TextField),
}

/// Visual transform of a layer, relative to its laid-out position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Opacity in `0.0..=1.0`.
    pub alpha: f64,
    /// Uniform scale around the layer center.
    pub scale: f64,
    /// Translation in pixels.
    pub translation: Vec2,
}

impl Transform {
    /// Fully opaque, unscaled, untranslated.
    pub const IDENTITY: Self = Self {
        alpha: 1.0,
        scale: 1.0,
        translation: Vec2::ZERO,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Services a toolkit provides to a walkthrough session.
///
/// Implementations must tolerate [`ViewHost::unsubscribe`] and [`ViewHost::detach`] on ids
/// that are already gone. A one-shot subscription is dropped by the host once it fired.
pub trait ViewHost {
    /// Whether `element` is part of the view tree.
    fn is_attached(&self, element: ElementId) -> bool;

    /// Top-left corner of `element` on screen, once laid out.
    fn screen_location(&self, element: ElementId) -> Option<PixelPoint>;

    /// Measured size of `element`, once laid out.
    fn size(&self, element: ElementId) -> Option<PixelSize>;

    /// Current screen metrics.
    fn screen_metrics(&self) -> ScreenMetrics;

    /// Top-left corner of the content container on screen.
    fn content_origin(&self) -> PixelPoint;

    /// Size of the container tooltips are laid out in.
    fn container_size(&self) -> PixelSize;

    /// Report the returned id once `source` has completed its next layout pass.
    fn on_next_layout_ready(&mut self, source: LayoutSource) -> SubscriptionId;

    /// Report the returned id after every layout pass of `source` until unsubscribed.
    fn on_every_layout_change(&mut self, source: LayoutSource) -> SubscriptionId;

    /// Stop reporting `subscription`.
    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// Create a detached layer.
    fn create_layer(&mut self, content: LayerContent) -> LayerId;

    /// Measure `layer` with its width bounded by `max_width`.
    fn measure(&mut self, layer: LayerId, max_width: i32) -> PixelSize;

    /// Laid-out size of an attached layer.
    fn layer_size(&self, layer: LayerId) -> Option<PixelSize>;

    /// Attach `layer` to the content container.
    fn attach_to_content(&mut self, layer: LayerId, frame: LayerFrame);

    /// Attach `layer` as a child of `parent`.
    fn attach_to_layer(&mut self, parent: LayerId, layer: LayerId, frame: LayerFrame);

    /// Attach `layer` to a floating surface.
    fn attach_to_surface(&mut self, surface: SurfaceId, layer: LayerId, frame: LayerFrame);

    /// Move an attached layer without re-attaching it.
    fn set_margins(&mut self, layer: LayerId, left: i32, top: i32);

    /// Redraw an overlay layer with a new color and cut-out.
    fn update_overlay(&mut self, layer: LayerId, visual: OverlayVisual);

    /// Remove `layer` and its children from wherever they are attached.
    fn detach(&mut self, layer: LayerId);

    /// Open a full-screen floating surface above the application window.
    fn create_floating_surface(&mut self) -> SurfaceId;

    /// Close a floating surface and everything on it.
    fn destroy_floating_surface(&mut self, surface: SurfaceId);

    /// Apply an animation frame.
    fn apply_transform(&mut self, target: AnimationTarget, transform: Transform);

    /// Replace the text of a tooltip field.
    fn set_text(&mut self, layer: LayerId, field: TextField, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_truncates() {
        let m = ScreenMetrics::new(1080, 1920, 2.625);
        assert_eq!(m.scale(10), 26);
        assert_eq!(m.scale(0), 0);
        assert_eq!(ScreenMetrics::new(1000, 2000, 1.0).scale(10), 10);
    }

    #[test]
    fn bounds_cover_the_screen() {
        let m = ScreenMetrics::new(1000, 2000, 1.0);
        assert_eq!(m.bounds(), PixelRect::new(0, 0, 1000, 2000));
        assert_eq!(m.size(), PixelSize::new(1000, 2000));
    }
}
