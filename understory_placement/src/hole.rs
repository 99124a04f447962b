// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spotlight hole geometry: the cut-out region of a dimming overlay.
//!
//! ## Overview
//!
//! A [`HoleOverlay`] covers its frame (normally the whole screen) and optionally cuts a
//! [`HoleShape`] around a target rectangle. Both are in the same coordinate space as the
//! pointer events that will be tested against them.
//!
//! - [`HoleOverlay::is_within_target`] classifies a point as on or off the target.
//! - [`HoleOverlay::passes_through`] additionally asks whether the gesture kind may reach
//!   the element beneath, according to a [`MotionType`].

use kurbo::{Circle, Point, Rect, RoundedRect, Shape, Vec2};

/// How the hole around the target is drawn and hit-tested.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HoleStyle {
    /// A circle around the target.
    #[default]
    Circle,
    /// The target rectangle grown by the padding.
    Rectangle,
    /// Like [`HoleStyle::Rectangle`] with rounded corners.
    RoundedRectangle,
    /// No cut-out; the overlay dims the target too.
    NoHole,
}

/// Which gestures may pass through the hole to the target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MotionType {
    /// Taps and swipes.
    #[default]
    AllowAll,
    /// Taps only.
    ClickOnly,
    /// Swipes only.
    SwipeOnly,
}

/// Coarse classification of an in-progress gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionKind {
    /// The pointer stayed within the touch slop.
    Tap,
    /// The pointer moved beyond the touch slop.
    Swipe,
}

impl MotionType {
    /// Whether a gesture of `kind` is allowed through.
    pub fn permits(self, kind: MotionKind) -> bool {
        match self {
            Self::AllowAll => true,
            Self::ClickOnly => kind == MotionKind::Tap,
            Self::SwipeOnly => kind == MotionKind::Swipe,
        }
    }
}

/// Parameters for building a hole around a target.
///
/// Lengths are in pixels; callers working in density-independent units scale first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoleConfig {
    /// Shape of the cut-out.
    pub style: HoleStyle,
    /// Extra space between the target and the hole edge.
    pub padding: f64,
    /// Circle radius override. When `None`, half the larger target side plus padding.
    pub radius: Option<f64>,
    /// Translation applied to the hole relative to the target.
    pub offset: Vec2,
    /// Corner radius for [`HoleStyle::RoundedRectangle`].
    pub corner_radius: f64,
}

impl Default for HoleConfig {
    fn default() -> Self {
        Self {
            style: HoleStyle::Circle,
            padding: 0.0,
            radius: None,
            offset: Vec2::ZERO,
            corner_radius: 0.0,
        }
    }
}

/// The concrete cut-out shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HoleShape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rectangle with rounded corners.
    RoundedRect(RoundedRect),
    /// Circle.
    Circle(Circle),
}

impl HoleShape {
    /// Build the shape for `target` under `config`, or `None` for [`HoleStyle::NoHole`].
    pub fn around(target: Rect, config: &HoleConfig) -> Option<Self> {
        let grown = target.inflate(config.padding, config.padding) + config.offset;
        match config.style {
            HoleStyle::NoHole => None,
            HoleStyle::Rectangle => Some(Self::Rect(grown)),
            HoleStyle::RoundedRectangle => Some(Self::RoundedRect(RoundedRect::from_rect(
                grown,
                config.corner_radius,
            ))),
            HoleStyle::Circle => {
                let radius = config
                    .radius
                    .unwrap_or_else(|| target.width().max(target.height()) / 2.0 + config.padding);
                Some(Self::Circle(Circle::new(
                    target.center() + config.offset,
                    radius,
                )))
            }
        }
    }

    /// Whether `pt` lies inside the shape.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.contains(pt),
            Self::RoundedRect(r) => r.contains(pt),
            Self::Circle(c) => c.contains(pt),
        }
    }

    /// Axis-aligned bounds of the shape.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::RoundedRect(r) => r.rect(),
            Self::Circle(c) => c.bounding_box(),
        }
    }
}

/// A dimming overlay with an optional hole around a target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoleOverlay {
    frame: Rect,
    target: Option<Rect>,
    hole: Option<HoleShape>,
}

impl HoleOverlay {
    /// Create an overlay covering `frame`.
    ///
    /// Without a target there is no hole and nothing is ever on target.
    pub fn new(frame: Rect, target: Option<Rect>, config: &HoleConfig) -> Self {
        let hole = target.and_then(|t| HoleShape::around(t, config));
        Self {
            frame,
            target,
            hole,
        }
    }

    /// The area covered by the overlay.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The target rectangle, if any.
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    /// The cut-out shape, if any.
    pub fn hole(&self) -> Option<&HoleShape> {
        self.hole.as_ref()
    }

    /// Whether `pt` is on the highlighted target.
    ///
    /// Uses the hole shape when there is one; a [`HoleStyle::NoHole`] overlay still reports
    /// hits on the bare target rectangle so target listeners keep working.
    pub fn is_within_target(&self, pt: Point) -> bool {
        match (&self.hole, self.target) {
            (Some(hole), _) => hole.contains(pt),
            (None, Some(target)) => target.contains(pt),
            (None, None) => false,
        }
    }

    /// Whether a gesture of `kind` at `pt` should reach the element under the hole.
    pub fn passes_through(&self, pt: Point, kind: MotionKind, motion: MotionType) -> bool {
        self.hole.as_ref().is_some_and(|h| h.contains(pt)) && motion.permits(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 1000.0, 2000.0);
    const TARGET: Rect = Rect::new(100.0, 100.0, 150.0, 150.0);

    fn config(style: HoleStyle) -> HoleConfig {
        HoleConfig {
            style,
            padding: 10.0,
            corner_radius: 6.0,
            ..Default::default()
        }
    }

    #[test]
    fn circle_radius_defaults_to_half_side_plus_padding() {
        let shape = HoleShape::around(TARGET, &config(HoleStyle::Circle)).unwrap();
        let HoleShape::Circle(c) = shape else {
            panic!("expected circle, got {shape:?}");
        };
        assert_eq!(c.center, Point::new(125.0, 125.0));
        assert_eq!(c.radius, 35.0);
    }

    #[test]
    fn explicit_radius_and_offset() {
        let cfg = HoleConfig {
            radius: Some(5.0),
            offset: Vec2::new(100.0, 0.0),
            ..config(HoleStyle::Circle)
        };
        let overlay = HoleOverlay::new(SCREEN, Some(TARGET), &cfg);
        assert!(!overlay.is_within_target(Point::new(125.0, 125.0)));
        assert!(overlay.is_within_target(Point::new(225.0, 125.0)));
    }

    #[test]
    fn rectangle_hole_includes_padding() {
        let overlay = HoleOverlay::new(SCREEN, Some(TARGET), &config(HoleStyle::Rectangle));
        assert!(overlay.is_within_target(Point::new(95.0, 95.0)));
        assert!(!overlay.is_within_target(Point::new(85.0, 95.0)));
        assert_eq!(
            overlay.hole().map(HoleShape::bounding_box),
            Some(Rect::new(90.0, 90.0, 160.0, 160.0))
        );
    }

    #[test]
    fn rounded_corners_exclude_the_corner_point() {
        let cfg = HoleConfig {
            corner_radius: 20.0,
            ..config(HoleStyle::RoundedRectangle)
        };
        let overlay = HoleOverlay::new(SCREEN, Some(TARGET), &cfg);
        assert!(!overlay.is_within_target(Point::new(90.5, 90.5)));
        assert!(overlay.is_within_target(Point::new(125.0, 91.0)));
    }

    #[test]
    fn every_style_contains_center_and_not_far_points() {
        for style in [
            HoleStyle::Circle,
            HoleStyle::Rectangle,
            HoleStyle::RoundedRectangle,
            HoleStyle::NoHole,
        ] {
            let overlay = HoleOverlay::new(SCREEN, Some(TARGET), &config(style));
            assert!(overlay.is_within_target(TARGET.center()), "{style:?}");
            assert!(
                !overlay.is_within_target(Point::new(5000.0, -5000.0)),
                "{style:?}"
            );
        }
    }

    #[test]
    fn no_hole_never_passes_through() {
        let overlay = HoleOverlay::new(SCREEN, Some(TARGET), &config(HoleStyle::NoHole));
        assert!(overlay.hole().is_none());
        assert!(!overlay.passes_through(TARGET.center(), MotionKind::Tap, MotionType::AllowAll));
    }

    #[test]
    fn absent_target_has_no_hole() {
        let overlay = HoleOverlay::new(SCREEN, None, &config(HoleStyle::Circle));
        assert!(overlay.target().is_none());
        assert!(!overlay.is_within_target(SCREEN.center()));
        assert!(!overlay.passes_through(SCREEN.center(), MotionKind::Tap, MotionType::AllowAll));
    }

    #[test]
    fn motion_type_gates_pass_through() {
        let overlay = HoleOverlay::new(SCREEN, Some(TARGET), &config(HoleStyle::Rectangle));
        let c = TARGET.center();
        assert!(overlay.passes_through(c, MotionKind::Tap, MotionType::ClickOnly));
        assert!(!overlay.passes_through(c, MotionKind::Swipe, MotionType::ClickOnly));
        assert!(overlay.passes_through(c, MotionKind::Swipe, MotionType::SwipeOnly));
        assert!(!overlay.passes_through(c, MotionKind::Tap, MotionType::SwipeOnly));
        assert!(overlay.passes_through(c, MotionKind::Swipe, MotionType::AllowAll));
    }
}
