// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step configuration: what the tooltip, pointer, and overlay look like and how they behave.
//!
//! Each spec is built once with a consuming builder and is read-only afterwards. Lengths are
//! density-independent pixels (dp) and are scaled with [`ScreenMetrics`] when a step is shown.
//!
//! ```
//! use understory_placement::Gravity;
//! use understory_placement::hole::HoleStyle;
//! use understory_tour::spec::{OverlaySpec, TooltipSpec};
//!
//! let tooltip = TooltipSpec::new()
//!     .title("Welcome")
//!     .description("Tap here to start")
//!     .gravity(Gravity::BOTTOM | Gravity::END)
//!     .width(-5);
//! assert_eq!(tooltip.fixed_width(), None);
//!
//! let overlay = OverlaySpec::new().style(HoleStyle::Rectangle).click_outside_to_cancel(true);
//! assert!(overlay.policy(Default::default()).click_outside_to_cancel);
//! ```

use core::fmt;
use core::time::Duration;

use kurbo::Vec2;
use understory_gesture::dispatcher::{InteractionPolicy, OverlayListeners};
use understory_gesture::types::TouchEvent;
use understory_placement::Gravity;
use understory_placement::hole::{HoleConfig, HoleStyle, MotionType};

use crate::animation::Animation;
use crate::error::TourError;
use crate::host::{LayerId, ScreenMetrics, TooltipVisual};

/// An ARGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self(0xFF_FF_FF_FF);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF_00_00_00);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// A color with alpha.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Alpha channel.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the shift leaves exactly one byte"
    )]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// Horizontal alignment of a tooltip text field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Leading edge.
    Start,
    /// Centered.
    #[default]
    Center,
    /// Trailing edge.
    End,
}

fn non_negative(value: i32, what: &'static str) -> Result<i32, TourError> {
    if value < 0 {
        Err(TourError::InvalidConfiguration(what))
    } else {
        Ok(value)
    }
}

/// The tooltip card shown next to the target.
pub struct TooltipSpec {
    title: String,
    description: String,
    background: Color,
    title_color: Color,
    description_color: Color,
    title_align: TextAlign,
    description_align: TextAlign,
    enter_animation: Option<Animation>,
    shadow: bool,
    width: Option<i32>,
    gravity: Gravity,
    offset: i32,
    custom_layer: Option<LayerId>,
    on_click: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for TooltipSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipSpec")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("background", &self.background)
            .field("title_color", &self.title_color)
            .field("description_color", &self.description_color)
            .field("title_align", &self.title_align)
            .field("description_align", &self.description_align)
            .field("enter_animation", &self.enter_animation)
            .field("shadow", &self.shadow)
            .field("width", &self.width)
            .field("gravity", &self.gravity)
            .field("offset", &self.offset)
            .field("custom_layer", &self.custom_layer)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Default for TooltipSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl TooltipSpec {
    /// Default card color.
    pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x34, 0x98, 0xdb);
    /// Default enter fade length.
    pub const DEFAULT_ENTER: Duration = Duration::from_millis(1000);
    /// Default target overlap in dp.
    pub const DEFAULT_OFFSET: i32 = 10;

    /// A centered blue card with white text that fades in.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            background: Self::DEFAULT_BACKGROUND,
            title_color: Color::WHITE,
            description_color: Color::WHITE,
            title_align: TextAlign::Center,
            description_align: TextAlign::Center,
            enter_animation: Some(Animation::fade(0.0, 1.0, Self::DEFAULT_ENTER)),
            shadow: true,
            width: None,
            gravity: Gravity::CENTER,
            offset: Self::DEFAULT_OFFSET,
            custom_layer: None,
            on_click: None,
        }
    }

    /// Title text.
    #[must_use]
    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = text.into();
        self
    }

    /// Description text.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Card color.
    #[must_use]
    pub fn background_color(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Title color.
    #[must_use]
    pub fn title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Description color.
    #[must_use]
    pub fn description_color(mut self, color: Color) -> Self {
        self.description_color = color;
        self
    }

    /// Title alignment.
    #[must_use]
    pub fn title_align(mut self, align: TextAlign) -> Self {
        self.title_align = align;
        self
    }

    /// Description alignment.
    #[must_use]
    pub fn description_align(mut self, align: TextAlign) -> Self {
        self.description_align = align;
        self
    }

    /// Animation played when the card appears; `None` shows it at once.
    #[must_use]
    pub fn enter_animation(mut self, animation: Option<Animation>) -> Self {
        self.enter_animation = animation;
        self
    }

    /// Whether the card casts a shadow.
    #[must_use]
    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Fixed card width in pixels. Negative values are ignored and keep the width automatic.
    #[must_use]
    pub fn width(mut self, px: i32) -> Self {
        match non_negative(px, "tooltip width must not be negative") {
            Ok(px) => self.width = Some(px),
            Err(err) => tracing::debug!(px, %err, "keeping automatic tooltip width"),
        }
        self
    }

    /// Where the card goes relative to the target.
    #[must_use]
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Overlap between card and target, in dp.
    #[must_use]
    pub fn offset(mut self, dp: i32) -> Self {
        self.offset = dp;
        self
    }

    /// Show a host layer of your own instead of the generated card.
    #[must_use]
    pub fn custom_layer(mut self, layer: LayerId) -> Self {
        self.custom_layer = Some(layer);
        self
    }

    /// Called when the card is tapped.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Title text.
    pub fn title_text(&self) -> &str {
        &self.title
    }

    /// Description text.
    pub fn description_text(&self) -> &str {
        &self.description
    }

    /// Fixed width, if any.
    pub fn fixed_width(&self) -> Option<i32> {
        self.width
    }

    /// Placement gravity.
    pub fn placement(&self) -> Gravity {
        self.gravity
    }

    /// Overlap in dp.
    pub fn offset_dp(&self) -> i32 {
        self.offset
    }

    /// Custom layer, if any.
    pub fn custom(&self) -> Option<LayerId> {
        self.custom_layer
    }

    /// Enter animation, if any.
    pub fn enter(&self) -> Option<&Animation> {
        self.enter_animation.as_ref()
    }

    /// Length of the enter animation, or zero.
    pub fn enter_duration(&self) -> Duration {
        self.enter_animation
            .as_ref()
            .map_or(Duration::ZERO, Animation::duration)
    }

    pub(crate) fn visual(&self) -> TooltipVisual {
        TooltipVisual {
            title: self.title.clone(),
            description: self.description.clone(),
            background: self.background,
            title_color: self.title_color,
            description_color: self.description_color,
            title_align: self.title_align,
            description_align: self.description_align,
            shadow: self.shadow,
        }
    }

    pub(crate) fn click(&mut self) -> bool {
        match self.on_click.as_mut() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }
}

/// The animated pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerSpec {
    color: Color,
    gravity: Gravity,
}

impl Default for PointerSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSpec {
    /// A white pointer centered on the target.
    pub const fn new() -> Self {
        Self {
            color: Color::WHITE,
            gravity: Gravity::CENTER,
        }
    }

    /// Tint.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Where on the target the pointer sits. Horizontal placement reads `LEFT`/`RIGHT`.
    #[must_use]
    pub const fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Tint.
    pub const fn tint(&self) -> Color {
        self.color
    }

    /// Placement gravity.
    pub const fn placement(&self) -> Gravity {
        self.gravity
    }
}

/// The dimming overlay, its hole, and its input policy.
#[derive(Debug)]
pub struct OverlaySpec {
    background: Color,
    style: HoleStyle,
    padding: i32,
    radius: Option<i32>,
    offset: (i32, i32),
    corner_radius: i32,
    disable_click_through: bool,
    disable_interact_with_target: bool,
    click_outside_to_cancel: bool,
    listeners: OverlayListeners,
}

impl Default for OverlaySpec {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySpec {
    /// Default dimming color.
    pub const DEFAULT_BACKGROUND: Color = Color::argb(0x55, 0, 0, 0);
    /// Default hole padding in dp.
    pub const DEFAULT_PADDING: i32 = 10;

    /// A translucent black overlay with a circular hole.
    pub fn new() -> Self {
        Self {
            background: Self::DEFAULT_BACKGROUND,
            style: HoleStyle::Circle,
            padding: Self::DEFAULT_PADDING,
            radius: None,
            offset: (0, 0),
            corner_radius: 0,
            disable_click_through: false,
            disable_interact_with_target: false,
            click_outside_to_cancel: false,
            listeners: OverlayListeners::default(),
        }
    }

    /// Dimming color.
    #[must_use]
    pub fn background_color(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Hole shape.
    #[must_use]
    pub fn style(mut self, style: HoleStyle) -> Self {
        self.style = style;
        self
    }

    /// Space between target and hole edge, in dp. Negative values are ignored.
    #[must_use]
    pub fn hole_padding(mut self, dp: i32) -> Self {
        match non_negative(dp, "hole padding must not be negative") {
            Ok(dp) => self.padding = dp,
            Err(err) => tracing::debug!(dp, %err, "keeping hole padding"),
        }
        self
    }

    /// Circle radius in dp, replacing the size derived from the target.
    #[must_use]
    pub fn hole_radius(mut self, dp: i32) -> Self {
        match non_negative(dp, "hole radius must not be negative") {
            Ok(dp) => self.radius = Some(dp),
            Err(err) => tracing::debug!(dp, %err, "keeping derived hole radius"),
        }
        self
    }

    /// Shift the hole relative to the target, in dp.
    #[must_use]
    pub fn hole_offset(mut self, dx: i32, dy: i32) -> Self {
        self.offset = (dx, dy);
        self
    }

    /// Corner radius for [`HoleStyle::RoundedRectangle`], in dp.
    #[must_use]
    pub fn rounded_corner_radius(mut self, dp: i32) -> Self {
        self.corner_radius = dp;
        self
    }

    /// Swallow touches outside the hole instead of letting the overlay handle them.
    #[must_use]
    pub fn disable_click_through(mut self, disable: bool) -> Self {
        self.disable_click_through = disable;
        self
    }

    /// Swallow touches on the target instead of passing them through the hole.
    #[must_use]
    pub fn disable_interact_with_target(mut self, disable: bool) -> Self {
        self.disable_interact_with_target = disable;
        self
    }

    /// End the step when the user taps outside the target.
    #[must_use]
    pub fn click_outside_to_cancel(mut self, cancel: bool) -> Self {
        self.click_outside_to_cancel = cancel;
        self
    }

    /// Called on a tap on the target.
    #[must_use]
    pub fn on_click_target(mut self, f: impl FnMut() + 'static) -> Self {
        self.listeners.on_click_target = Some(Box::new(f));
        self
    }

    /// Called on a long press on the target.
    #[must_use]
    pub fn on_long_click_target(mut self, f: impl FnMut() + 'static) -> Self {
        self.listeners.on_long_click_target = Some(Box::new(f));
        self
    }

    /// Sees every raw touch on the target first; return `true` to consume it.
    #[must_use]
    pub fn on_touch_target(mut self, f: impl FnMut(&TouchEvent) -> bool + 'static) -> Self {
        self.listeners.on_touch_target = Some(Box::new(f));
        self
    }

    /// Called on a tap outside the target.
    #[must_use]
    pub fn on_click_outside(mut self, f: impl FnMut() + 'static) -> Self {
        self.listeners.on_click_outside = Some(Box::new(f));
        self
    }

    /// Replaces the default cleanup when tapping outside cancels the step.
    #[must_use]
    pub fn on_cancel_outside(mut self, f: impl FnMut() + 'static) -> Self {
        self.listeners.on_cancel_outside = Some(Box::new(f));
        self
    }

    /// Dimming color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Hole shape.
    pub fn hole_style(&self) -> HoleStyle {
        self.style
    }

    /// Hole geometry in pixels for `screen`.
    pub fn hole_config(&self, screen: &ScreenMetrics) -> HoleConfig {
        HoleConfig {
            style: self.style,
            padding: screen.scale_f64(f64::from(self.padding)),
            radius: self.radius.map(|r| screen.scale_f64(f64::from(r))),
            offset: Vec2::new(
                screen.scale_f64(f64::from(self.offset.0)),
                screen.scale_f64(f64::from(self.offset.1)),
            ),
            corner_radius: screen.scale_f64(f64::from(self.corner_radius)),
        }
    }

    /// Routing flags combined with the session's motion type.
    pub fn policy(&self, motion: MotionType) -> InteractionPolicy {
        InteractionPolicy {
            motion,
            disable_click_through: self.disable_click_through,
            disable_interact_with_target: self.disable_interact_with_target,
            click_outside_to_cancel: self.click_outside_to_cancel,
        }
    }

    pub(crate) fn listeners_mut(&mut self) -> &mut OverlayListeners {
        &mut self.listeners
    }

    pub(crate) fn listeners(&self) -> &OverlayListeners {
        &self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_defaults() {
        let t = TooltipSpec::new();
        assert_eq!(t.placement(), Gravity::CENTER);
        assert_eq!(t.offset_dp(), 10);
        assert_eq!(t.fixed_width(), None);
        assert_eq!(t.enter_duration(), Duration::from_millis(1000));
        let v = t.visual();
        assert_eq!(v.background, Color(0xFF_34_98_DB));
        assert_eq!(v.title_color, Color::WHITE);
        assert_eq!(v.title_align, TextAlign::Center);
        assert!(v.shadow, "shadow is on by default");
    }

    #[test]
    fn negative_width_keeps_previous_value() {
        assert_eq!(TooltipSpec::new().width(-1).fixed_width(), None);
        assert_eq!(TooltipSpec::new().width(300).width(-1).fixed_width(), Some(300));
        assert_eq!(TooltipSpec::new().width(0).fixed_width(), Some(0));
    }

    #[test]
    fn no_enter_animation_means_no_delay() {
        let t = TooltipSpec::new().enter_animation(None);
        assert_eq!(t.enter_duration(), Duration::ZERO);
    }

    #[test]
    fn tooltip_click_reports_whether_handled() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut t = TooltipSpec::new().on_click(move || h.set(h.get() + 1));
        assert!(t.click(), "handler registered");
        assert_eq!(hits.get(), 1);
        assert!(!TooltipSpec::new().click(), "no handler");
    }

    #[test]
    fn overlay_scales_hole_geometry() {
        let o = OverlaySpec::new()
            .style(HoleStyle::RoundedRectangle)
            .hole_padding(4)
            .hole_radius(30)
            .hole_offset(2, -2)
            .rounded_corner_radius(8);
        let c = o.hole_config(&ScreenMetrics::new(1000, 2000, 2.0));
        assert_eq!(c.style, HoleStyle::RoundedRectangle);
        assert_eq!(c.padding, 8.0);
        assert_eq!(c.radius, Some(60.0));
        assert_eq!(c.offset, Vec2::new(4.0, -4.0));
        assert_eq!(c.corner_radius, 16.0);
    }

    #[test]
    fn overlay_defaults() {
        let o = OverlaySpec::new().hole_padding(-3).hole_radius(-1);
        assert_eq!(o.background(), Color(0x55_00_00_00));
        let c = o.hole_config(&ScreenMetrics::new(1000, 2000, 1.0));
        assert_eq!(c.style, HoleStyle::Circle);
        assert_eq!(c.padding, 10.0);
        assert_eq!(c.radius, None);
        assert!(!o.listeners().has_target_listeners(), "no listeners by default");
    }

    #[test]
    fn policy_carries_flags_and_motion() {
        let p = OverlaySpec::new()
            .disable_click_through(true)
            .disable_interact_with_target(true)
            .policy(MotionType::SwipeOnly);
        assert_eq!(p.motion, MotionType::SwipeOnly);
        assert!(p.disable_click_through, "flag carried");
        assert!(p.disable_interact_with_target, "flag carried");
        assert!(!p.click_outside_to_cancel, "flag left off");
    }

    #[test]
    fn color_channels() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56), Color(0xFF_12_34_56));
        assert_eq!(Color::argb(0x55, 0, 0, 0).alpha(), 0x55);
        assert_eq!(Color::TRANSPARENT.alpha(), 0);
    }
}
