// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The widget record and its tagged-variant `kind` (component D).

use num_enum::{IntoPrimitive, TryFromPrimitive};
use smallvec::SmallVec;

use super::anchor::{Anchor, AnchorType, Axis};

/// A small interned handle to an arena-owned widget.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct WidgetId(pub(crate) u32);

impl WidgetId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a widget's extent along one axis is determined.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum DimensionBehavior {
    #[default]
    Fixed,
    WrapContent,
    MatchConstraint,
    MatchParent,
}

/// Bit-exact with the source's wire values (§6).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Visibility {
    #[default]
    Visible = 0,
    Invisible = 4,
    Gone = 8,
}

/// Bit-exact with the source's wire values (§6).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ChainStyle {
    #[default]
    Spread = 0,
    SpreadInside = 1,
    Packed = 2,
}

/// Bit-exact with the source's wire values (§6). `RatioResolved` is an
/// internal transient the compiler produces while resolving a two-sided
/// MATCH_CONSTRAINT ratio; it is never observed coming back out through the
/// public setter (see the Open Question decision in the design notes).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MatchConstraintDefault {
    #[default]
    Spread = 0,
    Wrap = 1,
    Percent = 2,
    Ratio = 3,
    RatioResolved = 4,
}

/// A parsed dimension-ratio string (§6 grammar).
///
/// `explicit_axis` is `Some` only when the string carried a `W,`/`H,`
/// prefix; when absent, the compiler picks the driven axis from the
/// widget's own dimension behaviors (§4.4).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DimensionRatio {
    /// width / height, or the numerator / denominator of an explicit pair.
    pub ratio: f64,
    pub explicit_axis: Option<Axis>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GuidelineOrientation {
    Horizontal,
    Vertical,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum GuidelineRelative {
    Begin(i32),
    End(i32),
    Percent(f32),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BarrierSide {
    Max,
    Min,
}

/// Tagged variant replacing the source's polymorphic widget subclasses
/// (Normal widget, Guideline, Barrier, other Helper kinds) per the
/// arena-and-tag reshaping: the compiler dispatches on this tag rather than
/// on a virtual method table.
#[derive(Clone, Debug)]
pub enum WidgetKind {
    Normal,
    Guideline {
        orientation: GuidelineOrientation,
        relative: GuidelineRelative,
    },
    Barrier {
        axis: super::anchor::Axis,
        side: BarrierSide,
        referenced: SmallVec<[WidgetId; 4]>,
    },
    /// A non-measuring, non-drawing helper with no constraint shape of its
    /// own (reserved for future helper kinds; never constructed by the
    /// current compiler, kept so the tag set matches §3/§9 exactly).
    Virtual,
}

impl WidgetKind {
    /// Helper kinds are excluded from the group analyzer (§4.7 eligibility
    /// rules) and never participate in wrap-content measurement.
    pub fn is_helper(&self) -> bool {
        !matches!(self, WidgetKind::Normal)
    }
}

/// A rectangular widget: anchors, dimension behavior, and solved geometry.
#[derive(Clone, Debug)]
pub struct Widget {
    pub parent: Option<WidgetId>,
    pub kind: WidgetKind,

    pub left: Anchor,
    pub top: Anchor,
    pub right: Anchor,
    pub bottom: Anchor,
    pub baseline: Anchor,
    pub center_x: Anchor,
    pub center_y: Anchor,
    pub center: Anchor,

    pub width_behavior: DimensionBehavior,
    pub height_behavior: DimensionBehavior,
    pub width: i32,
    pub height: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,

    /// Solved top-left corner, written back by the solver/optimizer.
    pub x: i32,
    pub y: i32,

    pub visibility: Visibility,
    pub bias_x: f32,
    pub bias_y: f32,
    pub dimension_ratio: Option<DimensionRatio>,
    pub match_constraint_default_w: MatchConstraintDefault,
    pub match_constraint_default_h: MatchConstraintDefault,
    pub match_constraint_percent_w: f32,
    pub match_constraint_percent_h: f32,
    pub baseline_distance: i32,
    pub chain_style_x: ChainStyle,
    pub chain_style_y: ChainStyle,
    pub weight_x: f32,
    pub weight_y: f32,

    /// Circular constraint: connect to another widget's CENTER at an angle
    /// (radians) and radius. `None` when unused.
    pub circular: Option<(WidgetId, f64, f64)>,
}

impl Widget {
    pub fn new(kind: WidgetKind) -> Self {
        Widget {
            parent: None,
            kind,
            left: Anchor::new(AnchorType::Left),
            top: Anchor::new(AnchorType::Top),
            right: Anchor::new(AnchorType::Right),
            bottom: Anchor::new(AnchorType::Bottom),
            baseline: Anchor::new(AnchorType::Baseline),
            center_x: Anchor::new(AnchorType::CenterX),
            center_y: Anchor::new(AnchorType::CenterY),
            center: Anchor::new(AnchorType::Center),
            width_behavior: DimensionBehavior::Fixed,
            height_behavior: DimensionBehavior::Fixed,
            width: 0,
            height: 0,
            min_width: 0,
            min_height: 0,
            max_width: i32::MAX,
            max_height: i32::MAX,
            x: 0,
            y: 0,
            visibility: Visibility::Visible,
            bias_x: 0.5,
            bias_y: 0.5,
            dimension_ratio: None,
            match_constraint_default_w: MatchConstraintDefault::Spread,
            match_constraint_default_h: MatchConstraintDefault::Spread,
            match_constraint_percent_w: 1.0,
            match_constraint_percent_h: 1.0,
            baseline_distance: 0,
            chain_style_x: ChainStyle::Spread,
            chain_style_y: ChainStyle::Spread,
            weight_x: -1.0,
            weight_y: -1.0,
            circular: None,
        }
    }

    /// Mutable access to one of the four positional anchors by type;
    /// panics for CENTER/CENTER_X/CENTER_Y/BASELINE since those are
    /// addressed directly by field.
    pub fn anchor_mut(&mut self, t: AnchorType) -> &mut Anchor {
        match t {
            AnchorType::Left => &mut self.left,
            AnchorType::Top => &mut self.top,
            AnchorType::Right => &mut self.right,
            AnchorType::Bottom => &mut self.bottom,
            AnchorType::Baseline => &mut self.baseline,
            AnchorType::CenterX => &mut self.center_x,
            AnchorType::CenterY => &mut self.center_y,
            AnchorType::Center => &mut self.center,
        }
    }

    pub fn anchor(&self, t: AnchorType) -> &Anchor {
        match t {
            AnchorType::Left => &self.left,
            AnchorType::Top => &self.top,
            AnchorType::Right => &self.right,
            AnchorType::Bottom => &self.bottom,
            AnchorType::Baseline => &self.baseline,
            AnchorType::CenterX => &self.center_x,
            AnchorType::CenterY => &self.center_y,
            AnchorType::Center => &self.center,
        }
    }

    /// §3 invariant (ii): a GONE widget's own frame is zero-sized.
    pub fn effective_width(&self) -> i32 {
        if self.visibility == Visibility::Gone { 0 } else { self.width }
    }

    pub fn effective_height(&self) -> i32 {
        if self.visibility == Visibility::Gone { 0 } else { self.height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_wire_values_are_bit_exact() {
        assert_eq!(u8::from(Visibility::Visible), 0);
        assert_eq!(u8::from(Visibility::Invisible), 4);
        assert_eq!(u8::from(Visibility::Gone), 8);
    }

    #[test]
    fn chain_style_wire_values_are_bit_exact() {
        assert_eq!(u8::from(ChainStyle::Spread), 0);
        assert_eq!(u8::from(ChainStyle::SpreadInside), 1);
        assert_eq!(u8::from(ChainStyle::Packed), 2);
    }

    #[test]
    fn gone_widget_reports_zero_extent() {
        let mut w = Widget::new(WidgetKind::Normal);
        w.width = 50;
        w.height = 20;
        w.visibility = Visibility::Gone;
        assert_eq!(w.effective_width(), 0);
        assert_eq!(w.effective_height(), 0);
    }
}
