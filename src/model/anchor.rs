// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Anchors: the per-widget connection points, and the resolution-node
//! bookkeeping the direct optimizer (component G) hangs off each one.

use crate::solver::{Strength, VarId};

use super::widget::WidgetId;

/// Which axis an anchor belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The eight anchor kinds a widget carries.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum AnchorType {
    Left,
    Top,
    Right,
    Bottom,
    Baseline,
    CenterX,
    CenterY,
    Center,
}

impl AnchorType {
    pub fn axis(self) -> Axis {
        match self {
            AnchorType::Left | AnchorType::Right | AnchorType::CenterX => Axis::Horizontal,
            AnchorType::Top | AnchorType::Bottom | AnchorType::CenterY => Axis::Vertical,
            AnchorType::Baseline | AnchorType::Center => Axis::Vertical,
        }
    }

    /// Type-compatibility per §3 invariant (i): `LEFT <-> {LEFT, RIGHT, CENTER_X}`
    /// and symmetrically for the vertical family; `BASELINE` only to itself;
    /// `CENTER` only to itself.
    pub fn compatible_with(self, other: AnchorType) -> bool {
        use AnchorType::*;
        match self {
            Left | Right => matches!(other, Left | Right | CenterX),
            Top | Bottom => matches!(other, Top | Bottom | CenterY),
            CenterX => matches!(other, Left | Right | CenterX),
            CenterY => matches!(other, Top | Bottom | CenterY),
            Baseline => other == Baseline,
            Center => other == Center,
        }
    }
}

/// Whether a resolution node's value is known yet (component G).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ResolutionState {
    #[default]
    Unresolved,
    Resolved,
}

/// What kind of relationship a resolution node represents.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ResolutionType {
    #[default]
    Unconnected,
    Direct,
    Center,
    Match,
    Chain,
}

/// The direct optimizer's per-anchor bookkeeping (component G).
///
/// Reset at the start of every `analyze` pass; `value` is only meaningful
/// once `state == Resolved`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ResolutionNode {
    pub state: ResolutionState,
    pub kind: ResolutionType,
    pub value: f64,
}

impl ResolutionNode {
    pub fn reset(&mut self) {
        *self = ResolutionNode::default();
    }

    pub fn resolve(&mut self, value: f64) {
        self.state = ResolutionState::Resolved;
        self.value = value;
    }
}

/// One of a widget's eight connection points.
#[derive(Clone, Debug)]
pub struct Anchor {
    pub anchor_type: AnchorType,
    /// The connection, if any: which widget's which anchor this one targets.
    pub target: Option<(WidgetId, AnchorType)>,
    pub margin: f32,
    /// Margin substituted for `margin` when the target widget is GONE.
    pub gone_margin: f32,
    pub strength: Strength,
    /// Lazily created on first use by the compiler; `None` until then.
    pub(crate) var: Option<VarId>,
    pub resolution: ResolutionNode,
}

impl Anchor {
    pub fn new(anchor_type: AnchorType) -> Self {
        Anchor {
            anchor_type,
            target: None,
            margin: 0.0,
            gone_margin: 0.0,
            strength: Strength::Fixed,
            var: None,
            resolution: ResolutionNode::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_right_and_center_x_are_mutually_compatible() {
        assert!(AnchorType::Left.compatible_with(AnchorType::Right));
        assert!(AnchorType::Left.compatible_with(AnchorType::CenterX));
        assert!(!AnchorType::Left.compatible_with(AnchorType::Top));
    }

    #[test]
    fn baseline_and_center_are_exclusive() {
        assert!(AnchorType::Baseline.compatible_with(AnchorType::Baseline));
        assert!(!AnchorType::Baseline.compatible_with(AnchorType::Top));
        assert!(AnchorType::Center.compatible_with(AnchorType::Center));
        assert!(!AnchorType::Center.compatible_with(AnchorType::CenterX));
    }
}
