// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The widget/anchor data model (component D) and its arena.

mod anchor;
mod arena;
mod widget;

pub use anchor::{Anchor, AnchorType, Axis, ResolutionNode, ResolutionState, ResolutionType};
pub use arena::WidgetArena;
pub use widget::{
    BarrierSide, ChainStyle, DimensionBehavior, DimensionRatio, GuidelineOrientation,
    GuidelineRelative, MatchConstraintDefault, Visibility, Widget, WidgetId, WidgetKind,
};
