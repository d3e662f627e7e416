// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Helper widgets (§4.8): Guideline and Barrier, the two concrete
//! `WidgetKind` variants the compiler special-cases instead of emitting
//! the general per-anchor row set.

use crate::compiler::ensure_var;
use crate::model::{
    AnchorType, Axis, BarrierSide, GuidelineOrientation, GuidelineRelative, WidgetArena, WidgetId,
    WidgetKind,
};
use crate::solver::{LinearSystem, Strength};

/// Compile a `Guideline` widget: one FIXED equality row binding its single
/// meaningful anchor to the parent span.
pub fn compile_guideline(system: &mut LinearSystem, arena: &mut WidgetArena, wid: WidgetId) {
    let w = arena.get(wid).unwrap().clone();
    let WidgetKind::Guideline { orientation, relative } = w.kind else { return };
    let Some(parent) = w.parent else { return };

    let (own_t, p_start_t, p_end_t) = match orientation {
        GuidelineOrientation::Vertical => (AnchorType::Left, AnchorType::Left, AnchorType::Right),
        GuidelineOrientation::Horizontal => (AnchorType::Top, AnchorType::Top, AnchorType::Bottom),
    };

    let own_var = ensure_var(arena, system, wid, own_t);
    let p_start = ensure_var(arena, system, parent, p_start_t);

    match relative {
        GuidelineRelative::Begin(offset) => {
            system.add_equality(own_var, p_start, offset as f64, Strength::Fixed);
        }
        GuidelineRelative::End(offset) => {
            let p_end = ensure_var(arena, system, parent, p_end_t);
            system.add_equality(p_end, own_var, offset as f64, Strength::Fixed);
        }
        GuidelineRelative::Percent(p) => {
            let p_end = ensure_var(arena, system, parent, p_end_t);
            system.add_percent(own_var, p_start, p_end, p as f64, Strength::Fixed);
        }
    }

    // A guideline alias: its CENTER-equivalent and the opposite anchor
    // collapse to the same variable, so it contributes zero extent.
    let opposite_t = match orientation {
        GuidelineOrientation::Vertical => AnchorType::Right,
        GuidelineOrientation::Horizontal => AnchorType::Bottom,
    };
    let opposite_var = ensure_var(arena, system, wid, opposite_t);
    system.add_equality(opposite_var, own_var, 0.0, Strength::Fixed);
}

/// Compile a `Barrier` widget: row form #10 against its referenced
/// children, always at [`Strength::Fixed`] (a barrier is a hard
/// constraint by construction).
pub fn compile_barrier(system: &mut LinearSystem, arena: &mut WidgetArena, wid: WidgetId) {
    let w = arena.get(wid).unwrap().clone();
    let WidgetKind::Barrier { axis, side, referenced } = w.kind else { return };

    let anchor_t = match (axis, side) {
        (Axis::Horizontal, BarrierSide::Max) => AnchorType::Right,
        (Axis::Horizontal, BarrierSide::Min) => AnchorType::Left,
        (Axis::Vertical, BarrierSide::Max) => AnchorType::Bottom,
        (Axis::Vertical, BarrierSide::Min) => AnchorType::Top,
    };
    let barrier_var = ensure_var(arena, system, wid, anchor_t);

    let child_vars: Vec<_> = referenced
        .iter()
        .map(|&c| ensure_var(arena, system, c, anchor_t))
        .collect();
    let max_side = matches!(side, BarrierSide::Max);
    system.add_barrier(barrier_var, &child_vars, max_side);

    // The barrier has no extent of its own along its axis.
    let opposite_t = match anchor_t {
        AnchorType::Left => AnchorType::Right,
        AnchorType::Right => AnchorType::Left,
        AnchorType::Top => AnchorType::Bottom,
        AnchorType::Bottom => AnchorType::Top,
        other => other,
    };
    let opposite_var = ensure_var(arena, system, wid, opposite_t);
    system.add_equality(opposite_var, barrier_var, 0.0, Strength::Fixed);
}
