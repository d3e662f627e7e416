// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The constraint compiler (component E): translates each widget's anchor
//! connections, dimension behavior, bias, and ratio into solver rows.

use std::collections::HashMap;

use crate::error::{LayoutFault, LayoutReport};
use crate::model::{
    Anchor, AnchorType, Axis, DimensionBehavior, MatchConstraintDefault, Visibility, WidgetArena,
    WidgetId, WidgetKind,
};
use crate::solver::{LinearSystem, Strength, VarId};

/// Measured natural content size for widgets needing one (wrap-content,
/// MATCH_CONSTRAINT/WRAP). Populated by the container's measurement pass
/// before compilation.
pub type MeasuredSizes = HashMap<WidgetId, (i32, i32)>;

/// Lazily create (and cache on the anchor) the solver variable for one of
/// a widget's anchors.
pub(crate) fn ensure_var(arena: &mut WidgetArena, system: &mut LinearSystem, id: WidgetId, t: AnchorType) -> VarId {
    if let Some(v) = arena.get(id).and_then(|w| w.anchor(t).var) {
        return v;
    }
    let v = system.new_object_variable();
    if let Some(w) = arena.get_mut(id) {
        w.anchor_mut(t).var = Some(v);
    }
    v
}

/// §3 invariant (ii): read `gone_margin` instead of `margin` when the
/// anchor's target widget is GONE.
fn effective_margin(arena: &WidgetArena, anchor: &Anchor) -> f32 {
    match anchor.target {
        Some((target, _)) if arena.get(target).map(|w| w.visibility) == Some(Visibility::Gone) => {
            anchor.gone_margin
        }
        _ => anchor.margin,
    }
}

/// `connect(from, anchor_type, to, to_anchor, margin, strength)` (§4.4).
///
/// Returns `false` (and the caller should record
/// [`LayoutFault::InvalidAnchorPair`]) when the anchor types are
/// incompatible; the connection is then left untouched.
pub fn connect(
    arena: &mut WidgetArena,
    from: WidgetId,
    anchor_type: AnchorType,
    to: WidgetId,
    to_anchor: AnchorType,
    margin: f32,
    strength: Strength,
) -> bool {
    if !anchor_type.compatible_with(to_anchor) {
        return false;
    }

    if anchor_type == AnchorType::Center {
        // Decomposes into LEFT<->LEFT / RIGHT<->RIGHT and TOP<->TOP / BOTTOM<->BOTTOM
        // against the same target, centering the widget within it.
        for (a, b) in [
            (AnchorType::Left, AnchorType::Left),
            (AnchorType::Right, AnchorType::Right),
            (AnchorType::Top, AnchorType::Top),
            (AnchorType::Bottom, AnchorType::Bottom),
        ] {
            set_target(arena, from, a, to, b, margin, strength);
        }
        return true;
    }

    if anchor_type == AnchorType::Top || anchor_type == AnchorType::Bottom {
        if let Some(w) = arena.get_mut(from) {
            w.baseline.target = None;
        }
    }
    if anchor_type == AnchorType::Baseline {
        if let Some(w) = arena.get_mut(from) {
            w.top.target = None;
            w.bottom.target = None;
        }
    }

    set_target(arena, from, anchor_type, to, to_anchor, margin, strength);
    true
}

fn set_target(
    arena: &mut WidgetArena,
    from: WidgetId,
    anchor_type: AnchorType,
    to: WidgetId,
    to_anchor: AnchorType,
    margin: f32,
    strength: Strength,
) {
    if let Some(w) = arena.get_mut(from) {
        let a = w.anchor_mut(anchor_type);
        a.target = Some((to, to_anchor));
        a.margin = margin;
        a.strength = strength;
    }
}

/// Compile one widget's rows into `system`. Guideline and barrier widgets
/// are dispatched to [`crate::helpers`] instead (§4.8); this function only
/// handles `WidgetKind::Normal`.
pub fn compile_widget(
    system: &mut LinearSystem,
    arena: &mut WidgetArena,
    measured: &MeasuredSizes,
    report: &mut LayoutReport,
    chain_axes: &std::collections::HashSet<(WidgetId, Axis)>,
    wid: WidgetId,
) {
    let Some(w) = arena.get(wid).cloned() else { return };
    if !matches!(w.kind, WidgetKind::Normal) {
        return;
    }

    compile_axis(system, arena, measured, wid, Axis::Horizontal, chain_axes.contains(&(wid, Axis::Horizontal)));
    compile_axis(system, arena, measured, wid, Axis::Vertical, chain_axes.contains(&(wid, Axis::Vertical)));

    if w.baseline.is_connected() {
        let top_var = ensure_var(arena, system, wid, AnchorType::Top);
        let baseline_var = ensure_var(arena, system, wid, AnchorType::Baseline);
        system.add_baseline(baseline_var, top_var, w.baseline_distance as f64);
    }

    if let Some((target, angle, radius)) = w.circular {
        let a_t = ensure_var(arena, system, wid, AnchorType::Left);
        let a_b = ensure_var(arena, system, wid, AnchorType::Top);
        let b_t = ensure_var(arena, system, target, AnchorType::Left);
        let b_b = ensure_var(arena, system, target, AnchorType::Top);
        system.add_circular(a_t, b_t, a_b, b_b, angle, radius, Strength::Highest);
    }

    if let Some(dr) = w.dimension_ratio {
        compile_ratio(system, arena, wid, &w, dr.ratio, dr.explicit_axis, report);
    }
}

fn compile_axis(
    system: &mut LinearSystem,
    arena: &mut WidgetArena,
    measured: &MeasuredSizes,
    wid: WidgetId,
    axis: Axis,
    in_chain: bool,
) {
    let w = arena.get(wid).unwrap().clone();
    let (start_t, end_t, behavior, own_dim, min_dim, bias, match_default) = match axis {
        Axis::Horizontal => (
            AnchorType::Left,
            AnchorType::Right,
            w.width_behavior,
            w.effective_width(),
            w.min_width,
            w.bias_x,
            w.match_constraint_default_w,
        ),
        Axis::Vertical => (
            AnchorType::Top,
            AnchorType::Bottom,
            w.height_behavior,
            w.effective_height(),
            w.min_height,
            w.bias_y,
            w.match_constraint_default_h,
        ),
    };

    let start_anchor = w.anchor(start_t).clone();
    let end_anchor = w.anchor(end_t).clone();
    let start_var = ensure_var(arena, system, wid, start_t);
    let end_var = ensure_var(arena, system, wid, end_t);

    let start_target = start_anchor
        .target
        .map(|(tw, ta)| (ensure_var(arena, system, tw, ta), effective_margin(arena, &start_anchor)));
    let end_target = end_anchor
        .target
        .map(|(tw, ta)| (ensure_var(arena, system, tw, ta), effective_margin(arena, &end_anchor)));

    if w.visibility == Visibility::Gone {
        system.add_equality(end_var, start_var, 0.0, Strength::Fixed);
    } else {
        match behavior {
            DimensionBehavior::Fixed => {
                system.add_equality(end_var, start_var, own_dim as f64, Strength::Fixed);
            }
            DimensionBehavior::WrapContent => {
                let content = measured.get(&wid).map(|&(cw, ch)| match axis {
                    Axis::Horizontal => cw,
                    Axis::Vertical => ch,
                });
                if let Some(content) = content {
                    system.add_equality(end_var, start_var, content as f64, Strength::High);
                }
                system.add_greater_than(end_var, start_var, min_dim as f64, Strength::Fixed);
            }
            DimensionBehavior::MatchParent => {
                if let Some(parent) = w.parent {
                    let p_start = ensure_var(arena, system, parent, start_t);
                    let p_end = ensure_var(arena, system, parent, end_t);
                    let (m_start, m_end) = (start_anchor.margin, end_anchor.margin);
                    system.add_equality(start_var, p_start, m_start as f64, Strength::Fixed);
                    system.add_equality(p_end, end_var, m_end as f64, Strength::Fixed);
                }
            }
            DimensionBehavior::MatchConstraint if !in_chain => match match_default {
                MatchConstraintDefault::Percent => {
                    let percent = match axis {
                        Axis::Horizontal => w.match_constraint_percent_w,
                        Axis::Vertical => w.match_constraint_percent_h,
                    };
                    if let Some(parent) = w.parent {
                        let p_start = ensure_var(arena, system, parent, start_t);
                        let p_end = ensure_var(arena, system, parent, end_t);
                        system.add_percent(end_var, p_start, p_end, percent as f64, Strength::Fixed);
                    }
                }
                MatchConstraintDefault::Wrap => {
                    system.add_equality(end_var, start_var, own_dim as f64, Strength::Low);
                }
                // Spread, with no ratio in play: when both ends are connected
                // the widget must stretch to fill the span between them,
                // which needs two independent equalities (one per endpoint),
                // not the single bias-centering row below — that row relates
                // only the *sum* of the two endpoints and leaves one of them
                // non-basic, so e.g. a 0dp child pinned Left/Right to its
                // parent would resolve to `left > right` instead of filling
                // the parent.
                MatchConstraintDefault::Spread if w.dimension_ratio.is_none() => {
                    if let (Some((sv, sm)), Some((ev, em))) = (start_target, end_target) {
                        system.add_equality(start_var, sv, sm as f64, Strength::Fixed);
                        system.add_equality(ev, end_var, em as f64, Strength::Fixed);
                    }
                }
                // Spread-with-a-ratio, Ratio, and RatioResolved: the driven
                // axis isn't known until `compile_ratio` runs (once both axes
                // are compiled), so this axis is left to the bias-centering
                // row below for now; `compile_ratio` supplies the other
                // equation needed to pin both endpoints.
                MatchConstraintDefault::Spread | MatchConstraintDefault::Ratio | MatchConstraintDefault::RatioResolved => {}
            },
            // Sizing for chain members with MATCH_CONSTRAINT is handled by
            // the chain handler's weighted row (§4.5) instead.
            DimensionBehavior::MatchConstraint => {}
        }
    }

    if in_chain {
        return;
    }

    let stretched_match_constraint = !in_chain
        && behavior == DimensionBehavior::MatchConstraint
        && match_default == MatchConstraintDefault::Spread
        && w.dimension_ratio.is_none()
        && start_target.is_some()
        && end_target.is_some();
    if stretched_match_constraint {
        // Both endpoints were already pinned independently above; the
        // generic bias-centering row below is for fixed-size widgets only.
        return;
    }

    match (start_target, end_target) {
        (Some((sv, sm)), Some((ev, em))) => {
            system.add_centering(
                start_var,
                sv,
                sm as f64,
                bias as f64,
                ev,
                end_var,
                em as f64,
                Strength::Highest,
            );
        }
        (Some((sv, sm)), None) => {
            system.add_equality(start_var, sv, sm as f64, Strength::Fixed);
        }
        (None, Some((ev, em))) => {
            system.add_equality(ev, end_var, em as f64, Strength::Fixed);
        }
        (None, None) => {
            let origin = match axis {
                Axis::Horizontal => w.x,
                Axis::Vertical => w.y,
            };
            system.add_equality_const(start_var, origin as f64, Strength::Low);
        }
    }
}

/// MATCH_CONSTRAINT/RATIO (§4.4): combine with form #6 against the other
/// axis. When only one side is MATCH_CONSTRAINT, that side is driven;
/// when both are, `explicit_axis` (from the ratio string) decides, and in
/// its absence HORIZONTAL is driven (arbitrary but deterministic — see the
/// design notes).
fn compile_ratio(
    system: &mut LinearSystem,
    arena: &mut WidgetArena,
    wid: WidgetId,
    w: &crate::model::Widget,
    ratio: f64,
    explicit_axis: Option<Axis>,
    report: &mut LayoutReport,
) {
    let w_is_mc = w.width_behavior == DimensionBehavior::MatchConstraint;
    let h_is_mc = w.height_behavior == DimensionBehavior::MatchConstraint;
    if !w_is_mc && !h_is_mc {
        report.record(LayoutFault::RatioNotApplicable);
        return;
    }

    let width_driven = match explicit_axis {
        Some(Axis::Horizontal) => true,
        Some(Axis::Vertical) => false,
        None => w_is_mc,
    };

    let left = ensure_var(arena, system, wid, AnchorType::Left);
    let right = ensure_var(arena, system, wid, AnchorType::Right);
    let top = ensure_var(arena, system, wid, AnchorType::Top);
    let bottom = ensure_var(arena, system, wid, AnchorType::Bottom);

    // width = ratio * height  <=>  right - left - ratio*(bottom - top) = 0
    if width_driven {
        system.add_ratio(right, left, bottom, top, ratio, Strength::Fixed);
    } else {
        system.add_ratio(bottom, top, right, left, 1.0 / ratio, Strength::Fixed);
    }
}
