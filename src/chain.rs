// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The chain handler (component F): detection and the three chain styles.

use std::collections::HashSet;

use crate::compiler::ensure_var;
use crate::model::{AnchorType, Axis, ChainStyle, DimensionBehavior, Visibility, WidgetArena, WidgetId};
use crate::solver::{LinearSystem, Strength};

/// One detected chain: ordered head-to-tail member list plus the axis it
/// runs along.
pub struct Chain {
    pub axis: Axis,
    pub members: Vec<WidgetId>,
}

fn start_end(axis: Axis) -> (AnchorType, AnchorType) {
    match axis {
        Axis::Horizontal => (AnchorType::Left, AnchorType::Right),
        Axis::Vertical => (AnchorType::Top, AnchorType::Bottom),
    }
}

fn is_chain_link(arena: &WidgetArena, a: WidgetId, b: WidgetId, start_t: AnchorType, end_t: AnchorType) -> bool {
    let Some(wa) = arena.get(a) else { return false };
    let Some(wb) = arena.get(b) else { return false };
    wa.anchor(end_t).target == Some((b, start_t)) && wb.anchor(start_t).target == Some((a, end_t))
}

/// §3 invariant (iii): a chain exists between widgets whose end/start
/// anchors mutually target each other. Detects every chain among
/// `parent`'s direct children along `axis`.
pub fn detect_chains(arena: &WidgetArena, parent: WidgetId, axis: Axis) -> Vec<Chain> {
    let (start_t, end_t) = start_end(axis);
    let children = arena.children(parent).to_vec();

    let has_predecessor = |c: WidgetId| {
        children.iter().any(|&s| s != c && is_chain_link(arena, s, c, start_t, end_t))
    };

    let mut visited = HashSet::new();
    let mut chains = Vec::new();
    for &c in &children {
        if visited.contains(&c) || has_predecessor(c) {
            continue;
        }
        let mut members = vec![c];
        visited.insert(c);
        let mut cur = c;
        loop {
            let next = children.iter().copied().find(|&s| is_chain_link(arena, cur, s, start_t, end_t));
            match next {
                Some(n) if !visited.contains(&n) => {
                    members.push(n);
                    visited.insert(n);
                    cur = n;
                }
                _ => break,
            }
        }
        if members.len() > 1 {
            chains.push(Chain { axis, members });
        }
    }
    chains
}

/// Emit this chain's rows. `chain.members[0]`'s start anchor and
/// `chain.members.last()`'s end anchor carry the chain's *external*
/// connections (to the parent or other non-member widgets) — those are
/// compiled normally by [`crate::compiler`]; this function only places
/// members relative to each other and, for PACKED, the group as a whole.
pub fn compile_chain(system: &mut LinearSystem, arena: &mut WidgetArena, chain: &Chain) {
    let (start_t, end_t) = start_end(chain.axis);
    let visible: Vec<WidgetId> = chain
        .members
        .iter()
        .copied()
        .filter(|&w| arena.get(w).map(|w| w.visibility != Visibility::Gone).unwrap_or(false))
        .collect();
    if visible.is_empty() {
        return;
    }

    let head = chain.members[0];
    let tail = *chain.members.last().unwrap();
    let style = match chain.axis {
        Axis::Horizontal => arena.get(head).unwrap().chain_style_x,
        Axis::Vertical => arena.get(head).unwrap().chain_style_y,
    };

    match style {
        ChainStyle::Packed => compile_packed(system, arena, chain, &visible, start_t, end_t),
        ChainStyle::Spread => compile_spread(system, arena, chain, &visible, start_t, end_t, true),
        ChainStyle::SpreadInside => compile_spread(system, arena, chain, &visible, start_t, end_t, false),
    }

    emit_weighted_match_constraints(system, arena, &visible, start_t, end_t);

    let _ = (head, tail);
}

fn compile_packed(
    system: &mut LinearSystem,
    arena: &mut WidgetArena,
    chain: &Chain,
    visible: &[WidgetId],
    start_t: AnchorType,
    end_t: AnchorType,
) {
    for w in chain.members.windows(2) {
        let (a, b) = (w[0], w[1]);
        let margin = arena.get(b).unwrap().anchor(start_t).margin;
        let a_end = ensure_var(arena, system, a, end_t);
        let b_start = ensure_var(arena, system, b, start_t);
        system.add_equality(b_start, a_end, margin as f64, Strength::Fixed);
    }

    let head = *visible.first().unwrap();
    let tail = *visible.last().unwrap();
    let head_start = arena.get(head).unwrap().anchor(start_t).clone();
    let tail_end = arena.get(tail).unwrap().anchor(end_t).clone();
    let bias = match chain.axis {
        Axis::Horizontal => arena.get(head).unwrap().bias_x,
        Axis::Vertical => arena.get(head).unwrap().bias_y,
    };

    if let (Some((sw, sa)), Some((ew, ea))) = (head_start.target, tail_end.target) {
        let start_var = ensure_var(arena, system, head, start_t);
        let end_var = ensure_var(arena, system, tail, end_t);
        let s_target = ensure_var(arena, system, sw, sa);
        let e_target = ensure_var(arena, system, ew, ea);
        system.add_centering(
            start_var,
            s_target,
            head_start.margin as f64,
            bias as f64,
            e_target,
            end_var,
            tail_end.margin as f64,
            Strength::Highest,
        );
    }
}

/// `inside == true` is plain SPREAD (outer gaps participate);
/// `inside == false` is SPREAD_INSIDE (head/tail anchored to the chain
/// ends directly, only interior gaps equalized).
fn compile_spread(
    system: &mut LinearSystem,
    arena: &mut WidgetArena,
    chain: &Chain,
    visible: &[WidgetId],
    start_t: AnchorType,
    end_t: AnchorType,
    include_outer_gaps: bool,
) {
    let head = *visible.first().unwrap();
    let tail = *visible.last().unwrap();

    if !include_outer_gaps {
        let head_start = arena.get(head).unwrap().anchor(start_t).clone();
        let tail_end = arena.get(tail).unwrap().anchor(end_t).clone();
        if let Some((sw, sa)) = head_start.target {
            let sv = ensure_var(arena, system, head, start_t);
            let tv = ensure_var(arena, system, sw, sa);
            system.add_equality(sv, tv, head_start.margin as f64, Strength::Fixed);
        }
        if let Some((ew, ea)) = tail_end.target {
            let ev = ensure_var(arena, system, tail, end_t);
            let tv = ensure_var(arena, system, ew, ea);
            system.add_equality(tv, ev, tail_end.margin as f64, Strength::Fixed);
        }
    }

    // Build the ordered gap endpoints: for SPREAD, prepend the head's
    // external target and append the tail's external target so outer gaps
    // equalize with interior ones; for SPREAD_INSIDE, only interior gaps.
    struct GapEnd {
        var: crate::solver::VarId,
        margin: f64,
    }
    let mut lefts = Vec::new();
    let mut rights = Vec::new();

    if include_outer_gaps {
        if let Some((sw, sa)) = arena.get(head).unwrap().anchor(start_t).target {
            let tv = ensure_var(arena, system, sw, sa);
            let m = arena.get(head).unwrap().anchor(start_t).margin as f64;
            rights.push(GapEnd { var: ensure_var(arena, system, head, start_t), margin: 0.0 });
            lefts.push(GapEnd { var: tv, margin: m });
        }
    }
    for w in chain.members.windows(2) {
        let (a, b) = (w[0], w[1]);
        lefts.push(GapEnd { var: ensure_var(arena, system, a, end_t), margin: 0.0 });
        rights.push(GapEnd { var: ensure_var(arena, system, b, start_t), margin: 0.0 });
    }
    if include_outer_gaps {
        if let Some((ew, ea)) = arena.get(tail).unwrap().anchor(end_t).target {
            let tv = ensure_var(arena, system, ew, ea);
            lefts.push(GapEnd { var: ensure_var(arena, system, tail, end_t), margin: 0.0 });
            rights.push(GapEnd { var: tv, margin: 0.0 });
        }
    }

    // Equalize every consecutive pair of gaps: (right_i - left_i) == (right_{i+1} - left_{i+1})
    for pair in lefts.iter().zip(rights.iter()).collect::<Vec<_>>().windows(2) {
        let (l0, r0) = pair[0];
        let (l1, r1) = pair[1];
        system.add_constraint(
            &[(r0.var, 1.0), (l0.var, -1.0), (r1.var, -1.0), (l1.var, 1.0)],
            r0.margin - l0.margin - (r1.margin - l1.margin),
            Strength::Highest,
        );
    }
}

/// §4.5 weighted MATCH_CONSTRAINT distribution: for each adjacent pair of
/// MATCH_CONSTRAINT widgets in the chain, emit row form #8.
fn emit_weighted_match_constraints(
    system: &mut LinearSystem,
    arena: &mut WidgetArena,
    visible: &[WidgetId],
    start_t: AnchorType,
    end_t: AnchorType,
) {
    let is_horizontal = start_t == AnchorType::Left;
    for pair in visible.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let wa = arena.get(a).unwrap().clone();
        let wb = arena.get(b).unwrap().clone();
        let (beh_a, beh_b) = if is_horizontal {
            (wa.width_behavior, wb.width_behavior)
        } else {
            (wa.height_behavior, wb.height_behavior)
        };
        if beh_a != DimensionBehavior::MatchConstraint || beh_b != DimensionBehavior::MatchConstraint {
            continue;
        }
        let (mut w_a, mut w_b) = if is_horizontal { (wa.weight_x, wb.weight_x) } else { (wa.weight_y, wb.weight_y) };
        if w_a < 0.0 && w_b < 0.0 {
            w_a = 1.0;
            w_b = 1.0;
        } else {
            if w_a < 0.0 {
                w_a = 0.0;
            }
            if w_b < 0.0 {
                w_b = 0.0;
            }
        }

        let start_a = ensure_var(arena, system, a, start_t);
        let end_a = ensure_var(arena, system, a, end_t);
        let start_b = ensure_var(arena, system, b, start_t);
        let end_b = ensure_var(arena, system, b, end_t);
        system.add_chain_weighted(start_a, end_a, w_a as f64, start_b, end_b, w_b as f64, Strength::Fixed);
    }
}
