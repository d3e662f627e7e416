// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The direct optimizer (component G): a per-anchor resolution pass that
//! bypasses the solver entirely when a container's dependency graph is
//! acyclic and directional.
//!
//! Unlike the solver, this pass works in plain `i32` arithmetic against
//! [`ResolutionNode`]s rather than building rows; it only ever *replaces*
//! solver work, never corrects it, so on any conflict or unresolved anchor
//! it abandons cleanly and the caller falls back to the full compile.

use std::collections::HashMap;

use crate::model::{AnchorType, DimensionBehavior, MatchConstraintDefault, WidgetArena, WidgetId};

/// Resolved `(widget, anchor)` positions, or `None` if the graph did not
/// fully resolve (caller should fall back to the solver for everything).
///
/// Resolving an anchor as `base + signed_offset` from its connected target is
/// only correct for a widget whose own extent is an unconstrained stretch
/// between its two connected anchors (MATCH_CONSTRAINT/Spread): any other
/// behavior (Fixed, WrapContent, MatchParent, or a ratio) has its own extent
/// determined some other way — by its declared size, its content, or bias —
/// which this per-anchor walk never consults, so it must not be allowed to
/// take over for widgets with that behavior.
pub fn try_resolve(arena: &mut WidgetArena, root: WidgetId) -> Option<HashMap<(WidgetId, AnchorType), i32>> {
    const ANCHORS: [AnchorType; 4] = [AnchorType::Left, AnchorType::Top, AnchorType::Right, AnchorType::Bottom];

    fn is_unconstrained_stretch(behavior: DimensionBehavior, default: MatchConstraintDefault) -> bool {
        behavior == DimensionBehavior::MatchConstraint && default == MatchConstraintDefault::Spread
    }

    for id in arena.ids().collect::<Vec<_>>() {
        if let Some(w) = arena.get_mut(id) {
            for t in ANCHORS {
                w.anchor_mut(t).resolution.reset();
            }
        }
    }

    let mut resolved: HashMap<(WidgetId, AnchorType), i32> = HashMap::new();
    // Root (the parent/container) anchors are resolved immediately at
    // (0, 0, width, height); everything else must chain back to it.
    let root_w = arena.get(root)?;
    resolved.insert((root, AnchorType::Left), 0);
    resolved.insert((root, AnchorType::Top), 0);
    resolved.insert((root, AnchorType::Right), root_w.width);
    resolved.insert((root, AnchorType::Bottom), root_w.height);

    let ids: Vec<WidgetId> = arena.ids().filter(|&id| id != root).collect();
    let mut progressed = true;
    let mut rounds = 0;
    while progressed && resolved.len() < (ids.len() + 1) * ANCHORS.len() {
        progressed = false;
        rounds += 1;
        if rounds > ids.len() + 2 {
            break;
        }
        for &id in &ids {
            let w = arena.get(id)?;
            for t in ANCHORS {
                if resolved.contains_key(&(id, t)) {
                    continue;
                }
                let anchor = w.anchor(t).clone();
                let Some((target_w, target_a)) = anchor.target else { continue };
                if let Some(&base) = resolved.get(&(target_w, target_a)) {
                    let signed_offset = match t {
                        AnchorType::Left | AnchorType::Top => anchor.margin as i32,
                        AnchorType::Right | AnchorType::Bottom => -(anchor.margin as i32),
                        _ => continue,
                    };
                    resolved.insert((id, t), base + signed_offset);
                    progressed = true;
                }
            }
        }
    }

    let expected = (ids.len() + 1) * ANCHORS.len();
    if resolved.len() != expected {
        return None;
    }

    for &id in &ids {
        let w = arena.get(id)?;
        for t in ANCHORS {
            if w.anchor(t).target.is_none() {
                return None;
            }
        }
        if !is_unconstrained_stretch(w.width_behavior, w.match_constraint_default_w)
            || !is_unconstrained_stretch(w.height_behavior, w.match_constraint_default_h)
        {
            return None;
        }
    }

    Some(resolved)
}
