// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The group analyzer (component H): partitions a wrap-content parent's
//! children into independently-measurable components.

use crate::model::{AnchorType, DimensionBehavior, WidgetArena, WidgetId};

/// One connected component of the partition.
pub struct Group {
    pub members: Vec<WidgetId>,
}

/// §4.7 eligibility: a widget that kills the optimization for its parent
/// forces the whole child set to collapse into one [`Group`].
fn is_eligible(arena: &WidgetArena, w: WidgetId, wrap_axis_anchors: &[(AnchorType, AnchorType)]) -> bool {
    let Some(widget) = arena.get(w) else { return false };
    if widget.kind.is_helper() {
        return false;
    }
    if widget.center.is_connected() || widget.center_x.is_connected() || widget.center_y.is_connected() {
        return false;
    }
    for &(start_t, end_t) in wrap_axis_anchors {
        let both_connected = widget.anchor(start_t).is_connected() && widget.anchor(end_t).is_connected();
        if both_connected {
            return false;
        }
    }
    let is_ratio_both_match = widget.dimension_ratio.is_some()
        && widget.width_behavior == DimensionBehavior::MatchConstraint
        && widget.height_behavior == DimensionBehavior::MatchConstraint;
    if is_ratio_both_match {
        return false;
    }
    true
}

/// Partition `parent`'s children for the wrap-content axes given in
/// `wrap_axis_anchors` (the `(start, end)` anchor pair of each
/// wrap-content axis on `parent`). Falls back to one group containing
/// everything when any child is ineligible or a cycle is detected.
pub fn partition(arena: &WidgetArena, parent: WidgetId, wrap_axis_anchors: &[(AnchorType, AnchorType)]) -> Vec<Group> {
    let children = arena.children(parent).to_vec();
    if children.is_empty() {
        return Vec::new();
    }

    for &c in &children {
        if !is_eligible(arena, c, wrap_axis_anchors) {
            return vec![Group { members: children }];
        }
    }

    // Union-find children that reference one another (excluding the
    // parent) so each resulting group can be measured independently.
    let mut parent_of: Vec<usize> = (0..children.len()).collect();
    fn find(parent_of: &mut [usize], i: usize) -> usize {
        if parent_of[i] != i {
            parent_of[i] = find(parent_of, parent_of[i]);
        }
        parent_of[i]
    }
    let index_of = |w: WidgetId| children.iter().position(|&c| c == w);

    let mut cyclic = false;
    for (i, &c) in children.iter().enumerate() {
        let Some(widget) = arena.get(c) else { continue };
        for t in [AnchorType::Left, AnchorType::Top, AnchorType::Right, AnchorType::Bottom] {
            if let Some((target, _)) = widget.anchor(t).target {
                if target == parent {
                    continue;
                }
                match index_of(target) {
                    Some(j) => {
                        let (ri, rj) = (find(&mut parent_of, i), find(&mut parent_of, j));
                        if ri != rj {
                            parent_of[ri] = rj;
                        }
                    }
                    None => {
                        // Connects outside the parent's children entirely:
                        // not representable as an isolated component.
                        cyclic = true;
                    }
                }
            }
        }
    }

    if cyclic {
        return vec![Group { members: children }];
    }

    let mut by_root: std::collections::HashMap<usize, Vec<WidgetId>> = std::collections::HashMap::new();
    for (i, &c) in children.iter().enumerate() {
        let root = find(&mut parent_of, i);
        by_root.entry(root).or_default().push(c);
    }

    by_root.into_values().map(|members| Group { members }).collect()
}
