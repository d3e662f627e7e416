// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Component J: the host-facing `Container` and its public API (§4.10, §6).

use std::collections::HashSet;

use crate::chain;
use crate::compiler::{self, MeasuredSizes};
use crate::config::{Config, OptimizationLevel};
use crate::direct;
use crate::error::LayoutReport;
use crate::group;
use crate::helpers;
use crate::model::{
    AnchorType, Axis, BarrierSide, ChainStyle, DimensionBehavior, GuidelineOrientation,
    GuidelineRelative, Visibility, Widget, WidgetArena, WidgetId, WidgetKind,
};
use crate::solver::{LinearSystem, Strength};

/// How a [`MeasureHost`] should interpret an axis constraint while
/// measuring a widget's natural content size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MeasureSpec {
    Exact(i32),
    AtMost(i32),
    Unspecified,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Measurement {
    pub width: i32,
    pub height: i32,
}

/// Supplies natural content sizes for wrap-content and
/// MATCH_CONSTRAINT/WRAP widgets. Measurement must be side-effect-free and
/// must not re-enter [`Container::layout`].
pub trait MeasureHost {
    fn measure(&mut self, widget: WidgetId, h_constraint: MeasureSpec, v_constraint: MeasureSpec) -> Measurement;
}

/// The default host: no children to measure, returns the widget's own
/// configured size. Useful for tests and for containers whose children
/// are all FIXED-dimensioned.
pub struct NullMeasureHost;

impl MeasureHost for NullMeasureHost {
    fn measure(&mut self, _widget: WidgetId, _h: MeasureSpec, _v: MeasureSpec) -> Measurement {
        Measurement::default()
    }
}

/// Owns the widget arena for one layout tree and exposes the host-facing
/// surface (§6).
pub struct Container {
    arena: WidgetArena,
    root: WidgetId,
    config: Config,
}

impl Container {
    /// Create a container whose root frame is `width x height`, FIXED in
    /// both axes (the common case; call `set_dimension_behavior` on the
    /// root afterwards for a wrap-content parent).
    pub fn new(config: Config, width: i32, height: i32) -> Self {
        let mut arena = WidgetArena::default();
        let mut root = Widget::new(WidgetKind::Normal);
        root.width = width;
        root.height = height;
        let root_id = arena.insert(root);
        Container { arena, root: root_id, config }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn add_widget(&mut self, parent: WidgetId) -> WidgetId {
        let mut w = Widget::new(WidgetKind::Normal);
        w.parent = Some(parent);
        self.arena.insert(w)
    }

    pub fn add_guideline(
        &mut self,
        parent: WidgetId,
        orientation: GuidelineOrientation,
        relative: GuidelineRelative,
    ) -> WidgetId {
        self.arena
            .insert_guideline_or_barrier(parent, WidgetKind::Guideline { orientation, relative })
    }

    pub fn add_barrier(&mut self, parent: WidgetId, axis: Axis, side: BarrierSide, referenced: &[WidgetId]) -> WidgetId {
        self.arena.insert_guideline_or_barrier(
            parent,
            WidgetKind::Barrier { axis, side, referenced: referenced.iter().copied().collect() },
        )
    }

    pub fn remove_widget(&mut self, id: WidgetId) {
        self.arena.remove(id);
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.arena.get(id)
    }

    // ---- §6 host-facing setters --------------------------------------------

    pub fn connect(
        &mut self,
        from: WidgetId,
        anchor_type: AnchorType,
        to: WidgetId,
        to_anchor: AnchorType,
        margin: f32,
        strength: Strength,
    ) -> bool {
        compiler::connect(&mut self.arena, from, anchor_type, to, to_anchor, margin, strength)
    }

    pub fn set_anchor_gone_margin(&mut self, id: WidgetId, anchor_type: AnchorType, gone_margin: f32) {
        if let Some(w) = self.arena.get_mut(id) {
            w.anchor_mut(anchor_type).gone_margin = gone_margin;
        }
    }

    pub fn set_dimension_behavior(&mut self, id: WidgetId, axis: Axis, behavior: DimensionBehavior) {
        if let Some(w) = self.arena.get_mut(id) {
            match axis {
                Axis::Horizontal => w.width_behavior = behavior,
                Axis::Vertical => w.height_behavior = behavior,
            }
        }
    }

    pub fn set_dimension_ratio(&mut self, id: WidgetId, ratio: &str) -> bool {
        let Some(parsed) = crate::ratio::parse_dimension_ratio(ratio) else {
            return false;
        };
        if let Some(w) = self.arena.get_mut(id) {
            w.dimension_ratio = Some(parsed);
        }
        true
    }

    pub fn set_bias(&mut self, id: WidgetId, axis: Axis, fraction: f32) {
        if let Some(w) = self.arena.get_mut(id) {
            match axis {
                Axis::Horizontal => w.bias_x = fraction.clamp(0.0, 1.0),
                Axis::Vertical => w.bias_y = fraction.clamp(0.0, 1.0),
            }
        }
    }

    pub fn set_weight(&mut self, id: WidgetId, axis: Axis, weight: f32) {
        if let Some(w) = self.arena.get_mut(id) {
            match axis {
                Axis::Horizontal => w.weight_x = weight,
                Axis::Vertical => w.weight_y = weight,
            }
        }
    }

    pub fn set_chain_style(&mut self, id: WidgetId, axis: Axis, style: ChainStyle) {
        if let Some(w) = self.arena.get_mut(id) {
            match axis {
                Axis::Horizontal => w.chain_style_x = style,
                Axis::Vertical => w.chain_style_y = style,
            }
        }
    }

    /// Setter used by the solver writeback; also callable directly by the
    /// host to pre-seed a widget's frame before its first `layout()`.
    pub fn set_frame(&mut self, id: WidgetId, left: i32, top: i32, right: i32, bottom: i32) {
        if let Some(w) = self.arena.get_mut(id) {
            w.x = left;
            w.y = top;
            w.width = (right - left).max(0);
            w.height = (bottom - top).max(0);
        }
    }

    pub fn set_visibility(&mut self, id: WidgetId, visibility: Visibility) {
        if let Some(w) = self.arena.get_mut(id) {
            w.visibility = visibility;
        }
    }

    // ---- layout ---------------------------------------------------------

    /// Run one measure-and-solve pass, writing every widget's `(x, y,
    /// width, height)` and returning a diagnostic report (§7: never a
    /// `Result`, since every fault here is already internally handled).
    pub fn layout(&mut self, measure_host: &mut dyn MeasureHost) -> LayoutReport {
        let measured = self.measure_pass(measure_host);

        if self.config.optimization_level.contains(OptimizationLevel::DIRECT) {
            if let Some(resolved) = direct::try_resolve(&mut self.arena, self.root) {
                for id in self.arena.ids().collect::<Vec<_>>() {
                    if id == self.root {
                        continue;
                    }
                    let l = *resolved.get(&(id, AnchorType::Left)).unwrap_or(&0);
                    let t = *resolved.get(&(id, AnchorType::Top)).unwrap_or(&0);
                    let r = *resolved.get(&(id, AnchorType::Right)).unwrap_or(&l);
                    let b = *resolved.get(&(id, AnchorType::Bottom)).unwrap_or(&t);
                    self.set_frame(id, l, t, r, b);
                }
                return LayoutReport::default();
            }
        }

        self.solve_pass(&measured)
    }

    fn measure_pass(&mut self, measure_host: &mut dyn MeasureHost) -> MeasuredSizes {
        let mut measured = MeasuredSizes::default();
        for id in self.arena.ids().collect::<Vec<_>>() {
            let Some(w) = self.arena.get(id) else { continue };
            let needs_w = w.width_behavior == DimensionBehavior::WrapContent
                || (w.width_behavior == DimensionBehavior::MatchConstraint
                    && w.match_constraint_default_w == crate::model::MatchConstraintDefault::Wrap);
            let needs_h = w.height_behavior == DimensionBehavior::WrapContent
                || (w.height_behavior == DimensionBehavior::MatchConstraint
                    && w.match_constraint_default_h == crate::model::MatchConstraintDefault::Wrap);
            if !needs_w && !needs_h {
                continue;
            }
            let h_spec = if needs_w { MeasureSpec::Unspecified } else { MeasureSpec::Exact(w.width) };
            let v_spec = if needs_h { MeasureSpec::Unspecified } else { MeasureSpec::Exact(w.height) };
            let m = measure_host.measure(id, h_spec, v_spec);
            measured.insert(id, (m.width, m.height));
        }

        // Wrap-content parents are seeded from the group analyzer's
        // partition extents (component H) rather than the host's own
        // measurement, since their size is a function of their children.
        for id in self.arena.ids().collect::<Vec<_>>() {
            let Some(w) = self.arena.get(id) else { continue };
            let wrap_w = w.width_behavior == DimensionBehavior::WrapContent;
            let wrap_h = w.height_behavior == DimensionBehavior::WrapContent;
            if !wrap_w && !wrap_h {
                continue;
            }
            let mut anchors = Vec::new();
            if wrap_w {
                anchors.push((AnchorType::Left, AnchorType::Right));
            }
            if wrap_h {
                anchors.push((AnchorType::Top, AnchorType::Bottom));
            }
            let groups = group::partition(&self.arena, id, &anchors);
            let (mut max_w, mut max_h) = (0i32, 0i32);
            for g in &groups {
                let (gw, gh) = self.group_extent(&g.members, &measured);
                max_w = max_w.max(gw);
                max_h = max_h.max(gh);
            }
            let entry = measured.entry(id).or_insert((0, 0));
            if wrap_w {
                entry.0 = max_w;
            }
            if wrap_h {
                entry.1 = max_h;
            }
        }
        measured
    }

    /// Best-effort extent of one group: the sum of each member's own
    /// size plus its margins, ignoring inter-member overlap — a
    /// conservative upper bound suitable for seeding the parent's
    /// wrap-content span before the real solve runs.
    fn group_extent(&self, members: &[WidgetId], measured: &MeasuredSizes) -> (i32, i32) {
        let mut w = 0;
        let mut h = 0;
        for &m in members {
            let Some(widget) = self.arena.get(m) else { continue };
            let (mw, mh) = measured.get(&m).copied().unwrap_or((widget.width, widget.height));
            let extra_w = widget.left.margin as i32 + widget.right.margin as i32;
            let extra_h = widget.top.margin as i32 + widget.bottom.margin as i32;
            w = w.max(mw + extra_w);
            h = h.max(mh + extra_h);
        }
        (w, h)
    }

    fn solve_pass(&mut self, measured: &MeasuredSizes) -> LayoutReport {
        let mut system = LinearSystem::new(self.config);
        let mut chain_axes: HashSet<(WidgetId, Axis)> = HashSet::new();
        let mut chains = Vec::new();

        if self.config.optimization_level.contains(OptimizationLevel::CHAIN) {
            for parent in self.arena.ids().collect::<Vec<_>>() {
                for axis in [Axis::Horizontal, Axis::Vertical] {
                    for c in chain::detect_chains(&self.arena, parent, axis) {
                        for &m in &c.members {
                            chain_axes.insert((m, axis));
                        }
                        chains.push(c);
                    }
                }
            }
        }

        let root = self.root;
        if let Some(w) = self.arena.get_mut(root) {
            w.anchor_mut(AnchorType::Left).target = None;
            w.anchor_mut(AnchorType::Top).target = None;
        }
        {
            // A wrap-content root takes its extent from the group analyzer's
            // measured size rather than its stored `width`/`height`, which
            // may still hold a stale or never-set value.
            let (root_behavior_w, root_behavior_h) = {
                let w = self.arena.get(root).unwrap();
                (w.width_behavior, w.height_behavior)
            };
            let measured_root = measured.get(&root).copied();
            let w = match (root_behavior_w, measured_root) {
                (DimensionBehavior::WrapContent, Some((mw, _))) => mw,
                _ => self.arena.get(root).unwrap().width,
            };
            let h = match (root_behavior_h, measured_root) {
                (DimensionBehavior::WrapContent, Some((_, mh))) => mh,
                _ => self.arena.get(root).unwrap().height,
            };
            if let Some(root_w) = self.arena.get_mut(root) {
                root_w.width = w;
                root_w.height = h;
            }

            let left = compiler::ensure_var(&mut self.arena, &mut system, root, AnchorType::Left);
            let top = compiler::ensure_var(&mut self.arena, &mut system, root, AnchorType::Top);
            system.add_equality_const(left, 0.0, Strength::Fixed);
            system.add_equality_const(top, 0.0, Strength::Fixed);
            let right = compiler::ensure_var(&mut self.arena, &mut system, root, AnchorType::Right);
            let bottom = compiler::ensure_var(&mut self.arena, &mut system, root, AnchorType::Bottom);
            system.add_equality(right, left, w as f64, Strength::Fixed);
            system.add_equality(bottom, top, h as f64, Strength::Fixed);
        }

        let mut report = LayoutReport::default();
        for id in self.arena.ids().collect::<Vec<_>>() {
            if id == root {
                continue;
            }
            match self.arena.get(id).map(|w| w.kind.clone()) {
                Some(WidgetKind::Guideline { .. }) => helpers::compile_guideline(&mut system, &mut self.arena, id),
                Some(WidgetKind::Barrier { .. }) => helpers::compile_barrier(&mut system, &mut self.arena, id),
                Some(WidgetKind::Normal) => {
                    compiler::compile_widget(&mut system, &mut self.arena, measured, &mut report, &chain_axes, id)
                }
                _ => {}
            }
        }
        for c in &chains {
            chain::compile_chain(&mut system, &mut self.arena, c);
        }

        system.minimize();
        report = merge_reports(report, system.take_report());

        for id in self.arena.ids().collect::<Vec<_>>() {
            if id == root {
                continue;
            }
            self.write_back(&mut system, id);
        }
        report
    }

    fn write_back(&mut self, system: &mut LinearSystem, id: WidgetId) {
        let Some(w) = self.arena.get(id) else { return };
        if w.visibility == Visibility::Gone {
            let (x, y) = (w.x, w.y);
            self.set_frame(id, x, y, x, y);
            return;
        }
        let anchors: Vec<Option<crate::solver::VarId>> = [
            w.left.var,
            w.top.var,
            w.right.var,
            w.bottom.var,
        ]
        .to_vec();
        let l = anchors[0].map(|v| system.object_variable_value(v));
        let t = anchors[1].map(|v| system.object_variable_value(v));
        let r = anchors[2].map(|v| system.object_variable_value(v));
        let b = anchors[3].map(|v| system.object_variable_value(v));
        if let (Some(l), Some(t), Some(r), Some(b)) = (l, t, r, b) {
            self.set_frame(id, l, t, r.max(l), b.max(t));
        }
    }
}

fn merge_reports(a: LayoutReport, b: LayoutReport) -> LayoutReport {
    LayoutReport {
        infeasible: a.infeasible + b.infeasible,
        overflow_readback: a.overflow_readback + b.overflow_readback,
        cyclic_match_constraint: a.cyclic_match_constraint + b.cyclic_match_constraint,
        invalid_anchor_pair: a.invalid_anchor_pair + b.invalid_anchor_pair,
        ratio_parse_failure: a.ratio_parse_failure + b.ratio_parse_failure,
        ratio_not_applicable: a.ratio_not_applicable + b.ratio_not_applicable,
        direct_optimizer_conflict: a.direct_optimizer_conflict + b.direct_optimizer_conflict,
        table_overflow: a.table_overflow + b.table_overflow,
    }
}
