// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The Simplex core (component B): BFS restoration, pivot optimization,
//! goal rebuilding, and value readback.

use log::trace;

use crate::config::Config;
use crate::error::{LayoutFault, LayoutReport};

use super::constructors as shape;
use super::row::{Row, RowId, RowPool};
use super::variable::{Strength, VarId, VarKind, VariablePool};

/// Outcome of a [`LinearSystem::minimize`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The goal was minimized to a genuine optimum.
    Ok,
    /// The iteration budget was exhausted; best-effort values are published.
    Infeasible { iterations: u32 },
}

/// A sparse tableau Simplex-style linear solver.
///
/// One instance is owned per layout pass. All state — variables, rows, the
/// goal — lives in pools owned by this struct; nothing is shared across
/// containers (see the design's concurrency model).
pub struct LinearSystem {
    vars: VariablePool,
    rows: RowPool,
    /// Rows currently installed in the tableau (each has a pivot).
    table: Vec<RowId>,
    goal: RowId,
    config: Config,
    report: LayoutReport,
}

impl LinearSystem {
    pub fn new(config: Config) -> Self {
        let mut rows = RowPool::default();
        let goal = rows.acquire();
        LinearSystem {
            vars: VariablePool::default(),
            rows,
            table: Vec::new(),
            goal,
            config,
            report: LayoutReport::default(),
        }
    }

    fn eps(&self) -> f64 {
        self.config.epsilon
    }

    fn fault(&mut self, fault: LayoutFault) {
        self.report.record(fault);
    }

    /// Drain the fault tally accumulated since the last call.
    pub fn take_report(&mut self) -> LayoutReport {
        std::mem::take(&mut self.report)
    }

    // ---- variable helpers -------------------------------------------------

    /// Create a fresh UNRESTRICTED variable representing an anchor position
    /// (`createObjectVariable` in §4.2).
    pub fn new_object_variable(&mut self) -> VarId {
        self.vars.acquire(VarKind::Unrestricted)
    }

    /// Read back a solved variable's value as an integer pixel coordinate,
    /// collapsing out-of-range results to 0 per §4.2's numeric policy.
    pub fn object_variable_value(&mut self, var: VarId) -> i32 {
        let value = self.vars.get(var).computed_value;
        const SANE_MAX: f64 = (i32::MAX / 2) as f64;
        if !value.is_finite() || value.abs() > SANE_MAX {
            self.fault(LayoutFault::OverflowReadback);
            0
        } else {
            value.round() as i32
        }
    }

    // ---- row-level bookkeeping ---------------------------------------------

    fn register_clients_of(&mut self, row_id: RowId) {
        let vars: Vec<VarId> = self.rows.get(row_id).coeffs.iter().map(|(&v, _)| v).collect();
        for v in vars {
            let clients = &mut self.vars.get_mut(v).client_rows;
            if !clients.contains(&row_id) {
                clients.push(row_id);
            }
        }
    }

    /// Bookkeeping-aware coefficient set; only valid once `row_id` is
    /// already installed in the tableau (i.e. after its first pivot), since
    /// it updates the referenced variable's client-row list.
    fn row_set_coeff(&mut self, row_id: RowId, v: VarId, c: f64) {
        let eps = self.eps();
        let row = self.rows.get_mut(row_id);
        let had = row.coeffs.contains_key(&v);
        shape::raw_set(row, v, c, eps);
        let has_now = row.coeffs.contains_key(&v);
        if had != has_now {
            let clients = &mut self.vars.get_mut(v).client_rows;
            if has_now {
                if !clients.contains(&row_id) {
                    clients.push(row_id);
                }
            } else {
                clients.retain(|&r| r != row_id);
            }
        }
    }

    fn row_add_coeff(&mut self, row_id: RowId, v: VarId, delta: f64) {
        let cur = self.rows.get(row_id).get(v);
        self.row_set_coeff(row_id, v, cur + delta);
    }

    /// `target += alpha * source` (bookkeeping-aware; both rows already
    /// tracked in the tableau).
    fn merge_row_scaled(&mut self, target: RowId, source: RowId, alpha: f64) {
        let src = self.rows.get(source).clone();
        self.rows.get_mut(target).constant += alpha * src.constant;
        for (&v, &c) in src.coeffs.iter() {
            self.row_add_coeff(target, v, alpha * c);
        }
    }

    /// Same, but for a row not yet registered with the pool (pre-insertion
    /// substitution); bypasses client bookkeeping since the row may still
    /// be discarded before ever being tracked.
    fn merge_row_scaled_raw(&mut self, target: RowId, source: RowId, alpha: f64) {
        let eps = self.eps();
        let src = self.rows.get(source).clone();
        let row = self.rows.get_mut(target);
        row.constant += alpha * src.constant;
        for (&v, &c) in src.coeffs.iter() {
            shape::raw_add(row, v, alpha * c, eps);
        }
    }

    /// Substitute out every variable in `row_id` that is already some other
    /// row's pivot, repeating until none remain (§4.2 "row replacement on
    /// add", step 1).
    fn substitute_all_raw(&mut self, row_id: RowId) {
        let eps = self.eps();
        loop {
            let found = self
                .rows
                .get(row_id)
                .coeffs
                .iter()
                .find_map(|(&v, &c)| self.vars.get(v).defining_row.map(|r| (v, c, r)));
            match found {
                None => break,
                Some((v, c, def_row)) => {
                    let row = self.rows.get_mut(row_id);
                    shape::raw_set(row, v, 0.0, eps);
                    self.merge_row_scaled_raw(row_id, def_row, c);
                }
            }
        }
    }

    fn ensure_positive_constant(&mut self, row_id: RowId) {
        if self.rows.get(row_id).constant < 0.0 {
            let row = self.rows.get_mut(row_id);
            row.constant = -row.constant;
            let vars: Vec<VarId> = row.coeffs.iter().map(|(&v, _)| v).collect();
            for v in vars {
                let c = row.get(v);
                shape::raw_set(row, v, -c, self.config.epsilon);
            }
        }
    }

    /// An UNRESTRICTED variable with a negative coefficient is best;
    /// failing that any UNRESTRICTED; failing that a restricted variable
    /// with a negative coefficient. Ties broken by lower id.
    fn pick_row_variable(&self, row_id: RowId) -> Option<VarId> {
        let row = self.rows.get(row_id);
        let mut unrestricted_neg: Option<VarId> = None;
        let mut unrestricted: Option<VarId> = None;
        let mut restricted_neg: Option<VarId> = None;
        for (&v, &c) in row.coeffs.iter() {
            let better = |cur: Option<VarId>| cur.map_or(true, |u| v.0 < u.0);
            if self.vars.get(v).kind == VarKind::Unrestricted {
                if c < 0.0 {
                    if better(unrestricted_neg) {
                        unrestricted_neg = Some(v);
                    }
                } else if better(unrestricted) {
                    unrestricted = Some(v);
                }
            } else if c < 0.0 && better(restricted_neg) {
                restricted_neg = Some(v);
            }
        }
        unrestricted_neg.or(unrestricted).or(restricted_neg)
    }

    /// Move `p` (the row's current pivot, if any) back onto the RHS with
    /// coefficient −1, remove `v`, make `v` the new pivot, and divide
    /// through by `−a` (§4.2 "pivot operation").
    fn pivot_row(&mut self, row_id: RowId, subject: VarId) {
        let a = self.rows.get(row_id).get(subject);
        debug_assert!(a.abs() > self.eps());
        let old_pivot = self.rows.get(row_id).pivot;

        self.row_set_coeff(row_id, subject, 0.0);
        if let Some(p) = old_pivot {
            self.row_set_coeff(row_id, p, -1.0);
        }

        let divisor = -a;
        {
            let row = self.rows.get_mut(row_id);
            row.pivot = Some(subject);
            row.constant /= divisor;
            let vars: Vec<VarId> = row.coeffs.iter().map(|(&v, _)| v).collect();
            for v in vars {
                let c = row.get(v) / divisor;
                shape::raw_set(row, v, c, self.config.epsilon);
            }
            row.is_simple_definition = row.coeffs.is_empty();
        }

        self.vars.get_mut(subject).defining_row = Some(row_id);
        if let Some(p) = old_pivot {
            self.vars.get_mut(p).defining_row = None;
        }
    }

    /// After `subject` becomes `row_id`'s pivot, eliminate it from every
    /// other row that still references it on the RHS (maintaining "pivot
    /// never appears on any row's RHS").
    fn propagate_new_pivot(&mut self, subject: VarId, row_id: RowId) {
        let clients: Vec<RowId> = self
            .vars
            .get(subject)
            .client_rows
            .iter()
            .copied()
            .filter(|&r| r != row_id)
            .collect();
        for cr in clients {
            let coeff = self.rows.get(cr).get(subject);
            if coeff != 0.0 {
                self.row_set_coeff(cr, subject, 0.0);
                self.merge_row_scaled(cr, row_id, coeff);
            }
        }
        self.vars.get_mut(subject).client_rows.clear();
    }

    /// Insert a freshly-built (unpivoted) row into the tableau, following
    /// §4.2's "row replacement on add" algorithm. `row_id` must not yet be
    /// registered as anyone's client.
    fn insert_row(&mut self, row_id: RowId, strength: Strength) {
        self.rows.get_mut(row_id).strength = strength;
        self.substitute_all_raw(row_id);
        self.ensure_positive_constant(row_id);

        match self.pick_row_variable(row_id) {
            Some(subject) => {
                self.pivot_row(row_id, subject);
                self.register_clients_of(row_id);
                self.table.push(row_id);
                self.propagate_new_pivot(subject, row_id);
            }
            None => {
                if self.rows.get(row_id).coeffs.is_empty() {
                    if self.rows.get(row_id).constant.abs() > self.eps() {
                        self.fault(LayoutFault::Infeasible { iterations: 0 });
                    }
                    self.rows.release(row_id);
                } else {
                    // No natural subject: introduce an extra slack variable
                    // (caller's responsibility per §4.2), coefficient −1 so
                    // it is immediately eligible as a restricted-negative
                    // pivot.
                    let extra = self.vars.acquire(VarKind::Slack);
                    self.row_set_coeff(row_id, extra, -1.0);
                    self.pivot_row(row_id, extra);
                    self.register_clients_of(row_id);
                    self.table.push(row_id);
                    self.propagate_new_pivot(extra, row_id);
                }
            }
        }
    }

    /// Wire two ERROR variables (`ep − em`) into `row_id` and register their
    /// weighted contribution in the goal, unless `strength` is
    /// [`Strength::Fixed`] (hard constraints get no error terms at all).
    fn wire_soft_errors(&mut self, row_id: RowId, strength: Strength) {
        if strength.is_hard() {
            return;
        }
        let eps = self.eps();
        let ep = self.vars.acquire(VarKind::Error);
        let em = self.vars.acquire(VarKind::Error);
        self.vars.get_mut(ep).strength = strength;
        self.vars.get_mut(em).strength = strength;
        let row = self.rows.get_mut(row_id);
        shape::raw_add(row, ep, 1.0, eps);
        shape::raw_add(row, em, -1.0, eps);
    }

    // ---- public constraint operations (§4.2) -------------------------------

    /// `add_constraint` (§4.2): install an arbitrary linear combination
    /// `Σ coeff·var = constant`, for shapes with no dedicated constructor
    /// (the chain handler's gap-equalization spans four variables at once).
    pub fn add_constraint(&mut self, terms: &[(VarId, f64)], constant: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        let eps = self.eps();
        {
            let row = self.rows.get_mut(row_id);
            for &(v, c) in terms {
                shape::raw_add(row, v, c, eps);
            }
            row.constant = -constant;
        }
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    pub fn add_equality_const(&mut self, v: VarId, constant: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        shape::fixed_value(self.rows.get_mut(row_id), v, constant, self.eps());
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    pub fn add_equality(&mut self, a: VarId, b: VarId, margin: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        shape::equality(self.rows.get_mut(row_id), a, b, margin, self.eps());
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    pub fn add_greater_than(&mut self, a: VarId, b: VarId, margin: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        let slack = self.vars.acquire(VarKind::Slack);
        shape::inequality(self.rows.get_mut(row_id), a, b, slack, margin, true, self.eps());
        self.insert_row(row_id, strength);
    }

    pub fn add_lower_than(&mut self, a: VarId, b: VarId, margin: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        let slack = self.vars.acquire(VarKind::Slack);
        shape::inequality(self.rows.get_mut(row_id), a, b, slack, margin, false, self.eps());
        self.insert_row(row_id, strength);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_centering(
        &mut self,
        begin: VarId,
        begin_target: VarId,
        m_begin: f64,
        bias: f64,
        end_target: VarId,
        end: VarId,
        m_end: f64,
        strength: Strength,
    ) {
        let row_id = self.rows.acquire();
        shape::centering(
            self.rows.get_mut(row_id),
            begin,
            begin_target,
            m_begin,
            bias,
            end_target,
            end,
            m_end,
            self.eps(),
        );
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    pub fn add_ratio(&mut self, a: VarId, b: VarId, c: VarId, d: VarId, ratio: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        shape::ratio(self.rows.get_mut(row_id), a, b, c, d, ratio, self.eps());
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    pub fn add_percent(&mut self, a: VarId, b: VarId, c: VarId, percent: f64, strength: Strength) {
        let row_id = self.rows.acquire();
        shape::percent(self.rows.get_mut(row_id), a, b, c, percent, self.eps());
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_chain_weighted(
        &mut self,
        start_i: VarId,
        end_i: VarId,
        w_i: f64,
        start_next: VarId,
        end_next: VarId,
        w_next: f64,
        strength: Strength,
    ) {
        let row_id = self.rows.acquire();
        shape::chain_weighted(
            self.rows.get_mut(row_id),
            start_i,
            end_i,
            w_i,
            start_next,
            end_next,
            w_next,
            self.eps(),
        );
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    /// Shape #9: two equalities `a = b + sin(θ)·r` and `a' = b' + cos(θ)·r`.
    pub fn add_circular(
        &mut self,
        a: VarId,
        b: VarId,
        a2: VarId,
        b2: VarId,
        angle_rad: f64,
        radius: f64,
        strength: Strength,
    ) {
        let row1 = self.rows.acquire();
        shape::circular_component(self.rows.get_mut(row1), a, b, angle_rad.sin() * radius, self.eps());
        self.wire_soft_errors(row1, strength);
        self.insert_row(row1, strength);

        let row2 = self.rows.acquire();
        shape::circular_component(self.rows.get_mut(row2), a2, b2, angle_rad.cos() * radius, self.eps());
        self.wire_soft_errors(row2, strength);
        self.insert_row(row2, strength);
    }

    pub fn add_baseline(&mut self, baseline: VarId, top: VarId, baseline_distance: f64) {
        self.add_equality(baseline, top, baseline_distance, Strength::Fixed);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_angle_pair(
        &mut self,
        a_t: VarId,
        a_b: VarId,
        b_t: VarId,
        b_b: VarId,
        angle_component: f64,
        strength: Strength,
    ) {
        let row_id = self.rows.acquire();
        shape::angle_pair(self.rows.get_mut(row_id), a_t, a_b, b_t, b_b, angle_component, self.eps());
        self.wire_soft_errors(row_id, strength);
        self.insert_row(row_id, strength);
    }

    /// Shape #10: barrier rows, `v ≥ v_i` (MAX side) or `v ≤ v_i` (MIN side)
    /// for each referenced child, always at [`Strength::Fixed`] (§4.8).
    pub fn add_barrier(&mut self, v: VarId, children: &[VarId], max_side: bool) {
        for &child in children {
            if max_side {
                self.add_greater_than(v, child, 0.0, Strength::Fixed);
            } else {
                self.add_lower_than(v, child, 0.0, Strength::Fixed);
            }
        }
    }

    // ---- minimize -----------------------------------------------------------

    fn rebuild_goal_from_errors(&mut self) {
        let goal = self.goal;
        let ids: Vec<VarId> = self.rows.get(goal).coeffs.iter().map(|(&v, _)| v).collect();
        for v in ids {
            self.row_set_coeff(goal, v, 0.0);
        }
        self.rows.get_mut(goal).constant = 0.0;

        let errors: Vec<VarId> = self
            .vars
            .in_use_ids()
            .filter(|&v| self.vars.get(v).kind == VarKind::Error)
            .collect();
        for v in errors {
            let w = self.vars.get(v).strength.weight();
            if w != 0.0 {
                self.row_add_coeff(goal, v, w);
            }
        }
    }

    /// BFS restoration (§4.2 step c): while any restricted-pivot row has a
    /// negative constant, pivot it on the variable minimizing `d_j/a_j`
    /// among its positive-coefficient terms. Ties are broken by lower
    /// variable id, matching the determinism guarantee of §5 (the source's
    /// two tie-break formulas are acknowledged in §9 as equally valid).
    fn enforce_bfs(&mut self) -> SolveOutcome {
        let max_iter = self.config.max_bfs_iterations;
        for iterations in 0..max_iter {
            let bad_row = self.table.iter().copied().find(|&r| {
                let row = self.rows.get(r);
                row.pivot
                    .map(|p| self.vars.get(p).kind.is_restricted())
                    .unwrap_or(false)
                    && row.constant < -self.eps()
            });
            let Some(bad_row) = bad_row else {
                return SolveOutcome::Ok;
            };

            let goal = self.goal;
            let mut best: Option<(VarId, f64)> = None;
            for (&v, &a) in self.rows.get(bad_row).coeffs.iter() {
                if a > self.eps() {
                    let d = self.rows.get(goal).get(v);
                    let ratio_val = d / a;
                    let better = match best {
                        None => true,
                        Some((bv, br)) => ratio_val < br - self.eps() || (ratio_val < br + self.eps() && v.0 < bv.0),
                    };
                    if better {
                        best = Some((v, ratio_val));
                    }
                }
            }
            match best {
                None => return SolveOutcome::Infeasible { iterations },
                Some((v, _)) => {
                    self.pivot_row(bad_row, v);
                    self.propagate_new_pivot(v, bad_row);
                }
            }
        }
        SolveOutcome::Infeasible { iterations: max_iter }
    }

    /// Goal optimization (§4.2 step d).
    fn optimize(&mut self) -> SolveOutcome {
        let max_iter = self.config.max_optimize_iterations;
        let goal = self.goal;
        for iterations in 0..max_iter {
            let candidate = self
                .rows
                .get(goal)
                .coeffs
                .iter()
                .filter(|&(_, &c)| c < -self.eps())
                .map(|(&v, _)| v)
                .min_by_key(|v| v.0);
            let Some(candidate) = candidate else {
                return SolveOutcome::Ok;
            };

            let mut best: Option<(RowId, f64)> = None;
            for &r in &self.table {
                let row = self.rows.get(r);
                let Some(p) = row.pivot else { continue };
                if !self.vars.get(p).kind.is_restricted() {
                    continue;
                }
                let a = row.get(candidate);
                if a < -self.eps() {
                    let ratio_val = (-row.constant) / a;
                    let better = match best {
                        None => true,
                        Some((br_id, br)) => {
                            ratio_val < br - self.eps() || (ratio_val < br + self.eps() && r.0 < br_id.0)
                        }
                    };
                    if better {
                        best = Some((r, ratio_val));
                    }
                }
            }
            match best {
                None => return SolveOutcome::Infeasible { iterations },
                Some((r, _)) => {
                    self.pivot_row(r, candidate);
                    self.propagate_new_pivot(candidate, r);
                }
            }
        }
        SolveOutcome::Infeasible { iterations: max_iter }
    }

    /// Minimize the goal and read computed values back onto every variable.
    pub fn minimize(&mut self) -> SolveOutcome {
        self.rebuild_goal_from_errors();
        self.substitute_all_raw(self.goal);

        let outcome = match self.enforce_bfs() {
            SolveOutcome::Ok => self.optimize(),
            infeasible => {
                self.fault(match infeasible {
                    SolveOutcome::Infeasible { iterations } => LayoutFault::Infeasible { iterations },
                    SolveOutcome::Ok => unreachable!(),
                });
                infeasible
            }
        };
        if let SolveOutcome::Infeasible { iterations } = outcome {
            trace!("minimize: infeasible after {iterations} iterations, publishing best-effort values");
            self.fault(LayoutFault::Infeasible { iterations });
        }

        for v in self.vars.in_use_ids().collect::<Vec<_>>() {
            let value = match self.vars.get(v).defining_row {
                Some(r) => self.rows.get(r).constant,
                None => 0.0,
            };
            self.vars.get_mut(v).computed_value = self.config.clamp_small(value);
        }
        outcome
    }

    /// Release all pooled rows and variable ids, ready for the next pass.
    pub fn reset(&mut self) {
        self.vars.reset();
        self.rows.reset();
        self.table.clear();
        self.goal = self.rows.acquire();
        self.report = LayoutReport::default();
    }

    /// Peak pooled-row count currently checked out (pool-discipline test).
    pub fn live_row_count(&self) -> usize {
        self.rows.live_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sys() -> LinearSystem {
        LinearSystem::new(Config::default())
    }

    #[test]
    fn simple_equality_solves() {
        let mut s = sys();
        let a = s.new_object_variable();
        s.add_equality_const(a, 42.0, Strength::Fixed);
        s.minimize();
        assert_eq!(s.object_variable_value(a), 42);
    }

    #[test]
    fn equality_chain_propagates() {
        let mut s = sys();
        let a = s.new_object_variable();
        let b = s.new_object_variable();
        let c = s.new_object_variable();
        s.add_equality_const(a, 10.0, Strength::Fixed);
        s.add_equality(b, a, 5.0, Strength::Fixed); // b = a + 5
        s.add_equality(c, b, 5.0, Strength::Fixed); // c = b + 5
        s.minimize();
        assert_eq!(s.object_variable_value(a), 10);
        assert_eq!(s.object_variable_value(b), 15);
        assert_eq!(s.object_variable_value(c), 20);
    }

    #[test]
    fn centered_between_two_fixed_points() {
        let mut s = sys();
        let left_target = s.new_object_variable();
        let right_target = s.new_object_variable();
        let left = s.new_object_variable();
        let right = s.new_object_variable();
        s.add_equality_const(left_target, 0.0, Strength::Fixed);
        s.add_equality_const(right_target, 1000.0, Strength::Fixed);
        // width = 100, fixed
        s.add_equality(right, left, 100.0, Strength::Fixed);
        s.add_centering(
            left,
            left_target,
            0.0,
            0.5,
            right_target,
            right,
            0.0,
            Strength::Highest,
        );
        s.minimize();
        assert_eq!(s.object_variable_value(left), 450);
        assert_eq!(s.object_variable_value(right), 550);
    }

    #[test]
    fn bias_quarter() {
        let mut s = sys();
        let left_target = s.new_object_variable();
        let right_target = s.new_object_variable();
        let left = s.new_object_variable();
        let right = s.new_object_variable();
        s.add_equality_const(left_target, 0.0, Strength::Fixed);
        s.add_equality_const(right_target, 1000.0, Strength::Fixed);
        s.add_equality(right, left, 100.0, Strength::Fixed);
        s.add_centering(
            left,
            left_target,
            0.0,
            0.25,
            right_target,
            right,
            0.0,
            Strength::Highest,
        );
        s.minimize();
        assert_eq!(s.object_variable_value(left), 225);
        assert_eq!(s.object_variable_value(right), 325);
    }

    #[test]
    fn inequality_respects_slack() {
        let mut s = sys();
        let a = s.new_object_variable();
        let b = s.new_object_variable();
        s.add_equality_const(b, 10.0, Strength::Fixed);
        s.add_greater_than(a, b, 5.0, Strength::Fixed);
        // Minimal `a` is not pinned otherwise, so weakly pull it toward b+5.
        s.add_equality(a, b, 5.0, Strength::Low);
        s.minimize();
        assert!(s.object_variable_value(a) >= 15);
    }

    #[test]
    fn reset_restores_pool_discipline() {
        let mut s = sys();
        let a = s.new_object_variable();
        s.add_equality_const(a, 1.0, Strength::Fixed);
        s.minimize();
        let first_live = s.live_row_count();
        s.reset();
        let a = s.new_object_variable();
        s.add_equality_const(a, 1.0, Strength::Fixed);
        s.minimize();
        assert_eq!(s.live_row_count(), first_live);
    }
}
