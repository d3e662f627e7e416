// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The twelve canonical row shapes (component C).
//!
//! Each function fills a freshly-acquired, still-unpivoted [`Row`] with the
//! "expression = 0" form of one constraint shape. They never touch the
//! variable pool or the goal: wiring error/slack variables and inserting the
//! row into the tableau is [`super::system::LinearSystem`]'s job (component
//! B), which keeps the pure row algebra here testable in isolation.

use super::row::Row;
use super::variable::VarId;

/// Zero out-or-insert a coefficient directly, bypassing client-row
/// bookkeeping. Safe here because these functions only ever run against a
/// row that has not yet been registered with the variable pool (see
/// [`super::system::LinearSystem::insert_row`]).
pub(super) fn raw_set(row: &mut Row, v: VarId, c: f64, eps: f64) {
    if c.abs() < eps {
        row.coeffs.remove(&v);
    } else {
        row.coeffs.insert(v, c);
    }
}

pub(super) fn raw_add(row: &mut Row, v: VarId, delta: f64, eps: f64) {
    let cur = row.get(v);
    raw_set(row, v, cur + delta, eps);
}

/// Shape #1: `v = k` ⇒ `v − k`.
pub(super) fn fixed_value(row: &mut Row, v: VarId, k: f64, eps: f64) {
    raw_set(row, v, 1.0, eps);
    row.constant = -k;
}

/// Shape #2: `a = b + m` ⇒ `a − b = m`.
pub(super) fn equality(row: &mut Row, a: VarId, b: VarId, margin: f64, eps: f64) {
    raw_set(row, a, 1.0, eps);
    raw_add(row, b, -1.0, eps);
    row.constant = -margin;
}

/// Shapes #3/#4: `a ≥ b + m` or `a ≤ b + m`, each via one slack `s ≥ 0`.
///
/// `ge == true` builds `a − b − s = m` (form #3); `ge == false` builds
/// `a − b + s = m` (form #4). Returns nothing — the caller supplies the
/// slack variable, already acquired, so the row can be built in one pass.
pub(super) fn inequality(row: &mut Row, a: VarId, b: VarId, slack: VarId, margin: f64, ge: bool, eps: f64) {
    raw_set(row, a, 1.0, eps);
    raw_add(row, b, -1.0, eps);
    raw_add(row, slack, if ge { -1.0 } else { 1.0 }, eps);
    row.constant = -margin;
}

/// Shape #5: centering with bias `β` between `(a → a_t, margin m1)` and
/// `(b → b_t, margin m2)`.
///
/// `(1−β)a − (1−β)a_t + β·b − β·b_t = −m1(1−β) + m2·β`. When `a_t == b_t`
/// this still holds and simply centers on the shared point.
#[allow(clippy::too_many_arguments)]
pub(super) fn centering(
    row: &mut Row,
    a: VarId,
    a_t: VarId,
    m1: f64,
    bias: f64,
    b_t: VarId,
    b: VarId,
    m2: f64,
    eps: f64,
) {
    let beta = bias;
    raw_set(row, a, 1.0 - beta, eps);
    raw_add(row, a_t, -(1.0 - beta), eps);
    raw_add(row, b, beta, eps);
    raw_add(row, b_t, -beta, eps);
    row.constant = -(-m1 * (1.0 - beta) + m2 * beta);
}

/// Shape #6: dimension ratio `a − b = r(c − d)` ⇒ `a − b − r·c + r·d = 0`.
pub(super) fn ratio(row: &mut Row, a: VarId, b: VarId, c: VarId, d: VarId, r: f64, eps: f64) {
    raw_set(row, a, 1.0, eps);
    raw_add(row, b, -1.0, eps);
    raw_add(row, c, -r, eps);
    raw_add(row, d, r, eps);
    row.constant = 0.0;
}

/// Shape #7: percent of container span `a − (1−p)·b − p·c = 0`.
pub(super) fn percent(row: &mut Row, a: VarId, b: VarId, c: VarId, p: f64, eps: f64) {
    raw_set(row, a, 1.0, eps);
    raw_add(row, b, -(1.0 - p), eps);
    raw_add(row, c, -p, eps);
    row.constant = 0.0;
}

/// Shape #8: weighted-equal-dimensions in a chain.
///
/// `(end_i − start_i)·w_next = (end_next − start_next)·w_i`, rearranged to
/// `w_next·end_i − w_next·start_i − w_i·end_next + w_i·start_next = 0`.
/// When both weights are equal (including the "undefined, fall back to 1:1"
/// case) this collapses to the plain equal-span form.
#[allow(clippy::too_many_arguments)]
pub(super) fn chain_weighted(
    row: &mut Row,
    start_i: VarId,
    end_i: VarId,
    w_i: f64,
    start_next: VarId,
    end_next: VarId,
    w_next: f64,
    eps: f64,
) {
    raw_set(row, end_i, w_next, eps);
    raw_add(row, start_i, -w_next, eps);
    raw_add(row, end_next, -w_i, eps);
    raw_add(row, start_next, w_i, eps);
    row.constant = 0.0;
}

/// Shape #9 (one of the pair): `a = b + sin(θ)·r`.
pub(super) fn circular_component(row: &mut Row, a: VarId, b: VarId, component: f64, eps: f64) {
    raw_set(row, a, 1.0, eps);
    raw_add(row, b, -1.0, eps);
    row.constant = -component;
}

/// Shape #12: angle-pair (rotational), `(a_t+a_b)/2 = (b_t+b_b)/2 − angle_component`.
#[allow(clippy::too_many_arguments)]
pub(super) fn angle_pair(
    row: &mut Row,
    a_t: VarId,
    a_b: VarId,
    b_t: VarId,
    b_b: VarId,
    angle_component: f64,
    eps: f64,
) {
    raw_set(row, a_t, 0.5, eps);
    raw_add(row, a_b, 0.5, eps);
    raw_add(row, b_t, -0.5, eps);
    raw_add(row, b_b, -0.5, eps);
    row.constant = -angle_component;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u32) -> VarId {
        VarId(n)
    }

    #[test]
    fn equality_shape() {
        let mut row = Row::default();
        equality(&mut row, v(0), v(1), 5.0, 1e-3);
        assert_eq!(row.get(v(0)), 1.0);
        assert_eq!(row.get(v(1)), -1.0);
        assert_eq!(row.constant, -5.0);
    }

    #[test]
    fn centering_collapses_symmetric_at_half_bias() {
        let mut row = Row::default();
        centering(&mut row, v(0), v(1), 0.0, 0.5, v(2), v(3), 0.0, 1e-3);
        assert_eq!(row.get(v(0)), 0.5);
        assert_eq!(row.get(v(1)), -0.5);
        assert_eq!(row.get(v(2)), -0.5);
        assert_eq!(row.get(v(3)), 0.5);
    }

    #[test]
    fn ratio_shape_matches_definition() {
        let mut row = Row::default();
        ratio(&mut row, v(0), v(1), v(2), v(3), 2.0, 1e-3);
        assert_eq!(row.get(v(2)), -2.0);
        assert_eq!(row.get(v(3)), 2.0);
    }
}
