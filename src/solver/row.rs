// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Pooled sparse rows: `pivot = constant + Σ coeff_i · var_i`.

use linear_map::LinearMap;

use super::variable::{Strength, VarId};

/// A small interned handle to a pooled row.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RowId(pub(crate) u32);

impl RowId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One tableau row.
///
/// The coefficient map is an order-preserving linear map rather than a
/// hash map: rows in this solver are small (a handful of terms at most),
/// so an insertion-ordered `Vec`-backed map gives every operation the
/// O(size) bound §4.1 requires while keeping iteration deterministic and
/// allocation-cheap to reuse across pool checkouts.
#[derive(Clone, Debug, Default)]
pub(crate) struct Row {
    pub pivot: Option<VarId>,
    pub constant: f64,
    pub coeffs: LinearMap<VarId, f64>,
    /// True when the right-hand side is purely a constant (no variable
    /// terms) — a cheap fast path for widgets bound directly to a literal.
    pub is_simple_definition: bool,
    /// Strength of the constraint that produced this row, retained only as
    /// a tie-break hint for BFS variable selection (§4.2); rows built
    /// internally (the goal, chain helper rows) carry `Strength::None`.
    pub strength: Strength,
}

impl Row {
    pub fn get(&self, v: VarId) -> f64 {
        self.coeffs.get(&v).copied().unwrap_or(0.0)
    }

    fn reset(&mut self) {
        self.pivot = None;
        self.constant = 0.0;
        self.coeffs.clear();
        self.is_simple_definition = true;
        self.strength = Strength::None;
    }
}

/// Pool of rows, reused between layout passes.
#[derive(Default)]
pub(crate) struct RowPool {
    rows: Vec<Row>,
    free: Vec<u32>,
}

impl RowPool {
    pub fn acquire(&mut self) -> RowId {
        if let Some(idx) = self.free.pop() {
            self.rows[idx as usize].reset();
            RowId(idx)
        } else {
            let id = RowId(self.rows.len() as u32);
            self.rows.push(Row::default());
            id
        }
    }

    pub fn release(&mut self, id: RowId) {
        self.free.push(id.0);
    }

    pub fn get(&self, id: RowId) -> &Row {
        &self.rows[id.index()]
    }

    pub fn get_mut(&mut self, id: RowId) -> &mut Row {
        &mut self.rows[id.index()]
    }

    pub fn reset(&mut self) {
        self.rows.clear();
        self.free.clear();
    }

    /// Count of rows currently checked out (not on the free list) —
    /// the "peak pooled-row count" property tested in §8.
    pub fn live_count(&self) -> usize {
        self.rows.len() - self.free.len()
    }
}
