// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Per-system configuration.
//!
//! Replaces the source's static/global flags (`DEBUG` booleans, a module-level
//! optimization switch) with one explicit record passed to [`crate::Container`]
//! at construction time.

use bitflags::bitflags;

bitflags! {
    /// Which fast-path optimizers the compiler is permitted to use.
    ///
    /// Mirrors the source's bitmask exactly (bit values are part of the wire
    /// contract in §6 of the design).
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OptimizationLevel: u32 {
        /// No optimizations; every widget is compiled to solver rows.
        const NONE = 0;
        /// Per-anchor direct resolution (component G).
        const DIRECT = 1;
        /// Barrier-aware resolution.
        const BARRIER = 2;
        /// Chain arithmetic fast path (component F direct-optimizer variant).
        const CHAIN = 4;
        /// Skip re-measuring dimensions unaffected by the current pass.
        const DIMENSIONS = 8;
        /// Resolve simple dimension ratios without the solver.
        const RATIO = 16;
        /// Group analyzer (component H) wrap-content partitioning.
        const GROUPS = 32;
        /// The commonly-recommended combination.
        const STANDARD = Self::DIRECT.bits | Self::BARRIER.bits | Self::CHAIN.bits;
    }
}

impl Default for OptimizationLevel {
    fn default() -> Self {
        OptimizationLevel::STANDARD
    }
}

/// Per-[`crate::Container`] configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Which optimizers are enabled for this container.
    pub optimization_level: OptimizationLevel,
    /// Threshold below which a pivot coefficient or constant is clamped to
    /// zero, centralizing the source's scattered `0.001` comparisons.
    pub epsilon: f64,
    /// Safety bound on BFS-restoration iterations before declaring the
    /// system infeasible and publishing best-effort values.
    pub max_bfs_iterations: u32,
    /// Safety bound on goal-optimization iterations.
    pub max_optimize_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            optimization_level: OptimizationLevel::STANDARD,
            epsilon: 1e-3,
            max_bfs_iterations: 10_000,
            max_optimize_iterations: 10_000,
        }
    }
}

impl Config {
    /// Clamp a near-zero value to exactly zero using [`Self::epsilon`].
    #[inline]
    pub(crate) fn clamp_small(&self, x: f64) -> f64 {
        if x.abs() < self.epsilon {
            0.0
        } else {
            x
        }
    }
}
