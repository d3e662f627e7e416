// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The internal fault taxonomy.
//!
//! None of these cross the host boundary as a panic or an `Err` from
//! [`crate::Container::layout`]; each is logged at an appropriate level and
//! tallied into a [`LayoutReport`] returned from the pass that observed it.

use thiserror::Error;

/// A single fault observed during compilation or solving.
///
/// This enum exists for diagnostics and tests; the layout pass always
/// recovers (per §7 of the design: "no panics, no abort").
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutFault {
    /// BFS restoration could not drive every restricted-pivot row's constant
    /// non-negative within the iteration budget.
    #[error("linear system infeasible after {iterations} iterations")]
    Infeasible {
        /// Iterations attempted before giving up.
        iterations: u32,
    },

    /// A solved variable's value fell outside the sane pixel range and was
    /// replaced with 0 on writeback.
    #[error("solved value out of range, replaced with 0")]
    OverflowReadback,

    /// The group analyzer detected a cycle while partitioning; the whole
    /// container was solved as a single group instead.
    #[error("cyclic match-constraint dependency, falling back to full solve")]
    CyclicMatchConstraint,

    /// `connect` was called with an incompatible anchor-type pair; the
    /// connection was rejected.
    #[error("invalid anchor type pair, connection rejected")]
    InvalidAnchorPair,

    /// A dimension-ratio string failed to parse; the ratio remains disabled.
    #[error("malformed dimension ratio string")]
    RatioParseFailure,

    /// A widget carries a parsed dimension ratio but neither axis is
    /// `MatchConstraint`, so there is no driven axis for the ratio to apply
    /// to; the ratio is ignored.
    #[error("dimension ratio set but neither axis is MATCH_CONSTRAINT")]
    RatioNotApplicable,

    /// A resolution node in the direct optimizer received more than one
    /// resolving input; direct optimization was abandoned for that anchor.
    #[error("direct optimizer conflict, deferring to solver")]
    DirectOptimizerConflict,

    /// Pool capacity was reached and the backing storage was doubled.
    #[error("pool table doubled")]
    TableOverflow,
}

/// Tally of faults observed during one [`crate::Container::layout`] pass.
///
/// Returned to the host instead of a `Result`, since every condition here is
/// already handled internally (best-effort values published, connections
/// rejected, partitions abandoned); there is nothing left for the host to
/// recover from, only to observe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Number of infeasible-system occurrences.
    pub infeasible: u32,
    /// Number of out-of-range readbacks collapsed to 0.
    pub overflow_readback: u32,
    /// Number of cyclic match-constraint fallbacks.
    pub cyclic_match_constraint: u32,
    /// Number of rejected anchor connections.
    pub invalid_anchor_pair: u32,
    /// Number of ratio parse failures.
    pub ratio_parse_failure: u32,
    /// Number of ratios set on a widget with neither axis MATCH_CONSTRAINT.
    pub ratio_not_applicable: u32,
    /// Number of abandoned direct-optimizer resolutions.
    pub direct_optimizer_conflict: u32,
    /// Number of pool table doublings.
    pub table_overflow: u32,
}

impl LayoutReport {
    /// Record one fault, logging it at a level appropriate to its severity.
    pub(crate) fn record(&mut self, fault: LayoutFault) {
        match fault {
            LayoutFault::Infeasible { iterations } => {
                self.infeasible += 1;
                log::warn!("{fault}: {iterations} iterations");
            }
            LayoutFault::OverflowReadback => {
                self.overflow_readback += 1;
                log::warn!("{fault}");
            }
            LayoutFault::CyclicMatchConstraint => {
                self.cyclic_match_constraint += 1;
                log::debug!("{fault}");
            }
            LayoutFault::InvalidAnchorPair => {
                self.invalid_anchor_pair += 1;
                log::debug!("{fault}");
            }
            LayoutFault::RatioParseFailure => {
                self.ratio_parse_failure += 1;
                log::debug!("{fault}");
            }
            LayoutFault::RatioNotApplicable => {
                self.ratio_not_applicable += 1;
                log::debug!("{fault}");
            }
            LayoutFault::DirectOptimizerConflict => {
                self.direct_optimizer_conflict += 1;
                log::trace!("{fault}");
            }
            LayoutFault::TableOverflow => {
                self.table_overflow += 1;
                log::trace!("{fault}");
            }
        }
    }

    /// True if no fault was observed this pass.
    pub fn is_clean(&self) -> bool {
        *self == LayoutReport::default()
    }
}
