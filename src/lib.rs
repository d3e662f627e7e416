// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! A two-dimensional constraint layout engine: anchors, chains, ratios,
//! bias, and guidelines, solved by a sparse Simplex core with two fast
//! paths that bypass the solver when they can.
//!
//! The host builds a [`Container`], connects widget anchors via
//! [`Container::connect`] and its sibling setters, supplies a
//! [`MeasureHost`] for content that needs measuring, and calls
//! [`Container::layout`] once per pass.

mod chain;
mod compiler;
mod config;
mod container;
mod direct;
mod error;
mod group;
mod helpers;
mod model;
mod ratio;
mod solver;

pub use config::{Config, OptimizationLevel};
pub use container::{Container, MeasureHost, MeasureSpec, Measurement, NullMeasureHost};
pub use error::{LayoutFault, LayoutReport};
pub use model::{
    Anchor, AnchorType, Axis, BarrierSide, ChainStyle, DimensionBehavior, DimensionRatio,
    GuidelineOrientation, GuidelineRelative, MatchConstraintDefault, Visibility, Widget, WidgetId,
    WidgetKind,
};
pub use ratio::parse_dimension_ratio;
pub use solver::Strength;
