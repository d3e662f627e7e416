// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! End-to-end scenarios (S1-S6) driven entirely through the public
//! `Container` API, matching the concrete layouts used during design.

use conlay::{
    AnchorType, Axis, ChainStyle, Config, Container, DimensionBehavior, MeasureHost, MeasureSpec,
    Measurement, NullMeasureHost, Strength, Visibility,
};

fn frame(c: &Container, id: conlay::WidgetId) -> (i32, i32, i32, i32) {
    let w = c.widget(id).unwrap();
    (w.x, w.y, w.x + w.width, w.y + w.height)
}

/// S1 - centered between parent sides.
#[test]
fn centered_between_parent_sides() {
    let mut c = Container::new(Config::default(), 1000, 500);
    let root = c.root();
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 100, 50);
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);
    c.set_bias(child, Axis::Horizontal, 0.5);

    c.layout(&mut NullMeasureHost);

    let (l, _, r, _) = frame(&c, child);
    assert_eq!(l, 450);
    assert_eq!(r, 550);
}

/// S2 - bias 0.25.
#[test]
fn bias_quarter() {
    let mut c = Container::new(Config::default(), 1000, 500);
    let root = c.root();
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 100, 50);
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);
    c.set_bias(child, Axis::Horizontal, 0.25);

    c.layout(&mut NullMeasureHost);

    let (l, _, r, _) = frame(&c, child);
    assert_eq!(l, 225);
    assert_eq!(r, 325);
}

/// S4 - MATCH_CONSTRAINT width driven by a 2:1 ratio against a fixed height.
#[test]
fn ratio_drives_match_constraint_width() {
    let mut c = Container::new(Config::default(), 1000, 500);
    let root = c.root();
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 0, 100);
    c.set_dimension_behavior(child, Axis::Horizontal, DimensionBehavior::MatchConstraint);
    c.set_dimension_behavior(child, Axis::Vertical, DimensionBehavior::Fixed);
    assert!(c.set_dimension_ratio(child, "2:1"));
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Top, root, AnchorType::Top, 0.0, Strength::Fixed);

    c.layout(&mut NullMeasureHost);

    let w = c.widget(child).unwrap();
    assert!((w.width - 200).abs() <= 1, "expected width ~200, got {}", w.width);
}

/// MATCH_CONSTRAINT/Spread (no ratio): a 0dp-style child pinned to both
/// parent edges must stretch to fill the connected span, not collapse.
#[test]
fn match_constraint_spread_fills_connected_span() {
    let mut c = Container::new(Config::default(), 1000, 500);
    let root = c.root();
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 0, 50);
    c.set_dimension_behavior(child, Axis::Horizontal, DimensionBehavior::MatchConstraint);
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 20.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 10.0, Strength::Fixed);
    c.connect(child, AnchorType::Top, root, AnchorType::Top, 0.0, Strength::Fixed);

    c.layout(&mut NullMeasureHost);

    let (l, _, r, _) = frame(&c, child);
    assert_eq!(l, 20);
    assert_eq!(r, 990);
    assert!(l <= r);
}

/// S6 - GONE propagation: a GONE widget's own margin is replaced by its
/// neighbor's gone-margin.
#[test]
fn gone_widget_uses_gone_margin() {
    let mut c = Container::new(Config::default(), 1000, 200);
    let root = c.root();
    let a = c.add_widget(root);
    let b = c.add_widget(root);
    let cc = c.add_widget(root);

    c.set_frame(a, 0, 0, 100, 50);
    c.set_frame(b, 0, 0, 50, 50);
    c.set_frame(cc, 0, 0, 40, 50);

    c.connect(a, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(a, AnchorType::Right, b, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(b, AnchorType::Left, a, AnchorType::Right, 0.0, Strength::Fixed);
    c.connect(b, AnchorType::Right, cc, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(cc, AnchorType::Left, b, AnchorType::Right, 30.0, Strength::Fixed);
    c.set_anchor_gone_margin(cc, AnchorType::Left, 30.0);
    c.connect(cc, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);

    c.set_visibility(b, Visibility::Gone);

    c.layout(&mut NullMeasureHost);

    let (a_l, _, a_r, _) = frame(&c, a);
    let (c_l, _, c_r, _) = frame(&c, cc);
    assert_eq!(a_l, 0);
    assert_eq!(a_r, 100);
    assert_eq!(c_l, 130);
    assert_eq!(c_r, 170);
}

/// S5 - wrap-content parent sized from a single child plus its margins.
struct FixedHost;
impl MeasureHost for FixedHost {
    fn measure(&mut self, _w: conlay::WidgetId, _h: MeasureSpec, _v: MeasureSpec) -> Measurement {
        Measurement { width: 75, height: 20 }
    }
}

#[test]
fn wrap_content_parent_sizes_to_child() {
    let mut c = Container::new(Config::default(), 0, 0);
    let root = c.root();
    c.set_dimension_behavior(root, Axis::Horizontal, DimensionBehavior::WrapContent);
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 75, 20);
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 10.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 15.0, Strength::Fixed);

    c.layout(&mut FixedHost);

    let root_w = c.widget(root).unwrap();
    assert!(root_w.width >= 100, "expected wrap-content width >= 100, got {}", root_w.width);
}

/// S3 - chain SPREAD with three equal-width widgets distributes gaps
/// roughly evenly (qualitative check given the chain handler's simplified
/// gap-equalization encoding).
#[test]
fn chain_spread_orders_widgets_left_to_right() {
    let mut c = Container::new(Config::default(), 600, 100);
    let root = c.root();
    let a = c.add_widget(root);
    let b = c.add_widget(root);
    let cc = c.add_widget(root);
    for w in [a, b, cc] {
        c.set_frame(w, 0, 0, 50, 50);
        c.set_chain_style(w, Axis::Horizontal, ChainStyle::Spread);
    }

    c.connect(a, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(a, AnchorType::Right, b, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(b, AnchorType::Left, a, AnchorType::Right, 0.0, Strength::Fixed);
    c.connect(b, AnchorType::Right, cc, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(cc, AnchorType::Left, b, AnchorType::Right, 0.0, Strength::Fixed);
    c.connect(cc, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);

    c.layout(&mut NullMeasureHost);

    let (a_l, ..) = frame(&c, a);
    let (b_l, ..) = frame(&c, b);
    let (c_l, ..) = frame(&c, cc);
    assert!(a_l < b_l);
    assert!(b_l < c_l);
}

/// A Fixed-size, bias-centered widget with all four anchors connected must
/// not be stretched by the direct optimizer's fast path: its own extent is
/// determined by its declared size and bias, not by its connected targets,
/// so the fast path must abstain and the solver must produce the centered
/// frame.
#[test]
fn fully_connected_fixed_widget_is_centered_not_stretched() {
    let mut c = Container::new(Config::default(), 1000, 500);
    let root = c.root();
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 100, 50);
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Top, root, AnchorType::Top, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Bottom, root, AnchorType::Bottom, 0.0, Strength::Fixed);
    c.set_bias(child, Axis::Horizontal, 0.5);
    c.set_bias(child, Axis::Vertical, 0.5);

    c.layout(&mut NullMeasureHost);

    let (l, t, r, b) = frame(&c, child);
    assert_eq!((l, t, r, b), (450, 225, 550, 275));
}

/// Idempotence (§8 property 6): running `layout()` twice with no
/// mutation in between yields identical frames.
#[test]
fn layout_is_idempotent() {
    let mut c = Container::new(Config::default(), 1000, 500);
    let root = c.root();
    let child = c.add_widget(root);
    c.set_frame(child, 0, 0, 100, 50);
    c.connect(child, AnchorType::Left, root, AnchorType::Left, 0.0, Strength::Fixed);
    c.connect(child, AnchorType::Right, root, AnchorType::Right, 0.0, Strength::Fixed);

    c.layout(&mut NullMeasureHost);
    let first = frame(&c, child);
    c.layout(&mut NullMeasureHost);
    let second = frame(&c, child);
    assert_eq!(first, second);
}
