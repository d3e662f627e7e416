// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The dimension-ratio string grammar (§6):
//!
//! ```text
//! ratio       := axis_prefix? (float | ratio_pair)
//! axis_prefix := ('W' | 'H') ','
//! ratio_pair  := float ':' float
//! ```
//!
//! Whitespace is irrelevant; `"W,16:9"` means width:height = 16:9 with
//! width as the driven side.

use crate::model::{Axis, DimensionRatio};

/// Parse a dimension-ratio string, returning `None` on any malformed input
/// ([`crate::Container::set_dimension_ratio`] reports this to the host as a
/// `false` return and leaves the ratio disabled — this function never
/// panics). Distinct from [`crate::error::LayoutFault::RatioNotApplicable`],
/// which fires later, during compilation, for a ratio that parsed fine but
/// has no MATCH_CONSTRAINT axis to drive.
pub fn parse_dimension_ratio(input: &str) -> Option<DimensionRatio> {
    let s: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }

    let (axis, rest) = match s.as_bytes().first()? {
        b'W' | b'w' => (Some(Axis::Horizontal), s.get(2..)?),
        b'H' | b'h' => (Some(Axis::Vertical), s.get(2..)?),
        _ => (None, s.as_str()),
    };
    if axis.is_some() && !s[1..2].eq(",") {
        return None;
    }

    let ratio = if let Some((num, den)) = rest.split_once(':') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 || !num.is_finite() || !den.is_finite() {
            return None;
        }
        num / den
    } else {
        let r: f64 = rest.parse().ok()?;
        if !r.is_finite() || r <= 0.0 {
            return None;
        }
        r
    };

    Some(DimensionRatio { ratio, explicit_axis: axis })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_float() {
        let r = parse_dimension_ratio("1.5").unwrap();
        assert_eq!(r.ratio, 1.5);
        assert_eq!(r.explicit_axis, None);
    }

    #[test]
    fn ratio_pair_no_prefix() {
        let r = parse_dimension_ratio("2:1").unwrap();
        assert_eq!(r.ratio, 2.0);
        assert_eq!(r.explicit_axis, None);
    }

    #[test]
    fn width_prefixed_pair() {
        let r = parse_dimension_ratio("W,16:9").unwrap();
        assert!((r.ratio - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(r.explicit_axis, Some(Axis::Horizontal));
    }

    #[test]
    fn height_prefixed_with_whitespace() {
        let r = parse_dimension_ratio(" H, 3 : 2 ").unwrap();
        assert!((r.ratio - 1.5).abs() < 1e-9);
        assert_eq!(r.explicit_axis, Some(Axis::Vertical));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_dimension_ratio("").is_none());
        assert!(parse_dimension_ratio("W,").is_none());
        assert!(parse_dimension_ratio("a:b").is_none());
        assert!(parse_dimension_ratio("1:0").is_none());
        assert!(parse_dimension_ratio("X,1:1").is_none());
    }
}
