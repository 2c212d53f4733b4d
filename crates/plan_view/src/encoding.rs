use serde::Serialize;
use std::fmt;

/// Upper bounds (inclusive) of the first four stroke-width levels
const WIDTH_THRESHOLDS: [f64; 4] = [500_000.0, 1_000_000.0, 10_000_000.0, 50_000_000.0];

/// Stroke-width level, 1 to 5, for an edge carrying `weight`
///
/// NaN and negative weights get the thinnest stroke.
pub fn edge_width_level(weight: f64) -> u8 {
    if weight.is_nan() {
        return 1;
    }
    WIDTH_THRESHOLDS
        .iter()
        .position(|&threshold| weight <= threshold)
        .map_or(5, |level| level as u8 + 1)
}

/// A count either left as is or scaled down with a unit suffix
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompactValue {
    Raw(f64),
    Scaled(String),
}

impl fmt::Display for CompactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompactValue::Raw(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            CompactValue::Raw(n) => write!(f, "{n}"),
            CompactValue::Scaled(s) => f.write_str(s),
        }
    }
}

/// Shorten a row or byte count with a `K` or `M` suffix
///
/// Counts of a billion and more are returned unscaled, there is no `G`
/// suffix.
pub fn compact_unit(n: f64) -> CompactValue {
    if (1_000.0..1_000_000.0).contains(&n) {
        CompactValue::Scaled(format!("{:.2}K", n / 1_000.0))
    } else if (1_000_000.0..1_000_000_000.0).contains(&n) {
        CompactValue::Scaled(format!("{:.2}M", n / 1_000_000.0))
    } else {
        CompactValue::Raw(n)
    }
}
