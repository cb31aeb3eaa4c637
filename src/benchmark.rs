//! Fixed per-category scale behind the skill radar.
//!
//! Compare-radar values arrive already expressed as a percentage of these
//! per-game maxima; the engine only pins the axis to match. A single-player
//! radar is auto-scaled to its own maximum instead.

use crate::ir::{ValueDomain, Variant};

/// Per-game maxima, in display order.
pub const BENCHMARKS: [(&str, f64); 5] = [
    ("PTS", 35.0),
    ("AST", 12.0),
    ("REB", 15.0),
    ("STL", 3.0),
    ("BLK", 3.0),
];

pub const COMPARE_SCALE_MAX: f64 = 100.0;

pub fn radar_domain(variant: Variant) -> ValueDomain {
    match variant {
        Variant::Single => ValueDomain::ZERO_BASED,
        Variant::Compare => ValueDomain::fixed(0.0, COMPARE_SCALE_MAX),
    }
}

/// Caption explaining the scale, e.g. `Benchmark - PTS: 35, AST: 12, ...`.
pub fn footer() -> String {
    let parts: Vec<String> = BENCHMARKS
        .iter()
        .map(|(name, max)| format!("{}: {}", name, max))
        .collect();
    format!("Benchmark - {}", parts.join(", "))
}
