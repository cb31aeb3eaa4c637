use crate::ir::{Bound, CanonicalChartSpec, ValueDomain};

/// A resolved axis: numeric extent plus category labels when discrete.
/// Continuous scales carry no categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub domain: (f64, f64),
    pub categories: Vec<String>,
}

/// Discrete axis over the chart's x column, one slot per record in order.
pub fn category_scale(spec: &CanonicalChartSpec) -> Scale {
    let categories: Vec<String> = spec
        .records
        .iter()
        .map(|r| r.get(&spec.x_key).map(|c| c.label()).unwrap_or_default())
        .collect();
    Scale {
        domain: (0.0, categories.len() as f64),
        categories,
    }
}

/// Continuous axis covering every series value, honouring fixed bounds.
pub fn value_scale(spec: &CanonicalChartSpec) -> Scale {
    let values: Vec<f64> = spec
        .series_keys
        .iter()
        .flat_map(|key| series_values(spec, key))
        .flatten()
        .collect();
    Scale {
        domain: resolve_domain(&spec.domain, &values),
        categories: Vec::new(),
    }
}

/// Numeric readings of one series, aligned with the records. Cells that are
/// missing or non-numeric read as `None`.
pub fn series_values(spec: &CanonicalChartSpec, key: &str) -> Vec<Option<f64>> {
    spec.records
        .iter()
        .map(|r| r.get(key).and_then(|c| c.as_f64()))
        .collect()
}

pub fn resolve_domain(domain: &ValueDomain, values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v < lo { lo = v; }
        if v > hi { hi = v; }
    }
    if lo == f64::INFINITY {
        lo = 0.0;
        hi = 1.0;
    }

    let (padded_lo, padded_hi) = pad_range(lo, hi);
    let min = match domain.min {
        Bound::Fixed(v) => v,
        Bound::Auto => padded_lo,
    };
    let max = match domain.max {
        Bound::Fixed(v) => v,
        Bound::Auto => padded_hi,
    };

    if max <= min {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}
