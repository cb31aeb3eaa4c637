use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::data::Record;
use crate::envelope::Archetype;

// =============================================================================
// Selection
// =============================================================================

/// Sub-shape of the skill radar: one player or several overlaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    Single,
    Compare,
}

// =============================================================================
// Domains
// =============================================================================

/// One end of a value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Follow the data.
    Auto,
    Fixed(f64),
}

/// Value-axis extent, serialized as `[min, max]` with `"auto"` for data-driven ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDomain {
    pub min: Bound,
    pub max: Bound,
}

impl ValueDomain {
    pub const AUTO: ValueDomain = ValueDomain {
        min: Bound::Auto,
        max: Bound::Auto,
    };

    pub const ZERO_BASED: ValueDomain = ValueDomain {
        min: Bound::Fixed(0.0),
        max: Bound::Auto,
    };

    pub const fn fixed(min: f64, max: f64) -> Self {
        ValueDomain {
            min: Bound::Fixed(min),
            max: Bound::Fixed(max),
        }
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Auto => serializer.serialize_str("auto"),
            Bound::Fixed(v) => serializer.serialize_f64(*v),
        }
    }
}

impl Serialize for ValueDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}

// =============================================================================
// Canonical output
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLabels {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// Fully resolved, renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalChartSpec {
    pub archetype: Archetype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    pub x_key: String,
    pub series_keys: Vec<String>,
    pub records: Vec<Record>,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<String>,
    pub domain: ValueDomain,
    pub labels: ChartLabels,
}

/// What to show when a query legitimately returned no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    pub archetype: Archetype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    Chart(CanonicalChartSpec),
    Empty(EmptyState),
}

impl Outcome {
    pub fn chart(&self) -> Option<&CanonicalChartSpec> {
        match self {
            Outcome::Chart(spec) => Some(spec),
            Outcome::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_domain_serializes_auto_marker() {
        assert_eq!(
            serde_json::to_value(ValueDomain::ZERO_BASED).unwrap(),
            json!([0.0, "auto"])
        );
        assert_eq!(
            serde_json::to_value(ValueDomain::fixed(0.0, 100.0)).unwrap(),
            json!([0.0, 100.0])
        );
    }

    #[test]
    fn test_empty_outcome_is_tagged() {
        let outcome = Outcome::Empty(EmptyState {
            archetype: Archetype::Leaderboard,
            variant: None,
            message: "No data available".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "empty", "archetype": "Leaderboard", "message": "No data available"})
        );
    }
}
