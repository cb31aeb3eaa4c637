use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::PartialConfig;
use crate::data::{records_from_json, Record};
use crate::error::EngineError;

/// The five chart shapes the upstream service can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    SinglePlayerStat,
    CompareStats,
    CategoricalBreakdown,
    CompareCategoricalBreakdown,
    Leaderboard,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::SinglePlayerStat,
        Archetype::CompareStats,
        Archetype::CategoricalBreakdown,
        Archetype::CompareCategoricalBreakdown,
        Archetype::Leaderboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::SinglePlayerStat => "SinglePlayerStat",
            Archetype::CompareStats => "CompareStats",
            Archetype::CategoricalBreakdown => "CategoricalBreakdown",
            Archetype::CompareCategoricalBreakdown => "CompareCategoricalBreakdown",
            Archetype::Leaderboard => "Leaderboard",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| EngineError::Validation(format!("unknown chartType '{}'", s)))
    }
}

/// A validated upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub success: bool,
    pub chart_type: Archetype,
    pub data: Vec<Record>,
    pub config: PartialConfig,
    pub error: Option<String>,
}

/// Check the raw payload for minimal well-formedness.
pub fn validate(payload: &Value) -> Result<AnalysisResult, EngineError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| EngineError::Validation("result must be a JSON object".to_string()))?;

    let error = obj.get("error").and_then(Value::as_str).map(str::to_string);

    match obj.get("success") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => {
            let reason = error.as_deref().unwrap_or("upstream reported failure");
            return Err(EngineError::Validation(format!(
                "query did not succeed: {}",
                reason
            )));
        }
        Some(_) => {
            return Err(EngineError::Validation(
                "`success` must be a boolean".to_string(),
            ))
        }
        None => return Err(EngineError::Validation("`success` is missing".to_string())),
    }

    let data = match obj.get("data") {
        Some(value) => records_from_json(value)?,
        None => return Err(EngineError::Validation("`data` is missing".to_string())),
    };

    let chart_type = match obj.get("chartType") {
        Some(Value::String(tag)) => tag.parse::<Archetype>()?,
        Some(_) => {
            return Err(EngineError::Validation(
                "`chartType` must be a string".to_string(),
            ))
        }
        None => {
            return Err(EngineError::Validation(
                "`chartType` is missing".to_string(),
            ))
        }
    };

    let config = PartialConfig::from_json(obj.get("config"))?;

    Ok(AnalysisResult {
        success: true,
        chart_type,
        data,
        config,
        error,
    })
}
