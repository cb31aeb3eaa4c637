// Normalization pipeline: raw envelope -> Outcome

use serde_json::Value;
use tracing::info;

use crate::config::reconcile;
use crate::envelope::{validate, AnalysisResult};
use crate::error::EngineError;
use crate::ir::Outcome;
use crate::select::select;
use crate::transform::adapt;

/// Normalize a raw upstream response into a chart or an empty state.
pub fn normalize(payload: &Value) -> Result<Outcome, EngineError> {
    let result = validate(payload)?;
    normalize_result(result)
}

/// Parse and normalize a JSON document.
pub fn normalize_str(json: &str) -> Result<Outcome, EngineError> {
    let payload: Value = serde_json::from_str(json)
        .map_err(|e| EngineError::Validation(format!("result is not valid JSON: {}", e)))?;
    normalize(&payload)
}

/// Normalize an already validated result.
pub fn normalize_result(result: AnalysisResult) -> Result<Outcome, EngineError> {
    let config = reconcile(result.config);
    let selection = select(result.chart_type, &config);

    info!(
        chart_type = %result.chart_type,
        selected = %selection.archetype,
        variant = ?selection.variant,
        rows = result.data.len(),
        "normalizing result"
    );

    adapt(selection, &result.data, &config)
}
