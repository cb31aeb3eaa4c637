use crate::benchmark::{footer, radar_domain};
use crate::config::PartialConfig;
use crate::data::Record;
use crate::envelope::Archetype;
use crate::error::EngineError;
use crate::ir::{CanonicalChartSpec, ChartLabels, Variant};
use crate::resolve::{player_series, CATEGORY};

use super::PLAYER_PLACEHOLDER;

const DEFAULT_DISPLAY: &str = "Stat Value";
const VALUE_KEY: &str = "value";

/// Skill radar for one player: a single `value` series, auto-scaled.
pub fn breakdown_single(
    records: &[Record],
    config: &PartialConfig,
) -> Result<CanonicalChartSpec, EngineError> {
    let player = config.lead_player().unwrap_or(PLAYER_PLACEHOLDER);

    Ok(CanonicalChartSpec {
        archetype: Archetype::CategoricalBreakdown,
        variant: Some(Variant::Single),
        x_key: CATEGORY.to_string(),
        series_keys: vec![VALUE_KEY.to_string()],
        records: records.to_vec(),
        display_name: config.display_name().unwrap_or(DEFAULT_DISPLAY).to_string(),
        time_frame: config.time_frame.clone(),
        domain: radar_domain(Variant::Single),
        labels: ChartLabels {
            title: format!("{} Profile", player),
            subtitle: "Skill Breakdown (Averages)".to_string(),
            footer: Some(footer()),
        },
    })
}

/// Skill radar overlaying several players on the fixed 0-100 benchmark scale.
pub fn breakdown_compare(
    records: &[Record],
    config: &PartialConfig,
) -> Result<CanonicalChartSpec, EngineError> {
    let players = player_series(records, config.player_names());
    if players.is_empty() {
        return Err(EngineError::schema(
            Archetype::CategoricalBreakdown,
            "no player columns to compare",
        ));
    }

    Ok(CanonicalChartSpec {
        archetype: Archetype::CategoricalBreakdown,
        variant: Some(Variant::Compare),
        x_key: CATEGORY.to_string(),
        labels: ChartLabels {
            title: "Skill Comparison".to_string(),
            subtitle: format!("Comparing {}", players.join(" vs ")),
            footer: Some(footer()),
        },
        series_keys: players,
        records: records.to_vec(),
        display_name: config.display_name().unwrap_or(DEFAULT_DISPLAY).to_string(),
        time_frame: config.time_frame.clone(),
        domain: radar_domain(Variant::Compare),
    })
}
