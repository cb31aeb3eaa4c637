use crate::config::PartialConfig;
use crate::data::Record;
use crate::envelope::Archetype;
use crate::error::EngineError;
use crate::ir::{CanonicalChartSpec, ChartLabels, ValueDomain};
use crate::resolve::axis_key;

use super::PLAYER_PLACEHOLDER;

const DEFAULT_DISPLAY: &str = "Stat Value";
const DEFAULT_SUBTITLE: &str = "Trend Analysis";

/// One player's stat over seasons or games, drawn as an area trend.
///
/// `statKey` is never inferred here: a result without it is rejected.
pub fn single_player_stat(
    records: &[Record],
    config: &PartialConfig,
) -> Result<CanonicalChartSpec, EngineError> {
    let stat_key = config
        .stat_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| EngineError::schema(Archetype::SinglePlayerStat, "statKey is not set"))?;

    let display_name = config.display_name().unwrap_or(DEFAULT_DISPLAY).to_string();
    let player = config.lead_player().unwrap_or(PLAYER_PLACEHOLDER);

    Ok(CanonicalChartSpec {
        archetype: Archetype::SinglePlayerStat,
        variant: None,
        x_key: axis_key(config, records),
        series_keys: vec![stat_key.to_string()],
        records: records.to_vec(),
        labels: ChartLabels {
            title: format!("{}: {}", player, display_name),
            subtitle: config.time_frame().unwrap_or(DEFAULT_SUBTITLE).to_string(),
            footer: None,
        },
        display_name,
        time_frame: config.time_frame.clone(),
        domain: ValueDomain::AUTO,
    })
}
