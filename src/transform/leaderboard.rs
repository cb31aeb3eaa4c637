use tracing::debug;

use crate::config::PartialConfig;
use crate::data::{Record, Scalar};
use crate::envelope::Archetype;
use crate::error::EngineError;
use crate::ir::{CanonicalChartSpec, ChartLabels, ValueDomain};
use crate::resolve::{display_name, leaderboard_stat_key};

const NAME_KEY: &str = "name";
const DEFAULT_SUBTITLE: &str = "Top Performers";

/// Ranked horizontal bars. Rows keep the order the service ranked them in.
pub fn leaderboard(
    records: &[Record],
    config: &PartialConfig,
) -> Result<CanonicalChartSpec, EngineError> {
    let stat_key = leaderboard_stat_key(records)?;

    let mut ranked = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        // Missing or non-numeric cells become null; the row still ranks.
        let value = record
            .get(&stat_key)
            .and_then(Scalar::to_number)
            .unwrap_or(Scalar::Null);
        if value == Scalar::Null {
            debug!(row = idx, stat = %stat_key, "leaderboard row has no numeric stat");
        }

        let mut row = record.clone();
        row.insert(NAME_KEY.to_string(), Scalar::Text(display_name(record)));
        row.insert(stat_key.clone(), value);
        ranked.push(row);
    }

    let display = config
        .display_name()
        .map(str::to_string)
        .unwrap_or_else(|| stat_key.clone());

    Ok(CanonicalChartSpec {
        archetype: Archetype::Leaderboard,
        variant: None,
        x_key: NAME_KEY.to_string(),
        series_keys: vec![stat_key],
        records: ranked,
        labels: ChartLabels {
            title: format!("League Leaders: {}", display),
            subtitle: config.time_frame().unwrap_or(DEFAULT_SUBTITLE).to_string(),
            footer: None,
        },
        display_name: display,
        time_frame: config.time_frame.clone(),
        domain: ValueDomain::ZERO_BASED,
    })
}
