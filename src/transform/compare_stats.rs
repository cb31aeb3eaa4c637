use crate::config::PartialConfig;
use crate::data::Record;
use crate::envelope::Archetype;
use crate::error::EngineError;
use crate::ir::{CanonicalChartSpec, ChartLabels, ValueDomain};
use crate::resolve::{axis_key, series_keys, GAME_DATE};

const DEFAULT_DISPLAY: &str = "Value";

/// Several players side by side per season or game: one bar series each.
pub fn compare_stats(
    records: &[Record],
    config: &PartialConfig,
) -> Result<CanonicalChartSpec, EngineError> {
    let x_key = axis_key(config, records);
    let series = series_keys(records, &x_key);
    let display_name = config.display_name().unwrap_or(DEFAULT_DISPLAY).to_string();

    let by = if x_key == GAME_DATE { "Date" } else { "Season" };

    Ok(CanonicalChartSpec {
        archetype: Archetype::CompareStats,
        variant: None,
        labels: ChartLabels {
            title: format!("Comparison: {}", display_name),
            subtitle: format!("By {}", by),
            footer: Some(format!("Showing {}", display_name)),
        },
        x_key,
        series_keys: series,
        records: records.to_vec(),
        display_name,
        time_frame: config.time_frame.clone(),
        domain: ValueDomain::ZERO_BASED,
    })
}
