use anyhow::{anyhow, Context, Result};

use crate::dispatch::{ChartRenderer, RenderTarget};
use crate::ir::{CanonicalChartSpec, EmptyState};

/// Writes the chart's rows as CSV: the x column followed by each series.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl ChartRenderer for TableRenderer {
    fn render(&self, _target: RenderTarget, spec: &CanonicalChartSpec) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = Vec::with_capacity(spec.series_keys.len() + 1);
        header.push(spec.x_key.as_str());
        header.extend(spec.series_keys.iter().map(String::as_str));
        writer.write_record(&header).context("Failed to write CSV header")?;

        for record in &spec.records {
            let row: Vec<String> = header
                .iter()
                .map(|key| record.get(*key).map(|c| c.label()).unwrap_or_default())
                .collect();
            writer.write_record(&row).context("Failed to write CSV row")?;
        }

        writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV: {}", e))
    }

    fn render_empty(&self, state: &EmptyState) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["message"]).context("Failed to write CSV header")?;
        writer.write_record([state.message.as_str()]).context("Failed to write CSV row")?;
        writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use crate::runtime::normalize;
    use serde_json::json;

    fn render_csv(payload: serde_json::Value) -> String {
        let outcome = normalize(&payload).unwrap();
        String::from_utf8(dispatch(&outcome, &TableRenderer).unwrap()).unwrap()
    }

    #[test]
    fn test_compare_stats_table() {
        let csv = render_csv(json!({
            "success": true,
            "chartType": "CompareStats",
            "data": [
                {"season": "2022-23", "LeBron James": 28.9, "Kevin Durant": 29.1},
                {"season": "2023-24", "LeBron James": 25.7}
            ],
            "config": {}
        }));
        assert_eq!(
            csv,
            "season,LeBron James,Kevin Durant\n2022-23,28.9,29.1\n2023-24,25.7,\n"
        );
    }

    #[test]
    fn test_leaderboard_table_uses_names() {
        let csv = render_csv(json!({
            "success": true,
            "chartType": "Leaderboard",
            "data": [
                {"rank": 1, "player_name": "A", "pts": "30"},
                {"rank": 2, "player_name": "B", "pts": 25}
            ],
            "config": {}
        }));
        assert_eq!(csv, "name,pts\nA,30\nB,25\n");
    }

    #[test]
    fn test_empty_table() {
        let csv = render_csv(json!({
            "success": true,
            "chartType": "CategoricalBreakdown",
            "data": [],
            "config": {}
        }));
        assert_eq!(csv, "message\nNo data found\n");
    }
}
