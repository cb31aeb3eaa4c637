// Render dispatch: canonical outcome -> concrete renderer

use anyhow::Result;
use tracing::debug;

use crate::envelope::Archetype;
use crate::graph::PlotRenderer;
use crate::ir::{CanonicalChartSpec, EmptyState, Outcome, Variant};
use crate::table::TableRenderer;
use crate::{OutputFormat, RenderOptions};

/// The concrete chart a spec is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    AreaTrend,
    GroupedBars,
    SkillRadar,
    SkillRadarCompare,
    RankedBars,
}

impl RenderTarget {
    pub fn for_spec(spec: &CanonicalChartSpec) -> Self {
        match spec.archetype {
            Archetype::SinglePlayerStat => RenderTarget::AreaTrend,
            Archetype::CompareStats => RenderTarget::GroupedBars,
            Archetype::CategoricalBreakdown | Archetype::CompareCategoricalBreakdown => {
                match spec.variant {
                    Some(Variant::Compare) => RenderTarget::SkillRadarCompare,
                    _ => RenderTarget::SkillRadar,
                }
            }
            Archetype::Leaderboard => RenderTarget::RankedBars,
        }
    }
}

pub trait ChartRenderer {
    fn render(&self, target: RenderTarget, spec: &CanonicalChartSpec) -> Result<Vec<u8>>;
    fn render_empty(&self, state: &EmptyState) -> Result<Vec<u8>>;
}

/// Hand an outcome to the renderer, routing charts by target.
pub fn dispatch(outcome: &Outcome, renderer: &dyn ChartRenderer) -> Result<Vec<u8>> {
    match outcome {
        Outcome::Chart(spec) => {
            let target = RenderTarget::for_spec(spec);
            debug!(?target, archetype = %spec.archetype, "dispatching chart");
            renderer.render(target, spec)
        }
        Outcome::Empty(state) => {
            debug!(archetype = %state.archetype, "dispatching empty state");
            renderer.render_empty(state)
        }
    }
}

/// Renderer for the requested output format.
pub fn renderer_for(options: &RenderOptions) -> Box<dyn ChartRenderer> {
    match options.format {
        OutputFormat::Csv => Box::new(TableRenderer),
        OutputFormat::Png | OutputFormat::Svg => Box::new(PlotRenderer::new(options.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::normalize;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<String>>,
    }

    impl ChartRenderer for Recorder {
        fn render(&self, target: RenderTarget, spec: &CanonicalChartSpec) -> Result<Vec<u8>> {
            self.seen.borrow_mut().push(format!("{:?}:{}", target, spec.x_key));
            Ok(Vec::new())
        }

        fn render_empty(&self, state: &EmptyState) -> Result<Vec<u8>> {
            self.seen.borrow_mut().push(format!("empty:{}", state.message));
            Ok(Vec::new())
        }
    }

    fn target_for(payload: serde_json::Value) -> RenderTarget {
        let outcome = normalize(&payload).unwrap();
        RenderTarget::for_spec(outcome.chart().unwrap())
    }

    #[test]
    fn test_targets_per_archetype() {
        assert_eq!(
            target_for(json!({
                "success": true, "chartType": "SinglePlayerStat",
                "data": [{"game_date": "2024-03-15", "pts": 30}],
                "config": {"statKey": "pts", "playerNames": ["A"]}
            })),
            RenderTarget::AreaTrend
        );
        assert_eq!(
            target_for(json!({
                "success": true, "chartType": "CompareStats",
                "data": [{"season": "2023", "A": 10, "B": 12}],
                "config": {}
            })),
            RenderTarget::GroupedBars
        );
        assert_eq!(
            target_for(json!({
                "success": true, "chartType": "CategoricalBreakdown",
                "data": [{"category": "PTS", "value": 30}],
                "config": {"playerNames": ["A"]}
            })),
            RenderTarget::SkillRadar
        );
        assert_eq!(
            target_for(json!({
                "success": true, "chartType": "CategoricalBreakdown",
                "data": [{"category": "PTS", "A": 30, "B": 25}],
                "config": {"playerNames": ["A", "B"]}
            })),
            RenderTarget::SkillRadarCompare
        );
        assert_eq!(
            target_for(json!({
                "success": true, "chartType": "Leaderboard",
                "data": [{"player_name": "A", "pts": 30}],
                "config": {}
            })),
            RenderTarget::RankedBars
        );
    }

    #[test]
    fn test_explicit_compare_request_with_one_name() {
        // The variant, not the name count, picks the compare radar.
        let payload = json!({
            "success": true, "chartType": "CompareCategoricalBreakdown",
            "data": [{"category": "PTS", "A": 30, "B": 25}],
            "config": {"playerNames": ["A"]}
        });
        let outcome = normalize(&payload).unwrap();
        let spec = outcome.chart().unwrap();
        assert_eq!(spec.archetype, Archetype::CategoricalBreakdown);
        assert_eq!(spec.variant, Some(Variant::Compare));
        assert_eq!(spec.series_keys, vec!["A"]);
        assert_eq!(RenderTarget::for_spec(spec), RenderTarget::SkillRadarCompare);
    }

    #[test]
    fn test_dispatch_routes_empty_state() {
        let outcome = normalize(&json!({
            "success": true, "chartType": "Leaderboard", "data": [], "config": {}
        }))
        .unwrap();
        let recorder = Recorder::default();
        dispatch(&outcome, &recorder).unwrap();
        assert_eq!(*recorder.seen.borrow(), vec!["empty:No data available".to_string()]);
    }

    #[test]
    fn test_dispatch_routes_chart() {
        let outcome = normalize(&json!({
            "success": true, "chartType": "CompareStats",
            "data": [{"game_date": "2024-01-01", "A": 1}],
            "config": {}
        }))
        .unwrap();
        let recorder = Recorder::default();
        dispatch(&outcome, &recorder).unwrap();
        assert_eq!(*recorder.seen.borrow(), vec!["GroupedBars:game_date".to_string()]);
    }
}
