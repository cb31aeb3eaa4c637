// Per-archetype data adapters

mod breakdown;
mod compare_stats;
mod leaderboard;
mod single_player;

use tracing::debug;

use crate::config::PartialConfig;
use crate::data::Record;
use crate::envelope::Archetype;
use crate::error::EngineError;
use crate::ir::{CanonicalChartSpec, EmptyState, Outcome, Variant};
use crate::select::Selection;

pub use breakdown::{breakdown_compare, breakdown_single};
pub use compare_stats::compare_stats;
pub use leaderboard::leaderboard;
pub use single_player::single_player_stat;

pub(crate) const PLAYER_PLACEHOLDER: &str = "Player";

/// Run the adapter for a selection. Empty data short-circuits to the empty
/// state before any adapter can object to missing fields.
pub fn adapt(
    selection: Selection,
    records: &[Record],
    config: &PartialConfig,
) -> Result<Outcome, EngineError> {
    if records.is_empty() {
        debug!(archetype = %selection.archetype, "no rows, rendering empty state");
        return Ok(Outcome::Empty(empty_state(selection)));
    }

    // Radar archetypes are told apart by the selected variant alone.
    let spec: CanonicalChartSpec = match selection.archetype {
        Archetype::SinglePlayerStat => single_player_stat(records, config)?,
        Archetype::CompareStats => compare_stats(records, config)?,
        Archetype::CategoricalBreakdown | Archetype::CompareCategoricalBreakdown => {
            match selection.variant {
                Some(Variant::Compare) => breakdown_compare(records, config)?,
                _ => breakdown_single(records, config)?,
            }
        }
        Archetype::Leaderboard => leaderboard(records, config)?,
    };

    debug!(
        archetype = %spec.archetype,
        x_key = %spec.x_key,
        series = ?spec.series_keys,
        "adapted result"
    );
    Ok(Outcome::Chart(spec))
}

fn empty_state(selection: Selection) -> EmptyState {
    let message = match selection.archetype {
        Archetype::CategoricalBreakdown | Archetype::CompareCategoricalBreakdown => {
            "No data found"
        }
        _ => "No data available",
    };
    EmptyState {
        archetype: selection.archetype,
        variant: selection.variant,
        message: message.to_string(),
    }
}
