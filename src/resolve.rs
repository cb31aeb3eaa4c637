use indexmap::IndexSet;

use crate::config::PartialConfig;
use crate::data::{Record, Scalar};
use crate::envelope::Archetype;
use crate::error::EngineError;

pub const GAME_DATE: &str = "game_date";
pub const SEASON: &str = "season";
pub const CATEGORY: &str = "category";

/// Columns that carry an axis or grouping role and never become a series.
const SERIES_RESERVED: [&str; 4] = [GAME_DATE, SEASON, "gameNumber", CATEGORY];

/// Identity columns skipped when looking for the ranked stat.
const LEADERBOARD_RESERVED: [&str; 5] = [
    "rank",
    "player_name",
    "team_abbreviation",
    "full_name",
    SEASON,
];

const UNKNOWN_PLAYER: &str = "Unknown";

/// Resolve the x-axis column: explicit config, then game logs, then seasons.
pub fn axis_key(config: &PartialConfig, records: &[Record]) -> String {
    if let Some(key) = config.x_axis_key.as_deref().filter(|k| !k.is_empty()) {
        return key.to_string();
    }
    if records.iter().any(|r| r.contains_key(GAME_DATE)) {
        GAME_DATE.to_string()
    } else {
        SEASON.to_string()
    }
}

/// Every non-reserved column across all records, in first-seen order.
pub fn series_keys(records: &[Record], x_key: &str) -> Vec<String> {
    let mut keys: IndexSet<&str> = IndexSet::new();
    for record in records {
        for key in record.keys() {
            if key != x_key && !SERIES_RESERVED.contains(&key.as_str()) {
                keys.insert(key.as_str());
            }
        }
    }
    keys.into_iter().map(str::to_string).collect()
}

/// The column being ranked: first non-identity column of the first row.
pub fn leaderboard_stat_key(records: &[Record]) -> Result<String, EngineError> {
    records
        .first()
        .and_then(|first| {
            first
                .keys()
                .find(|k| !LEADERBOARD_RESERVED.contains(&k.as_str()))
        })
        .cloned()
        .ok_or_else(|| {
            EngineError::schema(Archetype::Leaderboard, "no stat column besides identity columns")
        })
}

/// Row label for a leaderboard entry.
pub fn display_name(record: &Record) -> String {
    ["player_name", "full_name"]
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|cell| matches!(cell, Scalar::Text(_) | Scalar::Number(_)) && !cell.is_blank())
        .map(Scalar::label)
        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string())
}

/// Radar series for a player comparison. The named players are used when
/// every one of them is a column in the data; otherwise the columns are
/// discovered from the rows.
pub fn player_series(records: &[Record], player_names: &[String]) -> Vec<String> {
    let all_present = !player_names.is_empty()
        && player_names
            .iter()
            .all(|name| records.iter().any(|r| r.contains_key(name)));

    if all_present {
        let unique: IndexSet<&String> = player_names.iter().collect();
        unique.into_iter().cloned().collect()
    } else {
        series_keys(records, CATEGORY)
    }
}
