use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// Chart configuration as the upstream service sends it. Every field is
/// optional and the player fields come in two spellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub player_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_display_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|v| match v {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    }))
}

impl PartialConfig {
    /// Parse the `config` member of an envelope. A missing or null config
    /// is an empty one.
    pub fn from_json(value: Option<&Value>) -> Result<Self, EngineError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(v @ Value::Object(_)) => serde_json::from_value(v.clone())
                .map_err(|e| EngineError::Validation(format!("`config` is malformed: {}", e))),
            Some(_) => Err(EngineError::Validation(
                "`config` must be an object".to_string(),
            )),
        }
    }

    /// Player names after reconciliation. Empty when none were given.
    pub fn player_names(&self) -> &[String] {
        self.player_names.as_deref().unwrap_or(&[])
    }

    /// First named player, used for card titles.
    pub fn lead_player(&self) -> Option<&str> {
        self.player_names()
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn display_name(&self) -> Option<&str> {
        non_blank(&self.stat_display_name)
    }

    pub fn time_frame(&self) -> Option<&str> {
        non_blank(&self.time_frame)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Lift a lone `playerName` into `playerNames` so downstream code only
/// ever reads the plural field.
pub fn reconcile(config: PartialConfig) -> PartialConfig {
    let player_names = match (&config.player_names, &config.player_name) {
        (Some(names), _) => names.clone(),
        (None, Some(name)) => vec![name.clone()],
        (None, None) => Vec::new(),
    };

    PartialConfig {
        player_names: Some(player_names),
        ..config
    }
}
