use thiserror::Error;

use crate::envelope::Archetype;

/// Errors raised while turning an upstream result into a chart.
///
/// Every variant is terminal for the query that produced it: no partial
/// chart is ever emitted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid result envelope: {0}")]
    Validation(String),

    #[error("{archetype} result is missing required data: {reason}")]
    Schema { archetype: Archetype, reason: String },

    #[error("{0}")]
    Network(String),

    #[error("session store error: {0}")]
    Session(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Schema,
    Network,
    Session,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::Schema { .. } => ErrorKind::Schema,
            EngineError::Network(_) => ErrorKind::Network,
            EngineError::Session(_) => ErrorKind::Session,
        }
    }

    pub(crate) fn schema(archetype: Archetype, reason: impl Into<String>) -> Self {
        EngineError::Schema {
            archetype,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_message_names_archetype() {
        let err = EngineError::schema(Archetype::SinglePlayerStat, "statKey is not set");
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(
            err.to_string(),
            "SinglePlayerStat result is missing required data: statKey is not set"
        );
    }

    #[test]
    fn test_network_message_is_verbatim() {
        let err = EngineError::Network("Column \"pts\" does not exist".to_string());
        assert_eq!(err.to_string(), "Column \"pts\" does not exist");
    }
}
