use crate::config::PartialConfig;
use crate::envelope::Archetype;
use crate::ir::Variant;

/// Which adapter handles a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub archetype: Archetype,
    pub variant: Option<Variant>,
}

/// Pick the chart shape for a reconciled config.
///
/// `CategoricalBreakdown` is the only archetype with a variant: it compares
/// when more than one player is named. `CompareCategoricalBreakdown` is an
/// explicit request for that comparison and folds into the same shape.
pub fn select(archetype: Archetype, config: &PartialConfig) -> Selection {
    match archetype {
        Archetype::CategoricalBreakdown => {
            let variant = if config.player_names().len() > 1 {
                Variant::Compare
            } else {
                Variant::Single
            };
            Selection {
                archetype,
                variant: Some(variant),
            }
        }
        Archetype::CompareCategoricalBreakdown => Selection {
            archetype: Archetype::CategoricalBreakdown,
            variant: Some(Variant::Compare),
        },
        Archetype::SinglePlayerStat | Archetype::CompareStats | Archetype::Leaderboard => {
            Selection {
                archetype,
                variant: None,
            }
        }
    }
}
