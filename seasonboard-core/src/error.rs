//! Engine error kinds.

use thiserror::Error;

use crate::domain::{CompletionId, SeasonId};

/// Errors raised by the engine.
///
/// `NotFound` is a lookup failure; `InvalidInput` is a contract violation by
/// the data source. Neither is ever turned into an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("season '{0}' not found")]
    SeasonNotFound(String),
    #[error("season id {0} not found")]
    SeasonIdNotFound(SeasonId),
    #[error("no season is running at {0}")]
    NoCurrentSeason(String),
    #[error("completion {0} has an empty team")]
    EmptyTeam(CompletionId),
    #[error("team index {index} out of range for team of {team_len}")]
    TeamIndexOutOfRange { index: usize, team_len: usize },
}

impl EngineError {
    /// True for the NotFound family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SeasonNotFound(_) | Self::SeasonIdNotFound(_) | Self::NoCurrentSeason(_)
        )
    }

    /// True for the InvalidInput family.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyTeam(_) | Self::TeamIndexOutOfRange { .. })
    }
}
