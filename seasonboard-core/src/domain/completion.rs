//! Completion records: one team's verified (or pending) clear of a mission.

use serde::{Deserialize, Serialize};

use super::ids::{CompletionId, MissionId, SeasonId, VariantId};

/// Team name used by the data source for non-scoring test entries.
pub const TP_TEAM: &str = "TP_TEAM";

/// The slice of a mission a completion carries with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionRef {
    pub id: MissionId,
    #[serde(default)]
    pub variant: Option<VariantId>,
}

impl MissionRef {
    pub fn new(id: impl Into<MissionId>) -> Self {
        Self {
            id: id.into(),
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<VariantId>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// A single completion of a mission.
///
/// `team` is ordered: index 0 is the defuser, the rest are experts, except
/// for single-member runs (see [`crate::role::classify`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CompletionRecord")]
pub struct Completion {
    pub id: CompletionId,
    pub team: Vec<String>,
    pub solo: bool,
    pub verified: bool,
    pub mission: MissionRef,
    pub season: Option<SeasonId>,
}

/// Wire form. Exports carry the season reference as `season`, `seasonId`,
/// or both; `season` wins when they disagree.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRecord {
    id: CompletionId,
    team: Vec<String>,
    #[serde(default)]
    solo: bool,
    #[serde(default)]
    verified: bool,
    mission: MissionRef,
    #[serde(default)]
    season: Option<SeasonId>,
    #[serde(default)]
    season_id: Option<SeasonId>,
}

impl From<CompletionRecord> for Completion {
    fn from(record: CompletionRecord) -> Self {
        if let (Some(season), Some(season_id)) = (record.season, record.season_id) {
            if season != season_id {
                log::debug!(
                    "completion {}: season {season} and seasonId {season_id} disagree, using {season}",
                    record.id
                );
            }
        }
        Self {
            id: record.id,
            team: record.team,
            solo: record.solo,
            verified: record.verified,
            mission: record.mission,
            season: record.season.or(record.season_id),
        }
    }
}

impl Completion {
    pub fn new(id: impl Into<CompletionId>, team: Vec<String>, mission: MissionRef) -> Self {
        Self {
            id: id.into(),
            team,
            solo: false,
            verified: true,
            mission,
            season: None,
        }
    }

    pub fn solo(mut self, solo: bool) -> Self {
        self.solo = solo;
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn in_season(mut self, season: impl Into<SeasonId>) -> Self {
        self.season = Some(season.into());
        self
    }

    /// True if any team slot holds the given placeholder name.
    pub fn has_placeholder(&self, placeholder: &str) -> bool {
        self.team.iter().any(|name| name == placeholder)
    }
}
