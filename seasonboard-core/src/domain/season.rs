use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MissionId, SeasonId};
use super::mission::Mission;

/// A time-boxed competitive period.
///
/// `start`/`end` bound the competition itself; `missions_start`/`missions_end`
/// bound which missions are eligible. Both windows are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub missions_start: DateTime<Utc>,
    pub missions_end: DateTime<Utc>,
    #[serde(default)]
    pub whitelist: BTreeSet<MissionId>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Season {
    /// True if `now` falls inside `[start, end]`.
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    /// True if `instant` falls inside `[missions_start, missions_end]`.
    pub fn in_mission_window(&self, instant: DateTime<Utc>) -> bool {
        self.missions_start <= instant && instant <= self.missions_end
    }

    pub fn is_whitelisted(&self, mission: MissionId) -> bool {
        self.whitelist.contains(&mission)
    }

    /// Mission eligibility: verified, and either added inside the mission
    /// window or whitelisted.
    pub fn admits(&self, mission: &Mission) -> bool {
        mission.verified
            && (self.in_mission_window(mission.date_added) || self.is_whitelisted(mission.id))
    }
}
