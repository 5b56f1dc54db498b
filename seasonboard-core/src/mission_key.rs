//! Mission identity: collapses variant missions into one achievement key.
//!
//! Variant missions are re-skins of one puzzle, so they share a key and count
//! once toward a solver's distinct total. Key format: `v<variant>` when the
//! mission has a variant, `i<id>` otherwise.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Mission, MissionId, MissionRef};

/// Canonical key identifying a mission or a whole variant group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementKey(String);

impl AchievementKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AchievementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the achievement key for a mission reference.
pub fn achievement_key(mission: &MissionRef) -> AchievementKey {
    match mission.variant {
        Some(variant) => AchievementKey(format!("v{variant}")),
        None => AchievementKey(format!("i{}", mission.id)),
    }
}

/// IDs of the other catalogue missions in `mission`'s variant group, ordered
/// by id. Empty when it has no variant.
pub fn variant_siblings(missions: &[Mission], mission: &Mission) -> Vec<MissionId> {
    let Some(variant) = mission.variant else {
        return Vec::new();
    };
    let mut ids: Vec<MissionId> = missions
        .iter()
        .filter(|m| m.variant == Some(variant) && m.id != mission.id)
        .map(|m| m.id)
        .collect();
    ids.sort();
    ids.dedup();
    ids
}
