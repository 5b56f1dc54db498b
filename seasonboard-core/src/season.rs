//! Season windowing: season lookup, mission eligibility, completion
//! membership, and per-season leaderboards.
//!
//! A completion belongs to a season either through an explicit season
//! reference or, derived, through its mission: a mission belongs to a season
//! when it is verified and was added inside the season's mission window or is
//! on the season's whitelist. Each season's leaderboard is computed from its
//! own completions only.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregator;
use crate::domain::{Completion, Mission, MissionId, Season, SeasonId};
use crate::error::EngineError;
use crate::rank::Ranking;

/// How completions are matched to seasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonAddressing {
    /// Use the completion's season reference when present, else derive.
    #[default]
    Auto,
    /// Only the completion's own season reference counts.
    Explicit,
    /// Only mission eligibility counts.
    Derived,
}

/// Look up a season by exact name.
pub fn find_season<'a>(seasons: &'a [Season], name: &str) -> Result<&'a Season, EngineError> {
    seasons
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| EngineError::SeasonNotFound(name.to_string()))
}

pub fn find_season_by_id(seasons: &[Season], id: SeasonId) -> Result<&Season, EngineError> {
    seasons
        .iter()
        .find(|s| s.id == id)
        .ok_or(EngineError::SeasonIdNotFound(id))
}

/// The season running at `now`. Overlaps resolve to the highest id.
pub fn current_season(seasons: &[Season], now: DateTime<Utc>) -> Result<&Season, EngineError> {
    seasons
        .iter()
        .filter(|s| s.is_running_at(now))
        .max_by_key(|s| s.id)
        .ok_or_else(|| EngineError::NoCurrentSeason(now.to_rfc3339()))
}

/// Seasons ordered by id ascending.
pub fn seasons_by_id(seasons: &[Season]) -> Vec<&Season> {
    let mut sorted: Vec<&Season> = seasons.iter().collect();
    sorted.sort_by_key(|s| s.id);
    sorted
}

fn eligible_missions<'a>(missions: &'a [Mission], season: &Season) -> Vec<&'a Mission> {
    let mut eligible: Vec<&Mission> = missions.iter().filter(|m| season.admits(m)).collect();
    eligible.sort_by(|a, b| a.date_added.cmp(&b.date_added).then(a.id.cmp(&b.id)));
    eligible
}

/// IDs of the missions eligible for `season`, oldest first (ties by id).
pub fn missions_in_season(missions: &[Mission], season: &Season) -> Vec<MissionId> {
    eligible_missions(missions, season)
        .into_iter()
        .map(|m| m.id)
        .collect()
}

/// Same list as [`missions_in_season`], as mission names.
pub fn mission_names_in_season<'a>(missions: &'a [Mission], season: &Season) -> Vec<&'a str> {
    eligible_missions(missions, season)
        .into_iter()
        .map(|m| m.name.as_str())
        .collect()
}

/// Matches completions to seasons against a mission catalogue.
pub struct SeasonPartitioner<'a> {
    catalogue: HashMap<MissionId, &'a Mission>,
    addressing: SeasonAddressing,
}

impl<'a> SeasonPartitioner<'a> {
    pub fn new(missions: &'a [Mission], addressing: SeasonAddressing) -> Self {
        Self {
            catalogue: missions.iter().map(|m| (m.id, m)).collect(),
            addressing,
        }
    }

    pub fn addressing(&self) -> SeasonAddressing {
        self.addressing
    }

    /// True if `completion` counts toward `season`.
    pub fn contains(&self, season: &Season, completion: &Completion) -> bool {
        match (self.addressing, completion.season) {
            (SeasonAddressing::Explicit, reference) => reference == Some(season.id),
            (SeasonAddressing::Auto, Some(reference)) => reference == season.id,
            (SeasonAddressing::Auto, None) | (SeasonAddressing::Derived, _) => {
                self.mission_in_season(season, completion)
            }
        }
    }

    fn mission_in_season(&self, season: &Season, completion: &Completion) -> bool {
        match self.catalogue.get(&completion.mission.id) {
            Some(mission) => season.admits(mission),
            None => {
                log::debug!(
                    "completion {}: mission {} not in catalogue",
                    completion.id,
                    completion.mission.id
                );
                false
            }
        }
    }

    /// The completions that count toward `season`, in input order.
    pub fn completions_in<'c>(
        &self,
        season: &Season,
        completions: &'c [Completion],
    ) -> Vec<&'c Completion> {
        completions
            .iter()
            .filter(|c| self.contains(season, c))
            .collect()
    }

    /// Aggregate and rank exactly the completions belonging to `season`.
    pub fn leaderboard(
        &self,
        aggregator: &Aggregator,
        season: &Season,
        completions: &[Completion],
    ) -> Ranking {
        let members = self.completions_in(season, completions);
        log::debug!(
            "season {} ({}): {} of {} completions",
            season.id,
            season.name,
            members.len(),
            completions.len()
        );
        aggregator.rank(&members)
    }

    /// Every season's leaderboard, computed independently, keyed by season id.
    pub fn all_leaderboards(
        &self,
        aggregator: &Aggregator,
        seasons: &[Season],
        completions: &[Completion],
    ) -> BTreeMap<SeasonId, Ranking> {
        seasons
            .par_iter()
            .map(|season| (season.id, self.leaderboard(aggregator, season, completions)))
            .collect()
    }
}
