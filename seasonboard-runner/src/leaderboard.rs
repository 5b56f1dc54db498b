//! Leaderboard building over a snapshot.
//!
//! [`BoardBuilder`] wires the engine to one [`Snapshot`]: the all-time board,
//! a season's board by name or id, the current season's board, and the
//! season mission lists. Each call builds its boards from scratch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use seasonboard_core::{
    current_season, find_season, find_season_by_id, mission_names_in_season, missions_in_season,
    seasons_by_id, solve_types, variant_siblings, Aggregator, EngineError, FoldReport, MissionId,
    RankedSolver, Ranking, Season, SeasonAddressing, SeasonId, SeasonPartitioner, SolveTypes,
};

use crate::config::BoardConfig;
use crate::snapshot::{Snapshot, SnapshotError};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("mission {0} not found")]
    MissionNotFound(MissionId),
}

impl BoardError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Engine(e) => e.is_not_found(),
            Self::MissionNotFound(_) => true,
            Self::Snapshot(_) => false,
        }
    }
}

/// Which completions a board covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardScope {
    AllTime,
    Season { id: SeasonId, name: String },
}

impl BoardScope {
    fn of(season: &Season) -> Self {
        Self::Season {
            id: season.id,
            name: season.name.clone(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::AllTime => "all time".to_string(),
            Self::Season { name, .. } => format!("season {name}"),
        }
    }
}

/// A ranked leaderboard and how it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub scope: BoardScope,
    pub entries: Vec<RankedSolver>,
    pub report: FoldReport,
}

impl Board {
    fn new(scope: BoardScope, ranking: Ranking) -> Self {
        Self {
            scope,
            entries: ranking.entries,
            report: ranking.report,
        }
    }

    /// BLAKE3 hex digest of the scope and ranked rows.
    ///
    /// Two boards with the same fingerprint list the same solvers with the
    /// same counts in the same order.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::json!({
            "scope": &self.scope,
            "entries": &self.entries,
        });
        blake3::hash(canonical.to_string().as_bytes())
            .to_hex()
            .to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds boards from one snapshot with one configuration.
pub struct BoardBuilder<'s> {
    snapshot: &'s Snapshot,
    aggregator: Aggregator,
    addressing: SeasonAddressing,
}

impl<'s> BoardBuilder<'s> {
    pub fn new(snapshot: &'s Snapshot, config: &BoardConfig) -> Self {
        Self {
            snapshot,
            aggregator: config.aggregator(),
            addressing: config.addressing,
        }
    }

    fn partitioner(&self) -> SeasonPartitioner<'s> {
        SeasonPartitioner::new(&self.snapshot.missions, self.addressing)
    }

    /// Every completion in the snapshot, ranked.
    pub fn all_time(&self) -> Board {
        let board = Board::new(
            BoardScope::AllTime,
            self.aggregator.rank(&self.snapshot.completions),
        );
        log::info!("built all-time board: {} solvers", board.len());
        board
    }

    pub fn season(&self, name: &str) -> Result<Board, BoardError> {
        let season = find_season(&self.snapshot.seasons, name)?;
        Ok(self.board_for(season))
    }

    pub fn season_by_id(&self, id: SeasonId) -> Result<Board, BoardError> {
        let season = find_season_by_id(&self.snapshot.seasons, id)?;
        Ok(self.board_for(season))
    }

    /// The board of the season running at `now`.
    pub fn current(&self, now: DateTime<Utc>) -> Result<Board, BoardError> {
        let season = current_season(&self.snapshot.seasons, now)?;
        Ok(self.board_for(season))
    }

    /// Every season's board, ordered by season id.
    pub fn all_season_boards(&self) -> Vec<Board> {
        let mut boards = self.partitioner().all_leaderboards(
            &self.aggregator,
            &self.snapshot.seasons,
            &self.snapshot.completions,
        );
        seasons_by_id(&self.snapshot.seasons)
            .into_iter()
            .filter_map(|season| {
                boards
                    .remove(&season.id)
                    .map(|ranking| Board::new(BoardScope::of(season), ranking))
            })
            .collect()
    }

    pub fn season_missions(&self, name: &str) -> Result<Vec<MissionId>, BoardError> {
        let season = find_season(&self.snapshot.seasons, name)?;
        Ok(missions_in_season(&self.snapshot.missions, season))
    }

    pub fn season_mission_names(&self, name: &str) -> Result<Vec<&'s str>, BoardError> {
        let season = find_season(&self.snapshot.seasons, name)?;
        Ok(mission_names_in_season(&self.snapshot.missions, season))
    }

    /// Solve kinds on record for a catalogue mission.
    pub fn solve_types(&self, mission: MissionId) -> Result<SolveTypes, BoardError> {
        self.snapshot
            .mission(mission)
            .ok_or(BoardError::MissionNotFound(mission))?;
        Ok(solve_types(&self.snapshot.completions, mission))
    }

    /// Other catalogue missions in `mission`'s variant group.
    pub fn variants_of(&self, mission: MissionId) -> Result<Vec<MissionId>, BoardError> {
        let found = self
            .snapshot
            .mission(mission)
            .ok_or(BoardError::MissionNotFound(mission))?;
        Ok(variant_siblings(&self.snapshot.missions, found))
    }

    fn board_for(&self, season: &Season) -> Board {
        let ranking =
            self.partitioner()
                .leaderboard(&self.aggregator, season, &self.snapshot.completions);
        let board = Board::new(BoardScope::of(season), ranking);
        if !board.report.is_clean() {
            log::warn!(
                "{}: {} completions rejected",
                board.scope.label(),
                board.report.rejected.len()
            );
        }
        log::info!("built {} board: {} solvers", board.scope.label(), board.len());
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use seasonboard_core::{Completion, Mission, MissionRef};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        let season = |id: u64, name: &str, from: DateTime<Utc>, to: DateTime<Utc>| Season {
            id: SeasonId(id),
            name: name.into(),
            start: from,
            end: to,
            missions_start: from,
            missions_end: to,
            whitelist: Default::default(),
            notes: None,
        };
        Snapshot {
            completions: vec![
                Completion::new(1, vec!["A".into(), "B".into()], MissionRef::new(1)),
                Completion::new(2, vec!["B".into()], MissionRef::new(2).with_variant(9)),
                Completion::new(3, vec!["C".into()], MissionRef::new(3).with_variant(9)).solo(true),
            ],
            missions: vec![
                Mission::new(1, "One", at(2023, 2, 1)),
                Mission::new(2, "Two", at(2023, 8, 1)).with_variant(9),
                Mission::new(3, "Three", at(2023, 9, 1)).with_variant(9),
            ],
            seasons: vec![
                season(2, "Autumn", at(2023, 7, 1), at(2023, 12, 31)),
                season(1, "Spring", at(2023, 1, 1), at(2023, 6, 30)),
            ],
        }
    }

    #[test]
    fn all_time_board() {
        let snap = snapshot();
        let board = BoardBuilder::new(&snap, &BoardConfig::default()).all_time();
        assert_eq!(board.scope, BoardScope::AllTime);
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn season_board_by_name() {
        let snap = snapshot();
        let builder = BoardBuilder::new(&snap, &BoardConfig::default());
        let board = builder.season("Autumn").unwrap();
        assert_eq!(
            board.scope,
            BoardScope::Season {
                id: SeasonId(2),
                name: "Autumn".into()
            }
        );
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn unknown_season_is_not_found() {
        let snap = snapshot();
        let builder = BoardBuilder::new(&snap, &BoardConfig::default());
        let err = builder.season("Winter").unwrap_err();
        assert!(err.is_not_found());
        assert!(builder.season_by_id(SeasonId(99)).unwrap_err().is_not_found());
    }

    #[test]
    fn current_board_uses_running_season() {
        let snap = snapshot();
        let builder = BoardBuilder::new(&snap, &BoardConfig::default());
        let board = builder.current(at(2023, 3, 1)).unwrap();
        assert_eq!(board.scope.label(), "season Spring");
        assert!(builder.current(at(2030, 1, 1)).unwrap_err().is_not_found());
    }

    #[test]
    fn all_seasons_ordered_by_id() {
        let snap = snapshot();
        let boards = BoardBuilder::new(&snap, &BoardConfig::default()).all_season_boards();
        let labels: Vec<String> = boards.iter().map(|b| b.scope.label()).collect();
        assert_eq!(labels, vec!["season Spring", "season Autumn"]);
    }

    #[test]
    fn mission_lists_and_solve_types() {
        let snap = snapshot();
        let builder = BoardBuilder::new(&snap, &BoardConfig::default());
        assert_eq!(
            builder.season_missions("Autumn").unwrap(),
            vec![MissionId(2), MissionId(3)]
        );
        assert_eq!(builder.season_mission_names("Spring").unwrap(), vec!["One"]);
        let types = builder.solve_types(MissionId(3)).unwrap();
        assert!(types.solo && types.efm && !types.normal);
        assert_eq!(
            builder.variants_of(MissionId(2)).unwrap(),
            vec![MissionId(3)]
        );
        assert!(builder.solve_types(MissionId(77)).unwrap_err().is_not_found());
    }

    #[test]
    fn fingerprint_is_stable_and_order_sensitive() {
        let snap = snapshot();
        let builder = BoardBuilder::new(&snap, &BoardConfig::default());
        let a = builder.all_time();
        let b = builder.all_time();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let mut swapped = a.clone();
        swapped.entries.swap(0, 1);
        assert_ne!(a.fingerprint(), swapped.fingerprint());
    }
}
