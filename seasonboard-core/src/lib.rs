//! SeasonBoard Core: domain types and the completion ranking engine.
//!
//! This crate contains:
//! - Domain types (completions, missions, seasons, typed IDs)
//! - Mission identity resolution (variant collapsing into achievement keys)
//! - Role classification (defuser / expert / EFM) and solve-type summaries
//! - Aggregation of completions into per-solver achievement sets
//! - Deterministic ranking
//! - Season windowing and per-season leaderboards
//!
//! The engine does no I/O and keeps no state between calls.

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod mission_key;
pub mod rank;
pub mod role;
pub mod season;

pub use aggregate::{
    Aggregation, Aggregator, FoldReport, RecordOutcome, RejectedRecord, SolverStat, SolverStats,
    DEFAULT_PARALLEL_THRESHOLD,
};
pub use domain::{
    Completion, CompletionId, Mission, MissionId, MissionRef, Season, SeasonId, VariantId, TP_TEAM,
};
pub use error::EngineError;
pub use mission_key::{achievement_key, variant_siblings, AchievementKey};
pub use rank::{compare, rank, rank_stats, RankedSolver, Ranking};
pub use role::{classify, solve_types, team_roles, Role, SolveTypes};
pub use season::{
    current_season, find_season, find_season_by_id, mission_names_in_season, missions_in_season,
    seasons_by_id, SeasonAddressing, SeasonPartitioner,
};
