//! SeasonBoard Runner: snapshot loading, board building, configuration, export.
//!
//! This crate builds on `seasonboard-core` to provide:
//! - Snapshot loading from the persistence layer's JSON export
//! - A load-once / invalidate snapshot store, optionally process-wide
//! - TOML board configuration
//! - All-time, per-season and current-season boards with fingerprints
//! - JSON / CSV / table export

pub mod config;
pub mod export;
pub mod leaderboard;
pub mod snapshot;

pub use config::{BoardConfig, ConfigError, OutputConfig, OutputFormat};
pub use export::{export_csv, export_json, render, render_table};
pub use leaderboard::{Board, BoardBuilder, BoardError, BoardScope};
pub use snapshot::{install, shared, Snapshot, SnapshotError, SnapshotStore};
