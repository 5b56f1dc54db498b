//! SeasonBoard CLI: leaderboards and season listings over a snapshot file.
//!
//! Commands:
//! - `rank`: all-time board, or one season's board with `--season`
//! - `current`: board of the season running now (or at `--now`)
//! - `missions`: missions eligible for a season, oldest first
//! - `seasons`: the season catalogue, ordered by id
//! - `solves`: solve kinds on record for a mission, and its variant group

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use seasonboard_core::{seasons_by_id, MissionId};
use seasonboard_runner::{
    install, render, BoardBuilder, BoardConfig, OutputFormat, Snapshot, SnapshotStore,
};

#[derive(Parser)]
#[command(
    name = "seasonboard",
    about = "SeasonBoard CLI: mission completion leaderboards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank solvers over all completions, or over one season.
    Rank {
        /// Snapshot JSON exported by the data source.
        #[arg(long)]
        snapshot: PathBuf,

        /// Season name. Omit for the all-time board.
        #[arg(long)]
        season: Option<String>,

        /// Output format: table, json, csv. Overrides the config file.
        #[arg(long)]
        format: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Board of the season running now.
    Current {
        #[arg(long)]
        snapshot: PathBuf,

        /// Evaluate at this RFC 3339 instant instead of the system clock.
        #[arg(long)]
        now: Option<String>,

        #[arg(long)]
        format: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Missions eligible for a season, oldest first.
    Missions {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        season: String,

        /// Print mission names instead of ids.
        #[arg(long, default_value_t = false)]
        names: bool,
    },
    /// List seasons by id.
    Seasons {
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Solve kinds on record for a mission.
    Solves {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        mission: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let output = dispatch(cli.command, load_snapshot)?;
    print!("{output}");
    Ok(())
}

fn dispatch<L>(command: Commands, load: L) -> Result<String>
where
    L: Fn(&Path) -> Result<Arc<Snapshot>>,
{
    match command {
        Commands::Rank {
            snapshot,
            season,
            format,
            config,
        } => {
            let snap = load(snapshot.as_path())?;
            run_rank(&snap, season.as_deref(), format.as_deref(), config.as_deref())
        }
        Commands::Current {
            snapshot,
            now,
            format,
            config,
        } => {
            let snap = load(snapshot.as_path())?;
            let now = parse_now(now.as_deref())?;
            run_current(&snap, now, format.as_deref(), config.as_deref())
        }
        Commands::Missions {
            snapshot,
            season,
            names,
        } => {
            let snap = load(snapshot.as_path())?;
            run_missions(&snap, &season, names)
        }
        Commands::Seasons { snapshot } => {
            let snap = load(snapshot.as_path())?;
            Ok(run_seasons(&snap))
        }
        Commands::Solves { snapshot, mission } => {
            let snap = load(snapshot.as_path())?;
            run_solves(&snap, MissionId(mission))
        }
    }
}

fn load_snapshot(path: &Path) -> Result<Arc<Snapshot>> {
    let store = install(SnapshotStore::from_path(path))?;
    store
        .get()
        .with_context(|| format!("failed to load snapshot {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<BoardConfig> {
    match path {
        Some(p) => BoardConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(BoardConfig::default()),
    }
}

fn output_format(flag: Option<&str>, config: &BoardConfig) -> Result<OutputFormat> {
    match flag {
        Some(f) => Ok(f.parse()?),
        None => Ok(config.output.format),
    }
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now '{s}', expected RFC 3339"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn run_rank(
    snapshot: &Snapshot,
    season: Option<&str>,
    format: Option<&str>,
    config: Option<&Path>,
) -> Result<String> {
    let config = load_config(config)?;
    let format = output_format(format, &config)?;
    let builder = BoardBuilder::new(snapshot, &config);
    let board = match season {
        Some(name) => builder.season(name)?,
        None => builder.all_time(),
    };
    render(&board, format)
}

fn run_current(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    format: Option<&str>,
    config: Option<&Path>,
) -> Result<String> {
    let config = load_config(config)?;
    let format = output_format(format, &config)?;
    let board = BoardBuilder::new(snapshot, &config).current(now)?;
    render(&board, format)
}

fn run_missions(snapshot: &Snapshot, season: &str, names: bool) -> Result<String> {
    let builder = BoardBuilder::new(snapshot, &BoardConfig::default());
    let lines: Vec<String> = if names {
        builder
            .season_mission_names(season)?
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        builder
            .season_missions(season)?
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    };
    Ok(lines.iter().map(|l| format!("{l}\n")).collect())
}

fn run_seasons(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for season in seasons_by_id(&snapshot.seasons) {
        out.push_str(&format!(
            "{:>4}  {}  {} .. {}\n",
            season.id.0,
            season.name,
            season.start.format("%Y-%m-%d"),
            season.end.format("%Y-%m-%d")
        ));
    }
    out
}

fn run_solves(snapshot: &Snapshot, mission: MissionId) -> Result<String> {
    let builder = BoardBuilder::new(snapshot, &BoardConfig::default());
    let types = builder.solve_types(mission)?;
    let variants = builder.variants_of(mission)?;
    let json = serde_json::json!({
        "mission": mission,
        "solveTypes": types,
        "variants": variants,
    });
    let mut out = serde_json::to_string_pretty(&json).context("failed to serialize solves")?;
    out.push('\n');
    Ok(out)
}
