//! Ranking: deterministic total order over aggregated solvers.
//!
//! Order: distinct count descending, then total role count descending, then
//! name ascending (byte order, case-sensitive). The name tie-break makes the
//! order total, so identical input always ranks identically.

use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregator, FoldReport, SolverStat, SolverStats};
use crate::domain::Completion;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedSolver {
    pub name: String,
    pub distinct: usize,
    pub defuser: usize,
    pub expert: usize,
    pub efm: usize,
}

impl RankedSolver {
    pub fn total(&self) -> usize {
        self.defuser + self.expert + self.efm
    }
}

impl From<&SolverStat> for RankedSolver {
    fn from(stat: &SolverStat) -> Self {
        Self {
            name: stat.name().to_string(),
            distinct: stat.distinct().len(),
            defuser: stat.defuser().len(),
            expert: stat.expert().len(),
            efm: stat.efm().len(),
        }
    }
}

/// Leaderboard comparator. `Less` means `a` ranks above `b`.
pub fn compare(a: &RankedSolver, b: &RankedSolver) -> Ordering {
    b.distinct
        .cmp(&a.distinct)
        .then_with(|| b.total().cmp(&a.total()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Rank aggregated stats.
pub fn rank_stats(stats: &SolverStats) -> Vec<RankedSolver> {
    let mut rows: Vec<RankedSolver> = stats.iter().map(RankedSolver::from).collect();
    rows.sort_by(compare);
    rows
}

/// Ranked rows plus the fold report for the completions behind them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub entries: Vec<RankedSolver>,
    pub report: FoldReport,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based position of `name`, if ranked.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    pub fn get(&self, name: &str) -> Option<&RankedSolver> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl Aggregator {
    /// Aggregate then rank.
    pub fn rank<C: Borrow<Completion> + Sync>(&self, completions: &[C]) -> Ranking {
        let agg = self.run(completions);
        Ranking {
            entries: rank_stats(&agg.stats),
            report: agg.report,
        }
    }
}

/// Rank completions with the default aggregator settings.
pub fn rank<C: Borrow<Completion> + Sync>(completions: &[C]) -> Ranking {
    Aggregator::default().rank(completions)
}
