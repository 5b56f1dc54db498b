//! Aggregation: folds classified completions into per-solver achievement sets.
//!
//! Every solver gets four sets of achievement keys. A key lands in `distinct`
//! and in exactly the set for the role the solver played. Insertion is set
//! membership, so folding the same completion twice changes nothing, and
//! merging partial results by set union gives the same answer in any order.
//! The parallel path relies on that: rayon folds chunks independently and
//! reduces partials with [`Aggregation::merge`].

use std::borrow::Borrow;
use std::collections::{btree_map, BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Completion, CompletionId, SolverName, TP_TEAM};
use crate::error::EngineError;
use crate::mission_key::{achievement_key, AchievementKey};
use crate::role::{team_roles, Role};

/// Completion count at which [`Aggregator::run`] switches to the rayon path.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Achievement sets for one solver.
///
/// Fields are private: the only way in is [`SolverStat::record`], which keeps
/// `distinct` equal to the union of the three role sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStat {
    name: SolverName,
    distinct: BTreeSet<AchievementKey>,
    defuser: BTreeSet<AchievementKey>,
    expert: BTreeSet<AchievementKey>,
    efm: BTreeSet<AchievementKey>,
}

impl SolverStat {
    pub fn new(name: impl Into<SolverName>) -> Self {
        Self {
            name: name.into(),
            distinct: BTreeSet::new(),
            defuser: BTreeSet::new(),
            expert: BTreeSet::new(),
            efm: BTreeSet::new(),
        }
    }

    /// Record that this solver cleared `key` in `role`. Returns true if
    /// anything changed.
    pub fn record(&mut self, key: AchievementKey, role: Role) -> bool {
        let set = match role {
            Role::Defuser => &mut self.defuser,
            Role::Expert => &mut self.expert,
            Role::Efm => &mut self.efm,
        };
        let added_role = set.insert(key.clone());
        let added_distinct = self.distinct.insert(key);
        added_role || added_distinct
    }

    /// Set-union `other` into `self`. Names must match.
    pub fn merge(&mut self, other: SolverStat) {
        debug_assert_eq!(self.name, other.name);
        self.distinct.extend(other.distinct);
        self.defuser.extend(other.defuser);
        self.expert.extend(other.expert);
        self.efm.extend(other.efm);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn distinct(&self) -> &BTreeSet<AchievementKey> {
        &self.distinct
    }

    pub fn defuser(&self) -> &BTreeSet<AchievementKey> {
        &self.defuser
    }

    pub fn expert(&self) -> &BTreeSet<AchievementKey> {
        &self.expert
    }

    pub fn efm(&self) -> &BTreeSet<AchievementKey> {
        &self.efm
    }

    /// Sum of the three role-set sizes. A key cleared in two roles counts twice.
    pub fn total(&self) -> usize {
        self.defuser.len() + self.expert.len() + self.efm.len()
    }
}

/// Solver stats keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    by_name: BTreeMap<SolverName, SolverStat>,
}

impl SolverStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, key: AchievementKey, role: Role) -> bool {
        if let Some(stat) = self.by_name.get_mut(name) {
            return stat.record(key, role);
        }
        self.by_name
            .entry(name.to_string())
            .or_insert_with(|| SolverStat::new(name))
            .record(key, role)
    }

    /// Per-name set union.
    pub fn merge(&mut self, other: SolverStats) {
        for (name, stat) in other.by_name {
            match self.by_name.entry(name) {
                btree_map::Entry::Occupied(mut e) => e.get_mut().merge(stat),
                btree_map::Entry::Vacant(e) => {
                    e.insert(stat);
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SolverStat> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SolverStat> {
        self.by_name.values()
    }
}

/// What happened to one completion during a fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Classified and recorded for every team member.
    Folded,
    /// Skipped: not verified.
    Unverified,
    /// Skipped: team contains the placeholder name.
    Placeholder,
    /// Malformed record; nothing was recorded for it.
    Rejected(EngineError),
}

/// A completion that failed classification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub completion: CompletionId,
    pub error: String,
}

/// Per-outcome counts for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldReport {
    pub folded: usize,
    pub unverified: usize,
    pub placeholder: usize,
    /// Sorted by completion id.
    pub rejected: Vec<RejectedRecord>,
}

impl FoldReport {
    pub fn record(&mut self, completion: CompletionId, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Folded => self.folded += 1,
            RecordOutcome::Unverified => self.unverified += 1,
            RecordOutcome::Placeholder => self.placeholder += 1,
            RecordOutcome::Rejected(err) => self.rejected.push(RejectedRecord {
                completion,
                error: err.to_string(),
            }),
        }
    }

    pub fn merge(&mut self, other: FoldReport) {
        self.folded += other.folded;
        self.unverified += other.unverified;
        self.placeholder += other.placeholder;
        self.rejected.extend(other.rejected);
        self.rejected.sort();
    }

    /// Number of completions this report has seen.
    pub fn seen(&self) -> usize {
        self.folded + self.unverified + self.placeholder + self.rejected.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Stats plus the report of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub stats: SolverStats,
    pub report: FoldReport,
}

impl Aggregation {
    pub fn merge(mut self, other: Aggregation) -> Self {
        self.stats.merge(other.stats);
        self.report.merge(other.report);
        self
    }
}

/// Folds completions into [`SolverStats`].
///
/// Holds only configuration; every call builds fresh accumulators.
#[derive(Debug, Clone)]
pub struct Aggregator {
    placeholder: String,
    parallel_threshold: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            placeholder: TP_TEAM.to_string(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// `0` disables the parallel path.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Fold a single completion into `stats`.
    ///
    /// A rejected completion leaves `stats` untouched: roles are classified
    /// for the whole team before anything is recorded.
    pub fn fold(&self, stats: &mut SolverStats, completion: &Completion) -> RecordOutcome {
        if !completion.verified {
            log::debug!("completion {}: unverified, skipped", completion.id);
            return RecordOutcome::Unverified;
        }
        if completion.has_placeholder(&self.placeholder) {
            log::debug!("completion {}: placeholder team, skipped", completion.id);
            return RecordOutcome::Placeholder;
        }
        let roles = match team_roles(completion) {
            Ok(roles) => roles,
            Err(err) => {
                log::warn!("completion {} rejected: {err}", completion.id);
                return RecordOutcome::Rejected(err);
            }
        };
        let key = achievement_key(&completion.mission);
        for (name, role) in roles {
            stats.record(name, key.clone(), role);
        }
        RecordOutcome::Folded
    }

    /// Sequential fold over `completions`.
    pub fn aggregate<C: Borrow<Completion>>(&self, completions: &[C]) -> Aggregation {
        let mut agg = Aggregation::default();
        for c in completions {
            self.fold_into(&mut agg, c.borrow());
        }
        agg.report.rejected.sort();
        agg
    }

    /// Chunked rayon fold; partials are merged by set union only.
    pub fn aggregate_par<C: Borrow<Completion> + Sync>(&self, completions: &[C]) -> Aggregation {
        let mut agg = completions
            .par_iter()
            .fold(Aggregation::default, |mut agg, c| {
                self.fold_into(&mut agg, c.borrow());
                agg
            })
            .reduce(Aggregation::default, Aggregation::merge);
        agg.report.rejected.sort();
        agg
    }

    /// Pick the sequential or parallel path by input size.
    pub fn run<C: Borrow<Completion> + Sync>(&self, completions: &[C]) -> Aggregation {
        if self.parallel_threshold > 0 && completions.len() >= self.parallel_threshold {
            log::debug!("aggregating {} completions in parallel", completions.len());
            self.aggregate_par(completions)
        } else {
            self.aggregate(completions)
        }
    }

    fn fold_into(&self, agg: &mut Aggregation, completion: &Completion) {
        let outcome = self.fold(&mut agg.stats, completion);
        agg.report.record(completion.id, &outcome);
    }
}
