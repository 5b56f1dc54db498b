//! Role classification for team members of a completion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Completion, MissionId};
use crate::error::EngineError;

/// Contribution role of one team member in one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Defuser,
    Expert,
    /// Single-member run without the solo flag.
    Efm,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Defuser => "defuser",
            Self::Expert => "expert",
            Self::Efm => "efm",
        };
        f.write_str(s)
    }
}

/// Classify team member `index` of a team of `team_len`.
///
/// Rules in order: a lone non-solo member is EFM, a lone solo member is the
/// defuser, index 0 of a real team is the defuser, everyone else is an expert.
pub fn classify(team_len: usize, solo: bool, index: usize) -> Result<Role, EngineError> {
    if index >= team_len {
        return Err(EngineError::TeamIndexOutOfRange { index, team_len });
    }
    let role = match (team_len, solo, index) {
        (1, false, _) => Role::Efm,
        (1, true, _) => Role::Defuser,
        (_, _, 0) => Role::Defuser,
        _ => Role::Expert,
    };
    Ok(role)
}

/// Classify every member of a completion's team, in team order.
///
/// An empty team is rejected rather than yielding nothing.
pub fn team_roles(completion: &Completion) -> Result<Vec<(&str, Role)>, EngineError> {
    if completion.team.is_empty() {
        return Err(EngineError::EmptyTeam(completion.id));
    }
    let len = completion.team.len();
    completion
        .team
        .iter()
        .enumerate()
        .map(|(i, name)| classify(len, completion.solo, i).map(|role| (name.as_str(), role)))
        .collect()
}

/// Which kinds of solve a mission has on record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveTypes {
    /// At least one completion by a team of two or more.
    pub normal: bool,
    /// At least one single-member completion.
    pub efm: bool,
    /// At least one completion flagged solo.
    pub solo: bool,
}

/// Summarize the solve kinds among `completions` that target `mission`.
///
/// Only verified completions count.
pub fn solve_types<'a, I>(completions: I, mission: MissionId) -> SolveTypes
where
    I: IntoIterator<Item = &'a Completion>,
{
    completions
        .into_iter()
        .filter(|c| c.verified && c.mission.id == mission)
        .fold(SolveTypes::default(), |acc, c| SolveTypes {
            normal: acc.normal || c.team.len() >= 2,
            efm: acc.efm || c.team.len() == 1,
            solo: acc.solo || c.solo,
        })
}
