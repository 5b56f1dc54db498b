//! Domain types for SeasonBoard

pub mod completion;
pub mod ids;
pub mod mission;
pub mod season;

pub use completion::{Completion, MissionRef, TP_TEAM};
pub use ids::{CompletionId, MissionId, SeasonId, VariantId};
pub use mission::Mission;
pub use season::Season;

/// Solver display name, as stored in a completion team.
pub type SolverName = String;
