use chrono::NaiveDate;
use thiserror::Error;

use crate::types::member::{MemberId, Role};

/// Structural failures that abort a run before any solving work.
///
/// Solver outcomes (infeasible, timeout) are not errors; they are carried
/// as tagged variants of `SolveOutcome` so callers handle each case and
/// diagnostics survive.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("scheduling period contains no operable days")]
    EmptyPeriod,

    #[error("no duty roles were requested")]
    EmptyRoles,

    #[error("no eligible, unblocked member for {role} on {day}")]
    UnfillableSlot { role: Role, day: NaiveDate },

    #[error("members {a} and {b} are listed as both an avoidance and a pairing")]
    ConflictingPairFacts { a: MemberId, b: MemberId },

    #[error("collaborator store failure: {0}")]
    Store(String),
}
