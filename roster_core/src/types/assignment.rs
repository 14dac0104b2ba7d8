use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::member::{MemberId, Role};

/// A (role, day) pair requiring exactly one assigned member.
///
/// Ordered day-major so that iterating a roster walks the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: NaiveDate,
    pub role: Role,
}

impl Slot {
    pub fn new(role: Role, day: NaiveDate) -> Self {
        Slot { day, role }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.role, self.day)
    }
}

/// Why a slot, or a particular candidate for it, was ruled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    NoEligibleMember,
    BlackedOut,
    OptedOut,
    ZeroPreference,
    AvoidanceConflict,
    AlreadyAssignedThatDay,
    AntiRepeat,
    CapExhausted,
    Infeasible,
}

impl ReasonCode {
    /// Candidate-level phrase used when composing slot summaries.
    pub fn phrase(&self) -> &'static str {
        match self {
            ReasonCode::NoEligibleMember => "not eligible",
            ReasonCode::BlackedOut => "blacked out",
            ReasonCode::OptedOut => "opted out for this period",
            ReasonCode::ZeroPreference => "opted out of this role",
            ReasonCode::AvoidanceConflict => {
                "held back by an avoidance pairing with an assigned member"
            }
            ReasonCode::AlreadyAssignedThatDay => "already assigned elsewhere that day",
            ReasonCode::AntiRepeat => "assigned the same role on an adjacent day",
            ReasonCode::CapExhausted => "at their monthly assignment cap",
            ReasonCode::Infeasible => "infeasible with current constraint set",
        }
    }

    /// Which reason best explains an unfilled slot when candidates were
    /// eliminated for different reasons. Lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            ReasonCode::AvoidanceConflict => 0,
            ReasonCode::AntiRepeat => 1,
            ReasonCode::CapExhausted => 2,
            ReasonCode::AlreadyAssignedThatDay => 3,
            ReasonCode::BlackedOut => 4,
            ReasonCode::ZeroPreference => 5,
            ReasonCode::OptedOut => 6,
            ReasonCode::NoEligibleMember => 7,
            ReasonCode::Infeasible => 8,
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

/// The outcome recorded for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOutcome {
    Filled(MemberId),
    Unfilled(ReasonCode),
}

impl SlotOutcome {
    pub fn member(&self) -> Option<&MemberId> {
        match self {
            SlotOutcome::Filled(m) => Some(m),
            SlotOutcome::Unfilled(_) => None,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, SlotOutcome::Filled(_))
    }
}

/// One row written to the assignment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot: Slot,
    pub outcome: SlotOutcome,
}

/// Per-slot explanation of which constraints eliminated which candidates.
#[derive(Debug, Clone, Serialize)]
pub struct SlotDiagnostic {
    pub slot: Slot,
    pub eliminations: Vec<(MemberId, ReasonCode)>,
    pub summary: String,
}

/// Which path produced the roster, and how the exact solver fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolvePath {
    Exact,
    FallbackOnly,
    FallbackAfterInfeasible,
    FallbackAfterTimeout,
    FailedInfeasible,
    FailedTimeout,
}

/// The result of one scheduling run: one outcome per slot, plus
/// diagnostics for every slot left unfilled.
#[derive(Debug, Clone, Serialize)]
pub struct RosterOutcome {
    pub assignments: BTreeMap<Slot, SlotOutcome>,
    pub diagnostics: Vec<SlotDiagnostic>,
    pub path: SolvePath,
}

impl RosterOutcome {
    pub fn filled_count(&self) -> usize {
        self.assignments.values().filter(|o| o.is_filled()).count()
    }

    pub fn unfilled_count(&self) -> usize {
        self.assignments.len() - self.filled_count()
    }

    pub fn is_complete(&self) -> bool {
        self.unfilled_count() == 0
    }

    /// The member filling `slot`, if any.
    pub fn member_for(&self, slot: &Slot) -> Option<&MemberId> {
        self.assignments.get(slot).and_then(|o| o.member())
    }
}
