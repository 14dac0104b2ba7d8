//! Collaborator interfaces consumed by the scheduling core, plus the
//! in-memory implementations used by the demo binary and the test suite.
//!
//! The core only ever reads from the directory, preference, constraint,
//! and calendar collaborators; the assignment store is its single write
//! target and receives the whole period as one batch.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

use crate::error::RosterError;
use crate::types::assignment::Assignment;
use crate::types::facts::{MemberPair, MemberPrefs};
use crate::types::member::{Member, MemberId};

pub trait MemberDirectory {
    fn members(&self) -> Result<Vec<Member>, RosterError>;
}

pub trait PreferenceStore {
    /// Preference facts for one member; a default record when none stored.
    fn prefs_for(&self, member: &MemberId) -> Result<MemberPrefs, RosterError>;
}

pub trait ConstraintStore {
    fn blackouts(&self) -> Result<Vec<(MemberId, NaiveDate)>, RosterError>;
    fn avoidances(&self) -> Result<Vec<MemberPair>, RosterError>;
    fn pairings(&self) -> Result<Vec<MemberPair>, RosterError>;
}

pub trait CalendarPolicy {
    /// The operable days within [start, end], in calendar order.
    fn operable_days(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<NaiveDate>, RosterError>;
}

pub trait AssignmentStore {
    /// Persist one period's assignments as a single batch. Implementations
    /// must make the batch visible atomically or not at all.
    fn write_batch(&mut self, assignments: &[Assignment]) -> Result<(), RosterError>;
}

/// In-memory snapshot of one club's membership, preferences, and
/// constraint facts. Serves as directory, preference store, and
/// constraint store at once.
#[derive(Debug, Clone, Default)]
pub struct ClubSnapshot {
    pub members: Vec<Member>,
    pub prefs: HashMap<MemberId, MemberPrefs>,
    pub blackouts: Vec<(MemberId, NaiveDate)>,
    pub avoidances: Vec<MemberPair>,
    pub pairings: Vec<MemberPair>,
}

impl ClubSnapshot {
    pub fn new() -> Self {
        ClubSnapshot::default()
    }

    pub fn add_member(&mut self, member: Member) -> &mut Self {
        self.members.push(member);
        self
    }

    pub fn set_prefs(&mut self, id: impl Into<String>, prefs: MemberPrefs) -> &mut Self {
        self.prefs.insert(MemberId::new(id), prefs);
        self
    }

    pub fn blackout(&mut self, id: impl Into<String>, day: NaiveDate) -> &mut Self {
        self.blackouts.push((MemberId::new(id), day));
        self
    }

    pub fn avoid(&mut self, a: impl Into<String>, b: impl Into<String>) -> &mut Self {
        self.avoidances
            .push(MemberPair::new(MemberId::new(a), MemberId::new(b)));
        self
    }

    pub fn pair(&mut self, a: impl Into<String>, b: impl Into<String>) -> &mut Self {
        self.pairings
            .push(MemberPair::new(MemberId::new(a), MemberId::new(b)));
        self
    }
}

impl MemberDirectory for ClubSnapshot {
    fn members(&self) -> Result<Vec<Member>, RosterError> {
        Ok(self.members.clone())
    }
}

impl PreferenceStore for ClubSnapshot {
    fn prefs_for(&self, member: &MemberId) -> Result<MemberPrefs, RosterError> {
        Ok(self.prefs.get(member).cloned().unwrap_or_default())
    }
}

impl ConstraintStore for ClubSnapshot {
    fn blackouts(&self) -> Result<Vec<(MemberId, NaiveDate)>, RosterError> {
        Ok(self.blackouts.clone())
    }

    fn avoidances(&self) -> Result<Vec<MemberPair>, RosterError> {
        Ok(self.avoidances.clone())
    }

    fn pairings(&self) -> Result<Vec<MemberPair>, RosterError> {
        Ok(self.pairings.clone())
    }
}

/// Season policy for a club that operates on weekends only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendPolicy;

impl CalendarPolicy for WeekendPolicy {
    fn operable_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, RosterError> {
        let mut days = Vec::new();
        let mut day = start;
        while day <= end {
            if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                days.push(day);
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        Ok(days)
    }
}

/// Assignment store holding the most recently written batch. The whole
/// batch replaces the previous contents in one move, so readers never
/// observe a half-written roster.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignments {
    pub rows: Vec<Assignment>,
}

impl InMemoryAssignments {
    pub fn new() -> Self {
        InMemoryAssignments::default()
    }
}

impl AssignmentStore for InMemoryAssignments {
    fn write_batch(&mut self, assignments: &[Assignment]) -> Result<(), RosterError> {
        self.rows = assignments.to_vec();
        Ok(())
    }
}
