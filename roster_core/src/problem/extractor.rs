use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::config::{RosterConfig, DEFAULT_STALENESS_DAYS};
use crate::error::RosterError;
use crate::stores::{CalendarPolicy, ConstraintStore, MemberDirectory, PreferenceStore};
use crate::types::facts::{MemberPair, MemberPrefs};
use crate::types::member::{Member, MemberId, Role};

/// What one scheduling invocation is asked to fill.
#[derive(Debug, Clone)]
pub struct RosterRequest {
    pub days: Vec<NaiveDate>,
    pub roles: Vec<Role>,
}

impl RosterRequest {
    /// Builds a request for [start, end] by asking the season policy
    /// which days are operable.
    pub fn from_period(
        start: NaiveDate,
        end: NaiveDate,
        roles: Vec<Role>,
        policy: &dyn CalendarPolicy,
    ) -> Result<Self, RosterError> {
        let days = policy.operable_days(start, end)?;
        Ok(RosterRequest { days, roles })
    }
}

/// Immutable snapshot of everything one scheduling run needs: index sets
/// plus per-member and per-pair constraint facts. Built once at the start
/// of a run and never mutated.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    /// Operable days, sorted and deduplicated.
    pub days: Vec<NaiveDate>,
    pub roles: Vec<Role>,
    /// Active members only, sorted by id.
    pub members: Vec<Member>,
    pub prefs: HashMap<MemberId, MemberPrefs>,
    pub blackouts: HashSet<(MemberId, NaiveDate)>,
    pub avoidances: Vec<MemberPair>,
    pub pairings: Vec<MemberPair>,
    member_index: HashMap<MemberId, usize>,
}

impl RosterProblem {
    pub fn member_index(&self, id: &MemberId) -> Option<usize> {
        self.member_index.get(id).copied()
    }

    pub fn prefs_of(&self, id: &MemberId) -> &MemberPrefs {
        // extract() stores a record for every member it keeps
        &self.prefs[id]
    }

    /// Days since the member's last known duty, measured from the start of
    /// the period. Members with no recorded last duty get a fixed default.
    pub fn staleness_days(&self, member_idx: usize) -> i64 {
        let member = &self.members[member_idx];
        match self.prefs_of(&member.id).last_duty {
            Some(last) => (self.days[0] - last).num_days().max(0),
            None => DEFAULT_STALENESS_DAYS,
        }
    }

    pub fn cap_for(&self, member_idx: usize, config: &RosterConfig) -> u32 {
        let member = &self.members[member_idx];
        self.prefs_of(&member.id)
            .max_per_month
            .unwrap_or(config.default_monthly_cap)
    }

    /// Index pairs of operable days exactly one calendar day apart.
    /// Gaps spanning weekdays do not count as adjacent.
    pub fn adjacent_day_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.days.len().saturating_sub(1) {
            if (self.days[i + 1] - self.days[i]).num_days() == 1 {
                pairs.push((i, i + 1));
            }
        }
        pairs
    }
}

/// Reads all collaborator data for the period and produces the immutable
/// scheduling problem. Fails fast when there is nothing to schedule.
pub fn extract(
    request: &RosterRequest,
    directory: &dyn MemberDirectory,
    prefs: &dyn PreferenceStore,
    constraints: &dyn ConstraintStore,
) -> Result<RosterProblem, RosterError> {
    if request.days.is_empty() {
        return Err(RosterError::EmptyPeriod);
    }
    if request.roles.is_empty() {
        return Err(RosterError::EmptyRoles);
    }

    let mut days = request.days.clone();
    days.sort();
    days.dedup();

    let mut roles = Vec::new();
    for role in &request.roles {
        if !roles.contains(role) {
            roles.push(*role);
        }
    }

    // Active members only, in id order so every downstream index is stable.
    let mut members: Vec<Member> = directory
        .members()?
        .into_iter()
        .filter(|m| m.active)
        .collect();
    members.sort_by(|a, b| a.id.cmp(&b.id));

    let mut member_index = HashMap::new();
    let mut pref_map = HashMap::new();
    for (i, member) in members.iter().enumerate() {
        member_index.insert(member.id.clone(), i);
        pref_map.insert(member.id.clone(), prefs.prefs_for(&member.id)?);
    }

    let blackouts: HashSet<(MemberId, NaiveDate)> =
        constraints.blackouts()?.into_iter().collect();

    let mut avoidances = constraints.avoidances()?;
    avoidances.sort();
    avoidances.dedup();

    let mut pairings = constraints.pairings()?;
    pairings.sort();
    pairings.dedup();

    // A pair cannot both avoid and seek each other.
    for pair in &pairings {
        if avoidances.contains(pair) {
            return Err(RosterError::ConflictingPairFacts {
                a: pair.first().clone(),
                b: pair.second().clone(),
            });
        }
    }

    Ok(RosterProblem {
        days,
        roles,
        members,
        prefs: pref_map,
        blackouts,
        avoidances,
        pairings,
        member_index,
    })
}
