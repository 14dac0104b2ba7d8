use std::collections::{HashMap, HashSet};

use crate::config::DEFAULT_PREFERENCE;
use crate::problem::extractor::RosterProblem;
use crate::types::member::Role;

/// The sparse set of admissible (member, role, day) decision variables.
///
/// Everything structurally impossible is pruned here, before any
/// constraint is emitted: missing role flags, opted-out members,
/// blackouts, and roles excluded by an explicit 0% preference. Pruning
/// typically removes well over half of the dense member × role × day
/// product. Membership checks are O(1).
#[derive(Debug, Clone, Default)]
pub struct VariableSpace {
    /// Admissible (member index, role, day index) triples.
    pub admissible: HashSet<(usize, Role, usize)>,
    /// Effective preference weight per (member index, role), after the
    /// zero-preference override.
    pub weights: HashMap<(usize, Role), f64>,
    /// (member index, role) pairs hard-excluded by an explicit 0% weight.
    pub zero_pref_excluded: HashSet<(usize, Role)>,
}

impl VariableSpace {
    pub fn contains(&self, member_idx: usize, role: Role, day_idx: usize) -> bool {
        self.admissible.contains(&(member_idx, role, day_idx))
    }

    pub fn weight(&self, member_idx: usize, role: Role) -> f64 {
        self.weights
            .get(&(member_idx, role))
            .copied()
            .unwrap_or(DEFAULT_PREFERENCE)
    }

    /// Member indices admissible for (role, day), in index order.
    pub fn candidates(&self, problem: &RosterProblem, role: Role, day_idx: usize) -> Vec<usize> {
        (0..problem.members.len())
            .filter(|&i| self.contains(i, role, day_idx))
            .collect()
    }

    /// Roles the member could take on the given day.
    pub fn roles_for(&self, problem: &RosterProblem, member_idx: usize, day_idx: usize) -> Vec<Role> {
        problem
            .roles
            .iter()
            .copied()
            .filter(|&r| self.contains(member_idx, r, day_idx))
            .collect()
    }
}

/// Builds the admissible variable space for a problem.
pub fn build(problem: &RosterProblem) -> VariableSpace {
    let mut space = VariableSpace::default();

    for (i, member) in problem.members.iter().enumerate() {
        let prefs = problem.prefs_of(&member.id);
        if prefs.opted_out() {
            continue;
        }

        let eligible: Vec<Role> = problem
            .roles
            .iter()
            .copied()
            .filter(|&r| member.eligibility.contains(r))
            .collect();
        if eligible.is_empty() {
            continue;
        }

        // A 0% weight normally hard-excludes the role, but a member whose
        // eligible roles are all 0-weighted (or who is eligible for just
        // one role) is read as having no opinion rather than opting out
        // of everything.
        let all_zero = eligible
            .iter()
            .all(|&r| prefs.weight_for(r) == Some(0));

        for &role in &eligible {
            let weight = match prefs.weight_for(role) {
                Some(0) if eligible.len() > 1 && !all_zero => {
                    space.zero_pref_excluded.insert((i, role));
                    continue;
                }
                Some(0) => DEFAULT_PREFERENCE,
                Some(w) => w as f64,
                None => DEFAULT_PREFERENCE,
            };
            space.weights.insert((i, role), weight);

            for (d, day) in problem.days.iter().enumerate() {
                if problem.blackouts.contains(&(member.id.clone(), *day)) {
                    continue;
                }
                space.admissible.insert((i, role, d));
            }
        }
    }

    space
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::extractor::{extract, RosterRequest};
    use crate::stores::ClubSnapshot;
    use crate::types::facts::MemberPrefs;
    use crate::types::member::Member;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn problem_for(club: &ClubSnapshot, roles: Vec<Role>) -> RosterProblem {
        let request = RosterRequest {
            days: vec![day(7), day(8)],
            roles,
        };
        extract(&request, club, club, club).unwrap()
    }

    fn weights(pairs: &[(Role, u8)]) -> MemberPrefs {
        MemberPrefs {
            weights: pairs.iter().copied().collect(),
            ..MemberPrefs::default()
        }
    }

    #[test]
    fn prunes_roles_without_flag() {
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new("alice", "Alice", &[Role::DutyOfficer]));
        let problem = problem_for(&club, vec![Role::DutyOfficer, Role::TowPilot]);
        let space = build(&problem);
        assert!(space.contains(0, Role::DutyOfficer, 0));
        assert!(!space.contains(0, Role::TowPilot, 0));
    }

    #[test]
    fn prunes_suspended_and_dont_schedule() {
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new("alice", "Alice", &[Role::DutyOfficer]));
        club.add_member(Member::new("bob", "Bob", &[Role::DutyOfficer]));
        club.set_prefs(
            "alice",
            MemberPrefs {
                suspended: true,
                ..MemberPrefs::default()
            },
        );
        club.set_prefs(
            "bob",
            MemberPrefs {
                dont_schedule: true,
                ..MemberPrefs::default()
            },
        );
        let problem = problem_for(&club, vec![Role::DutyOfficer]);
        let space = build(&problem);
        assert!(space.admissible.is_empty());
    }

    #[test]
    fn prunes_blackout_days_only() {
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new("alice", "Alice", &[Role::DutyOfficer]));
        club.blackout("alice", day(7));
        let problem = problem_for(&club, vec![Role::DutyOfficer]);
        let space = build(&problem);
        assert!(!space.contains(0, Role::DutyOfficer, 0));
        assert!(space.contains(0, Role::DutyOfficer, 1));
    }

    #[test]
    fn zero_weight_single_role_stays_available() {
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new("alice", "Alice", &[Role::TowPilot]));
        club.set_prefs("alice", weights(&[(Role::TowPilot, 0)]));
        let problem = problem_for(&club, vec![Role::TowPilot]);
        let space = build(&problem);
        assert!(space.contains(0, Role::TowPilot, 0));
        assert_eq!(space.weight(0, Role::TowPilot), DEFAULT_PREFERENCE);
    }

    #[test]
    fn zero_weight_with_nonzero_sibling_is_excluded() {
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new(
            "alice",
            "Alice",
            &[Role::TowPilot, Role::DutyOfficer],
        ));
        club.set_prefs(
            "alice",
            weights(&[(Role::TowPilot, 0), (Role::DutyOfficer, 80)]),
        );
        let problem = problem_for(&club, vec![Role::DutyOfficer, Role::TowPilot]);
        let space = build(&problem);
        assert!(!space.contains(0, Role::TowPilot, 0));
        assert!(space.zero_pref_excluded.contains(&(0, Role::TowPilot)));
        assert!(space.contains(0, Role::DutyOfficer, 0));
        assert_eq!(space.weight(0, Role::DutyOfficer), 80.0);
    }

    #[test]
    fn all_zero_weights_read_as_no_opinion() {
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new(
            "alice",
            "Alice",
            &[Role::TowPilot, Role::DutyOfficer],
        ));
        club.set_prefs(
            "alice",
            weights(&[(Role::TowPilot, 0), (Role::DutyOfficer, 0)]),
        );
        let problem = problem_for(&club, vec![Role::DutyOfficer, Role::TowPilot]);
        let space = build(&problem);
        assert!(space.contains(0, Role::TowPilot, 0));
        assert!(space.contains(0, Role::DutyOfficer, 0));
        assert_eq!(space.weight(0, Role::TowPilot), DEFAULT_PREFERENCE);
        assert!(space.zero_pref_excluded.is_empty());
    }

    #[test]
    fn absent_sibling_weight_counts_as_nonzero() {
        // Tow weighted 0, duty has no record: duty defaults to 100, so the
        // 0 is a real opt-out of tow.
        let mut club = ClubSnapshot::new();
        club.add_member(Member::new(
            "alice",
            "Alice",
            &[Role::TowPilot, Role::DutyOfficer],
        ));
        club.set_prefs("alice", weights(&[(Role::TowPilot, 0)]));
        let problem = problem_for(&club, vec![Role::DutyOfficer, Role::TowPilot]);
        let space = build(&problem);
        assert!(!space.contains(0, Role::TowPilot, 0));
        assert!(space.contains(0, Role::DutyOfficer, 0));
    }
}
