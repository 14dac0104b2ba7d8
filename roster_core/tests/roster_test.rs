//! End-to-end scheduling scenarios driven through `generate`, using the
//! in-memory collaborator implementations.

use chrono::NaiveDate;
use std::collections::HashMap;

use roster_core::stores::{ClubSnapshot, InMemoryAssignments};
use roster_core::{
    generate, Member, MemberId, MemberPrefs, ReasonCode, Role, RosterConfig, RosterOutcome,
    RosterRequest, Slot, SlotOutcome, SolvePath, SolverMode,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn run(
    club: &ClubSnapshot,
    days: Vec<NaiveDate>,
    roles: Vec<Role>,
    config: &RosterConfig,
) -> RosterOutcome {
    let request = RosterRequest { days, roles };
    let mut store = InMemoryAssignments::new();
    let outcome = generate(&request, club, club, club, &mut store, config).unwrap();
    // The store receives exactly the batch the outcome reports.
    assert_eq!(store.rows.len(), outcome.assignments.len());
    outcome
}

/// Three members, two roles, three consecutive days: every slot fills
/// and nobody works two roles on the same day.
fn abc_club() -> ClubSnapshot {
    let mut club = ClubSnapshot::new();
    club.add_member(Member::new(
        "a",
        "Member A",
        &[Role::TowPilot, Role::DutyOfficer],
    ));
    club.add_member(Member::new("b", "Member B", &[Role::TowPilot]));
    club.add_member(Member::new("c", "Member C", &[Role::DutyOfficer]));
    club
}

fn assert_no_double_booking(outcome: &RosterOutcome) {
    let mut by_day: HashMap<NaiveDate, Vec<&MemberId>> = HashMap::new();
    for (slot, slot_outcome) in &outcome.assignments {
        if let Some(member) = slot_outcome.member() {
            by_day.entry(slot.day).or_default().push(member);
        }
    }
    for (day, members) in by_day {
        let mut unique = members.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(
            unique.len(),
            members.len(),
            "member assigned twice on {}",
            day
        );
    }
}

#[test]
fn fills_three_day_two_role_roster() {
    let outcome = run(
        &abc_club(),
        vec![day(7), day(8), day(9)],
        vec![Role::TowPilot, Role::DutyOfficer],
        &RosterConfig::default(),
    );

    assert_eq!(outcome.assignments.len(), 6);
    assert!(outcome.is_complete(), "expected all 6 slots filled");
    assert_eq!(outcome.path, SolvePath::Exact);
    assert_no_double_booking(&outcome);
}

#[test]
fn avoidance_starves_tow_when_duty_takes_the_shared_member() {
    // A and B are an avoidance pair and B is the only alternate tow
    // pilot: any day A holds duty, tow must stay open.
    let mut club = abc_club();
    club.avoid("a", "b");

    let outcome = run(
        &club,
        vec![day(7), day(8), day(9)],
        vec![Role::TowPilot, Role::DutyOfficer],
        &RosterConfig::default(),
    );

    assert_eq!(outcome.assignments.len(), 6);
    assert_eq!(outcome.path, SolvePath::FallbackAfterInfeasible);
    assert_no_double_booking(&outcome);

    let a = MemberId::new("a");
    let b = MemberId::new("b");
    let mut saw_avoidance_gap = false;
    for d in [day(7), day(8), day(9)] {
        let duty = &outcome.assignments[&Slot::new(Role::DutyOfficer, d)];
        let tow = &outcome.assignments[&Slot::new(Role::TowPilot, d)];

        // Avoidance holds everywhere.
        if duty.member() == Some(&a) {
            assert_ne!(tow.member(), Some(&b), "avoidance pair shared {}", d);
        }
        if *duty == SlotOutcome::Filled(a.clone()) {
            if let SlotOutcome::Unfilled(reason) = tow {
                assert_eq!(*reason, ReasonCode::AvoidanceConflict);
                saw_avoidance_gap = true;
            }
        }
    }
    assert!(saw_avoidance_gap, "expected a tow slot starved by avoidance");

    // The diagnostics name the avoidance conflict too.
    assert!(outcome
        .diagnostics
        .iter()
        .any(|diag| diag.eliminations.contains(&(b.clone(), ReasonCode::AvoidanceConflict))));
}

#[test]
fn cap_limits_sole_eligible_member() {
    // D is the only duty candidate on two (non-adjacent) Saturdays and
    // capped at one assignment; E covers the middle day only.
    let mut club = ClubSnapshot::new();
    club.add_member(Member::new("d", "Member D", &[Role::DutyOfficer]));
    club.add_member(Member::new("e", "Member E", &[Role::DutyOfficer]));
    club.set_prefs(
        "d",
        MemberPrefs {
            max_per_month: Some(1),
            ..MemberPrefs::default()
        },
    );
    club.blackout("e", day(7));
    club.blackout("e", day(21));

    let outcome = run(
        &club,
        vec![day(7), day(14), day(21)],
        vec![Role::DutyOfficer],
        &RosterConfig::default(),
    );

    assert_eq!(outcome.path, SolvePath::FallbackAfterInfeasible);

    let d_id = MemberId::new("d");
    let first = &outcome.assignments[&Slot::new(Role::DutyOfficer, day(7))];
    let last = &outcome.assignments[&Slot::new(Role::DutyOfficer, day(21))];
    let d_filled = [first, last]
        .iter()
        .filter(|o| o.member() == Some(&d_id))
        .count();
    assert_eq!(d_filled, 1, "cap of 1 allows exactly one of the two days");
    assert!(
        [first, last]
            .iter()
            .any(|o| **o == SlotOutcome::Unfilled(ReasonCode::CapExhausted)),
        "the other day reports the cap"
    );
    assert_eq!(
        outcome.assignments[&Slot::new(Role::DutyOfficer, day(14))],
        SlotOutcome::Filled(MemberId::new("e"))
    );
}

#[test]
fn exact_path_is_deterministic() {
    // Distinct weights give the model a unique optimum, so repeated runs
    // must reproduce it exactly.
    let mut club = abc_club();
    club.set_prefs(
        "a",
        MemberPrefs {
            weights: [(Role::TowPilot, 90), (Role::DutyOfficer, 60)]
                .into_iter()
                .collect(),
            ..MemberPrefs::default()
        },
    );
    let config = RosterConfig::default();
    let days = vec![day(7), day(8), day(9)];
    let roles = vec![Role::TowPilot, Role::DutyOfficer];

    let first = run(&club, days.clone(), roles.clone(), &config);
    let second = run(&club, days, roles, &config);
    assert_eq!(first.assignments, second.assignments);
    assert_eq!(first.path, second.path);
}

#[test]
fn seeded_fallback_is_deterministic() {
    let club = abc_club();
    let config = RosterConfig {
        mode: SolverMode::FallbackOnly,
        seed: Some(7),
        ..RosterConfig::default()
    };
    let days = vec![day(7), day(8), day(14), day(15)];
    let roles = vec![Role::TowPilot, Role::DutyOfficer];

    let first = run(&club, days.clone(), roles.clone(), &config);
    let second = run(&club, days, roles, &config);
    assert_eq!(first.assignments, second.assignments);
}

#[test]
fn full_month_respects_every_hard_rule() {
    let mut club = ClubSnapshot::new();
    club.add_member(Member::new("m1", "M1", &[Role::DutyOfficer, Role::Instructor]));
    club.add_member(Member::new("m2", "M2", &[Role::TowPilot, Role::DutyOfficer]));
    club.add_member(Member::new(
        "m3",
        "M3",
        &[Role::Instructor, Role::AssistantDutyOfficer],
    ));
    club.add_member(Member::new("m4", "M4", &[Role::TowPilot]));
    club.add_member(Member::new(
        "m5",
        "M5",
        &[Role::AssistantDutyOfficer, Role::DutyOfficer],
    ));
    club.add_member(Member::new("m6", "M6", &[Role::Instructor, Role::TowPilot]));
    club.add_member(Member::new(
        "m7",
        "M7",
        &[Role::DutyOfficer, Role::AssistantDutyOfficer],
    ));
    club.add_member(Member::new(
        "m8",
        "M8",
        &[Role::AssistantDutyOfficer, Role::TowPilot],
    ));
    club.blackout("m7", day(7));
    club.avoid("m4", "m2");
    club.pair("m1", "m6");
    club.set_prefs(
        "m5",
        MemberPrefs {
            max_per_month: Some(2),
            ..MemberPrefs::default()
        },
    );

    let days = vec![day(7), day(8), day(14), day(15)];
    let outcome = run(
        &club,
        days.clone(),
        Role::ALL.to_vec(),
        &RosterConfig::default(),
    );

    // Coverage: one outcome per slot, never absent.
    assert_eq!(outcome.assignments.len(), Role::ALL.len() * days.len());
    assert_no_double_booking(&outcome);

    // Blackout respected.
    assert!(outcome
        .assignments
        .iter()
        .all(|(slot, o)| !(slot.day == day(7) && o.member() == Some(&MemberId::new("m7")))));

    // Avoidance respected.
    for d in &days {
        let assigned: Vec<_> = Role::ALL
            .iter()
            .filter_map(|&r| outcome.assignments[&Slot::new(r, *d)].member())
            .collect();
        assert!(
            !(assigned.contains(&&MemberId::new("m4")) && assigned.contains(&&MemberId::new("m2"))),
            "avoidance pair shared {}",
            d
        );
    }

    // Anti-repeat respected across both adjacent weekend pairs.
    for (d1, d2) in [(day(7), day(8)), (day(14), day(15))] {
        for &role in &Role::ALL {
            let first = outcome.assignments[&Slot::new(role, d1)].member();
            let second = outcome.assignments[&Slot::new(role, d2)].member();
            if first.is_some() {
                assert_ne!(first, second, "{} repeated on {} and {}", role, d1, d2);
            }
        }
    }

    // Cap respected.
    let m5_count = outcome
        .assignments
        .values()
        .filter(|o| o.member() == Some(&MemberId::new("m5")))
        .count();
    assert!(m5_count <= 2, "m5 capped at 2, got {}", m5_count);
}

#[test]
fn disabled_fallback_surfaces_failed_run_with_diagnostics() {
    let mut club = abc_club();
    club.avoid("a", "b");
    let config = RosterConfig {
        fallback_enabled: false,
        ..RosterConfig::default()
    };

    let outcome = run(
        &club,
        vec![day(7), day(8), day(9)],
        vec![Role::TowPilot, Role::DutyOfficer],
        &config,
    );

    assert_eq!(outcome.path, SolvePath::FailedInfeasible);
    assert_eq!(outcome.filled_count(), 0);
    assert_eq!(outcome.assignments.len(), 6);
    assert_eq!(outcome.diagnostics.len(), 6);
}
