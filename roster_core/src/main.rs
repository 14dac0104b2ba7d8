use colored::*;
use std::error::Error;

use roster_core::cli::parse_options_from_args;
use roster_core::materialize::format_roster;
use roster_core::stores::{ClubSnapshot, InMemoryAssignments, WeekendPolicy};
use roster_core::{
    extract, generate, Member, MemberPrefs, Role, RosterRequest, SolvePath,
};

fn main() -> Result<(), Box<dyn Error>> {
    // 1) Gather config from CLI (period, budget, seed, mode)
    let options = parse_options_from_args();
    println!(
        "Scheduling {}..{} ({:?}, timeout {:?})",
        options.start, options.end, options.config.mode, options.config.solver_timeout
    );

    // 2) A sample club snapshot, standing in for the real directory,
    //    preference, and constraint stores.
    let club = sample_club();

    // 3) Operable days come from the season policy (weekends).
    let request = RosterRequest::from_period(
        options.start,
        options.end,
        Role::ALL.to_vec(),
        &WeekendPolicy,
    )?;

    // 4) Run the scheduler and persist the batch.
    let mut store = InMemoryAssignments::new();
    let outcome = generate(&request, &club, &club, &club, &mut store, &options.config)?;

    // 5) Report.
    let problem = extract(&request, &club, &club, &club)?;
    println!("{}", format_roster(&outcome, &problem));

    let summary = format!(
        "{} of {} slots filled via {:?}",
        outcome.filled_count(),
        outcome.assignments.len(),
        outcome.path
    );
    if outcome.is_complete() {
        println!("{} {}", "✅".green(), summary.green());
    } else {
        println!("{} {}", "⚠️".yellow(), summary.yellow());
        if matches!(
            outcome.path,
            SolvePath::FallbackAfterTimeout | SolvePath::FailedTimeout
        ) {
            println!("   consider raising --timeout");
        }
    }

    Ok(())
}

fn sample_club() -> ClubSnapshot {
    let mut club = ClubSnapshot::new();

    club.add_member(Member::new(
        "m01",
        "Ana Kovač",
        &[Role::DutyOfficer, Role::Instructor],
    ));
    club.add_member(Member::new(
        "m02",
        "Ben Whitfield",
        &[Role::TowPilot, Role::DutyOfficer],
    ));
    club.add_member(Member::new(
        "m03",
        "Carla Mendes",
        &[Role::Instructor, Role::AssistantDutyOfficer],
    ));
    club.add_member(Member::new("m04", "Dmitri Orlov", &[Role::TowPilot]));
    club.add_member(Member::new(
        "m05",
        "Erin Walsh",
        &[Role::AssistantDutyOfficer, Role::DutyOfficer],
    ));
    club.add_member(Member::new(
        "m06",
        "Farid Nazari",
        &[Role::Instructor, Role::TowPilot],
    ));
    club.add_member(Member::new(
        "m07",
        "Grete Lindqvist",
        &[Role::DutyOfficer, Role::AssistantDutyOfficer],
    ));
    club.add_member(Member::new(
        "m08",
        "Henrik Olsen",
        &[Role::AssistantDutyOfficer, Role::TowPilot],
    ));
    club.add_member(Member::new(
        "m09",
        "Imre Takács",
        &[Role::Instructor, Role::DutyOfficer],
    ));
    club.add_member(Member::new("m10", "Joanna Price", &[Role::AssistantDutyOfficer]));

    // Preferences: Ben loves towing, tolerates duty officer; Erin wants
    // no more than two weekends a month; Imre has been off the roster
    // since January.
    club.set_prefs(
        "m02",
        MemberPrefs {
            weights: [(Role::TowPilot, 95), (Role::DutyOfficer, 30)]
                .into_iter()
                .collect(),
            ..MemberPrefs::default()
        },
    );
    club.set_prefs(
        "m05",
        MemberPrefs {
            max_per_month: Some(2),
            ..MemberPrefs::default()
        },
    );
    club.set_prefs(
        "m09",
        MemberPrefs {
            last_duty: chrono::NaiveDate::from_ymd_opt(2026, 1, 11),
            ..MemberPrefs::default()
        },
    );
    // Carla sits this period out.
    club.set_prefs(
        "m03",
        MemberPrefs {
            dont_schedule: true,
            ..MemberPrefs::default()
        },
    );

    // Grete is away the first weekend of March.
    if let Some(day) = chrono::NaiveDate::from_ymd_opt(2026, 3, 7) {
        club.blackout("m07", day);
    }
    if let Some(day) = chrono::NaiveDate::from_ymd_opt(2026, 3, 8) {
        club.blackout("m07", day);
    }

    // Dmitri and Ben fly better apart; Ana and Farid ask to share days.
    club.avoid("m04", "m02");
    club.pair("m01", "m06");

    club
}
