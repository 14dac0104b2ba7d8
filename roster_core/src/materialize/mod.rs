//! Turns a solver or fallback result into the assignment batch, explains
//! every unfilled slot, and renders the roster for human eyes.

use std::collections::BTreeMap;

use crate::config::RosterConfig;
use crate::problem::extractor::RosterProblem;
use crate::problem::variables::VariableSpace;
use crate::stores::AssignmentStore;
use crate::types::assignment::{
    Assignment, ReasonCode, RosterOutcome, Slot, SlotDiagnostic, SlotOutcome, SolvePath,
};
use crate::error::RosterError;
use crate::types::member::MemberId;

/// Completes the per-slot outcome map, writes the whole period to the
/// assignment store as one batch, and attaches diagnostics for every
/// slot left unfilled.
pub fn materialize(
    problem: &RosterProblem,
    space: &VariableSpace,
    mut assignments: BTreeMap<Slot, SlotOutcome>,
    path: SolvePath,
    store: &mut dyn AssignmentStore,
    config: &RosterConfig,
) -> Result<RosterOutcome, RosterError> {
    // Coverage: every slot of the problem appears in the result, even on
    // a failed run, so readers never see a silently missing row.
    for &role in &problem.roles {
        for day in &problem.days {
            assignments
                .entry(Slot::new(role, *day))
                .or_insert(SlotOutcome::Unfilled(ReasonCode::Infeasible));
        }
    }

    let diagnostics = diagnose(problem, space, &assignments, config);

    let rows: Vec<Assignment> = assignments
        .iter()
        .map(|(slot, outcome)| Assignment {
            slot: *slot,
            outcome: outcome.clone(),
        })
        .collect();
    store.write_batch(&rows)?;

    Ok(RosterOutcome {
        assignments,
        diagnostics,
        path,
    })
}

/// For each unfilled slot, works out which hard constraint eliminated
/// every candidate, judged against the final state of the roster.
fn diagnose(
    problem: &RosterProblem,
    space: &VariableSpace,
    assignments: &BTreeMap<Slot, SlotOutcome>,
    config: &RosterConfig,
) -> Vec<SlotDiagnostic> {
    let mut diagnostics = Vec::new();

    for (slot, outcome) in assignments {
        if outcome.is_filled() {
            continue;
        }
        let eliminations = eliminations_for(problem, space, assignments, slot, config);
        let considered = problem
            .members
            .iter()
            .filter(|m| m.eligibility.contains(slot.role))
            .count();
        let free = considered - eliminations.len();
        let summary = summarize(slot, &eliminations, free);
        diagnostics.push(SlotDiagnostic {
            slot: *slot,
            eliminations,
            summary,
        });
    }

    diagnostics
}

fn eliminations_for(
    problem: &RosterProblem,
    space: &VariableSpace,
    assignments: &BTreeMap<Slot, SlotOutcome>,
    slot: &Slot,
    config: &RosterConfig,
) -> Vec<(MemberId, ReasonCode)> {
    let day_idx = problem
        .days
        .iter()
        .position(|d| *d == slot.day)
        .unwrap_or(0);

    let assigned_today: Vec<&MemberId> = problem
        .roles
        .iter()
        .filter_map(|&r| assignments.get(&Slot::new(r, slot.day)))
        .filter_map(|o| o.member())
        .collect();

    let mut out = Vec::new();
    for (i, member) in problem.members.iter().enumerate() {
        if !member.eligibility.contains(slot.role) {
            continue;
        }
        let prefs = problem.prefs_of(&member.id);

        let reason = if prefs.opted_out() {
            Some(ReasonCode::OptedOut)
        } else if problem.blackouts.contains(&(member.id.clone(), slot.day)) {
            Some(ReasonCode::BlackedOut)
        } else if space.zero_pref_excluded.contains(&(i, slot.role)) {
            Some(ReasonCode::ZeroPreference)
        } else if assigned_today.contains(&&member.id) {
            Some(ReasonCode::AlreadyAssignedThatDay)
        } else if problem.avoidances.iter().any(|pair| {
            pair.other(&member.id)
                .map(|partner| assigned_today.contains(&partner))
                .unwrap_or(false)
        }) {
            Some(ReasonCode::AvoidanceConflict)
        } else if serves_role_on_adjacent_day(problem, assignments, &member.id, slot, day_idx) {
            Some(ReasonCode::AntiRepeat)
        } else if assignment_count(assignments, &member.id) >= problem.cap_for(i, config) {
            Some(ReasonCode::CapExhausted)
        } else {
            None
        };

        if let Some(reason) = reason {
            out.push((member.id.clone(), reason));
        }
    }

    out
}

fn serves_role_on_adjacent_day(
    problem: &RosterProblem,
    assignments: &BTreeMap<Slot, SlotOutcome>,
    member: &MemberId,
    slot: &Slot,
    day_idx: usize,
) -> bool {
    problem
        .adjacent_day_pairs()
        .iter()
        .filter_map(|&(d1, d2)| {
            if d1 == day_idx {
                Some(d2)
            } else if d2 == day_idx {
                Some(d1)
            } else {
                None
            }
        })
        .any(|neighbor| {
            assignments
                .get(&Slot::new(slot.role, problem.days[neighbor]))
                .and_then(|o| o.member())
                == Some(member)
        })
}

fn assignment_count(assignments: &BTreeMap<Slot, SlotOutcome>, member: &MemberId) -> u32 {
    assignments
        .values()
        .filter(|o| o.member() == Some(member))
        .count() as u32
}

/// One line per unfilled slot, in the coordinator's language:
/// "all 3 eligible members blacked out", "only eligible member already
/// assigned elsewhere that day". A slot with candidates left standing
/// was starved by the constraint set as a whole, not by any one rule.
fn summarize(slot: &Slot, eliminations: &[(MemberId, ReasonCode)], free: usize) -> String {
    if eliminations.is_empty() && free == 0 {
        return format!("no eligible, unblocked member for {}", slot);
    }
    if free > 0 {
        return ReasonCode::Infeasible.phrase().to_string();
    }

    let first = eliminations[0].1;
    if eliminations.iter().all(|(_, r)| *r == first) {
        return if eliminations.len() == 1 {
            format!("only eligible member {}", first.phrase())
        } else {
            format!("all {} eligible members {}", eliminations.len(), first.phrase())
        };
    }

    let mut parts: Vec<String> = Vec::new();
    let mut seen: Vec<ReasonCode> = Vec::new();
    for (_, reason) in eliminations {
        if seen.contains(reason) {
            continue;
        }
        seen.push(*reason);
        let n = eliminations.iter().filter(|(_, r)| r == reason).count();
        parts.push(format!("{} {}", n, reason.phrase()));
    }
    parts.join("; ")
}

/// Renders the roster grouped by day, with an unfilled-slot section,
/// ready for printing by the demo binary.
pub fn format_roster(outcome: &RosterOutcome, problem: &RosterProblem) -> String {
    let mut result = String::new();
    result.push_str("Duty roster:\n");

    let name_of = |id: &MemberId| -> String {
        problem
            .members
            .iter()
            .find(|m| m.id == *id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let mut current_day = None;
    for (slot, slot_outcome) in &outcome.assignments {
        if current_day != Some(slot.day) {
            result.push_str(&format!("\n  {}\n", slot.day.format("%a %Y-%m-%d")));
            current_day = Some(slot.day);
        }
        match slot_outcome {
            SlotOutcome::Filled(id) => {
                result.push_str(&format!("    {:<24} {}\n", slot.role.label(), name_of(id)));
            }
            SlotOutcome::Unfilled(reason) => {
                result.push_str(&format!(
                    "    {:<24} — unfilled ({})\n",
                    slot.role.label(),
                    reason.phrase()
                ));
            }
        }
    }

    if !outcome.diagnostics.is_empty() {
        result.push_str("\nUnfilled slots:\n");
        for diag in &outcome.diagnostics {
            result.push_str(&format!("  {}: {}\n", diag.slot, diag.summary));
        }
    }

    result
}
