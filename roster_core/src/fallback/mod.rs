//! Deterministic-if-seeded greedy scheduler, used when the exact solver
//! is disabled, proves the model infeasible, or exceeds its budget.
//!
//! Slots are processed in increasing order of candidate count (scarcest
//! first), and each pick re-validates the avoidance, one-role-per-day,
//! anti-repeat, and cap rules against the picks already made. A slot
//! with no surviving candidate is recorded as unfilled with the reason
//! that best explains it; the procedure never fails outright.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::RosterConfig;
use crate::problem::extractor::RosterProblem;
use crate::problem::variables::VariableSpace;
use crate::types::assignment::{ReasonCode, Slot, SlotOutcome};
use crate::types::member::Role;

pub fn schedule(
    problem: &RosterProblem,
    space: &VariableSpace,
    config: &RosterConfig,
) -> BTreeMap<Slot, SlotOutcome> {
    let mut rng = config.seed.map(StdRng::seed_from_u64);

    // Precompute the scarcity order: fewest admissible candidates first,
    // ties broken by (day, role) so the order is reproducible.
    let mut slots: Vec<(usize, Role, Vec<usize>)> = Vec::new();
    for &role in &problem.roles {
        for d in 0..problem.days.len() {
            slots.push((d, role, space.candidates(problem, role, d)));
        }
    }
    slots.sort_by_key(|(d, role, cands)| (cands.len(), *d, role.index()));

    // Per-member avoidance partners, by index.
    let mut avoid_partners: HashMap<usize, Vec<usize>> = HashMap::new();
    for pair in &problem.avoidances {
        if let (Some(a), Some(b)) = (
            problem.member_index(pair.first()),
            problem.member_index(pair.second()),
        ) {
            avoid_partners.entry(a).or_default().push(b);
            avoid_partners.entry(b).or_default().push(a);
        }
    }

    // Day indices one calendar day away from each day index.
    let mut neighbors: HashMap<usize, Vec<usize>> = HashMap::new();
    for (d1, d2) in problem.adjacent_day_pairs() {
        neighbors.entry(d1).or_default().push(d2);
        neighbors.entry(d2).or_default().push(d1);
    }

    let mut picks: BTreeMap<Slot, SlotOutcome> = BTreeMap::new();
    let mut assigned_on_day: HashMap<usize, HashSet<usize>> = HashMap::new();
    let mut role_taken: HashSet<(usize, Role, usize)> = HashSet::new();
    let mut counts: HashMap<usize, u32> = HashMap::new();

    for (d, role, candidates) in slots {
        let slot = Slot::new(role, problem.days[d]);
        let day_assigned = assigned_on_day.entry(d).or_default();

        let mut viable: Vec<usize> = Vec::new();
        let mut blocked: Vec<ReasonCode> = Vec::new();
        for &i in &candidates {
            if day_assigned.contains(&i) {
                blocked.push(ReasonCode::AlreadyAssignedThatDay);
            } else if avoid_partners
                .get(&i)
                .map(|ps| ps.iter().any(|p| day_assigned.contains(p)))
                .unwrap_or(false)
            {
                blocked.push(ReasonCode::AvoidanceConflict);
            } else if neighbors
                .get(&d)
                .map(|ns| ns.iter().any(|&n| role_taken.contains(&(i, role, n))))
                .unwrap_or(false)
            {
                blocked.push(ReasonCode::AntiRepeat);
            } else if counts.get(&i).copied().unwrap_or(0) >= problem.cap_for(i, config) {
                blocked.push(ReasonCode::CapExhausted);
            } else {
                viable.push(i);
            }
        }

        if viable.is_empty() {
            let reason = blocked
                .into_iter()
                .min_by_key(|r| r.priority())
                .unwrap_or(ReasonCode::NoEligibleMember);
            picks.insert(slot, SlotOutcome::Unfilled(reason));
            continue;
        }

        let weights: Vec<f64> = viable
            .iter()
            .map(|&i| {
                space.weight(i, role) + config.staleness_ratio * problem.staleness_days(i) as f64
            })
            .collect();
        let winner = pick(&viable, &weights, &mut rng);

        day_assigned.insert(winner);
        role_taken.insert((winner, role, d));
        *counts.entry(winner).or_insert(0) += 1;
        picks.insert(slot, SlotOutcome::Filled(problem.members[winner].id.clone()));
    }

    picks
}

/// Weighted draw when seeded; otherwise the highest-weighted candidate,
/// ties going to the lowest member index (and thus the smallest id,
/// since members are id-sorted).
fn pick(viable: &[usize], weights: &[f64], rng: &mut Option<StdRng>) -> usize {
    if let Some(rng) = rng {
        if let Ok(dist) = WeightedIndex::new(weights) {
            return viable[dist.sample(rng)];
        }
    }

    let mut best = 0;
    for k in 1..viable.len() {
        if weights[k] > weights[best] {
            best = k;
        }
    }
    viable[best]
}
