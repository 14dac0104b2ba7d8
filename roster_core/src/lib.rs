//! Constraint-based duty roster scheduler.
//!
//! Assigns club members to daily duty roles (Duty Officer, Assistant
//! Duty Officer, Instructor, Tow Pilot) across a scheduling period,
//! honoring hard eligibility rules and optimizing preference, fairness,
//! and social pairing. The exact path compiles the problem to a MILP and
//! solves it under a wall-clock budget; a deterministic-if-seeded greedy
//! fallback covers infeasible or over-budget runs. Every unfilled slot
//! comes back with an explanation of what eliminated its candidates.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod fallback;
pub mod materialize;
pub mod problem;
pub mod solver;
pub mod stores;
pub mod types;

use std::collections::BTreeMap;

pub use config::{RosterConfig, SolverMode};
pub use error::RosterError;
pub use problem::extractor::{extract, RosterProblem, RosterRequest};
pub use solver::SolveOutcome;
pub use types::assignment::{
    Assignment, ReasonCode, RosterOutcome, Slot, SlotDiagnostic, SlotOutcome, SolvePath,
};
pub use types::facts::{MemberPair, MemberPrefs};
pub use types::member::{Member, MemberId, Role, RoleSet};

use crate::compiler::constraints::coverage;
use crate::compiler::RosterCompiler;
use crate::problem::variables::VariableSpace;
use crate::stores::{AssignmentStore, ConstraintStore, MemberDirectory, PreferenceStore};

/// Runs one complete scheduling pass for the request and writes the
/// resulting batch to the assignment store.
///
/// The caller must not start two runs for overlapping periods
/// concurrently; the core assumes single-run exclusivity.
pub fn generate(
    request: &RosterRequest,
    directory: &dyn MemberDirectory,
    prefs: &dyn PreferenceStore,
    constraints: &dyn ConstraintStore,
    store: &mut dyn AssignmentStore,
    config: &RosterConfig,
) -> Result<RosterOutcome, RosterError> {
    let problem = problem::extractor::extract(request, directory, prefs, constraints)?;
    let space = problem::variables::build(&problem);

    // Structural failures abort before any solving work, on both paths.
    coverage::precheck(&problem, &space)?;

    match config.mode {
        SolverMode::FallbackOnly => {
            let picks = fallback::schedule(&problem, &space, config);
            materialize::materialize(&problem, &space, picks, SolvePath::FallbackOnly, store, config)
        }
        SolverMode::Exact => {
            let mut compiler = RosterCompiler::new(&problem, &space, config);
            compiler.compile()?;

            match solver::solve(compiler, config.solver_timeout) {
                SolveOutcome::Solved(filled) => {
                    let picks: BTreeMap<Slot, SlotOutcome> = filled
                        .into_iter()
                        .map(|(slot, member)| (slot, SlotOutcome::Filled(member)))
                        .collect();
                    materialize::materialize(&problem, &space, picks, SolvePath::Exact, store, config)
                }
                SolveOutcome::Infeasible => {
                    exact_failed(&problem, &space, store, config, false)
                }
                SolveOutcome::Timeout => exact_failed(&problem, &space, store, config, true),
            }
        }
    }
}

/// The exact path came back empty-handed: run the fallback when enabled,
/// otherwise materialize a failed run whose diagnostics survive.
fn exact_failed(
    problem: &RosterProblem,
    space: &VariableSpace,
    store: &mut dyn AssignmentStore,
    config: &RosterConfig,
    timed_out: bool,
) -> Result<RosterOutcome, RosterError> {
    if config.fallback_enabled {
        let picks = fallback::schedule(problem, space, config);
        let path = if timed_out {
            SolvePath::FallbackAfterTimeout
        } else {
            SolvePath::FallbackAfterInfeasible
        };
        materialize::materialize(problem, space, picks, path, store, config)
    } else {
        let path = if timed_out {
            SolvePath::FailedTimeout
        } else {
            SolvePath::FailedInfeasible
        };
        materialize::materialize(problem, space, BTreeMap::new(), path, store, config)
    }
}
