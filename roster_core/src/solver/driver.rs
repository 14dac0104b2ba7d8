use good_lp::{default_solver, ResolutionError, Solution, SolverModel, Variable};
use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::compiler::RosterCompiler;
use crate::types::assignment::Slot;
use crate::types::member::MemberId;

/// The exact solver's verdict, as a tagged value rather than an error,
/// so the caller handles every case explicitly and diagnostics are never
/// lost in a stack unwind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(BTreeMap<Slot, MemberId>),
    Infeasible,
    Timeout,
}

/// Hands the compiled model to the MILP solver under a hard wall-clock
/// budget. The solve runs on a worker thread; if the budget elapses the
/// worker is abandoned and `Timeout` is returned immediately, so the
/// caller can proceed to the fallback without blocking. The backend
/// (microlp) searches single-threaded, which keeps the exact path
/// deterministic for identical inputs.
pub fn solve(compiler: RosterCompiler<'_>, timeout: Duration) -> SolveOutcome {
    // Label every decision variable up front so the worker owns plain data
    // and no problem borrows cross the thread boundary.
    let mut labeled: Vec<(Slot, MemberId, Variable)> =
        Vec::with_capacity(compiler.assign.len());
    for (&(i, role, d), &var) in &compiler.assign {
        labeled.push((
            Slot::new(role, compiler.problem.days[d]),
            compiler.problem.members[i].id.clone(),
            var,
        ));
    }

    let RosterCompiler {
        vars,
        constraints,
        objective,
        ..
    } = compiler;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut model = vars.maximise(objective).using(default_solver);
        for c in constraints {
            model = model.with(c);
        }

        let outcome = match model.solve() {
            Ok(sol) => {
                let mut filled = BTreeMap::new();
                for (slot, member, var) in labeled {
                    if sol.value(var) > 0.5 {
                        filled.insert(slot, member);
                    }
                }
                SolveOutcome::Solved(filled)
            }
            Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible,
            // A pure-binary model is always bounded; any other solver
            // failure means no usable incumbent either.
            Err(_) => SolveOutcome::Infeasible,
        };
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(timeout) {
        Ok(outcome) => outcome,
        Err(mpsc::RecvTimeoutError::Timeout) => SolveOutcome::Timeout,
        // Worker died without reporting; treat as infeasible so the
        // fallback still gets its chance.
        Err(mpsc::RecvTimeoutError::Disconnected) => SolveOutcome::Infeasible,
    }
}
