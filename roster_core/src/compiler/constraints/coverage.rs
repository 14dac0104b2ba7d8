use good_lp::{constraint, Expression};

use crate::compiler::debugging::debug_print;
use crate::compiler::roster_compiler::RosterCompiler;
use crate::error::RosterError;
use crate::problem::extractor::RosterProblem;
use crate::problem::variables::VariableSpace;

/// Every (role, day) slot must have at least one admissible candidate
/// before the solver is even invoked. An empty eligible set is a
/// structural failure, reported per slot, not a solver infeasibility.
pub fn precheck(problem: &RosterProblem, space: &VariableSpace) -> Result<(), RosterError> {
    for &role in &problem.roles {
        for (d, day) in problem.days.iter().enumerate() {
            if space.candidates(problem, role, d).is_empty() {
                return Err(RosterError::UnfillableSlot { role, day: *day });
            }
        }
    }
    Ok(())
}

/// Slot coverage: for every (role, day), exactly one member is assigned.
pub fn apply(compiler: &mut RosterCompiler) {
    let problem = compiler.problem;

    for &role in &problem.roles {
        for d in 0..problem.days.len() {
            let vars = compiler.slot_vars(role, d);
            let mut sum = Expression::from(0);
            for v in &vars {
                sum += *v;
            }
            compiler.constraints.push(constraint!(sum == 1.0));

            if compiler.debug {
                debug_print(
                    compiler,
                    "📌",
                    &format!(
                        "{} on {}: exactly 1 of {} candidates",
                        role,
                        problem.days[d],
                        vars.len()
                    ),
                );
            }
        }
    }
}
