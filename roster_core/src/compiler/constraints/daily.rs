use good_lp::{constraint, Expression};

use crate::compiler::roster_compiler::RosterCompiler;

/// One role per member per day: a member holds at most one duty role on
/// any single operating day.
pub fn apply(compiler: &mut RosterCompiler) {
    let problem = compiler.problem;

    for i in 0..problem.members.len() {
        for d in 0..problem.days.len() {
            let vars = compiler.member_day_vars(i, d);
            if vars.len() < 2 {
                continue;
            }

            let mut sum = Expression::from(0);
            for v in &vars {
                sum += *v;
            }
            compiler.constraints.push(constraint!(sum <= 1.0));
        }
    }
}
