use good_lp::{constraint, Expression};

use crate::compiler::debugging::debug_print;
use crate::compiler::roster_compiler::RosterCompiler;

/// Monthly cap: each member's total assignments across the whole period
/// stay within their configured (or the default) cap.
pub fn apply(compiler: &mut RosterCompiler) {
    let problem = compiler.problem;

    for i in 0..problem.members.len() {
        let vars = compiler.member_vars(i);
        if vars.is_empty() {
            continue;
        }
        let cap = problem.cap_for(i, compiler.config);

        // A cap the member cannot reach adds nothing to the model.
        if vars.len() as u32 <= cap {
            continue;
        }

        let mut sum = Expression::from(0);
        for v in &vars {
            sum += *v;
        }
        compiler.constraints.push(constraint!(sum <= cap as f64));

        if compiler.debug {
            debug_print(
                compiler,
                "🧢",
                &format!("{} capped at {} assignments", problem.members[i].id, cap),
            );
        }
    }
}
