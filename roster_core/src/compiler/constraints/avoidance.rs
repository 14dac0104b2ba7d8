use good_lp::{constraint, Expression};

use crate::compiler::debugging::debug_print;
use crate::compiler::roster_compiler::RosterCompiler;

/// Avoidance: for each avoidance pair and each day, at most one of the
/// two members is assigned, across all roles.
pub fn apply(compiler: &mut RosterCompiler) {
    let problem = compiler.problem;

    for pair in &problem.avoidances {
        let (a, b) = match (
            problem.member_index(pair.first()),
            problem.member_index(pair.second()),
        ) {
            (Some(a), Some(b)) => (a, b),
            // A pair involving an inactive or unknown member constrains nothing.
            _ => continue,
        };

        for d in 0..problem.days.len() {
            let mut vars = compiler.member_day_vars(a, d);
            vars.extend(compiler.member_day_vars(b, d));
            if vars.len() < 2 {
                continue;
            }

            let mut sum = Expression::from(0);
            for v in &vars {
                sum += *v;
            }
            compiler.constraints.push(constraint!(sum <= 1.0));

            if compiler.debug {
                debug_print(
                    compiler,
                    "🚧",
                    &format!(
                        "{} / {} must not share {}",
                        pair.first(),
                        pair.second(),
                        problem.days[d]
                    ),
                );
            }
        }
    }
}
