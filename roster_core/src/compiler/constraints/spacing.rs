use good_lp::constraint;

use crate::compiler::debugging::debug_print;
use crate::compiler::roster_compiler::RosterCompiler;

/// Anti-repeat: no member serves the same role on two calendar-adjacent
/// operable days. Operable days separated by a gap are unconstrained.
pub fn apply(compiler: &mut RosterCompiler) {
    let problem = compiler.problem;
    let adjacent = problem.adjacent_day_pairs();

    for &(d1, d2) in &adjacent {
        for i in 0..problem.members.len() {
            for &role in &problem.roles {
                let (v1, v2) = match (
                    compiler.assign.get(&(i, role, d1)),
                    compiler.assign.get(&(i, role, d2)),
                ) {
                    (Some(v1), Some(v2)) => (*v1, *v2),
                    _ => continue,
                };
                compiler.constraints.push(constraint!(v1 + v2 <= 1.0));

                if compiler.debug {
                    debug_print(
                        compiler,
                        "🔁",
                        &format!(
                            "{} may not repeat {} across {} / {}",
                            problem.members[i].id,
                            role,
                            problem.days[d1],
                            problem.days[d2]
                        ),
                    );
                }
            }
        }
    }
}
