use good_lp::{constraint, variable, Expression};

use crate::compiler::debugging::debug_print;
use crate::compiler::roster_compiler::RosterCompiler;

/// Composes the single maximized objective:
///
/// - a preference term per decision variable (the member's effective
///   weight for that role, 0–100);
/// - a staleness term per decision variable (days since last duty,
///   scaled by `staleness_ratio`), so long-idle members float up;
/// - a pairing bonus per (pairing, day), awarded through an auxiliary
///   indicator that can only be 1 when both members hold some role that
///   day.
///
/// The result is a pure function of the variable assignment; identical
/// inputs always produce an identical expression.
pub fn compose(compiler: &mut RosterCompiler) {
    let problem = compiler.problem;
    let space = compiler.space;
    let config = compiler.config;

    // Preference + staleness, one coefficient per assignment variable.
    for i in 0..problem.members.len() {
        let stale_bonus = config.staleness_ratio * problem.staleness_days(i) as f64;
        for &role in &problem.roles {
            for d in 0..problem.days.len() {
                if let Some(&var) = compiler.assign.get(&(i, role, d)) {
                    let weight = space.weight(i, role) + stale_bonus;
                    compiler.objective += weight * var;
                }
            }
        }
    }

    // Pairing bonuses. The indicator is linked from above only; with a
    // positive bonus the maximizer raises it to 1 exactly when both
    // members are assigned that day.
    for (p, pair) in problem.pairings.iter().enumerate() {
        let (a, b) = match (
            problem.member_index(pair.first()),
            problem.member_index(pair.second()),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };

        for d in 0..problem.days.len() {
            let a_vars = compiler.member_day_vars(a, d);
            let b_vars = compiler.member_day_vars(b, d);
            if a_vars.is_empty() || b_vars.is_empty() {
                continue;
            }

            let indicator = compiler.vars.add(variable().binary());

            let mut a_sum = Expression::from(0);
            for v in &a_vars {
                a_sum += *v;
            }
            let mut b_sum = Expression::from(0);
            for v in &b_vars {
                b_sum += *v;
            }
            compiler.constraints.push(constraint!(indicator <= a_sum));
            compiler.constraints.push(constraint!(indicator <= b_sum));

            // The indicator cannot see which roles the two land in, so
            // the bonus uses each member's mean admissible-role weight.
            let bonus = config.pairing_factor
                * (mean_weight(compiler, a, d) + mean_weight(compiler, b, d))
                / 2.0;
            compiler.objective += bonus * indicator;
            compiler.together.insert((p, d), indicator);

            if compiler.debug {
                debug_print(
                    compiler,
                    "🤝",
                    &format!(
                        "{} + {} on {} worth {:.0}",
                        pair.first(),
                        pair.second(),
                        problem.days[d],
                        bonus
                    ),
                );
            }
        }
    }
}

/// Mean effective preference weight over the roles the member could take
/// on the given day.
fn mean_weight(compiler: &RosterCompiler, member_idx: usize, day_idx: usize) -> f64 {
    let roles = compiler
        .space
        .roles_for(compiler.problem, member_idx, day_idx);
    if roles.is_empty() {
        return 0.0;
    }
    let total: f64 = roles
        .iter()
        .map(|&r| compiler.space.weight(member_idx, r))
        .sum();
    total / roles.len() as f64
}
