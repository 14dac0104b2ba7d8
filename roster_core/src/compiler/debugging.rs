use colored::*;

use crate::compiler::roster_compiler::RosterCompiler;

pub fn debug_print(compiler: &RosterCompiler, emoji: &str, message: &str) {
    if compiler.debug {
        println!("{} {}", emoji.green(), message.bright_blue());
    }
}

pub fn debug_error(compiler: &RosterCompiler, emoji: &str, message: &str) {
    if compiler.debug {
        println!("{} {}", emoji.red(), message.bright_red());
    }
}

/// Dumps the compiled model: variable/constraint counts and per-slot
/// candidate counts, the cheapest way to spot an over-pruned space.
pub fn debug_model_state(compiler: &RosterCompiler) {
    if !compiler.debug {
        return;
    }

    println!("{}", "🔍 Compiled model:".yellow().bold());
    println!(
        "   {} assignment variables, {} pairing indicators, {} constraints",
        compiler.assign.len().to_string().cyan(),
        compiler.together.len().to_string().cyan(),
        compiler.constraints.len().to_string().cyan()
    );

    for &role in &compiler.problem.roles {
        for (d, day) in compiler.problem.days.iter().enumerate() {
            let candidates = compiler.space.candidates(compiler.problem, role, d);
            let names: Vec<&str> = candidates
                .iter()
                .map(|&i| compiler.problem.members[i].id.as_str())
                .collect();
            println!(
                "   {} {}: {} candidates ({})",
                day.to_string().cyan(),
                role.to_string().blue(),
                candidates.len().to_string().yellow(),
                names.join(", ")
            );
        }
    }
    println!();
}
