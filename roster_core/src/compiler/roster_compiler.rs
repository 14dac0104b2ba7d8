use good_lp::{variable, variables, Constraint, Expression, ProblemVariables, Variable};
use std::collections::HashMap;
use std::env;

use crate::compiler::constraints::{avoidance, caps, coverage, daily, spacing};
use crate::compiler::{debugging, objective};
use crate::config::RosterConfig;
use crate::error::RosterError;
use crate::problem::extractor::RosterProblem;
use crate::problem::variables::VariableSpace;
use crate::types::member::Role;

/// Compiles a roster problem into a MILP model: one binary decision
/// variable per admissible (member, role, day) triple, the full hard
/// constraint set, and the weighted objective.
pub struct RosterCompiler<'a> {
    pub problem: &'a RosterProblem,
    pub space: &'a VariableSpace,
    pub config: &'a RosterConfig,
    pub vars: ProblemVariables,
    /// Decision variable per admissible triple.
    pub assign: HashMap<(usize, Role, usize), Variable>,
    /// Indicator per (pairing index, day index): both members on duty.
    pub together: HashMap<(usize, usize), Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Expression,
    pub debug: bool,
}

impl<'a> RosterCompiler<'a> {
    pub fn new(
        problem: &'a RosterProblem,
        space: &'a VariableSpace,
        config: &'a RosterConfig,
    ) -> Self {
        let debug = config.debug || env::var("ROSTER_DEBUG").is_ok();

        RosterCompiler {
            problem,
            space,
            config,
            vars: variables!(),
            assign: HashMap::new(),
            together: HashMap::new(),
            constraints: Vec::new(),
            objective: Expression::from(0),
            debug,
        }
    }

    pub fn compile(&mut self) -> Result<(), RosterError> {
        debugging::debug_print(self, "🚀", "Starting roster compilation");

        // 1. Fail fast on slots no one can possibly fill
        debugging::debug_print(self, "🔍", "Step 1: Checking every slot has candidates");
        coverage::precheck(self.problem, self.space)?;

        // 2. One binary decision variable per admissible triple
        debugging::debug_print(self, "🎲", "Step 2: Allocating decision variables");
        self.allocate_variables();

        // 3. Slot coverage: every (role, day) gets exactly one member
        debugging::debug_print(self, "📅", "Step 3: Slot coverage constraints");
        coverage::apply(self);

        // 4. Avoidance pairs never share a day
        debugging::debug_print(self, "🚧", "Step 4: Avoidance constraints");
        avoidance::apply(self);

        // 5. At most one role per member per day
        debugging::debug_print(self, "1️⃣", "Step 5: One role per member per day");
        daily::apply(self);

        // 6. No member repeats a role on calendar-adjacent days
        debugging::debug_print(self, "🔁", "Step 6: Anti-repeat constraints");
        spacing::apply(self);

        // 7. Monthly assignment caps
        debugging::debug_print(self, "🧢", "Step 7: Monthly cap constraints");
        caps::apply(self);

        // 8. Preference + staleness + pairing objective
        debugging::debug_print(self, "🎯", "Step 8: Composing objective");
        objective::compose(self);

        debugging::debug_model_state(self);
        Ok(())
    }

    fn allocate_variables(&mut self) {
        for i in 0..self.problem.members.len() {
            for &role in &self.problem.roles {
                for d in 0..self.problem.days.len() {
                    if self.space.contains(i, role, d) {
                        let var = self.vars.add(variable().binary());
                        self.assign.insert((i, role, d), var);
                    }
                }
            }
        }
        debugging::debug_print(
            self,
            "➕",
            &format!("Created {} assignment variables", self.assign.len()),
        );
    }

    /// Variables for every admissible member of (role, day), member order.
    pub fn slot_vars(&self, role: Role, day_idx: usize) -> Vec<Variable> {
        (0..self.problem.members.len())
            .filter_map(|i| self.assign.get(&(i, role, day_idx)).copied())
            .collect()
    }

    /// The member's variables across all roles on one day.
    pub fn member_day_vars(&self, member_idx: usize, day_idx: usize) -> Vec<Variable> {
        self.problem
            .roles
            .iter()
            .filter_map(|&r| self.assign.get(&(member_idx, r, day_idx)).copied())
            .collect()
    }

    /// All of the member's variables across the whole period.
    pub fn member_vars(&self, member_idx: usize) -> Vec<Variable> {
        let mut vars = Vec::new();
        for &role in &self.problem.roles {
            for d in 0..self.problem.days.len() {
                if let Some(v) = self.assign.get(&(member_idx, role, d)) {
                    vars.push(*v);
                }
            }
        }
        vars
    }
}
