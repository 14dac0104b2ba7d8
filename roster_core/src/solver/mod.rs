pub mod driver;

pub use driver::{solve, SolveOutcome};
