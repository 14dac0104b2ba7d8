pub mod constraints;
pub mod debugging;
pub mod objective;
pub mod roster_compiler;

pub use roster_compiler::RosterCompiler;
