use std::time::Duration;

/// Weight used when a member has no stored preference for a role, or when
/// the zero-preference override applies.
pub const DEFAULT_PREFERENCE: f64 = 100.0;

/// Staleness assumed for members with no recorded last duty, so unknown
/// members compete on an ordinary footing.
pub const DEFAULT_STALENESS_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMode {
    /// Try the exact solver first; fall back on infeasibility or timeout
    /// when the fallback is enabled.
    Exact,
    /// Skip the exact solver entirely.
    FallbackOnly,
}

#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub mode: SolverMode,
    pub fallback_enabled: bool,
    /// Hard wall-clock budget for the exact solve.
    pub solver_timeout: Duration,
    /// Seed for the fallback's weighted draw. `None` picks the
    /// highest-weighted candidate deterministically.
    pub seed: Option<u64>,
    /// How many preference points one day of staleness is worth.
    pub staleness_ratio: f64,
    /// Scale of the pairing bonus relative to a base preference weight.
    pub pairing_factor: f64,
    /// Monthly assignment cap for members without a stored cap.
    pub default_monthly_cap: u32,
    pub debug: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            mode: SolverMode::Exact,
            fallback_enabled: true,
            solver_timeout: Duration::from_secs(10),
            seed: None,
            staleness_ratio: 1.0,
            pairing_factor: 2.0,
            default_monthly_cap: 4,
            debug: false,
        }
    }
}
