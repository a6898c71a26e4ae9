//! Flow rates and integration constants for the SIQRD model.

/// Euler integration step size, in simulated time units.
///
/// Smaller steps approximate the continuous system better; the whole game is
/// calibrated against this value, so it is a constant rather than a knob.
pub const DT: f64 = 0.1;

/// Integration sub-steps per simulated week (one `advance` call).
pub const STEPS_PER_WEEK: usize = 70;

/// Baseline contact rate before any social-distancing reduction.
pub const BASE_CONTACT_RATE: f64 = 1.5;

/// Default head-count ceiling on the quarantined compartment.
pub const DEFAULT_QUARANTINE_CAPACITY: u64 = 15_000;

/// Rates governing flows between compartments.
///
/// The control layer rewrites `contact_rate` and `quarantine_effectiveness`
/// from the active policy before every weekly advance; the remaining fields
/// stay at their defaults for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Effective transmission rate (baseline reduced by social distancing).
    pub contact_rate: f64,
    /// Rate at which quarantined individuals recover.
    pub recovery_rate: f64,
    /// Rate at which infected individuals are admitted into quarantine,
    /// in `[0, 1]`.
    pub quarantine_effectiveness: f64,
    /// Death rate for infected individuals outside quarantine.
    pub death_rate_unquarantined: f64,
    /// Death rate inside quarantine.
    pub death_rate_quarantined: f64,
    /// Absolute head-count ceiling on the quarantined compartment.
    pub quarantine_capacity: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            contact_rate: BASE_CONTACT_RATE,
            recovery_rate: 0.05,
            quarantine_effectiveness: 0.1,
            death_rate_unquarantined: 0.02,
            death_rate_quarantined: 0.01,
            quarantine_capacity: DEFAULT_QUARANTINE_CAPACITY,
        }
    }
}
