//! Model invariants - sanity checks that detect numerical bugs.
//!
//! The integrator never guards against parameter settings that drive a
//! compartment fraction outside its domain; these checks make such a blow-up
//! visible instead of letting it silently corrupt a run. They are bug
//! detectors with generous tolerances, not gameplay limits.
//!
//! Compartment-sum conservation is deliberately NOT checked here: the
//! quarantine-capacity override suppresses admissions with an outflow-only
//! delta, so saturated sub-steps drift the total away from 1.

#![allow(clippy::cast_precision_loss)]

use crate::model::Population;

/// Relative tolerance on the quarantine-capacity ceiling.
pub const CAPACITY_TOLERANCE: f64 = 1e-6;

/// How far below zero a fraction may dip before it counts as a violation.
pub const NEGATIVE_TOLERANCE: f64 = 1e-9;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all model invariants.
///
/// Returns the violations found, or empty if all invariants hold:
/// - every compartment series has the same length as the time axis
/// - the time axis is strictly increasing
/// - every fraction is finite and not materially negative
/// - `dead` and `recovered` are non-decreasing (inflow-only compartments)
/// - the quarantined head count never exceeds capacity beyond tolerance
#[must_use]
pub fn check_invariants(population: &Population) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let len = population.len();
    let compartments: [(&str, &[f64]); 5] = [
        ("susceptible", population.susceptible()),
        ("infected", population.infected()),
        ("quarantined", population.quarantined()),
        ("recovered", population.recovered()),
        ("dead", population.dead()),
    ];

    for (name, series) in compartments {
        if series.len() != len {
            violations.push(InvariantViolation {
                message: format!(
                    "{name} series has {} points but the time axis has {len}",
                    series.len()
                ),
            });
        }

        for (index, &value) in series.iter().enumerate() {
            if !value.is_finite() {
                violations.push(InvariantViolation {
                    message: format!("{name}[{index}] is not finite: {value}"),
                });
                // One non-finite point poisons everything after it
                break;
            }
            if value < -NEGATIVE_TOLERANCE {
                violations.push(InvariantViolation {
                    message: format!("{name}[{index}] is negative: {value}"),
                });
                break;
            }
        }
    }

    for window in population.time().windows(2) {
        if window[1] <= window[0] {
            violations.push(InvariantViolation {
                message: format!(
                    "time axis is not strictly increasing: {} then {}",
                    window[0], window[1]
                ),
            });
            break;
        }
    }

    for (name, series) in [("dead", population.dead()), ("recovered", population.recovered())] {
        if let Some(window) = series.windows(2).find(|w| w[1] < w[0]) {
            violations.push(InvariantViolation {
                message: format!("{name} series decreased: {} then {}", window[0], window[1]),
            });
        }
    }

    let n = population.total_population() as f64;
    let cap = population.params.quarantine_capacity as f64;
    let ceiling = cap * (1.0 + CAPACITY_TOLERANCE) + CAPACITY_TOLERANCE;
    for (index, &q) in population.quarantined().iter().enumerate() {
        if q.is_finite() && q * n > ceiling {
            violations.push(InvariantViolation {
                message: format!(
                    "quarantined[{index}] holds {} people, over the {cap} capacity",
                    q * n
                ),
            });
            break;
        }
    }

    violations
}

/// Assert all model invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(population: &Population) {
    let violations = check_invariants(population);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Model invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_population: &Population) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_population_passes() {
        let population = Population::with_total(5_500_000);
        assert!(check_invariants(&population).is_empty());
    }

    #[test]
    fn test_default_run_passes() {
        let mut population = Population::with_total(5_500_000);
        for _ in 0..10 {
            population.advance();
        }
        let violations = check_invariants(&population);
        assert!(violations.is_empty(), "unexpected violations: {violations:?}");
    }

    #[test]
    fn test_extreme_contact_rate_detected() {
        // A contact rate this size drives susceptible negative within a week
        let mut population = Population::with_total(5_500_000);
        population.params.contact_rate = 50.0;
        for _ in 0..3 {
            population.advance();
        }

        let violations = check_invariants(&population);
        assert!(
            !violations.is_empty(),
            "a blown-up run must be detected as invalid"
        );
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation {
            message: "infected[3] is negative: -0.2".to_string(),
        };
        let text = violation.to_string();
        assert!(text.contains("Invariant violation"));
        assert!(text.contains("infected[3]"));
    }
}
