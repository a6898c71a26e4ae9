//! Epidemic model layer.
//!
//! Implements the compartmental SIQRD simulation:
//! - Five population-fraction time series (susceptible, infected,
//!   quarantined, recovered, dead) plus a parallel time axis
//! - Fixed-step forward Euler integration, 70 sub-steps per simulated week
//! - A hard head-count ceiling on the quarantined compartment that suspends
//!   admissions while the ward would overflow
//! - Read-only queries consumed by the control layer and the front-end

mod invariants;
mod params;
mod population;

pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use params::{
    BASE_CONTACT_RATE, DEFAULT_QUARANTINE_CAPACITY, DT, ModelParams, STEPS_PER_WEEK,
};
pub use population::{CompartmentSeries, MAX_TOTAL_POPULATION, MIN_TOTAL_POPULATION, Population, Summary};
