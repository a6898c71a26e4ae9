//! Population state: the compartment time series and the Euler integrator.

// Fraction <-> head-count conversion is all intentional f64/u64 casting
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use rand::Rng;
use serde::Serialize;

use crate::game::Policy;
use crate::model::params::{BASE_CONTACT_RATE, DT, ModelParams, STEPS_PER_WEEK};

/// Smallest total population a new run may be seeded with.
pub const MIN_TOTAL_POPULATION: u64 = 5_000_000;

/// Largest total population a new run may be seeded with.
pub const MAX_TOTAL_POPULATION: u64 = 6_000_000;

/// The simulated population: five compartment-fraction series plus time.
///
/// All series are append-only. [`Population::advance`] pushes exactly one
/// point per integration sub-step and nothing ever truncates or rewrites
/// history, so the full trajectory of a run is always available for
/// inspection and plotting.
///
/// Fractions are not clamped to `[0, 1]`: extreme parameter settings can
/// drive the integrator outside its domain. [`crate::model::check_invariants`]
/// detects (but never corrects) such a blow-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    total_population: u64,
    susceptible: Vec<f64>,
    infected: Vec<f64>,
    quarantined: Vec<f64>,
    recovered: Vec<f64>,
    dead: Vec<f64>,
    time: Vec<f64>,
    healthcare_capacity: i64,
    /// Flow rates and the quarantine ceiling. Rewritten from the active
    /// policy before each weekly advance.
    pub params: ModelParams,
}

/// Most recent compartment values converted to rounded head counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Susceptible individuals ("healthy" in the status report).
    pub healthy: u64,
    /// Infected individuals outside quarantine.
    pub infected: u64,
    /// Individuals currently in quarantine.
    pub quarantined: u64,
    /// Recovered individuals.
    pub recovered: u64,
    /// Cumulative deaths.
    pub dead: u64,
}

/// The full time axis with the four non-susceptible compartments in absolute
/// head counts, for external visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompartmentSeries {
    /// Elapsed simulated time at each recorded point.
    pub time: Vec<f64>,
    /// Infected head count over time.
    pub infected: Vec<f64>,
    /// Quarantined head count over time.
    pub quarantined: Vec<f64>,
    /// Recovered head count over time.
    pub recovered: Vec<f64>,
    /// Cumulative deaths over time.
    pub dead: Vec<f64>,
}

impl Population {
    /// Create a population with a randomly sampled total head count and the
    /// epidemic seeded with a single infected individual.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_total(rng.random_range(MIN_TOTAL_POPULATION..=MAX_TOTAL_POPULATION))
    }

    /// Create a population with a fixed total head count.
    ///
    /// Everything downstream of construction is deterministic, so two
    /// populations built with the same total and fed the same policies
    /// produce identical series.
    #[must_use]
    pub fn with_total(total_population: u64) -> Self {
        let n = total_population as f64;
        Self {
            total_population,
            susceptible: vec![1.0 - 1.0 / n],
            infected: vec![1.0 / n],
            quarantined: vec![0.0],
            recovered: vec![0.0],
            dead: vec![0.0],
            // The time axis starts one step past zero; the whole game is
            // calibrated against this axis, so it stays as-is.
            time: vec![DT],
            healthcare_capacity: 0,
            params: ModelParams::default(),
        }
    }

    /// Copy the policy-controlled knobs into the model.
    ///
    /// Called by the control layer before every weekly advance: contact
    /// tracing sets the quarantine admission rate, and the distancing regime
    /// scales the baseline contact rate down.
    pub fn apply_policy(&mut self, policy: &Policy) {
        self.params.quarantine_effectiveness = policy.contact_tracing();
        self.healthcare_capacity = policy.healthcare();
        self.params.contact_rate = BASE_CONTACT_RATE * (1.0 - policy.distancing().factor());
    }

    /// Advance the simulation by one week: exactly [`STEPS_PER_WEEK`] Euler
    /// sub-steps, each appending one point to every series.
    ///
    /// Never fails; numerical blow-up under extreme parameters is possible
    /// and left to [`crate::model::check_invariants`] to detect.
    pub fn advance(&mut self) {
        for _ in 0..STEPS_PER_WEEK {
            self.step();
        }
    }

    /// One Euler sub-step over the latest recorded values.
    fn step(&mut self) {
        let p = self.params;
        let n = self.total_population as f64;
        let s = latest(&self.susceptible);
        let i = latest(&self.infected);
        let q = latest(&self.quarantined);

        let d_recovered = p.recovery_rate * q * DT;
        let mut d_quarantined =
            (p.quarantine_effectiveness * i - (p.recovery_rate + p.death_rate_quarantined) * q)
                * DT;

        // Capacity check: when the ward would overflow, admissions stop for
        // this sub-step and quarantine only shrinks through recovery and
        // death. The override is applied undamped by dt.
        let saturated = (q + d_quarantined) * n > p.quarantine_capacity as f64;
        if saturated {
            d_quarantined = -(p.recovery_rate + p.death_rate_quarantined) * q;
        }
        // Would-be admissions stay in the infected pool while saturated.
        let admission_gate = if saturated { 0.0 } else { 1.0 };

        let d_infected = (p.contact_rate * s * i
            - p.quarantine_effectiveness * i * admission_gate
            - p.death_rate_unquarantined * i)
            * DT;
        let d_susceptible = -p.contact_rate * s * i * DT;
        let d_dead = (p.death_rate_unquarantined * i + p.death_rate_quarantined * q) * DT;

        self.susceptible.push(s + d_susceptible);
        self.infected.push(i + d_infected);
        self.quarantined.push(q + d_quarantined);
        self.recovered.push(latest(&self.recovered) + d_recovered);
        self.dead.push(latest(&self.dead) + d_dead);
        self.time.push(latest(&self.time) + DT);
    }

    /// Fixed total head count for this run.
    #[must_use]
    pub fn total_population(&self) -> u64 {
        self.total_population
    }

    /// Healthcare capacity mirrored from the last applied policy.
    #[must_use]
    pub fn healthcare_capacity(&self) -> i64 {
        self.healthcare_capacity
    }

    /// Number of recorded time points (1 at construction, +70 per advance).
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True if no points are recorded. Never the case after construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// The elapsed-time axis.
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Susceptible fraction series.
    #[must_use]
    pub fn susceptible(&self) -> &[f64] {
        &self.susceptible
    }

    /// Infected fraction series.
    #[must_use]
    pub fn infected(&self) -> &[f64] {
        &self.infected
    }

    /// Quarantined fraction series.
    #[must_use]
    pub fn quarantined(&self) -> &[f64] {
        &self.quarantined
    }

    /// Recovered fraction series.
    #[must_use]
    pub fn recovered(&self) -> &[f64] {
        &self.recovered
    }

    /// Cumulative dead fraction series.
    #[must_use]
    pub fn dead(&self) -> &[f64] {
        &self.dead
    }

    /// Most recent susceptible fraction.
    #[must_use]
    pub fn susceptible_fraction(&self) -> f64 {
        latest(&self.susceptible)
    }

    /// Most recent cumulative dead fraction. Defeat is evaluated on this.
    #[must_use]
    pub fn death_toll_fraction(&self) -> f64 {
        latest(&self.dead)
    }

    /// Most recent infected head count (fractional; victory compares this
    /// against half an individual).
    #[must_use]
    pub fn infected_count(&self) -> f64 {
        latest(&self.infected) * self.total_population as f64
    }

    /// Most recent quarantined head count (fractional).
    #[must_use]
    pub fn quarantined_count(&self) -> f64 {
        latest(&self.quarantined) * self.total_population as f64
    }

    /// Most recent values of all five compartments as rounded head counts.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            healthy: self.count(&self.susceptible),
            infected: self.count(&self.infected),
            quarantined: self.count(&self.quarantined),
            recovered: self.count(&self.recovered),
            dead: self.count(&self.dead),
        }
    }

    /// The full plotting hand-off: time plus the four non-susceptible
    /// compartments in rounded head counts.
    #[must_use]
    pub fn series(&self) -> CompartmentSeries {
        CompartmentSeries {
            time: self.time.clone(),
            infected: self.counts(&self.infected),
            quarantined: self.counts(&self.quarantined),
            recovered: self.counts(&self.recovered),
            dead: self.counts(&self.dead),
        }
    }

    fn count(&self, series: &[f64]) -> u64 {
        (latest(series) * self.total_population as f64).round() as u64
    }

    fn counts(&self, series: &[f64]) -> Vec<f64> {
        let n = self.total_population as f64;
        series.iter().map(|fraction| (fraction * n).round()).collect()
    }
}

/// Latest appended value of a series. Series are non-empty by construction.
fn latest(series: &[f64]) -> f64 {
    series[series.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::STEPS_PER_WEEK;

    const TOTAL: u64 = 5_500_000;

    #[test]
    fn test_seeding() {
        let population = Population::with_total(TOTAL);
        let n = TOTAL as f64;

        assert_eq!(population.len(), 1);
        assert!((population.susceptible()[0] - (1.0 - 1.0 / n)).abs() < 1e-15);
        assert!((population.infected()[0] - 1.0 / n).abs() < 1e-15);
        assert!(population.quarantined()[0].abs() < f64::EPSILON);
        assert!(population.recovered()[0].abs() < f64::EPSILON);
        assert!(population.dead()[0].abs() < f64::EPSILON);
        // The time axis starts one step past zero
        assert!((population.time()[0] - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_random_total_within_range() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..32 {
            let population = Population::new(&mut rng);
            assert!(population.total_population() >= MIN_TOTAL_POPULATION);
            assert!(population.total_population() <= MAX_TOTAL_POPULATION);
        }
    }

    #[test]
    fn test_summary_rounds_to_head_counts() {
        let population = Population::with_total(TOTAL);
        let summary = population.summary();

        assert_eq!(summary.healthy, TOTAL - 1);
        assert_eq!(summary.infected, 1);
        assert_eq!(summary.quarantined, 0);
        assert_eq!(summary.recovered, 0);
        assert_eq!(summary.dead, 0);
    }

    #[test]
    fn test_advance_appends_exactly_one_week() {
        let mut population = Population::with_total(TOTAL);
        population.advance();

        assert_eq!(population.len(), 1 + STEPS_PER_WEEK);
        assert_eq!(population.susceptible().len(), population.len());
        assert_eq!(population.infected().len(), population.len());
        assert_eq!(population.quarantined().len(), population.len());
        assert_eq!(population.recovered().len(), population.len());
        assert_eq!(population.dead().len(), population.len());
        // 0.1 seed plus 70 steps of 0.1
        let last = population.time()[population.len() - 1];
        assert!((last - 7.1).abs() < 1e-9);
    }

    #[test]
    fn test_unchecked_epidemic_grows() {
        // Default parameters, no intervention: one week of free spread
        let mut population = Population::with_total(TOTAL);
        let seed_infected = population.infected()[0];
        let seed_susceptible = population.susceptible()[0];

        population.advance();

        assert!(population.infected()[population.len() - 1] > seed_infected);
        assert!(population.susceptible()[population.len() - 1] < seed_susceptible);
    }

    #[test]
    fn test_zero_contact_rate_reaches_eradication() {
        let mut population = Population::with_total(TOTAL);
        population.params.contact_rate = 0.0;

        let mut weeks = 0;
        while population.infected_count() > 0.5 {
            population.advance();
            weeks += 1;
            assert!(weeks <= 10, "eradication should arrive within 10 weeks");
        }
        assert!(population.infected_count() <= 0.5);
    }

    #[test]
    fn test_apply_policy_rewrites_knobs() {
        use crate::game::{DistancingLevel, Policy};

        let mut population = Population::with_total(TOTAL);
        let mut policy = Policy::new();
        policy.set_distancing(DistancingLevel::CircuitBreaker);
        policy.invest_contact_tracing(10_000).unwrap();

        population.apply_policy(&policy);

        assert!((population.params.contact_rate - 0.75).abs() < 1e-12);
        assert!((population.params.quarantine_effectiveness - 0.02).abs() < 1e-12);
        assert_eq!(population.healthcare_capacity(), 10_000);
    }

    #[test]
    fn test_quarantine_respects_capacity() {
        let mut population = Population::with_total(TOTAL);
        for _ in 0..8 {
            population.advance();
        }

        let cap = population.params.quarantine_capacity as f64;
        let n = TOTAL as f64;
        for &q in population.quarantined() {
            assert!(
                q * n <= cap * (1.0 + 1e-9) + 1e-6,
                "quarantined count {} exceeds capacity {}",
                q * n,
                cap
            );
        }
        // The run must actually have hit the ceiling for this test to bite
        assert!(population.quarantined_count() > cap * 0.5);
    }

    #[test]
    fn test_determinism() {
        let mut a = Population::with_total(TOTAL);
        let mut b = Population::with_total(TOTAL);
        for _ in 0..4 {
            a.advance();
            b.advance();
        }

        assert!(a == b, "identical runs must produce identical series");
    }

    #[test]
    fn test_series_matches_length_and_units() {
        let mut population = Population::with_total(TOTAL);
        population.advance();
        let series = population.series();

        assert_eq!(series.time.len(), population.len());
        assert_eq!(series.infected.len(), population.len());
        assert_eq!(series.quarantined.len(), population.len());
        assert_eq!(series.recovered.len(), population.len());
        assert_eq!(series.dead.len(), population.len());
        // Head-count units: the seed infected point is one individual
        assert!((series.infected[0] - 1.0).abs() < f64::EPSILON);
    }
}
