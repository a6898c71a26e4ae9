//! Player-controlled policy and economy state.
//!
//! The model consumes exactly two things from here: the contact-tracing
//! effectiveness (which becomes the quarantine admission rate) and the
//! social-distancing factor (which scales the contact rate). Everything else
//! is the economy the player trades against: wealth comes in each week in
//! proportion to how much of the country is still healthy and working, and
//! distancing cuts that income at the same time as it cuts transmission.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use serde::Serialize;

use crate::error::BudgetError;

/// Starting treasury.
pub const INITIAL_WEALTH: i64 = 10_000;

/// Starting healthcare capacity.
pub const INITIAL_HEALTHCARE: i64 = 10_000;

/// Wealth required to raise contact-tracing effectiveness by 1.0.
pub const TRACING_COST: f64 = 500_000.0;

/// Weekly income scale, before distancing damping and the susceptible share.
pub const INCOME_RATE: f64 = 100_000.0;

/// Discrete social-distancing regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DistancingLevel {
    /// No restrictions.
    #[default]
    BusinessAsUsual,
    /// Targeted closures; halves the effective contact rate.
    CircuitBreaker,
    /// Near-total lockdown; cuts the effective contact rate by 90%.
    NationalEmergency,
}

impl DistancingLevel {
    /// Multiplicative reduction applied to the baseline contact rate.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            DistancingLevel::BusinessAsUsual => 0.0,
            DistancingLevel::CircuitBreaker => 0.5,
            DistancingLevel::NationalEmergency => 0.9,
        }
    }

    /// Map a menu key to a regime.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "0" => Some(DistancingLevel::BusinessAsUsual),
            "1" => Some(DistancingLevel::CircuitBreaker),
            "2" => Some(DistancingLevel::NationalEmergency),
            _ => None,
        }
    }

    /// Human-readable label for status lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DistancingLevel::BusinessAsUsual => "business as usual",
            DistancingLevel::CircuitBreaker => "circuit breaker",
            DistancingLevel::NationalEmergency => "national emergency",
        }
    }
}

/// The player-facing economy: wealth, healthcare, contact tracing, the
/// active distancing regime, and the week counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    wealth: i64,
    healthcare: i64,
    contact_tracing: f64,
    distancing: DistancingLevel,
    week: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy {
    /// A fresh policy at week 1 with the starting treasury.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wealth: INITIAL_WEALTH,
            healthcare: INITIAL_HEALTHCARE,
            contact_tracing: 0.0,
            distancing: DistancingLevel::default(),
            week: 1,
        }
    }

    /// Current treasury. Can go negative only through income (it never does
    /// in practice); spending is validated against it.
    #[must_use]
    pub fn wealth(&self) -> i64 {
        self.wealth
    }

    /// Current healthcare capacity.
    #[must_use]
    pub fn healthcare(&self) -> i64 {
        self.healthcare
    }

    /// Contact-tracing effectiveness, consumed by the model as the
    /// quarantine admission rate.
    #[must_use]
    pub fn contact_tracing(&self) -> f64 {
        self.contact_tracing
    }

    /// The active social-distancing regime.
    #[must_use]
    pub fn distancing(&self) -> DistancingLevel {
        self.distancing
    }

    /// Current week, starting at 1 and incremented after every advance.
    #[must_use]
    pub fn week(&self) -> u32 {
        self.week
    }

    /// Spend wealth on healthcare capacity, one for one.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::InsufficientWealth`] without mutating anything
    /// if the budget exceeds the treasury.
    pub fn invest_healthcare(&mut self, budget: u64) -> Result<(), BudgetError> {
        self.withdraw(budget)?;
        self.healthcare += budget as i64;
        Ok(())
    }

    /// Spend wealth on contact tracing at [`TRACING_COST`] per unit of
    /// effectiveness.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::InsufficientWealth`] without mutating anything
    /// if the budget exceeds the treasury.
    pub fn invest_contact_tracing(&mut self, budget: u64) -> Result<(), BudgetError> {
        self.withdraw(budget)?;
        self.contact_tracing += budget as f64 / TRACING_COST;
        Ok(())
    }

    fn withdraw(&mut self, budget: u64) -> Result<(), BudgetError> {
        let Ok(amount) = i64::try_from(budget) else {
            return Err(BudgetError::InsufficientWealth {
                requested: budget,
                wealth: self.wealth,
            });
        };
        if amount > self.wealth {
            return Err(BudgetError::InsufficientWealth {
                requested: budget,
                wealth: self.wealth,
            });
        }
        self.wealth -= amount;
        Ok(())
    }

    /// Switch the social-distancing regime.
    pub fn set_distancing(&mut self, level: DistancingLevel) {
        self.distancing = level;
    }

    /// Collect the week's income and advance the week counter.
    ///
    /// Income is proportional to the susceptible share of the population,
    /// damped by the distancing factor; a national emergency earns nothing.
    pub fn collect_income(&mut self, susceptible_fraction: f64) {
        let income = INCOME_RATE * (0.9 - self.distancing.factor()) * susceptible_fraction;
        self.wealth += income.round() as i64;
        self.week += 1;
    }
}

/// Validate a raw budget entry against the current treasury.
///
/// Accepts only non-negative integers no larger than `wealth`; front-ends
/// re-prompt on the error, so nothing here mutates state.
///
/// # Errors
///
/// [`BudgetError::NotANumber`] for anything that does not parse as a
/// non-negative integer (including `"-5"`), [`BudgetError::InsufficientWealth`]
/// for amounts over the treasury.
pub fn parse_budget(input: &str, wealth: i64) -> Result<u64, BudgetError> {
    let entry = input.trim();
    let budget: u64 = entry
        .parse()
        .map_err(|_| BudgetError::NotANumber(entry.to_string()))?;
    if i64::try_from(budget).map_or(true, |amount| amount > wealth) {
        return Err(BudgetError::InsufficientWealth {
            requested: budget,
            wealth,
        });
    }
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_policy() {
        let policy = Policy::new();
        assert_eq!(policy.wealth(), 10_000);
        assert_eq!(policy.healthcare(), 10_000);
        assert!(policy.contact_tracing().abs() < f64::EPSILON);
        assert_eq!(policy.distancing(), DistancingLevel::BusinessAsUsual);
        assert_eq!(policy.week(), 1);
    }

    #[test]
    fn test_invest_healthcare_moves_wealth() {
        let mut policy = Policy::new();
        policy.invest_healthcare(2_500).unwrap();
        assert_eq!(policy.wealth(), 7_500);
        assert_eq!(policy.healthcare(), 12_500);
    }

    #[test]
    fn test_spending_entire_treasury_succeeds() {
        let mut policy = Policy::new();
        policy.invest_healthcare(10_000).unwrap();
        assert_eq!(policy.wealth(), 0);
    }

    #[test]
    fn test_overspending_is_rejected_without_mutation() {
        let mut policy = Policy::new();
        let err = policy.invest_healthcare(10_001).unwrap_err();
        assert!(matches!(err, BudgetError::InsufficientWealth { .. }));
        assert_eq!(policy.wealth(), 10_000);
        assert_eq!(policy.healthcare(), 10_000);
    }

    #[test]
    fn test_contact_tracing_rate() {
        let mut policy = Policy::new();
        policy.invest_contact_tracing(10_000).unwrap();
        assert!((policy.contact_tracing() - 0.02).abs() < 1e-12);
        assert_eq!(policy.wealth(), 0);

        // Investments accumulate
        policy.collect_income(1.0);
        policy.invest_contact_tracing(5_000).unwrap();
        assert!((policy.contact_tracing() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_income_scales_with_distancing() {
        let mut open = Policy::new();
        open.collect_income(1.0);
        assert_eq!(open.wealth(), 10_000 + 90_000);
        assert_eq!(open.week(), 2);

        let mut closed = Policy::new();
        closed.set_distancing(DistancingLevel::NationalEmergency);
        closed.collect_income(1.0);
        assert_eq!(closed.wealth(), 10_000);

        let mut half = Policy::new();
        half.set_distancing(DistancingLevel::CircuitBreaker);
        half.collect_income(0.5);
        assert_eq!(half.wealth(), 10_000 + 20_000);
    }

    #[test]
    fn test_parse_budget_rejects_garbage() {
        assert!(matches!(
            parse_budget("abc", 10_000),
            Err(BudgetError::NotANumber(_))
        ));
        assert!(matches!(
            parse_budget("-5", 10_000),
            Err(BudgetError::NotANumber(_))
        ));
        assert!(matches!(
            parse_budget("", 10_000),
            Err(BudgetError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_budget_enforces_treasury() {
        assert!(matches!(
            parse_budget("10001", 10_000),
            Err(BudgetError::InsufficientWealth { .. })
        ));
        assert_eq!(parse_budget("10000", 10_000).unwrap(), 10_000);
        assert_eq!(parse_budget(" 250 ", 10_000).unwrap(), 250);
        assert_eq!(parse_budget("0", 0).unwrap(), 0);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(
            DistancingLevel::from_key("0"),
            Some(DistancingLevel::BusinessAsUsual)
        );
        assert_eq!(
            DistancingLevel::from_key("1"),
            Some(DistancingLevel::CircuitBreaker)
        );
        assert_eq!(
            DistancingLevel::from_key("2"),
            Some(DistancingLevel::NationalEmergency)
        );
        assert_eq!(DistancingLevel::from_key("3"), None);
        assert_eq!(DistancingLevel::from_key("x"), None);
    }
}
