//! Error types shared between the game core and its front-ends.

use std::fmt;

/// Reasons a budget submission is rejected.
///
/// Budget errors are never fatal: the front-end re-prompts on them and the
/// state machine rejects them as no-op transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// The entry did not parse as a non-negative integer.
    NotANumber(String),
    /// The requested amount exceeds the current treasury.
    InsufficientWealth {
        /// The amount the player asked to spend.
        requested: u64,
        /// Wealth available at the time of the request.
        wealth: i64,
    },
}

impl fmt::Display for BudgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetError::NotANumber(entry) => {
                write!(f, "please enter a number for your budget (got {entry:?})")
            }
            BudgetError::InsufficientWealth { requested, wealth } => {
                write!(
                    f,
                    "not enough money: asked for ${requested} with ${wealth} available"
                )
            }
        }
    }
}

impl std::error::Error for BudgetError {}
