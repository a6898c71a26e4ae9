//! Turn-based control layer over the epidemic model.
//!
//! [`machine`] is the pure state machine driving a session; [`policy`] holds
//! the economy the player spends from and the interventions they buy.

mod machine;
mod policy;

pub use machine::{
    Command, DEATH_TOLL_LIMIT, ERADICATION_LIMIT, Event, FinalReport, GameState, Phase, World,
    step,
};
pub use policy::{
    DistancingLevel, INCOME_RATE, INITIAL_HEALTHCARE, INITIAL_WEALTH, Policy, TRACING_COST,
    parse_budget,
};
