// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Outbreak: a turn-based epidemic management game.
//!
//! The player is a government bureaucrat allocating a limited budget across
//! healthcare, contact tracing, and social-distancing regimes while a
//! compartmental SIQRD epidemic (susceptible, infected, quarantined,
//! recovered, dead) runs underneath. The game ends in defeat when the death
//! toll passes 10% of the population, or in victory when fewer than one
//! infected individual remains.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Front-end (CLI / TUI)        │
//! ├─────────────────────────────────────┤
//! │     Turn state machine (game)       │
//! ├─────────────────────────────────────┤
//! │     Euler integrator (model)        │
//! └─────────────────────────────────────┘
//! ```
//!
//! The model layer owns the five compartment time series and advances them
//! one simulated week at a time. The game layer is a pure state machine: the
//! driving loop feeds it structured [`Command`]s and renders the [`Event`]
//! each transition produces.

pub mod error;
pub mod game;
pub mod model;

pub use error::BudgetError;

// Re-export key game types at crate root for convenience
pub use game::{Command, DistancingLevel, Event, GameState, Phase, Policy, World, step};
pub use model::{ModelParams, Population, Summary};
