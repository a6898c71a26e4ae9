//! The turn state machine.
//!
//! A pure transition function over an explicit state value: the driving loop
//! owns the single mutable cell, parses raw input into a [`Command`], and
//! renders the [`Event`] each call to [`step`] returns. The only effect a
//! transition has beyond its return value is the randomness consumed when a
//! new game's population is constructed.

use rand::Rng;

use crate::error::BudgetError;
use crate::game::{DistancingLevel, Policy};
use crate::model::{CompartmentSeries, Population, Summary};

/// Defeat threshold: fraction of the population dead.
pub const DEATH_TOLL_LIMIT: f64 = 0.10;

/// Victory threshold: the epidemic counts as eradicated once fewer than one
/// absolute infected individual remains.
pub const ERADICATION_LIMIT: f64 = 0.5;

/// Phase tags of the control state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No live game; the next transition constructs one.
    Start,
    /// Status is shown, then the menu.
    PlayerTurn,
    /// The menu is on screen and a choice is expected.
    AwaitingInput,
    /// The next transition runs a simulated week.
    Updating,
    /// The death toll passed the limit; debrief pending.
    GameOver,
    /// The epidemic was eradicated; debrief pending.
    Victory,
    /// Final statistics are about to be handed off.
    End,
    /// Waiting on the play-again/quit decision.
    EndChoice,
    /// Absorbing terminal state; the driving loop stops here.
    Terminated,
}

/// The live model/policy pair. Absent outside an active game.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// The simulated population.
    pub population: Population,
    /// The player's economy and interventions.
    pub policy: Policy,
}

/// Complete control state: a phase tag plus the optional live world.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    phase: Phase,
    world: Option<World>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh machine at the start phase with no live game.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Start,
            world: None,
        }
    }

    /// Resume from a known phase and world, for scripted drivers and tests.
    #[must_use]
    pub fn resume(phase: Phase, world: World) -> Self {
        Self {
            phase,
            world: Some(world),
        }
    }

    /// The current phase tag.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live world, if a game is active.
    #[must_use]
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// False once the machine has reached [`Phase::Terminated`].
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Terminated
    }
}

/// Structured player input, resolved by the front-end before stepping.
///
/// Budget and regime sub-prompts happen in the front-end, so amounts arrive
/// here already parsed; the machine still re-validates spending against the
/// treasury and rejects overdrafts as no-op transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Any keypress in phases that ignore input.
    Proceed,
    /// Menu option 1: spend wealth on healthcare capacity.
    InvestHealthcare(u64),
    /// Menu option 2: switch the social-distancing regime.
    SetDistancing(DistancingLevel),
    /// Menu option 3: spend wealth on contact tracing.
    InvestContactTracing(u64),
    /// Menu option 4: run the next simulated week.
    NextWeek,
    /// Start a new game from the end-choice screen.
    PlayAgain,
    /// Quit; honored from any input-reading phase.
    Quit,
    /// Anything the front-end could not map to a menu entry.
    Unrecognized,
}

/// End-of-game statistics handed to the front-end before the world is
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalReport {
    /// Weeks survived (the policy's week counter at the end of the run).
    pub weeks: u32,
    /// Final compartment head counts.
    pub summary: Summary,
    /// The full series for plotting.
    pub series: CompartmentSeries,
}

/// What a transition produced, for the front-end to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A new game was constructed.
    Welcome,
    /// Status and the options menu should be shown.
    TurnMenu,
    /// Wealth moved into healthcare.
    InvestedHealthcare(u64),
    /// Wealth moved into contact tracing.
    InvestedContactTracing(u64),
    /// The distancing regime changed.
    DistancingSet(DistancingLevel),
    /// A spend was rejected; state is unchanged.
    BudgetRejected(BudgetError),
    /// The next transition will run a week.
    WeekAdvancing,
    /// A week ran and the game continues.
    TurnReady,
    /// A week ran and the death toll passed the limit.
    GameOver,
    /// A week ran and the epidemic was eradicated.
    Victory,
    /// Defeat debrief text should be shown.
    DefeatDebrief,
    /// Victory debrief text should be shown.
    VictoryDebrief,
    /// Final statistics and the plotting hand-off.
    FinalReport(FinalReport),
    /// A new game is about to start.
    Restarted,
    /// The player quit.
    Farewell,
    /// The input matched nothing in this phase; state is unchanged.
    InvalidInput,
}

/// Advance the machine by one transition.
///
/// Pure except for the randomness consumed when [`Phase::Start`] constructs
/// a new population. Unmatched phase/command pairs return the state
/// unchanged with [`Event::InvalidInput`].
pub fn step(state: GameState, command: &Command, rng: &mut impl Rng) -> (GameState, Event) {
    let GameState { phase, world } = state;

    match (phase, command) {
        (Phase::Start, _) => {
            let world = World {
                population: Population::new(rng),
                policy: Policy::new(),
            };
            (at(Phase::PlayerTurn, Some(world)), Event::Welcome)
        }

        (Phase::PlayerTurn, _) => (at(Phase::AwaitingInput, world), Event::TurnMenu),

        (Phase::AwaitingInput, Command::InvestHealthcare(budget)) => match world {
            Some(mut w) => match w.policy.invest_healthcare(*budget) {
                Ok(()) => (
                    at(Phase::PlayerTurn, Some(w)),
                    Event::InvestedHealthcare(*budget),
                ),
                Err(err) => (at(Phase::AwaitingInput, Some(w)), Event::BudgetRejected(err)),
            },
            None => (at(Phase::AwaitingInput, None), Event::InvalidInput),
        },

        (Phase::AwaitingInput, Command::SetDistancing(level)) => match world {
            Some(mut w) => {
                w.policy.set_distancing(*level);
                (at(Phase::PlayerTurn, Some(w)), Event::DistancingSet(*level))
            }
            None => (at(Phase::AwaitingInput, None), Event::InvalidInput),
        },

        (Phase::AwaitingInput, Command::InvestContactTracing(budget)) => match world {
            Some(mut w) => match w.policy.invest_contact_tracing(*budget) {
                Ok(()) => (
                    at(Phase::PlayerTurn, Some(w)),
                    Event::InvestedContactTracing(*budget),
                ),
                Err(err) => (at(Phase::AwaitingInput, Some(w)), Event::BudgetRejected(err)),
            },
            None => (at(Phase::AwaitingInput, None), Event::InvalidInput),
        },

        (Phase::AwaitingInput, Command::NextWeek) => {
            (at(Phase::Updating, world), Event::WeekAdvancing)
        }

        (Phase::Updating, _) => match world {
            Some(mut w) => {
                w.population.apply_policy(&w.policy);
                w.population.advance();
                w.policy.collect_income(w.population.susceptible_fraction());

                let (next, event) = if w.population.death_toll_fraction() > DEATH_TOLL_LIMIT {
                    (Phase::GameOver, Event::GameOver)
                } else if w.population.infected_count() <= ERADICATION_LIMIT {
                    (Phase::Victory, Event::Victory)
                } else {
                    (Phase::PlayerTurn, Event::TurnReady)
                };
                (at(next, Some(w)), event)
            }
            None => (at(Phase::Updating, None), Event::InvalidInput),
        },

        (Phase::GameOver, _) => (at(Phase::End, world), Event::DefeatDebrief),
        (Phase::Victory, _) => (at(Phase::End, world), Event::VictoryDebrief),

        (Phase::End, _) => {
            // The world is dropped here; the report owns everything the
            // front-end still needs.
            let event = match &world {
                Some(w) => Event::FinalReport(FinalReport {
                    weeks: w.policy.week(),
                    summary: w.population.summary(),
                    series: w.population.series(),
                }),
                None => Event::InvalidInput,
            };
            (at(Phase::EndChoice, None), event)
        }

        (Phase::EndChoice, Command::PlayAgain) => (at(Phase::Start, None), Event::Restarted),

        (_, Command::Quit) => (at(Phase::Terminated, None), Event::Farewell),

        (unchanged, _) => (at(unchanged, world), Event::InvalidInput),
    }
}

fn at(phase: Phase, world: Option<World>) -> GameState {
    GameState { phase, world }
}
