//! Output formatting utilities for CLI.

use outbreak::game::{DistancingLevel, FinalReport, Policy};
use outbreak::model::{CompartmentSeries, Population, Summary};
use serde::Serialize;

/// Opening banner shown once per session.
pub(super) const BANNER: &str = "Flatten the curve simulator.\n Press enter to continue!";

/// Briefing shown when a new game starts.
pub(super) const WELCOME: &str = "Welcome! You are a newly hired government bureaucrat whose sole \
purpose is to manage the burgeoning COVID-19 case rate.\n Make the appropriate calls at the right \
times and bring your country past this crisis.\n [Enter].";

/// The per-turn options menu.
pub(super) const MENU: &str = "The following options are available:\n\
 [1]: Expand healthcare (uses wealth)\n\
 [2]: Increase social distancing (will affect the economy!)\n\
 [3]: Improve contact tracing (uses wealth)\n\
 [4]: Continue to the next week\n\n\
 Press the appropriate key to continue:";

/// The social-distancing sub-menu.
pub(super) const DISTANCING_MENU: &str = "Choose a level:\n\
 0: Business as usual\n\
 1: Circuit breaker\n\
 2: National emergency";

/// Format the latest head counts as the per-turn status block.
pub(super) fn format_population(population: &Population) -> String {
    let s = population.summary();
    format!(
        "Your citizens are:\n Healthy: {}, {} infected, {} quarantined, {} recovered, {} dead.",
        s.healthy, s.infected, s.quarantined, s.recovered, s.dead
    )
}

/// Format the economy as the per-turn status block.
pub(super) fn format_policy(policy: &Policy) -> String {
    format!(
        "Your country has:\n ${} wealth, {} healthcare capacity, {} contact tracing \
         effectiveness.\n It is now in a state of {}\n This is week {}.",
        policy.wealth(),
        policy.healthcare(),
        policy.contact_tracing(),
        policy.distancing().label(),
        policy.week()
    )
}

/// Format the end-of-game statistics block.
pub(super) fn format_final_report(report: &FinalReport) -> String {
    let s = &report.summary;
    format!(
        "You survived {} weeks\nHere are your end-game stats:\n\
         Your citizens are:\n Healthy: {}, {} infected, {} quarantined, {} recovered, {} dead.",
        report.weeks, s.healthy, s.infected, s.quarantined, s.recovered, s.dead
    )
}

/// JSON-serializable report for the `run` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunReport {
    /// Total population the run started with.
    pub(super) population: u64,
    /// Weeks simulated before the run stopped.
    pub(super) weeks: u32,
    /// Why the run stopped.
    pub(super) outcome: RunOutcome,
    /// Distancing regime held for the whole run.
    pub(super) distancing: DistancingLevel,
    /// Final treasury.
    pub(super) wealth: i64,
    /// Final head counts.
    pub(super) summary: Summary,
    /// Full compartment series (only with `--series`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) series: Option<CompartmentSeries>,
}

/// Terminal condition of a scripted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum RunOutcome {
    /// The death toll passed the limit.
    Defeat,
    /// The epidemic was eradicated.
    Victory,
    /// The week cap was reached with the epidemic still live.
    WeekLimit,
}

impl RunOutcome {
    /// Human-readable outcome line.
    pub(super) fn describe(self) -> &'static str {
        match self {
            RunOutcome::Defeat => "You've let too many people die from the outbreak. You're fired!",
            RunOutcome::Victory => "You managed to eradicate the virus. Well done!",
            RunOutcome::WeekLimit => "The epidemic is still running when the clock stops.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak::game::{Command, Event, GameState, Phase, World, step};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_format_population_mentions_every_compartment() {
        let population = Population::with_total(5_500_000);
        let text = format_population(&population);
        assert!(text.starts_with("Your citizens are:"));
        assert!(text.contains("Healthy: 5499999"));
        assert!(text.contains("1 infected"));
        assert!(text.contains("0 dead"));
    }

    #[test]
    fn test_format_policy_reflects_state() {
        let mut policy = Policy::new();
        policy.set_distancing(DistancingLevel::CircuitBreaker);
        let text = format_policy(&policy);
        assert!(text.contains("$10000 wealth"));
        assert!(text.contains("state of circuit breaker"));
        assert!(text.contains("week 1"));
    }

    #[test]
    fn test_final_report_roundtrip_through_machine() {
        let world = World {
            population: Population::with_total(5_500_000),
            policy: Policy::new(),
        };
        let state = GameState::resume(Phase::End, world);
        let (_, event) = step(state, &Command::Proceed, &mut SmallRng::seed_from_u64(7));
        let Event::FinalReport(report) = event else {
            panic!("expected a final report");
        };
        let text = format_final_report(&report);
        assert!(text.starts_with("You survived 1 weeks"));
    }

    #[test]
    fn test_json_report_serializes_without_series() {
        let population = Population::with_total(5_500_000);
        let report = JsonRunReport {
            population: 5_500_000,
            weeks: 3,
            outcome: RunOutcome::WeekLimit,
            distancing: DistancingLevel::BusinessAsUsual,
            wealth: 12_345,
            summary: population.summary(),
            series: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"outcome\":\"week_limit\""));
        assert!(!json.contains("\"series\""));
    }
}
