//! Run command implementation - a scripted game with a fixed policy.
//!
//! Holds one distancing regime and an optional week-1 contact-tracing spend
//! for the whole run, then simulates until a terminal condition or the week
//! cap. Useful for comparing strategies without sitting through the
//! interactive loop.

use super::output::{JsonRunReport, RunOutcome};
use super::{CliError, OutputFormat};
use outbreak::game::{DEATH_TOLL_LIMIT, DistancingLevel, ERADICATION_LIMIT, Policy};
use outbreak::model::Population;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error on invalid arguments or if the tracing budget exceeds
/// the starting treasury.
pub(crate) fn execute(
    population: Option<u64>,
    seed: Option<u64>,
    weeks: u32,
    distancing: &str,
    tracing_budget: u64,
    format: OutputFormat,
    series: bool,
) -> Result<(), CliError> {
    let Some(level) = DistancingLevel::from_key(distancing) else {
        return Err(CliError::new(format!(
            "invalid distancing level '{distancing}' (expected 0, 1, or 2)"
        )));
    };

    let mut population = match population {
        Some(0) => return Err(CliError::new("population must be at least 1")),
        Some(total) => Population::with_total(total),
        None => {
            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            Population::new(&mut rng)
        }
    };

    let mut policy = Policy::new();
    policy.set_distancing(level);
    if tracing_budget > 0 {
        policy.invest_contact_tracing(tracing_budget)?;
    }

    if format == OutputFormat::Text {
        println!(
            "Running {} weeks: population {}, distancing '{}', tracing budget ${}",
            weeks,
            population.total_population(),
            level.label(),
            tracing_budget
        );
        println!();
    }

    let mut weeks_run = 0;
    let mut outcome = RunOutcome::WeekLimit;

    for week in 1..=weeks {
        population.apply_policy(&policy);
        population.advance();
        policy.collect_income(population.susceptible_fraction());
        weeks_run = week;

        if format == OutputFormat::Text {
            let s = population.summary();
            println!(
                "Week {week}: {} infected, {} quarantined, {} recovered, {} dead, ${} wealth",
                s.infected,
                s.quarantined,
                s.recovered,
                s.dead,
                policy.wealth()
            );
        }

        if population.death_toll_fraction() > DEATH_TOLL_LIMIT {
            outcome = RunOutcome::Defeat;
            break;
        }
        if population.infected_count() <= ERADICATION_LIMIT {
            outcome = RunOutcome::Victory;
            break;
        }
    }

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", outcome.describe());
            println!("Survived {weeks_run} weeks");
        }
        OutputFormat::Json => {
            let report = JsonRunReport {
                population: population.total_population(),
                weeks: weeks_run,
                outcome,
                distancing: level,
                wealth: policy.wealth(),
                summary: population.summary(),
                series: series.then(|| population.series()),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
