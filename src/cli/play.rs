//! Play command implementation - the interactive game loop.
//!
//! The loop owns the terminal: it reads raw input, resolves the budget and
//! distancing sub-prompts into structured commands, steps the state machine,
//! and renders whatever event comes back. Budget entries are validated here
//! before the machine ever sees them, so an interactive session only spends
//! what the treasury holds.

use super::output::{
    BANNER, DISTANCING_MENU, MENU, WELCOME, format_final_report, format_policy, format_population,
};
use super::{CliError, chart};
use outbreak::error::BudgetError;
use outbreak::game::{Command, DistancingLevel, Event, GameState, Phase, parse_budget, step};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::{BufRead, Write, stdin, stdout};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if reading from the terminal fails.
pub(crate) fn execute(seed: Option<u64>, no_chart: bool) -> Result<(), CliError> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    println!("{BANNER}");
    read_line()?;

    let mut state = GameState::new();
    while state.is_running() {
        let command = read_command(&state)?;
        let (next, event) = step(state, &command, &mut rng);
        render_event(&next, &event, no_chart)?;
        state = next;
    }

    println!("Exiting game!");
    Ok(())
}

/// Read and resolve one command for the current phase.
fn read_command(state: &GameState) -> Result<Command, CliError> {
    match state.phase() {
        // These phases consume any keypress, including "q"
        Phase::Start
        | Phase::PlayerTurn
        | Phase::Updating
        | Phase::GameOver
        | Phase::Victory
        | Phase::End => {
            read_line()?;
            Ok(Command::Proceed)
        }

        Phase::AwaitingInput => {
            let wealth = state.world().map_or(0, |w| w.policy.wealth());
            let key = prompt(">>")?;
            Ok(match key.as_str() {
                "1" => Command::InvestHealthcare(prompt_budget(wealth)?),
                "2" => Command::SetDistancing(prompt_distancing()?),
                "3" => Command::InvestContactTracing(prompt_budget(wealth)?),
                "4" => Command::NextWeek,
                "q" => Command::Quit,
                _ => Command::Unrecognized,
            })
        }

        Phase::EndChoice => {
            let key = prompt(">>")?;
            Ok(match key.as_str() {
                "y" => Command::PlayAgain,
                "q" => Command::Quit,
                _ => Command::Unrecognized,
            })
        }

        Phase::Terminated => Ok(Command::Quit),
    }
}

/// Render the event a transition produced.
fn render_event(state: &GameState, event: &Event, no_chart: bool) -> Result<(), CliError> {
    match event {
        Event::Welcome => println!("\n{WELCOME}"),

        Event::TurnMenu => {
            if let Some(world) = state.world() {
                println!("{}\n", format_population(&world.population));
                println!("{}\n", format_policy(&world.policy));
            }
            println!("{MENU}");
        }

        Event::InvestedHealthcare(budget) => println!("Invested ${budget} into healthcare"),
        Event::InvestedContactTracing(budget) => {
            println!("Invested ${budget} into contact tracing");
        }
        Event::DistancingSet(level) => {
            println!("Your country is in a state of {}", level.label());
        }
        Event::BudgetRejected(err) => println!("{err}"),

        Event::WeekAdvancing => println!("A week passes... [enter]"),
        Event::TurnReady => println!("Your turn! [enter]"),
        Event::GameOver => println!("Game over!"),
        Event::Victory => println!("Victory"),
        Event::DefeatDebrief => {
            println!("You've let too many people die from the outbreak. You're fired!");
        }
        Event::VictoryDebrief => println!("You managed to eradicate the virus. Well done!"),

        Event::FinalReport(report) => {
            println!("{}", format_final_report(report));
            if !no_chart {
                chart::show(&report.series)?;
            }
            println!("Do you want to play again? Press y to start and press q to quit");
        }

        Event::Restarted => println!("Here we go again!"),
        Event::Farewell => println!("Thanks for playing, stay safe and goodbye!"),
        Event::InvalidInput => println!("Invalid input. Please try again."),
    }
    Ok(())
}

/// Loop until the player enters a budget the treasury covers.
fn prompt_budget(wealth: i64) -> Result<u64, CliError> {
    let mut entry = prompt("Assign your budget: ")?;
    loop {
        match parse_budget(&entry, wealth) {
            Ok(budget) => return Ok(budget),
            Err(BudgetError::NotANumber(_)) => {
                entry = prompt("Please enter a number for your budget: ")?;
            }
            Err(BudgetError::InsufficientWealth { .. }) => {
                entry = prompt("Not enough money! Try again: ")?;
            }
        }
    }
}

/// Loop until the player picks a distancing regime.
fn prompt_distancing() -> Result<DistancingLevel, CliError> {
    loop {
        println!("{DISTANCING_MENU}");
        let key = prompt(">>")?;
        if let Some(level) = DistancingLevel::from_key(&key) {
            return Ok(level);
        }
    }
}

/// Print a prompt and read one trimmed line.
fn prompt(text: &str) -> Result<String, CliError> {
    print!("{text}");
    stdout().flush()?;
    read_line()
}

/// Read one trimmed line from stdin. End of input counts as "q" so a closed
/// pipe terminates the session instead of spinning.
fn read_line() -> Result<String, CliError> {
    let mut line = String::new();
    let bytes = stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Ok("q".to_string());
    }
    Ok(line.trim().to_string())
}
