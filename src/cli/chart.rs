//! End-of-game compartment chart - a full-screen TUI plot.

// Chart scaling uses intentional casts for display
#![allow(clippy::cast_precision_loss)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use outbreak::model::CompartmentSeries;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use std::io::stdout;

/// Show the compartment chart until the player presses q, Esc, or Enter.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub(super) fn show(series: &CompartmentSeries) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = draw_loop(&mut terminal, series);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn draw_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    series: &CompartmentSeries,
) -> Result<(), CliError> {
    let infected = points(series, &series.infected);
    let quarantined = points(series, &series.quarantined);
    let recovered = points(series, &series.recovered);
    let dead = points(series, &series.dead);

    let x_max = series.time.last().copied().unwrap_or(1.0);
    let y_max = [&infected, &quarantined, &recovered, &dead]
        .iter()
        .flat_map(|data| data.iter().map(|&(_, y)| y))
        .fold(1.0_f64, f64::max);

    loop {
        terminal
            .draw(|f| {
                let datasets = vec![
                    dataset("infected", Color::Red, &infected),
                    dataset("quarantined", Color::Yellow, &quarantined),
                    dataset("recovered", Color::Green, &recovered),
                    dataset("dead", Color::Gray, &dead),
                ];

                let chart = Chart::new(datasets)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Epidemic curve | q to close "),
                    )
                    .x_axis(
                        Axis::default()
                            .title("time")
                            .bounds([0.0, x_max])
                            .labels(axis_labels(0.0, x_max)),
                    )
                    .y_axis(
                        Axis::default()
                            .title("people")
                            .bounds([0.0, y_max])
                            .labels(axis_labels(0.0, y_max)),
                    );

                f.render_widget(chart, f.area());
            })
            .map_err(|e| CliError::new(e.to_string()))?;

        if let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => break,
                _ => {}
            }
        }
    }

    Ok(())
}

fn points(series: &CompartmentSeries, values: &[f64]) -> Vec<(f64, f64)> {
    series.time.iter().copied().zip(values.iter().copied()).collect()
}

fn dataset<'a>(name: &'a str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = f64::midpoint(min, max);
    vec![
        Span::raw(format!("{min:.0}")),
        Span::raw(format!("{mid:.0}")),
        Span::raw(format!("{max:.0}")),
    ]
}
