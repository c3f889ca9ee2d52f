pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::{
    io::{self, Stdout},
    path::Path,
};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::state::{AppMode, AppState};
use chrono::Local;
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::studio::StudioClient;
use domain::occupancy::StudioSnapshot;
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(64);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

/// Fetches once, optionally writes the chart, and prints the snapshot.
pub async fn run_once(cli: &Cli) -> Result<()> {
    cli.validate()?;
    let client = StudioClient::with_url(cli.url.clone());
    let snapshot = client
        .fetch_snapshot(Local::now().naive_local(), cli.thresholds())
        .await;

    if let Some(path) = cli.svg.as_deref() {
        write_svg(&snapshot, cli, path)?;
    }
    println!("{}", report(&snapshot, cli.json)?);
    Ok(())
}

pub fn report(snapshot: &StudioSnapshot, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(snapshot).context("failed to encode snapshot")
    } else {
        Ok(snapshot.summary_line())
    }
}

pub fn write_svg(snapshot: &StudioSnapshot, cli: &Cli, path: &Path) -> Result<()> {
    if !snapshot.has_chart() {
        tracing::warn!("not enough realtime data, chart shows the grid only");
    }
    let svg = chart::render_svg(
        snapshot,
        cli.width,
        cli.height,
        cli.placement(),
        &ui::theme::chart_style(),
    )?;
    std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
