use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::{
    app::events::{AppEvent, start_refresh_task},
    chart::geometry::NowPlacement,
    cli::Cli,
    data::studio::StudioClient,
    domain::occupancy::{StudioSnapshot, Thresholds},
    ui::theme::{Theme, detect_color_capability, theme_for},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub snapshot: Option<StudioSnapshot>,
    pub updated_at: Option<DateTime<Local>>,
    pub fetch_in_flight: bool,
    pub thresholds: Thresholds,
    pub placement: NowPlacement,
    pub theme: Theme,
    client: StudioClient,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        Self {
            mode: AppMode::Loading,
            running: true,
            snapshot: None,
            updated_at: None,
            fetch_in_flight: false,
            thresholds: cli.thresholds(),
            placement: cli.placement(),
            theme: theme_for(detect_color_capability()),
            client: StudioClient::with_url(cli.url.clone()),
        }
    }

    #[must_use]
    pub fn studio_name(&self) -> String {
        self.snapshot
            .as_ref()
            .map_or_else(|| self.client.studio_name(), |s| s.name.clone())
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                start_refresh_task(tx.clone(), cli.refresh_interval);
                self.start_fetch(tx).await?;
            }
            AppEvent::TickRefresh => self.start_fetch(tx).await?,
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::FetchStarted => {
                self.fetch_in_flight = true;
                if self.snapshot.is_none() {
                    self.mode = AppMode::Loading;
                }
            }
            AppEvent::FetchCompleted(snapshot) => {
                self.fetch_in_flight = false;
                self.snapshot = Some(*snapshot);
                self.updated_at = Some(Local::now());
                self.mode = AppMode::Ready;
            }
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => tx.send(AppEvent::Quit).await?,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                tx.send(AppEvent::Quit).await?;
            }
            KeyCode::Char('r') => self.start_fetch(tx).await?,
            _ => {}
        }
        Ok(())
    }

    async fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if self.fetch_in_flight {
            return Ok(());
        }
        // FetchStarted only arrives after the next loop turn.
        self.fetch_in_flight = true;
        tx.send(AppEvent::FetchStarted).await?;

        let client = self.client.clone();
        let thresholds = self.thresholds;
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let now = Local::now().naive_local();
            let snapshot = client.fetch_snapshot(now, thresholds).await;
            let _ = tx2.send(AppEvent::FetchCompleted(Box::new(snapshot))).await;
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests;
