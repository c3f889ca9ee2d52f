use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::time::sleep;

use crate::{cli::MIN_REFRESH_INTERVAL_SECS, domain::occupancy::StudioSnapshot};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickRefresh,
    Input(Event),
    FetchStarted,
    FetchCompleted(Box<StudioSnapshot>),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Sends `TickRefresh` roughly every `refresh_secs`, jittered by ±10%.
pub fn start_refresh_task(tx: tokio::sync::mpsc::Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        let base = refresh_secs.max(MIN_REFRESH_INTERVAL_SECS);
        loop {
            sleep(jittered(base)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

fn jittered(base_secs: u64) -> Duration {
    let jitter = rand::rng().random_range(-0.1f64..0.1f64);
    Duration::from_secs_f64(((base_secs as f64) * (1.0 + jitter)).max(1.0))
}
