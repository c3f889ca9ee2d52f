#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use gym_occupancy::{
    app::state::{AppMode, AppState},
    cli::Cli,
    domain::occupancy::{OccupancySeries, SeriesPair, StudioSnapshot, Thresholds},
};

pub const WEEKLY_TABLE: &str =
    "[[1,2,3],[4,5,6],[7,8,9],[10,11,12],[13,14,15],[16,17,18],[19,20,21]]";

pub fn studio_page(current: &str, weekly: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <body>
    <div class="studio-occupancy"
         data-current-day-data="{current}"
         data-visitordata="{weekly}">
    </div>
  </body>
</html>"#
    )
}

/// 2026-02-11 is a Wednesday.
pub fn wednesday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 11)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["gym-occupancy"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

pub fn afternoon_snapshot() -> StudioSnapshot {
    let realtime = (0..24)
        .map(|hour| (hour <= 14).then(|| f64::from(hour * 3)))
        .collect::<Vec<_>>();
    let forecast = (0..24).map(|hour| f64::from(hour * 2)).collect::<Vec<_>>();
    StudioSnapshot::from_series(
        "Karlsruhe Oststadt",
        SeriesPair {
            current: Some(OccupancySeries::new(realtime)),
            forecast: Some(OccupancySeries::from(forecast)),
        },
        NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        Thresholds::STANDARD,
    )
}

pub fn ready_state(cli: &Cli, snapshot: StudioSnapshot) -> AppState {
    let mut state = AppState::new(cli);
    state.snapshot = Some(snapshot);
    state.mode = AppMode::Ready;
    state
}
