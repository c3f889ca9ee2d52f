use chrono::NaiveTime;

use crate::{
    cli::{Cli, NowPlacementArg, ThresholdsArg},
    data::studio::STUDIO_URL,
    domain::occupancy::{OccupancySeries, SeriesPair, StudioSnapshot, Thresholds},
};

pub(crate) fn test_cli() -> Cli {
    Cli {
        url: STUDIO_URL.to_string(),
        thresholds: ThresholdsArg::Standard,
        now_placement: NowPlacementArg::TimeScaled,
        refresh_interval: 1800,
        one_shot: false,
        json: false,
        svg: None,
        width: 335.0,
        height: 85.0,
    }
}

/// Realtime data up to 14:00, forecast for the whole day.
pub(crate) fn afternoon_snapshot() -> StudioSnapshot {
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
        NaiveTime::from_hms_opt(14, 30, 0).expect("valid time fixture"),
        Thresholds::STANDARD,
    )
}
