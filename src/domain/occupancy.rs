use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

pub const MAX_PERCENTAGE: f64 = 100.0;
const MINUTES_PER_DAY: f64 = 1440.0;
const DAYS_PER_WEEK: usize = 7;

/// Hourly occupancy samples for one day, starting at midnight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OccupancySeries(Vec<Option<f64>>);

impl OccupancySeries {
    #[must_use]
    pub fn new(samples: Vec<Option<f64>>) -> Self {
        Self(samples)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn sample(&self, idx: usize) -> Option<f64> {
        self.0.get(idx).copied().flatten().filter(|v| !v.is_nan())
    }

    #[must_use]
    pub fn samples(&self) -> &[Option<f64>] {
        &self.0
    }
}

impl From<Vec<f64>> for OccupancySeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }
}

/// Seven typical-day curves, Monday first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyForecastTable(Vec<OccupancySeries>);

impl WeeklyForecastTable {
    #[must_use]
    pub fn new(rows: Vec<OccupancySeries>) -> Self {
        Self(rows)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.0.len()
    }

    /// Short tables are ignored entirely, and an empty row counts as missing.
    #[must_use]
    pub fn row_for(&self, weekday: Weekday) -> Option<&OccupancySeries> {
        if self.0.len() < DAYS_PER_WEEK {
            return None;
        }
        self.0
            .get(forecast_row_index(weekday))
            .filter(|row| !row.is_empty())
    }
}

#[must_use]
pub fn forecast_row_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// Realtime and forecast series as found on the studio page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesPair {
    pub current: Option<OccupancySeries>,
    pub forecast: Option<OccupancySeries>,
}

impl SeriesPair {
    /// Falls back to the realtime series when no forecast row exists for `weekday`.
    #[must_use]
    pub fn select(
        current: Option<OccupancySeries>,
        table: Option<&WeeklyForecastTable>,
        weekday: Weekday,
    ) -> Self {
        let forecast = table
            .and_then(|table| table.row_for(weekday))
            .cloned()
            .or_else(|| current.clone());
        Self { current, forecast }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTier {
    NoData,
    NotBusy,
    ModeratelyBusy,
    Busy,
    VeryBusy,
}

impl StatusTier {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoData => "No data",
            Self::NotBusy => "Not busy",
            Self::ModeratelyBusy => "Moderately busy",
            Self::Busy => "Busy",
            Self::VeryBusy => "Very busy",
        }
    }
}

/// Upper bounds (exclusive) of the three lower busy tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub not_busy: f64,
    pub moderately_busy: f64,
    pub busy: f64,
}

impl Thresholds {
    pub const STANDARD: Self = Self {
        not_busy: 25.0,
        moderately_busy: 50.0,
        busy: 75.0,
    };

    pub const RELAXED: Self = Self {
        not_busy: 25.0,
        moderately_busy: 60.0,
        busy: 85.0,
    };

    #[must_use]
    pub fn classify(self, percentage: Option<f64>) -> StatusTier {
        let Some(pct) = percentage.filter(|v| !v.is_nan()) else {
            return StatusTier::NoData;
        };
        if pct < self.not_busy {
            StatusTier::NotBusy
        } else if pct < self.moderately_busy {
            StatusTier::ModeratelyBusy
        } else if pct < self.busy {
            StatusTier::Busy
        } else {
            StatusTier::VeryBusy
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioStatus {
    Tier(StatusTier),
    FetchFailed,
}

impl StudioStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.label(),
            Self::FetchFailed => "Error",
        }
    }

    /// Tier used for coloring; a failed fetch looks like missing data.
    #[must_use]
    pub fn tier(self) -> StatusTier {
        match self {
            Self::Tier(tier) => tier,
            Self::FetchFailed => StatusTier::NoData,
        }
    }
}

impl Serialize for StudioStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioSnapshot {
    pub name: String,
    pub current_percentage: Option<f64>,
    pub status: StudioStatus,
    pub realtime: Option<OccupancySeries>,
    pub forecast: Option<OccupancySeries>,
    pub current_index: Option<usize>,
    pub now_ratio: Option<f64>,
}

impl StudioSnapshot {
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_percentage: None,
            status: StudioStatus::Tier(StatusTier::NoData),
            realtime: None,
            forecast: None,
            current_index: None,
            now_ratio: None,
        }
    }

    #[must_use]
    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            status: StudioStatus::FetchFailed,
            ..Self::empty(name)
        }
    }

    /// Picks the sample for the current hour and classifies it. Leaves every
    /// series unset when there is no usable realtime data.
    #[must_use]
    pub fn from_series(
        name: impl Into<String>,
        pair: SeriesPair,
        now: NaiveTime,
        thresholds: Thresholds,
    ) -> Self {
        let mut snapshot = Self::empty(name);
        let Some(realtime) = pair.current.filter(|series| !series.is_empty()) else {
            return snapshot;
        };
        let Some(idx) = current_index(now.hour(), realtime.len()) else {
            return snapshot;
        };

        let current = realtime.sample(idx);
        snapshot.current_index = Some(idx);
        snapshot.now_ratio = Some(day_ratio(now));
        snapshot.current_percentage = current;
        snapshot.status = StudioStatus::Tier(thresholds.classify(current));
        snapshot.realtime = Some(realtime);
        snapshot.forecast = pair.forecast;
        snapshot
    }

    #[must_use]
    pub fn percentage_label(&self) -> String {
        self.current_percentage
            .map_or_else(|| "–".to_string(), |pct| format!("{:.0} %", pct.round()))
    }

    /// A chart needs at least two realtime samples to draw a line.
    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.realtime.as_ref().is_some_and(|series| series.len() > 1)
    }

    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} ({})",
            self.name,
            self.percentage_label(),
            self.status.label()
        )
    }
}

/// Index of the sample for `hour`, assuming one sample per hour from midnight.
#[must_use]
pub fn current_index(hour: u32, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    Some((hour as usize).min(last))
}

/// Fraction of the day elapsed at `time`, in `[0, 1]`.
#[must_use]
pub fn day_ratio(time: NaiveTime) -> f64 {
    let minutes = f64::from(time.hour() * 60 + time.minute());
    (minutes / MINUTES_PER_DAY).clamp(0.0, 1.0)
}

/// "karlsruhe-oststadt" in the last path segment becomes "Karlsruhe Oststadt".
#[must_use]
pub fn studio_name_from_url(url: &str) -> String {
    let Some(slug) = url.split('/').rfind(|part| !part.is_empty()) else {
        return "Unknown".to_string();
    };
    slug.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
