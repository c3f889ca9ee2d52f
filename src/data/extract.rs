use std::sync::OnceLock;

use chrono::Weekday;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::domain::occupancy::{OccupancySeries, SeriesPair, WeeklyForecastTable};

pub const CURRENT_DAY_ATTR: &str = "data-current-day-data";
pub const WEEKLY_ATTR: &str = "data-visitordata";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("attribute `{attr}` not found")]
    Absent { attr: String },
    #[error("attribute `{attr}` is not a valid series: {reason}")]
    Malformed { attr: String, reason: String },
}

impl ExtractError {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }
}

/// The ways the page has been seen to quote an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Double,
    Single,
    Entity,
}

impl Quoting {
    pub const ORDER: [Self; 3] = [Self::Double, Self::Single, Self::Entity];

    fn delimiter(self) -> &'static str {
        match self {
            Self::Double => "\"",
            Self::Single => "'",
            Self::Entity => "&quot;",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Double => 0,
            Self::Single => 1,
            Self::Entity => 2,
        }
    }

    fn matcher(self, attr: &str) -> Option<Regex> {
        let quote = regex::escape(self.delimiter());
        let pattern = format!(r"{}={quote}(\[.*?\]){quote}", regex::escape(attr));
        Regex::new(&pattern).ok()
    }

    /// Raw captured text for `attr`, without any unescaping.
    #[must_use]
    pub fn capture<'a>(self, html: &'a str, attr: &str) -> Option<&'a str> {
        let captures = match page_matchers(attr) {
            Some(matchers) => matchers[self.slot()].as_ref()?.captures(html)?,
            None => self.matcher(attr)?.captures(html)?,
        };
        captures.get(1).map(|m| m.as_str())
    }

    /// Whether `attr` opens a value in this style, closed or not.
    fn opens(self, html: &str, attr: &str) -> bool {
        html.contains(&format!("{attr}={}", self.delimiter()))
    }
}

type Matchers = [Option<Regex>; 3];

/// Matchers for the two attributes the studio page carries, compiled once.
fn page_matchers(attr: &str) -> Option<&'static Matchers> {
    static CURRENT_DAY: OnceLock<Matchers> = OnceLock::new();
    static WEEKLY: OnceLock<Matchers> = OnceLock::new();
    let cell = match attr {
        CURRENT_DAY_ATTR => &CURRENT_DAY,
        WEEKLY_ATTR => &WEEKLY,
        _ => return None,
    };
    Some(cell.get_or_init(|| Quoting::ORDER.map(|quoting| quoting.matcher(attr))))
}

/// Tries every quoting style in order and returns the first value that parses.
pub fn extract_attr_json(html: &str, attr: &str) -> Result<Value, ExtractError> {
    let mut malformed = None;
    for quoting in Quoting::ORDER {
        let Some(raw) = quoting.capture(html, attr) else {
            continue;
        };
        let decoded = html_escape::decode_html_entities(raw);
        match serde_json::from_str::<Value>(decoded.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::trace!(attr, ?quoting, %err, "attribute value failed to parse");
                malformed.get_or_insert_with(|| err.to_string());
            }
        }
    }
    if malformed.is_none() && Quoting::ORDER.iter().any(|q| q.opens(html, attr)) {
        malformed = Some("unterminated array value".to_string());
    }

    Err(match malformed {
        Some(reason) => ExtractError::Malformed {
            attr: attr.to_string(),
            reason,
        },
        None => ExtractError::Absent {
            attr: attr.to_string(),
        },
    })
}

pub fn extract_series(html: &str, attr: &str) -> Result<OccupancySeries, ExtractError> {
    let value = extract_attr_json(html, attr)?;
    series_from_value(&value).ok_or_else(|| ExtractError::Malformed {
        attr: attr.to_string(),
        reason: "expected an array of numbers".to_string(),
    })
}

pub fn extract_weekly_table(html: &str, attr: &str) -> Result<WeeklyForecastTable, ExtractError> {
    let value = extract_attr_json(html, attr)?;
    let malformed = || ExtractError::Malformed {
        attr: attr.to_string(),
        reason: "expected an array of arrays".to_string(),
    };
    let rows = value.as_array().ok_or_else(malformed)?;
    if !rows.iter().any(Value::is_array) {
        return Err(malformed());
    }
    // A day without data (`null`) stays in place as an empty row.
    let rows = rows
        .iter()
        .map(|row| series_from_value(row).unwrap_or_default())
        .collect();
    Ok(WeeklyForecastTable::new(rows))
}

/// Realtime series plus today's forecast row. Missing or broken attributes
/// become `None`.
#[must_use]
pub fn extract_series_pair(html: &str, weekday: Weekday) -> SeriesPair {
    let current = extract_series(html, CURRENT_DAY_ATTR)
        .inspect_err(|err| tracing::debug!(%err, "no realtime series"))
        .ok();
    let table = extract_weekly_table(html, WEEKLY_ATTR)
        .inspect_err(|err| tracing::debug!(%err, "no weekly forecast table"))
        .ok();
    SeriesPair::select(current, table.as_ref(), weekday)
}

fn series_from_value(value: &Value) -> Option<OccupancySeries> {
    let samples = value.as_array()?.iter().map(sample_from_value).collect();
    Some(OccupancySeries::new(samples))
}

fn sample_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
