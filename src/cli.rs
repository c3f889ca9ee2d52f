#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    chart::{DEFAULT_HEIGHT, DEFAULT_WIDTH, geometry::NowPlacement},
    data::studio::STUDIO_URL,
    domain::occupancy::Thresholds,
};

pub const MIN_REFRESH_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ThresholdsArg {
    /// 25 / 50 / 75
    Standard,
    /// 25 / 60 / 85
    Relaxed,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NowPlacementArg {
    TimeScaled,
    SharedIndex,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "gym-occupancy",
    version,
    about = "Live occupancy and weekly forecast for a gym studio"
)]
pub struct Cli {
    /// Public studio page to scrape
    #[arg(long, default_value = STUDIO_URL)]
    pub url: String,

    /// Busy tier boundaries
    #[arg(long, value_enum, default_value_t = ThresholdsArg::Standard)]
    pub thresholds: ThresholdsArg,

    /// Where the realtime line and the "now" marker sit on the time axis
    #[arg(long, value_enum, default_value_t = NowPlacementArg::TimeScaled)]
    pub now_placement: NowPlacementArg,

    /// Refresh interval in seconds (at least 60)
    #[arg(long, default_value_t = 1800)]
    pub refresh_interval: u64,

    /// Print snapshot to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,

    /// Print the snapshot as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,

    /// Write the chart as SVG to this path and exit
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// SVG chart width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: f64,

    /// SVG chart height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: f64,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            anyhow::bail!("--width and --height must be positive");
        }
        if self.refresh_interval < MIN_REFRESH_INTERVAL_SECS {
            anyhow::bail!(
                "--refresh-interval must be at least {MIN_REFRESH_INTERVAL_SECS} seconds"
            );
        }
        if self.json && !self.is_non_interactive() {
            anyhow::bail!("--json requires --one-shot or --svg");
        }
        Ok(())
    }

    #[must_use]
    pub fn is_non_interactive(&self) -> bool {
        self.one_shot || self.svg.is_some()
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        match self.thresholds {
            ThresholdsArg::Standard => Thresholds::STANDARD,
            ThresholdsArg::Relaxed => Thresholds::RELAXED,
        }
    }

    #[must_use]
    pub fn placement(&self) -> NowPlacement {
        match self.now_placement {
            NowPlacementArg::TimeScaled => NowPlacement::TimeScaled,
            NowPlacementArg::SharedIndex => NowPlacement::SharedIndex,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_point_at_builtin_studio() {
        let cli = Cli::parse_from(["gym-occupancy"]);
        assert_eq!(cli.url, STUDIO_URL);
        assert_eq!(cli.thresholds(), Thresholds::STANDARD);
        assert_eq!(cli.placement(), NowPlacement::TimeScaled);
        assert_eq!(cli.refresh_interval, 1800);
        assert!(!cli.is_non_interactive());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parses_variant_enums() {
        let cli = Cli::parse_from([
            "gym-occupancy",
            "--thresholds",
            "relaxed",
            "--now-placement",
            "shared-index",
        ]);
        assert_eq!(cli.thresholds(), Thresholds::RELAXED);
        assert_eq!(cli.placement(), NowPlacement::SharedIndex);
    }

    #[test]
    fn svg_implies_non_interactive() {
        let cli = Cli::parse_from(["gym-occupancy", "--svg", "chart.svg", "--json"]);
        assert!(cli.is_non_interactive());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn json_without_one_shot_is_rejected() {
        let cli = Cli::parse_from(["gym-occupancy", "--json"]);
        let err = cli.validate().expect_err("expected validation error");
        assert!(err.to_string().contains("--json"));
    }

    #[test]
    fn rejects_refresh_interval_below_floor() {
        let cli = Cli::parse_from(["gym-occupancy", "--refresh-interval", "59"]);
        let err = cli.validate().expect_err("expected validation error");
        assert!(err.to_string().contains("--refresh-interval"));

        let cli = Cli::parse_from(["gym-occupancy", "--refresh-interval", "60"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_size() {
        let cli = Cli::parse_from(["gym-occupancy", "--one-shot", "--width", "0"]);
        assert!(cli.validate().is_err());
    }
}
