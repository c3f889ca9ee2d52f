pub mod canvas;
pub mod geometry;
pub mod svg;

use crate::domain::occupancy::StudioSnapshot;
use geometry::{ChartGeometry, ChartInput, ChartStyle, NowPlacement};
use svg::SvgCanvas;

pub const DEFAULT_WIDTH: f64 = 335.0;
pub const DEFAULT_HEIGHT: f64 = 85.0;

/// Without an explicit current index the line runs to the last sample, and
/// without a time ratio the marker sits at the end of the day.
#[must_use]
pub fn chart_input(
    snapshot: &StudioSnapshot,
    width: f64,
    height: f64,
    placement: NowPlacement,
) -> ChartInput<'_> {
    let realtime = snapshot.realtime.as_ref();
    let last = realtime.map_or(0, |series| series.len().saturating_sub(1));
    ChartInput {
        realtime,
        forecast: snapshot.forecast.as_ref(),
        width,
        height,
        line_end_index: snapshot.current_index.unwrap_or(last),
        now_ratio: snapshot.now_ratio.unwrap_or(1.0),
        placement,
    }
}

pub fn render_svg(
    snapshot: &StudioSnapshot,
    width: f64,
    height: f64,
    placement: NowPlacement,
    style: &ChartStyle,
) -> anyhow::Result<String> {
    let geometry = ChartGeometry::build(&chart_input(snapshot, width, height, placement));
    let mut canvas = SvgCanvas::new(width, height);
    geometry.paint(&mut canvas, style);
    canvas.finish()
}
