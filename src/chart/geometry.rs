use crate::{
    chart::canvas::{Canvas, Point, Rect, Rgba},
    domain::occupancy::{MAX_PERCENTAGE, OccupancySeries},
};

const PAD_LEFT: f64 = 1.0;
const PAD_RIGHT: f64 = 4.0;
const PAD_TOP: f64 = 2.0;
const PAD_BOTTOM: f64 = 14.0;

const GRID_VALUES: [f64; 3] = [0.0, 50.0, 100.0];

const LEGEND_GAP: f64 = 2.0;
const LEGEND_DOT_RADIUS: f64 = 3.0;
const LEGEND_LABEL_OFFSET: f64 = 10.0;
const LEGEND_SECOND_ENTRY: f64 = 65.0;
const LEGEND_FONT_SIZE: f64 = 9.0;

/// How the realtime line and the "now" marker share the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NowPlacement {
    /// Realtime samples are spread over the elapsed part of the day, so the
    /// line always ends on the marker.
    #[default]
    TimeScaled,
    /// Realtime samples use the same full-width index axis as the forecast and
    /// the marker sits on the sample nearest to the elapsed-time ratio.
    SharedIndex,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub grid: Rgba,
    pub forecast_fill: Rgba,
    pub forecast_swatch: Rgba,
    pub realtime: Rgba,
    pub now_marker: Rgba,
    pub legend_text: Rgba,
}

/// Plot rectangle inside the canvas, leaving room for the legend below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    #[must_use]
    pub fn for_canvas(width: f64, height: f64) -> Self {
        let left = PAD_LEFT;
        let top = PAD_TOP;
        Self {
            left,
            right: (width - PAD_RIGHT).max(left),
            top,
            bottom: (height - PAD_BOTTOM).max(top),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Missing or NaN samples sit on the baseline; values are clamped to 0..=100.
    #[must_use]
    pub fn y_for(&self, value: Option<f64>) -> f64 {
        let v = value
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0)
            .clamp(0.0, MAX_PERCENTAGE);
        self.bottom - (v / MAX_PERCENTAGE) * self.height()
    }

    /// Position of sample `idx` when `count` samples span the full width.
    #[must_use]
    pub fn x_for_index(&self, idx: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left;
        }
        self.left + (idx as f64 / (count - 1) as f64) * self.width()
    }

    #[must_use]
    pub fn x_for_ratio(&self, ratio: f64) -> f64 {
        self.left + ratio * self.width()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub realtime: Option<&'a OccupancySeries>,
    pub forecast: Option<&'a OccupancySeries>,
    pub width: f64,
    pub height: f64,
    /// Index of the sample holding the current value.
    pub line_end_index: usize,
    pub now_ratio: f64,
    pub placement: NowPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub swatch: Rect,
    pub label: &'static str,
    pub label_at: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub plot: PlotArea,
    pub gridlines: Vec<Segment>,
    /// Closed outline: baseline left, the curve, baseline right.
    pub forecast_area: Option<Vec<Point>>,
    pub realtime_line: Option<Vec<Point>>,
    pub now_marker: Segment,
    pub legend: [LegendEntry; 2],
}

impl ChartGeometry {
    #[must_use]
    pub fn build(input: &ChartInput<'_>) -> Self {
        let plot = PlotArea::for_canvas(input.width, input.height);
        let now_ratio = if input.now_ratio.is_nan() {
            0.0
        } else {
            input.now_ratio.clamp(0.0, 1.0)
        };

        let gridlines = GRID_VALUES
            .iter()
            .map(|value| {
                let y = plot.y_for(Some(*value));
                Segment {
                    from: Point::new(plot.left, y),
                    to: Point::new(plot.right, y),
                }
            })
            .collect();

        let forecast_area = input
            .forecast
            .and_then(|series| forecast_outline(&plot, series));

        let (realtime_line, now_x) = match input.placement {
            NowPlacement::TimeScaled => (
                input.realtime.and_then(|series| {
                    time_scaled_line(&plot, series, input.line_end_index, now_ratio)
                }),
                plot.x_for_ratio(now_ratio),
            ),
            NowPlacement::SharedIndex => {
                shared_index_line(&plot, input.realtime, input.line_end_index, now_ratio)
            }
        };

        Self {
            plot,
            gridlines,
            forecast_area,
            realtime_line,
            now_marker: Segment {
                from: Point::new(now_x, plot.top),
                to: Point::new(now_x, plot.bottom),
            },
            legend: legend(&plot),
        }
    }

    pub fn paint(&self, canvas: &mut impl Canvas, style: &ChartStyle) {
        for line in &self.gridlines {
            canvas.move_to(line.from);
            canvas.line_to(line.to);
            canvas.stroke(style.grid, 1.0);
        }

        if let Some(outline) = &self.forecast_area {
            trace(canvas, outline);
            canvas.close_path();
            canvas.fill(style.forecast_fill);
        }

        if let Some(line) = &self.realtime_line {
            trace(canvas, line);
            canvas.stroke(style.realtime, 2.0);
        }

        canvas.move_to(self.now_marker.from);
        canvas.line_to(self.now_marker.to);
        canvas.stroke(style.now_marker, 1.0);

        let swatch_colors = [style.realtime, style.forecast_swatch];
        for (entry, color) in self.legend.iter().zip(swatch_colors) {
            canvas.rounded_rect(entry.swatch, LEGEND_DOT_RADIUS);
            canvas.fill(color);
            canvas.text(
                entry.label_at,
                entry.label,
                style.legend_text,
                LEGEND_FONT_SIZE,
            );
        }
    }
}

fn trace(canvas: &mut impl Canvas, points: &[Point]) {
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        canvas.move_to(*first);
    }
    for point in iter {
        canvas.line_to(*point);
    }
}

fn forecast_outline(plot: &PlotArea, series: &OccupancySeries) -> Option<Vec<Point>> {
    let count = series.len();
    if count < 2 {
        return None;
    }
    let mut outline = Vec::with_capacity(count + 2);
    outline.push(Point::new(plot.left, plot.bottom));
    outline.extend((0..count).map(|idx| {
        Point::new(plot.x_for_index(idx, count), plot.y_for(series.sample(idx)))
    }));
    outline.push(Point::new(plot.right, plot.bottom));
    Some(outline)
}

fn time_scaled_line(
    plot: &PlotArea,
    series: &OccupancySeries,
    line_end_index: usize,
    now_ratio: f64,
) -> Option<Vec<Point>> {
    if series.len() < 2 {
        return None;
    }
    let end = line_end_index.min(series.len() - 1);
    if end < 1 {
        return None;
    }
    let span = plot.width() * now_ratio;
    Some(
        (0..=end)
            .map(|idx| {
                let x = plot.left + (idx as f64 / end as f64) * span;
                Point::new(x, plot.y_for(series.sample(idx)))
            })
            .collect(),
    )
}

fn shared_index_line(
    plot: &PlotArea,
    series: Option<&OccupancySeries>,
    line_end_index: usize,
    now_ratio: f64,
) -> (Option<Vec<Point>>, f64) {
    let Some(series) = series.filter(|s| !s.is_empty()) else {
        return (None, plot.x_for_ratio(now_ratio));
    };
    let count = series.len();
    let now_index = now_index(now_ratio, count);
    let now_x = plot.x_for_index(now_index, count);
    if count < 2 {
        return (None, now_x);
    }

    let end = line_end_index.min(now_index).min(count - 1);
    if end < 1 {
        return (None, now_x);
    }
    let line = (0..=end)
        .map(|idx| Point::new(plot.x_for_index(idx, count), plot.y_for(series.sample(idx))))
        .collect();
    (Some(line), now_x)
}

/// Sample index nearest to `ratio` on an axis of `count` samples.
#[must_use]
pub fn now_index(ratio: f64, count: usize) -> usize {
    let Some(last) = count.checked_sub(1) else {
        return 0;
    };
    ((ratio.clamp(0.0, 1.0) * last as f64).round() as usize).min(last)
}

fn legend(plot: &PlotArea) -> [LegendEntry; 2] {
    let y = plot.bottom + LEGEND_GAP;
    let size = LEGEND_DOT_RADIUS * 2.0;
    let entry = |x: f64, label: &'static str| LegendEntry {
        swatch: Rect::new(x, y, size, size),
        label,
        label_at: Point::new(x + LEGEND_LABEL_OFFSET, y - 2.0),
    };
    [
        entry(plot.left, "Realtime"),
        entry(plot.left + LEGEND_SECOND_ENTRY, "Forecast"),
    ]
}
