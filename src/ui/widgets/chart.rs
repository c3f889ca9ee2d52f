use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas as CanvasWidget, Line as CanvasLine},
};

use crate::{
    app::state::AppState,
    chart::{
        canvas::{Canvas, PathCommand, Point, Rgba, polylines},
        chart_input,
        geometry::ChartGeometry,
    },
    ui::theme::{Theme, chart_style},
};

/// Chart coordinates used for the terminal canvas; cells are scaled to fit.
const CHART_WIDTH: f64 = 335.0;
const CHART_HEIGHT: f64 = 85.0;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(snapshot) = state.snapshot.as_ref() else {
        return;
    };
    if area.width == 0 || area.height == 0 {
        return;
    }

    let geometry = ChartGeometry::build(&chart_input(
        snapshot,
        CHART_WIDTH,
        CHART_HEIGHT,
        state.placement,
    ));
    let mut canvas = TerminalCanvas::new(state.theme, CHART_WIDTH, area.width);
    geometry.paint(&mut canvas, &chart_style());

    let widget = CanvasWidget::default()
        .background_color(state.theme.background)
        .marker(Marker::Braille)
        .x_bounds([0.0, CHART_WIDTH])
        .y_bounds([0.0, CHART_HEIGHT])
        .paint(|ctx| {
            for segment in &canvas.segments {
                ctx.draw(&CanvasLine {
                    x1: segment.from.x,
                    y1: CHART_HEIGHT - segment.from.y,
                    x2: segment.to.x,
                    y2: CHART_HEIGHT - segment.to.y,
                    color: segment.color,
                });
            }
            ctx.layer();
            for label in &canvas.labels {
                ctx.print(
                    label.at.x,
                    CHART_HEIGHT - label.at.y - label.size / 2.0,
                    Span::styled(label.text.clone(), Style::default().fg(label.color)),
                );
            }
        });
    frame.render_widget(widget, area);
}

#[derive(Debug, Clone, Copy)]
pub struct TerminalSegment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct TerminalLabel {
    pub at: Point,
    pub text: String,
    pub color: Color,
    pub size: f64,
}

/// Canvas backend that reduces every path to line segments for ratatui's
/// braille canvas. Fills become vertical hatching, one line per dot column.
#[derive(Debug)]
pub struct TerminalCanvas {
    theme: Theme,
    fill_step: f64,
    pending: Vec<PathCommand>,
    pub segments: Vec<TerminalSegment>,
    pub labels: Vec<TerminalLabel>,
}

impl TerminalCanvas {
    #[must_use]
    pub fn new(theme: Theme, width: f64, columns: u16) -> Self {
        // braille packs two dot columns per cell
        let dots = f64::from(columns.max(1)) * 2.0;
        Self {
            theme,
            fill_step: (width / dots).max(f64::EPSILON),
            pending: Vec::new(),
            segments: Vec::new(),
            labels: Vec::new(),
        }
    }

    fn push_segment(&mut self, from: Point, to: Point, color: Color) {
        self.segments.push(TerminalSegment { from, to, color });
    }
}

impl Canvas for TerminalCanvas {
    fn move_to(&mut self, point: Point) {
        self.pending.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.pending.push(PathCommand::LineTo(point));
    }

    fn close_path(&mut self) {
        self.pending.push(PathCommand::Close);
    }

    fn fill(&mut self, color: Rgba) {
        let path = std::mem::take(&mut self.pending);
        let color = self.theme.color(color);
        for polygon in polylines(&path) {
            for (from, to) in scanline_spans(&polygon, self.fill_step) {
                self.push_segment(from, to, color);
            }
        }
    }

    fn stroke(&mut self, color: Rgba, _width: f64) {
        let path = std::mem::take(&mut self.pending);
        let color = self.theme.color(color);
        for line in polylines(&path) {
            for pair in line.windows(2) {
                self.push_segment(pair[0], pair[1], color);
            }
        }
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba, size: f64) {
        self.labels.push(TerminalLabel {
            at,
            text: text.to_string(),
            color: self.theme.color(color),
            size,
        });
    }
}

/// Vertical spans inside `polygon` (even-odd rule), sampled every `step` along x.
#[must_use]
pub fn scanline_spans(polygon: &[Point], step: f64) -> Vec<(Point, Point)> {
    let mut spans = Vec::new();
    if polygon.len() < 3 || step <= 0.0 {
        return spans;
    }
    let min_x = polygon.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = polygon.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);

    let mut x = min_x;
    while x <= max_x {
        let mut crossings: Vec<f64> = polygon
            .windows(2)
            .filter_map(|edge| crossing_y(edge[0], edge[1], x))
            .collect();
        crossings.sort_by(f64::total_cmp);
        for pair in crossings.chunks_exact(2) {
            spans.push((Point::new(x, pair[0]), Point::new(x, pair[1])));
        }
        x += step;
    }
    spans
}

/// Half-open on x so shared vertices are counted once.
fn crossing_y(a: Point, b: Point, x: f64) -> Option<f64> {
    let (left, right) = if a.x <= b.x { (a, b) } else { (b, a) };
    if !(left.x <= x && x < right.x) {
        return None;
    }
    let t = (x - left.x) / (right.x - left.x);
    Some(left.y + t * (right.y - left.y))
}
