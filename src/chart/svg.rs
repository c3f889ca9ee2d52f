use anyhow::{Result, anyhow};
use plotters::prelude::*;
use plotters_backend::{BackendCoord, DrawingBackend};

use crate::chart::canvas::{Canvas, DrawOp, Point, RecordingCanvas, Rect, Rgba, polylines};

const FONT_FAMILY: &str = "sans-serif";
const CORNER_STEPS: usize = 4;

/// Canvas backend producing a standalone SVG document through plotters'
/// `SVGBackend`, with a transparent background. Operations are buffered and
/// replayed in [`SvgCanvas::finish`].
#[derive(Debug)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    recording: RecordingCanvas,
}

impl SvgCanvas {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: pixels(width),
            height: pixels(height),
            recording: RecordingCanvas::new(),
        }
    }

    pub fn finish(self) -> Result<String> {
        let mut svg = String::new();
        {
            let mut backend = SVGBackend::with_string(&mut svg, (self.width, self.height));
            for op in self.recording.ops() {
                replay(&mut backend, op)?;
            }
            backend
                .present()
                .map_err(|err| anyhow!("failed to finish svg document: {err}"))?;
        }
        Ok(svg)
    }
}

fn replay(backend: &mut SVGBackend<'_>, op: &DrawOp) -> Result<()> {
    match op {
        DrawOp::Fill { path, color } => {
            let style = ShapeStyle {
                color: rgba_color(*color),
                filled: true,
                stroke_width: 0,
            };
            for polygon in polylines(path) {
                backend
                    .fill_polygon(polygon.iter().copied().map(coord), &style)
                    .map_err(|err| anyhow!("failed to fill svg polygon: {err}"))?;
            }
        }
        DrawOp::Stroke { path, color, width } => {
            let style = ShapeStyle {
                color: rgba_color(*color),
                filled: false,
                stroke_width: pixels(*width),
            };
            for line in polylines(path).into_iter().filter(|line| line.len() > 1) {
                backend
                    .draw_path(line.iter().copied().map(coord), &style)
                    .map_err(|err| anyhow!("failed to stroke svg path: {err}"))?;
            }
        }
        DrawOp::Text {
            at,
            text,
            color,
            size,
        } => {
            let fill = rgba_color(*color);
            let style = FontDesc::new(FontFamily::Name(FONT_FAMILY), *size, FontStyle::Normal)
                .color(&fill);
            backend
                .draw_text(text, &style, coord(*at))
                .map_err(|err| anyhow!("failed to draw svg text: {err}"))?;
        }
    }
    Ok(())
}

impl Canvas for SvgCanvas {
    fn move_to(&mut self, point: Point) {
        self.recording.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.recording.line_to(point);
    }

    fn close_path(&mut self) {
        self.recording.close_path();
    }

    fn fill(&mut self, color: Rgba) {
        self.recording.fill(color);
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        self.recording.stroke(color, width);
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba, size: f64) {
        self.recording.text(at, text, color, size);
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64) {
        let points = rounded_outline(rect, radius);
        let mut iter = points.into_iter();
        if let Some(first) = iter.next() {
            self.move_to(first);
        }
        for point in iter {
            self.line_to(point);
        }
        self.close_path();
    }
}

/// Outline of `rect` with each corner approximated by a short arc, clockwise
/// from the top edge.
#[must_use]
pub fn rounded_outline(rect: Rect, radius: f64) -> Vec<Point> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let corners = [
        (rect.x + rect.width - r, rect.y + r, -90.0),
        (rect.x + rect.width - r, rect.y + rect.height - r, 0.0),
        (rect.x + r, rect.y + rect.height - r, 90.0),
        (rect.x + r, rect.y + r, 180.0),
    ];
    let mut outline = Vec::with_capacity(corners.len() * (CORNER_STEPS + 1));
    for (cx, cy, start) in corners {
        for step in 0..=CORNER_STEPS {
            let angle = f64::to_radians(start + 90.0 * step as f64 / CORNER_STEPS as f64);
            outline.push(Point::new(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    outline
}

fn rgba_color(color: Rgba) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.a.clamp(0.0, 1.0))
}

fn coord(point: Point) -> BackendCoord {
    (point.x.round() as i32, point.y.round() as i32)
}

fn pixels(value: f64) -> u32 {
    if value.is_nan() {
        return 1;
    }
    value.round().clamp(1.0, f64::from(u32::MAX)) as u32
}
