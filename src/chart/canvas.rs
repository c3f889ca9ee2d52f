#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Flattens the color onto an opaque background.
    #[must_use]
    pub fn over(self, background: Self) -> Self {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            (f64::from(fg) * a + f64::from(bg) * (1.0 - a))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// Minimal immediate-mode 2D drawing surface. Path commands accumulate until
/// `fill` or `stroke` consumes the current path.
pub trait Canvas {
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn close_path(&mut self);
    fn fill(&mut self, color: Rgba);
    fn stroke(&mut self, color: Rgba, width: f64);
    fn text(&mut self, at: Point, text: &str, color: Rgba, size: f64);

    /// Backends without curves get a plain rectangle.
    fn rounded_rect(&mut self, rect: Rect, _radius: f64) {
        self.move_to(Point::new(rect.x, rect.y));
        self.line_to(Point::new(rect.x + rect.width, rect.y));
        self.line_to(Point::new(rect.x + rect.width, rect.y + rect.height));
        self.line_to(Point::new(rect.x, rect.y + rect.height));
        self.close_path();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        path: Vec<PathCommand>,
        color: Rgba,
    },
    Stroke {
        path: Vec<PathCommand>,
        color: Rgba,
        width: f64,
    },
    Text {
        at: Point,
        text: String,
        color: Rgba,
        size: f64,
    },
}

/// Keeps every finished operation for later inspection or replay.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pending: Vec<PathCommand>,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    #[must_use]
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[PathCommand], Rgba, f64)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke { path, color, width } => Some((path.as_slice(), *color, *width)),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&[PathCommand], Rgba)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill { path, color } => Some((path.as_slice(), *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
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
        self.ops.push(DrawOp::Fill { path, color });
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        let path = std::mem::take(&mut self.pending);
        self.ops.push(DrawOp::Stroke { path, color, width });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba, size: f64) {
        self.ops.push(DrawOp::Text {
            at,
            text: text.to_string(),
            color,
            size,
        });
    }
}

/// Splits a recorded path into polylines, resolving `Close` back to the start.
#[must_use]
pub fn polylines(path: &[PathCommand]) -> Vec<Vec<Point>> {
    let mut out: Vec<Vec<Point>> = Vec::new();
    for command in path {
        match command {
            PathCommand::MoveTo(p) => out.push(vec![*p]),
            PathCommand::LineTo(p) => match out.last_mut() {
                Some(current) => current.push(*p),
                None => out.push(vec![*p]),
            },
            PathCommand::Close => {
                if let Some(current) = out.last_mut()
                    && let Some(first) = current.first().copied()
                {
                    current.push(first);
                }
            }
        }
    }
    out
}
