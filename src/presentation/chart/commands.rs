// Backend-neutral drawing commands
//
// Coordinates are pixels with the origin at the bottom-left and y growing upward.
use super::colors::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
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
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Where a text's anchor point sits relative to the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor is the bottom-left corner of the text box.
    BottomLeft,
    /// Anchor is the left edge, vertically centered.
    MiddleLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Rgba,
    },
    Text {
        text: String,
        position: Point,
        anchor: TextAnchor,
        font_size: f64,
        color: Rgba,
    },
    /// Filled ellipse inscribed in `rect`.
    FillEllipse {
        rect: Rect,
        color: Rgba,
    },
}

/// Ordered drawing commands; later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// Inspection helpers for tests.
#[cfg(test)]
impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, width, .. } => Some((from, to, *width)),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[Point]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn ellipses(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillEllipse { rect, .. } => Some(rect),
            _ => None,
        })
    }
}
