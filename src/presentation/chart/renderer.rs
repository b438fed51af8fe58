// Line chart renderer - geometry is computed on frame or data changes, colors are applied at paint time
use chrono::NaiveDateTime;

use super::colors::ChartColors;
use super::commands::{DrawCommand, DrawList, Point, Rect, TextAnchor};
use crate::domain::chart_series::{AxisRange, ChartPoint};

/// Inset between the frame edge and the plot area, on every side.
pub const PADDING: f64 = 20.0;
/// Cells per axis; there is one more gridline than cells.
pub const GRID_DIVISIONS: usize = 10;
pub const MARKER_EVERY: usize = 5;
pub const MARKER_SIZE: f64 = 4.0;
pub const LABEL_FONT_SIZE: f64 = 10.0;

const GRID_LINE_WIDTH: f64 = 0.5;
const AXIS_LINE_WIDTH: f64 = 1.5;
const SERIES_LINE_WIDTH: f64 = 1.5;
const Y_LABEL_INSET: f64 = 5.0;
const X_LABEL_DROP: f64 = 15.0;
const X_END_LABEL_OFFSET: f64 = 30.0;
const TIME_END_LABEL_OFFSET: f64 = 50.0;

/// Drawing region: bottom-left origin and size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl ChartFrame {
    /// Returns `None` unless the size is finite and positive.
    pub fn new(origin: Point, width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) && origin.x.is_finite() && origin.y.is_finite() {
            Some(Self {
                origin,
                width,
                height,
            })
        } else {
            None
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * PADDING).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * PADDING).max(0.0)
    }

    fn left(&self) -> f64 {
        self.origin.x + PADDING
    }

    fn bottom(&self) -> f64 {
        self.origin.y + PADDING
    }

    fn right(&self) -> f64 {
        self.left() + self.plot_width()
    }

    fn top(&self) -> f64 {
        self.bottom() + self.plot_height()
    }

    /// Map a chart point to pixels. Out-of-range input is clamped first.
    pub fn map(&self, point: ChartPoint, range: &AxisRange) -> Point {
        let x = point.x.clamp(0.0, 100.0);
        let y = range.clamp(point.y);
        Point::new(
            self.origin.x + PADDING + self.plot_width() * (x / 100.0),
            self.origin.y
                + PADDING
                + self.plot_height() * (y - range.min_value()) / (range.max_value() - range.min_value()),
        )
    }
}

/// Text under the two ends of the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum XLabels {
    /// Literal "0" and "100%".
    #[default]
    Percent,
    /// Clock time of the first and last reading.
    TimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Label {
    text: String,
    position: Point,
    anchor: TextAnchor,
}

/// Pixel geometry of one chart, independent of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    background: Rect,
    grid: Vec<(Point, Point)>,
    axes: [(Point, Point); 2],
    y_labels: Vec<Label>,
    x_labels: Vec<Label>,
    line: Vec<Point>,
    markers: Vec<Rect>,
}

impl ChartGeometry {
    pub fn compute(
        frame: &ChartFrame,
        range: &AxisRange,
        points: &[ChartPoint],
        x_labels: &XLabels,
    ) -> Self {
        let background = Rect::new(frame.origin.x, frame.origin.y, frame.width, frame.height);
        let steps = GRID_DIVISIONS as f64;

        let mut grid = Vec::with_capacity(2 * (GRID_DIVISIONS + 1));
        for i in 0..=GRID_DIVISIONS {
            let y = frame.bottom() + frame.plot_height() * i as f64 / steps;
            grid.push((Point::new(frame.left(), y), Point::new(frame.right(), y)));
        }
        for i in 0..=GRID_DIVISIONS {
            let x = frame.left() + frame.plot_width() * i as f64 / steps;
            grid.push((Point::new(x, frame.bottom()), Point::new(x, frame.top())));
        }

        let corner = Point::new(frame.left(), frame.bottom());
        let axes = [
            (corner, Point::new(frame.right(), frame.bottom())),
            (corner, Point::new(frame.left(), frame.top())),
        ];

        let y_labels = (0..=GRID_DIVISIONS)
            .map(|i| {
                let value = range.min_value() + range.span() * i as f64 / steps;
                Label {
                    text: format!("{value:.1}"),
                    position: Point::new(
                        frame.origin.x + Y_LABEL_INSET,
                        frame.bottom() + frame.plot_height() * i as f64 / steps,
                    ),
                    anchor: TextAnchor::MiddleLeft,
                }
            })
            .collect();

        let line: Vec<Point> = points
            .iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .map(|p| frame.map(*p, range))
            .collect();

        let markers = line
            .iter()
            .step_by(MARKER_EVERY)
            .map(|p| {
                Rect::new(
                    p.x - MARKER_SIZE / 2.0,
                    p.y - MARKER_SIZE / 2.0,
                    MARKER_SIZE,
                    MARKER_SIZE,
                )
            })
            .collect();

        let x_labels = if line.is_empty() {
            Vec::new()
        } else {
            x_axis_labels(frame, x_labels)
        };

        Self {
            background,
            grid,
            axes,
            y_labels,
            x_labels,
            line,
            markers,
        }
    }

    pub fn paint(&self, colors: &ChartColors) -> DrawList {
        let mut list = DrawList::new();

        list.push(DrawCommand::FillRect {
            rect: self.background,
            color: colors.background,
        });

        for (from, to) in &self.grid {
            list.push(DrawCommand::Line {
                from: *from,
                to: *to,
                width: GRID_LINE_WIDTH,
                color: colors.grid,
            });
        }

        for (from, to) in &self.axes {
            list.push(DrawCommand::Line {
                from: *from,
                to: *to,
                width: AXIS_LINE_WIDTH,
                color: colors.axis,
            });
        }

        for label in self.y_labels.iter().chain(&self.x_labels) {
            list.push(DrawCommand::Text {
                text: label.text.clone(),
                position: label.position,
                anchor: label.anchor,
                font_size: LABEL_FONT_SIZE,
                color: colors.label,
            });
        }

        if !self.line.is_empty() {
            list.push(DrawCommand::Polyline {
                points: self.line.clone(),
                width: SERIES_LINE_WIDTH,
                color: colors.line,
            });
            for rect in &self.markers {
                list.push(DrawCommand::FillEllipse {
                    rect: *rect,
                    color: colors.line,
                });
            }
        }

        list
    }
}

fn x_axis_labels(frame: &ChartFrame, mode: &XLabels) -> Vec<Label> {
    let y = frame.origin.y + PADDING - X_LABEL_DROP;
    let (first, last, end_offset) = match mode {
        XLabels::Percent => ("0".to_string(), "100%".to_string(), X_END_LABEL_OFFSET),
        XLabels::TimeRange { start, end } => (
            start.format("%H:%M:%S").to_string(),
            end.format("%H:%M:%S").to_string(),
            TIME_END_LABEL_OFFSET,
        ),
    };
    vec![
        Label {
            text: first,
            position: Point::new(frame.origin.x + PADDING, y),
            anchor: TextAnchor::BottomLeft,
        },
        Label {
            text: last,
            position: Point::new(frame.origin.x + frame.width - PADDING - end_offset, y),
            anchor: TextAnchor::BottomLeft,
        },
    ]
}

/// Chart model that redraws fully whenever frame, range or points change.
///
/// Geometry is cached between draws, so color changes only repaint.
#[derive(Debug, Clone)]
pub struct LineChart {
    frame: ChartFrame,
    range: AxisRange,
    points: Vec<ChartPoint>,
    x_labels: XLabels,
    colors: ChartColors,
    geometry: Option<ChartGeometry>,
}

impl LineChart {
    pub fn new(frame: ChartFrame) -> Self {
        Self {
            frame,
            range: AxisRange::default(),
            points: Vec::new(),
            x_labels: XLabels::default(),
            colors: ChartColors::default(),
            geometry: None,
        }
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn range(&self) -> &AxisRange {
        &self.range
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn colors(&self) -> &ChartColors {
        &self.colors
    }

    pub fn set_frame(&mut self, frame: ChartFrame) {
        self.frame = frame;
        self.geometry = None;
    }

    pub fn set_data(&mut self, range: AxisRange, points: Vec<ChartPoint>) {
        self.range = range;
        self.points = points;
        self.geometry = None;
    }

    pub fn set_x_labels(&mut self, x_labels: XLabels) {
        self.x_labels = x_labels;
        self.geometry = None;
    }

    pub fn set_colors(&mut self, colors: ChartColors) {
        self.colors = colors;
    }

    pub fn set_line_color(&mut self, color: super::colors::Rgba) {
        self.colors.line = color;
    }

    #[cfg(test)]
    pub fn has_cached_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn draw(&mut self) -> DrawList {
        let geometry = self.geometry.get_or_insert_with(|| {
            ChartGeometry::compute(&self.frame, &self.range, &self.points, &self.x_labels)
        });
        geometry.paint(&self.colors)
    }
}
