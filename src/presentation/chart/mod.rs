// Line chart: geometry, draw commands and backends
pub mod colors;
pub mod commands;
pub mod renderer;
pub mod svg;

pub use colors::parameter_color;
pub use commands::{DrawList, Point};
pub use renderer::{ChartFrame, LineChart, XLabels};
