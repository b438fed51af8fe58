// History screen - well selection, time window, table and chart
use crate::application::error::ClientError;
use crate::application::history_service::HistoryService;
use crate::domain::chart_series::ChartSeries;
use crate::domain::telemetry::{Parameter, Series};
use crate::domain::time_window::TimeWindow;
use crate::domain::validation::ValidationError;
use crate::domain::well::Well;
use crate::presentation::chart::colors::ChartColors;
use crate::presentation::chart::{ChartFrame, DrawList, LineChart, XLabels, parameter_color};
use chrono::NaiveDateTime;

pub const NO_WELL_LABEL: &str = "Well: --";

const TABLE_TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WellSelector {
    #[default]
    Loading,
    Loaded {
        wells: Vec<Well>,
        selected: Option<usize>,
    },
    Failed(String),
}

impl WellSelector {
    pub fn selected(&self) -> Option<&Well> {
        match self {
            WellSelector::Loaded {
                wells,
                selected: Some(i),
            } => wells.get(*i),
            _ => None,
        }
    }

    pub fn wells(&self) -> &[Well] {
        match self {
            WellSelector::Loaded { wells, .. } => wells,
            _ => &[],
        }
    }
}

/// Readings laid out for display, one row per reading.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HistoryTable {
    pub fn from_series(series: &Series) -> Self {
        let mut headers = vec!["Index".to_string()];
        headers.extend(Parameter::ALL.iter().map(|p| p.label().to_string()));
        headers.push("Time".to_string());

        let rows = series
            .readings
            .iter()
            .map(|reading| {
                let mut row = vec![reading.index.to_string()];
                row.extend(Parameter::ALL.iter().map(|p| reading.value(*p).to_string()));
                row.push(reading.timestamp.format(TABLE_TIME_FORMAT).to_string());
                row
            })
            .collect();

        Self { headers, rows }
    }
}

pub struct HistoryScreen {
    pub wells: WellSelector,
    pub window: TimeWindow,
    pub well_label: String,
    parameter: Parameter,
    series: Option<Series>,
    chart: LineChart,
    time_labels: bool,
    message: Option<String>,
}

impl HistoryScreen {
    pub fn new(frame: ChartFrame) -> Self {
        let parameter = Parameter::default();
        let mut chart = LineChart::new(frame);
        chart.set_colors(ChartColors {
            line: parameter_color(parameter),
            ..ChartColors::default()
        });
        Self {
            wells: WellSelector::default(),
            window: TimeWindow::default(),
            well_label: NO_WELL_LABEL.to_string(),
            parameter,
            series: None,
            chart,
            time_labels: false,
            message: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn chart(&self) -> &LineChart {
        &self.chart
    }

    /// Fetch the well list. The first well is selected when any exist.
    pub async fn load_wells(&mut self, history: &HistoryService) {
        self.wells = WellSelector::Loading;
        self.wells = match history.list_wells().await {
            Ok(wells) => {
                let selected = if wells.is_empty() { None } else { Some(0) };
                self.message = None;
                WellSelector::Loaded { wells, selected }
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("Failed to load wells: {}", message);
                self.message = Some(message.clone());
                WellSelector::Failed(message)
            }
        };
    }

    /// Select by zero-based position in the loaded list.
    pub fn select_well(&mut self, index: usize) -> bool {
        match &mut self.wells {
            WellSelector::Loaded { wells, selected } if index < wells.len() => {
                *selected = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Select by selector label such as "7-Tarim 101", or by bare id.
    pub fn select_well_label(&mut self, label: &str) -> bool {
        let Some(id) = Well::id_from_label(label) else {
            return false;
        };
        let position = self.wells.wells().iter().position(|w| w.id == id);
        match position {
            Some(index) => self.select_well(index),
            None => false,
        }
    }

    /// Redraw the chart into a different frame.
    pub fn resize_chart(&mut self, frame: ChartFrame) {
        self.chart.set_frame(frame);
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    pub fn set_time_labels(&mut self, enabled: bool) {
        self.time_labels = enabled;
        self.rebuild_chart();
    }

    /// Query the selected well over the current window.
    ///
    /// On failure the previous series, table and chart stay as they were.
    pub async fn query(&mut self, history: &HistoryService, now: NaiveDateTime) -> bool {
        let Some(well_id) = self.wells.selected().map(|w| w.id.clone()) else {
            self.message = Some(ClientError::from(ValidationError::MissingWell).user_message());
            return false;
        };

        match history.query(&well_id, self.window, now).await {
            Ok(series) => {
                self.well_label = format!("Well: {}", series.well_name);
                self.series = Some(series);
                self.message = None;
                self.rebuild_chart();
                true
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("Query for well {} failed: {}", well_id, message);
                self.message = Some(message);
                false
            }
        }
    }

    /// Switch the charted parameter. Applies to the current series if one is loaded.
    pub fn select_parameter(&mut self, parameter: Parameter) {
        self.parameter = parameter;
        self.chart.set_line_color(parameter_color(parameter));
        self.rebuild_chart();
    }

    pub fn table(&self) -> Option<HistoryTable> {
        self.series.as_ref().map(HistoryTable::from_series)
    }

    pub fn draw(&mut self) -> DrawList {
        self.chart.draw()
    }

    fn rebuild_chart(&mut self) {
        let Some(series) = &self.series else {
            return;
        };
        let chart_series = ChartSeries::build(&series.readings, self.parameter);
        if chart_series.is_empty() {
            tracing::debug!("No {} readings to chart", self.parameter.code());
        }
        let x_labels = match (self.time_labels, chart_series.time_span) {
            (true, Some((start, end))) => XLabels::TimeRange { start, end },
            _ => XLabels::Percent,
        };
        self.chart.set_x_labels(x_labels);
        self.chart.set_data(chart_series.range, chart_series.points);
    }
}
