// Chart series - readings normalized onto a 0..=100 time axis for one parameter
use chrono::NaiveDateTime;

use super::telemetry::{Parameter, Reading};

/// Fraction of the value span added above and below the data.
pub const RANGE_MARGIN: f64 = 0.1;

/// Padding used when every value is identical.
pub const MIN_RANGE_PADDING: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Position along the time span, 0..=100.
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertical bounds of a chart. `max_value > min_value` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min_value: f64,
    max_value: f64,
}

impl AxisRange {
    /// Returns `None` unless both bounds are finite and `max > min`.
    pub fn new(min_value: f64, max_value: f64) -> Option<Self> {
        if min_value.is_finite() && max_value.is_finite() && max_value > min_value {
            Some(Self {
                min_value,
                max_value,
            })
        } else {
            None
        }
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn span(&self) -> f64 {
        self.max_value - self.min_value
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Padded range around observed values, floored at zero.
    pub fn padded(lo: f64, hi: f64) -> Self {
        let padding = if hi > lo {
            (hi - lo) * RANGE_MARGIN
        } else {
            (hi.abs() * RANGE_MARGIN).max(MIN_RANGE_PADDING)
        };
        let min_value = (lo - padding).max(0.0);
        // all-negative data collapses against the zero floor
        Self::new(min_value, hi + padding).unwrap_or(Self {
            min_value,
            max_value: min_value + MIN_RANGE_PADDING,
        })
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 100.0,
        }
    }
}

/// Points and range for one parameter of a series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub parameter: Parameter,
    pub points: Vec<ChartPoint>,
    pub range: AxisRange,
    /// Earliest and latest timestamps, when there are readings.
    pub time_span: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl ChartSeries {
    pub fn build(readings: &[Reading], parameter: Parameter) -> Self {
        let (Some(min_time), Some(max_time)) = (
            readings.iter().map(|r| r.timestamp).min(),
            readings.iter().map(|r| r.timestamp).max(),
        ) else {
            return Self {
                parameter,
                ..Self::default()
            };
        };

        let span_secs = (max_time - min_time).num_milliseconds() as f64 / 1000.0;

        let points: Vec<ChartPoint> = readings
            .iter()
            .enumerate()
            .map(|(i, reading)| {
                let x = if span_secs > 0.0 {
                    let offset = (reading.timestamp - min_time).num_milliseconds() as f64 / 1000.0;
                    100.0 * offset / span_secs
                } else {
                    i as f64
                };
                ChartPoint::new(x, reading.value(parameter))
            })
            .collect();

        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });

        Self {
            parameter,
            points,
            range: AxisRange::padded(lo, hi),
            time_span: Some((min_time, max_time)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn reading(i: i64, secs: i64, a01: f64) -> Reading {
        Reading::new(i, [a01, 0.0, 0.0, 0.0, 0.0], t0() + Duration::seconds(secs))
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_empty_series_uses_default_range() {
        let series = ChartSeries::build(&[], Parameter::Torque);
        assert!(series.is_empty());
        assert_eq!(series.parameter, Parameter::Torque);
        assert_eq!(series.range.min_value(), 0.0);
        assert_eq!(series.range.max_value(), 100.0);
        assert_eq!(series.time_span, None);
    }

    #[test]
    fn test_equal_spacing_and_padded_range() {
        let readings = vec![reading(1, 0, 50.0), reading(2, 60, 70.0), reading(3, 120, 30.0)];
        let series = ChartSeries::build(&readings, Parameter::HookLoad);

        let xs: Vec<f64> = series.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert_close(series.range.min_value(), 26.0);
        assert_close(series.range.max_value(), 74.0);
    }

    #[test]
    fn test_identical_timestamps_fall_back_to_index() {
        let readings = vec![reading(1, 30, 5.0), reading(2, 30, 6.0), reading(3, 30, 7.0)];
        let series = ChartSeries::build(&readings, Parameter::HookLoad);
        let xs: Vec<f64> = series.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_x_follows_timestamp_order() {
        let readings = vec![reading(1, 0, 1.0), reading(2, 10, 1.0), reading(3, 40, 1.0)];
        let series = ChartSeries::build(&readings, Parameter::HookLoad);
        assert!(series.points.windows(2).all(|w| w[0].x <= w[1].x));
        assert_close(series.points[1].x, 25.0);
    }

    #[test]
    fn test_range_never_negative_and_never_empty() {
        let cases: Vec<Vec<f64>> = vec![
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.0],
            vec![42.0],
            vec![-50.0, -30.0],
            vec![-5.0, 5.0],
            vec![1e-6, 1e-6],
        ];
        for values in cases {
            let readings: Vec<Reading> = values
                .iter()
                .enumerate()
                .map(|(i, v)| reading(i as i64, i as i64 * 10, *v))
                .collect();
            let range = ChartSeries::build(&readings, Parameter::HookLoad).range;
            assert!(range.min_value() >= 0.0, "{values:?}");
            assert!(range.span() > 0.0, "{values:?}");
        }
    }

    #[test]
    fn test_single_value_gets_floor_padding() {
        let range = AxisRange::padded(50.0, 50.0);
        assert_close(range.min_value(), 45.0);
        assert_close(range.max_value(), 55.0);

        let range = AxisRange::padded(0.0, 0.0);
        assert_close(range.min_value(), 0.0);
        assert_close(range.max_value(), 1.0);
    }

    #[test]
    fn test_axis_range_rejects_empty_span() {
        assert!(AxisRange::new(1.0, 1.0).is_none());
        assert!(AxisRange::new(2.0, 1.0).is_none());
        assert!(AxisRange::new(0.0, f64::NAN).is_none());
        assert!(AxisRange::new(0.0, 1.0).is_some());
    }

    #[test]
    fn test_parameter_selection_changes_values() {
        let readings = vec![
            Reading::new(1, [1.0, 200.0, 0.0, 0.0, 0.0], t0()),
            Reading::new(2, [2.0, 300.0, 0.0, 0.0, 0.0], t0() + Duration::seconds(5)),
        ];
        let series = ChartSeries::build(&readings, Parameter::PumpPressure);
        assert_eq!(series.points[0].y, 200.0);
        assert_eq!(series.points[1].y, 300.0);
        assert_close(series.range.min_value(), 190.0);
        assert_close(series.range.max_value(), 310.0);
    }
}
