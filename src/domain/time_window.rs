// Query time window
use chrono::{Duration, NaiveDateTime};

use super::validation::ValidationError;

pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const MAX_RELATIVE_HOURS: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// The last `hours`h `minutes`m before now.
    Relative { hours: u32, minutes: u32 },
    /// A fixed range.
    Absolute {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::Relative {
            hours: 1,
            minutes: 0,
        }
    }
}

impl TimeWindow {
    pub fn relative(hours: u32, minutes: u32) -> Result<Self, ValidationError> {
        if hours > MAX_RELATIVE_HOURS || minutes >= 60 {
            return Err(ValidationError::InvalidTimeWindow(format!(
                "{hours}h {minutes}m is out of range"
            )));
        }
        if hours == 0 && minutes == 0 {
            return Err(ValidationError::InvalidTimeWindow(
                "window must not be empty".to_string(),
            ));
        }
        Ok(TimeWindow::Relative { hours, minutes })
    }

    pub fn absolute(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeWindow(
                "start must be before end".to_string(),
            ));
        }
        Ok(TimeWindow::Absolute { start, end })
    }

    /// Parse an absolute window from two `YYYY-MM-DD HH:MM:SS` strings.
    pub fn parse_absolute(start: &str, end: &str) -> Result<Self, ValidationError> {
        let parse = |s: &str| {
            NaiveDateTime::parse_from_str(s.trim(), WIRE_TIME_FORMAT).map_err(|_| {
                ValidationError::InvalidTimeWindow(format!(
                    "'{}' is not YYYY-MM-DD HH:MM:SS",
                    s.trim()
                ))
            })
        };
        Self::absolute(parse(start)?, parse(end)?)
    }

    /// Resolve to concrete `(start, end)` bounds.
    pub fn resolve(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match *self {
            TimeWindow::Relative { hours, minutes } => {
                let back = Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes));
                (now - back, now)
            }
            TimeWindow::Absolute { start, end } => (start, end),
        }
    }
}

pub fn format_wire_time(time: &NaiveDateTime) -> String {
    time.format(WIRE_TIME_FORMAT).to_string()
}
