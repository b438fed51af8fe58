// Drilling telemetry domain models
use chrono::NaiveDateTime;
use std::fmt;

/// Sensor channel reported by the rig, identified on the wire by its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Parameter {
    #[default]
    HookLoad,
    PumpPressure,
    Torque,
    FlowRate,
    RotarySpeed,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::HookLoad,
        Parameter::PumpPressure,
        Parameter::Torque,
        Parameter::FlowRate,
        Parameter::RotarySpeed,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Parameter::HookLoad => "A01",
            Parameter::PumpPressure => "A02",
            Parameter::Torque => "A03",
            Parameter::FlowRate => "A04",
            Parameter::RotarySpeed => "A05",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::HookLoad => "Hook load",
            Parameter::PumpPressure => "Pump pressure",
            Parameter::Torque => "Torque",
            Parameter::FlowRate => "Flow rate",
            Parameter::RotarySpeed => "Rotation speed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code.trim()))
    }

    fn slot(self) -> usize {
        match self {
            Parameter::HookLoad => 0,
            Parameter::PumpPressure => 1,
            Parameter::Torque => 2,
            Parameter::FlowRate => 3,
            Parameter::RotarySpeed => 4,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

/// One timestamped sample of all five channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub index: i64,
    values: [f64; 5],
    pub timestamp: NaiveDateTime,
}

impl Reading {
    pub fn new(index: i64, values: [f64; 5], timestamp: NaiveDateTime) -> Self {
        Self {
            index,
            values,
            timestamp,
        }
    }

    pub fn value(&self, parameter: Parameter) -> f64 {
        self.values[parameter.slot()]
    }
}

/// Readings for one well over one query window, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub well_name: String,
    pub readings: Vec<Reading>,
}

impl Series {
    pub fn new(well_name: String, readings: Vec<Reading>) -> Self {
        Self {
            well_name,
            readings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parameter_codes_round_trip() {
        for p in Parameter::ALL {
            assert_eq!(Parameter::from_code(p.code()), Some(p));
        }
        assert_eq!(Parameter::from_code("a03"), Some(Parameter::Torque));
        assert_eq!(Parameter::from_code("A06"), None);
    }

    #[test]
    fn test_reading_value_by_parameter() {
        let reading = Reading::new(7, [1.0, 2.0, 3.0, 4.0, 5.0], at(10, 0, 0));
        assert_eq!(reading.value(Parameter::HookLoad), 1.0);
        assert_eq!(reading.value(Parameter::FlowRate), 4.0);
        assert_eq!(reading.value(Parameter::RotarySpeed), 5.0);
    }
}
