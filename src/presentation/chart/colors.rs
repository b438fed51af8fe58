// Chart colors
use crate::domain::telemetry::Parameter;

/// RGBA color with channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_u8(self) -> (u8, u8, u8) {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }
}

pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
pub const LIGHT_GRAY: Rgba = Rgba::rgb(0.8, 0.8, 0.8);
pub const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
pub const GREEN: Rgba = Rgba::rgb(0.0, 1.0, 0.0);
pub const PURPLE: Rgba = Rgba::rgb(0.5, 0.0, 0.5);
pub const YELLOW: Rgba = Rgba::rgb(1.0, 1.0, 0.0);

/// The five independently configurable chart colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub background: Rgba,
    pub grid: Rgba,
    pub axis: Rgba,
    pub label: Rgba,
    pub line: Rgba,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            background: WHITE,
            grid: LIGHT_GRAY,
            axis: BLACK,
            label: BLACK,
            line: RED,
        }
    }
}

/// Series line color for each sensor channel.
pub fn parameter_color(parameter: Parameter) -> Rgba {
    match parameter {
        Parameter::HookLoad => GREEN,
        Parameter::PumpPressure => PURPLE,
        Parameter::Torque => RED,
        Parameter::FlowRate => YELLOW,
        Parameter::RotarySpeed => BLACK,
    }
}
