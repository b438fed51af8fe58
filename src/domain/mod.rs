// Domain layer - Drilling telemetry models and rules
pub mod chart_series;
pub mod session;
pub mod telemetry;
pub mod time_window;
pub mod validation;
pub mod well;
