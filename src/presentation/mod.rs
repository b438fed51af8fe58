// Presentation layer - Screens, chart rendering and the console front end
pub mod app_state;
pub mod chart;
pub mod console;
pub mod navigation;
pub mod screens;
