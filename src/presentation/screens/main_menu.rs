// Main screen - user banner and entry points
use crate::domain::session::Session;
use crate::domain::time_window::format_wire_time;
use chrono::NaiveDateTime;

pub const WELCOME: &str = "Welcome to the drilling parameter monitor";

#[derive(Debug, Default)]
pub struct MainScreen {
    pub user_line: String,
    pub last_update: String,
}

impl MainScreen {
    pub fn on_enter(&mut self, session: &Session, now: NaiveDateTime) {
        self.user_line = session.user.display_line();
        self.last_update = format!("Last updated: {}", format_wire_time(&now));
    }
}
