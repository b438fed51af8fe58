// Application state shared by the screens
use crate::application::auth_service::AuthService;
use crate::application::history_service::HistoryService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub history_service: HistoryService,
}
