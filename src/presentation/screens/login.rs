// Login screen
use crate::application::auth_service::AuthService;
use crate::domain::session::Session;
use chrono::NaiveDateTime;

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub phone_input: String,
    message: Option<String>,
}

impl LoginScreen {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Attempt a login with the current input. On failure the message is kept
    /// for display and the user stays on this screen.
    pub async fn submit(&mut self, auth: &AuthService, now: NaiveDateTime) -> Option<Session> {
        match auth.login(&self.phone_input, now).await {
            Ok(session) => {
                self.message = None;
                self.phone_input.clear();
                Some(session)
            }
            Err(e) => {
                let message = e.user_message();
                if e.is_validation() {
                    tracing::debug!("Login rejected: {}", message);
                } else {
                    tracing::warn!("Login failed: {}", message);
                }
                self.message = Some(message);
                None
            }
        }
    }
}
