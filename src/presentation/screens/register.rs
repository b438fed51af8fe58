// Registration screen
use crate::application::auth_service::AuthService;

pub const REGISTERED_MESSAGE: &str = "Registration successful";

#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub name_input: String,
    pub phone_input: String,
    pub company_input: String,
    message: Option<String>,
}

impl RegisterScreen {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true once the account exists; the form is then cleared.
    pub async fn submit(&mut self, auth: &AuthService) -> bool {
        match auth
            .register(&self.name_input, &self.phone_input, &self.company_input)
            .await
        {
            Ok(()) => {
                self.name_input.clear();
                self.phone_input.clear();
                self.company_input.clear();
                self.message = Some(REGISTERED_MESSAGE.to_string());
                true
            }
            Err(e) => {
                let message = e.user_message();
                if e.is_validation() {
                    tracing::debug!("Registration rejected: {}", message);
                } else {
                    tracing::warn!("Registration failed: {}", message);
                }
                self.message = Some(message);
                false
            }
        }
    }
}
