// Auth service - Use cases for login and registration
use crate::application::drilling_repository::DrillingRepository;
use crate::application::error::ClientError;
use crate::domain::session::Session;
use crate::domain::validation::{PhoneNumber, Registration};
use chrono::NaiveDateTime;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn DrillingRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn DrillingRepository>) -> Self {
        Self { repository }
    }

    /// Validate the phone number, then log in. Invalid input never reaches the server.
    pub async fn login(&self, phone_input: &str, now: NaiveDateTime) -> Result<Session, ClientError> {
        let phone = PhoneNumber::parse(phone_input)?;
        let user = self.repository.login(&phone).await?;
        tracing::info!("Logged in as {}", user.name);
        tracing::debug!("Profile attributes: {:?}", user.attributes);
        Ok(Session::new(user, phone.as_str().to_string(), now))
    }

    pub async fn register(&self, name: &str, phone: &str, company: &str) -> Result<(), ClientError> {
        let registration = Registration::parse(name, phone, company)?;
        self.repository.register(&registration).await?;
        tracing::info!("Registered {}", registration.name);
        Ok(())
    }
}
