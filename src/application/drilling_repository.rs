// Repository trait for drilling server access
use crate::application::error::ClientError;
use crate::domain::session::UserProfile;
use crate::domain::telemetry::Series;
use crate::domain::validation::{PhoneNumber, Registration};
use crate::domain::well::Well;
use async_trait::async_trait;
use chrono::NaiveDateTime;

#[async_trait]
pub trait DrillingRepository: Send + Sync {
    /// Exchange a phone number for the user's profile
    async fn login(&self, phone: &PhoneNumber) -> Result<UserProfile, ClientError>;

    /// Create a new account
    async fn register(&self, registration: &Registration) -> Result<(), ClientError>;

    /// List all wells known to the server
    async fn list_wells(&self) -> Result<Vec<Well>, ClientError>;

    /// Fetch readings for one well between `start` and `end`
    async fn query_drilling_data(
        &self,
        well_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Series, ClientError>;
}
