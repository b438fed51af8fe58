// In-memory repository for service and screen tests
use crate::application::drilling_repository::DrillingRepository;
use crate::application::error::ClientError;
use crate::domain::session::UserProfile;
use crate::domain::telemetry::{Reading, Series};
use crate::domain::time_window::format_wire_time;
use crate::domain::validation::{PhoneNumber, Registration};
use crate::domain::well::Well;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Mutex;

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap()
}

/// Three readings one minute apart; A01 = 50, 70, 30.
pub fn sample_series() -> Series {
    let t0 = now() - Duration::minutes(2);
    Series::new(
        "Tarim 101".to_string(),
        vec![
            Reading::new(1, [50.0, 12.5, 3.0, 30.0, 90.0], t0),
            Reading::new(2, [70.0, 13.0, 3.5, 31.0, 95.0], t0 + Duration::minutes(1)),
            Reading::new(3, [30.0, 12.0, 2.5, 29.0, 85.0], t0 + Duration::minutes(2)),
        ],
    )
}

#[derive(Default)]
pub struct FakeRepository {
    login_failure: Option<String>,
    wells_failure: Option<String>,
    query_failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRepository {
    pub fn failing_login(message: &str) -> Self {
        Self {
            login_failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_wells(message: &str) -> Self {
        Self {
            wells_failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_query(message: &str) -> Self {
        Self {
            query_failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DrillingRepository for FakeRepository {
    async fn login(&self, phone: &PhoneNumber) -> Result<UserProfile, ClientError> {
        self.record(format!("login {}", phone.as_str()));
        match &self.login_failure {
            Some(message) => Err(ClientError::Server {
                status: 401,
                message: message.clone(),
            }),
            None => Ok(UserProfile::new("Li Wei".to_string(), "Sinopec".to_string())),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        self.record(format!("register {}", registration.name));
        Ok(())
    }

    async fn list_wells(&self) -> Result<Vec<Well>, ClientError> {
        self.record("wells".to_string());
        match &self.wells_failure {
            Some(message) => Err(ClientError::Server {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(vec![
                Well::new("7".to_string(), "Tarim 101".to_string()),
                Well::new("9".to_string(), "Shengli 3".to_string()),
            ]),
        }
    }

    async fn query_drilling_data(
        &self,
        well_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Series, ClientError> {
        self.record(format!(
            "query {} {} {}",
            well_id,
            format_wire_time(&start),
            format_wire_time(&end)
        ));
        match &self.query_failure {
            Some(message) => Err(ClientError::Rejected(message.clone())),
            None => Ok(sample_series()),
        }
    }
}
