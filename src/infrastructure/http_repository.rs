// HTTP repository implementation against the drilling data server
use crate::application::drilling_repository::DrillingRepository;
use crate::application::error::ClientError;
use crate::domain::session::UserProfile;
use crate::domain::telemetry::Series;
use crate::domain::time_window::format_wire_time;
use crate::domain::validation::{PhoneNumber, Registration};
use crate::domain::well::Well;
use crate::infrastructure::config::ServerSettings;
use crate::infrastructure::wire::{
    DrillingDataRequest, DrillingDataResponse, ErrorBody, LoginRequest, RegisterRequest,
    UserProfileDto, WellDto, profile_from_dto, series_from_response, well_from_dto,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDrillingRepository {
    base_url: String,
    client: reqwest::Client,
    auth_timeout: Option<Duration>,
    wells_timeout: Duration,
    query_timeout: Duration,
}

impl HttpDrillingRepository {
    pub fn new(settings: &ServerSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            auth_timeout: settings.auth_timeout(),
            wells_timeout: settings.wells_timeout(),
            query_timeout: settings.query_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    /// Server-supplied `message` of a failed response, or `fallback`.
    async fn failure(response: Response, fallback: &str) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!("Request failed with status {}: {}", status, message);
        ClientError::Server { status, message }
    }
}

#[async_trait]
impl DrillingRepository for HttpDrillingRepository {
    async fn login(&self, phone: &PhoneNumber) -> Result<UserProfile, ClientError> {
        let request = self.client.post(self.url("/api/login")).json(&LoginRequest {
            phone: phone.as_str(),
        });
        let response = self.with_auth_timeout(request).send().await?;

        if response.status() != StatusCode::OK {
            return Err(Self::failure(response, "Login failed").await);
        }

        let profile = response.json::<UserProfileDto>().await?;
        Ok(profile_from_dto(profile))
    }

    async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        let request = self.client.post(self.url("/api/register")).json(&RegisterRequest {
            name: &registration.name,
            phone: registration.phone.as_str(),
            company: &registration.company,
        });
        let response = self.with_auth_timeout(request).send().await?;

        if response.status() != StatusCode::OK {
            return Err(Self::failure(response, "Registration failed").await);
        }
        Ok(())
    }

    async fn list_wells(&self) -> Result<Vec<Well>, ClientError> {
        let response = self
            .client
            .get(self.url("/api/wells"))
            .timeout(self.wells_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Self::failure(response, "Failed to load wells").await);
        }

        let wells = response.json::<Vec<WellDto>>().await?;
        Ok(wells.into_iter().map(well_from_dto).collect())
    }

    async fn query_drilling_data(
        &self,
        well_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Series, ClientError> {
        let body = DrillingDataRequest {
            well_id,
            start_time: format_wire_time(&start),
            end_time: format_wire_time(&end),
        };

        let response = self
            .client
            .post(self.url("/api/drilling_data"))
            .json(&body)
            .timeout(self.query_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            return Err(Self::failure(response, &format!("Server error: {}", status.as_u16())).await);
        }

        let data = response.json::<DrillingDataResponse>().await?;
        series_from_response(data)
    }
}
