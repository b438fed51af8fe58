// JSON wire types for the drilling server and their mapping to domain models
use crate::application::error::ClientError;
use crate::domain::session::UserProfile;
use crate::domain::telemetry::{Reading, Series};
use crate::domain::time_window::WIRE_TIME_FORMAT;
use crate::domain::well::Well;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub phone: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub company: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DrillingDataRequest<'a> {
    pub well_id: &'a str,
    pub start_time: String,
    pub end_time: String,
}

/// Body of a non-200 response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserProfileDto {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Company", default)]
    pub company: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct WellDto {
    /// Numeric or string, depending on the server's database driver.
    #[serde(rename = "ID")]
    pub id: serde_json::Value,
    #[serde(rename = "WELL")]
    pub well: String,
}

#[derive(Debug, Deserialize)]
pub struct DrillingDataResponse {
    pub status: String,
    #[serde(default)]
    pub well_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<ReadingDto>,
}

#[derive(Debug, Deserialize)]
pub struct ReadingDto {
    pub index: i64,
    #[serde(rename = "A01")]
    pub a01: f64,
    #[serde(rename = "A02")]
    pub a02: f64,
    #[serde(rename = "A03")]
    pub a03: f64,
    #[serde(rename = "A04")]
    pub a04: f64,
    #[serde(rename = "A05")]
    pub a05: f64,
    #[serde(rename = "DT")]
    pub dt: String,
}

pub fn profile_from_dto(dto: UserProfileDto) -> UserProfile {
    let attributes = dto
        .extra
        .into_iter()
        .map(|(key, value)| (key, json_to_text(value)))
        .collect();
    UserProfile {
        name: dto.name,
        company: dto.company,
        attributes,
    }
}

pub fn well_from_dto(dto: WellDto) -> Well {
    Well::new(json_to_text(dto.id), dto.well)
}

pub fn series_from_response(response: DrillingDataResponse) -> Result<Series, ClientError> {
    if response.status != SUCCESS_STATUS {
        return Err(ClientError::Rejected(
            response.message.unwrap_or_else(|| response.status.clone()),
        ));
    }

    let readings = response
        .data
        .into_iter()
        .map(reading_from_dto)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Series::new(response.well_name.unwrap_or_default(), readings))
}

fn reading_from_dto(dto: ReadingDto) -> Result<Reading, ClientError> {
    let timestamp = NaiveDateTime::parse_from_str(dto.dt.trim(), WIRE_TIME_FORMAT)
        .map_err(|_| ClientError::Malformed(format!("invalid timestamp '{}'", dto.dt)))?;
    Ok(Reading::new(
        dto.index,
        [dto.a01, dto.a02, dto.a03, dto.a04, dto.a05],
        timestamp,
    ))
}

fn json_to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
