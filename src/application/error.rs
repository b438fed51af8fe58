// Error taxonomy for calls to the drilling data server
use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cannot reach server, check the network")]
    Connection(#[source] reqwest::Error),

    #[error("Server did not respond in time")]
    Timeout(#[source] reqwest::Error),

    #[error("{message}")]
    Server { status: u16, message: String },

    /// HTTP 200 whose body reports a non-success status.
    #[error("Query failed: {0}")]
    Rejected(String),

    #[error("Unexpected response from server: {0}")]
    Malformed(String),

    /// The request could not be built, usually a bad server URL in the settings.
    #[error("Invalid server settings: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Text shown to the user on the current screen.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err)
        } else if err.is_builder() {
            ClientError::InvalidRequest(err)
        } else if err.is_connect() || err.is_request() || err.is_body() {
            ClientError::Connection(err)
        } else {
            // decode, redirect and status errors all mean the reply was unusable
            ClientError::Malformed(err.to_string())
        }
    }
}
