//! Error types for the detector and the backend clients

use thiserror::Error;

/// Message fragments the backend uses when an image fails plant verification
const PLANT_VERIFICATION_MARKERS: [&str; 2] = ["not a plant", "Cannot detect"];

/// Failure of a detection call
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The backend rejected the image as not showing a plant
    #[error("{0}")]
    PlantVerification(String),

    /// Non-OK HTTP response
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connection, TLS or timeout failure
    #[error("detection request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the detection schema
    #[error("malformed detection response: {0}")]
    MalformedResponse(String),
}

impl DetectionError {
    /// Build an API error, promoting plant-verification messages
    pub fn from_api(status: u16, message: String) -> Self {
        if is_plant_verification_message(&message) {
            DetectionError::PlantVerification(message)
        } else {
            DetectionError::Api { status, message }
        }
    }

    /// True for errors that must reach the caller regardless of fallback policy
    pub fn is_plant_verification(&self) -> bool {
        match self {
            DetectionError::PlantVerification(_) => true,
            other => is_plant_verification_message(&other.to_string()),
        }
    }
}

pub fn is_plant_verification_message(message: &str) -> bool {
    PLANT_VERIFICATION_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Failure of a community, voice or profile call
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid base URL '{0}'")]
    InvalidUrl(String),
}
