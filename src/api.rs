//! Client for the results server's HTTP API.

use crate::config::{API_ROOT, RACE_PATH, SHUTDOWN_PATH, STATUS_PATH};
use crate::model::{RawRace, ServerStatus};
use gloo_net::http::Request;
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Network(String),
    Http { status: u16, status_text: String },
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Request failed: {}", e),
            ApiError::Http {
                status,
                status_text,
            } => write!(f, "HTTP error: {} {}", status, status_text),
            ApiError::Decode(e) => write!(f, "Failed to parse response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn endpoint(path: &str) -> String {
    format!("{}/{}", API_ROOT, path)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(&endpoint(path))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(&text)
}

pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the full race snapshot.
pub async fn fetch_race() -> Result<RawRace, ApiError> {
    get_json(RACE_PATH).await
}

/// Fetch the server's last-change time and liveness.
pub async fn fetch_status() -> Result<ServerStatus, ApiError> {
    get_json(STATUS_PATH).await
}

/// Ask the server to stop. Fire and forget: the reply is never inspected.
pub fn shutdown() {
    info!("Server shutting down...");
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = Request::post(&endpoint(SHUTDOWN_PATH)).send().await {
            debug!("Shutdown request failed: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_relative_to_api_root() {
        assert_eq!(endpoint(RACE_PATH), "api/v1/race");
        assert_eq!(endpoint(STATUS_PATH), "api/v1/updated_time");
        assert_eq!(endpoint(SHUTDOWN_PATH), "api/v1/shutdown");
    }

    #[test]
    fn incomplete_race_is_a_decode_error() {
        let res: Result<RawRace, ApiError> = decode(r#"{"persons": [], "groups": []}"#);
        match res {
            Err(ApiError::Decode(msg)) => assert!(msg.contains("organizations")),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn status_decodes() {
        let status: ServerStatus =
            decode(r#"{"updated_time": 12.5, "is_alive": false}"#).unwrap();
        assert!(!status.is_alive);
        assert_eq!(status.updated_time_ms(), 12_500.0);
    }

    #[test]
    fn errors_render_readably() {
        let err = ApiError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 500 Internal Server Error");
    }
}
