// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Normalized Errors
//!
//! Every failure that reaches UI code is a [`NormalizedError`], whatever its
//! origin: no response from the gateway, an HTTP error status, or a business
//! rejection reported by a microservice.
//!
//! ## Status Convention
//!
//! | `status` | Meaning |
//! |----------|---------|
//! | `0` | No response received (connection failure, timeout) |
//! | `400` | Business or validation rejection |
//! | `401` / `403` | Authentication / authorization failure |
//! | other | Passed through from the gateway |
//!
//! Error bodies from the gateway are checked against a small schema
//! (`message`, `error`, `errors`). When the body does not match, the message
//! falls back to a generic text for the status code.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Field name to validation messages, as reported by the gateway.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The single error shape surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct NormalizedError {
    /// Human-readable message, displayable as-is.
    pub message: String,
    /// HTTP status, or `0` when no response was received.
    pub status: u16,
    /// Per-field validation messages, when the server provided them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
    /// When the failure was observed.
    pub timestamp: DateTime<Utc>,
}

/// Error body schema accepted from the gateway.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, FieldMessages>>,
}

/// Services report field errors either as a list or as a single string.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldMessages {
    Many(Vec<String>),
    One(String),
}

impl NormalizedError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            field_errors: None,
            timestamp: Utc::now(),
        }
    }

    /// No response was received from the gateway.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    /// Build from a transport failure reported by reqwest.
    pub fn from_transport(error: &reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::new(status.as_u16(), default_message(status.as_u16())),
            None if error.is_timeout() => Self::network("The server took too long to respond"),
            None => Self::network("Unable to reach the server"),
        }
    }

    /// The stored session can no longer authenticate requests.
    pub fn session_expired() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED.as_u16(),
            default_message(StatusCode::UNAUTHORIZED.as_u16()),
        )
    }

    /// A client-side rejection attached to a single field.
    pub fn rejected(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = FieldErrors::new();
        field_errors.insert(field.to_string(), vec![message.clone()]);
        Self::new(StatusCode::BAD_REQUEST.as_u16(), message).with_field_errors(field_errors)
    }

    /// A 2xx response whose body could not be decoded.
    pub fn invalid_response(status: u16) -> Self {
        Self::new(status, "Unexpected response from the server")
    }

    pub fn with_field_errors(mut self, field_errors: FieldErrors) -> Self {
        self.field_errors = (!field_errors.is_empty()).then_some(field_errors);
        self
    }

    /// Normalize an error response from its status and raw body.
    pub fn from_status_and_body(status: u16, body: &[u8]) -> Self {
        let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
            return Self::new(status, default_message(status));
        };

        let message = [parsed.message, parsed.error]
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
            .unwrap_or_else(|| default_message(status));

        let field_errors: FieldErrors = parsed
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|(field, messages)| {
                let messages = match messages {
                    FieldMessages::Many(list) => list,
                    FieldMessages::One(single) => vec![single],
                };
                (field, messages)
            })
            .filter(|(_, messages)| !messages.is_empty())
            .collect();

        Self::new(status, message).with_field_errors(field_errors)
    }

    /// Consume an error response and normalize it.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => Self::from_status_and_body(status, &body),
            Err(_) => Self::new(status, default_message(status)),
        }
    }

    /// Message to show the user: the first field error if any, otherwise
    /// the general message.
    pub fn display_message(&self) -> &str {
        self.field_errors
            .as_ref()
            .and_then(|errors| errors.values().find_map(|messages| messages.first()))
            .map(String::as_str)
            .unwrap_or(self.message.as_str())
    }

    /// First message per field, for form rendering.
    pub fn first_field_errors(&self) -> BTreeMap<String, String> {
        self.field_errors
            .iter()
            .flatten()
            .filter_map(|(field, messages)| {
                messages.first().map(|message| (field.clone(), message.clone()))
            })
            .collect()
    }

    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }

    pub fn is_auth_error(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16()
            || self.status == StatusCode::FORBIDDEN.as_u16()
    }

    pub fn is_validation_error(&self) -> bool {
        self.status == StatusCode::BAD_REQUEST.as_u16()
    }
}

/// Generic message used when the server did not provide a usable one.
pub fn default_message(status: u16) -> String {
    match status {
        0 => "Unable to reach the server".to_string(),
        400 => "The request is invalid".to_string(),
        401 => "Session expired, please sign in again".to_string(),
        403 => "Access denied".to_string(),
        404 => "Resource not found".to_string(),
        500..=599 => "Server error, please try again later".to_string(),
        other => format!("Request failed with status {other}"),
    }
}
