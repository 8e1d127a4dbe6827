// ABOUTME: Unified error handling for the challenge derivation engine
// ABOUTME: Standard error codes, structured details, and a serializable report shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

//! # Unified Error Handling
//!
//! Every fallible operation in the crate returns [`EngineError`], a typed
//! error with a stable [`ErrorCode`] and optional structured details.
//! Errors are never retried: the engine is pure, so re-running a failed
//! computation with the same snapshot reproduces the same error. The only
//! remedy is corrected input on the next snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (1000-1999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 1000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 1001,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 1002,

    // Data integrity (2000-2999)
    #[serde(rename = "DUPLICATE_PARTICIPANT")]
    DuplicateParticipant = 2000,
    #[serde(rename = "MISSING_PROFILE")]
    MissingProfile = 2001,

    // Unimplemented surface (3000-3999)
    #[serde(rename = "UNSUPPORTED")]
    Unsupported = 3000,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided challenge data is invalid",
            Self::MissingRequiredField => "A required field is missing from the record",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::DuplicateParticipant => "The record lists the same participant more than once",
            Self::MissingProfile => "No profile entry exists for a listed participant",
            Self::Unsupported => "The requested challenge kind is not implemented yet",
            Self::InternalError => "An internal engine error occurred",
        }
    }

    /// Whether this code marks an upstream data-integrity violation rather
    /// than bad caller input
    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::DuplicateParticipant | Self::MissingProfile)
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct EngineError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Challenge record the error relates to, when known
    pub challenge_id: Option<String>,
    /// Participant the error relates to, when known
    pub user_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl EngineError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            challenge_id: None,
            user_id: None,
            details: serde_json::Value::Null,
        }
    }

    /// Attach the challenge id this error relates to
    #[must_use]
    pub fn with_challenge_id(mut self, challenge_id: impl Into<String>) -> Self {
        self.challenge_id = Some(challenge_id.into());
        self
    }

    /// Attach the participant id this error relates to
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type EngineResult<T> = Result<T, EngineError>;

/// Serializable error report, the shape handed to the rendering layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<EngineError> for ErrorReport {
    fn from(error: EngineError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            challenge_id: error.challenge_id,
            user_id: error.user_id,
            details: error.details,
        }
    }
}

/// Convenience functions for creating common errors
impl EngineError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A record field required in the current lifecycle phase is absent
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("missing required field: {}", field.into()),
        )
    }

    /// A numeric field is outside its valid range
    pub fn out_of_range(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("{} out of range: {value}", field.into()),
        )
        .with_details(serde_json::json!({ "value": value.to_string() }))
    }

    /// More than one participant entry shares the same user id
    pub fn duplicate_participant(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self::new(
            ErrorCode::DuplicateParticipant,
            format!("participant {user_id} appears more than once"),
        )
        .with_user_id(user_id)
    }

    /// A participant id has no entry in the profile lookup
    pub fn missing_profile(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self::new(
            ErrorCode::MissingProfile,
            format!("no profile entry for participant {user_id}"),
        )
        .with_user_id(user_id)
    }

    /// A recognized but not yet implemented challenge kind
    pub fn unsupported_kind(kind: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::Unsupported,
            format!("challenge kind {kind} is not implemented"),
        )
    }

    /// Internal engine error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Conversion from `anyhow::Error` for callers composing with anyhow
impl From<anyhow::Error> for EngineError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::internal(error.to_string()).with_details(serde_json::json!({
                "source": source.to_string()
            })),
            None => Self::internal(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn test_error_code_description() {
        assert!(ErrorCode::InvalidInput.description().contains("invalid"));
        assert!(ErrorCode::DuplicateParticipant
            .description()
            .contains("more than once"));
    }

    #[test]
    fn test_integrity_violation_classification() {
        assert!(ErrorCode::DuplicateParticipant.is_integrity_violation());
        assert!(ErrorCode::MissingProfile.is_integrity_violation());
        assert!(!ErrorCode::InvalidInput.is_integrity_violation());
    }

    #[test]
    fn test_engine_error_creation() {
        let error = EngineError::duplicate_participant("u1").with_challenge_id("ch-9");

        assert_eq!(error.code, ErrorCode::DuplicateParticipant);
        assert_eq!(error.user_id.as_deref(), Some("u1"));
        assert_eq!(error.challenge_id.as_deref(), Some("ch-9"));
    }

    #[test]
    fn test_anyhow_conversion_maps_to_internal() {
        let chained = anyhow::Error::new(std::io::Error::other("disk gone"))
            .context("snapshot load failed");

        let error = EngineError::from(chained);
        assert_eq!(error.code, ErrorCode::InternalError);
        assert!(error.message.contains("snapshot load failed"));
        assert_eq!(error.details["source"], "disk gone");

        let plain = EngineError::from(anyhow::anyhow!("bare failure"));
        assert_eq!(plain.code, ErrorCode::InternalError);
        assert!(plain.details.is_null());
    }

    #[test]
    fn test_error_report_serialization() {
        let error = EngineError::out_of_range("target_days", 0);
        let report = ErrorReport::from(error);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("VALUE_OUT_OF_RANGE"));
        assert!(json.contains("target_days"));
    }
}
