//! Shared API request/response types
//!
//! Wire shapes of `POST /api/convert` and its error body. Request parsing is
//! done by hand over a `serde_json::Value` rather than a derived struct so
//! that every malformed body maps onto one of the two [`InputError`]
//! messages instead of a framework rejection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::audience::Audience;

// ========================================
// Request Types
// ========================================

/// Rejected conversion input
///
/// The `Display` text is the exact message returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// Body is not JSON, not an object, or has no string `text` field
    #[error("No text provided")]
    MissingText,

    /// `text` is empty after trimming
    #[error("Text is empty")]
    EmptyText,
}

/// Validated conversion request
///
/// # Examples
///
/// ```
/// use biztone_common::api::types::ConversionRequest;
/// use biztone_common::Audience;
///
/// let request = ConversionRequest::from_json_bytes(r#"{"text": "  내일 회의 취소  "}"#.as_bytes()).unwrap();
/// assert_eq!(request.text(), "내일 회의 취소");
/// assert_eq!(request.target(), Audience::Boss);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    text: String,
    target: Audience,
}

impl ConversionRequest {
    /// Build a request from raw text, trimming it
    pub fn new(text: &str, target: Audience) -> Result<Self, InputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyText);
        }

        Ok(Self {
            text: trimmed.to_string(),
            target,
        })
    }

    /// Parse and validate a JSON request body
    pub fn from_json_bytes(body: &[u8]) -> Result<Self, InputError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| InputError::MissingText)?;
        Self::from_json(&value)
    }

    /// Validate an already-parsed JSON body
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let object = value.as_object().ok_or(InputError::MissingText)?;

        let text = object
            .get("text")
            .and_then(Value::as_str)
            .ok_or(InputError::MissingText)?;

        Self::new(text, Audience::from_target(object.get("target")))
    }

    /// Trimmed input text (never empty)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized target audience
    pub fn target(&self) -> Audience {
        self.target
    }
}

// ========================================
// Response Types
// ========================================

/// Provenance of a converted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionSource {
    /// Produced by the hosted completion service
    #[serde(rename = "external-api")]
    ExternalApi,
    /// Produced by the static local templates
    #[serde(rename = "local-fallback")]
    LocalFallback,
}

/// Successful conversion body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Trimmed input text
    pub original: String,
    /// Rewritten text
    pub converted: String,
    /// Normalized audience
    pub target: Audience,
    /// Which path produced `converted`
    pub source: ConversionSource,
}

/// Error body for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-facing message
    pub error: String,
}
