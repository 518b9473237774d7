//! JSON request surface shared by the CLI and by embedding services.
//!
//! Validation happens here so the engine itself can assume well-formed
//! input. Missing `subject` or `sender` fields are rejected; empty strings
//! are accepted and classified normally.

use crate::engine::{ClassificationResult, EmailInput, ThreatClassifier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub subject: Option<String>,
    pub sender: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<String>,
}

/// Error body mirrored by HTTP front ends as a 400 response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn bad_request(details: impl Into<String>) -> Self {
        Self {
            error: "invalid request".to_string(),
            details: Some(details.into()),
        }
    }
}

impl ClassifyRequest {
    /// Validate the request into engine input. `content` may be omitted and
    /// defaults to empty; `subject` and `sender` must be present.
    pub fn into_input(self) -> Result<EmailInput, ApiError> {
        let subject = self
            .subject
            .ok_or_else(|| ApiError::bad_request("missing required field: subject"))?;
        let sender = self
            .sender
            .ok_or_else(|| ApiError::bad_request("missing required field: sender"))?;
        Ok(EmailInput {
            subject,
            sender,
            content: self.content.unwrap_or_default(),
            user_id: self.user_id,
        })
    }
}

pub fn parse_request(json: &str) -> Result<ClassifyRequest, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Full request path: parse errors and validation errors come back as the
/// same `ApiError` shape a front end would serialize.
pub async fn classify_request(
    classifier: &ThreatClassifier,
    request: ClassifyRequest,
) -> Result<ClassificationResult, ApiError> {
    let input = request.into_input()?;
    Ok(classifier.classify(&input).await)
}
