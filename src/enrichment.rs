//! Optional remote enrichment signal.
//!
//! The decision engine may consult an external inference service for a second
//! opinion on the spam probability. The call carries a hard timeout and every
//! failure path falls back to the local heuristics; enrichment is never a
//! single point of failure and never suppresses a local detection.

use crate::engine::EmailInput;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_ms: 2_000,
        }
    }
}

/// Pluggable enrichment collaborator.
#[async_trait]
pub trait Enrichment: Send + Sync {
    /// Remote spam probability in [0, 1] for the given email.
    async fn spam_probability(&self, input: &EmailInput) -> Result<f64>;
}

#[derive(Serialize)]
struct EnrichmentRequest<'a> {
    subject: &'a str,
    sender: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct EnrichmentResponse {
    spam_probability: f64,
}

/// HTTP client for a remote classification service speaking the simple
/// `{subject, sender, content} -> {spam_probability}` contract.
pub struct RemoteEnrichment {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RemoteEnrichment {
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| anyhow!("enrichment enabled without an endpoint"))?;
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build enrichment HTTP client")?;
        Ok(Self {
            endpoint,
            timeout,
            client,
        })
    }
}

#[async_trait]
impl Enrichment for RemoteEnrichment {
    async fn spam_probability(&self, input: &EmailInput) -> Result<f64> {
        let request = EnrichmentRequest {
            subject: &input.subject,
            sender: &input.sender,
            content: &input.content,
        };

        // The client timeout covers the request itself; the outer timeout
        // bounds the whole exchange including connection setup retries.
        let response = tokio::time::timeout(
            self.timeout,
            self.client.post(&self.endpoint).json(&request).send(),
        )
        .await
        .context("enrichment request timed out")?
        .context("enrichment request failed")?;

        let body: EnrichmentResponse = response
            .error_for_status()
            .context("enrichment service returned an error status")?
            .json()
            .await
            .context("enrichment response was not valid JSON")?;

        Ok(body.spam_probability.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_enrichment_requires_endpoint() {
        let config = EnrichmentConfig {
            enabled: true,
            endpoint: None,
            timeout_ms: 500,
        };
        assert!(RemoteEnrichment::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_reports_error() {
        let config = EnrichmentConfig {
            enabled: true,
            endpoint: Some("http://127.0.0.1:1/classify".to_string()),
            timeout_ms: 200,
        };
        let enrichment = RemoteEnrichment::new(&config).unwrap();
        let input = EmailInput {
            subject: "hello".into(),
            sender: "a@b.com".into(),
            content: String::new(),
            user_id: None,
        };
        assert!(enrichment.spam_probability(&input).await.is_err());
    }
}
