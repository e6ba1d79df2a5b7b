//! # Dispatch
//!
//! Builds verification requests in the shape the verifier service accepts,
//! sends them through the [`VerifierGateway`], and classifies the reply.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::provider::{VerifierGateway, VerifierReply};
use crate::types::{CredentialVerification, PresentationVerification, VerificationOutcome};

/// The verifier profile verification calls are routed to.
// TODO: make the profile configurable once the verifier page supports
// selecting one.
const VERIFIER_PROFILE: &str = "demo-verifier";

/// Send a presentation to the verifier service for verification.
pub(crate) async fn presentations(
    gateway: &impl VerifierGateway, request: &PresentationVerification,
) -> Result<VerificationOutcome> {
    let path = format!("/{VERIFIER_PROFILE}/verifier/presentations/verify");
    dispatch(gateway, &path, request).await
}

/// Send a credential to the verifier service for verification.
pub(crate) async fn credentials(
    gateway: &impl VerifierGateway, request: &CredentialVerification,
) -> Result<VerificationOutcome> {
    let path = format!("/{VERIFIER_PROFILE}/verifier/credentials/verify");
    dispatch(gateway, &path, request).await
}

async fn dispatch<T: Serialize>(
    gateway: &impl VerifierGateway, path: &str, request: &T,
) -> Result<VerificationOutcome> {
    let payload = serde_json::to_value(request).context("serializing verification request")?;
    let reply = gateway.post(path, &payload).await?;
    Ok(VerificationOutcome::classify(reply.status, &reply.body))
}

/// An HTTP client for the verifier service.
///
/// Requests are POSTed as JSON beneath the configured base URL, with a
/// bearer token attached when one is configured.
#[derive(Clone, Debug)]
pub struct VerifierClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl VerifierClient {
    /// Create a client for the verifier service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Create a client using a preconfigured `reqwest` client (for example,
    /// one carrying TLS settings).
    #[must_use]
    pub fn with_client(
        http: reqwest::Client, base_url: impl Into<String>, token: Option<String>,
    ) -> Self {
        Self { http, base_url: base_url.into(), token }
    }
}

impl VerifierGateway for VerifierClient {
    async fn post(&self, path: &str, payload: &Value) -> Result<VerifierReply> {
        let url = format!("{}{path}", self.base_url);
        tracing::info!("send http request: method=POST url={url}");

        let mut request = self.http.post(&url).json(payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.context("sending verification request")?;
        let status = response.status();
        let body = response.text().await.context("reading verification response")?;

        Ok(VerifierReply { status, body })
    }
}
