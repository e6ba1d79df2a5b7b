//! # Types
//!
//! Request/response types for the relying-party API, plus the outbound
//! request shapes understood by the verifier service.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The name of the cookie carrying the caller-supplied flow label between
/// the authorization request and its callback.
pub const FLOW_TYPE_COOKIE: &str = "flowType";

/// The demo-variant tag selecting the alternate (WACI) OIDC client.
const WACI_DEMO_TYPE: &str = "waci";

/// Marker substring identifying a revoked credential in the verifier's
/// free-text failure body. Matching is case-sensitive.
const REVOKED_MARKER: &str = "Revoked";

/// Selects which of the two configured OIDC client setups handles a session.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DemoVariant {
    /// The default OIDC client.
    #[default]
    Standard,

    /// The alternate client used for WACI demos.
    Waci,
}

impl DemoVariant {
    /// Map a caller-supplied demo-type tag to a variant. Any tag other than
    /// the designated alternate tag (including an empty one) selects the
    /// default client.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == WACI_DEMO_TYPE { Self::Waci } else { Self::Standard }
    }
}

/// The result of dispatching a credential or presentation to the verifier
/// service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The verifier service accepted the submission.
    Verified,

    /// The verifier service rejected the submission, with its response body.
    Rejected(String),

    /// The rejection identified a revoked credential. The verifier's body is
    /// retained so passthrough endpoints can forward it unmodified.
    Revoked(String),
}

impl VerificationOutcome {
    /// Classify a verifier-service reply. Any 200 reply is a pass; a failure
    /// body naming a revoked credential takes precedence over a generic
    /// rejection.
    #[must_use]
    pub fn classify(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::OK {
            Self::Verified
        } else if body.contains(REVOKED_MARKER) {
            Self::Revoked(body.to_string())
        } else {
            Self::Rejected(body.to_string())
        }
    }

    /// The verifier's failure body, if the submission was not accepted.
    #[must_use]
    pub fn failure_body(&self) -> Option<&str> {
        match self {
            Self::Verified => None,
            Self::Rejected(body) | Self::Revoked(body) => Some(body),
        }
    }
}

/// A request to begin an OIDC authorization flow.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateRequest {
    /// The OIDC scope to request.
    pub scope: String,

    /// Caller-supplied flow label, echoed back in the response and carried
    /// in the flow-type cookie.
    #[serde(rename = "flow")]
    pub flow_type: String,

    /// Demo-variant tag selecting the OIDC client.
    #[serde(rename = "demoType")]
    pub demo_type: String,
}

/// The response to a [`CreateRequest`]: the authorization redirect plus the
/// echoed flow label.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateResponse {
    /// The authorization URL to redirect the browser to.
    pub request: String,

    /// The caller-supplied flow label.
    #[serde(rename = "flowType")]
    pub flow_type: String,
}

/// The OIDC redirect callback: `state` correlates with a previously created
/// authorization request, `code` is exchanged for identity data.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CallbackRequest {
    /// The `state` token minted when the authorization request was created.
    pub state: String,

    /// The authorization code to exchange.
    pub code: String,
}

/// The resolved callback: either the exchanged identity data or a failure
/// message, ready for the result page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackResponse {
    /// Identity data on success, or the failure message.
    pub data: String,

    /// The flow label read from the flow-type cookie; empty on failure paths.
    pub flow_type: String,
}

impl CallbackResponse {
    /// A failed callback, rendered with an empty flow type.
    #[must_use]
    pub fn failed(msg: impl Into<String>) -> Self {
        Self { data: msg.into(), flow_type: String::new() }
    }
}

/// A JSON request to verify a Verifiable Presentation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyPresentationRequest {
    /// The presentation to verify.
    pub vp: Value,

    /// The checks the verifier should perform (for example `proof`,
    /// `credentialStatus`).
    pub checks: Vec<String>,

    /// The challenge the presentation's proof is expected to carry.
    pub challenge: String,

    /// The domain the presentation's proof is expected to carry.
    pub domain: String,
}

/// A JSON request to verify a Verifiable Credential.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyCredentialRequest {
    /// The credential to verify.
    pub vc: Value,

    /// The checks the verifier should perform.
    pub checks: Vec<String>,
}

/// The (empty) response to a successful JSON verification passthrough.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyResponse;

/// A form-submitted request to verify a Verifiable Presentation and render
/// the outcome as HTML.
#[derive(Clone, Debug, Default)]
pub struct VerifyVpRequest {
    /// The submitted presentation, as raw text from the form.
    pub presentation: String,

    /// The checks the verifier should perform.
    pub checks: Vec<String>,

    /// The expected proof challenge.
    pub challenge: String,

    /// The expected proof domain.
    pub domain: String,
}

/// The outcome of a form-based verification, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyVpResponse {
    /// The classified verifier outcome.
    pub outcome: VerificationOutcome,

    /// The submitted presentation text, echoed back on the success page.
    pub submitted: String,
}

/// A presentation-verification request in the shape the verifier service
/// accepts.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PresentationVerification {
    /// The presentation under verification.
    #[serde(rename = "verifiablePresentation")]
    pub presentation: Value,

    /// Verification options.
    pub options: PresentationOptions,
}

/// Options accompanying a presentation-verification request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PresentationOptions {
    /// The checks to perform.
    pub checks: Vec<String>,

    /// The expected proof challenge.
    pub challenge: String,

    /// The expected proof domain.
    pub domain: String,
}

impl From<VerifyPresentationRequest> for PresentationVerification {
    fn from(request: VerifyPresentationRequest) -> Self {
        Self {
            presentation: request.vp,
            options: PresentationOptions {
                checks: request.checks,
                challenge: request.challenge,
                domain: request.domain,
            },
        }
    }
}

/// A credential-verification request in the shape the verifier service
/// accepts.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialVerification {
    /// The credential under verification.
    #[serde(rename = "verifiableCredential")]
    pub credential: Value,

    /// Verification options.
    pub options: CredentialOptions,
}

/// Options accompanying a credential-verification request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CredentialOptions {
    /// The checks to perform.
    pub checks: Vec<String>,
}

impl From<VerifyCredentialRequest> for CredentialVerification {
    fn from(request: VerifyCredentialRequest) -> Self {
        Self {
            credential: request.vc,
            options: CredentialOptions { checks: request.checks },
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn classify_ok() {
        let outcome = VerificationOutcome::classify(StatusCode::OK, "");
        assert_eq!(outcome, VerificationOutcome::Verified);
    }

    #[test]
    fn classify_revoked() {
        let body = r#"{"errMessage": "credential status: Revoked"}"#;
        let outcome = VerificationOutcome::classify(StatusCode::BAD_REQUEST, body);
        assert_eq!(outcome, VerificationOutcome::Revoked(body.to_string()));
    }

    // The marker scan is case-sensitive: a lowercase mention is a generic
    // rejection.
    #[test]
    fn classify_case_sensitive() {
        let body = "credential has been revoked";
        let outcome = VerificationOutcome::classify(StatusCode::BAD_REQUEST, body);
        assert_eq!(outcome, VerificationOutcome::Rejected(body.to_string()));
    }

    #[test]
    fn variant_from_tag() {
        assert_eq!(DemoVariant::from_tag("waci"), DemoVariant::Waci);
        assert_eq!(DemoVariant::from_tag(""), DemoVariant::Standard);
        assert_eq!(DemoVariant::from_tag("WACI"), DemoVariant::Standard);
    }

    #[test]
    fn presentation_wire_shape() {
        let request = VerifyPresentationRequest {
            vp: json!({"@context": ["https://www.w3.org/2018/credentials/v1"]}),
            checks: vec!["proof".to_string()],
            challenge: "ch".to_string(),
            domain: "example.com".to_string(),
        };
        let verification = PresentationVerification::from(request);
        let value = serde_json::to_value(&verification).unwrap();

        assert!(value.get("verifiablePresentation").is_some());
        assert_eq!(value["options"]["challenge"], "ch");
        assert_eq!(value["options"]["domain"], "example.com");
    }
}
