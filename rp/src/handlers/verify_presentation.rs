//! # Verify Presentation Handler
//!
//! JSON passthrough: forwards a presentation to the verifier service and
//! reports the result. A verifier rejection is surfaced with the verifier's
//! own response body so callers can inspect the reason.

use crate::dispatch;
use crate::error::invalid;
use crate::handlers::{Operation, Result};
use crate::provider::Provider;
use crate::types::{PresentationVerification, VerifyPresentationRequest, VerifyResponse};

async fn verify_presentation(
    provider: &impl Provider, request: VerifyPresentationRequest,
) -> Result<VerifyResponse> {
    let verification = PresentationVerification::from(request);
    let outcome = dispatch::presentations(provider, &verification)
        .await
        .map_err(|e| invalid!("failed to verify vp: {e}"))?;

    if let Some(body) = outcome.failure_body() {
        return Err(invalid!("failed to verify presentation: {body}"));
    }
    Ok(VerifyResponse)
}

impl<P: Provider> Operation<P> for VerifyPresentationRequest {
    type Reply = VerifyResponse;

    async fn execute(self, provider: &P) -> Result<VerifyResponse> {
        verify_presentation(provider, self).await
    }
}
