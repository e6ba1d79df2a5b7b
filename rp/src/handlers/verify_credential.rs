//! # Verify Credential Handler
//!
//! JSON passthrough: forwards a credential to the verifier service and
//! reports the result.

use crate::dispatch;
use crate::error::invalid;
use crate::handlers::{Operation, Result};
use crate::provider::Provider;
use crate::types::{CredentialVerification, VerifyCredentialRequest, VerifyResponse};

async fn verify_credential(
    provider: &impl Provider, request: VerifyCredentialRequest,
) -> Result<VerifyResponse> {
    let verification = CredentialVerification::from(request);
    let outcome = dispatch::credentials(provider, &verification)
        .await
        .map_err(|e| invalid!("failed to verify vc: {e}"))?;

    if let Some(body) = outcome.failure_body() {
        return Err(invalid!("failed to verify credential: {body}"));
    }
    Ok(VerifyResponse)
}

impl<P: Provider> Operation<P> for VerifyCredentialRequest {
    type Reply = VerifyResponse;

    async fn execute(self, provider: &P) -> Result<VerifyResponse> {
        verify_credential(provider, self).await
    }
}
