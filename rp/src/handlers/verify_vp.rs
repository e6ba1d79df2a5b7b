//! # Verify VP Handler
//!
//! Form-based verification: the presentation arrives as raw text from a
//! submitted form. The classified outcome is returned together with the
//! submitted payload so the result renderer can echo it back on success.

use serde_json::Value;

use crate::dispatch;
use crate::error::invalid;
use crate::handlers::{Operation, Result};
use crate::provider::Provider;
use crate::types::{
    PresentationOptions, PresentationVerification, VerifyVpRequest, VerifyVpResponse,
};

async fn verify_vp(provider: &impl Provider, request: VerifyVpRequest) -> Result<VerifyVpResponse> {
    let presentation: Value =
        serde_json::from_str(&request.presentation).map_err(|e| invalid!("failed to verify: {e}"))?;

    let verification = PresentationVerification {
        presentation,
        options: PresentationOptions {
            checks: request.checks,
            challenge: request.challenge,
            domain: request.domain,
        },
    };

    let outcome = dispatch::presentations(provider, &verification)
        .await
        .map_err(|e| invalid!("failed to verify: {e}"))?;

    Ok(VerifyVpResponse { outcome, submitted: request.presentation })
}

impl<P: Provider> Operation<P> for VerifyVpRequest {
    type Reply = VerifyVpResponse;

    async fn execute(self, provider: &P) -> Result<VerifyVpResponse> {
        verify_vp(provider, self).await
    }
}
