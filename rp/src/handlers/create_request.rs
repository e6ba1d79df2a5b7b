//! # Create Request Handler
//!
//! This endpoint begins an [RFC6749](https://www.rfc-editor.org/rfc/rfc6749.html)
//! Authorization Request flow: it prepares the authorization redirect the
//! browser should follow and records the session so the matching callback
//! can be correlated.

use chrono::Utc;

use crate::error::{invalid, server};
use crate::generate;
use crate::handlers::{Operation, Result};
use crate::provider::{OidcClient, OidcDirectory, Provider, StateStore};
use crate::state::{Expire, State};
use crate::types::{CreateRequest, CreateResponse, DemoVariant};

/// Begin an OIDC flow: mint a `state` token, build the authorization
/// redirect with the client selected by the demo-variant tag, and persist
/// the variant against the token for the matching callback.
async fn create_request(
    provider: &impl Provider, request: CreateRequest,
) -> Result<CreateResponse> {
    if request.scope.is_empty() {
        return Err(invalid!("missing scope"));
    }
    if request.flow_type.is_empty() {
        return Err(invalid!("missing flow type"));
    }

    let variant = DemoVariant::from_tag(&request.demo_type);
    let state_token = generate::state_token();

    let redirect_url = provider
        .oidc_client(variant)
        .authorization_url(&state_token, &request.scope)
        .await
        .map_err(|e| server!("failed to create oidc request: {e}"))?;

    // the redirect must not reach the caller unless the session is recorded
    let state = State { body: variant, expires_at: Utc::now() + Expire::Session.duration() };
    StateStore::put(provider, &state_token, &state)
        .await
        .map_err(|e| server!("failed to write state to transient store: {e}"))?;

    Ok(CreateResponse { request: redirect_url, flow_type: request.flow_type })
}

impl<P: Provider> Operation<P> for CreateRequest {
    type Reply = CreateResponse;

    async fn execute(self, provider: &P) -> Result<CreateResponse> {
        create_request(provider, self).await
    }
}
