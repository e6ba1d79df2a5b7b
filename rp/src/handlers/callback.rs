//! # Callback Handler
//!
//! This endpoint is where the browser **redirects** to once the OIDC
//! provider has resolved the authorization request. The `state` parameter
//! correlates the redirect with a previously created session; the `code` is
//! exchanged for verified identity data by the client that session used.
//!
//! Business failures resolve to a renderable failure page rather than an
//! error: the callback is a user-facing browser redirect, so failures must
//! render, not surface as a bare HTTP status.

use crate::handlers::{Callback, Operation, Result};
use crate::provider::{OidcClient, OidcDirectory, Provider, StateStore};
use crate::types::{CallbackRequest, CallbackResponse, DemoVariant};

/// Resolve an OIDC callback into identity data or a failure message.
async fn callback(
    provider: &impl Provider, request: CallbackRequest, flow_type_cookie: Option<String>,
) -> Result<CallbackResponse> {
    if request.state.is_empty() {
        tracing::error!("missing state");
        return Ok(CallbackResponse::failed("missing state"));
    }
    if request.code.is_empty() {
        tracing::error!("missing code");
        return Ok(CallbackResponse::failed("missing code"));
    }

    // an unknown (or expired) token never triggers a code exchange
    let state = match StateStore::get::<DemoVariant>(provider, &request.state).await {
        Ok(Some(state)) if !state.is_expired() => state,
        Ok(_) => {
            tracing::error!("invalid state parameter");
            return Ok(CallbackResponse::failed("invalid state parameter"));
        }
        Err(e) => {
            tracing::error!("failed to query transient store for state: {e}");
            return Ok(CallbackResponse::failed(format!(
                "failed to query transient store for state: {e}"
            )));
        }
    };

    let data = match provider.oidc_client(state.body).exchange_code(&request.code).await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("failed to handle oidc callback: {e}");
            return Ok(CallbackResponse::failed(format!("failed to handle oidc callback: {e}")));
        }
    };

    Ok(CallbackResponse { data, flow_type: flow_type_cookie.unwrap_or_default() })
}

impl<P: Provider> Operation<P> for Callback {
    type Reply = CallbackResponse;

    async fn execute(self, provider: &P) -> Result<CallbackResponse> {
        callback(provider, self.request, self.flow_type_cookie).await
    }
}
