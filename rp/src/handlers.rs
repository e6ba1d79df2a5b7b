//! # Endpoint
//!
//! `handle` provides the entry point for the relying-party API. Each
//! operation is a typed request executed against the provider's
//! collaborators, producing a reply the HTTP layer serializes to JSON or
//! hands to the result renderer.

mod callback;
mod create_request;
mod verify_credential;
mod verify_presentation;
mod verify_vp;

use std::fmt::Debug;

use tracing::instrument;

pub use crate::error::Error;
use crate::provider::Provider;
use crate::types::CallbackRequest;

/// Result type for relying-party operations.
pub type Result<T, E = Error> = anyhow::Result<T, E>;

/// A relying-party operation: a typed request processed against the
/// provider's collaborators.
///
/// The relying party serves a single hardcoded verifier profile, so
/// operations carry no tenant or owner — the provider supplies everything
/// beyond the request itself.
pub trait Operation<P>: Send {
    /// The reply produced when the operation succeeds.
    type Reply;

    /// Execute the operation.
    fn execute(self, provider: &P) -> impl Future<Output = Result<Self::Reply>> + Send;
}

/// Handle an incoming relying-party request.
///
/// # Errors
///
/// This method can fail for a number of reasons related to the incoming
/// message's viability. Expected failures include malformed caller input,
/// a rejection from the downstream verifier, and failures of the server's
/// own collaborators (transient store, OIDC clients, templates).
///
/// Implementers should look to the Error type and description for more
/// information on the reason for failure.
#[instrument(level = "debug", skip(provider))]
pub async fn handle<P, O>(request: O, provider: &P) -> Result<O::Reply>
where
    P: Provider,
    O: Operation<P> + Debug,
{
    request.execute(provider).await
}

/// The callback operation's full input: the redirect's query parameters
/// plus the flow-type cookie value, when one accompanied the request.
#[derive(Clone, Debug)]
pub struct Callback {
    /// The redirect query parameters.
    pub request: CallbackRequest,

    /// The flow-type cookie value.
    pub flow_type_cookie: Option<String>,
}
