//! # Provider Traits
//!
//! This module defines the `Provider` trait and its associated traits, which
//! are implemented by library users to supply the external collaborators of
//! the relying party: the transient state store, the two configured OIDC
//! clients, and the downstream verifier service.

use std::future::Future;

use anyhow::Result;
use http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::State;
use crate::types::DemoVariant;

/// Relying-party Provider trait.
pub trait Provider: StateStore + OidcDirectory + VerifierGateway + Clone {}

/// A blanket implementation for `Provider` trait so that any type implementing
/// the required super traits is considered a `Provider`.
impl<T> Provider for T where T: StateStore + OidcDirectory + VerifierGateway + Clone {}

/// `StateStore` is used to store and retrieve server state between requests.
///
/// Keys are opaque, single-use correlation tokens; no two in-flight sessions
/// share a key. Entries are retained until they expire, so a key may be read
/// more than once.
pub trait StateStore: Send + Sync {
    /// Store state using the provided key.
    fn put<T: Serialize + Sync>(
        &self, key: &str, state: &State<T>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Retrieve data using the provided key, returning `None` when no entry
    /// exists. Backend failures are returned as errors.
    fn get<T: DeserializeOwned>(
        &self, key: &str,
    ) -> impl Future<Output = Result<Option<State<T>>>> + Send;
}

/// An OIDC client capable of driving an authorization-code flow: building
/// the authorization redirect and exchanging the returned code for verified
/// identity data.
///
/// Token validation is the client's concern; the relying party treats it as
/// a black box.
pub trait OidcClient: Send + Sync {
    /// Build an authorization URL carrying the supplied `state` and `scope`.
    fn authorization_url(
        &self, state: &str, scope: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Exchange an authorization code for identity data, returned as a JSON
    /// document.
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<String>> + Send;
}

/// `OidcDirectory` selects between the configured OIDC client instances by
/// demo variant.
pub trait OidcDirectory: Send + Sync {
    /// The concrete client type held by this directory.
    type Client: OidcClient;

    /// The client instance serving the given demo variant.
    fn oidc_client(&self, variant: DemoVariant) -> &Self::Client;
}

/// The reply returned by the verifier service for a verification call.
#[derive(Clone, Debug)]
pub struct VerifierReply {
    /// The HTTP status of the reply.
    pub status: StatusCode,

    /// The reply body.
    pub body: String,
}

/// `VerifierGateway` carries a prepared verification call to the verifier
/// service.
///
/// An `Err` indicates a transport-level failure; a reply with a non-success
/// status is returned as `Ok` so callers can classify it.
pub trait VerifierGateway: Send + Sync {
    /// POST the JSON payload to the given verifier endpoint path, returning
    /// the response status and body.
    fn post(
        &self, path: &str, payload: &serde_json::Value,
    ) -> impl Future<Output = Result<VerifierReply>> + Send;
}
