//! Test providers for the relying-party API.

mod oidc;
mod store;

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use verify_rp::provider::{OidcDirectory, StateStore, VerifierGateway, VerifierReply};
use verify_rp::{DemoVariant, State};

pub use crate::oidc::{BAD_CODE, MockOidc};
pub use crate::store::Mockstore;

/// The reply the stub verifier returns, or a transport-failure reason.
type StubReply = Result<(StatusCode, String), String>;

/// A relying-party provider wired to in-memory fakes: a mock transient
/// store, two scripted OIDC clients, and a programmable verifier stub.
#[derive(Clone)]
pub struct Rp {
    store: Mockstore,
    standard: MockOidc,
    waci: MockOidc,
    reply: Arc<Mutex<StubReply>>,
    posts: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Rp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Mockstore::new(),
            standard: MockOidc::new("standard-client"),
            waci: MockOidc::new("waci-client"),
            reply: Arc::new(Mutex::new(Ok((StatusCode::OK, String::new())))),
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The verification calls the stub verifier received, as (path, payload)
    /// pairs.
    #[must_use]
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    /// Program the stub verifier's reply.
    pub fn verifier_replies(&self, status: StatusCode, body: impl Into<String>) {
        *self.reply.lock().unwrap() = Ok((status, body.into()));
    }

    /// Make the stub verifier fail at the transport level.
    pub fn verifier_unreachable(&self, reason: impl Into<String>) {
        *self.reply.lock().unwrap() = Err(reason.into());
    }

    /// Make the transient store fail on every operation.
    pub fn break_store(&self) {
        self.store.break_store();
    }

    /// The scripted client serving the given demo variant.
    #[must_use]
    pub fn client(&self, variant: DemoVariant) -> &MockOidc {
        match variant {
            DemoVariant::Standard => &self.standard,
            DemoVariant::Waci => &self.waci,
        }
    }

    /// Total code exchanges across both clients.
    #[must_use]
    pub fn exchange_count(&self) -> usize {
        self.standard.exchanges().len() + self.waci.exchanges().len()
    }
}

impl Default for Rp {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for Rp {
    async fn put<T: Serialize + Sync>(&self, key: &str, state: &State<T>) -> Result<()> {
        self.store.put(key, &serde_json::to_vec(state)?)
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<State<T>>> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl OidcDirectory for Rp {
    type Client = MockOidc;

    fn oidc_client(&self, variant: DemoVariant) -> &MockOidc {
        self.client(variant)
    }
}

impl VerifierGateway for Rp {
    async fn post(&self, path: &str, payload: &Value) -> Result<VerifierReply> {
        self.posts.lock().unwrap().push((path.to_string(), payload.clone()));
        match self.reply.lock().unwrap().clone() {
            Ok((status, body)) => Ok(VerifierReply { status, body }),
            Err(reason) => Err(anyhow!(reason)),
        }
    }
}
