//! # Provider
//!
//! Assembles the relying party's collaborators: the in-memory transient
//! store, the two oauth2-backed OIDC clients, and the verifier-service
//! client.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use dashmap::DashMap;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use verify_rp::provider::{
    OidcClient, OidcDirectory, StateStore, VerifierGateway, VerifierReply,
};
use verify_rp::{DemoVariant, State, VerifierClient};

use crate::config::{AppConfig, OidcClientConfig, VERIFIER_TOKEN};

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// The provider backing the HTTP surface.
#[derive(Clone)]
pub struct AppProvider {
    store: MemoryStore,
    standard: AuthCodeClient,
    waci: AuthCodeClient,
    verifier: VerifierClient,
}

impl AppProvider {
    /// Wire up the provider from configuration.
    ///
    /// # Errors
    ///
    /// Fails when a configured URL is invalid or the TLS bundle cannot be
    /// loaded.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = http_client(config)?;
        let token = config.request_tokens.get(VERIFIER_TOKEN).cloned();

        Ok(Self {
            store: MemoryStore::default(),
            standard: AuthCodeClient::new(&config.oidc.standard, http.clone())?,
            waci: AuthCodeClient::new(&config.oidc.waci, http.clone())?,
            verifier: VerifierClient::with_client(http, config.verifier.base_url.clone(), token),
        })
    }
}

fn http_client(config: &AppConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(path) = &config.verifier.ca_bundle {
        let pem = std::fs::read(path)
            .with_context(|| format!("reading CA bundle {}", path.display()))?;
        builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
    }
    Ok(builder.build()?)
}

impl StateStore for AppProvider {
    async fn put<T: Serialize + Sync>(&self, key: &str, state: &State<T>) -> Result<()> {
        self.store.put(key, &serde_json::to_vec(state)?)
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<State<T>>> {
        let Some(bytes) = self.store.get(key) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl OidcDirectory for AppProvider {
    type Client = AuthCodeClient;

    fn oidc_client(&self, variant: DemoVariant) -> &AuthCodeClient {
        match variant {
            DemoVariant::Standard => &self.standard,
            DemoVariant::Waci => &self.waci,
        }
    }
}

impl VerifierGateway for AppProvider {
    async fn post(&self, path: &str, payload: &Value) -> Result<VerifierReply> {
        self.verifier.post(path, payload).await
    }
}

/// An in-memory transient store. Suitable for a single-instance demo
/// deployment; swap for a shared store to run more than one replica.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    store: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.store.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.get(key).map(|bytes| bytes.to_vec())
    }
}

/// An OIDC authorization-code client backed by the `oauth2` crate. Identity
/// data is the userinfo document fetched with the exchanged access token.
#[derive(Clone)]
pub struct AuthCodeClient {
    oauth: ConfiguredClient,
    http: reqwest::Client,
    userinfo_url: String,
}

impl AuthCodeClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    ///
    /// Fails when a configured endpoint URL is invalid.
    pub fn new(config: &OidcClientConfig, http: reqwest::Client) -> Result<Self> {
        let oauth = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(config.auth_url.clone())?)
            .set_token_uri(TokenUrl::new(config.token_url.clone())?)
            .set_redirect_uri(RedirectUrl::new(config.callback_url.clone())?);

        Ok(Self { oauth, http, userinfo_url: config.userinfo_url.clone() })
    }
}

impl OidcClient for AuthCodeClient {
    async fn authorization_url(&self, state: &str, scope: &str) -> Result<String> {
        let state = CsrfToken::new(state.to_string());
        let (url, _) = self
            .oauth
            .authorize_url(move || state)
            .add_scope(Scope::new(scope.to_string()))
            .url();
        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<String> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .context("exchanging authorization code")?;

        let userinfo = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .context("fetching userinfo")?
            .error_for_status()?
            .text()
            .await?;

        Ok(userinfo)
    }
}
