//! # Configuration
//!
//! Server configuration, layered from an optional `config/rp` file and
//! `RP_`-prefixed environment variables (with `__` separating nesting
//! levels) over built-in demo defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// The request-token key naming the verifier-service bearer token.
pub const VERIFIER_TOKEN: &str = "verifier";

/// Top-level server configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: String,

    /// Bearer tokens for outbound requests, keyed by collaborator.
    pub request_tokens: HashMap<String, String>,

    /// Verifier-service settings.
    pub verifier: VerifierConfig,

    /// The two configured OIDC clients.
    pub oidc: OidcConfig,

    /// HTML template locations.
    pub templates: TemplateConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            request_tokens: HashMap::new(),
            verifier: VerifierConfig::default(),
            oidc: OidcConfig::default(),
            templates: TemplateConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read or a value cannot be deserialized.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/rp").required(false))
            .add_source(Environment::with_prefix("RP").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Settings for the downstream verifier service.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Base URL verification calls are routed beneath.
    pub base_url: String,

    /// Optional PEM bundle of additional root certificates for the outbound
    /// TLS client.
    pub ca_bundle: Option<PathBuf>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8085".to_string(), ca_bundle: None }
    }
}

/// The two OIDC client configurations, selected by demo variant.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OidcConfig {
    /// The default client.
    pub standard: OidcClientConfig,

    /// The alternate client used for WACI demos.
    pub waci: OidcClientConfig,
}

/// Settings for one OIDC authorization-code client.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OidcClientConfig {
    /// Authorization endpoint.
    pub auth_url: String,

    /// Token endpoint.
    pub token_url: String,

    /// Userinfo endpoint, queried with the exchanged access token.
    pub userinfo_url: String,

    /// OAuth 2.0 client identifier.
    pub client_id: String,

    /// OAuth 2.0 client secret.
    pub client_secret: String,

    /// The redirect URI registered for this client.
    pub callback_url: String,
}

impl Default for OidcClientConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:9090/oauth2/auth".to_string(),
            token_url: "http://localhost:9090/oauth2/token".to_string(),
            userinfo_url: "http://localhost:9090/userinfo".to_string(),
            client_id: "rp-demo".to_string(),
            client_secret: "rp-demo-secret".to_string(),
            callback_url: "http://localhost:8080/oauth2/callback".to_string(),
        }
    }
}

/// Locations of the two HTML outcome templates.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// The verification result page.
    pub vp_html: PathBuf,

    /// The OIDC/DIDComm result page.
    pub didcomm_vp_html: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            vp_html: PathBuf::from("server/templates/vp.html"),
            didcomm_vp_html: PathBuf::from("server/templates/didcomm_vp.html"),
        }
    }
}
