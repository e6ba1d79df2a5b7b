//! # Scripted OIDC Client

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use verify_rp::provider::OidcClient;

/// The authorization code the scripted client refuses to exchange.
pub const BAD_CODE: &str = "expired-code";

/// A scripted OIDC client: fabricates authorization URLs and identity data,
/// recording every code exchange so tests can assert which client a session
/// used.
#[derive(Clone, Debug)]
pub struct MockOidc {
    client_id: String,
    exchanges: Arc<Mutex<Vec<String>>>,
}

impl MockOidc {
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), exchanges: Arc::new(Mutex::new(Vec::new())) }
    }

    /// The authorization codes exchanged through this client, in order.
    #[must_use]
    pub fn exchanges(&self) -> Vec<String> {
        self.exchanges.lock().unwrap().clone()
    }
}

impl OidcClient for MockOidc {
    async fn authorization_url(&self, state: &str, scope: &str) -> Result<String> {
        Ok(format!(
            "https://oidc.example.com/authorize?client_id={}&scope={scope}&state={state}",
            self.client_id
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<String> {
        self.exchanges.lock().unwrap().push(code.to_string());
        if code == BAD_CODE {
            return Err(anyhow!("token endpoint returned invalid_grant"));
        }
        Ok(format!(r#"{{"sub":"subject-1","aud":"{}"}}"#, self.client_id))
    }
}
