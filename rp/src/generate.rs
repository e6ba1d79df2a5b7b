//! # Generate
//!
//! Generate opaque correlation tokens for the OIDC `state` parameter.

use uuid::Uuid;

/// Generates an unguessable `state` token correlating an authorization
/// request with its callback. Tokens must be unique per session.
#[must_use]
pub fn state_token() -> String {
    Uuid::new_v4().to_string()
}
