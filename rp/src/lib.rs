//! An API for the relying-party edge of a credential-verification demo.
//!
//! The library accepts a Verifiable Credential or Presentation — directly,
//! or indirectly via an [OpenID Connect](https://openid.net/specs/openid-connect-core-1_0.html)
//! authorization-code redirect flow — forwards it to an external verifier
//! service, and prepares a human-readable result.
//!
//! Requests are routed to a handler per operation through [`handle`].
//! Implementers supply the external collaborators (transient state store,
//! OIDC clients, verifier service gateway) by implementing the traits in
//! [`provider`].

pub mod provider;

mod dispatch;
mod error;
mod generate;
mod handlers;
mod render;
mod state;
mod types;

pub use self::dispatch::VerifierClient;
pub use self::error::Error;
pub use self::handlers::*;
pub use self::render::Renderer;
pub use self::state::{Expire, State};
pub use self::types::*;
