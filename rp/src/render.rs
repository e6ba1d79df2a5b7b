//! # Render
//!
//! Maps a verification outcome or resolved callback onto one of the two
//! configured HTML templates. Template files are read per render so a load
//! failure is reported before any outcome page is produced.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{Environment, context};

use crate::error::server;
use crate::handlers::Result;
use crate::types::{CallbackResponse, VerificationOutcome, VerifyVpResponse};

/// Renders verification outcomes to HTML.
#[derive(Clone, Debug)]
pub struct Renderer {
    vp_html: PathBuf,
    didcomm_vp_html: PathBuf,
}

impl Renderer {
    /// Create a renderer over the verification result template and the
    /// OIDC/DIDComm result template.
    pub fn new(vp_html: impl Into<PathBuf>, didcomm_vp_html: impl Into<PathBuf>) -> Self {
        Self { vp_html: vp_html.into(), didcomm_vp_html: didcomm_vp_html.into() }
    }

    /// Render the result page for a form-based verification.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServerError` if the template cannot be loaded or
    /// rendered.
    pub fn verification(&self, response: &VerifyVpResponse) -> Result<String> {
        let (msg, data) = match &response.outcome {
            VerificationOutcome::Verified => ("Successfully verified", response.submitted.as_str()),
            VerificationOutcome::Rejected(_) => ("Oops verification is failed, Try again", ""),
            VerificationOutcome::Revoked(_) => ("Oops verification is failed. VC is revoked", ""),
        };
        render(&self.vp_html, msg, data, "")
    }

    /// Render the result page for a resolved OIDC callback.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServerError` if the template cannot be loaded or
    /// rendered.
    pub fn callback(&self, response: &CallbackResponse) -> Result<String> {
        render(&self.didcomm_vp_html, "", &response.data, &response.flow_type)
    }
}

fn render(template: &Path, msg: &str, data: &str, flow_type: &str) -> Result<String> {
    let source = fs::read_to_string(template).map_err(|e| server!("unable to load html: {e}"))?;

    // the .html template name switches on HTML auto-escaping; `data` carries
    // caller-submitted text and userinfo bodies
    Environment::new()
        .render_named_str("result.html", &source, context! { msg, data, flow_type })
        .map_err(|e| server!("failed to execute html template: {e}"))
}
