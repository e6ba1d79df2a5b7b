//! Tests for the result renderer: template selection per outcome, output
//! escaping, and load failure reporting.

use std::fs;
use std::path::PathBuf;

use verify_rp::{CallbackResponse, Error, Renderer, VerificationOutcome, VerifyVpResponse};

fn renderer(test: &str) -> Renderer {
    let dir = std::env::temp_dir().join("verify-rp-render").join(test);
    fs::create_dir_all(&dir).expect("should create template dir");

    let vp = dir.join("vp.html");
    let didcomm = dir.join("didcomm_vp.html");
    fs::write(&vp, "<h1>{{ msg }}</h1><pre>{{ data }}</pre>").expect("should write template");
    fs::write(&didcomm, "<p>{{ flow_type }}</p><pre>{{ data }}</pre>")
        .expect("should write template");

    Renderer::new(vp, didcomm)
}

#[test]
fn success_page() {
    let response = VerifyVpResponse {
        outcome: VerificationOutcome::Verified,
        submitted: r#"{"type": "VerifiablePresentation"}"#.to_string(),
    };
    let html = renderer("success").verification(&response).expect("should render");

    assert!(html.contains("Successfully verified"));
    // quotes in the echoed payload are entity-encoded
    assert!(html.contains("VerifiablePresentation"));
    assert!(html.contains("&quot;type&quot;"));
}

#[test]
fn generic_failure_page() {
    let response = VerifyVpResponse {
        outcome: VerificationOutcome::Rejected("proof invalid".to_string()),
        submitted: "{}".to_string(),
    };
    let html = renderer("failure").verification(&response).expect("should render");

    assert!(html.contains("Oops verification is failed, Try again"));
    // the submitted payload is only echoed on success
    assert!(!html.contains("proof invalid"));
}

#[test]
fn revoked_page() {
    let response = VerifyVpResponse {
        outcome: VerificationOutcome::Revoked("status: Revoked".to_string()),
        submitted: "{}".to_string(),
    };
    let html = renderer("revoked").verification(&response).expect("should render");

    assert!(html.contains("Oops verification is failed. VC is revoked"));
}

#[test]
fn callback_page() {
    let response = CallbackResponse {
        data: r#"{"sub":"subject-1"}"#.to_string(),
        flow_type: "demo1".to_string(),
    };
    let html = renderer("callback").callback(&response).expect("should render");

    assert!(html.contains("demo1"));
    assert!(html.contains("subject-1"));
}

// Submitted payloads are caller-controlled text: markup must reach the page
// entity-encoded, never as live elements.
#[test]
fn escapes_markup() {
    let response = VerifyVpResponse {
        outcome: VerificationOutcome::Verified,
        submitted: "<script>alert(1)</script>".to_string(),
    };
    let html = renderer("escape").verification(&response).expect("should render");

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn missing_template() {
    let missing = PathBuf::from("/nonexistent/vp.html");
    let renderer = Renderer::new(missing.clone(), missing);

    let response = CallbackResponse { data: String::new(), flow_type: String::new() };
    let Err(Error::ServerError(msg)) = renderer.callback(&response) else {
        panic!("should fail to load");
    };
    assert!(msg.starts_with("unable to load html: "));
}
