//! # HTTP Handlers
//!
//! Binds the route table to the library handlers: query and body decoding,
//! cookie plumbing, HTML rendering, and error-to-status mapping.
//!
//! JSON endpoints surface failures as a status plus plain-text body. The
//! browser-facing flows render an outcome page for business failures and
//! only return a raw status for transport- and decode-level failures.

use axum::Json;
use axum::extract::{Query, RawForm, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use verify_rp::{
    self as rp, Callback, CallbackRequest, CreateRequest, Error, FLOW_TYPE_COOKIE, Renderer,
    VerifyCredentialRequest, VerifyPresentationRequest, VerifyVpRequest,
};

use crate::provider::AppProvider;

/// Shared state for the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    /// The assembled provider.
    pub provider: AppProvider,

    /// The outcome-page renderer.
    pub renderer: Renderer,
}

/// `GET /oauth2/request` — begin an OIDC flow.
pub async fn create_request(
    State(state): State<AppState>, jar: CookieJar, Query(request): Query<CreateRequest>,
) -> Response {
    match rp::handle(request, &state.provider).await {
        Ok(response) => {
            let cookie = Cookie::build((FLOW_TYPE_COOKIE, response.flow_type.clone()))
                .path("/")
                .max_age(time::Duration::days(1))
                .build();
            (jar.add(cookie), Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// `GET /oauth2/callback` — the OIDC redirect target.
pub async fn callback(
    State(state): State<AppState>, jar: CookieJar, Query(request): Query<CallbackRequest>,
) -> Response {
    let callback = Callback {
        request,
        flow_type_cookie: jar.get(FLOW_TYPE_COOKIE).map(|cookie| cookie.value().to_string()),
    };

    match rp::handle(callback, &state.provider).await {
        Ok(response) => match state.renderer.callback(&response) {
            Ok(html) => Html(html).into_response(),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

/// `POST /verify/presentation` — JSON verification passthrough.
pub async fn verify_presentation(State(state): State<AppState>, body: String) -> Response {
    let request: VerifyPresentationRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return decode_failure(&e),
    };

    match rp::handle(request, &state.provider).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => error_response(&e),
    }
}

/// `POST /verify/credential` — JSON verification passthrough.
pub async fn verify_credential(State(state): State<AppState>, body: String) -> Response {
    let request: VerifyCredentialRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return decode_failure(&e),
    };

    match rp::handle(request, &state.provider).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => error_response(&e),
    }
}

/// Form fields submitted by the verification page.
#[derive(Deserialize)]
struct VerifyVpForm {
    #[serde(default, rename = "vpDataInput")]
    vp_data_input: String,

    #[serde(default)]
    checks: String,

    #[serde(default)]
    domain: String,

    #[serde(default)]
    challenge: String,
}

/// `POST /verifyPresentation` — form-based verification, rendered to HTML.
pub async fn verify_vp(State(state): State<AppState>, RawForm(form): RawForm) -> Response {
    let form: VerifyVpForm = match serde_urlencoded::from_bytes(&form) {
        Ok(form) => form,
        Err(e) => {
            let msg = format!("failed to parse form: {e}");
            tracing::error!("{msg}");
            return (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response();
        }
    };

    let request = VerifyVpRequest {
        presentation: form.vp_data_input,
        checks: form.checks.split(',').map(ToString::to_string).collect(),
        challenge: form.challenge,
        domain: form.domain,
    };

    match rp::handle(request, &state.provider).await {
        Ok(response) => match state.renderer.verification(&response) {
            Ok(html) => Html(html).into_response(),
            Err(e) => error_response(&e),
        },
        Err(e) => error_response(&e),
    }
}

fn decode_failure(err: &serde_json::Error) -> Response {
    let msg = format!("failed to decode request: {err}");
    tracing::error!("{msg}");
    (StatusCode::BAD_REQUEST, msg).into_response()
}

fn error_response(err: &Error) -> Response {
    tracing::error!("{err}");
    (err.status(), err.to_string()).into_response()
}
