//! Tests for the OIDC redirect flow: authorization-request creation, state
//! correlation, and callback resolution.

use chrono::{TimeDelta, Utc};
use test_utils::{BAD_CODE, Rp};
use verify_rp::provider::StateStore;
use verify_rp::{
    Callback, CallbackRequest, CreateRequest, DemoVariant, Error, Expire, State, handle,
};

fn create(scope: &str, flow: &str, demo: &str) -> CreateRequest {
    CreateRequest {
        scope: scope.to_string(),
        flow_type: flow.to_string(),
        demo_type: demo.to_string(),
    }
}

fn callback(state: &str, code: &str, flow_type: Option<&str>) -> Callback {
    Callback {
        request: CallbackRequest { state: state.to_string(), code: code.to_string() },
        flow_type_cookie: flow_type.map(ToString::to_string),
    }
}

// A created authorization request stores the session so the matching
// callback selects the same demo variant's client.
#[tokio::test]
async fn waci_round_trip() {
    let provider = Rp::new();

    // --------------------------------------------------
    // The browser begins a WACI demo flow
    // --------------------------------------------------
    let response =
        handle(create("openid", "demo1", "waci"), &provider).await.expect("should create request");

    assert_eq!(response.flow_type, "demo1");
    assert!(response.request.contains("client_id=waci-client"));
    assert!(response.request.contains("scope=openid"));

    // the redirect carries the minted state token
    let (_, state_token) =
        response.request.split_once("&state=").expect("redirect should carry state");

    // --------------------------------------------------
    // The provider redirects back with an authorization code
    // --------------------------------------------------
    let response = handle(callback(state_token, "auth-code", Some("demo1")), &provider)
        .await
        .expect("should resolve callback");

    assert_eq!(response.flow_type, "demo1");
    assert_eq!(response.data, r#"{"sub":"subject-1","aud":"waci-client"}"#);
    assert_eq!(provider.client(DemoVariant::Waci).exchanges(), ["auth-code"]);
    assert!(provider.client(DemoVariant::Standard).exchanges().is_empty());
}

// Any demo-type tag other than the alternate one selects the default client.
#[tokio::test]
async fn default_variant() {
    let provider = Rp::new();

    let response =
        handle(create("openid", "demo2", ""), &provider).await.expect("should create request");
    assert!(response.request.contains("client_id=standard-client"));

    let (_, state_token) =
        response.request.split_once("&state=").expect("redirect should carry state");

    let response = handle(callback(state_token, "auth-code", None), &provider)
        .await
        .expect("should resolve callback");

    assert_eq!(response.data, r#"{"sub":"subject-1","aud":"standard-client"}"#);
    // no cookie accompanied the callback
    assert_eq!(response.flow_type, "");
}

#[tokio::test]
async fn missing_scope() {
    let provider = Rp::new();

    let Err(Error::InvalidRequest(msg)) = handle(create("", "demo1", ""), &provider).await else {
        panic!("should be invalid");
    };
    assert_eq!(msg, "missing scope");
}

#[tokio::test]
async fn missing_flow_type() {
    let provider = Rp::new();

    let Err(Error::InvalidRequest(msg)) = handle(create("openid", "", ""), &provider).await else {
        panic!("should be invalid");
    };
    assert_eq!(msg, "missing flow type");
}

// An unknown state token renders as invalid and never reaches a client.
#[tokio::test]
async fn unknown_state() {
    let provider = Rp::new();

    let response = handle(callback("no-such-session", "auth-code", None), &provider)
        .await
        .expect("should resolve to a failure page");

    assert_eq!(response.data, "invalid state parameter");
    assert_eq!(response.flow_type, "");
    assert_eq!(provider.exchange_count(), 0);
}

// Missing redirect parameters render as failures, not HTTP errors.
#[tokio::test]
async fn missing_parameters() {
    let provider = Rp::new();

    let response =
        handle(callback("", "auth-code", None), &provider).await.expect("should resolve");
    assert_eq!(response.data, "missing state");

    let response = handle(callback("session", "", None), &provider).await.expect("should resolve");
    assert_eq!(response.data, "missing code");

    assert_eq!(provider.exchange_count(), 0);
}

// The store entry is not consumed by a callback: a replayed callback
// succeeds again within the expiry window.
#[tokio::test]
async fn replayed_callback() {
    let provider = Rp::new();

    let response =
        handle(create("openid", "demo1", ""), &provider).await.expect("should create request");
    let (_, state_token) =
        response.request.split_once("&state=").expect("redirect should carry state");

    for _ in 0..2 {
        let response = handle(callback(state_token, "auth-code", Some("demo1")), &provider)
            .await
            .expect("should resolve callback");
        assert_eq!(response.data, r#"{"sub":"subject-1","aud":"standard-client"}"#);
    }

    assert_eq!(provider.exchange_count(), 2);
}

// An expired session behaves like an absent one.
#[tokio::test]
async fn expired_state() {
    let provider = Rp::new();

    let stale = State {
        body: DemoVariant::Waci,
        expires_at: Utc::now() - TimeDelta::try_minutes(5).expect("should convert"),
    };
    StateStore::put(&provider, "stale-token", &stale).await.expect("should store");

    let response = handle(callback("stale-token", "auth-code", None), &provider)
        .await
        .expect("should resolve");

    assert_eq!(response.data, "invalid state parameter");
    assert_eq!(provider.exchange_count(), 0);
}

// Sessions outlive their creation long enough for the round trip.
#[tokio::test]
async fn session_expiry_window() {
    assert_eq!(Expire::Session.duration(), TimeDelta::try_hours(24).expect("should convert"));
}

// A store failure while recording the session keeps the redirect from the
// caller.
#[tokio::test]
async fn store_failure_on_create() {
    let provider = Rp::new();
    provider.break_store();

    let Err(Error::ServerError(msg)) = handle(create("openid", "demo1", ""), &provider).await
    else {
        panic!("should be a server error");
    };
    assert_eq!(msg, "failed to write state to transient store: store unavailable");
}

// A store failure during lookup renders the error text.
#[tokio::test]
async fn store_failure_on_callback() {
    let provider = Rp::new();
    provider.break_store();

    let response =
        handle(callback("session", "auth-code", None), &provider).await.expect("should resolve");

    assert_eq!(response.data, "failed to query transient store for state: store unavailable");
    assert_eq!(provider.exchange_count(), 0);
}

// A failed code exchange renders the client's error.
#[tokio::test]
async fn failed_exchange() {
    let provider = Rp::new();

    let response =
        handle(create("openid", "demo1", ""), &provider).await.expect("should create request");
    let (_, state_token) =
        response.request.split_once("&state=").expect("redirect should carry state");

    let response = handle(callback(state_token, BAD_CODE, Some("demo1")), &provider)
        .await
        .expect("should resolve");

    assert_eq!(
        response.data,
        "failed to handle oidc callback: token endpoint returned invalid_grant"
    );
    assert_eq!(response.flow_type, "");
}
