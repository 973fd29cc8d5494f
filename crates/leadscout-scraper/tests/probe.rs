//! Integration tests for the liveness prober.
//!
//! Uses `wiremock` so no real network traffic is made. Covers the HEAD
//! happy path, the 405→GET fallback, the ≥400 cutoff, transport failures,
//! timeouts, and the auth-status policy knob.

use std::time::Duration;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadscout_scraper::{is_broken, probe_client, ProbePolicy};

fn test_client(timeout_secs: u64) -> reqwest::Client {
    probe_client(timeout_secs, "leadscout-test/0.1").expect("failed to build probe client")
}

#[tokio::test]
async fn head_success_is_live() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let broken = is_broken(&test_client(5), &server.uri(), &ProbePolicy::default()).await;
    assert!(!broken);
}

#[tokio::test]
async fn head_405_falls_back_to_get_success() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let broken = is_broken(&test_client(5), &server.uri(), &ProbePolicy::default()).await;
    assert!(!broken);
}

#[tokio::test]
async fn head_404_is_broken_without_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    // A GET would panic the mock server's strict expectations if issued.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let broken = is_broken(&test_client(5), &server.uri(), &ProbePolicy::default()).await;
    assert!(broken);
}

#[tokio::test]
async fn head_405_then_get_500_is_broken() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let broken = is_broken(&test_client(5), &server.uri(), &ProbePolicy::default()).await;
    assert!(broken);
}

#[tokio::test]
async fn unreachable_host_is_broken() {
    // Nothing listens here; both HEAD and the GET fallback fail to connect.
    let broken = is_broken(
        &test_client(2),
        "http://127.0.0.1:9",
        &ProbePolicy::default(),
    )
    .await;
    assert!(broken);
}

#[tokio::test]
async fn slow_responses_time_out_as_broken() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let broken = is_broken(&test_client(1), &server.uri(), &ProbePolicy::default()).await;
    assert!(broken);
}

#[tokio::test]
async fn forbidden_is_broken_under_default_policy() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let broken = is_broken(&test_client(5), &server.uri(), &ProbePolicy::default()).await;
    assert!(broken);
}

#[tokio::test]
async fn forbidden_is_live_when_auth_policy_is_lenient() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let policy = ProbePolicy {
        treat_auth_as_broken: false,
    };
    let broken = is_broken(&test_client(5), &server.uri(), &policy).await;
    assert!(!broken);
}
