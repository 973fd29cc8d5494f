//! Integration tests for `LeadStoreClient::upsert_leads`.
//!
//! Uses `wiremock` to stand in for the store's REST endpoint and asserts on
//! the wire shape: conflict target, prefer header, body, and the
//! written-row count parsed from the echoed representation.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadscout_core::{Lead, NEW_STATUS};
use leadscout_store::{LeadStoreClient, StoreError};

fn test_client(base_url: &str) -> LeadStoreClient {
    LeadStoreClient::new(base_url, "test-key", 5).expect("failed to build store client")
}

fn sample_lead(name: &str) -> Lead {
    Lead {
        name: name.to_string(),
        rating: 3.2,
        address: "Hill Road, Bandra West".to_string(),
        website: None,
        phone: "098200 12345".to_string(),
        note: None,
        city: "Mumbai".to_string(),
        specialty: Some("Dentist".to_string()),
        status: NEW_STATUS.to_string(),
    }
}

#[tokio::test]
async fn upsert_sends_conflict_directive_and_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .and(query_param("on_conflict", "name"))
        .and(headers(
            "Prefer",
            vec!["resolution=ignore-duplicates", "return=representation"],
        ))
        .and(header("apikey", "test-key"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!([{"name": "Smile Dental Studio"}])))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([{"name": "Smile Dental Studio"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let written = test_client(&server.uri())
        .upsert_leads(&[sample_lead("Smile Dental Studio")])
        .await
        .expect("upsert succeeds");
    assert_eq!(written, 1);
}

#[tokio::test]
async fn duplicate_submission_reports_zero_written() {
    let server = MockServer::start().await;

    // Under ignore-duplicates the store echoes only the rows it inserted;
    // an all-conflict batch comes back as an empty array.
    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let written = test_client(&server.uri())
        .upsert_leads(&[sample_lead("Smile Dental Studio")])
        .await
        .expect("upsert succeeds");
    assert_eq!(written, 0);
}

#[tokio::test]
async fn partial_conflict_counts_only_new_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"name": "New Clinic"}])))
        .mount(&server)
        .await;

    let leads = [sample_lead("Existing Clinic"), sample_lead("New Clinic")];
    let written = test_client(&server.uri())
        .upsert_leads(&leads)
        .await
        .expect("upsert succeeds");
    assert_eq!(written, 1);
}

#[tokio::test]
async fn empty_batch_short_circuits_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let written = test_client(&server.uri())
        .upsert_leads(&[])
        .await
        .expect("empty upsert succeeds");
    assert_eq!(written, 0);
}

#[tokio::test]
async fn non_2xx_response_is_a_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .upsert_leads(&[sample_lead("Smile Dental Studio")])
        .await;
    assert!(
        matches!(
            result,
            Err(StoreError::UnexpectedStatus { status: 401, ref body }) if body == "invalid api key"
        ),
        "expected UnexpectedStatus, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_representation_is_a_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .upsert_leads(&[sample_lead("Smile Dental Studio")])
        .await;
    assert!(
        matches!(result, Err(StoreError::MalformedResponse { .. })),
        "expected MalformedResponse, got: {result:?}"
    );
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"name": "X"}])))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let written = test_client(&base)
        .upsert_leads(&[sample_lead("X")])
        .await
        .expect("upsert succeeds");
    assert_eq!(written, 1);
}
