use std::collections::HashMap;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dcm_api::clients::{ApiRequest, HttpMethod, PayloadFormat};
use dcm_api::{AccessKey, ApiClient, DcmConfig, Endpoint, SecretKey};

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let config = DcmConfig::builder()
        .access_key(AccessKey::new("test-access-key").unwrap())
        .secret_key(SecretKey::new("test-secret-key").unwrap())
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = ApiClient::new(config).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (mock_server, client) = setup().await;

    let body = json!({"launch": [{"name": "web-1"}]});
    Mock::given(method("POST"))
        .and(path("/infrastructure/Server"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(202).set_body_string(r#"{"jobs": [{"jobId": 1}]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::builder(HttpMethod::Post, "infrastructure/Server")
        .body(body)
        .build();
    let response = client.send(&request).await.unwrap();

    assert_eq!(response.code, 202);
    assert_eq!(response.body["jobs"][0]["jobId"], 1);
}

#[tokio::test]
async fn test_query_parameters_reach_the_wire() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Job"))
        .and(query_param("accountId", "16000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"jobs": []}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = HashMap::new();
    query.insert("accountId".to_string(), "16000".to_string());
    let request = ApiRequest::builder(HttpMethod::Get, "admin/Job")
        .query(query)
        .build();
    let response = client.send(&request).await.unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_accept_header_follows_payload_format() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Job"))
        .and(wiremock::matchers::header("Accept", "application/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<jobs/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::builder(HttpMethod::Get, "admin/Job")
        .format(PayloadFormat::Xml)
        .build();
    let response = client.send(&request).await.unwrap();

    assert_eq!(response.raw, "<jobs/>");
    assert_eq!(response.body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_missing_body_fails_before_the_network() {
    let (mock_server, client) = setup().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::builder(HttpMethod::Put, "infrastructure/Server/1").build();
    let result = client.send(&request).await;

    assert!(result.is_err());
}
