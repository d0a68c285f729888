use std::time::Duration;

use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dcm_api::rest::resources::{Account, Job, Server, WaitOptions};
use dcm_api::rest::{Entity, ResourceError, RestResource};
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
async fn test_all_decodes_collection() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Account"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"accounts": [{"accountId": 12345, "name": "x"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let accounts = Account::all(&client).await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].account_id, Some(12345));
    assert_eq!(accounts[0].name.as_deref(), Some("x"));
}

#[tokio::test]
async fn test_requests_carry_signing_headers() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Account"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"accounts": []}"#))
        .mount(&mock_server)
        .await;

    Account::all(&client).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let header = |name: &str| {
        requests[0]
            .headers
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, values)| values.last().as_str().to_string())
    };

    assert_eq!(header("x-esauth-access").as_deref(), Some("test-access-key"));
    assert_eq!(header("x-es-details").as_deref(), Some("extended"));
    assert!(header("x-esauth-timestamp").is_some());
    assert!(header("x-esauth-signature").is_some());
    assert!(header("user-agent").is_some());
}

#[tokio::test]
async fn test_delete_202_stores_job_id() {
    let (mock_server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/infrastructure/Server/9"))
        .and(query_param("reason", "no reason provided"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string(r#"{"jobs": [{"jobId": 777}]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(9);
    let job_id = server.destroy(&client, None).await.unwrap();

    assert_eq!(job_id, Some(777));
    assert_eq!(server.resource().current_job(), Some(777));
    assert!(server.resource().last_error().is_none());
}

#[tokio::test]
async fn test_delete_204_succeeds_without_job() {
    let (mock_server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/infrastructure/Server/10"))
        .and(query_param("reason", "decommissioned"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(10);
    let job_id = server.destroy(&client, Some("decommissioned")).await.unwrap();

    assert_eq!(job_id, None);
    assert_eq!(server.resource().current_job(), None);
}

#[tokio::test]
async fn test_failure_status_sets_last_error() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Account/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"error": {"message": "not found"}}"#),
        )
        .mount(&mock_server)
        .await;

    let mut account = Entity::<Account>::from_id(99);
    let result = account.load(&client).await;

    match result {
        Err(ResourceError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(account.resource().last_error(), Some("not found"));
    assert!(!account.resource().is_loaded());
}

#[tokio::test]
async fn test_launch_validation_makes_no_network_call() {
    let (mock_server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(0);
    server.server_id = None;
    server.set_name("web-1");

    let result = server.launch(&client).await;

    assert!(matches!(
        result,
        Err(ResourceError::MissingAttributes { .. })
    ));
}

#[tokio::test]
async fn test_update_with_no_pending_changes_skips_network() {
    let (mock_server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(9);
    server.update(&client).await.unwrap();
}

#[tokio::test]
async fn test_update_submits_consumed_changes() {
    let (mock_server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/infrastructure/Server/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(9);
    server.set_name("web-2");
    server.update(&client).await.unwrap();

    // consumed, so a second update has nothing to send
    assert!(server.resource().pending_changes().is_empty());
    server.update(&client).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["describeServer"][0]["name"], "web-2");
}

#[tokio::test]
async fn test_stop_submits_reason_payload() {
    let (mock_server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/infrastructure/Server/9"))
        .and(wiremock::matchers::body_json(
            serde_json::json!({"stop": [{"reason": "maintenance"}]}),
        ))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string(r#"{"jobs": [{"jobId": 801}]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(9);
    server.status = Some("RUNNING".to_string());

    let job_id = server.stop(&client, Some("maintenance")).await.unwrap();

    assert_eq!(job_id, Some(801));
}

#[tokio::test]
async fn test_stop_rejects_non_running_server() {
    let (mock_server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(9);
    server.status = Some("STOPPED".to_string());

    let result = server.stop(&client, None).await;

    assert!(matches!(result, Err(ResourceError::State { .. })));
}

#[tokio::test]
async fn test_reload_follows_provisioning_job() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/infrastructure/Server"))
        .and(wiremock::matchers::body_json(serde_json::json!({
            "launch": [{
                "name": "web-1",
                "description": "web tier",
                "budget": 100,
                "productId": "m1.small",
                "machineImage": {"machineImageId": 22},
                "dataCenter": {"dataCenterId": 4}
            }]
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string(r#"{"jobs": [{"jobId": 900}]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/Job/900"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobs": [{"jobId": 900, "status": "COMPLETE", "message": "31"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/infrastructure/Server/31"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"servers": [{"serverId": 31, "name": "web-1", "status": "RUNNING"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut server = Entity::new(Server::default());
    server.name = Some("web-1".to_string());
    server.description = Some("web tier".to_string());
    server.budget = Some(100);
    server.provider_product_id = Some("m1.small".to_string());
    server.machine_image = Some(serde_json::json!({"machine_image_id": 22}));
    server.data_center = Some(serde_json::json!({"data_center_id": 4}));

    let job_id = server.launch(&client).await.unwrap();
    assert_eq!(job_id, Some(900));
    assert_eq!(server.server_id, None);

    let options = WaitOptions {
        target: "COMPLETE".to_string(),
        interval: Duration::ZERO,
        max_attempts: 5,
    };
    server.reload(&client, options).await.unwrap();

    assert_eq!(server.server_id, Some(31));
    assert_eq!(server.status.as_deref(), Some("RUNNING"));
}

#[tokio::test]
async fn test_job_polling_stops_at_terminal_status() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Job/777"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobs": [{"jobId": 777, "status": "RUNNING"}]}"#,
        ))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/Job/777"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobs": [{"jobId": 777, "status": "COMPLETE", "message": "done"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = WaitOptions {
        target: "COMPLETE".to_string(),
        interval: Duration::ZERO,
        max_attempts: 10,
    };
    let job = Job::wait_for(&client, 777, options).await.unwrap();

    assert_eq!(job.status.as_deref(), Some("COMPLETE"));
    assert_eq!(job.message.as_deref(), Some("done"));

    // exactly 3 polls: the terminal status is not re-fetched
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_job_polling_gives_up_after_max_attempts() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Job/778"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobs": [{"jobId": 778, "status": "RUNNING"}]}"#,
        ))
        .expect(3)
        .mount(&mock_server)
        .await;

    let options = WaitOptions {
        target: "COMPLETE".to_string(),
        interval: Duration::ZERO,
        max_attempts: 3,
    };
    let result = Job::wait_for(&client, 778, options).await;

    assert!(matches!(
        result,
        Err(ResourceError::PollTimeout { job_id: 778, attempts: 3 })
    ));
}

#[tokio::test]
async fn test_job_polling_surfaces_error_status() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Job/779"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobs": [{"jobId": 779, "status": "ERROR", "message": "quota exceeded"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = WaitOptions {
        target: "COMPLETE".to_string(),
        interval: Duration::ZERO,
        max_attempts: 10,
    };
    let result = Job::wait_for(&client, 779, options).await;

    match result {
        Err(ResourceError::State { message }) => {
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("expected State error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_load_rejects_undeclared_response_key() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/Job/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobs": [{"jobId": 5, "progress": 50}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let mut job = Entity::<Job>::from_id(5);
    let result = job.load(&client).await;

    match result {
        Err(ResourceError::UnknownAttribute { resource, key }) => {
            assert_eq!(resource, "Job");
            assert_eq!(key, "progress");
        }
        other => panic!("expected UnknownAttribute, got {other:?}"),
    }
}

#[tokio::test]
async fn test_load_populates_attributes_and_marks_loaded() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/infrastructure/Server/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"servers": [{"serverId": 9, "name": "web-1", "status": "RUNNING", "budget": 100}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut server = Entity::<Server>::from_id(9);
    assert!(!server.resource().is_loaded());
    assert_eq!(server.name, None);

    server.load(&client).await.unwrap();

    assert!(server.resource().is_loaded());
    assert_eq!(server.name.as_deref(), Some("web-1"));
    assert_eq!(server.budget, Some(100));

    // already loaded, so no second fetch
    server.load_if_needed(&client).await.unwrap();
}
