use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postdeck::api::{ApiClient, ApiError, CreateScheduleRequest, PublishRequest};
use postdeck::model::{Platform, PostContent, ScheduleConfig};

fn schedule_request() -> CreateScheduleRequest {
    let mut schedule_config = ScheduleConfig::default();
    schedule_config.post_immediately = true;
    CreateScheduleRequest {
        subject: "Product launch announcement".to_string(),
        platforms: vec![Platform::Twitter, Platform::Linkedin],
        platform_configs: Vec::new(),
        media_urls: Vec::new(),
        schedule_config,
    }
}

#[tokio::test]
async fn create_schedule_posts_camel_case_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/schedules"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_partial_json(serde_json::json!({
            "subject": "Product launch announcement",
            "platforms": ["twitter", "linkedin"],
            "scheduleConfig": { "postImmediately": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sched-42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Some("secret-token".to_string()));
    let receipt = client.create_schedule(&schedule_request()).await.unwrap();

    assert_eq!(receipt.id, "sched-42");
}

#[tokio::test]
async fn backend_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/schedules"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "message": "Subject must be at least 10 characters"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), None);
    let err = client.create_schedule(&schedule_request()).await.unwrap_err();

    match err {
        ApiError::Backend { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Subject must be at least 10 characters");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/posts/publish"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), None);
    let request = PublishRequest {
        content: PostContent {
            title: "Hello".to_string(),
            body: "World".to_string(),
            media_urls: Vec::new(),
        },
        platforms: vec![Platform::Twitter],
        platform_configs: Vec::new(),
    };
    let err = client.publish_post(&request).await.unwrap_err();

    match err {
        ApiError::Backend { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_content_decodes_the_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/content/generate"))
        .and(body_partial_json(serde_json::json!({
            "subject": "Spring sale kickoff",
            "tone": "excited"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Spring Sale Kickoff",
            "body": "Our biggest sale of the year starts now."
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), None);
    let draft = client
        .generate_content("Spring sale kickoff", Some("excited"))
        .await
        .unwrap();

    assert_eq!(draft.title, "Spring Sale Kickoff");
    assert!(draft.body.contains("biggest sale"));
}

#[tokio::test]
async fn mock_client_needs_no_server() {
    let client = ApiClient::mock();

    let receipt = client.create_schedule(&schedule_request()).await.unwrap();
    assert_eq!(receipt.id, "sched-mock-1");

    let statuses = client.connected_platforms().await.unwrap();
    assert_eq!(statuses.len(), Platform::ALL.len());
    assert!(statuses.iter().all(|s| s.connected));
}
