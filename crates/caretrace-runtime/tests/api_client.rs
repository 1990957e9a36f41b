use caretrace_engine::EventFilter;
use caretrace_runtime::{CareTrace, Config, Error};
use caretrace_testing::fixtures;
use caretrace_types::{Agent, DepressionLevel, RiskLevel, SessionRef, StepStatus};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOKEN: &str = "test-token";

fn workspace(server: &MockServer) -> CareTrace {
    let config = Config {
        api_base: server.uri(),
        token: Some(TOKEN.to_string()),
        timeout_secs: 5,
        ..Config::default()
    };
    CareTrace::with_config(config).unwrap()
}

fn no_authorization(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

async fn mock_roster_sources(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/blissme/all-preferences"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "preferences": { "users": [
                { "userID": 1, "nickname": "amal", "virtualCharacter": "owl", "inputMode": "text" },
                { "userID": 2, "nickname": "binu" },
                { "userID": 3, "nickname": "chathu" }
            ]}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/levelDetection/all-users-latest-index"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "userID": 1, "R_value": 0.734, "level": "Severe", "createdAt": "2025-03-01T10:00:00",
                  "components": { "classifier": { "emotion": "sad" } } },
                { "userID": 2, "R_value": 0.2, "level": "Minimal", "createdAt": "2025-03-01T11:00:00" }
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/phq9/last-session/1"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "sessionID": "abc", "answeredCount": 9
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/phq9/last-session/2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctorlevel/comments"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [ { "userID": 1, "level": "Severe", "comment": "Refer" } ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_events_api_is_called_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monitor-agent/get-session-events"))
        .and(query_param("user_id", "7"))
        .and(query_param("session_id", "42"))
        .and(no_authorization)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::events_document(&fixtures::assessment_in_progress())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let projection = workspace(&server)
        .progress()
        .load(&SessionRef::new(7, 42))
        .await
        .unwrap();

    let assessment = projection.agent(Agent::Assessment).unwrap();
    assert_eq!(assessment.event_count, 5);
    assert_eq!(assessment.stages[2].status, StepStatus::Process);
    assert_eq!(projection.focus, Some(Agent::Assessment));
}

#[tokio::test]
async fn test_monitor_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monitor-agent/get-session-events"))
        .and(query_param("user_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "timestamp": "2025-03-01T10:00:00", "agent_name": "chat", "risk_level": "high" },
            { "timestamp": "2025-03-01T10:01:00", "agent_name": "chat" }
        ])))
        .mount(&server)
        .await;

    let report = workspace(&server)
        .monitor()
        .load(7, None, &EventFilter::new().risk(RiskLevel::High))
        .await
        .unwrap();

    assert_eq!(report.summary.total, 1);
    assert_eq!(report.summary.risk.high, 1);
}

#[tokio::test]
async fn test_odd_typed_fields_still_project() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monitor-agent/get-session-events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [
            { "timestamp": "2025-03-01T10:00:00", "agent_name": "chat", "user_id": 7,
              "session_id": 42, "phq9_questionID": 1 },
            { "timestamp": "2025-03-01T10:01:00", "agent_name": "chat", "user_id": 7,
              "session_id": 42, "phq9_questionID": 2, "phq9_completed": "true", "risk_level": 3 }
        ]})))
        .mount(&server)
        .await;

    let projection = workspace(&server)
        .progress()
        .load(&SessionRef::new(7, 42))
        .await
        .unwrap();

    let assessment = projection.agent(Agent::Assessment).unwrap();
    assert_eq!(assessment.event_count, 2);
    assert_eq!(assessment.stages[2].status, StepStatus::Finish);
    assert_eq!(assessment.stages[2].children.len(), 2);
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monitor-agent/get-session-events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = workspace(&server)
        .progress()
        .load(&SessionRef::new(7, 42))
        .await
        .unwrap_err();

    assert!(err.is_network());
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_roster_merges_sources_and_tolerates_failed_lookup() {
    let server = MockServer::start().await;
    mock_roster_sources(&server).await;

    let report = workspace(&server).patients().roster().await.unwrap();
    let roster = report.roster;

    assert!(report.warnings.is_empty());
    assert_eq!(roster.patients.len(), 3);

    let amal = roster.patient(1).unwrap();
    assert_eq!(amal.level, Some(DepressionLevel::Severe));
    assert_eq!(amal.r_percent(), Some(73));
    assert_eq!(amal.emotion.as_deref(), Some("sad"));
    assert_eq!(amal.last_session_id.as_deref(), Some("abc"));
    assert!(!amal.can_annotate());

    let binu = roster.patient(2).unwrap();
    assert_eq!(binu.level, Some(DepressionLevel::Pending));
    assert!(!binu.can_annotate());

    let chathu = roster.patient(3).unwrap();
    assert_eq!(chathu.level, None);
    assert!(chathu.can_annotate());

    assert_eq!(roster.counts.total, 3);
    assert_eq!(roster.counts.severe, 1);
    assert_eq!(roster.counts.pending, 1);
}

#[tokio::test]
async fn test_annotation_is_posted() {
    let server = MockServer::start().await;
    mock_roster_sources(&server).await;

    Mock::given(method("POST"))
        .and(path("/doctorlevel/comments"))
        .and(bearer_token(TOKEN))
        .and(body_json(json!({ "userID": 3, "comment": "Check in weekly", "level": "Moderate" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let body = workspace(&server)
        .patients()
        .annotate(3, "moderate", "Check in weekly")
        .await
        .unwrap();

    assert_eq!(body.level, "Moderate");
}

#[tokio::test]
async fn test_rejected_annotation_is_never_posted() {
    let server = MockServer::start().await;
    mock_roster_sources(&server).await;

    Mock::given(method("POST"))
        .and(path("/doctorlevel/comments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = workspace(&server)
        .patients()
        .annotate(2, "Severe", "note")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidOperation(_)));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_level_index_failure_degrades_to_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blissme/all-preferences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "preferences": { "users": [ { "userID": 1, "nickname": "amal" } ] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/levelDetection/all-users-latest-index"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doctorlevel/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let report = workspace(&server).patients().roster().await.unwrap();
    assert_eq!(report.roster.patients.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Level index"));
}
