use pretty_assertions::assert_eq;
use serde_json::json;
use tutor_engine::{
    ChatTurn, CompletionFailureKind, CompletionRequestBody, CompletionService, CompletionSettings,
    ReqwestCompletionService, TurnRole, WireMessage,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> CompletionSettings {
    CompletionSettings {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        model: "tutor-test".to_string(),
        system_prompt: "Be helpful.".to_string(),
        temperature: 0.5,
        max_tokens: 256,
    }
}

fn turns() -> Vec<ChatTurn> {
    vec![
        ChatTurn {
            role: TurnRole::Assistant,
            content: "Hello! How can I help?".to_string(),
        },
        ChatTurn {
            role: TurnRole::User,
            content: "What is 2+2?".to_string(),
        },
    ]
}

#[tokio::test]
async fn posts_history_and_returns_completion_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "It is **4**." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ReqwestCompletionService::new(settings_for(&server)).expect("client");
    let reply = service.complete(&turns(), "sk-test").await.expect("reply");
    assert_eq!(reply, "It is **4**.");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: CompletionRequestBody =
        serde_json::from_slice(&requests[0].body).expect("json request body");
    assert_eq!(
        body,
        CompletionRequestBody {
            model: "tutor-test".to_string(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: "Be helpful.".to_string(),
                },
                WireMessage {
                    role: "assistant".to_string(),
                    content: "Hello! How can I help?".to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: "What is 2+2?".to_string(),
                },
            ],
            temperature: 0.5,
            max_tokens: 256,
        }
    );
}

#[tokio::test]
async fn non_success_status_surfaces_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let service = ReqwestCompletionService::new(settings_for(&server)).expect("client");
    let err = service.complete(&turns(), "bad").await.unwrap_err();
    assert_eq!(err.kind, CompletionFailureKind::HttpStatus(401));
    assert_eq!(err.message, "Incorrect API key provided");
}

#[tokio::test]
async fn non_success_without_json_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let service = ReqwestCompletionService::new(settings_for(&server)).expect("client");
    let err = service.complete(&turns(), "sk-test").await.unwrap_err();
    assert_eq!(err.kind, CompletionFailureKind::HttpStatus(502));
    assert!(err.message.contains("502"), "message was {:?}", err.message);
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let service = ReqwestCompletionService::new(settings_for(&server)).expect("client");
    let err = service.complete(&turns(), "sk-test").await.unwrap_err();
    assert_eq!(err.kind, CompletionFailureKind::Malformed);
}

#[tokio::test]
async fn empty_choices_are_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let service = ReqwestCompletionService::new(settings_for(&server)).expect("client");
    let err = service.complete(&turns(), "sk-test").await.unwrap_err();
    assert_eq!(err.kind, CompletionFailureKind::Malformed);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_failure() {
    let settings = CompletionSettings {
        endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        ..CompletionSettings::default()
    };
    let service = ReqwestCompletionService::new(settings).expect("client");
    let err = service.complete(&turns(), "sk-test").await.unwrap_err();
    assert_eq!(err.kind, CompletionFailureKind::Network);
}
