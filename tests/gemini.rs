//! `GeminiClient` against a local mock of the `generateContent` endpoint.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pdf_extract_gateway::{
    FailureCause, Field, GeminiClient, ModelClient, Schema, ServiceConfig,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PDF: &[u8] = b"%PDF-1.7 fake";
const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    let config = ServiceConfig::builder()
        .api_key("test-key")
        .base_url(format!("{}/v1beta/", server.uri()))
        .build()
        .unwrap();
    GeminiClient::new(&config).unwrap()
}

fn volumes_schema() -> Schema {
    Schema::object([
        Field::required("volume", Schema::number().non_negative()),
        Field::required("unit", Schema::string().default_value_of("MMBTU")),
    ])
}

fn reply_with_text(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 1290, "candidatesTokenCount": 12, "totalTokenCount": 1302}
    }))
}

#[tokio::test]
async fn sends_pdf_inline_with_schema_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(reply_with_text(r#"{"volume": 42.5}"#))
        .expect(1)
        .mount(&server)
        .await;

    let out = client(&server)
        .generate_structured(PDF, "extract the volume", &volumes_schema())
        .await
        .unwrap();
    assert_eq!(out, json!({"volume": 42.5, "unit": "MMBTU"}));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "extract the volume");
    let inline = &body["contents"][0]["parts"][0]["inlineData"];
    assert_eq!(inline["mimeType"], "application/pdf");
    assert_eq!(inline["data"], STANDARD.encode(PDF));

    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert_eq!(config["responseSchema"]["properties"]["volume"]["type"], "NUMBER");
    assert!(config.get("temperature").is_none());
}

#[tokio::test]
async fn fenced_output_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply_with_text("Here you go:\n```json\n{\"volume\": 7}\n```"))
        .mount(&server)
        .await;

    let out = client(&server)
        .generate_structured(PDF, "p", &volumes_schema())
        .await
        .unwrap();
    assert_eq!(out["volume"], 7);
}

#[tokio::test]
async fn error_status_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_structured(PDF, "p", &volumes_schema())
        .await
        .unwrap_err();
    assert!(matches!(err.cause, FailureCause::Transport(_)));
    assert!(err.message.contains("429"), "got: {}", err.message);
    assert!(err.message.contains("RESOURCE_EXHAUSTED"), "got: {}", err.message);
}

#[tokio::test]
async fn unreachable_provider_is_transport_failure() {
    let server = MockServer::start().await;
    let client = client(&server);
    drop(server);

    let err = client
        .generate_structured(PDF, "p", &volumes_schema())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn prose_only_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply_with_text("I could not find a volume in this document."))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_structured(PDF, "p", &volumes_schema())
        .await
        .unwrap_err();
    assert!(matches!(err.cause, FailureCause::Decode(_)));
}

#[tokio::test]
async fn no_candidates_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "OTHER"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_structured(PDF, "p", &volumes_schema())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "decode");
    assert!(err.message.contains("OTHER"));
}

#[tokio::test]
async fn schema_violation_lists_every_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply_with_text(r#"{"volume": -3, "unit": 5}"#))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_structured(PDF, "p", &volumes_schema())
        .await
        .unwrap_err();
    match err.cause {
        FailureCause::Validation(v) => {
            let paths: Vec<&str> = v.issues.iter().map(|i| i.path.as_str()).collect();
            assert_eq!(paths, ["$.volume", "$.unit"]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}
