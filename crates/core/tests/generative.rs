use std::time::Duration;

use serde_json::json;
use tldw_core::{
    Backend, Error, GenerationConfig, MISSING_API_KEY, Provider, SummaryRequest, Transcript,
    TranscriptSegment, VideoId, summarize, summarize_generative,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn config(server: &MockServer, provider: Provider, api_key: &str) -> GenerationConfig {
    GenerationConfig {
        api_url: format!("{}/v1/chat/completions", server.uri()),
        timeout: Duration::from_secs(5),
        ..GenerationConfig::new(provider, api_key)
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

fn transcript() -> Transcript {
    Transcript {
        video_id: VideoId::new("dQw4w9WgXcQ"),
        language: "en".to_string(),
        segments: ["we're no strangers", "to love"]
            .into_iter()
            .map(|text| TranscriptSegment {
                text: text.to_string(),
                start: Duration::ZERO,
                duration: Duration::from_secs(1),
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_returns_message_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{ "role": "user", "content": "Summarize.\nhello" }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  A song.  ")))
        .expect(1)
        .mount(&server)
        .await;

    let summary = summarize_generative("Summarize.\nhello", &config(&server, Provider::Openai, "sk-test"))
        .await
        .unwrap();

    assert_eq!(summary, "A song.");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let err = summarize_generative("x", &config(&server, Provider::Gemini, MISSING_API_KEY))
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::Authentication { provider } if provider == "Gemini"), "{err}");
}

#[tokio::test]
async fn test_rate_limit_maps_to_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = summarize_generative("x", &config(&server, Provider::Openai, "sk-test"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Quota { .. }), "{err}");
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = summarize_generative("x", &config(&server, Provider::Openai, "sk-test"))
        .await
        .unwrap_err();

    assert!(
        matches!(&err, Error::Api { status: 503, body } if body == "overloaded"),
        "{err}"
    );
}

#[tokio::test]
async fn test_missing_content_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = summarize_generative("x", &config(&server, Provider::Openai, "sk-test"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidApiResponse { .. }), "{err}");
}

#[tokio::test]
async fn test_dispatch_builds_prompt_from_instruction_and_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "model": "gemini-1.5-flash",
            "messages": [{
                "role": "user",
                "content": "Give me one line.\nwe're no strangers to love",
            }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Love song.")))
        .expect(1)
        .mount(&server)
        .await;

    let request = SummaryRequest::new("Give me one line.", transcript());
    let summary = summarize(
        Backend::Gemini,
        &request,
        Some(&config(&server, Provider::Gemini, "key")),
    )
    .await
    .unwrap();

    assert_eq!(summary, "Love song.");
}

#[tokio::test]
async fn test_dispatch_rejects_mismatched_provider_config() {
    let server = MockServer::start().await;
    let request = SummaryRequest::new("x", transcript());

    let err = summarize(
        Backend::ChatGpt,
        &request,
        Some(&config(&server, Provider::Gemini, "key")),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Config { .. }), "{err}");
}
