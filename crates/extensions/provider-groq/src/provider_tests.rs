use super::*;
use replyforge_protocols::ChatMessage;

fn chat_request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You draft replies."),
        ChatMessage::user("Reply to this."),
    ])
}

#[test]
fn test_provider_id() {
    let provider = GroqProvider::new();
    assert_eq!(provider.id(), "groq");
}

#[test]
fn test_default_options() {
    let provider = GroqProvider::new();
    let options = provider.options();
    assert_eq!(options.api_url, DEFAULT_API_URL);
    assert_eq!(options.model, DEFAULT_MODEL);
    assert_eq!(options.max_tokens, 150);
}

#[test]
fn test_custom_url() {
    let provider = GroqProvider::with_url("https://custom.api/v1");
    assert_eq!(provider.options().api_url, "https://custom.api/v1");
    assert_eq!(provider.options().model, DEFAULT_MODEL);
}

#[test]
fn test_build_request_uses_options() {
    let provider = GroqProvider::with_options(GroqOptions {
        model: "llama-3.1-8b-instant".to_string(),
        temperature: 0.2,
        ..GroqOptions::default()
    });
    let api_request = provider.build_request(&chat_request());
    assert_eq!(api_request.model, "llama-3.1-8b-instant");
    assert_eq!(api_request.temperature, 0.2);
    assert_eq!(api_request.messages.len(), 2);
    assert_eq!(api_request.messages[0].role, "system");
}

mod http_tests {
    use super::*;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    fn success_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": DEFAULT_MODEL,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .and(matchers::header("Authorization", "Bearer gsk_test"))
            .and(matchers::body_partial_json(serde_json::json!({
                "model": DEFAULT_MODEL,
                "max_tokens": 150
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("  Bet it already has 👀\n")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GroqProvider::with_url(mock_server.uri());
        let reply = provider.complete(chat_request(), "gsk_test").await.unwrap();
        assert_eq!(reply, "Bet it already has 👀");
    }

    #[tokio::test]
    async fn test_complete_api_error_uses_remote_message() {
        let mock_server = MockServer::start().await;

        let error_body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GroqProvider::with_url(mock_server.uri());
        let err = provider.complete(chat_request(), "bad").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Invalid API Key");
    }

    #[tokio::test]
    async fn test_complete_server_error_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GroqProvider::with_url(mock_server.uri());
        let err = provider.complete(chat_request(), "k").await.unwrap_err();
        assert_eq!(err.to_string(), "Groq API error: 500");
    }

    #[tokio::test]
    async fn test_complete_missing_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let provider = GroqProvider::with_url(mock_server.uri());
        let err = provider.complete(chat_request(), "k").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        let provider = GroqProvider::with_url("http://127.0.0.1:1");
        let err = provider.complete(chat_request(), "k").await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
