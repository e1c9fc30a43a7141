use super::*;
use crate::error::ErrorKind;
use crate::message::Message;
use mockito::Matcher;
use serde_json::json;

async fn client_for(server: &mockito::ServerGuard) -> GroqClient {
    let settings = ApiSettings::new("test-key").base_url(format!("{}/openai/v1", server.url()));
    GroqClient::new(settings).unwrap()
}

#[tokio::test]
async fn test_chat_completion_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "test-model",
            "messages": [{"role": "user", "content": "Say hello"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Hello, world!"},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":10,"completion_tokens":20,"total_tokens":30}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server).await;
    let text = client
        .chat_text("test-model", "Say hello", None, 0.7)
        .await
        .unwrap();
    assert_eq!(text, "Hello, world!");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_completion_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit exceeded","type":"tokens","code":"rate_limit_exceeded"}}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let err = client.chat("m", "hi", None, 0.7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(429));
    match err {
        Error::Api {
            message,
            error_code,
            ..
        } => {
            assert_eq!(message, "Rate limit exceeded");
            assert_eq!(error_code.as_deref(), Some("rate_limit_exceeded"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_embedded_error_in_success_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"error":{"message":"tool_use_failed","type":"invalid_request_error"}}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let err = client.chat("m", "hi", None, 0.7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let err = client.chat("m", "hi", None, 0.7).await.unwrap_err();
    match err {
        Error::Decode { raw, .. } => assert_eq!(raw, "not json"),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invoker_sends_tools_and_auto_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "tool_choice": "auto",
            "tools": [{"type": "function", "function": {"name": "get_current_time"}}]
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let tools = vec![crate::tools::builtin_tools().remove(0)];
    let request = ChatRequest::new("m", vec![Message::user("time?")])
        .tools(crate::tools::definitions(&tools))
        .temperature(0.7);
    let completion = client.complete(&request).await.unwrap();
    assert_eq!(completion.content(), Some("ok"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_stream_chat_yields_events() {
    let mut server = mockito::Server::new_async().await;
    let body = concat!(
        ": keep-alive\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"1, \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"2\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({"stream": true})))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let text: Vec<String> = client
        .chat_text_stream("m", "Count", None, 0.7)
        .map(|r| r.unwrap())
        .collect()
        .await;
    assert_eq!(text.concat(), "1, 2");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_stream_refused_status_is_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = ChatRequest::simple("m", "hi", None, 0.7);
    let items: Vec<Result<Value>> = client.stream_chat(&request).collect().await;
    assert_eq!(items.len(), 1);
    let err = items[0].as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_stream_bad_payload_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(200)
        .with_body("data: {\"choices\":[]}\n\ndata: oops\n\ndata: [DONE]\n\n")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = ChatRequest::simple("m", "hi", None, 0.7);
    let items: Vec<Result<Value>> = client.stream_chat(&request).collect().await;
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    match &items[1] {
        Err(Error::Decode { raw, .. }) => assert_eq!(raw, "oops"),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_models() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/openai/v1/models")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(r#"{"object":"list","data":[{"id":"a","owned_by":"x"},{"id":"b"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let models = client.list_models().await.unwrap();
    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_chat_with_image_url_sends_content_parts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "vision-model",
            "temperature": 0.2,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is in this image?"},
                    {"type": "image_url", "image_url": {"url": "https://example.test/cat.png"}}
                ]
            }]
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"A cat."}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let completion = client
        .chat_with_image_url(
            "vision-model",
            "What is in this image?",
            "https://example.test/cat.png",
            Some(0.2),
        )
        .await
        .unwrap();
    assert_eq!(completion.content(), Some("A cat."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_image_url_is_rejected_before_sending() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server).await;
    for url in ["", "   ", "not a url", "ftp://example.test/cat.png"] {
        let err = client
            .chat_with_image_url("vision-model", "describe", url, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest, "url {url:?}");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcription_uploads_multipart_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/audio/transcriptions")
        .match_header("authorization", "Bearer test-key")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="clip.wav""#.to_string()),
            Matcher::Regex(r#"name="model"\r\n\r\nwhisper-large-v3\r\n"#.to_string()),
            Matcher::Regex(r#"name="language"\r\n\r\nen\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"text":"hello there"}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = AudioRequest::new(b"RIFF0000WAVE".to_vec(), "clip.wav", "whisper-large-v3")
        .language("en");
    let output = client.create_transcription(request).await.unwrap();
    assert_eq!(output.text, "hello there");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_translation_uses_translation_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/audio/translations")
        .match_body(Matcher::Regex(
            r#"name="response_format"\r\n\r\ntext\r\n"#.to_string(),
        ))
        .with_status(200)
        .with_body("good morning\n")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = AudioRequest::new(b"ID3".to_vec(), "bonjour.mp3", "whisper-large-v3")
        .language("fr")
        .response_format("text");
    let output = client.create_translation(request).await.unwrap();
    assert_eq!(output.text, "good morning\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_audio_http_error_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/openai/v1/audio/transcriptions")
        .with_status(413)
        .with_body(r#"{"error":{"message":"file too large","type":"invalid_request_error"}}"#)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let request = AudioRequest::new(vec![0u8; 16], "big.wav", "whisper-large-v3");
    let err = client.create_transcription(request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(413));
}

#[test]
fn test_url_joins_without_double_slash() {
    let settings = ApiSettings::new("k").base_url("https://example.test/v1/");
    assert_eq!(
        settings.url(CHAT_COMPLETIONS_ENDPOINT),
        "https://example.test/v1/chat/completions"
    );
}
