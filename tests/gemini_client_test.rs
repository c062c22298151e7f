//! Gemini クライアントのテスト
//!
//! wiremock でAPIを差し替え、送信内容とレスポンス処理を検証

use serde_json::json;
use std::time::Duration;
use svg_genius::gemini::{GeminiClient, MarkupGenerator};
use svg_genius_common::{Error, GenerationRequest, GenerationSettings};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-3-pro-preview:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        "test-key",
        server.uri(),
        GenerationSettings::default(),
        Duration::from_secs(5),
    )
    .expect("クライアント作成に失敗")
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    }))
}

fn request(prompt: &str, existing: Option<&str>) -> GenerationRequest {
    GenerationRequest {
        prompt: prompt.into(),
        existing_markup: existing.map(str::to_string),
    }
}

/// 説明文つきの応答からSVG部分だけを取り出す
#[tokio::test]
async fn test_extracts_svg_from_prose() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(text_response(
            "Here you go:\n```xml\n<svg viewBox=\"0 0 10 10\"><circle r=\"4\"/></svg>\n```\nEnjoy!",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let markup = client(&server).generate(&request("a dot", None)).await.unwrap();
    assert_eq!(markup, "<svg viewBox=\"0 0 10 10\"><circle r=\"4\"/></svg>");
}

/// SVGを含まない応答はそのまま返す
#[tokio::test]
async fn test_passthrough_without_svg() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response("I cannot draw that."))
        .mount(&server)
        .await;

    let markup = client(&server).generate(&request("???", None)).await.unwrap();
    assert_eq!(markup, "I cannot draw that.");
}

/// 固定指示と生成設定を送る
#[tokio::test]
async fn test_sends_system_instruction_and_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_string_contains("systemInstruction"))
        .and(body_string_contains("\"thinkingBudget\":2000"))
        .and(body_string_contains("\"topP\":0.95"))
        .respond_with(text_response("<svg/>"))
        .expect(1)
        .mount(&server)
        .await;

    let markup = client(&server).generate(&request("anything", None)).await.unwrap();
    assert_eq!(markup, "<svg/>");
}

/// 修正時は現在のSVGを依頼文に含める
#[tokio::test]
async fn test_modification_embeds_existing_markup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_string_contains("Make it blue"))
        .and(body_string_contains("<svg id=\\\"current\\\"/>"))
        .respond_with(text_response("<svg id=\"next\"/>"))
        .expect(1)
        .mount(&server)
        .await;

    let markup = client(&server)
        .generate(&request("Make it blue", Some("<svg id=\"current\"/>")))
        .await
        .unwrap();
    assert_eq!(markup, "<svg id=\"next\"/>");
}

/// HTTPエラーは共通の生成エラーになる
#[tokio::test]
async fn test_http_error_maps_to_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = client(&server).generate(&request("a dot", None)).await.unwrap_err();
    assert!(matches!(err, Error::Generation));
    assert_eq!(err.user_message(), "Failed to generate SVG. Please check your prompt or try again.");
}

/// テキストのない応答も生成エラー
#[tokio::test]
async fn test_empty_candidates_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client(&server).generate(&request("a dot", None)).await.unwrap_err();
    assert!(matches!(err, Error::Generation));
}

/// 応答が遅すぎる場合はタイムアウトして生成エラー
#[tokio::test]
async fn test_timeout_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response("<svg/>").set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = GeminiClient::new(
        "test-key",
        server.uri(),
        GenerationSettings::default(),
        Duration::from_millis(200),
    )
    .unwrap();
    let err = client.generate(&request("a dot", None)).await.unwrap_err();
    assert!(matches!(err, Error::Generation));
}
