//! Gemini API連携（fetch版）
//!
//! リクエスト型とレスポンス処理は svg_genius_common を共有。
//! 失敗の詳細はコンソールに出し、呼び出し側には共通の生成エラーを返す。

use svg_genius_common::{
    endpoint_url, parse_generation_response, Error, GeminiRequest, GenerationRequest,
    GenerationSettings, GEMINI_API_BASE,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// リクエストヘッダ（APIキーはURLに載せずヘッダで送る）
fn request_headers(api_key: &str) -> [(&'static str, &str); 2] {
    [("Content-Type", "application/json"), ("x-goog-api-key", api_key)]
}

/// Gemini API呼び出し本体（レスポンス本文を返す）
async fn call_gemini_api(api_key: &str, body: &GeminiRequest, model: &str) -> Result<String, JsValue> {
    let url = endpoint_url(GEMINI_API_BASE, model);
    let body = serde_json::to_string(body).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts)?;
    let headers = request.headers();
    for (name, value) in request_headers(api_key) {
        headers.set(name, value)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {} {}", resp.status(), text)));
    }
    Ok(text)
}

/// 依頼からSVGマークアップを生成
pub async fn generate_markup(
    api_key: &str,
    settings: &GenerationSettings,
    request: &GenerationRequest,
) -> svg_genius_common::Result<String> {
    let body = GeminiRequest::new(settings, &request.prompt, request.existing_markup.as_deref());

    let text = call_gemini_api(api_key, &body, &settings.model)
        .await
        .map_err(|e| {
            gloo::console::error!("Gemini API error:", e);
            Error::Generation
        })?;

    parse_generation_response(&text).map_err(|e| {
        gloo::console::error!("Gemini response error:", e.to_string());
        Error::Generation
    })
}
