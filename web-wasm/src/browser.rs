//! ブラウザAPIブリッジ（クリップボード・ダウンロード・ダイアログ）

use svg_genius_common::{download_file_name, SVG_MIME_TYPE};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/browser.js")]
extern "C" {
    #[wasm_bindgen(js_name = "copyText", catch)]
    async fn copy_text_js(text: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "downloadText")]
    fn download_text_js(file_name: &str, text: &str, mime_type: &str);
}

/// クリップボードへ書き込む
pub async fn copy_text(text: &str) -> Result<(), String> {
    copy_text_js(text)
        .await
        .map(|_| ())
        .map_err(|e| format!("コピー失敗: {:?}", e))
}

/// SVGを illustration-<timestamp>.svg としてダウンロードさせる
pub fn download_svg(markup: &str) {
    let file_name = download_file_name(now_ms());
    download_text_js(&file_name, markup, SVG_MIME_TYPE);
}

/// ブロッキングな確認ダイアログ（取得できなければ拒否扱い）
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// 現在時刻（エポックミリ秒）
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}
