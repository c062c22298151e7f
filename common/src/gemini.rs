//! Gemini API のリクエスト/レスポンス型
//!
//! 送信処理はCLI(reqwest)とWeb(fetch)がそれぞれ持ち、ワイヤ形式と
//! レスポンスからのマークアップ取り出しはここで共有する。

use crate::error::{Error, Result};
use crate::extract::extract_markup;
use crate::prompts::{build_prompt, GenerationSettings, SYSTEM_INSTRUCTION};
use serde::{Deserialize, Serialize};

/// Gemini API のベースURL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// generateContent エンドポイント
pub fn endpoint_url(base: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base.trim_end_matches('/'), model)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

impl GeminiRequest {
    /// 依頼文と固定指示からリクエストを組み立てる
    pub fn new(settings: &GenerationSettings, prompt: &str, existing_markup: Option<&str>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: build_prompt(prompt, existing_markup) }],
            }],
            system_instruction: Content {
                parts: vec![Part { text: SYSTEM_INSTRUCTION.to_string() }],
            },
            generation_config: GenerationConfig {
                temperature: settings.temperature,
                top_p: settings.top_p,
                thinking_config: ThinkingConfig {
                    thinking_budget: settings.thinking_budget,
                },
            },
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeminiResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
    /// 推論過程のパート（出力には含めない）
    pub thought: bool,
}

impl GeminiResponse {
    /// 最初の候補のテキストパートを連結。使えるテキストがなければNone
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// レスポンスJSONからマークアップを取り出す
///
/// SVGが見つからない場合はテキスト全体を返す（呼び出し側は非SVGを許容する）。
pub fn parse_generation_response(json: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(json)?;
    let text = response.text().ok_or(Error::Generation)?;
    Ok(extract_markup(&text).into_owned())
}
