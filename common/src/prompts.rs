//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト生成ロジック:
//! - SYSTEM_INSTRUCTION: モデルへの固定指示
//! - build_prompt: 新規作成/既存SVGの修正のどちらかとして依頼文を組み立てる
//! - GenerationSettings: モデル名とサンプリングパラメータ

use serde::{Deserialize, Serialize};

/// モデルへの固定指示（SVGのみを出力させる）
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert SVG artist and senior frontend developer.
Generate high-quality, clean and valid SVG code from the user's description.
Rules:
1. Reply with the SVG code only, beginning with <svg and ending with </svg>.
2. Use modern SVG attributes.
3. Add comments for complex shapes.
4. Make the SVG responsive: always set a viewBox and width/height="100%".
5. Never write any text before or after the SVG block.
6. When asked to modify an existing SVG, apply the change while keeping its structure.
7. Prefer vivid color palettes unless a specific style is requested.
8. Default to minimalist, modern or flat design."#;

/// デフォルトモデル
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// 生成パラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    /// 内部推論に使うトークン予算
    pub thinking_budget: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            top_p: 0.95,
            thinking_budget: 2000,
        }
    }
}

/// 依頼文を生成
///
/// # Arguments
/// * `prompt` - ユーザーの指示
/// * `existing` - 修正対象のSVG（空文字は新規作成扱い）
pub fn build_prompt(prompt: &str, existing: Option<&str>) -> String {
    match existing.filter(|code| !code.is_empty()) {
        Some(code) => format!(
            "Modify the following SVG code based on this request: \"{prompt}\".\n\nExisting SVG:\n{code}"
        ),
        None => prompt.to_string(),
    }
}
