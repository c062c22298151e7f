//! プレビュー描画方針
//!
//! 描画面に渡す内容を決める。リモート由来のマークアップは既定で無害化してから渡し、
//! `RenderPolicy::Raw` を明示した場合のみそのまま渡す。

use crate::export::actions_available;
use crate::sanitize::sanitize_svg;
use serde::{Deserialize, Serialize};

/// マークアップが空のときの案内文
pub const PLACEHOLDER_TEXT: &str = "Describe something to generate an SVG illustration";

/// 描画方針
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPolicy {
    /// 許可リストで無害化してから描画
    #[default]
    Sanitized,
    /// 受け取ったまま描画
    Raw,
}

impl RenderPolicy {
    pub fn from_sanitize_flag(sanitize: bool) -> Self {
        if sanitize {
            RenderPolicy::Sanitized
        } else {
            RenderPolicy::Raw
        }
    }
}

/// 描画内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// マークアップなし
    Placeholder,
    /// 描画するマークアップ
    Markup(String),
    /// 無害化できなかった（理由つき）
    Unrenderable(String),
}

/// 現在のマークアップから描画内容を決める
///
/// 空判定はコピー/ダウンロードの表示と同じ（`actions_available`）。
pub fn render_preview(markup: &str, policy: RenderPolicy) -> PreviewContent {
    if !actions_available(markup) {
        return PreviewContent::Placeholder;
    }
    match policy {
        RenderPolicy::Raw => PreviewContent::Markup(markup.to_string()),
        RenderPolicy::Sanitized => match sanitize_svg(markup) {
            Ok(clean) => PreviewContent::Markup(clean),
            Err(e) => PreviewContent::Unrenderable(e.to_string()),
        },
    }
}
