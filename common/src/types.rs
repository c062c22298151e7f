//! 生成履歴とアプリケーション状態の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - GenerationRecord: 1回の生成結果（プロンプトとSVG）
//! - GenerationStatus: 生成中かどうか
//! - AppState: コントローラが所有する唯一の状態

use crate::history::HistoryList;
use serde::{Deserialize, Serialize};

/// 生成履歴の1件
///
/// 永続化JSONと互換（`id`, `prompt`, `code`, `timestamp`）。作成後は不変。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub id: String,
    pub prompt: String,
    /// 生成されたSVGマークアップ
    pub code: String,
    /// 作成時刻（エポックミリ秒）
    pub timestamp: i64,
}

impl GenerationRecord {
    /// 新しい識別子を割り当てて作成
    pub fn new(prompt: impl Into<String>, code: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            code: code.into(),
            timestamp,
        }
    }
}

/// 生成ステータス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Generating => "generating",
        }
    }
}

/// アプリケーションの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// 現在のSVGマークアップ（空の場合あり）
    pub markup: String,
    /// 入力中のプロンプト
    pub prompt: String,
    pub status: GenerationStatus,
    /// 直近のエラー
    pub error: Option<String>,
    pub history: HistoryList,
}

impl AppState {
    pub fn is_generating(&self) -> bool {
        self.status == GenerationStatus::Generating
    }

    pub fn has_markup(&self) -> bool {
        !self.markup.is_empty()
    }
}
