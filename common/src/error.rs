//! エラー型定義

use thiserror::Error;

/// 生成失敗時にユーザーへ表示する唯一のメッセージ
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate SVG. Please check your prompt or try again.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    /// リモートモデル呼び出しの失敗（元のエラーはログにのみ残す）
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    Generation,

    #[error("Malformed markup: {0}")]
    Markup(String),
}

impl Error {
    /// ユーザー向けの短いメッセージ
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
