use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgGeniusError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`svg-genius config --set-api-key YOUR_KEY` または環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("履歴が見つかりません: {0}")]
    HistoryEntryNotFound(String),

    #[error("SVGがありません。先に生成するか履歴から選択してください")]
    EmptyMarkup,

    #[error("クリップボードエラー: {0}")]
    Clipboard(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] svg_genius_common::Error),
}

pub type Result<T> = std::result::Result<T, SvgGeniusError>;
