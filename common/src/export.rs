//! コピー/ダウンロード用の定数とファイル名

/// ダウンロード時のMIMEタイプ
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// ダウンロード時の拡張子
pub const SVG_EXTENSION: &str = "svg";

/// コピー完了時の通知文
pub const COPY_CONFIRMATION: &str = "SVG code copied to clipboard!";

/// ダウンロードファイル名（illustration-<timestamp>.svg）
pub fn download_file_name(timestamp_ms: i64) -> String {
    format!("illustration-{timestamp_ms}.{SVG_EXTENSION}")
}

/// コピー/ダウンロードを表示するか（マークアップが空なら非表示）
pub fn actions_available(markup: &str) -> bool {
    !markup.is_empty()
}
