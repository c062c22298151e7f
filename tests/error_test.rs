//! エラーケーステスト
//!
//! エラーメッセージと変換を検証

use svg_genius::error::SvgGeniusError;
use svg_genius_common::{Error, GENERATION_FAILED_MESSAGE};

/// SvgGeniusErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SvgGeniusError::Config("テスト設定エラー".to_string()),
        SvgGeniusError::ApiCall("500: internal".to_string()),
        SvgGeniusError::HistoryEntryNotFound("abc".to_string()),
        SvgGeniusError::EmptyMarkup,
        SvgGeniusError::Clipboard("no display".to_string()),
        SvgGeniusError::Prompt("interrupted".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = SvgGeniusError::MissingApiKey.to_string();
    assert!(display.contains("APIキー"));
    assert!(display.contains("svg-genius config"));
    assert!(display.contains("GEMINI_API_KEY"));
}

/// 共通エラーはメッセージをそのまま透過する
#[test]
fn test_common_error_is_transparent() {
    let err: SvgGeniusError = Error::Generation.into();
    assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: SvgGeniusError = io.into();
    assert!(matches!(err, SvgGeniusError::Io(_)));
    assert!(err.to_string().contains("denied"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
    let err: SvgGeniusError = json_err.into();
    assert!(matches!(err, SvgGeniusError::JsonParse(_)));
}
