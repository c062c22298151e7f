//! SVG Genius CLI
//!
//! 自然言語の説明からGeminiでSVGを生成し、履歴を保存する。
//! 状態管理・抽出・無害化などの共通ロジックは svg_genius_common を使用。

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod gemini;
pub mod interactive;
pub mod store;
pub mod studio;
