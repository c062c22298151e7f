//! SVG Genius Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod extract;
pub mod prompts;
pub mod gemini;
pub mod history;
pub mod controller;
pub mod sanitize;
pub mod preview;
pub mod export;

pub use types::{AppState, GenerationRecord, GenerationStatus};
pub use error::{Error, Result, GENERATION_FAILED_MESSAGE};
pub use extract::{extract_markup, Extraction};
pub use prompts::{build_prompt, GenerationSettings, SYSTEM_INSTRUCTION};
pub use gemini::{endpoint_url, parse_generation_response, GeminiRequest, GEMINI_API_BASE};
pub use history::{
    HistoryEntryView, HistoryList, HistoryStore, KeyValueStore, MemoryStore, CLEAR_HISTORY_PROMPT,
    EMPTY_HISTORY_TEXT, HISTORY_KEY, MAX_HISTORY,
};
pub use controller::{Controller, GenerationRequest};
pub use sanitize::sanitize_svg;
pub use preview::{render_preview, PreviewContent, RenderPolicy, PLACEHOLDER_TEXT};
pub use export::{actions_available, download_file_name, COPY_CONFIRMATION, SVG_MIME_TYPE};
