//! 生成履歴
//!
//! - HistoryList: 新しい順・最大50件の履歴
//! - KeyValueStore: 永続化先の抽象（ファイル/localStorage/メモリ）
//! - HistoryStore: 1つのキーに履歴JSONを保存・復元
//! - HistoryEntryView: 履歴パネル表示用の整形済みデータ

use crate::error::Result;
use crate::types::GenerationRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 履歴の最大件数
pub const MAX_HISTORY: usize = 50;

/// 履歴を保存するキー
pub const HISTORY_KEY: &str = "svg_genius_history";

/// プロンプトプレビューの最大文字数
pub const PROMPT_PREVIEW_CHARS: usize = 48;

/// 全削除の確認文
pub const CLEAR_HISTORY_PROMPT: &str = "Clear all your SVG history?";

/// 履歴が空のときの表示
pub const EMPTY_HISTORY_TEXT: &str = "No history yet...";

/// 新しい順の生成履歴（最大 MAX_HISTORY 件）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList(Vec<GenerationRecord>);

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に追加し、上限を超えた古い履歴を捨てる
    pub fn prepend(&mut self, record: GenerationRecord) {
        self.0.insert(0, record);
        self.0.truncate(MAX_HISTORY);
    }

    pub fn get(&self, id: &str) -> Option<&GenerationRecord> {
        self.0.iter().find(|r| r.id == id)
    }

    /// 最新の履歴
    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenerationRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// JSON配列から復元（上限を超える分は切り捨て）
    pub fn from_json(json: &str) -> Result<Self> {
        let mut list: HistoryList = serde_json::from_str(json)?;
        list.0.truncate(MAX_HISTORY);
        Ok(list)
    }
}

impl From<Vec<GenerationRecord>> for HistoryList {
    fn from(mut records: Vec<GenerationRecord>) -> Self {
        records.truncate(MAX_HISTORY);
        Self(records)
    }
}

impl<'a> IntoIterator for &'a HistoryList {
    type Item = &'a GenerationRecord;
    type IntoIter = std::slice::Iter<'a, GenerationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// キー・バリュー形式の永続化先
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストア（テスト・一時セッション用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 履歴の永続化
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 履歴を読み込み
    ///
    /// キーがない・内容が壊れている場合は空の履歴から始める（ログのみ）。
    pub fn load(&self) -> HistoryList {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistoryList::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored history");
                return HistoryList::new();
            }
        };

        match HistoryList::from_json(&raw) {
            Ok(list) => {
                tracing::debug!(entries = list.len(), "history restored");
                list
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored history is corrupt, starting empty");
                HistoryList::new()
            }
        }
    }

    /// 履歴を保存
    pub fn save(&mut self, history: &HistoryList) -> Result<()> {
        let json = history.to_json()?;
        self.store.set(HISTORY_KEY, &json)
    }

    /// 保存データがあるか（壊れていて読めなかった場合も true）
    pub fn is_persisted(&self) -> bool {
        matches!(self.store.get(HISTORY_KEY), Ok(Some(_)))
    }

    /// 保存済みの履歴を削除
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

/// 履歴パネルの1行分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntryView {
    pub id: String,
    /// ローカル時刻（HH:MM:SS）
    pub time_of_day: String,
    /// 1行に切り詰めたプロンプト
    pub prompt_preview: String,
}

impl HistoryEntryView {
    pub fn from_record(record: &GenerationRecord) -> Self {
        Self {
            id: record.id.clone(),
            time_of_day: format_time_of_day(record.timestamp),
            prompt_preview: truncate_prompt(&record.prompt, PROMPT_PREVIEW_CHARS),
        }
    }
}

/// エポックミリ秒をローカルの時刻表記に変換
pub fn format_time_of_day(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// 改行を空白にまとめ、max_chars 文字を超える分を省略
pub fn truncate_prompt(prompt: &str, max_chars: usize) -> String {
    let single_line = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut truncated: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
