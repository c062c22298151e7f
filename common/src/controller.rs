//! アプリケーション状態コントローラ
//!
//! 状態は `Controller` が唯一所有し、描画側には参照で渡す。
//! 生成は2段階で扱う:
//! 1. `submit_prompt` で Generating に遷移し、リモート呼び出しの内容を返す
//! 2. 呼び出し側が非同期に結果を得たら `finish_generation` で Idle に戻す
//!
//! Generating 中の `submit_prompt` は何もしないので、同時に走る生成は常に1つ。

use crate::error::Result;
use crate::history::{HistoryList, HistoryStore, KeyValueStore};
use crate::types::{AppState, GenerationRecord, GenerationStatus};

/// リモートモデルへの依頼内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// 修正対象のマークアップ（空なら None = 新規作成）
    pub existing_markup: Option<String>,
}

/// 状態コントローラ
#[derive(Debug)]
pub struct Controller<S> {
    state: AppState,
    store: HistoryStore<S>,
    /// 送信済みで結果待ちの依頼
    pending: Option<GenerationRequest>,
}

impl<S: KeyValueStore> Controller<S> {
    /// 永続化された履歴から復元して開始
    ///
    /// 最新の履歴があれば、そのマークアップを現在の表示とする。
    pub fn new(store: S) -> Self {
        let store = HistoryStore::new(store);
        let history = store.load();
        let markup = history.latest().map(|r| r.code.clone()).unwrap_or_default();

        Self {
            state: AppState {
                markup,
                history,
                ..Default::default()
            },
            store,
            pending: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn history(&self) -> &HistoryList {
        &self.state.history
    }

    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// 入力中のプロンプトを更新
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.state.prompt = text.into();
    }

    /// 生成を開始
    ///
    /// 空白のみのプロンプト、または生成中の場合は状態を変えずに None を返す。
    pub fn submit_prompt(&mut self, text: impl Into<String>) -> Option<GenerationRequest> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        if self.state.is_generating() {
            tracing::debug!("generation already in flight, submission ignored");
            return None;
        }

        self.state.prompt = text.clone();
        self.state.status = GenerationStatus::Generating;
        self.state.error = None;

        let existing_markup = Some(self.state.markup.clone()).filter(|m| !m.is_empty());
        let request = GenerationRequest {
            prompt: text,
            existing_markup,
        };
        self.pending = Some(request.clone());
        Some(request)
    }

    /// 入力中のプロンプトで生成を開始
    pub fn submit_current_prompt(&mut self) -> Option<GenerationRequest> {
        let text = self.state.prompt.clone();
        self.submit_prompt(text)
    }

    /// 生成を完了
    ///
    /// 履歴には送信時のプロンプトを記録する（生成中に編集された下書きではない）。
    /// 成功: 履歴に追加して保存、マークアップを置き換え、下書きが送信時のままならクリア。
    /// 失敗: エラーメッセージを設定し、マークアップとプロンプトはそのまま。
    pub fn finish_generation(&mut self, result: Result<String>, timestamp_ms: i64) {
        let Some(request) = self.pending.take().filter(|_| self.state.is_generating()) else {
            tracing::warn!("generation result arrived while idle, ignored");
            return;
        };

        match result {
            Ok(markup) => {
                let record = GenerationRecord::new(request.prompt.clone(), markup.clone(), timestamp_ms);
                tracing::info!(id = %record.id, chars = markup.len(), "generation succeeded");
                self.state.history.prepend(record);
                self.persist_history();
                self.state.markup = markup;
                if self.state.prompt == request.prompt {
                    self.state.prompt.clear();
                }
            }
            Err(e) => {
                tracing::info!(error = %e, "generation failed");
                self.state.error = Some(e.user_message());
            }
        }
        self.state.status = GenerationStatus::Idle;
    }

    /// 履歴を選択してマークアップを読み込む
    pub fn select_history_entry(&mut self, id: &str) -> bool {
        let Some(record) = self.state.history.get(id) else {
            return false;
        };
        self.state.markup = record.code.clone();
        self.state.error = None;
        true
    }

    /// マークアップを直接編集（検証なし）
    pub fn edit_markup(&mut self, text: impl Into<String>) {
        self.state.markup = text.into();
    }

    /// 削除できる履歴があるか（読み込めなかった保存データも含む）
    pub fn has_clearable_history(&self) -> bool {
        !self.state.history.is_empty() || self.store.is_persisted()
    }

    /// 履歴を全削除
    ///
    /// `confirm` が true を返した場合のみ実行する。
    pub fn clear_history(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.state.history.clear();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to remove stored history");
        }
        true
    }

    fn persist_history(&mut self) {
        if let Err(e) = self.store.save(&self.state.history) {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }
}
