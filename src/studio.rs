//! 生成セッション
//!
//! Controller と生成モデルをまとめ、非同期の生成を1つずつ実行する。
//! ロックは状態遷移の間だけ保持し、リモート呼び出し中は解放する。

use crate::gemini::MarkupGenerator;
use std::sync::{Mutex, MutexGuard};
use svg_genius_common::{AppState, Controller, KeyValueStore};

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 生成成功（新しいマークアップ）
    Generated(String),
    /// 生成失敗（ユーザー向けメッセージ）
    Failed(String),
    /// 空のプロンプト、または生成中のため無視
    Ignored,
}

pub struct Studio<G, S> {
    controller: Mutex<Controller<S>>,
    generator: G,
}

impl<G: MarkupGenerator, S: KeyValueStore> Studio<G, S> {
    pub fn new(generator: G, store: S) -> Self {
        Self {
            controller: Mutex::new(Controller::new(store)),
            generator,
        }
    }

    /// コントローラを借りる
    pub fn controller(&self) -> MutexGuard<'_, Controller<S>> {
        // 保持中にパニックしても状態自体は一貫しているので中身を使う
        self.controller.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 現在の状態のスナップショット
    pub fn snapshot(&self) -> AppState {
        self.controller().state().clone()
    }

    /// プロンプトを送信して生成
    pub async fn submit_prompt(&self, text: &str) -> SubmitOutcome {
        let Some(request) = self.controller().submit_prompt(text) else {
            return SubmitOutcome::Ignored;
        };

        let result = self.generator.generate(&request).await;

        let mut controller = self.controller();
        controller.finish_generation(result, chrono::Utc::now().timestamp_millis());
        let state = controller.state();
        match &state.error {
            Some(message) => SubmitOutcome::Failed(message.clone()),
            None => SubmitOutcome::Generated(state.markup.clone()),
        }
    }
}
