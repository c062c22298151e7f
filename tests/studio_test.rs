//! 生成セッションのテスト
//!
//! モック生成モデルで、送信から履歴追加までの流れと同時送信の抑止を検証

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use svg_genius::gemini::MarkupGenerator;
use svg_genius::studio::{Studio, SubmitOutcome};
use svg_genius_common::{
    Error, GenerationRequest, MemoryStore, Result, GENERATION_FAILED_MESSAGE, HISTORY_KEY,
};
use tokio::sync::Mutex;

/// 呼び出し回数と受け取った依頼を記録するモック
#[derive(Clone, Default)]
struct MockGenerator {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Duration,
    fail: bool,
}

impl MockGenerator {
    fn slow(delay: Duration) -> Self {
        Self { delay, ..Default::default() }
    }

    fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarkupGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(Error::Generation);
        }
        Ok(format!("<svg><text>{} #{n}</text></svg>", request.prompt))
    }
}

/// 成功時: 履歴追加、マークアップ更新、プロンプトとエラーのクリア
#[tokio::test]
async fn test_successful_generation_updates_state() {
    let generator = MockGenerator::default();
    let studio = Studio::new(generator.clone(), MemoryStore::new());

    let outcome = studio.submit_prompt("a lighthouse").await;
    assert_eq!(outcome, SubmitOutcome::Generated("<svg><text>a lighthouse #0</text></svg>".into()));

    let state = studio.snapshot();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.latest().unwrap().prompt, "a lighthouse");
    assert_eq!(state.markup, "<svg><text>a lighthouse #0</text></svg>");
    assert!(state.prompt.is_empty());
    assert!(state.error.is_none());
    assert!(!state.is_generating());
    assert!(studio.controller().store().contains(HISTORY_KEY));
}

/// 2回目以降は現在のSVGを修正対象として送る
#[tokio::test]
async fn test_second_generation_is_a_modification() {
    let generator = MockGenerator::default();
    let studio = Studio::new(generator.clone(), MemoryStore::new());

    studio.submit_prompt("a lighthouse").await;
    studio.submit_prompt("add a storm").await;

    let requests = generator.requests.lock().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].existing_markup, None);
    assert_eq!(
        requests[1].existing_markup.as_deref(),
        Some("<svg><text>a lighthouse #0</text></svg>")
    );
}

/// 空のプロンプトはモデルを呼ばない
#[tokio::test]
async fn test_blank_prompt_never_calls_model() {
    let generator = MockGenerator::default();
    let studio = Studio::new(generator.clone(), MemoryStore::new());
    let before = studio.snapshot();

    assert_eq!(studio.submit_prompt("   ").await, SubmitOutcome::Ignored);
    assert_eq!(generator.call_count(), 0);
    assert_eq!(studio.snapshot(), before);
}

/// 失敗時: エラーを表示し、マークアップと履歴はそのまま
#[tokio::test]
async fn test_failed_generation_keeps_markup() {
    let studio = Studio::new(MockGenerator::failing(), MemoryStore::new());
    studio.controller().edit_markup("<svg><rect/></svg>");

    let outcome = studio.submit_prompt("make it green").await;
    assert_eq!(outcome, SubmitOutcome::Failed(GENERATION_FAILED_MESSAGE.into()));

    let state = studio.snapshot();
    assert_eq!(state.markup, "<svg><rect/></svg>");
    assert_eq!(state.prompt, "make it green");
    assert!(state.history.is_empty());
    assert!(!state.is_generating());
}

/// 生成中の2回目の送信は無視され、モデル呼び出しは1回だけ
#[tokio::test]
async fn test_concurrent_submission_is_ignored() {
    let generator = MockGenerator::slow(Duration::from_millis(100));
    let studio = Studio::new(generator.clone(), MemoryStore::new());

    let (first, second) = tokio::join!(
        studio.submit_prompt("first"),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(studio.snapshot().is_generating());
            studio.submit_prompt("second").await
        }
    );

    assert!(matches!(first, SubmitOutcome::Generated(_)));
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(generator.call_count(), 1);

    let state = studio.snapshot();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history.latest().unwrap().prompt, "first");
}

/// 生成が終われば次の送信を受け付ける
#[tokio::test]
async fn test_submission_accepted_after_completion() {
    let generator = MockGenerator::slow(Duration::from_millis(5));
    let studio = Studio::new(generator.clone(), MemoryStore::new());

    studio.submit_prompt("one").await;
    studio.submit_prompt("two").await;
    assert_eq!(generator.call_count(), 2);
    assert_eq!(studio.snapshot().history.len(), 2);
}
