//! Gemini API クライアント（ネイティブ版）
//!
//! リクエスト/レスポンス型とマークアップ抽出は svg_genius_common を使用。
//! 失敗の詳細はログにのみ出し、呼び出し側には共通の生成エラーを返す。

use crate::config::Config;
use crate::error::{Result, SvgGeniusError};
use async_trait::async_trait;
use std::time::Duration;
use svg_genius_common::{
    endpoint_url, parse_generation_response, Error as CommonError, GeminiRequest,
    GenerationRequest, GenerationSettings,
};

/// リモート生成モデル
#[async_trait]
pub trait MarkupGenerator: Send + Sync {
    /// 依頼からSVGマークアップを生成
    async fn generate(&self, request: &GenerationRequest) -> svg_genius_common::Result<String>;
}

/// Gemini API クライアント
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    settings: GenerationSettings,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            settings,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            config.api_base_url.clone(),
            config.generation.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// API呼び出し本体（エラー詳細つき）
    async fn call(&self, request: &GenerationRequest) -> Result<String> {
        let body = GeminiRequest::new(
            &self.settings,
            &request.prompt,
            request.existing_markup.as_deref(),
        );
        let url = endpoint_url(&self.base_url, &self.settings.model);

        tracing::debug!(model = %self.settings.model, modify = request.existing_markup.is_some(), "calling Gemini");

        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SvgGeniusError::ApiCall(format!("{status}: {text}")));
        }

        tracing::debug!(bytes = text.len(), "Gemini responded");
        Ok(parse_generation_response(&text)?)
    }
}

#[async_trait]
impl MarkupGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> svg_genius_common::Result<String> {
        self.call(request).await.map_err(|e| {
            tracing::error!(error = %e, "Gemini API error");
            CommonError::Generation
        })
    }
}
