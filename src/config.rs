use crate::error::{Result, SvgGeniusError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use svg_genius_common::{GenerationSettings, RenderPolicy, GEMINI_API_BASE};

/// APIキーを読む環境変数（先頭が優先）
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    #[serde(flatten)]
    pub generation: GenerationSettings,
    pub api_base_url: String,
    pub timeout_seconds: u64,
    /// プレビュー前に無害化するか
    pub sanitize_preview: bool,
    /// 履歴の保存先（省略時はデータディレクトリ）
    pub history_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            generation: GenerationSettings::default(),
            api_base_url: GEMINI_API_BASE.into(),
            timeout_seconds: 120,
            sanitize_preview: true,
            history_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SvgGeniusError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("svg-genius").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(key);
                }
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SvgGeniusError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 履歴の保存ディレクトリ
    pub fn history_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.history_dir {
            return Ok(dir.clone());
        }
        let data = dirs::data_dir()
            .ok_or_else(|| SvgGeniusError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("svg-genius"))
    }

    pub fn render_policy(&self) -> RenderPolicy {
        RenderPolicy::from_sanitize_flag(self.sanitize_preview)
    }
}
