use crate::delivery::SenderConfig;
use crate::error::{EquineError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub api_key: Option<String>,
    pub data_dir: PathBuf,
    pub images_dir: PathBuf,
    /// メール冒頭にインライン埋め込みするロゴPNG（任意）
    pub logo_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
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
            .ok_or_else(|| EquineError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home
            .join(".config")
            .join("equine-bodywork")
            .join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            from_email: None,
            from_name: None,
            api_key: None,
            data_dir: PathBuf::from("data"),
            images_dir: PathBuf::from("images"),
            logo_path: None,
        }
    }

    /// 送信者設定を組み立てる。環境変数を設定ファイルより優先する
    /// （元の運用が.envだったため）。APIキーがなければ送信は失敗する。
    pub fn sender(&self) -> Result<SenderConfig> {
        let api_key = std::env::var("SENDGRID_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or(EquineError::MissingApiKey)?;

        let from_email = std::env::var("FROM_EMAIL")
            .ok()
            .filter(|e| !e.is_empty())
            .or_else(|| self.from_email.clone())
            .ok_or_else(|| {
                EquineError::Config(
                    "送信元アドレスが未設定です。`config --set-from-email` か FROM_EMAIL で設定してください".into(),
                )
            })?;

        let from_name = std::env::var("FROM_NAME")
            .ok()
            .filter(|n| !n.is_empty())
            .or_else(|| self.from_name.clone())
            .unwrap_or_else(|| "Equine Bodywork".into());

        Ok(SenderConfig {
            from_email,
            from_name,
            api_key,
        })
    }
}
