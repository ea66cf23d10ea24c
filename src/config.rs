use crate::error::{Result, TrendscopeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trendscope_common::settings::SETTINGS_RELATIVE_PATH;
use trendscope_common::ViewerSettings;

/// 画像ベースURLを上書きする環境変数
pub const IMAGE_BASE_ENV: &str = "TRENDSCOPE_IMAGE_BASE";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(flatten)]
    pub viewer: ViewerSettings,

    /// `RUST_LOG` 未設定時のログフィルタ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.viewer.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.viewer.validate()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrendscopeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(SETTINGS_RELATIVE_PATH.iter().fold(home, |path, part| path.join(part)))
    }

    /// 環境変数を反映した設定
    pub fn effective_viewer(&self) -> ViewerSettings {
        let mut viewer = self.viewer.clone();
        // 環境変数を優先
        if let Ok(base) = std::env::var(IMAGE_BASE_ENV) {
            if !base.trim().is_empty() {
                viewer.image_base_url = base.trim().to_string();
            }
        }
        viewer
    }
}
