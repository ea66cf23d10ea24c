//! ビューア設定
//!
//! CLIとデスクトップで共有する。保存先の解決は各バイナリ側で行う。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:8000";

/// `~` からの相対パス
pub const SETTINGS_RELATIVE_PATH: [&str; 3] = [".config", "trendscope", "config.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// 画像参照のベースURL（またはローカルディレクトリ）
    pub image_base_url: String,
    /// 接続線の初期表示
    pub show_connections: bool,
    /// 結果セットを読み直すたびにフィルタを戻す
    pub reset_filters_on_load: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            show_connections: true,
            reset_filters_on_load: false,
        }
    }
}

impl ViewerSettings {
    pub fn from_json(content: &str) -> Result<Self> {
        let settings: ViewerSettings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_base_url.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!(
                "image_base_url must not contain whitespace: {:?}",
                self.image_base_url
            )));
        }
        Ok(())
    }

    /// ベースがURLでなければローカルディレクトリとみなす
    pub fn images_are_local(&self) -> bool {
        let base = self.image_base_url.as_str();
        !(base.starts_with("http://") || base.starts_with("https://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert!(settings.show_connections);
        assert!(!settings.reset_filters_on_load);
        assert!(!settings.images_are_local());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = ViewerSettings::from_json(r#"{"show_connections": false}"#).expect("パース失敗");
        assert!(!settings.show_connections);
        assert_eq!(settings.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn test_whitespace_base_rejected() {
        let err = ViewerSettings::from_json(r#"{"image_base_url": "http://a b"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_local_image_base() {
        let settings = ViewerSettings { image_base_url: "/data/images".into(), ..Default::default() };
        assert!(settings.images_are_local());
    }
}
