//! 設定ファイルテスト
//!
//! 保存・読み込みとデスクトップ側との互換性を検証

use tempfile::tempdir;
use trendscope::config::Config;
use trendscope::error::TrendscopeError;
use trendscope_common::ViewerSettings;

/// 設定ファイルが無い場合は既定値
#[test]
fn test_load_missing_config_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert!(config.viewer.show_connections);
    assert!(!config.viewer.reset_filters_on_load);
}

/// 保存と読み込み（親ディレクトリも作る）
#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("trendscope").join("config.json");

    let mut config = Config::default();
    config.viewer.image_base_url = "/srv/garments".to_string();
    config.viewer.show_connections = false;
    config.log_filter = Some("trendscope=debug".to_string());
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.viewer.images_are_local());
}

/// CLIが書いた設定をデスクトップ側の型でも読める
#[test]
fn test_cli_config_readable_as_viewer_settings() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.viewer.reset_filters_on_load = true;
    config.log_filter = Some("warn".to_string());
    config.save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let settings = ViewerSettings::from_json(&content).unwrap();
    assert_eq!(settings, config.viewer);
}

/// 空白入りのベースURLは保存も読み込みも拒否
#[test]
fn test_invalid_image_base_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.viewer.image_base_url = "http://local host".to_string();
    let err = config.save_to(&path).unwrap_err();
    assert!(matches!(err, TrendscopeError::Core(_)));
    assert!(!path.exists());

    std::fs::write(&path, r#"{"image_base_url": "a b"}"#).unwrap();
    assert!(Config::load_from(&path).is_err());
}

/// 壊れたJSON
#[test]
fn test_malformed_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, TrendscopeError::JsonParse(_)));
}
