use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use trendscope_common::settings::SETTINGS_RELATIVE_PATH;
use trendscope_common::{ResultSet, ViewerSettings};

pub fn load_result_set(path: &Path) -> Result<ResultSet> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let result_set = ResultSet::from_json_str(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(result_set)
}

pub fn settings_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(SETTINGS_RELATIVE_PATH.iter().fold(home, |path, part| path.join(part)))
}

/// CLIと同じ設定ファイル。無ければ既定値
pub fn load_settings() -> Result<ViewerSettings> {
    let Some(path) = settings_path().filter(|p| p.exists()) else {
        return Ok(ViewerSettings::default());
    };
    let content = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let settings = ViewerSettings::from_json(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(settings)
}

/// 画像の場所がローカルに実在すればそのパス
pub fn local_image_path(location: &str) -> Option<PathBuf> {
    let path = PathBuf::from(location);
    path.is_file().then_some(path)
}
