//! 結果セットの読み込みとパイプライン構築

use crate::cli::{SourceArgs, ViewArgs};
use crate::error::{Result, TrendscopeError};
use std::path::Path;
use tracing::{debug, info};
use trendscope_common::{demo, ResultSet, ResultVisualizationPipeline, ViewerSettings};

/// バックエンド応答ファイルを読み込む
pub fn read_result_set(path: &Path) -> Result<ResultSet> {
    if !path.exists() {
        return Err(TrendscopeError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let result_set = ResultSet::from_json_str(&content)?;
    info!(
        path = %path.display(),
        groups = result_set.groups.len(),
        skipped = result_set.skipped,
        "result set loaded"
    );
    Ok(result_set)
}

pub fn resolve_result_set(source: &SourceArgs) -> Result<ResultSet> {
    if source.demo {
        debug!("using predictor demo data");
        return Ok(demo::predictor_result_set());
    }
    match &source.input {
        Some(path) => read_result_set(path),
        None => Err(TrendscopeError::MissingInput),
    }
}

/// 読み込み → フィルタ → 接続線設定まで済ませたパイプライン
///
/// ファイルが無い場合はエラー。応答の中身が壊れている場合はエラー状態のチャートを返す。
pub fn build_pipeline(
    source: &SourceArgs,
    view: &ViewArgs,
    settings: &ViewerSettings,
) -> Result<ResultVisualizationPipeline> {
    let mut pipeline = ResultVisualizationPipeline::with_settings(source.pipeline.into(), settings);
    if view.no_connections {
        pipeline.set_connections_enabled(false);
    }

    match resolve_result_set(source) {
        Ok(result_set) => {
            // reset_filters_on_load より後に適用する
            pipeline.load_result_set(result_set);
            pipeline.set_filters(view.filter_state());
        }
        Err(TrendscopeError::Core(err)) => {
            // fail の後に再計算させない
            pipeline.set_filters(view.filter_state());
            pipeline.fail(&err);
        }
        Err(err) => return Err(err),
    }
    Ok(pipeline)
}
