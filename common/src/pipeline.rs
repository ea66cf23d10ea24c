//! 結果可視化パイプライン
//!
//! フィルタ → 投影 → 接続線 → 選択 → ビュー の一連を1つの状態レコードにまとめる。
//! ディスカバリとプレディクタで同じ型を2回インスタンス化し、状態は共有しない。
//!
//! 入力（結果セット・フィルタ・接続線フラグ）が変わるたびにチャートを丸ごと
//! 作り直す。入力が前回と等しい場合だけ再計算を省略する。

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::connections::{build_connections, Trace};
use crate::error::{Error, Result};
use crate::filter::{filter_groups, FilterState};
use crate::projector::{project_all, PlotPoint};
use crate::response::ResultSet;
use crate::selection::{Direction, Selection};
use crate::settings::ViewerSettings;
use crate::types::{GroupPayload, ResultGroup};
use crate::views::{DetailView, TableView};

/// チャート描画失敗時に表示する文言
pub const CHART_ERROR_MESSAGE: &str = "An error occurred while rendering the scatter plot.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    Discovery,
    Predictor,
}

impl PipelineKind {
    pub fn title(&self) -> &'static str {
        match self {
            PipelineKind::Discovery => "Discovery Timeline",
            PipelineKind::Predictor => "Trend Prediction Output",
        }
    }

    /// 結果が空のときの文言
    pub fn empty_message(&self) -> &'static str {
        match self {
            PipelineKind::Discovery => "No results available. Try different inputs.",
            PipelineKind::Predictor => "No predictions available. Try different inputs.",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::Discovery => write!(f, "discovery"),
            PipelineKind::Predictor => write!(f, "predictor"),
        }
    }
}

/// チャートの状態
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChartState {
    /// 結果セット自体が空
    NoResults,
    /// フィルタで全件落ちた
    NoMatches,
    Ready {
        points: Vec<PlotPoint>,
        traces: Vec<Trace>,
    },
    Error {
        message: String,
    },
}

impl ChartState {
    pub fn points(&self) -> &[PlotPoint] {
        match self {
            ChartState::Ready { points, .. } => points,
            _ => &[],
        }
    }

    pub fn traces(&self) -> &[Trace] {
        match self {
            ChartState::Ready { traces, .. } => traces,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartState::NoResults | ChartState::NoMatches)
    }
}

/// パイプライン1本分の状態
#[derive(Debug, Clone)]
pub struct ResultVisualizationPipeline {
    kind: PipelineKind,
    groups: Vec<ResultGroup>,
    filters: FilterState,
    connections_enabled: bool,
    reset_filters_on_load: bool,
    selection: Selection,
    chart: ChartState,
    dataset_url: Option<String>,
}

impl ResultVisualizationPipeline {
    pub fn new(kind: PipelineKind) -> Self {
        Self {
            kind,
            groups: Vec::new(),
            filters: FilterState::default(),
            connections_enabled: true,
            reset_filters_on_load: false,
            selection: Selection::default(),
            chart: ChartState::NoResults,
            dataset_url: None,
        }
    }

    pub fn with_settings(kind: PipelineKind, settings: &ViewerSettings) -> Self {
        let mut pipeline = Self::new(kind);
        pipeline.connections_enabled = settings.show_connections;
        pipeline.reset_filters_on_load = settings.reset_filters_on_load;
        pipeline
    }

    // =============================================
    // 入力
    // =============================================

    /// 結果セットを置き換える。フィルタは設定で指定されない限り維持する
    pub fn load(&mut self, groups: Vec<ResultGroup>) {
        self.groups = groups;
        self.dataset_url = None;
        if self.reset_filters_on_load {
            self.filters.reset();
        }
        match self.groups.first() {
            Some(first) => self.selection.select(first.shared_items()),
            None => self.selection.clear(),
        }
        self.recompute();
    }

    pub fn load_result_set(&mut self, result_set: ResultSet) {
        let dataset_url = result_set.dataset_url.clone();
        self.load(result_set.groups);
        self.dataset_url = dataset_url;
    }

    /// ワイヤ形式から読み込む。不正なグループがあればチャートをエラー表示にし、
    /// 選択（詳細・テーブル）は触らない
    pub fn load_payloads(&mut self, payloads: Vec<GroupPayload>) -> Result<()> {
        let converted: Result<Vec<ResultGroup>> =
            payloads.into_iter().map(ResultGroup::try_from).collect();
        match converted {
            Ok(groups) => {
                self.load(groups);
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// 解析・集計の失敗をチャート境界で受け止める
    pub fn fail(&mut self, err: &Error) {
        warn!(pipeline = %self.kind, error = %err, "result set rejected");
        self.chart = ChartState::Error {
            message: CHART_ERROR_MESSAGE.to_string(),
        };
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        if self.filters == filters {
            return;
        }
        self.filters = filters;
        self.recompute();
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(FilterState::default());
    }

    pub fn set_connections_enabled(&mut self, enabled: bool) {
        if self.connections_enabled == enabled {
            return;
        }
        self.connections_enabled = enabled;
        self.recompute();
    }

    fn recompute(&mut self) {
        if self.groups.is_empty() {
            self.chart = ChartState::NoResults;
            return;
        }

        let filtered = filter_groups(&self.groups, &self.filters);
        if filtered.is_empty() {
            debug!(pipeline = %self.kind, total = self.groups.len(), "filters matched no groups");
            self.chart = ChartState::NoMatches;
            return;
        }

        let points = project_all(&filtered);
        let traces = if self.connections_enabled {
            build_connections(&points)
        } else {
            Vec::new()
        };
        debug!(
            pipeline = %self.kind,
            points = points.len(),
            traces = traces.len(),
            "chart recomputed"
        );
        self.chart = ChartState::Ready { points, traces };
    }

    // =============================================
    // 操作
    // =============================================

    /// プロット上の点クリック。その点が持つアイテム列をそのまま選択する
    pub fn click_point(&mut self, index: usize) -> Result<()> {
        let points = self.chart.points();
        let point = points.get(index).ok_or(Error::PointOutOfRange {
            index,
            len: points.len(),
        })?;
        let items = point.items.clone();
        self.selection.select(items);
        Ok(())
    }

    /// 描画側が保持している点を直接渡す場合
    pub fn select_point(&mut self, point: &PlotPoint) {
        self.selection.select(point.items.clone());
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.selection.navigate(direction)
    }

    pub fn select_row(&mut self, index: usize) -> bool {
        self.selection.focus(index)
    }

    // =============================================
    // 参照
    // =============================================

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn connections_enabled(&self) -> bool {
        self.connections_enabled
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn dataset_url(&self) -> Option<&str> {
        self.dataset_url.as_deref()
    }

    pub fn detail_view(&self, image_base: &str) -> Option<DetailView> {
        DetailView::build(&self.selection, image_base)
    }

    pub fn table_view(&self) -> Option<TableView> {
        TableView::build(&self.selection)
    }

    /// チャート状態に対応する表示文言（描画可能なら `None`）
    pub fn status_message(&self) -> Option<&str> {
        match &self.chart {
            ChartState::NoResults | ChartState::NoMatches => Some(self.kind.empty_message()),
            ChartState::Error { message } => Some(message),
            ChartState::Ready { .. } => None,
        }
    }
}
