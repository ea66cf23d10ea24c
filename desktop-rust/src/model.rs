use std::path::{Path, PathBuf};

use trendscope_common::{PipelineKind, ResultVisualizationPipeline, ViewerSettings};

pub const TABS: [PipelineKind; 2] = [PipelineKind::Discovery, PipelineKind::Predictor];

/// 2本のパイプラインは互いの状態を参照しない
#[derive(Debug, Clone)]
pub struct AppState {
    pub discovery: ResultVisualizationPipeline,
    pub predictor: ResultVisualizationPipeline,
    pub active: PipelineKind,
    pub settings: ViewerSettings,
    discovery_source: Option<PathBuf>,
    predictor_source: Option<PathBuf>,
}

impl AppState {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            discovery: ResultVisualizationPipeline::with_settings(PipelineKind::Discovery, &settings),
            predictor: ResultVisualizationPipeline::with_settings(PipelineKind::Predictor, &settings),
            active: PipelineKind::Discovery,
            settings,
            discovery_source: None,
            predictor_source: None,
        }
    }

    pub fn pipeline_mut(&mut self, kind: PipelineKind) -> &mut ResultVisualizationPipeline {
        match kind {
            PipelineKind::Discovery => &mut self.discovery,
            PipelineKind::Predictor => &mut self.predictor,
        }
    }

    pub fn source_path(&self, kind: PipelineKind) -> Option<&Path> {
        match kind {
            PipelineKind::Discovery => self.discovery_source.as_deref(),
            PipelineKind::Predictor => self.predictor_source.as_deref(),
        }
    }

    /// `None` はデモなどファイル以外から読み込んだ状態
    pub fn set_source(&mut self, kind: PipelineKind, path: Option<PathBuf>) {
        match kind {
            PipelineKind::Discovery => self.discovery_source = path,
            PipelineKind::Predictor => self.predictor_source = path,
        }
    }
}
