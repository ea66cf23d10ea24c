//! Trendscope Common Library
//!
//! CLIとデスクトップで共有するタイムラインエンジン:
//! フィルタ → 投影 → 接続線 → 選択 → 詳細/テーブル

pub mod types;
pub mod timestamp;
pub mod error;
pub mod filter;
pub mod projector;
pub mod connections;
pub mod selection;
pub mod views;
pub mod pipeline;
pub mod response;
pub mod settings;
pub mod demo;

pub use types::{GroupPayload, Item, ResultGroup};
pub use error::{Error, Result};
pub use filter::{filter_groups, FilterState};
pub use projector::{project, project_all, PlotPoint};
pub use connections::{build_connections, Trace};
pub use selection::{Direction, Selection};
pub use views::{DetailView, TableView};
pub use pipeline::{ChartState, PipelineKind, ResultVisualizationPipeline};
pub use response::ResultSet;
pub use settings::ViewerSettings;
