use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trendscope_common::{FilterState, PipelineKind};

#[derive(Parser)]
#[command(name = "trendscope")]
#[command(about = "ガーメントトレンドのタイムライン可視化・ドリルダウンツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 結果セットをフィルタしてプロット点と接続線を表示
    Plot {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 点をクリックした状態の詳細とテーブルを表示
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// 点の番号（フィルタ後、0始まり）
        #[arg(short, long)]
        point: usize,

        /// カルーセルの位置（0始まり）
        #[arg(short, long, default_value = "0")]
        item: usize,
    },

    /// 対話的に点を選び、カルーセルを操作
    Browse {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// プレディクタのデモ結果セットをJSONで書き出す
    Demo {
        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 画像参照のベースURL（またはローカルディレクトリ）
        #[arg(long)]
        image_base_url: Option<String>,

        /// 接続線の初期表示
        #[arg(long)]
        show_connections: Option<bool>,

        /// 読み込みのたびにフィルタを戻す
        #[arg(long)]
        reset_filters_on_load: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 結果セットの入力元
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// バックエンド応答JSONファイル
    #[arg(required_unless_present = "demo")]
    pub input: Option<PathBuf>,

    /// 入力ファイルの代わりにデモデータを使う
    #[arg(long, conflicts_with = "input")]
    pub demo: bool,

    /// パイプライン (discovery/predictor)
    #[arg(long, default_value = "discovery")]
    pub pipeline: PipelineArg,
}

/// フィルタと接続線
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// 色フィルタ（部分一致）
    #[arg(long)]
    pub color: Option<String>,

    /// 柄フィルタ（部分一致）
    #[arg(long)]
    pub pattern: Option<String>,

    /// フィットフィルタ（部分一致）
    #[arg(long)]
    pub fit: Option<String>,

    /// 接続線を描かない
    #[arg(long)]
    pub no_connections: bool,
}

impl ViewArgs {
    pub fn filter_state(&self) -> FilterState {
        FilterState::from_options(
            self.color.as_deref(),
            self.pattern.as_deref(),
            self.fit.as_deref(),
        )
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PipelineArg {
    Discovery,
    Predictor,
}

impl From<PipelineArg> for PipelineKind {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::Discovery => PipelineKind::Discovery,
            PipelineArg::Predictor => PipelineKind::Predictor,
        }
    }
}
