use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendscopeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力ファイルを指定するか --demo を付けてください")]
    MissingInput,

    #[error("結果セットの読み込みに失敗: {0}")]
    Core(#[from] trendscope_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, TrendscopeError>;
