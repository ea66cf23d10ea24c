//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// アイテムを含まないグループは構築できない
    #[error("Result group at {timestamp} has no items")]
    EmptyGroup { timestamp: String },

    #[error("Result group at {timestamp} declares {declared} items but carries {actual}")]
    ItemCountMismatch {
        timestamp: String,
        declared: usize,
        actual: usize,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Point {index} out of range ({len} points plotted)")]
    PointOutOfRange { index: usize, len: usize },

    /// バックエンドが `{"error": ...}` を返した
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_group() {
        let error = Error::EmptyGroup { timestamp: "2025-10-01".to_string() };
        assert_eq!(format!("{}", error), "Result group at 2025-10-01 has no items");
    }

    #[test]
    fn test_error_display_item_count_mismatch() {
        let error = Error::ItemCountMismatch {
            timestamp: "2025-10-05".to_string(),
            declared: 3,
            actual: 2,
        };
        let display = format!("{}", error);
        assert!(display.contains("declares 3"));
        assert!(display.contains("carries 2"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_display_point_out_of_range() {
        let error = Error::PointOutOfRange { index: 4, len: 2 };
        assert_eq!(format!("{}", error), "Point 4 out of range (2 points plotted)");
    }
}
