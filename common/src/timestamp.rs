//! タイムスタンプの寛容パース
//!
//! バックエンドはpandas経由でオフセット無しのISO文字列を返すことがあるため、
//! RFC 3339に加えて以下の形式を受け付ける:
//! - `YYYY-MM-DDTHH:MM:SS[.f]` (UTCとみなす)
//! - `YYYY-MM-DD`
//! - `DD-MM-YYYY` (元データセットのCSV形式)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y"];

/// 文字列を UTC の時刻に変換する。解釈できなければ `None`
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// 表示用の日付 (`YYYY-MM-DD`)
pub fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// serde用: 不正な値は `None` に縮退させる
pub(crate) fn lenient<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_instant(&s),
        _ => None,
    })
}
