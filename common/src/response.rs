//! バックエンド応答の取り込み
//!
//! 受け付ける外形（この順で判定）:
//! 1. `{"items": [...]}`
//! 2. `[...]`
//! 3. `{"results": [...], "dataset_url": "..."}`
//!
//! 各要素はグループ（`items` を持つ）か生アイテム。生アイテムは1件ずつ
//! グループ化し、エンゲージメントは (いいね + 再生) / 2 とする。

use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{GroupPayload, Item, ResultGroup};

/// 取り込み済みの結果セット
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub groups: Vec<ResultGroup>,
    pub dataset_url: Option<String>,
    /// タイムスタンプが無く捨てた生アイテム数
    pub skipped: usize,
}

impl ResultSet {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let dataset_url = value
            .get("dataset_url")
            .and_then(Value::as_str)
            .map(str::to_string);

        let entries = match envelope_entries(value)? {
            Some(entries) => entries,
            None => {
                return Ok(Self { dataset_url, ..Default::default() });
            }
        };

        let mut groups = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for entry in entries {
            if entry.get("items").is_some_and(Value::is_array) {
                let payload: GroupPayload = serde_json::from_value(entry)?;
                groups.push(ResultGroup::try_from(payload)?);
                continue;
            }

            match serde_json::from_value::<Item>(entry) {
                Ok(item) if item.timestamp.is_some() => groups.push(ResultGroup::single(item)?),
                Ok(item) => {
                    warn!(id = %item.id, "item without timestamp skipped");
                    skipped += 1;
                }
                Err(err) => {
                    warn!(error = %err, "unreadable entry skipped");
                    skipped += 1;
                }
            }
        }

        Ok(Self { groups, dataset_url, skipped })
    }

    /// 生アイテム列を1件ずつグループ化する
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut groups = Vec::with_capacity(items.len());
        let mut skipped = 0;
        for item in items {
            match ResultGroup::single(item) {
                Ok(group) => groups.push(group),
                Err(_) => skipped += 1,
            }
        }
        Self { groups, dataset_url: None, skipped }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_payloads(&self) -> Vec<GroupPayload> {
        self.groups.iter().map(GroupPayload::from).collect()
    }

    /// `{"results": [...], "dataset_url": ...}` 形式で書き出す
    pub fn to_json_pretty(&self) -> Result<String> {
        let body = serde_json::json!({
            "results": self.to_payloads(),
            "dataset_url": self.dataset_url,
        });
        Ok(serde_json::to_string_pretty(&body)?)
    }
}

fn envelope_entries(value: Value) -> Result<Option<Vec<Value>>> {
    match value {
        Value::Array(entries) => Ok(Some(entries)),
        Value::Object(mut map) => {
            if let Some(Value::Array(entries)) = map.remove("items") {
                return Ok(Some(entries));
            }
            if let Some(Value::Array(entries)) = map.remove("results") {
                return Ok(Some(entries));
            }
            if let Some(Value::String(message)) = map.remove("error") {
                return Err(Error::Backend(message));
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISCOVERY_RESPONSE: &str = r#"{
        "results": [
            {
                "group_key": ["2025-10-01T00:00:00", "celebrity", "solid", "blue"],
                "timestamp": "2025-10-01T00:00:00",
                "items": [
                    {"id": 1, "garment_type": "Kurta", "color": "blue", "pattern": "solid",
                     "engagement_views": 900, "engagement_likes": 100,
                     "timestamp": "2025-10-01T00:00:00", "image_url": "/images/k1.jpg"},
                    {"id": 2, "garment_type": "Kurta", "color": "blue", "pattern": "solid",
                     "engagement_views": 500, "engagement_likes": 50,
                     "timestamp": "2025-10-01T00:00:00"}
                ],
                "engagement_metric_avg": 412.5,
                "item_count": 2
            }
        ],
        "dataset_url": "/static/discovery_20251001000000.csv"
    }"#;

    #[test]
    fn test_results_envelope() {
        let set = ResultSet::from_json_str(DISCOVERY_RESPONSE).expect("取り込み失敗");
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.groups[0].item_count(), 2);
        assert_eq!(set.groups[0].engagement_metric_avg(), 412.5);
        assert!(set.groups[0].group_key().is_some());
        assert_eq!(set.dataset_url.as_deref(), Some("/static/discovery_20251001000000.csv"));
    }

    #[test]
    fn test_bare_array_of_raw_items() {
        let json = r#"[
            {"id": "p1", "engagement_likes": 2500, "engagement_views": 12000,
             "timestamp": "2025-10-01T10:00:00Z"},
            {"id": "p2", "engagement_likes": 10, "engagement_views": 20}
        ]"#;
        let set = ResultSet::from_json_str(json).expect("取り込み失敗");
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.skipped, 1);
        assert_eq!(set.groups[0].engagement_metric_avg(), 7250.0);
        assert_eq!(set.groups[0].item_count(), 1);
    }

    #[test]
    fn test_items_envelope_wins_over_results() {
        let json = r#"{
            "items": [{"id": "i", "timestamp": "2025-10-02"}],
            "results": [{"id": "r1", "timestamp": "2025-10-03"}, {"id": "r2", "timestamp": "2025-10-04"}]
        }"#;
        let set = ResultSet::from_json_str(json).expect("取り込み失敗");
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.groups[0].first_item().id, "i");
    }

    #[test]
    fn test_unknown_shape_is_empty() {
        let set = ResultSet::from_json_str(r#"{"status": "ok"}"#).expect("取り込み失敗");
        assert!(set.is_empty());
        let set = ResultSet::from_json_str(r#"{"results": [], "dataset_url": null}"#).expect("取り込み失敗");
        assert!(set.is_empty());
        assert!(set.dataset_url.is_none());
    }

    #[test]
    fn test_backend_error() {
        let err = ResultSet::from_json_str(r#"{"error": "Failed to process dataset"}"#).unwrap_err();
        assert!(matches!(err, Error::Backend(ref m) if m == "Failed to process dataset"));
    }

    #[test]
    fn test_malformed_group_is_error() {
        let json = r#"{"results": [{"timestamp": "2025-10-01", "items": [], "engagement_metric_avg": 1.0}]}"#;
        let err = ResultSet::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::EmptyGroup { .. }));
    }

    #[test]
    fn test_json_roundtrip_keeps_groups() {
        let set = ResultSet::from_json_str(DISCOVERY_RESPONSE).expect("取り込み失敗");
        let json = set.to_json_pretty().expect("書き出し失敗");
        let restored = ResultSet::from_json_str(&json).expect("再取り込み失敗");
        assert_eq!(restored.groups.len(), set.groups.len());
        assert_eq!(restored.groups[0].timestamp(), set.groups[0].timestamp());
        assert_eq!(restored.groups[0].items(), set.groups[0].items());
        assert_eq!(restored.dataset_url, set.dataset_url);
    }

    #[test]
    fn test_from_items_skips_missing_timestamps() {
        let items = vec![
            Item { id: "a".into(), timestamp: crate::timestamp::parse_instant("2025-10-01"), ..Default::default() },
            Item { id: "b".into(), ..Default::default() },
        ];
        let set = ResultSet::from_items(items);
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.skipped, 1);
    }
}
