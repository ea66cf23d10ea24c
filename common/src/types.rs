//! 結果データの型定義
//!
//! - Item: バックエンドから取得した生レコード（取得後は不変）
//! - ResultGroup: タイムライン上の1点に対応するバケット
//! - GroupPayload: ResultGroup のワイヤ形式（検証前）

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::timestamp::{self, parse_instant};

/// 色が無いときのマーカー色
pub const DEFAULT_MARKER_COLOR: &str = "#8884d8";

/// 柄・フィットが無いときの値
pub const UNKNOWN_ATTRIBUTE: &str = "unknown";

/// 生アイテム
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub garment_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(deserialize_with = "lenient_count")]
    pub engagement_views: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub engagement_likes: u64,
    #[serde(deserialize_with = "timestamp::lenient")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient_palette")]
    pub palette: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub pattern: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub fit: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub image_url: Option<String>,
    #[serde(alias = "influence_identifier", deserialize_with = "lenient_opt_string")]
    pub influence: Option<String>,
}

impl Item {
    /// フィルタ・着色用の色（小文字）
    pub fn color_or_default(&self) -> String {
        non_empty(&self.color)
            .unwrap_or(DEFAULT_MARKER_COLOR)
            .to_lowercase()
    }

    pub fn pattern_or_unknown(&self) -> String {
        non_empty(&self.pattern).unwrap_or(UNKNOWN_ATTRIBUTE).to_lowercase()
    }

    pub fn fit_or_unknown(&self) -> String {
        non_empty(&self.fit).unwrap_or(UNKNOWN_ATTRIBUTE).to_lowercase()
    }

    /// 表示用の色リスト。パレットが優先され、無ければ単色、どちらも無ければ空
    pub fn swatches(&self) -> Vec<String> {
        match &self.palette {
            Some(palette) if !palette.is_empty() => palette.clone(),
            _ => non_empty(&self.color).map(|c| vec![c.to_string()]).unwrap_or_default(),
        }
    }

    /// 画像参照（空文字は未設定扱い）
    pub fn image_ref(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    /// 1件グループ化する際のエンゲージメント値: (いいね + 再生) / 2
    pub fn engagement_metric(&self) -> f64 {
        (self.engagement_likes as f64 + self.engagement_views as f64) / 2.0
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// タイムラインの1バケット
///
/// `items` は空にならず、`item_count` は構築時に確定する。
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGroup {
    timestamp: DateTime<Utc>,
    items: Arc<[Item]>,
    engagement_metric_avg: f64,
    item_count: usize,
    group_key: Option<serde_json::Value>,
}

impl ResultGroup {
    pub fn new(
        timestamp: DateTime<Utc>,
        items: Vec<Item>,
        engagement_metric_avg: f64,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyGroup { timestamp: timestamp.to_rfc3339() });
        }
        let item_count = items.len();
        Ok(Self {
            timestamp,
            items: items.into(),
            engagement_metric_avg,
            item_count,
            group_key: None,
        })
    }

    /// 生アイテム1件をそのままグループ化する（タイムスタンプ必須）
    pub fn single(item: Item) -> Result<Self> {
        let timestamp = item
            .timestamp
            .ok_or_else(|| Error::InvalidTimestamp(format!("item {:?} has no timestamp", item.id)))?;
        let metric = item.engagement_metric();
        Self::new(timestamp, vec![item], metric)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// クリック時に選択へ渡す共有参照
    pub fn shared_items(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    pub fn first_item(&self) -> &Item {
        // 構築時に非空を保証している
        &self.items[0]
    }

    pub fn engagement_metric_avg(&self) -> f64 {
        self.engagement_metric_avg
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn group_key(&self) -> Option<&serde_json::Value> {
        self.group_key.as_ref()
    }
}

/// ResultGroup のワイヤ形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPayload {
    pub timestamp: String,
    pub items: Vec<Item>,
    pub engagement_metric_avg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_key: Option<serde_json::Value>,
}

impl TryFrom<GroupPayload> for ResultGroup {
    type Error = Error;

    fn try_from(payload: GroupPayload) -> Result<Self> {
        let timestamp = parse_instant(&payload.timestamp)
            .ok_or_else(|| Error::InvalidTimestamp(payload.timestamp.clone()))?;

        if let Some(declared) = payload.item_count {
            if declared != payload.items.len() {
                return Err(Error::ItemCountMismatch {
                    timestamp: payload.timestamp,
                    declared,
                    actual: payload.items.len(),
                });
            }
        }

        let mut group = ResultGroup::new(timestamp, payload.items, payload.engagement_metric_avg)?;
        group.group_key = payload.group_key;
        Ok(group)
    }
}

impl From<&ResultGroup> for GroupPayload {
    fn from(group: &ResultGroup) -> Self {
        Self {
            timestamp: group.timestamp.to_rfc3339(),
            items: group.items.to_vec(),
            engagement_metric_avg: group.engagement_metric_avg,
            item_count: Some(group.item_count),
            group_key: group.group_key.clone(),
        }
    }
}

// =============================================
// 寛容デシリアライザ（不正値はデフォルトへ縮退）
// =============================================

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u64)
        .unwrap_or(0))
}

fn lenient_palette<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(values)) => Some(
            values
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn item(id: &str, color: &str, pattern: &str) -> Item {
        Item {
            id: id.to_string(),
            garment_type: "Kurta".to_string(),
            source: "Instagram".to_string(),
            color: Some(color.to_string()),
            pattern: Some(pattern.to_string()),
            ..Default::default()
        }
    }

    pub fn group(date: &str, items: Vec<Item>, metric: f64) -> ResultGroup {
        let timestamp = parse_instant(date).expect("日付パース失敗");
        ResultGroup::new(timestamp, items, metric).expect("グループ構築失敗")
    }
}
