//! プレディクタのデモデータ
//!
//! 予測バックエンドが未接続の間、プレディクタ画面はこの8件を1件ずつ
//! グループ化して表示する。

use crate::response::ResultSet;
use crate::timestamp::parse_instant;
use crate::types::Item;

struct DemoRow {
    id: &'static str,
    garment_type: &'static str,
    color: &'static str,
    pattern: &'static str,
    style: &'static str,
    likes: u64,
    views: u64,
    timestamp: &'static str,
    source: &'static str,
}

const PREDICTOR_ROWS: &[DemoRow] = &[
    DemoRow { id: "predicted_1", garment_type: "Kurta", color: "blue", pattern: "checks", style: "casual", likes: 2500, views: 12000, timestamp: "2025-10-01T10:00:00Z", source: "Instagram" },
    DemoRow { id: "predicted_2", garment_type: "T-Shirt", color: "red", pattern: "stripes", style: "athleisure", likes: 5000, views: 25000, timestamp: "2025-10-10T10:00:00Z", source: "YouTube" },
    DemoRow { id: "predicted_3", garment_type: "Jeans", color: "blue", pattern: "solid", style: "casual", likes: 1500, views: 8000, timestamp: "2025-10-20T10:00:00Z", source: "Facebook" },
    DemoRow { id: "predicted_4", garment_type: "Jacket", color: "black", pattern: "solid", style: "streetwear", likes: 4500, views: 20000, timestamp: "2025-11-05T10:00:00Z", source: "Celebrities" },
    DemoRow { id: "predicted_5", garment_type: "Dress", color: "green", pattern: "floral", style: "bohemian", likes: 3000, views: 15000, timestamp: "2025-11-15T10:00:00Z", source: "Cinema" },
    DemoRow { id: "predicted_6", garment_type: "Jeans", color: "blue", pattern: "solid", style: "casual", likes: 1500, views: 8000, timestamp: "2025-10-01T10:00:00Z", source: "Instagram" },
    DemoRow { id: "predicted_7", garment_type: "Jacket", color: "black", pattern: "solid", style: "streetwear", likes: 4500, views: 20000, timestamp: "2025-10-15T10:00:00Z", source: "YouTube" },
    DemoRow { id: "predicted_8", garment_type: "Dress", color: "green", pattern: "floral", style: "bohemian", likes: 3000, views: 15000, timestamp: "2025-11-05T10:00:00Z", source: "Celebrities" },
];

pub fn predictor_items() -> Vec<Item> {
    PREDICTOR_ROWS
        .iter()
        .map(|row| Item {
            id: row.id.to_string(),
            garment_type: row.garment_type.to_string(),
            source: row.source.to_string(),
            engagement_views: row.views,
            engagement_likes: row.likes,
            timestamp: parse_instant(row.timestamp),
            color: Some(row.color.to_string()),
            pattern: Some(row.pattern.to_string()),
            style: Some(row.style.to_string()),
            influence: Some("SS".to_string()),
            ..Default::default()
        })
        .collect()
}

pub fn predictor_result_set() -> ResultSet {
    ResultSet::from_items(predictor_items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::build_connections;
    use crate::projector::project_all;

    #[test]
    fn test_demo_groups_are_single_items() {
        let set = predictor_result_set();
        assert_eq!(set.groups.len(), 8);
        assert_eq!(set.skipped, 0);
        assert!(set.groups.iter().all(|g| g.item_count() == 1));
        assert_eq!(set.groups[0].engagement_metric_avg(), 7250.0);
    }

    #[test]
    fn test_demo_connections() {
        // blue-solid, black-solid, green-floral が2点ずつ
        let set = predictor_result_set();
        let traces = build_connections(&project_all(&set.groups));
        let keys: Vec<_> = traces.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["blue-solid", "black-solid", "green-floral"]);
        assert!(traces.iter().all(|t| t.xs.len() == 2));
    }
}
