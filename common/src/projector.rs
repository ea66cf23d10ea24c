//! プロット投影
//!
//! ResultGroup を描画用の点に変換する。点はグループのアイテム列を
//! 共有参照で保持し、クリック時はそれをそのまま選択へ渡す。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::timestamp::format_date;
use crate::types::{Item, ResultGroup};

/// 平方根スケールの係数
const MARKER_SCALE: f64 = 0.1;
/// マーカー半径の下限 (px)
const MARKER_MIN_RADIUS: f64 = 1.0;

/// 描画用の点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
    pub size_metric: f64,
    #[serde(skip)]
    pub items: Arc<[Item]>,
    pub item_count: usize,
    pub color: String,
    pub pattern: String,
    pub fit: String,
    pub influence: Option<String>,
}

impl PlotPoint {
    pub fn marker_radius(&self) -> f64 {
        marker_radius(self.size_metric)
    }

    pub fn hover_text(&self) -> String {
        format!(
            "Date: {}\nPattern: {}\nColor: {}\nFit: {}\nEngagement: {:.2}\nItems in Group: {}",
            format_date(&self.x),
            self.pattern,
            self.color,
            self.fit,
            self.size_metric,
            self.item_count,
        )
    }

    /// 接続線のグループキー `{color}-{pattern}`
    pub fn connection_key(&self) -> String {
        format!("{}-{}", self.color, self.pattern)
    }
}

/// 単調・劣線形なマーカー半径。負値やNaNは下限に落ちる
pub fn marker_radius(size_metric: f64) -> f64 {
    let scaled = size_metric.sqrt() * MARKER_SCALE;
    if scaled.is_nan() {
        MARKER_MIN_RADIUS
    } else {
        scaled.max(MARKER_MIN_RADIUS)
    }
}

pub fn project(group: &ResultGroup) -> PlotPoint {
    let first = group.first_item();
    PlotPoint {
        x: group.timestamp(),
        y: group.engagement_metric_avg(),
        size_metric: group.engagement_metric_avg(),
        items: group.shared_items(),
        item_count: group.item_count(),
        color: first.color_or_default(),
        pattern: first.pattern_or_unknown(),
        fit: first.fit_or_unknown(),
        influence: first.influence.clone(),
    }
}

pub fn project_all(groups: &[ResultGroup]) -> Vec<PlotPoint> {
    groups.iter().map(project).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{group, item};

    #[test]
    fn test_project_copies_group_fields() {
        let mut b = item("b", "Blue", "Solid");
        b.fit = Some("Relaxed".into());
        b.influence = Some("SS".into());
        let g = group("2025-10-05", vec![b, item("c", "red", "checks")], 200.0);

        let point = project(&g);
        assert_eq!(point.x, g.timestamp());
        assert_eq!(point.y, 200.0);
        assert_eq!(point.size_metric, 200.0);
        assert_eq!(point.item_count, 2);
        assert_eq!(point.color, "blue");
        assert_eq!(point.pattern, "solid");
        assert_eq!(point.fit, "relaxed");
        assert_eq!(point.influence.as_deref(), Some("SS"));
        assert!(Arc::ptr_eq(&point.items, &g.shared_items()));
    }

    #[test]
    fn test_marker_radius_monotonic_with_floor() {
        assert_eq!(marker_radius(0.0), 1.0);
        assert_eq!(marker_radius(-25.0), 1.0);
        assert_eq!(marker_radius(f64::NAN), 1.0);
        assert_eq!(marker_radius(100.0), 1.0);
        assert!((marker_radius(10_000.0) - 10.0).abs() < 1e-9);
        assert!(marker_radius(40_000.0) > marker_radius(10_000.0));
        // 劣線形: 値が4倍でも半径は2倍
        assert!((marker_radius(40_000.0) / marker_radius(10_000.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_text_contents() {
        let g = group("2025-10-01", vec![item("a", "blue", "solid")], 1234.5678);
        let text = project(&g).hover_text();
        assert!(text.contains("Date: 2025-10-01"));
        assert!(text.contains("Pattern: solid"));
        assert!(text.contains("Color: blue"));
        assert!(text.contains("Fit: unknown"));
        assert!(text.contains("Engagement: 1234.57"));
        assert!(text.contains("Items in Group: 1"));
    }

    #[test]
    fn test_connection_key() {
        let g = group("2025-10-01", vec![item("a", "Blue", "Polka Dots")], 1.0);
        assert_eq!(project(&g).connection_key(), "blue-polka dots");
    }
}
