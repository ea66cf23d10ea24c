//! 接続線の構築
//!
//! 色と柄が同じ点を時刻順に結ぶ折れ線を作る。1点しかないキーは線を持たない。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::projector::PlotPoint;

/// 線種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dashed,
}

/// 接続線のスタイル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    pub color: String,
    pub width: f32,
    pub dash: Dash,
    pub hoverable: bool,
}

/// 接続線1本
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub key: String,
    pub xs: Vec<DateTime<Utc>>,
    pub ys: Vec<f64>,
    pub style: TraceStyle,
}

/// フィルタ後の点から接続線を作る（キーは初出順）
pub fn build_connections(points: &[PlotPoint]) -> Vec<Trace> {
    let mut order: Vec<(String, Vec<&PlotPoint>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for point in points {
        let key = point.connection_key();
        match index.get(&key) {
            Some(&slot) => order[slot].1.push(point),
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, vec![point]));
            }
        }
    }

    order
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, mut members)| {
            // 安定ソート: 同時刻は元の順序を保つ
            members.sort_by_key(|p| p.x);
            Trace {
                name: format!("Connection: {}", key),
                xs: members.iter().map(|p| p.x).collect(),
                ys: members.iter().map(|p| p.y).collect(),
                style: TraceStyle {
                    color: members[0].color.clone(),
                    width: 1.0,
                    dash: Dash::Dashed,
                    hoverable: false,
                },
                key,
            }
        })
        .collect()
}
