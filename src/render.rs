//! ターミナル向けのテキスト描画
//!
//! すべて文字列を返すだけで、出力は呼び出し側が行う。

use std::fmt::Write as _;
use trendscope_common::timestamp::format_date;
use trendscope_common::views::TABLE_HEADERS;
use trendscope_common::{ChartState, DetailView, ResultVisualizationPipeline, TableView};

/// チャート（点一覧と接続線）。描けない場合は状態メッセージ
pub fn render_chart(pipeline: &ResultVisualizationPipeline) -> String {
    let mut out = String::new();
    let kind = pipeline.kind();

    let (points, traces) = match pipeline.chart() {
        ChartState::Ready { points, traces } => (points, traces),
        _ => {
            let message = pipeline.status_message().unwrap_or_default();
            let _ = writeln!(out, "{}", kind.title());
            let _ = writeln!(out, "  {}", message);
            return out;
        }
    };

    let _ = writeln!(
        out,
        "{} ({} points, {} connections)",
        kind.title(),
        points.len(),
        traces.len()
    );
    let _ = writeln!(
        out,
        "  {:>3}  {:<10}  {:>12}  {:>5}  {:<12}  {:<12}  {:<10}  {:>6}",
        "#", "Date", "Engagement", "Items", "Color", "Pattern", "Fit", "Radius"
    );
    for (index, point) in points.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}  {:<10}  {:>12.2}  {:>5}  {:<12}  {:<12}  {:<10}  {:>6.1}",
            index,
            format_date(&point.x),
            point.y,
            point.item_count,
            point.color,
            point.pattern,
            point.fit,
            point.marker_radius()
        );
    }

    if !traces.is_empty() {
        let _ = writeln!(out, "Connections:");
        for trace in traces {
            let path: Vec<String> = trace.xs.iter().map(format_date).collect();
            let _ = writeln!(out, "  {}  {}", trace.name, path.join(" -> "));
        }
    }
    out
}

/// 点の一行要約（対話選択用）
pub fn point_labels(pipeline: &ResultVisualizationPipeline) -> Vec<String> {
    pipeline
        .chart()
        .points()
        .iter()
        .map(|p| {
            format!(
                "{}  {} / {}  engagement {:.2}  ({} items)",
                format_date(&p.x),
                p.color,
                p.pattern,
                p.size_metric,
                p.item_count
            )
        })
        .collect()
}

pub fn render_detail(detail: &DetailView) -> String {
    let mut out = String::new();
    if detail.show_navigation {
        let prev = if detail.prev_enabled { "<- Previous" } else { "   (first) " };
        let next = if detail.next_enabled { "Next ->" } else { "(last)" };
        let _ = writeln!(out, "{}   {}   {}", prev, detail.position_label(), next);
    }
    let _ = writeln!(out, "Garment Breakdown");
    let _ = writeln!(out, "  Type:       {}", or_dash(&detail.garment_type));
    let _ = writeln!(out, "  Colors:     {}", detail.swatches.label());
    let _ = writeln!(out, "  Pattern:    {}", or_dash(&detail.pattern));
    let _ = writeln!(out, "  Style:      {}", or_dash(&detail.style));
    let _ = writeln!(out, "  Engagement: {}", detail.engagement_label());
    let _ = writeln!(out, "  Image:      {}", detail.image.label());
    out
}

pub fn render_table(table: &TableView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Garments at this point:");
    let _ = writeln!(
        out,
        "     {:<14}  {:<12}  {:>8}  {:>8}  {:<10}",
        TABLE_HEADERS[0], TABLE_HEADERS[1], TABLE_HEADERS[2], TABLE_HEADERS[3], TABLE_HEADERS[4]
    );
    for (index, row) in table.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}{:>2} {:<14}  {:<12}  {:>8}  {:>8}  {:<10}",
            if row.focused { '>' } else { ' ' },
            index,
            or_dash(&row.garment_type),
            or_dash(&row.source),
            row.views,
            row.likes,
            row.date
        );
    }
    out
}

/// 詳細とテーブルをまとめて描く（テーブルは2件以上のときだけ）
pub fn render_selection(pipeline: &ResultVisualizationPipeline, image_base: &str) -> String {
    let mut out = String::new();
    match pipeline.detail_view(image_base) {
        Some(detail) => out.push_str(&render_detail(&detail)),
        None => out.push_str("No item selected.\n"),
    }
    if let Some(table) = pipeline.table_view() {
        out.push('\n');
        out.push_str(&render_table(&table));
    }
    out
}

/// `plot --json` の出力
pub fn chart_json(pipeline: &ResultVisualizationPipeline) -> serde_json::Value {
    serde_json::json!({
        "pipeline": pipeline.kind(),
        "filters": pipeline.filters(),
        "connections_enabled": pipeline.connections_enabled(),
        "dataset_url": pipeline.dataset_url(),
        "chart": pipeline.chart(),
        "points_hover": pipeline
            .chart()
            .points()
            .iter()
            .map(|p| p.hover_text())
            .collect::<Vec<_>>(),
    })
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
