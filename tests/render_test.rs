//! テキスト描画テスト

use trendscope::render::{chart_json, point_labels, render_chart, render_selection};
use trendscope_common::{
    demo, Direction, Item, PipelineKind, ResultGroup, ResultVisualizationPipeline,
};

fn item(id: &str, garment_type: &str, color: &str) -> Item {
    Item {
        id: id.to_string(),
        garment_type: garment_type.to_string(),
        source: "Instagram".to_string(),
        color: Some(color.to_string()),
        pattern: Some("solid".to_string()),
        engagement_likes: 10,
        engagement_views: 20,
        timestamp: trendscope_common::timestamp::parse_instant("2025-10-01"),
        ..Default::default()
    }
}

fn demo_pipeline() -> ResultVisualizationPipeline {
    let mut pipeline = ResultVisualizationPipeline::new(PipelineKind::Predictor);
    pipeline.load_result_set(demo::predictor_result_set());
    pipeline
}

fn grouped_pipeline() -> ResultVisualizationPipeline {
    let items = vec![
        item("a", "Jeans", "blue"),
        item("b", "Jacket", "black"),
        item("c", "Dress", "green"),
    ];
    let timestamp = items[0].timestamp.unwrap();
    let group = ResultGroup::new(timestamp, items, 15.0).unwrap();
    let mut pipeline = ResultVisualizationPipeline::new(PipelineKind::Discovery);
    pipeline.load(vec![group]);
    pipeline
}

#[test]
fn test_render_chart_lists_points_and_connections() {
    let out = render_chart(&demo_pipeline());

    assert!(out.starts_with("Trend Prediction Output (8 points, 3 connections)"));
    assert!(out.contains("Connection: blue-solid"));
    assert!(out.contains("2025-10-01 -> 2025-10-20"));
}

#[test]
fn test_render_chart_empty_message() {
    let pipeline = ResultVisualizationPipeline::new(PipelineKind::Discovery);
    let out = render_chart(&pipeline);

    assert!(out.contains("No results available. Try different inputs."));
}

#[test]
fn test_point_labels_follow_chart_order() {
    let labels = point_labels(&demo_pipeline());
    assert_eq!(labels.len(), 8);
    assert!(labels[0].starts_with("2025-10-01  blue / checks"));
}

#[test]
fn test_render_selection_single_item_has_no_table() {
    let mut pipeline = demo_pipeline();
    pipeline.click_point(1).unwrap();
    let out = render_selection(&pipeline, "");

    assert!(out.contains("Garment Breakdown"));
    assert!(out.contains("T-Shirt"));
    assert!(!out.contains(" of "));
    assert!(!out.contains("Garments at this point:"));
}

#[test]
fn test_render_selection_carousel_and_table() {
    let mut pipeline = grouped_pipeline();
    pipeline.navigate(Direction::Next);
    let out = render_selection(&pipeline, "http://localhost:8000");

    assert!(out.contains("2 of 3"));
    assert!(out.contains("Garments at this point:"));
    assert!(out.contains("> 1 Jacket"));
    assert!(out.contains("Garment Viewer not available"));
}

#[test]
fn test_render_selection_without_selection() {
    let pipeline = ResultVisualizationPipeline::new(PipelineKind::Discovery);
    assert_eq!(render_selection(&pipeline, ""), "No item selected.\n");
}

#[test]
fn test_chart_json_shape() {
    let value = chart_json(&demo_pipeline());

    assert_eq!(value["pipeline"], "predictor");
    assert_eq!(value["filters"]["color"], "all");
    assert_eq!(value["chart"]["state"], "ready");
    assert_eq!(value["points_hover"].as_array().map(Vec::len), Some(8));
}
