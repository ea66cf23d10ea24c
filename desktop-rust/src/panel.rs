//! パイプライン1本分の画面（フィルタ・散布図・カルーセル・テーブル）

use std::hash::Hash;

use chrono::{DateTime, Utc};
use eframe::egui::{self, Color32, RichText};
use egui_plot::{Line, LineStyle, Plot, PlotPoints, PlotUi, Points};
use tracing::warn;
use trendscope_common::connections::Dash;
use trendscope_common::filter::{ALL, COLOR_OPTIONS, FIT_OPTIONS, PATTERN_OPTIONS};
use trendscope_common::views::{ImageView, Swatches, NO_IMAGE, TABLE_HEADERS};
use trendscope_common::{ChartState, Direction, PlotPoint, ResultVisualizationPipeline};

use crate::colors::marker_color;
use crate::io::local_image_path;
use crate::thumbs::{Thumb, Thumbnails};

const SECONDS_PER_DAY: f64 = 86_400.0;
/// マーカー半径に足すクリック判定の余裕 (px)
const CLICK_SLOP: f32 = 6.0;
const PLOT_HEIGHT: f32 = 380.0;

// =============================================
// フィルタ
// =============================================

pub fn show_filters(ui: &mut egui::Ui, pipeline: &mut ResultVisualizationPipeline) {
    let kind = pipeline.kind();
    let mut filters = pipeline.filters().clone();

    ui.heading("Filters");
    ui.add_space(4.0);
    attribute_combo(ui, (kind, "color"), "Color", &mut filters.color, COLOR_OPTIONS);
    attribute_combo(ui, (kind, "pattern"), "Pattern", &mut filters.pattern, PATTERN_OPTIONS);
    attribute_combo(ui, (kind, "fit"), "Fit", &mut filters.fit, FIT_OPTIONS);
    pipeline.set_filters(filters);

    ui.add_space(8.0);
    if ui.button("Reset Filters").clicked() {
        pipeline.reset_filters();
    }

    let mut connections = pipeline.connections_enabled();
    if ui.checkbox(&mut connections, "Show Connections").changed() {
        pipeline.set_connections_enabled(connections);
    }
}

fn attribute_combo(
    ui: &mut egui::Ui,
    id: impl Hash,
    label: &str,
    value: &mut String,
    options: &[&str],
) {
    ui.label(RichText::new(label).color(Color32::from_gray(200)));
    egui::ComboBox::from_id_source(id)
        .selected_text(value.as_str())
        .width(160.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, ALL.to_string(), ALL);
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
    ui.add_space(4.0);
}

// =============================================
// 散布図
// =============================================

fn plot_x(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp() as f64 / SECONDS_PER_DAY
}

fn axis_date(value: f64) -> String {
    DateTime::<Utc>::from_timestamp((value * SECONDS_PER_DAY).round() as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn line_style(dash: Dash) -> LineStyle {
    match dash {
        Dash::Solid => LineStyle::Solid,
        Dash::Dashed => LineStyle::dashed_loose(),
    }
}

pub fn show_chart(ui: &mut egui::Ui, pipeline: &mut ResultVisualizationPipeline) {
    if let Some(message) = pipeline.status_message() {
        let color = match pipeline.chart() {
            ChartState::Error { .. } => Color32::from_rgb(239, 68, 68),
            _ => Color32::from_gray(170),
        };
        ui.allocate_ui_with_layout(
            egui::vec2(ui.available_width(), PLOT_HEIGHT),
            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
            |ui| {
                ui.label(RichText::new(message).color(color).size(16.0));
            },
        );
        return;
    }

    let kind = pipeline.kind();
    let clicked = {
        let points = pipeline.chart().points();
        let traces = pipeline.chart().traces();

        Plot::new(("timeline", kind))
            .height(PLOT_HEIGHT)
            .x_axis_formatter(|mark, _chars, _range| axis_date(mark.value))
            // 接続線は名前を持たず、ホバー表示も出さない
            .label_formatter(|name, _value| name.to_string())
            .show(ui, |plot_ui| {
                for trace in traces {
                    let coords: Vec<[f64; 2]> = trace
                        .xs
                        .iter()
                        .zip(&trace.ys)
                        .map(|(x, y)| [plot_x(x), *y])
                        .collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from(coords))
                            .color(marker_color(&trace.style.color))
                            .width(trace.style.width)
                            .style(line_style(trace.style.dash)),
                    );
                }
                for point in points {
                    plot_ui.points(
                        Points::new(vec![[plot_x(&point.x), point.y]])
                            .radius(point.marker_radius() as f32)
                            .color(marker_color(&point.color))
                            .filled(true)
                            .name(point.hover_text()),
                    );
                }
                if plot_ui.response().clicked() {
                    nearest_point(plot_ui, points)
                } else {
                    None
                }
            })
            .inner
    };

    if let Some(index) = clicked {
        if let Err(err) = pipeline.click_point(index) {
            warn!(error = %err, "point click ignored");
        }
    }
}

/// クリック位置に最も近い点（マーカーの外なら `None`）
fn nearest_point(plot_ui: &PlotUi, points: &[PlotPoint]) -> Option<usize> {
    let pointer = plot_ui.response().interact_pointer_pos()?;
    points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let center = plot_ui.screen_from_plot(egui_plot::PlotPoint::new(plot_x(&point.x), point.y));
            let distance = center.distance(pointer);
            (distance <= point.marker_radius() as f32 + CLICK_SLOP).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

// =============================================
// カルーセル
// =============================================

pub fn show_detail(
    ui: &mut egui::Ui,
    pipeline: &mut ResultVisualizationPipeline,
    image_base: &str,
    local_images: bool,
    thumbs: &mut Thumbnails,
) {
    let Some(detail) = pipeline.detail_view(image_base) else {
        ui.label("Click a point to see its garments.");
        return;
    };

    let mut step = None;
    if detail.show_navigation {
        ui.horizontal(|ui| {
            if ui.add_enabled(detail.prev_enabled, egui::Button::new("< Previous")).clicked() {
                step = Some(Direction::Prev);
            }
            ui.label(detail.position_label());
            if ui.add_enabled(detail.next_enabled, egui::Button::new("Next >")).clicked() {
                step = Some(Direction::Next);
            }
        });
        ui.add_space(4.0);
    }

    show_image(ui, &detail.image, local_images, thumbs);
    ui.add_space(6.0);

    ui.label(RichText::new("Garment Breakdown").strong());
    egui::Grid::new(("breakdown", pipeline.kind()))
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            field_row(ui, "Type", &detail.garment_type);
            ui.label(RichText::new("Colors").color(Color32::from_gray(200)));
            ui.horizontal(|ui| match &detail.swatches {
                Swatches::Colors(colors) => {
                    for color in colors {
                        swatch(ui, color);
                    }
                }
                Swatches::NoColorInfo => {
                    ui.label(detail.swatches.label());
                }
            });
            ui.end_row();
            field_row(ui, "Pattern", &detail.pattern);
            field_row(ui, "Style", &detail.style);
            field_row(ui, "Engagement", &detail.engagement_label());
        });

    if let Some(direction) = step {
        pipeline.navigate(direction);
    }
}

fn show_image(ui: &mut egui::Ui, image: &ImageView, local_images: bool, thumbs: &mut Thumbnails) {
    let size = egui::vec2(320.0, 240.0);
    let placeholder = |ui: &mut egui::Ui, text: &str| {
        ui.allocate_ui_with_layout(
            size,
            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
            |ui| {
                ui.label(RichText::new(text).color(Color32::from_gray(150)));
            },
        );
    };

    let ImageView::Link(location) = image else {
        placeholder(ui, NO_IMAGE);
        return;
    };
    if !local_images {
        ui.hyperlink(location);
        return;
    }
    let Some(path) = local_image_path(location) else {
        placeholder(ui, NO_IMAGE);
        return;
    };
    match thumbs.lookup(&path.to_string_lossy()) {
        Thumb::Ready(texture) => {
            ui.add(egui::Image::new(texture).fit_to_exact_size(size));
        }
        Thumb::Loading => placeholder(ui, "Loading..."),
        Thumb::Missing => placeholder(ui, NO_IMAGE),
    }
}

fn field_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).color(Color32::from_gray(200)));
    ui.label(or_dash(value));
    ui.end_row();
}

fn swatch(ui: &mut egui::Ui, color: &str) {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 3.0, marker_color(color));
    let _ = response.on_hover_text(color);
}

// =============================================
// テーブル
// =============================================

pub fn show_table(ui: &mut egui::Ui, pipeline: &mut ResultVisualizationPipeline) {
    let Some(table) = pipeline.table_view() else {
        return;
    };

    ui.separator();
    ui.label(RichText::new("Garments at this point").strong());

    let mut picked = None;
    egui::Grid::new(("garment_table", pipeline.kind()))
        .num_columns(TABLE_HEADERS.len())
        .striped(true)
        .show(ui, |ui| {
            for header in TABLE_HEADERS {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for (index, row) in table.rows.iter().enumerate() {
                if ui.selectable_label(row.focused, or_dash(&row.garment_type)).clicked() {
                    picked = Some(index);
                }
                ui.label(or_dash(&row.source));
                ui.label(row.views.to_string());
                ui.label(row.likes.to_string());
                ui.label(&row.date);
                ui.end_row();
            }
        });

    if let Some(index) = picked {
        pipeline.select_row(index);
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
