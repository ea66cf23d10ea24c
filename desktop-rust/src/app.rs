use std::path::Path;

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};
use tracing::{info, warn};
use trendscope_common::{demo, PipelineKind, ResultSet, ViewerSettings};

use crate::io::load_result_set;
use crate::model::{AppState, TABS};
use crate::panel::{show_chart, show_detail, show_filters, show_table};
use crate::thumbs::Thumbnails;

pub struct DesktopApp {
    state: AppState,
    thumbs: Thumbnails,
    status: String,
}

impl DesktopApp {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            state: AppState::new(settings),
            thumbs: Thumbnails::default(),
            status: String::new(),
        }
    }

    fn open_json(&mut self, kind: PipelineKind) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match self.load_from_path(kind, &path) {
                Ok(_) => self.status = format!("Loaded {}", path.display()),
                Err(err) => self.status = format!("Load failed: {err:#}"),
            }
        }
    }

    fn reload_json(&mut self) {
        let kind = self.state.active;
        let Some(path) = self.state.source_path(kind).map(Path::to_path_buf) else {
            self.status = "No source file loaded".to_string();
            return;
        };
        match self.load_from_path(kind, &path) {
            Ok(_) => self.status = format!("Reloaded {}", path.display()),
            Err(err) => self.status = format!("Reload failed: {err:#}"),
        }
    }

    fn load_from_path(&mut self, kind: PipelineKind, path: &Path) -> Result<()> {
        match load_result_set(path) {
            Ok(result_set) => {
                self.install(kind, result_set);
                self.state.set_source(kind, Some(path.to_path_buf()));
                Ok(())
            }
            Err(err) => {
                // 応答の形が壊れている場合はチャートをエラー表示にする
                if let Some(core) = err.downcast_ref::<trendscope_common::Error>() {
                    self.state.pipeline_mut(kind).fail(core);
                }
                warn!(pipeline = %kind, path = %path.display(), error = %format!("{err:#}"), "result set load failed");
                Err(err)
            }
        }
    }

    fn load_demo(&mut self) {
        self.install(PipelineKind::Predictor, demo::predictor_result_set());
        self.state.set_source(PipelineKind::Predictor, None);
        self.state.active = PipelineKind::Predictor;
        self.status = "Loaded predictor demo data".to_string();
    }

    fn install(&mut self, kind: PipelineKind, result_set: ResultSet) {
        info!(
            pipeline = %kind,
            groups = result_set.groups.len(),
            skipped = result_set.skipped,
            "result set installed"
        );
        self.state.pipeline_mut(kind).load_result_set(result_set);
        self.thumbs.clear();
    }

    fn render_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Discovery Results").clicked() {
                    self.open_json(PipelineKind::Discovery);
                    self.state.active = PipelineKind::Discovery;
                    ui.close_menu();
                }
                if ui.button("Open Predictor Results").clicked() {
                    self.open_json(PipelineKind::Predictor);
                    self.state.active = PipelineKind::Predictor;
                    ui.close_menu();
                }
                let reload_enabled = self.state.source_path(self.state.active).is_some();
                if ui.add_enabled(reload_enabled, egui::Button::new("Reload")).clicked() {
                    self.reload_json();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Load Predictor Demo").clicked() {
                    self.load_demo();
                    ui.close_menu();
                }
            });

            ui.separator();
            for kind in TABS {
                ui.selectable_value(&mut self.state.active, kind, kind.title());
            }

            ui.separator();
            if !self.status.is_empty() {
                ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
            }
        });
    }

    fn render_active(&mut self, ctx: &egui::Context) {
        let kind = self.state.active;
        let image_base = self.state.settings.image_base_url.clone();
        let local_images = self.state.settings.images_are_local();
        let pipeline = self.state.pipeline_mut(kind);

        egui::SidePanel::left(egui::Id::new(("filters", kind))).resizable(false).show(ctx, |ui| {
            show_filters(ui, pipeline);
        });

        egui::SidePanel::right(egui::Id::new(("detail", kind)))
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    show_detail(ui, pipeline, &image_base, local_images, &mut self.thumbs);
                    show_table(ui, pipeline);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(kind.title());
            if let Some(url) = pipeline.dataset_url() {
                ui.horizontal(|ui| {
                    ui.label("Dataset:");
                    ui.hyperlink(url);
                });
            }
            ui.separator();
            show_chart(ui, pipeline);
        });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.thumbs.is_busy() {
            ctx.request_repaint();
        }
        self.thumbs.poll(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            self.render_menu(ui);
        });

        self.render_active(ctx);
    }
}
