//! Control Panel Widget
//! Left side panel: data source, page navigation, export and status.

use crate::gui::Page;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// What the user picked in the side panel.
#[derive(Default, Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub page: Page,
}

/// Left side control panel with file selection and page navigation.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub progress: f32,
    pub status: String,
    pub data_ready: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            progress: 0.0,
            status: "Ready".to_string(),
            data_ready: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 MBTI Atlas")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Personality types by country")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .settings
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file selected".to_string());

                ui.label(RichText::new(&path_text).size(12.0).color(
                    if self.settings.csv_path.is_some() {
                        ui.visuals().text_color()
                    } else {
                        Color32::GRAY
                    },
                ));
                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = ControlPanelAction::BrowseCsv;
                    }
                    ui.add_enabled_ui(self.settings.csv_path.is_some(), |ui| {
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Pages =====
        ui.label(RichText::new("🧭 Pages").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(self.data_ready, |ui| {
            for page in Page::ALL {
                ui.selectable_value(&mut self.settings.page, page, page.title());
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Chart PNG").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);
        ui.label(
            RichText::new(&self.status)
                .size(11.0)
                .color(status_color(&self.status)),
        );

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

fn status_color(status: &str) -> Color32 {
    if status.starts_with("Error") {
        Color32::from_rgb(220, 53, 69)
    } else if status.starts_with("Loaded") || status.starts_with("Exported") {
        Color32::from_rgb(40, 167, 69)
    } else {
        Color32::GRAY
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
    ExportChart,
}
