//! MBTI Atlas Main Application
//! Main window with control panel and page view.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{CountryTable, DatasetCache};
use crate::gui::{ControlPanel, ControlPanelAction, PageView};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Arc<CountryTable>),
    Error(String),
}

/// Main application window.
pub struct MbtiAtlasApp {
    config: DashboardConfig,
    cache: Arc<DatasetCache>,
    control_panel: ControlPanel,
    page_view: PageView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl MbtiAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            page_view: PageView::new(config.clone()),
            config,
            cache: Arc::new(DatasetCache::new()),
            control_panel: ControlPanel::new(),
            load_rx: None,
            is_loading: false,
        };

        let initial = app.config.data_path.clone();
        if initial.exists() {
            app.start_load(initial);
        } else {
            log::warn!(
                "Data file {} not found; choose one with Browse",
                initial.display()
            );
            app.control_panel
                .set_progress(0.0, "Choose a CSV file to begin");
        }
        app
    }

    /// Load `path` through the cache on a background thread.
    fn start_load(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.page_view.clear();
        self.control_panel.data_ready = false;
        self.control_panel.export_enabled = false;
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_progress(10.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let cache = Arc::clone(&self.cache);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));
            match cache.load(&path) {
                Ok(table) => {
                    let _ = tx.send(LoadResult::Complete(table));
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Drop the cached table for the current file and read it again.
    fn handle_reload(&mut self) {
        let Some(path) = self.control_panel.settings.csv_path.clone() else {
            return;
        };
        if self.cache.invalidate(&path) {
            log::info!("Invalidated cached table for {}", path.display());
        }
        self.start_load(path);
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(40.0, &status);
                    }
                    LoadResult::Complete(table) => {
                        let status = format!(
                            "Loaded {} countries, {} types",
                            table.row_count(),
                            table.type_columns().len()
                        );
                        self.page_view.set_table(table);
                        self.control_panel.data_ready = true;
                        self.control_panel.set_progress(100.0, &status);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Save the chart on the current page as a PNG and open it.
    fn handle_export_chart(&mut self) {
        let Some((title, series)) = self
            .page_view
            .export_series(self.control_panel.settings.page)
        else {
            self.control_panel.set_progress(0.0, "No chart on this page");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("mbti_chart.png")
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        let size = (self.config.export_width, self.config.export_height);
        match StaticChartRenderer::render_bars_png(&series, &title, &output_path, size) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {}", output_path.display()),
                );
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for MbtiAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        self.control_panel.export_enabled = self
            .page_view
            .export_series(self.control_panel.settings.page)
            .is_some();

        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        let page = self.control_panel.settings.page;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.page_view.show(ui, page);
        });
    }
}
