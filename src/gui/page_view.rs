//! Page View Widget
//! Central panel: renders the selected dashboard page from the loaded table.

use crate::charts::{
    badges_for, card_color, medal, profile_series, ranking_series, ChartPlotter, ACCENT,
};
use crate::config::DashboardConfig;
use crate::data::{
    country_profile, default_country, group_frame, sorted_countries, top_k, CountryTable,
    RankedEntry, RatioKey, TemperamentGroup, COUNTRY_COLUMN,
};
use crate::quiz::{recommend, QuizOutcome, QuizResponse, QUESTIONS};
use crate::stats::{ColumnSummary, StatsCalculator};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use polars::prelude::*;
use std::sync::Arc;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const CARD_TEXT: Color32 = Color32::from_gray(40);
const CHART_HEIGHT: f32 = 380.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Preview,
    TopTypes,
    CountryProfile,
    SimilarCountries,
    TemperamentCards,
    Quiz,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Preview,
        Page::TopTypes,
        Page::CountryProfile,
        Page::SimilarCountries,
        Page::TemperamentCards,
        Page::Quiz,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Preview => "📋 Data Preview",
            Page::TopTypes => "🌟 Top Countries by Type",
            Page::CountryProfile => "🌍 Country Profile",
            Page::SimilarCountries => "✈ Similar Countries",
            Page::TemperamentCards => "🗺 Temperament Cards",
            Page::Quiz => "🧠 Mini Quiz",
        }
    }
}

/// Rows of a frame as `(country, values)`; used for the group preview.
fn frame_rows(df: &DataFrame) -> PolarsResult<Vec<(String, Vec<f64>)>> {
    let countries: Vec<String> = df
        .column(COUNTRY_COLUMN)?
        .str()?
        .into_iter()
        .map(|c| c.unwrap_or_default().to_string())
        .collect();

    let mut value_columns = Vec::new();
    for column in df.get_columns().iter().skip(1) {
        let values: Vec<f64> = column.f64()?.into_no_null_iter().collect();
        value_columns.push(values);
    }

    Ok(countries
        .into_iter()
        .enumerate()
        .map(|(row, country)| {
            let values = value_columns.iter().map(|col| col[row]).collect();
            (country, values)
        })
        .collect())
}

/// Everything computed once per loaded table.
struct LoadedData {
    table: Arc<CountryTable>,
    countries_sorted: Vec<String>,
    types_sorted: Vec<String>,
    summaries: Vec<ColumnSummary>,
    group_preview: Result<Vec<(String, Vec<f64>)>, String>,
}

/// Scrollable page area driven by the control panel's page selection.
pub struct PageView {
    config: DashboardConfig,
    data: Option<LoadedData>,

    top_type: String,
    profile_country: String,
    similar_type: String,
    card_group: TemperamentGroup,

    quiz: QuizResponse,
    quiz_result: Option<Result<QuizOutcome, String>>,
}

impl PageView {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            data: None,
            top_type: String::new(),
            profile_country: String::new(),
            similar_type: String::new(),
            card_group: TemperamentGroup::NF,
            quiz: QuizResponse::new(),
            quiz_result: None,
        }
    }

    pub fn clear(&mut self) {
        self.data = None;
        self.quiz_result = None;
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Install a freshly loaded table and reset selections to sensible defaults.
    pub fn set_table(&mut self, table: Arc<CountryTable>) {
        let types = table.type_columns().to_vec();
        let pick_type = |preferred: &str| -> String {
            if table.has_type_column(preferred) {
                preferred.to_string()
            } else {
                types.first().cloned().unwrap_or_default()
            }
        };
        self.top_type = types.first().cloned().unwrap_or_default();
        self.similar_type = pick_type(&self.config.default_type);
        self.profile_country =
            default_country(&table, &self.config.default_country).unwrap_or_default();
        self.quiz_result = None;

        let mut types_sorted = types;
        types_sorted.sort();

        let group_preview = group_frame(&table)
            .map_err(|e| e.to_string())
            .and_then(|df| {
                frame_rows(&df.head(Some(self.config.preview_rows))).map_err(|e| e.to_string())
            });

        self.data = Some(LoadedData {
            countries_sorted: sorted_countries(&table),
            types_sorted,
            summaries: StatsCalculator::summarize_columns(&table),
            group_preview,
            table,
        });
    }

    /// Title and `(label, percent)` series of the chart on `page`, if it has one.
    pub fn export_series(&self, page: Page) -> Option<(String, Vec<(String, f64)>)> {
        let data = self.data.as_ref()?;
        let table = &data.table;
        match page {
            Page::Preview => None,
            Page::TemperamentCards => {
                let key = RatioKey::Group(self.card_group);
                let entries = top_k(table, &key, self.config.group_cards_k).ok()?;
                Some((
                    format!("Top {} countries: {} group", entries.len(), self.card_group),
                    ranking_series(&entries),
                ))
            }
            Page::TopTypes => {
                let key = RatioKey::Column(self.top_type.clone());
                let entries = top_k(table, &key, self.config.top_types_k).ok()?;
                Some((
                    format!("Top {} countries: {}", entries.len(), self.top_type),
                    ranking_series(&entries),
                ))
            }
            Page::CountryProfile => {
                let shares = country_profile(table, &self.profile_country).ok()?;
                Some((
                    format!("MBTI profile: {}", self.profile_country),
                    profile_series(&shares),
                ))
            }
            Page::SimilarCountries => {
                let key = RatioKey::Column(self.similar_type.clone());
                let entries = top_k(table, &key, self.config.similar_countries_k).ok()?;
                Some((
                    format!("Where {} people are common", self.similar_type),
                    ranking_series(&entries),
                ))
            }
            Page::Quiz => match &self.quiz_result {
                Some(Ok(outcome)) => Some((
                    format!("Top {} countries: {}", outcome.countries.len(), outcome.code),
                    ranking_series(&outcome.countries),
                )),
                _ => None,
            },
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, page: Page) {
        let Some(data) = self.data.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };
        let table = Arc::clone(&data.table);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(page.title());
                ui.add_space(8.0);
                match page {
                    Page::Preview => self.show_preview(ui),
                    Page::TopTypes => self.show_top_types(ui, &table),
                    Page::CountryProfile => self.show_country_profile(ui, &table),
                    Page::SimilarCountries => self.show_similar_countries(ui, &table),
                    Page::TemperamentCards => self.show_temperament_cards(ui, &table),
                    Page::Quiz => self.show_quiz(ui, &table),
                }
            });
    }

    fn show_error(ui: &mut egui::Ui, message: &str) {
        ui.label(RichText::new(format!("⚠ {}", message)).color(ERROR_COLOR));
    }

    fn type_selector(ui: &mut egui::Ui, id: &str, types: &[String], selected: &mut String) {
        ComboBox::from_id_salt(id)
            .width(120.0)
            .selected_text(selected.as_str())
            .show_ui(ui, |ui| {
                for t in types {
                    ui.selectable_value(selected, t.clone(), t);
                }
            });
    }

    fn ranking_table(ui: &mut egui::Ui, id: &str, entries: &[RankedEntry]) {
        egui::Grid::new(id)
            .striped(true)
            .min_col_width(60.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Rank").strong());
                ui.label(RichText::new("Country").strong());
                ui.label(RichText::new("Share (%)").strong());
                ui.end_row();
                for entry in entries {
                    ui.label(entry.rank.to_string());
                    ui.label(&entry.country);
                    ui.label(format!("{:.2}", entry.percent));
                    ui.end_row();
                }
            });
    }

    fn show_card(ui: &mut egui::Ui, entry: &RankedEntry, caption: &str, width: f32) {
        let [b1, b2] = badges_for(&entry.country);
        egui::Frame::none()
            .fill(card_color(entry.rank - 1))
            .rounding(20.0)
            .inner_margin(16.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_black_alpha(14)))
            .show(ui, |ui| {
                ui.set_width(width);
                ui.label(
                    RichText::new(format!(
                        "{} {} {}{}",
                        medal(entry.rank),
                        entry.country,
                        b1,
                        b2
                    ))
                    .size(20.0)
                    .strong()
                    .color(CARD_TEXT),
                );
                ui.label(RichText::new(caption).size(13.0).color(Color32::from_gray(85)));
                ui.label(
                    RichText::new(format!("{}%", entry.percent))
                        .size(18.0)
                        .strong()
                        .color(CARD_TEXT),
                );
            });
    }

    fn show_card_grid(ui: &mut egui::Ui, entries: &[RankedEntry], caption: &str, per_row: usize) {
        let spacing = 12.0;
        let width = ((ui.available_width() - spacing * per_row as f32) / per_row as f32).max(140.0);
        for row in entries.chunks(per_row) {
            ui.horizontal(|ui| {
                for entry in row {
                    Self::show_card(ui, entry, caption, width - 32.0);
                    ui.add_space(spacing);
                }
            });
            ui.add_space(spacing);
        }
    }

    fn show_preview(&mut self, ui: &mut egui::Ui) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let table = &data.table;
        let rows = self.config.preview_rows.min(table.row_count());

        ui.label(format!("✅ Rows: {}", table.row_count()));
        ui.label(format!("✅ Columns: {}", table.type_columns().len() + 1));
        ui.add_space(10.0);

        ui.label(RichText::new(format!("First {} rows", rows)).size(14.0).strong());
        ScrollArea::horizontal().id_salt("preview_rows").show(ui, |ui| {
            egui::Grid::new("preview_grid").striped(true).show(ui, |ui| {
                ui.label(RichText::new(COUNTRY_COLUMN).strong());
                for column in table.type_columns() {
                    ui.label(RichText::new(column).strong());
                }
                ui.end_row();

                let columns: Vec<Vec<f64>> = table
                    .type_columns()
                    .iter()
                    .map(|c| table.ratios(c).unwrap_or_default())
                    .collect();
                for row in 0..rows {
                    ui.label(&table.countries()[row]);
                    for values in &columns {
                        ui.label(format!("{:.4}", values.get(row).copied().unwrap_or(0.0)));
                    }
                    ui.end_row();
                }
            });
        });

        ui.add_space(12.0);
        ui.label(RichText::new("Temperament group totals").size(14.0).strong());
        match &data.group_preview {
            Ok(group_rows) => {
                egui::Grid::new("group_grid").striped(true).show(ui, |ui| {
                    ui.label(RichText::new(COUNTRY_COLUMN).strong());
                    for group in TemperamentGroup::ALL {
                        ui.label(RichText::new(group.name()).strong());
                    }
                    ui.end_row();
                    for (country, values) in group_rows {
                        ui.label(country);
                        for v in values {
                            ui.label(format!("{:.4}", v));
                        }
                        ui.end_row();
                    }
                });
            }
            Err(e) => Self::show_error(ui, e),
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Per-type distribution across countries").size(14.0).strong());
        egui::Grid::new("summary_grid").striped(true).show(ui, |ui| {
            for header in ["Type", "N", "Mean", "Median", "Std", "Min", "Max", "Leader"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();
            for s in &data.summaries {
                ui.label(&s.column);
                ui.label(s.count.to_string());
                ui.label(format!("{:.4}", s.mean));
                ui.label(format!("{:.4}", s.median));
                ui.label(format!("{:.4}", s.std_dev));
                ui.label(format!("{:.4}", s.min));
                ui.label(format!("{:.4}", s.max));
                ui.label(&s.leader);
                ui.end_row();
            }
        });
    }

    fn show_top_types(&mut self, ui: &mut egui::Ui, table: &CountryTable) {
        let types = table.type_columns().to_vec();
        ui.horizontal(|ui| {
            ui.label("🔍 Type:");
            Self::type_selector(ui, "top_type", &types, &mut self.top_type);
        });
        ui.add_space(8.0);

        let key = RatioKey::Column(self.top_type.clone());
        match top_k(table, &key, self.config.top_types_k) {
            Ok(entries) => {
                ui.label(
                    RichText::new(format!(
                        "Top {} countries by {} share",
                        entries.len(),
                        self.top_type
                    ))
                    .size(15.0)
                    .strong(),
                );
                ChartPlotter::draw_ranking_chart(
                    ui,
                    "top_types_chart",
                    &entries,
                    Some(ACCENT),
                    CHART_HEIGHT,
                );
                ui.add_space(8.0);
                Self::ranking_table(ui, "top_types_table", &entries);
            }
            Err(e) => Self::show_error(ui, &e.to_string()),
        }
    }

    fn show_country_profile(&mut self, ui: &mut egui::Ui, table: &CountryTable) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let countries = data.countries_sorted.clone();

        ui.horizontal(|ui| {
            ui.label("🇺🇳 Country:");
            ComboBox::from_id_salt("profile_country")
                .width(260.0)
                .selected_text(self.profile_country.as_str())
                .show_ui(ui, |ui| {
                    for c in &countries {
                        ui.selectable_value(&mut self.profile_country, c.clone(), c);
                    }
                });
        });
        ui.add_space(8.0);

        match country_profile(table, &self.profile_country) {
            Ok(shares) => {
                ChartPlotter::draw_profile_chart(ui, "profile_chart", &shares, 480.0);
                ui.add_space(8.0);
                egui::Grid::new("profile_table").striped(true).show(ui, |ui| {
                    ui.label(RichText::new("Type").strong());
                    ui.label(RichText::new("Share (%)").strong());
                    ui.end_row();
                    for share in &shares {
                        ui.label(&share.code);
                        ui.label(format!("{:.2}", share.percent));
                        ui.end_row();
                    }
                });
            }
            Err(e) => Self::show_error(ui, &e.to_string()),
        }
    }

    fn show_similar_countries(&mut self, ui: &mut egui::Ui, table: &CountryTable) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let types = data.types_sorted.clone();

        ui.horizontal(|ui| {
            ui.label("🧠 My type:");
            Self::type_selector(ui, "similar_type", &types, &mut self.similar_type);
        });
        ui.add_space(8.0);

        let key = RatioKey::Column(self.similar_type.clone());
        let entries = match top_k(table, &key, self.config.similar_countries_k) {
            Ok(entries) => entries,
            Err(e) => {
                Self::show_error(ui, &e.to_string());
                return;
            }
        };

        ui.columns(2, |cols| {
            cols[0].label(
                RichText::new(format!(
                    "Countries with many {} people, top {}",
                    self.similar_type,
                    entries.len()
                ))
                .size(15.0)
                .strong(),
            );
            for entry in &entries {
                let [b1, b2] = badges_for(&entry.country);
                cols[0].label(
                    RichText::new(format!(
                        "{} {}: {}%  {}{}",
                        medal(entry.rank),
                        entry.country,
                        entry.percent,
                        b1,
                        b2
                    ))
                    .size(15.0),
                );
            }

            ChartPlotter::draw_ranking_chart(
                &mut cols[1],
                "similar_chart",
                &entries,
                None,
                CHART_HEIGHT,
            );
        });
    }

    fn show_temperament_cards(&mut self, ui: &mut egui::Ui, table: &CountryTable) {
        ui.horizontal(|ui| {
            for group in TemperamentGroup::ALL {
                ui.selectable_value(&mut self.card_group, group, group.label());
            }
        });
        ui.add_space(8.0);

        let group = self.card_group;
        ui.label(
            RichText::new(format!("🧭 Countries with the most {} types", group))
                .size(15.0)
                .strong(),
        );
        ui.label(
            RichText::new(format!(
                "Share = sum of the {} member types: {}",
                group,
                group.members().join(", ")
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
        ui.add_space(8.0);

        match top_k(table, &RatioKey::Group(group), self.config.group_cards_k) {
            Ok(entries) => {
                Self::show_card_grid(ui, &entries, &format!("{} share", group), 2);
                ui.collapsing("🔎 Table", |ui| {
                    Self::ranking_table(ui, "cards_table", &entries);
                });
            }
            Err(e) => Self::show_error(ui, &e.to_string()),
        }
    }

    fn show_quiz(&mut self, ui: &mut egui::Ui, table: &CountryTable) {
        ui.label("Answer eight quick questions to estimate your type.");
        ui.add_space(8.0);

        for (i, question) in QUESTIONS.iter().enumerate() {
            ui.label(RichText::new(format!("{}. {}", i + 1, question.prompt)).strong());
            ui.horizontal_wrapped(|ui| {
                let selected = self.quiz.selected(i);
                for (j, (text, _)) in question.options.iter().enumerate() {
                    if ui.radio(selected == Some(j), *text).clicked() {
                        if selected == Some(j) {
                            self.quiz.clear(i);
                        } else {
                            self.quiz.choose(i, j);
                        }
                    }
                }
            });
            ui.add_space(6.0);
        }

        ui.horizontal(|ui| {
            if ui.button(RichText::new("See result 🔎").size(15.0)).clicked() {
                let result = recommend(table, self.quiz.polarities(), self.config.quiz_k)
                    .map_err(|e| e.to_string());
                if let Ok(outcome) = &result {
                    log::info!("Quiz scored {}", outcome.code);
                }
                self.quiz_result = Some(result);
            }
            if ui.button("Reset").clicked() {
                self.quiz.reset();
                self.quiz_result = None;
            }
            ui.label(
                RichText::new(format!("{}/{} answered", self.quiz.answered(), QUESTIONS.len()))
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);

        match &self.quiz_result {
            None => {
                ui.label(RichText::new("Press the button to see your result.").color(Color32::GRAY));
            }
            Some(Err(message)) => Self::show_error(ui, message),
            Some(Ok(outcome)) => {
                ui.label(
                    RichText::new(format!("Your (very quick) type estimate: {} 🎉", outcome.code))
                        .size(18.0)
                        .strong()
                        .color(Color32::from_rgb(40, 167, 69)),
                );
                ui.add_space(8.0);
                let caption = format!("{} share", outcome.code);
                Self::show_card_grid(ui, &outcome.countries, &caption, 5);
                ChartPlotter::draw_ranking_chart(
                    ui,
                    "quiz_chart",
                    &outcome.countries,
                    None,
                    300.0,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MBTI_TYPES;

    fn table() -> Arc<CountryTable> {
        let countries = vec!["Japan".to_string(), "Chile".to_string(), "Peru".to_string()];
        let columns = MBTI_TYPES
            .iter()
            .enumerate()
            .map(|(i, code)| {
                let v = 0.01 * (i as f64 + 1.0);
                (code.to_string(), vec![v, v * 2.0, v * 1.5])
            })
            .collect();
        Arc::new(CountryTable::from_columns(countries, columns).unwrap())
    }

    #[test]
    fn test_set_table_picks_defaults() {
        let mut view = PageView::new(DashboardConfig::default());
        assert!(!view.has_data());
        view.set_table(table());
        assert!(view.has_data());
        assert_eq!(view.similar_type, "ENFP");
        // Korea is absent; falls back to the alphabetically first country.
        assert_eq!(view.profile_country, "Chile");
        assert_eq!(view.top_type, MBTI_TYPES[0]);
    }

    #[test]
    fn test_group_preview_rows() {
        let mut view = PageView::new(DashboardConfig::default());
        view.set_table(table());
        let data = view.data.as_ref().unwrap();
        let rows = data.group_preview.as_ref().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, "Japan");
        assert_eq!(rows[0].1.len(), TemperamentGroup::ALL.len());
    }

    #[test]
    fn test_export_series_per_page() {
        let mut view = PageView::new(DashboardConfig::default());
        assert!(view.export_series(Page::TopTypes).is_none());

        view.set_table(table());
        assert!(view.export_series(Page::Preview).is_none());
        assert!(view.export_series(Page::Quiz).is_none());

        let (title, series) = view.export_series(Page::SimilarCountries).unwrap();
        assert_eq!(title, "Where ENFP people are common");
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].0, "Chile");

        let (_, profile) = view.export_series(Page::CountryProfile).unwrap();
        assert_eq!(profile.len(), 16);

        let (_, cards) = view.export_series(Page::TemperamentCards).unwrap();
        assert_eq!(cards.len(), 3);
    }
}
