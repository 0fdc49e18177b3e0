use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::SalarySummary;
use crate::data::filter::{FilterColumn, observed_values};
use crate::state::AppState;
use crate::ui::format::{format_count, format_usd};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// A change requested from the side panel, applied once rendering is done.
enum FilterAction {
    Set(FilterColumn, String, bool),
    All(FilterColumn),
    None(FilterColumn),
    Spotlight(String),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for column in FilterColumn::ALL {
                let all_values = observed_values(&dataset, column);
                let selected = state.filter.selected(column);

                // Show count of selected / total in the header
                let header_text =
                    format!("{}  ({}/{})", column.label(), selected.len(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(column.label())
                    .default_open(column == FilterColumn::Year)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push(FilterAction::All(column));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push(FilterAction::None(column));
                            }
                        });

                        let counts = state.facet_counts.get(&column);
                        for value in &all_values {
                            let mut checked = selected.contains(value);
                            let n = counts.and_then(|c| c.get(value)).copied().unwrap_or(0);
                            let label = format!("{value}  ({})", format_count(n));
                            if ui.checkbox(&mut checked, label).changed() {
                                actions.push(FilterAction::Set(column, value.clone(), checked));
                            }
                        }
                    });
            }

            ui.separator();
            ui.strong("Country chart role");
            let current = state.config.spotlight_role.clone();
            egui::ComboBox::from_id_salt("spotlight_role")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for role in &dataset.roles {
                        if ui.selectable_label(current == *role, role).clicked() {
                            actions.push(FilterAction::Spotlight(role.clone()));
                        }
                    }
                });
        });

    for action in actions {
        match action {
            FilterAction::Set(column, value, selected) => {
                state.set_filter_value(column, &value, selected)
            }
            FilterAction::All(column) => state.select_all(column),
            FilterAction::None(column) => state.select_none(column),
            FilterAction::Spotlight(role) => state.set_spotlight_role(role),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let retry = ui.add_enabled(state.can_retry(), egui::Button::new("Retry download"));
            if retry.clicked() {
                state.load_configured();
                ui.close_menu();
            }
            let export = ui.add_enabled(
                state.report.is_some(),
                egui::Button::new("Export summary…"),
            );
            if export.clicked() {
                save_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                format_count(ds.len()),
                format_count(state.visible_indices.len())
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Four headline numbers across the top of the central panel.
pub fn metrics_row(ui: &mut Ui, summary: &SalarySummary) {
    ui.heading("Overview (annual salary in USD)");
    let cards = [
        ("Mean salary", format_usd(summary.mean_salary)),
        ("Max salary", format_usd(summary.max_salary)),
        ("Records", format_count(summary.record_count)),
        ("Most frequent role", summary.most_frequent_role.clone()),
    ];
    ui.columns(cards.len(), |cols| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui| {
                ui.label(title);
                ui.label(RichText::new(value).size(22.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}

fn save_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .set_file_name("salary_summary.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_report(&path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
