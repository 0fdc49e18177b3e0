use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No salary data loaded  (File → Open CSV… or Retry download)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            panels::metrics_row(ui, &report.summary);
            if report.is_empty() {
                ui.label(
                    RichText::new("No records match the current filters.")
                        .color(Color32::YELLOW),
                );
            }
            ui.separator();

            ui.columns(2, |cols| {
                plot::top_roles_chart(&mut cols[0], &report.top_roles, state.config.top_n);
                plot::salary_histogram(&mut cols[1], &report.histogram);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                plot::remote_pie(
                    &mut cols[0],
                    &report.remote_counts,
                    state.remote_colors.as_ref(),
                );
                plot::country_chart(&mut cols[1], &report.spotlight_role, &report.country_means);
            });
            ui.separator();

            table::records_table(ui, &state.visible_records());
        });
}
