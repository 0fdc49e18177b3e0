use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SalaryRecord;
use crate::ui::format::format_usd;

const HEADERS: [&str; 8] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Role",
    "Remote",
    "Salary (USD)",
    "Residence",
];

/// Raw rows of the filtered view.
pub fn records_table(ui: &mut Ui, records: &[&SalaryRecord]) {
    ui.strong(format!("Detailed data ({} rows)", records.len()));
    if records.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = records[row.index()];
                let cells = [
                    rec.year.to_string(),
                    rec.seniority.clone(),
                    rec.contract_type.clone(),
                    rec.company_size.clone(),
                    rec.role.clone(),
                    rec.remote_mode.clone(),
                    format_usd(rec.salary_usd),
                    rec.residence_country_code.clone(),
                ];
                for text in cells {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
