use std::collections::BTreeMap;
use std::f32::consts::TAU;

use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{BAR_COLOR, ColorMap, normalize, sequential_color};
use crate::data::aggregate::HistogramBin;
use crate::ui::format::format_usd;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Horizontal bar charts (top roles, country means)
// ---------------------------------------------------------------------------

/// Top roles by mean salary, largest bar at the top.
pub fn top_roles_chart(ui: &mut Ui, top_roles: &[(String, f64)], top_n: usize) {
    ui.strong(format!("Top {top_n} roles by mean salary"));
    if top_roles.is_empty() {
        placeholder(ui, "No records match the current filters.");
        return;
    }

    let bars: Vec<Bar> = top_roles
        .iter()
        .enumerate()
        .map(|(i, (role, mean))| {
            Bar::new(i as f64, *mean)
                .name(role)
                .width(0.7)
                .fill(BAR_COLOR)
        })
        .collect();

    horizontal_bars(ui, "top_roles", bars, top_roles.iter().map(|(r, _)| r.clone()).collect());
}

/// Mean salary per residence country for the spotlight role, one bar per
/// country, coloured from light (lowest mean) to dark (highest mean).
pub fn country_chart(ui: &mut Ui, role: &str, means: &BTreeMap<String, f64>) {
    ui.strong(format!("Mean salary of {role} by country of residence"));
    if means.is_empty() {
        placeholder(ui, &format!("No {role} records match the current filters."));
        return;
    }

    let mut ordered: Vec<(&String, f64)> = means.iter().map(|(c, m)| (c, *m)).collect();
    ordered.sort_by(|a, b| a.1.total_cmp(&b.1));
    let min = ordered.first().map_or(0.0, |(_, m)| *m);
    let max = ordered.last().map_or(0.0, |(_, m)| *m);

    let bars: Vec<Bar> = ordered
        .iter()
        .enumerate()
        .map(|(i, (country, mean))| {
            Bar::new(i as f64, *mean)
                .name(country.as_str())
                .width(0.7)
                .fill(sequential_color(normalize(*mean, min, max)))
        })
        .collect();

    horizontal_bars(
        ui,
        "country_means",
        bars,
        ordered.iter().map(|(c, _)| (*c).clone()).collect(),
    );
}

fn horizontal_bars(ui: &mut Ui, id: &str, bars: Vec<Bar>, labels: Vec<String>) {
    let chart = BarChart::new(bars)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
            format!("{}\n{}", bar.name, format_usd(bar.value))
        }));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_label("USD")
        .x_axis_formatter(|mark, _range| format_usd(mark.value))
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Axis tick label for bar `index`; ticks between bars stay blank.
fn category_label(labels: &[String], index: f64) -> String {
    if index < 0.0 || index.fract().abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

pub fn salary_histogram(ui: &mut Ui, bins: &[HistogramBin]) {
    ui.strong("Salary distribution");
    if bins.is_empty() {
        placeholder(ui, "No records match the current filters.");
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(BAR_COLOR)
                .stroke(Stroke::new(1.0, Color32::WHITE))
                .name(format!("{} – {}", format_usd(bin.lower), format_usd(bin.upper)))
        })
        .collect();

    let chart = BarChart::new(bars).element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
        format!("{}\n{} records", bar.name, bar.value)
    }));

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("USD")
        .y_axis_label("Records")
        .x_axis_formatter(|mark, _range| format_usd(mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Remote-work pie
// ---------------------------------------------------------------------------

/// Share of records per remote-work mode, drawn as a pie with a legend.
pub fn remote_pie(ui: &mut Ui, counts: &BTreeMap<String, usize>, colors: Option<&ColorMap>) {
    ui.strong("Remote work");
    let total: usize = counts.values().sum();
    if total == 0 {
        placeholder(ui, "No records match the current filters.");
        return;
    }

    let color_of = |mode: &str| colors.map_or(BAR_COLOR, |cm| cm.color_for(mode));

    ui.horizontal(|ui| {
        let side = (CHART_HEIGHT - 20.0).min(ui.available_width() * 0.6);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = side / 2.0 - 4.0;

        // Start at twelve o'clock, go clockwise.
        let mut start = -TAU / 4.0;
        for (mode, &count) in counts {
            let sweep = TAU * count as f32 / total as f32;
            let fill = color_of(mode);
            // Fan of thin triangles so slices wider than half the pie stay convex.
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * egui::vec2(a0.cos(), a0.sin()),
                        center + radius * egui::vec2(a1.cos(), a1.sin()),
                    ],
                    fill,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }

        ui.vertical(|ui| {
            for (mode, &count) in counts {
                let share = 100.0 * count as f64 / total as f64;
                ui.label(RichText::new(format!("■ {mode}  {share:.1}%")).color(color_of(mode)));
            }
        });
    });
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.add_sized(
        [ui.available_width(), CHART_HEIGHT / 2.0],
        egui::Label::new(RichText::new(text).italics()),
    );
}
