use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDateTime};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::dashboard::{Metric, Panel};
use crate::data::condition::Condition;
use crate::state::AppState;

const SECONDS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Central panel – the current page
// ---------------------------------------------------------------------------

/// Render the panels of the current page in the central panel.
pub fn dashboard(ui: &mut Ui, panels: &[Panel], state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, panel) in panels.iter().enumerate() {
                ui.push_id(i, |ui: &mut Ui| draw_panel(ui, panel, state));
                ui.add_space(8.0);
            }
        });
}

fn draw_panel(ui: &mut Ui, panel: &Panel, state: &mut AppState) {
    match panel {
        Panel::Heading(text) => {
            ui.heading(text);
            ui.separator();
        }
        Panel::Metrics(metrics) => metrics_row(ui, metrics),
        Panel::TimeSeries {
            title,
            series,
            points,
        } => time_series_plot(ui, title, series, points),
        Panel::Bars { title, bars } => bar_chart(ui, title, bars),
        Panel::Map { title, points } => map_plot(ui, title, points),
        Panel::List { title, items } => {
            ui.strong(title);
            for item in items {
                ui.label(format!("• {item}"));
            }
        }
        Panel::Form { title, fields } => mock_form(ui, title, fields, state),
        Panel::Notice { title, condition } => notice(ui, title, condition),
    }
}

fn metrics_row(ui: &mut Ui, metrics: &[Metric]) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for m in metrics {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(&m.label).small());
                    ui.label(RichText::new(&m.value).heading());
                    if let Some(delta) = &m.delta {
                        let color = if delta.starts_with('-') {
                            Color32::LIGHT_RED
                        } else {
                            Color32::LIGHT_GREEN
                        };
                        ui.label(RichText::new(delta).color(color));
                    }
                });
            });
        }
    });
}

fn notice(ui: &mut Ui, title: &str, condition: &Condition) {
    let color = match condition {
        Condition::ResourceAbsent { .. } => Color32::YELLOW,
        Condition::EmptyAfterFilter { .. } => Color32::LIGHT_BLUE,
        Condition::ResourceMalformed { .. } | Condition::InvalidRange { .. } => Color32::LIGHT_RED,
    };
    ui.group(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{title}: {}", condition.title())).strong().color(color));
        ui.label(condition.to_string());
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn days_since_epoch(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}

fn format_day(x: f64) -> String {
    DateTime::from_timestamp((x * SECONDS_PER_DAY).round() as i64, 0)
        .map(|d| d.date_naive().to_string())
        .unwrap_or_default()
}

fn time_series_plot(ui: &mut Ui, title: &str, series: &str, points: &[(NaiveDateTime, f64)]) {
    ui.strong(title);
    let line_points: PlotPoints = points
        .iter()
        .map(|(t, v)| [days_since_epoch(*t), *v])
        .collect();

    Plot::new(title)
        .height(240.0)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("USD")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| format_day(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(line_points).name(series).width(2.0));
        });
}

fn bar_chart(ui: &mut Ui, title: &str, bars: &[(String, f64)]) {
    ui.strong(title);
    let colors = CategoryColors::new(bars.iter().map(|(label, _)| label.as_str()));
    let chart: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new(i as f64, *value)
                .name(label)
                .fill(colors.color_for(label))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(title)
        .height(220.0)
        .y_axis_label("USD")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart).name(title));
        });
}

/// Scatter of `[lon, lat]` with equal axis scaling.
fn map_plot(ui: &mut Ui, title: &str, points: &[[f64; 2]]) {
    ui.strong(title);
    let markers: PlotPoints = points.iter().copied().collect();

    Plot::new(title)
        .height(320.0)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(markers)
                    .radius(5.0)
                    .color(Color32::LIGHT_BLUE)
                    .name(title),
            );
        });
}

// ---------------------------------------------------------------------------
// Mock forms
// ---------------------------------------------------------------------------

fn mock_form(ui: &mut Ui, title: &str, fields: &[String], state: &mut AppState) {
    ui.group(|ui: &mut Ui| {
        ui.strong(title);
        egui::Grid::new("form_fields")
            .num_columns(2)
            .show(ui, |ui: &mut Ui| {
                for field in fields {
                    ui.label(field);
                    ui.text_edit_singleline(state.form_field(title, field));
                    ui.end_row();
                }
            });
        if ui.button("Submit").clicked() {
            state.submit_form(title);
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn day_axis_round_trips_dates() {
        let t = NaiveDate::from_ymd_opt(2024, 5, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_day(days_since_epoch(t)), "2024-05-21");
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap().and_hms_opt(12, 0, 0).unwrap()), 1.5);
    }
}
