//! Painting of the monitor window.
//!
//! * **Header**: title, monitored patient and the connection badge.
//! * **Tiles**: one framed readout per scalar metric.
//! * **ECG**: the waveform window as a fixed-range line plot.
//! * **Station** (optional right sidebar): every patient seen on the stream,
//!   with a button to switch the monitor to them.

use chrono::Utc;
use egui::{Color32, RichText};
use egui_phosphor::regular::{
    CLOUD, DROP, HEARTBEAT, THERMOMETER, USERS, WIFI_HIGH, WIFI_SLASH,
};
use egui_plot::{Line, Plot};

use crate::sample::{Metric, SubjectId};

use super::VitalsApp;

const ECG_COLOR: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8);
const CONNECTED_COLOR: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const DISCONNECTED_COLOR: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const MUTED_COLOR: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);

fn metric_icon(metric: Metric) -> &'static str {
    match metric {
        Metric::HeartRate => HEARTBEAT,
        Metric::SpO2 => DROP,
        Metric::Temperature => THERMOMETER,
        Metric::Humidity => CLOUD,
    }
}

impl VitalsApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(&self.cfg.title);
            ui.separator();
            ui.label(format!("Patient: {}", self.renderer.subject()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let station_label = format!("{USERS} Station ({})", self.board.len());
                if ui
                    .selectable_label(self.show_station, station_label)
                    .on_hover_text("Show every patient on the stream")
                    .clicked()
                {
                    self.show_station = !self.show_station;
                }

                let connected = self.renderer.connection().is_connected();
                let (icon, color) = if connected {
                    (WIFI_HIGH, CONNECTED_COLOR)
                } else {
                    (WIFI_SLASH, DISCONNECTED_COLOR)
                };
                ui.colored_label(color, format!("{icon} {}", self.readouts.status.get()));
            });
        });
    }

    pub(crate) fn render_tiles(&self, ui: &mut egui::Ui) {
        ui.columns(Metric::ALL.len(), |cols| {
            for (col, metric) in cols.iter_mut().zip(Metric::ALL) {
                egui::Frame::group(col.style()).show(col, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        RichText::new(format!("{} {}", metric_icon(metric), metric.label()))
                            .color(MUTED_COLOR),
                    );
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(self.metric_text(metric)).size(32.0).strong());
                        ui.label(RichText::new(metric.unit()).color(MUTED_COLOR));
                    });
                });
            }
        });
    }

    pub(crate) fn render_ecg(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("ECG").color(MUTED_COLOR));
        let points = self.readouts.chart.points();
        let capacity = self.renderer.window().capacity() as f64;
        Plot::new("ecg_plot")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_x(false)
            .show_axes([false, true])
            .include_x(0.0)
            .include_x((capacity - 1.0).max(1.0))
            .include_y(self.cfg.y_min)
            .include_y(self.cfg.y_max)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("ECG Signal", points).color(ECG_COLOR).width(2.0_f32));
            });
    }

    /// Returns a subject the user asked to monitor, if any.
    pub(crate) fn render_station(&self, ui: &mut egui::Ui) -> Option<SubjectId> {
        let mut selected = None;
        let now = Utc::now();
        let max_age = self.cfg.station_max_age();
        ui.heading("Station");
        if self.board.is_empty() {
            ui.label("No patients seen yet");
            return None;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("station_grid")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui| {
                    ui.strong("Patient");
                    ui.strong("HR");
                    ui.strong("SpO2");
                    ui.strong("Seen");
                    ui.label("");
                    ui.end_row();

                    for (subject, entry) in self.board.iter() {
                        let name = RichText::new(subject.as_str());
                        if entry.is_stale(now, max_age) {
                            ui.label(name.color(DISCONNECTED_COLOR))
                                .on_hover_text("No recent updates");
                        } else {
                            ui.label(name);
                        }
                        let cell = |v: Option<f64>, m: Metric| v.map(|v| m.format(v)).unwrap_or_else(|| "--".into());
                        ui.label(cell(entry.sample.hr, Metric::HeartRate));
                        ui.label(cell(entry.sample.spo2, Metric::SpO2));
                        let age = (now - entry.last_seen).num_seconds().max(0);
                        ui.label(format!("{age}s ago"));
                        let current = subject == self.renderer.subject();
                        if ui
                            .add_enabled(!current, egui::Button::new("Monitor"))
                            .clicked()
                        {
                            selected = Some(subject.clone());
                        }
                        ui.end_row();
                    }
                });
        });
        selected
    }
}

impl eframe::App for VitalsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("vitals_header").show(ctx, |ui| {
            self.render_header(ui);
        });

        if self.show_station {
            let selected = egui::SidePanel::right("station_panel")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.render_station(ui))
                .inner;
            if let Some(subject) = selected {
                if let Err(e) = self.monitor(subject) {
                    log::warn!("cannot switch patient: {e}");
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_tiles(ui);
            ui.add_space(8.0);
            self.render_ecg(ui);
        });

        // Request continuous repainting (~60 fps).
        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }
}
