//! Standalone monitor application state.
//!
//! [`VitalsApp`] owns the event receiver, the [`LiveMetricsRenderer`] and the
//! [`StationBoard`]. The renderer writes into shared in-thread sinks which the
//! layout code reads back when painting.

use std::sync::mpsc::{Receiver, TryRecvError};

use crate::config::VitalsConfig;
use crate::error::ConfigError;
use crate::events::{dispatch, ChannelEvent};
use crate::renderer::LiveMetricsRenderer;
use crate::sample::{Metric, SubjectId};
use crate::sink::{ChartSink, OutputSlots, SharedSeries, SharedText, TextSink};
use crate::station::StationBoard;

/// Text shown in a metric tile before the first reading.
pub const PLACEHOLDER: &str = "--";

/// Upper bound on events applied per frame so a flood cannot stall painting.
const MAX_EVENTS_PER_FRAME: usize = 4096;

/// Display-side handles read back by the layout code.
#[derive(Clone)]
pub(crate) struct Readouts {
    pub hr: SharedText,
    pub spo2: SharedText,
    pub temp: SharedText,
    pub hum: SharedText,
    pub status: SharedText,
    pub chart: SharedSeries,
}

impl Readouts {
    fn new() -> Self {
        Self {
            hr: SharedText::with_text(PLACEHOLDER),
            spo2: SharedText::with_text(PLACEHOLDER),
            temp: SharedText::with_text(PLACEHOLDER),
            hum: SharedText::with_text(PLACEHOLDER),
            status: SharedText::with_text("Connecting..."),
            chart: SharedSeries::new(),
        }
    }

    fn metric(&self, metric: Metric) -> &SharedText {
        match metric {
            Metric::HeartRate => &self.hr,
            Metric::SpO2 => &self.spo2,
            Metric::Temperature => &self.temp,
            Metric::Humidity => &self.hum,
        }
    }

    fn output_slots(&self) -> OutputSlots {
        OutputSlots::from_fn(|m| -> Box<dyn TextSink> { Box::new(self.metric(m).clone()) })
    }
}

pub struct VitalsApp {
    rx: Receiver<ChannelEvent>,
    pub(crate) renderer: LiveMetricsRenderer,
    pub(crate) board: StationBoard,
    pub(crate) readouts: Readouts,
    pub(crate) cfg: VitalsConfig,
    pub(crate) show_station: bool,
    channel_closed: bool,
}

impl VitalsApp {
    /// Create the app for `cfg.subject`, reading events from `rx`.
    pub fn new(rx: Receiver<ChannelEvent>, cfg: VitalsConfig) -> Result<Self, ConfigError> {
        let readouts = Readouts::new();
        let renderer = Self::build_renderer(&cfg, &readouts)?;
        // Draw the neutral window once so the chart is not empty before data arrives.
        let mut chart = readouts.chart.clone();
        chart.render(&renderer.window().to_vec());
        Ok(Self {
            rx,
            renderer,
            board: StationBoard::new(),
            readouts,
            cfg,
            show_station: false,
            channel_closed: false,
        })
    }

    fn build_renderer(cfg: &VitalsConfig, readouts: &Readouts) -> Result<LiveMetricsRenderer, ConfigError> {
        LiveMetricsRenderer::from_config(
            cfg,
            readouts.output_slots(),
            readouts.chart.clone(),
            readouts.status.clone(),
        )
    }

    /// Apply every pending event. Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut n = 0;
        while n < MAX_EVENTS_PER_FRAME {
            match self.rx.try_recv() {
                Ok(evt) => {
                    dispatch(&evt, &mut self.renderer, &mut self.board);
                    n += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.channel_closed {
                        log::info!("event channel closed");
                        self.channel_closed = true;
                        if self.renderer.connection().is_connected() {
                            self.renderer.on_connection_change(false);
                        }
                    }
                    break;
                }
            }
        }
        n
    }

    /// Switch the monitor to another patient.
    ///
    /// The renderer is rebuilt for the new subject: tiles return to the
    /// placeholder and the waveform restarts from the neutral value. The
    /// connection state carries over.
    pub fn monitor(&mut self, subject: SubjectId) -> Result<(), ConfigError> {
        if &subject == self.renderer.subject() {
            return Ok(());
        }
        let mut cfg = self.cfg.clone();
        cfg.subject = subject;
        for metric in Metric::ALL {
            self.readouts.metric(metric).clone().write(PLACEHOLDER);
        }
        let mut renderer = Self::build_renderer(&cfg, &self.readouts)?;
        let mut chart = self.readouts.chart.clone();
        chart.render(&renderer.window().to_vec());
        if self.renderer.connection().is_connected() {
            renderer.on_connection_change(true);
        }
        log::info!("now monitoring {}", cfg.subject);
        self.renderer = renderer;
        self.cfg = cfg;
        Ok(())
    }

    pub fn subject(&self) -> &SubjectId {
        self.renderer.subject()
    }

    pub fn station(&self) -> &StationBoard {
        &self.board
    }

    /// Current text of a metric tile.
    pub fn metric_text(&self, metric: Metric) -> String {
        self.readouts.metric(metric).get()
    }

    pub fn status_text(&self) -> String {
        self.readouts.status.get()
    }

    /// Series currently on the ECG chart.
    pub fn chart_series(&self) -> Vec<f64> {
        self.readouts.chart.get()
    }
}
