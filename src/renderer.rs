//! The live metrics renderer.
//!
//! [`LiveMetricsRenderer`] turns a stream of tagged vitals updates into
//! writes on its injected sinks:
//!
//! 1. Updates for any other patient are dropped.
//! 2. Each scalar reading that is present (see [`DisplayPolicy`]) is
//!    formatted and written to its slot; absent readings leave the slot as
//!    it was.
//! 3. An ECG reading is pushed into the [`WaveformWindow`] and the chart is
//!    asked to redraw, once.
//!
//! The renderer performs no I/O and holds no global state. It expects to be
//! called from a single thread, one event at a time.

use crate::config::VitalsConfig;
use crate::error::ConfigError;
use crate::sample::{DisplayPolicy, Metric, SensorUpdate, SubjectId};
use crate::sink::{ChartSink, OutputSlots, TextSink};
use crate::window::WaveformWindow;

/// Reachability of the event channel, as last reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    pub fn from_connected(is_connected: bool) -> Self {
        if is_connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    pub fn is_connected(self) -> bool {
        self == ConnectionStatus::Connected
    }

    pub fn text(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

pub struct LiveMetricsRenderer {
    subject: SubjectId,
    window: WaveformWindow,
    slots: OutputSlots,
    chart: Box<dyn ChartSink>,
    status: Box<dyn TextSink>,
    connection: ConnectionStatus,
    policy: DisplayPolicy,
}

impl LiveMetricsRenderer {
    /// Create a renderer for `subject` with a window of `window_capacity`
    /// zero samples.
    pub fn new<S, C, T>(
        subject: S,
        window_capacity: usize,
        slots: OutputSlots,
        chart: C,
        status: T,
    ) -> Result<Self, ConfigError>
    where
        S: Into<SubjectId>,
        C: ChartSink + 'static,
        T: TextSink + 'static,
    {
        Self::with_neutral(subject, window_capacity, 0.0, slots, chart, status)
    }

    /// Like [`new`](Self::new), pre-filling the window with `neutral`.
    pub fn with_neutral<S, C, T>(
        subject: S,
        window_capacity: usize,
        neutral: f64,
        slots: OutputSlots,
        chart: C,
        status: T,
    ) -> Result<Self, ConfigError>
    where
        S: Into<SubjectId>,
        C: ChartSink + 'static,
        T: TextSink + 'static,
    {
        let window = WaveformWindow::new(window_capacity, neutral)?;
        Ok(Self {
            subject: subject.into(),
            window,
            slots,
            chart: Box::new(chart),
            status: Box::new(status),
            connection: ConnectionStatus::default(),
            policy: DisplayPolicy::default(),
        })
    }

    /// Build from a validated configuration.
    pub fn from_config<C, T>(
        cfg: &VitalsConfig,
        slots: OutputSlots,
        chart: C,
        status: T,
    ) -> Result<Self, ConfigError>
    where
        C: ChartSink + 'static,
        T: TextSink + 'static,
    {
        cfg.validate()?;
        Ok(Self::with_neutral(
            cfg.subject.clone(),
            cfg.window_capacity,
            cfg.neutral_sample,
            slots,
            chart,
            status,
        )?
        .with_display_policy(cfg.display_policy))
    }

    pub fn with_display_policy(mut self, policy: DisplayPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn window(&self) -> &WaveformWindow {
        &self.window
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn display_policy(&self) -> DisplayPolicy {
        self.policy
    }

    /// React to the transport connecting or disconnecting.
    pub fn on_connection_change(&mut self, is_connected: bool) {
        let next = ConnectionStatus::from_connected(is_connected);
        if next != self.connection {
            log::info!("{}: channel {}", self.subject, next.text().to_lowercase());
        }
        self.connection = next;
        self.status.write(next.text());
    }

    /// Apply one update event.
    pub fn on_update(&mut self, event: &SensorUpdate) {
        if event.subject != self.subject {
            log::trace!("ignoring update for {}", event.subject);
            return;
        }

        let sample = &event.sample;
        for metric in Metric::ALL {
            if let Some(v) = self.policy.displayable(sample.get(metric)) {
                self.slots.slot_mut(metric).write(&metric.format(v));
            }
        }

        // ECG uses a plain presence check: 0 is a valid sample.
        if let Some(ecg) = sample.ecg {
            self.window.push(ecg);
            let series = self.window.to_vec();
            self.chart.render(&series);
        }
    }
}
