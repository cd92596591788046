//! Output capabilities the renderer writes into.
//!
//! The renderer never owns its display. It is handed a set of text slots and
//! a chart, all behind two small traits:
//! - [`TextSink`]: replace the text of one labelled slot.
//! - [`ChartSink`]: redraw a series of samples.
//!
//! Two families of implementations ship with the crate:
//! - [`channel_display`] returns sinks that forward every write over an
//!   `mpsc` channel as a [`DisplayCommand`], for a display living on another
//!   thread.
//! - [`SharedText`] / [`SharedSeries`] keep the latest value behind an
//!   `Rc<RefCell<_>>`, for a display in the same thread (the egui window).

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender};

use crate::sample::Metric;

/// Something that displays a single line of text.
pub trait TextSink {
    fn write(&mut self, text: &str);
}

/// Something that displays a series of samples, oldest first.
pub trait ChartSink {
    fn render(&mut self, series: &[f64]);
}

impl<T: TextSink + ?Sized> TextSink for Box<T> {
    fn write(&mut self, text: &str) {
        (**self).write(text)
    }
}

impl<T: ChartSink + ?Sized> ChartSink for Box<T> {
    fn render(&mut self, series: &[f64]) {
        (**self).render(series)
    }
}

/// Named display targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Metric(Metric),
    ConnectionStatus,
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Metric(m) => m.slot_name(),
            Slot::ConnectionStatus => "connection-status",
        }
    }
}

/// The four scalar text slots.
pub struct OutputSlots {
    pub hr: Box<dyn TextSink>,
    pub spo2: Box<dyn TextSink>,
    pub temp: Box<dyn TextSink>,
    pub hum: Box<dyn TextSink>,
}

impl OutputSlots {
    /// Build all four slots with one constructor per metric.
    pub fn from_fn<F>(mut make: F) -> Self
    where
        F: FnMut(Metric) -> Box<dyn TextSink>,
    {
        Self {
            hr: make(Metric::HeartRate),
            spo2: make(Metric::SpO2),
            temp: make(Metric::Temperature),
            hum: make(Metric::Humidity),
        }
    }

    pub fn slot_mut(&mut self, metric: Metric) -> &mut dyn TextSink {
        match metric {
            Metric::HeartRate => self.hr.as_mut(),
            Metric::SpO2 => self.spo2.as_mut(),
            Metric::Temperature => self.temp.as_mut(),
            Metric::Humidity => self.hum.as_mut(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel-backed sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Messages sent over the display channel.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Replace the text of a slot.
    Text { slot: Slot, text: String },
    /// Redraw the chart with this series.
    Series(Vec<f64>),
}

/// Factory for sinks that forward writes to a display over a channel.
#[derive(Clone)]
pub struct DisplaySink {
    tx: Sender<DisplayCommand>,
}

impl DisplaySink {
    /// Text sink writing to `slot`.
    pub fn text(&self, slot: Slot) -> ChannelText {
        ChannelText {
            slot,
            tx: self.tx.clone(),
        }
    }

    pub fn chart(&self) -> ChannelChart {
        ChannelChart {
            tx: self.tx.clone(),
        }
    }

    /// All four metric slots wired to this channel.
    pub fn output_slots(&self) -> OutputSlots {
        OutputSlots::from_fn(|m| -> Box<dyn TextSink> { Box::new(self.text(Slot::Metric(m))) })
    }
}

#[derive(Clone)]
pub struct ChannelText {
    slot: Slot,
    tx: Sender<DisplayCommand>,
}

impl TextSink for ChannelText {
    fn write(&mut self, text: &str) {
        // Ignore error if the display closed (receiver dropped)
        let _ = self.tx.send(DisplayCommand::Text {
            slot: self.slot,
            text: text.to_owned(),
        });
    }
}

#[derive(Clone)]
pub struct ChannelChart {
    tx: Sender<DisplayCommand>,
}

impl ChartSink for ChannelChart {
    fn render(&mut self, series: &[f64]) {
        let _ = self.tx.send(DisplayCommand::Series(series.to_vec()));
    }
}

/// Create a new channel pair for display output: `(DisplaySink, Receiver<DisplayCommand>)`.
pub fn channel_display() -> (DisplaySink, Receiver<DisplayCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (DisplaySink { tx }, rx)
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared in-thread sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Text slot whose latest value can be read back by another handle.
#[derive(Clone, Default, Debug)]
pub struct SharedText(Rc<RefCell<String>>);

impl SharedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with placeholder text, e.g. `"--"`.
    pub fn with_text(text: &str) -> Self {
        Self(Rc::new(RefCell::new(text.to_owned())))
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }
}

impl TextSink for SharedText {
    fn write(&mut self, text: &str) {
        let mut s = self.0.borrow_mut();
        s.clear();
        s.push_str(text);
    }
}

/// Chart whose latest series can be read back by another handle.
///
/// Also counts redraws, so a reader can tell whether anything changed.
#[derive(Clone, Default, Debug)]
pub struct SharedSeries {
    series: Rc<RefCell<Vec<f64>>>,
    renders: Rc<Cell<u64>>,
}

impl SharedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Vec<f64> {
        self.series.borrow().clone()
    }

    /// `[index, value]` pairs for egui_plot.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.series
            .borrow()
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, *v])
            .collect()
    }

    /// Number of `render` calls so far.
    pub fn render_count(&self) -> u64 {
        self.renders.get()
    }
}

impl ChartSink for SharedSeries {
    fn render(&mut self, series: &[f64]) {
        let mut s = self.series.borrow_mut();
        s.clear();
        s.extend_from_slice(series);
        self.renders.set(self.renders.get() + 1);
    }
}
