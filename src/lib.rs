//! vitalplot crate root: re-exports and module wiring.
//!
//! A live patient-vitals monitor. Tagged update events arrive on a channel,
//! are filtered by patient and rendered into text slots and a rolling ECG
//! waveform.
//!
//! - `renderer`: [`LiveMetricsRenderer`], the sink-driven core
//! - `window`: fixed-capacity waveform buffer
//! - `sink`: output capabilities and the channel/shared implementations
//! - `sample`, `events`: wire model and JSON decoding
//! - `feed`, `simulator`: event sources
//! - `station`: per-patient overview for the nurse station
//! - `config`, `error`: configuration and error types
//! - `app`: the egui/eframe window

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod renderer;
pub mod sample;
pub mod simulator;
pub mod sink;
pub mod station;
pub mod window;

// Public re-exports for a compact external API
pub use app::{run_dashboard, VitalsApp};
pub use config::VitalsConfig;
pub use error::{ConfigError, FeedError};
pub use events::{dispatch, ChannelEvent};
pub use feed::FeedSource;
pub use renderer::{ConnectionStatus, LiveMetricsRenderer};
pub use sample::{DisplayPolicy, Metric, SensorUpdate, StationUpdate, SubjectId, VitalSample};
pub use sink::{channel_display, ChartSink, DisplayCommand, DisplaySink, OutputSlots, Slot, TextSink};
pub use station::StationBoard;
pub use window::WaveformWindow;
