//! Error types.
//!
//! Only two things can fail in this crate: building a renderer from bad
//! parameters ([`ConfigError`]) and turning raw transport bytes into
//! [`ChannelEvent`](crate::events::ChannelEvent)s ([`FeedError`]). Everything
//! that happens after an event has been decoded is permissive.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid construction parameters or an unreadable configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The waveform window must hold at least one sample.
    #[error("window capacity must be a positive integer, got {0}")]
    InvalidWindowCapacity(usize),

    /// The subject identifier is empty.
    #[error("subject identifier must not be empty")]
    EmptySubject,

    /// The chart's y range is empty or inverted.
    #[error("invalid y range: min {min} must be below max {max}")]
    InvalidYRange { min: f64, max: f64 },

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("cannot parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Failure to obtain or decode events from the transport.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A line is not valid JSON or does not have the expected shape.
    #[error("cannot decode event {line:?}: {source}")]
    Decode {
        line: String,
        source: serde_json::Error,
    },

    /// A JSON object carries neither an `event` topic nor a `patient_id`.
    #[error("event has no topic")]
    MissingTopic,

    /// Opening the transport failed.
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },
}
