//! Channel events and their JSON wire format.
//!
//! The transport delivers one JSON object per line. The usual shape is an
//! envelope naming the topic:
//!
//! ```json
//! {"event": "sensor_update", "payload": {"patient_id": "patient_alpha", "data": {"hr": 72}}}
//! {"event": "connect"}
//! ```
//!
//! Devices posting straight into the stream send a flat object instead,
//! `{"patient_id": "patient_alpha", "hr": 72, "ecg": 530}`; that is read as a
//! `sensor_update` whose readings are the remaining fields.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::FeedError;
use crate::renderer::LiveMetricsRenderer;
use crate::sample::{SensorUpdate, StationUpdate};
use crate::station::StationBoard;

pub const TOPIC_CONNECT: &str = "connect";
pub const TOPIC_DISCONNECT: &str = "disconnect";
pub const TOPIC_SENSOR_UPDATE: &str = "sensor_update";
pub const TOPIC_STATION_UPDATE: &str = "station_update";

/// Everything the transport can deliver.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// The channel became reachable.
    Connect,
    /// The channel was lost.
    Disconnect,
    SensorUpdate(SensorUpdate),
    StationUpdate(StationUpdate),
    /// A topic this dashboard does not handle.
    Unknown { topic: String },
}

impl ChannelEvent {
    pub fn topic(&self) -> &str {
        match self {
            ChannelEvent::Connect => TOPIC_CONNECT,
            ChannelEvent::Disconnect => TOPIC_DISCONNECT,
            ChannelEvent::SensorUpdate(_) => TOPIC_SENSOR_UPDATE,
            ChannelEvent::StationUpdate(_) => TOPIC_STATION_UPDATE,
            ChannelEvent::Unknown { topic } => topic,
        }
    }

    /// Decode one line of the wire format.
    pub fn decode(line: &str) -> Result<Self, FeedError> {
        let decode_err = |source| FeedError::Decode {
            line: line.to_owned(),
            source,
        };
        let value: Value = serde_json::from_str(line).map_err(decode_err)?;
        let Value::Object(mut obj) = value else {
            return Err(FeedError::MissingTopic);
        };

        if let Some(topic) = obj.get("event").and_then(Value::as_str).map(str::to_owned) {
            let payload = obj.remove("payload").unwrap_or(Value::Null);
            return match topic.as_str() {
                TOPIC_CONNECT => Ok(ChannelEvent::Connect),
                TOPIC_DISCONNECT => Ok(ChannelEvent::Disconnect),
                TOPIC_SENSOR_UPDATE => serde_json::from_value(payload)
                    .map(ChannelEvent::SensorUpdate)
                    .map_err(decode_err),
                TOPIC_STATION_UPDATE => serde_json::from_value(payload)
                    .map(ChannelEvent::StationUpdate)
                    .map_err(decode_err),
                _ => Ok(ChannelEvent::Unknown { topic: topic.clone() }),
            };
        }

        // Flat device shape: patient_id next to the readings.
        if let Some(subject) = obj.remove("patient_id") {
            let mut wrapped = Map::new();
            wrapped.insert("patient_id".to_owned(), subject);
            wrapped.insert("data".to_owned(), Value::Object(obj));
            return serde_json::from_value(Value::Object(wrapped))
                .map(ChannelEvent::SensorUpdate)
                .map_err(decode_err);
        }

        Err(FeedError::MissingTopic)
    }

    /// Encode as an envelope line (no trailing newline).
    pub fn encode(&self) -> String {
        let payload = match self {
            ChannelEvent::SensorUpdate(u) => serde_json::to_value(u).ok(),
            ChannelEvent::StationUpdate(u) => serde_json::to_value(u).ok(),
            _ => None,
        };
        let mut obj = Map::new();
        obj.insert("event".to_owned(), Value::String(self.topic().to_owned()));
        if let Some(p) = payload {
            obj.insert("payload".to_owned(), p);
        }
        Value::Object(obj).to_string()
    }
}

/// Route an event to the renderer and the station board.
pub fn dispatch(event: &ChannelEvent, renderer: &mut LiveMetricsRenderer, board: &mut StationBoard) {
    dispatch_at(event, renderer, board, Utc::now())
}

/// Like [`dispatch`], stamping station entries with `at`.
pub fn dispatch_at(
    event: &ChannelEvent,
    renderer: &mut LiveMetricsRenderer,
    board: &mut StationBoard,
    at: DateTime<Utc>,
) {
    match event {
        ChannelEvent::Connect => renderer.on_connection_change(true),
        ChannelEvent::Disconnect => renderer.on_connection_change(false),
        ChannelEvent::SensorUpdate(update) => {
            board.observe(update, at);
            renderer.on_update(update);
        }
        ChannelEvent::StationUpdate(update) => board.apply_station_update(update, at),
        ChannelEvent::Unknown { topic } => log::debug!("ignoring event on topic {topic:?}"),
    }
}
