//! Wire-level data model: subjects, vital samples and update events.
//!
//! On the wire an update looks like
//! `{"patient_id": "patient_alpha", "data": {"hr": 72, "ecg": 530}}`.
//! Every reading inside `data` is optional. A reading that is missing,
//! `null` or not a number deserializes to `None` instead of failing the whole
//! event, so a single bad field never drops the other readings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of a monitored patient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Scalar vitals shown as text tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    HeartRate,
    SpO2,
    Temperature,
    Humidity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::HeartRate,
        Metric::SpO2,
        Metric::Temperature,
        Metric::Humidity,
    ];

    /// Name of the output slot this metric is written to.
    pub fn slot_name(self) -> &'static str {
        match self {
            Metric::HeartRate => "hr",
            Metric::SpO2 => "spo2",
            Metric::Temperature => "temp",
            Metric::Humidity => "hum",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate",
            Metric::SpO2 => "SpO2",
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::HeartRate => "BPM",
            Metric::SpO2 => "%",
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
        }
    }

    /// Render a reading for display.
    ///
    /// Heart rate and SpO2 are integer readings and are printed as-is;
    /// temperature and humidity use one fixed decimal, with an exact tie
    /// rounded away from zero (`36.25` shows as `36.3`).
    pub fn format(self, value: f64) -> String {
        match self {
            Metric::HeartRate | Metric::SpO2 => format!("{value}"),
            Metric::Temperature | Metric::Humidity => one_decimal(value),
        }
    }
}

/// Fixed one-decimal rendering that breaks exact ties away from zero.
///
/// `{:.1}` already rounds on the exact binary value, so only true ties
/// differ, and the only doubles sitting exactly halfway between two tenths
/// are odd multiples of `0.25`.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

/// How scalar readings are checked for presence before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// A reading of exactly `0` counts as "no reading" and keeps the prior
    /// value on screen. This is how the original dashboard behaved.
    #[default]
    ZeroIsAbsent,
    /// Any present, finite reading is displayed, zero included.
    ExplicitPresence,
}

impl DisplayPolicy {
    /// Returns the value to display, or `None` to leave the slot untouched.
    pub fn displayable(self, value: Option<f64>) -> Option<f64> {
        let v = value.filter(|v| !v.is_nan())?;
        match self {
            DisplayPolicy::ZeroIsAbsent if v == 0.0 => None,
            _ => Some(v),
        }
    }
}

/// One tick of readings from a patient's sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSample {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub hr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub spo2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub hum: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub ecg: Option<f64>,
}

impl VitalSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hr(mut self, v: f64) -> Self {
        self.hr = Some(v);
        self
    }

    pub fn with_spo2(mut self, v: f64) -> Self {
        self.spo2 = Some(v);
        self
    }

    pub fn with_temp(mut self, v: f64) -> Self {
        self.temp = Some(v);
        self
    }

    pub fn with_hum(mut self, v: f64) -> Self {
        self.hum = Some(v);
        self
    }

    pub fn with_ecg(mut self, v: f64) -> Self {
        self.ecg = Some(v);
        self
    }

    /// Scalar reading for `metric`, if present.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::HeartRate => self.hr,
            Metric::SpO2 => self.spo2,
            Metric::Temperature => self.temp,
            Metric::Humidity => self.hum,
        }
    }

    /// Overlay the readings present in `newer` on top of `self`.
    pub fn merge(&mut self, newer: &VitalSample) {
        self.hr = newer.hr.or(self.hr);
        self.spo2 = newer.spo2.or(self.spo2);
        self.temp = newer.temp.or(self.temp);
        self.hum = newer.hum.or(self.hum);
        self.ecg = newer.ecg.or(self.ecg);
    }
}

/// A `sensor_update` event: readings tagged with the patient they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorUpdate {
    #[serde(rename = "patient_id")]
    pub subject: SubjectId,
    #[serde(rename = "data", default)]
    pub sample: VitalSample,
}

impl SensorUpdate {
    pub fn new<S: Into<SubjectId>>(subject: S, sample: VitalSample) -> Self {
        Self {
            subject: subject.into(),
            sample,
        }
    }
}

/// A `station_update` event for the nurse station overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationUpdate {
    #[serde(rename = "patient_id")]
    pub subject: SubjectId,
    #[serde(rename = "data", default)]
    pub sample: VitalSample,
    /// Seconds since the Unix epoch at which the server received the reading.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}
