//! Dashboard configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working monitor for `patient_alpha`. Files are read as JSON or YAML
//! depending on their extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sample::{DisplayPolicy, SubjectId};
use crate::window::DEFAULT_WINDOW_CAPACITY;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Patient whose updates are displayed.
    pub subject: SubjectId,
    /// Number of ECG samples kept on the chart.
    pub window_capacity: usize,
    /// Value the ECG window is pre-filled with.
    pub neutral_sample: f64,
    pub display_policy: DisplayPolicy,
    /// Fixed y range of the ECG plot. The default matches a 10-bit ADC.
    pub y_min: f64,
    pub y_max: f64,
    /// Window title.
    pub title: String,
    /// Station entries older than this are flagged stale.
    pub station_max_age_secs: u64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            subject: SubjectId::new("patient_alpha"),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            neutral_sample: 0.0,
            display_policy: DisplayPolicy::default(),
            y_min: 0.0,
            y_max: 1024.0,
            title: "Vitals Monitor".to_owned(),
            station_max_age_secs: 10,
        }
    }
}

impl VitalsConfig {
    /// Load from a `.json`, `.yaml` or `.yml` file and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let cfg: VitalsConfig = match ext.as_deref() {
            Some("json") => serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        cfg.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_capacity == 0 {
            return Err(ConfigError::InvalidWindowCapacity(self.window_capacity));
        }
        if self.subject.as_str().is_empty() {
            return Err(ConfigError::EmptySubject);
        }
        if !(self.y_min < self.y_max) {
            return Err(ConfigError::InvalidYRange {
                min: self.y_min,
                max: self.y_max,
            });
        }
        Ok(())
    }

    pub fn station_max_age(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.station_max_age_secs)
    }
}
