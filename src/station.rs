//! Nurse station overview: the latest readings of every patient on the stream.
//!
//! Unlike the single-patient renderer, the board keeps every subject it sees.
//! Readings merge per field (a missing field keeps the previous value) and
//! zero is stored like any other value.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::sample::{SensorUpdate, StationUpdate, SubjectId, VitalSample};

#[derive(Debug, Clone, PartialEq)]
pub struct StationEntry {
    pub sample: VitalSample,
    pub last_seen: DateTime<Utc>,
    /// Number of sensor readings received for this patient. A
    /// `station_update` echoing a reading refreshes the entry without
    /// counting it again.
    pub updates: u64,
}

impl StationEntry {
    /// `true` if nothing was heard for longer than `max_age` before `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        // A last_seen in the future yields an error here and counts as fresh.
        (now - self.last_seen)
            .to_std()
            .map(|age| age > max_age)
            .unwrap_or(false)
    }
}

#[derive(Debug, Default, Clone)]
pub struct StationBoard {
    entries: BTreeMap<SubjectId, StationEntry>,
}

impl StationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `sensor_update` received at `at`.
    pub fn observe(&mut self, update: &SensorUpdate, at: DateTime<Utc>) {
        self.record(&update.subject, &update.sample, at, true);
    }

    /// Record a `station_update`, preferring its own `last_seen` stamp.
    pub fn apply_station_update(&mut self, update: &StationUpdate, at: DateTime<Utc>) {
        let seen = update.last_seen.and_then(epoch_secs_to_utc).unwrap_or(at);
        self.record(&update.subject, &update.sample, seen, false);
    }

    fn record(
        &mut self,
        subject: &SubjectId,
        sample: &VitalSample,
        at: DateTime<Utc>,
        reading: bool,
    ) {
        match self.entries.get_mut(subject) {
            Some(entry) => {
                entry.sample.merge(sample);
                entry.last_seen = entry.last_seen.max(at);
                if reading {
                    entry.updates += 1;
                }
            }
            None => {
                log::debug!("station: new patient {subject}");
                self.entries.insert(
                    subject.clone(),
                    StationEntry {
                        sample: *sample,
                        last_seen: at,
                        updates: 1,
                    },
                );
            }
        }
    }

    pub fn get(&self, subject: &SubjectId) -> Option<&StationEntry> {
        self.entries.get(subject)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by subject.
    pub fn iter(&self) -> impl Iterator<Item = (&SubjectId, &StationEntry)> {
        self.entries.iter()
    }

    /// Subjects not heard from within `max_age`.
    pub fn stale(&self, now: DateTime<Utc>, max_age: Duration) -> Vec<&SubjectId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_stale(now, max_age))
            .map(|(s, _)| s)
            .collect()
    }
}

fn epoch_secs_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}
