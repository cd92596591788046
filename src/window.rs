//! Fixed-capacity waveform window.
//!
//! The window always holds exactly `capacity` samples, oldest first. It is
//! created full of a neutral value and every [`push`](WaveformWindow::push)
//! evicts the oldest sample before appending, so the length never changes.

use std::collections::VecDeque;

use crate::error::ConfigError;

/// Default number of samples shown on the ECG chart.
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct WaveformWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl WaveformWindow {
    /// Create a window of `capacity` samples, all set to `neutral`.
    pub fn new(capacity: usize, neutral: f64) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidWindowCapacity(capacity));
        }
        let mut samples = VecDeque::with_capacity(capacity);
        samples.resize(capacity, neutral);
        Ok(Self { samples, capacity })
    }

    /// Evict the oldest sample, append `sample`, and return the evicted one.
    pub fn push(&mut self, sample: f64) -> f64 {
        // Never empty: capacity > 0 and length is constant.
        let evicted = self.samples.pop_front().unwrap_or_default();
        self.samples.push_back(sample);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Contiguous oldest-first copy, as handed to chart sinks.
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
