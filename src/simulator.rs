//! Synthetic patients for demos and offline testing.
//!
//! Each simulated patient produces an ECG trace built from five Gaussian
//! bumps (P, Q, R, S and T waves) per one-second beat, scaled into the
//! 0..1024 range of a 10-bit ADC, plus jittered scalar vitals.

use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::events::ChannelEvent;
use crate::sample::{SensorUpdate, SubjectId, VitalSample};

/// Simulated time advanced per update, in seconds.
pub const TIME_STEP: f64 = 0.05;

/// Noise-free ECG value at time `t` (seconds).
pub fn ecg_waveform(t: f64) -> f64 {
    let phase = t.rem_euclid(1.0);
    let bump = |amp: f64, center: f64, width: f64| amp * (-(phase - center).powi(2) / width).exp();
    let p = bump(0.1, 0.2, 0.005);
    let q = bump(-0.15, 0.35, 0.002);
    let r = bump(1.0, 0.4, 0.002);
    let s = bump(-0.2, 0.45, 0.002);
    let t_wave = bump(0.2, 0.7, 0.01);
    (p + q + r + s + t_wave) * 500.0 + 512.0
}

pub struct PatientSimulator {
    subject: SubjectId,
    t: f64,
    rng: StdRng,
}

impl PatientSimulator {
    /// Deterministic simulator; the same seed yields the same stream.
    pub fn new<S: Into<SubjectId>>(subject: S, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let t = rng.gen::<f64>();
        Self {
            subject: subject.into(),
            t,
            rng,
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn next_update(&mut self) -> SensorUpdate {
        let rng = &mut self.rng;
        let ecg = ecg_waveform(self.t).trunc() + f64::from(rng.gen_range(-10i32..=10));
        let hr = f64::from(75 + rng.gen_range(-5i32..=5));
        let spo2 = f64::from(98 + rng.gen_range(-1i32..=1));
        let temp = round1(36.5 + rng.gen_range(-0.2..=0.2));
        let hum = round1(45.0 + rng.gen_range(-2.0..=2.0));
        self.t += TIME_STEP;

        SensorUpdate::new(
            self.subject.clone(),
            VitalSample::new()
                .with_ecg(ecg)
                .with_hr(hr)
                .with_spo2(spo2)
                .with_temp(temp)
                .with_hum(hum),
        )
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Run one simulator per subject on a background thread.
///
/// Sends `Connect` first, then one update per subject every `interval`.
/// The thread ends when the receiver is dropped.
pub fn spawn_simulators(
    subjects: Vec<SubjectId>,
    interval: Duration,
    tx: Sender<ChannelEvent>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut sims: Vec<PatientSimulator> = subjects
            .into_iter()
            .enumerate()
            .map(|(i, s)| PatientSimulator::new(s, 0x5EED + i as u64))
            .collect();
        log::info!("simulating {} patient(s)", sims.len());
        if tx.send(ChannelEvent::Connect).is_err() {
            return;
        }
        loop {
            for sim in sims.iter_mut() {
                if tx.send(ChannelEvent::SensorUpdate(sim.next_update())).is_err() {
                    log::debug!("simulator stopped: receiver closed");
                    return;
                }
            }
            std::thread::sleep(interval);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_peak_dominates_the_beat() {
        let peak = ecg_waveform(0.4);
        assert!(peak > 900.0, "R peak should be near the top of the ADC range, got {peak}");
        let baseline = ecg_waveform(0.95);
        assert!((baseline - 512.0).abs() < 1.0);
        assert!((ecg_waveform(1.4) - peak).abs() < 1e-9);
    }

    #[test]
    fn readings_stay_in_range() {
        let mut sim = PatientSimulator::new("patient_alpha", 7);
        for _ in 0..500 {
            let u = sim.next_update();
            assert_eq!(u.subject.as_str(), "patient_alpha");
            let s = u.sample;
            let hr = s.hr.unwrap();
            assert!((70.0..=80.0).contains(&hr));
            assert_eq!(hr.fract(), 0.0);
            assert!((97.0..=99.0).contains(&s.spo2.unwrap()));
            assert!((36.3..=36.7).contains(&s.temp.unwrap()));
            assert!((43.0..=47.0).contains(&s.hum.unwrap()));
            assert!(s.ecg.is_some());
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = PatientSimulator::new("p", 42);
        let mut b = PatientSimulator::new("p", 42);
        for _ in 0..10 {
            assert_eq!(a.next_update(), b.next_update());
        }
    }
}
