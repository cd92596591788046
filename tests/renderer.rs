use std::cell::RefCell;
use std::rc::Rc;

use vitalplot::sink::{SharedSeries, SharedText};
use vitalplot::{
    ChartSink, ConfigError, ConnectionStatus, LiveMetricsRenderer, Metric, OutputSlots,
    SensorUpdate, TextSink, VitalSample,
};

/// Records every write so tests can assert on history, not just the last value.
#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    fn writes(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }
}

impl TextSink for Recorder {
    fn write(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_owned());
    }
}

#[derive(Clone, Default)]
struct ChartRecorder(Rc<RefCell<Vec<Vec<f64>>>>);

impl ChartSink for ChartRecorder {
    fn render(&mut self, series: &[f64]) {
        self.0.borrow_mut().push(series.to_vec());
    }
}

struct Fixture {
    renderer: LiveMetricsRenderer,
    hr: Recorder,
    spo2: Recorder,
    temp: Recorder,
    hum: Recorder,
    status: Recorder,
    chart: ChartRecorder,
}

impl Fixture {
    fn new(capacity: usize) -> Self {
        let (hr, spo2, temp, hum) = (
            Recorder::default(),
            Recorder::default(),
            Recorder::default(),
            Recorder::default(),
        );
        let status = Recorder::default();
        let chart = ChartRecorder::default();
        let slots = OutputSlots {
            hr: Box::new(hr.clone()),
            spo2: Box::new(spo2.clone()),
            temp: Box::new(temp.clone()),
            hum: Box::new(hum.clone()),
        };
        let renderer =
            LiveMetricsRenderer::new("patient_alpha", capacity, slots, chart.clone(), status.clone())
                .unwrap();
        Self {
            renderer,
            hr,
            spo2,
            temp,
            hum,
            status,
            chart,
        }
    }

    fn update(&mut self, sample: VitalSample) {
        self.renderer
            .on_update(&SensorUpdate::new("patient_alpha", sample));
    }

    fn slot_writes(&self) -> usize {
        [&self.hr, &self.spo2, &self.temp, &self.hum]
            .iter()
            .map(|r| r.writes().len())
            .sum()
    }

    fn renders(&self) -> Vec<Vec<f64>> {
        self.chart.0.borrow().clone()
    }
}

#[test]
fn zero_capacity_fails_with_config_error() {
    let slots = OutputSlots::from_fn(|_| -> Box<dyn TextSink> { Box::new(SharedText::new()) });
    let err = LiveMetricsRenderer::new("p", 0, slots, SharedSeries::new(), SharedText::new())
        .err()
        .expect("capacity 0 must be rejected");
    assert!(matches!(err, ConfigError::InvalidWindowCapacity(0)));
}

#[test]
fn window_length_is_constant_under_ecg_updates() {
    for cap in [1usize, 2, 3, 7, 100] {
        let mut f = Fixture::new(cap);
        assert_eq!(f.renderer.window().len(), cap);
        for n in 0..250 {
            f.update(VitalSample::new().with_ecg(n as f64));
            assert_eq!(f.renderer.window().len(), cap);
        }
    }
}

#[test]
fn other_subjects_change_nothing() {
    let mut f = Fixture::new(3);
    let before = f.renderer.window().to_vec();
    f.renderer.on_update(&SensorUpdate::new(
        "patient_beta",
        VitalSample::new()
            .with_hr(80.0)
            .with_spo2(97.0)
            .with_temp(37.0)
            .with_hum(40.0)
            .with_ecg(600.0),
    ));
    assert_eq!(f.slot_writes(), 0);
    assert!(f.renders().is_empty());
    assert_eq!(f.renderer.window().to_vec(), before);
}

#[test]
fn hr_is_sticky_across_empty_updates() {
    let mut f = Fixture::new(3);
    f.update(VitalSample::new().with_hr(72.0));
    assert_eq!(f.hr.last().as_deref(), Some("72"));
    f.update(VitalSample::new());
    assert_eq!(f.hr.last().as_deref(), Some("72"));
    assert_eq!(f.hr.writes().len(), 1);
}

#[test]
fn ecg_updates_shift_the_window() {
    let mut f = Fixture::new(3);
    assert_eq!(f.renderer.window().to_vec(), vec![0.0, 0.0, 0.0]);
    f.update(VitalSample::new().with_ecg(5.0));
    assert_eq!(f.renderer.window().to_vec(), vec![0.0, 0.0, 5.0]);
    f.update(VitalSample::new().with_ecg(9.0));
    assert_eq!(f.renderer.window().to_vec(), vec![0.0, 5.0, 9.0]);
    assert_eq!(f.renders(), vec![vec![0.0, 0.0, 5.0], vec![0.0, 5.0, 9.0]]);
}

#[test]
fn temperature_uses_one_decimal() {
    let mut f = Fixture::new(3);
    f.update(VitalSample::new().with_temp(36.66).with_hum(45.04));
    assert_eq!(f.temp.last().as_deref(), Some("36.7"));
    assert_eq!(f.hum.last().as_deref(), Some("45.0"));
}

#[test]
fn connection_changes_only_touch_status() {
    let mut f = Fixture::new(3);
    f.renderer.on_connection_change(true);
    assert_eq!(f.renderer.connection(), ConnectionStatus::Connected);
    f.renderer.on_connection_change(false);
    assert_eq!(f.renderer.connection(), ConnectionStatus::Disconnected);
    assert_eq!(f.status.writes(), vec!["Connected", "Disconnected"]);
    assert_eq!(f.slot_writes(), 0);
    assert!(f.renders().is_empty());
}

#[test]
fn zero_hr_keeps_prior_value() {
    let mut f = Fixture::new(3);
    f.update(VitalSample::new().with_hr(72.0));
    f.update(VitalSample::new().with_hr(0.0));
    assert_eq!(f.hr.last().as_deref(), Some("72"));
    assert_eq!(f.hr.writes().len(), 1);
}

#[test]
fn zero_ecg_is_still_a_sample() {
    let mut f = Fixture::new(2);
    f.update(VitalSample::new().with_ecg(7.0));
    f.update(VitalSample::new().with_ecg(0.0));
    assert_eq!(f.renderer.window().to_vec(), vec![7.0, 0.0]);
    assert_eq!(f.renders().len(), 2);
}

#[test]
fn at_most_one_redraw_per_update() {
    let mut f = Fixture::new(4);
    f.update(
        VitalSample::new()
            .with_hr(70.0)
            .with_spo2(98.0)
            .with_temp(36.5)
            .with_hum(44.0)
            .with_ecg(512.0),
    );
    assert_eq!(f.renders().len(), 1);
    f.update(VitalSample::new().with_hr(71.0));
    assert_eq!(f.renders().len(), 1);
}

#[test]
fn all_scalar_slots_are_written() {
    let mut f = Fixture::new(4);
    f.update(
        VitalSample::new()
            .with_hr(70.0)
            .with_spo2(98.0)
            .with_temp(36.5)
            .with_hum(44.0),
    );
    assert_eq!(f.hr.last().as_deref(), Some("70"));
    assert_eq!(f.spo2.last().as_deref(), Some("98"));
    assert_eq!(f.temp.last().as_deref(), Some("36.5"));
    assert_eq!(f.hum.last().as_deref(), Some("44.0"));
    assert!(f.renders().is_empty());
}

#[test]
fn metric_slot_names_match_display_targets() {
    let names: Vec<_> = Metric::ALL.iter().map(|m| m.slot_name()).collect();
    assert_eq!(names, vec!["hr", "spo2", "temp", "hum"]);
}
