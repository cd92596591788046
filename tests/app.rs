use std::sync::mpsc;

use vitalplot::app::PLACEHOLDER;
use vitalplot::{ChannelEvent, Metric, SensorUpdate, SubjectId, VitalSample, VitalsApp, VitalsConfig};

fn config(capacity: usize) -> VitalsConfig {
    VitalsConfig {
        window_capacity: capacity,
        ..VitalsConfig::default()
    }
}

fn update(subject: &str, sample: VitalSample) -> ChannelEvent {
    ChannelEvent::SensorUpdate(SensorUpdate::new(subject, sample))
}

#[test]
fn drains_events_into_readouts() {
    let (tx, rx) = mpsc::channel();
    let mut app = VitalsApp::new(rx, config(3)).unwrap();
    assert_eq!(app.metric_text(Metric::HeartRate), PLACEHOLDER);
    assert_eq!(app.chart_series(), vec![0.0; 3]);

    tx.send(ChannelEvent::Connect).unwrap();
    tx.send(update("patient_alpha", VitalSample::new().with_hr(72.0).with_ecg(600.0)))
        .unwrap();
    tx.send(update("patient_beta", VitalSample::new().with_hr(90.0).with_ecg(100.0)))
        .unwrap();
    assert_eq!(app.drain_events(), 3);

    assert_eq!(app.status_text(), "Connected");
    assert_eq!(app.metric_text(Metric::HeartRate), "72");
    assert_eq!(app.chart_series(), vec![0.0, 0.0, 600.0]);
    assert_eq!(app.station().len(), 2);
}

#[test]
fn closed_channel_reads_as_disconnected() {
    let (tx, rx) = mpsc::channel();
    let mut app = VitalsApp::new(rx, config(3)).unwrap();
    tx.send(ChannelEvent::Connect).unwrap();
    drop(tx);
    app.drain_events();
    assert_eq!(app.status_text(), "Disconnected");
}

#[test]
fn switching_patient_resets_readouts() {
    let (tx, rx) = mpsc::channel();
    let mut app = VitalsApp::new(rx, config(2)).unwrap();
    tx.send(ChannelEvent::Connect).unwrap();
    tx.send(update("patient_alpha", VitalSample::new().with_spo2(97.0).with_ecg(5.0)))
        .unwrap();
    app.drain_events();
    assert_eq!(app.metric_text(Metric::SpO2), "97");

    app.monitor(SubjectId::new("patient_beta")).unwrap();
    assert_eq!(app.subject().as_str(), "patient_beta");
    assert_eq!(app.metric_text(Metric::SpO2), PLACEHOLDER);
    assert_eq!(app.chart_series(), vec![0.0, 0.0]);
    assert_eq!(app.status_text(), "Connected");

    tx.send(update("patient_alpha", VitalSample::new().with_spo2(99.0))).unwrap();
    tx.send(update("patient_beta", VitalSample::new().with_spo2(95.0).with_ecg(8.0)))
        .unwrap();
    app.drain_events();
    assert_eq!(app.metric_text(Metric::SpO2), "95");
    assert_eq!(app.chart_series(), vec![0.0, 8.0]);
}

#[test]
fn invalid_config_is_rejected() {
    let (_tx, rx) = mpsc::channel();
    assert!(VitalsApp::new(rx, config(0)).is_err());
}
