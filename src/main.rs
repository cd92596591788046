//! vitalplot: live vitals monitor window.
//!
//! ```bash
//! # synthetic patients
//! vitalplot --source simulate --patient patient_beta
//! # JSON lines from a server
//! vitalplot --source tcp://127.0.0.1:5000 --config monitor.yaml
//! ```

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;

use vitalplot::feed::{connect_tcp, spawn_stdin};
use vitalplot::simulator::spawn_simulators;
use vitalplot::{run_dashboard, FeedSource, SubjectId, VitalsApp, VitalsConfig};

#[derive(Debug, Parser)]
#[command(name = "vitalplot", version, about = "Live patient vitals monitor")]
struct Cli {
    /// JSON or YAML config file.
    #[arg(short, long, env = "VITALPLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Patient to monitor (overrides the config).
    #[arg(short, long)]
    patient: Option<String>,

    /// ECG window length in samples (overrides the config).
    #[arg(short, long)]
    window: Option<usize>,

    /// Event source: stdin, simulate or tcp://host:port.
    #[arg(short, long, default_value = "simulate")]
    source: FeedSource,

    /// Patients produced by `--source simulate`.
    #[arg(long, value_delimiter = ',', default_value = "patient_alpha,patient_beta,patient_gamma")]
    simulate_patients: Vec<String>,

    /// Delay between simulated updates, in milliseconds.
    #[arg(long, default_value_t = 100)]
    simulate_interval_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => VitalsConfig::load(path)?,
        None => VitalsConfig::default(),
    };
    if let Some(p) = cli.patient {
        cfg.subject = SubjectId::new(p);
    }
    if let Some(w) = cli.window {
        cfg.window_capacity = w;
    }
    cfg.validate()?;

    let (tx, rx) = mpsc::channel();
    match &cli.source {
        FeedSource::Stdin => {
            spawn_stdin(tx);
        }
        FeedSource::Tcp(addr) => {
            connect_tcp(addr, tx)?;
        }
        FeedSource::Simulate => {
            let subjects = cli.simulate_patients.into_iter().map(SubjectId::new).collect();
            spawn_simulators(subjects, Duration::from_millis(cli.simulate_interval_ms), tx);
        }
    }

    log::info!("monitoring {} from {:?}", cfg.subject, cli.source);
    let app = VitalsApp::new(rx, cfg)?;
    run_dashboard(app)?;
    Ok(())
}
