//! JSON run reports

use crate::config::SimConfig;
use crate::rate::{throughputs, ThroughputSummary};
use crate::runner::SimulationRun;
use crate::stats::{Histogram, SirStatistics};
use crate::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Output-only run summary. Infinite statistics (interference-free
/// snapshots) are written as JSON `null`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: SimConfig,
    pub seed: u64,
    pub statistics: Option<SirStatistics>,
    pub throughput: Option<ThroughputSummary>,
    pub sir_histogram_db: Option<Histogram>,
    /// Rates in Mbps
    pub rate_histogram_mbps: Option<Histogram>,
    pub generated_at: String,
}

impl SimulationReport {
    /// Summarise `run`; the reuse factor is taken from the run itself
    pub fn from_run(config: &SimConfig, run: &SimulationRun) -> Self {
        let mut config = config.clone();
        config.engine.reuse_factor = run.reuse_factor;
        config.seed = Some(run.seed);

        let sir_db: Vec<f64> = run.samples.iter().map(|s| s.db()).collect();
        let rates_mbps: Vec<f64> = throughputs(
            &run.samples,
            config.bandwidth_hz,
            run.reuse_factor,
            config.snr_gap_db,
        )
        .into_iter()
        .map(|r| r / 1e6)
        .collect();

        Self {
            seed: run.seed,
            statistics: run.statistics(config.coverage_threshold_db),
            throughput: ThroughputSummary::from_samples(
                &run.samples,
                config.bandwidth_hz,
                run.reuse_factor,
                config.snr_gap_db,
            ),
            sir_histogram_db: Histogram::from_values(&sir_db, config.histogram_bins),
            rate_histogram_mbps: Histogram::from_values(&rates_mbps, config.histogram_bins),
            generated_at: Utc::now().to_rfc3339(),
            config,
        }
    }
}

/// Write one or more reports as pretty JSON
pub fn write_reports(path: &Path, reports: &[SimulationReport]) -> Result<()> {
    info!("Writing {} report(s) to {:?}", reports.len(), path);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    if let [single] = reports {
        serde_json::to_writer_pretty(writer, single)?;
    } else {
        serde_json::to_writer_pretty(writer, reports)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cochannel::ReuseFactor;
    use crate::runner::MonteCarloRunner;
    use crate::sir::{SirAccumulator, SirSample};

    fn small_run() -> (SimConfig, SimulationRun) {
        let config = SimConfig {
            num_snapshots: 300,
            seed: Some(9),
            histogram_bins: 20,
            ..Default::default()
        };
        let run = MonteCarloRunner::new(&config).unwrap().run();
        (config, run)
    }

    #[test]
    fn test_report_contents() {
        let (config, run) = small_run();
        let report = SimulationReport::from_run(&config, &run);

        assert_eq!(report.seed, 9);
        assert_eq!(report.config.engine.reuse_factor, ReuseFactor::One);
        assert_eq!(report.statistics.as_ref().unwrap().count, 300);
        let hist = report.sir_histogram_db.as_ref().unwrap();
        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.counts.iter().sum::<usize>(), 300);
        assert!(report.throughput.unwrap().mean_bps > 0.0);
    }

    #[test]
    fn test_write_and_reload() {
        let (config, run) = small_run();
        let report = SimulationReport::from_run(&config, &run);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_reports(&path, std::slice::from_ref(&report)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["seed"], 9);
        let reloaded: SimConfig = serde_json::from_value(value["config"].clone()).unwrap();
        assert_eq!(reloaded, report.config);
    }

    #[test]
    fn test_interference_free_run_writes_valid_json() {
        let (config, _) = small_run();
        let run = SimulationRun {
            reuse_factor: ReuseFactor::Nine,
            seed: 1,
            samples: vec![
                SirSample::from_linear(2.0),
                SirAccumulator::with_signal(1.0).finish(),
            ],
        };
        let report = SimulationReport::from_run(&config, &run);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("free.json");
        write_reports(&path, std::slice::from_ref(&report)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value["statistics"]["mean_sir_linear"].is_null());
        assert_eq!(value["statistics"]["interference_free"], 1);
        assert_eq!(value["sir_histogram_db"]["excluded"], 1);
    }

    #[test]
    fn test_write_multiple_as_array() {
        let (config, run) = small_run();
        let report = SimulationReport::from_run(&config, &run);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        write_reports(&path, &[report.clone(), report]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));
    }
}
