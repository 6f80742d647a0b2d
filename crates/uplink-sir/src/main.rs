//! Uplink SIR Monte-Carlo CLI
//!
//! Runs the snapshot engine and reports SIR, coverage and throughput.
//!
//! Usage:
//!   uplink-sim --snapshots 1500 --reuse 3 --power-control 0.8 \
//!              --seed 42 --output data/uplink_reuse3.json
//!
//!   uplink-sim --config data/uplink.json --sweep

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uplink_sir::report::{write_reports, SimulationReport};
use uplink_sir::{MonteCarloRunner, ReuseFactor, ReuseSweep, SimConfig, SimulationRun};

#[derive(Parser, Debug)]
#[command(
    name = "uplink-sim",
    about = "Monte-Carlo uplink SIR for a 19-cell, 3-sector hexagonal network"
)]
struct Args {
    /// JSON configuration file (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of Monte-Carlo snapshots
    #[arg(short = 'n', long)]
    snapshots: Option<usize>,

    /// Cell radius in meters
    #[arg(long)]
    cell_radius: Option<f64>,

    /// Path-loss exponent ν
    #[arg(long)]
    path_loss_exponent: Option<f64>,

    /// Shadow fading standard deviation in dB
    #[arg(long)]
    shadow_std_db: Option<f64>,

    /// Frequency reuse factor (1, 3 or 9)
    #[arg(short, long)]
    reuse: Option<u32>,

    /// Fractional power-control exponent ε in [0, 1]
    #[arg(short = 'p', long)]
    power_control: Option<f64>,

    /// Master seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// System bandwidth in Hz
    #[arg(long)]
    bandwidth_hz: Option<f64>,

    /// SNR gap to capacity in dB
    #[arg(long)]
    snr_gap_db: Option<f64>,

    /// Coverage threshold in dB
    #[arg(long)]
    threshold_db: Option<f64>,

    /// Histogram bins
    #[arg(long)]
    bins: Option<usize>,

    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run reuse factors 1, 3 and 9 with the same seed
    #[arg(long)]
    sweep: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };

        if let Some(n) = self.snapshots {
            config.num_snapshots = n;
        }
        if let Some(r) = self.cell_radius {
            config.engine.cell_radius_m = r;
        }
        if let Some(nu) = self.path_loss_exponent {
            config.engine.path_loss_exponent = nu;
        }
        if let Some(sigma) = self.shadow_std_db {
            config.engine.shadow_fading_std_db = sigma;
        }
        if let Some(reuse) = self.reuse {
            config.engine.reuse_factor = ReuseFactor::try_from(reuse)?;
        }
        if let Some(eps) = self.power_control {
            config.engine.power_control_exponent = eps;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(bw) = self.bandwidth_hz {
            config.bandwidth_hz = bw;
        }
        if let Some(gap) = self.snr_gap_db {
            config.snr_gap_db = gap;
        }
        if let Some(threshold) = self.threshold_db {
            config.coverage_threshold_db = threshold;
        }
        if let Some(bins) = self.bins {
            config.histogram_bins = bins;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("Uplink SIR Monte-Carlo");
    info!("{}", "=".repeat(60));

    let config = args.resolve_config()?;
    info!(
        "R = {} m, ν = {}, σ = {} dB, ε = {}, {} snapshots",
        config.engine.cell_radius_m,
        config.engine.path_loss_exponent,
        config.engine.shadow_fading_std_db,
        config.engine.power_control_exponent,
        config.num_snapshots
    );

    let runs: Vec<SimulationRun> = if args.sweep {
        ReuseSweep::run(&config)?.runs
    } else {
        vec![MonteCarloRunner::new(&config)?.run()]
    };

    let reports: Vec<SimulationReport> = runs
        .iter()
        .map(|run| SimulationReport::from_run(&config, run))
        .collect();

    // Summary
    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    for report in &reports {
        info!("Reuse {}:", report.config.engine.reuse_factor);
        if let Some(stats) = &report.statistics {
            info!(
                "  Mean SIR: {:.3} (linear), {:.2} dB (linear mean), {:.2} dB (mean of dB)",
                stats.mean_sir_linear, stats.linear_mean_db, stats.mean_sir_db
            );
            info!(
                "  Median {:.2} dB, 5th pct {:.2} dB, P(SIR ≥ {} dB) = {:.3}",
                stats.median_sir_db,
                stats.p5_sir_db,
                stats.coverage_threshold_db,
                stats.coverage_probability
            );
        }
        if let Some(tp) = &report.throughput {
            info!(
                "  Mean bit rate: {:.3} Mbps, cell edge {:.3} Mbps",
                tp.mean_bps / 1e6,
                tp.p5_bps / 1e6
            );
        }
    }

    if let Some(output) = &args.output {
        write_reports(output, &reports)?;
    }

    Ok(())
}
