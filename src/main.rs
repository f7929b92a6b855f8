use anyhow::{Context, Result};
use clap::Parser;
use hifitime::{Duration, Epoch};
use orbit_globe::config::scenario::Scenario;
use orbit_globe::config::tle::TleSelector;
use orbit_globe::constants::NOMINAL_FRAME_SECONDS;
use orbit_globe::integrators::stepping::Stepping;
use orbit_globe::output::sink::CsvFrameSink;
use orbit_globe::simulation::{self, SimulationSettings};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

/// Headless driver for the orbiting-satellites globe.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Scenario CSV (semi_major_axis,eccentricity,inclination_deg,ascending_node_deg)
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Two-line element catalogue (name line + two element lines per satellite)
    #[arg(long, conflicts_with = "scenario")]
    tle: Option<PathBuf>,
    /// Satellite to pick from the catalogue, by name or NORAD id
    #[arg(long)]
    satellite: Option<String>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,
    /// Host frame period in seconds
    #[arg(long, default_value_t = NOMINAL_FRAME_SECONDS)]
    dt: f64,
    /// Record every n-th tick
    #[arg(long, default_value_t = 10)]
    sample_every: u64,
    /// Step by elapsed time at the rates the per-tick steps give at 60 fps
    #[arg(long)]
    time_based: bool,
    /// Satellite angular rate in rad/s (switches off frame-coupled stepping)
    #[arg(long)]
    rate: Option<f64>,
    /// Output CSV file
    #[arg(long, default_value = "output/orbit_frames.csv")]
    output: PathBuf,
}

fn check_args(cli: &Cli) -> Result<()> {
    if !(cli.dt.is_finite() && cli.dt >= 0.0) {
        anyhow::bail!("dt must be a non-negative number of seconds, got {}", cli.dt);
    }
    if let Some(rate) = cli.rate {
        if !rate.is_finite() {
            anyhow::bail!("rate must be a finite number of rad/s, got {}", rate);
        }
    }
    if cli.satellite.is_some() && cli.tle.is_none() {
        anyhow::bail!("--satellite needs a --tle catalogue");
    }
    Ok(())
}

fn load_scenario(cli: &Cli) -> Result<Scenario> {
    if let Some(path) = &cli.tle {
        let selector = cli.satellite.as_deref().map(TleSelector::parse);
        return Scenario::from_tle_path(path, selector.as_ref())
            .with_context(|| format!("Failed to load TLE catalogue {}", path.display()));
    }

    Scenario::resolve(cli.scenario.as_deref()).context("Failed to load scenario")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    check_args(&cli)?;

    let mut scenario = load_scenario(&cli)?;
    if cli.time_based {
        scenario.satellite_stepping = scenario.satellite_stepping.time_based();
        scenario.globe_stepping = scenario.globe_stepping.time_based();
    }
    if let Some(rate) = cli.rate {
        scenario.satellite_stepping = Stepping::Rate(rate);
    }
    let mut constellation = scenario.build().context("Invalid scenario")?;

    if let Some(dir) = cli.output.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut sink = CsvFrameSink::new(BufWriter::new(file), cli.sample_every);

    let start_epoch = Epoch::now().map_err(|e| anyhow::anyhow!("Failed to read clock: {}", e))?;
    let settings = SimulationSettings {
        ticks: cli.ticks,
        dt: Duration::from_seconds(cli.dt),
        start_epoch,
    };

    let summary = simulation::run(&mut constellation, &mut sink, &settings)?;
    log::info!(
        "Simulated {} frames, sampled into {}",
        summary.frames_recorded,
        cli.output.display()
    );

    Ok(())
}
