use std::env::{set_var, var};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use ascent_sim::analysis::{FlightReport, VelocityLosses};
use ascent_sim::io::{self, FlightSummary};
use ascent_sim::propulsion::{BurnTimeStaging, ScheduledStaging, StagingPolicy};
use ascent_sim::sim::{simulate_with, EventKind, Scenario, SimOutcome};
use ascent_sim::telemetry::read_telemetry_csv;

const LOG_VAR: &str = "ASCENT_LOG";

#[derive(Parser)]
#[command(author, version, about = "Planar staged-rocket ascent simulator")]
struct Cli {
    /// TOML scenario file (takes precedence over --preset)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario
    #[arg(long, value_enum, default_value_t = Preset::KerbinHeavy)]
    preset: Preset,

    /// Recorded telemetry CSV; booster separation is staged at the cutoff found in it
    #[arg(long)]
    telemetry: Option<PathBuf>,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON flight summary
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Preset {
    KerbinHeavy,
    KerbinAllEngines,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }
    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let scenario = match &cli.scenario {
        Some(path) => io::load_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => match cli.preset {
            Preset::KerbinHeavy => Scenario::kerbin_heavy(),
            Preset::KerbinAllEngines => Scenario::kerbin_all_engines(),
        },
    };
    scenario.validate().context("invalid scenario")?;

    // -----------------------------------------------------------------------
    // Staging policy
    // -----------------------------------------------------------------------
    let mut policy: Box<dyn StagingPolicy> = match &cli.telemetry {
        Some(path) => {
            let samples = read_telemetry_csv(path)
                .with_context(|| format!("reading telemetry {}", path.display()))?;
            let estimate = scenario.signature.detect(&samples);
            info!(
                "telemetry: {} samples, booster separation at {:.1}s ({:?})",
                samples.len(),
                estimate.time,
                estimate.source
            );
            Box::new(ScheduledStaging::from_estimate(&estimate))
        }
        None => Box::new(BurnTimeStaging),
    };

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let outcome = simulate_with(&scenario, policy.as_mut())?;
    print_report(&scenario, &outcome);

    if let Some(path) = &cli.csv {
        io::csv::write_trajectory_file(path, &outcome.trajectory)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("trajectory written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        let summary = FlightSummary::from_outcome(&scenario, &outcome);
        io::write_summary_file(path, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("summary written to {}", path.display());
    }
    Ok(())
}

fn print_report(scenario: &Scenario, outcome: &SimOutcome) {
    let mission = &scenario.mission;
    let sim = &scenario.sim;

    println!();
    println!("====================================================================");
    println!("  ASCENT SIMULATION: {}", mission.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Lift-off mass: {:>8.1} t     Cd:           {:>8.3}",
        mission.initial_mass / 1000.0,
        mission.cd
    );
    println!(
        "  Area:          {:>8.2} m^2   Planet:       {:>8}",
        mission.area, scenario.planet.name
    );
    for (i, stage) in mission.stages.iter().enumerate() {
        println!(
            "  [{}] {:<12} {} x {:>6.0} kN  Isp {:>5.0} s  flow {:>7.1} kg/s  burn {:>6.1} s",
            i,
            stage.name,
            stage.engine_count,
            stage.engine_thrust / 1000.0,
            stage.isp,
            stage.mass_flow(),
            stage.burn_time()
        );
    }
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &outcome.events {
        match e.kind {
            EventKind::Separation { .. } => println!(
                "  {:<22} t={:>6.1}s   alt={:>8.0}m   vel={:>7.1}m/s   mass {:.0} -> {:.0} kg",
                e.label(),
                e.time,
                e.altitude,
                e.speed,
                e.mass_before,
                e.mass_after
            ),
            _ => println!(
                "  {:<22} t={:>6.1}s   alt={:>8.0}m   vel={:>7.1}m/s",
                e.label(),
                e.time,
                e.altitude,
                e.speed
            ),
        }
    }
    println!("  Staging: {}   Stop: {}", outcome.staging_policy, outcome.termination);
    if outcome.staging_policy.contains("fallback") {
        println!("  (separation time is the calibrated fallback, no signature found)");
    }
    println!();

    let report = FlightReport::standard(outcome);
    println!("  Checkpoints");
    println!("  ──────────────────────────────────────────────────────────────────");
    for cp in &report.altitude_checkpoints {
        println!(
            "  h = {:>5.0} km   t={:>6.1}s   vel={:>7.1}m/s",
            cp.target / 1000.0,
            cp.sample.time,
            cp.sample.speed
        );
    }
    for cp in &report.time_checkpoints {
        println!(
            "  t = {:>5.0} s    h={:>8.0}m   vel={:>7.1}m/s",
            cp.target, cp.sample.altitude, cp.sample.speed
        );
    }
    if let Some(peak) = report.max_speed {
        println!(
            "  MAX SPEED      t={:>6.1}s   h={:>8.0}m   vel={:>7.1}m/s",
            peak.time, peak.altitude, peak.speed
        );
    }
    if let Some(last) = outcome.final_sample() {
        if let Some(l) = VelocityLosses::at(mission, &outcome.trajectory, last.time) {
            println!(
                "  Ideal {:.1} m/s, actual {:.1} m/s, losses {:.1} m/s ({:.1}%), efficiency {:.1}%",
                l.ideal,
                l.actual,
                l.loss,
                l.loss_percent,
                l.efficiency * 100.0
            );
        }
    }
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}  {:>10}  {:>5}",
        "t (s)", "alt (m)", "vx (m/s)", "vy (m/s)", "v (m/s)", "mass (kg)", "stage"
    );
    println!("  {}", "─".repeat(68));

    let traj = &outcome.trajectory;
    let sample_interval = (traj.len() / 30).max(1);
    let separation_steps: Vec<usize> = outcome.separations().filter_map(|e| e.sample_index).collect();
    for (i, s) in traj.iter().enumerate() {
        let print = i % sample_interval == 0
            || separation_steps.contains(&i)
            || i == traj.len() - 1;
        if !print {
            continue;
        }
        println!(
            "  {:>7.1}  {:>9.1}  {:>9.1}  {:>9.1}  {:>9.1}  {:>10.0}  {:>5}",
            s.time, s.altitude, s.horizontal_velocity, s.vertical_velocity, s.speed, s.mass, s.stage
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={} s", traj.len(), sim.dt);
    println!("====================================================================");
    println!();
}
