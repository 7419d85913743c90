//! CLI command implementations.

use std::path::Path;

use kinema_bench::{BenchmarkMetrics, BenchmarkRunner, Scenario, ScenarioKind};
use kinema_debug::{InspectionHook, SnapshotHook, StateSnapshot, TelemetryHook};
use kinema_material::MaterialLibrary;
use kinema_solver::{SemiImplicitConfig, SemiImplicitSolver};
use kinema_telemetry::{EventBus, TracingSink};
use kinema_types::KinemaError;

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub struct BenchmarkArgs<'a> {
    pub scenario: &'a str,
    pub output: Option<&'a str>,
    pub json: Option<&'a str>,
    pub config: Option<&'a str>,
    pub material: Option<&'a str>,
    pub steps: Option<u32>,
}

fn parse_scenarios(name: &str) -> Result<Vec<ScenarioKind>, KinemaError> {
    if name == "all" {
        Ok(ScenarioKind::all().to_vec())
    } else {
        Ok(vec![name.parse()?])
    }
}

/// Build a scenario, swapping in a library material where the scenario has one.
fn build_scenario(
    kind: ScenarioKind,
    library: &MaterialLibrary,
    material: Option<&str>,
) -> Result<Scenario, KinemaError> {
    let Some(name) = material else {
        return Scenario::from_kind(kind);
    };
    match kind {
        ScenarioKind::HangingCloth => {
            let fabric = library.cloth(name).ok_or_else(|| {
                KinemaError::InvalidConfig(format!(
                    "unknown cloth material '{name}', available: {}",
                    library.cloth_names().join(", ")
                ))
            })?;
            Scenario::hanging_cloth_with(fabric)
        }
        ScenarioKind::SoftBlock => {
            let solid = library.solid(name).ok_or_else(|| {
                KinemaError::InvalidConfig(format!(
                    "unknown solid material '{name}', available: {}",
                    library.solid_names().join(", ")
                ))
            })?;
            Scenario::soft_block_with(solid)
        }
        other => {
            tracing::warn!(scenario = other.name(), material = name, "Scenario has no material, ignoring");
            Scenario::from_kind(other)
        }
    }
}

fn apply_overrides(
    mut scenario: Scenario,
    config: Option<&SemiImplicitConfig>,
    steps: Option<u32>,
) -> Scenario {
    if let Some(config) = config {
        scenario = scenario.with_config(config.clone());
    }
    if let Some(steps) = steps {
        scenario = scenario.with_timesteps(steps);
    }
    scenario
}

/// Run benchmark scenarios.
pub fn benchmark(args: &BenchmarkArgs) -> CliResult {
    println!("Kinema Benchmark Suite");
    println!("══════════════════════");
    println!();

    let kinds = parse_scenarios(args.scenario)?;
    let config = args.config.map(SemiImplicitConfig::load).transpose()?;
    let library = MaterialLibrary::with_defaults();

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let scenario = apply_overrides(build_scenario(kind, &library, args.material)?, config.as_ref(), args.steps);

        println!(
            "Running: {} ({} particles, {} bodies, {} steps, dt {:.2e}s)",
            kind.name(),
            scenario.model.particle_count(),
            scenario.model.body_count(),
            scenario.timesteps,
            scenario.dt,
        );

        let metrics = BenchmarkRunner::run_default(&scenario)
            .map_err(|e| format!("benchmark '{}' failed: {e}", kind.name()))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!("  Stable:        {}", metrics.stable);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    match args.output {
        Some(path) => {
            std::fs::write(path, &csv)?;
            println!("Results written to: {path}");
        }
        None => {
            println!("CSV Output:");
            println!("{csv}");
        }
    }
    if let Some(path) = args.json {
        std::fs::write(path, BenchmarkMetrics::to_json(&all_metrics)?)?;
        println!("JSON written to: {path}");
    }

    Ok(())
}

/// Run one scenario with telemetry logged through `tracing` and optional
/// periodic snapshots.
pub fn simulate(
    scenario_name: &str,
    config_path: Option<&str>,
    steps: Option<u32>,
    snapshot_every: u64,
    snapshot_dir: &str,
) -> CliResult {
    println!("Kinema Simulation");
    println!("─────────────────");

    let kind: ScenarioKind = scenario_name.parse()?;
    let config = config_path.map(SemiImplicitConfig::load).transpose()?;
    let scenario = apply_overrides(Scenario::from_kind(kind)?, config.as_ref(), steps);
    println!("Scenario: {}", kind.name());
    println!("Duration: {:.3}s ({} steps)", scenario.duration(), scenario.timesteps);
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::default()));
    let mut telemetry = TelemetryHook::with_emitter(bus.emitter());
    let mut snapshots = SnapshotHook::new(snapshot_every);

    let mut solver = SemiImplicitSolver::new(scenario.config.clone())?;
    let metrics = {
        let mut hooks: Vec<&mut dyn InspectionHook> = vec![&mut telemetry];
        if snapshot_every > 0 {
            hooks.push(&mut snapshots);
        }
        BenchmarkRunner::run_with_hooks(&scenario, &mut solver, &mut hooks)?
    };
    bus.shutdown();

    if snapshot_every > 0 {
        let dir = Path::new(snapshot_dir);
        std::fs::create_dir_all(dir)?;
        let taken = snapshots.take_snapshots();
        for snapshot in &taken {
            snapshot.save(dir.join(format!("{}_{:06}.bin", kind.name(), snapshot.step)))?;
        }
        println!("Snapshots:    {} written to {}", taken.len(), dir.display());
    }

    println!("Wall time:    {:.3}s", metrics.total_wall_time);
    println!("Final KE:     {:.6e}", metrics.final_kinetic_energy);
    println!("Min height:   {:.4}m", metrics.min_height);
    println!("Events:       {}", bus.dispatched());
    if !metrics.stable {
        return Err("simulation diverged (non-finite state)".into());
    }
    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CliResult {
    println!("Kinema Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = StateSnapshot::load(path)?;

    println!("Step:         {}", snapshot.step);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Particles:    {}", snapshot.particle_count());
    println!("Bodies:       {}", snapshot.body_count());

    let heights = snapshot
        .particle_positions
        .iter()
        .map(|x| x.y)
        .chain(snapshot.body_transforms.iter().map(|t| t.p.y));
    let (min_y, max_y) = heights.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if min_y <= max_y {
        println!("Y range:      [{min_y:.4}, {max_y:.4}]");
    }
    let max_speed = snapshot
        .particle_velocities
        .iter()
        .map(|v| v.length())
        .chain(snapshot.body_twists.iter().map(|t| t.linear.length()))
        .fold(0.0f32, f32::max);
    println!("Max speed:    {max_speed:.4}m/s");

    Ok(())
}

/// Validate a solver config or material library.
pub fn validate(path: &str, materials: bool) -> CliResult {
    println!("Kinema Validator");
    println!("────────────────");
    println!();

    if materials {
        println!("Validating material library: {path}");
        let text = std::fs::read_to_string(path)?;
        let library = MaterialLibrary::from_toml(&text)?;
        println!(
            "Library is valid ({} cloth, {} solid).",
            library.cloth_names().len(),
            library.solid_names().len()
        );
    } else {
        println!("Validating solver config: {path}");
        let config = SemiImplicitConfig::load(path)?;
        println!("Config is valid (backend {:?}, frame {:?}).", config.backend, config.body_force_frame);
    }
    Ok(())
}
