//! Integration tests for kinema-bench.

use kinema_bench::{BenchmarkMetrics, BenchmarkRunner, Scenario, ScenarioKind};
use kinema_debug::{InspectionHook, SnapshotHook, TelemetryHook};
use kinema_material::MaterialLibrary;
use kinema_solver::{SemiImplicitConfig, SemiImplicitSolver, SolverStrategy};
use kinema_types::KinemaError;

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn hanging_cloth_setup() {
    let s = Scenario::hanging_cloth().unwrap();
    assert_eq!(s.kind, ScenarioKind::HangingCloth);
    assert_eq!(s.model.particle_count(), 289); // 17×17
    assert_eq!(s.model.triangle_count(), 512); // 16×16×2
    let fixed = s.model.particle_flags.iter().filter(|f| !f.is_active()).count();
    assert_eq!(fixed, 17);
    assert!(s.model.bending_edge_count() > 0);
    assert!(!s.ground_contacts);
}

#[test]
fn pendulum_chain_setup() {
    let s = Scenario::pendulum_chain().unwrap();
    assert_eq!(s.model.body_count(), 5);
    assert_eq!(s.model.joint_count(), 5);
    assert_eq!(s.model.joint_axis_count(), 5);
    assert_eq!(s.model.particle_count(), 0);
}

#[test]
fn soft_block_setup() {
    let s = Scenario::soft_block().unwrap();
    assert_eq!(s.model.particle_count(), 125);
    assert_eq!(s.model.tetrahedron_count(), 4 * 4 * 4 * 6);
    assert_eq!(s.model.shape_count(), 1);
    assert!(s.ground_contacts);
}

#[test]
fn box_drop_setup() {
    let s = Scenario::box_drop().unwrap();
    assert_eq!(s.model.body_count(), 1);
    assert_eq!(s.model.shape_count(), 2);
    assert!(s.ground_contacts);
}

#[test]
fn scenario_names_parse() {
    assert_eq!(ScenarioKind::all().len(), 4);
    for &kind in ScenarioKind::all() {
        assert_eq!(kind.name().parse::<ScenarioKind>().unwrap(), kind);
    }
    assert!(matches!(
        "sphere_drape".parse::<ScenarioKind>(),
        Err(KinemaError::InvalidConfig(_))
    ));
}

#[test]
fn scenarios_with_other_materials() {
    let library = MaterialLibrary::with_defaults();
    let silk = library.cloth("silk").unwrap();
    let s = Scenario::hanging_cloth_with(silk).unwrap();
    assert_eq!(s.model.particle_count(), 289);

    let rubber = library.solid("rubber").unwrap();
    let s = Scenario::soft_block_with(rubber).unwrap();
    assert_eq!(s.model.tetrahedron_count(), 384);
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_hanging_cloth_short() {
    let scenario = Scenario::hanging_cloth().unwrap().with_timesteps(10);
    let metrics = BenchmarkRunner::run_default(&scenario).unwrap();

    assert_eq!(metrics.scenario, "hanging_cloth");
    assert_eq!(metrics.solver, "semi_implicit");
    assert_eq!(metrics.timesteps, 10);
    // precompute already compiled the plan and the layout never changes.
    assert_eq!(metrics.plan_compilations, 0);
    assert!(metrics.stable);
    assert!(metrics.max_displacement > 0.0); // Gravity moves the free rows
}

#[test]
fn pendulum_chain_stays_attached() {
    let scenario = Scenario::pendulum_chain().unwrap().with_timesteps(400);
    let mut solver = SemiImplicitSolver::new(scenario.config.clone()).unwrap();
    let metrics = BenchmarkRunner::run(&scenario, &mut solver).unwrap();
    assert!(metrics.stable);
    // 0.2 s of swing: links fall but the chain cannot fall freely.
    assert!(metrics.max_displacement > 0.05);
    assert!(metrics.min_height > 3.0 - 2.6);
}

#[test]
fn box_drop_lands_on_ground() {
    let scenario = Scenario::box_drop().unwrap().with_timesteps(1200);
    let metrics = BenchmarkRunner::run_default(&scenario).unwrap();
    assert!(metrics.stable);
    assert!(metrics.avg_contacts > 0.0);
    // Box centre ends above the plane by roughly its half extent.
    assert!(metrics.min_height > 0.0, "min height {}", metrics.min_height);
    assert!(metrics.min_height < 0.35, "min height {}", metrics.min_height);
}

#[test]
fn soft_block_short_run_is_stable() {
    let scenario = Scenario::soft_block().unwrap().with_timesteps(50);
    let metrics = BenchmarkRunner::run_default(&scenario).unwrap();
    assert!(metrics.stable);
    assert_eq!(metrics.particle_count, 125);
}

#[test]
fn runner_reuses_solver_across_scenarios() {
    let mut solver = SemiImplicitSolver::new(SemiImplicitConfig::default()).unwrap();
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind).unwrap().with_timesteps(3);
        let metrics = BenchmarkRunner::run(&scenario, &mut solver).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert!(metrics.total_wall_time >= 0.0);
    }
}

#[test]
fn runner_calls_hooks() {
    let scenario = Scenario::box_drop().unwrap().with_timesteps(6);
    let mut solver = SemiImplicitSolver::new(scenario.config.clone()).unwrap();
    let mut telemetry = TelemetryHook::new();
    let mut snapshots = SnapshotHook::new(2);
    {
        let mut hooks: Vec<&mut dyn InspectionHook> = vec![&mut telemetry, &mut snapshots];
        BenchmarkRunner::run_with_hooks(&scenario, &mut solver as &mut dyn SolverStrategy, &mut hooks)
            .unwrap();
    }
    let begins = telemetry
        .drain_events()
        .iter()
        .filter(|e| e.label() == "step_begin")
        .count();
    assert_eq!(begins, 6);
    assert_eq!(snapshots.snapshots().len(), 3);
}

#[test]
fn zero_timesteps() {
    let scenario = Scenario::box_drop().unwrap().with_timesteps(0);
    let metrics = BenchmarkRunner::run_default(&scenario).unwrap();
    assert_eq!(metrics.avg_step_time, 0.0);
    assert_eq!(metrics.max_displacement, 0.0);
    assert!(metrics.stable);
}

// ─── Metrics Tests ────────────────────────────────────────────

fn sample_metrics() -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: "test".into(),
        solver: "semi_implicit".into(),
        particle_count: 289,
        body_count: 0,
        timesteps: 100,
        dt: 1e-3,
        total_wall_time: 1.5,
        avg_step_time: 0.015,
        min_step_time: 0.01,
        max_step_time: 0.02,
        plan_compilations: 1,
        avg_contacts: 0.0,
        final_kinetic_energy: 1e-5,
        max_displacement: 0.5,
        min_height: 0.25,
        stable: true,
    }
}

#[test]
fn metrics_csv_output() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics(), sample_metrics()]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,solver,"));
    assert!(lines[1].starts_with("test,semi_implicit,289,0,100,"));
    assert!(lines[1].ends_with(",true"));
    assert_eq!(
        lines[0].split(',').count(),
        lines[1].split(',').count()
    );
}

#[test]
fn metrics_json_roundtrip() {
    let all = vec![sample_metrics()];
    let json = BenchmarkMetrics::to_json(&all).unwrap();
    let back: Vec<BenchmarkMetrics> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, all);
}
