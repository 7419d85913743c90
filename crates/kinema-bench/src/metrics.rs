//! Benchmark metrics collected during a scenario run.

use serde::{Deserialize, Serialize};

use kinema_types::{KinemaError, KinemaResult};

/// Metrics collected from one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    /// Solver name as reported by the strategy.
    pub solver: String,
    pub particle_count: usize,
    pub body_count: usize,
    pub timesteps: u32,
    pub dt: f32,
    /// Total wall-clock time including contact detection (seconds).
    pub total_wall_time: f64,
    /// Average solver time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Steps that compiled a new execution plan.
    pub plan_compilations: u32,
    /// Mean number of contacts handed to the solver per step.
    pub avg_contacts: f32,
    /// Kinetic energy of the final state.
    pub final_kinetic_energy: f64,
    /// Largest displacement of a particle or body origin from its start.
    pub max_displacement: f32,
    /// Lowest particle or body-origin height seen in the final state.
    pub min_height: f32,
    /// False if the final state holds a non-finite position or velocity.
    pub stable: bool,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,solver,particles,bodies,timesteps,dt,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,plan_compilations,avg_contacts,final_ke,max_displacement,min_height,stable".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6e},{:.6},{:.4},{:.4},{:.4},{},{:.1},{:.6e},{:.6},{:.6},{}",
            self.scenario,
            self.solver,
            self.particle_count,
            self.body_count,
            self.timesteps,
            self.dt,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.plan_compilations,
            self.avg_contacts,
            self.final_kinetic_energy,
            self.max_displacement,
            self.min_height,
            self.stable,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    pub fn to_json(metrics: &[BenchmarkMetrics]) -> KinemaResult<String> {
        serde_json::to_string_pretty(metrics)
            .map_err(|e| KinemaError::Serialization(format!("failed to encode metrics: {e}")))
    }
}
