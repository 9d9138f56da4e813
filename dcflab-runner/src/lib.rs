//! DcfLab Runner — valuation orchestration on top of `dcflab-core`.
//!
//! This crate builds on the engine to provide:
//! - TOML scenario configuration with content-addressed run ids
//! - A single-run driver stamping identity and timestamp metadata
//! - Parallel sensitivity sweeps (grid and seeded random search)
//! - Verdict classification against an externally supplied market price
//! - Artifact export (JSON manifest, projection and sweep CSVs)

pub mod config;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod verdict;

pub use config::{ConfigError, PhaseParams, RunId, ScenarioConfig, ValuationParams};
pub use report::{save_artifacts, write_projections_csv, write_sweep_csv, RunManifest};
pub use runner::{
    run_assumptions, run_scenario, run_scenario_file, RunError, ValuationRun, SCHEMA_VERSION,
};
pub use sweep::{ParamGrid, SensitivitySweep, SweepPoint, SweepResults};
pub use verdict::{classify, upside_pct, Verdict, DEFAULT_FAIR_BAND_PCT};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn valuation_run_is_send_sync() {
        assert_send::<ValuationRun>();
        assert_sync::<ValuationRun>();
    }

    #[test]
    fn sweep_results_are_send_sync() {
        assert_send::<SweepPoint>();
        assert_sync::<SweepPoint>();
        assert_send::<SweepResults>();
        assert_sync::<SweepResults>();
    }
}
