//! Valuation runner — wires config, engine, and run metadata.
//!
//! Three entry points:
//! - `run_scenario_file()`: loads a TOML scenario, then runs. Used by the
//!   CLI.
//! - `run_scenario()`: takes a parsed `ScenarioConfig`.
//! - `run_assumptions()`: takes a ready `AssumptionSet`, for callers that
//!   build assumptions programmatically.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dcflab_core::{valuate, AssumptionSet, InvalidAssumption, ValuationResult};

use crate::config::{ConfigError, RunId, ScenarioConfig};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid assumption: {0}")]
    Assumption(#[from] InvalidAssumption),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// A completed valuation run: the assumptions that produced it, the full
/// result, and identity metadata for artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRun {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub assumptions: AssumptionSet,
    pub result: ValuationResult,
}

/// Default schema version for serde deserialization of older JSON without
/// the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Load a scenario from a TOML file and run it.
pub fn run_scenario_file(path: &Path) -> Result<ValuationRun, RunError> {
    let config = ScenarioConfig::from_file(path)?;
    run_scenario(&config)
}

/// Run a valuation from a parsed scenario config.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ValuationRun, RunError> {
    let assumptions = config.to_assumptions();
    let result = valuate(&assumptions)?;
    Ok(ValuationRun {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        timestamp: chrono::Utc::now(),
        assumptions,
        result,
    })
}

/// Run a valuation from a ready-made assumption set.
///
/// The run id is the assumption fingerprint, so programmatic runs and
/// scenario-file runs both get stable, content-addressed identities.
pub fn run_assumptions(assumptions: &AssumptionSet) -> Result<ValuationRun, RunError> {
    let result = valuate(assumptions)?;
    Ok(ValuationRun {
        schema_version: SCHEMA_VERSION,
        run_id: assumptions.fingerprint().to_hex(),
        timestamp: chrono::Utc::now(),
        assumptions: assumptions.clone(),
        result,
    })
}
