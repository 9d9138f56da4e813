//! Serializable valuation scenario configuration.
//!
//! A scenario file is TOML: a `[valuation]` table of percentage and share
//! figures plus one `[[growth_phase]]` array entry per phase:
//!
//! ```toml
//! [valuation]
//! base_revenue = 1000.0
//! ebit_margin_pct = 20.0
//! depreciation_pct = 5.0
//! capex_pct = 4.0
//! wc_change_pct = 2.0
//! tax_rate_pct = 25.0
//! discount_rate_pct = 10.0
//! terminal_growth_pct = 4.0
//! shares_outstanding = 100.0
//! net_debt = 50.0          # optional, defaults to 0
//!
//! [[growth_phase]]
//! start_year = 1
//! end_year = 5
//! annual_growth_pct = 10.0
//!
//! [[growth_phase]]
//! start_year = 6
//! end_year = 15
//! annual_growth_pct = 5.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dcflab_core::{AssumptionSet, GrowthPhase};

/// Unique identifier for a valuation run (content-addressable hash).
pub type RunId = String;

/// Errors from loading or parsing a scenario file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A complete valuation scenario as read from disk.
///
/// The config is the serializable face of `AssumptionSet`; conversion is
/// lossless, and validation stays with the engine so a malformed scenario
/// fails in exactly one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub valuation: ValuationParams,
    #[serde(rename = "growth_phase")]
    pub growth_phases: Vec<PhaseParams>,
}

/// The `[valuation]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationParams {
    pub base_revenue: f64,
    pub ebit_margin_pct: f64,
    pub depreciation_pct: f64,
    pub capex_pct: f64,
    pub wc_change_pct: f64,
    pub tax_rate_pct: f64,
    pub discount_rate_pct: f64,
    pub terminal_growth_pct: f64,
    pub shares_outstanding: f64,
    #[serde(default)]
    pub net_debt: f64,
}

/// One `[[growth_phase]]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseParams {
    pub start_year: usize,
    pub end_year: usize,
    pub annual_growth_pct: f64,
}

impl ScenarioConfig {
    /// Load a scenario from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a scenario from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the immutable assumption set the engine consumes.
    pub fn to_assumptions(&self) -> AssumptionSet {
        AssumptionSet {
            base_revenue: self.valuation.base_revenue,
            ebit_margin_pct: self.valuation.ebit_margin_pct,
            depreciation_pct: self.valuation.depreciation_pct,
            capex_pct: self.valuation.capex_pct,
            wc_change_pct: self.valuation.wc_change_pct,
            tax_rate_pct: self.valuation.tax_rate_pct,
            discount_rate_pct: self.valuation.discount_rate_pct,
            terminal_growth_pct: self.valuation.terminal_growth_pct,
            shares_outstanding: self.valuation.shares_outstanding,
            net_debt: self.valuation.net_debt,
            growth_phases: self
                .growth_phases
                .iter()
                .map(|p| GrowthPhase {
                    start_year: p.start_year,
                    end_year: p.end_year,
                    annual_growth_pct: p.annual_growth_pct,
                })
                .collect(),
        }
    }

    /// Deterministic hash ID for this scenario.
    ///
    /// Two scenarios with identical contents share a RunId, so artifact
    /// directories and sweep points can be deduplicated by name.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("ScenarioConfig must serialize");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[valuation]
base_revenue = 1000.0
ebit_margin_pct = 20.0
depreciation_pct = 5.0
capex_pct = 4.0
wc_change_pct = 2.0
tax_rate_pct = 25.0
discount_rate_pct = 10.0
terminal_growth_pct = 4.0
shares_outstanding = 100.0
net_debt = 50.0

[[growth_phase]]
start_year = 1
end_year = 5
annual_growth_pct = 10.0

[[growth_phase]]
start_year = 6
end_year = 15
annual_growth_pct = 5.0
"#;

    #[test]
    fn parses_sample_scenario() {
        let config = ScenarioConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.valuation.base_revenue, 1000.0);
        assert_eq!(config.growth_phases.len(), 2);
        assert_eq!(config.growth_phases[1].end_year, 15);
    }

    #[test]
    fn net_debt_defaults_to_zero() {
        let without = SAMPLE.replace("net_debt = 50.0\n", "");
        let config = ScenarioConfig::from_toml(&without).unwrap();
        assert_eq!(config.valuation.net_debt, 0.0);
    }

    #[test]
    fn converts_to_valid_assumptions() {
        let config = ScenarioConfig::from_toml(SAMPLE).unwrap();
        let assumptions = config.to_assumptions();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.horizon_years(), 15);
        assert_eq!(assumptions.net_debt, 50.0);
    }

    #[test]
    fn run_id_is_deterministic() {
        let a = ScenarioConfig::from_toml(SAMPLE).unwrap();
        let b = ScenarioConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(a.run_id(), b.run_id());
    }

    #[test]
    fn run_id_changes_with_any_field() {
        let base = ScenarioConfig::from_toml(SAMPLE).unwrap();
        let mut changed = base.clone();
        changed.valuation.discount_rate_pct = 11.0;
        assert_ne!(base.run_id(), changed.run_id());

        let mut phase_changed = base.clone();
        phase_changed.growth_phases[0].annual_growth_pct = 11.0;
        assert_ne!(base.run_id(), phase_changed.run_id());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ScenarioConfig::from_toml("[valuation]\nbase_revenue = \"ten\"").is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = ScenarioConfig::from_toml(SAMPLE).unwrap();
        let serialized = toml::to_string(&config).unwrap();
        let reparsed = ScenarioConfig::from_toml(&serialized).unwrap();
        assert_eq!(config, reparsed);
    }
}
