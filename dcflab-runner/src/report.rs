//! Artifact export — manifest JSON, projection table CSV, sweep CSV.
//!
//! Artifacts for one run land under `<output_dir>/<run_id prefix>/`:
//! - `manifest.json` — identity, assumptions, and headline figures
//! - `projections.csv` — the full year-by-year cash-flow schedule

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dcflab_core::{AssumptionSet, YearProjection};

use crate::runner::ValuationRun;
use crate::sweep::SweepResults;

/// How many hex chars of the run id name the artifact directory.
const RUN_DIR_PREFIX_LEN: usize = 12;

/// Headline record persisted as `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub run_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub assumptions: AssumptionSet,
    pub enterprise_value: f64,
    pub equity_value: f64,
    pub fair_value_per_share: f64,
    pub terminal_value: f64,
    pub terminal_value_present_value: f64,
    pub terminal_value_weight_pct: f64,
    pub total_pv_fcf: f64,
}

impl RunManifest {
    fn from_run(run: &ValuationRun) -> Self {
        Self {
            schema_version: run.schema_version,
            run_id: run.run_id.clone(),
            timestamp: run.timestamp,
            assumptions: run.assumptions.clone(),
            enterprise_value: run.result.enterprise_value,
            equity_value: run.result.equity_value,
            fair_value_per_share: run.result.fair_value_per_share,
            terminal_value: run.result.terminal_value,
            terminal_value_present_value: run.result.terminal_value_present_value,
            terminal_value_weight_pct: run.result.terminal_value_weight_pct,
            total_pv_fcf: run.result.total_pv_fcf,
        }
    }
}

/// Write the full artifact set for one run. Returns the run directory.
pub fn save_artifacts(run: &ValuationRun, output_dir: &Path) -> Result<PathBuf> {
    let prefix = &run.run_id[..RUN_DIR_PREFIX_LEN.min(run.run_id.len())];
    let run_dir = output_dir.join(prefix);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create run directory {}", run_dir.display()))?;

    write_manifest(&run_dir.join("manifest.json"), run)?;
    write_projections_csv(&run_dir.join("projections.csv"), &run.result.projections)?;

    Ok(run_dir)
}

/// Write `manifest.json` for a run.
pub fn write_manifest(path: &Path, run: &ValuationRun) -> Result<()> {
    let manifest = RunManifest::from_run(run);
    let json = serde_json::to_string_pretty(&manifest)
        .context("failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}

/// Write the year-by-year cash-flow schedule as CSV.
pub fn write_projections_csv(path: &Path, projections: &[YearProjection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record([
        "Year",
        "Revenue",
        "EBIT",
        "Tax",
        "Net Operating PAT",
        "Depreciation",
        "CapEx",
        "Change in WC",
        "Free Cash Flow",
        "Discount Factor",
        "PV of FCF",
    ])?;

    for p in projections {
        writer.write_record([
            p.year.to_string(),
            format_cell(p.revenue),
            format_cell(p.ebit),
            format_cell(p.tax),
            format_cell(p.net_operating_profit_after_tax),
            format_cell(p.depreciation),
            format_cell(p.capex),
            format_cell(p.working_capital_change),
            format_cell(p.free_cash_flow),
            format_cell(p.discount_factor),
            format_cell(p.present_value_of_fcf),
        ])?;
    }

    writer.flush().context("failed to flush projections CSV")?;
    Ok(())
}

/// Write one row per sweep point: the swept axes plus headline outputs.
pub fn write_sweep_csv(path: &Path, results: &SweepResults) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record([
        "Discount Rate %",
        "Terminal Growth %",
        "EBIT Margin %",
        "Enterprise Value",
        "Equity Value",
        "Fair Value per Share",
        "Terminal Weight %",
    ])?;

    for point in results.all() {
        writer.write_record([
            format_cell(point.assumptions.discount_rate_pct),
            format_cell(point.assumptions.terminal_growth_pct),
            format_cell(point.assumptions.ebit_margin_pct),
            format_cell(point.result.enterprise_value),
            format_cell(point.result.equity_value),
            format_cell(point.result.fair_value_per_share),
            format_cell(point.result.terminal_value_weight_pct),
        ])?;
    }

    writer.flush().context("failed to flush sweep CSV")?;
    Ok(())
}

/// Two decimal places, matching the presentation the schedule is read at.
fn format_cell(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::runner::run_scenario;
    use crate::sweep::{ParamGrid, SensitivitySweep};

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

    fn sample_run() -> crate::runner::ValuationRun {
        run_scenario(&ScenarioConfig::from_toml(SAMPLE).unwrap()).unwrap()
    }

    #[test]
    fn saves_artifact_set_under_run_dir() {
        let run = sample_run();
        let temp = tempfile::tempdir().unwrap();

        let run_dir = save_artifacts(&run, temp.path()).unwrap();
        assert!(run_dir.starts_with(temp.path()));
        assert!(run_dir.join("manifest.json").exists());
        assert!(run_dir.join("projections.csv").exists());
        assert_eq!(
            run_dir.file_name().unwrap().to_string_lossy().len(),
            RUN_DIR_PREFIX_LEN
        );
    }

    #[test]
    fn manifest_parses_back() {
        let run = sample_run();
        let temp = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(&run, temp.path()).unwrap();

        let content = std::fs::read_to_string(run_dir.join("manifest.json")).unwrap();
        let manifest: RunManifest = serde_json::from_str(&content).unwrap();
        assert_eq!(manifest.run_id, run.run_id);
        assert_eq!(manifest.assumptions, run.assumptions);
        assert!((manifest.enterprise_value - run.result.enterprise_value).abs() < 1e-9);
    }

    #[test]
    fn projections_csv_has_one_row_per_year() {
        let run = sample_run();
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("projections.csv");
        write_projections_csv(&path, &run.result.projections).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // Header plus 15 forecast years
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("Year,Revenue,EBIT"));
        assert!(lines[1].starts_with("1,1100.00,220.00,55.00"));
    }

    #[test]
    fn sweep_csv_has_one_row_per_point() {
        let run = sample_run();
        let results = SensitivitySweep::new()
            .sweep(&run.assumptions, &ParamGrid::default_grid())
            .unwrap();

        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sweep.csv");
        write_sweep_csv(&path, &results).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), results.len() + 1);
    }
}
