//! Aggregation — enterprise value, equity value, fair value per share.

use crate::domain::{GrowthPhase, PhaseSubtotal, ValuationResult, YearProjection};

/// Fold the per-year projections and terminal value into the final result.
///
/// - enterprise value = Σ PV(FCF) + PV(terminal value)
/// - equity value = enterprise value − net debt
/// - fair value per share = equity value / shares when shares > 0, else 0
/// - terminal weight = PV(terminal) / equity value × 100 when equity ≠ 0,
///   else 0
///
/// Phase subtotals restrict the PV sum to each phase's year range; the
/// phases partition the horizon, so the subtotals sum to `total_pv_fcf`.
pub fn aggregate(
    projections: Vec<YearProjection>,
    phases: &[GrowthPhase],
    terminal_value: f64,
    terminal_value_present_value: f64,
    net_debt: f64,
    shares_outstanding: f64,
) -> ValuationResult {
    let total_pv_fcf: f64 = projections.iter().map(|p| p.present_value_of_fcf).sum();
    let enterprise_value = total_pv_fcf + terminal_value_present_value;
    let equity_value = enterprise_value - net_debt;

    let fair_value_per_share = if shares_outstanding > 0.0 {
        equity_value / shares_outstanding
    } else {
        0.0
    };

    let terminal_value_weight_pct = if equity_value != 0.0 {
        terminal_value_present_value / equity_value * 100.0
    } else {
        0.0
    };

    let phase_subtotals = phases
        .iter()
        .map(|phase| PhaseSubtotal {
            start_year: phase.start_year,
            end_year: phase.end_year,
            annual_growth_pct: phase.annual_growth_pct,
            present_value: projections
                .iter()
                .filter(|p| phase.contains(p.year))
                .map(|p| p.present_value_of_fcf)
                .sum(),
        })
        .collect();

    ValuationResult {
        enterprise_value,
        equity_value,
        fair_value_per_share,
        terminal_value,
        terminal_value_present_value,
        terminal_value_weight_pct,
        total_pv_fcf,
        phase_subtotals,
        projections,
    }
}
