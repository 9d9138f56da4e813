//! Valuation result — the complete output of one pipeline run.

use serde::{Deserialize, Serialize};

use crate::domain::YearProjection;

/// Present-value subtotal for one growth phase, for breakdown reporting.
///
/// Subtotals across all phases sum to `total_pv_fcf` (within floating-point
/// tolerance), since the phases partition the forecast years exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSubtotal {
    pub start_year: usize,
    pub end_year: usize,
    pub annual_growth_pct: f64,
    pub present_value: f64,
}

/// Complete result of one valuation run.
///
/// A derived value with no independent lifecycle: it exists only as the
/// output of one pipeline run and is discarded and replaced on the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Sum of all discounted free cash flows plus the discounted terminal
    /// value.
    pub enterprise_value: f64,
    /// Enterprise value minus net debt.
    pub equity_value: f64,
    /// Equity value per share; 0 when shares outstanding is 0.
    pub fair_value_per_share: f64,
    /// Nominal (undiscounted) Gordon-growth terminal value.
    pub terminal_value: f64,
    pub terminal_value_present_value: f64,
    /// Share of equity value carried by the terminal assumption, in
    /// percent. Flags valuations dominated by the unverifiable perpetuity.
    pub terminal_value_weight_pct: f64,
    /// Sum of the per-year discounted free cash flows, terminal value
    /// excluded.
    pub total_pv_fcf: f64,
    pub phase_subtotals: Vec<PhaseSubtotal>,
    pub projections: Vec<YearProjection>,
}
