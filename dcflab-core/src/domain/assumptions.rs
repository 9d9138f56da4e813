//! Assumption set — the immutable input to a valuation run.
//!
//! All percentage fields are expressed in percent (20.0 means 20%) and are
//! divided by 100 at the point of use. The set is validated as a whole
//! before any projection work begins: a run either consumes a fully valid
//! set or fails with `InvalidAssumption` and produces nothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from assumption validation.
///
/// Every failure is a deterministic input error — the engine performs no
/// retries and never returns a partially computed result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidAssumption {
    #[error("base revenue must be positive, got {0}")]
    NonPositiveBaseRevenue(f64),

    #[error("shares outstanding must be >= 0, got {0}")]
    NegativeSharesOutstanding(f64),

    #[error("discount rate must be above -100%, got {0}%")]
    DiscountRateTooLow(f64),

    #[error("terminal growth must be below discount rate ({growth}% >= {discount}%)")]
    TerminalGrowthNotBelowDiscountRate { growth: f64, discount: f64 },

    #[error("at least one growth phase is required")]
    EmptyGrowthPhases,

    #[error("growth phases must start at year 1, got year {0}")]
    PhasesMustStartAtYearOne(usize),

    #[error("growth phase {index} must start at year {expected}, got year {got}")]
    NonContiguousPhases {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("growth phase {index} ends (year {end}) before it starts (year {start})")]
    InvertedPhase {
        index: usize,
        start: usize,
        end: usize,
    },
}

/// One growth phase: a contiguous range of forecast years sharing an annual
/// revenue growth rate.
///
/// Years are 1-based and inclusive on both ends. A valid phase list
/// partitions the horizon `1..=N` with no gaps or overlap; `N` is the last
/// phase's `end_year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPhase {
    pub start_year: usize,
    pub end_year: usize,
    pub annual_growth_pct: f64,
}

impl GrowthPhase {
    /// Returns true if `year` falls inside this phase.
    pub fn contains(&self, year: usize) -> bool {
        year >= self.start_year && year <= self.end_year
    }
}

/// Complete set of valuation assumptions.
///
/// Created once per valuation request and treated as immutable for the
/// duration of the run. There is no hidden shared state: two runs with two
/// different sets never interfere, even when executed concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionSet {
    /// Latest annual revenue, the compounding base for year 1.
    pub base_revenue: f64,
    pub ebit_margin_pct: f64,
    pub depreciation_pct: f64,
    pub capex_pct: f64,
    pub wc_change_pct: f64,
    /// Tax as a percentage of EBIT, applied with no floor at zero.
    pub tax_rate_pct: f64,
    /// WACC, used as the discount rate throughout.
    pub discount_rate_pct: f64,
    pub terminal_growth_pct: f64,
    pub shares_outstanding: f64,
    /// Total borrowings minus cash and investments; negative means net
    /// cash. Defaults to 0 (no adjustment) when absent.
    #[serde(default)]
    pub net_debt: f64,
    /// Ordered, gap-free partition of the forecast horizon.
    pub growth_phases: Vec<GrowthPhase>,
}

impl AssumptionSet {
    /// Total forecast horizon N in years (end of the last phase).
    pub fn horizon_years(&self) -> usize {
        self.growth_phases.last().map_or(0, |p| p.end_year)
    }

    /// The phase containing `year`, if any.
    pub fn phase_for_year(&self, year: usize) -> Option<&GrowthPhase> {
        self.growth_phases.iter().find(|p| p.contains(year))
    }

    /// Check every precondition, failing fast on the first violation.
    ///
    /// `valuate()` calls this before any projection work; nothing is
    /// computed for a set that fails here.
    pub fn validate(&self) -> Result<(), InvalidAssumption> {
        if self.base_revenue <= 0.0 {
            return Err(InvalidAssumption::NonPositiveBaseRevenue(self.base_revenue));
        }
        if self.shares_outstanding < 0.0 {
            return Err(InvalidAssumption::NegativeSharesOutstanding(
                self.shares_outstanding,
            ));
        }
        if self.discount_rate_pct <= -100.0 {
            return Err(InvalidAssumption::DiscountRateTooLow(self.discount_rate_pct));
        }
        if self.terminal_growth_pct >= self.discount_rate_pct {
            return Err(InvalidAssumption::TerminalGrowthNotBelowDiscountRate {
                growth: self.terminal_growth_pct,
                discount: self.discount_rate_pct,
            });
        }
        validate_phases(&self.growth_phases)
    }
}

/// Phase list rules: non-empty, starts at year 1, contiguous, never
/// inverted. Overlaps and gaps both surface as `NonContiguousPhases`.
pub fn validate_phases(phases: &[GrowthPhase]) -> Result<(), InvalidAssumption> {
    let first = phases.first().ok_or(InvalidAssumption::EmptyGrowthPhases)?;
    if first.start_year != 1 {
        return Err(InvalidAssumption::PhasesMustStartAtYearOne(first.start_year));
    }
    let mut expected = 1;
    for (index, phase) in phases.iter().enumerate() {
        if phase.start_year != expected {
            return Err(InvalidAssumption::NonContiguousPhases {
                index,
                expected,
                got: phase.start_year,
            });
        }
        if phase.end_year < phase.start_year {
            return Err(InvalidAssumption::InvertedPhase {
                index,
                start: phase.start_year,
                end: phase.end_year,
            });
        }
        expected = phase.end_year + 1;
    }
    Ok(())
}
