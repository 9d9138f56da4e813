//! Year projection — one row of the cash-flow schedule.

use serde::{Deserialize, Serialize};

/// Projected figures for a single forecast year.
///
/// Produced fresh for each year of each run and never mutated after
/// creation. `year` is 1-based; the base year (year 0) is the compounding
/// anchor and is not materialized as a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: usize,
    pub revenue: f64,
    pub ebit: f64,
    /// EBIT × tax rate, with no floor at zero.
    pub tax: f64,
    pub net_operating_profit_after_tax: f64,
    pub depreciation: f64,
    pub capex: f64,
    pub working_capital_change: f64,
    pub free_cash_flow: f64,
    /// (1 + WACC/100)^year.
    pub discount_factor: f64,
    pub present_value_of_fcf: f64,
}
