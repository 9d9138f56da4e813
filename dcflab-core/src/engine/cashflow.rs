//! Cash-flow derivation — one year's revenue to free cash flow.
//!
//! FCF = (EBIT − tax) + depreciation − capex − working-capital change.
//! Every line item is a fixed percentage of the year's revenue; tax is a
//! percentage of EBIT.

use crate::domain::AssumptionSet;

/// Cash-flow line items derived from a single year's revenue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    pub ebit: f64,
    pub tax: f64,
    pub net_operating_profit_after_tax: f64,
    pub depreciation: f64,
    pub capex: f64,
    pub working_capital_change: f64,
    pub free_cash_flow: f64,
}

/// Derive the cash-flow line items for one year.
///
/// Pure: depends only on the revenue figure it is given, never on prior
/// years. Tax is EBIT × tax rate with no floor at zero, so a loss-making
/// year produces a negative tax charge.
pub fn derive_cash_flow(revenue: f64, assumptions: &AssumptionSet) -> CashFlow {
    let ebit = revenue * assumptions.ebit_margin_pct / 100.0;
    let tax = ebit * assumptions.tax_rate_pct / 100.0;
    let net_operating_profit_after_tax = ebit - tax;
    let depreciation = revenue * assumptions.depreciation_pct / 100.0;
    let capex = revenue * assumptions.capex_pct / 100.0;
    let working_capital_change = revenue * assumptions.wc_change_pct / 100.0;
    let free_cash_flow =
        net_operating_profit_after_tax + depreciation - capex - working_capital_change;

    CashFlow {
        ebit,
        tax,
        net_operating_profit_after_tax,
        depreciation,
        capex,
        working_capital_change,
        free_cash_flow,
    }
}
