//! Valuation pipeline — growth projection, cash-flow derivation,
//! discounting, terminal value, aggregation.
//!
//! The whole pipeline is a pure, total function from `AssumptionSet` to
//! `ValuationResult` (or a single `InvalidAssumption` failure). There is no
//! persisted or incremental state between runs; every recalculation
//! re-derives everything from the current assumption set.

mod aggregate;
mod cashflow;
mod discount;
mod growth;
mod terminal;

pub use aggregate::aggregate;
pub use cashflow::{derive_cash_flow, CashFlow};
pub use discount::{discount_factor, present_value};
pub use growth::project_revenue;
pub use terminal::estimate_terminal_value;

use crate::domain::{AssumptionSet, InvalidAssumption, ValuationResult, YearProjection};

/// Run a complete valuation for one assumption set.
///
/// All validation happens before any projection work; the call fails fast
/// and atomically, never returning a partially computed result. Reentrant:
/// no state survives the call, so concurrent runs for different assumption
/// sets never interfere.
pub fn valuate(assumptions: &AssumptionSet) -> Result<ValuationResult, InvalidAssumption> {
    assumptions.validate()?;

    let revenues = growth::project_revenue(assumptions.base_revenue, &assumptions.growth_phases)?;
    let rate = assumptions.discount_rate_pct;

    let mut projections = Vec::with_capacity(revenues.len());
    for (i, &revenue) in revenues.iter().enumerate() {
        let year = i + 1;
        let cf = cashflow::derive_cash_flow(revenue, assumptions);
        let factor = discount::discount_factor(rate, year)?;
        projections.push(YearProjection {
            year,
            revenue,
            ebit: cf.ebit,
            tax: cf.tax,
            net_operating_profit_after_tax: cf.net_operating_profit_after_tax,
            depreciation: cf.depreciation,
            capex: cf.capex,
            working_capital_change: cf.working_capital_change,
            free_cash_flow: cf.free_cash_flow,
            discount_factor: factor,
            present_value_of_fcf: cf.free_cash_flow / factor,
        });
    }

    let final_fcf = projections.last().map_or(0.0, |p| p.free_cash_flow);
    let (terminal_value, terminal_value_pv) = terminal::estimate_terminal_value(
        final_fcf,
        assumptions.terminal_growth_pct,
        rate,
        assumptions.horizon_years(),
    )?;

    Ok(aggregate::aggregate(
        projections,
        &assumptions.growth_phases,
        terminal_value,
        terminal_value_pv,
        assumptions.net_debt,
        assumptions.shares_outstanding,
    ))
}
