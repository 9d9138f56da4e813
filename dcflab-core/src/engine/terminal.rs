//! Terminal value — Gordon growth perpetuity beyond the forecast horizon.

use crate::domain::InvalidAssumption;
use crate::engine::discount::discount_factor;

/// Perpetuity-growth terminal value and its present value at year 0.
///
/// tv = fcf_N × (1 + g/100) / (r/100 − g/100), then discounted back over
/// the full horizon. Requires g strictly below r: at g = r the denominator
/// vanishes, and above it the perpetuity diverges.
pub fn estimate_terminal_value(
    final_year_fcf: f64,
    terminal_growth_pct: f64,
    discount_rate_pct: f64,
    horizon_years: usize,
) -> Result<(f64, f64), InvalidAssumption> {
    if terminal_growth_pct >= discount_rate_pct {
        return Err(InvalidAssumption::TerminalGrowthNotBelowDiscountRate {
            growth: terminal_growth_pct,
            discount: discount_rate_pct,
        });
    }
    let g = terminal_growth_pct / 100.0;
    let r = discount_rate_pct / 100.0;
    let terminal_value = final_year_fcf * (1.0 + g) / (r - g);
    let present = terminal_value / discount_factor(discount_rate_pct, horizon_years)?;
    Ok((terminal_value, present))
}
