//! Growth projection — multi-phase revenue compounding.
//!
//! Recursive: revenue[y] = revenue[y-1] × (1 + rate(phase of y)/100).
//! Growth always compounds on the immediately preceding year, never on the
//! original base figure.

use crate::domain::{validate_phases, GrowthPhase, InvalidAssumption};

/// Project per-year revenue over the full horizon.
///
/// Index 0 of the returned vec is year 1. The phase rate applied to year y
/// comes from the unique phase whose `[start_year, end_year]` contains y;
/// the validated contiguity of the list makes walking the phases in order
/// equivalent to that lookup.
///
/// `valuate()` validates the whole assumption set before calling in here;
/// the re-checks make the function safe to call on its own.
pub fn project_revenue(
    base_revenue: f64,
    phases: &[GrowthPhase],
) -> Result<Vec<f64>, InvalidAssumption> {
    if base_revenue <= 0.0 {
        return Err(InvalidAssumption::NonPositiveBaseRevenue(base_revenue));
    }
    validate_phases(phases)?;

    let horizon = phases.last().map_or(0, |p| p.end_year);
    let mut revenues = Vec::with_capacity(horizon);
    let mut revenue = base_revenue;
    for phase in phases {
        let factor = 1.0 + phase.annual_growth_pct / 100.0;
        for _ in phase.start_year..=phase.end_year {
            revenue *= factor;
            revenues.push(revenue);
        }
    }
    Ok(revenues)
}
