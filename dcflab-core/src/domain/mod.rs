//! Domain types — assumption sets, growth phases, projections, results.

mod assumptions;
mod projection;
mod result;

pub use assumptions::{validate_phases, AssumptionSet, GrowthPhase, InvalidAssumption};
pub use projection::YearProjection;
pub use result::{PhaseSubtotal, ValuationResult};
