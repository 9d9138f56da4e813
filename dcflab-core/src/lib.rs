//! DcfLab Core — assumption sets, validation, and the valuation pipeline.
//!
//! This crate contains the heart of the valuation engine:
//! - Domain types (assumption sets, growth phases, year projections,
//!   valuation results)
//! - Multi-phase revenue projection with per-phase compounding
//! - Per-year cash-flow derivation (EBIT, tax, depreciation, capex,
//!   working-capital change, free cash flow)
//! - Discounting and perpetuity-growth (Gordon) terminal value
//! - Aggregation into enterprise value, equity value, and fair value per
//!   share
//! - Scenario fingerprinting for content-addressed run identity
//!
//! The single boundary is `valuate()`: it either returns a complete
//! `ValuationResult` or fails with `InvalidAssumption`, with no partial
//! results and no state carried between runs.

pub mod domain;
pub mod engine;
pub mod fingerprint;

pub use domain::{
    AssumptionSet, GrowthPhase, InvalidAssumption, PhaseSubtotal, ValuationResult, YearProjection,
};
pub use engine::valuate;
pub use fingerprint::ScenarioHash;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all domain and result types are Send + Sync.
    ///
    /// Sensitivity sweeps dispatch valuation runs across worker threads.
    /// If any type fails this check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<GrowthPhase>();
        require_sync::<GrowthPhase>();
        require_send::<AssumptionSet>();
        require_sync::<AssumptionSet>();
        require_send::<YearProjection>();
        require_sync::<YearProjection>();
        require_send::<PhaseSubtotal>();
        require_sync::<PhaseSubtotal>();
        require_send::<ValuationResult>();
        require_sync::<ValuationResult>();
        require_send::<InvalidAssumption>();
        require_sync::<InvalidAssumption>();
        require_send::<ScenarioHash>();
        require_sync::<ScenarioHash>();
    }
}
