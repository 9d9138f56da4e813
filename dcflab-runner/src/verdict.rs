//! Verdict — fair value against market price.
//!
//! The engine never touches market data; callers that have a current price
//! can classify the valuation here. A pure function: price and fair value
//! in, classification out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the market price relates to the computed fair value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Undervalued,
    FairlyValued,
    Overvalued,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Undervalued => "undervalued",
            Verdict::FairlyValued => "fairly valued",
            Verdict::Overvalued => "overvalued",
        };
        f.write_str(label)
    }
}

/// Band around fair value treated as "fairly valued", in percent.
pub const DEFAULT_FAIR_BAND_PCT: f64 = 10.0;

/// Upside from the market price to fair value, in percent.
///
/// None when the market price is not positive — there is nothing to
/// compare against, and that is not a fault.
pub fn upside_pct(fair_value_per_share: f64, market_price: f64) -> Option<f64> {
    if market_price <= 0.0 {
        return None;
    }
    Some((fair_value_per_share - market_price) / market_price * 100.0)
}

/// Classify a valuation against the current market price.
///
/// Upside beyond `fair_band_pct` is undervalued, downside beyond it is
/// overvalued, anything inside the band is fairly valued.
pub fn classify(
    fair_value_per_share: f64,
    market_price: f64,
    fair_band_pct: f64,
) -> Option<Verdict> {
    let upside = upside_pct(fair_value_per_share, market_price)?;
    let verdict = if upside > fair_band_pct {
        Verdict::Undervalued
    } else if upside < -fair_band_pct {
        Verdict::Overvalued
    } else {
        Verdict::FairlyValued
    };
    Some(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upside_is_relative_to_price() {
        assert!((upside_pct(120.0, 100.0).unwrap() - 20.0).abs() < 1e-9);
        assert!((upside_pct(80.0, 100.0).unwrap() + 20.0).abs() < 1e-9);
    }

    #[test]
    fn no_verdict_without_a_price() {
        assert!(upside_pct(100.0, 0.0).is_none());
        assert!(classify(100.0, -5.0, DEFAULT_FAIR_BAND_PCT).is_none());
    }

    #[test]
    fn classifies_undervalued() {
        assert_eq!(
            classify(150.0, 100.0, DEFAULT_FAIR_BAND_PCT),
            Some(Verdict::Undervalued)
        );
    }

    #[test]
    fn classifies_overvalued() {
        assert_eq!(
            classify(50.0, 100.0, DEFAULT_FAIR_BAND_PCT),
            Some(Verdict::Overvalued)
        );
    }

    #[test]
    fn classifies_fairly_valued_inside_band() {
        assert_eq!(
            classify(105.0, 100.0, DEFAULT_FAIR_BAND_PCT),
            Some(Verdict::FairlyValued)
        );
        assert_eq!(
            classify(95.0, 100.0, DEFAULT_FAIR_BAND_PCT),
            Some(Verdict::FairlyValued)
        );
    }

    #[test]
    fn band_edges_are_fairly_valued() {
        assert_eq!(
            classify(110.0, 100.0, DEFAULT_FAIR_BAND_PCT),
            Some(Verdict::FairlyValued)
        );
        assert_eq!(
            classify(90.0, 100.0, DEFAULT_FAIR_BAND_PCT),
            Some(Verdict::FairlyValued)
        );
    }

    #[test]
    fn display_labels() {
        assert_eq!(Verdict::Undervalued.to_string(), "undervalued");
        assert_eq!(Verdict::FairlyValued.to_string(), "fairly valued");
        assert_eq!(Verdict::Overvalued.to_string(), "overvalued");
    }
}
