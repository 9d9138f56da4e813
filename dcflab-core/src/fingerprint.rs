//! Scenario fingerprinting — deterministic identity for assumption sets.
//!
//! Sweeps and artifact directories need a stable, content-addressed name
//! for "this exact set of assumptions". The hash covers every field,
//! growth phases included, via the canonical JSON serialization (struct
//! fields and the phase vec serialize in a fixed order, so the bytes are
//! deterministic).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::AssumptionSet;

/// Content hash of a full assumption set (blake3 over canonical JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioHash([u8; 32]);

impl ScenarioHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// Full hex form, used for artifact directory names and sweep lookups.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for ScenarioHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AssumptionSet {
    /// Deterministic content hash: identical sets always collide, any field
    /// change (phase edits included) produces a different hash.
    pub fn fingerprint(&self) -> ScenarioHash {
        let json = serde_json::to_string(self).expect("AssumptionSet must serialize");
        ScenarioHash::from_bytes(json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GrowthPhase;

    fn sample() -> AssumptionSet {
        AssumptionSet {
            base_revenue: 1000.0,
            ebit_margin_pct: 20.0,
            depreciation_pct: 5.0,
            capex_pct: 4.0,
            wc_change_pct: 2.0,
            tax_rate_pct: 25.0,
            discount_rate_pct: 10.0,
            terminal_growth_pct: 4.0,
            shares_outstanding: 100.0,
            net_debt: 50.0,
            growth_phases: vec![GrowthPhase {
                start_year: 1,
                end_year: 10,
                annual_growth_pct: 8.0,
            }],
        }
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(sample().fingerprint(), sample().fingerprint());
    }

    #[test]
    fn scalar_field_change_changes_hash() {
        let mut b = sample();
        b.discount_rate_pct = 11.0;
        assert_ne!(sample().fingerprint(), b.fingerprint());
    }

    #[test]
    fn phase_change_changes_hash() {
        let mut b = sample();
        b.growth_phases[0].annual_growth_pct = 9.0;
        assert_ne!(sample().fingerprint(), b.fingerprint());
    }

    #[test]
    fn hex_is_64_chars() {
        assert_eq!(sample().fingerprint().to_hex().len(), 64);
    }

    #[test]
    fn display_matches_hex() {
        let hash = sample().fingerprint();
        assert_eq!(format!("{hash}"), hash.to_hex());
    }
}
