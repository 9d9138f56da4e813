//! Sensitivity sweep utilities for grid/random search over assumptions.
//!
//! Each grid point is an independent `valuate()` call over an immutable
//! assumption set, so the sweep is embarrassingly parallel: points are
//! dispatched across Rayon workers and results collected only after all
//! complete.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;

use dcflab_core::{valuate, AssumptionSet, InvalidAssumption, ValuationResult};

/// Parameter grid specification.
///
/// Sweeps the three highest-leverage assumptions: discount rate, terminal
/// growth, and EBIT margin. An empty axis means "hold the base value".
#[derive(Debug, Clone)]
pub struct ParamGrid {
    /// Discount rates (WACC, %) to test
    pub discount_rates_pct: Vec<f64>,

    /// Terminal growth rates (%) to test
    pub terminal_growths_pct: Vec<f64>,

    /// EBIT margins (%) to test
    pub ebit_margins_pct: Vec<f64>,
}

impl ParamGrid {
    /// A conventional grid around typical large-cap assumptions.
    ///
    /// Discount rates: 8, 10, 12
    /// Terminal growths: 2, 3, 4
    /// EBIT margins: 15, 20, 25
    pub fn default_grid() -> Self {
        Self {
            discount_rates_pct: vec![8.0, 10.0, 12.0],
            terminal_growths_pct: vec![2.0, 3.0, 4.0],
            ebit_margins_pct: vec![15.0, 20.0, 25.0],
        }
    }

    /// Returns the total number of combinations in this grid, including
    /// ones that will be skipped as invalid. Empty axes count as one
    /// (the base value).
    pub fn size(&self) -> usize {
        self.discount_rates_pct.len().max(1)
            * self.terminal_growths_pct.len().max(1)
            * self.ebit_margins_pct.len().max(1)
    }

    /// Generates one assumption set per valid grid point.
    ///
    /// Combinations where the terminal growth is not strictly below the
    /// discount rate are skipped rather than generated-and-failed.
    pub fn generate(&self, base: &AssumptionSet) -> Vec<AssumptionSet> {
        let rates = or_base(&self.discount_rates_pct, base.discount_rate_pct);
        let growths = or_base(&self.terminal_growths_pct, base.terminal_growth_pct);
        let margins = or_base(&self.ebit_margins_pct, base.ebit_margin_pct);

        let mut sets = Vec::new();
        for &rate in &rates {
            for &growth in &growths {
                // Skip invalid combinations (growth >= rate)
                if growth >= rate {
                    continue;
                }
                for &margin in &margins {
                    let mut set = base.clone();
                    set.discount_rate_pct = rate;
                    set.terminal_growth_pct = growth;
                    set.ebit_margin_pct = margin;
                    sets.push(set);
                }
            }
        }
        sets
    }

    /// Draws `n` random points from within the grid's axis ranges.
    ///
    /// Sampling is seeded and therefore reproducible: the same seed over
    /// the same grid and base always yields the same assumption sets.
    /// Invalid draws (growth >= rate) are rejected and redrawn.
    pub fn sample(&self, base: &AssumptionSet, n: usize, seed: u64) -> Vec<AssumptionSet> {
        let mut rng = StdRng::seed_from_u64(seed);
        let rate_range = axis_range(&self.discount_rates_pct, base.discount_rate_pct);
        let growth_range = axis_range(&self.terminal_growths_pct, base.terminal_growth_pct);
        let margin_range = axis_range(&self.ebit_margins_pct, base.ebit_margin_pct);

        let mut sets = Vec::with_capacity(n);
        let mut attempts = 0;
        while sets.len() < n && attempts < n * 100 {
            attempts += 1;
            let rate = sample_in(&mut rng, rate_range);
            let growth = sample_in(&mut rng, growth_range);
            if growth >= rate {
                continue;
            }
            let mut set = base.clone();
            set.discount_rate_pct = rate;
            set.terminal_growth_pct = growth;
            set.ebit_margin_pct = sample_in(&mut rng, margin_range);
            sets.push(set);
        }
        sets
    }
}

/// Substitute the base value for an empty axis.
fn or_base(axis: &[f64], base: f64) -> Vec<f64> {
    if axis.is_empty() {
        vec![base]
    } else {
        axis.to_vec()
    }
}

/// (min, max) of an axis, or a degenerate range at the base value.
fn axis_range(axis: &[f64], base: f64) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in axis {
        min = min.min(v);
        max = max.max(v);
    }
    if axis.is_empty() {
        (base, base)
    } else {
        (min, max)
    }
}

fn sample_in(rng: &mut StdRng, (min, max): (f64, f64)) -> f64 {
    if min == max {
        min
    } else {
        rng.gen_range(min..max)
    }
}

/// One completed sweep point.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub assumptions: AssumptionSet,
    pub result: ValuationResult,
}

/// Sensitivity sweep executor.
///
/// Runs valuations for all points in a grid, in parallel by default.
pub struct SensitivitySweep {
    parallel: bool,
}

impl SensitivitySweep {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Executes a sweep over the given grid around `base`.
    ///
    /// Every generated point is pre-filtered to satisfy the terminal
    /// growth constraint, so the only remaining failures are base-set
    /// problems (bad phases, non-positive revenue), which abort the whole
    /// sweep — no partial result sets.
    pub fn sweep(
        &self,
        base: &AssumptionSet,
        grid: &ParamGrid,
    ) -> Result<SweepResults, InvalidAssumption> {
        self.run_points(grid.generate(base))
    }

    /// Executes a sweep over `n` seeded random samples from the grid
    /// ranges.
    pub fn sweep_sampled(
        &self,
        base: &AssumptionSet,
        grid: &ParamGrid,
        n: usize,
        seed: u64,
    ) -> Result<SweepResults, InvalidAssumption> {
        self.run_points(grid.sample(base, n, seed))
    }

    fn run_points(&self, sets: Vec<AssumptionSet>) -> Result<SweepResults, InvalidAssumption> {
        let points: Vec<SweepPoint> = if self.parallel {
            // Parallel execution using Rayon
            sets.into_par_iter()
                .map(|set| {
                    let result = valuate(&set)?;
                    Ok(SweepPoint {
                        assumptions: set,
                        result,
                    })
                })
                .collect::<Result<Vec<_>, InvalidAssumption>>()?
        } else {
            // Sequential execution
            sets.into_iter()
                .map(|set| {
                    let result = valuate(&set)?;
                    Ok(SweepPoint {
                        assumptions: set,
                        result,
                    })
                })
                .collect::<Result<Vec<_>, InvalidAssumption>>()?
        };

        Ok(SweepResults::new(points))
    }
}

impl Default for SensitivitySweep {
    fn default() -> Self {
        Self::new()
    }
}

/// Results from a sensitivity sweep.
#[derive(Debug)]
pub struct SweepResults {
    points: Vec<SweepPoint>,
    by_fingerprint: HashMap<String, usize>,
}

impl SweepResults {
    fn new(points: Vec<SweepPoint>) -> Self {
        let by_fingerprint = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.assumptions.fingerprint().to_hex(), i))
            .collect();
        Self {
            points,
            by_fingerprint,
        }
    }

    /// Returns all points as a slice, in generation order.
    pub fn all(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Looks up a point by assumption fingerprint (hex).
    pub fn get(&self, fingerprint_hex: &str) -> Option<&SweepPoint> {
        self.by_fingerprint
            .get(fingerprint_hex)
            .map(|&i| &self.points[i])
    }

    /// Returns points sorted by fair value per share (descending).
    pub fn sorted_by_fair_value(&self) -> Vec<&SweepPoint> {
        let mut sorted: Vec<_> = self.points.iter().collect();
        sorted.sort_by(|a, b| {
            b.result
                .fair_value_per_share
                .partial_cmp(&a.result.fair_value_per_share)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Returns the top N points by fair value per share.
    pub fn top_n(&self, n: usize) -> Vec<&SweepPoint> {
        self.sorted_by_fair_value().into_iter().take(n).collect()
    }

    /// Returns the point with the highest fair value per share.
    pub fn best(&self) -> Option<&SweepPoint> {
        self.sorted_by_fair_value().into_iter().next()
    }
}
