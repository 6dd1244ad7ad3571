//! Empirical variogram: pairwise distance cloud and lag binning.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::error::{KrigeError, Result};

/// Upper bound on the number of lag bins.
pub const MAX_LAGS: usize = 30;

/// One unordered sample pair of the variogram cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistancePair {
    /// Planar separation of the two samples.
    pub distance: f64,
    /// Absolute difference of the two measured values.
    pub semivariance: f64,
}

/// Binned variogram cloud, ready for model fitting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmpiricalVariogram {
    /// Mean separation per non-empty bin, ascending.
    pub lag: Vec<f64>,
    /// Mean semivariance per non-empty bin.
    pub semivariance: Vec<f64>,
    /// Span of the realized bins: last mean lag minus first mean lag.
    pub range: f64,
}

impl EmpiricalVariogram {
    pub fn bins(&self) -> usize {
        self.lag.len()
    }
}

/// All `n (n - 1) / 2` unordered sample pairs, sorted by distance ascending.
///
/// The sort is stable with distance as the only key, so equidistant pairs
/// keep their enumeration order (ascending `(j, i)` with `j < i`) and the
/// downstream binning is deterministic.
pub fn distance_pairs(x: &[f64], y: &[f64], values: &[f64]) -> Vec<DistancePair> {
    let mut pairs: Vec<DistancePair> = (0..x.len())
        .tuple_combinations()
        .map(|(j, i)| {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            DistancePair {
                distance: (dx * dx + dy * dy).sqrt(),
                semivariance: (values[i] - values[j]).abs(),
            }
        })
        .collect();
    pairs.sort_by_key(|pair| OrderedFloat(pair.distance));
    pairs
}

/// Aggregate a sorted pair cloud into at most [`MAX_LAGS`] equal-width bins.
///
/// With [`MAX_LAGS`] pairs or fewer every pair becomes its own bin.
/// Otherwise pairs are walked in distance order and accumulated into the
/// bin whose upper edge `(i + 1) * tolerance` they fall under, where
/// `tolerance` is the maximum observed distance over the bin count; empty
/// bins are skipped. Fails with [`KrigeError::InsufficientData`] when fewer
/// than 2 non-empty bins survive.
pub fn bin_lags(pairs: &[DistancePair]) -> Result<EmpiricalVariogram> {
    if pairs.len() < 2 {
        return Err(KrigeError::InsufficientData { bins: pairs.len() });
    }

    let (lag, semivariance) = if pairs.len() <= MAX_LAGS {
        (
            pairs.iter().map(|p| p.distance).collect::<Vec<_>>(),
            pairs.iter().map(|p| p.semivariance).collect::<Vec<_>>(),
        )
    } else {
        let max_distance = pairs[pairs.len() - 1].distance;
        let tolerance = max_distance / MAX_LAGS as f64;

        let mut lag = Vec::with_capacity(MAX_LAGS);
        let mut semivariance = Vec::with_capacity(MAX_LAGS);
        let mut j = 0;
        for i in 0..MAX_LAGS {
            if j >= pairs.len() {
                break;
            }
            let edge = (i + 1) as f64 * tolerance;
            let mut sum_distance = 0.0;
            let mut sum_semivariance = 0.0;
            let mut count = 0;
            while j < pairs.len() && pairs[j].distance <= edge {
                sum_distance += pairs[j].distance;
                sum_semivariance += pairs[j].semivariance;
                count += 1;
                j += 1;
            }
            if count > 0 {
                lag.push(sum_distance / count as f64);
                semivariance.push(sum_semivariance / count as f64);
            }
        }
        (lag, semivariance)
    };

    if lag.len() < 2 {
        return Err(KrigeError::InsufficientData { bins: lag.len() });
    }

    let range = lag[lag.len() - 1] - lag[0];
    Ok(EmpiricalVariogram {
        lag,
        semivariance,
        range,
    })
}
