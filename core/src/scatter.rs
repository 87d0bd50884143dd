//! Synthetic efficiency scatter (DEI score against total cost) and the
//! ordinary least squares fit drawn through it.
//!
//! The generator recreates a published correlation plot. Its weak
//! correlation (R² ≈ 0.005) is a property of the generator parameters.

use crate::{
    error::{SentinelError, SentinelResult},
    rng::{RngBank, StreamSlot},
    types::Usd,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScatterSample {
    pub dei_score:      f64,
    pub total_cost_usd: Usd,
}

/// total_cost = base_cost + dei_cost_slope·dei + Normal(0, noise_sd),
/// with dei ~ Uniform(0, dei_max).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterParams {
    pub seed:           u64,
    pub n:              usize,
    pub dei_max:        f64,
    pub base_cost:      Usd,
    pub dei_cost_slope: Usd,
    pub noise_sd:       Usd,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            seed:           42,
            n:              200,
            dei_max:        3.0,
            base_cost:      15_000.0,
            dei_cost_slope: 500.0,
            noise_sd:       8_000.0,
        }
    }
}

/// Hashable identity of a parameter set, used as a memoization key.
pub type ScatterKey = (u64, usize, u64, u64, u64, u64);

impl ScatterParams {
    pub fn cache_key(&self) -> ScatterKey {
        (
            self.seed,
            self.n,
            self.dei_max.to_bits(),
            self.base_cost.to_bits(),
            self.dei_cost_slope.to_bits(),
            self.noise_sd.to_bits(),
        )
    }

    pub fn generate(&self) -> Vec<ScatterSample> {
        let bank = RngBank::new(self.seed);
        let mut dei_rng = bank.for_stream(StreamSlot::DeiScore);
        let mut noise_rng = bank.for_stream(StreamSlot::CostNoise);

        let samples: Vec<ScatterSample> = (0..self.n)
            .map(|_| {
                let dei_score = dei_rng.uniform(0.0, self.dei_max);
                let noise = noise_rng.normal(0.0, self.noise_sd);
                ScatterSample {
                    dei_score,
                    total_cost_usd: self.base_cost + self.dei_cost_slope * dei_score + noise,
                }
            })
            .collect();

        log::debug!(
            "scatter: generated {} samples (seed={}, dei_max={})",
            samples.len(),
            self.seed,
            self.dei_max
        );
        samples
    }
}

/// Generate the scatter with the published distribution parameters.
pub fn generate_efficiency_scatter_data(seed: u64, n: usize) -> Vec<ScatterSample> {
    ScatterParams { seed, n, ..ScatterParams::default() }.generate()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RegressionFit {
    pub slope:     f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n:         usize,
}

impl RegressionFit {
    pub fn predict(&self, dei_score: f64) -> Usd {
        self.slope * dei_score + self.intercept
    }

    /// Endpoints of the fitted line over [0, dei_max].
    pub fn trend_line(&self, dei_max: f64) -> [ScatterSample; 2] {
        [
            ScatterSample { dei_score: 0.0, total_cost_usd: self.predict(0.0) },
            ScatterSample { dei_score: dei_max, total_cost_usd: self.predict(dei_max) },
        ]
    }
}

/// Fit total_cost = slope·dei_score + intercept by ordinary least squares.
pub fn fit_linear_regression(samples: &[ScatterSample]) -> SentinelResult<RegressionFit> {
    let n = samples.len();
    if n < 2 {
        return Err(SentinelError::DegenerateSample {
            reason: format!("need at least 2 samples, got {n}"),
        });
    }
    if samples
        .iter()
        .any(|s| !s.dei_score.is_finite() || !s.total_cost_usd.is_finite())
    {
        return Err(SentinelError::NonFinite { field: "scatter sample".into() });
    }

    let nf = n as f64;
    let mean_x = samples.iter().map(|s| s.dei_score).sum::<f64>() / nf;
    let mean_y = samples.iter().map(|s| s.total_cost_usd).sum::<f64>() / nf;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for s in samples {
        let dx = s.dei_score - mean_x;
        let dy = s.total_cost_usd - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Err(SentinelError::DegenerateSample {
            reason: "dei_score has zero variance".into(),
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A constant response is fitted exactly by the flat line.
    let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

    Ok(RegressionFit { slope, intercept, r_squared, n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_is_recovered() {
        let samples: Vec<ScatterSample> = (0..10)
            .map(|i| {
                let x = i as f64 * 0.3;
                ScatterSample { dei_score: x, total_cost_usd: 2.0 * x + 5.0 }
            })
            .collect();
        let fit = fit_linear_regression(&samples).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 5.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(fit.n, 10);
    }

    #[test]
    fn degenerate_samples_are_rejected() {
        let one = [ScatterSample { dei_score: 1.0, total_cost_usd: 1.0 }];
        assert!(matches!(
            fit_linear_regression(&one),
            Err(SentinelError::DegenerateSample { .. })
        ));

        let flat_x = [
            ScatterSample { dei_score: 1.0, total_cost_usd: 1.0 },
            ScatterSample { dei_score: 1.0, total_cost_usd: 2.0 },
        ];
        assert!(fit_linear_regression(&flat_x).is_err());

        let nan = [
            ScatterSample { dei_score: 1.0, total_cost_usd: f64::NAN },
            ScatterSample { dei_score: 2.0, total_cost_usd: 2.0 },
        ];
        assert!(matches!(
            fit_linear_regression(&nan),
            Err(SentinelError::NonFinite { .. })
        ));
    }
}
