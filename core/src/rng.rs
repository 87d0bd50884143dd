//! Seeded sampling for the efficiency scatter.
//!
//! The scatter draws from two streams per seed: `dei_score` (uniform over
//! [0, dei_max)) and `cost_noise` (normal, two draws per sample). Each
//! stream is a PCG64-MCG seeded from the scatter seed mixed with its slot,
//! so a scatter of n samples is a prefix of any longer one with the same seed.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single sampled quantity.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the seed and a stable stream index.
    /// The index must never change once assigned.
    pub fn new(seed: u64, stream_index: u64) -> Self {
        let derived_seed = seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Sample uniformly from [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Sample from Normal(mean, std_dev) using the Box-Muller transform.
    /// Consumes exactly two draws per call so stream positions stay aligned.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}

/// All stream RNGs for one seed, indexed by stable slot.
pub struct RngBank {
    seed: u64,
}

impl RngBank {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.seed, slot as u64).with_name(slot.name())
    }
}

/// Slot numbers feed the seed mix, so changing one changes that stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    DeiScore = 0,
    CostNoise = 1,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeiScore => "dei_score",
            Self::CostNoise => "cost_noise",
        }
    }
}
