//! Deterministic random source
//!
//! Every stochastic decision made while generating or editing a system goes
//! through one [`SeededRng`]. The seed string is hashed to a UUID v5 and the
//! first half of that UUID seeds a ChaCha stream, so the same seed string
//! reproduces the same sequence on every platform.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: ChaChaRng,
}

impl SeededRng {
    pub fn from_seed_str(seed: &str) -> Self {
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes());
        Self {
            rng: ChaChaRng::seed_from_u64(id.as_u64_pair().0),
        }
    }

    /// Uniform float in [0, 1)
    pub fn next_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform integer in [min, max], both ends inclusive.
    ///
    /// Collapses to `min` when the range is empty.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Uniform float in [min, max)
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_float()
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_float() < probability
    }

    /// In-place Fisher–Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(0, i as i64) as usize;
            items.swap(i, j);
        }
    }

    /// Log-uniform sample in [min, max]; both bounds must be positive.
    ///
    /// Planet masses and binary separations are spread evenly per decade
    /// rather than per unit.
    pub fn log_uniform(&mut self, min: f64, max: f64) -> f64 {
        if min <= 0.0 || max <= min {
            return min.max(0.0);
        }
        (min.ln() + (max.ln() - min.ln()) * self.next_float()).exp()
    }

    /// Box-Muller transform
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        // 1 - u keeps the log argument in (0, 1]
        let u1 = 1.0 - self.next_float();
        let u2 = self.next_float();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }

    /// Rayleigh-distributed sample with scale `sigma`
    ///
    /// Used for orbital eccentricities of dynamically cold systems.
    pub fn rayleigh(&mut self, sigma: f64) -> f64 {
        let u = 1.0 - self.next_float();
        sigma * (-2.0 * u.ln()).sqrt()
    }

    /// Weighted choice by cumulative roll.
    ///
    /// Entries with non-positive weight are never chosen. Returns `None`
    /// when no entry carries weight.
    pub fn pick_weighted<K, I>(&mut self, entries: I) -> Option<K>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let entries: Vec<(K, f64)> = entries
            .into_iter()
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
            .collect();
        let total: f64 = entries.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return None;
        }

        let roll = self.next_float() * total;
        let mut cumulative = 0.0;
        let last = entries.len() - 1;
        for (i, (key, weight)) in entries.into_iter().enumerate() {
            cumulative += weight;
            if roll < cumulative || i == last {
                return Some(key);
            }
        }
        None
    }

    /// A UUID drawn from the stream, so node ids are reproducible too.
    pub fn next_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}
