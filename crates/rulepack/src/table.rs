use std::collections::BTreeMap;

use celestial::SeededRng;
use serde::{Deserialize, Serialize};

/// Closed numeric range, serialized as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span(pub f64, pub f64);

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Self(min, max)
    }

    /// A span that admits every non-negative value
    pub fn unbounded() -> Self {
        Self(0.0, f64::MAX)
    }

    pub fn min(&self) -> f64 {
        self.0.min(self.1)
    }

    pub fn max(&self) -> f64 {
        self.0.max(self.1)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Linear interpolation, `t` in [0, 1]
    pub fn lerp(&self, t: f64) -> f64 {
        self.min() + (self.max() - self.min()) * t
    }

    /// Interpolation in log space; falls back to linear for non-positive spans
    pub fn log_lerp(&self, t: f64) -> f64 {
        if self.min() <= 0.0 {
            return self.lerp(t);
        }
        (self.min().ln() + (self.max().ln() - self.min().ln()) * t).exp()
    }

    /// Position of `value` within the span in log space, clamped to [0, 1]
    pub fn log_position(&self, value: f64) -> f64 {
        if self.min() <= 0.0 || self.max() <= self.min() || value <= 0.0 {
            return 0.0;
        }
        ((value.ln() - self.min().ln()) / (self.max().ln() - self.min().ln())).clamp(0.0, 1.0)
    }

    pub fn sample(&self, rng: &mut SeededRng) -> f64 {
        rng.range(self.min(), self.max())
    }

    pub fn sample_log(&self, rng: &mut SeededRng) -> f64 {
        if self.min() <= 0.0 {
            return self.sample(rng);
        }
        rng.log_uniform(self.min(), self.max())
    }
}

/// Named weighted choice. Keys iterate in sorted order so picks are
/// reproducible for a given random stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedTable(pub BTreeMap<String, f64>);

impl WeightedTable {
    pub fn pick(&self, rng: &mut SeededRng) -> Option<&str> {
        rng.pick_weighted(self.0.iter().map(|(k, w)| (k.as_str(), *w)))
    }

    pub fn total_weight(&self) -> f64 {
        self.0.values().filter(|w| **w > 0.0).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_weight() <= 0.0
    }
}

impl<const N: usize> From<[(&str, f64); N]> for WeightedTable {
    fn from(entries: [(&str, f64); N]) -> Self {
        Self(entries.into_iter().map(|(k, w)| (k.to_string(), w)).collect())
    }
}
