use serde::{Deserialize, Serialize};

/// Caller-facing knobs for [`crate::generate_system`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Spectral class of the primary; drawn from the rulepack when absent
    pub star_type: Option<String>,
    /// Planet count override
    pub planet_count: Option<usize>,
    /// System age override (Gyr)
    pub age_gyr: Option<f64>,
    /// Simulation epoch stamped on the system (s)
    pub epoch: f64,
    /// Stars only, no planets or belts
    pub empty: bool,
    /// Multiplier on the outer system limit and binary separation.
    ///
    /// Values below 1 pull a system in for display; 1 is physical scale.
    pub toytown_factor: f64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            star_type: None,
            planet_count: None,
            age_gyr: None,
            epoch: 0.0,
            empty: false,
            toytown_factor: 1.0,
        }
    }
}

impl GenerationOptions {
    /// Toytown factor guarded against zero and negative values
    pub(crate) fn scale(&self) -> f64 {
        if self.toytown_factor.is_finite() && self.toytown_factor > 0.0 {
            self.toytown_factor
        } else {
            1.0
        }
    }
}
