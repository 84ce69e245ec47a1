//! Surface radiation index
//!
//! A dimensionless dose index normalized so that Earth, under a 1 bar
//! atmosphere and a 0.5 G field, reads 1.

use crate::temperature::StellarSource;

/// 121 = (1 + 10·1 bar)(1 + 20·0.5 G), Earth's shielding
const EARTH_SHIELDING: f64 = 121.0;

/// Stellar high-energy exposure before any shielding
pub fn unshielded_radiation(sources: &[StellarSource]) -> f64 {
    sources
        .iter()
        .filter(|s| s.distance.to_au() > 0.0)
        .map(|s| s.luminosity.max(0.0) * s.radiation_factor.max(0.0) / s.distance.to_au().powi(2))
        .sum::<f64>()
        * EARTH_SHIELDING
}

/// Shielding from atmospheric column and magnetosphere
pub fn shielding(pressure_bar: f64, magnetic_field_gauss: f64) -> f64 {
    (1.0 + 10.0 * pressure_bar.max(0.0)) * (1.0 + 20.0 * magnetic_field_gauss.max(0.0))
}

pub fn surface_radiation(sources: &[StellarSource], pressure_bar: f64, magnetic_field_gauss: f64) -> f64 {
    unshielded_radiation(sources) / shielding(pressure_bar, magnetic_field_gauss)
}
