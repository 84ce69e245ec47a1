//! Stellar zones and orbital boundaries
//!
//! Distances that bound where planets and moons may orbit: the frost,
//! soot and habitable zones around a star, Roche and Hill limits around a
//! planet, and the Holman & Wiegert stability limits around a binary.
//!
//! # References
//! - Kasting et al. (1993) - "Habitable Zones around Main Sequence Stars"
//! - Holman & Wiegert (1999) - "Long-Term Stability of Planets in Binary Systems"

use rulepack::GenerationParams;
use units::{Length, Mass};

/// Density assumed for satellites in Roche-limit estimates (kg/m³)
pub const SATELLITE_DENSITY: f64 = 3000.0;

// =============================================================================
// Stellar Zones
// =============================================================================

/// Habitable zone bounds from stellar luminosity
///
/// Inner edge at S_eff = 1.1 (runaway greenhouse), outer edge at
/// S_eff = 0.36 (maximum greenhouse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitableZone {
    pub inner: Length,
    pub outer: Length,
}

impl HabitableZone {
    pub fn from_luminosity(luminosity: f64) -> Self {
        let l = luminosity.max(0.0);
        Self {
            inner: Length::from_au((l / 1.1).sqrt()),
            outer: Length::from_au((l / 0.36).sqrt()),
        }
    }

    pub fn contains(&self, distance: Length) -> bool {
        distance >= self.inner && distance <= self.outer
    }

    /// Geometric center of the zone
    pub fn center(&self) -> Length {
        Length::from_au((self.inner.to_au() * self.outer.to_au()).sqrt())
    }
}

/// Frost line scaled by √(M/M☉) from the rulepack's solar value
pub fn frost_line(params: &GenerationParams, stellar_mass: Mass) -> Length {
    Length::from_au(params.frost_line_au * stellar_mass.to_solar_masses().max(0.0).sqrt())
}

/// Dust sublimation distance, 0.1·√L AU
pub fn soot_line(luminosity: f64) -> Length {
    Length::from_au(0.1 * luminosity.max(0.0).sqrt())
}

/// Outer edge of the planet-forming region, 40 AU per solar mass
pub fn outer_limit(stellar_mass: Mass) -> Length {
    Length::from_au((40.0 * stellar_mass.to_solar_masses()).max(1.0))
}

// =============================================================================
// Planetary Boundaries
// =============================================================================

/// R_Roche ≈ 2.44 × R_primary × (ρ_primary / ρ_satellite)^(1/3)
pub fn roche_limit(primary_radius: Length, primary_density: f64, satellite_density: f64) -> Length {
    if primary_density <= 0.0 || satellite_density <= 0.0 {
        return primary_radius;
    }
    primary_radius * (2.44 * (primary_density / satellite_density).cbrt())
}

/// R_Hill = a × (m / (3·M_host))^(1/3)
pub fn hill_radius(semi_major_axis: Length, mass: Mass, host_mass: Mass) -> Length {
    if host_mass.is_degenerate() || mass.is_degenerate() {
        return Length::zero();
    }
    semi_major_axis * (mass / (host_mass * 3.0)).cbrt()
}

// =============================================================================
// Binary Stability
// =============================================================================

/// Largest stable circumstellar (S-type) orbit around one binary member.
///
/// `mu` is the companion's share of the total mass.
///
/// a_crit = a_bin × (0.464 − 0.380μ − 0.631e + 0.586μe + 0.150e² − 0.198μe²)
pub fn s_type_limit(separation: Length, eccentricity: f64, mu: f64) -> Length {
    let e = eccentricity;
    let factor =
        0.464 - 0.38 * mu - 0.631 * e + 0.586 * mu * e + 0.15 * e.powi(2) - 0.198 * mu * e.powi(2);
    separation * factor.max(0.0)
}

/// Smallest stable circumbinary (P-type) orbit.
///
/// a_crit = a_bin × (1.60 + 5.10e − 2.22e² + 4.12μ − 4.27eμ − 5.09μ² + 4.61e²μ²)
pub fn p_type_limit(separation: Length, eccentricity: f64, mu: f64) -> Length {
    let e = eccentricity;
    let factor = 1.60 + 5.10 * e - 2.22 * e.powi(2) + 4.12 * mu
        - 4.27 * e * mu
        - 5.09 * mu.powi(2)
        + 4.61 * e.powi(2) * mu.powi(2);
    separation * factor
}
