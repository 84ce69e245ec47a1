//! Surface thermal model
//!
//! Surface temperature is the sum of four layers: radiative equilibrium
//! with every star in the system, greenhouse warming, tidal heating, and a
//! flat radiogenic term.

use std::f64::consts::PI;

use celestial::{Archetype, NodeId, System};
use rulepack::{AtmosphereDef, RulePack};
use units::constants::{SOLAR_LUMINOSITY_W, STEFAN_BOLTZMANN};
use units::{EARTH_RADIUS_KM, JUPITER_MASS_KG, Length, Mass};

/// Above this pressure the greenhouse term is evaluated at the 1-bar
/// cloud-top level instead of the actual surface pressure.
pub const CLOUD_TOP_THRESHOLD_BAR: f64 = 1000.0;
pub const CLOUD_TOP_REFERENCE_BAR: f64 = 1.0;

/// Reference partial pressure for the fallback greenhouse sum (bar)
const FALLBACK_REFERENCE_BAR: f64 = 0.001;

/// One star's contribution to a body's energy budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarSource {
    /// Luminosity in solar units
    pub luminosity: f64,
    pub distance: Length,
    /// Activity multiplier for high-energy radiation
    pub radiation_factor: f64,
}

/// One source per star in the system, each at its tree-path distance from `id`
pub fn stellar_sources(system: &System, id: &NodeId) -> Vec<StellarSource> {
    system
        .stars()
        .filter_map(|star| {
            let stellar = star.as_body()?.stellar.as_ref()?;
            Some(StellarSource {
                luminosity: stellar.luminosity,
                distance: system.path_distance(&star.id, id),
                radiation_factor: stellar.radiation_factor,
            })
        })
        .collect()
}

/// Radiative equilibrium temperature from all stars at once
///
/// T = (Σ L_i(1−A) / (16πσd_i²))^(1/4)
///
/// Sources at zero distance are skipped.
pub fn equilibrium_temperature(sources: &[StellarSource], albedo: f64) -> f64 {
    let absorbed = (1.0 - albedo).clamp(0.0, 1.0);
    let flux_sum: f64 = sources
        .iter()
        .filter(|s| s.distance.to_m() > 0.0)
        .map(|s| {
            s.luminosity.max(0.0) * SOLAR_LUMINOSITY_W * absorbed
                / (16.0 * PI * STEFAN_BOLTZMANN * s.distance.to_m().powi(2))
        })
        .sum();
    flux_sum.powf(0.25)
}

/// Total bolometric flux in Earth units (1 L☉ at 1 AU = 1)
pub fn stellar_flux(sources: &[StellarSource]) -> f64 {
    sources
        .iter()
        .filter(|s| s.distance.to_au() > 0.0)
        .map(|s| s.luminosity.max(0.0) / s.distance.to_au().powi(2))
        .sum()
}

/// Bond albedo from the bulk archetype and a temperature estimate
pub fn estimate_albedo(archetype: Option<Archetype>, temperature: f64) -> f64 {
    match archetype {
        Some(Archetype::GasGiant) => match temperature {
            t if t > 1500.0 => 0.05, // Ultra-hot: dark, absorbing
            t if t > 1000.0 => 0.10,
            t if t > 500.0 => 0.30,
            _ => 0.50, // Cold: reflective ammonia clouds
        },
        Some(Archetype::IceGiant) => match temperature {
            t if t > 500.0 => 0.20,
            _ => 0.30,
        },
        Some(Archetype::Terrestrial) | None => match temperature {
            t if t > 1000.0 => 0.10, // Lava world: dark basalt
            t if t > 400.0 => 0.20,
            t if t > 250.0 => 0.30,
            t if t > 200.0 => 0.25,
            _ => 0.60, // Icy: high albedo
        },
    }
}

/// Pressure at which greenhouse warming is evaluated
pub fn effective_greenhouse_pressure(pressure_bar: f64) -> f64 {
    if pressure_bar > CLOUD_TOP_THRESHOLD_BAR {
        CLOUD_TOP_REFERENCE_BAR
    } else {
        pressure_bar.max(0.0)
    }
}

/// Greenhouse warming from a selected atmosphere definition, scaled by
/// actual / nominal pressure.
pub fn greenhouse_from_definition(def: &AtmosphereDef, pressure_bar: f64) -> f64 {
    if def.nominal_pressure_bar <= 0.0 {
        return 0.0;
    }
    def.greenhouse_k * effective_greenhouse_pressure(pressure_bar) / def.nominal_pressure_bar
}

/// Greenhouse warming for atmospheres with no matching definition.
///
/// Each gas contributes k·ln(1 + p_gas / 1 mbar) using the rulepack's
/// per-gas coefficients.
pub fn greenhouse_from_gases<'a, I>(pack: &RulePack, composition: I, pressure_bar: f64) -> f64
where
    I: IntoIterator<Item = (&'a String, &'a f64)>,
{
    let p = effective_greenhouse_pressure(pressure_bar);
    composition
        .into_iter()
        .map(|(gas, fraction)| {
            let k = pack.gas_greenhouse_k.get(gas).copied().unwrap_or(0.0);
            k * (1.0 + fraction.max(0.0) * p / FALLBACK_REFERENCE_BAR).ln()
        })
        .sum()
}

/// Tidal heating of a satellite, empirically calibrated power law
///
/// ΔT = C × (M_host/M_J)^0.625 × (R/R⊕)^0.75 × e^0.5 × (a / 10⁶ km)^−1.875
///
/// With C = 1000 K an Io analog comes out near 127 K.
pub fn tidal_heating(
    coefficient: f64,
    host_mass: Mass,
    radius: Length,
    eccentricity: f64,
    semi_major_axis: Length,
) -> f64 {
    let a = semi_major_axis.to_km() / 1.0e6;
    if host_mass.is_degenerate() || a <= 0.0 || eccentricity <= 0.0 {
        return 0.0;
    }
    let m = host_mass.to_kg() / JUPITER_MASS_KG;
    let r = radius.to_km().max(0.0) / EARTH_RADIUS_KM;
    coefficient * m.powf(0.625) * r.powf(0.75) * eccentricity.sqrt() * a.powf(-1.875)
}

/// Flat radiogenic term; only rocky bodies carry one
pub fn radiogenic_heat(pack: &RulePack, archetype: Option<Archetype>, is_moon: bool) -> f64 {
    if is_moon || archetype == Some(Archetype::Terrestrial) {
        pack.params.radiogenic_heat_k
    } else {
        0.0
    }
}
