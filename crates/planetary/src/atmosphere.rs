//! Atmosphere selection and recalculation
//!
//! Generation picks an atmosphere definition from the rulepack and draws a
//! concrete mixture from it. The processor later recomputes the derived
//! properties (normalized mixture, molar mass, greenhouse warming) from
//! whatever mixture the body currently carries.

use std::collections::BTreeMap;

use celestial::{Archetype, Atmosphere, SeededRng};
use log::warn;
use rulepack::{AtmosphereDef, RulePack};

use crate::temperature::{greenhouse_from_definition, greenhouse_from_gases};

/// Name given to the default giant envelope when no definition matches
pub const PRIMORDIAL: &str = "primordial";

/// Tolerance within which a mixture is already considered normalized
const NORMALIZED_EPSILON: f64 = 1e-12;

/// Body properties that gate which definitions apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereContext {
    pub archetype: Archetype,
    pub mass_earth: f64,
    pub equilibrium_temp_k: f64,
    pub tidally_locked: bool,
}

fn admits(def: &AtmosphereDef, ctx: &AtmosphereContext) -> bool {
    def.archetypes.contains(&ctx.archetype)
        && def.mass_earth.contains(ctx.mass_earth)
        && def.equilibrium_temp_k.contains(ctx.equilibrium_temp_k)
        && (!def.requires_tidal_lock || ctx.tidally_locked)
}

/// Chooses and materializes an atmosphere.
///
/// Returns `None` for an airless body. Terrestrial bodies below the
/// minimum mass, or failing the presence roll, are airless; giants with no
/// admissible definition get a primordial H₂/He envelope.
pub fn select_atmosphere(pack: &RulePack, rng: &mut SeededRng, ctx: &AtmosphereContext) -> Option<Atmosphere> {
    let params = &pack.params;
    if !ctx.archetype.is_giant()
        && (ctx.mass_earth < params.min_atmosphere_mass_earth || !rng.chance(params.atmosphere_chance))
    {
        return None;
    }

    let candidates = pack
        .atmospheres
        .iter()
        .filter(|def| admits(def, ctx))
        .map(|def| (def, def.weight));

    match rng.pick_weighted(candidates) {
        Some(def) => Some(materialize(pack, rng, def, ctx.archetype)),
        None if ctx.archetype.is_giant() => Some(primordial(pack, rng, ctx.archetype)),
        None => None,
    }
}

/// Draws a concrete mixture and pressure from one definition.
pub fn materialize(pack: &RulePack, rng: &mut SeededRng, def: &AtmosphereDef, archetype: Archetype) -> Atmosphere {
    let mut composition: BTreeMap<String, f64> = def
        .gases
        .iter()
        .map(|(gas, span)| (gas.clone(), span.sample(rng)))
        .collect();
    normalize(&mut composition);

    let pressure_bar = def
        .pressure_bar
        .unwrap_or_else(|| pack.pressure_fallback(archetype))
        .sample_log(rng);

    let molar_mass = molar_mass(pack, &composition);
    Atmosphere {
        name: def.name.clone(),
        composition,
        pressure_bar,
        molar_mass,
    }
}

fn primordial(pack: &RulePack, rng: &mut SeededRng, archetype: Archetype) -> Atmosphere {
    let helium = rng.range(0.10, 0.16);
    let composition = BTreeMap::from([("H2".to_string(), 1.0 - helium), ("He".to_string(), helium)]);
    let molar_mass = molar_mass(pack, &composition);
    Atmosphere {
        name: PRIMORDIAL.to_string(),
        composition,
        pressure_bar: pack.pressure_fallback(archetype).sample_log(rng),
        molar_mass,
    }
}

/// Rescales fractions to sum to 1, dropping non-finite or negative entries.
///
/// A mixture already within tolerance of 1 is left untouched so repeated
/// normalization is a fixed point.
pub fn normalize(composition: &mut BTreeMap<String, f64>) {
    composition.retain(|_, x| x.is_finite() && *x >= 0.0);
    let total: f64 = composition.values().sum();
    if composition.is_empty() || (total - 1.0).abs() < NORMALIZED_EPSILON {
        return;
    }
    if total <= 0.0 {
        let share = 1.0 / composition.len() as f64;
        composition.values_mut().for_each(|x| *x = share);
        return;
    }
    composition.values_mut().for_each(|x| *x /= total);
}

/// Mean molar mass (g/mol) over the gases the rulepack knows.
///
/// Unknown gases are left out of the weighting.
pub fn molar_mass(pack: &RulePack, composition: &BTreeMap<String, f64>) -> f64 {
    let mut weighted = 0.0;
    let mut known = 0.0;
    for (gas, fraction) in composition {
        match pack.molar_mass(gas) {
            Some(m) => {
                weighted += fraction * m;
                known += fraction;
            }
            None => warn!("no molar mass for gas '{gas}'"),
        }
    }
    if known > 0.0 { weighted / known } else { 0.0 }
}

/// Greenhouse warming for the body's current atmosphere.
///
/// Uses the definition matching the atmosphere's name when there is one,
/// otherwise sums per-gas coefficients.
pub fn greenhouse(pack: &RulePack, atmosphere: &Atmosphere) -> f64 {
    if !atmosphere.is_present() {
        return 0.0;
    }
    match pack.atmosphere(&atmosphere.name) {
        Some(def) => greenhouse_from_definition(def, atmosphere.pressure_bar),
        None => greenhouse_from_gases(pack, &atmosphere.composition, atmosphere.pressure_bar),
    }
}

/// Normalizes the mixture and refreshes molar mass in place; returns the
/// greenhouse warming.
pub fn recalculate(pack: &RulePack, atmosphere: &mut Atmosphere) -> f64 {
    if !atmosphere.is_present() {
        atmosphere.molar_mass = 0.0;
        return 0.0;
    }
    normalize(&mut atmosphere.composition);
    atmosphere.molar_mass = molar_mass(pack, &atmosphere.composition);
    greenhouse(pack, atmosphere)
}

/// Whether a magnetosphere holds the atmosphere against the stellar wind.
///
/// The processor records this flag but does not strip atmospheres on it.
pub fn atmosphere_retained(pack: &RulePack, magnetic_field_gauss: f64, stellar_flux: f64) -> bool {
    magnetic_field_gauss * pack.params.atmosphere_retention_factor >= stellar_flux
}
