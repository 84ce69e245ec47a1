//! Moon systems
//!
//! Moon counts come from the rulepack's tables, giants scaled up by mass.
//! Orbits chain outward from the Roche limit: each moon's periapsis
//! clears the previous moon's apoapsis by the spacing factor, and the
//! chain stops at half the Hill sphere.

use celestial::{Archetype, CelestialBody, NodeId, RoleHint, SeededRng, System};
use log::debug;
use rulepack::RulePack;
use units::Length;

use crate::bodies::{WorldSpec, generate_world};
use crate::context::GenerationContext;
use crate::naming::moon_name;
use crate::placement::{MOON_HILL_FRACTION, zone_for_host};

/// Giant moon counts scale by 1 + log10(M / this), Earth masses
const GIANT_REFERENCE_MASS_EARTH: f64 = 95.0;

const MAX_MOONS: usize = 12;

/// Rayleigh scale of moon eccentricities
const MOON_ECCENTRICITY_SIGMA: f64 = 0.02;
const MAX_MOON_ECCENTRICITY: f64 = 0.2;

/// Number of moons to attempt for a planet
pub fn moon_count(pack: &RulePack, rng: &mut SeededRng, planet: &CelestialBody) -> usize {
    let giant = planet.archetype.is_some_and(|a| a.is_giant());
    let table = if giant { "moonCount.giant" } else { "moonCount.terrestrial" };
    let base: usize = pack
        .distribution(table)
        .and_then(|t| t.pick(rng))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);
    if !giant {
        return base.min(MAX_MOONS);
    }
    let ratio = planet.mass.to_earth_masses() / GIANT_REFERENCE_MASS_EARTH;
    let scale = 1.0 + ratio.max(1.0).log10();
    ((base as f64 * scale).round() as usize).min(MAX_MOONS)
}

/// Generates the moons of `planet_id` and returns their ids, innermost first.
pub fn generate_moons(ctx: &mut GenerationContext<'_>, system: &mut System, planet_id: &NodeId) -> Vec<NodeId> {
    let Some(planet) = system.get(planet_id) else {
        return Vec::new();
    };
    let Some(body) = planet.as_body() else {
        return Vec::new();
    };
    if body.role_hint != RoleHint::Planet {
        return Vec::new();
    }
    let planet_name = planet.name.clone();
    let count = moon_count(ctx.pack, &mut ctx.rng, body);
    let Some(zone) = zone_for_host(system, planet_id, 1.0) else {
        return Vec::new();
    };

    // Moons start outside any ring
    let ring_edge = system
        .children(planet_id)
        .iter()
        .filter_map(|n| n.as_body()?.annulus)
        .map(|annulus| annulus.outer)
        .fold(Length::zero(), Length::max);
    let mut previous_apoapsis = zone.inner.max(ring_edge);

    let mut moons = Vec::with_capacity(count);
    for index in 0..count {
        let spacing = ctx.pack.params.moon_spacing.sample(&mut ctx.rng);
        let eccentricity = ctx
            .rng
            .rayleigh(MOON_ECCENTRICITY_SIGMA)
            .min(MAX_MOON_ECCENTRICITY);
        let periapsis = previous_apoapsis * spacing.max(1.0);
        let a = periapsis / (1.0 - eccentricity);
        let apoapsis = a * (1.0 + eccentricity);
        if apoapsis > zone.outer {
            break;
        }

        let mut spec = WorldSpec::new(
            planet_id.clone(),
            RoleHint::Moon,
            a,
            moon_name(&planet_name, index),
        );
        spec.archetype = Some(Archetype::Terrestrial);
        spec.eccentricity = Some(eccentricity);
        moons.push(generate_world(ctx, system, spec, false));
        previous_apoapsis = apoapsis;
    }
    if moons.len() < count {
        debug!(
            "'{}' fits {} of {} moons inside {:.0}% of its Hill sphere",
            planet_name,
            moons.len(),
            count,
            MOON_HILL_FRACTION * 100.0
        );
    }
    moons
}
