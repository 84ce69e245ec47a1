//! Planetary body generator
//!
//! Materializes planets, moons, belts and rings. A world is built in a
//! fixed order: archetype, bulk properties, orbit, spin, environment,
//! late transformations, then habitability and classification. Planets
//! then recurse into their ring and moons.

use std::f64::consts::TAU;

use celestial::{
    Annulus, Archetype, Atmosphere, CelestialBody, Hydrosphere, NodeId, NodeKind, Orbit,
    OrbitalElements, RoleHint, SeededRng, Solvent, System,
};
use log::debug;
use planetary::atmosphere::{self, AtmosphereContext, materialize, select_atmosphere};
use planetary::flight::{FlightInput, flight_dynamics};
use planetary::habitability::{BiosphereEnvironment, HabitabilityInput, assess, generate_biosphere};
use planetary::physics::surface_gravity;
use planetary::radiation::{surface_radiation, unshielded_radiation};
use planetary::temperature::{
    equilibrium_temperature, estimate_albedo, radiogenic_heat, stellar_flux, stellar_sources,
    tidal_heating,
};
use planetary::zones::frost_line;
use planetary::{BodyFeatures, FeatureContext, classify_body};
use rulepack::{PlanetTemplate, RulePack, Span};
use system_processor::biosphere_seed;
use units::constants::{G, SECONDS_PER_YEAR, STANDARD_GRAVITY};
use units::{Length, Mass};

use crate::context::GenerationContext;
use crate::factory::BodyConfig;
use crate::moons::generate_moons;
use crate::naming::{belt_name, planet_name, ring_name};
use crate::placement::{PLANET_SPACING, PlacementZone, generate_slots, orbit_clears};

// =============================================================================
// Generation Constants
// =============================================================================

/// Moons never exceed this share of their parent's mass
pub const MOON_MASS_CAP: f64 = 0.05;

/// Moons never exceed this share of their parent's radius
pub const MOON_RADIUS_CAP: f64 = 0.5;

/// Lightest moon drawn, Earth masses
const MIN_MOON_MASS_EARTH: f64 = 1e-4;

const MAX_ECCENTRICITY: f64 = 0.6;

/// Hot-Jupiter orbit range after migration (AU, scaled by ∛M)
const HOT_JUPITER_AU: Span = Span(0.02, 0.1);

/// Giants migrate only from inside this multiple of the frost line
const MIGRATION_REACH: f64 = 2.0;

/// Frost-zone band edges as multiples of the frost line
const FROST_ZONE: Span = Span(0.8, 2.5);

/// Planets inside 0.1 AU × ∛(M/M☉) are tidally locked
const PLANET_LOCK_AU: f64 = 0.1;

/// Moons lock only inside this many host radii
const MOON_LOCK_RADII: f64 = 60.0;

const RETROGRADE_MOON_CHANCE: f64 = 0.05;

const TERRESTRIAL_FIELD_GAUSS: Span = Span(0.05, 1.0);
const GIANT_FIELD_GAUSS: Span = Span(2.0, 20.0);

/// Surface covered by a drawn hydrosphere
const HYDROSPHERE_COVERAGE: Span = Span(0.05, 0.95);

/// Chthonian remnants keep this share of their radius and mass
const CHTHONIAN_RADIUS_FACTOR: f64 = 0.2;
const CHTHONIAN_MASS_FACTOR: f64 = 0.1;

/// Belt mass range, Earth masses
const BELT_MASS_EARTH: Span = Span(1e-4, 1e-2);

/// Ring mass as a share of the host
const RING_MASS_SHARE: Span = Span(5e-9, 5e-8);

/// Earth-analog bulk properties for habitable-zone placement
const EARTH_LIKE_MASS: Span = Span(0.8, 1.25);
const EARTH_LIKE_OCEANS: Span = Span(0.5, 0.8);
const EARTH_LIKE_FIELD_GAUSS: Span = Span(0.3, 0.6);
const EARTH_LIKE_ATMOSPHERE: &str = "terran";

/// What to build and where
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSpec {
    pub host_id: NodeId,
    pub role: RoleHint,
    pub semi_major_axis: Length,
    pub name: String,
    /// Forced archetype; moons are always terrestrial
    pub archetype: Option<Archetype>,
    /// Forced eccentricity, used by moon chaining
    pub eccentricity: Option<f64>,
    /// Migration never moves a planet inside this radius
    pub min_radius: Length,
    /// Giants inside the frost zone may spiral inward
    pub migrate: bool,
    /// Draw an Earth analog instead of sampling the template freely
    pub earth_like: bool,
    pub user_named: bool,
}

impl WorldSpec {
    pub fn new(host_id: NodeId, role: RoleHint, semi_major_axis: Length, name: impl Into<String>) -> Self {
        Self {
            host_id,
            role,
            semi_major_axis,
            name: name.into(),
            archetype: None,
            eccentricity: None,
            min_radius: Length::zero(),
            migrate: true,
            earth_like: false,
            user_named: false,
        }
    }
}

/// Fills one placement zone with planets and belts.
pub fn populate_zone(ctx: &mut GenerationContext<'_>, system: &mut System, zone: &PlacementZone, count: usize) {
    let slots = generate_slots(&mut ctx.rng, &ctx.pack.params, zone, count);
    let Some(host_name) = system.get(&zone.host_id).map(|n| n.name.clone()) else {
        return;
    };

    for a in slots {
        if ctx.rng.chance(ctx.pack.params.belt_chance) {
            let index = count_children(system, &zone.host_id, RoleHint::Belt);
            generate_belt(ctx, system, &zone.host_id, a, belt_name(&host_name, index));
        } else {
            let index = count_children(system, &zone.host_id, RoleHint::Planet);
            let mut spec = WorldSpec::new(
                zone.host_id.clone(),
                RoleHint::Planet,
                a,
                planet_name(&host_name, index),
            );
            spec.min_radius = zone.inner;
            generate_world(ctx, system, spec, true);
        }
    }
}

pub fn count_children(system: &System, host_id: &NodeId, role: RoleHint) -> usize {
    system
        .children(host_id)
        .iter()
        .filter_map(|n| n.as_body())
        .filter(|b| b.role_hint == role)
        .count()
}

/// Builds a planet or moon and inserts it. With `recurse`, planets also
/// receive their ring and moons.
pub fn generate_world(
    ctx: &mut GenerationContext<'_>,
    system: &mut System,
    spec: WorldSpec,
    recurse: bool,
) -> NodeId {
    let pack = ctx.pack;
    let params = &pack.params;
    let is_moon = spec.role == RoleHint::Moon;

    let host_mass = system.mass_of(&spec.host_id);
    let parent = system.body(&spec.host_id).map(|b| (b.mass, b.radius));
    let star_mass = system
        .host_star(&spec.host_id)
        .map_or(host_mass, |star| star.mass());

    // Archetype and bulk
    let archetype = if is_moon || spec.earth_like {
        Archetype::Terrestrial
    } else {
        spec.archetype
            .unwrap_or_else(|| choose_archetype(pack, &mut ctx.rng, spec.semi_major_axis, host_mass))
    };
    let template = pack.planet_template(archetype);
    let (mut mass, mut radius) = draw_bulk(&mut ctx.rng, &template, is_moon, spec.earth_like);
    if is_moon && let Some((parent_mass, parent_radius)) = parent {
        mass = mass.min(parent_mass * MOON_MASS_CAP);
        radius = radius.min(parent_radius * MOON_RADIUS_CAP);
    }

    // Orbit
    let mut tags: Vec<&str> = Vec::new();
    let mut a = spec.semi_major_axis;
    let mut eccentricity = spec
        .eccentricity
        .unwrap_or_else(|| ctx.rng.rayleigh(template.eccentricity_sigma))
        .clamp(0.0, MAX_ECCENTRICITY);
    if spec.migrate
        && !is_moon
        && archetype == Archetype::GasGiant
        && a < frost_line(params, host_mass) * MIGRATION_REACH
        && ctx.rng.chance(params.migration_chance)
    {
        let hot = HOT_JUPITER_AU.sample_log(&mut ctx.rng) * star_mass.to_solar_masses().cbrt();
        let target = Length::from_au(hot).max(spec.min_radius);
        // The giant stays put when a sibling already sits near the target orbit
        match orbit_clears(system, &spec.host_id, target, PLANET_SPACING) {
            Ok(()) => {
                a = target;
                eccentricity = eccentricity.min(0.05);
                tags.extend(["migrated", "hot-jupiter"]);
            }
            Err(neighbour) => debug!("'{}' cannot migrate past '{}'", spec.name, neighbour),
        }
    }
    let mut elements = OrbitalElements::circular(a);
    elements.eccentricity = eccentricity;
    elements.inclination = ctx.rng.range(0.0, 0.05);
    elements.arg_periapsis = ctx.rng.range(0.0, TAU);
    elements.ascending_node = ctx.rng.range(0.0, TAU);
    elements.mean_anomaly = ctx.rng.range(0.0, TAU);
    let mut orbit = Orbit::new(spec.host_id.clone(), G * host_mass.to_kg(), elements);
    orbit.retrograde = is_moon && ctx.rng.chance(RETROGRADE_MOON_CHANCE);
    let period_s = orbit.period();

    // Spin
    let tidally_locked = if is_moon {
        let parent_radius = parent.map_or(Length::zero(), |(_, r)| r);
        a < parent_radius * MOON_LOCK_RADII
            && lock_timescale_years(a, host_mass, radius, mass) < ctx.age_gyr * 1e9
    } else {
        a.to_au() < PLANET_LOCK_AU * star_mass.to_solar_masses().max(0.0).cbrt()
    };
    let rotation_hours = if tidally_locked && period_s > 0.0 {
        period_s / 3600.0
    } else {
        template.rotation_hours.sample(&mut ctx.rng)
    };
    let axial_tilt = if tidally_locked {
        0.0
    } else {
        template.axial_tilt_deg.sample(&mut ctx.rng)
    };
    let magnetic_field = if spec.earth_like {
        EARTH_LIKE_FIELD_GAUSS.sample(&mut ctx.rng)
    } else if archetype.is_giant() {
        GIANT_FIELD_GAUSS.sample(&mut ctx.rng)
    } else if ctx.rng.chance(params.magnetic_field_chance) {
        TERRESTRIAL_FIELD_GAUSS.sample(&mut ctx.rng)
    } else {
        0.0
    };

    let config = BodyConfig::new(spec.name.clone(), spec.role, Some(spec.host_id.clone()))
        .with_mass(mass)
        .with_radius(radius);
    let mut node = ctx.factory.create_body(&mut ctx.rng, config);
    node.user_named = spec.user_named;
    let id = node.id.clone();
    let mut body = match &node.kind {
        NodeKind::Body(body) => body.clone(),
        NodeKind::Barycenter(_) => CelestialBody::empty(spec.role),
    };
    body.archetype = Some(archetype);
    body.orbit = Some(orbit);
    body.tidally_locked = tidally_locked;
    body.rotation_period_hours = rotation_hours;
    body.axial_tilt_deg = axial_tilt;
    body.magnetic_field_gauss = magnetic_field;
    tags.iter().for_each(|t| body.add_tag(t));

    // Environment needs the orbit placed in the tree
    node.kind = NodeKind::Body(body.clone());
    system.insert(node);
    let sources = stellar_sources(system, &id);
    let first_guess = equilibrium_temperature(&sources, body.albedo);
    body.albedo = estimate_albedo(Some(archetype), first_guess);
    let teq = equilibrium_temperature(&sources, body.albedo);

    let atmosphere = if spec.earth_like {
        pack.atmosphere(EARTH_LIKE_ATMOSPHERE)
            .map(|def| materialize(pack, &mut ctx.rng, def, archetype))
    } else {
        select_atmosphere(
            pack,
            &mut ctx.rng,
            &AtmosphereContext {
                archetype,
                mass_earth: mass.to_earth_masses(),
                equilibrium_temp_k: teq,
                tidally_locked,
            },
        )
    };
    match atmosphere {
        Some(atm) => body.atmosphere = atm,
        None if !archetype.is_giant() => body.add_tag("airless"),
        None => {}
    }

    let tidal = if is_moon {
        tidal_heating(params.tidal_heating_coefficient, host_mass, radius, eccentricity, a)
    } else {
        0.0
    };
    let radiogenic = radiogenic_heat(pack, Some(archetype), is_moon);
    let mut greenhouse = atmosphere::recalculate(pack, &mut body.atmosphere);
    let surface = teq + greenhouse + tidal + radiogenic;
    let unshielded = unshielded_radiation(&sources);

    if body.atmosphere.is_present() && !archetype.is_giant() {
        body.hydrosphere = if spec.earth_like {
            Hydrosphere {
                coverage: EARTH_LIKE_OCEANS.sample(&mut ctx.rng),
                composition: Solvent::Water,
            }
        } else {
            draw_hydrosphere(pack, &mut ctx.rng, surface)
        };
    }

    // Late transformations
    let chthonian = !is_moon
        && archetype.is_giant()
        && ctx.age_gyr >= params.chthonian_min_age_gyr
        && a.to_au() < params.chthonian_max_distance_au;
    if chthonian {
        body.radius = body.radius * CHTHONIAN_RADIUS_FACTOR;
        body.mass = body.mass * CHTHONIAN_MASS_FACTOR;
        strip(&mut body);
        body.add_tag("chthonian");
        greenhouse = 0.0;
    } else if archetype == Archetype::Terrestrial
        && body.atmosphere.is_present()
        && (unshielded > params.extreme_radiation || surface > params.extreme_temperature_k)
    {
        strip(&mut body);
        body.add_tag("airless");
        greenhouse = atmosphere::recalculate(pack, &mut body.atmosphere);
    }

    let physics = &mut body.physics;
    physics.orbital_period_s = period_s;
    physics.rotation_period_s = rotation_hours * 3600.0;
    physics.unshielded_radiation = unshielded;
    physics.radiation = surface_radiation(&sources, body.atmosphere.pressure_bar, magnetic_field);
    physics.stellar_flux = stellar_flux(&sources);
    physics.equilibrium_temp_k = teq;
    physics.greenhouse_k = greenhouse;
    physics.tidal_heating_k = tidal;
    physics.radiogenic_k = radiogenic;
    physics.surface_temp_k = teq + greenhouse + tidal + radiogenic;
    physics.atmosphere_retained =
        atmosphere::atmosphere_retained(pack, magnetic_field, physics.stellar_flux);
    body.physics.surface_gravity = surface_gravity(&body);

    assess_life(&mut body, &id);
    body.flight = Some(flight_dynamics(&FlightInput {
        mass: body.mass,
        radius: body.radius,
        surface_gravity: body.physics.surface_gravity,
        surface_temp_k: body.physics.surface_temp_k,
        pressure_bar: body.atmosphere.pressure_bar,
        molar_mass: body.atmosphere.molar_mass,
        rotation_period_s: body.physics.rotation_period_s,
        host_mass: Some(host_mass),
        semi_major_axis: Some(a),
        density: body.density(),
    }));

    // Rings and moons are not generated yet, so the ring-child feature is false here
    let features = BodyFeatures::build(&body, FeatureContext::from_system(system, &id));
    body.classes = classify_body(&body, &features, pack);

    debug!(
        "{} '{}': {} {:.3} M⊕ at {:.3} AU, {:.0} K",
        spec.role.as_str(),
        spec.name,
        archetype,
        body.mass.to_earth_masses(),
        a.to_au(),
        body.physics.surface_temp_k
    );

    let ring_chance = if archetype.is_giant() {
        params.ring_chance_giant
    } else {
        params.ring_chance_terrestrial
    };
    if let Some(slot) = system.body_mut(&id) {
        *slot = body;
    }

    if recurse && !is_moon {
        if ctx.rng.chance(ring_chance) {
            generate_ring(ctx, system, &id, None);
        }
        generate_moons(ctx, system, &id);
    }
    id
}

/// Archetype weighted by distance from the frost line
fn choose_archetype(pack: &RulePack, rng: &mut SeededRng, a: Length, host_mass: Mass) -> Archetype {
    let frost = frost_line(&pack.params, host_mass).to_au();
    let ratio = if frost > 0.0 { a.to_au() / frost } else { f64::MAX };
    let table = if ratio < FROST_ZONE.min() {
        "archetype.inner"
    } else if ratio < FROST_ZONE.max() {
        "archetype.frost"
    } else {
        "archetype.outer"
    };
    pack.distribution(table)
        .and_then(|t| t.pick(rng))
        .and_then(Archetype::from_name)
        .unwrap_or(Archetype::Terrestrial)
}

/// Mass log-uniform over the template, radius at the same log position
fn draw_bulk(rng: &mut SeededRng, template: &PlanetTemplate, is_moon: bool, earth_like: bool) -> (Mass, Length) {
    let span = if earth_like {
        EARTH_LIKE_MASS
    } else if is_moon {
        Span(MIN_MOON_MASS_EARTH, template.mass_earth.max())
    } else {
        template.mass_earth
    };
    let mass_earth = span.sample_log(rng);
    (
        Mass::from_earth_masses(mass_earth),
        Length::from_earth_radii(radius_for_mass(template, mass_earth)),
    )
}

/// Radius in Earth radii. Below the template's mass range a constant
/// density is assumed.
pub fn radius_for_mass(template: &PlanetTemplate, mass_earth: f64) -> f64 {
    let (masses, radii) = (template.mass_earth, template.radius_earth);
    if mass_earth < masses.min() && masses.min() > 0.0 {
        return radii.min() * (mass_earth.max(0.0) / masses.min()).cbrt();
    }
    radii.log_lerp(masses.log_position(mass_earth))
}

/// Despinning time of a satellite in years
///
/// τ ∝ a⁶ / (M_host · R² · m), with Q/k₂ ≈ 100 for rocky bodies.
fn lock_timescale_years(a: Length, host_mass: Mass, radius: Length, mass: Mass) -> f64 {
    let denominator = host_mass.to_kg() * radius.to_m().powi(2) * mass.to_kg();
    if denominator <= 0.0 {
        return f64::INFINITY;
    }
    let q_over_k2 = 100.0;
    a.to_m().powi(6) / denominator * q_over_k2 * 1e-20 / SECONDS_PER_YEAR
}

/// A liquid surface when some solvent is liquid at `surface_temp_k`
fn draw_hydrosphere(pack: &RulePack, rng: &mut SeededRng, surface_temp_k: f64) -> Hydrosphere {
    let table = pack.distribution("solvent");
    let candidates = [Solvent::Water, Solvent::Ammonia, Solvent::Methane]
        .into_iter()
        .filter(|s| {
            let (freeze, boil) = s.liquid_range();
            surface_temp_k >= freeze && surface_temp_k <= boil
        })
        .map(|s| {
            let weight = table
                .and_then(|t| t.0.get(s.as_str()).copied())
                .unwrap_or(1.0);
            (s, weight)
        });
    match rng.pick_weighted(candidates) {
        Some(solvent) if rng.chance(pack.params.hydrosphere_chance) => Hydrosphere {
            coverage: HYDROSPHERE_COVERAGE.sample(rng),
            composition: solvent,
        },
        _ => Hydrosphere::default(),
    }
}

fn strip(body: &mut CelestialBody) {
    body.atmosphere = Atmosphere::default();
    body.hydrosphere = Hydrosphere::default();
    body.add_tag("stripped");
}

/// Habitability and biosphere, rolled from the body's own stream so the
/// processor reproduces the same result.
fn assess_life(body: &mut CelestialBody, id: &NodeId) {
    let solvent = HabitabilityInput::from_hydrosphere(&body.hydrosphere);
    body.habitability = assess(&HabitabilityInput {
        surface_temp_k: body.physics.surface_temp_k,
        pressure_bar: body.atmosphere.pressure_bar,
        solvent,
        radiation: body.physics.radiation,
        gravity_g: body.physics.surface_gravity / STANDARD_GRAVITY,
        oxygen_fraction: body.atmosphere.fraction("O2"),
    });
    let mut rng = SeededRng::from_seed_str(&biosphere_seed(id));
    body.biosphere = generate_biosphere(
        &mut rng,
        body.habitability.score,
        &BiosphereEnvironment {
            solvent,
            stellar_flux: body.physics.stellar_flux,
            tidal_heating_k: body.physics.tidal_heating_k,
        },
    );
}

/// A belt centered on `a` around a star or barycenter
pub fn generate_belt(
    ctx: &mut GenerationContext<'_>,
    system: &mut System,
    host_id: &NodeId,
    a: Length,
    name: String,
) -> NodeId {
    let params = &ctx.pack.params;
    let host_mass = system.mass_of(host_id);
    let mass = Mass::from_earth_masses(BELT_MASS_EARTH.sample_log(&mut ctx.rng));
    let half_width = params.belt_half_width.sample(&mut ctx.rng);

    let config = BodyConfig::new(name, RoleHint::Belt, Some(host_id.clone())).with_mass(mass);
    let mut node = ctx.factory.create_body(&mut ctx.rng, config);
    let id = node.id.clone();
    if let Some(body) = node.as_body_mut() {
        body.orbit = Some(Orbit::new(
            host_id.clone(),
            G * host_mass.to_kg(),
            OrbitalElements::circular(a),
        ));
        body.annulus = Some(Annulus {
            inner: a * (1.0 - half_width),
            outer: a * (1.0 + half_width),
        });
    }
    system.insert(node);
    debug!("belt around '{}' at {:.3} AU", host_id, a.to_au());
    id
}

/// A ring around a planet, its edges multiples of the planet radius
pub fn generate_ring(
    ctx: &mut GenerationContext<'_>,
    system: &mut System,
    planet_id: &NodeId,
    name: Option<String>,
) -> Option<NodeId> {
    let params = &ctx.pack.params;
    let planet = system.get(planet_id)?;
    let (planet_mass, planet_radius) = planet.as_body().map(|b| (b.mass, b.radius))?;
    let name = name.unwrap_or_else(|| ring_name(&planet.name));

    let inner = planet_radius * params.ring_inner_radii.sample(&mut ctx.rng);
    let outer = planet_radius * params.ring_outer_radii.sample(&mut ctx.rng);
    let mass = planet_mass * RING_MASS_SHARE.sample_log(&mut ctx.rng);

    let config = BodyConfig::new(name, RoleHint::Ring, Some(planet_id.clone())).with_mass(mass);
    let mut node = ctx.factory.create_body(&mut ctx.rng, config);
    let id = node.id.clone();
    if let Some(body) = node.as_body_mut() {
        body.annulus = Some(Annulus {
            inner,
            outer: outer.max(inner),
        });
    }
    system.insert(node);
    Some(id)
}
