//! Multi-pass derivation pipeline
//!
//! Passes run in a fixed order, each consuming what the previous one
//! produced:
//!
//! 0. Barycenter reconciliation
//! 1. Physical basics (gravity, rotation, orbital period, luminosity)
//! 2. Environment (radiation, temperatures, atmosphere properties)
//! 3. Classification, habitability and biosphere
//! 4. Flight dynamics
//!
//! The processor never creates or removes nodes. Missing or zero-valued
//! inputs produce zero contributions rather than errors, and running the
//! pipeline twice on an unchanged system is a bitwise fixed point.

use celestial::{
    Habitability, NodeId, NodeKind, RoleHint, SeededRng, System, keplerian_mean_motion,
};
use log::{debug, info, warn};
use planetary::atmosphere;
use planetary::flight::{FlightInput, flight_dynamics};
use planetary::habitability::{BiosphereEnvironment, HabitabilityInput, assess, generate_biosphere};
use planetary::physics::{stellar_luminosity, surface_gravity};
use planetary::radiation::{surface_radiation, unshielded_radiation};
use planetary::temperature::{
    equilibrium_temperature, radiogenic_heat, stellar_flux, stellar_sources, tidal_heating,
};
use planetary::{BodyFeatures, FeatureContext, classify_body};
use rulepack::RulePack;
use units::constants::{G, STANDARD_GRAVITY};
use units::{Length, Mass};

/// Relative change below which a recomputed value keeps its stored bits
const SETTLE_EPSILON: f64 = 1e-12;

/// Tags owned by the processor and rebuilt on every run
pub const DERIVED_TAGS: [&str; 5] = [
    "tidally-locked",
    "ringed",
    "magnetosphere",
    "habitable",
    "biosphere",
];

/// Keeps `old` when `new` only differs by accumulated rounding.
pub fn settle(old: f64, new: f64) -> f64 {
    if (new - old).abs() <= SETTLE_EPSILON * old.abs().max(new.abs()) {
        old
    } else {
        new
    }
}

/// Seed string for a body's biosphere roll, shared with the generator
pub fn biosphere_seed(id: &NodeId) -> String {
    format!("{id}:biosphere")
}

pub struct SystemProcessor<'a> {
    pack: &'a RulePack,
}

impl<'a> SystemProcessor<'a> {
    pub fn new(pack: &'a RulePack) -> Self {
        Self { pack }
    }

    /// Recomputes every derived field. Call after generation and after
    /// every structural edit.
    pub fn process(&self, mut system: System) -> System {
        info!(
            "processing system '{}' ({} nodes, revision {})",
            system.name,
            system.nodes.len(),
            system.revision
        );
        self.reconcile_barycenters(&mut system);
        self.physical_basics(&mut system);
        self.environment(&mut system);
        self.classification(&mut system);
        self.flight(&mut system);
        system
    }

    // =========================================================================
    // Pass 0 - Barycenter reconciliation
    // =========================================================================

    fn reconcile_barycenters(&self, system: &mut System) {
        let mut barycenters: Vec<NodeId> = system
            .nodes
            .values()
            .filter(|n| n.as_barycenter().is_some())
            .map(|n| n.id.clone())
            .collect();
        // Innermost first so nested barycenters see fresh member masses
        barycenters.sort_by_key(|id| std::cmp::Reverse(system.ancestors(id).len()));

        for bary_id in &barycenters {
            let Some(members) = system
                .get(bary_id)
                .and_then(|n| n.as_barycenter())
                .map(|b| b.member_ids.clone())
            else {
                continue;
            };
            let live: Vec<NodeId> = members
                .into_iter()
                .filter(|id| system.get(id).is_some())
                .collect();

            let total: Mass = live.iter().map(|id| system.mass_of(id)).sum();
            let separation: Length = live
                .iter()
                .filter_map(|id| system.get(id))
                .map(|n| n.orbital_distance())
                .sum();
            let n = keplerian_mean_motion(G * total.to_kg(), separation);

            if let Some(bary) = system.get_mut(bary_id).and_then(|n| n.as_barycenter_mut()) {
                bary.effective_mass = total;
                bary.separation = Length::from_km(settle(bary.separation.to_km(), separation.to_km()));
                bary.mean_motion = settle(bary.mean_motion, n);
            }

            if live.len() == 2 && !total.is_degenerate() {
                for (i, member) in live.iter().enumerate() {
                    let other_mass = system.mass_of(&live[1 - i]);
                    let Some(orbit) = system.body_mut(member).and_then(|b| b.orbit.as_mut()) else {
                        continue;
                    };
                    let a = separation * (other_mass / total);
                    orbit.elements.semi_major_axis =
                        Length::from_km(settle(orbit.elements.semi_major_axis.to_km(), a.to_km()));
                    // Reduced two-body parameter: μ_i = G·m_other³ / M², so that
                    // √(μ_i / a_i³) reproduces the shared mean motion
                    let mu = G * other_mass.to_kg().powi(3) / total.to_kg().powi(2);
                    orbit.host_mu = settle(orbit.host_mu, mu);
                    orbit.mean_motion = Some(settle(orbit.mean_motion.unwrap_or(0.0), n));
                }
            }
        }

        self.resync_orbit_hosts(system, &barycenters);
        debug!("pass 0: reconciled {} barycenters", barycenters.len());
    }

    /// Points every orbit at its parent and refreshes the host parameter.
    fn resync_orbit_hosts(&self, system: &mut System, barycenters: &[NodeId]) {
        let ids: Vec<NodeId> = system.nodes.keys().cloned().collect();
        for id in ids {
            let Some(node) = system.get(&id) else { continue };
            let Some(parent) = node.parent_id.clone() else { continue };
            if node.as_body().and_then(|b| b.orbit.as_ref()).is_none() {
                continue;
            }
            if system.get(&parent).is_none() {
                warn!("orbit of '{}' refers to missing host '{}'", node.name, parent);
                continue;
            }

            let paired = barycenters.contains(&parent)
                && system
                    .get(&parent)
                    .and_then(|p| p.as_barycenter())
                    .is_some_and(|b| b.member_ids.contains(&id) && b.member_ids.len() == 2);
            let host_mu = G * system.mass_of(&parent).to_kg();

            let Some(orbit) = system.body_mut(&id).and_then(|b| b.orbit.as_mut()) else {
                continue;
            };
            orbit.host_id = parent;
            if paired {
                continue;
            }
            orbit.host_mu = settle(orbit.host_mu, host_mu);
            if let Some(n) = orbit.mean_motion {
                orbit.mean_motion = Some(settle(
                    n,
                    keplerian_mean_motion(host_mu, orbit.elements.semi_major_axis),
                ));
            }
        }
    }

    // =========================================================================
    // Pass 1 - Physical basics
    // =========================================================================

    fn physical_basics(&self, system: &mut System) {
        for node in system.nodes.values_mut() {
            let NodeKind::Body(body) = &mut node.kind else { continue };

            body.physics.surface_gravity = surface_gravity(body);
            body.physics.orbital_period_s = body.orbit.as_ref().map_or(0.0, |o| o.period());
            if body.tidally_locked && body.physics.orbital_period_s > 0.0 {
                body.rotation_period_hours =
                    settle(body.rotation_period_hours, body.physics.orbital_period_s / 3600.0);
            }
            body.physics.rotation_period_s = body.rotation_period_hours * 3600.0;
            body.atmosphere.molar_mass = atmosphere::molar_mass(self.pack, &body.atmosphere.composition);

            let radius_solar = body.radius.to_solar_radii();
            if let Some(stellar) = body.stellar.as_mut() {
                stellar.luminosity = stellar_luminosity(radius_solar, stellar.temperature_k);
            }
        }
        debug!("pass 1: physical basics");
    }

    // =========================================================================
    // Pass 2 - Environment
    // =========================================================================

    fn environment(&self, system: &mut System) {
        let params = &self.pack.params;
        let ids: Vec<NodeId> = system.nodes.keys().cloned().collect();
        for id in ids {
            let Some(body) = system.body(&id) else { continue };
            if body.is_star() {
                continue;
            }
            let sources = stellar_sources(system, &id);

            let tidal = if body.role_hint == RoleHint::Moon {
                let host_mass = system
                    .get(&id)
                    .and_then(|n| n.parent_id.as_ref())
                    .map_or(Mass::zero(), |p| system.mass_of(p));
                body.orbit.as_ref().map_or(0.0, |o| {
                    tidal_heating(
                        params.tidal_heating_coefficient,
                        host_mass,
                        body.radius,
                        o.elements.eccentricity,
                        o.semi_major_axis(),
                    )
                })
            } else {
                0.0
            };

            let Some(body) = system.body_mut(&id) else { continue };
            let physics = &mut body.physics;
            physics.unshielded_radiation = unshielded_radiation(&sources);
            physics.radiation =
                surface_radiation(&sources, body.atmosphere.pressure_bar, body.magnetic_field_gauss);
            physics.stellar_flux = stellar_flux(&sources);
            physics.equilibrium_temp_k = equilibrium_temperature(&sources, body.albedo);
            physics.tidal_heating_k = tidal;
            physics.radiogenic_k =
                radiogenic_heat(self.pack, body.archetype, body.role_hint == RoleHint::Moon);
            physics.greenhouse_k = atmosphere::recalculate(self.pack, &mut body.atmosphere);
            physics.surface_temp_k = physics.equilibrium_temp_k
                + physics.greenhouse_k
                + physics.tidal_heating_k
                + physics.radiogenic_k;
            physics.atmosphere_retained = atmosphere::atmosphere_retained(
                self.pack,
                body.magnetic_field_gauss,
                physics.stellar_flux,
            );
        }
        debug!("pass 2: environment");
    }

    // =========================================================================
    // Pass 3 - Classification
    // =========================================================================

    fn classification(&self, system: &mut System) {
        let ids: Vec<NodeId> = system.nodes.keys().cloned().collect();
        for id in ids {
            let ctx = FeatureContext::from_system(system, &id);
            let Some(body) = system.body_mut(&id) else { continue };

            if let Some(stellar) = &body.stellar {
                body.classes = vec![format!("{}-type-star", stellar.spectral_class.to_lowercase())];
                continue;
            }

            for tag in DERIVED_TAGS {
                body.remove_tag(tag);
            }
            if body.tidally_locked {
                body.add_tag("tidally-locked");
            }
            if ctx.has_ring_child {
                body.add_tag("ringed");
            }
            if body.magnetic_field_gauss > 0.0 {
                body.add_tag("magnetosphere");
            }

            let features = BodyFeatures::build(body, ctx);
            body.classes = classify_body(body, &features, self.pack);

            if !body.role_hint.is_world() {
                body.habitability = Habitability::default();
                body.biosphere = None;
                continue;
            }

            let solvent = HabitabilityInput::from_hydrosphere(&body.hydrosphere);
            body.habitability = assess(&HabitabilityInput {
                surface_temp_k: body.physics.surface_temp_k,
                pressure_bar: body.atmosphere.pressure_bar,
                solvent,
                radiation: body.physics.radiation,
                gravity_g: body.physics.surface_gravity / STANDARD_GRAVITY,
                oxygen_fraction: body.atmosphere.fraction("O2"),
            });

            let mut rng = SeededRng::from_seed_str(&biosphere_seed(&id));
            body.biosphere = generate_biosphere(
                &mut rng,
                body.habitability.score,
                &BiosphereEnvironment {
                    solvent,
                    stellar_flux: body.physics.stellar_flux,
                    tidal_heating_k: body.physics.tidal_heating_k,
                },
            );

            if body.habitability.tier != celestial::HabitabilityTier::None {
                body.add_tag("habitable");
            }
            if body.biosphere.is_some() {
                body.add_tag("biosphere");
            }
        }
        debug!("pass 3: classification");
    }

    // =========================================================================
    // Pass 4 - Flight dynamics
    // =========================================================================

    fn flight(&self, system: &mut System) {
        let ids: Vec<NodeId> = system.nodes.keys().cloned().collect();
        for id in ids {
            let host_mass = system
                .get(&id)
                .and_then(|n| n.parent_id.as_ref())
                .map(|p| system.mass_of(p));
            let Some(body) = system.body_mut(&id) else { continue };
            if !body.role_hint.is_world() {
                body.flight = None;
                continue;
            }
            let input = FlightInput {
                mass: body.mass,
                radius: body.radius,
                surface_gravity: body.physics.surface_gravity,
                surface_temp_k: body.physics.surface_temp_k,
                pressure_bar: body.atmosphere.pressure_bar,
                molar_mass: body.atmosphere.molar_mass,
                rotation_period_s: body.physics.rotation_period_s,
                host_mass,
                semi_major_axis: body.orbit.as_ref().map(|o| o.semi_major_axis()),
                density: body.density(),
            };
            body.flight = Some(flight_dynamics(&input));
        }
        debug!("pass 4: flight dynamics");
    }
}

/// Convenience wrapper around [`SystemProcessor::process`]
pub fn process(system: System, pack: &RulePack) -> System {
    SystemProcessor::new(pack).process(system)
}
