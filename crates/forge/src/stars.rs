//! Star and binary setup
//!
//! Builds the root of the node tree: a lone star, or a barycenter with
//! two stars on opposite sides of it.

use std::f64::consts::{PI, TAU};

use celestial::{
    Annulus, Barycenter, Node, NodeId, Orbit, OrbitalElements, RoleHint, SeededRng,
    StellarProperties, System, keplerian_mean_motion,
};
use celestial::kepler::normalize_angle;
use log::debug;
use planetary::physics::stellar_luminosity;
use rulepack::{RulePack, StarTemplate};
use units::constants::G;
use units::{Length, Mass};

use crate::context::GenerationContext;
use crate::error::{Error, Result};
use crate::factory::BodyConfig;
use crate::naming::{ring_name, star_suffix};

/// Classes a binary companion may take, hottest first
const MAIN_SEQUENCE: [&str; 7] = ["O", "B", "A", "F", "G", "K", "M"];

/// Tag carried by a black hole's accretion disk
pub const ACCRETION_DISK_TAG: &str = "accretion-disk";

/// What the rest of generation needs to know about the stellar core
#[derive(Debug, Clone, PartialEq)]
pub struct StarSetup {
    pub root: NodeId,
    pub stars: Vec<NodeId>,
    /// Total separation of a binary pair
    pub separation: Option<Length>,
}

impl StarSetup {
    pub fn is_binary(&self) -> bool {
        self.separation.is_some()
    }
}

/// Chooses the primary's class; an explicit choice must name a template.
pub fn choose_class(pack: &RulePack, rng: &mut SeededRng, star_type: Option<&str>) -> Result<String> {
    match star_type {
        Some(class) if pack.stars.contains_key(class) => Ok(class.to_string()),
        Some(class) => Err(Error::UnknownStarType(class.to_string())),
        None => Ok(pack
            .distribution("starClass")
            .and_then(|t| t.pick(rng))
            .unwrap_or("G")
            .to_string()),
    }
}

/// Sample mass ratio q = M2/M1 for a binary companion
///
/// Massive primaries draw from a flat distribution; solar-type and lighter
/// primaries favor low mass ratios.
pub fn sample_mass_ratio(rng: &mut SeededRng, primary_solar_masses: f64) -> f64 {
    match primary_solar_masses {
        m if m > 3.0 => rng.range(0.2, 1.0),
        _ => {
            let x = rng.next_float();
            0.2 + x * x * 0.8
        }
    }
}

/// Main-sequence class whose mass range holds `solar_masses`; M otherwise
pub fn companion_class(pack: &RulePack, solar_masses: f64) -> String {
    MAIN_SEQUENCE
        .iter()
        .find(|class| {
            pack.stars
                .get(**class)
                .is_some_and(|t| t.mass.contains(solar_masses))
        })
        .unwrap_or(&"M")
        .to_string()
}

pub fn setup_stars(
    ctx: &mut GenerationContext<'_>,
    system: &mut System,
    base_name: &str,
    star_type: Option<&str>,
) -> Result<StarSetup> {
    let pack = ctx.pack;
    let class = choose_class(pack, &mut ctx.rng, star_type)?;
    let template = pack.star_template(&class);
    let t = ctx.rng.next_float();
    let primary_mass = template.mass.lerp(t);

    if !ctx.rng.chance(pack.binary_probability(&class)) {
        let star = make_star(ctx, &class, &template, t, base_name, None);
        let id = star.id.clone();
        system.insert(star);
        add_accretion_disk(ctx, system, &id, &template);
        debug!("single {class} star '{base_name}'");
        return Ok(StarSetup {
            root: id.clone(),
            stars: vec![id],
            separation: None,
        });
    }

    let q = sample_mass_ratio(&mut ctx.rng, primary_mass);
    let companion = companion_class(pack, primary_mass * q);
    let companion_template = pack.star_template(&companion);
    let companion_mass = (primary_mass * q)
        .clamp(companion_template.mass.min(), companion_template.mass.max());
    let companion_t = position_in(companion_template.mass.min(), companion_template.mass.max(), companion_mass);
    let separation = Length::from_au(pack.separation_range(&class).sample_log(&mut ctx.rng) * ctx.scale);

    let bary_id = ctx.next_id();
    let primary = make_star(
        ctx,
        &class,
        &template,
        t,
        &format!("{base_name} {}", star_suffix(0)),
        Some(bary_id.clone()),
    );
    let secondary = make_star(
        ctx,
        &companion,
        &companion_template,
        companion_t,
        &format!("{base_name} {}", star_suffix(1)),
        Some(bary_id.clone()),
    );

    let m1 = primary.mass();
    let m2 = secondary.mass();
    let total = m1 + m2;
    let n = keplerian_mean_motion(G * total.to_kg(), separation);
    let phase = ctx.rng.range(0.0, TAU);

    let mut stars = Vec::with_capacity(2);
    for (mut node, other, anomaly) in [(primary, m2, phase), (secondary, m1, phase + PI)] {
        let mut elements = OrbitalElements::circular(separation * (other / total));
        elements.mean_anomaly = normalize_angle(anomaly);
        let mut orbit = Orbit::new(
            bary_id.clone(),
            G * other.to_kg().powi(3) / total.to_kg().powi(2),
            elements,
        );
        orbit.mean_motion = Some(n);
        if let Some(body) = node.as_body_mut() {
            body.orbit = Some(orbit);
        }
        stars.push(node.id.clone());
        system.insert(node);
    }
    // Root barycenter sits at the front of the arena
    system.nodes.shift_insert(
        0,
        bary_id.clone(),
        Node::barycenter(
            bary_id.clone(),
            base_name,
            Barycenter {
                member_ids: stars.clone(),
                effective_mass: total,
                separation,
                mean_motion: n,
            },
        ),
    );

    add_accretion_disk(ctx, system, &stars[0], &template);
    add_accretion_disk(ctx, system, &stars[1], &companion_template);
    debug!(
        "binary {class}+{companion} '{base_name}', separation {:.2} AU",
        separation.to_au()
    );
    Ok(StarSetup {
        root: bary_id,
        stars,
        separation: Some(separation),
    })
}

/// Linear position of `value` within [min, max], clamped to [0, 1]
fn position_in(min: f64, max: f64, value: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Draws a star at position `t` of its template, so mass, radius and
/// temperature move together.
fn make_star(
    ctx: &mut GenerationContext<'_>,
    class: &str,
    template: &StarTemplate,
    t: f64,
    name: &str,
    parent_id: Option<NodeId>,
) -> Node {
    let radius_solar = template.radius.lerp(t);
    let temperature_k = template.temperature.lerp(t);
    let config = BodyConfig::new(name, RoleHint::Star, parent_id)
        .with_mass(Mass::from_solar_masses(template.mass.lerp(t)))
        .with_radius(Length::from_solar_radii(radius_solar));
    let mut node = ctx.factory.create_body(&mut ctx.rng, config);
    if let Some(body) = node.as_body_mut() {
        body.stellar = Some(StellarProperties {
            spectral_class: class.to_string(),
            temperature_k,
            luminosity: stellar_luminosity(radius_solar, temperature_k),
            radiation_factor: template.radiation_factor,
        });
    }
    node
}

/// Active black holes carry a disk spanning a multiple of their radius.
fn add_accretion_disk(
    ctx: &mut GenerationContext<'_>,
    system: &mut System,
    star_id: &NodeId,
    template: &StarTemplate,
) {
    let Some(extent) = template.accretion_disk else {
        return;
    };
    let Some(star) = system.get(star_id) else {
        return;
    };
    let radius = star.as_body().map_or(Length::zero(), |b| b.radius);
    let config = BodyConfig::new(ring_name(&star.name), RoleHint::Ring, Some(star_id.clone()))
        .with_mass(star.mass() * 1e-9);

    let mut node = ctx.factory.create_body(&mut ctx.rng, config);
    let outer = extent.sample_log(&mut ctx.rng);
    if let Some(body) = node.as_body_mut() {
        body.annulus = Some(Annulus {
            inner: radius * extent.min(),
            outer: radius * outer.max(extent.min()),
        });
        body.add_tag(ACCRETION_DISK_TAG);
    }
    system.insert(node);
}
