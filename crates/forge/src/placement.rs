//! Orbital placement strategy
//!
//! Finds the band of stable orbits around a host and lays planetary
//! slots into it, either from a Titius–Bode law or by geometric growth.

use celestial::{NodeId, NodeKind, RoleHint, SeededRng, System};
use planetary::zones::{
    SATELLITE_DENSITY, hill_radius, outer_limit, p_type_limit, roche_limit, s_type_limit,
    soot_line,
};
use rulepack::GenerationParams;
use units::{Length, Mass};

/// Fraction of the Hill sphere inside which moons stay bound
pub const MOON_HILL_FRACTION: f64 = 0.5;

/// Neighbouring planet orbits must differ by at least this ratio
pub const PLANET_SPACING: f64 = 1.2;

/// Radial band of stable orbits around one host
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementZone {
    pub host_id: NodeId,
    pub inner: Length,
    pub outer: Length,
}

impl PlacementZone {
    /// ln(outer / inner), zero for an empty band
    pub fn log_width(&self) -> f64 {
        let (inner, outer) = (self.inner.to_km(), self.outer.to_km());
        if inner <= 0.0 || outer <= inner {
            0.0
        } else {
            (outer / inner).ln()
        }
    }

    pub fn contains(&self, a: Length) -> bool {
        a >= self.inner && a <= self.outer
    }
}

/// The stable band around `host_id`.
///
/// Stars use Roche and soot limits inside and their outer system limit
/// outside, cut back to the S-type limit when they belong to a binary.
/// Barycenters use the P-type limit inside. Planets host moons out to half
/// their Hill sphere. Other nodes host nothing.
pub fn zone_for_host(system: &System, host_id: &NodeId, scale: f64) -> Option<PlacementZone> {
    let node = system.get(host_id)?;
    let (inner, outer) = match &node.kind {
        NodeKind::Barycenter(bary) => {
            let masses: Vec<Mass> = bary.member_ids.iter().map(|id| system.mass_of(id)).collect();
            let total: Mass = masses.iter().copied().sum();
            if total.is_degenerate() {
                return None;
            }
            let lightest = masses.iter().copied().fold(total, Mass::min);
            let luminosity: f64 = bary
                .member_ids
                .iter()
                .filter_map(|id| system.body(id))
                .map(|b| b.luminosity())
                .sum();
            let separation = binary_separation(system, host_id);
            let inner = p_type_limit(separation, 0.0, lightest / total).max(soot_line(luminosity));
            (inner, outer_limit(total) * scale)
        }
        NodeKind::Body(body) if body.is_star() => {
            let floor = roche_limit(body.radius, body.density(), SATELLITE_DENSITY)
                .max(soot_line(body.luminosity()));
            let mut outer = outer_limit(body.mass) * scale;
            if let Some((companion, total, separation)) = companion_of(system, host_id) {
                outer = outer.min(s_type_limit(separation, 0.0, companion / total));
            }
            (floor, outer)
        }
        NodeKind::Body(body) if body.role_hint == RoleHint::Planet => {
            let a = body.orbit.as_ref()?.semi_major_axis();
            let host_mass = node.parent_id.as_ref().map_or(Mass::zero(), |p| system.mass_of(p));
            let inner = roche_limit(body.radius, body.density(), SATELLITE_DENSITY);
            (inner, hill_radius(a, body.mass, host_mass) * MOON_HILL_FRACTION)
        }
        NodeKind::Body(_) => return None,
    };
    Some(PlacementZone {
        host_id: host_id.clone(),
        inner,
        outer,
    })
}

/// Stored separation of a barycenter, or the sum of its members' orbits
fn binary_separation(system: &System, bary_id: &NodeId) -> Length {
    let Some(bary) = system.get(bary_id).and_then(|n| n.as_barycenter()) else {
        return Length::zero();
    };
    if bary.separation > Length::zero() {
        return bary.separation;
    }
    bary.member_ids
        .iter()
        .filter_map(|id| system.get(id))
        .map(|n| n.orbital_distance())
        .sum()
}

/// Companion mass, pair mass and separation for a member of a binary pair
fn companion_of(system: &System, star_id: &NodeId) -> Option<(Mass, Mass, Length)> {
    let parent = system.get(star_id)?.parent_id.as_ref()?;
    let bary = system.get(parent)?.as_barycenter()?;
    if bary.member_ids.len() != 2 || !bary.member_ids.contains(star_id) {
        return None;
    }
    let other = bary.member_ids.iter().find(|id| *id != star_id)?;
    let companion = system.mass_of(other);
    let total = companion + system.mass_of(star_id);
    Some((companion, total, binary_separation(system, parent)))
}

/// Zones planets may occupy for the given stellar core, paired with the
/// share of planets each should receive.
///
/// Shares are proportional to each zone's usable log-width, so a tight
/// binary sends its planets into circumbinary orbits and a wide one keeps
/// them around the individual stars.
pub fn planetary_zones(system: &System, root: &NodeId, stars: &[NodeId], scale: f64) -> Vec<(PlacementZone, f64)> {
    let mut hosts = vec![root.clone()];
    hosts.extend(stars.iter().filter(|id| *id != root).cloned());
    hosts
        .iter()
        .filter_map(|id| zone_for_host(system, id, scale))
        .map(|zone| {
            let weight = zone.log_width();
            (zone, weight)
        })
        .filter(|(_, weight)| *weight > 0.0)
        .collect()
}

/// Splits `count` planets between weighted zones, one roll per planet
pub fn allocate(rng: &mut SeededRng, zones: &[(PlacementZone, f64)], count: usize) -> Vec<usize> {
    let mut counts = vec![0; zones.len()];
    for _ in 0..count {
        let weights = zones.iter().enumerate().map(|(i, (_, w))| (i, *w));
        if let Some(i) = rng.pick_weighted(weights) {
            counts[i] += 1;
        }
    }
    counts
}

/// Semi-major axes for `count` planets inside `zone`, ascending.
///
/// Candidate slots are shuffled and truncated so that some slots stay
/// empty, then sorted back into order and jittered one by one.
pub fn generate_slots(rng: &mut SeededRng, params: &GenerationParams, zone: &PlacementZone, count: usize) -> Vec<Length> {
    if count == 0 || zone.log_width() <= 0.0 {
        return Vec::new();
    }

    let (mut slots, jitter) = match &params.titius_bode {
        Some(law) => {
            let slots: Vec<Length> = law
                .sequence
                .iter()
                .map(|&n| Length::from_au(law.a + law.b * law.c.powi(n)))
                .filter(|a| zone.contains(*a))
                .collect();
            (slots, law.jitter)
        }
        None => (geometric_slots(rng, params, zone), params.slot_jitter),
    };

    rng.shuffle(&mut slots);
    slots.truncate(count);
    slots.sort_by(|a, b| a.to_km().total_cmp(&b.to_km()));
    for slot in &mut slots {
        let jittered = *slot * (1.0 + rng.range(-jitter, jitter));
        *slot = jittered.max(zone.inner).min(zone.outer);
    }
    slots
}

/// Each slot sits a random multiple beyond the previous one
fn geometric_slots(rng: &mut SeededRng, params: &GenerationParams, zone: &PlacementZone) -> Vec<Length> {
    let mut slots = Vec::new();
    let lower = params.slot_multiplier.min().max(1.01);
    let upper = params.slot_multiplier.max().max(lower);
    let mut current = zone.inner * rng.range(lower, upper);
    while current <= zone.outer {
        slots.push(current);
        current = current * rng.range(lower, upper);
    }
    slots
}

/// Ok when `a` keeps at least `spacing` from every sibling orbit around
/// `host_id`; otherwise the name of the first sibling in the way.
pub fn orbit_clears(system: &System, host_id: &NodeId, a: Length, spacing: f64) -> Result<(), String> {
    for sibling in system.children(host_id) {
        let Some(orbit) = sibling.as_body().and_then(|b| b.orbit.as_ref()) else {
            continue;
        };
        let ratio = a / orbit.semi_major_axis();
        if ratio < spacing && ratio > 1.0 / spacing {
            return Err(sibling.name.clone());
        }
    }
    Ok(())
}
