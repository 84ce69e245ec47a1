//! Structural edits
//!
//! Each operation borrows the current system and returns an edited copy;
//! on failure the caller's system is untouched. Run the result through
//! [`system_processor::SystemProcessor::process`] afterwards.
//!
//! Edits draw randomness from `"{seed}:edit:{revision}"` and bump the
//! revision, so replaying the same edits reproduces the same system.

use celestial::{Archetype, NodeId, NodeKind, RoleHint, SeededRng, System};
use log::info;
use planetary::radiation::unshielded_radiation;
use planetary::temperature::{StellarSource, stellar_sources};
use planetary::zones::HabitableZone;
use rulepack::RulePack;
use units::Length;

use crate::bodies::{
    WorldSpec, count_children, generate_belt, generate_ring, generate_world,
};
use crate::context::GenerationContext;
use crate::error::{Error, Result};
use crate::naming::{belt_name, first_free_name, moon_name, planet_name, replace_prefix};
use crate::placement::{PlacementZone, orbit_clears, zone_for_host};

pub use crate::placement::PLANET_SPACING;

/// Step between candidate orbits when searching for a free slot
const SEARCH_STEP: f64 = 1.08;

/// A manual body addition
#[derive(Debug, Clone, PartialEq)]
pub struct AddBodyRequest {
    pub host_id: NodeId,
    pub role: RoleHint,
    pub archetype: Option<Archetype>,
    pub semi_major_axis: Option<Length>,
    pub name: Option<String>,
}

impl AddBodyRequest {
    pub fn new(host_id: NodeId, role: RoleHint) -> Self {
        Self {
            host_id,
            role,
            archetype: None,
            semi_major_axis: None,
            name: None,
        }
    }
}

fn edit_context<'a>(system: &System, pack: &'a RulePack) -> GenerationContext<'a> {
    let rng = SeededRng::from_seed_str(&format!("{}:edit:{}", system.seed, system.revision));
    GenerationContext::new(pack, rng, system.age_gyr, 1.0)
}

/// Adds a planet, moon, belt or ring to `request.host_id`.
///
/// Fails when the host is missing or massless, when the role cannot orbit
/// that host, or when no orbit clears the host's existing children.
pub fn add_planetary_body(system: &System, pack: &RulePack, request: AddBodyRequest) -> Result<System> {
    let host = system
        .get(&request.host_id)
        .ok_or_else(|| Error::MissingHost(request.host_id.clone()))?;
    if system.mass_of(&request.host_id).is_degenerate() {
        return Err(Error::ZeroHostMass(request.host_id.clone()));
    }

    let host_is_planet = host.as_body().is_some_and(|b| b.role_hint == RoleHint::Planet);
    let host_is_stellar = match &host.kind {
        NodeKind::Barycenter(_) => true,
        NodeKind::Body(body) => body.is_star(),
    };
    match request.role {
        RoleHint::Star => return Err(Error::InvalidEdit("stars cannot be added".into())),
        RoleHint::Moon | RoleHint::Ring if !host_is_planet => {
            return Err(Error::InvalidEdit(format!(
                "a {} can only be added to a planet",
                request.role.as_str()
            )));
        }
        RoleHint::Planet | RoleHint::Belt if !host_is_stellar => {
            return Err(Error::InvalidEdit(format!(
                "a {} can only orbit a star or barycenter",
                request.role.as_str()
            )));
        }
        _ => {}
    }

    let host_name = host.name.clone();
    let user_named = request.name.is_some();
    let mut edited = system.clone();
    let mut ctx = edit_context(system, pack);

    let id = match request.role {
        RoleHint::Ring => {
            if count_children(system, &request.host_id, RoleHint::Ring) > 0 {
                return Err(Error::InvalidEdit(format!("'{host_name}' already has a ring")));
            }
            generate_ring(&mut ctx, &mut edited, &request.host_id, request.name)
                .ok_or_else(|| Error::MissingHost(request.host_id.clone()))?
        }
        RoleHint::Belt => {
            let a = choose_orbit(system, pack, &request.host_id, request.semi_major_axis, RoleHint::Belt)?;
            let taken = sibling_names(system, &request.host_id);
            let name = request
                .name
                .unwrap_or_else(|| first_free_name(&taken, |i| belt_name(&host_name, i)));
            generate_belt(&mut ctx, &mut edited, &request.host_id, a, name)
        }
        role => {
            let a = choose_orbit(system, pack, &request.host_id, request.semi_major_axis, role)?;
            let taken = sibling_names(system, &request.host_id);
            let name = request.name.unwrap_or_else(|| match role {
                RoleHint::Moon => first_free_name(&taken, |i| moon_name(&host_name, i)),
                _ => first_free_name(&taken, |i| planet_name(&host_name, i)),
            });
            let mut spec = WorldSpec::new(request.host_id.clone(), role, a, name);
            spec.archetype = request.archetype;
            spec.user_named = user_named;
            spec.migrate = false;
            generate_world(&mut ctx, &mut edited, spec, false)
        }
    };
    if let Some(node) = edited.get_mut(&id) {
        node.user_named = user_named;
    }

    edited.revision += 1;
    info!(
        "added {} '{}' to '{}' (revision {})",
        request.role.as_str(),
        edited.get(&id).map_or("", |n| n.name.as_str()),
        host_name,
        edited.revision
    );
    Ok(edited)
}

/// Places an Earth analog inside the habitable zone of a star or binary.
pub fn add_habitable_planet(system: &System, pack: &RulePack, host_id: &NodeId) -> Result<System> {
    let host = system
        .get(host_id)
        .ok_or_else(|| Error::MissingHost(host_id.clone()))?;
    if system.mass_of(host_id).is_degenerate() {
        return Err(Error::ZeroHostMass(host_id.clone()));
    }
    let luminosity: f64 = match &host.kind {
        NodeKind::Body(body) if body.is_star() => body.luminosity(),
        NodeKind::Barycenter(bary) => bary
            .member_ids
            .iter()
            .filter_map(|id| system.body(id))
            .map(|b| b.luminosity())
            .sum(),
        NodeKind::Body(_) => {
            return Err(Error::InvalidEdit(
                "habitable planets orbit a star or barycenter".into(),
            ));
        }
    };
    if luminosity <= 0.0 {
        return Err(Error::NoStableOrbit("host emits no light".into()));
    }

    let habitable = HabitableZone::from_luminosity(luminosity);
    let zone = zone_for_host(system, host_id, 1.0);
    // Search from the Earth-equivalent orbit, where the flux is one solar constant
    let earth_equivalent = Length::from_au(luminosity.sqrt());
    let candidates = search_outward(earth_equivalent, habitable.inner, habitable.outer);
    let a = candidates
        .into_iter()
        .filter(|a| zone.as_ref().is_none_or(|z| z.contains(*a)))
        .find(|a| orbit_clears(system, host_id, *a, PLANET_SPACING).is_ok())
        .ok_or_else(|| Error::NoStableOrbit("habitable zone is crowded".into()))?;

    // Exposure at the new orbit: every star's distance to the host plus a
    let sources: Vec<StellarSource> = stellar_sources(system, host_id)
        .into_iter()
        .map(|s| StellarSource {
            distance: s.distance + a,
            ..s
        })
        .collect();
    let radiation = unshielded_radiation(&sources);
    let limit = pack.params.habitable_radiation_limit;
    if radiation > limit {
        return Err(Error::RadiationExceeded { radiation, limit });
    }

    let host_name = host.name.clone();
    let mut edited = system.clone();
    let mut ctx = edit_context(system, pack);
    let name = first_free_name(&sibling_names(system, host_id), |i| planet_name(&host_name, i));
    let mut spec = WorldSpec::new(host_id.clone(), RoleHint::Planet, a, name);
    spec.earth_like = true;
    let id = generate_world(&mut ctx, &mut edited, spec, false);

    edited.revision += 1;
    info!(
        "added habitable planet '{}' at {:.3} AU (revision {})",
        edited.get(&id).map_or("", |n| n.name.as_str()),
        a.to_au(),
        edited.revision
    );
    Ok(edited)
}

/// Removes a node with its whole subtree and prunes barycenter members.
pub fn delete_node(system: &System, id: &NodeId) -> Result<System> {
    let node = system.get(id).ok_or_else(|| Error::NodeNotFound(id.clone()))?;
    if node.parent_id.is_none() {
        return Err(Error::RootDeletion);
    }

    let mut removed = system.descendants(id);
    removed.push(id.clone());
    let mut edited = system.clone();
    edited.nodes.retain(|node_id, _| !removed.contains(node_id));
    for node in edited.nodes.values_mut() {
        if let Some(bary) = node.as_barycenter_mut() {
            bary.member_ids.retain(|m| !removed.contains(m));
        }
    }

    edited.revision += 1;
    info!(
        "deleted '{}' and {} descendants (revision {})",
        node.name,
        removed.len() - 1,
        edited.revision
    );
    Ok(edited)
}

/// Renames a node and carries the new name into every auto-named
/// descendant whose name was derived from the old one.
pub fn rename_node(system: &System, id: &NodeId, name: &str) -> Result<System> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidEdit("names cannot be empty".into()));
    }
    let old = system
        .get(id)
        .map(|n| n.name.clone())
        .ok_or_else(|| Error::NodeNotFound(id.clone()))?;

    let mut edited = system.clone();
    if let Some(node) = edited.get_mut(id) {
        node.name = name.to_string();
        node.user_named = true;
    }
    let mut renamed = 0;
    for descendant in system.descendants(id) {
        let Some(node) = edited.get_mut(&descendant) else { continue };
        if node.user_named {
            continue;
        }
        if let Some(new_name) = replace_prefix(&node.name, &old, name) {
            node.name = new_name;
            renamed += 1;
        }
    }

    edited.revision += 1;
    info!("renamed '{old}' to '{name}' with {renamed} descendants (revision {})", edited.revision);
    Ok(edited)
}

/// The requested orbit if it is free, otherwise the innermost free slot
fn choose_orbit(
    system: &System,
    pack: &RulePack,
    host_id: &NodeId,
    requested: Option<Length>,
    role: RoleHint,
) -> Result<Length> {
    let zone = zone_for_host(system, host_id, 1.0).ok_or_else(|| {
        Error::NoStableOrbit(format!("'{host_id}' has no stable orbital zone"))
    })?;
    let spacing = match role {
        RoleHint::Moon => pack.params.moon_spacing.min().max(1.0),
        _ => PLANET_SPACING,
    };

    if let Some(a) = requested {
        if !zone.contains(a) {
            return Err(Error::NoStableOrbit(format!(
                "{:.4} AU lies outside the stable zone {:.4}–{:.4} AU",
                a.to_au(),
                zone.inner.to_au(),
                zone.outer.to_au()
            )));
        }
        return orbit_clears(system, host_id, a, spacing)
            .map(|()| a)
            .map_err(|neighbour| Error::NoStableOrbit(format!("orbit overlaps '{neighbour}'")));
    }

    free_slot(system, &zone, spacing)
        .ok_or_else(|| Error::NoStableOrbit("no free slot around the host".into()))
}

fn free_slot(system: &System, zone: &PlacementZone, spacing: f64) -> Option<Length> {
    if zone.log_width() <= 0.0 {
        return None;
    }
    let mut a = zone.inner * spacing;
    while a <= zone.outer {
        if orbit_clears(system, &zone.host_id, a, spacing).is_ok() {
            return Some(a);
        }
        a = a * SEARCH_STEP;
    }
    None
}

fn sibling_names(system: &System, host_id: &NodeId) -> Vec<String> {
    system.children(host_id).iter().map(|n| n.name.clone()).collect()
}

/// Candidate orbits from `center` alternating outward and inward within
/// [inner, outer]
fn search_outward(center: Length, inner: Length, outer: Length) -> Vec<Length> {
    let mut candidates = vec![center];
    let mut step = SEARCH_STEP;
    loop {
        let out = center * step;
        let inn = center / step;
        let out_ok = out <= outer;
        let in_ok = inn >= inner;
        if !out_ok && !in_ok {
            break;
        }
        if out_ok {
            candidates.push(out);
        }
        if in_ok {
            candidates.push(inn);
        }
        step *= SEARCH_STEP;
    }
    candidates
}
