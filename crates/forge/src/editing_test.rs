use celestial::{
    Archetype, Barycenter, CelestialBody, Node, NodeId, Orbit, OrbitalElements, RoleHint, System,
};
use rulepack::RulePack;
use units::constants::G;
use units::{Length, Mass};

use crate::editing::{
    AddBodyRequest, PLANET_SPACING, add_habitable_planet, add_planetary_body, delete_node,
    rename_node,
};
use crate::error::Error;

fn pack() -> RulePack {
    RulePack::standard().unwrap()
}

fn sun() -> Node {
    let mut body = CelestialBody::empty(RoleHint::Star);
    body.mass = Mass::from_solar_masses(1.0);
    body.radius = Length::from_solar_radii(1.0);
    Node::body(NodeId::new("sun"), "Sol", None, body)
}

fn planet(id: &str, name: &str, parent: &str, a_au: f64) -> Node {
    let mut body = CelestialBody::empty(RoleHint::Planet);
    body.archetype = Some(Archetype::Terrestrial);
    body.mass = Mass::from_earth_masses(1.0);
    body.radius = Length::from_earth_radii(1.0);
    body.orbit = Some(Orbit::new(
        NodeId::new(parent),
        G * Mass::from_solar_masses(1.0).to_kg(),
        OrbitalElements::circular(Length::from_au(a_au)),
    ));
    Node::body(NodeId::new(id), name, Some(NodeId::new(parent)), body)
}

fn moon(id: &str, name: &str, parent: &str) -> Node {
    let mut body = CelestialBody::empty(RoleHint::Moon);
    body.mass = Mass::from_earth_masses(0.0123);
    body.radius = Length::from_km(1737.0);
    body.orbit = Some(Orbit::new(
        NodeId::new(parent),
        G * Mass::from_earth_masses(1.0).to_kg(),
        OrbitalElements::circular(Length::from_km(384_400.0)),
    ));
    Node::body(NodeId::new(id), name, Some(NodeId::new(parent)), body)
}

fn sol() -> System {
    let mut system = System::new("editing", "Sol", 4.6);
    system.insert(sun());
    system.insert(planet("earth", "Sol b", "sun", 1.0));
    system.insert(moon("luna", "Sol b I", "earth"));
    system
}

/// Ids present in `after` but not in `before`
fn added(before: &System, after: &System) -> Vec<NodeId> {
    after
        .nodes
        .keys()
        .filter(|id| !before.nodes.contains_key(*id))
        .cloned()
        .collect()
}

#[test]
fn test_add_planet_at_requested_orbit() {
    let system = sol();
    let mut request = AddBodyRequest::new(NodeId::new("sun"), RoleHint::Planet);
    request.semi_major_axis = Some(Length::from_au(3.0));
    request.archetype = Some(Archetype::GasGiant);
    let edited = add_planetary_body(&system, &pack(), request).unwrap();

    assert_eq!(edited.revision, system.revision + 1);
    let new = added(&system, &edited);
    assert_eq!(new.len(), 1);
    let node = edited.get(&new[0]).unwrap();
    assert_eq!(node.name, "Sol c");
    assert!(!node.user_named);
    let body = node.as_body().unwrap();
    assert_eq!(body.archetype, Some(Archetype::GasGiant));
    let orbit = body.orbit.as_ref().unwrap();
    assert_eq!(orbit.host_id, NodeId::new("sun"));
    // Hand-placed giants stay where they were put
    assert_eq!(orbit.semi_major_axis(), Length::from_au(3.0));
    assert!(!body.has_tag("migrated"));
}

#[test]
fn test_add_planet_finds_a_free_slot() {
    let system = sol();
    let edited = add_planetary_body(
        &system,
        &pack(),
        AddBodyRequest::new(NodeId::new("sun"), RoleHint::Planet),
    )
    .unwrap();
    let new = added(&system, &edited);
    let a = edited.get(&new[0]).unwrap().orbital_distance();
    let ratio = a / Length::from_au(1.0);
    assert!(!(1.0 / PLANET_SPACING..PLANET_SPACING).contains(&ratio), "ratio {ratio}");
}

#[test]
fn test_overlapping_orbit_is_rejected() {
    let system = sol();
    let mut request = AddBodyRequest::new(NodeId::new("sun"), RoleHint::Planet);
    request.semi_major_axis = Some(Length::from_au(1.1));
    let result = add_planetary_body(&system, &pack(), request);
    assert!(matches!(result, Err(Error::NoStableOrbit(reason)) if reason.contains("Sol b")));
}

#[test]
fn test_add_body_validates_host() {
    let system = sol();
    let pack = pack();

    let missing = AddBodyRequest::new(NodeId::new("ghost"), RoleHint::Planet);
    assert!(matches!(
        add_planetary_body(&system, &pack, missing),
        Err(Error::MissingHost(_))
    ));

    let moon_on_star = AddBodyRequest::new(NodeId::new("sun"), RoleHint::Moon);
    assert!(matches!(
        add_planetary_body(&system, &pack, moon_on_star),
        Err(Error::InvalidEdit(_))
    ));

    let belt_on_planet = AddBodyRequest::new(NodeId::new("earth"), RoleHint::Belt);
    assert!(matches!(
        add_planetary_body(&system, &pack, belt_on_planet),
        Err(Error::InvalidEdit(_))
    ));

    let mut massless = sol();
    massless.body_mut(&NodeId::new("sun")).unwrap().mass = Mass::zero();
    let request = AddBodyRequest::new(NodeId::new("sun"), RoleHint::Planet);
    assert!(matches!(
        add_planetary_body(&massless, &pack, request),
        Err(Error::ZeroHostMass(_))
    ));
}

#[test]
fn test_add_moon_respects_caps_and_naming() {
    let system = sol();
    let edited = add_planetary_body(
        &system,
        &pack(),
        AddBodyRequest::new(NodeId::new("earth"), RoleHint::Moon),
    )
    .unwrap();

    let new = added(&system, &edited);
    let node = edited.get(&new[0]).unwrap();
    assert_eq!(node.name, "Sol b II");
    let body = node.as_body().unwrap();
    let earth = edited.body(&NodeId::new("earth")).unwrap();
    assert!(body.mass.to_kg() <= earth.mass.to_kg() * 0.05);
    assert!(body.radius.to_km() <= earth.radius.to_km() * 0.5);
}

#[test]
fn test_single_ring_per_planet() {
    let system = sol();
    let pack = pack();
    let mut request = AddBodyRequest::new(NodeId::new("earth"), RoleHint::Ring);
    request.name = Some("Halo".into());
    let ringed = add_planetary_body(&system, &pack, request.clone()).unwrap();

    let new = added(&system, &ringed);
    let ring = ringed.get(&new[0]).unwrap();
    assert_eq!(ring.name, "Halo");
    assert!(ring.user_named);
    assert!(ring.as_body().unwrap().annulus.is_some());

    assert!(matches!(
        add_planetary_body(&ringed, &pack, request),
        Err(Error::InvalidEdit(_))
    ));
}

#[test]
fn test_add_habitable_planet() {
    let system = sol();
    let mut crowded_free = system.clone();
    crowded_free.nodes.shift_remove(&NodeId::new("luna"));
    crowded_free.nodes.shift_remove(&NodeId::new("earth"));

    let edited = add_habitable_planet(&crowded_free, &pack(), &NodeId::new("sun")).unwrap();
    let new = added(&crowded_free, &edited);
    assert_eq!(new.len(), 1);
    let node = edited.get(&new[0]).unwrap();
    let body = node.as_body().unwrap();
    assert_eq!(body.archetype, Some(Archetype::Terrestrial));
    assert!(body.atmosphere.is_present());
    assert!(body.hydrosphere.is_present());

    let a = node.orbital_distance().to_au();
    assert!((1.0f64 / 1.1).sqrt() <= a && a <= (1.0f64 / 0.36).sqrt(), "a = {a}");
}

#[test]
fn test_crowded_habitable_zone() {
    let mut system = System::new("crowded", "Sol", 4.6);
    system.insert(sun());
    for (i, a) in [0.9, 1.05, 1.25, 1.5, 1.75].into_iter().enumerate() {
        system.insert(planet(&format!("p{i}"), &format!("p{i}"), "sun", a));
    }

    let result = add_habitable_planet(&system, &pack(), &NodeId::new("sun"));
    assert!(matches!(result, Err(Error::NoStableOrbit(reason)) if reason == "habitable zone is crowded"));
}

#[test]
fn test_irradiated_habitable_zone() {
    let mut pack = pack();
    pack.params.habitable_radiation_limit = 1.0;
    let mut system = System::new("hot", "Sol", 4.6);
    system.insert(sun());

    let result = add_habitable_planet(&system, &pack, &NodeId::new("sun"));
    assert!(matches!(result, Err(Error::RadiationExceeded { .. })));
}

#[test]
fn test_habitable_planet_needs_a_stellar_host() {
    let result = add_habitable_planet(&sol(), &pack(), &NodeId::new("earth"));
    assert!(matches!(result, Err(Error::InvalidEdit(_))));
}

#[test]
fn test_edits_replay_identically() {
    let system = sol();
    let pack = pack();
    let request = AddBodyRequest::new(NodeId::new("sun"), RoleHint::Planet);
    let a = add_planetary_body(&system, &pack, request.clone()).unwrap();
    let b = add_planetary_body(&system, &pack, request).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_delete_cascades() {
    let system = sol();
    let edited = delete_node(&system, &NodeId::new("earth")).unwrap();

    assert_eq!(edited.nodes.len(), 1);
    assert!(edited.get(&NodeId::new("luna")).is_none());
    assert_eq!(edited.revision, 1);
    assert_eq!(system.nodes.len(), 3);
}

#[test]
fn test_delete_prunes_barycenter_members() {
    let mut system = System::new("pair", "Pair", 4.6);
    system.insert(Node::barycenter(
        NodeId::new("bary"),
        "Pair",
        Barycenter {
            member_ids: vec![NodeId::new("sun"), NodeId::new("earth")],
            effective_mass: Mass::from_solar_masses(1.0),
            separation: Length::from_au(1.0),
            mean_motion: 0.0,
        },
    ));
    let mut star = sun();
    star.parent_id = Some(NodeId::new("bary"));
    system.insert(star);
    system.insert(planet("earth", "Pair b", "bary", 1.0));

    let edited = delete_node(&system, &NodeId::new("earth")).unwrap();
    let bary = edited.get(&NodeId::new("bary")).unwrap().as_barycenter().unwrap();
    assert_eq!(bary.member_ids, vec![NodeId::new("sun")]);
}

#[test]
fn test_delete_guards() {
    let system = sol();
    assert!(matches!(delete_node(&system, &NodeId::new("sun")), Err(Error::RootDeletion)));
    assert!(matches!(
        delete_node(&system, &NodeId::new("ghost")),
        Err(Error::NodeNotFound(_))
    ));
}

/// Names of `host`'s children, sorted
fn child_names(system: &System, host: &str) -> Vec<String> {
    let mut names: Vec<String> = system
        .children(&NodeId::new(host))
        .iter()
        .map(|n| n.name.clone())
        .collect();
    names.sort();
    names
}

#[test]
fn test_added_planets_reuse_only_freed_letters() {
    let mut system = sol();
    system.insert(planet("mars", "Sol c", "sun", 1.52));
    let pack = pack();

    let system = delete_node(&system, &NodeId::new("earth")).unwrap();
    let request = AddBodyRequest::new(NodeId::new("sun"), RoleHint::Planet);
    let system = add_planetary_body(&system, &pack, request.clone()).unwrap();
    assert_eq!(child_names(&system, "sun"), ["Sol b", "Sol c"]);

    let system = add_planetary_body(&system, &pack, request).unwrap();
    assert_eq!(child_names(&system, "sun"), ["Sol b", "Sol c", "Sol d"]);
}

#[test]
fn test_added_moons_skip_numerals_in_use() {
    let mut system = sol();
    let mut deimos = moon("deimos", "Sol b II", "earth");
    if let Some(orbit) = deimos.as_body_mut().and_then(|b| b.orbit.as_mut()) {
        orbit.elements.semi_major_axis = Length::from_km(200_000.0);
    }
    system.insert(deimos);
    let system = delete_node(&system, &NodeId::new("luna")).unwrap();

    let request = AddBodyRequest::new(NodeId::new("earth"), RoleHint::Moon);
    let edited = add_planetary_body(&system, &pack(), request).unwrap();
    assert_eq!(child_names(&edited, "earth"), ["Sol b I", "Sol b II"]);
}

#[test]
fn test_habitable_planet_takes_a_free_letter() {
    let mut system = System::new("editing", "Sol", 4.6);
    system.insert(sun());
    system.insert(planet("venus", "Sol c", "sun", 0.72));
    let edited = add_habitable_planet(&system, &pack(), &NodeId::new("sun")).unwrap();
    assert_eq!(child_names(&edited, "sun"), ["Sol b", "Sol c"]);
}

#[test]
fn test_rename_propagates_to_auto_named_descendants() {
    let mut system = sol();
    system.insert(planet("mars", "Sol c", "sun", 1.5));
    system.insert(moon("phobos", "Sol c I", "mars"));
    let mut named = moon("deimos", "Deimos", "mars");
    named.user_named = true;
    system.insert(named);

    let edited = rename_node(&system, &NodeId::new("sun"), "Helios").unwrap();
    let name = |id: &str| edited.get(&NodeId::new(id)).unwrap().name.clone();
    assert_eq!(name("sun"), "Helios");
    assert_eq!(name("earth"), "Helios b");
    assert_eq!(name("luna"), "Helios b I");
    assert_eq!(name("phobos"), "Helios c I");
    assert_eq!(name("deimos"), "Deimos");
    assert!(edited.get(&NodeId::new("sun")).unwrap().user_named);
    assert!(!edited.get(&NodeId::new("earth")).unwrap().user_named);
}

#[test]
fn test_user_named_descendants_keep_their_subtree() {
    let mut system = sol();
    system.get_mut(&NodeId::new("earth")).unwrap().user_named = true;
    system.get_mut(&NodeId::new("earth")).unwrap().name = "Terra".into();

    let edited = rename_node(&system, &NodeId::new("sun"), "Helios").unwrap();
    assert_eq!(edited.get(&NodeId::new("earth")).unwrap().name, "Terra");
}

#[test]
fn test_rename_guards() {
    let system = sol();
    assert!(matches!(
        rename_node(&system, &NodeId::new("ghost"), "X"),
        Err(Error::NodeNotFound(_))
    ));
    assert!(matches!(
        rename_node(&system, &NodeId::new("sun"), "   "),
        Err(Error::InvalidEdit(_))
    ));
}
