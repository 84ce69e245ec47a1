use approx::assert_relative_eq;
use celestial::{
    Archetype, CelestialBody, Node, NodeId, Orbit, OrbitalElements, RoleHint, SeededRng, System,
};
use rulepack::RulePack;
use units::constants::G;
use units::{Length, Mass};

use crate::bodies::{WorldSpec, generate_world};
use crate::context::GenerationContext;

fn migrating_pack() -> RulePack {
    let mut pack = RulePack::standard().unwrap();
    pack.params.migration_chance = 1.0;
    pack
}

fn sun_system() -> System {
    let mut body = CelestialBody::empty(RoleHint::Star);
    body.mass = Mass::from_solar_masses(1.0);
    body.radius = Length::from_solar_radii(1.0);
    let mut system = System::new("bodies", "Sol", 4.6);
    system.insert(Node::body(NodeId::new("sun"), "Sol", None, body));
    system
}

fn add_rock(system: &mut System, index: usize, a_au: f64) {
    let mut body = CelestialBody::empty(RoleHint::Planet);
    body.archetype = Some(Archetype::Terrestrial);
    body.mass = Mass::from_earth_masses(0.5);
    body.radius = Length::from_earth_radii(0.8);
    body.orbit = Some(Orbit::new(
        NodeId::new("sun"),
        G * Mass::from_solar_masses(1.0).to_kg(),
        OrbitalElements::circular(Length::from_au(a_au)),
    ));
    let id = format!("rock-{index}");
    system.insert(Node::body(NodeId::new(&id), id.as_str(), Some(NodeId::new("sun")), body));
}

fn giant_at_one_au(pack: &RulePack, system: &mut System, seed: &str) -> NodeId {
    let mut ctx = GenerationContext::new(pack, SeededRng::from_seed_str(seed), 4.6, 1.0);
    let mut spec = WorldSpec::new(NodeId::new("sun"), RoleHint::Planet, Length::from_au(1.0), "Sol x");
    spec.archetype = Some(Archetype::GasGiant);
    generate_world(&mut ctx, system, spec, false)
}

#[test]
fn test_giants_migrate_into_an_empty_inner_system() {
    let pack = migrating_pack();
    for i in 0..10 {
        let mut system = sun_system();
        let id = giant_at_one_au(&pack, &mut system, &format!("empty-{i}"));
        let node = system.get(&id).unwrap();
        let a = node.orbital_distance().to_au();
        assert!((0.02..=0.1 + 1e-9).contains(&a), "a = {a}");
        assert!(node.as_body().unwrap().tags.iter().any(|t| t == "hot-jupiter"));
    }
}

#[test]
fn test_migration_never_lands_beside_a_sibling() {
    let pack = migrating_pack();
    for i in 0..10 {
        let mut system = sun_system();
        // Rocks every factor 1.15 cover the whole hot-Jupiter band
        let mut a = 0.018;
        let mut index = 0;
        while a < 0.12 {
            add_rock(&mut system, index, a);
            a *= 1.15;
            index += 1;
        }

        let id = giant_at_one_au(&pack, &mut system, &format!("crowded-{i}"));
        let node = system.get(&id).unwrap();
        assert_relative_eq!(node.orbital_distance().to_au(), 1.0, epsilon = 1e-12);
        assert!(!node.as_body().unwrap().tags.iter().any(|t| t == "migrated"));
    }
}
