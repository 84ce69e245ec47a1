use celestial::{Archetype, CelestialBody, RoleHint};
use rulepack::RulePack;
use units::{Length, Mass};

use crate::classification::{classify_body, fallback_class};
use crate::features::{BodyFeatures, FeatureContext};

fn body(archetype: Archetype, mass_earth: f64, radius_earth: f64) -> CelestialBody {
    let mut b = CelestialBody::empty(RoleHint::Planet);
    b.archetype = Some(archetype);
    b.mass = Mass::from_earth_masses(mass_earth);
    b.radius = Length::from_earth_radii(radius_earth);
    b.physics.surface_temp_k = 150.0;
    b.physics.equilibrium_temp_k = 150.0;
    b
}

fn classify(b: &CelestialBody, ctx: FeatureContext) -> Vec<String> {
    let pack = RulePack::standard().unwrap();
    classify_body(b, &BodyFeatures::build(b, ctx), &pack)
}

fn base_count(classes: &[String]) -> usize {
    let pack = RulePack::standard().unwrap();
    classes
        .iter()
        .filter(|c| pack.classifier.exclusive.contains(c))
        .count()
}

#[test]
fn test_jupiter_is_gas_giant_and_ringed() {
    let jupiter = body(Archetype::GasGiant, 318.0, 11.2);
    let classes = classify(
        &jupiter,
        FeatureContext {
            host_is_star: true,
            has_ring_child: true,
        },
    );
    assert_eq!(classes[0], "gas-giant");
    assert!(classes.contains(&"ringed".to_string()));
    assert_eq!(base_count(&classes), 1);
}

#[test]
fn test_super_jupiter_beats_gas_giant() {
    let heavy = body(Archetype::GasGiant, 3000.0, 12.0);
    let classes = classify(&heavy, FeatureContext::default());
    assert_eq!(classes[0], "super-jupiter");
    assert!(!classes.contains(&"gas-giant".to_string()));
}

#[test]
fn test_chthonian_tag_overrides_archetype() {
    let mut remnant = body(Archetype::GasGiant, 30.0, 2.0);
    remnant.add_tag("chthonian");
    let classes = classify(&remnant, FeatureContext::default());
    assert_eq!(classes[0], "chthonian");
    assert_eq!(base_count(&classes), 1);
}

#[test]
fn test_class_cap() {
    let pack = RulePack::standard().unwrap();
    let mut world = body(Archetype::Terrestrial, 1.0, 1.0);
    world.physics.surface_temp_k = 1500.0;
    world.physics.tidal_heating_k = 200.0;
    world.physics.greenhouse_k = 400.0;
    world.physics.radiation = 500.0;
    world.tidally_locked = true;
    let classes = classify(
        &world,
        FeatureContext {
            host_is_star: true,
            has_ring_child: true,
        },
    );
    assert_eq!(classes.len(), pack.classifier.max_classes);
    assert_eq!(base_count(&classes), 1);
}

#[test]
fn test_empty_rulepack_uses_mass_fallback() {
    let pack = RulePack::default();
    let earth = body(Archetype::Terrestrial, 1.0, 1.0);
    let classes = classify_body(&earth, &BodyFeatures::build(&earth, FeatureContext::default()), &pack);
    assert_eq!(classes, vec!["terrestrial".to_string()]);

    let mut belt = CelestialBody::empty(RoleHint::Belt);
    belt.mass = Mass::from_earth_masses(0.0005);
    assert_eq!(fallback_class(&belt, &pack), "asteroid-belt");
}
