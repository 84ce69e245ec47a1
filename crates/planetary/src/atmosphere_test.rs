use std::collections::BTreeMap;

use approx::assert_relative_eq;
use celestial::{Archetype, Atmosphere, SeededRng};
use rulepack::RulePack;

use crate::atmosphere::{
    AtmosphereContext, PRIMORDIAL, atmosphere_retained, molar_mass, normalize, recalculate,
    select_atmosphere,
};

fn ctx(archetype: Archetype, mass_earth: f64, teq: f64) -> AtmosphereContext {
    AtmosphereContext {
        archetype,
        mass_earth,
        equilibrium_temp_k: teq,
        tidally_locked: false,
    }
}

#[test]
fn test_selected_mixture_is_normalized() {
    let pack = RulePack::standard().unwrap();
    let mut rng = SeededRng::from_seed_str("atmo");
    let mut found = 0;
    for _ in 0..200 {
        if let Some(atm) = select_atmosphere(&pack, &mut rng, &ctx(Archetype::Terrestrial, 1.0, 255.0)) {
            let total: f64 = atm.composition.values().sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-9);
            assert!(atm.pressure_bar > 0.0);
            assert!(atm.molar_mass > 0.0);
            found += 1;
        }
    }
    assert!(found > 100, "presence roll should usually pass: {}", found);
}

#[test]
fn test_tiny_bodies_are_airless() {
    let pack = RulePack::standard().unwrap();
    let mut rng = SeededRng::from_seed_str("tiny");
    for _ in 0..50 {
        assert!(select_atmosphere(&pack, &mut rng, &ctx(Archetype::Terrestrial, 0.001, 200.0)).is_none());
    }
}

#[test]
fn test_giant_without_match_gets_primordial() {
    let pack = RulePack::default();
    let mut rng = SeededRng::from_seed_str("giant");
    let atm = select_atmosphere(&pack, &mut rng, &ctx(Archetype::GasGiant, 318.0, 120.0)).unwrap();
    assert_eq!(atm.name, PRIMORDIAL);
    assert!(atm.fraction("H2") > 0.8);
    assert!(atm.pressure_bar >= 2000.0);
}

#[test]
fn test_tidal_lock_requirement() {
    let pack = RulePack::standard().unwrap();
    let mut rng = SeededRng::from_seed_str("lock");
    for _ in 0..200 {
        if let Some(atm) = select_atmosphere(&pack, &mut rng, &ctx(Archetype::Terrestrial, 0.015, 110.0)) {
            assert_ne!(atm.name, "sulfurous");
        }
    }
}

#[test]
fn test_normalize_is_a_fixed_point() {
    let mut mix = BTreeMap::from([
        ("N2".to_string(), 3.0),
        ("O2".to_string(), 1.0),
        ("Xx".to_string(), f64::NAN),
    ]);
    normalize(&mut mix);
    assert_eq!(mix.len(), 2);
    assert_relative_eq!(mix["N2"], 0.75);
    let once = mix.clone();
    normalize(&mut mix);
    assert_eq!(once, mix);
}

#[test]
fn test_molar_mass_skips_unknown_gas() {
    let pack = RulePack::standard().unwrap();
    let mix = BTreeMap::from([("N2".to_string(), 0.5), ("Unobtainium".to_string(), 0.5)]);
    assert_relative_eq!(molar_mass(&pack, &mix), 28.014);
}

#[test]
fn test_recalculate_airless() {
    let pack = RulePack::standard().unwrap();
    let mut atm = Atmosphere::default();
    assert_eq!(recalculate(&pack, &mut atm), 0.0);
    assert_eq!(atm.molar_mass, 0.0);
}

#[test]
fn test_retention_heuristic() {
    let pack = RulePack::standard().unwrap();
    assert!(atmosphere_retained(&pack, 0.5, 1.0));
    assert!(!atmosphere_retained(&pack, 0.0, 1.0));
}
