use approx::assert_relative_eq;
use celestial::{Archetype, SeededRng};

use crate::error::Error;
use crate::pack::RulePack;
use crate::table::Span;

#[test]
fn test_standard_pack_loads() {
    let pack = RulePack::standard().unwrap();
    assert_eq!(pack.id, "standard");
    assert!(pack.distribution("starClass").is_some());
    assert!(pack.stars.contains_key("BH"));
    assert!(pack.star_template("BH").accretion_disk.is_some());
    assert_eq!(pack.planets.len(), 3);
    assert!(pack.atmosphere("venusian").is_some());
    assert!(!pack.classifier.rules.is_empty());
    assert_relative_eq!(pack.molar_mass("N2").unwrap(), 28.014);
}

#[test]
fn test_partial_pack_falls_back() {
    let pack = RulePack::from_json_str(r#"{"id":"tiny","params":{"beltChance":0.5}}"#).unwrap();
    assert_relative_eq!(pack.params.belt_chance, 0.5);
    // Untouched fields keep their defaults
    assert_relative_eq!(pack.params.frost_line_au, 2.7);
    assert!(pack.distribution("starClass").is_none());
    assert_eq!(pack.star_template("G").mass, Span(0.8, 1.04));
    assert_eq!(
        pack.planet_template(Archetype::GasGiant).mass_earth,
        Span(50.0, 4000.0)
    );
    assert_eq!(pack.binary_probability("G"), 0.0);
    assert_eq!(pack.pressure_fallback(Archetype::IceGiant), Span(1200.0, 10_000.0));
}

#[test]
fn test_rejects_negative_weights() {
    let err = RulePack::from_json_str(r#"{"distributions":{"starClass":{"G":-1}}}"#).unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));
}

#[test]
fn test_rejects_malformed_json() {
    let err = RulePack::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_weighted_table_pick_is_deterministic() {
    let pack = RulePack::standard().unwrap();
    let table = pack.distribution("starClass").unwrap();
    let mut a = SeededRng::from_seed_str("pick");
    let mut b = SeededRng::from_seed_str("pick");
    for _ in 0..50 {
        assert_eq!(table.pick(&mut a), table.pick(&mut b));
    }
}

#[test]
fn test_span_helpers() {
    let span = Span(1.0, 100.0);
    assert_relative_eq!(span.log_lerp(0.5), 10.0, max_relative = 1e-12);
    assert_relative_eq!(span.log_position(10.0), 0.5, max_relative = 1e-12);
    assert_relative_eq!(span.log_position(1000.0), 1.0);
    assert!(span.contains(100.0));
    assert!(!span.contains(100.1));
    // Reversed bounds are tolerated
    assert_eq!(Span(5.0, 2.0).min(), 2.0);
}
