use approx::assert_relative_eq;
use rulepack::GenerationParams;
use units::{Length, Mass};

use crate::zones::{
    HabitableZone, frost_line, hill_radius, outer_limit, p_type_limit, roche_limit, s_type_limit,
    soot_line,
};

#[test]
fn test_solar_habitable_zone() {
    let hz = HabitableZone::from_luminosity(1.0);
    assert_relative_eq!(hz.inner.to_au(), 0.953, max_relative = 1e-3);
    assert_relative_eq!(hz.outer.to_au(), 1.667, max_relative = 1e-3);
    assert!(hz.contains(Length::from_au(1.0)));
    assert!(!hz.contains(Length::from_au(0.7)));
}

#[test]
fn test_frost_line_scales_with_root_mass() {
    let params = GenerationParams::default();
    assert_relative_eq!(frost_line(&params, Mass::from_solar_masses(1.0)).to_au(), 2.7);
    assert_relative_eq!(
        frost_line(&params, Mass::from_solar_masses(0.25)).to_au(),
        1.35,
        max_relative = 1e-12
    );
}

#[test]
fn test_soot_and_outer_limits() {
    assert_relative_eq!(soot_line(4.0).to_au(), 0.2, max_relative = 1e-12);
    assert_relative_eq!(outer_limit(Mass::from_solar_masses(1.0)).to_au(), 40.0, max_relative = 1e-12);
    // Never collapses below 1 AU
    assert_relative_eq!(outer_limit(Mass::from_solar_masses(0.01)).to_au(), 1.0, max_relative = 1e-12);
}

#[test]
fn test_earth_hill_radius() {
    // Earth-Sun: ~1.5 million km
    let r = hill_radius(
        Length::from_au(1.0),
        Mass::from_earth_masses(1.0),
        Mass::from_solar_masses(1.0),
    );
    assert!(r.to_km() > 1.4e6 && r.to_km() < 1.6e6, "Hill radius: {}", r.to_km());
}

#[test]
fn test_earth_roche_limit() {
    // Moon-density satellite around Earth: ~18,000 km
    let r = roche_limit(Length::from_km(6371.0), 5515.0, 3340.0);
    assert!(r.to_km() > 17_000.0 && r.to_km() < 19_000.0, "Roche: {}", r.to_km());
}

#[test]
fn test_binary_stability_limits() {
    let sep = Length::from_au(10.0);
    // Equal-mass circular binary
    assert_relative_eq!(s_type_limit(sep, 0.0, 0.5).to_au(), 2.74, max_relative = 1e-9);
    let p = p_type_limit(sep, 0.0, 0.5).to_au();
    assert_relative_eq!(p, 10.0 * (1.60 + 2.06 - 5.09 * 0.25), max_relative = 1e-9);
    // Eccentric binaries shrink the circumstellar zone
    assert!(s_type_limit(sep, 0.5, 0.5) < s_type_limit(sep, 0.0, 0.5));
}
