use approx::assert_relative_eq;
use rulepack::RulePack;
use units::{Length, Mass};

use crate::temperature::{
    StellarSource, effective_greenhouse_pressure, equilibrium_temperature,
    greenhouse_from_definition, greenhouse_from_gases, tidal_heating,
};

fn sun_at(au: f64) -> StellarSource {
    StellarSource {
        luminosity: 1.0,
        distance: Length::from_au(au),
        radiation_factor: 1.0,
    }
}

#[test]
fn test_equilibrium_temp_earth() {
    // Earth with A = 0.3: ~255 K
    let t = equilibrium_temperature(&[sun_at(1.0)], 0.3);
    assert!(t > 250.0 && t < 260.0, "Teq: {}", t);
}

#[test]
fn test_equilibrium_temp_sums_flux() {
    let single = equilibrium_temperature(&[sun_at(1.0)], 0.3);
    let double = equilibrium_temperature(&[sun_at(1.0), sun_at(1.0)], 0.3);
    assert_relative_eq!(double / single, 2.0_f64.powf(0.25), max_relative = 1e-12);
    // Zero-distance sources are ignored rather than blowing up
    let skipped = equilibrium_temperature(&[sun_at(1.0), sun_at(0.0)], 0.3);
    assert_relative_eq!(skipped, single);
}

#[test]
fn test_cloud_top_clamp() {
    assert_eq!(effective_greenhouse_pressure(92.0), 92.0);
    assert_eq!(effective_greenhouse_pressure(1000.0), 1000.0);
    assert_eq!(effective_greenhouse_pressure(5000.0), 1.0);

    let pack = RulePack::standard().unwrap();
    let jovian = pack.atmosphere("jovian").unwrap();
    assert_relative_eq!(greenhouse_from_definition(jovian, 10_000.0), 50.0);
}

#[test]
fn test_greenhouse_scales_with_pressure() {
    let pack = RulePack::standard().unwrap();
    let venus = pack.atmosphere("venusian").unwrap();
    assert_relative_eq!(greenhouse_from_definition(venus, 92.0), 500.0);
    assert_relative_eq!(greenhouse_from_definition(venus, 46.0), 250.0);
}

#[test]
fn test_fallback_greenhouse_earth_air() {
    let pack = RulePack::standard().unwrap();
    let air = [
        ("N2".to_string(), 0.78),
        ("O2".to_string(), 0.2096),
        ("H2O".to_string(), 0.01),
        ("CO2".to_string(), 0.0004),
    ];
    let dt = greenhouse_from_gases(&pack, air.iter().map(|(g, x)| (g, x)), 1.0);
    assert!(dt > 25.0 && dt < 40.0, "greenhouse: {}", dt);
}

#[test]
fn test_io_tidal_heating() {
    let dt = tidal_heating(
        1000.0,
        Mass::from_jupiter_masses(1.0),
        Length::from_km(1821.6),
        0.0041,
        Length::from_km(421_700.0),
    );
    assert!(dt > 110.0 && dt < 145.0, "Io tidal heating: {}", dt);
}

#[test]
fn test_circular_orbit_no_tidal_heating() {
    let dt = tidal_heating(
        1000.0,
        Mass::from_jupiter_masses(1.0),
        Length::from_km(1821.6),
        0.0,
        Length::from_km(421_700.0),
    );
    assert_eq!(dt, 0.0);
}
