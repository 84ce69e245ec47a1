use approx::assert_relative_eq;

use crate::mass::{EARTH_MASS_KG, Mass, SOLAR_MASS_KG};

#[test]
fn test_mass_conversions() {
    let sun = Mass::from_solar_masses(1.0);
    assert_relative_eq!(sun.to_kg(), SOLAR_MASS_KG);

    let earth = Mass::from_kg(EARTH_MASS_KG);
    assert_relative_eq!(earth.to_earth_masses(), 1.0);

    // Jupiter is ~317.8 Earth masses
    let jupiter = Mass::from_jupiter_masses(1.0);
    assert_relative_eq!(jupiter.to_earth_masses(), 317.8, max_relative = 1e-3);
}

#[test]
fn test_mass_arithmetic_operations() {
    let m1 = Mass::from_solar_masses(2.0);
    let m2 = Mass::from_solar_masses(1.5);

    assert_relative_eq!((m1 + m2).to_solar_masses(), 3.5);
    assert_relative_eq!((m1 - m2).to_solar_masses(), 0.5);
    assert_relative_eq!((m1 * 3.0).to_solar_masses(), 6.0);
    assert_relative_eq!((m1 / 4.0).to_solar_masses(), 0.5);
    assert_relative_eq!(m1 / m2, 4.0 / 3.0);

    let total: Mass = [m1, m2, Mass::zero()].into_iter().sum();
    assert_relative_eq!(total.to_solar_masses(), 3.5);
}

#[test]
fn test_gravitational_parameter() {
    // GM☉ ≈ 1.327e20 m³/s²
    let mu = Mass::from_solar_masses(1.0).gravitational_parameter();
    assert_relative_eq!(mu, 1.327e20, max_relative = 1e-3);
}

#[test]
fn test_degenerate_mass() {
    assert!(Mass::zero().is_degenerate());
    assert!(Mass::from_kg(f64::NAN).is_degenerate());
    assert!(!Mass::from_earth_masses(0.1).is_degenerate());
}
