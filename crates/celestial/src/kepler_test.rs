use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;
use units::{Length, Mass, Time};

use crate::kepler::{normalize_angle, position_at, solve_kepler};
use crate::node::NodeId;
use crate::orbit::{Orbit, OrbitalElements};

fn wrapped_residual(ecc_anomaly: f64, e: f64, m: f64) -> f64 {
    let r = ecc_anomaly - e * ecc_anomaly.sin() - normalize_angle(m);
    (r + PI).rem_euclid(TAU) - PI
}

fn earth_orbit(e: f64) -> Orbit {
    let mut elements = OrbitalElements::circular(Length::from_au(1.0));
    elements.eccentricity = e;
    Orbit::new(
        NodeId::new("sun"),
        Mass::from_solar_masses(1.0).gravitational_parameter(),
        elements,
    )
}

#[test]
fn test_kepler_converges_across_eccentricities() {
    for i in 0..=18 {
        let e = i as f64 * 0.05;
        for j in -12..=24 {
            let m = j as f64 * 0.5;
            let ecc = solve_kepler(m, e);
            let residual = wrapped_residual(ecc, e, m);
            assert!(residual.abs() < 1e-6, "e={} M={} residual={}", e, m, residual);
        }
    }
}

#[test]
fn test_circular_shortcut() {
    assert_eq!(solve_kepler(1.234, 0.0), 1.234);
    assert_relative_eq!(solve_kepler(-FRAC_PI_2, 0.0), 3.0 * FRAC_PI_2);
}

#[test]
fn test_near_parabolic_edge() {
    // Near periapsis with e→0.9 is the slowest-converging region
    for m in [1e-6, 1e-3, 0.05, TAU - 1e-4] {
        let ecc = solve_kepler(m, 0.9);
        assert!(wrapped_residual(ecc, 0.9, m).abs() < 1e-6);
    }
}

#[test]
fn test_earth_period_and_radius() {
    let orbit = earth_orbit(0.0167);
    assert_relative_eq!(
        Time::from_seconds(orbit.period()).to_days(),
        365.25,
        max_relative = 2e-3
    );

    let periapsis = position_at(&orbit, 0.0);
    assert_relative_eq!(
        periapsis.radius,
        Length::from_au(1.0 - 0.0167).to_m(),
        max_relative = 1e-9
    );

    let half = position_at(&orbit, orbit.period() / 2.0);
    assert_relative_eq!(
        half.radius,
        Length::from_au(1.0 + 0.0167).to_m(),
        max_relative = 1e-9
    );
    assert_relative_eq!(half.true_anomaly.abs(), PI, max_relative = 1e-9);
}

#[test]
fn test_position_rotated_by_periapsis() {
    let mut orbit = earth_orbit(0.0);
    orbit.elements.arg_periapsis = FRAC_PI_2;
    let state = position_at(&orbit, 0.0);
    let a = Length::from_au(1.0).to_m();
    assert!(state.position.x.abs() < a * 1e-12);
    assert_relative_eq!(state.position.y, a, max_relative = 1e-12);
}

#[test]
fn test_retrograde_runs_backwards() {
    let mut pro = earth_orbit(0.1);
    pro.mean_motion = Some(1e-7);
    let mut retro = pro.clone();
    retro.retrograde = true;

    let t = 1e6;
    let a = position_at(&pro, t);
    let b = position_at(&retro, t);
    assert_relative_eq!(a.position.x, b.position.x, max_relative = 1e-9);
    assert_relative_eq!(a.position.y, -b.position.y, max_relative = 1e-9);
    // Mirror image: radial component agrees, transverse component flips
    assert_relative_eq!(a.velocity.x, b.velocity.x, max_relative = 1e-9);
    assert_relative_eq!(a.velocity.y, -b.velocity.y, max_relative = 1e-9);
}

#[test]
fn test_circular_speed() {
    let orbit = earth_orbit(0.0);
    let state = position_at(&orbit, 12_345.0);
    // ~29.78 km/s
    assert_relative_eq!(state.velocity.norm(), 29_780.0, max_relative = 2e-3);
}
