//! Orbital state propagation
//!
//! Positions come from the analytic two-body solution: advance the mean
//! anomaly, solve Kepler's equation for the eccentric anomaly, and rotate
//! the perifocal position by the argument of periapsis.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point2, Rotation2, Vector2};

use crate::orbit::Orbit;

/// Iteration budget for the Newton solver
pub const MAX_ITERATIONS: usize = 50;

/// Convergence tolerance on the Newton step (radians)
pub const TOLERANCE: f64 = 1e-12;

/// Eccentricities at or above this are clamped before solving
const MAX_ECCENTRICITY: f64 = 0.99;

/// Position and velocity in the host's orbital plane, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub mean_anomaly: f64,
    pub eccentric_anomaly: f64,
    pub true_anomaly: f64,
    /// Distance from the host in metres
    pub radius: f64,
}

/// Wraps an angle into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Solve Kepler's equation E - e·sin(E) = M using Newton-Raphson.
///
/// `mean_anomaly` may be any real angle; the result corresponds to the
/// mean anomaly wrapped into [0, 2π).
///
/// Starting from E₀ = M converges quickly for moderate eccentricities;
/// highly eccentric orbits start from E₀ = π, which keeps the iteration
/// monotone near periapsis.
///
/// # References
/// - Danby (1988), "Fundamentals of Celestial Mechanics", §6.6
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = normalize_angle(mean_anomaly);
    let e = eccentricity.clamp(0.0, MAX_ECCENTRICITY);
    if e == 0.0 {
        return m;
    }

    let mut ecc_anomaly = if e < 0.8 { m } else { PI };
    for _ in 0..MAX_ITERATIONS {
        let f = ecc_anomaly - e * ecc_anomaly.sin() - m;
        let f_prime = 1.0 - e * ecc_anomaly.cos();
        let delta = f / f_prime;
        ecc_anomaly -= delta;
        if delta.abs() < TOLERANCE {
            break;
        }
    }
    ecc_anomaly
}

/// True anomaly from eccentric anomaly
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let e = eccentricity.clamp(0.0, MAX_ECCENTRICITY);
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    let y = (1.0 - e * e).sqrt() * sin_e;
    let x = cos_e - e;
    y.atan2(x)
}

/// Mean anomaly of `orbit` at time `t` (seconds).
///
/// Retrograde orbits advance the mean anomaly backwards.
pub fn mean_anomaly_at(orbit: &Orbit, t: f64) -> f64 {
    let mut n = orbit.mean_motion();
    if orbit.retrograde {
        n = -n;
    }
    orbit.elements.mean_anomaly + n * (t - orbit.t0)
}

/// Positions `orbit` at time `t` relative to its host.
pub fn position_at(orbit: &Orbit, t: f64) -> OrbitalState {
    let elements = &orbit.elements;
    let e = elements.eccentricity.clamp(0.0, MAX_ECCENTRICITY);
    let a = elements.semi_major_axis.to_m();

    let mean_anomaly = mean_anomaly_at(orbit, t);
    let ecc_anomaly = solve_kepler(mean_anomaly, e);
    let nu = true_anomaly(ecc_anomaly, e);
    let radius = a * (1.0 - e * ecc_anomaly.cos());

    let (sin_e, cos_e) = ecc_anomaly.sin_cos();
    let b_over_a = (1.0 - e * e).sqrt();
    let perifocal = Vector2::new(a * (cos_e - e), a * b_over_a * sin_e);

    // ṙ in the perifocal frame: √(μa)/r · (-sin E, √(1-e²) cos E)
    let speed_scale = if radius > 0.0 {
        (orbit.host_mu.max(0.0) * a).sqrt() / radius
    } else {
        0.0
    };
    let mut perifocal_velocity = Vector2::new(-sin_e, b_over_a * cos_e) * speed_scale;
    if orbit.retrograde {
        perifocal_velocity = -perifocal_velocity;
    }

    let rotation = Rotation2::new(elements.arg_periapsis);
    OrbitalState {
        position: Point2::from(rotation * perifocal),
        velocity: rotation * perifocal_velocity,
        mean_anomaly: normalize_angle(mean_anomaly),
        eccentric_anomaly: ecc_anomaly,
        true_anomaly: nu,
        radius,
    }
}
