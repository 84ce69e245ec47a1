//! Flight dynamics
//!
//! Orbital boundaries and launch costs for a body's surface and vicinity.

use std::f64::consts::PI;

use celestial::FlightDynamics;
use units::constants::{G, GAS_CONSTANT, STANDARD_GRAVITY};
use units::{Length, Mass};

use crate::zones::{SATELLITE_DENSITY, hill_radius, roche_limit};

/// Pressure treated as the top of the atmosphere (bar)
const ATMOSPHERE_TOP_BAR: f64 = 1e-6;

/// Effective burn duration charged as gravity loss (s)
const GRAVITY_LOSS_SECONDS: f64 = 100.0;

/// Drag loss per √bar of surface pressure (km/s)
const DRAG_LOSS_KMS: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightInput {
    pub mass: Mass,
    pub radius: Length,
    /// m/s²
    pub surface_gravity: f64,
    pub surface_temp_k: f64,
    pub pressure_bar: f64,
    /// g/mol
    pub molar_mass: f64,
    pub rotation_period_s: f64,
    pub host_mass: Option<Mass>,
    pub semi_major_axis: Option<Length>,
    /// Bulk density, kg/m³
    pub density: f64,
}

/// Atmospheric scale height H = RT / (μg) in km
pub fn scale_height_km(surface_temp_k: f64, molar_mass: f64, surface_gravity: f64) -> f64 {
    if molar_mass <= 0.0 || surface_gravity <= 0.0 || surface_temp_k <= 0.0 {
        return 0.0;
    }
    GAS_CONSTANT * surface_temp_k / (molar_mass / 1000.0 * surface_gravity) / 1000.0
}

pub fn flight_dynamics(input: &FlightInput) -> FlightDynamics {
    let gm = G * input.mass.to_kg().max(0.0);
    let r = input.radius.to_m();
    if gm <= 0.0 || r <= 0.0 {
        return FlightDynamics::default();
    }

    let escape_velocity_kms = (2.0 * gm / r).sqrt() / 1000.0;

    let atmosphere_top_km = if input.pressure_bar > ATMOSPHERE_TOP_BAR {
        scale_height_km(input.surface_temp_k, input.molar_mass, input.surface_gravity)
            * (input.pressure_bar / ATMOSPHERE_TOP_BAR).ln()
    } else {
        0.0
    };

    let low_orbit_radius = r + atmosphere_top_km * 1000.0;
    let low_orbit_velocity_kms = (gm / low_orbit_radius).sqrt() / 1000.0;
    let gravity_loss_kms = input.surface_gravity * GRAVITY_LOSS_SECONDS / 1000.0;
    let drag_loss_kms = DRAG_LOSS_KMS * input.pressure_bar.max(0.0).sqrt();

    let synchronous_orbit_km = (input.rotation_period_s > 0.0)
        .then(|| (gm * input.rotation_period_s.powi(2) / (4.0 * PI * PI)).cbrt())
        .filter(|sync_r| *sync_r > r)
        .map(|sync_r| (sync_r - r) / 1000.0);

    let hill_sphere = match (input.host_mass, input.semi_major_axis) {
        (Some(host), Some(a)) => hill_radius(a, input.mass, host),
        _ => Length::zero(),
    };

    FlightDynamics {
        escape_velocity_kms,
        surface_gravity_g: input.surface_gravity / STANDARD_GRAVITY,
        hill_sphere,
        roche_limit: roche_limit(input.radius, input.density, SATELLITE_DENSITY),
        atmosphere_top_km,
        low_orbit_velocity_kms,
        delta_v_to_orbit_kms: low_orbit_velocity_kms + gravity_loss_kms + drag_loss_kms,
        synchronous_orbit_km,
    }
}
