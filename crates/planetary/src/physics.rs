//! Basic body physics shared by generation and processing

use celestial::CelestialBody;
use units::constants::{G, SOLAR_TEMPERATURE_K};

/// g = G·M / R² in m/s², zero for degenerate bodies
pub fn surface_gravity(body: &CelestialBody) -> f64 {
    let r = body.radius.to_m();
    if r <= 0.0 || body.mass.is_degenerate() {
        return 0.0;
    }
    G * body.mass.to_kg() / r.powi(2)
}

/// L/L☉ = (R/R☉)² (T/T☉)⁴
pub fn stellar_luminosity(radius_solar: f64, temperature_k: f64) -> f64 {
    radius_solar.max(0.0).powi(2) * (temperature_k.max(0.0) / SOLAR_TEMPERATURE_K).powi(4)
}
