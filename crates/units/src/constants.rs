//! Physical constants shared by the generator and the processor.
//!
//! Values are SI unless the name says otherwise.

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.674_30e-11;

/// Stefan-Boltzmann constant (W m⁻² K⁻⁴)
pub const STEFAN_BOLTZMANN: f64 = 5.670_374e-8;

/// Nominal solar luminosity (W), IAU 2015 B3
pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;

/// Solar effective temperature (K)
pub const SOLAR_TEMPERATURE_K: f64 = 5778.0;

/// Standard gravity (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Universal gas constant (J mol⁻¹ K⁻¹)
pub const GAS_CONSTANT: f64 = 8.314_462;

/// Seconds in a Julian year
pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;

/// Seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;
