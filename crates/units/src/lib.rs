//! Typed physical quantities and constants.

pub mod constants;
pub mod length;
pub mod mass;
pub mod time;

#[cfg(test)]
mod mass_test;
#[cfg(test)]
mod time_test;

pub use length::{AU_TO_KM, EARTH_RADIUS_KM, Length, SOLAR_RADIUS_KM};
pub use mass::{EARTH_MASS_KG, JUPITER_MASS_KG, Mass, SOLAR_MASS_KG};
pub use time::Time;
