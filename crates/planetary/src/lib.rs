//! Planetary physics
//!
//! Zone calculations, the layered thermal model, radiation, atmosphere
//! selection, habitability and biosphere scoring, the rule-based
//! classifier and flight dynamics. Both the generator and the system
//! processor call into this crate so a body derives the same values
//! along either path.

pub mod atmosphere;
pub mod classification;
pub mod features;
pub mod flight;
pub mod habitability;
pub mod physics;
pub mod radiation;
pub mod temperature;
pub mod zones;

#[cfg(test)]
mod atmosphere_test;
#[cfg(test)]
mod classification_test;
#[cfg(test)]
mod temperature_test;
#[cfg(test)]
mod zones_test;

pub use classification::classify_body;
pub use features::{BodyFeatures, FeatureContext};
pub use habitability::{BiosphereEnvironment, HabitabilityInput, assess, generate_biosphere};
pub use temperature::StellarSource;
pub use zones::HabitableZone;
