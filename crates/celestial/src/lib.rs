//! Core data model for generated star systems
//!
//! Holds the deterministic random source, the node arena with its tree
//! queries, and Keplerian orbit propagation.

pub mod body;
pub mod kepler;
pub mod node;
pub mod orbit;
pub mod rng;
pub mod system;

#[cfg(test)]
mod kepler_test;

pub use body::{
    Annulus, Archetype, Atmosphere, Biochemistry, Biosphere, CelestialBody, Complexity,
    DerivedPhysics, EnergySource, FlightDynamics, Habitability, HabitabilityTier, Hydrosphere,
    Morphology, RoleHint, Solvent, StellarProperties,
};
pub use kepler::{OrbitalState, position_at, solve_kepler};
pub use node::{Barycenter, Node, NodeId, NodeKind};
pub use orbit::{Orbit, OrbitalElements, keplerian_mean_motion};
pub use rng::SeededRng;
pub use system::{RulePackRef, System};
