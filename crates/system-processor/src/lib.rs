//! Recomputes every derived value of a star system.
//!
//! Runs after generation and after every structural edit; see
//! [`SystemProcessor`] for the pass order.

pub mod processor;


pub use processor::{DERIVED_TAGS, SystemProcessor, biosphere_seed, process, settle};
