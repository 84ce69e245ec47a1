//! Procedural star-system generation
//!
//! [`generate_system`] turns a seed string and a [`RulePack`] into a fully
//! processed [`System`]: stars (single or binary), planets and belts
//! placed by zone, then rings and moons. The [`editing`] module applies
//! operator edits to an existing system.

pub mod bodies;
pub mod context;
pub mod editing;
pub mod error;
pub mod factory;
pub mod moons;
pub mod naming;
pub mod options;
pub mod placement;
pub mod stars;

pub use context::GenerationContext;
pub use editing::{AddBodyRequest, add_habitable_planet, add_planetary_body, delete_node, rename_node};
pub use error::{Error, Result};
pub use factory::{BodyConfig, BodyFactory};
pub use options::GenerationOptions;
pub use placement::PlacementZone;

use celestial::{RulePackRef, SeededRng, System};
use log::info;
use rulepack::RulePack;
use system_processor::SystemProcessor;

use crate::bodies::populate_zone;
use crate::naming::catalog_name;
use crate::placement::{allocate, planetary_zones};
use crate::stars::setup_stars;

/// Generates a complete, processed system from `seed`.
///
/// The same seed, pack and options always produce the same system.
pub fn generate_system(seed: &str, pack: &RulePack, options: &GenerationOptions) -> Result<System> {
    let mut rng = SeededRng::from_seed_str(seed);
    let name = catalog_name(pack, &mut rng);
    let age_gyr = options
        .age_gyr
        .unwrap_or_else(|| pack.params.system_age_gyr.sample(&mut rng));
    let mut ctx = GenerationContext::new(pack, rng, age_gyr, options.scale());

    let mut system = System::new(seed, name.clone(), age_gyr);
    system.epoch = options.epoch;
    system.rulepack = RulePackRef {
        id: pack.id.clone(),
        version: pack.version.clone(),
    };

    let setup = setup_stars(&mut ctx, &mut system, &name, options.star_type.as_deref())?;
    if setup.is_binary() {
        system.tags.push("binary".to_string());
    }

    if !options.empty {
        let span = pack.params.planet_count;
        let count = options.planet_count.unwrap_or_else(|| {
            ctx.rng.next_int(span.min().round() as i64, span.max().round() as i64).max(0) as usize
        });
        let zones = planetary_zones(&system, &setup.root, &setup.stars, ctx.scale);
        let counts = allocate(&mut ctx.rng, &zones, count);
        for ((zone, _), count) in zones.iter().zip(counts) {
            populate_zone(&mut ctx, &mut system, zone, count);
        }
    }

    info!(
        "generated '{}' from seed '{}': {} stars, {} nodes, {:.2} Gyr",
        system.name,
        seed,
        setup.stars.len(),
        system.nodes.len(),
        age_gyr
    );
    Ok(SystemProcessor::new(pack).process(system))
}

#[cfg(test)]
mod bodies_test;
#[cfg(test)]
mod editing_test;
#[cfg(test)]
mod naming_test;
