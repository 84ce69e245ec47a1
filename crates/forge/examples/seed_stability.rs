//! Check that the same seed produces identical systems
//!
//! Usage: cargo run -p forge --example seed_stability -- [seed]

use celestial::RoleHint;
use forge::{GenerationOptions, generate_system};
use rulepack::RulePack;
use system_processor::SystemProcessor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::args().nth(1).unwrap_or_else(|| "stability".to_string());
    let pack = RulePack::standard()?;
    let options = GenerationOptions::default();

    println!("Testing seed stability with seed: {seed}\n");
    let reference = serde_json::to_string(&generate_system(&seed, &pack, &options)?)?;

    for run in 1..=5 {
        let system = generate_system(&seed, &pack, &options)?;
        let planets = system
            .nodes
            .values()
            .filter(|n| n.as_body().is_some_and(|b| b.role_hint == RoleHint::Planet))
            .count();
        println!("Run {run}: {} with {planets} planets", system.name);

        let json = serde_json::to_string(&system)?;
        if json != reference {
            eprintln!("FAIL: run {run} differs from the first generation");
            std::process::exit(1);
        }

        let reprocessed = serde_json::to_string(&SystemProcessor::new(&pack).process(system))?;
        if reprocessed != reference {
            eprintln!("FAIL: reprocessing run {run} changed the system");
            std::process::exit(1);
        }
    }

    println!("\nPASS: all runs identical");
    Ok(())
}
