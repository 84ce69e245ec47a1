//! Generate a star system and print it as JSON
//!
//! Usage: cargo run -p forge --example generate_system -- [seed] [star type]

use forge::{GenerationOptions, generate_system};
use rulepack::RulePack;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed = args.next().unwrap_or_else(|| "magrathea".to_string());
    let options = GenerationOptions {
        star_type: args.next(),
        ..Default::default()
    };

    let pack = RulePack::standard()?;
    let system = generate_system(&seed, &pack, &options)?;

    eprintln!("{} ({} nodes, {:.2} Gyr)", system.name, system.nodes.len(), system.age_gyr);
    for node in system.nodes.values() {
        let Some(body) = node.as_body() else {
            eprintln!("  {} [barycenter]", node.name);
            continue;
        };
        eprintln!(
            "  {:<24} {:<6} {:>10.3} M⊕ {:>8.3} AU {:>7.0} K  {}",
            node.name,
            body.role_hint.as_str(),
            body.mass.to_earth_masses(),
            node.orbital_distance().to_au(),
            body.physics.surface_temp_k,
            body.classes.join(", ")
        );
    }
    println!("{}", serde_json::to_string_pretty(&system)?);
    Ok(())
}
