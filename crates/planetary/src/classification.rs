//! Rule-based taxonomy
//!
//! Every rule whose expression matches adds its score to its class.
//! Classes clearing the threshold are ranked; only the best-scoring base
//! archetype survives, while modifiers are kept up to the class cap.

use std::collections::BTreeMap;

use celestial::{CelestialBody, RoleHint};
use rulepack::{FeatureSource, RulePack};

use crate::features::BodyFeatures;

/// Mass thresholds used when the rulepack supplies no fallback table
const BUILTIN_FALLBACK: [(f64, &str); 5] = [
    (0.1, "dwarf-planet"),
    (2.0, "terrestrial"),
    (10.0, "super-earth"),
    (50.0, "ice-giant"),
    (f64::MAX, "gas-giant"),
];

/// Summed rule scores per class
pub fn score_classes<S: FeatureSource + ?Sized>(pack: &RulePack, features: &S) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    for rule in &pack.classifier.rules {
        if rule.when.evaluate(features) {
            *scores.entry(rule.class.clone()).or_insert(0.0) += rule.score;
        }
    }
    scores
}

/// Assigns taxonomy classes to a body, best first. Never empty.
pub fn classify_body(body: &CelestialBody, features: &BodyFeatures, pack: &RulePack) -> Vec<String> {
    let config = &pack.classifier;
    let mut ranked: Vec<(String, f64)> = score_classes(pack, features)
        .into_iter()
        .filter(|(_, score)| *score > config.min_score)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let is_exclusive = |class: &str| config.exclusive.iter().any(|c| c == class);
    let mut classes: Vec<String> = Vec::new();
    let mut has_base = false;
    for (class, _) in ranked {
        if is_exclusive(&class) {
            if has_base {
                continue;
            }
            has_base = true;
        }
        classes.push(class);
        if classes.len() >= config.max_classes {
            break;
        }
    }

    if classes.is_empty() {
        classes.push(fallback_class(body, pack));
    }
    classes
}

/// Coarse class from role and mass alone
pub fn fallback_class(body: &CelestialBody, pack: &RulePack) -> String {
    match body.role_hint {
        RoleHint::Belt => return "asteroid-belt".to_string(),
        RoleHint::Ring => return "planetary-ring".to_string(),
        _ => {}
    }
    let mass = body.mass.to_earth_masses();
    let table = &pack.classifier.fallback;
    if table.is_empty() {
        return BUILTIN_FALLBACK
            .iter()
            .find(|(limit, _)| mass < *limit)
            .map_or("gas-giant", |(_, class)| *class)
            .to_string();
    }
    table
        .iter()
        .find(|entry| mass < entry.below_earth_masses)
        .or(table.last())
        .map_or_else(|| "gas-giant".to_string(), |entry| entry.class.clone())
}
