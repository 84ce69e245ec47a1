//! RulePack data contract
//!
//! The rulepack is consumed, never validated in full: every section is
//! optional and each lookup falls back to a documented default when the
//! pack is silent.

use std::collections::BTreeMap;
use std::path::Path;

use celestial::Archetype;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::table::{Span, WeightedTable};

const STANDARD_PACK: &str = include_str!("../data/standard.json");

/// Per-spectral-class stellar template. Mass in M☉, radius in R☉.
///
/// Mass, radius and temperature are drawn at a shared position within
/// their spans, so heavier draws are also larger and hotter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarTemplate {
    pub mass: Span,
    pub radius: Span,
    pub temperature: Span,
    #[serde(default = "one")]
    pub radiation_factor: f64,
    /// Accretion disk extent as multiples of the stellar radius
    #[serde(default)]
    pub accretion_disk: Option<Span>,
}

impl StarTemplate {
    pub fn sunlike() -> Self {
        Self {
            mass: Span(0.8, 1.04),
            radius: Span(0.96, 1.15),
            temperature: Span(5200.0, 6000.0),
            radiation_factor: 1.0,
            accretion_disk: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinaryRules {
    /// Companion probability keyed by primary spectral class
    pub probability: BTreeMap<String, f64>,
    /// Total separation range in AU keyed by primary spectral class,
    /// sampled log-uniformly
    pub separation_au: BTreeMap<String, Span>,
    pub default_separation_au: Span,
}

impl Default for BinaryRules {
    fn default() -> Self {
        Self {
            probability: BTreeMap::new(),
            separation_au: BTreeMap::new(),
            default_separation_au: Span(0.1, 300.0),
        }
    }
}

/// Statistical template for one planetary archetype. Masses and radii in
/// Earth units; radius is interpolated from the mass draw in log space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetTemplate {
    pub mass_earth: Span,
    pub radius_earth: Span,
    pub rotation_hours: Span,
    #[serde(default = "default_tilt")]
    pub axial_tilt_deg: Span,
    #[serde(default = "default_eccentricity_sigma")]
    pub eccentricity_sigma: f64,
}

impl PlanetTemplate {
    pub fn builtin(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Terrestrial => Self {
                mass_earth: Span(0.03, 8.0),
                radius_earth: Span(0.3, 1.9),
                rotation_hours: Span(10.0, 60.0),
                axial_tilt_deg: Span(0.0, 40.0),
                eccentricity_sigma: 0.05,
            },
            Archetype::GasGiant => Self {
                mass_earth: Span(50.0, 4000.0),
                radius_earth: Span(9.0, 13.0),
                rotation_hours: Span(8.0, 20.0),
                axial_tilt_deg: Span(0.0, 30.0),
                eccentricity_sigma: 0.05,
            },
            Archetype::IceGiant => Self {
                mass_earth: Span(8.0, 50.0),
                radius_earth: Span(2.5, 5.0),
                rotation_hours: Span(12.0, 20.0),
                axial_tilt_deg: Span(0.0, 60.0),
                eccentricity_sigma: 0.04,
            },
        }
    }
}

/// One selectable atmosphere type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphereDef {
    pub name: String,
    pub archetypes: Vec<Archetype>,
    #[serde(default = "Span::unbounded")]
    pub mass_earth: Span,
    #[serde(default = "Span::unbounded")]
    pub equilibrium_temp_k: Span,
    #[serde(default)]
    pub requires_tidal_lock: bool,
    #[serde(default = "one")]
    pub weight: f64,
    /// Gas formula to mole-fraction range
    pub gases: BTreeMap<String, Span>,
    #[serde(default)]
    pub pressure_bar: Option<Span>,
    /// Greenhouse warming at the nominal pressure (K)
    #[serde(default)]
    pub greenhouse_k: f64,
    #[serde(default = "one")]
    pub nominal_pressure_bar: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRule {
    pub class: String,
    pub score: f64,
    pub when: Expr,
}

/// Coarse mass-based class used when no rule clears the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassClass {
    pub below_earth_masses: f64,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    pub rules: Vec<ClassRule>,
    pub min_score: f64,
    pub max_classes: usize,
    /// Mutually exclusive base-archetype classes
    pub exclusive: Vec<String>,
    pub fallback: Vec<MassClass>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            min_score: 1.0,
            max_classes: 4,
            exclusive: Vec::new(),
            fallback: Vec::new(),
        }
    }
}

/// Titius–Bode style slot law: a + b·cⁿ for each n in `sequence`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitiusBode {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub sequence: Vec<i32>,
    #[serde(default)]
    pub jitter: f64,
}

/// Tunable generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationParams {
    /// Frost line for a solar-mass star (AU)
    pub frost_line_au: f64,
    pub migration_chance: f64,
    pub magnetic_field_chance: f64,
    pub belt_chance: f64,
    pub atmosphere_chance: f64,
    pub min_atmosphere_mass_earth: f64,
    pub hydrosphere_chance: f64,
    pub ring_chance_terrestrial: f64,
    pub ring_chance_giant: f64,
    /// Ring inner and outer edges as multiples of the planet radius
    pub ring_inner_radii: Span,
    pub ring_outer_radii: Span,
    /// Belt half-width as a fraction of its slot radius
    pub belt_half_width: Span,
    pub chthonian_min_age_gyr: f64,
    pub chthonian_max_distance_au: f64,
    pub radiogenic_heat_k: f64,
    pub tidal_heating_coefficient: f64,
    pub atmosphere_retention_factor: f64,
    /// Unshielded radiation index above which terrestrial bodies are stripped
    pub extreme_radiation: f64,
    pub extreme_temperature_k: f64,
    /// Unshielded radiation index a habitable-zone placement may not exceed
    pub habitable_radiation_limit: f64,
    pub slot_multiplier: Span,
    pub slot_jitter: f64,
    pub planet_count: Span,
    pub titius_bode: Option<TitiusBode>,
    pub system_age_gyr: Span,
    /// Apoapsis-to-next-periapsis spacing factor between moons
    pub moon_spacing: Span,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            frost_line_au: 2.7,
            migration_chance: 0.3,
            magnetic_field_chance: 0.6,
            belt_chance: 0.12,
            atmosphere_chance: 0.8,
            min_atmosphere_mass_earth: 0.01,
            hydrosphere_chance: 0.7,
            ring_chance_terrestrial: 0.02,
            ring_chance_giant: 0.6,
            ring_inner_radii: Span(1.2, 1.6),
            ring_outer_radii: Span(1.8, 2.6),
            belt_half_width: Span(0.1, 0.3),
            chthonian_min_age_gyr: 4.0,
            chthonian_max_distance_au: 0.06,
            radiogenic_heat_k: 2.0,
            tidal_heating_coefficient: 1000.0,
            atmosphere_retention_factor: 50.0,
            extreme_radiation: 20_000.0,
            extreme_temperature_k: 1000.0,
            habitable_radiation_limit: 2000.0,
            slot_multiplier: Span(1.4, 2.0),
            slot_jitter: 0.05,
            planet_count: Span(2.0, 9.0),
            titius_bode: None,
            system_age_gyr: Span(1.0, 10.0),
            moon_spacing: Span(1.3, 1.8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulePack {
    pub id: String,
    pub version: String,
    pub distributions: BTreeMap<String, WeightedTable>,
    pub stars: BTreeMap<String, StarTemplate>,
    pub binary: BinaryRules,
    pub planets: BTreeMap<Archetype, PlanetTemplate>,
    pub atmospheres: Vec<AtmosphereDef>,
    pub pressure_fallback: BTreeMap<Archetype, Span>,
    /// g/mol
    pub gas_molar_masses: BTreeMap<String, f64>,
    /// Greenhouse warming per e-fold of partial pressure above 1 mbar (K)
    pub gas_greenhouse_k: BTreeMap<String, f64>,
    pub classifier: ClassifierConfig,
    pub params: GenerationParams,
}

impl Default for RulePack {
    fn default() -> Self {
        Self {
            id: "empty".to_string(),
            version: "0".to_string(),
            distributions: BTreeMap::new(),
            stars: BTreeMap::new(),
            binary: BinaryRules::default(),
            planets: BTreeMap::new(),
            atmospheres: Vec::new(),
            pressure_fallback: BTreeMap::new(),
            gas_molar_masses: BTreeMap::new(),
            gas_greenhouse_k: BTreeMap::new(),
            classifier: ClassifierConfig::default(),
            params: GenerationParams::default(),
        }
    }
}

impl RulePack {
    /// The rulepack shipped with the crate
    pub fn standard() -> Result<Self> {
        Self::from_json_str(STANDARD_PACK)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let pack: RulePack = serde_json::from_str(json)?;
        pack.check()?;
        Ok(pack)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects contents no lookup could recover from.
    fn check(&self) -> Result<()> {
        for (name, table) in &self.distributions {
            if table.0.values().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(Error::Invalid(format!(
                    "distribution '{name}' has a negative or non-finite weight"
                )));
            }
        }
        for def in &self.atmospheres {
            if def.gases.is_empty() {
                return Err(Error::Invalid(format!(
                    "atmosphere '{}' lists no gases",
                    def.name
                )));
            }
        }
        if self.classifier.max_classes == 0 {
            return Err(Error::Invalid("classifier.maxClasses must be positive".into()));
        }
        Ok(())
    }

    /// A named distribution with at least one positive weight
    pub fn distribution(&self, name: &str) -> Option<&WeightedTable> {
        let table = self.distributions.get(name).filter(|t| !t.is_empty());
        if table.is_none() {
            warn!("rulepack '{}' has no usable distribution '{}'", self.id, name);
        }
        table
    }

    pub fn star_template(&self, spectral_class: &str) -> StarTemplate {
        match self.stars.get(spectral_class) {
            Some(template) => template.clone(),
            None => {
                warn!("no star template for class '{spectral_class}', using a Sun-like star");
                StarTemplate::sunlike()
            }
        }
    }

    pub fn planet_template(&self, archetype: Archetype) -> PlanetTemplate {
        self.planets
            .get(&archetype)
            .cloned()
            .unwrap_or_else(|| PlanetTemplate::builtin(archetype))
    }

    pub fn binary_probability(&self, spectral_class: &str) -> f64 {
        self.binary
            .probability
            .get(spectral_class)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }

    pub fn separation_range(&self, spectral_class: &str) -> Span {
        self.binary
            .separation_au
            .get(spectral_class)
            .copied()
            .unwrap_or(self.binary.default_separation_au)
    }

    pub fn atmosphere(&self, name: &str) -> Option<&AtmosphereDef> {
        self.atmospheres.iter().find(|d| d.name == name)
    }

    pub fn pressure_fallback(&self, archetype: Archetype) -> Span {
        self.pressure_fallback
            .get(&archetype)
            .copied()
            .unwrap_or(match archetype {
                Archetype::Terrestrial => Span(0.5, 2.0),
                Archetype::GasGiant => Span(2000.0, 20_000.0),
                Archetype::IceGiant => Span(1200.0, 10_000.0),
            })
    }

    pub fn molar_mass(&self, gas: &str) -> Option<f64> {
        self.gas_molar_masses.get(gas).copied()
    }
}

fn one() -> f64 {
    1.0
}

fn default_tilt() -> Span {
    Span(0.0, 30.0)
}

fn default_eccentricity_sigma() -> f64 {
    0.05
}
