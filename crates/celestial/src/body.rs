//! Celestial body records
//!
//! A [`CelestialBody`] has the same shape whether it came from the generator
//! or from a manual edit. Optional substructures default to empty values so
//! that physics passes never see missing data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use units::{Length, Mass};

use crate::orbit::Orbit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleHint {
    Star,
    Planet,
    Moon,
    Belt,
    Ring,
}

impl RoleHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleHint::Star => "star",
            RoleHint::Planet => "planet",
            RoleHint::Moon => "moon",
            RoleHint::Belt => "belt",
            RoleHint::Ring => "ring",
        }
    }

    /// Planets and moons are the bodies that carry surface physics.
    pub fn is_world(&self) -> bool {
        matches!(self, RoleHint::Planet | RoleHint::Moon)
    }
}

impl fmt::Display for RoleHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bulk planetary archetype used to pick templates and atmospheres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Terrestrial,
    GasGiant,
    IceGiant,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Terrestrial => "terrestrial",
            Archetype::GasGiant => "gas-giant",
            Archetype::IceGiant => "ice-giant",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "terrestrial" => Some(Archetype::Terrestrial),
            "gas-giant" => Some(Archetype::GasGiant),
            "ice-giant" => Some(Archetype::IceGiant),
            _ => None,
        }
    }

    pub fn is_giant(&self) -> bool {
        !matches!(self, Archetype::Terrestrial)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gas envelope. Composition maps gas formula to mole fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Atmosphere {
    pub name: String,
    pub composition: BTreeMap<String, f64>,
    pub pressure_bar: f64,
    /// Mean molar mass in g/mol, derived by the processor
    pub molar_mass: f64,
}

impl Atmosphere {
    pub fn is_present(&self) -> bool {
        self.pressure_bar > 0.0 && !self.composition.is_empty()
    }

    pub fn fraction(&self, gas: &str) -> f64 {
        self.composition.get(gas).copied().unwrap_or(0.0)
    }

    /// Gas with the largest share, ties broken by formula
    pub fn dominant_gas(&self) -> Option<&str> {
        self.composition
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(gas, _)| gas.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Solvent {
    #[default]
    Water,
    Methane,
    Ammonia,
}

impl Solvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Solvent::Water => "water",
            Solvent::Methane => "methane",
            Solvent::Ammonia => "ammonia",
        }
    }

    /// Surface temperature that best suits life in this solvent (K)
    pub fn optimum_temperature(&self) -> f64 {
        match self {
            Solvent::Water => 288.0,
            Solvent::Methane => 111.0,
            Solvent::Ammonia => 218.0,
        }
    }

    /// Liquid range at roughly one bar (K)
    pub fn liquid_range(&self) -> (f64, f64) {
        match self {
            Solvent::Water => (273.0, 373.0),
            Solvent::Methane => (91.0, 112.0),
            Solvent::Ammonia => (195.0, 240.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hydrosphere {
    /// Fraction of the surface covered by liquid, 0..=1
    pub coverage: f64,
    pub composition: Solvent,
}

impl Hydrosphere {
    pub fn is_present(&self) -> bool {
        self.coverage > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Microbial,
    Vegetative,
    Animal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Morphology {
    Microbial,
    Flora,
    Fungal,
    Fauna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Biochemistry {
    CarbonWater,
    CarbonAmmonia,
    SiliconMethane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergySource {
    Photosynthesis,
    Chemosynthesis,
    TidalHeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biosphere {
    pub complexity: Complexity,
    pub coverage: f64,
    pub biochemistry: Biochemistry,
    pub energy_source: EnergySource,
    pub morphologies: Vec<Morphology>,
}

/// Star-only properties. Luminosity is derived from radius and temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StellarProperties {
    pub spectral_class: String,
    pub temperature_k: f64,
    /// Bolometric luminosity in solar units
    pub luminosity: f64,
    /// Relative high-energy activity (flares, winds); the Sun is 1
    pub radiation_factor: f64,
}

impl Default for StellarProperties {
    fn default() -> Self {
        Self {
            spectral_class: "G".to_string(),
            temperature_k: units::constants::SOLAR_TEMPERATURE_K,
            luminosity: 1.0,
            radiation_factor: 1.0,
        }
    }
}

/// Radial extent of a belt or ring, measured from the host's center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annulus {
    pub inner: Length,
    pub outer: Length,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HabitabilityTier {
    EarthLike,
    HumanHabitable,
    AlienHabitable,
    #[default]
    None,
}

impl fmt::Display for HabitabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HabitabilityTier::EarthLike => "earth-like",
            HabitabilityTier::HumanHabitable => "human-habitable",
            HabitabilityTier::AlienHabitable => "alien-habitable",
            HabitabilityTier::None => "none",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Habitability {
    /// Composite score in [0, 100]
    pub score: f64,
    pub tier: HabitabilityTier,
}

/// Values recomputed by every processor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DerivedPhysics {
    /// m/s²
    pub surface_gravity: f64,
    pub rotation_period_s: f64,
    pub orbital_period_s: f64,
    /// Surface radiation index, Earth = 1
    pub radiation: f64,
    /// Radiation index before atmospheric and magnetic shielding
    pub unshielded_radiation: f64,
    /// Total stellar flux in Earth units
    pub stellar_flux: f64,
    pub equilibrium_temp_k: f64,
    pub greenhouse_k: f64,
    pub tidal_heating_k: f64,
    pub radiogenic_k: f64,
    pub surface_temp_k: f64,
    pub atmosphere_retained: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightDynamics {
    pub escape_velocity_kms: f64,
    pub surface_gravity_g: f64,
    pub hill_sphere: Length,
    pub roche_limit: Length,
    pub atmosphere_top_km: f64,
    pub low_orbit_velocity_kms: f64,
    pub delta_v_to_orbit_kms: f64,
    pub synchronous_orbit_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub role_hint: RoleHint,
    #[serde(default)]
    pub archetype: Option<Archetype>,
    #[serde(rename = "massKg", default)]
    pub mass: Mass,
    #[serde(rename = "radiusKm", default)]
    pub radius: Length,
    #[serde(default)]
    pub orbit: Option<Orbit>,
    #[serde(default)]
    pub rotation_period_hours: f64,
    #[serde(default)]
    pub axial_tilt_deg: f64,
    #[serde(default)]
    pub tidally_locked: bool,
    #[serde(default)]
    pub albedo: f64,
    #[serde(default)]
    pub atmosphere: Atmosphere,
    #[serde(default)]
    pub hydrosphere: Hydrosphere,
    #[serde(default)]
    pub biosphere: Option<Biosphere>,
    /// Surface field strength; zero means no magnetosphere
    #[serde(default)]
    pub magnetic_field_gauss: f64,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stellar: Option<StellarProperties>,
    #[serde(default)]
    pub annulus: Option<Annulus>,
    #[serde(default)]
    pub physics: DerivedPhysics,
    #[serde(default)]
    pub habitability: Habitability,
    #[serde(default)]
    pub flight: Option<FlightDynamics>,
}

impl CelestialBody {
    /// An empty body of the given role with every field at its safe default.
    pub fn empty(role_hint: RoleHint) -> Self {
        Self {
            role_hint,
            archetype: None,
            mass: Mass::zero(),
            radius: Length::zero(),
            orbit: None,
            rotation_period_hours: 0.0,
            axial_tilt_deg: 0.0,
            tidally_locked: false,
            albedo: 0.3,
            atmosphere: Atmosphere::default(),
            hydrosphere: Hydrosphere::default(),
            biosphere: None,
            magnetic_field_gauss: 0.0,
            classes: Vec::new(),
            tags: Vec::new(),
            stellar: (role_hint == RoleHint::Star).then(StellarProperties::default),
            annulus: None,
            physics: DerivedPhysics::default(),
            habitability: Habitability::default(),
            flight: None,
        }
    }

    pub fn is_star(&self) -> bool {
        self.role_hint == RoleHint::Star
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn add_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Bulk density in kg/m³, zero for degenerate bodies
    pub fn density(&self) -> f64 {
        let r = self.radius.to_m();
        if r <= 0.0 || self.mass.is_degenerate() {
            return 0.0;
        }
        self.mass.to_kg() / (4.0 / 3.0 * std::f64::consts::PI * r.powi(3))
    }

    /// Luminosity in solar units; zero for non-stars
    pub fn luminosity(&self) -> f64 {
        self.stellar.as_ref().map_or(0.0, |s| s.luminosity)
    }
}
