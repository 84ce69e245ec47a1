//! Habitability scoring and biosphere generation
//!
//! Shared by the generator and the processor so a freshly generated body
//! and a reprocessed one score identically.

use celestial::{
    Biochemistry, Biosphere, Complexity, EnergySource, Habitability, HabitabilityTier, Hydrosphere,
    Morphology, SeededRng, Solvent,
};

// =============================================================================
// Score Budget
// =============================================================================

const TEMPERATURE_POINTS: f64 = 30.0;
const PRESSURE_POINTS: f64 = 20.0;
const SOLVENT_POINTS: f64 = 15.0;
const WATER_BONUS_POINTS: f64 = 5.0;
const RADIATION_POINTS: f64 = 15.0;
const GRAVITY_POINTS: f64 = 15.0;

/// Temperature offset from the solvent optimum at which the sub-score hits zero (K)
const TEMPERATURE_WIDTH_K: f64 = 50.0;

/// Score above which complex alien life may exist anywhere
const ALIEN_THRESHOLD: f64 = 40.0;

/// Oxygen mole fraction counted as "free oxygen"
const FREE_OXYGEN_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitabilityInput {
    pub surface_temp_k: f64,
    pub pressure_bar: f64,
    /// Surface solvent, if a hydrosphere exists
    pub solvent: Option<Solvent>,
    /// Surface radiation index, Earth = 1
    pub radiation: f64,
    pub gravity_g: f64,
    pub oxygen_fraction: f64,
}

impl HabitabilityInput {
    pub fn from_hydrosphere(hydrosphere: &Hydrosphere) -> Option<Solvent> {
        hydrosphere.is_present().then_some(hydrosphere.composition)
    }

    fn optimum(&self) -> f64 {
        self.solvent.unwrap_or(Solvent::Water).optimum_temperature()
    }

    fn liquid_water(&self) -> bool {
        let (freeze, boil) = Solvent::Water.liquid_range();
        self.solvent == Some(Solvent::Water)
            && self.surface_temp_k >= freeze
            && self.surface_temp_k <= boil
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SubScores {
    temperature: f64,
    pressure: f64,
    radiation: f64,
    gravity: f64,
}

fn sub_scores(input: &HabitabilityInput) -> SubScores {
    let pressure = if input.pressure_bar > 0.0 {
        (1.0 - input.pressure_bar.log10().abs() / 2.0).max(0.0)
    } else {
        0.0
    };
    SubScores {
        temperature: (1.0 - (input.surface_temp_k - input.optimum()).abs() / TEMPERATURE_WIDTH_K)
            .max(0.0),
        pressure,
        radiation: (-input.radiation.max(0.0) / 10.0).exp(),
        gravity: (1.0 - (input.gravity_g - 1.0).abs() / 1.5).max(0.0),
    }
}

/// Weighted five-factor score in [0, 100] plus its tier
pub fn assess(input: &HabitabilityInput) -> Habitability {
    let s = sub_scores(input);
    let solvent = match input.solvent {
        Some(Solvent::Water) => SOLVENT_POINTS + WATER_BONUS_POINTS,
        Some(_) => SOLVENT_POINTS,
        None => 0.0,
    };
    let raw = TEMPERATURE_POINTS * s.temperature
        + PRESSURE_POINTS * s.pressure
        + solvent
        + RADIATION_POINTS * s.radiation
        + GRAVITY_POINTS * s.gravity;
    let score = if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 };

    Habitability {
        score,
        tier: tier(input, score),
    }
}

fn tier(input: &HabitabilityInput, score: f64) -> HabitabilityTier {
    let dt = (input.surface_temp_k - Solvent::Water.optimum_temperature()).abs();
    let water = input.liquid_water();

    let earth_like = water
        && dt <= 15.0
        && (0.5..=2.0).contains(&input.pressure_bar)
        && input.radiation < 5.0
        && (0.7..=1.5).contains(&input.gravity_g)
        && input.oxygen_fraction >= FREE_OXYGEN_FRACTION;
    if earth_like {
        return HabitabilityTier::EarthLike;
    }

    let human = water
        && dt <= 30.0
        && (0.3..=5.0).contains(&input.pressure_bar)
        && input.radiation < 20.0
        && (0.4..=2.0).contains(&input.gravity_g);
    if human {
        return HabitabilityTier::HumanHabitable;
    }

    if score > ALIEN_THRESHOLD {
        HabitabilityTier::AlienHabitable
    } else {
        HabitabilityTier::None
    }
}

/// Environment the biosphere draws its chemistry and energy from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiosphereEnvironment {
    pub solvent: Option<Solvent>,
    /// Stellar flux in Earth units
    pub stellar_flux: f64,
    pub tidal_heating_k: f64,
}

/// Spawns a biosphere with probability score/100.
///
/// Morphology escalates by tier: microbial always, flora above 60 with a
/// coin flip for fungal, fauna above 85 when flora is present.
pub fn generate_biosphere(rng: &mut SeededRng, score: f64, env: &BiosphereEnvironment) -> Option<Biosphere> {
    if score <= 0.0 || !rng.chance(score / 100.0) {
        return None;
    }

    let mut morphologies = vec![Morphology::Microbial];
    let mut complexity = Complexity::Microbial;
    if score > 60.0 {
        morphologies.push(Morphology::Flora);
        if rng.chance(0.5) {
            morphologies.push(Morphology::Fungal);
        }
        complexity = Complexity::Vegetative;
    }
    if score > 85.0 && morphologies.contains(&Morphology::Flora) {
        morphologies.push(Morphology::Fauna);
        complexity = Complexity::Animal;
    }

    let biochemistry = match env.solvent {
        Some(Solvent::Ammonia) => Biochemistry::CarbonAmmonia,
        Some(Solvent::Methane) => Biochemistry::SiliconMethane,
        Some(Solvent::Water) | None => Biochemistry::CarbonWater,
    };
    let energy_source = if env.stellar_flux >= 0.01 {
        EnergySource::Photosynthesis
    } else if env.tidal_heating_k > 10.0 {
        EnergySource::TidalHeat
    } else {
        EnergySource::Chemosynthesis
    };

    Some(Biosphere {
        complexity,
        coverage: (score / 100.0 * rng.range(0.5, 1.0)).clamp(0.0, 1.0),
        biochemistry,
        energy_source,
        morphologies,
    })
}
