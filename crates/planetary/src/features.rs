//! Feature vectors for the classifier

use std::collections::BTreeMap;

use celestial::{CelestialBody, NodeId, RoleHint, System};
use rulepack::{FeatureSource, FeatureValue};
use units::Time;
use units::constants::STANDARD_GRAVITY;

/// Context a body cannot know about itself
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureContext {
    pub host_is_star: bool,
    pub has_ring_child: bool,
}

impl FeatureContext {
    /// Reads host and ring-child facts from the node tree.
    pub fn from_system(system: &System, id: &NodeId) -> Self {
        let host_is_star = system
            .get(id)
            .and_then(|n| n.parent_id.as_ref())
            .and_then(|p| system.get(p))
            .is_some_and(|p| p.is_star());
        let has_ring_child = system
            .children(id)
            .iter()
            .filter_map(|c| c.as_body())
            .any(|b| b.role_hint == RoleHint::Ring);
        Self {
            host_is_star,
            has_ring_child,
        }
    }
}

/// Named features plus the body's tags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyFeatures {
    values: BTreeMap<&'static str, FeatureValue>,
    tags: Vec<String>,
}

impl BodyFeatures {
    pub fn build(body: &CelestialBody, ctx: FeatureContext) -> Self {
        let physics = &body.physics;
        let orbit = body.orbit.as_ref();
        let archetype = body.archetype.map_or("none", |a| a.as_str());

        let mut values: BTreeMap<&'static str, FeatureValue> = BTreeMap::new();
        let mut put = |name: &'static str, value: FeatureValue| {
            values.insert(name, value);
        };

        put("role", body.role_hint.as_str().into());
        put("archetype", archetype.into());
        put("massEarth", body.mass.to_earth_masses().into());
        put("radiusEarth", body.radius.to_earth_radii().into());
        put("densityGcc", (body.density() / 1000.0).into());
        put("surfaceGravityG", (physics.surface_gravity / STANDARD_GRAVITY).into());
        // Orbit features stay absent for unbound bodies so comparisons miss
        if let Some(orbit) = orbit {
            put("semiMajorAxisAu", orbit.semi_major_axis().to_au().into());
            put("eccentricity", orbit.elements.eccentricity.into());
        }
        put(
            "orbitalPeriodDays",
            Time::from_seconds(physics.orbital_period_s).to_days().into(),
        );
        put("rotationPeriodHours", body.rotation_period_hours.into());
        put("tidallyLocked", body.tidally_locked.into());
        put("radiation", physics.radiation.into());
        put("tidalHeatK", physics.tidal_heating_k.into());
        put("greenhouseK", physics.greenhouse_k.into());
        put("equilibriumTempK", physics.equilibrium_temp_k.into());
        put("surfaceTempK", physics.surface_temp_k.into());
        put("magneticFieldGauss", body.magnetic_field_gauss.into());
        put("hasAtmosphere", body.atmosphere.is_present().into());
        put("atmosphereName", body.atmosphere.name.as_str().into());
        put("atmospherePressureBar", body.atmosphere.pressure_bar.into());
        put("atmosphereMolarMass", body.atmosphere.molar_mass.into());
        put("hydrosphereCoverage", body.hydrosphere.coverage.into());
        put(
            "hydrosphereComposition",
            if body.hydrosphere.is_present() {
                body.hydrosphere.composition.as_str()
            } else {
                "none"
            }
            .into(),
        );
        put("hostIsStar", ctx.host_is_star.into());
        put("hasRingChild", ctx.has_ring_child.into());

        Self {
            values,
            tags: body.tags.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }
}

impl FeatureSource for BodyFeatures {
    fn feature(&self, name: &str) -> Option<FeatureValue> {
        self.values.get(name).cloned()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
