//! Body factory
//!
//! Every node the generator or an edit creates comes from here, so
//! generated and hand-added bodies share one shape with safe defaults.

use celestial::{CelestialBody, Node, NodeId, RoleHint, SeededRng};
use units::{Length, Mass};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub role: RoleHint,
    pub parent_id: Option<NodeId>,
    pub mass: Option<Mass>,
    pub radius: Option<Length>,
}

impl BodyConfig {
    pub fn new(name: impl Into<String>, role: RoleHint, parent_id: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            role,
            parent_id,
            mass: None,
            radius: None,
        }
    }

    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_radius(mut self, radius: Length) -> Self {
        self.radius = Some(radius);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BodyFactory;

impl BodyFactory {
    pub fn new() -> Self {
        Self
    }

    /// A fresh id drawn from the generation stream
    pub fn next_id(&self, rng: &mut SeededRng) -> NodeId {
        NodeId::from(rng.next_uuid())
    }

    /// A body node with zero mass and radius unless overridden, no
    /// atmosphere, hydrosphere or biosphere, and empty class and tag lists.
    /// Stars start with Sun-like surface properties.
    pub fn create_body(&self, rng: &mut SeededRng, config: BodyConfig) -> Node {
        let mut body = CelestialBody::empty(config.role);
        body.mass = config.mass.unwrap_or_default();
        body.radius = config.radius.unwrap_or_default();
        Node::body(self.next_id(rng), config.name, config.parent_id, body)
    }

    pub fn create_from_template(&self, _template: &str) -> Result<Node> {
        Err(Error::NotImplemented("create_from_template"))
    }
}
