use std::fmt;

use serde::{Deserialize, Serialize};
use units::{Length, Mass};
use uuid::Uuid;

use crate::body::CelestialBody;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for NodeId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Center of mass of two or more members.
///
/// Member orbits are derived from the barycenter, never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barycenter {
    pub member_ids: Vec<NodeId>,
    #[serde(rename = "effectiveMassKg", default)]
    pub effective_mass: Mass,
    /// Sum of the members' distances from the barycenter
    #[serde(default)]
    pub separation: Length,
    /// Shared mean motion of the members, rad/s
    #[serde(default)]
    pub mean_motion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    Body(CelestialBody),
    Barycenter(Barycenter),
}

/// Any member of a system. Nodes form a tree through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>,
    /// Set once a user renames the node; auto-renaming then leaves it alone
    #[serde(default)]
    pub user_named: bool,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn body(id: NodeId, name: impl Into<String>, parent_id: Option<NodeId>, body: CelestialBody) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            user_named: false,
            kind: NodeKind::Body(body),
        }
    }

    pub fn barycenter(id: NodeId, name: impl Into<String>, barycenter: Barycenter) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            user_named: false,
            kind: NodeKind::Barycenter(barycenter),
        }
    }

    pub fn as_body(&self) -> Option<&CelestialBody> {
        match &self.kind {
            NodeKind::Body(body) => Some(body),
            NodeKind::Barycenter(_) => None,
        }
    }

    pub fn as_body_mut(&mut self) -> Option<&mut CelestialBody> {
        match &mut self.kind {
            NodeKind::Body(body) => Some(body),
            NodeKind::Barycenter(_) => None,
        }
    }

    pub fn as_barycenter(&self) -> Option<&Barycenter> {
        match &self.kind {
            NodeKind::Barycenter(bary) => Some(bary),
            NodeKind::Body(_) => None,
        }
    }

    pub fn as_barycenter_mut(&mut self) -> Option<&mut Barycenter> {
        match &mut self.kind {
            NodeKind::Barycenter(bary) => Some(bary),
            NodeKind::Body(_) => None,
        }
    }

    pub fn is_star(&self) -> bool {
        self.as_body().is_some_and(|b| b.is_star())
    }

    /// Body mass, or the aggregate mass of a barycenter
    pub fn mass(&self) -> Mass {
        match &self.kind {
            NodeKind::Body(body) => body.mass,
            NodeKind::Barycenter(bary) => bary.effective_mass,
        }
    }

    /// Semi-major axis of this node's orbit around its parent
    pub fn orbital_distance(&self) -> Length {
        self.as_body()
            .and_then(|b| b.orbit.as_ref())
            .map_or(Length::zero(), |o| o.semi_major_axis())
    }
}
