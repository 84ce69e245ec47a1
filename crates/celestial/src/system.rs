//! System root object and node arena
//!
//! Nodes live in an insertion-ordered arena keyed by id. Every relationship
//! (parent, orbit host, barycenter members) is an id lookup into the arena.

use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use units::{Length, Mass};
use uuid::Uuid;

use crate::body::CelestialBody;
use crate::node::{Node, NodeId};

/// Identifies the rule configuration a system was built with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulePackRef {
    pub id: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub id: Uuid,
    pub seed: String,
    pub name: String,
    pub age_gyr: f64,
    /// Simulation epoch in seconds
    #[serde(default)]
    pub epoch: f64,
    #[serde(default)]
    pub rulepack: RulePackRef,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Incremented by every structural edit
    #[serde(default)]
    pub revision: u32,
    #[serde(with = "node_list", default)]
    pub nodes: IndexMap<NodeId, Node>,
}

impl System {
    pub fn new(seed: impl Into<String>, name: impl Into<String>, age_gyr: f64) -> Self {
        let seed = seed.into();
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()),
            seed,
            name: name.into(),
            age_gyr,
            epoch: 0.0,
            rulepack: RulePackRef::default(),
            tags: Vec::new(),
            revision: 0,
            nodes: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn body(&self, id: &NodeId) -> Option<&CelestialBody> {
        self.nodes.get(id).and_then(Node::as_body)
    }

    pub fn body_mut(&mut self, id: &NodeId) -> Option<&mut CelestialBody> {
        self.nodes.get_mut(id).and_then(Node::as_body_mut)
    }

    /// The first parentless node
    pub fn root(&self) -> Option<&Node> {
        self.nodes.values().find(|n| n.parent_id.is_none())
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root().map(|n| n.id.clone())
    }

    pub fn children(&self, id: &NodeId) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.parent_id.as_ref() == Some(id))
            .collect()
    }

    pub fn child_ids(&self, id: &NodeId) -> Vec<NodeId> {
        self.children(id).into_iter().map(|n| n.id.clone()).collect()
    }

    /// Parent chain starting at the immediate parent, ending at the root.
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(id).and_then(|n| n.parent_id.clone());
        while let Some(parent) = current {
            // Guards against malformed cyclic input
            if chain.contains(&parent) || chain.len() > self.nodes.len() {
                break;
            }
            current = self.nodes.get(&parent).and_then(|n| n.parent_id.clone());
            chain.push(parent);
        }
        chain
    }

    /// All descendants of `id` in breadth-first order, excluding `id`.
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([id.clone()]);
        while let Some(current) = queue.pop_front() {
            for child in self.child_ids(&current) {
                if child != *id && !out.contains(&child) {
                    out.push(child.clone());
                    queue.push_back(child);
                }
            }
        }
        out
    }

    pub fn stars(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.is_star())
    }

    pub fn mass_of(&self, id: &NodeId) -> Mass {
        self.nodes.get(id).map_or(Mass::zero(), Node::mass)
    }

    /// Nearest star at or above `id`, if any
    pub fn host_star(&self, id: &NodeId) -> Option<&Node> {
        if let Some(node) = self.nodes.get(id).filter(|n| n.is_star()) {
            return Some(node);
        }
        self.ancestors(id)
            .into_iter()
            .filter_map(|a| self.nodes.get(&a))
            .find(|n| n.is_star())
    }

    /// Distance between two nodes approximated by summing semi-major axes
    /// along the tree path through their lowest common ancestor.
    ///
    /// This is not a geometric distance; for a planet around one member of
    /// a binary it adds both stars' barycentric distances.
    pub fn path_distance(&self, from: &NodeId, to: &NodeId) -> Length {
        if from == to {
            return Length::zero();
        }
        let mut from_chain = vec![from.clone()];
        from_chain.extend(self.ancestors(from));
        let mut to_chain = vec![to.clone()];
        to_chain.extend(self.ancestors(to));

        let Some(common) = from_chain.iter().find(|id| to_chain.contains(id)) else {
            return Length::zero();
        };

        let leg = |chain: &[NodeId]| -> Length {
            chain
                .iter()
                .take_while(|id| *id != common)
                .filter_map(|id| self.nodes.get(id))
                .map(Node::orbital_distance)
                .sum()
        };
        leg(&from_chain) + leg(&to_chain)
    }
}

/// Serializes the arena as a flat list of nodes and rebuilds the id index
/// on the way back in.
mod node_list {
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::node::{Node, NodeId};

    pub fn serialize<S>(nodes: &IndexMap<NodeId, Node>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(nodes.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IndexMap<NodeId, Node>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Node>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|n| (n.id.clone(), n)).collect())
    }
}
