use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use units::Length;

use crate::node::NodeId;

/// Classical Keplerian elements. Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalElements {
    pub semi_major_axis: Length,
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination: f64,
    #[serde(default)]
    pub arg_periapsis: f64,
    #[serde(default)]
    pub ascending_node: f64,
    /// Mean anomaly at the orbit's epoch
    #[serde(default)]
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub fn circular(semi_major_axis: Length) -> Self {
        Self {
            semi_major_axis,
            eccentricity: 0.0,
            inclination: 0.0,
            arg_periapsis: 0.0,
            ascending_node: 0.0,
            mean_anomaly: 0.0,
        }
    }

    pub fn periapsis(&self) -> Length {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> Length {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

/// An orbit around a host node.
///
/// `host_id` always equals the owning node's `parent_id`; the processor
/// resynchronizes it together with `host_mu` on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orbit {
    pub host_id: NodeId,
    /// Gravitational parameter of the host, G·M in m³/s²
    #[serde(default)]
    pub host_mu: f64,
    /// Epoch of `elements.mean_anomaly`, seconds
    #[serde(default)]
    pub t0: f64,
    pub elements: OrbitalElements,
    /// Precomputed mean motion in rad/s; derived from `host_mu` when absent
    #[serde(default)]
    pub mean_motion: Option<f64>,
    #[serde(default)]
    pub retrograde: bool,
}

impl Orbit {
    pub fn new(host_id: NodeId, host_mu: f64, elements: OrbitalElements) -> Self {
        Self {
            host_id,
            host_mu,
            t0: 0.0,
            elements,
            mean_motion: None,
            retrograde: false,
        }
    }

    pub fn semi_major_axis(&self) -> Length {
        self.elements.semi_major_axis
    }

    /// Mean motion in rad/s, zero when the host has no mass
    pub fn mean_motion(&self) -> f64 {
        if let Some(n) = self.mean_motion {
            return n;
        }
        keplerian_mean_motion(self.host_mu, self.elements.semi_major_axis)
    }

    /// Orbital period in seconds, zero for a degenerate orbit
    pub fn period(&self) -> f64 {
        let n = self.mean_motion();
        if n > 0.0 { TAU / n } else { 0.0 }
    }
}

/// n = √(μ / a³)
pub fn keplerian_mean_motion(mu: f64, semi_major_axis: Length) -> f64 {
    let a = semi_major_axis.to_m();
    if mu <= 0.0 || a <= 0.0 {
        return 0.0;
    }
    (mu / a.powi(3)).sqrt()
}
