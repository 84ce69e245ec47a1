//! Data-driven generation rules
//!
//! A [`RulePack`] supplies weighted distributions, stellar and planetary
//! templates, atmosphere definitions, the classifier rule list and the
//! tunable generation parameters.

pub mod error;
pub mod expr;
pub mod pack;
pub mod table;

#[cfg(test)]
mod pack_test;

pub use error::{Error, Result};
pub use expr::{Expr, FeatureSource, FeatureValue};
pub use pack::{
    AtmosphereDef, BinaryRules, ClassRule, ClassifierConfig, GenerationParams, MassClass,
    PlanetTemplate, RulePack, StarTemplate, TitiusBode,
};
pub use table::{Span, WeightedTable};
