//! Classifier rule expressions
//!
//! A rule's condition is a small boolean expression tree evaluated against
//! a body's feature vector and tag set.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing numeric features for equality
const EQ_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view; booleans read as 0/1, text has none
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Text(_) => None,
        }
    }

    fn matches(&self, other: &FeatureValue) -> bool {
        match (self, other) {
            (FeatureValue::Text(a), FeatureValue::Text(b)) => a == b,
            (FeatureValue::Bool(a), FeatureValue::Bool(b)) => a == b,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => (x - y).abs() <= EQ_EPSILON,
                _ => false,
            },
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

/// Anything that can answer feature and tag lookups for a rule.
pub trait FeatureSource {
    fn feature(&self, name: &str) -> Option<FeatureValue>;
    fn has_tag(&self, tag: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Expr {
    All { of: Vec<Expr> },
    Any { of: Vec<Expr> },
    Not { expr: Box<Expr> },
    Gt { feature: String, value: f64 },
    Lt { feature: String, value: f64 },
    /// Inclusive on both ends
    Between { feature: String, min: f64, max: f64 },
    Eq { feature: String, value: FeatureValue },
    HasTag { tag: String },
}

impl Expr {
    /// Evaluates the expression. Comparisons against a missing or
    /// non-numeric feature are false.
    pub fn evaluate<S: FeatureSource + ?Sized>(&self, source: &S) -> bool {
        let number = |feature: &str| source.feature(feature).and_then(|v| v.as_number());
        match self {
            Expr::All { of } => of.iter().all(|e| e.evaluate(source)),
            Expr::Any { of } => of.iter().any(|e| e.evaluate(source)),
            Expr::Not { expr } => !expr.evaluate(source),
            Expr::Gt { feature, value } => number(feature).is_some_and(|x| x > *value),
            Expr::Lt { feature, value } => number(feature).is_some_and(|x| x < *value),
            Expr::Between { feature, min, max } => {
                number(feature).is_some_and(|x| x >= *min && x <= *max)
            }
            Expr::Eq { feature, value } => source
                .feature(feature)
                .is_some_and(|actual| actual.matches(value)),
            Expr::HasTag { tag } => source.has_tag(tag),
        }
    }
}
