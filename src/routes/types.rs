//! Route data model.
//!
//! This module defines the route structures the poller carries through its
//! pipeline. All types derive Serde traits so route documents can be loaded
//! from external sources.

use serde::{Deserialize, Serialize};

/// A single route: a unique id, matching predicates, a filter chain and a
/// backend. Predicates and backends are opaque to the control plane; only
/// the id and the filter names participate in validation and ordering.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Route {
    /// Unique identifier within one snapshot.
    pub id: String,

    /// Matching conditions, evaluated by the serving engine.
    #[serde(default)]
    pub predicates: Vec<Predicate>,

    /// Ordered filter chain applied by the serving engine.
    #[serde(default)]
    pub filters: Vec<Filter>,

    /// Where matched traffic goes.
    #[serde(default)]
    pub backend: Backend,
}

/// A matching condition attached to a route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Predicate {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Arg>,
}

/// A named, argument-carrying transformation attached to a route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Filter {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Arg>,
}

impl Filter {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// A typed predicate or filter argument.
///
/// Route documents historically carried arbitrary argument lists coerced at
/// use-time; here the accepted shapes are fixed at deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Arg {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Num(n)
    }
}

/// Backend kind for a route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Forward to a network address.
    Network(String),
    /// Respond directly without a backend.
    Shunt,
    /// Re-enter route lookup.
    Loopback,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Shunt
    }
}
