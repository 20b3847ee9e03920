//! Route validation against reserved and disabled filter names.
//!
//! # Responsibilities
//! - Drop routes that use a predicate-only name as a filter
//! - Drop routes that use an administratively disabled filter
//!
//! # Design Decisions
//! - Membership checks are set lookups so per-route cost stays flat as
//!   configuration grows
//! - A route is rejected at its first offending filter; sibling routes and
//!   their relative order are untouched

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::routes::types::Route;

/// Names available only as predicates. A route using any of these as a
/// filter is invalid.
pub const RESERVED_PREDICATE_NAMES: [&str; 7] = [
    "PathSubtree",
    "Path",
    "Host",
    "PathRegexp",
    "Method",
    "Header",
    "HeaderRegexp",
];

fn reserved_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| RESERVED_PREDICATE_NAMES.into_iter().collect())
}

/// Filter names administratively blocked for a deployment. Built once at
/// poller construction, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DisabledFilters {
    names: HashSet<String>,
}

impl DisabledFilters {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Remove routes whose filter chain uses a reserved predicate name or a
/// disabled filter. Surviving routes pass through unmodified and keep
/// their relative order.
pub fn validate_routes(routes: Vec<Route>, disabled: &DisabledFilters) -> Vec<Route> {
    let reserved = reserved_set();

    routes
        .into_iter()
        .filter(|route| {
            for filter in &route.filters {
                if reserved.contains(filter.name.as_str()) {
                    tracing::error!(
                        route = %route.id,
                        filter = %filter.name,
                        "trying to use {:?} as filter, but it is only available as predicate",
                        filter.name
                    );
                    return false;
                }
                if !disabled.is_empty() && disabled.contains(&filter.name) {
                    tracing::error!(
                        route = %route.id,
                        filter = %filter.name,
                        "trying to use {:?} filter, which is disabled",
                        filter.name
                    );
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Impose the deterministic total order: ascending by route id.
///
/// The sort is stable so the result is a pure function of content rather
/// than of input order, which is what keeps serialized bytes and version
/// tags identical for set-equal route lists.
pub fn sort_routes(routes: &mut [Route]) {
    routes.sort_by(|a, b| a.id.cmp(&b.id));
}
