//! Built-in preprocessing stages.
//!
//! Each stage is a pure transform over the route sequence. Stages are
//! constructed once from validated configuration; nothing here fails at
//! poll time.

use crate::pipeline::RoutePreprocessor;
use crate::routes::{Filter, Route};

/// Injects deployment-wide filters into every route: a configured prefix
/// before the route's own chain and a configured suffix after it.
#[derive(Debug, Clone, Default)]
pub struct DefaultFilters {
    prepend: Vec<Filter>,
    append: Vec<Filter>,
}

impl DefaultFilters {
    pub fn new(prepend: Vec<Filter>, append: Vec<Filter>) -> Self {
        Self { prepend, append }
    }

    pub fn is_empty(&self) -> bool {
        self.prepend.is_empty() && self.append.is_empty()
    }
}

impl RoutePreprocessor for DefaultFilters {
    fn process(&self, mut routes: Vec<Route>) -> Vec<Route> {
        if self.is_empty() {
            return routes;
        }
        for route in &mut routes {
            let mut chain =
                Vec::with_capacity(self.prepend.len() + route.filters.len() + self.append.len());
            chain.extend(self.prepend.iter().cloned());
            chain.append(&mut route.filters);
            chain.extend(self.append.iter().cloned());
            route.filters = chain;
        }
        routes
    }
}

/// Renames a filter wherever it appears, keeping its arguments.
#[derive(Debug, Clone)]
pub struct Editor {
    match_name: String,
    rename_to: String,
}

impl Editor {
    pub fn new(match_name: impl Into<String>, rename_to: impl Into<String>) -> Self {
        Self {
            match_name: match_name.into(),
            rename_to: rename_to.into(),
        }
    }
}

impl RoutePreprocessor for Editor {
    fn process(&self, mut routes: Vec<Route>) -> Vec<Route> {
        for route in &mut routes {
            for filter in &mut route.filters {
                if filter.name == self.match_name {
                    filter.name.clone_from(&self.rename_to);
                }
            }
        }
        routes
    }
}

/// For every route carrying a given filter, appends a clone of the route
/// with a new id and that filter renamed. The original stays in place.
#[derive(Debug, Clone)]
pub struct CloneRoute {
    id_suffix: String,
    match_filter: String,
    rename_to: String,
}

impl CloneRoute {
    pub fn new(
        id_suffix: impl Into<String>,
        match_filter: impl Into<String>,
        rename_to: impl Into<String>,
    ) -> Self {
        Self {
            id_suffix: id_suffix.into(),
            match_filter: match_filter.into(),
            rename_to: rename_to.into(),
        }
    }
}

impl RoutePreprocessor for CloneRoute {
    fn process(&self, mut routes: Vec<Route>) -> Vec<Route> {
        let mut clones = Vec::new();
        for route in &routes {
            if route.filters.iter().any(|f| f.name == self.match_filter) {
                let mut clone = route.clone();
                clone.id.push_str(&self.id_suffix);
                for filter in &mut clone.filters {
                    if filter.name == self.match_filter {
                        filter.name.clone_from(&self.rename_to);
                    }
                }
                clones.push(clone);
            }
        }
        routes.append(&mut clones);
        routes
    }
}
