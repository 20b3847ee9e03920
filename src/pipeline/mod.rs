//! Route preprocessing pipeline.
//!
//! # Data Flow
//! ```text
//! Fetched routes
//!     → default filters (if configured)
//!     → oauth2 grant preprocessor (if configured)
//!     → editors, in configured order
//!     → cloners, in configured order
//! ```
//!
//! # Design Decisions
//! - Stage presence and order are fixed at construction, immutable while
//!   polling
//! - Stages are pure and non-failing; anything that can go wrong is
//!   rejected when the configuration is loaded

pub mod stages;

use crate::routes::Route;

pub use stages::{CloneRoute, DefaultFilters, Editor};

/// A pure transform over the route sequence.
pub trait RoutePreprocessor: Send + Sync {
    fn process(&self, routes: Vec<Route>) -> Vec<Route>;
}

/// The ordered stage set applied to every fetched route set.
#[derive(Default)]
pub struct Pipeline {
    default_filters: Option<DefaultFilters>,
    oauth2: Option<Box<dyn RoutePreprocessor>>,
    editors: Vec<Editor>,
    cloners: Vec<CloneRoute>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_filters(mut self, stage: DefaultFilters) -> Self {
        self.default_filters = Some(stage);
        self
    }

    /// Install the grant preprocessor slot. The concrete transform is an
    /// external collaborator; any boxed preprocessor fits.
    pub fn with_oauth2(mut self, stage: Box<dyn RoutePreprocessor>) -> Self {
        self.oauth2 = Some(stage);
        self
    }

    pub fn with_editor(mut self, stage: Editor) -> Self {
        self.editors.push(stage);
        self
    }

    pub fn with_cloner(mut self, stage: CloneRoute) -> Self {
        self.cloners.push(stage);
        self
    }

    /// Apply all configured stages in their fixed order.
    pub fn apply(&self, mut routes: Vec<Route>) -> Vec<Route> {
        if let Some(stage) = &self.default_filters {
            routes = stage.process(routes);
        }
        if let Some(stage) = &self.oauth2 {
            routes = stage.process(routes);
        }
        for editor in &self.editors {
            routes = editor.process(routes);
        }
        for cloner in &self.cloners {
            routes = cloner.process(routes);
        }
        routes
    }
}
