//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! control plane. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::observability::LogFormat;
use crate::pipeline::{CloneRoute, DefaultFilters, Editor, Pipeline};
use crate::routes::Filter;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Polling loop settings.
    pub poller: PollerConfig,

    /// Route source settings.
    pub source: SourceConfig,

    /// Preprocessing stage settings.
    pub pipeline: PipelineConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Polling loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Seconds between poll cycles.
    pub interval_secs: u64,

    /// Filter names administratively blocked for this deployment. Routes
    /// using any of them are excluded from the snapshot.
    pub disabled_filters: Vec<String>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3,
            disabled_filters: Vec::new(),
        }
    }
}

/// Route source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the JSON route document.
    pub path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: "routes.json".to_string(),
        }
    }
}

/// Preprocessing stage configuration. Stage order at runtime is fixed:
/// default filters, then edits, then clones.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filters injected into every route.
    pub default_filters: DefaultFiltersConfig,

    /// Filter renames, applied in order.
    pub edit: Vec<EditConfig>,

    /// Route cloning rules, applied in order.
    pub clone: Vec<CloneConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DefaultFiltersConfig {
    /// Filters prepended before each route's own chain.
    pub prepend: Vec<Filter>,

    /// Filters appended after each route's own chain.
    pub append: Vec<Filter>,
}

/// One filter rename rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditConfig {
    /// Filter name to match exactly.
    pub match_filter: String,

    /// Replacement name.
    pub rename_to: String,
}

/// One route cloning rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloneConfig {
    /// Suffix appended to the cloned route's id.
    pub id_suffix: String,

    /// Filter name selecting routes to clone.
    pub match_filter: String,

    /// Name the matched filter gets in the clone.
    pub rename_to: String,
}

impl PipelineConfig {
    /// Build the runtime pipeline from validated configuration.
    pub fn build(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();

        let defaults = DefaultFilters::new(
            self.default_filters.prepend.clone(),
            self.default_filters.append.clone(),
        );
        if !defaults.is_empty() {
            pipeline = pipeline.with_default_filters(defaults);
        }

        for edit in &self.edit {
            pipeline = pipeline.with_editor(Editor::new(&edit.match_filter, &edit.rename_to));
        }
        for clone in &self.clone {
            pipeline = pipeline.with_cloner(CloneRoute::new(
                &clone.id_suffix,
                &clone.match_filter,
                &clone.rename_to,
            ));
        }

        pipeline
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log output format: pretty, compact or json.
    pub log_format: LogFormat,

    /// Whether to serve Prometheus metrics.
    pub metrics_enabled: bool,

    /// Bind address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9911".to_string(),
        }
    }
}
