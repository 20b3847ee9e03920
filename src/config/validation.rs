//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, addresses parse)
//! - Check stage rules are well-formed before polling ever starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: Config → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::Config;

/// One semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.poller.interval_secs == 0 {
        errors.push(ValidationError {
            field: "poller.interval_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    for (i, name) in config.poller.disabled_filters.iter().enumerate() {
        if name.is_empty() {
            errors.push(ValidationError {
                field: format!("poller.disabled_filters[{i}]"),
                message: "filter name must not be empty".into(),
            });
        }
    }

    if config.source.path.is_empty() {
        errors.push(ValidationError {
            field: "source.path".into(),
            message: "must not be empty".into(),
        });
    }

    for (i, filter) in config
        .pipeline
        .default_filters
        .prepend
        .iter()
        .chain(&config.pipeline.default_filters.append)
        .enumerate()
    {
        if filter.name.is_empty() {
            errors.push(ValidationError {
                field: format!("pipeline.default_filters[{i}]"),
                message: "filter name must not be empty".into(),
            });
        }
    }

    for (i, edit) in config.pipeline.edit.iter().enumerate() {
        if edit.match_filter.is_empty() || edit.rename_to.is_empty() {
            errors.push(ValidationError {
                field: format!("pipeline.edit[{i}]"),
                message: "match_filter and rename_to must not be empty".into(),
            });
        }
    }

    for (i, clone) in config.pipeline.clone.iter().enumerate() {
        if clone.id_suffix.is_empty() {
            errors.push(ValidationError {
                field: format!("pipeline.clone[{i}].id_suffix"),
                message: "must not be empty".into(),
            });
        }
        if clone.match_filter.is_empty() || clone.rename_to.is_empty() {
            errors.push(ValidationError {
                field: format!("pipeline.clone[{i}]"),
                message: "match_filter and rename_to must not be empty".into(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "{:?} is not a valid socket address",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CloneConfig, EditConfig};

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = Config::default();
        config.poller.interval_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "poller.interval_secs"));
    }

    #[test]
    fn empty_source_path_is_rejected() {
        let mut config = Config::default();
        config.source.path = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "source.path"));
    }

    #[test]
    fn malformed_stage_rules_are_rejected() {
        let mut config = Config::default();
        config.pipeline.edit.push(EditConfig {
            match_filter: String::new(),
            rename_to: "x".into(),
        });
        config.pipeline.clone.push(CloneConfig {
            id_suffix: String::new(),
            match_filter: "a".into(),
            rename_to: "b".into(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = Config::default();
        config.poller.interval_secs = 0;
        config.source.path = String::new();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
