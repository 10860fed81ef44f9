// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::ProbeError;
use std::env;

/// Configuration for one probe run.
///
/// The row-count query interpolates keyspace and table names into CQL,
/// so `validate` restricts them to plain identifiers.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Cassandra contact point, host:port
    pub contact_point: String,
    /// Keyspace the session switches to; also the histograms keyspace
    pub keyspace: String,
    /// Table passed to `nodetool tablehistograms`
    pub table: String,
    /// Keyspace for the row-count query
    pub count_keyspace: String,
    /// Table for the row-count query
    pub count_table: String,
    /// Path to the `nodetool` binary
    pub nodetool_path: String,
    /// Path to the `df` binary
    pub df_path: String,
    /// Log level (e.g. trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            contact_point: "127.0.0.1:9042".to_string(),
            keyspace: "metrics".to_string(),
            table: "stats".to_string(),
            count_keyspace: "dse_perf".to_string(),
            count_table: "user_io".to_string(),
            nodetool_path: "nodetool".to_string(),
            df_path: "df".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ProbeConfig {
    /// Create configuration from `PROBE_*` environment variables
    pub fn from_env() -> Result<Self, ProbeError> {
        let defaults = ProbeConfig::default();

        let config = Self {
            contact_point: env::var("PROBE_CONTACT_POINT").unwrap_or(defaults.contact_point),
            keyspace: env::var("PROBE_KEYSPACE").unwrap_or(defaults.keyspace),
            table: env::var("PROBE_TABLE").unwrap_or(defaults.table),
            count_keyspace: env::var("PROBE_COUNT_KEYSPACE").unwrap_or(defaults.count_keyspace),
            count_table: env::var("PROBE_COUNT_TABLE").unwrap_or(defaults.count_table),
            nodetool_path: env::var("PROBE_NODETOOL_PATH").unwrap_or(defaults.nodetool_path),
            df_path: env::var("PROBE_DF_PATH").unwrap_or(defaults.df_path),
            log_level: env::var("PROBE_LOG_LEVEL")
                .map(|val| val.to_lowercase())
                .unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.contact_point.trim().is_empty() {
            return Err(ProbeError::InvalidConfig(
                "PROBE_CONTACT_POINT cannot be empty".to_string(),
            ));
        }

        if self.nodetool_path.trim().is_empty() {
            return Err(ProbeError::InvalidConfig(
                "PROBE_NODETOOL_PATH cannot be empty".to_string(),
            ));
        }

        if self.df_path.trim().is_empty() {
            return Err(ProbeError::InvalidConfig(
                "PROBE_DF_PATH cannot be empty".to_string(),
            ));
        }

        for (name, value) in [
            ("PROBE_KEYSPACE", &self.keyspace),
            ("PROBE_TABLE", &self.table),
            ("PROBE_COUNT_KEYSPACE", &self.count_keyspace),
            ("PROBE_COUNT_TABLE", &self.count_table),
        ] {
            if !is_identifier(value) {
                return Err(ProbeError::InvalidConfig(format!(
                    "{name} must be a plain CQL identifier, got '{value}'"
                )));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(ProbeError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
