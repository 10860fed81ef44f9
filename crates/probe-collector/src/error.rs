// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors that abort a collection pass.
///
/// Missing patterns inside otherwise-successful tool output are not
/// errors; the parsers default those fields to empty/zero instead.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to connect to Cassandra: {0}")]
    Connect(String),

    #[error("Failed to sample {resource}: {reason}")]
    SystemSample {
        resource: &'static str,
        reason: String,
    },

    #[error("Failed to spawn {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Row count query failed: {0}")]
    RowCount(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ProbeError::InvalidConfig("contact point is empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: contact point is empty"
        );
    }

    #[test]
    fn test_system_sample_display() {
        let error = ProbeError::SystemSample {
            resource: "cpu",
            reason: "no aggregate cpu line".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to sample cpu: no aggregate cpu line"
        );
    }

    #[test]
    fn test_tool_spawn_has_source() {
        use std::error::Error;

        let error = ProbeError::ToolSpawn {
            tool: "nodetool".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.source().is_some());
    }
}
