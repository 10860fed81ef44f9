// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Root filesystem utilization via `df -h`.

use crate::error::ProbeError;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Reports the use% of the root mount.
#[async_trait]
pub trait DiskUsageReader {
    /// The use% field of the `/` row, e.g. `"40%"`; empty when the
    /// row is absent.
    async fn root_utilization(&self) -> Result<String, ProbeError>;
}

/// Runs the real `df` binary as a child process
pub struct DfReader {
    path: String,
}

impl DfReader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DiskUsageReader for DfReader {
    async fn root_utilization(&self) -> Result<String, ProbeError> {
        debug!("Running {} -h", self.path);
        let output = Command::new(&self.path)
            .arg("-h")
            .output()
            .await
            .map_err(|source| ProbeError::ToolSpawn {
                tool: self.path.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ProbeError::ToolFailed {
                tool: format!("{} -h", self.path),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&stderr);
        Ok(parse_root_utilization(&combined))
    }
}

/// Scans `df` output for the row mounted at `/` and returns its use%
/// field; empty string when no such row exists.
pub fn parse_root_utilization(output: &str) -> String {
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() >= 6 && fields[5] == "/" {
            return fields[4].to_string();
        }
    }
    String::new()
}
