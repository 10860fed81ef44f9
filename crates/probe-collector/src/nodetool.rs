// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! `nodetool` invocation and output scanning.
//!
//! The probe treats latency histograms as opaque strings and only
//! extracts the pending-task count from compaction stats. A missing
//! line inside successful tool output is a silent default, not an
//! error; a spawn failure or non-zero exit aborts the run.

use crate::error::ProbeError;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

const READ_HISTOGRAM_PREFIX: &str = "Read latency histogram:";
const WRITE_HISTOGRAM_PREFIX: &str = "Write latency histogram:";
const PENDING_TASKS_PREFIX: &str = "pending tasks:";

/// Read/write latency summaries as reported by `nodetool tablehistograms`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableLatencies {
    pub read: String,
    pub write: String,
}

/// Cluster administration commands the probe needs.
#[async_trait]
pub trait ClusterAdminTool {
    async fn table_histograms(
        &self,
        keyspace: &str,
        table: &str,
    ) -> Result<TableLatencies, ProbeError>;

    async fn compaction_stats(&self) -> Result<u64, ProbeError>;
}

/// Runs the real `nodetool` binary as a child process
pub struct NodetoolRunner {
    path: String,
}

impl NodetoolRunner {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Spawns `nodetool` with the given arguments and returns its
    /// combined stdout + stderr on success.
    async fn run(&self, args: &[&str]) -> Result<String, ProbeError> {
        debug!("Running {} {}", self.path, args.join(" "));
        let output = Command::new(&self.path)
            .args(args)
            .output()
            .await
            .map_err(|source| ProbeError::ToolSpawn {
                tool: self.path.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ProbeError::ToolFailed {
                tool: format!("{} {}", self.path, args.join(" ")),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&stderr);
        Ok(combined)
    }
}

#[async_trait]
impl ClusterAdminTool for NodetoolRunner {
    async fn table_histograms(
        &self,
        keyspace: &str,
        table: &str,
    ) -> Result<TableLatencies, ProbeError> {
        let output = self.run(&["tablehistograms", keyspace, table]).await?;
        Ok(parse_table_histograms(&output))
    }

    async fn compaction_stats(&self) -> Result<u64, ProbeError> {
        let output = self.run(&["compactionstats"]).await?;
        Ok(parse_pending_compactions(&output))
    }
}

/// Scans `tablehistograms` output for the read/write histogram lines.
///
/// Returns the trimmed remainder after each prefix; a latency stays
/// empty when its line never appears.
pub fn parse_table_histograms(output: &str) -> TableLatencies {
    let mut latencies = TableLatencies::default();
    for line in output.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(READ_HISTOGRAM_PREFIX) {
            latencies.read = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(WRITE_HISTOGRAM_PREFIX) {
            latencies.write = rest.trim().to_string();
        }
    }
    latencies
}

/// Scans `compactionstats` output for the first `pending tasks:` line.
///
/// An absent line or unparseable count yields 0.
pub fn parse_pending_compactions(output: &str) -> u64 {
    for line in output.lines() {
        if let Some(rest) = line.trim().strip_prefix(PENDING_TASKS_PREFIX) {
            return rest.trim().parse().unwrap_or(0);
        }
    }
    0
}
