// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The collection pass: one strictly linear pull of every metric,
//! aborting on the first fatal error with no partial output.

use std::sync::Arc;
use tracing::debug;

use crate::cassandra::RowCounter;
use crate::config::ProbeConfig;
use crate::disk::DiskUsageReader;
use crate::error::ProbeError;
use crate::nodetool::ClusterAdminTool;
use crate::system::SystemSampler;

/// One immutable set of collected values, discarded at process exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub cpu_usage: String,
    pub memory_usage: String,
    pub read_latency: String,
    pub write_latency: String,
    pub pending_compactions: u64,
    /// Row count over the configured table, reported under the
    /// `active_connections` label.
    pub active_connections: i64,
    pub storage_utilization: String,
}

impl MetricsSnapshot {
    /// Renders the seven `label: value` lines in their fixed order.
    pub fn render(&self) -> String {
        format!(
            "cpu: {}\n\
             memory: {}\n\
             read_latency: {}\n\
             write_latency: {}\n\
             pending_compactions: {}\n\
             active_connections: {}\n\
             storage_utilization: {}\n",
            self.cpu_usage,
            self.memory_usage,
            self.read_latency,
            self.write_latency,
            self.pending_compactions,
            self.active_connections,
            self.storage_utilization,
        )
    }
}

pub struct MetricsCollector {
    pub config: Arc<ProbeConfig>,
    pub system: Arc<dyn SystemSampler + Send + Sync>,
    pub admin_tool: Arc<dyn ClusterAdminTool + Send + Sync>,
    pub row_counter: Arc<dyn RowCounter + Send + Sync>,
    pub disk: Arc<dyn DiskUsageReader + Send + Sync>,
}

impl MetricsCollector {
    pub fn new(
        config: Arc<ProbeConfig>,
        system: Arc<dyn SystemSampler + Send + Sync>,
        admin_tool: Arc<dyn ClusterAdminTool + Send + Sync>,
        row_counter: Arc<dyn RowCounter + Send + Sync>,
        disk: Arc<dyn DiskUsageReader + Send + Sync>,
    ) -> Self {
        Self {
            config,
            system,
            admin_tool,
            row_counter,
            disk,
        }
    }

    /// Runs the collection pass. The first error aborts the pass; the
    /// caller decides how to report it.
    pub async fn collect(&self) -> Result<MetricsSnapshot, ProbeError> {
        debug!("Sampling host CPU");
        let cpu_usage = self.system.cpu_usage()?;

        debug!("Sampling host memory");
        let memory_usage = self.system.memory_usage()?;

        debug!(
            "Fetching table histograms for {}.{}",
            self.config.keyspace, self.config.table
        );
        let latencies = self
            .admin_tool
            .table_histograms(&self.config.keyspace, &self.config.table)
            .await?;

        debug!("Fetching compaction stats");
        let pending_compactions = self.admin_tool.compaction_stats().await?;

        debug!(
            "Counting rows in {}.{}",
            self.config.count_keyspace, self.config.count_table
        );
        let active_connections = self
            .row_counter
            .count_rows(&self.config.count_keyspace, &self.config.count_table)
            .await?;

        debug!("Reading root filesystem utilization");
        let storage_utilization = self.disk.root_utilization().await?;

        Ok(MetricsSnapshot {
            cpu_usage,
            memory_usage,
            read_latency: latencies.read,
            write_latency: latencies.write,
            pending_compactions,
            active_connections,
            storage_utilization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fixed_labels_and_order() {
        let snapshot = MetricsSnapshot {
            cpu_usage: "12.34%".to_string(),
            memory_usage: "56.78%".to_string(),
            read_latency: "4.45 ms".to_string(),
            write_latency: "2.23 ms".to_string(),
            pending_compactions: 7,
            active_connections: 3,
            storage_utilization: "40%".to_string(),
        };
        assert_eq!(
            snapshot.render(),
            "cpu: 12.34%\n\
             memory: 56.78%\n\
             read_latency: 4.45 ms\n\
             write_latency: 2.23 ms\n\
             pending_compactions: 7\n\
             active_connections: 3\n\
             storage_utilization: 40%\n"
        );
    }

    #[test]
    fn test_render_empty_silent_defaults() {
        let snapshot = MetricsSnapshot {
            cpu_usage: "0.00%".to_string(),
            memory_usage: "0.00%".to_string(),
            read_latency: String::new(),
            write_latency: String::new(),
            pending_compactions: 0,
            active_connections: 0,
            storage_utilization: String::new(),
        };
        let rendered = snapshot.render();
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.contains("read_latency: \n"));
        assert!(rendered.contains("pending_compactions: 0\n"));
    }
}
