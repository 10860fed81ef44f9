// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Mock implementations of the probe's capability traits for testing

use probe_collector::cassandra::RowCounter;
use probe_collector::disk::DiskUsageReader;
use probe_collector::error::ProbeError;
use probe_collector::nodetool::{
    parse_pending_compactions, parse_table_histograms, ClusterAdminTool, TableLatencies,
};
use probe_collector::system::SystemSampler;

/// Mock sampler returning fixed percentages
pub struct MockSystemSampler {
    pub cpu: String,
    pub memory: String,
}

impl SystemSampler for MockSystemSampler {
    fn cpu_usage(&self) -> Result<String, ProbeError> {
        Ok(self.cpu.clone())
    }

    fn memory_usage(&self) -> Result<String, ProbeError> {
        Ok(self.memory.clone())
    }
}

/// Mock admin tool that feeds canned `nodetool` output through the
/// real parsers.
pub struct MockAdminTool {
    pub histograms_output: String,
    pub compactionstats_output: String,
}

#[async_trait::async_trait]
impl ClusterAdminTool for MockAdminTool {
    async fn table_histograms(
        &self,
        _keyspace: &str,
        _table: &str,
    ) -> Result<TableLatencies, ProbeError> {
        Ok(parse_table_histograms(&self.histograms_output))
    }

    async fn compaction_stats(&self) -> Result<u64, ProbeError> {
        Ok(parse_pending_compactions(&self.compactionstats_output))
    }
}

/// Mock row counter returning a fixed count
pub struct MockRowCounter {
    pub count: i64,
}

#[async_trait::async_trait]
impl RowCounter for MockRowCounter {
    async fn count_rows(&self, _keyspace: &str, _table: &str) -> Result<i64, ProbeError> {
        Ok(self.count)
    }
}

/// Mock row counter whose query always fails
pub struct FailingRowCounter;

#[async_trait::async_trait]
impl RowCounter for FailingRowCounter {
    async fn count_rows(&self, keyspace: &str, table: &str) -> Result<i64, ProbeError> {
        Err(ProbeError::RowCount(format!(
            "table {keyspace}.{table} unavailable"
        )))
    }
}

/// Mock disk reader returning a fixed use%
pub struct MockDiskUsageReader {
    pub utilization: String,
}

#[async_trait::async_trait]
impl DiskUsageReader for MockDiskUsageReader {
    async fn root_utilization(&self) -> Result<String, ProbeError> {
        Ok(self.utilization.clone())
    }
}
