// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Host CPU and memory sampling from procfs.
//!
//! One instantaneous sample per run: CPU utilization is the non-idle
//! share of aggregate jiffies since boot, memory utilization is
//! `(MemTotal - MemAvailable) / MemTotal`.

use crate::error::ProbeError;
use std::fs;
use tracing::debug;

const PROC_STAT_PATH: &str = "/proc/stat"; // Aggregate "cpu " line holds jiffy counters since boot
const PROC_MEMINFO_PATH: &str = "/proc/meminfo"; // MemTotal / MemAvailable in kB

/// Samples host-level utilization percentages.
pub trait SystemSampler {
    /// CPU utilization, rendered like `"12.34%"`
    fn cpu_usage(&self) -> Result<String, ProbeError>;
    /// Memory utilization, rendered like `"56.78%"`
    fn memory_usage(&self) -> Result<String, ProbeError>;
}

/// The real sampler, reading procfs
pub struct ProcfsSampler;

impl SystemSampler for ProcfsSampler {
    fn cpu_usage(&self) -> Result<String, ProbeError> {
        let contents = fs::read_to_string(PROC_STAT_PATH).map_err(|e| ProbeError::SystemSample {
            resource: "cpu",
            reason: format!("could not read {PROC_STAT_PATH}: {e}"),
        })?;
        let pct = cpu_percent_from_stat(&contents).ok_or_else(|| ProbeError::SystemSample {
            resource: "cpu",
            reason: format!("no parseable aggregate cpu line in {PROC_STAT_PATH}"),
        })?;
        debug!("CPU utilization: {pct:.2}%");
        Ok(format_percentage(pct))
    }

    fn memory_usage(&self) -> Result<String, ProbeError> {
        let contents =
            fs::read_to_string(PROC_MEMINFO_PATH).map_err(|e| ProbeError::SystemSample {
                resource: "memory",
                reason: format!("could not read {PROC_MEMINFO_PATH}: {e}"),
            })?;
        let pct = memory_percent_from_meminfo(&contents).ok_or_else(|| ProbeError::SystemSample {
            resource: "memory",
            reason: format!("MemTotal/MemAvailable missing from {PROC_MEMINFO_PATH}"),
        })?;
        debug!("Memory utilization: {pct:.2}%");
        Ok(format_percentage(pct))
    }
}

fn format_percentage(pct: f64) -> String {
    format!("{pct:.2}%")
}

/// Computes CPU utilization since boot from the aggregate `cpu ` line.
///
/// Fields after the label are jiffy counters: user, nice, system,
/// idle, iowait, irq, softirq, steal, ... Idle time is idle + iowait.
fn cpu_percent_from_stat(contents: &str) -> Option<f64> {
    let line = contents.lines().find(|line| line.starts_with("cpu "))?;
    let jiffies = line
        .split_whitespace()
        .skip(1)
        .map(str::parse::<u64>)
        .collect::<Result<Vec<u64>, _>>()
        .ok()?;
    if jiffies.len() < 4 {
        return None;
    }
    let total: u64 = jiffies.iter().sum();
    if total == 0 {
        return None;
    }
    let idle = jiffies[3] + jiffies.get(4).copied().unwrap_or(0);
    Some((total - idle) as f64 / total as f64 * 100.0)
}

fn memory_percent_from_meminfo(contents: &str) -> Option<f64> {
    let mut total = None;
    let mut available = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total = first_field_kb(rest);
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available = first_field_kb(rest);
        }
    }
    let total = total?;
    let available = available?;
    if total == 0 {
        return None;
    }
    Some(total.saturating_sub(available) as f64 / total as f64 * 100.0)
}

fn first_field_kb(rest: &str) -> Option<u64> {
    rest.split_whitespace().next()?.parse().ok()
}
