// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! One-shot Cassandra metrics probe.
//!
//! A single collection pass samples host CPU and memory from procfs,
//! shells out to `nodetool` for table latency histograms and pending
//! compactions, counts rows over a CQL session, and reads root
//! filesystem utilization from `df`. Each external dependency sits
//! behind a small trait so it can be faked in tests.

pub mod cassandra;
pub mod collector;
pub mod config;
pub mod disk;
pub mod error;
pub mod nodetool;
pub mod system;
