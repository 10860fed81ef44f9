// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{env, process::exit, sync::Arc};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use probe_collector::{
    cassandra::CassandraRowCounter, collector::MetricsCollector, config::ProbeConfig,
    disk::DfReader, nodetool::NodetoolRunner, system::ProcfsSampler,
};

#[tokio::main]
pub async fn main() {
    let log_level = env::var("PROBE_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("scylla=off,tokio=off,{}", log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Starting Cassandra metrics probe");

    let config = match ProbeConfig::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Error creating config on probe startup: {e}");
            exit(1);
        }
    };

    // The session is opened before anything else so an unreachable
    // cluster aborts the run with nothing printed.
    let row_counter = match CassandraRowCounter::connect(&config.contact_point, &config.keyspace)
        .await
    {
        Ok(counter) => Arc::new(counter),
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    };

    let collector = MetricsCollector::new(
        Arc::clone(&config),
        Arc::new(ProcfsSampler),
        Arc::new(NodetoolRunner::new(config.nodetool_path.clone())),
        row_counter,
        Arc::new(DfReader::new(config.df_path.clone())),
    );

    let snapshot = match collector.collect().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Metrics collection failed: {e}");
            exit(1);
        }
    };

    print!("{}", snapshot.render());
}
