// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! CQL session and row counting.

use crate::error::ProbeError;
use async_trait::async_trait;
use scylla::{Session, SessionBuilder};
use tracing::debug;

/// Counts rows in a table over an open database session.
#[async_trait]
pub trait RowCounter {
    async fn count_rows(&self, keyspace: &str, table: &str) -> Result<i64, ProbeError>;
}

/// Row counter backed by a live Cassandra session.
pub struct CassandraRowCounter {
    session: Session,
}

impl CassandraRowCounter {
    /// Opens a session against the contact point and switches to the
    /// given keyspace. Any failure here is fatal to the run.
    pub async fn connect(contact_point: &str, keyspace: &str) -> Result<Self, ProbeError> {
        debug!("Connecting to Cassandra at {contact_point}");
        let session = SessionBuilder::new()
            .known_node(contact_point)
            .build()
            .await
            .map_err(|e| ProbeError::Connect(e.to_string()))?;
        session
            .use_keyspace(keyspace, false)
            .await
            .map_err(|e| ProbeError::Connect(format!("use_keyspace {keyspace}: {e}")))?;
        Ok(Self { session })
    }
}

#[async_trait]
impl RowCounter for CassandraRowCounter {
    async fn count_rows(&self, keyspace: &str, table: &str) -> Result<i64, ProbeError> {
        // Identifiers are validated by ProbeConfig before they reach
        // this query.
        let statement = format!("SELECT COUNT(*) FROM {keyspace}.{table}");
        debug!("Executing {statement}");
        let result = self
            .session
            .query(statement, &[])
            .await
            .map_err(|e| ProbeError::RowCount(e.to_string()))?;
        let (count,) = result
            .single_row_typed::<(i64,)>()
            .map_err(|e| ProbeError::RowCount(e.to_string()))?;
        Ok(count)
    }
}
