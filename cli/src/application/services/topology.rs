//! Cluster topology discovery.
//!
//! Reads the segment configuration through a [`CatalogQuery`], adds the
//! standby coordinator when the scope reaches it, and checks that the CLI
//! runs on the coordinator host.

use crate::application::ports::{CatalogQuery, LocalHost};
use crate::domain::cluster::{ClusterSnapshot, SEGMENT_QUERY, STANDBY_QUERY};
use crate::domain::{Scope, TopologyError};

/// Discover the cluster layout for an operation targeting `scope`.
///
/// # Errors
///
/// Returns [`TopologyError::Connection`] when the catalog is unreachable,
/// [`TopologyError::NotCoordinator`] when run from any other host, and
/// query or validation errors otherwise.
pub async fn discover(
    catalog: &impl CatalogQuery,
    local: &impl LocalHost,
    scope: Scope,
) -> Result<ClusterSnapshot, TopologyError> {
    catalog.ping().await?;

    let mut records = catalog.query(SEGMENT_QUERY).await?;
    tracing::debug!(rows = records.len(), "segment configuration loaded");
    if scope.include_standby {
        let standby = catalog.query(STANDBY_QUERY).await?;
        tracing::debug!(found = !standby.is_empty(), "standby coordinator lookup");
        records.extend(standby);
    }
    let snapshot = ClusterSnapshot::new(records)?;

    let hostname = local
        .hostname()
        .await
        .map_err(|e| TopologyError::Query(format!("cannot determine local hostname: {e:#}")))?;
    snapshot.ensure_coordinator_host(&hostname)?;
    Ok(snapshot)
}
