//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::env::EnvVar;

// ── Environment errors ────────────────────────────────────────────────────────

/// A required environment variable failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("{0} must be set")]
    MissingVar(EnvVar),

    #[error("{0} cannot be blank")]
    BlankVar(EnvVar),
}

// ── Command errors ────────────────────────────────────────────────────────────

/// An operation-specific guard rejected the resolved directories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigConflict {
    #[error("the PXF_BASE value must be different from your PXF installation directory")]
    BaseIsInstallDir,

    #[error(
        "your target PXF_BASE directory must be different from your existing PXF_CONF directory"
    )]
    BaseIsLegacyConf,
}

/// Errors raised while rendering the per-host command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Conflict(#[from] ConfigConflict),

    #[error(transparent)]
    Env(#[from] EnvError),
}

// ── Topology errors ───────────────────────────────────────────────────────────

/// Errors raised while discovering the cluster layout from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error(
        "Could not connect to the database.\n{reason}\n\
Please make sure that your database is running and you are on the coordinator host."
    )]
    Connection { reason: String },

    #[error("pxf cluster commands should only be run from the coordinator host")]
    NotCoordinator { local: String, coordinator: String },

    #[error("catalog query failed: {0}")]
    Query(String),

    #[error("cannot parse catalog row '{row}': {reason}")]
    MalformedRow { row: String, reason: String },

    #[error("cluster configuration has no coordinator (content -1, role primary)")]
    NoCoordinator,

    #[error("cluster configuration has {0} coordinator records, expected exactly one")]
    MultipleCoordinators(usize),

    #[error("cluster configuration has {0} standby coordinator records, expected at most one")]
    MultipleStandbys(usize),
}

// ── Dispatch errors ───────────────────────────────────────────────────────────

/// Every way a dispatch can end before the fan-out runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Conflict(#[from] ConfigConflict),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

impl From<BuildError> for DispatchError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Conflict(c) => Self::Conflict(c),
            BuildError::Env(e) => Self::Env(e),
        }
    }
}

impl DispatchError {
    /// Stable machine-readable code used by `--json` output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Env(EnvError::MissingVar(_)) => "missing_env",
            Self::Env(EnvError::BlankVar(_)) => "blank_env",
            Self::Conflict(_) => "config_conflict",
            Self::Topology(TopologyError::Connection { .. }) => "connection",
            Self::Topology(TopologyError::NotCoordinator { .. }) => "not_coordinator",
            Self::Topology(_) => "topology",
        }
    }
}
