//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod cluster;
pub mod command;
pub mod env;
pub mod error;
pub mod operation;
pub mod report;

pub use cluster::{ClusterSnapshot, Role, SegmentConfig};
pub use command::{CommandPlan, RenderFlags, build, render_command};
pub use env::{EnvVar, ResolvedEnvironment, resolve};
pub use error::{BuildError, ConfigConflict, DispatchError, EnvError, TopologyError};
pub use operation::{HostSummary, Operation, OperationSpec, Scope, plural};
pub use report::{DispatchResult, HostFailure, HostOutput, RemoteOutput, truncate_output};
