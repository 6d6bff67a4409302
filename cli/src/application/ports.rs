//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;

use anyhow::Result;

use crate::domain::{CommandPlan, RemoteOutput, Scope, SegmentConfig, TopologyError};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Topology Ports ────────────────────────────────────────────────────────────

/// Read access to the database catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogQuery {
    /// Check that the catalog accepts connections.
    async fn ping(&self) -> Result<(), TopologyError>;
    /// Run a segment-configuration query and return its rows.
    async fn query(&self, sql: &str) -> Result<Vec<SegmentConfig>, TopologyError>;
}

/// Identity of the machine this process runs on.
#[allow(async_fn_in_trait)]
pub trait LocalHost {
    /// The local hostname as the cluster catalog would record it.
    async fn hostname(&self) -> Result<String>;
}

// ── Fan-out Port ──────────────────────────────────────────────────────────────

/// Runs a command plan on many hosts at once.
#[allow(async_fn_in_trait)]
pub trait FanOutExecutor {
    /// Run `plan` for every host in `targets` and return one result per
    /// target, in target order. A failing host never aborts the others.
    async fn execute(&self, targets: &[String], scope: Scope, plan: &CommandPlan)
    -> RemoteOutput;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Asks the operator to confirm a destructive operation.
pub trait Confirmation {
    /// Show `prompt` and return `true` only on an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an informational line.
    fn info(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning, such as a deprecation notice.
    fn warn(&self, message: &str);
    /// Emit an error line.
    fn error(&self, message: &str);
}
