//! `pxf cluster <command>`: run a PXF lifecycle command on every host.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::ports::FanOutExecutor;
use crate::application::services::dispatch::{Dispatcher, Outcome};
use crate::domain::{CommandPlan, Operation, RemoteOutput, RenderFlags, Scope, plural};
use crate::infra::catalog::PsqlCatalog;
use crate::infra::env::process_lookup;
use crate::infra::host::SystemHost;
use crate::infra::prompt::StdinConfirmation;
use crate::infra::ssh::SshFanOut;
use crate::output::{TerminalReporter, json, progress};

/// Cluster subcommands.
#[derive(Subcommand)]
pub enum ClusterCommand {
    /// Initialize the PXF server instances on coordinator, standby coordinator, and all segment hosts
    Init(InitArgs),
    /// Start the PXF server instances on all segment hosts
    Start,
    /// Stop the PXF server instances on all segment hosts
    Stop,
    /// Get status of PXF servers on all segment hosts
    Status,
    /// Sync PXF configs from coordinator to standby coordinator and all segment hosts
    Sync(SyncArgs),
    /// Reset PXF (undo initialization) on coordinator, standby coordinator, and all segment hosts
    Reset,
    /// Install PXF extension under $GPHOME on coordinator, standby coordinator, and all segment hosts
    Register,
    /// Restart the PXF server on all segment hosts
    Restart,
    /// Prepares a new base directory specified by the $PXF_BASE environment variable
    Prepare,
    /// Migrates configurations from older installations of PXF
    Migrate,
}

/// Arguments for `pxf cluster init`.
#[derive(Args)]
pub struct InitArgs {
    /// Do not install the PXF extension under $GPHOME
    #[arg(long)]
    pub skip_register: bool,
}

/// Arguments for `pxf cluster sync`.
#[derive(Args)]
pub struct SyncArgs {
    /// Delete extraneous files on remote hosts
    #[arg(short, long)]
    pub delete: bool,
}

impl ClusterCommand {
    /// The operation this subcommand dispatches.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::Init(_) => Operation::Init,
            Self::Start => Operation::Start,
            Self::Stop => Operation::Stop,
            Self::Status => Operation::Status,
            Self::Sync(_) => Operation::Sync,
            Self::Reset => Operation::Reset,
            Self::Register => Operation::Register,
            Self::Restart => Operation::Restart,
            Self::Prepare => Operation::Prepare,
            Self::Migrate => Operation::Migrate,
        }
    }

    /// Command-line switches that change the rendered command.
    #[must_use]
    pub fn flags(&self) -> RenderFlags {
        match self {
            Self::Init(args) => RenderFlags {
                skip_register: args.skip_register,
                ..RenderFlags::default()
            },
            Self::Sync(args) => RenderFlags {
                delete_on_sync: args.delete,
                ..RenderFlags::default()
            },
            _ => RenderFlags::default(),
        }
    }
}

/// Shows a spinner while the wrapped executor waits on its hosts.
struct SpinnerFanOut<F> {
    inner: F,
    enabled: bool,
}

impl<F: FanOutExecutor> FanOutExecutor for SpinnerFanOut<F> {
    async fn execute(
        &self,
        targets: &[String],
        scope: Scope,
        plan: &CommandPlan,
    ) -> RemoteOutput {
        if !self.enabled {
            return self.inner.execute(targets, scope, plan).await;
        }
        let pb = progress::spinner(&format!(
            "Waiting for {} host{}",
            targets.len(),
            plural(targets.len())
        ));
        let output = self.inner.execute(targets, scope, plan).await;
        progress::finish(&pb);
        output
    }
}

/// Run a cluster subcommand.
///
/// # Errors
///
/// Returns an error only if the JSON summary cannot be serialized.
pub async fn run(app: &AppContext, cmd: ClusterCommand) -> Result<ExitCode> {
    let op = cmd.operation();
    let catalog = PsqlCatalog::new(app.runner, app.connection.clone());
    let local = SystemHost::new(app.runner);
    let executor = SpinnerFanOut {
        inner: SshFanOut::new(app.runner, app.remote_timeout),
        enabled: app.output.show_progress(),
    };
    let reporter = TerminalReporter::new(&app.output);

    let outcome = Dispatcher {
        catalog: &catalog,
        local: &local,
        executor: &executor,
        confirmation: &StdinConfirmation,
        reporter: &reporter,
        env: &process_lookup,
    }
    .run(op, cmd.flags())
    .await;

    if app.is_json() {
        let doc = match &outcome {
            Outcome::Done(result) => json::format_result(result)?,
            Outcome::Cancelled(op) => json::format_cancelled(*op)?,
            Outcome::Failed(err) => json::format_error(&err.to_string(), err.code())?,
        };
        println!("{doc}");
    }

    Ok(ExitCode::from(outcome.exit_code()))
}
