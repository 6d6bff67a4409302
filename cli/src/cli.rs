//! CLI argument parsing with clap derive

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;
use crate::infra::catalog::{ConnectionSettings, DEFAULT_DATABASE};
use crate::infra::command_runner::DEFAULT_REMOTE_TIMEOUT;

/// Manage PXF across a Greenplum cluster
#[derive(Parser)]
#[command(
    name = "pxf",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Host of the coordinator database
    #[arg(long = "pghost", global = true, env = "PGHOST", value_name = "HOST")]
    pub pg_host: Option<String>,

    /// Port of the coordinator database
    #[arg(long = "pgport", global = true, env = "PGPORT", value_name = "PORT")]
    pub pg_port: Option<u16>,

    /// Database user for catalog queries
    #[arg(long = "pguser", global = true, env = "PGUSER", value_name = "USER")]
    pub pg_user: Option<String>,

    /// Database the catalog is read from
    #[arg(
        long = "pgdatabase",
        global = true,
        env = "PGDATABASE",
        value_name = "NAME",
        default_value = DEFAULT_DATABASE
    )]
    pub pg_database: String,

    /// Seconds to wait for each host before giving up on it
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_REMOTE_TIMEOUT.as_secs())]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Perform <command> on each segment host in the cluster
    #[command(subcommand)]
    Cluster(commands::cluster::ClusterCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error only when output cannot be produced; dispatch
    /// failures are reported by the command and reflected in the exit code.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            pg_host,
            pg_port,
            pg_user,
            pg_database,
            timeout,
            command,
        } = self;

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            connection: ConnectionSettings {
                host: pg_host,
                port: pg_port,
                user: pg_user,
                database: pg_database,
            },
            remote_timeout: Duration::from_secs(timeout),
        });

        match command {
            Command::Cluster(cmd) => commands::cluster::run(&app, cmd).await,
        }
    }
}
